pub mod config;
pub mod error;
pub mod helpers;
pub mod process;
pub mod result;
pub mod runner;

#[path = "tools/lib.rs"]
pub mod tools;
#[path = "task/lib.rs"]
pub mod task;
#[path = "api/lib.rs"]
pub mod api;

pub use config::RunnerConfig;
pub use error::TaskError;
pub use result::TaskStarted;
pub use runner::TaskRunner;
