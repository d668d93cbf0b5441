pub use crate::config::RunnerConfig;
pub use crate::runner::TaskRunner;
pub use crate::task::{Task, TaskSnapshot, TaskStatus, TaskStore};
pub use crate::tools::{CallToolResult, ToolRegistry, ToolSchema};

pub mod handlers;
pub mod server;
