pub mod store;
pub mod types;

pub use store::{IdGenerator, TaskStore};
pub use types::{preview, Task, TaskSnapshot, TaskStatus, TaskSummary};
