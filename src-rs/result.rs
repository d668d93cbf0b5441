use serde::{Deserialize, Serialize};

pub const STARTED_MESSAGE: &str = "Task started in background. Use check_task_status to view progress.";

/// Acknowledgement returned by `start_new_task`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskStarted {
    pub status: String,
    pub task_id: String,
    pub message: String,
}

impl TaskStarted {
    pub fn new(task_id: &str) -> Self {
        Self {
            status: "started".to_string(),
            task_id: task_id.to_string(),
            message: STARTED_MESSAGE.to_string(),
        }
    }
}
