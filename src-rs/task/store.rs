use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use super::types::{Task, TaskSnapshot, TaskStatus};
use crate::process::ProcessEvent;

pub type IdGenerator = Arc<dyn Fn() -> String + Send + Sync>;

pub struct TaskStore {
    tasks: RwLock<HashMap<String, Task>>,
    next_id: IdGenerator,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::with_id_generator(Arc::new(next_id))
    }

    pub fn with_id_generator(next_id: IdGenerator) -> Self {
        Self {
            tasks: RwLock::new(HashMap::new()),
            next_id,
        }
    }

    pub fn create(&self, description: &str) -> Task {
        let task = Task {
            id: (self.next_id)(),
            description: description.to_string(),
            status: TaskStatus::Running,
            output: String::new(),
            error: String::new(),
            start_time: Utc::now(),
        };
        self.put(task.clone());
        task
    }

    /// Inserts `task` under its id. An existing record with the same id is replaced.
    pub fn put(&self, task: Task) {
        if let Ok(mut map) = self.tasks.write() {
            if map.contains_key(&task.id) {
                debug!(task_id = %task.id, "replacing existing task record");
            }
            map.insert(task.id.clone(), task);
        }
    }

    pub fn get(&self, id: &str) -> Option<Task> {
        let map = self.tasks.read().ok()?;
        map.get(id).cloned()
    }

    pub fn snapshot(&self, id: &str, preview_chars: usize) -> Option<TaskSnapshot> {
        let map = self.tasks.read().ok()?;
        map.get(id).map(|task| task.snapshot(preview_chars))
    }

    /// Folds one process event into the task record and returns the resulting status.
    ///
    /// Terminal records are left untouched.
    pub fn apply(&self, id: &str, event: ProcessEvent) -> Option<TaskStatus> {
        let mut map = self.tasks.write().ok()?;
        let task = map.get_mut(id)?;
        if task.status.is_terminal() {
            debug!(task_id = %id, status = %task.status, "ignoring event for finished task");
            return Some(task.status);
        }

        match event {
            ProcessEvent::Stdout(chunk) => task.output.push_str(&String::from_utf8_lossy(&chunk)),
            ProcessEvent::Stderr(chunk) => task.error.push_str(&String::from_utf8_lossy(&chunk)),
            ProcessEvent::Exited(0) => {
                task.status = TaskStatus::Completed;
                info!(task_id = %id, "task completed");
            }
            ProcessEvent::Exited(code) => {
                task.status = TaskStatus::Failed;
                task.error.push_str(&format!("\nProcess exited with code {}", code));
                info!(task_id = %id, code, "task failed");
            }
            ProcessEvent::LaunchFailed(message) => {
                task.status = TaskStatus::Failed;
                task.error.push_str(&format!("\nFailed to start process: {}", message));
                info!(task_id = %id, "task failed to launch");
            }
        }
        Some(task.status)
    }

    pub fn list(&self, limit: usize) -> Vec<Task> {
        let map = match self.tasks.read() {
            Ok(lock) => lock,
            Err(_) => return vec![],
        };
        let mut items: Vec<Task> = map.values().cloned().collect();
        items.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        items.truncate(limit);
        items
    }

    pub fn len(&self) -> usize {
        self.tasks.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

fn next_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(8);
    id
}
