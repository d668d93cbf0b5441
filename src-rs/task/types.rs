use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Running,
    Completed,
    Failed,
}

impl TaskStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Running => "running",
            TaskStatus::Completed => "completed",
            TaskStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub description: String,
    pub status: TaskStatus,
    pub output: String,
    pub error: String,
    pub start_time: DateTime<Utc>,
}

/// Point-in-time view of a task as returned by `check_task_status`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    pub id: String,
    pub status: TaskStatus,
    pub output_preview: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Listing entry; carries no output.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TaskSummary {
    pub id: String,
    pub description: String,
    pub status: TaskStatus,
    pub start_time: DateTime<Utc>,
}

impl Task {
    pub fn summary(&self) -> TaskSummary {
        TaskSummary {
            id: self.id.clone(),
            description: self.description.clone(),
            status: self.status,
            start_time: self.start_time,
        }
    }

    pub fn snapshot(&self, preview_chars: usize) -> TaskSnapshot {
        TaskSnapshot {
            id: self.id.clone(),
            status: self.status,
            output_preview: preview(&self.output, preview_chars),
            full_output: if self.status.is_terminal() {
                Some(self.output.clone())
            } else {
                None
            },
            error: if self.error.is_empty() {
                None
            } else {
                Some(self.error.clone())
            },
        }
    }
}

/// First `limit` characters of `text`, with `...` appended when anything was cut.
pub fn preview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task_with_output(output: &str, status: TaskStatus) -> Task {
        Task {
            id: "abcd1234".to_string(),
            description: "test task".to_string(),
            status,
            output: output.to_string(),
            error: String::new(),
            start_time: Utc::now(),
        }
    }

    #[test]
    fn test_preview_short_output_is_verbatim() {
        assert_eq!(preview("Processing...", 200), "Processing...");
        assert_eq!(preview("", 200), "");
    }

    #[test]
    fn test_preview_exactly_at_limit_is_not_truncated() {
        let text = "b".repeat(200);
        assert_eq!(preview(&text, 200), text);
    }

    #[test]
    fn test_preview_truncates_long_output() {
        let text = "a".repeat(205);
        let out = preview(&text, 200);
        assert_eq!(out.chars().count(), 203);
        assert!(out.ends_with("..."));
        assert!(out.starts_with(&"a".repeat(200)));
    }

    #[test]
    fn test_preview_counts_characters_not_bytes() {
        let text = "é".repeat(201);
        let out = preview(&text, 200);
        assert_eq!(out.chars().count(), 203);
        assert!(out.starts_with(&"é".repeat(200)));
    }

    #[test]
    fn test_snapshot_hides_full_output_while_running() {
        let snap = task_with_output("partial", TaskStatus::Running).snapshot(200);
        assert_eq!(snap.full_output, None);
        assert_eq!(snap.error, None);

        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["status"], "running");
        assert!(json.get("full_output").is_none());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_snapshot_includes_full_output_when_terminal() {
        let long = "x".repeat(300);
        let mut task = task_with_output(&long, TaskStatus::Completed);
        task.error = "warn".to_string();
        let snap = task.snapshot(200);
        assert_eq!(snap.full_output.as_deref(), Some(long.as_str()));
        assert_eq!(snap.output_preview.chars().count(), 203);
        assert_eq!(snap.error.as_deref(), Some("warn"));
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_value(TaskStatus::Failed).unwrap(), "failed");
        assert!(!TaskStatus::Running.is_terminal());
        assert!(TaskStatus::Completed.is_terminal());
    }
}
