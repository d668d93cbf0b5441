use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug)]
pub struct CLIConfig {
    pub base_url: String,
    pub poll_interval_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct CallToolRequest {
    pub name: String,
    pub arguments: Value,
}

#[derive(Debug, Deserialize)]
pub struct ToolContent {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct CallToolResult {
    pub content: Vec<ToolContent>,
    #[serde(rename = "isError", default)]
    pub is_error: Option<bool>,
}

impl CallToolResult {
    pub fn is_error(&self) -> bool {
        self.is_error.unwrap_or(false)
    }

    pub fn payload(&self) -> Value {
        self.content
            .iter()
            .find(|c| c.kind == "text")
            .and_then(|c| serde_json::from_str(&c.text).ok())
            .unwrap_or(Value::Null)
    }
}

#[derive(Debug, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct TaskInfo {
    pub id: String,
    pub status: String,
    pub description: String,
    pub start_time: String,
}

#[derive(Debug, Deserialize)]
pub struct TaskStatusView {
    pub id: String,
    pub status: String,
    pub output_preview: String,
    pub full_output: Option<String>,
    pub error: Option<String>,
}

impl TaskStatusView {
    pub fn is_running(&self) -> bool {
        self.status == "running"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_error_result() {
        let raw = r#"{"content":[{"type":"text","text":"{\"error\":\"Task ID not found.\"}"}],"isError":true}"#;
        let result: CallToolResult = serde_json::from_str(raw).unwrap();
        assert!(result.is_error());
        assert_eq!(result.payload()["error"], "Task ID not found.");
    }

    #[test]
    fn test_parses_running_status() {
        let raw = r#"{"id":"ab12cd34","status":"running","output_preview":"x"}"#;
        let view: TaskStatusView = serde_json::from_str(raw).unwrap();
        assert!(view.is_running());
        assert!(view.full_output.is_none());
        assert!(view.error.is_none());
    }
}
