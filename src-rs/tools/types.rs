use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::TaskError;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub parameters: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolContent {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

/// Result envelope of a tool call. The payload is JSON encoded into a single text block.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CallToolResult {
    pub content: Vec<ToolContent>,
    #[serde(rename = "isError", default, skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl CallToolResult {
    pub fn success(payload: &Value) -> Self {
        Self {
            content: vec![ToolContent::text(payload.to_string())],
            is_error: None,
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            content: vec![ToolContent::text(json!({ "error": message }).to_string())],
            is_error: Some(true),
        }
    }

    pub fn is_error(&self) -> bool {
        self.is_error.unwrap_or(false)
    }

    /// Parses the first text block back into JSON.
    pub fn payload(&self) -> Option<Value> {
        let first = self.content.first()?;
        serde_json::from_str(&first.text).ok()
    }
}

impl ToolContent {
    pub fn text(text: String) -> Self {
        Self {
            kind: "text".to_string(),
            text,
        }
    }
}

pub type ToolHandler = Arc<dyn Fn(Value) -> Result<Value, TaskError> + Send + Sync>;

pub struct ToolEntry {
    pub name: String,
    pub handler: ToolHandler,
    pub schema: ToolSchema,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_omits_is_error() {
        let result = CallToolResult::success(&json!({"status": "started"}));
        let value = serde_json::to_value(&result).unwrap();
        assert!(value.get("isError").is_none());
        assert_eq!(value["content"][0]["type"], "text");
        assert_eq!(result.payload().unwrap()["status"], "started");
    }

    #[test]
    fn test_error_sets_flag() {
        let result = CallToolResult::error("Task ID not found.");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["isError"], true);
        assert_eq!(result.payload().unwrap()["error"], "Task ID not found.");
    }
}
