use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;
use tracing::debug;

use super::types::{CallToolResult, ToolEntry, ToolHandler, ToolSchema};
use crate::error::{Result, TaskError};

pub struct ToolRegistry {
    tools: RwLock<HashMap<String, ToolEntry>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: RwLock::new(HashMap::new()),
        }
    }

    pub fn register(&self, name: &str, handler: ToolHandler, mut schema: ToolSchema) -> Result<()> {
        if name.is_empty() {
            return Err(TaskError::InvalidTool);
        }
        if schema.name.is_empty() {
            schema.name = name.to_string();
        }
        if schema.name != name {
            return Err(TaskError::InvalidTool);
        }

        let mut map = self
            .tools
            .write()
            .map_err(|_| TaskError::Server("tool registry lock poisoned".to_string()))?;
        if map.contains_key(name) {
            return Err(TaskError::ToolAlreadyRegistered(name.to_string()));
        }
        map.insert(
            name.to_string(),
            ToolEntry {
                name: name.to_string(),
                handler,
                schema,
            },
        );
        Ok(())
    }

    /// Runs the named tool. Failures are reported in-band through `isError`.
    pub fn call(&self, name: &str, args: Value) -> CallToolResult {
        let map = match self.tools.read() {
            Ok(lock) => lock,
            Err(_) => return CallToolResult::error("tool registry lock poisoned"),
        };

        let entry = match map.get(name) {
            Some(entry) => entry,
            None => return CallToolResult::error(&TaskError::ToolNotFound(name.to_string()).to_string()),
        };

        match (entry.handler)(args) {
            Ok(payload) => CallToolResult::success(&payload),
            Err(err) => {
                debug!(tool = %entry.name, "tool call failed: {}", err);
                CallToolResult::error(&err.to_string())
            }
        }
    }

    pub fn get_schemas(&self) -> Vec<ToolSchema> {
        let map = match self.tools.read() {
            Ok(lock) => lock,
            Err(_) => return vec![],
        };
        let mut schemas: Vec<ToolSchema> = map.values().map(|entry| entry.schema.clone()).collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    pub fn has(&self, name: &str) -> bool {
        let map = match self.tools.read() {
            Ok(lock) => lock,
            Err(_) => return false,
        };
        map.contains_key(name)
    }

    pub fn count(&self) -> usize {
        let map = match self.tools.read() {
            Ok(lock) => lock,
            Err(_) => return 0,
        };
        map.len()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    fn echo_schema(name: &str) -> ToolSchema {
        ToolSchema {
            name: name.to_string(),
            description: "echo".to_string(),
            parameters: None,
        }
    }

    fn echo() -> ToolHandler {
        Arc::new(|args: Value| Ok(args))
    }

    #[test]
    fn test_register_and_call() {
        let registry = ToolRegistry::new();
        registry.register("echo", echo(), echo_schema("")).unwrap();
        assert!(registry.has("echo"));
        assert_eq!(registry.count(), 1);
        assert_eq!(registry.get_schemas()[0].name, "echo");

        let result = registry.call("echo", json!({"a": 1}));
        assert!(!result.is_error());
        assert_eq!(result.payload().unwrap()["a"], 1);
    }

    #[test]
    fn test_register_rejects_bad_entries() {
        let registry = ToolRegistry::new();
        assert!(matches!(
            registry.register("", echo(), echo_schema("")),
            Err(TaskError::InvalidTool)
        ));
        assert!(matches!(
            registry.register("echo", echo(), echo_schema("other")),
            Err(TaskError::InvalidTool)
        ));
        registry.register("echo", echo(), echo_schema("echo")).unwrap();
        assert!(matches!(
            registry.register("echo", echo(), echo_schema("echo")),
            Err(TaskError::ToolAlreadyRegistered(_))
        ));
    }

    #[test]
    fn test_unknown_tool_is_error_result() {
        let registry = ToolRegistry::new();
        let result = registry.call("missing", json!({}));
        assert!(result.is_error());
        assert_eq!(result.payload().unwrap()["error"], "tool not found: missing");
    }

    #[test]
    fn test_handler_error_is_flagged() {
        let registry = ToolRegistry::new();
        let failing: ToolHandler = Arc::new(|_: Value| Err(TaskError::NotFound));
        registry.register("fail", failing, echo_schema("fail")).unwrap();
        let result = registry.call("fail", json!({}));
        assert!(result.is_error());
        assert_eq!(result.payload().unwrap()["error"], "Task ID not found.");
    }
}
