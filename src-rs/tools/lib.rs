pub mod registry;
pub mod types;

pub use registry::ToolRegistry;
pub use types::{CallToolResult, ToolContent, ToolEntry, ToolHandler, ToolSchema};
