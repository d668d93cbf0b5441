use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::config::RunnerConfig;
use crate::error::{Result, TaskError};
use crate::process::{CommandLauncher, EventSink, Launcher};
use crate::result::TaskStarted;
use crate::task::{TaskSnapshot, TaskStore};
use crate::tools::{CallToolResult, ToolHandler, ToolRegistry, ToolSchema};

pub const START_TOOL: &str = "start_new_task";
pub const STATUS_TOOL: &str = "check_task_status";

#[derive(Debug, Deserialize)]
struct StartArgs {
    user_task_description: String,
}

#[derive(Debug, Deserialize)]
struct StatusArgs {
    task_id: String,
}

/// Owns the task registry and the launcher, and exposes both operations as tools.
pub struct TaskRunner {
    pub config: RunnerConfig,
    pub tasks: Arc<TaskStore>,
    pub tools: ToolRegistry,
    launcher: Arc<dyn Launcher>,
}

impl TaskRunner {
    pub fn new(config: RunnerConfig) -> Result<Self> {
        config.validate()?;
        let launcher = CommandLauncher::new(&config.command, config.command_args.clone());
        Self::with_parts(config, Arc::new(TaskStore::new()), Arc::new(launcher))
    }

    pub fn with_parts(
        config: RunnerConfig,
        tasks: Arc<TaskStore>,
        launcher: Arc<dyn Launcher>,
    ) -> Result<Self> {
        let runner = Self {
            config,
            tasks,
            tools: ToolRegistry::new(),
            launcher,
        };
        runner.register_tools()?;
        Ok(runner)
    }

    pub fn start_task(&self, description: &str) -> TaskStarted {
        start_task(&self.tasks, self.launcher.as_ref(), description)
    }

    pub fn check_status(&self, task_id: &str) -> Result<TaskSnapshot> {
        self.tasks
            .snapshot(task_id, self.config.preview_chars)
            .ok_or(TaskError::NotFound)
    }

    pub fn call_tool(&self, name: &str, args: Value) -> CallToolResult {
        self.tools.call(name, args)
    }

    fn register_tools(&self) -> Result<()> {
        let tasks = Arc::clone(&self.tasks);
        let launcher = Arc::clone(&self.launcher);
        let start: ToolHandler = Arc::new(move |args: Value| {
            let args: StartArgs = parse_args(args)?;
            let started = start_task(&tasks, launcher.as_ref(), &args.user_task_description);
            Ok(serde_json::to_value(started).unwrap_or(Value::Null))
        });
        self.tools.register(
            START_TOOL,
            start,
            ToolSchema {
                name: START_TOOL.to_string(),
                description: "Starts a new task asynchronously. Returns a Task ID.".to_string(),
                parameters: Some(json!({
                    "type": "object",
                    "properties": {
                        "user_task_description": {
                            "type": "string",
                            "description": "The prompt or description of the task."
                        }
                    },
                    "required": ["user_task_description"]
                })),
            },
        )?;

        let tasks = Arc::clone(&self.tasks);
        let preview_chars = self.config.preview_chars;
        let status: ToolHandler = Arc::new(move |args: Value| {
            let args: StatusArgs = parse_args(args)?;
            let snapshot = tasks
                .snapshot(&args.task_id, preview_chars)
                .ok_or(TaskError::NotFound)?;
            Ok(serde_json::to_value(snapshot).unwrap_or(Value::Null))
        });
        self.tools.register(
            STATUS_TOOL,
            status,
            ToolSchema {
                name: STATUS_TOOL.to_string(),
                description: "Checks the status and gets the output of a running or completed task."
                    .to_string(),
                parameters: Some(json!({
                    "type": "object",
                    "properties": {
                        "task_id": {
                            "type": "string",
                            "description": "The ID of the task to check."
                        }
                    },
                    "required": ["task_id"]
                })),
            },
        )
    }
}

fn start_task(tasks: &Arc<TaskStore>, launcher: &dyn Launcher, description: &str) -> TaskStarted {
    let task = tasks.create(description);
    info!(task_id = %task.id, description = %description, "starting task");
    launcher.launch(description, EventSink::new(&task.id, Arc::clone(tasks)));
    TaskStarted::new(&task.id)
}

fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T> {
    serde_json::from_value(args).map_err(|err| TaskError::InvalidArguments(err.to_string()))
}
