use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::TaskError;
use crate::runner::TaskRunner;
use crate::tools::CallToolResult;

#[derive(Debug, Deserialize)]
pub struct CallToolRequest {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

#[derive(Debug, Deserialize, Default)]
pub struct TasksQuery {
    pub limit: Option<usize>,
}

pub async fn handle_health(State(runner): State<Arc<TaskRunner>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "tasks": runner.tasks.len(),
    }))
}

pub async fn handle_tasks(
    State(runner): State<Arc<TaskRunner>>,
    Query(query): Query<TasksQuery>,
) -> Json<Value> {
    let limit = query.limit.unwrap_or(10);
    let tasks: Vec<_> = runner.tasks.list(limit).iter().map(|task| task.summary()).collect();
    Json(json!({ "tasks": tasks }))
}

pub async fn handle_list_tools(State(runner): State<Arc<TaskRunner>>) -> Json<Value> {
    Json(json!({ "tools": runner.tools.get_schemas() }))
}

/// Malformed bodies are answered in-band with `isError`, never with a 4xx.
pub async fn handle_call_tool(
    State(runner): State<Arc<TaskRunner>>,
    payload: Result<Json<CallToolRequest>, JsonRejection>,
) -> Json<CallToolResult> {
    match payload {
        Ok(Json(req)) => Json(runner.call_tool(&req.name, req.arguments)),
        Err(rejection) => {
            let err = TaskError::InvalidArguments(rejection.body_text());
            Json(CallToolResult::error(&err.to_string()))
        }
    }
}
