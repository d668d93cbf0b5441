use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tracing::info;

use crate::api::handlers::{handle_call_tool, handle_health, handle_list_tools, handle_tasks};
use crate::error::{Result, TaskError};
use crate::runner::TaskRunner;

pub struct TaskServer {
    pub port: u16,
    pub runner: Arc<TaskRunner>,
}

impl TaskServer {
    pub fn new(port: u16, runner: Arc<TaskRunner>) -> Self {
        Self { port, runner }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handle_health))
            .route("/tasks", get(handle_tasks))
            .route("/tools", get(handle_list_tools))
            .route("/tools/call", post(handle_call_tool))
            .with_state(self.runner.clone())
    }

    pub async fn start(&self) -> Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!(%addr, "task-runner listening");
        axum::Server::bind(&addr)
            .serve(self.router().into_make_service())
            .await
            .map_err(|err| TaskError::Server(err.to_string()))
    }
}
