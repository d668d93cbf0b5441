use std::io;
use std::thread;
use std::time::Duration;

use serde_json::json;

use crate::client::HTTPClient;
use crate::models::{CLIConfig, TaskStatusView};
use crate::render;

const START_TOOL: &str = "start_new_task";
const STATUS_TOOL: &str = "check_task_status";

pub struct REPL {
    pub config: CLIConfig,
    pub client: HTTPClient,
}

impl REPL {
    pub fn new(config: CLIConfig, client: HTTPClient) -> Self {
        Self { config, client }
    }

    pub fn run(&mut self) {
        render::banner(&self.config);
        loop {
            render::prompt();
            let mut line = String::new();
            match io::stdin().read_line(&mut line) {
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }
            let line = line.trim().to_string();
            if line.is_empty() {
                continue;
            }
            if self.handle_line(&line) {
                break;
            }
        }
    }

    fn handle_line(&mut self, line: &str) -> bool {
        let mut parts = line.splitn(2, ' ');
        let cmd = parts.next().unwrap_or("");
        let rest = parts.next().unwrap_or("").trim();
        match cmd {
            "/exit" | "/quit" => return true,
            "/help" => render::help(),
            "/base" => {
                if rest.is_empty() {
                    render::info(&format!("base: {}", self.config.base_url));
                } else {
                    match HTTPClient::new(rest) {
                        Ok(client) => {
                            self.config.base_url = rest.to_string();
                            self.client = client;
                            render::info("base url updated");
                        }
                        Err(err) => render::error(&err),
                    }
                }
            }
            "start" => self.start(rest),
            "status" => {
                if let Some(view) = self.status(rest) {
                    render::status(&view);
                }
            }
            "wait" => self.wait(rest),
            "tasks" => {
                let limit = rest.parse::<usize>().unwrap_or(10);
                match self.client.list_tasks(limit) {
                    Ok(tasks) => render::tasks(&tasks),
                    Err(err) => render::error(&err),
                }
            }
            "tools" => match self.client.list_tools() {
                Ok(tools) => render::tools(&tools),
                Err(err) => render::error(&err),
            },
            _ => render::info("unknown command, type /help"),
        }
        false
    }

    fn start(&self, description: &str) {
        match self
            .client
            .call_tool(START_TOOL, json!({ "user_task_description": description }))
        {
            Ok(result) => {
                let payload = result.payload();
                if result.is_error() {
                    render::error(payload["error"].as_str().unwrap_or("start failed"));
                    return;
                }
                render::started(
                    payload["task_id"].as_str().unwrap_or_default(),
                    payload["message"].as_str().unwrap_or_default(),
                );
            }
            Err(err) => render::error(&err),
        }
    }

    fn status(&self, task_id: &str) -> Option<TaskStatusView> {
        if task_id.is_empty() {
            render::error("task id required");
            return None;
        }
        let result = match self.client.call_tool(STATUS_TOOL, json!({ "task_id": task_id })) {
            Ok(result) => result,
            Err(err) => {
                render::error(&err);
                return None;
            }
        };
        let payload = result.payload();
        if result.is_error() {
            render::error(payload["error"].as_str().unwrap_or("status check failed"));
            return None;
        }
        match serde_json::from_value::<TaskStatusView>(payload) {
            Ok(view) => Some(view),
            Err(err) => {
                render::error(&err.to_string());
                None
            }
        }
    }

    fn wait(&self, task_id: &str) {
        let interval = Duration::from_millis(self.config.poll_interval_ms);
        loop {
            let view = match self.status(task_id) {
                Some(view) => view,
                None => return,
            };
            if !view.is_running() {
                render::status(&view);
                return;
            }
            thread::sleep(interval);
        }
    }
}
