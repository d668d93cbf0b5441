use reqwest::blocking::Client;
use serde_json::Value;

use crate::models::{CallToolRequest, CallToolResult, TaskInfo, ToolInfo};

pub struct HTTPClient {
    pub base_url: String,
    client: Client,
}

impl HTTPClient {
    pub fn new(base_url: &str) -> Result<Self, String> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|err| err.to_string())?;
        Ok(Self {
            base_url: base_url.to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    pub fn call_tool(&self, name: &str, arguments: Value) -> Result<CallToolResult, String> {
        let req = CallToolRequest {
            name: name.to_string(),
            arguments,
        };
        let resp = self
            .client
            .post(self.url("/tools/call"))
            .json(&req)
            .send()
            .map_err(|err| err.to_string())?;

        if resp.status().is_success() {
            resp.json::<CallToolResult>().map_err(|err| err.to_string())
        } else {
            let status = resp.status();
            let body = resp.text().unwrap_or_default();
            Err(format!("http {}: {}", status.as_u16(), body))
        }
    }

    pub fn list_tools(&self) -> Result<Vec<ToolInfo>, String> {
        let resp = self
            .client
            .get(self.url("/tools"))
            .send()
            .map_err(|err| err.to_string())?;
        if resp.status().is_success() {
            let value = resp
                .json::<Value>()
                .map_err(|err| err.to_string())?;
            let tools = value
                .get("tools")
                .and_then(|v| v.as_array())
                .cloned()
                .unwrap_or_default();
            let mut out = Vec::new();
            for item in tools {
                if let Ok(tool) = serde_json::from_value::<ToolInfo>(item) {
                    out.push(tool);
                }
            }
            Ok(out)
        } else {
            let status = resp.status();
            let body = resp.text().unwrap_or_default();
            Err(format!("http {}: {}", status.as_u16(), body))
        }
    }

    pub fn list_tasks(&self, limit: usize) -> Result<Vec<TaskInfo>, String> {
        let url = format!("{}?limit={}", self.url("/tasks"), limit);
        let resp = self.client.get(url).send().map_err(|err| err.to_string())?;
        if resp.status().is_success() {
            let value = resp
                .json::<Value>()
                .map_err(|err| err.to_string())?;
            let tasks = value
                .get("tasks")
                .and_then(|v| v.as_array())
                .cloned()
                .unwrap_or_default();
            let mut out = Vec::new();
            for item in tasks {
                if let Ok(task) = serde_json::from_value::<TaskInfo>(item) {
                    out.push(task);
                }
            }
            Ok(out)
        } else {
            let status = resp.status();
            let body = resp.text().unwrap_or_default();
            Err(format!("http {}: {}", status.as_u16(), body))
        }
    }
}
