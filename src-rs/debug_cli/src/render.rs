use std::io::{self, Write};

use crate::models::{CLIConfig, TaskInfo, TaskStatusView, ToolInfo};

pub fn banner(cfg: &CLIConfig) {
    println!("Task Runner Debug CLI");
    println!("API: {}", cfg.base_url);
    println!("Type /help for commands.");
}

pub fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}

pub fn help() {
    println!("Commands:");
    println!("  start <description>    Start a background task");
    println!("  status <id>            Show task status");
    println!("  wait <id>              Poll until the task finishes");
    println!("  tasks [limit]          List recent tasks");
    println!("  tools                  List server tools");
    println!("  /help                  Show commands");
    println!("  /base <url>            Update base URL");
    println!("  /exit | /quit          Exit");
}

pub fn started(task_id: &str, message: &str) {
    println!("started {}", task_id);
    if !message.is_empty() {
        println!("{}", message);
    }
}

pub fn status(view: &TaskStatusView) {
    println!("[{}] {}", view.status, view.id);
    match &view.full_output {
        Some(full) => {
            if !full.is_empty() {
                println!("{}", full);
            }
        }
        None => {
            if !view.output_preview.is_empty() {
                println!("{}", view.output_preview);
            }
        }
    }
    if let Some(err) = &view.error {
        eprintln!("stderr: {}", err.trim_start());
    }
}

pub fn tasks(tasks: &[TaskInfo]) {
    if tasks.is_empty() {
        println!("no tasks");
        return;
    }
    for task in tasks {
        println!("[{}] {} {} - {}", task.status, task.id, task.start_time, task.description);
    }
}

pub fn tools(tools: &[ToolInfo]) {
    if tools.is_empty() {
        println!("no tools");
        return;
    }
    for tool in tools {
        println!("{} - {}", tool.name, tool.description);
    }
}

pub fn info(msg: &str) {
    println!("{}", msg);
}

pub fn error(msg: &str) {
    eprintln!("error: {}", msg);
}
