use std::env;

use crate::models::CLIConfig;

const DEFAULT_URL: &str = "http://localhost:8080";
const DEFAULT_POLL_MS: u64 = 1000;

pub fn parse_config() -> CLIConfig {
    let args: Vec<String> = env::args().collect();
    parse_args(&args, env_or("TASK_RUNNER_URL", DEFAULT_URL.to_string()))
}

fn parse_args(args: &[String], base_url: String) -> CLIConfig {
    let mut cfg = CLIConfig {
        base_url,
        poll_interval_ms: DEFAULT_POLL_MS,
    };

    let mut idx = 1;
    while idx < args.len() {
        match args[idx].as_str() {
            "--base" => {
                if let Some(value) = args.get(idx + 1) {
                    cfg.base_url = value.clone();
                    idx += 1;
                }
            }
            "--interval" => {
                if let Some(value) = args.get(idx + 1) {
                    if let Ok(parsed) = value.parse::<u64>() {
                        cfg.poll_interval_ms = parsed;
                    }
                    idx += 1;
                }
            }
            _ => {}
        }
        idx += 1;
    }

    cfg
}

fn env_or(key: &str, fallback: String) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => fallback,
    }
}
