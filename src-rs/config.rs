use crate::error::{Result, TaskError};
use crate::helpers::{env_list, env_or, env_parse};

#[derive(Clone, Debug)]
pub struct RunnerConfig {
    /// Program launched for every task.
    pub command: String,
    /// Arguments placed before the task description.
    pub command_args: Vec<String>,
    pub preview_chars: usize,
    pub port: u16,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            command: "qwen".to_string(),
            command_args: vec!["-p".to_string()],
            preview_chars: 200,
            port: 8080,
        }
    }
}

impl RunnerConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let cfg = Self {
            command: env_or("TASK_RUNNER_COMMAND", defaults.command),
            command_args: env_list("TASK_RUNNER_ARGS").unwrap_or(defaults.command_args),
            preview_chars: env_parse("TASK_RUNNER_PREVIEW_CHARS", defaults.preview_chars),
            port: env_parse("PORT", defaults.port),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.command.trim().is_empty() {
            return Err(TaskError::Config("command must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = RunnerConfig::default();
        assert_eq!(cfg.command, "qwen");
        assert_eq!(cfg.command_args, vec!["-p".to_string()]);
        assert_eq!(cfg.preview_chars, 200);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_blank_command_rejected() {
        let cfg = RunnerConfig {
            command: "  ".to_string(),
            ..RunnerConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(TaskError::Config(_))));
    }
}
