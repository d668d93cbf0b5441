use std::process::ExitCode;
use std::sync::Arc;

use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use task_runner_rs::api::server::TaskServer;
use task_runner_rs::{RunnerConfig, TaskRunner};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = match RunnerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    let port = config.port;

    let runner = match TaskRunner::new(config) {
        Ok(runner) => Arc::new(runner),
        Err(err) => {
            error!("failed to build runner: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let server = TaskServer::new(port, runner);
    if let Err(err) = server.start().await {
        error!("{}", err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
