//! Process launching and event wiring.

use std::fmt::Display;
use std::process::Stdio;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::task::TaskStore;

const CHUNK_SIZE: usize = 8192;

/// Everything a running process can tell us about itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProcessEvent {
    Stdout(Vec<u8>),
    Stderr(Vec<u8>),
    /// Exit code; `-1` when the process was terminated by a signal.
    Exited(i32),
    LaunchFailed(String),
}

/// Write handle bound to a single task record.
#[derive(Clone)]
pub struct EventSink {
    task_id: String,
    store: Arc<TaskStore>,
}

impl EventSink {
    pub fn new(task_id: &str, store: Arc<TaskStore>) -> Self {
        Self {
            task_id: task_id.to_string(),
            store,
        }
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    pub fn emit(&self, event: ProcessEvent) {
        if self.store.apply(&self.task_id, event).is_none() {
            warn!(task_id = %self.task_id, "event for unknown task dropped");
        }
    }

    pub fn stdout(&self, chunk: &[u8]) {
        self.emit(ProcessEvent::Stdout(chunk.to_vec()));
    }

    pub fn stderr(&self, chunk: &[u8]) {
        self.emit(ProcessEvent::Stderr(chunk.to_vec()));
    }

    pub fn exited(&self, code: i32) {
        self.emit(ProcessEvent::Exited(code));
    }

    pub fn launch_failed(&self, message: impl Display) {
        self.emit(ProcessEvent::LaunchFailed(message.to_string()));
    }
}

pub trait Launcher: Send + Sync {
    /// Starts the external process for `description` and reports into `sink`.
    /// Must return without waiting on the process.
    fn launch(&self, description: &str, sink: EventSink);
}

/// Runs a fixed program with fixed leading arguments and the task description
/// appended as one final argument. No shell is involved.
pub struct CommandLauncher {
    program: String,
    args: Vec<String>,
}

impl CommandLauncher {
    pub fn new(program: &str, args: Vec<String>) -> Self {
        Self {
            program: program.to_string(),
            args,
        }
    }
}

impl Launcher for CommandLauncher {
    fn launch(&self, description: &str, sink: EventSink) {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(description)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!(task_id = %sink.task_id(), program = %self.program, "spawning process");

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(err) => {
                warn!(task_id = %sink.task_id(), program = %self.program, "failed to spawn: {}", err);
                sink.launch_failed(err);
                return;
            }
        };

        let stdout_handle = child
            .stdout
            .take()
            .map(|stdout| tokio::spawn(pump(stdout, sink.clone(), ProcessEvent::Stdout)));
        let stderr_handle = child
            .stderr
            .take()
            .map(|stderr| tokio::spawn(pump(stderr, sink.clone(), ProcessEvent::Stderr)));

        tokio::spawn(async move {
            // Exit is reported only after both streams hit EOF.
            for handle in [stdout_handle, stderr_handle].into_iter().flatten() {
                if let Err(err) = handle.await {
                    debug!(task_id = %sink.task_id(), "stream reader failed: {}", err);
                }
            }

            let code = match child.wait().await {
                Ok(status) => status.code().unwrap_or(-1),
                Err(err) => {
                    warn!(task_id = %sink.task_id(), "failed to wait on process: {}", err);
                    -1
                }
            };
            debug!(task_id = %sink.task_id(), code, "process exited");
            sink.exited(code);
        });
    }
}

async fn pump<R>(mut reader: R, sink: EventSink, wrap: fn(Vec<u8>) -> ProcessEvent)
where
    R: AsyncRead + Unpin,
{
    let mut chunk = [0u8; CHUNK_SIZE];
    loop {
        match reader.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => sink.emit(wrap(chunk[..n].to_vec())),
            Err(err) => {
                debug!(task_id = %sink.task_id(), "stream read error: {}", err);
                break;
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Task, TaskStatus};
    use std::time::Duration;

    async fn wait_terminal(store: &TaskStore, id: &str) -> Task {
        for _ in 0..200 {
            let task = store.get(id).unwrap();
            if task.status.is_terminal() {
                return task;
            }
            tokio::time::sleep(Duration::from_millis(25)).await;
        }
        panic!("task {} never finished", id);
    }

    #[test]
    fn test_sink_routes_into_store() {
        let store = Arc::new(TaskStore::new());
        let task = store.create("x");
        let sink = EventSink::new(&task.id, Arc::clone(&store));
        sink.stdout(b"out");
        sink.stderr(b"err");
        sink.exited(0);

        let stored = store.get(&task.id).unwrap();
        assert_eq!(stored.output, "out");
        assert_eq!(stored.error, "err");
        assert_eq!(stored.status, TaskStatus::Completed);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_launcher_collects_output() {
        let store = Arc::new(TaskStore::new());
        let task = store.create("printf hello; printf oops >&2");
        let launcher = CommandLauncher::new("sh", vec!["-c".to_string()]);
        launcher.launch(&task.description, EventSink::new(&task.id, Arc::clone(&store)));

        let done = wait_terminal(&store, &task.id).await;
        assert_eq!(done.status, TaskStatus::Completed);
        assert_eq!(done.output, "hello");
        assert_eq!(done.error, "oops");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_launcher_nonzero_exit() {
        let store = Arc::new(TaskStore::new());
        let task = store.create("exit 3");
        let launcher = CommandLauncher::new("sh", vec!["-c".to_string()]);
        launcher.launch(&task.description, EventSink::new(&task.id, Arc::clone(&store)));

        let done = wait_terminal(&store, &task.id).await;
        assert_eq!(done.status, TaskStatus::Failed);
        assert!(done.error.contains("Process exited with code 3"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_launcher_signal_exit_reports_minus_one() {
        let store = Arc::new(TaskStore::new());
        let task = store.create("kill -9 $$");
        let launcher = CommandLauncher::new("sh", vec!["-c".to_string()]);
        launcher.launch(&task.description, EventSink::new(&task.id, Arc::clone(&store)));

        let done = wait_terminal(&store, &task.id).await;
        assert_eq!(done.status, TaskStatus::Failed);
        assert!(done.error.contains("Process exited with code -1"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_description_is_not_shell_interpreted() {
        let store = Arc::new(TaskStore::new());
        let task = store.create("a; echo injected");
        let launcher = CommandLauncher::new("echo", Vec::new());
        launcher.launch(&task.description, EventSink::new(&task.id, Arc::clone(&store)));

        let done = wait_terminal(&store, &task.id).await;
        assert_eq!(done.status, TaskStatus::Completed);
        assert_eq!(done.output, "a; echo injected\n");
    }

    #[tokio::test]
    async fn test_missing_program_fails_to_launch() {
        let store = Arc::new(TaskStore::new());
        let task = store.create("anything");
        let launcher = CommandLauncher::new("definitely-not-a-real-program-4f1c", Vec::new());
        launcher.launch(&task.description, EventSink::new(&task.id, Arc::clone(&store)));

        let done = store.get(&task.id).unwrap();
        assert_eq!(done.status, TaskStatus::Failed);
        assert!(done.error.contains("Failed to start process: "));
    }
}
