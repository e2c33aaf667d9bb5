use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Why a single invocation did not succeed
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandRunnerError {
    #[error("{}", exit_message(.exit_code))]
    CommandFailed { exit_code: Option<i32> },

    #[error("Command timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    #[error("Process spawn failed: {0}")]
    SpawnFailed(String),
}

fn exit_message(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// Captured outcome of one inspection command.
///
/// Standard output and standard error are kept apart. A non-zero exit,
/// a launch failure and a timeout are all reported through `failure`.
#[derive(Debug, Clone, Default)]
pub struct InspectionResult {
    /// Standard output
    pub stdout: Vec<u8>,

    /// Standard error output
    pub stderr: Vec<u8>,

    /// Set when the command did not exit successfully
    pub failure: Option<CommandRunnerError>,
}

impl InspectionResult {
    /// A successful run with the given standard output
    pub fn success(stdout: impl Into<Vec<u8>>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: Vec::new(),
            failure: None,
        }
    }

    /// A failed run with the given diagnostic stream
    pub fn failure(error: CommandRunnerError, stderr: impl Into<Vec<u8>>) -> Self {
        Self {
            stdout: Vec::new(),
            stderr: stderr.into(),
            failure: Some(error),
        }
    }

    /// Whether the command failed
    pub fn failed(&self) -> bool {
        self.failure.is_some()
    }

    /// Standard output decoded lossily and trimmed
    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).trim().to_string()
    }

    /// Standard error decoded lossily and trimmed
    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim().to_string()
    }
}

/// Runs a read-only command against one working copy
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run the tool with `-C <location>` followed by `args`.
    ///
    /// Never fails: every problem is folded into the returned result.
    async fn run(&self, location: &Path, args: &[String]) -> InspectionResult;
}

/// Configuration for the subprocess runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Executable to invoke
    pub executable: String,

    /// Upper bound on a single invocation
    pub timeout: Option<Duration>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            executable: "git".to_string(),
            timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl RunnerConfig {
    /// Create a new runner config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the executable
    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = executable.into();
        self
    }

    /// Set the per-invocation timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Remove the per-invocation timeout
    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }
}

/// Subprocess-backed runner for the git executable
#[derive(Debug, Clone, Default)]
pub struct GitCommandRunner {
    config: RunnerConfig,
}

impl GitCommandRunner {
    /// Create a runner with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runner with the given configuration
    pub fn with_config(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    fn build_command(&self, location: &Path, args: &[String]) -> Command {
        let mut cmd = Command::new(&self.config.executable);
        cmd.arg("-C").arg(location).args(args);
        // Status must not take index.lock on someone else's working copy
        cmd.env("GIT_OPTIONAL_LOCKS", "0");
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        // Dropping the future (timeout, cancellation) kills the child
        cmd.kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl CommandRunner for GitCommandRunner {
    async fn run(&self, location: &Path, args: &[String]) -> InspectionResult {
        let start_time = Instant::now();
        let mut cmd = self.build_command(location, args);

        debug!(
            "Running {} -C {} {}",
            self.config.executable,
            location.display(),
            args.join(" ")
        );

        let output = match self.config.timeout {
            Some(limit) => match timeout(limit, cmd.output()).await {
                Ok(output) => output,
                Err(_) => {
                    let timeout_ms = limit.as_millis() as u64;
                    warn!(
                        "{} {} timed out in {}",
                        self.config.executable,
                        args.join(" "),
                        location.display()
                    );
                    return InspectionResult::failure(
                        CommandRunnerError::Timeout { timeout_ms },
                        Vec::new(),
                    );
                }
            },
            None => cmd.output().await,
        };

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                warn!("Failed to spawn '{}': {}", self.config.executable, e);
                let error = CommandRunnerError::SpawnFailed(format!(
                    "Failed to spawn '{}': {}",
                    self.config.executable, e
                ));
                return InspectionResult::failure(error, e.to_string());
            }
        };

        debug!(
            "{} {} finished in {} ms with {}",
            self.config.executable,
            args.join(" "),
            start_time.elapsed().as_millis(),
            output.status
        );

        let failure = if output.status.success() {
            None
        } else {
            Some(CommandRunnerError::CommandFailed {
                exit_code: output.status.code(),
            })
        };

        InspectionResult {
            stdout: output.stdout,
            stderr: output.stderr,
            failure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_arguments_are_prefixed_with_location() {
        let temp_dir = TempDir::new().unwrap();
        let runner = GitCommandRunner::with_config(RunnerConfig::new().with_executable("echo"));

        let result = runner
            .run(temp_dir.path(), &args(&["rev-parse", "--short", "HEAD"]))
            .await;

        assert!(!result.failed());
        assert_eq!(
            result.stdout_text(),
            format!("-C {} rev-parse --short HEAD", temp_dir.path().display())
        );
        assert!(result.stderr.is_empty());
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_reported_not_raised() {
        let temp_dir = TempDir::new().unwrap();
        let runner = GitCommandRunner::with_config(RunnerConfig::new().with_executable("false"));

        let result = runner.run(temp_dir.path(), &[]).await;

        assert!(result.failed());
        assert_eq!(
            result.failure,
            Some(CommandRunnerError::CommandFailed { exit_code: Some(1) })
        );
        assert_eq!(result.failure.unwrap().to_string(), "exit status 1");
    }

    #[tokio::test]
    async fn test_missing_executable_is_a_failure() {
        let temp_dir = TempDir::new().unwrap();
        let runner = GitCommandRunner::with_config(
            RunnerConfig::new().with_executable("gitfan-no-such-binary"),
        );

        let result = runner.run(temp_dir.path(), &args(&["status"])).await;

        assert!(result.failed());
        assert!(matches!(result.failure, Some(CommandRunnerError::SpawnFailed(_))));
        assert!(!result.stderr_text().is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_slow_command_times_out() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let script = temp_dir.path().join("slow.sh");
        std::fs::write(&script, "#!/bin/sh\nsleep 5\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let runner = GitCommandRunner::with_config(
            RunnerConfig::new()
                .with_executable(script.display().to_string())
                .with_timeout(Duration::from_millis(200)),
        );

        let start = Instant::now();
        let result = runner.run(temp_dir.path(), &args(&["status"])).await;

        assert!(start.elapsed() < Duration::from_secs(4));
        assert_eq!(
            result.failure,
            Some(CommandRunnerError::Timeout { timeout_ms: 200 })
        );
    }

    #[test]
    fn test_runner_config() {
        let config = RunnerConfig::new()
            .with_executable("/usr/local/bin/git")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.executable, "/usr/local/bin/git");
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        assert!(RunnerConfig::new().without_timeout().timeout.is_none());
    }

    #[test]
    fn test_inspection_result_text_is_trimmed() {
        let result = InspectionResult::success("main\n");
        assert_eq!(result.stdout_text(), "main");
        let failed = InspectionResult::failure(
            CommandRunnerError::CommandFailed { exit_code: Some(128) },
            "fatal: not a git repository\n",
        );
        assert!(failed.failed());
        assert_eq!(failed.stderr_text(), "fatal: not a git repository");
    }
}
