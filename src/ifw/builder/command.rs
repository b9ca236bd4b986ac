//! External command lines and the runner that executes them.

use std::{
    fmt,
    path::{Path, PathBuf},
    process::Stdio,
    time::Duration,
};

/// A program plus its argument list.
///
/// Displays as the space-joined command line written to the diagnostic log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(&mut self, arg: impl Into<String>) -> &mut Self {
        self.args.push(arg.into());
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Value following the first occurrence of `flag`, if any.
    pub fn flag_value(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.args.iter().any(|a| a == flag)
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// What running a command produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// The process started and ran to completion.
    pub succeeded: bool,
    /// Exit code, when the process exited normally.
    pub exit_code: Option<i32>,
    /// Captured stdout followed by stderr, or the launch error.
    pub output: String,
}

impl CommandOutput {
    /// Ran to completion with exit code zero.
    pub fn is_success(&self) -> bool {
        self.succeeded && self.exit_code == Some(0)
    }
}

/// Runs external commands to completion.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    async fn run(&self, command: &CommandLine) -> CommandOutput;
}

/// [`CommandRunner`] spawning real processes with `tokio::process`.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    working_dir: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run commands inside `dir`.
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Kill commands still running after `timeout`.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl CommandRunner for ProcessRunner {
    async fn run(&self, command: &CommandLine) -> CommandOutput {
        let mut cmd = tokio::process::Command::new(command.program());
        cmd.args(command.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        let finished = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, cmd.output()).await {
                Ok(result) => result,
                Err(_) => {
                    return CommandOutput {
                        succeeded: false,
                        exit_code: None,
                        output: format!("killed after exceeding the {}s time limit", limit.as_secs()),
                    };
                }
            },
            None => cmd.output().await,
        };

        match finished {
            Ok(output) => {
                let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
                text.push_str(&String::from_utf8_lossy(&output.stderr));
                CommandOutput {
                    succeeded: true,
                    exit_code: output.status.code(),
                    output: text,
                }
            }
            Err(e) => CommandOutput {
                succeeded: false,
                exit_code: None,
                output: format!("failed to execute {}: {e}", command.program().display()),
            },
        }
    }
}
