//! External command execution.
//!
//! Handlers never spawn processes directly. They receive a [`CommandRunner`],
//! which lets tests script git and interpreter responses without touching the
//! real toolchain.

use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::debug_event;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Error, Debug)]
pub enum RunError {
    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed waiting for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

pub type RunResult<T> = Result<T, RunError>;

/// Captured result of one command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` when killed by a signal or on timeout
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub timed_out: bool,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0) && !self.timed_out
    }

    /// Trimmed stdout of a successful run, `None` otherwise or when empty.
    pub fn stdout_if_success(&self) -> Option<&str> {
        if !self.success() {
            return None;
        }
        let out = self.stdout.trim();
        (!out.is_empty()).then_some(out)
    }
}

/// Capability to run an external program.
pub trait CommandRunner {
    /// Run `program args...` in `cwd`. With a timeout the child is killed on
    /// expiry and the output is flagged `timed_out`; without one the call
    /// blocks until the child exits.
    fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: &Path,
        timeout: Option<Duration>,
    ) -> RunResult<CommandOutput>;
}

/// Runs real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: &Path,
        timeout: Option<Duration>,
    ) -> RunResult<CommandOutput> {
        debug_event!("process", "run", "{program} {}", args.join(" "));

        let mut command = Command::new(program);
        command.args(args).current_dir(cwd).stdin(Stdio::null());

        let Some(timeout) = timeout else {
            let output = command.output().map_err(|source| RunError::Spawn {
                program: program.to_string(),
                source,
            })?;
            return Ok(CommandOutput {
                status: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                timed_out: false,
            });
        };

        let child = command
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RunError::Spawn {
                program: program.to_string(),
                source,
            })?;
        wait_with_deadline(child, program, timeout)
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        String::from_utf8_lossy(&buf).into_owned()
    })
}

/// Poll the child until it exits or the deadline passes, reading both pipes
/// on helper threads so a chatty child cannot block on a full pipe.
fn wait_with_deadline(mut child: Child, program: &str, timeout: Duration) -> RunResult<CommandOutput> {
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());
    let deadline = Instant::now() + timeout;
    let wait_err = |source| RunError::Wait {
        program: program.to_string(),
        source,
    };

    let (status, timed_out) = loop {
        match child.try_wait().map_err(wait_err)? {
            Some(status) => break (status.code(), false),
            None if Instant::now() >= deadline => {
                debug_event!("process", "timeout", "{program} after {timeout:?}");
                let _ = child.kill();
                child.wait().map_err(wait_err)?;
                break (None, true);
            }
            None => thread::sleep(POLL_INTERVAL),
        }
    };

    Ok(CommandOutput {
        status,
        stdout: stdout.join().unwrap_or_default(),
        stderr: stderr.join().unwrap_or_default(),
        timed_out,
    })
}
