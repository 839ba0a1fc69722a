//! Process transport for the server under test
//!
//! One transport call owns one child process for its whole lifetime: spawn,
//! write the request batch to stdin, close stdin, drain stdout/stderr until
//! the server exits, tear down. The exchange is batch and non-interactive;
//! a server that needs per-request back-pressure is out of contract.

use std::io;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use serde_json::Value;
use tokio::io::AsyncReadExt;
use tokio::io::AsyncWriteExt;
use tokio::process::{ChildStdin, Command};
use tokio::time;

use crate::common::{Error, Result};

use super::framing;

/// How to launch the server under test
#[derive(Debug, Clone)]
pub struct ServerCommand {
    /// Resolved path to the executable
    pub program: PathBuf,
    /// Arguments to pass
    pub args: Vec<String>,
    /// Working directory for the process
    pub cwd: Option<PathBuf>,
}

/// One completed request/response exchange
#[derive(Debug)]
pub struct Exchange {
    /// Protocol messages recovered from stdout, in emission order
    pub responses: Vec<Value>,
    /// Raw stderr capture; diagnostic text only, never used for pass/fail
    pub stderr: String,
}

/// Transport that drives a fresh server process per call
pub struct ProcessTransport {
    command: ServerCommand,
    timeout: Duration,
}

impl ProcessTransport {
    /// Create a transport for the given server command
    pub fn new(command: ServerCommand, timeout: Duration) -> Self {
        Self { command, timeout }
    }

    /// Send an ordered request batch and collect the ordered responses
    ///
    /// Requests are written as one JSON object per line, then stdin is
    /// closed to signal end-of-input. Stdout is read to completion and
    /// decoded leniently (see [`framing`]); a server that answers fewer
    /// requests than it was sent, or that closes its stdin without reading
    /// the whole batch, is a valid outcome here - detecting any shortfall
    /// is the scenario runner's job.
    ///
    /// Fails with [`Error::SpawnFailed`] when the process cannot start and
    /// [`Error::Timeout`] when it does not exit within the allotted time,
    /// in which case it is killed and reaped before returning.
    pub async fn send_and_collect(&self, requests: &[Value]) -> Result<Exchange> {
        let mut payload = String::new();
        for request in requests {
            let line = serde_json::to_string(request)?;
            tracing::debug!("MCP >>> {}", line);
            payload.push_str(&line);
            payload.push('\n');
        }

        let mut cmd = Command::new(&self.command.program);
        cmd.args(&self.command.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Backstop for cancellation between spawn and kill below
            .kill_on_drop(true);
        if let Some(dir) = &self.command.cwd {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(|e| {
            Error::SpawnFailed(format!("{}: {}", self.command.program.display(), e))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::SpawnFailed("server stdin was not piped".to_string()))?;
        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::SpawnFailed("server stdout was not piped".to_string()))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| Error::SpawnFailed("server stderr was not piped".to_string()))?;

        let exchange = async {
            // A server may close its stdin before reading the whole batch;
            // the exchange still stands on whatever it writes back, so a
            // broken pipe here is tolerated rather than fatal.
            match write_batch(stdin, payload.as_bytes()).await {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                    tracing::debug!("Server closed stdin early: {}", e);
                }
                Err(e) => return Err(Error::Io(e)),
            }

            // Drain both pipes concurrently; draining only one can
            // deadlock a server that blocks writing to the other.
            let mut out = String::new();
            let mut err = String::new();
            tokio::try_join!(
                stdout.read_to_string(&mut out),
                stderr.read_to_string(&mut err)
            )?;
            let status = child.wait().await?;
            Ok::<_, Error>((out, err, status))
        };

        let outcome = time::timeout(self.timeout, exchange).await;
        let (out, err, status) = match outcome {
            Ok(result) => result?,
            Err(_) => {
                // kill() waits for exit, so no zombie is left behind
                let _ = child.kill().await;
                return Err(Error::Timeout(self.timeout));
            }
        };

        if !status.success() {
            tracing::debug!("Server exited with status {}", status);
        }

        let responses = framing::decode_lines(&out);
        for response in &responses {
            tracing::debug!("MCP <<< {}", response);
        }

        Ok(Exchange {
            responses,
            stderr: err,
        })
    }
}

/// Write the batch and close the pipe so the server sees EOF
async fn write_batch(mut stdin: ChildStdin, payload: &[u8]) -> io::Result<()> {
    stdin.write_all(payload).await?;
    stdin.shutdown().await?;
    Ok(())
}
