use crate::services::error::ConversionError;
use std::io::ErrorKind;
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Runs external programs, optionally feeding stdin and bounding the wait.
#[derive(Clone, Debug, Default)]
pub struct CommandExecutor {
    timeout: Option<Duration>,
}

impl CommandExecutor {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Spawns `program` and collects its stdout and stderr.
    ///
    /// A non-zero exit is an error carrying the captured stderr. The child is
    /// killed if the timeout elapses.
    pub async fn execute(
        &self,
        program: &str,
        args: &[String],
        stdin: Option<Vec<u8>>,
    ) -> Result<Output, ConversionError> {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::debug!(
            program = %program,
            args = ?args,
            stdin_bytes = stdin.as_ref().map_or(0, |input| input.len()),
            timeout_secs = ?self.timeout.map(|t| t.as_secs()),
            "Executing command"
        );

        let mut child = cmd.spawn().map_err(|source| ConversionError::Spawn {
            program: program.to_string(),
            source,
        })?;

        // Fed from its own task so a chatty child cannot fill stdout while we block on stdin.
        let writer = match (stdin, child.stdin.take()) {
            (Some(input), Some(mut pipe)) => Some(tokio::spawn(async move {
                pipe.write_all(&input).await?;
                pipe.shutdown().await
            })),
            _ => None,
        };

        let wait = child.wait_with_output();
        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, wait).await.map_err(|_| {
                ConversionError::Timeout {
                    program: program.to_string(),
                    seconds: limit.as_secs(),
                }
            })?,
            None => wait.await,
        }
        .map_err(|source| ConversionError::Io {
            program: program.to_string(),
            source,
        })?;

        if let Some(writer) = writer {
            match writer.await {
                Ok(Err(e)) if e.kind() != ErrorKind::BrokenPipe => {
                    tracing::warn!(program = %program, error = %e, "Failed to write command stdin");
                }
                Err(e) => {
                    tracing::warn!(program = %program, error = %e, "Stdin writer task failed");
                }
                _ => {}
            }
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::error!(
                program = %program,
                args = ?args,
                status = %output.status,
                stderr = %stderr,
                "Command failed"
            );
            return Err(ConversionError::Failed {
                program: program.to_string(),
                status: output.status.to_string(),
                stderr,
            });
        }

        tracing::debug!(
            program = %program,
            output_size = output.stdout.len(),
            "Command succeeded"
        );

        Ok(output)
    }
}
