use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tracing::{debug, warn};

use crate::config::HarnessConfig;
use crate::protocol::{JsonRpcRequest, JsonRpcResponse, RpcId};

/// Maximum bytes per JSON-RPC message (1 MiB).
const MAX_MESSAGE_BYTES: usize = 1024 * 1024;

/// Errors raised while driving the server subprocess.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to launch server `{command}`: {source}")]
    Launch {
        command: String,
        source: std::io::Error,
    },
    #[error("server closed its output stream before a response arrived")]
    StreamClosed,
    #[error("no parseable JSON-RPC line within {limit} lines of server output")]
    MalformedResponse { limit: usize },
    #[error("server did not exit within {timeout:?} of shutdown request")]
    ShutdownTimeout { timeout: Duration },
    #[error("response id {got:?} does not match request id {want:?}")]
    IdMismatch { want: RpcId, got: Option<RpcId> },
    #[error("I/O error on server pipe: {0}")]
    Io(#[from] std::io::Error),
}

/// Client end of a speech-to-text MCP server speaking newline-delimited
/// JSON-RPC 2.0 over the subprocess's stdio.
///
/// Owns the child and its pipe triple for its whole lifetime. One request is
/// in flight at a time; `call` assigns ids monotonically and insists the
/// response echoes them.
#[derive(Debug)]
pub struct McpClient {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    next_id: i64,
    log_skip_limit: usize,
    shutdown_timeout: Duration,
}

impl McpClient {
    /// Launch the server under test with piped stdio.
    ///
    /// Child stderr is drained into the harness log; it is diagnostics, never
    /// protocol data. `kill_on_drop` backstops cleanup if the harness panics
    /// before `shutdown` runs.
    pub fn spawn(config: &HarnessConfig) -> Result<Self, ClientError> {
        let command = config.server.display().to_string();
        let mut child = Command::new(&config.server)
            .args(config.server_args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ClientError::Launch {
                command: command.clone(),
                source,
            })?;

        let stdin = child.stdin.take().ok_or_else(|| ClientError::Launch {
            command: command.clone(),
            source: std::io::Error::other("stdin pipe was not captured"),
        })?;
        let stdout = child.stdout.take().ok_or_else(|| ClientError::Launch {
            command: command.clone(),
            source: std::io::Error::other("stdout pipe was not captured"),
        })?;
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(async move {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    if !line.trim().is_empty() {
                        debug!(target: "server", "{line}");
                    }
                }
            });
        }

        debug!(server = %command, "server launched");
        Ok(Self {
            child,
            stdin,
            stdout: BufReader::new(stdout),
            next_id: 1,
            log_skip_limit: config.log_skip_limit,
            shutdown_timeout: config.shutdown_timeout(),
        })
    }

    /// Id the next `call` will assign.
    pub fn next_request_id(&self) -> i64 {
        self.next_id
    }

    /// Send one request and await its correlated response.
    pub async fn call(
        &mut self,
        method: &str,
        params: Option<serde_json::Value>,
    ) -> Result<JsonRpcResponse, ClientError> {
        let id = self.next_id;
        self.next_id += 1;

        let request = JsonRpcRequest::new(id, method, params);
        self.send(&request).await?;
        let response = self.receive().await?;

        let want = RpcId::Number(id);
        if response.id.as_ref() != Some(&want) {
            return Err(ClientError::IdMismatch {
                want,
                got: response.id,
            });
        }
        Ok(response)
    }

    /// Serialize a request to a single line and flush it immediately — the
    /// peer blocks on line-delimited reads, so no write may sit in a buffer.
    async fn send(&mut self, request: &JsonRpcRequest) -> Result<(), ClientError> {
        let out = serde_json::to_string(request).map_err(std::io::Error::other)?;
        self.stdin.write_all(out.as_bytes()).await?;
        self.stdin.write_all(b"\n").await?;
        self.stdin.flush().await?;
        Ok(())
    }

    /// Read the next JSON-RPC line from the server's stdout.
    ///
    /// Lines that do not parse as a response envelope are incidental log
    /// output: they are relayed to the harness log and skipped, up to the
    /// configured cap. End-of-stream means the server went away.
    async fn receive(&mut self) -> Result<JsonRpcResponse, ClientError> {
        let mut raw = Vec::new();
        let mut skipped = 0usize;

        loop {
            raw.clear();
            let n = self.stdout.read_until(b'\n', &mut raw).await?;
            if n == 0 {
                return Err(ClientError::StreamClosed);
            }

            if n > MAX_MESSAGE_BYTES {
                warn!(bytes = n, "oversized line on server stdout, skipping");
                skipped += 1;
                if skipped >= self.log_skip_limit {
                    return Err(ClientError::MalformedResponse {
                        limit: self.log_skip_limit,
                    });
                }
                continue;
            }

            let trimmed = match std::str::from_utf8(&raw) {
                Ok(s) => s.trim(),
                Err(_) => {
                    skipped += 1;
                    if skipped >= self.log_skip_limit {
                        return Err(ClientError::MalformedResponse {
                            limit: self.log_skip_limit,
                        });
                    }
                    continue;
                }
            };

            if trimmed.is_empty() {
                continue;
            }

            match serde_json::from_str::<JsonRpcResponse>(trimmed) {
                Ok(response) => return Ok(response),
                Err(_) => {
                    debug!(target: "server", "{trimmed}");
                    skipped += 1;
                    if skipped >= self.log_skip_limit {
                        return Err(ClientError::MalformedResponse {
                            limit: self.log_skip_limit,
                        });
                    }
                }
            }
        }
    }

    /// Request termination and wait out the bounded window.
    ///
    /// Closing stdin is the stdio-transport shutdown request: the server's
    /// read loop exits at EOF. A server still alive when the window closes is
    /// killed and reported as a timeout, never a silent success.
    pub async fn shutdown(self) -> Result<(), ClientError> {
        let McpClient {
            mut child,
            stdin,
            shutdown_timeout,
            ..
        } = self;
        drop(stdin);

        match tokio::time::timeout(shutdown_timeout, child.wait()).await {
            Ok(status) => {
                let status = status?;
                if status.success() {
                    debug!("server exited cleanly");
                } else {
                    warn!(%status, "server exited with non-zero status");
                }
                Ok(())
            }
            Err(_) => {
                child.start_kill()?;
                let _ = child.wait().await;
                Err(ClientError::ShutdownTimeout {
                    timeout: shutdown_timeout,
                })
            }
        }
    }
}
