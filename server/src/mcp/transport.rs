//! MCP Transport Layer
//!
//! Newline-delimited JSON-RPC 2.0 over any async reader/writer pair, stdio
//! in production.

use super::protocol::{JsonRpcRequest, JsonRpcResponse};
use serde_json::Value;
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// One line read from the client
#[derive(Debug)]
pub enum Incoming {
    Request(JsonRpcRequest),
    /// Well-formed JSON that is not a JSON-RPC request
    Invalid { id: Option<Value>, reason: String },
}

/// Line-oriented JSON-RPC transport
pub struct LineTransport<R, W> {
    reader: R,
    writer: W,
}

/// Async stdio transport for MCP
pub type StdioTransport = LineTransport<BufReader<tokio::io::Stdin>, tokio::io::Stdout>;

impl StdioTransport {
    pub fn stdio() -> Self {
        LineTransport::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> LineTransport<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Read the next JSON-RPC message.
    ///
    /// Blank lines are skipped. Returns `Ok(None)` at end of input, an
    /// `InvalidData` error for a line that is not JSON, and
    /// [`Incoming::Invalid`] for JSON that is not a request.
    pub async fn read_request(&mut self) -> io::Result<Option<Incoming>> {
        let mut line = String::new();
        loop {
            line.clear();
            let bytes_read = self.reader.read_line(&mut line).await?;

            if bytes_read == 0 {
                return Ok(None); // EOF
            }

            if !line.trim().is_empty() {
                break;
            }
        }

        let value: Value = match serde_json::from_str(line.trim()) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to parse JSON-RPC message: {}", e);
                return Err(io::Error::new(io::ErrorKind::InvalidData, e));
            }
        };

        let id = value.get("id").filter(|id| !id.is_null()).cloned();
        match serde_json::from_value(value) {
            Ok(request) => Ok(Some(Incoming::Request(request))),
            Err(e) => {
                tracing::error!("Invalid JSON-RPC request: {}", e);
                Ok(Some(Incoming::Invalid {
                    id,
                    reason: e.to_string(),
                }))
            }
        }
    }

    /// Write a JSON-RPC response followed by a newline
    pub async fn write_response(&mut self, response: &JsonRpcResponse) -> io::Result<()> {
        let json = serde_json::to_string(response)?;
        self.writer.write_all(json.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}
