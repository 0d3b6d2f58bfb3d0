//! Line-delimited JSON transport over stdin/stdout.
//!
//! Each JSON-RPC message is a single line terminated by `\n`.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::trace;

use crate::error::TransportError;

/// Reads JSON-RPC messages line by line and writes responses back.
///
/// Generic over reader/writer so tests can drive it from memory.
pub struct StdioTransport<R, W> {
    reader: BufReader<R>,
    writer: W,
}

impl StdioTransport<tokio::io::Stdin, tokio::io::Stdout> {
    /// Transport over the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(tokio::io::stdin(), tokio::io::stdout())
    }
}

impl<R, W> StdioTransport<R, W>
where
    R: tokio::io::AsyncRead + Unpin,
    W: tokio::io::AsyncWrite + Unpin,
{
    /// Creates a new transport with the given reader and writer.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: BufReader::new(reader),
            writer,
        }
    }

    /// Reads the next trimmed line; blank lines come back empty.
    ///
    /// Returns `None` on EOF.
    pub async fn read_line(&mut self) -> Result<Option<String>, TransportError> {
        let mut line = String::new();
        let bytes_read = self
            .reader
            .read_line(&mut line)
            .await
            .map_err(TransportError::Read)?;

        if bytes_read == 0 {
            return Ok(None);
        }

        let trimmed = line.trim();
        trace!(len = trimmed.len(), "read message");
        Ok(Some(trimmed.to_string()))
    }

    /// Writes one message followed by `\n`, then flushes.
    pub async fn write_line(&mut self, message: &str) -> Result<(), TransportError> {
        trace!(len = message.len(), "writing message");
        self.writer
            .write_all(message.as_bytes())
            .await
            .map_err(TransportError::Write)?;
        self.writer
            .write_all(b"\n")
            .await
            .map_err(TransportError::Write)?;
        self.writer.flush().await.map_err(TransportError::Write)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[tokio::test]
    async fn blank_line_is_empty() {
        let reader = Cursor::new(b"   \n{}\n".to_vec());
        let mut transport = StdioTransport::new(reader, Vec::new());

        assert_eq!(transport.read_line().await.expect("r1"), Some(String::new()));
        assert_eq!(transport.read_line().await.expect("r2"), Some("{}".to_string()));
        assert_eq!(transport.read_line().await.expect("r3"), None);
    }

    #[tokio::test]
    async fn last_line_without_newline() {
        let reader = Cursor::new(b"{\"id\":1}".to_vec());
        let mut transport = StdioTransport::new(reader, Vec::new());
        assert_eq!(
            transport.read_line().await.expect("read"),
            Some("{\"id\":1}".to_string())
        );
    }

    #[tokio::test]
    async fn write_appends_newline() {
        let mut transport = StdioTransport::new(Cursor::new(Vec::<u8>::new()), Vec::new());
        transport.write_line("{\"ok\":true}").await.expect("write");
        let output = String::from_utf8(transport.writer.clone()).expect("utf8");
        assert_eq!(output, "{\"ok\":true}\n");
    }
}
