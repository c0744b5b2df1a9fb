//! Line-delimited JSON-RPC over a byte stream.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use sendgrid_mcp_client::SendGridApi;

use crate::protocol::{Request, Response, RpcError};
use crate::server::McpServer;

/// Serves requests read from `reader`, one JSON message per line, until EOF.
///
/// # Errors
///
/// Returns an error if reading or writing fails.
pub async fn serve<A, R, W>(server: &McpServer<A>, mut reader: R, mut writer: W) -> anyhow::Result<()>
where
    A: SendGridApi,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim(),
            Err(e) => {
                error!(error = %e, "Request is not valid UTF-8");
                write_response(&mut writer, &Response::error(None, RpcError::parse_error(e.to_string())))
                    .await?;
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }

        debug!(request = %line, "Received request");

        let response = match serde_json::from_str::<Request>(line) {
            Ok(request) => server.handle_request(request).await,
            Err(e) => {
                error!(error = %e, "Parse error");
                Some(Response::error(None, RpcError::parse_error(e.to_string())))
            }
        };

        if let Some(response) = response {
            write_response(&mut writer, &response).await?;
        }
    }

    Ok(())
}

async fn write_response<W: AsyncWrite + Unpin>(writer: &mut W, response: &Response) -> anyhow::Result<()> {
    let response_json = serde_json::to_string(response)?;
    debug!(response = %response_json, "Sending response");

    writer.write_all(response_json.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

/// Serves on stdin/stdout.
///
/// # Errors
///
/// Returns an error if stdio fails.
pub async fn serve_stdio<A: SendGridApi>(server: &McpServer<A>) -> anyhow::Result<()> {
    info!("Starting MCP stdio transport");
    serve(server, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await?;
    info!("Stdio transport shutting down");
    Ok(())
}
