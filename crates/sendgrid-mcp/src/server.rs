//! MCP request handling.

use serde_json::{Value, json};
use tracing::{debug, info, warn};

use sendgrid_mcp_client::SendGridApi;
use sendgrid_mcp_core::{call_tool, tool_definitions};

use crate::protocol::{CallToolParams, Request, Response, RpcError};

/// Name reported in `serverInfo`.
pub const SERVER_NAME: &str = "sendgrid-minimal-mcp";

/// Protocol revision offered when the client does not ask for one.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// MCP server over any [`SendGridApi`].
#[derive(Debug)]
pub struct McpServer<A> {
    api: A,
}

impl<A: SendGridApi> McpServer<A> {
    /// Creates a server.
    #[must_use]
    pub const fn new(api: A) -> Self {
        Self { api }
    }

    /// Handles one message. Notifications yield no response.
    pub async fn handle_request(&self, request: Request) -> Option<Response> {
        if request.is_notification() {
            debug!(method = %request.method, "Notification");
            return None;
        }

        debug!(method = %request.method, "Handling MCP request");
        let response = match request.method.as_str() {
            "initialize" => Self::initialize(request),
            "ping" => Response::success(request.id, json!({})),
            "tools/list" => Response::success(request.id, json!({ "tools": tool_definitions() })),
            "tools/call" => self.call(request).await,
            _ => Response::error(request.id, RpcError::method_not_found(&request.method)),
        };
        Some(response)
    }

    fn initialize(request: Request) -> Response {
        let protocol_version = request
            .params
            .as_ref()
            .and_then(|p| p.get("protocolVersion"))
            .and_then(Value::as_str)
            .unwrap_or(PROTOCOL_VERSION)
            .to_string();
        let client = request
            .params
            .as_ref()
            .and_then(|p| p.pointer("/clientInfo/name"))
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        info!(client, protocol_version = %protocol_version, "Client initialized");

        Response::success(
            request.id,
            json!({
                "protocolVersion": protocol_version,
                "capabilities": { "tools": {} },
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": env!("CARGO_PKG_VERSION")
                }
            }),
        )
    }

    async fn call(&self, request: Request) -> Response {
        let params: CallToolParams =
            match serde_json::from_value(request.params.unwrap_or(Value::Null)) {
                Ok(params) => params,
                Err(e) => {
                    return Response::error(
                        request.id,
                        RpcError::invalid_params(format!("Invalid tools/call params: {e}")),
                    );
                }
            };

        match call_tool(&self.api, &params.name, params.arguments).await {
            Ok(output) => match serde_json::to_value(output) {
                Ok(result) => Response::success(request.id, result),
                Err(e) => Response::error(request.id, RpcError::internal_error(e.to_string())),
            },
            Err(e) => {
                warn!(tool = %params.name, error = %e, "SendGrid Error");
                Response::error(request.id, RpcError::from(&e))
            }
        }
    }
}
