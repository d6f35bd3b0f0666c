//! MCP Server Implementation
//!
//! Handles MCP protocol requests and routes tool calls to the [`ToolBridge`].

use super::protocol::*;
use super::tools::get_all_tools;
use super::transport::{Incoming, LineTransport, StdioTransport};
use crate::bridge::ToolBridge;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncWrite};

const PROTOCOL_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "vectorforge";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// MCP Server - handles protocol messages
pub struct McpServer {
    bridge: ToolBridge,
    initialized: bool,
}

impl McpServer {
    pub fn new(bridge: ToolBridge) -> Self {
        Self {
            bridge,
            initialized: false,
        }
    }

    /// Run the MCP server event loop on stdio
    pub async fn run(&mut self) -> std::io::Result<()> {
        let mut transport = StdioTransport::stdio();
        tracing::info!("VectorForge MCP server running on stdio");
        self.serve(&mut transport).await
    }

    /// Serve requests one at a time until the input is exhausted.
    ///
    /// Each request, including its engine call, completes before the next
    /// line is read. Only transport write failures end the loop early.
    pub async fn serve<R, W>(&mut self, transport: &mut LineTransport<R, W>) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        loop {
            match transport.read_request().await {
                Ok(Some(Incoming::Request(request))) => {
                    if let Some(response) = self.handle_request(request).await {
                        transport.write_response(&response).await?;
                    }
                }
                Ok(Some(Incoming::Invalid { id, reason })) => {
                    let response = JsonRpcResponse::error(
                        id,
                        JsonRpcError::invalid_request(format!("Invalid request: {}", reason)),
                    );
                    transport.write_response(&response).await?;
                }
                Ok(None) => {
                    tracing::info!("Client disconnected");
                    break;
                }
                Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                    let response = JsonRpcResponse::error(
                        None,
                        JsonRpcError::parse_error(format!("Parse error: {}", e)),
                    );
                    transport.write_response(&response).await?;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(())
    }

    /// Handle a JSON-RPC request. Notifications produce no response.
    pub async fn handle_request(&mut self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        tracing::debug!("Handling request: {}", request.method);

        if request.jsonrpc != "2.0" {
            return (!request.is_notification()).then(|| {
                JsonRpcResponse::error(
                    request.id.clone(),
                    JsonRpcError::invalid_request(format!(
                        "Unsupported jsonrpc version: {}",
                        request.jsonrpc
                    )),
                )
            });
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id.clone(), request.params),
            "notifications/initialized" | "initialized" => {
                self.initialized = true;
                return None;
            }
            "notifications/cancelled" => return None,
            "ping" => JsonRpcResponse::from_result(request.id.clone(), &PingResult {}),
            "tools/list" => self.handle_tools_list(request.id.clone()),
            "tools/call" => self.handle_tools_call(request.id.clone(), request.params).await,
            _ => JsonRpcResponse::error(
                request.id.clone(),
                JsonRpcError::method_not_found(&request.method),
            ),
        };

        if request.id.is_none() {
            tracing::debug!("Dropping response to notification {}", request.method);
            return None;
        }
        Some(response)
    }

    fn handle_initialize(&mut self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: InitializeParams = params
            .and_then(|p| serde_json::from_value(p).ok())
            .unwrap_or_default();

        if let Some(client) = &params.client_info {
            tracing::info!(
                "Client connected: {} {}",
                client.name,
                client.version.as_deref().unwrap_or("")
            );
        }
        match params.protocol_version.as_deref() {
            Some(requested) if requested != PROTOCOL_VERSION => tracing::info!(
                "Client requested protocol {}, answering with {}",
                requested,
                PROTOCOL_VERSION
            ),
            Some(requested) => tracing::debug!("Client protocol version: {}", requested),
            None => {}
        }

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: Some(SERVER_VERSION.to_string()),
            },
        };

        JsonRpcResponse::from_result(id, &result)
    }

    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let result = ToolsListResult {
            tools: get_all_tools(),
        };
        JsonRpcResponse::from_result(id, &result)
    }

    async fn handle_tools_call(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: ToolCallParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(p) => p,
                Err(e) => {
                    return JsonRpcResponse::error(
                        id,
                        JsonRpcError::invalid_params(format!("Invalid params: {}", e)),
                    );
                }
            },
            None => {
                return JsonRpcResponse::error(id, JsonRpcError::invalid_params("Missing params"));
            }
        };

        if !self.initialized {
            tracing::debug!("tools/call before initialized notification");
        }

        let result = self.bridge.call(&params.name, params.arguments).await;
        JsonRpcResponse::from_result(id, &result)
    }
}
