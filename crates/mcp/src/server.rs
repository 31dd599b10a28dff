// MCP server implementation: JSON-RPC 2.0, one message per line over stdio

use crate::protocol::{
    CallToolParams, InitializeParams, InitializeResult, JsonRpcError, JsonRpcRequest,
    JsonRpcResponse, ListToolsResult, ServerCapabilities, ServerInfo, ToolsCapability,
    DEFAULT_PROTOCOL_VERSION,
};
use crate::tools::ToolRegistry;
use anyhow::Result;
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::codec::{AnyDelimiterCodec, FramedRead, FramedWrite, LinesCodec};
use tracing::{debug, info, info_span, warn, Instrument};

/// Name advertised in `serverInfo`.
pub const SERVER_NAME: &str = "google-play-developer";

#[derive(Clone)]
pub struct McpServer {
    registry: Arc<ToolRegistry>,
    info: ServerInfo,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    /// Serve on the process's stdin/stdout until stdin closes.
    pub async fn start(&self) -> Result<()> {
        info!(tools = self.registry.len(), "MCP server listening on stdio");
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve requests read from `reader`, writing responses to `writer`.
    ///
    /// Each request is handled on its own task; responses are written by a
    /// single task in completion order. Returns once the input is exhausted
    /// and every in-flight request has been answered.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin + Send,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        // Frames are raw bytes so a line that is not UTF-8 can be answered
        // with a parse error instead of ending the stream.
        let mut lines = FramedRead::new(
            reader,
            AnyDelimiterCodec::new(b"\n".to_vec(), b"\n".to_vec()),
        );
        let (tx, mut rx) = mpsc::unbounded_channel::<JsonRpcResponse>();

        let writer_task = tokio::spawn(async move {
            let mut sink = FramedWrite::new(writer, LinesCodec::new());
            while let Some(response) = rx.recv().await {
                let line = serde_json::to_string(&response)?;
                sink.send(line).await?;
            }
            Ok::<(), anyhow::Error>(())
        });

        let mut in_flight = JoinSet::new();
        while let Some(line) = lines.next().await {
            let frame = match line {
                Ok(frame) => frame,
                Err(e) => {
                    warn!(error = %e, "Failed to read request, closing input");
                    break;
                }
            };
            let line = match String::from_utf8(frame.to_vec()) {
                Ok(line) => line,
                Err(e) => {
                    warn!(error = %e, "Request line is not valid UTF-8");
                    let _ = tx.send(JsonRpcResponse::error(
                        Value::Null,
                        JsonRpcError::parse_error(e),
                    ));
                    continue;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            let server = self.clone();
            let tx = tx.clone();
            in_flight.spawn(async move {
                if let Some(response) = server.handle_line(&line).await {
                    // Only fails if the writer already gave up
                    let _ = tx.send(response);
                }
            });

            while let Some(done) = in_flight.try_join_next() {
                if let Err(e) = done {
                    warn!(error = %e, "Request task panicked");
                }
            }
        }

        while let Some(done) = in_flight.join_next().await {
            if let Err(e) = done {
                warn!(error = %e, "Request task panicked");
            }
        }

        drop(tx);
        writer_task.await??;
        info!("Input closed, MCP server stopped");
        Ok(())
    }

    /// Handle one raw input line. Returns `None` for notifications.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => return Some(JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error(e))),
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => Some(JsonRpcResponse::error(id, JsonRpcError::invalid_request(e))),
        }
    }

    /// Route a parsed request to its method handler.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id else {
            debug!(method = %request.method, "Notification received");
            return None;
        };

        let response = match request.method.as_str() {
            "initialize" => self.initialize(id, request.params),
            "ping" => JsonRpcResponse::success(id, serde_json::json!({})),
            "tools/list" => JsonRpcResponse::success(
                id,
                ListToolsResult {
                    tools: self.registry.list_schemas(),
                },
            ),
            "tools/call" => self.call_tool(id, request.params).await,
            method => {
                debug!(method, "Unsupported method");
                JsonRpcResponse::error(id, JsonRpcError::method_not_found(method))
            }
        };
        Some(response)
    }

    fn initialize(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params: InitializeParams = params
            .and_then(|p| serde_json::from_value(p).ok())
            .unwrap_or_default();

        if let Some(client) = &params.client_info {
            info!(client = %client.name, version = %client.version, "Client connected");
        }

        JsonRpcResponse::success(
            id,
            InitializeResult {
                protocol_version: params
                    .protocol_version
                    .unwrap_or_else(|| DEFAULT_PROTOCOL_VERSION.to_string()),
                capabilities: ServerCapabilities {
                    tools: Some(ToolsCapability {
                        list_changed: false,
                    }),
                },
                server_info: self.info.clone(),
            },
        )
    }

    async fn call_tool(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params: CallToolParams = match params.map(serde_json::from_value) {
            Some(Ok(params)) => params,
            Some(Err(e)) => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params(format!("Invalid tools/call params: {}", e)),
                )
            }
            None => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params("Missing tools/call params"),
                )
            }
        };

        let started = Instant::now();
        let span = info_span!("tool_call", tool = %params.name);
        match self
            .registry
            .call(&params.name, params.arguments)
            .instrument(span.clone())
            .await
        {
            Ok(result) => {
                span.in_scope(|| {
                    info!(
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        is_error = result.is_error.unwrap_or(false),
                        "Tool call finished"
                    )
                });
                JsonRpcResponse::success(id, result)
            }
            Err(e) => JsonRpcResponse::error(id, JsonRpcError::invalid_params(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::PublisherSettings;
    use crate::tools::default_registry;

    fn server() -> McpServer {
        McpServer::new(default_registry(PublisherSettings::from_key_path(None)).unwrap())
    }

    #[tokio::test]
    async fn test_initialize_echoes_protocol_version() {
        let response = server()
            .handle_line(
                r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2025-03-26","capabilities":{},"clientInfo":{"name":"host","version":"1.0"}}}"#,
            )
            .await
            .unwrap();

        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], "2025-03-26");
        assert_eq!(result["serverInfo"]["name"], SERVER_NAME);
        assert_eq!(result["capabilities"]["tools"]["listChanged"], false);
    }

    #[tokio::test]
    async fn test_notification_has_no_response() {
        let response = server()
            .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_parse_error() {
        let response = server().handle_line("{not json").await.unwrap();
        assert_eq!(response.id, Value::Null);
        assert_eq!(response.error.unwrap().code, JsonRpcError::PARSE_ERROR);
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let response = server()
            .handle_line(r#"{"jsonrpc":"2.0","id":7,"method":"resources/list"}"#)
            .await
            .unwrap();
        assert_eq!(response.id, serde_json::json!(7));
        assert_eq!(response.error.unwrap().code, JsonRpcError::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_protocol_error() {
        let response = server()
            .handle_line(
                r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"delete-app","arguments":{}}}"#,
            )
            .await
            .unwrap();
        let error = response.error.unwrap();
        assert_eq!(error.code, JsonRpcError::INVALID_PARAMS);
        assert_eq!(error.message, "Unknown tool: delete-app");
    }

    #[tokio::test]
    async fn test_tools_list_advertises_all_tools() {
        let response = server()
            .handle_line(r#"{"jsonrpc":"2.0","id":3,"method":"tools/list"}"#)
            .await
            .unwrap();

        let result = response.result.unwrap();
        let names: Vec<&str> = result["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec![
                "get-app-details",
                "get-bundle-details",
                "get-release-tracks",
                "get-review",
                "get-reviews"
            ]
        );
    }
}
