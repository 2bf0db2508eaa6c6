//! # MCP Handler Module
//!
//! This module implements the Model Context Protocol (MCP) for the HashPilot server.
//! It handles incoming JSON-RPC requests and hands tool calls to the dispatcher.
//!
//! ## Supported Methods
//! - `initialize` - server info and capabilities
//! - `ping` - liveness check
//! - `tools/list` - the tool catalog
//! - `tools/call` - run one tool
//!
//! Tool names are also accepted directly as methods; they are rewritten into
//! `tools/call` so both forms share the same logic.

use serde_json::{json, Value};
use tracing::{error, info};

use crate::{
    mcp::{
        dispatcher,
        protocol::{error_codes, Request, Response},
        tools,
    },
    AppState,
};

pub const SERVER_NAME: &str = "hashpilot";
pub const PROTOCOL_VERSION: &str = "2025-06-18";

/// This is the main dispatcher for all incoming MCP requests.
pub async fn handle_mcp_request(req: Request, state: AppState) -> Option<Response> {
    info!("Handling MCP request for method: {}", req.method);

    if req.is_notification() {
        return None;
    }

    let response = match req.method.as_str() {
        "initialize" => handle_initialize(&req),
        "ping" => Response::success(req.id, json!({})),
        "tools/list" => handle_tools_list(&req),
        "tools/call" => handle_tool_call(req, &state).await,
        // A bare tool name is treated as tools/call with params as arguments
        method if tools::TOOL_NAMES.contains(&method) => {
            let wrapped = Request {
                jsonrpc: req.jsonrpc.clone(),
                id: req.id.clone(),
                method: "tools/call".to_string(),
                params: Some(json!({
                    "name": method,
                    "arguments": req.params.clone().unwrap_or_else(|| json!({}))
                })),
            };
            handle_tool_call(wrapped, &state).await
        }
        _ => Response::error(
            req.id,
            error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", req.method),
        ),
    };

    Some(response)
}

/// Handles a 'tools/call' request by dispatching it to the correct tool logic.
async fn handle_tool_call(req: Request, state: &AppState) -> Response {
    let params = match req.params.as_ref() {
        Some(p) => p,
        None => {
            return Response::error(
                req.id,
                error_codes::INVALID_PARAMS,
                "Missing 'params' object".into(),
            )
        }
    };

    let tool_name = match params.get("name").and_then(|n| n.as_str()) {
        Some(name) => name,
        None => {
            return Response::error(
                req.id,
                error_codes::INVALID_PARAMS,
                "Missing 'name' field in params".into(),
            )
        }
    };

    let args = params.get("arguments").unwrap_or(&Value::Null);
    let result = dispatcher::call_tool(state, tool_name, args).await;

    match serde_json::to_value(&result) {
        Ok(value) => Response::success(req.id, value),
        Err(e) => {
            error!("Failed to encode tool result: {}", e);
            Response::error(req.id, error_codes::INTERNAL_ERROR, e.to_string())
        }
    }
}

fn handle_initialize(req: &Request) -> Response {
    let server_info = json!({
        "name": SERVER_NAME,
        "version": env!("CARGO_PKG_VERSION")
    });
    let capabilities = json!({ "tools": { "listChanged": false } });
    let instructions =
        "Hedera JSON-RPC tools: account balances, transaction receipts, blocks, gas estimates and network info.";

    Response::success(
        req.id.clone(),
        json!({
            "serverInfo": server_info,
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": capabilities,
            "instructions": instructions
        }),
    )
}

/// Handles the 'tools/list' request by returning a JSON definition of all available tools.
fn handle_tools_list(req: &Request) -> Response {
    Response::success(req.id.clone(), json!({ "tools": tools::tool_definitions() }))
}
