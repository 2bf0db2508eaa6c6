// src/error.rs

use thiserror::Error;

/// Failures that can occur while handling a single tool invocation.
///
/// Every variant is reported in-band as an `Error: <message>` tool result;
/// none of them terminates the server.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),
    #[error("Invalid Hedera account ID format. Expected: 0.0.12345")]
    MalformedIdentifier(String),
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("{0}")]
    InvalidArguments(String),
    #[error("RPC request failed: {0}")]
    Transport(String),
    #[error("failed to encode result: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ToolError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        ToolError::Transport(err.to_string())
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        ToolError::InvalidArguments(message.into())
    }
}

pub type Result<T> = std::result::Result<T, ToolError>;
