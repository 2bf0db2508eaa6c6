// MCP protocol types, tool catalog and dispatch
pub mod dispatcher;
pub mod handler;
pub mod protocol;
pub mod tools;
