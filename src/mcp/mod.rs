/// JSON-RPC surface for the display client
///
/// This module handles line-delimited JSON-RPC communication over stdio,
/// including request parsing and tool routing.

pub mod protocol;
pub mod server;

pub use server::{tool_definitions, McpServer};
