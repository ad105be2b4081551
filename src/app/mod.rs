pub mod http;
pub mod mcp;
pub mod tools;
pub mod webhook;

pub use http::{router, serve, AppState};
pub use mcp::McpServer;
pub use tools::ToolService;
