// MCP (Model Context Protocol) server exposing read-only Google Play Console
// tools to agent hosts over stdio.

pub mod context;
pub mod format;
pub mod protocol;
pub mod server;
pub mod tools;

pub use context::PublisherSettings;
pub use server::McpServer;
pub use tools::default_registry;
