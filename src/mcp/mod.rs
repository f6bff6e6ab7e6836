//! Model Context Protocol (MCP) server implementation.
//!
//! Exposes catalog lookups, call-site queries and message extraction to AI
//! coding agents over stdio.
//!
//! ## Module Structure
//!
//! - `helpers`: Project loading and result conversion shared by the tools
//! - `server`: Main MCP server implementation
//! - `types`: Tool parameter and result types

mod helpers;
mod server;
pub mod types;

pub use server::{ParaglotMcpServer, run_server};
