//! Sales pipeline MCP server.
//!
//! Exposes a sales pipeline to MCP clients: deals can be listed, read,
//! created and updated, and every deal can be scored for its likelihood to
//! close, given next-step recommendations, ranked against the rest of the
//! pipeline and rolled up into a pipeline summary.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the server handler and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **deals**: deal model, scoring rules and the `DealStore` back-ends
//!   - **tools**: MCP tools that can be executed by clients
//!   - **resources**: read-only pipeline views
//!   - **prompts**: deal and pipeline review prompts
//!
//! # Example
//!
//! ```rust,no_run
//! use sales_mcp_server::{core::Config, core::McpServer, core::TransportService, domains::deals};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let store = deals::open_store(&config.store)?;
//!     let server = McpServer::new(config.clone(), store);
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Result};
pub use domains::deals::{Deal, DealStore};
