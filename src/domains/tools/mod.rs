//! Tools domain module.
//!
//! Tools are the operations MCP clients call against the deal pipeline.
//!
//! ## Architecture
//!
//! - `definitions/deals/` - record tools (list, get, create, update)
//! - `definitions/insights/` - scoring, next action, ranking and summary
//! - `router.rs` - ToolRouter builder for STDIO/TCP transport
//! - `registry.rs` - tool listing and HTTP dispatch
//! - `error.rs` - tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a file in `definitions/deals/` or `definitions/insights/`
//! 2. Define params, `execute()`, `http_handler()`, `to_tool()` and `create_route()`
//! 3. Export it from `definitions/mod.rs`
//! 4. Add the route in `router.rs`
//! 5. Register it in `registry.rs` for HTTP support

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
