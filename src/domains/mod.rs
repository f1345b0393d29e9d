//! Domains module containing business logic organized by bounded contexts.
//!
//! - `deals` - the deal model, scoring engine and storage back-ends
//! - `tools`, `resources`, `prompts` - the MCP surfaces built on top of it

pub mod deals;
pub mod prompts;
pub mod resources;
pub mod tools;
