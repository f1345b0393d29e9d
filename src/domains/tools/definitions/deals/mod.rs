//! Deal record tools: listing, lookup, creation and update.

pub mod create;
pub mod get;
pub mod list;
pub mod update;

pub use create::{CreateDealParams, CreateDealTool};
pub use get::GetDealTool;
pub use list::ListOpenDealsTool;
pub use update::{UpdateDealParams, UpdateDealTool};
