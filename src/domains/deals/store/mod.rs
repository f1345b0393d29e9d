//! Deal storage back-ends.
//!
//! The scoring logic never touches storage directly. It is handed deals by
//! a `DealStore`, which is constructed once at startup and shared behind an
//! `Arc` for the lifetime of the process.
//!
//! Two implementations exist:
//! - `SqliteDealStore` - a `deals` table in a SQLite database
//! - `InMemoryDealStore` - a vector of deals, optionally loaded from a JSON file
//!
//! Each call is a single atomic read or write; there are no transactions
//! spanning calls.

mod error;
mod memory;
mod sqlite;

use std::sync::Arc;

use tracing::info;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryDealStore;
pub use sqlite::SqliteDealStore;

use super::model::{Deal, DealSummary, DealUpdate};
use crate::core::config::{StoreBackend, StoreConfig};

/// Storage contract for deals.
pub trait DealStore: Send + Sync {
    /// Short name of the back-end, for logs and server info.
    fn backend(&self) -> &'static str;

    /// All deals, in storage order.
    fn get_all_deals(&self) -> StoreResult<Vec<Deal>>;

    /// A single deal, or `None` when the id is unknown.
    fn get_deal(&self, deal_id: &str) -> StoreResult<Option<Deal>>;

    /// Insert a new deal. Fails with `AlreadyExists` on a duplicate id.
    fn create_deal(&self, deal: &Deal) -> StoreResult<()>;

    /// Overwrite the mutable fields of an existing deal and return it.
    fn update_deal(&self, deal_id: &str, update: &DealUpdate) -> StoreResult<Deal>;

    /// Identifiers and company names of every deal.
    fn list_deals(&self) -> StoreResult<Vec<DealSummary>> {
        Ok(self.get_all_deals()?.iter().map(Deal::summary).collect())
    }
}

/// Open the store selected by configuration.
pub fn open_store(config: &StoreConfig) -> StoreResult<Arc<dyn DealStore>> {
    let store: Arc<dyn DealStore> = match config.backend {
        StoreBackend::Sqlite => Arc::new(SqliteDealStore::open(&config.database_path)?),
        StoreBackend::Json => Arc::new(InMemoryDealStore::from_json_file(&config.deals_file)?),
        StoreBackend::Memory => Arc::new(InMemoryDealStore::new()),
    };

    info!("Deal store ready: {}", store.backend());
    Ok(store)
}
