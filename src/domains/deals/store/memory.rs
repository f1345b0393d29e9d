//! In-memory deal store, optionally seeded from a JSON file.
//!
//! The JSON file is read once when the store is built and never written
//! back; creates and updates live for the lifetime of the process only.

use std::collections::HashSet;
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Deserialize;
use tracing::{info, warn};

use super::{DealStore, StoreError, StoreResult};
use crate::domains::deals::model::{Deal, DealUpdate};

/// Accepted layouts of a deals file.
#[derive(Deserialize)]
#[serde(untagged)]
enum DealsFile {
    List(Vec<Deal>),
    Wrapped { deals: Vec<Deal> },
}

impl DealsFile {
    fn into_deals(self) -> Vec<Deal> {
        match self {
            Self::List(deals) | Self::Wrapped { deals } => deals,
        }
    }
}

/// Deal store over a vector kept in insertion order.
pub struct InMemoryDealStore {
    deals: RwLock<Vec<Deal>>,
    source: &'static str,
}

impl InMemoryDealStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::from_deals(Vec::new())
    }

    /// A store holding the given deals.
    ///
    /// Later duplicates of an id are dropped so that ids stay unique.
    pub fn from_deals(deals: Vec<Deal>) -> Self {
        let mut seen: HashSet<String> = HashSet::with_capacity(deals.len());
        let mut unique: Vec<Deal> = Vec::with_capacity(deals.len());
        for deal in deals {
            if !seen.insert(deal.deal_id.clone()) {
                warn!("Ignoring duplicate deal id: {}", deal.deal_id);
                continue;
            }
            unique.push(deal);
        }

        Self {
            deals: RwLock::new(unique),
            source: "memory",
        }
    }

    /// Load deals from a JSON file.
    ///
    /// The file holds either an array of deals or an object with a `deals`
    /// array.
    pub fn from_json_file(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
        let mut store = Self::from_json_str(&text)?;
        store.source = "json";

        info!(
            "Loaded {} deals from {}",
            store.read()?.len(),
            path.display()
        );
        Ok(store)
    }

    /// Parse deals from JSON text.
    pub fn from_json_str(text: &str) -> StoreResult<Self> {
        let file: DealsFile = serde_json::from_str(text)?;
        Ok(Self::from_deals(file.into_deals()))
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Vec<Deal>>> {
        self.deals.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Vec<Deal>>> {
        self.deals.write().map_err(|_| StoreError::Poisoned)
    }
}

impl Default for InMemoryDealStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DealStore for InMemoryDealStore {
    fn backend(&self) -> &'static str {
        self.source
    }

    fn get_all_deals(&self) -> StoreResult<Vec<Deal>> {
        Ok(self.read()?.clone())
    }

    fn get_deal(&self, deal_id: &str) -> StoreResult<Option<Deal>> {
        Ok(self.read()?.iter().find(|d| d.deal_id == deal_id).cloned())
    }

    fn create_deal(&self, deal: &Deal) -> StoreResult<()> {
        let mut deals = self.write()?;
        if deals.iter().any(|d| d.deal_id == deal.deal_id) {
            warn!("Duplicate deal id rejected: {}", deal.deal_id);
            return Err(StoreError::already_exists(&deal.deal_id));
        }
        deals.push(deal.clone());
        Ok(())
    }

    fn update_deal(&self, deal_id: &str, update: &DealUpdate) -> StoreResult<Deal> {
        let mut deals = self.write()?;
        let deal = deals
            .iter_mut()
            .find(|d| d.deal_id == deal_id)
            .ok_or_else(|| StoreError::not_found(deal_id))?;

        deal.apply(update);
        Ok(deal.clone())
    }
}
