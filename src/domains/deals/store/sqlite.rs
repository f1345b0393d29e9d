//! SQLite-backed deal store.
//!
//! # Invariants
//! - The `deals` table exists before the store is returned.
//! - Access to the single connection is serialized by a mutex, so every
//!   call is one atomic statement (or one statement plus its read-back).

use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use rusqlite::{Connection, ErrorCode, OptionalExtension, Row, params};
use tracing::{error, info, warn};

use super::{DealStore, StoreError, StoreResult};
use crate::domains::deals::model::{Deal, DealUpdate};

const CREATE_DEALS_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS deals (
    deal_id TEXT PRIMARY KEY,
    company TEXT NOT NULL,
    value INTEGER NOT NULL,
    stage TEXT NOT NULL,
    days_in_pipeline INTEGER NOT NULL DEFAULT 0,
    last_contact_days INTEGER NOT NULL DEFAULT 0
);";

const DEAL_SELECT_SQL: &str = "SELECT
    deal_id,
    company,
    value,
    stage,
    days_in_pipeline,
    last_contact_days
FROM deals";

/// Deal store over a `deals` table.
pub struct SqliteDealStore {
    conn: Mutex<Connection>,
}

impl SqliteDealStore {
    /// Open (or create) a SQLite database file and ensure the schema exists.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let started_at = Instant::now();
        info!("Opening deal database at {}", path.display());

        let conn = Connection::open(path).map_err(|e| {
            error!("Failed to open deal database {}: {}", path.display(), e);
            StoreError::from(e)
        })?;

        let store = Self::bootstrap(conn)?;
        info!(
            "Deal database ready in {} ms",
            started_at.elapsed().as_millis()
        );
        Ok(store)
    }

    /// Open a private in-memory database with the schema applied.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::bootstrap(Connection::open_in_memory()?)
    }

    fn bootstrap(conn: Connection) -> StoreResult<Self> {
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch(CREATE_DEALS_TABLE_SQL)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl DealStore for SqliteDealStore {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    fn get_all_deals(&self) -> StoreResult<Vec<Deal>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("{DEAL_SELECT_SQL} ORDER BY rowid"))?;
        let rows = stmt.query_map([], read_row)?;

        let mut deals = Vec::new();
        for row in rows {
            deals.push(row?.try_into()?);
        }
        Ok(deals)
    }

    fn get_deal(&self, deal_id: &str) -> StoreResult<Option<Deal>> {
        let conn = self.lock()?;
        fetch_deal(&conn, deal_id)
    }

    fn create_deal(&self, deal: &Deal) -> StoreResult<()> {
        let conn = self.lock()?;
        let result = conn.execute(
            "INSERT INTO deals (
                deal_id,
                company,
                value,
                stage,
                days_in_pipeline,
                last_contact_days
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                deal.deal_id,
                deal.company,
                to_sql_int(deal.value)?,
                deal.stage,
                deal.days_in_pipeline,
                deal.last_contact_days,
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                warn!("Duplicate deal id rejected: {}", deal.deal_id);
                Err(StoreError::already_exists(&deal.deal_id))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn update_deal(&self, deal_id: &str, update: &DealUpdate) -> StoreResult<Deal> {
        let conn = self.lock()?;
        let changed = conn.execute(
            "UPDATE deals
             SET
                company = ?1,
                value = ?2,
                stage = ?3,
                days_in_pipeline = COALESCE(?4, days_in_pipeline),
                last_contact_days = COALESCE(?5, last_contact_days)
             WHERE deal_id = ?6;",
            params![
                update.company,
                to_sql_int(update.value)?,
                update.stage,
                update.days_in_pipeline,
                update.last_contact_days,
                deal_id,
            ],
        )?;

        if changed == 0 {
            return Err(StoreError::not_found(deal_id));
        }

        fetch_deal(&conn, deal_id)?.ok_or_else(|| StoreError::not_found(deal_id))
    }
}

fn fetch_deal(conn: &Connection, deal_id: &str) -> StoreResult<Option<Deal>> {
    let row = conn
        .query_row(
            &format!("{DEAL_SELECT_SQL} WHERE deal_id = ?1"),
            [deal_id],
            read_row,
        )
        .optional()?;

    row.map(Deal::try_from).transpose()
}

/// Raw column values of one `deals` row.
struct DealRow {
    deal_id: String,
    company: String,
    value: i64,
    stage: String,
    days_in_pipeline: i64,
    last_contact_days: i64,
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<DealRow> {
    Ok(DealRow {
        deal_id: row.get(0)?,
        company: row.get(1)?,
        value: row.get(2)?,
        stage: row.get(3)?,
        days_in_pipeline: row.get(4)?,
        last_contact_days: row.get(5)?,
    })
}

impl TryFrom<DealRow> for Deal {
    type Error = StoreError;

    fn try_from(row: DealRow) -> Result<Self, Self::Error> {
        let invalid = |field: &str, value: i64| {
            StoreError::InvalidData(format!(
                "deal {} has negative or out-of-range {}: {}",
                row.deal_id, field, value
            ))
        };

        let value = u64::try_from(row.value).map_err(|_| invalid("value", row.value))?;
        let days_in_pipeline = u32::try_from(row.days_in_pipeline)
            .map_err(|_| invalid("days_in_pipeline", row.days_in_pipeline))?;
        let last_contact_days = u32::try_from(row.last_contact_days)
            .map_err(|_| invalid("last_contact_days", row.last_contact_days))?;

        Ok(Deal {
            deal_id: row.deal_id,
            company: row.company,
            value,
            stage: row.stage,
            days_in_pipeline,
            last_contact_days,
        })
    }
}

fn to_sql_int(value: u64) -> StoreResult<i64> {
    i64::try_from(value)
        .map_err(|_| StoreError::InvalidData(format!("deal value {value} exceeds storage range")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::deals::model::{STAGE_DISCOVERY, STAGE_NEGOTIATION, STAGE_PROPOSAL};
    use tempfile::TempDir;

    fn store() -> SqliteDealStore {
        SqliteDealStore::open_in_memory().unwrap()
    }

    #[test]
    fn test_create_and_get_roundtrip() {
        let store = store();
        store
            .create_deal(&Deal::new("D-1", "Acme", 50_000, STAGE_PROPOSAL))
            .unwrap();

        let loaded = store.get_deal("D-1").unwrap().unwrap();
        assert_eq!(loaded.company, "Acme");
        assert_eq!(loaded.value, 50_000);
        assert_eq!(loaded.stage, STAGE_PROPOSAL);
        assert_eq!(loaded.days_in_pipeline, 0);
        assert_eq!(loaded.last_contact_days, 0);
    }

    #[test]
    fn test_get_missing_deal() {
        assert!(store().get_deal("nope").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_create_is_rejected() {
        let store = store();
        let deal = Deal::new("D-1", "Acme", 1, STAGE_DISCOVERY);
        store.create_deal(&deal).unwrap();

        let err = store.create_deal(&deal).unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(id) if id == "D-1"));
    }

    #[test]
    fn test_get_all_keeps_insertion_order() {
        let store = store();
        for id in ["C", "A", "B"] {
            store
                .create_deal(&Deal::new(id, id, 1, STAGE_DISCOVERY))
                .unwrap();
        }

        let ids: Vec<_> = store
            .get_all_deals()
            .unwrap()
            .into_iter()
            .map(|d| d.deal_id)
            .collect();
        assert_eq!(ids, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_update_overwrites_fields_and_keeps_counters() {
        let store = store();
        store
            .create_deal(&Deal::new("D-1", "Acme", 10, STAGE_DISCOVERY).with_age(12, 3))
            .unwrap();

        let updated = store
            .update_deal("D-1", &DealUpdate::new("Acme Corp", 99_000, STAGE_NEGOTIATION))
            .unwrap();

        assert_eq!(updated.company, "Acme Corp");
        assert_eq!(updated.value, 99_000);
        assert_eq!(updated.stage, STAGE_NEGOTIATION);
        assert_eq!(updated.days_in_pipeline, 12);
        assert_eq!(updated.last_contact_days, 3);
        assert_eq!(store.get_deal("D-1").unwrap().unwrap(), updated);
    }

    #[test]
    fn test_update_with_counters() {
        let store = store();
        store
            .create_deal(&Deal::new("D-1", "Acme", 10, STAGE_DISCOVERY))
            .unwrap();

        let update = DealUpdate {
            days_in_pipeline: Some(31),
            last_contact_days: Some(8),
            ..DealUpdate::new("Acme", 10, STAGE_DISCOVERY)
        };
        let updated = store.update_deal("D-1", &update).unwrap();
        assert_eq!(updated.days_in_pipeline, 31);
        assert_eq!(updated.last_contact_days, 8);
    }

    #[test]
    fn test_update_missing_deal() {
        let err = store()
            .update_deal("ghost", &DealUpdate::new("X", 1, STAGE_DISCOVERY))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_negative_stored_value_is_invalid() {
        let store = store();
        store
            .lock()
            .unwrap()
            .execute(
                "INSERT INTO deals VALUES ('bad', 'Bad Co', -1, 'Discovery', 0, 0)",
                [],
            )
            .unwrap();

        assert!(matches!(
            store.get_deal("bad"),
            Err(StoreError::InvalidData(_))
        ));
    }

    #[test]
    fn test_data_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sales.db");

        {
            let store = SqliteDealStore::open(&path).unwrap();
            store
                .create_deal(&Deal::new("D-1", "Acme", 5, STAGE_PROPOSAL))
                .unwrap();
        }

        let store = SqliteDealStore::open(&path).unwrap();
        assert_eq!(store.get_all_deals().unwrap().len(), 1);
    }
}
