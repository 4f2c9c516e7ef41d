//! StateStore — redb-backed hostname persistence.
//!
//! Provides typed operations over issued hostname records. All values are
//! JSON-serialized into redb's `&[u8]` value column. The store supports
//! both on-disk and in-memory backends (the latter for testing).

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata};
use tracing::debug;

use crate::error::{StateError, StateResult};
use crate::tables::*;
use crate::types::*;

/// Convert any `Display` error into a `StateError` variant via a closure factory.
macro_rules! map_err {
    ($variant:ident) => {
        |e| StateError::$variant(e.to_string())
    };
}

/// Thread-safe hostname store backed by redb.
#[derive(Clone)]
pub struct StateStore {
    db: Arc<Database>,
}

impl StateStore {
    /// Open (or create) a persistent store at the given path.
    pub fn open(path: &Path) -> StateResult<Self> {
        let db = Database::create(path).map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!(?path, "hostname store opened");
        Ok(store)
    }

    /// Create an ephemeral in-memory store (for testing).
    pub fn open_in_memory() -> StateResult<Self> {
        let backend = redb::backends::InMemoryBackend::new();
        let db = Database::builder()
            .create_with_backend(backend)
            .map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!("in-memory hostname store opened");
        Ok(store)
    }

    /// Create all tables if they don't exist yet.
    fn ensure_tables(&self) -> StateResult<()> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        txn.open_table(HOSTNAMES).map_err(map_err!(Table))?;
        txn.open_table(META).map_err(map_err!(Table))?;
        txn.commit().map_err(map_err!(Transaction))?;
        Ok(())
    }

    /// Check that the database can serve a read transaction.
    pub fn ping(&self) -> StateResult<()> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        txn.open_table(HOSTNAMES).map_err(map_err!(Table))?;
        Ok(())
    }

    // ── Writes ─────────────────────────────────────────────────────

    /// Save a new record. Fails with [`StateError::Conflict`] if the
    /// hostname is already stored.
    pub fn save_hostname(&self, new: NewHostname) -> StateResult<HostnameRecord> {
        let hostname = new.hostname.clone();
        self.insert_if_absent(new)?
            .ok_or(StateError::Conflict(hostname))
    }

    /// Save a new record unless its hostname is already stored.
    ///
    /// The existence check and the insert share one write transaction, so
    /// two callers racing for the same hostname cannot both succeed.
    /// Returns `None` when the hostname was taken.
    pub fn insert_if_absent(&self, new: NewHostname) -> StateResult<Option<HostnameRecord>> {
        let hostname = new.hostname.clone();
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        let stored = {
            let mut table = txn.open_table(HOSTNAMES).map_err(map_err!(Table))?;
            let taken = table
                .get(hostname.as_str())
                .map_err(map_err!(Read))?
                .is_some();
            if taken {
                None
            } else {
                let mut meta = txn.open_table(META).map_err(map_err!(Table))?;
                let last_id = meta
                    .get(LAST_ID_KEY)
                    .map_err(map_err!(Read))?
                    .map(|guard| guard.value())
                    .unwrap_or(0);
                let id = last_id + 1;
                meta.insert(LAST_ID_KEY, id).map_err(map_err!(Write))?;

                let record = new.into_record(id, now_updatetime());
                let value = serde_json::to_vec(&record).map_err(map_err!(Serialize))?;
                table
                    .insert(record.hostname.as_str(), value.as_slice())
                    .map_err(map_err!(Write))?;
                Some(record)
            }
        };

        match stored {
            Some(record) => {
                txn.commit().map_err(map_err!(Transaction))?;
                debug!(hostname = %record.hostname, id = record.id, "hostname stored");
                Ok(Some(record))
            }
            None => {
                txn.abort().map_err(map_err!(Transaction))?;
                debug!(%hostname, "hostname already stored");
                Ok(None)
            }
        }
    }

    /// Delete a record by hostname. Returns true if it existed.
    pub fn delete_hostname(&self, hostname: &str) -> StateResult<bool> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        let existed;
        {
            let mut table = txn.open_table(HOSTNAMES).map_err(map_err!(Table))?;
            existed = table.remove(hostname).map_err(map_err!(Write))?.is_some();
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(%hostname, existed, "hostname deleted");
        Ok(existed)
    }

    // ── Reads ──────────────────────────────────────────────────────

    /// Get a record by its hostname.
    pub fn get_hostname(&self, hostname: &str) -> StateResult<Option<HostnameRecord>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(HOSTNAMES).map_err(map_err!(Table))?;
        match table.get(hostname).map_err(map_err!(Read))? {
            Some(guard) => {
                let record: HostnameRecord =
                    serde_json::from_slice(guard.value()).map_err(map_err!(Deserialize))?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// Whether the literal hostname string is stored.
    pub fn hostname_exists(&self, hostname: &str) -> StateResult<bool> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(HOSTNAMES).map_err(map_err!(Table))?;
        Ok(table.get(hostname).map_err(map_err!(Read))?.is_some())
    }

    /// Number of stored records.
    pub fn count_hostnames(&self) -> StateResult<u64> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(HOSTNAMES).map_err(map_err!(Table))?;
        table.len().map_err(map_err!(Read))
    }

    /// All records, most recently updated first (ties: newest id first).
    pub fn list_hostnames(&self, limit: Option<usize>) -> StateResult<Vec<HostnameRecord>> {
        let mut results = self.scan(|_| true)?;
        results.sort_by(|a, b| {
            b.updatetime
                .cmp(&a.updatetime)
                .then_with(|| b.id.cmp(&a.id))
        });
        if let Some(limit) = limit {
            results.truncate(limit);
        }
        Ok(results)
    }

    /// Records matching the filter, ordered by hostname.
    pub fn filter_hostnames(&self, filter: &HostnameFilter) -> StateResult<Vec<HostnameRecord>> {
        // Keys are hostnames, so table order is already hostname order.
        self.scan(|record| filter.matches(record))
    }

    fn scan(&self, mut keep: impl FnMut(&HostnameRecord) -> bool) -> StateResult<Vec<HostnameRecord>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(HOSTNAMES).map_err(map_err!(Table))?;
        let mut results = Vec::new();
        for entry in table.iter().map_err(map_err!(Read))? {
            let (_, value) = entry.map_err(map_err!(Read))?;
            let record: HostnameRecord =
                serde_json::from_slice(value.value()).map_err(map_err!(Deserialize))?;
            if keep(&record) {
                results.push(record);
            }
        }
        Ok(results)
    }
}

fn now_updatetime() -> String {
    chrono::Utc::now().format(UPDATETIME_FORMAT).to_string()
}
