//! Persistence boundary consumed by the allocator.

use async_trait::async_trait;
use hostgen_state::{HostnameRecord, NewHostname, StateStore};

use crate::error::BackendResult;

/// Read access the allocator needs: a full listing and an existence probe.
#[async_trait]
pub trait HostnameBackend: Send + Sync {
    /// Every stored record, unfiltered.
    async fn list_hostnames(&self) -> BackendResult<Vec<HostnameRecord>>;

    /// Whether the literal hostname is already stored.
    async fn hostname_exists(&self, candidate: &str) -> BackendResult<bool>;
}

/// A backend that can also reserve a hostname atomically.
#[async_trait]
pub trait HostnameRegistry: HostnameBackend {
    /// Store `record` unless its hostname is taken; `None` means taken.
    async fn insert_if_absent(&self, record: NewHostname) -> BackendResult<Option<HostnameRecord>>;
}

#[async_trait]
impl HostnameBackend for StateStore {
    async fn list_hostnames(&self) -> BackendResult<Vec<HostnameRecord>> {
        Ok(StateStore::list_hostnames(self, None)?)
    }

    async fn hostname_exists(&self, candidate: &str) -> BackendResult<bool> {
        Ok(StateStore::hostname_exists(self, candidate)?)
    }
}

#[async_trait]
impl HostnameRegistry for StateStore {
    async fn insert_if_absent(&self, record: NewHostname) -> BackendResult<Option<HostnameRecord>> {
        Ok(StateStore::insert_if_absent(self, record)?)
    }
}
