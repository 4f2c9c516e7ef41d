//! Allocator error types.

use thiserror::Error;

/// Failure reported by a persistence backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("store error: {0}")]
    Store(#[from] hostgen_state::StateError),

    #[error("transport failure: {0}")]
    Transport(String),
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Errors that can end an allocation.
///
/// With the offline fallback enabled only `Exhausted` and write-path
/// `Backend` errors can occur.
#[derive(Debug, Error)]
pub enum AllocationError {
    #[error("no free hostname found after {attempts} attempts")]
    Exhausted { attempts: u32 },

    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("cannot read sequence number from hostname {hostname:?}")]
    MalformedSequence { hostname: String },
}

pub type AllocationResult<T> = Result<T, AllocationError>;
