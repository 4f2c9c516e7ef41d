//! hostgen-alloc — standardized hostname allocation.
//!
//! Turns an [`AllocationRequest`](hostgen_core::AllocationRequest) into a
//! hostname of the form
//!
//! ```text
//! <prefix:1 char><sequence digits><environment><server function><node>
//! ```
//!
//! and checks it against the persisted records before handing it out.
//!
//! # Architecture
//!
//! ```text
//! Allocator
//!   ├── resolve_prefix (OS text → one-letter class code)
//!   ├── next_sequence  (scan all records, max matching segment + 1)
//!   └── hostname_exists probe, retried up to max_attempts
//!         │
//!         └── HostnameBackend (StateStore, PortalClient, ...)
//! ```
//!
//! The allocator itself never writes. `allocate_and_register` is the opt-in
//! path that reserves the name atomically through a [`HostnameRegistry`].

pub mod allocator;
pub mod backend;
pub mod error;
pub mod prefix;
pub mod sequence;

#[cfg(test)]
mod testing;

pub use allocator::{Allocator, AllocatorConfig};
pub use backend::{HostnameBackend, HostnameRegistry};
pub use error::{AllocationError, AllocationResult, BackendError, BackendResult};
pub use prefix::{OsPrefix, resolve_prefix};
