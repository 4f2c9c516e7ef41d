//! hostgen-state — embedded hostname record store.
//!
//! Backed by [redb](https://docs.rs/redb), holds every hostname the portal
//! has issued together with its inventory details (site, IPs, owner, ...).
//!
//! # Architecture
//!
//! Records are JSON-serialized into redb's `&[u8]` value column and keyed by
//! the hostname string itself, so a hostname can be stored at most once.
//! Numeric record ids come from a counter kept in a separate metadata table.
//!
//! The `StateStore` is `Clone` + `Send` + `Sync` (backed by `Arc<Database>`)
//! and can be shared across async tasks.

pub mod error;
pub mod store;
pub mod tables;
pub mod types;

pub use error::{StateError, StateResult};
pub use store::StateStore;
pub use types::*;
