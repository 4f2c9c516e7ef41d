//! hostgen-client — HTTP access to the hostname portal API.
//!
//! [`PortalClient`] speaks to a running `hostgend` and doubles as an
//! allocator backend, so hostnames can be allocated against a remote store
//! exactly as against a local one.

pub mod client;
pub mod error;

pub use client::PortalClient;
pub use error::{ClientError, ClientResult};
