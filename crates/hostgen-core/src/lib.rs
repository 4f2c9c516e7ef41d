pub mod catalog;
pub mod config;
pub mod types;

pub use config::HostgenConfig;
pub use types::*;
