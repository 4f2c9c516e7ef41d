//! redb table definitions for the hostname store.

use redb::TableDefinition;

/// Hostname records keyed by the hostname string.
pub const HOSTNAMES: TableDefinition<&str, &[u8]> = TableDefinition::new("hostnames");

/// Store-wide counters keyed by name.
pub const META: TableDefinition<&str, u64> = TableDefinition::new("meta");

/// Key in [`META`] holding the last id handed out.
pub const LAST_ID_KEY: &str = "last_id";
