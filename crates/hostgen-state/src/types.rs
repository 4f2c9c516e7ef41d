//! Domain types for the hostname store.

use serde::{Deserialize, Serialize};

/// Identifier assigned by the store when a record is saved.
pub type RecordId = u64;

/// Format of [`HostnameRecord::updatetime`].
pub const UPDATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One issued hostname and its inventory details.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HostnameRecord {
    pub id: RecordId,
    pub code: String,
    pub hostname: String,
    pub domain: String,
    pub os: String,
    pub environment: String,
    pub server_function: String,
    pub node: String,
    pub site: String,
    /// Primary IP address.
    pub ip: String,
    /// Secondary IP address.
    pub sec_ip: String,
    pub updated_by: String,
    pub system: String,
    pub description: String,
    /// Object type, e.g. "VIRTUAL SERVER".
    pub object: String,
    pub alias: String,
    /// "ACTIVE", "INACTIVE" or "DECOMMISSIONED".
    pub status: String,
    pub project: String,
    pub owner: String,
    /// Last update time, UTC, `YYYY-MM-DD HH:MM:SS`.
    pub updatetime: String,
}

/// A record about to be saved; the store fills in `id` and `updatetime`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NewHostname {
    pub code: String,
    pub hostname: String,
    pub domain: String,
    pub os: String,
    pub environment: String,
    pub server_function: String,
    pub node: String,
    pub site: String,
    pub ip: String,
    pub sec_ip: String,
    pub updated_by: String,
    pub system: String,
    pub description: String,
    pub object: String,
    pub alias: String,
    pub status: String,
    pub project: String,
    pub owner: String,
}

impl NewHostname {
    /// Attach store-assigned fields.
    pub fn into_record(self, id: RecordId, updatetime: String) -> HostnameRecord {
        HostnameRecord {
            id,
            code: self.code,
            hostname: self.hostname,
            domain: self.domain,
            os: self.os,
            environment: self.environment,
            server_function: self.server_function,
            node: self.node,
            site: self.site,
            ip: self.ip,
            sec_ip: self.sec_ip,
            updated_by: self.updated_by,
            system: self.system,
            description: self.description,
            object: self.object,
            alias: self.alias,
            status: self.status,
            project: self.project,
            owner: self.owner,
            updatetime,
        }
    }
}

/// Column filter for [`crate::StateStore::filter_hostnames`].
///
/// Unset fields do not constrain the result.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HostnameFilter {
    /// Hostname must start with this text.
    pub prefix: Option<String>,
    /// `environment` column must equal this.
    pub environment: Option<String>,
    /// `server_function` column must equal this.
    #[serde(alias = "serverFunction")]
    pub server_function: Option<String>,
}

impl HostnameFilter {
    pub fn matches(&self, record: &HostnameRecord) -> bool {
        let prefix_ok = self
            .prefix
            .as_deref()
            .is_none_or(|p| record.hostname.starts_with(p));
        let env_ok = self
            .environment
            .as_deref()
            .is_none_or(|e| record.environment == e);
        let fn_ok = self
            .server_function
            .as_deref()
            .is_none_or(|f| record.server_function == f);
        prefix_ok && env_ok && fn_ok
    }
}
