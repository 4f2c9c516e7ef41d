//! hostgen.toml configuration parser.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::types::SegmentParsing;

/// Default API port, matching the portal frontend's expectation.
pub const DEFAULT_PORT: u16 = 3001;

/// Default number of allocation attempts before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 32;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostgenConfig {
    pub server: Option<ServerConfig>,
    pub allocator: Option<AllocatorSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: Option<u16>,
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllocatorSection {
    /// Substitute random values when the store cannot be read.
    pub offline_fallback_enabled: Option<bool>,
    pub max_attempts: Option<u32>,
    pub segment_parsing: Option<SegmentParsing>,
}

impl HostgenConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: HostgenConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `path` if given, otherwise fall back to defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn port(&self) -> u16 {
        self.server
            .as_ref()
            .and_then(|s| s.port)
            .unwrap_or(DEFAULT_PORT)
    }

    pub fn data_dir(&self) -> Option<&Path> {
        self.server.as_ref().and_then(|s| s.data_dir.as_deref())
    }

    pub fn offline_fallback_enabled(&self) -> bool {
        self.allocator
            .as_ref()
            .and_then(|a| a.offline_fallback_enabled)
            .unwrap_or(true)
    }

    pub fn max_attempts(&self) -> u32 {
        self.allocator
            .as_ref()
            .and_then(|a| a.max_attempts)
            .unwrap_or(DEFAULT_MAX_ATTEMPTS)
    }

    pub fn segment_parsing(&self) -> SegmentParsing {
        self.allocator
            .as_ref()
            .and_then(|a| a.segment_parsing)
            .unwrap_or_default()
    }
}
