//! Where a command reads and writes hostnames: a running portal or a local
//! store file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use hostgen_client::PortalClient;
use hostgen_core::HostgenConfig;
use hostgen_state::{HostnameRecord, StateStore};

/// Used when neither `--data-dir` nor the config file names one.
pub const DEFAULT_DATA_DIR: &str = "/var/lib/hostgen";

const STORE_FILE: &str = "hostgen.redb";

#[derive(Args, Debug, Default)]
pub struct TargetArgs {
    /// Portal base URL, e.g. http://portal:3001/api
    #[arg(long, conflicts_with = "data_dir")]
    pub api: Option<String>,

    /// Open the hostname store in this directory directly
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

impl TargetArgs {
    pub fn connect(&self, config: &HostgenConfig) -> anyhow::Result<Portal> {
        if let Some(url) = &self.api {
            let client = PortalClient::new(url).with_context(|| format!("invalid --api {url}"))?;
            return Ok(Portal::Remote(client));
        }

        let data_dir = self
            .data_dir
            .clone()
            .or_else(|| config.data_dir().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("failed to create {}", data_dir.display()))?;
        let path = data_dir.join(STORE_FILE);
        let store = StateStore::open(&path)
            .with_context(|| format!("failed to open store at {}", path.display()))?;
        Ok(Portal::Local(store))
    }
}

pub enum Portal {
    Remote(PortalClient),
    Local(StateStore),
}

impl Portal {
    pub async fn list(&self, limit: Option<usize>) -> anyhow::Result<Vec<HostnameRecord>> {
        Ok(match self {
            Portal::Remote(client) => client.list_hostnames(limit).await?,
            Portal::Local(store) => store.list_hostnames(limit)?,
        })
    }

    pub async fn count(&self) -> anyhow::Result<u64> {
        Ok(match self {
            Portal::Remote(client) => client.count().await?,
            Portal::Local(store) => store.count_hostnames()?,
        })
    }

    pub async fn exists(&self, hostname: &str) -> anyhow::Result<bool> {
        Ok(match self {
            Portal::Remote(client) => client.hostname_exists(hostname).await?,
            Portal::Local(store) => store.hostname_exists(hostname)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_opens_local_store() {
        let dir = tempfile::tempdir().unwrap();
        let args = TargetArgs {
            api: None,
            data_dir: Some(dir.path().join("nested")),
        };
        let portal = args.connect(&HostgenConfig::default()).unwrap();
        assert!(matches!(portal, Portal::Local(_)));
        assert!(dir.path().join("nested").join(STORE_FILE).exists());
    }

    #[test]
    fn config_data_dir_is_used_without_flag() {
        let dir = tempfile::tempdir().unwrap();
        let config: HostgenConfig = toml::from_str(&format!(
            "[server]\ndata_dir = {:?}\n",
            dir.path().display().to_string()
        ))
        .unwrap();
        let portal = TargetArgs::default().connect(&config).unwrap();
        assert!(matches!(portal, Portal::Local(_)));
        assert!(dir.path().join(STORE_FILE).exists());
    }

    #[test]
    fn api_selects_remote() {
        let args = TargetArgs {
            api: Some("http://127.0.0.1:3001/api".to_string()),
            data_dir: None,
        };
        let portal = args.connect(&HostgenConfig::default()).unwrap();
        assert!(matches!(portal, Portal::Remote(_)));
    }

    #[test]
    fn bad_api_url_is_rejected() {
        let args = TargetArgs {
            api: Some("ftp://portal".to_string()),
            data_dir: None,
        };
        assert!(args.connect(&HostgenConfig::default()).is_err());
    }

    #[tokio::test]
    async fn local_reads_reflect_store() {
        let dir = tempfile::tempdir().unwrap();
        let args = TargetArgs {
            api: None,
            data_dir: Some(dir.path().to_path_buf()),
        };
        let portal = args.connect(&HostgenConfig::default()).unwrap();
        if let Portal::Local(store) = &portal {
            store
                .save_hostname(hostgen_state::NewHostname {
                    hostname: "L10000PSQL0".to_string(),
                    ..Default::default()
                })
                .unwrap();
        }
        assert_eq!(portal.count().await.unwrap(), 1);
        assert!(portal.exists("L10000PSQL0").await.unwrap());
        assert!(!portal.exists("L10001PSQL0").await.unwrap());
        assert_eq!(portal.list(None).await.unwrap().len(), 1);
    }
}
