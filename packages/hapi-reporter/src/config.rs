//! Reporter configuration.

use serde::Deserialize;
use std::path::PathBuf;
use tracing::warn;

/// Network and account configuration for the reporter.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// `testnet`, `mainnet`, ... Used for explorer links and credential paths.
    #[serde(default = "defaults::network_id")]
    pub network_id: String,

    #[serde(default = "defaults::node_url")]
    pub node_url: String,

    #[serde(default = "defaults::contract_id")]
    pub contract_id: String,

    /// Account the session signs in as. Unset means signed out.
    #[serde(default)]
    pub account_id: Option<String>,

    #[serde(default = "defaults::credentials_dir")]
    pub credentials_dir: PathBuf,

    #[serde(default = "defaults::gas_tgas")]
    pub gas_tgas: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network_id: defaults::network_id(),
            node_url: defaults::node_url(),
            contract_id: defaults::contract_id(),
            account_id: None,
            credentials_dir: defaults::credentials_dir(),
            gas_tgas: defaults::gas_tgas(),
        }
    }
}

impl Config {
    /// Load from `hapi.toml` (optional) overlaid with `HAPI_*` env vars.
    ///
    /// A missing source falls back to defaults; anything malformed is an error.
    pub fn load() -> Result<Self, crate::Error> {
        Self::load_from("hapi")
    }

    pub fn load_from(file_stem: &str) -> Result<Self, crate::Error> {
        let loaded = config::Config::builder()
            .add_source(config::File::with_name(file_stem).required(false))
            .add_source(config::Environment::with_prefix("HAPI"))
            .build()
            .and_then(|c| c.try_deserialize::<Config>());

        match loaded {
            Ok(config) => Ok(config),
            Err(e) => {
                let err_str = format!("{e}");
                if err_str.contains("not found") {
                    warn!(error = %e, "No config found, using defaults");
                    Ok(Config::default())
                } else {
                    Err(crate::Error::Config(err_str))
                }
            }
        }
    }

    /// Path of the near-cli credential file for `account_id` on this network.
    pub fn credentials_path(&self, account_id: &str) -> PathBuf {
        self.credentials_dir
            .join(&self.network_id)
            .join(format!("{account_id}.json"))
    }

    /// Marker of the signed-in account, kept next to the credentials so a
    /// login survives across runs.
    pub fn session_path(&self) -> PathBuf {
        self.credentials_dir
            .join(&self.network_id)
            .join("hapi-session.json")
    }
}

mod defaults {
    use std::path::PathBuf;

    fn network() -> String {
        std::env::var("HAPI_NETWORK")
            .or_else(|_| std::env::var("NEAR_NETWORK"))
            .ok()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "testnet".into())
    }

    pub fn network_id() -> String {
        network()
    }

    pub fn node_url() -> String {
        format!("https://rpc.{}.near.org", network())
    }

    pub fn contract_id() -> String {
        if network().contains("mainnet") {
            "hapi.near".into()
        } else {
            "hapi.testnet".into()
        }
    }

    pub fn credentials_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".near-credentials")
    }

    pub fn gas_tgas() -> u64 {
        30
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_path_is_per_network() {
        let config = Config {
            network_id: "testnet".into(),
            credentials_dir: PathBuf::from("/tmp/creds"),
            ..Config::default()
        };
        assert_eq!(
            config.credentials_path("alice.testnet"),
            PathBuf::from("/tmp/creds/testnet/alice.testnet.json")
        );
        assert_eq!(
            config.session_path(),
            PathBuf::from("/tmp/creds/testnet/hapi-session.json")
        );
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let stem = dir.path().join("hapi");
        std::fs::write(
            stem.with_extension("toml"),
            "network_id = \"localnet\"\ncontract_id = \"hapi.test.near\"\ngas_tgas = 50\n",
        )
        .unwrap();

        let config = Config::load_from(stem.to_str().unwrap()).unwrap();
        assert_eq!(config.network_id, "localnet");
        assert_eq!(config.contract_id, "hapi.test.near");
        assert_eq!(config.gas_tgas, 50);
        assert!(config.account_id.is_none());
        assert!(config.node_url.starts_with("https://rpc."));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let stem = dir.path().join("hapi");
        std::fs::write(stem.with_extension("toml"), "gas_tgas = \"lots\"\n").unwrap();

        let err = Config::load_from(stem.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }
}
