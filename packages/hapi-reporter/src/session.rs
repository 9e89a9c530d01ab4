//! Session seam: who is signed in, and the login/logout actions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::signer::ReporterSigner;

/// Authentication state owned outside the form.
#[async_trait]
pub trait Session: Send + Sync {
    fn is_signed_in(&self) -> bool;

    /// Signed-in account, `None` when signed out.
    fn account_id(&self) -> Option<String>;

    async fn login(&self) -> Result<(), crate::Error>;

    async fn logout(&self) -> Result<(), crate::Error>;
}

/// On-disk record of who is signed in. The key itself stays in the
/// credential file or `HAPI_KEYS_JSON`.
#[derive(Debug, Serialize, Deserialize)]
struct SessionMarker {
    account_id: String,
}

/// Session backed by a near-cli credential file or `HAPI_KEYS_JSON`.
///
/// `login` writes a marker under the credentials directory and `logout`
/// removes it, so the signed-in state carries over to the next process.
pub struct CredentialsSession {
    config: Config,
    keys_json: Option<String>,
    signer: RwLock<Option<Arc<ReporterSigner>>>,
}

impl CredentialsSession {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            keys_json: None,
            signer: RwLock::new(None),
        }
    }

    /// Like [`Self::new`], picking up `HAPI_KEYS_JSON` when set.
    pub fn from_env(config: Config) -> Self {
        let keys_json = std::env::var("HAPI_KEYS_JSON")
            .ok()
            .filter(|k| !k.trim().is_empty());
        Self {
            keys_json,
            ..Self::new(config)
        }
    }

    pub fn with_keys_json(config: Config, keys_json: impl Into<String>) -> Self {
        Self {
            keys_json: Some(keys_json.into()),
            ..Self::new(config)
        }
    }

    /// Resume a previous login. Failures are logged and leave the session
    /// signed out.
    pub fn restore(&self) -> bool {
        match self.try_restore() {
            Ok(restored) => restored,
            Err(e) => {
                warn!(error = %e, "Session restore failed");
                false
            }
        }
    }

    /// `Ok(false)` when no login was recorded; an error when one was but its
    /// key can't be loaded.
    pub fn try_restore(&self) -> Result<bool, crate::Error> {
        let Some(marker) = self.read_marker()? else {
            debug!("No saved session");
            return Ok(false);
        };
        let signer = self.load_signer()?;
        if signer.account_id().as_str() != marker.account_id {
            return Err(crate::Error::Config(format!(
                "saved session is for {}, key belongs to {}",
                marker.account_id,
                signer.account_id()
            )));
        }
        info!(account = %signer.account_id(), "Session restored");
        self.set_signer(Some(Arc::new(signer)));
        Ok(true)
    }

    /// Key of the signed-in account.
    pub fn signer(&self) -> Option<Arc<ReporterSigner>> {
        self.signer.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn set_signer(&self, signer: Option<Arc<ReporterSigner>>) {
        *self.signer.write().unwrap_or_else(|e| e.into_inner()) = signer;
    }

    fn load_signer(&self) -> Result<ReporterSigner, crate::Error> {
        let signer = match (&self.keys_json, &self.config.account_id) {
            (Some(json), _) => ReporterSigner::from_keys_json(json)?,
            (None, Some(account)) => {
                ReporterSigner::from_file(&self.config.credentials_path(account))?
            }
            (None, None) => {
                return Err(crate::Error::Config(
                    "no account configured: set HAPI_ACCOUNT_ID or HAPI_KEYS_JSON".into(),
                ))
            }
        };

        if let Some(expected) = &self.config.account_id {
            if signer.account_id().as_str() != expected {
                return Err(crate::Error::Config(format!(
                    "key belongs to {}, expected {expected}",
                    signer.account_id()
                )));
            }
        }
        Ok(signer)
    }

    fn read_marker(&self) -> Result<Option<SessionMarker>, crate::Error> {
        let path = self.config.session_path();
        let data = match std::fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(crate::Error::Config(format!(
                    "Failed to read {}: {e}",
                    path.display()
                )))
            }
        };
        serde_json::from_str(&data)
            .map(Some)
            .map_err(|e| crate::Error::Config(format!("Invalid session file: {e}")))
    }

    fn write_marker(&self, account_id: &str) -> Result<(), crate::Error> {
        let path = self.config.session_path();
        let json = serde_json::to_string_pretty(&SessionMarker {
            account_id: account_id.to_string(),
        })
        .map_err(|e| crate::Error::Config(format!("Failed to serialize session: {e}")))?;

        // Atomic write: tmp + rename
        let tmp = path.with_extension("tmp");
        if let Some(parent) = tmp.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                crate::Error::Config(format!("Failed to create session directory: {e}"))
            })?;
        }
        std::fs::write(&tmp, json)
            .map_err(|e| crate::Error::Config(format!("Failed to write session: {e}")))?;
        std::fs::rename(&tmp, &path)
            .map_err(|e| crate::Error::Config(format!("Failed to rename session: {e}")))?;
        debug!(path = %path.display(), "Session saved");
        Ok(())
    }

    fn remove_marker(&self) -> Result<(), crate::Error> {
        match std::fs::remove_file(self.config.session_path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(crate::Error::Config(format!("Failed to remove session: {e}"))),
        }
    }
}

#[async_trait]
impl Session for CredentialsSession {
    fn is_signed_in(&self) -> bool {
        self.signer().is_some()
    }

    fn account_id(&self) -> Option<String> {
        self.signer().map(|s| s.account_id().to_string())
    }

    async fn login(&self) -> Result<(), crate::Error> {
        let signer = self.load_signer().map_err(|e| {
            warn!(error = %e, "Login failed");
            e
        })?;
        self.write_marker(signer.account_id().as_str())?;
        info!(account = %signer.account_id(), network = %self.config.network_id, "Signed in");
        self.set_signer(Some(Arc::new(signer)));
        Ok(())
    }

    async fn logout(&self) -> Result<(), crate::Error> {
        self.remove_marker()?;
        if let Some(account) = self.account_id() {
            info!(account = %account, "Signed out");
        }
        self.set_signer(None);
        Ok(())
    }
}
