//! Transaction signing with a locally held NEAR key.

use near_crypto::{InMemorySigner, PublicKey, SecretKey};
use near_primitives::hash::CryptoHash;
use near_primitives::transaction::{Action, SignedTransaction, Transaction, TransactionV0};
use near_primitives::types::{AccountId, Nonce};
use std::path::Path;
use std::str::FromStr;

/// Signing key of the signed-in account.
pub struct ReporterSigner {
    signer: near_crypto::Signer,
}

impl ReporterSigner {
    pub fn new(account_id: AccountId, secret_key: SecretKey) -> Self {
        Self {
            signer: InMemorySigner::from_secret_key(account_id, secret_key),
        }
    }

    /// Load a near-cli credential file.
    pub fn from_file(path: &Path) -> Result<Self, crate::Error> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            crate::Error::Config(format!("Failed to read key file {}: {e}", path.display()))
        })?;
        Self::from_keys_json(&json)
    }

    /// Parse keys JSON in the near-cli format:
    /// `{"account_id": "...", "public_key": "...", "private_key": "..."}`,
    /// optionally wrapped in a one-element array.
    pub fn from_keys_json(json: &str) -> Result<Self, crate::Error> {
        #[derive(serde::Deserialize)]
        struct KeyFile {
            account_id: String,
            #[serde(alias = "private_key")]
            secret_key: String,
        }

        let key: KeyFile = if json.trim().starts_with('[') {
            let keys: Vec<KeyFile> = serde_json::from_str(json)
                .map_err(|e| crate::Error::Config(format!("Invalid key JSON: {e}")))?;
            keys.into_iter()
                .next()
                .ok_or_else(|| crate::Error::Config("Empty key array".to_string()))?
        } else {
            serde_json::from_str(json)
                .map_err(|e| crate::Error::Config(format!("Invalid key JSON: {e}")))?
        };

        let secret_key = SecretKey::from_str(&key.secret_key)
            .map_err(|e| crate::Error::Config(format!("Invalid secret key: {e}")))?;
        let account_id = key
            .account_id
            .parse()
            .map_err(|e| crate::Error::Config(format!("Invalid account: {e}")))?;

        Ok(Self::new(account_id, secret_key))
    }

    pub fn public_key(&self) -> PublicKey {
        self.signer.public_key()
    }

    pub fn account_id(&self) -> AccountId {
        self.signer.get_account_id().clone()
    }

    pub fn sign_transaction(
        &self,
        nonce: Nonce,
        receiver_id: &AccountId,
        block_hash: CryptoHash,
        actions: Vec<Action>,
    ) -> SignedTransaction {
        Transaction::V0(TransactionV0 {
            signer_id: self.account_id(),
            public_key: self.public_key(),
            nonce,
            receiver_id: receiver_id.clone(),
            block_hash,
            actions,
        })
        .sign(&self.signer)
    }
}

impl std::fmt::Debug for ReporterSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ReporterSigner({}, {})", self.account_id(), self.public_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use near_crypto::KeyType;

    fn key_json(account: &str, field: &str) -> (String, PublicKey) {
        let sk = SecretKey::from_seed(KeyType::ED25519, account);
        let pk = sk.public_key();
        let json = format!(
            r#"{{"account_id":"{account}","public_key":"{pk}","{field}":"{sk}"}}"#
        );
        (json, pk)
    }

    #[test]
    fn parses_near_cli_private_key_field() {
        let (json, pk) = key_json("alice.testnet", "private_key");
        let signer = ReporterSigner::from_keys_json(&json).unwrap();
        assert_eq!(signer.account_id().as_str(), "alice.testnet");
        assert_eq!(signer.public_key(), pk);
    }

    #[test]
    fn parses_array_form() {
        let (json, _) = key_json("bob.testnet", "secret_key");
        let signer = ReporterSigner::from_keys_json(&format!("[{json}]")).unwrap();
        assert_eq!(signer.account_id().as_str(), "bob.testnet");
    }

    #[test]
    fn rejects_empty_array_and_garbage() {
        assert!(ReporterSigner::from_keys_json("[]").is_err());
        assert!(ReporterSigner::from_keys_json("{}").is_err());
        assert!(ReporterSigner::from_keys_json(
            r#"{"account_id":"a.testnet","secret_key":"ed25519:nope"}"#
        )
        .is_err());
    }
}
