use async_trait::async_trait;
use hapi_types::{AccountAddress, Category, Report};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::ContractHandle;
use crate::session::Session;

/// Local stand-in for the HAPI contract.
///
/// Only the owner may write, mirroring the contract's `No access` check. The
/// caller is whoever the attached session says is signed in.
pub struct InMemoryContract {
    contract_id: String,
    owner_id: String,
    session: Arc<dyn Session>,
    reports: Mutex<HashMap<AccountAddress, Category>>,
}

impl InMemoryContract {
    pub fn new(
        contract_id: impl Into<String>,
        owner_id: impl Into<String>,
        session: Arc<dyn Session>,
    ) -> Self {
        Self {
            contract_id: contract_id.into(),
            owner_id: owner_id.into(),
            session,
            reports: Mutex::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.reports.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ContractHandle for InMemoryContract {
    fn contract_id(&self) -> &str {
        &self.contract_id
    }

    async fn report_address(&self, report: &Report) -> Result<(), crate::Error> {
        let caller = self.session.account_id().ok_or(crate::Error::NotSignedIn)?;
        if caller != self.owner_id {
            return Err(crate::Error::Rpc(format!(
                "Smart contract panicked: No access ({caller})"
            )));
        }
        self.reports
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(report.account_id.clone(), report.category);
        Ok(())
    }

    async fn get_address_category(
        &self,
        account_id: &AccountAddress,
    ) -> Result<Option<Category>, crate::Error> {
        Ok(self
            .reports
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(account_id)
            .copied())
    }
}
