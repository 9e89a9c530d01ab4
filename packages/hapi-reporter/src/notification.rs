//! Success notification shown after a report is committed.

use crate::contract::REPORT_METHOD;

/// Explorer page of `account_id` on `network_id`.
pub fn explorer_account_url(network_id: &str, account_id: &str) -> String {
    format!("https://explorer.{network_id}.near.org/accounts/{account_id}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub account_id: String,
    pub contract_id: String,
    pub network_id: String,
}

impl Notification {
    pub fn new(
        account_id: impl Into<String>,
        contract_id: impl Into<String>,
        network_id: impl Into<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            contract_id: contract_id.into(),
            network_id: network_id.into(),
        }
    }

    pub fn account_url(&self) -> String {
        explorer_account_url(&self.network_id, &self.account_id)
    }

    pub fn contract_url(&self) -> String {
        explorer_account_url(&self.network_id, &self.contract_id)
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} called method: '{REPORT_METHOD}' in contract: {}",
            self.account_id, self.contract_id
        )?;
        writeln!(f, "  {}", self.account_url())?;
        writeln!(f, "  {}", self.contract_url())?;
        write!(f, "\u{2714} Succeeded")
    }
}
