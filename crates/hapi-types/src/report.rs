//! JSON argument shapes of the contract's `report_address` and
//! `get_address_category` methods.

use serde::{Deserialize, Serialize};

use crate::{AccountAddress, Category};

/// Arguments of `report_address`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub account_id: AccountAddress,
    pub category: Category,
}

/// Arguments of `get_address_category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportQuery {
    pub account_id: AccountAddress,
}

impl Report {
    pub fn new(account_id: AccountAddress, category: Category) -> Self {
        Self {
            account_id,
            category,
        }
    }

    pub fn query(&self) -> ReportQuery {
        ReportQuery {
            account_id: self.account_id.clone(),
        }
    }
}
