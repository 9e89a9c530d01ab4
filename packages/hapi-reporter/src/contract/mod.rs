//! Contract handle seam and its adapters.
//!
//! The HAPI contract exposes two methods the reporter consumes:
//! `report_address({account_id, category})` (change) and
//! `get_address_category({account_id}) -> Option<Category>` (view).

mod memory;
mod near;

pub use memory::InMemoryContract;
pub use near::NearContract;

use async_trait::async_trait;
use hapi_types::{AccountAddress, Category, Report};

pub const REPORT_METHOD: &str = "report_address";
pub const QUERY_METHOD: &str = "get_address_category";

/// Proxy for the deployed HAPI contract.
#[async_trait]
pub trait ContractHandle: Send + Sync {
    /// Account the contract is deployed at.
    fn contract_id(&self) -> &str;

    /// Persist `report`. Fails on any network or on-chain error.
    async fn report_address(&self, report: &Report) -> Result<(), crate::Error>;

    /// Stored category, `None` when the account was never reported.
    async fn get_address_category(
        &self,
        account_id: &AccountAddress,
    ) -> Result<Option<Category>, crate::Error>;
}
