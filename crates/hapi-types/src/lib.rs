//! Shared types for HAPI address reports.
//! Zero NEAR dependency — usable by any client of the HAPI contract.

mod account;
mod category;
mod error;
mod report;

pub use account::AccountAddress;
pub use category::{Category, RiskTier};
pub use error::TypesError;
pub use report::{Report, ReportQuery};
