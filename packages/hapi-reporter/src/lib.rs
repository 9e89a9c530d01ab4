//! # HAPI Reporter
//!
//! Client for the HAPI address-reporting contract on NEAR. Reports a
//! [`Category`] for an account and reads back what the contract stores.
//!
//! ## Quick Start
//! ```bash
//! HAPI_ACCOUNT_ID=alice.testnet cargo run --bin hapi-reporter -- report bob.testnet Mixer
//! ```
//!
//! ## Layout
//! - [`form::ReportForm`] - the report form controller
//! - [`contract`] - contract handle seam and the NEAR adapter
//! - [`session`] - session seam and the credentials-file adapter

pub mod config;
pub mod contract;
mod error;
pub mod form;
pub mod notification;
pub mod presenter;
pub mod rpc;
pub mod session;
pub mod signer;

pub use config::Config;
pub use error::Error;
pub use hapi_types::{AccountAddress, Category, Report, RiskTier};
