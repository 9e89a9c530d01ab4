use async_trait::async_trait;
use hapi_types::{AccountAddress, Category, Report, ReportQuery};
use near_gas::NearGas;
use near_primitives::transaction::{Action, FunctionCallAction};
use near_primitives::types::AccountId;
use near_primitives::views::{FinalExecutionOutcomeView, FinalExecutionStatus};
use std::sync::Arc;
use tracing::{error, info};

use super::{ContractHandle, QUERY_METHOD, REPORT_METHOD};
use crate::config::Config;
use crate::rpc::RpcClient;
use crate::session::CredentialsSession;

/// HAPI contract reached over NEAR JSON-RPC, signing with the session key.
pub struct NearContract {
    rpc: RpcClient,
    contract_id: AccountId,
    session: Arc<CredentialsSession>,
    gas: NearGas,
}

impl NearContract {
    pub fn new(config: &Config, session: Arc<CredentialsSession>) -> Result<Self, crate::Error> {
        let contract_id = config
            .contract_id
            .parse()
            .map_err(|e| crate::Error::Config(format!("Invalid contract id: {e}")))?;
        Ok(Self {
            rpc: RpcClient::new(&config.node_url),
            contract_id,
            session,
            gas: NearGas::from_tgas(config.gas_tgas),
        })
    }
}

#[async_trait]
impl ContractHandle for NearContract {
    fn contract_id(&self) -> &str {
        self.contract_id.as_str()
    }

    async fn report_address(&self, report: &Report) -> Result<(), crate::Error> {
        let signer = self.session.signer().ok_or(crate::Error::NotSignedIn)?;
        // The contract takes a validated account id and panics otherwise.
        report
            .account_id
            .as_str()
            .parse::<AccountId>()
            .map_err(|e| crate::Error::Rpc(format!("invalid account id: {e}")))?;

        let access_key = self
            .rpc
            .query_access_key(&signer.account_id(), &signer.public_key())
            .await?;
        let block_hash = self.rpc.latest_block_hash().await?;

        let actions = build_report_actions(report, self.gas)?;
        let signed_tx =
            signer.sign_transaction(access_key.nonce + 1, &self.contract_id, block_hash, actions);
        let tx_hash = signed_tx.get_hash();

        let outcome = self.rpc.send_signed_tx(signed_tx).await?;
        check_outcome(&outcome).map_err(|e| {
            error!(tx_hash = %tx_hash, error = %e, "report_address failed on-chain");
            e
        })?;

        info!(
            tx_hash = %tx_hash,
            account = %report.account_id,
            category = %report.category,
            "Report committed"
        );
        Ok(())
    }

    async fn get_address_category(
        &self,
        account_id: &AccountAddress,
    ) -> Result<Option<Category>, crate::Error> {
        let args = serde_json::to_vec(&ReportQuery {
            account_id: account_id.clone(),
        })
        .map_err(|e| crate::Error::Rpc(format!("failed to encode args: {e}")))?;
        let bytes = self
            .rpc
            .view_function(&self.contract_id, QUERY_METHOD, args)
            .await?;
        decode_category(&bytes)
    }
}

/// `FunctionCall` for `report_address` with JSON args and no deposit.
fn build_report_actions(report: &Report, gas: NearGas) -> Result<Vec<Action>, crate::Error> {
    let args = serde_json::to_vec(report)
        .map_err(|e| crate::Error::Rpc(format!("failed to encode args: {e}")))?;

    Ok(vec![Action::FunctionCall(Box::new(FunctionCallAction {
        method_name: REPORT_METHOD.to_string(),
        args,
        gas: gas.as_gas(),
        deposit: 0,
    }))])
}

fn check_outcome(outcome: &FinalExecutionOutcomeView) -> Result<(), crate::Error> {
    match &outcome.status {
        FinalExecutionStatus::SuccessValue(_) => Ok(()),
        FinalExecutionStatus::Failure(e) => Err(crate::Error::Rpc(format!("{e:?}"))),
        FinalExecutionStatus::Started | FinalExecutionStatus::NotStarted => {
            Err(crate::Error::Rpc("transaction not finalized".into()))
        }
    }
}

/// View results are JSON; `null` means nothing was reported.
fn decode_category(bytes: &[u8]) -> Result<Option<Category>, crate::Error> {
    serde_json::from_slice(bytes)
        .map_err(|e| crate::Error::Rpc(format!("unexpected {QUERY_METHOD} result: {e}")))
}
