//! Thin NEAR JSON-RPC client: block hash, access key, view calls, tx commit.
//!
//! Calls are made once; failures surface as [`crate::Error::Rpc`].

use near_crypto::PublicKey;
use near_jsonrpc_client::methods;
use near_jsonrpc_client::JsonRpcClient;
use near_jsonrpc_primitives::types::query::QueryResponseKind;
use near_primitives::hash::CryptoHash;
use near_primitives::transaction::SignedTransaction;
use near_primitives::types::{AccountId, BlockReference, Finality, FunctionArgs};
use near_primitives::views::{AccessKeyView, FinalExecutionOutcomeView, QueryRequest};
use tracing::{debug, info, warn};

pub struct RpcClient {
    client: JsonRpcClient,
}

impl RpcClient {
    pub fn new(url: &str) -> Self {
        info!(url, "RPC client initialized");
        Self {
            client: JsonRpcClient::connect(url),
        }
    }

    /// Hash of the latest final block, used as transaction anchor.
    pub async fn latest_block_hash(&self) -> Result<CryptoHash, crate::Error> {
        let block = self
            .client
            .call(methods::block::RpcBlockRequest {
                block_reference: BlockReference::Finality(Finality::Final),
            })
            .await
            .map_err(|e| {
                warn!(error = %e, "Block query failed");
                crate::Error::Rpc(format!("block query failed: {e}"))
            })?;
        Ok(block.header.hash)
    }

    pub async fn query_access_key(
        &self,
        account_id: &AccountId,
        public_key: &PublicKey,
    ) -> Result<AccessKeyView, crate::Error> {
        let resp = self
            .client
            .call(methods::query::RpcQueryRequest {
                block_reference: BlockReference::Finality(Finality::Final),
                request: QueryRequest::ViewAccessKey {
                    account_id: account_id.clone(),
                    public_key: public_key.clone(),
                },
            })
            .await
            .map_err(|e| crate::Error::Rpc(format!("access_key query failed: {e}")))?;

        match resp.kind {
            QueryResponseKind::AccessKey(ak) => Ok(ak),
            other => Err(crate::Error::Rpc(format!(
                "unexpected query response: {other:?}"
            ))),
        }
    }

    /// Run a view method and return its raw result bytes.
    pub async fn view_function(
        &self,
        contract_id: &AccountId,
        method_name: &str,
        args: Vec<u8>,
    ) -> Result<Vec<u8>, crate::Error> {
        debug!(contract = %contract_id, method = method_name, "View call");
        let resp = self
            .client
            .call(methods::query::RpcQueryRequest {
                block_reference: BlockReference::Finality(Finality::Final),
                request: QueryRequest::CallFunction {
                    account_id: contract_id.clone(),
                    method_name: method_name.to_string(),
                    args: FunctionArgs::from(args),
                },
            })
            .await
            .map_err(|e| crate::Error::Rpc(format!("{method_name} view call failed: {e}")))?;

        match resp.kind {
            QueryResponseKind::CallResult(result) => Ok(result.result),
            other => Err(crate::Error::Rpc(format!(
                "unexpected query response: {other:?}"
            ))),
        }
    }

    /// Send a signed transaction and wait for its final outcome.
    pub async fn send_signed_tx(
        &self,
        signed_tx: SignedTransaction,
    ) -> Result<FinalExecutionOutcomeView, crate::Error> {
        self.client
            .call(methods::broadcast_tx_commit::RpcBroadcastTxCommitRequest {
                signed_transaction: signed_tx,
            })
            .await
            .map_err(|e| {
                warn!(error = %e, "broadcast_tx_commit failed");
                crate::Error::Rpc(format!("broadcast_tx_commit failed: {e}"))
            })
    }
}
