use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use probe_core::{ActivityRecord, Commitment, LedgerQuery, ProbeError, ProgramId, Signature};
use serde::de::DeserializeOwned;

use crate::types::{RpcRequest, RpcResponse, SignatureInfo, TransactionInfo};
use crate::{Result, RpcError};

const GET_SIGNATURES_FOR_ADDRESS: &str = "getSignaturesForAddress";
const GET_TRANSACTION: &str = "getTransaction";

// ─── RpcClient ────────────────────────────────────────────────────────────

/// JSON-RPC client for a Solana node.
///
/// Every request is bounded by the timeout given to [`RpcClient::new`], so a
/// hung node surfaces as [`RpcError::Http`] instead of stalling the caller.
pub struct RpcClient {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(RpcClient {
            http,
            url: url.into(),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Recent signatures for transactions that reference `address`,
    /// newest first.
    pub async fn get_signatures_for_address(
        &self,
        address: &str,
        limit: usize,
        commitment: Commitment,
    ) -> Result<Vec<SignatureInfo>> {
        let params = serde_json::json!([
            address,
            {"limit": limit, "commitment": commitment.as_str()}
        ]);
        self.call(GET_SIGNATURES_FOR_ADDRESS, params).await
    }

    /// Fetch a transaction. `None` means the node does not have it at
    /// `commitment` yet.
    pub async fn get_transaction(
        &self,
        signature: &str,
        commitment: Commitment,
    ) -> Result<Option<TransactionInfo>> {
        let params = serde_json::json!([
            signature,
            {
                "commitment": commitment.as_str(),
                "encoding": "json",
                "maxSupportedTransactionVersion": 0
            }
        ]);
        self.call(GET_TRANSACTION, params).await
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &'static str,
        params: serde_json::Value,
    ) -> Result<T> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };
        tracing::trace!(method, id = request.id, url = %self.url, "rpc request");

        let response = self.http.post(&self.url).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RpcError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: RpcResponse = response.json().await?;
        if let Some(err) = envelope.error {
            return Err(RpcError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        serde_json::from_value(envelope.result)
            .map_err(|source| RpcError::Decode { method, source })
    }
}

// ─── LedgerQuery ──────────────────────────────────────────────────────────

#[async_trait]
impl LedgerQuery for RpcClient {
    async fn list_recent(
        &self,
        program: &ProgramId,
        limit: usize,
        commitment: Commitment,
    ) -> probe_core::Result<Vec<Signature>> {
        let infos = self
            .get_signatures_for_address(&program.to_base58(), limit, commitment)
            .await
            .map_err(|e| ProbeError::query(GET_SIGNATURES_FOR_ADDRESS, e))?;
        Ok(infos
            .into_iter()
            .map(|info| Signature::new(info.signature))
            .collect())
    }

    async fn get_record(
        &self,
        signature: &Signature,
        commitment: Commitment,
    ) -> probe_core::Result<Option<ActivityRecord>> {
        let tx = self
            .get_transaction(signature.as_str(), commitment)
            .await
            .map_err(|e| ProbeError::query(GET_TRANSACTION, e))?;
        Ok(tx.map(TransactionInfo::into_record))
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
