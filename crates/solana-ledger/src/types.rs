use probe_core::ActivityRecord;
use serde::{Deserialize, Serialize};

// ─── JSON-RPC envelope ────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(crate) struct RpcRequest<'a> {
    pub jsonrpc: &'a str,
    pub id: u64,
    pub method: &'a str,
    pub params: serde_json::Value,
}

/// `result` stays untyped until the error field has been checked; a missing
/// `result` decodes as `null`.
#[derive(Debug, Deserialize)]
pub(crate) struct RpcResponse {
    #[serde(default)]
    pub result: serde_json::Value,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

// ─── getSignaturesForAddress ──────────────────────────────────────────────

/// One entry of a `getSignaturesForAddress` result.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureInfo {
    pub signature: String,
    pub slot: u64,
    /// Transaction error, `null` on success.
    #[serde(default)]
    pub err: Option<serde_json::Value>,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub block_time: Option<i64>,
    #[serde(default)]
    pub confirmation_status: Option<String>,
}

// ─── getTransaction ───────────────────────────────────────────────────────

/// The subset of a `getTransaction` result the probe reads. The encoded
/// transaction body is ignored.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInfo {
    pub slot: u64,
    #[serde(default)]
    pub block_time: Option<i64>,
    #[serde(default)]
    pub meta: Option<TransactionMeta>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMeta {
    #[serde(default)]
    pub err: Option<serde_json::Value>,
    /// `null` when the node has log recording disabled.
    #[serde(default)]
    pub log_messages: Option<Vec<String>>,
}

impl TransactionInfo {
    pub fn log_messages(&self) -> &[String] {
        self.meta
            .as_ref()
            .and_then(|m| m.log_messages.as_deref())
            .unwrap_or(&[])
    }

    pub fn into_record(self) -> ActivityRecord {
        ActivityRecord {
            slot: Some(self.slot),
            log_messages: self
                .meta
                .and_then(|m| m.log_messages)
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_signature_info() {
        let json = r#"{
            "signature": "5h6xBEauJ3PK6SWCZ1PGjBvj8vDdWG3KpwATGy1ARAXFSDwt8GFXM7W5Ncn16wmqokgpiKRLuS83KUxyZyv2sUYv",
            "slot": 114,
            "err": null,
            "memo": null,
            "blockTime": null,
            "confirmationStatus": "finalized"
        }"#;
        let info: SignatureInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.slot, 114);
        assert!(info.err.is_none());
        assert_eq!(info.confirmation_status.as_deref(), Some("finalized"));
    }

    #[test]
    fn parse_transaction_with_logs() {
        let json = r#"{
            "slot": 430,
            "blockTime": 1700000000,
            "meta": {
                "err": null,
                "fee": 5000,
                "logMessages": [
                    "Program 4Nd1mBQtrMJVYVfKf2PJy9NZUZdTAsp7D4xWLs4gDB4T invoke [1]",
                    "Program log: Hello, world!",
                    "Program 4Nd1mBQtrMJVYVfKf2PJy9NZUZdTAsp7D4xWLs4gDB4T success"
                ]
            },
            "transaction": {"signatures": ["abc"], "message": {}},
            "version": 0
        }"#;
        let tx: TransactionInfo = serde_json::from_str(json).unwrap();
        assert_eq!(tx.log_messages().len(), 3);

        let record = tx.into_record();
        assert_eq!(record.slot, Some(430));
        assert_eq!(
            record.find_marker("Program log: Hello, world!"),
            Some("Program log: Hello, world!")
        );
    }

    #[test]
    fn null_log_messages_mean_no_lines() {
        let json = r#"{"slot": 1, "meta": {"err": null, "logMessages": null}}"#;
        let tx: TransactionInfo = serde_json::from_str(json).unwrap();
        assert!(tx.log_messages().is_empty());
        assert!(tx.into_record().log_messages.is_empty());
    }

    #[test]
    fn missing_meta_means_no_lines() {
        let tx: TransactionInfo = serde_json::from_str(r#"{"slot": 9}"#).unwrap();
        assert!(tx.log_messages().is_empty());
    }
}
