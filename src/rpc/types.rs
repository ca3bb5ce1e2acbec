use serde::Deserialize;
use solana_transaction_status::TransactionConfirmationStatus;

/// Filter for getProgramAccounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpcFilterType {
    /// Exact byte match at `offset`; bytes are base58 encoded on the wire
    Memcmp { offset: usize, bytes: String },
}

impl RpcFilterType {
    pub fn memcmp(offset: usize, raw: &[u8]) -> Self {
        RpcFilterType::Memcmp {
            offset,
            bytes: bs58::encode(raw).into_string(),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            RpcFilterType::Memcmp { offset, bytes } => serde_json::json!({
                "memcmp": {
                    "offset": offset,
                    "bytes": bytes
                }
            }),
        }
    }
}

/// One entry of a getSignatureStatuses response
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SignatureStatus {
    pub slot: u64,
    #[serde(default)]
    pub confirmations: Option<usize>,
    /// Ledger-reported error payload, `None` on success
    #[serde(default)]
    pub err: Option<serde_json::Value>,
    #[serde(default)]
    pub confirmation_status: Option<TransactionConfirmationStatus>,
}

impl SignatureStatus {
    /// Anything past `processed` (or a node that omits the field) ends polling
    pub fn is_terminal(&self) -> bool {
        self.confirmation_status != Some(TransactionConfirmationStatus::Processed)
    }
}

/// JSON-RPC error object
#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl std::fmt::Display for RpcErrorObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memcmp_filter_json() {
        let key = solana_sdk::pubkey::Pubkey::new_unique();
        let filter = RpcFilterType::memcmp(400, key.as_ref());
        let json = filter.to_json();
        assert_eq!(json["memcmp"]["offset"], 400);
        assert_eq!(json["memcmp"]["bytes"], key.to_string());
    }

    #[test]
    fn test_signature_status_parse() {
        let processed: SignatureStatus = serde_json::from_value(serde_json::json!({
            "slot": 10,
            "confirmations": 0,
            "err": null,
            "status": { "Ok": null },
            "confirmationStatus": "processed"
        }))
        .unwrap();
        assert!(!processed.is_terminal());
        assert!(processed.err.is_none());

        let failed: SignatureStatus = serde_json::from_value(serde_json::json!({
            "slot": 11,
            "confirmations": null,
            "err": { "InstructionError": [2, { "Custom": 30 }] },
            "confirmationStatus": "finalized"
        }))
        .unwrap();
        assert!(failed.is_terminal());
        assert!(failed.err.is_some());
    }
}
