//! JSON-RPC client over reqwest
//!
//! Every call goes through `execute_raw`, which bounds the request with the
//! configured timeout and maps JSON-RPC error objects to `SwapError::Rpc`.

use super::types::{RpcErrorObject, RpcFilterType, SignatureStatus};
use super::LedgerRpc;
use crate::arguments::is_debug_rpc_enabled;
use crate::constants::MULTIPLE_ACCOUNTS_CHUNK;
use crate::errors::{SwapError, SwapResult};
use crate::logger::{self, LogTag};
use base64::Engine;
use solana_sdk::{
    account::Account, commitment_config::CommitmentLevel, hash::Hash, pubkey::Pubkey,
    signature::Signature, transaction::Transaction,
};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

pub struct RpcClient {
    url: String,
    http: reqwest::Client,
    timeout: Duration,
    request_id: AtomicU64,
}

impl RpcClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> SwapResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SwapError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            url: url.into(),
            http,
            timeout,
            request_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send one JSON-RPC request and return its `result` field
    pub async fn execute_raw(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> SwapResult<serde_json::Value> {
        let id = self.request_id.fetch_add(1, Ordering::Relaxed);
        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params
        });

        if is_debug_rpc_enabled() {
            logger::debug(LogTag::Rpc, &format!("-> {} #{} {}", method, id, payload["params"]));
        }

        let request = async {
            let response = self
                .http
                .post(&self.url)
                .header("Content-Type", "application/json")
                .json(&payload)
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(SwapError::Transport(format!(
                    "{} HTTP status: {}",
                    method,
                    response.status()
                )));
            }

            response
                .json::<serde_json::Value>()
                .await
                .map_err(SwapError::from)
        };

        let timeout_err = || SwapError::Timeout {
            operation: method.to_string(),
            seconds: self.timeout.as_secs(),
        };

        let mut body = match tokio::time::timeout(self.timeout, request).await {
            Ok(Ok(body)) => body,
            Ok(Err(SwapError::Transport(msg))) if msg.contains("timed out") => {
                return Err(timeout_err())
            }
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(timeout_err()),
        };

        if let Some(err) = body.get("error").filter(|e| !e.is_null()) {
            let message = match serde_json::from_value::<RpcErrorObject>(err.clone()) {
                Ok(obj) => obj.to_string(),
                Err(_) => err.to_string(),
            };
            logger::debug(LogTag::Rpc, &format!("<- {} #{} error: {}", method, id, message));
            return Err(SwapError::Rpc(format!("{}: {}", method, message)));
        }

        if is_debug_rpc_enabled() {
            logger::debug(LogTag::Rpc, &format!("<- {} #{} ok", method, id));
        }
        logger::verbose(LogTag::Rpc, &format!("<- {} #{} {}", method, id, body["result"]));

        Ok(body
            .get_mut("result")
            .map(serde_json::Value::take)
            .unwrap_or(serde_json::Value::Null))
    }
}

impl LedgerRpc for RpcClient {
    async fn get_multiple_accounts(&self, pubkeys: &[Pubkey]) -> SwapResult<Vec<Option<Account>>> {
        if pubkeys.is_empty() {
            return Ok(Vec::new());
        }

        let mut all_accounts = Vec::with_capacity(pubkeys.len());

        for chunk in pubkeys.chunks(MULTIPLE_ACCOUNTS_CHUNK) {
            let keys: Vec<String> = chunk.iter().map(|p| p.to_string()).collect();
            let params = serde_json::json!([
                keys,
                {
                    "encoding": "base64",
                    "commitment": "confirmed"
                }
            ]);

            let result = self.execute_raw("getMultipleAccounts", params).await?;

            let values = result
                .get("value")
                .and_then(|v| v.as_array())
                .ok_or_else(|| invalid("getMultipleAccounts", "missing value array"))?;

            if values.len() != chunk.len() {
                return Err(invalid(
                    "getMultipleAccounts",
                    &format!("expected {} entries, got {}", chunk.len(), values.len()),
                ));
            }

            for value in values {
                all_accounts.push(parse_account_from_json(value)?);
            }
        }

        Ok(all_accounts)
    }

    async fn get_account(&self, pubkey: &Pubkey) -> SwapResult<Option<Account>> {
        let params = serde_json::json!([
            pubkey.to_string(),
            {
                "encoding": "base64",
                "commitment": "confirmed"
            }
        ]);

        let result = self.execute_raw("getAccountInfo", params).await?;
        match result.get("value") {
            Some(value) => parse_account_from_json(value),
            None => Ok(None),
        }
    }

    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        filters: Vec<RpcFilterType>,
    ) -> SwapResult<Vec<(Pubkey, Account)>> {
        let filters_json: Vec<serde_json::Value> = filters.iter().map(|f| f.to_json()).collect();
        let params = serde_json::json!([
            program_id.to_string(),
            {
                "encoding": "base64",
                "commitment": commitment_to_string(CommitmentLevel::Confirmed),
                "filters": filters_json
            }
        ]);

        let result = self.execute_raw("getProgramAccounts", params).await?;

        let items = result
            .as_array()
            .ok_or_else(|| invalid("getProgramAccounts", "expected array"))?;

        let mut accounts = Vec::with_capacity(items.len());
        for item in items {
            let pubkey_str = item
                .get("pubkey")
                .and_then(|v| v.as_str())
                .ok_or_else(|| invalid("getProgramAccounts", "missing pubkey"))?;
            let pubkey = Pubkey::from_str(pubkey_str)
                .map_err(|e| invalid("getProgramAccounts", &format!("bad pubkey: {}", e)))?;
            let account_json = item
                .get("account")
                .ok_or_else(|| invalid("getProgramAccounts", "missing account"))?;

            if let Some(account) = parse_account_from_json(account_json)? {
                accounts.push((pubkey, account));
            }
        }

        Ok(accounts)
    }

    async fn get_latest_blockhash(&self) -> SwapResult<Hash> {
        let params = serde_json::json!([{
            "commitment": commitment_to_string(CommitmentLevel::Finalized)
        }]);

        let result = self.execute_raw("getLatestBlockhash", params).await?;

        let blockhash = result
            .get("value")
            .and_then(|v| v.get("blockhash"))
            .and_then(|v| v.as_str())
            .ok_or_else(|| invalid("getLatestBlockhash", "missing blockhash"))?;

        Hash::from_str(blockhash)
            .map_err(|e| invalid("getLatestBlockhash", &format!("invalid blockhash: {}", e)))
    }

    async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> SwapResult<u64> {
        let params = serde_json::json!([
            data_len,
            { "commitment": commitment_to_string(CommitmentLevel::Confirmed) }
        ]);

        let result = self
            .execute_raw("getMinimumBalanceForRentExemption", params)
            .await?;

        result
            .as_u64()
            .ok_or_else(|| invalid("getMinimumBalanceForRentExemption", "expected integer"))
    }

    async fn send_transaction(&self, transaction: &Transaction) -> SwapResult<Signature> {
        let tx_bytes = bincode::serialize(transaction)
            .map_err(|e| SwapError::Signing(format!("Failed to serialize transaction: {}", e)))?;
        let tx_base64 = base64::engine::general_purpose::STANDARD.encode(&tx_bytes);

        let params = serde_json::json!([
            tx_base64,
            {
                "encoding": "base64",
                "skipPreflight": true,
                "preflightCommitment": commitment_to_string(CommitmentLevel::Finalized)
            }
        ]);

        let result = self.execute_raw("sendTransaction", params).await?;

        let sig_str = result
            .as_str()
            .ok_or_else(|| invalid("sendTransaction", "expected signature string"))?;

        Signature::from_str(sig_str)
            .map_err(|e| invalid("sendTransaction", &format!("invalid signature: {}", e)))
    }

    async fn get_signature_status(&self, signature: &Signature) -> SwapResult<Option<SignatureStatus>> {
        let params = serde_json::json!([
            [signature.to_string()],
            { "searchTransactionHistory": false }
        ]);

        let result = self.execute_raw("getSignatureStatuses", params).await?;

        let first = result
            .get("value")
            .and_then(|v| v.as_array())
            .and_then(|values| values.first())
            .cloned()
            .unwrap_or(serde_json::Value::Null);

        if first.is_null() {
            return Ok(None);
        }

        serde_json::from_value(first)
            .map(Some)
            .map_err(|e| invalid("getSignatureStatuses", &format!("failed to parse status: {}", e)))
    }
}

fn invalid(method: &str, reason: &str) -> SwapError {
    SwapError::Transport(format!("Invalid {} response: {}", method, reason))
}

fn commitment_to_string(commitment: CommitmentLevel) -> &'static str {
    match commitment {
        CommitmentLevel::Finalized => "finalized",
        CommitmentLevel::Confirmed => "confirmed",
        CommitmentLevel::Processed => "processed",
    }
}

/// Parse an account object with `data: [base64, "base64"]`; `null` means missing
pub(crate) fn parse_account_from_json(value: &serde_json::Value) -> SwapResult<Option<Account>> {
    if value.is_null() {
        return Ok(None);
    }

    let data = value
        .get("data")
        .ok_or_else(|| invalid("account", "missing data field"))?;

    let encoded = if let Some(arr) = data.as_array() {
        let encoding = arr.get(1).and_then(|v| v.as_str()).unwrap_or("base64");
        if encoding != "base64" {
            return Err(invalid("account", &format!("unsupported encoding: {}", encoding)));
        }
        arr.first()
            .and_then(|v| v.as_str())
            .ok_or_else(|| invalid("account", "invalid data"))?
    } else {
        data.as_str()
            .ok_or_else(|| invalid("account", "invalid data format"))?
    };

    let data_bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| invalid("account", &format!("failed to decode base64: {}", e)))?;

    let lamports = value
        .get("lamports")
        .and_then(|v| v.as_u64())
        .ok_or_else(|| invalid("account", "missing lamports"))?;

    let owner_str = value
        .get("owner")
        .and_then(|v| v.as_str())
        .ok_or_else(|| invalid("account", "missing owner"))?;
    let owner = Pubkey::from_str(owner_str)
        .map_err(|e| invalid("account", &format!("invalid owner pubkey: {}", e)))?;

    let executable = value
        .get("executable")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    let rent_epoch = value
        .get("rentEpoch")
        .and_then(|v| v.as_u64())
        .unwrap_or(0);

    Ok(Some(Account {
        lamports,
        data: data_bytes,
        owner,
        executable,
        rent_epoch,
    }))
}
