/// Error type for pool resolution, estimation, instruction building and submission.
///
/// Ledger-reported transaction failures and unconfirmed timeouts are not errors;
/// they are reported through `swaps::TransactionOutcome`.
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwapError {
    #[error("Malformed account data for {account}: {reason}")] MalformedAccountData {
        account: String,
        reason: String,
    },

    #[error("No pool found for {from} -> {to}")] PoolNotFound {
        from: Pubkey,
        to: Pubkey,
    },

    #[error("Minimum swap output is zero, try to swap a bigger amount")] ZeroOutput,

    #[error("Both source and destination token accounts are missing")] BothAccountsMissing,

    #[error("Insufficient balance: need {needed}, have {available}")] InsufficientBalance {
        needed: u64,
        available: u64,
    },

    #[error("Invalid slippage: {0}")] InvalidSlippage(f64),

    #[error("Invalid amount: {0}")] InvalidAmount(f64),

    #[error("Invalid mint: {0}")] InvalidMint(String),

    #[error("RPC error: {0}")] Rpc(String),

    #[error("Transport error: {0}")] Transport(String),

    #[error("Timeout error: {operation} timed out after {seconds} seconds")] Timeout {
        operation: String,
        seconds: u64,
    },

    #[error("Signing error: {0}")] Signing(String),

    #[error("Configuration error: {0}")] Config(String),

    #[error("Cache error: {0}")] Cache(String),
}

impl SwapError {
    pub fn malformed(account: impl ToString, reason: impl Into<String>) -> Self {
        SwapError::MalformedAccountData {
            account: account.to_string(),
            reason: reason.into(),
        }
    }

    /// Network-level failures that may succeed if the whole invocation is re-run
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SwapError::Transport(_) | SwapError::Timeout { .. })
    }

    /// Errors the user can fix by changing the request
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            SwapError::ZeroOutput
                | SwapError::InsufficientBalance { .. }
                | SwapError::InvalidSlippage(_)
                | SwapError::InvalidAmount(_)
                | SwapError::InvalidMint(_)
        )
    }
}

impl From<rusqlite::Error> for SwapError {
    fn from(e: rusqlite::Error) -> Self {
        SwapError::Cache(e.to_string())
    }
}

impl From<reqwest::Error> for SwapError {
    fn from(e: reqwest::Error) -> Self {
        SwapError::Transport(e.to_string())
    }
}

pub type SwapResult<T> = Result<T, SwapError>;
