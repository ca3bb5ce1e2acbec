/// Swap request, quote and outcome types
use crate::accounts::TokenAccountInfo;
use solana_sdk::{pubkey::Pubkey, signature::Signature};

/// What the user asked for, in human units
#[derive(Debug, Clone, PartialEq)]
pub struct SwapRequest {
    pub from_mint: Pubkey,
    pub to_mint: Pubkey,
    pub amount: f64,
    /// Percentage of the expected output to accept as minimum (99 = 1% slippage)
    pub slippage_pct: f64,
}

/// Input amount in smallest units plus slippage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapTask {
    pub amount_in: u64,
    pub slippage_pct: f64,
}

/// Estimator output: amounts plus the accounts the swap reads and writes
#[derive(Debug, Clone, PartialEq)]
pub struct SwapQuote {
    pub task: SwapTask,
    /// Reserves in human units, input side first
    pub reserve_in: f64,
    pub reserve_out: f64,
    pub expected_out: f64,
    pub min_out: u64,
    pub source: TokenAccountInfo,
    pub destination: TokenAccountInfo,
    pub source_missing: bool,
    pub destination_missing: bool,
}

impl SwapQuote {
    pub fn amount_in(&self) -> u64 {
        self.task.amount_in
    }
}

/// Final state of a submitted transaction
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionStatus {
    Confirmed,
    /// Ledger-reported error payload
    Failed(serde_json::Value),
    TimedOut,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionOutcome {
    pub signature: Signature,
    pub status: TransactionStatus,
}

impl TransactionOutcome {
    pub fn is_confirmed(&self) -> bool {
        self.status == TransactionStatus::Confirmed
    }
}

impl std::fmt::Display for TransactionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.status {
            TransactionStatus::Confirmed => write!(f, "{} confirmed", self.signature),
            TransactionStatus::Failed(err) => write!(f, "{} failed: {}", self.signature, err),
            TransactionStatus::TimedOut => {
                write!(f, "{} not confirmed before the deadline", self.signature)
            }
        }
    }
}
