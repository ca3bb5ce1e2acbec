//! Solana JSON-RPC access
//!
//! - `client`: reqwest-backed `RpcClient`
//! - `types`: request filters and response payloads
//! - `mock` (tests only): scripted in-memory ledger
//!
//! Components take `R: LedgerRpc` so they can run against either.

pub mod client;
pub mod types;

#[cfg(test)]
pub(crate) mod mock;

pub use client::RpcClient;
pub use types::{RpcFilterType, SignatureStatus};

use crate::errors::SwapResult;
use solana_sdk::{
    account::Account, hash::Hash, pubkey::Pubkey, signature::Signature, transaction::Transaction,
};

/// The subset of the ledger RPC surface the swap flow needs
pub trait LedgerRpc: Send + Sync {
    /// Batched account fetch; `None` for accounts that do not exist
    fn get_multiple_accounts(
        &self,
        pubkeys: &[Pubkey],
    ) -> impl std::future::Future<Output = SwapResult<Vec<Option<Account>>>> + Send;

    fn get_account(
        &self,
        pubkey: &Pubkey,
    ) -> impl std::future::Future<Output = SwapResult<Option<Account>>> + Send;

    /// Program-owned accounts matching every filter
    fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        filters: Vec<RpcFilterType>,
    ) -> impl std::future::Future<Output = SwapResult<Vec<(Pubkey, Account)>>> + Send;

    /// Latest blockhash at finalized commitment
    fn get_latest_blockhash(&self) -> impl std::future::Future<Output = SwapResult<Hash>> + Send;

    fn get_minimum_balance_for_rent_exemption(
        &self,
        data_len: usize,
    ) -> impl std::future::Future<Output = SwapResult<u64>> + Send;

    /// Submit a signed transaction without preflight
    fn send_transaction(
        &self,
        transaction: &Transaction,
    ) -> impl std::future::Future<Output = SwapResult<Signature>> + Send;

    /// `None` while the node has not seen the signature
    fn get_signature_status(
        &self,
        signature: &Signature,
    ) -> impl std::future::Future<Output = SwapResult<Option<SignatureStatus>>> + Send;
}
