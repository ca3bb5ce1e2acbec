//! Owner token accounts and balances
//!
//! Mints are looked up by their associated token address; the native mint
//! placeholder resolves to the owner's system account instead.

use crate::constants::NATIVE_SOL_MINT;
use crate::errors::{SwapError, SwapResult};
use crate::layout::read_token_account_amount;
use crate::logger::{self, LogTag};
use crate::rpc::LedgerRpc;
use solana_sdk::pubkey::Pubkey;
use spl_associated_token_account::get_associated_token_address;
use std::collections::HashMap;

/// A mint and the owner-scoped account that holds it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenAccountInfo {
    pub mint: Pubkey,
    pub address: Pubkey,
}

impl TokenAccountInfo {
    pub fn for_owner(owner: &Pubkey, mint: &Pubkey) -> Self {
        let address = if *mint == NATIVE_SOL_MINT {
            *owner
        } else {
            get_associated_token_address(owner, mint)
        };
        Self { mint: *mint, address }
    }
}

/// Accounts split by on-chain existence, both keyed by mint
#[derive(Debug, Default, Clone)]
pub struct AccountSet {
    pub existing: HashMap<Pubkey, TokenAccountInfo>,
    pub missing: HashMap<Pubkey, TokenAccountInfo>,
}

impl AccountSet {
    /// Account for `mint` and whether it still has to be created
    pub fn get(&self, mint: &Pubkey) -> Option<(TokenAccountInfo, bool)> {
        self.existing
            .get(mint)
            .map(|info| (*info, false))
            .or_else(|| self.missing.get(mint).map(|info| (*info, true)))
    }
}

/// Classify the owner's accounts for `mints` with one batched fetch
pub async fn resolve_accounts<R: LedgerRpc>(
    rpc: &R,
    owner: &Pubkey,
    mints: &[Pubkey],
) -> SwapResult<AccountSet> {
    let mut unique: Vec<Pubkey> = Vec::with_capacity(mints.len());
    for mint in mints {
        if !unique.contains(mint) {
            unique.push(*mint);
        }
    }

    let infos: Vec<TokenAccountInfo> = unique
        .iter()
        .map(|mint| TokenAccountInfo::for_owner(owner, mint))
        .collect();
    let addresses: Vec<Pubkey> = infos.iter().map(|i| i.address).collect();

    let accounts = rpc.get_multiple_accounts(&addresses).await?;

    let mut set = AccountSet::default();
    for (info, account) in infos.into_iter().zip(accounts) {
        if account.is_some() {
            set.existing.insert(info.mint, info);
        } else {
            logger::debug(
                LogTag::Wallet,
                &format!("No account {} for mint {}", info.address, info.mint),
            );
            set.missing.insert(info.mint, info);
        }
    }

    Ok(set)
}

/// Token amount for token-program accounts, lamports for everything else
pub async fn balances<R: LedgerRpc>(
    rpc: &R,
    addresses: &[Pubkey],
) -> SwapResult<HashMap<Pubkey, u64>> {
    let accounts = rpc.get_multiple_accounts(addresses).await?;

    let mut result = HashMap::with_capacity(addresses.len());
    for (address, account) in addresses.iter().zip(accounts) {
        let account =
            account.ok_or_else(|| SwapError::malformed(address, "account not found"))?;
        let balance = if account.owner == spl_token::id() {
            read_token_account_amount(&account.data, address)?
        } else {
            account.lamports
        };
        result.insert(*address, balance);
    }

    Ok(result)
}
