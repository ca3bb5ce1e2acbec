/// Pool resolution: cache first, then on-chain discovery and selection.
use super::cache::PoolCache;
use super::types::{Direction, PoolRecord};
use crate::arguments::is_debug_pool_enabled;
use crate::constants::{
    AMM_V4_BASE_MINT_OFFSET, AMM_V4_QUOTE_MINT_OFFSET, RAYDIUM_AMM_V4_PROGRAM_ID,
};
use crate::errors::{SwapError, SwapResult};
use crate::layout::{read_token_account_amount, AmmInfo, MarketState};
use crate::logger::{self, LogTag};
use crate::rpc::{LedgerRpc, RpcFilterType};
use solana_sdk::pubkey::Pubkey;

pub struct PoolResolver<'a, R: LedgerRpc, C: PoolCache> {
    rpc: &'a R,
    cache: &'a C,
}

impl<'a, R: LedgerRpc, C: PoolCache> PoolResolver<'a, R, C> {
    pub fn new(rpc: &'a R, cache: &'a C) -> Self {
        Self { rpc, cache }
    }

    /// Find a pool trading `from` against `to` and the side `from` sits on
    pub async fn resolve(&self, from: &Pubkey, to: &Pubkey) -> SwapResult<(PoolRecord, Direction)> {
        if let Some(hit) = self.lookup_cached(from, to) {
            return Ok(hit);
        }

        let mut candidates = Vec::new();
        let mut search_error = None;
        for (base, quote) in [(from, to), (to, from)] {
            match self.discover(base, quote).await {
                Ok(found) => candidates.extend(found),
                Err(e) => {
                    logger::warning(
                        LogTag::Pool,
                        &format!("Pool search {} / {} failed: {}", base, quote, e),
                    );
                    search_error = Some(e);
                }
            }
        }

        logger::info(
            LogTag::Pool,
            &format!("Found {} candidate pool(s) for {} -> {}", candidates.len(), from, to),
        );

        let record = match candidates.len() {
            0 => {
                return Err(search_error.unwrap_or(SwapError::PoolNotFound {
                    from: *from,
                    to: *to,
                }))
            }
            1 => candidates.remove(0),
            _ => self.select_deepest(candidates, from).await.ok_or(SwapError::PoolNotFound {
                from: *from,
                to: *to,
            })?,
        };

        let direction = Direction::for_input(&record, from);

        // Only pairs stored in request orientation are persisted
        if direction == Direction::Forward {
            if let Err(e) = self.cache.insert(&record) {
                logger::warning(LogTag::PoolCache, &format!("Failed to cache pool {}: {}", record.id, e));
            }
        }

        logger::info(
            LogTag::Pool,
            &format!("Selected pool {} ({})", record.id, direction),
        );
        Ok((record, direction))
    }

    fn lookup_cached(&self, from: &Pubkey, to: &Pubkey) -> Option<(PoolRecord, Direction)> {
        for (base, quote, direction) in [(from, to, Direction::Forward), (to, from, Direction::Reversed)] {
            match self.cache.lookup(base, quote) {
                Ok(Some(record)) => {
                    logger::debug(
                        LogTag::PoolCache,
                        &format!("Cache hit {} ({})", record.id, direction),
                    );
                    return Some((record, direction));
                }
                Ok(None) => {}
                Err(e) => logger::warning(LogTag::PoolCache, &format!("Cache lookup failed: {}", e)),
            }
        }
        None
    }

    /// Pools whose base is `base` and quote is `quote`; undecodable candidates are dropped
    async fn discover(&self, base: &Pubkey, quote: &Pubkey) -> SwapResult<Vec<PoolRecord>> {
        let filters = vec![
            RpcFilterType::memcmp(AMM_V4_BASE_MINT_OFFSET, base.as_ref()),
            RpcFilterType::memcmp(AMM_V4_QUOTE_MINT_OFFSET, quote.as_ref()),
        ];

        let accounts = self
            .rpc
            .get_program_accounts(&RAYDIUM_AMM_V4_PROGRAM_ID, filters)
            .await?;

        let mut records = Vec::with_capacity(accounts.len());
        for (pool_id, account) in accounts {
            match self.load_record(pool_id, &account.data).await {
                Ok(record) => records.push(record),
                Err(e) => logger::warning(
                    LogTag::Pool,
                    &format!("Skipping pool {}: {}", pool_id, e),
                ),
            }
        }
        Ok(records)
    }

    async fn load_record(&self, pool_id: Pubkey, data: &[u8]) -> SwapResult<PoolRecord> {
        let amm = AmmInfo::decode(data)?;

        let market_account = self
            .rpc
            .get_account(&amm.market_id)
            .await?
            .ok_or_else(|| SwapError::malformed(amm.market_id, "market account not found"))?;
        let market = MarketState::decode(&market_account.data)?;

        if is_debug_pool_enabled() {
            logger::debug(
                LogTag::Pool,
                &format!(
                    "Decoded pool {} market {} nonce {}",
                    pool_id, amm.market_id, market.vault_signer_nonce
                ),
            );
        }

        PoolRecord::from_state(pool_id, &amm, &market)
    }

    /// Keep the candidate whose (from-side, to-side) reserves both beat the best so far
    async fn select_deepest(&self, candidates: Vec<PoolRecord>, from: &Pubkey) -> Option<PoolRecord> {
        let mut best: Option<PoolRecord> = None;
        let mut best_reserves = (0u64, 0u64);

        for candidate in candidates {
            let (base_reserve, quote_reserve) = match fetch_vault_reserves(self.rpc, &candidate).await {
                Ok(reserves) => reserves,
                Err(e) => {
                    logger::warning(
                        LogTag::Pool,
                        &format!("Skipping pool {}: reserves unavailable: {}", candidate.id, e),
                    );
                    continue;
                }
            };

            let reserves = match Direction::for_input(&candidate, from) {
                Direction::Forward => (base_reserve, quote_reserve),
                Direction::Reversed => (quote_reserve, base_reserve),
            };

            if is_debug_pool_enabled() {
                logger::debug(
                    LogTag::Pool,
                    &format!("Candidate {} reserves {:?}", candidate.id, reserves),
                );
            }

            if reserves.0 > best_reserves.0 && reserves.1 > best_reserves.1 {
                best_reserves = reserves;
                best = Some(candidate);
            }
        }

        best
    }
}

/// (base reserve, quote reserve) of a pool in smallest units, one batched fetch
pub async fn fetch_vault_reserves<R: LedgerRpc>(rpc: &R, pool: &PoolRecord) -> SwapResult<(u64, u64)> {
    let accounts = rpc
        .get_multiple_accounts(&[pool.base_vault, pool.quote_vault])
        .await?;

    let read = |index: usize, vault: &Pubkey| -> SwapResult<u64> {
        let account = accounts
            .get(index)
            .and_then(|a| a.as_ref())
            .ok_or_else(|| SwapError::malformed(vault, "vault account not found"))?;
        read_token_account_amount(&account.data, vault)
    };

    Ok((read(0, &pool.base_vault)?, read(1, &pool.quote_vault)?))
}
