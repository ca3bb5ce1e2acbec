/// Constant-product output estimation with a slippage floor.
use super::types::{SwapQuote, SwapTask};
use crate::accounts::AccountSet;
use crate::arguments::is_debug_swaps_enabled;
use crate::constants::native_mapped_mint;
use crate::errors::{SwapError, SwapResult};
use crate::logger::{self, LogTag};
use crate::pools::{fetch_vault_reserves, Direction, PoolRecord};
use crate::rpc::LedgerRpc;

/// Human amount to smallest units, truncating
pub fn to_units(amount: f64, decimals: u8) -> u64 {
    (amount * 10f64.powi(decimals as i32)) as u64
}

pub fn from_units(amount: u64, decimals: u8) -> f64 {
    amount as f64 / 10f64.powi(decimals as i32)
}

/// `reserve_out * amount_in / (reserve_in + amount_in)`, all in human units
pub fn constant_product_out(reserve_in: f64, reserve_out: f64, amount_in: f64) -> f64 {
    let denominator = reserve_in + amount_in;
    if denominator <= 0.0 {
        return 0.0;
    }
    reserve_out * amount_in / denominator
}

/// Rejects non-positive or non-finite slippage; values above `warn_above` are kept but logged
pub fn validate_slippage(slippage_pct: f64, warn_above: f64) -> SwapResult<f64> {
    if !slippage_pct.is_finite() || slippage_pct <= 0.0 {
        return Err(SwapError::InvalidSlippage(slippage_pct));
    }
    if slippage_pct > warn_above {
        logger::warning(
            LogTag::Swap,
            &format!(
                "Slippage {}% is above {}%: minimum output will exceed the expected output",
                slippage_pct, warn_above
            ),
        );
    }
    Ok(slippage_pct)
}

pub struct SwapEstimator<'a, R: LedgerRpc> {
    rpc: &'a R,
    max_sane_slippage_pct: f64,
}

impl<'a, R: LedgerRpc> SwapEstimator<'a, R> {
    pub fn new(rpc: &'a R, max_sane_slippage_pct: f64) -> Self {
        Self {
            rpc,
            max_sane_slippage_pct,
        }
    }

    pub async fn estimate(
        &self,
        pool: &PoolRecord,
        direction: Direction,
        amount: f64,
        slippage_pct: f64,
        accounts: &AccountSet,
    ) -> SwapResult<SwapQuote> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(SwapError::InvalidAmount(amount));
        }
        let slippage_pct = validate_slippage(slippage_pct, self.max_sane_slippage_pct)?;

        let (decimals_in, decimals_out) = pool.decimals_for(direction);
        let amount_in = to_units(amount, decimals_in);
        if amount_in == 0 {
            return Err(SwapError::ZeroOutput);
        }

        let (base_reserve, quote_reserve) = fetch_vault_reserves(self.rpc, pool).await?;
        let (raw_in, raw_out) = match direction {
            Direction::Forward => (base_reserve, quote_reserve),
            Direction::Reversed => (quote_reserve, base_reserve),
        };
        let reserve_in = from_units(raw_in, decimals_in);
        let reserve_out = from_units(raw_out, decimals_out);

        // Quote what is actually sent, after truncation to smallest units
        let expected_out =
            constant_product_out(reserve_in, reserve_out, from_units(amount_in, decimals_in));
        let min_out = to_units(expected_out * slippage_pct / 100.0, decimals_out);

        if is_debug_swaps_enabled() {
            logger::debug(
                LogTag::Swap,
                &format!(
                    "Reserves in={} out={} amount_in={} expected={} min_out={}",
                    reserve_in, reserve_out, amount_in, expected_out, min_out
                ),
            );
        }

        if min_out == 0 {
            return Err(SwapError::ZeroOutput);
        }

        let (mint_in, mint_out) = pool.mints_for(direction);
        let (source, source_missing) = lookup(accounts, &mint_in)?;
        let (destination, destination_missing) = lookup(accounts, &mint_out)?;

        Ok(SwapQuote {
            task: SwapTask {
                amount_in,
                slippage_pct,
            },
            reserve_in,
            reserve_out,
            expected_out,
            min_out,
            source,
            destination,
            source_missing,
            destination_missing,
        })
    }
}

fn lookup(
    accounts: &AccountSet,
    mint: &solana_sdk::pubkey::Pubkey,
) -> SwapResult<(crate::accounts::TokenAccountInfo, bool)> {
    accounts
        .get(&native_mapped_mint(mint))
        .ok_or_else(|| SwapError::InvalidMint(format!("no owner account resolved for {}", mint)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::TokenAccountInfo;
    use crate::constants::{NATIVE_SOL_MINT, WSOL_MINT};
    use crate::layout::test_utils::encode_token_account;
    use crate::pools::types::fixtures::record;
    use crate::rpc::mock::MockRpc;
    use solana_sdk::pubkey::Pubkey;

    fn funded_pool(rpc: &MockRpc, pool: &PoolRecord, base_reserve: u64, quote_reserve: u64) {
        rpc.add_account(
            pool.base_vault,
            spl_token::id(),
            1,
            encode_token_account(&pool.base_mint, &pool.id, base_reserve),
        );
        rpc.add_account(
            pool.quote_vault,
            spl_token::id(),
            1,
            encode_token_account(&pool.quote_mint, &pool.id, quote_reserve),
        );
    }

    fn accounts_for(owner: &Pubkey, existing: &[Pubkey], missing: &[Pubkey]) -> AccountSet {
        let mut set = AccountSet::default();
        for mint in existing {
            let m = native_mapped_mint(mint);
            set.existing.insert(m, TokenAccountInfo::for_owner(owner, &m));
        }
        for mint in missing {
            let m = native_mapped_mint(mint);
            set.missing.insert(m, TokenAccountInfo::for_owner(owner, &m));
        }
        set
    }

    #[test]
    fn test_constant_product_bounds() {
        for amount in [0.001, 1.0, 250.0, 1_000_000.0] {
            let out = constant_product_out(1_000.0, 50_000.0, amount);
            assert!(out < 50_000.0);
            assert!(out <= amount * 50_000.0 / 1_000.0);
        }
    }

    #[test]
    fn test_slippage_validation() {
        assert!(matches!(validate_slippage(0.0, 100.0), Err(SwapError::InvalidSlippage(_))));
        assert!(matches!(validate_slippage(-1.0, 100.0), Err(SwapError::InvalidSlippage(_))));
        assert!(validate_slippage(f64::NAN, 100.0).is_err());
        assert_eq!(validate_slippage(150.0, 100.0).unwrap(), 150.0);
        assert_eq!(validate_slippage(99.0, 100.0).unwrap(), 99.0);
    }

    #[tokio::test]
    async fn test_expected_output_scenario() {
        let rpc = MockRpc::new();
        let owner = Pubkey::new_unique();
        let pool = record(Pubkey::new_unique(), Pubkey::new_unique(), 6, 9);
        // 1,000 base and 50,000,000 quote in human units
        funded_pool(&rpc, &pool, 1_000_000_000, 50_000_000_000_000_000);
        let accounts = accounts_for(&owner, &[pool.base_mint, pool.quote_mint], &[]);

        let quote = SwapEstimator::new(&rpc, 100.0)
            .estimate(&pool, Direction::Forward, 1.0, 99.0, &accounts)
            .await
            .unwrap();

        assert_eq!(quote.amount_in(), 1_000_000);
        assert!((quote.expected_out - 49_950.05).abs() < 0.01);
        assert!(quote.min_out > 0);
        assert!(quote.min_out < to_units(quote.expected_out, 9));
        assert!(!quote.source_missing && !quote.destination_missing);
        assert_eq!(rpc.network_calls(), 1);
    }

    #[tokio::test]
    async fn test_small_pool_scenario() {
        let rpc = MockRpc::new();
        let owner = Pubkey::new_unique();
        let pool = record(Pubkey::new_unique(), Pubkey::new_unique(), 6, 9);
        funded_pool(&rpc, &pool, 1_000_000, 50_000_000_000);
        let accounts = accounts_for(&owner, &[pool.base_mint, pool.quote_mint], &[]);

        let quote = SwapEstimator::new(&rpc, 100.0)
            .estimate(&pool, Direction::Forward, 1.0, 99.0, &accounts)
            .await
            .unwrap();

        assert!(quote.expected_out < quote.reserve_out);
        assert!(quote.min_out > 0);
        assert!(quote.min_out < to_units(quote.expected_out, 9));
    }

    #[tokio::test]
    async fn test_min_out_monotonic_in_slippage() {
        let rpc = MockRpc::new();
        let owner = Pubkey::new_unique();
        let pool = record(Pubkey::new_unique(), Pubkey::new_unique(), 9, 6);
        funded_pool(&rpc, &pool, 80_000_000_000_000, 12_000_000_000_000);
        let accounts = accounts_for(&owner, &[pool.base_mint, pool.quote_mint], &[]);
        let estimator = SwapEstimator::new(&rpc, 100.0);

        let mut previous = 0;
        for slippage in [50.0, 90.0, 95.0, 99.0, 100.0] {
            let quote = estimator
                .estimate(&pool, Direction::Reversed, 3.5, slippage, &accounts)
                .await
                .unwrap();
            assert!(quote.min_out >= previous);
            previous = quote.min_out;
        }
    }

    #[tokio::test]
    async fn test_dust_amount_is_zero_output() {
        let rpc = MockRpc::new();
        let owner = Pubkey::new_unique();
        let pool = record(Pubkey::new_unique(), Pubkey::new_unique(), 9, 2);
        funded_pool(&rpc, &pool, 1_000_000_000_000, 100);
        let accounts = accounts_for(&owner, &[pool.base_mint, pool.quote_mint], &[]);

        let err = SwapEstimator::new(&rpc, 100.0)
            .estimate(&pool, Direction::Forward, 0.000001, 99.0, &accounts)
            .await
            .unwrap_err();
        assert!(matches!(err, SwapError::ZeroOutput));
    }

    #[tokio::test]
    async fn test_sub_unit_amount_is_zero_output() {
        let rpc = MockRpc::new();
        let owner = Pubkey::new_unique();
        let pool = record(Pubkey::new_unique(), Pubkey::new_unique(), 6, 9);
        funded_pool(&rpc, &pool, 1_000_000_000, 50_000_000_000_000_000);
        let accounts = accounts_for(&owner, &[pool.base_mint, pool.quote_mint], &[]);

        // Below one smallest unit of the 6-decimal input
        let err = SwapEstimator::new(&rpc, 100.0)
            .estimate(&pool, Direction::Forward, 0.0000001, 99.0, &accounts)
            .await
            .unwrap_err();
        assert!(matches!(err, SwapError::ZeroOutput));
        assert_eq!(rpc.network_calls(), 0);
    }

    #[tokio::test]
    async fn test_expected_output_uses_truncated_input() {
        let rpc = MockRpc::new();
        let owner = Pubkey::new_unique();
        let pool = record(Pubkey::new_unique(), Pubkey::new_unique(), 2, 9);
        funded_pool(&rpc, &pool, 100_000, 50_000_000_000_000);
        let accounts = accounts_for(&owner, &[pool.base_mint, pool.quote_mint], &[]);

        let quote = SwapEstimator::new(&rpc, 100.0)
            .estimate(&pool, Direction::Forward, 1.239, 99.0, &accounts)
            .await
            .unwrap();

        assert_eq!(quote.amount_in(), 123);
        let exact = constant_product_out(1_000.0, 50_000.0, 1.23);
        assert!((quote.expected_out - exact).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_reversed_wsol_uses_native_account() {
        let rpc = MockRpc::new();
        let owner = Pubkey::new_unique();
        let token = Pubkey::new_unique();
        let pool = record(token, WSOL_MINT, 6, 9);
        funded_pool(&rpc, &pool, 5_000_000_000, 100_000_000_000);
        let accounts = accounts_for(&owner, &[NATIVE_SOL_MINT], &[token]);

        let quote = SwapEstimator::new(&rpc, 100.0)
            .estimate(&pool, Direction::Reversed, 0.5, 97.0, &accounts)
            .await
            .unwrap();

        assert_eq!(quote.amount_in(), 500_000_000);
        assert_eq!(quote.source.address, owner);
        assert!(!quote.source_missing);
        assert!(quote.destination_missing);
    }
}
