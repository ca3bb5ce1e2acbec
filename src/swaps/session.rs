/// One swap invocation: resolve, quote, check balance, build, submit.
use super::builder::build_swap;
use super::estimator::{from_units, SwapEstimator};
use super::executor::TransactionExecutor;
use super::types::{SwapQuote, SwapRequest, TransactionOutcome};
use crate::accounts::{balances, resolve_accounts};
use crate::config::SwapConfig;
use crate::constants::{is_wsol_mint, native_mapped_mint, NATIVE_SOL_MINT, TOKEN_ACCOUNT_SIZE, WSOL_MINT};
use crate::errors::{SwapError, SwapResult};
use crate::logger::{self, LogTag};
use crate::pools::{PoolCache, PoolResolver};
use crate::rpc::LedgerRpc;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};
use std::time::Duration;

/// What a session produced
#[derive(Debug)]
pub enum SessionResult {
    /// Built but not sent
    DryRun(SwapQuote),
    Submitted(TransactionOutcome),
}

pub struct SwapSession<'a, R: LedgerRpc, C: PoolCache> {
    rpc: &'a R,
    cache: &'a C,
    keypair: &'a Keypair,
    settings: SwapConfig,
}

impl<'a, R: LedgerRpc, C: PoolCache> SwapSession<'a, R, C> {
    pub fn new(rpc: &'a R, cache: &'a C, keypair: &'a Keypair, settings: SwapConfig) -> Self {
        Self {
            rpc,
            cache,
            keypair,
            settings,
        }
    }

    pub async fn run(&self, request: &SwapRequest, dry_run: bool) -> SwapResult<SessionResult> {
        let from = pool_mint(&request.from_mint);
        let to = pool_mint(&request.to_mint);
        if from == to {
            return Err(SwapError::InvalidMint(format!(
                "source and destination are the same mint {}",
                from
            )));
        }

        let owner = self.keypair.pubkey();
        logger::info(
            LogTag::Swap,
            &format!(
                "Swapping {} {} -> {} (slippage {}%) for {}",
                request.amount, from, to, request.slippage_pct, owner
            ),
        );

        let (pool, direction) = PoolResolver::new(self.rpc, self.cache).resolve(&from, &to).await?;

        let accounts =
            resolve_accounts(self.rpc, &owner, &[native_mapped_mint(&from), native_mapped_mint(&to)])
                .await?;

        let quote = SwapEstimator::new(self.rpc, self.settings.max_sane_slippage_pct)
            .estimate(&pool, direction, request.amount, request.slippage_pct, &accounts)
            .await?;

        let (decimals_in, decimals_out) = pool.decimals_for(direction);
        logger::info(
            LogTag::Swap,
            &format!(
                "Pool {} reserves {} / {}, expected out {}, minimum out {}",
                pool.id,
                quote.reserve_in,
                quote.reserve_out,
                quote.expected_out,
                from_units(quote.min_out, decimals_out)
            ),
        );

        self.check_balance(&quote, decimals_in).await?;

        let wrap_rent = if is_wsol_mint(&pool.base_mint) || is_wsol_mint(&pool.quote_mint) {
            self.rpc
                .get_minimum_balance_for_rent_exemption(TOKEN_ACCOUNT_SIZE)
                .await?
        } else {
            0
        };

        let built = build_swap(&pool, direction, &quote, &owner, wrap_rent)?;
        for (i, ix) in built.instructions.iter().enumerate() {
            logger::debug(LogTag::Swap, &format!("#{} {}", i, ix.summary()));
        }
        let instructions = built.to_instructions()?;

        if dry_run {
            logger::info(
                LogTag::Swap,
                &format!(
                    "Dry run: {} instruction(s) built, nothing submitted",
                    instructions.len()
                ),
            );
            return Ok(SessionResult::DryRun(quote));
        }

        let mut signers: Vec<&dyn Signer> = vec![self.keypair as &dyn Signer];
        signers.extend(built.extra_signers.iter().map(|k| k as &dyn Signer));

        let executor = TransactionExecutor::new(
            self.rpc,
            Duration::from_secs(self.settings.poll_interval_secs),
            Duration::from_secs(self.settings.confirm_timeout_secs),
        );
        let outcome = executor.submit(&signers, &instructions).await?;

        Ok(SessionResult::Submitted(outcome))
    }

    async fn check_balance(&self, quote: &SwapQuote, decimals_in: u8) -> SwapResult<()> {
        let needed = quote.amount_in();
        let available = if quote.source_missing {
            0
        } else {
            let address = quote.source.address;
            balances(self.rpc, &[address])
                .await?
                .get(&address)
                .copied()
                .unwrap_or(0)
        };

        logger::debug(
            LogTag::Wallet,
            &format!(
                "Source {} balance {} (need {})",
                quote.source.address,
                from_units(available, decimals_in),
                from_units(needed, decimals_in)
            ),
        );

        if needed > available {
            return Err(SwapError::InsufficientBalance { needed, available });
        }
        Ok(())
    }
}

/// The native placeholder trades through the WSOL pool side
fn pool_mint(mint: &Pubkey) -> Pubkey {
    if *mint == NATIVE_SOL_MINT {
        WSOL_MINT
    } else {
        *mint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::test_utils::encode_token_account;
    use crate::pools::resolver::fixtures::seed_pool;
    use crate::pools::MemoryPoolCache;
    use crate::rpc::mock::MockRpc;
    use crate::rpc::SignatureStatus;
    use crate::swaps::types::TransactionStatus;
    use solana_sdk::system_program;
    use solana_transaction_status::TransactionConfirmationStatus;
    use spl_associated_token_account::get_associated_token_address;

    fn settings() -> SwapConfig {
        SwapConfig {
            poll_interval_secs: 1,
            confirm_timeout_secs: 10,
            max_sane_slippage_pct: 100.0,
        }
    }

    fn request(from: Pubkey, to: Pubkey, amount: f64) -> SwapRequest {
        SwapRequest {
            from_mint: from,
            to_mint: to,
            amount,
            slippage_pct: 99.0,
        }
    }

    /// Token/WSOL pool, wallet with 10 SOL and no token account
    fn sol_market(rpc: &MockRpc, owner: &Pubkey) -> Pubkey {
        let token = Pubkey::new_unique();
        seed_pool(rpc, token, WSOL_MINT, 6, 9, 1_000_000_000_000, 500_000_000_000);
        rpc.add_account(*owner, system_program::id(), 10_000_000_000, Vec::new());
        token
    }

    #[tokio::test]
    async fn test_dry_run_submits_nothing() {
        let rpc = MockRpc::new();
        let cache = MemoryPoolCache::new();
        let keypair = Keypair::new();
        let token = sol_market(&rpc, &keypair.pubkey());

        let session = SwapSession::new(&rpc, &cache, &keypair, settings());
        let result = session
            .run(&request(NATIVE_SOL_MINT, token, 1.0), true)
            .await
            .unwrap();

        match result {
            SessionResult::DryRun(quote) => {
                assert_eq!(quote.amount_in(), 1_000_000_000);
                assert!(quote.destination_missing);
            }
            other => panic!("unexpected result {:?}", other),
        }
        assert!(rpc.sent.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sol_to_token_submits_with_wrap_signer() {
        let rpc = MockRpc::new();
        let cache = MemoryPoolCache::new();
        let keypair = Keypair::new();
        let token = sol_market(&rpc, &keypair.pubkey());
        rpc.push_status(Ok(Some(SignatureStatus {
            slot: 1,
            confirmations: Some(1),
            err: None,
            confirmation_status: Some(TransactionConfirmationStatus::Confirmed),
        })));

        let session = SwapSession::new(&rpc, &cache, &keypair, settings());
        let result = session
            .run(&request(WSOL_MINT, token, 2.0), false)
            .await
            .unwrap();

        let SessionResult::Submitted(outcome) = result else {
            panic!("expected a submitted transaction");
        };
        assert_eq!(outcome.status, TransactionStatus::Confirmed);

        let sent = rpc.sent.lock().unwrap();
        // owner plus the temporary WSOL account
        assert_eq!(sent[0].signatures.len(), 2);
        assert_eq!(sent[0].message.instructions.len(), 5);
    }

    #[tokio::test]
    async fn test_insufficient_balance() {
        let rpc = MockRpc::new();
        let cache = MemoryPoolCache::new();
        let keypair = Keypair::new();
        let owner = keypair.pubkey();
        let token = sol_market(&rpc, &owner);
        rpc.add_account(
            get_associated_token_address(&owner, &token),
            spl_token::id(),
            2_039_280,
            encode_token_account(&token, &owner, 5_000_000),
        );

        let session = SwapSession::new(&rpc, &cache, &keypair, settings());
        let err = session
            .run(&request(token, NATIVE_SOL_MINT, 6.0), true)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SwapError::InsufficientBalance {
                needed: 6_000_000,
                available: 5_000_000
            }
        ));
    }

    #[tokio::test]
    async fn test_same_mint_rejected() {
        let rpc = MockRpc::new();
        let cache = MemoryPoolCache::new();
        let keypair = Keypair::new();

        let session = SwapSession::new(&rpc, &cache, &keypair, settings());
        let err = session
            .run(&request(NATIVE_SOL_MINT, WSOL_MINT, 1.0), true)
            .await
            .unwrap_err();
        assert!(matches!(err, SwapError::InvalidMint(_)));
        assert_eq!(rpc.network_calls(), 0);
    }
}
