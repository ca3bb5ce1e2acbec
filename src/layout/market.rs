/// Serum / OpenBook v3 market state (388 bytes including head and tail padding).
use super::reader::AccountReader;
use crate::constants::MARKET_V3_ACCOUNT_SIZE;
use crate::errors::{SwapError, SwapResult};
use solana_sdk::pubkey::Pubkey;

const MARKET_HEAD_PADDING: usize = 5;
const MARKET_TAIL_PADDING: usize = 7;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketState {
    pub account_flags: u64,
    pub own_address: Pubkey,
    pub vault_signer_nonce: u64,
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub base_vault: Pubkey,
    pub base_deposits_total: u64,
    pub base_fees_accrued: u64,
    pub quote_vault: Pubkey,
    pub quote_deposits_total: u64,
    pub quote_fees_accrued: u64,
    pub quote_dust_threshold: u64,
    pub request_queue: Pubkey,
    pub event_queue: Pubkey,
    pub bids: Pubkey,
    pub asks: Pubkey,
    pub base_lot_size: u64,
    pub quote_lot_size: u64,
    pub fee_rate_bps: u64,
    pub referrer_rebates_accrued: u64,
}

impl MarketState {
    pub fn decode(data: &[u8]) -> SwapResult<Self> {
        let mut r = AccountReader::new(data, "market_v3");
        r.require_len(MARKET_V3_ACCOUNT_SIZE)?;

        // "serum" magic
        r.skip(MARKET_HEAD_PADDING)?;
        let account_flags = u64::from_le_bytes(r.read_bytes::<8>()?);

        let market = Self {
            account_flags,
            own_address: r.read_pubkey()?,
            vault_signer_nonce: r.read_u64()?,
            base_mint: r.read_pubkey()?,
            quote_mint: r.read_pubkey()?,
            base_vault: r.read_pubkey()?,
            base_deposits_total: r.read_u64()?,
            base_fees_accrued: r.read_u64()?,
            quote_vault: r.read_pubkey()?,
            quote_deposits_total: r.read_u64()?,
            quote_fees_accrued: r.read_u64()?,
            quote_dust_threshold: r.read_u64()?,
            request_queue: r.read_pubkey()?,
            event_queue: r.read_pubkey()?,
            bids: r.read_pubkey()?,
            asks: r.read_pubkey()?,
            base_lot_size: r.read_u64()?,
            quote_lot_size: r.read_u64()?,
            fee_rate_bps: r.read_u64()?,
            referrer_rebates_accrued: r.read_u64()?,
        };
        r.skip(MARKET_TAIL_PADDING)?;

        Ok(market)
    }

    /// Market vault signer PDA: `[market, nonce_le]` under the market program
    pub fn vault_signer(&self, market: &Pubkey, market_program: &Pubkey) -> SwapResult<Pubkey> {
        let nonce = self.vault_signer_nonce.to_le_bytes();
        Pubkey::create_program_address(&[market.as_ref(), &nonce], market_program).map_err(|e| {
            SwapError::malformed(
                market,
                format!("invalid vault signer nonce {}: {}", self.vault_signer_nonce, e),
            )
        })
    }
}
