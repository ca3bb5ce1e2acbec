//! Fixed-offset account layouts
//!
//! - `reader`: bounds-checked cursor
//! - `amm`: Raydium AMM v4 pool state
//! - `market`: Serum / OpenBook v3 market state
//! - `token`: SPL token account balance

pub mod amm;
pub mod market;
pub mod reader;
pub mod token;

pub use amm::AmmInfo;
pub use market::MarketState;
pub use reader::AccountReader;
pub use token::read_token_account_amount;

/// Byte encoders mirroring the decoders, for building fixture accounts in tests
#[cfg(test)]
pub(crate) mod test_utils {
    use super::{AmmInfo, MarketState};
    use crate::constants::{TOKEN_ACCOUNT_AMOUNT_OFFSET, TOKEN_ACCOUNT_SIZE};
    use solana_sdk::pubkey::Pubkey;

    pub fn encode_amm(a: &AmmInfo) -> Vec<u8> {
        let mut d = Vec::with_capacity(752);
        for v in [
            a.status,
            a.nonce,
            a.max_order,
            a.depth,
            a.base_decimal,
            a.quote_decimal,
            a.state,
            a.reset_flag,
            a.min_size,
            a.vol_max_cut_ratio,
            a.amount_wave_ratio,
            a.base_lot_size,
            a.quote_lot_size,
            a.min_price_multiplier,
            a.max_price_multiplier,
            a.system_decimal_value,
            a.min_separate_numerator,
            a.min_separate_denominator,
            a.trade_fee_numerator,
            a.trade_fee_denominator,
            a.pnl_numerator,
            a.pnl_denominator,
            a.swap_fee_numerator,
            a.swap_fee_denominator,
            a.base_need_take_pnl,
            a.quote_need_take_pnl,
            a.quote_total_pnl,
            a.base_total_pnl,
        ] {
            d.extend_from_slice(&v.to_le_bytes());
        }
        d.extend_from_slice(&a.quote_total_deposited.to_le_bytes());
        d.extend_from_slice(&a.base_total_deposited.to_le_bytes());
        d.extend_from_slice(&a.swap_base_in_amount.to_le_bytes());
        d.extend_from_slice(&a.swap_quote_out_amount.to_le_bytes());
        d.extend_from_slice(&a.swap_base2quote_fee.to_le_bytes());
        d.extend_from_slice(&a.swap_quote_in_amount.to_le_bytes());
        d.extend_from_slice(&a.swap_base_out_amount.to_le_bytes());
        d.extend_from_slice(&a.swap_quote2base_fee.to_le_bytes());
        for k in [
            a.base_vault,
            a.quote_vault,
            a.base_mint,
            a.quote_mint,
            a.lp_mint,
            a.open_orders,
            a.market_id,
            a.market_program_id,
            a.target_orders,
            a.withdraw_queue,
            a.lp_vault,
            a.owner,
        ] {
            d.extend_from_slice(k.as_ref());
        }
        d.extend_from_slice(&a.lp_reserve.to_le_bytes());
        d.extend_from_slice(&[0u8; 24]);
        d
    }

    pub fn encode_market(m: &MarketState) -> Vec<u8> {
        let mut d = Vec::with_capacity(388);
        d.extend_from_slice(b"serum");
        d.extend_from_slice(&m.account_flags.to_le_bytes());
        d.extend_from_slice(m.own_address.as_ref());
        d.extend_from_slice(&m.vault_signer_nonce.to_le_bytes());
        d.extend_from_slice(m.base_mint.as_ref());
        d.extend_from_slice(m.quote_mint.as_ref());
        d.extend_from_slice(m.base_vault.as_ref());
        d.extend_from_slice(&m.base_deposits_total.to_le_bytes());
        d.extend_from_slice(&m.base_fees_accrued.to_le_bytes());
        d.extend_from_slice(m.quote_vault.as_ref());
        d.extend_from_slice(&m.quote_deposits_total.to_le_bytes());
        d.extend_from_slice(&m.quote_fees_accrued.to_le_bytes());
        d.extend_from_slice(&m.quote_dust_threshold.to_le_bytes());
        d.extend_from_slice(m.request_queue.as_ref());
        d.extend_from_slice(m.event_queue.as_ref());
        d.extend_from_slice(m.bids.as_ref());
        d.extend_from_slice(m.asks.as_ref());
        d.extend_from_slice(&m.base_lot_size.to_le_bytes());
        d.extend_from_slice(&m.quote_lot_size.to_le_bytes());
        d.extend_from_slice(&m.fee_rate_bps.to_le_bytes());
        d.extend_from_slice(&m.referrer_rebates_accrued.to_le_bytes());
        d.extend_from_slice(b"padding");
        d
    }

    pub fn encode_token_account(mint: &Pubkey, owner: &Pubkey, amount: u64) -> Vec<u8> {
        let mut d = vec![0u8; TOKEN_ACCOUNT_SIZE];
        d[..32].copy_from_slice(mint.as_ref());
        d[32..64].copy_from_slice(owner.as_ref());
        d[TOKEN_ACCOUNT_AMOUNT_OFFSET..TOKEN_ACCOUNT_AMOUNT_OFFSET + 8]
            .copy_from_slice(&amount.to_le_bytes());
        d
    }

    /// First nonce whose `[market, nonce]` seed is off-curve
    pub fn find_vault_signer_nonce(market: &Pubkey, program: &Pubkey) -> u64 {
        (0u64..256)
            .find(|n| {
                Pubkey::create_program_address(&[market.as_ref(), &n.to_le_bytes()], program)
                    .is_ok()
            })
            .expect("vault signer nonce within 256 attempts")
    }
}
