/// Raydium AMM v4 pool state (752 bytes).
///
/// Field order matters; the memcmp discovery filters rely on `base_mint`
/// landing at offset 400 and `quote_mint` at 432.
use super::reader::AccountReader;
use crate::constants::AMM_V4_ACCOUNT_SIZE;
use crate::errors::SwapResult;
use solana_sdk::pubkey::Pubkey;

const AMM_V4_PADDING: usize = 24;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmmInfo {
    pub status: u64,
    pub nonce: u64,
    pub max_order: u64,
    pub depth: u64,
    pub base_decimal: u64,
    pub quote_decimal: u64,
    pub state: u64,
    pub reset_flag: u64,
    pub min_size: u64,
    pub vol_max_cut_ratio: u64,
    pub amount_wave_ratio: u64,
    pub base_lot_size: u64,
    pub quote_lot_size: u64,
    pub min_price_multiplier: u64,
    pub max_price_multiplier: u64,
    pub system_decimal_value: u64,
    pub min_separate_numerator: u64,
    pub min_separate_denominator: u64,
    pub trade_fee_numerator: u64,
    pub trade_fee_denominator: u64,
    pub pnl_numerator: u64,
    pub pnl_denominator: u64,
    pub swap_fee_numerator: u64,
    pub swap_fee_denominator: u64,
    pub base_need_take_pnl: u64,
    pub quote_need_take_pnl: u64,
    pub quote_total_pnl: u64,
    pub base_total_pnl: u64,
    pub quote_total_deposited: u128,
    pub base_total_deposited: u128,
    pub swap_base_in_amount: u128,
    pub swap_quote_out_amount: u128,
    pub swap_base2quote_fee: u64,
    pub swap_quote_in_amount: u128,
    pub swap_base_out_amount: u128,
    pub swap_quote2base_fee: u64,
    pub base_vault: Pubkey,
    pub quote_vault: Pubkey,
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub lp_mint: Pubkey,
    pub open_orders: Pubkey,
    pub market_id: Pubkey,
    pub market_program_id: Pubkey,
    pub target_orders: Pubkey,
    pub withdraw_queue: Pubkey,
    pub lp_vault: Pubkey,
    pub owner: Pubkey,
    pub lp_reserve: u64,
}

impl AmmInfo {
    pub fn decode(data: &[u8]) -> SwapResult<Self> {
        let mut r = AccountReader::new(data, "amm_v4");
        r.require_len(AMM_V4_ACCOUNT_SIZE)?;

        let info = Self {
            status: r.read_u64()?,
            nonce: r.read_u64()?,
            max_order: r.read_u64()?,
            depth: r.read_u64()?,
            base_decimal: r.read_u64()?,
            quote_decimal: r.read_u64()?,
            state: r.read_u64()?,
            reset_flag: r.read_u64()?,
            min_size: r.read_u64()?,
            vol_max_cut_ratio: r.read_u64()?,
            amount_wave_ratio: r.read_u64()?,
            base_lot_size: r.read_u64()?,
            quote_lot_size: r.read_u64()?,
            min_price_multiplier: r.read_u64()?,
            max_price_multiplier: r.read_u64()?,
            system_decimal_value: r.read_u64()?,
            min_separate_numerator: r.read_u64()?,
            min_separate_denominator: r.read_u64()?,
            trade_fee_numerator: r.read_u64()?,
            trade_fee_denominator: r.read_u64()?,
            pnl_numerator: r.read_u64()?,
            pnl_denominator: r.read_u64()?,
            swap_fee_numerator: r.read_u64()?,
            swap_fee_denominator: r.read_u64()?,
            base_need_take_pnl: r.read_u64()?,
            quote_need_take_pnl: r.read_u64()?,
            quote_total_pnl: r.read_u64()?,
            base_total_pnl: r.read_u64()?,
            quote_total_deposited: r.read_u128()?,
            base_total_deposited: r.read_u128()?,
            swap_base_in_amount: r.read_u128()?,
            swap_quote_out_amount: r.read_u128()?,
            swap_base2quote_fee: r.read_u64()?,
            swap_quote_in_amount: r.read_u128()?,
            swap_base_out_amount: r.read_u128()?,
            swap_quote2base_fee: r.read_u64()?,
            base_vault: r.read_pubkey()?,
            quote_vault: r.read_pubkey()?,
            base_mint: r.read_pubkey()?,
            quote_mint: r.read_pubkey()?,
            lp_mint: r.read_pubkey()?,
            open_orders: r.read_pubkey()?,
            market_id: r.read_pubkey()?,
            market_program_id: r.read_pubkey()?,
            target_orders: r.read_pubkey()?,
            withdraw_queue: r.read_pubkey()?,
            lp_vault: r.read_pubkey()?,
            owner: r.read_pubkey()?,
            lp_reserve: r.read_u64()?,
        };
        r.skip(AMM_V4_PADDING)?;

        Ok(info)
    }

    /// Decimals are stored as u64 on chain but always fit in a u8
    pub fn base_decimals(&self) -> u8 {
        self.base_decimal.min(u8::MAX as u64) as u8
    }

    pub fn quote_decimals(&self) -> u8 {
        self.quote_decimal.min(u8::MAX as u64) as u8
    }
}
