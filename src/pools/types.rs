/// Pool record and swap direction
use crate::errors::SwapResult;
use crate::layout::{AmmInfo, MarketState};
use solana_sdk::pubkey::Pubkey;

/// Everything the swap instruction needs to know about one AMM v4 pool
/// and its linked order-book market.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolRecord {
    pub id: Pubkey,
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub base_decimals: u8,
    pub quote_decimals: u8,
    pub open_orders: Pubkey,
    pub target_orders: Pubkey,
    pub base_vault: Pubkey,
    pub quote_vault: Pubkey,
    pub market_id: Pubkey,
    pub market_program_id: Pubkey,
    pub market_authority: Pubkey,
    pub market_base_vault: Pubkey,
    pub market_quote_vault: Pubkey,
    pub market_bids: Pubkey,
    pub market_asks: Pubkey,
    pub market_event_queue: Pubkey,
}

impl PoolRecord {
    /// Combine a decoded pool with its decoded market
    pub fn from_state(id: Pubkey, amm: &AmmInfo, market: &MarketState) -> SwapResult<Self> {
        let market_authority = market.vault_signer(&amm.market_id, &amm.market_program_id)?;

        Ok(Self {
            id,
            base_mint: amm.base_mint,
            quote_mint: amm.quote_mint,
            base_decimals: amm.base_decimals(),
            quote_decimals: amm.quote_decimals(),
            open_orders: amm.open_orders,
            target_orders: amm.target_orders,
            base_vault: amm.base_vault,
            quote_vault: amm.quote_vault,
            market_id: amm.market_id,
            market_program_id: amm.market_program_id,
            market_authority,
            market_base_vault: market.base_vault,
            market_quote_vault: market.quote_vault,
            market_bids: market.bids,
            market_asks: market.asks,
            market_event_queue: market.event_queue,
        })
    }

    /// (input mint, output mint) for a direction
    pub fn mints_for(&self, direction: Direction) -> (Pubkey, Pubkey) {
        match direction {
            Direction::Forward => (self.base_mint, self.quote_mint),
            Direction::Reversed => (self.quote_mint, self.base_mint),
        }
    }

    /// (input decimals, output decimals) for a direction
    pub fn decimals_for(&self, direction: Direction) -> (u8, u8) {
        match direction {
            Direction::Forward => (self.base_decimals, self.quote_decimals),
            Direction::Reversed => (self.quote_decimals, self.base_decimals),
        }
    }

    /// (input vault, output vault) for a direction
    pub fn vaults_for(&self, direction: Direction) -> (Pubkey, Pubkey) {
        match direction {
            Direction::Forward => (self.base_vault, self.quote_vault),
            Direction::Reversed => (self.quote_vault, self.base_vault),
        }
    }
}

/// Which side of the pool the input token sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Input is the pool's base mint
    Forward,
    /// Input is the pool's quote mint
    Reversed,
}

impl Direction {
    pub fn for_input(record: &PoolRecord, from: &Pubkey) -> Self {
        if record.base_mint == *from {
            Direction::Forward
        } else {
            Direction::Reversed
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Forward => Direction::Reversed,
            Direction::Reversed => Direction::Forward,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Forward => write!(f, "base->quote"),
            Direction::Reversed => write!(f, "quote->base"),
        }
    }
}
