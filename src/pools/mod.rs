/// Pool resolution for Raydium AMM v4
///
/// A pool is looked up in the cache under both orientations of the pair, then
/// discovered on chain by memcmp search on the AMM base/quote mint fields.

pub mod cache;
pub mod resolver;
pub mod types;

pub use cache::{MemoryPoolCache, PoolCache, SqlitePoolCache};
pub use resolver::{fetch_vault_reserves, PoolResolver};
pub use types::{Direction, PoolRecord};
