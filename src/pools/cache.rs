/// Persistent pool cache keyed by (base mint, quote mint)
///
/// The table is append-only without a unique constraint; when several rows
/// match a pair the oldest one wins.
use super::types::PoolRecord;
use crate::errors::{SwapError, SwapResult};
use crate::logger::{self, LogTag};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use solana_sdk::pubkey::Pubkey;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;

pub trait PoolCache: Send + Sync {
    /// Record whose base/quote equal the given pair, if any
    fn lookup(&self, base: &Pubkey, quote: &Pubkey) -> SwapResult<Option<PoolRecord>>;

    fn insert(&self, record: &PoolRecord) -> SwapResult<()>;
}

// =============================================================================
// SQLITE
// =============================================================================

pub struct SqlitePoolCache {
    conn: Mutex<Connection>,
}

impl SqlitePoolCache {
    pub fn open(path: &Path) -> SwapResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    SwapError::Cache(format!(
                        "Failed to create cache directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let conn = Connection::open(path)?;
        Self::initialize(&conn)?;

        logger::debug(
            LogTag::PoolCache,
            &format!("Pool cache opened at {}", path.display()),
        );

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> SwapResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::initialize(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize(conn: &Connection) -> SwapResult<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS pools (
                id TEXT NOT NULL,
                base_mint TEXT NOT NULL,
                quote_mint TEXT NOT NULL,
                base_decimals INTEGER NOT NULL,
                quote_decimals INTEGER NOT NULL,
                open_orders TEXT NOT NULL,
                target_orders TEXT NOT NULL,
                base_vault TEXT NOT NULL,
                quote_vault TEXT NOT NULL,
                market_id TEXT NOT NULL,
                market_program_id TEXT NOT NULL,
                market_authority TEXT NOT NULL,
                market_base_vault TEXT NOT NULL,
                market_quote_vault TEXT NOT NULL,
                market_bids TEXT NOT NULL,
                market_asks TEXT NOT NULL,
                market_event_queue TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_pools_pair ON pools (base_mint, quote_mint)",
            [],
        )?;

        Ok(())
    }

    fn record_from_row(row: &Row) -> Result<PoolRecord, rusqlite::Error> {
        let key = |name: &str| -> Result<Pubkey, rusqlite::Error> {
            let value: String = row.get(name)?;
            Pubkey::from_str(&value).map_err(|_| {
                rusqlite::Error::InvalidColumnType(0, name.to_string(), rusqlite::types::Type::Text)
            })
        };

        Ok(PoolRecord {
            id: key("id")?,
            base_mint: key("base_mint")?,
            quote_mint: key("quote_mint")?,
            base_decimals: row.get("base_decimals")?,
            quote_decimals: row.get("quote_decimals")?,
            open_orders: key("open_orders")?,
            target_orders: key("target_orders")?,
            base_vault: key("base_vault")?,
            quote_vault: key("quote_vault")?,
            market_id: key("market_id")?,
            market_program_id: key("market_program_id")?,
            market_authority: key("market_authority")?,
            market_base_vault: key("market_base_vault")?,
            market_quote_vault: key("market_quote_vault")?,
            market_bids: key("market_bids")?,
            market_asks: key("market_asks")?,
            market_event_queue: key("market_event_queue")?,
        })
    }

    fn connection(&self) -> SwapResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| SwapError::Cache("Pool cache connection lock poisoned".to_string()))
    }
}

impl PoolCache for SqlitePoolCache {
    fn lookup(&self, base: &Pubkey, quote: &Pubkey) -> SwapResult<Option<PoolRecord>> {
        let conn = self.connection()?;
        let record = conn
            .query_row(
                "SELECT * FROM pools WHERE base_mint = ?1 AND quote_mint = ?2
                 ORDER BY rowid ASC LIMIT 1",
                params![base.to_string(), quote.to_string()],
                Self::record_from_row,
            )
            .optional()?;
        Ok(record)
    }

    fn insert(&self, record: &PoolRecord) -> SwapResult<()> {
        let conn = self.connection()?;
        conn.execute(
            "INSERT INTO pools (
                id, base_mint, quote_mint, base_decimals, quote_decimals,
                open_orders, target_orders, base_vault, quote_vault,
                market_id, market_program_id, market_authority,
                market_base_vault, market_quote_vault,
                market_bids, market_asks, market_event_queue, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
            params![
                record.id.to_string(),
                record.base_mint.to_string(),
                record.quote_mint.to_string(),
                record.base_decimals,
                record.quote_decimals,
                record.open_orders.to_string(),
                record.target_orders.to_string(),
                record.base_vault.to_string(),
                record.quote_vault.to_string(),
                record.market_id.to_string(),
                record.market_program_id.to_string(),
                record.market_authority.to_string(),
                record.market_base_vault.to_string(),
                record.market_quote_vault.to_string(),
                record.market_bids.to_string(),
                record.market_asks.to_string(),
                record.market_event_queue.to_string(),
                Utc::now().to_rfc3339(),
            ],
        )?;

        logger::debug(
            LogTag::PoolCache,
            &format!(
                "Cached pool {} ({} / {})",
                record.id, record.base_mint, record.quote_mint
            ),
        );
        Ok(())
    }
}

// =============================================================================
// MEMORY
// =============================================================================

/// Process-local cache with the same first-insert-wins semantics
#[derive(Default)]
pub struct MemoryPoolCache {
    records: Mutex<HashMap<(Pubkey, Pubkey), PoolRecord>>,
}

impl MemoryPoolCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PoolCache for MemoryPoolCache {
    fn lookup(&self, base: &Pubkey, quote: &Pubkey) -> SwapResult<Option<PoolRecord>> {
        let records = self
            .records
            .lock()
            .map_err(|_| SwapError::Cache("Memory cache lock poisoned".to_string()))?;
        Ok(records.get(&(*base, *quote)).cloned())
    }

    fn insert(&self, record: &PoolRecord) -> SwapResult<()> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| SwapError::Cache("Memory cache lock poisoned".to_string()))?;
        records
            .entry((record.base_mint, record.quote_mint))
            .or_insert_with(|| record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pools::types::fixtures::record;

    #[test]
    fn test_sqlite_round_trip_and_orientation() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SqlitePoolCache::open(&dir.path().join("nested").join("pools.db")).unwrap();

        let base = Pubkey::new_unique();
        let quote = Pubkey::new_unique();
        let pool = record(base, quote, 6, 9);
        cache.insert(&pool).unwrap();

        assert_eq!(cache.lookup(&base, &quote).unwrap(), Some(pool));
        assert_eq!(cache.lookup(&quote, &base).unwrap(), None);
    }

    #[test]
    fn test_sqlite_first_row_wins() {
        let cache = SqlitePoolCache::open_in_memory().unwrap();
        let base = Pubkey::new_unique();
        let quote = Pubkey::new_unique();
        let first = record(base, quote, 6, 9);
        let second = record(base, quote, 6, 9);

        cache.insert(&first).unwrap();
        cache.insert(&second).unwrap();
        assert_eq!(cache.lookup(&base, &quote).unwrap().unwrap().id, first.id);
    }

    #[test]
    fn test_sqlite_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pools.db");
        let base = Pubkey::new_unique();
        let quote = Pubkey::new_unique();
        let pool = record(base, quote, 5, 9);

        SqlitePoolCache::open(&path).unwrap().insert(&pool).unwrap();
        let reopened = SqlitePoolCache::open(&path).unwrap();
        assert_eq!(reopened.lookup(&base, &quote).unwrap(), Some(pool));
    }

    #[test]
    fn test_memory_cache_first_insert_wins() {
        let cache = MemoryPoolCache::new();
        let base = Pubkey::new_unique();
        let quote = Pubkey::new_unique();
        let first = record(base, quote, 6, 9);
        cache.insert(&first).unwrap();
        cache.insert(&record(base, quote, 6, 9)).unwrap();

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.lookup(&base, &quote).unwrap().unwrap().id, first.id);
    }
}
