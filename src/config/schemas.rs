/// Configuration schemas with embedded defaults
use crate::config_struct;

// ============================================================================
// RPC CONFIGURATION
// ============================================================================

config_struct! {
    /// Solana JSON-RPC endpoint
    pub struct RpcConfig {
        url: String = "https://api.mainnet-beta.solana.com".to_string(),
        /// Per-request timeout applied to every RPC call
        timeout_secs: u64 = 20,
    }
}

// ============================================================================
// WALLET CONFIGURATION
// ============================================================================

config_struct! {
    /// Signing wallet
    pub struct WalletConfig {
        /// Base58 secret key or `[u8, ...]` array (64 bytes)
        private_key: String = String::new(),
    }
}

// ============================================================================
// SWAP CONFIGURATION
// ============================================================================

config_struct! {
    /// Submission and confirmation behaviour
    pub struct SwapConfig {
        poll_interval_secs: u64 = 5,
        confirm_timeout_secs: u64 = 120,
        /// Slippage above this logs a warning (100 keeps the full expected output)
        max_sane_slippage_pct: f64 = 100.0,
    }
}

// ============================================================================
// CACHE CONFIGURATION
// ============================================================================

config_struct! {
    /// Pool cache storage
    pub struct CacheConfig {
        /// Empty means `paths::get_pools_db_path()`
        path: String = String::new(),
    }
}

config_struct! {
    /// Root configuration
    pub struct Config {
        rpc: RpcConfig = RpcConfig::default(),
        wallet: WalletConfig = WalletConfig::default(),
        swap: SwapConfig = SwapConfig::default(),
        cache: CacheConfig = CacheConfig::default(),
    }
}
