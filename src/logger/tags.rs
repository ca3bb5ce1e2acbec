/// Log tags identify the subsystem a message comes from.
///
/// Each tag has a debug key used by `--debug-<key>` flags.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Config,
    Rpc,
    Pool,
    PoolCache,
    Swap,
    Wallet,
    Transactions,
}

impl LogTag {
    /// Key used for `--debug-<key>` / `--verbose-<key>` flags
    pub fn to_debug_key(&self) -> String {
        match self {
            LogTag::System => "system".to_string(),
            LogTag::Config => "config".to_string(),
            LogTag::Rpc => "rpc".to_string(),
            LogTag::Pool => "pool".to_string(),
            LogTag::PoolCache => "pool-cache".to_string(),
            LogTag::Swap => "swaps".to_string(),
            LogTag::Wallet => "wallet".to_string(),
            LogTag::Transactions => "transactions".to_string(),
        }
    }

    /// Uncolored label written to the log file
    pub fn to_plain_string(&self) -> String {
        match self {
            LogTag::System => "SYSTEM".to_string(),
            LogTag::Config => "CONFIG".to_string(),
            LogTag::Rpc => "RPC".to_string(),
            LogTag::Pool => "POOL".to_string(),
            LogTag::PoolCache => "POOLCACH".to_string(),
            LogTag::Swap => "SWAP".to_string(),
            LogTag::Wallet => "WALLET".to_string(),
            LogTag::Transactions => "TX".to_string(),
        }
    }

    /// All fixed tags, used when expanding debug flags
    pub fn all() -> Vec<LogTag> {
        vec![
            LogTag::System,
            LogTag::Config,
            LogTag::Rpc,
            LogTag::Pool,
            LogTag::PoolCache,
            LogTag::Swap,
            LogTag::Wallet,
            LogTag::Transactions,
        ]
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}
