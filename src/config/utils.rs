/// Configuration loading, validation and keypair parsing
///
/// The loaded `Config` is returned to the caller and passed explicitly into
/// each component; nothing here is stored globally.
use super::schemas::Config;
use crate::errors::{SwapError, SwapResult};
use crate::logger::{self, LogTag};
use crate::paths;
use solana_sdk::signature::Keypair;
use std::path::{Path, PathBuf};

/// Environment variable overriding `rpc.url`
pub const ENV_RPC_URL: &str = "RAYDIUM_SWAP_RPC_URL";

/// Environment variable overriding `wallet.private_key`
pub const ENV_PRIVATE_KEY: &str = "RAYDIUM_SWAP_PRIVATE_KEY";

/// Load configuration from a specific TOML file
///
/// A missing file yields defaults so env overrides alone are enough to run.
pub fn load_config_from_path(path: &Path) -> SwapResult<Config> {
    let mut config = if path.exists() {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SwapError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;

        toml::from_str::<Config>(&contents).map_err(|e| {
            SwapError::Config(format!("Failed to parse config file '{}': {}", path.display(), e))
        })?
    } else {
        logger::warning(
            LogTag::Config,
            &format!("Config file '{}' not found, using default values", path.display()),
        );
        Config::default()
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Load from `paths::get_config_path()`
pub fn load_config() -> SwapResult<Config> {
    load_config_from_path(&paths::get_config_path())
}

/// Apply overrides from a key lookup (the process environment in production)
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_RPC_URL).filter(|v| !v.is_empty()) {
        config.rpc.url = url;
    }
    if let Some(key) = lookup(ENV_PRIVATE_KEY).filter(|v| !v.is_empty()) {
        config.wallet.private_key = key;
    }
}

impl Config {
    pub fn validate(&self) -> SwapResult<()> {
        if self.rpc.url.is_empty() {
            return Err(SwapError::Config("rpc.url is required".to_string()));
        }
        if self.rpc.timeout_secs == 0 {
            return Err(SwapError::Config("rpc.timeout_secs must be positive".to_string()));
        }
        if self.wallet.private_key.is_empty() {
            return Err(SwapError::Config(format!(
                "wallet.private_key is required (or set {})",
                ENV_PRIVATE_KEY
            )));
        }
        if self.swap.poll_interval_secs == 0 {
            return Err(SwapError::Config("swap.poll_interval_secs must be positive".to_string()));
        }
        if self.swap.confirm_timeout_secs < self.swap.poll_interval_secs {
            return Err(SwapError::Config(
                "swap.confirm_timeout_secs must be at least poll_interval_secs".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse the wallet keypair from base58 or `[u8, ...]` array format
    pub fn load_keypair(&self) -> SwapResult<Keypair> {
        let private_key = self.wallet.private_key.trim();

        if private_key.is_empty() {
            return Err(SwapError::Config("wallet.private_key is empty".to_string()));
        }

        if private_key.starts_with('[') && private_key.ends_with(']') {
            load_keypair_from_array_format(private_key)
        } else {
            load_keypair_from_base58_format(private_key)
        }
    }

    /// Pool cache database path, falling back to the data directory
    pub fn cache_path(&self) -> PathBuf {
        if self.cache.path.is_empty() {
            paths::get_pools_db_path()
        } else {
            PathBuf::from(&self.cache.path)
        }
    }
}

fn load_keypair_from_array_format(private_key_str: &str) -> SwapResult<Keypair> {
    let inner = private_key_str
        .trim_start_matches('[')
        .trim_end_matches(']');

    let bytes = inner
        .split(',')
        .map(|s| s.trim().parse::<u8>())
        .collect::<Result<Vec<u8>, _>>()
        .map_err(|e| SwapError::Config(format!("Failed to parse private key array: {}", e)))?;

    keypair_from_bytes(&bytes)
}

fn load_keypair_from_base58_format(private_key_str: &str) -> SwapResult<Keypair> {
    let bytes = bs58::decode(private_key_str)
        .into_vec()
        .map_err(|e| SwapError::Config(format!("Failed to decode base58 private key: {}", e)))?;

    keypair_from_bytes(&bytes)
}

fn keypair_from_bytes(bytes: &[u8]) -> SwapResult<Keypair> {
    if bytes.len() != 64 {
        return Err(SwapError::Config(format!(
            "Invalid private key length: expected 64 bytes, got {}",
            bytes.len()
        )));
    }

    Keypair::try_from(bytes)
        .map_err(|e| SwapError::Config(format!("Failed to create keypair: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::signer::Signer;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.swap.poll_interval_secs, 5);
        assert_eq!(config.swap.confirm_timeout_secs, 120);
        assert_eq!(config.rpc.timeout_secs, 20);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[rpc]\nurl = \"http://127.0.0.1:8899\"\n").unwrap();

        let config = load_config_from_path(file.path()).unwrap();
        assert_eq!(config.rpc.url, "http://127.0.0.1:8899");
        assert_eq!(config.rpc.timeout_secs, 20);
        assert_eq!(config.swap.poll_interval_secs, 5);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        apply_env_overrides(&mut config, |key| match key {
            ENV_RPC_URL => Some("http://override".to_string()),
            ENV_PRIVATE_KEY => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.rpc.url, "http://override");
        assert!(config.wallet.private_key.is_empty());
    }

    #[test]
    fn test_keypair_formats() {
        let keypair = Keypair::new();
        let bytes = keypair.to_bytes();

        let mut config = Config::default();
        config.wallet.private_key = bs58::encode(bytes).into_string();
        assert_eq!(config.load_keypair().unwrap().pubkey(), keypair.pubkey());

        let array = bytes
            .iter()
            .map(|b| b.to_string())
            .collect::<Vec<_>>()
            .join(",");
        config.wallet.private_key = format!("[{}]", array);
        assert_eq!(config.load_keypair().unwrap().pubkey(), keypair.pubkey());

        config.wallet.private_key = "[1,2,3]".to_string();
        assert!(matches!(config.load_keypair(), Err(SwapError::Config(_))));

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cache_path_fallback() {
        let mut config = Config::default();
        assert_eq!(config.cache_path(), paths::get_pools_db_path());
        config.cache.path = "/tmp/custom.db".to_string();
        assert_eq!(config.cache_path(), PathBuf::from("/tmp/custom.db"));
    }
}
