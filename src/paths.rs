//! Path resolution for raydium-swap
//!
//! All files live under one platform-specific base directory:
//! - **macOS**: `~/Library/Application Support/RaydiumSwap/`
//! - **Windows**: `%LOCALAPPDATA%\RaydiumSwap\`
//! - **Linux**: `$XDG_DATA_HOME/RaydiumSwap/` (fallback `~/.local/share/RaydiumSwap/`)
//!
//! ```text
//! RaydiumSwap/
//! ├── data/
//! │   ├── config.toml
//! │   └── pools.db
//! └── logs/
//!     └── raydium-swap_*.log
//! ```

use once_cell::sync::Lazy;
use std::path::PathBuf;

const APP_DIR: &str = "RaydiumSwap";

static BASE_DIRECTORY: Lazy<PathBuf> = Lazy::new(resolve_base_directory);

fn resolve_base_directory() -> PathBuf {
    if let Some(dir) = dirs::data_local_dir() {
        return dir.join(APP_DIR);
    }

    if let Some(dir) = dirs::data_dir() {
        return dir.join(APP_DIR);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(APP_DIR);
    }

    PathBuf::from(APP_DIR)
}

pub fn get_base_directory() -> PathBuf {
    BASE_DIRECTORY.clone()
}

pub fn get_data_directory() -> PathBuf {
    BASE_DIRECTORY.join("data")
}

pub fn get_logs_directory() -> PathBuf {
    BASE_DIRECTORY.join("logs")
}

/// Default configuration file, used when `--config` is not given
pub fn get_config_path() -> PathBuf {
    get_data_directory().join("config.toml")
}

/// Default SQLite pool cache location
pub fn get_pools_db_path() -> PathBuf {
    get_data_directory().join("pools.db")
}

/// Creates the data and logs directories
pub fn ensure_all_directories() -> Result<(), String> {
    for dir in [get_data_directory(), get_logs_directory()] {
        std::fs::create_dir_all(&dir)
            .map_err(|e| format!("Failed to create directory {}: {}", dir.display(), e))?;
    }
    Ok(())
}
