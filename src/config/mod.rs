//! Configuration system
//!
//! - `macros`: `config_struct!` for structs with inline defaults
//! - `schemas`: the configuration sections
//! - `utils`: loading, env overrides, validation and keypair parsing

pub mod macros;
pub mod schemas;
pub mod utils;

pub use schemas::{CacheConfig, Config, RpcConfig, SwapConfig, WalletConfig};
pub use utils::{apply_env_overrides, load_config, load_config_from_path, ENV_PRIVATE_KEY, ENV_RPC_URL};
