/// Centralized command-line flag access
///
/// Typed swap parameters are parsed with clap in `main.rs`; this module keeps the
/// raw argument list so the logger and other modules can check debug flags
/// without threading them through every call.
use once_cell::sync::Lazy;
use std::env;
use std::sync::Mutex;

/// Global command-line arguments storage
pub static CMD_ARGS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(env::args().collect()));

/// Sets the global command-line arguments
/// Used by tests to override the default env::args() collection
pub fn set_cmd_args(args: Vec<String>) {
    if let Ok(mut cmd_args) = CMD_ARGS.lock() {
        *cmd_args = args;
    }
}

/// Gets a copy of the current command-line arguments
pub fn get_cmd_args() -> Vec<String> {
    match CMD_ARGS.lock() {
        Ok(args) => args.clone(),
        Err(_) => env::args().collect(),
    }
}

/// Checks if a specific argument is present in the command line
pub fn has_arg(arg: &str) -> bool {
    get_cmd_args().iter().any(|a| a == arg)
}

/// Gets the value following a flag, supporting both `--flag value` and `--flag=value`
pub fn get_arg_value(flag: &str) -> Option<String> {
    let args = get_cmd_args();
    let prefix = format!("{}=", flag);
    for (i, arg) in args.iter().enumerate() {
        if arg == flag && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
        if let Some(value) = arg.strip_prefix(&prefix) {
            return Some(value.to_string());
        }
    }
    None
}

// =============================================================================
// DEBUG FLAG CHECKING FUNCTIONS
// =============================================================================

/// Swap estimation / building debug mode
pub fn is_debug_swaps_enabled() -> bool {
    has_arg("--debug-swaps")
}

/// Pool discovery debug mode
pub fn is_debug_pool_enabled() -> bool {
    has_arg("--debug-pool")
}

/// RPC request/response debug mode
pub fn is_debug_rpc_enabled() -> bool {
    has_arg("--debug-rpc")
}

/// Transaction submission / confirmation debug mode
pub fn is_debug_transactions_enabled() -> bool {
    has_arg("--debug-transactions")
}

/// Checks if any debug mode is enabled
pub fn is_any_debug_enabled() -> bool {
    get_enabled_debug_modes().len() > 0
}

pub fn get_enabled_debug_modes() -> Vec<&'static str> {
    let mut modes = Vec::new();
    if is_debug_swaps_enabled() {
        modes.push("swaps");
    }
    if is_debug_pool_enabled() {
        modes.push("pool");
    }
    if is_debug_rpc_enabled() {
        modes.push("rpc");
    }
    if is_debug_transactions_enabled() {
        modes.push("transactions");
    }
    modes
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test touches the global list to avoid interleaving with parallel tests
    #[test]
    fn test_flag_lookup() {
        set_cmd_args(vec![
            "raydium-swap".to_string(),
            "--debug-pool".to_string(),
            "--config".to_string(),
            "swap.toml".to_string(),
            "--from=So11111111111111111111111111111111111111112".to_string(),
        ]);

        assert!(is_debug_pool_enabled());
        assert!(!is_debug_rpc_enabled());
        assert_eq!(get_enabled_debug_modes(), vec!["pool"]);
        assert_eq!(get_arg_value("--config"), Some("swap.toml".to_string()));
        assert_eq!(
            get_arg_value("--from"),
            Some("So11111111111111111111111111111111111111112".to_string())
        );
        assert_eq!(get_arg_value("--to"), None);

        set_cmd_args(Vec::new());
    }
}
