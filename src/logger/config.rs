/// Logger configuration, built once from command-line flags.
///
/// Debug output is opt-in per tag (`--debug-swaps`, `--debug-rpc`, ...).
/// `--verbose` lowers the threshold to Verbose for every tag and `--quiet`
/// raises it to Warning.
use super::levels::LogLevel;
use super::tags::LogTag;
use crate::arguments;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::RwLock;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub min_level: LogLevel,
    pub debug_tags: HashSet<String>,
    pub verbose_tags: HashSet<String>,
    /// Empty set means every tag is enabled
    pub enabled_tags: HashSet<String>,
    pub file_logging: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_tags: HashSet::new(),
            verbose_tags: HashSet::new(),
            enabled_tags: HashSet::new(),
            file_logging: true,
        }
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

pub fn get_logger_config() -> LoggerConfig {
    match LOGGER_CONFIG.read() {
        Ok(cfg) => cfg.clone(),
        Err(_) => LoggerConfig::default(),
    }
}

pub fn set_logger_config(config: LoggerConfig) {
    if let Ok(mut cfg) = LOGGER_CONFIG.write() {
        *cfg = config;
    }
}

/// Scan command-line arguments and rebuild the logger configuration
pub fn init_from_args() {
    let mut config = LoggerConfig::default();

    if arguments::has_arg("--verbose") {
        config.min_level = LogLevel::Verbose;
    } else if arguments::has_arg("--quiet") {
        config.min_level = LogLevel::Warning;
    } else if let Some(level) = arguments::get_arg_value("--log-level").and_then(|v| LogLevel::from_str(&v)) {
        config.min_level = level;
    }

    // --only-tags swaps,rpc
    if let Some(tags) = arguments::get_arg_value("--only-tags") {
        config.enabled_tags = tags
            .split(',')
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
    }

    for tag in LogTag::all() {
        let key = tag.to_debug_key();
        if arguments::has_arg(&format!("--debug-{}", key)) {
            config.debug_tags.insert(key.clone());
        }
        if arguments::has_arg(&format!("--verbose-{}", key)) {
            config.verbose_tags.insert(key);
        }
    }

    if arguments::has_arg("--no-log-file") {
        config.file_logging = false;
    }

    set_logger_config(config);
}

pub fn is_debug_enabled_for_tag(tag: &LogTag) -> bool {
    let cfg = get_logger_config();
    let key = tag.to_debug_key();
    cfg.debug_tags.contains(&key) || cfg.verbose_tags.contains(&key)
}

pub fn is_verbose_enabled_for_tag(tag: &LogTag) -> bool {
    get_logger_config()
        .verbose_tags
        .contains(&tag.to_debug_key())
}
