/// Core logging implementation with automatic filtering
///
/// Filtering rules:
/// 1. Errors are always shown
/// 2. Warning and Info respect the minimum level (`--quiet` hides Info)
/// 3. Debug requires `--debug-<tag>` (or global `--verbose`)
/// 4. Verbose requires `--verbose` or `--verbose-<tag>`
/// 5. If enabled_tags is non-empty, the tag must be in the set
use super::config::{get_logger_config, is_debug_enabled_for_tag, is_verbose_enabled_for_tag};
use super::levels::LogLevel;
use super::tags::LogTag;

pub fn should_log(tag: &LogTag, level: LogLevel) -> bool {
    let config = get_logger_config();

    if level == LogLevel::Error {
        return true;
    }

    if !config.enabled_tags.is_empty() && !config.enabled_tags.contains(&tag.to_debug_key()) {
        return false;
    }

    match level {
        LogLevel::Debug => config.min_level == LogLevel::Verbose || is_debug_enabled_for_tag(tag),
        LogLevel::Verbose => {
            config.min_level == LogLevel::Verbose || is_verbose_enabled_for_tag(tag)
        }
        _ => level <= config.min_level,
    }
}

pub fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    if !should_log(&tag, level) {
        return;
    }

    super::format::format_and_log(tag, level.as_str(), message);
}
