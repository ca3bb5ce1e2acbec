//! Daily log file sink.
//!
//! Lines are appended to `logs/raydium-swap_<YYYY-MM-DD>.log` under the
//! application directory. File errors never interrupt console logging.

use super::config::get_logger_config;
use crate::paths;
use chrono::Local;
use once_cell::sync::Lazy;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::sync::Mutex;

static LOG_FILE: Lazy<Mutex<Option<BufWriter<File>>>> = Lazy::new(|| Mutex::new(None));

pub fn init_file_logging() {
    if !get_logger_config().file_logging {
        return;
    }

    let dir = paths::get_logs_directory();
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }

    let path = dir.join(format!(
        "raydium-swap_{}.log",
        Local::now().format("%Y-%m-%d")
    ));

    if let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) {
        if let Ok(mut guard) = LOG_FILE.lock() {
            *guard = Some(BufWriter::new(file));
        }
    }
}

pub fn write_to_file(line: &str) {
    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(writer) = guard.as_mut() {
            let _ = writeln!(writer, "{}", line);
        }
    }
}

pub fn flush_file_logging() {
    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(writer) = guard.as_mut() {
            let _ = writer.flush();
        }
    }
}
