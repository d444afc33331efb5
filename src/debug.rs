//! Logging backend for glyphlab.
//!
//! Routes every `log::info!()` etc. from all workspace crates to a session
//! log file (`glyphlab_debug.log` in the temp directory). When
//! `GLYPHLAB_LOG` is set, records are mirrored to stderr as well.
//!
//! Level precedence: `--log-level` on the command line, then the
//! `GLYPHLAB_LOG` environment variable, then the `log_level` from the
//! settings file (applied once settings are loaded).

use glyphlab_config::LogLevel;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Environment variable overriding the settings-file log level.
pub const LOG_ENV_VAR: &str = "GLYPHLAB_LOG";

/// Session log file
struct DebugLogger {
    file: Option<File>,
    mirror_stderr: bool,
}

impl DebugLogger {
    fn open(mirror_stderr: bool) -> Self {
        let file = match OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(log_path())
        {
            Ok(f) => Some(f),
            // Logging must never stop a render.
            Err(_) => None,
        };
        let mut logger = DebugLogger {
            file,
            mirror_stderr,
        };
        logger.write_raw(&format!(
            "{}\nglyphlab session started at {}\n{}\n",
            "=".repeat(80),
            get_timestamp(),
            "=".repeat(80)
        ));
        logger
    }

    fn write_raw(&mut self, msg: &str) {
        if let Some(ref mut file) = self.file {
            let _ = file.write_all(msg.as_bytes());
            let _ = file.flush();
        }
    }

    fn write_record(&mut self, line: &str) {
        self.write_raw(line);
        if self.mirror_stderr {
            eprint!("{}", line);
        }
    }
}

static LOGGER: OnceLock<Mutex<DebugLogger>> = OnceLock::new();

/// Set when the level came from the CLI or environment.
static LEVEL_PINNED: AtomicBool = AtomicBool::new(false);

struct LogBridge;

static BRIDGE: LogBridge = LogBridge;

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Some(logger) = LOGGER.get() {
            let line = format_record(record.level(), record.target(), &record.args().to_string());
            logger.lock().write_record(&line);
        }
    }

    fn flush(&self) {
        if let Some(logger) = LOGGER.get()
            && let Some(ref mut file) = logger.lock().file
        {
            let _ = file.flush();
        }
    }
}

/// Path of the session log file.
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("glyphlab_debug.log")
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

fn format_record(level: log::Level, target: &str, msg: &str) -> String {
    format!(
        "[{}] [{:<5}] [{}] {}\n",
        get_timestamp(),
        level,
        target,
        msg
    )
}

/// Parse an environment level value; unknown values are ignored.
fn parse_env_level(value: &str) -> Option<LogLevel> {
    value.trim().parse().ok()
}

/// Install the log backend.
///
/// `cli_level` wins over `GLYPHLAB_LOG`; with neither, logging starts at
/// `warn` until [`apply_settings_level`] runs. Calling this twice is harmless.
pub fn init_log_bridge(cli_level: Option<LogLevel>) {
    let env_value = std::env::var(LOG_ENV_VAR).ok();
    let env_level = env_value.as_deref().and_then(parse_env_level);

    let level = match (cli_level, env_level) {
        (Some(level), _) | (None, Some(level)) => {
            LEVEL_PINNED.store(true, Ordering::Relaxed);
            level
        }
        (None, None) => LogLevel::default(),
    };

    LOGGER.get_or_init(|| Mutex::new(DebugLogger::open(env_value.is_some())));
    if log::set_logger(&BRIDGE).is_ok() {
        log::set_max_level(level.to_level_filter());
    }
}

/// Apply the level from the settings file unless the CLI or environment
/// already chose one.
pub fn apply_settings_level(level: LogLevel) {
    if !LEVEL_PINNED.load(Ordering::Relaxed) {
        log::set_max_level(level.to_level_filter());
    }
}
