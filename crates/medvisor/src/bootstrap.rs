use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use medvisor_core::settings::Settings;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Name of the per-user application directory under `$HOME`.
pub const APP_DIR_NAME: &str = ".medvisor";

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure the `~/.medvisor/` directory hierarchy exists and return its path.
///
/// Creates the following directories if absent (including any missing parents):
/// - `~/.medvisor/`
/// - `~/.medvisor/logs/`
pub fn ensure_directories() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let app_dir = home.join(APP_DIR_NAME);
    std::fs::create_dir_all(app_dir.join("logs"))?;
    Ok(app_dir)
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Where log output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Pick the log destination for `settings`.
///
/// An explicit `--log-file` always wins.  Otherwise `--json` runs log to
/// stderr (stdout carries the snapshot) and the TUI logs to
/// `<app_dir>/logs/medvisor.log` so output never lands on the alternate
/// screen.
pub fn log_target(settings: &Settings, app_dir: &Path) -> LogTarget {
    match (&settings.log_file, settings.json) {
        (Some(path), _) => LogTarget::File(path.clone()),
        (None, true) => LogTarget::Stderr,
        (None, false) => LogTarget::File(app_dir.join("logs").join("medvisor.log")),
    }
}

/// Map a `--log-level` name to an [`EnvFilter`] directive.
///
/// Unrecognised names are passed through so raw directives such as
/// `"medvisor_data=trace"` still work.
pub fn level_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" | "WARN" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        _ => log_level.to_string(),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Falls back to `"info"` if the level string is not a valid directive.
pub fn setup_logging(log_level: &str, target: &LogTarget) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(level_directive(log_level)).unwrap_or_else(|_| EnvFilter::new("info"));

    match target {
        LogTarget::Stderr => {
            let layer = fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()?;
        }
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let layer = fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()?;
        }
    }

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
