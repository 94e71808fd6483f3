//! Logging system initialization
//!
//! Sets up tracing-based logging with file output to `<config dir>/pullcord.log`
//! and rotates the previous sessions' logs on startup, keeping 9 historical files.

use crate::config::ConfigManager;
use crate::error::{PullcordError, Result, StringError};
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt};

/// Maximum number of historical log files to keep (pullcord.log.1 through pullcord.log.9)
const MAX_LOG_FILES: u8 = 9;

/// Base name of the active log file
const LOG_PREFIX: &str = "pullcord";

/// Initialize the logging system
///
/// Log level defaults to INFO but can be configured via `RUST_LOG` environment variable.
pub fn init_logging() -> Result<()> {
    let log_dir = ConfigManager::ensure_config_dir()?;

    let log_path = log_dir.join(format!("{LOG_PREFIX}.log"));
    rotate_logs_on_startup(&log_path)?;

    // Rotation is handled above, once per session
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix("log")
        .build(&log_dir)
        .map_err(|e| PullcordError::ConfigError(Box::new(e)))?;

    let subscriber = fmt()
        .with_writer(file_appender)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| PullcordError::ConfigError(Box::new(e)))?;

    tracing::info!(
        "pullcord v{} started, logging to {}",
        env!("CARGO_PKG_VERSION"),
        log_dir.display()
    );

    Ok(())
}

/// Shift `pullcord.log` to `pullcord.log.1`, `.1` to `.2` and so on
///
/// The file at `.9` is deleted. Runs on every startup regardless of size so
/// each session keeps its own file.
fn rotate_logs_on_startup(log_path: &Path) -> Result<()> {
    if !log_path.exists() {
        return Ok(());
    }

    let log_dir = log_path
        .parent()
        .ok_or_else(|| PullcordError::ConfigError(StringError::new("Invalid log path")))?;
    let log_name = log_path
        .file_name()
        .ok_or_else(|| PullcordError::ConfigError(StringError::new("Invalid log filename")))?
        .to_string_lossy();

    let oldest_log = log_dir.join(format!("{log_name}.{MAX_LOG_FILES}"));
    if oldest_log.exists() {
        std::fs::remove_file(&oldest_log)?;
    }

    for i in (1..MAX_LOG_FILES).rev() {
        let current_log = log_dir.join(format!("{log_name}.{i}"));
        if current_log.exists() {
            std::fs::rename(&current_log, log_dir.join(format!("{log_name}.{}", i + 1)))?;
        }
    }

    std::fs::rename(log_path, log_dir.join(format!("{log_name}.1")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_dir;
    use std::fs;

    fn write_log(path: &Path, content: &str) {
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_rotate_moves_current_log() {
        let dir = create_test_dir();
        let log_path = dir.path().join("pullcord.log");
        write_log(&log_path, "Session 1");

        rotate_logs_on_startup(&log_path).unwrap();

        let log_1 = dir.path().join("pullcord.log.1");
        assert!(!log_path.exists());
        assert_eq!(fs::read_to_string(log_1).unwrap(), "Session 1");
    }

    #[test]
    fn test_rotate_keeps_session_order() {
        let dir = create_test_dir();
        let log_path = dir.path().join("pullcord.log");

        for i in 1..=5 {
            write_log(&log_path, &format!("Session {i}"));
            rotate_logs_on_startup(&log_path).unwrap();
        }

        for i in 1..=5 {
            let content = fs::read_to_string(dir.path().join(format!("pullcord.log.{i}"))).unwrap();
            assert_eq!(content, format!("Session {}", 6 - i));
        }
    }

    #[test]
    fn test_rotate_respects_max_files() {
        let dir = create_test_dir();
        let log_path = dir.path().join("pullcord.log");

        for i in 1..=12 {
            write_log(&log_path, &format!("Session {i}"));
            rotate_logs_on_startup(&log_path).unwrap();
        }

        for i in 1..=MAX_LOG_FILES {
            assert!(dir.path().join(format!("pullcord.log.{i}")).exists());
        }
        assert!(!dir.path().join("pullcord.log.10").exists());
        assert_eq!(
            fs::read_to_string(dir.path().join("pullcord.log.9")).unwrap(),
            "Session 4"
        );
    }

    #[test]
    fn test_rotate_without_existing_log() {
        let dir = create_test_dir();
        let log_path = dir.path().join("pullcord.log");

        assert!(rotate_logs_on_startup(&log_path).is_ok());
        assert!(!dir.path().join("pullcord.log.1").exists());
    }

    #[test]
    fn test_rotate_with_gaps_in_history() {
        let dir = create_test_dir();
        let log_path = dir.path().join("pullcord.log");
        write_log(&log_path, "Current");
        write_log(&dir.path().join("pullcord.log.1"), "Previous");
        write_log(&dir.path().join("pullcord.log.5"), "Old");

        rotate_logs_on_startup(&log_path).unwrap();

        let read = |n: u8| fs::read_to_string(dir.path().join(format!("pullcord.log.{n}"))).unwrap();
        assert_eq!(read(1), "Current");
        assert_eq!(read(2), "Previous");
        assert_eq!(read(6), "Old");
        assert!(!dir.path().join("pullcord.log.5").exists());
    }
}
