//! File logging for the TUI.
//!
//! The terminal belongs to ratatui while the app runs, so every log line goes
//! to a daily-rolling JSON file under the data directory. `log` macros are
//! bridged into `tracing`. Rolled files from previous days are gzipped in the
//! background.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Base name of the rolling log file.
pub const LOG_FILE_NAME: &str = "springdex.log";

/// Initialize the logging system for TUI mode.
///
/// The returned guard must be held for the lifetime of the program so the
/// non-blocking writer flushes on exit.
pub fn init_tui(data_dir: &Path) -> WorkerGuard {
    let log_dir = data_dir.join("logs");

    if !log_dir.exists() {
        if let Err(e) = fs::create_dir_all(&log_dir) {
            eprintln!("Failed to create logs directory: {}", e);
        }
    }

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(true)
        .with_filter(env_filter);

    // No stdout layer — TUI owns the terminal. try_init also installs the
    // `log` bridge.
    if let Err(e) = tracing_subscriber::registry().with(file_layer).try_init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let log_dir_clone = log_dir.clone();
    std::thread::spawn(move || {
        compress_old_logs(log_dir_clone);
    });

    log::info!(
        "Logging initialized. Writing to: {:?} (daily rolling)",
        log_dir.join(LOG_FILE_NAME)
    );

    guard
}

/// Compress rolled log files that are not today's.
fn compress_old_logs(log_dir: PathBuf) {
    let today_suffix = chrono::Local::now().format("%Y-%m-%d").to_string();

    let Ok(entries) = fs::read_dir(&log_dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if should_compress(name, &today_suffix) {
            if let Err(e) = compress_file(&path) {
                log::warn!("Failed to compress old log {:?}: {}", path, e);
            } else {
                log::info!("Compressed old log: {:?}", path);
            }
        }
    }
}

/// Rolled files look like `springdex.log.YYYY-MM-DD`.
fn should_compress(name: &str, today_suffix: &str) -> bool {
    name.starts_with(&format!("{LOG_FILE_NAME}."))
        && !name.ends_with(today_suffix)
        && !name.ends_with(".gz")
}

fn compress_file(path: &Path) -> io::Result<()> {
    let file = fs::File::open(path)?;
    let mut reader = io::BufReader::new(file);

    let mut gz_path_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No filename"))?
        .to_os_string();
    gz_path_name.push(".gz");
    let parent_dir = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No parent directory"))?;
    let gz_path = parent_dir.join(gz_path_name);

    // Skip if already exists
    if gz_path.exists() {
        return Ok(());
    }

    let output = fs::File::create(&gz_path)?;
    let mut encoder = GzEncoder::new(output, Compression::default());

    io::copy(&mut reader, &mut encoder)?;
    encoder.finish()?;

    fs::remove_file(path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_init_tui_bridges_log_macros() {
        let dir = tempfile::tempdir().unwrap();
        let _guard = init_tui(dir.path());

        assert!(dir.path().join("logs").is_dir());
        assert_ne!(log::max_level(), log::LevelFilter::Off);
    }

    #[test]
    fn test_should_compress() {
        assert!(should_compress("springdex.log.2026-01-01", "2026-10-15"));
        assert!(!should_compress("springdex.log.2026-10-15", "2026-10-15"));
        assert!(!should_compress("springdex.log.2026-01-01.gz", "2026-10-15"));
        assert!(!should_compress("other.log.2026-01-01", "2026-10-15"));
    }

    #[test]
    fn test_compress_file_replaces_original() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("springdex.log.2026-01-01");
        fs::write(&path, "line one\nline two\n").unwrap();

        compress_file(&path).unwrap();

        assert!(!path.exists());
        let gz = dir.path().join("springdex.log.2026-01-01.gz");
        let mut decoder = flate2::read::GzDecoder::new(fs::File::open(gz).unwrap());
        let mut contents = String::new();
        decoder.read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "line one\nline two\n");
    }
}
