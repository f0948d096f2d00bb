use std::path::{Path, PathBuf};

#[cfg(feature = "debug-log")]
mod inner {
    use super::*;
    use std::fs;
    use tracing_appender::non_blocking::WorkerGuard;
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    const LOG_FILE_NAME: &str = "grantkit-debug.log";

    static LOG_PATH: std::sync::OnceLock<PathBuf> = std::sync::OnceLock::new();

    /// Installs a file-backed JSON subscriber capturing the permission-flow
    /// trace (resolved statuses, prompts, absorbed store failures) under
    /// `log_dir`, for hosts without their own tracing setup.
    ///
    /// Keep the returned guard alive for the life of the process; dropping it
    /// flushes the log. Returns `None` when the directory is not writable or
    /// a global subscriber is already installed.
    pub fn init(log_dir: &Path) -> Option<(PathBuf, WorkerGuard)> {
        if let Err(e) = fs::create_dir_all(log_dir) {
            eprintln!("Failed to create log directory {}: {e}", log_dir.display());
            return None;
        }
        let log_path = log_dir.join(LOG_FILE_NAME);

        let file = match fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
        {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Failed to open log file {}: {e}", log_path.display());
                return None;
            }
        };

        let (non_blocking, guard) = tracing_appender::non_blocking(file);

        // Only this crate's events by default; RUST_LOG widens the net.
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("grantkit=debug"));

        let subscriber = tracing_subscriber::registry().with(filter).with(
            fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_target(true),
        );

        if tracing::subscriber::set_global_default(subscriber).is_err() {
            eprintln!("Failed to set tracing subscriber");
            return None;
        }

        LOG_PATH.set(log_path.clone()).ok();

        tracing::debug!(path = %log_path.display(), "Permission debug log opened");

        Some((log_path, guard))
    }

    pub fn log_file_path() -> Option<&'static PathBuf> {
        LOG_PATH.get()
    }
}

#[cfg(not(feature = "debug-log"))]
mod inner {
    use super::*;

    #[inline(always)]
    pub fn init(_log_dir: &Path) -> Option<(PathBuf, ())> {
        None
    }

    #[inline(always)]
    pub fn log_file_path() -> Option<&'static PathBuf> {
        None
    }
}

pub use inner::*;
