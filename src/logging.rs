use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming a log file.
pub const LOG_ENV: &str = "NEWTCA_LOG";

/// Initialize tracing.
///
/// Logs go to the file named by `NEWTCA_LOG` when set, otherwise to stderr
/// so they never interleave with the state dumps on stdout. The level comes
/// from `RUST_LOG` and defaults to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Ok(log_path) = std::env::var(LOG_ENV) {
        match std::fs::File::create(&log_path) {
            Ok(file) => {
                let file_layer = fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .with_timer(UtcTime::rfc_3339())
                    .with_target(true)
                    .with_level(true);
                tracing_subscriber::registry()
                    .with(filter)
                    .with(file_layer)
                    .init();
                return;
            }
            Err(e) => eprintln!("Warning: Failed to create log file {log_path}: {e}"),
        }
    }

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false);
    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .init();
}
