//! Tracing setup.
//!
//! Human-facing output goes to stdout; diagnostics go to stderr and to a
//! daily log file under the config directory.

use leadgen_infrastructure::LeadgenPaths;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::GlobalArgs;

const DEFAULT_FILTER: &str = "warn,leadgen=info";
const LOG_FILE_PREFIX: &str = "leadgen.log";

/// Installs the global subscriber. `RUST_LOG` overrides the default filter.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the life of the process. No file is written in ephemeral mode or when
/// the log directory cannot be determined.
pub fn init(global: &GlobalArgs) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let log_dir = if global.ephemeral {
        None
    } else {
        LeadgenPaths::new().logs_dir().ok()
    };

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = fmt::layer().with_writer(writer).with_ansi(false);

            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(file_layer)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .init();
            None
        }
    }
}
