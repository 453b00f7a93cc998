//! Opt-in JSON tracing for the engine crates.
//!
//! Events from the dispatcher, engines, worker and HTTP client go to
//! `pick-trace.jsonl` in the given directory. `RUST_LOG` overrides the
//! default per-crate filter. Without the `trace` feature this is a no-op and
//! the macros compile away.

#[cfg(feature = "trace")]
use std::path::Path;
#[cfg(feature = "trace")]
use std::sync::Once;

#[cfg(feature = "trace")]
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

#[cfg(feature = "trace")]
const DEFAULT_FILTER: &str = "pick_engine=debug,pick_session=debug,pick_core=debug";

#[cfg(feature = "trace")]
static INSTALLED: Once = Once::new();

#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: &Path) {
    INSTALLED.call_once(|| {
        let appender = tracing_appender::rolling::never(log_dir, "pick-trace.jsonl");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        // Keep the writer alive until exit.
        std::mem::forget(guard);

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        tracing_subscriber::fmt()
            .json()
            .with_writer(writer)
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_env_filter(filter)
            .init();
    });
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: &std::path::Path) {}
