//! Diagnostic logging for the crate's own plumbing.
//!
//! Dropped writes and dump-file persistence are traced, not printed: the
//! whole point of this crate is that user-facing text goes through [`crate::Ui`],
//! so internal diagnostics stay on `tracing` where embedding tools can route
//! or silence them.
//!
//! Quiet (`warn`) by default; `RUST_LOG` overrides at runtime:
//! ```bash
//! RUST_LOG=consio=trace mytool build
//! ```

use std::sync::Once;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: Once = Once::new();

/// Compact time format: HH:MM:SS.mmm
struct CompactTime;

impl FormatTime for CompactTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S%.3f"))
    }
}

/// Initialize the subscriber. Call once at startup; later calls are no-ops.
/// Host applications that install their own subscriber should skip this.
pub fn init() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_timer(CompactTime)
            .with_level(true)
            .with_writer(std::io::stderr)
            .with_filter(filter);

        tracing_subscriber::registry().with(fmt_layer).init();
    });
}
