//! Diagnostic logging setup
//!
//! The engine only emits `tracing` events; installing a subscriber is up to
//! the host. Native hosts (tests, demos, tools embedding the engine) can use
//! [`init`] or [`init_with_format`].
//!
//! `RUST_LOG` takes precedence over the filter passed in:
//!
//! ```bash
//! RUST_LOG=desk_calculator=trace cargo run --example keypad_session
//! ```

use std::sync::Once;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: Once = Once::new();

/// Output format of the installed subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Installs a text subscriber with the given filter (e.g. `"desk_calculator=debug"`).
///
/// Only the first call takes effect.
pub fn init(filter: &str) {
    init_with_format(filter, LogFormat::Text);
}

/// Installs a subscriber with the given filter and format.
///
/// Only the first call takes effect. Does nothing if another global
/// subscriber is already set.
pub fn init_with_format(filter: &str, format: LogFormat) {
    INIT.call_once(|| {
        let filter = build_filter(filter, std::env::var("RUST_LOG").ok().as_deref());
        let layer = match format {
            LogFormat::Text => tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_filter(filter)
                .boxed(),
            LogFormat::Json => tracing_subscriber::fmt::layer()
                .json()
                .with_filter(filter)
                .boxed(),
        };
        // another subscriber may already be installed by the host
        let _ = tracing_subscriber::registry().with(layer).try_init();
    });
}

/// `RUST_LOG` wins when set and parseable; otherwise the given filter, and
/// `warn` if that does not parse either
fn build_filter(filter: &str, env: Option<&str>) -> EnvFilter {
    env.and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_new(filter).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}
