//! # Structured Logging
//!
//! The codec only emits `tracing` events; installing a subscriber is the
//! embedding application's call. [`init_logging`] is a convenience for
//! binaries and benches that have no subscriber of their own.
//!
//! Output goes to stderr so stdout stays free for encoded blobs.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable output for local development.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// Accepts "json" or "pretty" (case-insensitive). Anything else is `Pretty`.
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Installs the global subscriber.
///
/// `RUST_LOG` overrides `default_level` when set, e.g.
///
/// ```text
/// RUST_LOG=ledger_codec::serializer=trace,ledger_codec=debug
/// ```
///
/// # Panics
///
/// If a global subscriber is already installed. Use [`try_init_logging`]
/// where that can happen.
pub fn init_logging(default_level: &str, format: LogFormat) {
    if let Err(err) = try_init_logging(default_level, format) {
        panic!("failed to install tracing subscriber: {err}");
    }
}

/// Like [`init_logging`], but reports an already-installed subscriber as an
/// error instead of panicking.
pub fn try_init_logging(
    default_level: &str,
    format: LogFormat,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init()?,
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr).with_target(true))
            .try_init()?,
    }

    tracing::info!(?format, "logging initialized");
    Ok(())
}
