//! Logging setup for the `dca_viz` binaries.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the host. `init_default_tracing` is the one-call setup the bundled
//! binaries use.

/// Default filter when `RUST_LOG` is unset: crate events at `info`, other
/// crates (gtk, glib) at `warn`.
pub const DEFAULT_LOG_DIRECTIVES: &str = "warn,dca_viz=info";

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`, falling back
/// to [`DEFAULT_LOG_DIRECTIVES`].
///
/// Returns `false` without the `telemetry` feature, or when the host already
/// installed a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_fallback(DEFAULT_LOG_DIRECTIVES)
}

/// Same as [`init_default_tracing`] with a caller-chosen fallback filter.
#[must_use]
pub fn init_tracing_with_fallback(fallback_directives: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(fallback_directives))
            .unwrap_or_else(|_| EnvFilter::new("info"));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directives;
        false
    }
}
