//! Opt-in tracing setup for hosts embedding `candle-chart`.
//!
//! Layout passes emit `debug!` spans of their tick and candle counts; hosts
//! either call one of these helpers or install their own subscriber.

/// Installs a compact fmt subscriber filtered by `RUST_LOG`, falling back to `info`.
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already set.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter("info")
}

/// Like [`init_default_tracing`], with an explicit fallback directive such as
/// `"candle_chart=debug"`.
#[must_use]
pub fn init_tracing_with_filter(fallback_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_directive));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directive;
        false
    }
}
