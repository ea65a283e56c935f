//! Telemetry helpers for applications embedding `forecast-sketch`.
//!
//! The capture engine only emits `tracing` events; installing a subscriber is
//! left to the host. `init_default_tracing` is a convenience for demos and
//! tests that want readable output without wiring filters themselves.
//!
//! At the default `info` level a host sees one line per finished forecast:
//! `capture completed`, `forecast submitted` and `prediction stored`, plus
//! `warn` for deletes of unknown predictions. Gesture starts, discards, resets
//! and resizes are `debug`; per-sample records and drops are `trace`. Use
//! `RUST_LOG=forecast_sketch=trace` to follow a gesture point by point.

/// Initializes a default `tracing` subscriber when the `telemetry` feature is enabled.
///
/// Returns `true` when initialization succeeds.
/// Returns `false` when no initialization is performed (feature disabled) or if a
/// global subscriber was already set by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_target(true)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
