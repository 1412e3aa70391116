//! Tracing setup for hosts embedding the chart core.
//!
//! Nothing is initialized implicitly: the host either calls
//! [`init_default_tracing`] or installs its own subscriber and filters.

/// Installs a compact, env-filtered `tracing` subscriber.
///
/// The filter directive comes from `CHARTKIT_LOG` when set, falling back to
/// `RUST_LOG`, falling back to `chartkit=info`. Returns `false` when the
/// `telemetry` feature is disabled or a global subscriber is already
/// installed by the host.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = std::env::var("CHARTKIT_LOG")
            .map(EnvFilter::new)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("chartkit=info"));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
