//! Logging setup
//!
//! Library code only emits `tracing` events; binaries and on-device tests
//! install a subscriber with one of these functions.

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "gl_smoke=info,gl_smoke_glow=info,warn";

/// Initialize a fmt subscriber honoring `RUST_LOG`
#[cfg(feature = "subscriber")]
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    // A test binary may already have installed one
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

/// Initialize a fmt subscriber with an explicit filter, e.g. `"gl_smoke=debug"`
#[cfg(feature = "subscriber")]
pub fn init_tracing_with_filter(filter: &str) {
    use tracing_subscriber::{EnvFilter, fmt};

    let _ = fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

#[cfg(not(feature = "subscriber"))]
pub fn init_tracing() {
    eprintln!("Warning: subscriber feature not enabled, logging disabled");
}

#[cfg(not(feature = "subscriber"))]
pub fn init_tracing_with_filter(_filter: &str) {
    eprintln!("Warning: subscriber feature not enabled, logging disabled");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init_tracing_with_filter("gl_smoke=trace");
        init_tracing();
        tracing::debug!("subscriber installed");
    }
}
