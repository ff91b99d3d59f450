use raylib::prelude::TraceLogLevel;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or ignored. Other crates (the file
/// dialog portal in particular) stay at `warn`.
fn default_directives(debug: bool) -> String {
    let level = if debug { "debug" } else { "info" };
    format!("warn,{}={}", env!("CARGO_CRATE_NAME"), level)
}

/// Initialise logging. Without `--debug` the filter is pinned; with it
/// `RUST_LOG` may override the default.
pub fn init(debug: bool) {
    let directives = default_directives(debug);

    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directives))
    } else {
        EnvFilter::new(&directives)
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

/// raylib's own console output, kept to errors unless debugging.
pub fn raylib_trace_level(debug: bool) -> TraceLogLevel {
    if debug {
        TraceLogLevel::LOG_INFO
    } else {
        TraceLogLevel::LOG_ERROR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_level_follows_debug_flag() {
        assert_eq!(default_directives(false), "warn,screenfloat=info");
        assert_eq!(default_directives(true), "warn,screenfloat=debug");
    }

    #[test]
    fn raylib_is_quiet_unless_debugging() {
        assert!(matches!(raylib_trace_level(false), TraceLogLevel::LOG_ERROR));
        assert!(matches!(raylib_trace_level(true), TraceLogLevel::LOG_INFO));
    }
}
