//! Logging setup

use crate::config::Verbosity;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
///
/// Progress lines from the selection run (`Searching page N`, ...) are
/// `info`, so the library stays at `info` unless `-q` or `-vv` is given.
#[must_use]
pub fn default_filter(verbosity: Verbosity) -> String {
    let level = verbosity.log_filter();
    let shopwalk = match verbosity {
        Verbosity::Quiet => "error",
        Verbosity::Normal | Verbosity::Verbose => "info",
        Verbosity::Debug => "debug",
    };
    format!("{level},shopwalk={shopwalk}")
}

/// Install the global subscriber writing compact logs to stderr.
///
/// `RUST_LOG` overrides the level chosen by `-v`/`-q`. Calling this twice is
/// a no-op.
pub fn init_logging(verbosity: Verbosity) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    let stderr = std::io::stderr.with_max_level(tracing::Level::TRACE);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(stderr)
        .with_target(verbosity == Verbosity::Debug)
        .with_level(true)
        .compact()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(Verbosity::Normal), "warn,shopwalk=info");
        assert_eq!(default_filter(Verbosity::Quiet), "error,shopwalk=error");
        assert_eq!(default_filter(Verbosity::Debug), "debug,shopwalk=debug");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging(Verbosity::Quiet);
        init_logging(Verbosity::Debug);
    }
}
