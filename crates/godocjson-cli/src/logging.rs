//! Log output setup
//!
//! Logs always go to stderr so stdout carries nothing but JSON.

use std::io;

use tracing_subscriber::EnvFilter;

/// Level used when neither `RUST_LOG` nor a flag says otherwise
const DEFAULT_DIRECTIVE: &str = "warn";

/// Install the global subscriber
///
/// `-q` and `-v`/`-vv` take precedence over `RUST_LOG`.
pub fn init(verbose: u8, quiet: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(filter(verbose, quiet))
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn filter(verbose: u8, quiet: bool) -> EnvFilter {
    match (quiet, verbose) {
        (true, _) => EnvFilter::new("off"),
        (false, 0) => {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
        }
        (false, 1) => EnvFilter::new("debug"),
        (false, _) => EnvFilter::new("trace"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_env() {
        assert_eq!(filter(0, true).to_string(), "off");
        assert_eq!(filter(1, false).to_string(), "debug");
        assert_eq!(filter(3, false).to_string(), "trace");
    }
}
