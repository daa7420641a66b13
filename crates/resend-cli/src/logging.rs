//! Diagnostic logging for the CLI.
//!
//! Stdout is reserved for the result envelope, so the subscriber writes to
//! stderr and stays quiet unless `RESEND_LOG` asks for more.

use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding the log filter directive.
pub(crate) const LOG_FILTER_ENV: &str = "RESEND_LOG";
/// Filter used when `RESEND_LOG` is unset or invalid.
pub(crate) const DEFAULT_LOG_LEVEL: &str = "warn";

/// Install the global subscriber. A second call is a no-op.
pub(crate) fn init_logging() {
    let filter = build_env_filter(std::env::var(LOG_FILTER_ENV).ok().as_deref());
    let installed = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

fn build_env_filter(directive: Option<&str>) -> EnvFilter {
    directive
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_default_level() {
        assert_eq!(build_env_filter(None).to_string(), DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn honours_explicit_directive() {
        assert_eq!(build_env_filter(Some("debug")).to_string(), "debug");
    }

    #[test]
    fn init_is_idempotent() {
        init_logging();
        init_logging();
    }
}
