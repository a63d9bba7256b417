//! Log output for the CLI
//!
//! Library resolution events go through `tracing`; this installs the
//! subscriber that writes them to stderr. `RUST_LOG` overrides the level
//! derived from `-v`/`-q`.

use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

/// Filter from `RUST_LOG`, falling back to the configured verbosity
#[must_use]
pub fn env_filter(config: &CliConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.verbosity.filter_directive()))
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(config: &CliConfig) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::io::stderr)
        .with_ansi(config.color.should_color_stderr())
        .with_target(config.verbosity.is_debug())
        .try_init();
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::{ColorChoice, Verbosity};

    #[test]
    fn test_init_twice_is_harmless() {
        let config = CliConfig::new()
            .with_verbosity(Verbosity::Quiet)
            .with_color(ColorChoice::Never);
        init(&config);
        init(&config);
        tracing::debug!("not shown at quiet level");
    }
}
