//! Logging setup
//!
//! Structured logging through `tracing`. The filter comes from the CLI first, then
//! from the `VFS_SHELL_LOG` environment variable, and defaults to `warn`.

use anyhow::Context;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the default log filter.
pub const LOG_ENV: &str = "VFS_SHELL_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Picks the filter directives: a non-empty `cli` value wins over a non-empty `env`
/// value, which wins over the default.
fn directives(cli: Option<&str>, env: Option<String>) -> String {
    match cli {
        Some(filter) if !filter.is_empty() => filter.to_string(),
        _ => env
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string()),
    }
}

/// Builds the log filter from `cli`, then `VFS_SHELL_LOG`, then the default.
pub fn build_env_filter(cli: Option<&str>) -> anyhow::Result<EnvFilter> {
    let directives = directives(cli, std::env::var(LOG_ENV).ok());
    EnvFilter::try_new(&directives).with_context(|| format!("invalid log filter {directives:?}"))
}

/// Installs the global subscriber writing to stderr.
pub fn init_logging(cli: Option<&str>) -> anyhow::Result<()> {
    let filter = build_env_filter(cli)?;
    Registry::default()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .try_init()
        .context("failed to install the log subscriber")
}
