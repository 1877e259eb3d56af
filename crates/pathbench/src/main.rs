//! PathBench — benchmark harness for external SSSP executables.

use anyhow::Result;
use pathbench_lib::{app, config};

fn main() -> Result<()> {
    let config = config::AppConfig::parse();

    // Initialize tracing; --verbose raises the default level so per-cell
    // decisions become visible without RUST_LOG.
    let default_level = if config.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .init();

    app::run(&config)
}
