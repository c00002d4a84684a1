//! Generates openHAB Modbus configuration and InfluxDB Flux tasks.

use anyhow::{Context, Result};
use clap::Parser;
use regmap::{Args, Runner, SiteConfig};
use regmap_catalog::KindRegistry;
use tracing::info;

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = SiteConfig::load(&args.config)
        .with_context(|| format!("Failed to load config from {:?}", args.config))?;
    args.apply(&mut config);

    // Initialize logging
    let log_config = config.logging.with_level_override(args.log_level.as_deref());
    regmap_common::init_tracing(&log_config).context("Failed to init tracing")?;

    info!(config = %args.config.display(), "Starting regmap");

    let registry = KindRegistry::builtin().context("Invalid built-in device catalog")?;

    let summary = Runner::new(&config, &registry)
        .with_tasks(!args.no_tasks)
        .run()?;

    info!(
        files = summary.files.len(),
        tasks = summary.tasks.len(),
        output_dir = %config.output_dir.display(),
        "Generation complete"
    );

    Ok(())
}
