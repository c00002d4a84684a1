//! One generation run, from a loaded configuration to files on disk.

use std::path::PathBuf;

use anyhow::{Context, Result};
use regmap_catalog::KindRegistry;
use regmap_influx::TaskGenerator;
use regmap_openhab::{Generator, Partitioner, SitePlan};
use tracing::info;

use crate::config::SiteConfig;

/// Paths written by a run.
#[derive(Debug, Default)]
pub struct Summary {
    /// openHAB things and items files
    pub files: Vec<PathBuf>,
    /// Flux task scripts
    pub tasks: Vec<PathBuf>,
}

/// Runs the generator over a site configuration.
///
/// Everything is rendered in memory first; files are only opened once
/// rendering succeeded. Flux tasks are rendered after the openHAB files and
/// see the same resolved names.
#[derive(Debug)]
pub struct Runner<'a> {
    config: &'a SiteConfig,
    registry: &'a KindRegistry,
    tasks: bool,
}

impl<'a> Runner<'a> {
    pub fn new(config: &'a SiteConfig, registry: &'a KindRegistry) -> Self {
        Self {
            config,
            registry,
            tasks: true,
        }
    }

    /// Enable or disable Flux task generation.
    pub fn with_tasks(mut self, tasks: bool) -> Self {
        self.tasks = tasks;
        self
    }

    pub fn run(&self) -> Result<Summary> {
        let files = self
            .config
            .file_groups(self.registry)
            .context("Invalid site configuration")?;
        let site = SitePlan::resolve(&files);

        let generator = Generator::new(Partitioner::new(self.config.max_poller_len));
        let artifacts = generator.render(&site);

        let task_generator = if self.tasks {
            Some(self.task_generator()?)
        } else {
            info!("Task generation disabled");
            None
        };
        let tasks = match &task_generator {
            Some(generator) => generator.render(&site).context("Failed to render Flux tasks")?,
            None => Vec::new(),
        };

        let mut summary = Summary {
            files: regmap_openhab::write_all(&self.config.output_dir, &artifacts)
                .context("Failed to write openHAB configuration")?,
            ..Summary::default()
        };

        if task_generator.is_some() {
            summary.tasks = regmap_influx::write_all(&self.config.tasks.output_dir, &tasks)
                .context("Failed to write Flux tasks")?;
        }

        Ok(summary)
    }

    fn task_generator(&self) -> Result<TaskGenerator> {
        match &self.config.tasks.templates_dir {
            Some(dir) => TaskGenerator::from_dir(dir)
                .with_context(|| format!("Failed to load task templates from {:?}", dir)),
            None => TaskGenerator::builtin().context("Invalid built-in task templates"),
        }
    }
}
