//! CLI argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::config::SiteConfig;

/// Generates openHAB Modbus things/items files and InfluxDB Flux tasks.
#[derive(Parser, Debug, Clone)]
#[command(name = "regmap")]
#[command(version)]
pub struct Args {
    /// Path to the site configuration file (JSON5 format).
    #[arg(short, long, default_value = "site.json5")]
    pub config: PathBuf,

    /// Override the openHAB configuration directory.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Override the maximum poller length, in registers.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_poller_len: Option<u32>,

    /// Skip Flux tasks entirely: no task is rendered or written. Tasks are
    /// never uploaded; load the written scripts into InfluxDB separately.
    #[arg(short = 't', long)]
    pub no_tasks: bool,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Args {
    /// Apply command line overrides to a loaded configuration.
    pub fn apply(&self, config: &mut SiteConfig) {
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(len) = self.max_poller_len {
            config.max_poller_len = len;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["regmap"]).unwrap();

        assert_eq!(args.config, PathBuf::from("site.json5"));
        assert_eq!(args.output_dir, None);
        assert!(!args.no_tasks);
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "regmap",
            "-c",
            "plant.json5",
            "--output-dir",
            "out",
            "--max-poller-len",
            "60",
            "-t",
            "--log-level",
            "debug",
        ])
        .unwrap();

        let mut config = SiteConfig::parse("{ files: [] }").unwrap();
        args.apply(&mut config);

        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.max_poller_len, 60);
        assert!(args.no_tasks);
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_zero_poller_len_rejected() {
        assert!(Args::try_parse_from(["regmap", "--max-poller-len", "0"]).is_err());
    }

    #[test]
    fn test_no_tasks_help_describes_skipping() {
        let command = Args::command();
        let arg = command
            .get_arguments()
            .find(|arg| arg.get_id() == "no_tasks")
            .unwrap();

        assert_eq!(arg.get_short(), Some('t'));
        let help = arg.get_help().unwrap().to_string();
        assert!(help.contains("no task is rendered or written"));

        let args = Args::try_parse_from(["regmap", "-t"]).unwrap();
        assert!(args.no_tasks);
    }
}
