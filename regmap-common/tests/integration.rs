//! Integration tests for regmap-common library.

use std::io::Write;

use serde::Deserialize;
use regmap_common::{Error, LogFormat, LoggingConfig, load_config};

#[derive(Debug, Deserialize)]
struct SampleConfig {
    output_dir: String,
    #[serde(default)]
    logging: LoggingConfig,
}

#[test]
fn test_load_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            // comments are allowed in JSON5
            output_dir: "conf",
            logging: {{ level: "warn", format: "json" }},
        }}"#
    )
    .unwrap();

    let config: SampleConfig = load_config(file.path()).unwrap();

    assert_eq!(config.output_dir, "conf");
    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
fn test_load_config_missing_file() {
    let result: regmap_common::Result<SampleConfig> = load_config("/nonexistent/site.json5");

    match result {
        Err(Error::Config(msg)) => assert!(msg.contains("/nonexistent/site.json5")),
        other => panic!("Expected config error, got {:?}", other),
    }
}

#[test]
fn test_load_config_reports_path_on_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ output_dir: ").unwrap();

    let result: regmap_common::Result<SampleConfig> = load_config(file.path());
    let msg = result.unwrap_err().to_string();

    assert!(msg.contains("Failed to parse config file"));
}

#[test]
fn test_init_tracing_only_once() {
    let config = LoggingConfig::default();

    regmap_common::init_tracing(&config).unwrap();
    tracing::info!("subscriber installed");

    assert!(matches!(
        regmap_common::init_tracing(&config),
        Err(Error::Logging(_))
    ));
}
