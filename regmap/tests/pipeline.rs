//! Full runs over the sample site configuration.

use std::fs;
use std::path::{Path, PathBuf};

use regmap::{Runner, SiteConfig};
use regmap_catalog::KindRegistry;

fn sample_config(dir: &Path) -> SiteConfig {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("site.json5");
    let mut config = SiteConfig::load(path).unwrap();
    config.output_dir = dir.join("conf");
    config.tasks.output_dir = dir.join("generated");
    config
}

fn read_all(paths: &[PathBuf]) -> Vec<String> {
    paths.iter().map(|p| fs::read_to_string(p).unwrap()).collect()
}

#[test]
fn test_sample_site_generates_everything() {
    let dir = tempfile::tempdir().unwrap();
    let config = sample_config(dir.path());
    let registry = KindRegistry::builtin().unwrap();

    let summary = Runner::new(&config, &registry).run().unwrap();

    assert_eq!(summary.files.len(), 6);
    assert_eq!(summary.tasks.len(), 2);

    let things = fs::read_to_string(dir.path().join("conf/things/sol.things")).unwrap();
    assert!(things.contains(
        r#"Bridge modbus:tcp:SOL_Y3 "SOL_Y3: Inverter Bldg C 90kW (O3)" [ host="192.168.2.12", id="103" ] {"#
    ));
    assert!(things.contains(r#"Bridge modbus:tcp:SOL_Z8 "SOL_Z8: Inverter Bldg D 150kW" [ host="192.168.3.11", id="108" ] {"#));

    let items = fs::read_to_string(dir.path().join("conf/items/ev.items")).unwrap();
    assert!(items.starts_with("Group gModbus (gInfluxDB)\n\n"));
    assert!(items.contains("Group gEv_4 \"EV_4 (Station P3 04)\" <poweroutlet_eu> (gModbus,gP3) [\"PowerOutlet\"]"));

    let h2 = fs::read_to_string(dir.path().join("conf/things/h2.things")).unwrap();
    assert!(h2.contains(r#"id="1" ]"#));

    let deadman = fs::read_to_string(dir.path().join("generated/deadman.flux")).unwrap();
    assert!(deadman.contains(r#"r._measurement == "h2_1_t_ext""#));
}

#[test]
fn test_reruns_are_byte_identical() {
    let registry = KindRegistry::builtin().unwrap();

    let first_dir = tempfile::tempdir().unwrap();
    let first = Runner::new(&sample_config(first_dir.path()), &registry).run().unwrap();

    let second_dir = tempfile::tempdir().unwrap();
    let second = Runner::new(&sample_config(second_dir.path()), &registry).run().unwrap();

    assert_eq!(read_all(&first.files), read_all(&second.files));
    assert_eq!(read_all(&first.tasks), read_all(&second.tasks));
}

#[test]
fn test_no_tasks() {
    let dir = tempfile::tempdir().unwrap();
    let config = sample_config(dir.path());
    let registry = KindRegistry::builtin().unwrap();

    let summary = Runner::new(&config, &registry).with_tasks(false).run().unwrap();

    assert!(summary.tasks.is_empty());
    assert!(!dir.path().join("generated").exists());
}

#[test]
fn test_disabled_file_group() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = sample_config(dir.path());
    config.files[2].disabled = true;
    let registry = KindRegistry::builtin().unwrap();

    Runner::new(&config, &registry).with_tasks(false).run().unwrap();

    assert!(dir.path().join("conf/things/h2.things.unused").is_file());
    assert!(dir.path().join("conf/items/h2.items.unused").is_file());
    assert!(!dir.path().join("conf/things/h2.things").exists());
}

#[test]
fn test_custom_templates() {
    let dir = tempfile::tempdir().unwrap();
    let templates = dir.path().join("tasks");
    fs::create_dir_all(&templates).unwrap();
    fs::write(templates.join("count.flux"), "{{ files | length }} file groups\n").unwrap();

    let mut config = sample_config(dir.path());
    config.tasks.templates_dir = Some(templates);
    let registry = KindRegistry::builtin().unwrap();

    let summary = Runner::new(&config, &registry).run().unwrap();

    assert_eq!(summary.tasks, vec![dir.path().join("generated/count.flux")]);
    assert_eq!(fs::read_to_string(&summary.tasks[0]).unwrap(), "3 file groups\n");
}

#[test]
fn test_missing_config_file() {
    let result = SiteConfig::load("/nonexistent/site.json5");
    assert!(result.is_err());
}
