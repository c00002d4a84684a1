//! Consistency checks over the built-in device catalogs.

use std::collections::HashSet;

use regmap_catalog::{DeviceKind, KindRegistry};

fn property_ids(kind: &DeviceKind) -> Vec<&str> {
    kind.property_groups()
        .into_iter()
        .flat_map(|group| group.properties().iter().map(|p| p.id.as_str()))
        .collect()
}

#[test]
fn test_deadman_and_alert_fields_exist() {
    let registry = KindRegistry::builtin().unwrap();

    for name in registry.names() {
        let kind = registry.get(name).unwrap();
        let ids = property_ids(&kind);

        if let Some(deadman) = kind.deadman() {
            assert!(ids.contains(&deadman), "{}: unknown deadman property {}", name, deadman);
        }
        for alert in kind.alerts() {
            assert!(ids.contains(&alert.field()), "{}: unknown alert field {}", name, alert.field());
        }
    }
}

#[test]
fn test_property_ids_unique_per_kind() {
    let registry = KindRegistry::builtin().unwrap();

    for name in registry.names() {
        let kind = registry.get(name).unwrap();
        let ids = property_ids(&kind);
        let unique: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len(), "{}: duplicated property id", name);
    }
}

#[test]
fn test_placeholders_expanded() {
    let registry = KindRegistry::builtin().unwrap();

    for name in registry.names() {
        let kind = registry.get(name).unwrap();
        for group in kind.property_groups() {
            for property in group.properties() {
                assert!(!property.id.contains("{n}"), "{}: {}", name, property.id);
                assert!(!property.display_name.contains("{n}"), "{}: {}", name, property.display_name);
            }
        }
    }
}

#[test]
fn test_every_builtin_kind_has_properties() {
    let registry = KindRegistry::builtin().unwrap();

    for name in registry.names() {
        let kind = registry.get(name).unwrap();
        assert!(!property_ids(&kind).is_empty(), "{} has no properties", name);
    }
}
