//! Lookup of device kinds by name.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::devices::{bluelog, evlink, powidian};
use crate::error::{CatalogError, Result};
use crate::kind::DeviceKind;

/// Device kinds addressable by name from a site configuration.
#[derive(Debug, Clone, Default)]
pub struct KindRegistry {
    kinds: BTreeMap<String, Arc<DeviceKind>>,
}

impl KindRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in catalog.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        registry.register(bluelog::inverter()?);
        registry.register(bluelog::sensor()?);
        registry.register(evlink::evlink_pro()?);
        registry.register(powidian::powidian_h2()?);

        debug!(kinds = registry.kinds.len(), "Registered built-in device kinds");
        Ok(registry)
    }

    /// Register a kind under its own name, replacing any previous one.
    pub fn register(&mut self, kind: Arc<DeviceKind>) {
        self.kinds.insert(kind.name().to_string(), kind);
    }

    pub fn get(&self, name: &str) -> Result<Arc<DeviceKind>> {
        self.kinds
            .get(name)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownKind(name.to_string()))
    }

    /// Registered kind names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.kinds.keys().map(String::as_str)
    }
}
