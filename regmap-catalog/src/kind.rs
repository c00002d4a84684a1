//! Device kinds and their ancestor chains.

use std::sync::Arc;

use crate::alert::Alert;
use crate::property::PropertyGroup;

/// A device model, optionally specializing a more general parent kind.
///
/// A kind contributes its own property group, and may declare an icon,
/// category tags, a deadman property and alerts. Property groups and alerts
/// accumulate along the ancestor chain; icon, tags and deadman resolve to
/// the nearest kind that declares them.
#[derive(Debug, Clone)]
pub struct DeviceKind {
    name: String,
    parent: Option<Arc<DeviceKind>>,
    properties: Option<PropertyGroup>,
    icon: Option<String>,
    tags: Option<Vec<String>>,
    deadman: Option<String>,
    alerts: Vec<Alert>,
}

impl DeviceKind {
    /// Create a root kind.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            properties: None,
            icon: None,
            tags: None,
            deadman: None,
            alerts: Vec::new(),
        }
    }

    /// Create a kind specializing `parent`.
    pub fn extending(parent: Arc<DeviceKind>, name: impl Into<String>) -> Self {
        Self {
            parent: Some(parent),
            ..Self::new(name)
        }
    }

    pub fn with_properties(mut self, group: PropertyGroup) -> Self {
        self.properties = Some(group);
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_deadman(mut self, property_id: impl Into<String>) -> Self {
        self.deadman = Some(property_id.into());
        self
    }

    pub fn with_alert(mut self, alert: Alert) -> Self {
        self.alerts.push(alert);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&DeviceKind> {
        self.parent.as_deref()
    }

    /// Kinds from the most general ancestor down to `self`.
    pub fn chain(&self) -> Vec<&DeviceKind> {
        let mut chain = Vec::new();
        let mut current = Some(self);
        while let Some(kind) = current {
            chain.push(kind);
            current = kind.parent();
        }
        chain.reverse();
        chain
    }

    /// Property groups of the whole chain, ancestors first.
    ///
    /// Groups are concatenated as-is; duplicated property ids across the
    /// chain are left to the catalog author.
    pub fn property_groups(&self) -> Vec<&PropertyGroup> {
        self.chain()
            .into_iter()
            .filter_map(|kind| kind.properties.as_ref())
            .collect()
    }

    /// Alerts of the whole chain, ancestors first.
    pub fn alerts(&self) -> Vec<&Alert> {
        self.chain()
            .into_iter()
            .flat_map(|kind| kind.alerts.iter())
            .collect()
    }

    /// Nearest declared icon, or an empty string.
    pub fn icon(&self) -> &str {
        self.nearest(|kind| kind.icon.as_deref()).unwrap_or("")
    }

    /// Nearest declared category tags.
    pub fn tags(&self) -> &[String] {
        self.nearest(|kind| kind.tags.as_deref()).unwrap_or(&[])
    }

    /// Nearest declared deadman property id.
    pub fn deadman(&self) -> Option<&str> {
        self.nearest(|kind| kind.deadman.as_deref())
    }

    fn nearest<'a, T: ?Sized>(
        &'a self,
        get: impl Fn(&'a DeviceKind) -> Option<&'a T>,
    ) -> Option<&'a T> {
        let mut current = Some(self);
        while let Some(kind) = current {
            if let Some(value) = get(kind) {
                return Some(value);
            }
            current = kind.parent();
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::Property;
    use crate::quantity::{Quantity, icon};
    use crate::value_type::F32;

    fn group(id: &str, address: u32) -> PropertyGroup {
        PropertyGroup::new(
            id,
            id,
            vec![Property::new(address, F32, icon::TEMPERATURE, "temp", "Temperature", Quantity::Temperature, "%.1f", "°C")],
        )
        .unwrap()
    }

    fn family() -> DeviceKind {
        let base = Arc::new(
            DeviceKind::new("base")
                .with_properties(group("General", 100))
                .with_deadman("temp")
                .with_alert(Alert::range("temp", -25.0, 60.0).unwrap()),
        );
        let middle = Arc::new(
            DeviceKind::extending(base, "middle")
                .with_icon("solarplant")
                .with_tags(["Inverter"]),
        );
        DeviceKind::extending(middle, "leaf")
            .with_properties(group("Electrical", 200))
            .with_alert(Alert::range("temp", None, 80.0).unwrap())
    }

    #[test]
    fn test_chain_order() {
        let leaf = family();
        let chain = leaf.chain();
        let names: Vec<&str> = chain.iter().map(|k| k.name()).collect();
        assert_eq!(names, vec!["base", "middle", "leaf"]);
    }

    #[test]
    fn test_property_groups_ancestors_first() {
        let leaf = family();
        let groups = leaf.property_groups();
        let ids: Vec<&str> = groups.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["General", "Electrical"]);
    }

    #[test]
    fn test_nearest_attributes() {
        let leaf = family();
        assert_eq!(leaf.icon(), "solarplant");
        assert_eq!(leaf.tags(), &["Inverter".to_string()]);
        assert_eq!(leaf.deadman(), Some("temp"));
        assert_eq!(leaf.alerts().len(), 2);
    }

    #[test]
    fn test_root_defaults() {
        let root = DeviceKind::new("bare");
        assert_eq!(root.icon(), "");
        assert!(root.tags().is_empty());
        assert_eq!(root.deadman(), None);
        assert!(root.property_groups().is_empty());
    }
}
