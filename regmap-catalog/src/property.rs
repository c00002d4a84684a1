//! Properties, property groups and the helpers used to declare them.

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};
use crate::quantity::{Quantity, platform_unit};
use crate::value_type::ValueType;

/// Placeholder substituted with the 1-based index by [`repeat`].
pub const INDEX_PLACEHOLDER: &str = "{n}";

/// A single named, typed, addressed measurement point on a device.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Register address, before any group or device offset.
    pub address: u32,
    pub value_type: ValueType,
    pub icon: String,
    /// Short identifier, unique within a device.
    pub id: String,
    pub display_name: String,
    pub quantity: Option<Quantity>,
    /// printf-style format, e.g. `%.1f`.
    pub format: String,
    pub unit: Option<String>,
}

impl Property {
    /// Declare a property in catalog table order.
    ///
    /// ```
    /// use regmap_catalog::property::Property;
    /// use regmap_catalog::quantity::{Quantity, icon};
    /// use regmap_catalog::value_type::F32;
    ///
    /// let temp = Property::new(40580, F32, icon::TEMPERATURE, "temp", "Temperature",
    ///     Quantity::Temperature, "%.1f", "°C");
    /// assert_eq!(temp.format_string(), "%.1f °C");
    /// ```
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        address: u32,
        value_type: ValueType,
        icon: &str,
        id: &str,
        display_name: &str,
        quantity: impl Into<Option<Quantity>>,
        format: &str,
        unit: impl Into<Option<&'static str>>,
    ) -> Self {
        Self {
            address,
            value_type,
            icon: icon.to_string(),
            id: id.to_string(),
            display_name: display_name.to_string(),
            quantity: quantity.into(),
            format: format.to_string(),
            unit: unit.into().filter(|u| !u.is_empty()).map(str::to_string),
        }
    }

    /// Size in registers.
    pub fn size(&self) -> u32 {
        self.value_type.size
    }

    /// First address past this property.
    pub fn end(&self) -> u32 {
        self.address + self.size()
    }

    /// Display format with the unit appended, e.g. `%.1f °C`.
    pub fn format_string(&self) -> String {
        match &self.unit {
            Some(unit) => format!("{} {}", self.format, unit),
            None => self.format.clone(),
        }
    }

    /// Gain applied by the platform profile, e.g. `0.1 °C` for a scale of 10.
    ///
    /// The unit goes through [`platform_unit`] since the profile parses it.
    pub fn gain_string(&self) -> String {
        let gain = format!("{:?}", self.value_type.gain());
        match &self.unit {
            Some(unit) => format!("{} {}", gain, platform_unit(unit)),
            None => gain,
        }
    }
}

/// Read function used to poll a group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PollKind {
    /// Discrete output coils (read/write, 1-bit)
    Coil,
    /// Discrete input contacts (read-only, 1-bit)
    Discrete,
    /// Holding registers (read/write, 16-bit)
    #[default]
    Holding,
    /// Input registers (read-only, 16-bit)
    Input,
}

impl PollKind {
    /// Return the string name for this poll kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            PollKind::Coil => "coil",
            PollKind::Discrete => "discrete",
            PollKind::Holding => "holding",
            PollKind::Input => "input",
        }
    }
}

impl std::fmt::Display for PollKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Offset added to every register number of a group unless overridden.
pub const DEFAULT_GROUP_OFFSET: u32 = 1;

/// A named, ordered set of properties sharing a poll kind and address offset.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyGroup {
    pub id: String,
    pub display_name: String,
    properties: Vec<Property>,
    pub poll_kind: PollKind,
    /// Added to each property address when resolving the register number.
    pub offset: u32,
}

impl PropertyGroup {
    /// Create a holding-register group with the default offset.
    ///
    /// Fails if addresses are not strictly ascending.
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        properties: impl IntoIterator<Item = Property>,
    ) -> Result<Self> {
        let id = id.into();
        let properties: Vec<Property> = properties.into_iter().collect();

        for pair in properties.windows(2) {
            if pair[1].address <= pair[0].address {
                return Err(CatalogError::UnorderedAddress {
                    group: id,
                    property: pair[1].id.clone(),
                    address: pair[1].address,
                    previous: pair[0].address,
                });
            }
        }

        Ok(Self {
            id,
            display_name: display_name.into(),
            properties,
            poll_kind: PollKind::default(),
            offset: DEFAULT_GROUP_OFFSET,
        })
    }

    pub fn with_poll_kind(mut self, poll_kind: PollKind) -> Self {
        self.poll_kind = poll_kind;
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }
}

/// Repeat a block of templates `count` times.
///
/// Copy `i` (1-based) shifts every address by `(i - 1)` block sizes and
/// replaces `{n}` in ids and display names with `i`.
pub fn repeat(count: u32, templates: &[Property]) -> Vec<Property> {
    let block_size: u32 = templates.iter().map(Property::size).sum();

    (0..count)
        .flat_map(|i| {
            let index = (i + 1).to_string();
            templates.iter().map(move |template| Property {
                address: template.address + i * block_size,
                id: template.id.replace(INDEX_PLACEHOLDER, &index),
                display_name: template.display_name.replace(INDEX_PLACEHOLDER, &index),
                ..template.clone()
            })
        })
        .collect()
}

/// Prefix ids with `"{id}_"` and display names with `name`.
pub fn prefixed(id: &str, name: &str, templates: &[Property]) -> Vec<Property> {
    let id_prefix = if id.is_empty() {
        String::new()
    } else {
        format!("{}_", id)
    };

    templates
        .iter()
        .map(|template| Property {
            id: format!("{}{}", id_prefix, template.id),
            display_name: format!("{}{}", name, template.display_name),
            ..template.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantity::icon;
    use crate::value_type::{F32, U16};

    fn power(address: u32) -> Property {
        Property::new(address, F32, icon::ENERGY, "p{n}", "Power phase {n}", Quantity::Power, "%.1f", "W")
    }

    #[test]
    fn test_repeat_shifts_addresses() {
        let props = repeat(3, &[power(41016)]);

        let addresses: Vec<u32> = props.iter().map(|p| p.address).collect();
        assert_eq!(addresses, vec![41016, 41018, 41020]);
        assert_eq!(props[2].id, "p3");
        assert_eq!(props[2].display_name, "Power phase 3");
    }

    #[test]
    fn test_repeat_interleaves_block() {
        let current = Property::new(41102, F32, icon::ENERGY, "i{n}", "Current {n}", Quantity::ElectricCurrent, "%.1f", "A");
        let props = repeat(2, &[power(41100), current]);

        let ids: Vec<&str> = props.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "i1", "p2", "i2"]);
        assert_eq!(props[3].address, 41106);
    }

    #[test]
    fn test_prefixed() {
        let props = prefixed("el1", "Electrolyzer 1: ", &[power(1041)]);

        assert_eq!(props[0].id, "el1_p{n}");
        assert_eq!(props[0].display_name, "Electrolyzer 1: Power phase {n}");
        assert_eq!(prefixed("", "", &[power(1)])[0].id, "p{n}");
    }

    #[test]
    fn test_gain_string() {
        let level = Property::new(1030, U16.with_null(65535).with_scale(10.0), icon::ENERGY,
            "rate", "Rate", Quantity::VolumetricFlowRate, "%.1f", "NL/h");
        assert_eq!(level.gain_string(), "0.1 l/h");

        let energy = Property::new(1010, U16.with_scale(100.0), icon::ENERGY,
            "cap", "Capacity", Quantity::Energy, "%.1f", "kWh");
        assert_eq!(energy.gain_string(), "0.01 kWh");

        let plain = Property::new(1, U16, icon::ENERGY, "state", "State", None, "%d", None);
        assert_eq!(plain.gain_string(), "1.0");
        assert_eq!(plain.format_string(), "%d");
    }

    #[test]
    fn test_empty_unit_is_absent() {
        let prop = Property::new(42006, F32, "rain", "e_precip", "Precipitation type", None, "%.1f", "");
        assert_eq!(prop.unit, None);
        assert_eq!(prop.format_string(), "%.1f");
    }

    #[test]
    fn test_group_rejects_unordered_addresses() {
        let result = PropertyGroup::new("G", "G", vec![power(10), power(8)]);
        assert!(matches!(result, Err(CatalogError::UnorderedAddress { address: 8, .. })));
    }

    #[test]
    fn test_group_defaults() {
        let group = PropertyGroup::new("G", "General", vec![power(10)]).unwrap();
        assert_eq!(group.poll_kind, PollKind::Holding);
        assert_eq!(group.offset, DEFAULT_GROUP_OFFSET);

        let group = group.with_poll_kind(PollKind::Input).with_offset(0);
        assert_eq!(group.poll_kind.as_str(), "input");
        assert_eq!(group.offset, 0);
    }
}
