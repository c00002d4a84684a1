//! Physical quantities, semantic tags, units and icons of the target platform.

use serde::{Deserialize, Serialize};

/// Dimension of a measured value, as named by openHAB's units of measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quantity {
    Temperature,
    Power,
    ElectricPotential,
    ElectricCurrent,
    Frequency,
    ElectricResistance,
    Angle,
    Speed,
    Length,
    Pressure,
    Time,
    Intensity,
    Energy,
    Volume,
    VolumetricFlowRate,
    ElectricConductivity,
    ArealDensity,
    Illuminance,
}

impl Quantity {
    /// Return the platform name for this quantity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Quantity::Temperature => "Temperature",
            Quantity::Power => "Power",
            Quantity::ElectricPotential => "ElectricPotential",
            Quantity::ElectricCurrent => "ElectricCurrent",
            Quantity::Frequency => "Frequency",
            Quantity::ElectricResistance => "ElectricResistance",
            Quantity::Angle => "Angle",
            Quantity::Speed => "Speed",
            Quantity::Length => "Length",
            Quantity::Pressure => "Pressure",
            Quantity::Time => "Time",
            Quantity::Intensity => "Intensity",
            Quantity::Energy => "Energy",
            Quantity::Volume => "Volume",
            Quantity::VolumetricFlowRate => "VolumetricFlowRate",
            Quantity::ElectricConductivity => "ElectricConductivity",
            Quantity::ArealDensity => "ArealDensity",
            Quantity::Illuminance => "Illuminance",
        }
    }

    /// Semantic property tag for this quantity, if the platform has one.
    pub fn semantic_tag(&self) -> Option<&'static str> {
        match self {
            Quantity::Intensity | Quantity::Illuminance => Some("Light"),
            Quantity::Energy => Some("Energy"),
            Quantity::Frequency => Some("Frequency"),
            Quantity::ElectricCurrent => Some("Current"),
            Quantity::Pressure => Some("Pressure"),
            Quantity::Power => Some("Power"),
            Quantity::Temperature => Some("Temperature"),
            Quantity::ElectricPotential => Some("Voltage"),
            _ => None,
        }
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a unit symbol to the spelling the platform accepts.
///
/// Some symbols differ only by case (`VAr` vs `var`, `L` vs `l`), others
/// are dimensionally equivalent units under another name (`rpm` is `Hz`).
/// Unknown symbols are returned unchanged.
pub fn platform_unit(unit: &str) -> &str {
    match unit {
        "VAr" => "var",
        "VARh" => "varh",
        "rpm" => "Hz",
        "L" => "l",
        "NL/h" => "l/h",
        other => other,
    }
}

/// Icons from the classic icon set.
pub mod icon {
    pub const TEMPERATURE: &str = "temperature";
    pub const ENERGY: &str = "energy";
}
