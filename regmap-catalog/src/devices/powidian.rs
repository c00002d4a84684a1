//! PowiDian hydrogen storage unit.
//!
//! Display names are kept in French, as documented by the manufacturer.

use std::sync::Arc;

use crate::error::Result;
use crate::kind::DeviceKind;
use crate::property::{PollKind, Property, PropertyGroup};
use crate::quantity::Quantity::*;
use crate::quantity::icon::{ENERGY, TEMPERATURE};
use crate::value_type::{I16, I32, U16, ValueType};

const U16_NULL: ValueType = U16.with_null(65535);
const I16_NULL: ValueType = I16.with_null(-32768);

pub fn powidian_h2() -> Result<Arc<DeviceKind>> {
    let props = vec![
        Property::new(1010, U16_NULL.with_scale(100.0), ENERGY, "cap_tot", "Capacité totale de stockage", Energy, "%.1f", "kWh"),
        Property::new(1011, U16_NULL.with_scale(100.0), ENERGY, "cap_util", "Capacité utile de stockage", Energy, "%.1f", "kWh"),
        Property::new(1012, U16_NULL, ENERGY, "level", "Niveau du stockage H2", None, "%.1f", "%"),
        Property::new(1013, U16_NULL, ENERGY, "press", "Pression du stockage H2", Pressure, "%.1f", "bar"),
        Property::new(1014, U16_NULL.with_scale(100.0), ENERGY, "ener", "Énergie disponible de l'unité H2", Energy, "%.1f", "kWh"),
        Property::new(1020, I16_NULL.with_scale(100.0), ENERGY, "pwr_act_ac", "Puissance active côté AC de l'unité H2", Power, "%.1f", "W"),
        Property::new(1030, U16_NULL.with_scale(10.0), ENERGY, "el_rate_h2", "Électrolyseurs Débit H2", VolumetricFlowRate, "%.1f", "NL/h"),
        Property::new(1041, I16_NULL.with_scale(10.0), ENERGY, "el1_volt", "Électrolyseur 1 : Stack Tension", ElectricPotential, "%.1f", "V"),
        Property::new(1042, I16_NULL.with_scale(10.0), ENERGY, "el1_curr", "Électrolyseur 1 : Stack Intensité", ElectricCurrent, "%.1f", "A"),
        Property::new(1051, I16_NULL.with_scale(10.0), ENERGY, "el2_volt", "Électrolyseur 2 : Stack Tension", ElectricPotential, "%.1f", "V"),
        Property::new(1052, I16_NULL.with_scale(10.0), ENERGY, "el2_curr", "Électrolyseur 2 : Stack Intensité", ElectricCurrent, "%.1f", "A"),
        Property::new(1060, I16_NULL.with_scale(10.0), ENERGY, "dryer_press", "Dryer : Sortie : Pression", Pressure, "%.1f", "bar"),
        Property::new(1070, I16_NULL, ENERGY, "water_cond", "Réservoir d'eau : Conductivité", ElectricConductivity, "%.1f", "µS/cm"),
        Property::new(1071, U16.with_null(32768).with_scale(10.0), ENERGY, "water_vol", "Réservoir d'eau : Volume d'eau disponible", Volume, "%.1f", "L"),
        Property::new(1080, U16_NULL.with_scale(100.0), ENERGY, "pwr_prod", "Puissance de production d'électricité (en sortie de PAC DC)", Power, "%.1f", "kW"),
        Property::new(1091, U16_NULL.with_scale(10.0), ENERGY, "pac1_volt", "PAC 1 : Tension", ElectricPotential, "%.1f", "V"),
        Property::new(1092, U16_NULL.with_scale(10.0), ENERGY, "pac1_curr", "PAC 1 : Intensité", ElectricCurrent, "%.1f", "A"),
        Property::new(1101, U16_NULL.with_scale(10.0), ENERGY, "pac2_volt", "PAC 2 : Tension", ElectricPotential, "%.1f", "V"),
        Property::new(1102, U16_NULL.with_scale(10.0), ENERGY, "pac2_curr", "PAC 2 : Intensité", ElectricCurrent, "%.1f", "A"),
        Property::new(1110, I16_NULL.with_scale(10.0), TEMPERATURE, "t_int", "Température intérieure", Temperature, "%.1f", "°C"),
        Property::new(1111, I16_NULL.with_scale(10.0), TEMPERATURE, "t_ext", "Température extérieure", Temperature, "%.1f", "°C"),
        Property::new(1140, U16_NULL, ENERGY, "batt_soc", "Batteries SOC", None, "%.1f", "%"),
        Property::new(1141, I16_NULL.with_scale(10.0), ENERGY, "batt_curr", "Batteries Intensité", ElectricCurrent, "%.1f", "A"),
        Property::new(1142, U16_NULL.with_scale(10.0), ENERGY, "batt_volt", "Batteries Tension", ElectricPotential, "%.1f", "V"),
        Property::new(1143, I16_NULL.with_scale(10.0), TEMPERATURE, "batt_temp", "Batteries Température", Temperature, "%.1f", "°C"),
        Property::new(1144, U16_NULL, ENERGY, "batt_soh", "Batterie SOH", None, "%.1f", "%"),
        Property::new(1150, I32.with_null(-2147418113), ENERGY, "bluelog_pwr", "Bluelog puissance disponible", Power, "%.1f", "W"),
        Property::new(1151, U16_NULL, ENERGY, "bluelog_irr", "Bluelog irradiation", Intensity, "%.1f", "W/m²"),
    ];

    let group = PropertyGroup::new("PowiDian", "PowiDian H2", props)?
        .with_poll_kind(PollKind::Input)
        .with_offset(0);

    Ok(Arc::new(
        DeviceKind::new("powidian_h2")
            .with_properties(group)
            .with_icon("battery")
            .with_tags(["Battery"])
            .with_deadman("t_ext"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_group_without_offset() {
        let kind = powidian_h2().unwrap();
        let group = kind.property_groups()[0];

        assert_eq!(group.poll_kind, PollKind::Input);
        assert_eq!(group.offset, 0);
    }

    #[test]
    fn test_flow_rate_gain() {
        let kind = powidian_h2().unwrap();
        let rate = kind.property_groups()[0]
            .properties()
            .iter()
            .find(|p| p.id == "el_rate_h2")
            .unwrap();

        assert_eq!(rate.gain_string(), "0.1 l/h");
        assert_eq!(rate.value_type.transforms(), vec!["JS:null.js?when=65535"]);
    }
}
