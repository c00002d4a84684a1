//! meteocontrol blue'Log data loggers: inverters and weather sensors.

use std::sync::Arc;

use crate::alert::Alert;
use crate::error::Result;
use crate::kind::DeviceKind;
use crate::property::{Property, PropertyGroup, repeat};
use crate::quantity::Quantity::*;
use crate::quantity::icon::{ENERGY, TEMPERATURE};
use crate::value_type::F32;

/// Values every device exposed by a blue'Log logger reports.
pub fn base() -> Result<Arc<DeviceKind>> {
    let general = PropertyGroup::new(
        "General",
        "General",
        vec![Property::new(40580, F32, TEMPERATURE, "temp", "Temperature", Temperature, "%.1f", "°C")],
    )?;

    Ok(Arc::new(
        DeviceKind::new("bluelog_base")
            .with_properties(general)
            .with_deadman("temp"),
    ))
}

/// Electrical inverter.
pub fn inverter() -> Result<Arc<DeviceKind>> {
    let mut props = vec![
        Property::new(41000, F32, ENERGY, "p_ac", "Power AC", Power, "%.1f", "W"),
        Property::new(41002, F32, ENERGY, "q_ac", "Reactive power", Power, "%.1f", "VAr"),
        Property::new(41004, F32, ENERGY, "s_ac", "Apparent power", Power, "%.1f", "VA"),
        Property::new(41006, F32, ENERGY, "cos_phi", "Power factor (cos phi)", None, "%.2f", None),
        Property::new(41008, F32, ENERGY, "u_ac", "Voltage AC", ElectricPotential, "%.1f", "V"),
        Property::new(41010, F32, ENERGY, "i_ac", "Current AC", ElectricCurrent, "%.1f", "A"),
        Property::new(41012, F32, ENERGY, "f_ac", "Grid frequency", Frequency, "%.1f", "Hz"),
        Property::new(41014, F32, ENERGY, "r_iso", "Insulation resistance", ElectricResistance, "%.1f", "Ohm"),
    ];
    props.extend(repeat(3, &[Property::new(41016, F32, ENERGY, "p_ac{n}", "Power AC phase {n}", Power, "%.1f", "W")]));
    props.extend(repeat(3, &[Property::new(41022, F32, ENERGY, "q_ac{n}", "Reactive power phase {n}", Power, "%.1f", "VAr")]));
    props.extend(repeat(3, &[Property::new(41028, F32, ENERGY, "s_ac{n}", "Apparent power phase {n}", Power, "%.1f", "VA")]));
    props.extend(repeat(3, &[Property::new(41034, F32, ENERGY, "cos_phi{n}", "Power factor (cos phi) phase {n}", None, "%.2f", None)]));
    props.extend(repeat(3, &[Property::new(41040, F32, ENERGY, "u_ac{n}", "Voltage AC phase {n}", ElectricPotential, "%.1f", "V")]));
    props.extend([
        Property::new(41046, F32, ENERGY, "u_ac_l1l2", "Phase voltage L1L2", ElectricPotential, "%.1f", "V"),
        Property::new(41048, F32, ENERGY, "u_ac_l2l3", "Phase voltage L2L3", ElectricPotential, "%.1f", "V"),
        Property::new(41050, F32, ENERGY, "u_ac_l3l1", "Phase voltage L3L1", ElectricPotential, "%.1f", "V"),
    ]);
    props.extend(repeat(3, &[Property::new(41052, F32, ENERGY, "i_ac{n}", "Current AC phase {n}", ElectricCurrent, "%.1f", "A")]));
    props.extend(repeat(3, &[Property::new(41058, F32, ENERGY, "f_ac{n}", "Grid frequency phase {n}", Frequency, "%.1f", "Hz")]));
    props.extend([
        Property::new(41064, F32, ENERGY, "e_day", "Energy generated per day", Power, "%.1f", "Wh"),
        Property::new(41066, F32, ENERGY, "e_total", "Energy total", Power, "%.1f", "kWh"),
        Property::new(41068, F32, ENERGY, "ot_ac_total", "Total operating hours", Time, "%.1f", "h"),
        Property::new(41070, F32, ENERGY, "ft_ac_total", "Total feed-in hours", Time, "%.1f", "h"),
        Property::new(41072, F32, ENERGY, "u_dc_pe", "Voltage DC positive pole to earth", ElectricPotential, "%.1f", "V"),
        Property::new(41074, F32, ENERGY, "u_dc_ne", "Voltage DC negative pole to earth", ElectricPotential, "%.1f", "V"),
        Property::new(41076, F32, ENERGY, "p_ac_set_abs", "Absolute active power setpoint", Power, "%.1f", "W"),
        Property::new(41078, F32, ENERGY, "p_ac_set_rel", "Relative active power setpoint", None, "%.1f", "%"),
        Property::new(41080, F32, ENERGY, "p_dc", "Power DC", Power, "%.1f", "W"),
        Property::new(41082, F32, ENERGY, "u_dc", "Voltage DC", ElectricPotential, "%.1f", "V"),
        Property::new(41084, F32, ENERGY, "i_dc", "Current DC total", ElectricCurrent, "%.1f", "A"),
    ]);
    props.extend(repeat(
        12,
        &[
            Property::new(41100, F32, ENERGY, "p_dc{n}", "Power DC MPPT {n}", Power, "%.1f", "W"),
            Property::new(41102, F32, ENERGY, "u_dc{n}", "Voltage DC MPPT {n}", ElectricPotential, "%.1f", "V"),
            Property::new(41104, F32, ENERGY, "i_dc{n}", "Current DC MPPT {n}", ElectricCurrent, "%.1f", "A"),
        ],
    ));
    props.push(Property::new(41800, F32, ENERGY, "r_ac", "Grid impedance", ElectricResistance, "%.1f", "Ohm"));

    Ok(Arc::new(
        DeviceKind::extending(base()?, "bluelog_inverter")
            .with_properties(PropertyGroup::new("Electrical", "Electrical", props)?)
            .with_icon("solarplant")
            .with_tags(["Inverter"])
            .with_alert(Alert::range("temp", -25.0, 60.0)?),
    ))
}

/// Weather sensor.
pub fn sensor() -> Result<Arc<DeviceKind>> {
    let mut props = vec![
        Property::new(42000, F32, "wind", "e_w_d", "Wind direction", Angle, "%.1f", "°"),
        Property::new(42002, F32, "wind", "e_w_s", "Wind speed", Speed, "%.1f", "m/s"),
        Property::new(42004, F32, "climate", "e_alt1", "Altitude", Length, "%.1f", "m"),
        Property::new(42006, F32, "rain", "e_precipitation", "Precipitation type", None, "%.1f", ""),
        Property::new(42008, F32, "rain", "e_rf_abs1", "Precipitation quantity absolute", Length, "%.1f", "mm"),
        Property::new(42010, F32, "rain", "e_rf_i1", "Precipitation intensity", Speed, "%.1f", "mm/h"),
        Property::new(42012, F32, "rain", "e_ah_abs1", "Humidity absolute 1", ArealDensity, "%.1f", "g/m²"),
        Property::new(42014, F32, "rain", "e_ah_rel1", "Humidity relative", None, "%.1f", "%"),
        Property::new(42016, F32, "pressure", "e_ap_abs1", "Air pressure absolute", Pressure, "%.1f", "hPa"),
        Property::new(42018, F32, "pressure", "e_ap_rel1", "Air pressure relative", Pressure, "%.1f", "hPa"),
        Property::new(42020, F32, "pressure", "e_ip_abs", "Internal air pressure", Pressure, "%.1f", "hPa"),
        Property::new(42022, F32, "humidity", "e_ih_rel", "Internal relative humidity", None, "%.1f", "%"),
        Property::new(42024, F32, "fan", "e_f_s", "Fan speed", Speed, "%.1f", "rpm"),
        Property::new(42030, F32, "sun", "sun_h", "Sunshine duration", Time, "%.1f", "h"),
        Property::new(42032, F32, "niveau", "e_tilt", "Sensor tilt", Angle, "%.1f", "°"),
        Property::new(42034, F32, "sun", "e_srad", "Global irradiation energy", Intensity, "%.1f", "Wh/m²"),
        Property::new(42036, F32, "sun", "srad", "Irradiance", Intensity, "%.1f", "W/m²"),
    ];
    props.extend(repeat(5, &[Property::new(42038, F32, "sun", "srad{n}", "Irradiance {n}", Intensity, "%.1f", "W/m²")]));
    props.push(Property::new(42048, F32, TEMPERATURE, "t", "Temperature", Temperature, "%.1f", "°C"));
    props.extend(repeat(20, &[Property::new(42050, F32, TEMPERATURE, "t{n}", "Temperature {n}", Temperature, "%.1f", "°C")]));
    props.extend(repeat(2, &[Property::new(42090, F32, ENERGY, "i_sc{n}", "Short circuit current {n}", ElectricCurrent, "%.1f", "A")]));
    props.extend([
        Property::new(42094, F32, "solarplant", "sli_raw", "Soiling loss raw", None, "%.1f", "%"),
        Property::new(42096, F32, "solarplant", "sli", "Soiling loss", None, "%.1f", "%"),
    ]);
    props.extend(repeat(2, &[Property::new(42098, F32, "solarplant", "sli{n}", "Soiling loss {n}", None, "%.1f", "%")]));
    props.push(Property::new(42102, F32, "rain", "e_rf_dif", "Differential precipitation", Length, "%.1f", "mm"));
    props.extend(repeat(5, &[Property::new(42104, F32, "rain", "e_rf_dif{n}", "Differential precipitation {n}", Length, "%.1f", "mm")]));
    props.push(Property::new(42114, F32, "wind", "e_w_s_max", "Maximum wind speed", Speed, "%.1f", "m/s"));
    props.extend(repeat(5, &[Property::new(42116, F32, "wind", "e_w_s{n}_max", "Maximum wind speed {n}", Speed, "%.1f", "m/s")]));
    props.extend(repeat(5, &[Property::new(42126, F32, "wind", "e_w_s{n}", "Wind speed {n}", Speed, "%.1f", "m/s")]));
    props.extend(repeat(5, &[Property::new(42136, F32, "wind", "e_w_d{n}", "Wind direction {n}", Angle, "%.1f", "°")]));
    props.extend([
        Property::new(42146, F32, "sun", "illuminance", "Illuminance", Illuminance, "%.1f", "lx"),
        Property::new(42150, F32, "snow", "e_snow_depth", "Snow depth", Length, "%.1f", "m"),
    ]);
    props.extend(repeat(4, &[Property::new(42152, F32, "snow", "snow_load{n}", "Snow load {n}", ArealDensity, "%.1f", "g/m²")]));
    props.push(Property::new(42170, F32, "water", "water_depth", "Water depth", Length, "%.1f", "m"));
    props.extend(repeat(9, &[Property::new(42180, F32, "solarplant", "sr{n}", "Soiling ratio {n}", None, "%.1f", "%")]));

    Ok(Arc::new(
        DeviceKind::extending(base()?, "bluelog_sensor")
            .with_properties(PropertyGroup::new("Sensor", "Capteur", props)?)
            .with_tags(["Sensor"])
            .with_alert(Alert::range("temp", -35.0, 80.0)?),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverter_chain() {
        let kind = inverter().unwrap();
        let groups = kind.property_groups();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].id, "General");
        assert_eq!(groups[1].id, "Electrical");
        assert_eq!(kind.deadman(), Some("temp"));
        assert_eq!(kind.icon(), "solarplant");
    }

    #[test]
    fn test_inverter_mppt_block() {
        let kind = inverter().unwrap();
        let electrical = kind.property_groups()[1];
        let mppt12 = electrical
            .properties()
            .iter()
            .find(|p| p.id == "i_dc12")
            .unwrap();

        // 11 blocks of 6 registers past the first current register
        assert_eq!(mppt12.address, 41104 + 11 * 6);
    }

    #[test]
    fn test_sensor_has_no_icon() {
        let kind = sensor().unwrap();
        assert_eq!(kind.icon(), "");
        assert_eq!(kind.tags(), &["Sensor".to_string()]);
    }
}
