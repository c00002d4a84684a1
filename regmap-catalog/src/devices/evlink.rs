//! Schneider Electric EVLink Pro AC charging station.

use std::sync::Arc;

use crate::error::Result;
use crate::kind::DeviceKind;
use crate::property::{Property, PropertyGroup, repeat};
use crate::quantity::Quantity::*;
use crate::quantity::icon::ENERGY;
use crate::value_type::{F32, I64, U16, U32};

pub fn evlink_pro() -> Result<Arc<DeviceKind>> {
    let mut props = vec![
        Property::new(1, U16, ENERGY, "ev_state", "Status of the vehicle", None, "%d", None),
        Property::new(150, U16, ENERGY, "ocpp_status", "OCPP charging station status", None, "%d", None),
        Property::new(1150, U16, ENERGY, "ev_presence", "Presence of the vehicle", None, "%d", None),
    ];
    props.extend(repeat(3, &[Property::new(2999, F32, ENERGY, "i{n}", "Current on phase {n}", ElectricCurrent, "%.1f", "A")]));
    props.push(Property::new(3009, F32, ENERGY, "i_avg", "Average current", ElectricCurrent, "%.1f", "A"));
    props.extend(repeat(3, &[Property::new(3027, F32, ENERGY, "u{n}", "Voltage on phase {n}", ElectricPotential, "%.1f", "V")]));
    props.push(Property::new(3035, F32, ENERGY, "u_avg", "Average voltage", ElectricPotential, "%.1f", "V"));
    props.extend(repeat(3, &[Property::new(3053, F32, ENERGY, "p{n}", "Active power on phase {n}", Power, "%.1f", "W")]));
    props.extend([
        Property::new(3059, F32, ENERGY, "p_tot", "Total active power", Power, "%.1f", "W"),
        Property::new(3075, F32, ENERGY, "s_tot", "Total apparent power", Power, "%.1f", "VA"),
        Property::new(3083, F32, ENERGY, "pf", "Power factor", None, "%.2f", None),
        Property::new(3109, F32, ENERGY, "f", "Frequency", Frequency, "%.1f", "Hz"),
        Property::new(3203, I64, ENERGY, "e_tot", "Total active energy counter", Energy, "%d", "Wh"),
        Property::new(3219, I64, ENERGY, "e_react_tot", "Total reactive energy counter", Energy, "%d", "VARh"),
        Property::new(4003, U16, ENERGY, "setpoint", "Remote energy management setpoint", ElectricCurrent, "%d", "A"),
        Property::new(4004, U16, ENERGY, "setpoint_degraded_mono", "Remote energy management degraded setpoint (monophase)", ElectricCurrent, "%d", "A"),
        Property::new(4005, U16, ENERGY, "setpoint_degraded_tri", "Remote energy management degraded setpoint (three-phase)", ElectricCurrent, "%d", "A"),
        Property::new(4006, U16, ENERGY, "contactor_charging_time", "Current charging time (duration since contactor closed)", Time, "%d", "s"),
        Property::new(4008, U16, ENERGY, "session_charging_time", "Current session charging time (duration since transaction started)", Time, "%d", "s"),
        Property::new(4011, U32, ENERGY, "session_energy", "Consumed energy during current session", Energy, "%d", "Wh"),
    ]);

    Ok(Arc::new(
        DeviceKind::new("evlink_pro")
            .with_properties(PropertyGroup::new("EVLinkPro", "EVLink Pro", props)?)
            .with_icon("poweroutlet_eu")
            .with_tags(["PowerOutlet"])
            .with_deadman("ev_state"),
    ))
}
