//! Actuation policy — stateless threshold (bang-bang) evaluation.
//!
//! Maps one [`PhysicalReading`] to one [`ActuatorCommand`], recomputed from
//! scratch every cycle with strict inequalities and no hysteresis band.
//! Rapid oscillation near a threshold boundary is an accepted tradeoff of
//! this control scheme, not a bug.

use crate::conditioning::PhysicalReading;
use crate::config::SystemConfig;

/// Tri-state actuator command set for one cycle.
///
/// Applied unconditionally every cycle — relay writes are idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActuatorCommand {
    /// Dilution pump: ON when the solution is too concentrated.
    pub clean_water_pump: bool,
    /// Dosing pump: ON when the solution is too dilute.
    pub nutrient_pump: bool,
    /// Grow light: ON when ambient light is low.
    pub grow_light: bool,
}

impl ActuatorCommand {
    /// Everything off — the safe state.
    pub const OFF: Self = Self {
        clean_water_pump: false,
        nutrient_pump: false,
        grow_light: false,
    };
}

/// Evaluate the threshold rules for one reading.  Pure function.
///
/// When TDS is unknown (NaN) both pumps are forced OFF by an explicit
/// branch — dosing decisions are never made from a failed sensor.  (A bare
/// NaN comparison would happen to evaluate false too, but that behaviour
/// stays deliberate and tested here, not accidental.)
pub fn decide(reading: &PhysicalReading, config: &SystemConfig) -> ActuatorCommand {
    let (clean_water_pump, nutrient_pump) = if reading.tds_ppm.is_nan() {
        (false, false)
    } else {
        (
            reading.tds_ppm > config.tds_high_ppm,
            reading.tds_ppm < config.tds_low_ppm,
        )
    };

    ActuatorCommand {
        clean_water_pump,
        nutrient_pump,
        grow_light: reading.light_raw < config.light_on_below,
    }
}
