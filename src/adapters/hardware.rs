//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and the three relay drivers, exposing them
//! through [`SensorPort`] and [`ActuatorPort`].  This is the only module
//! in the system that touches actual hardware.  On non-espidf targets,
//! the underlying drivers use cfg-gated simulation stubs.

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::relay::RelayDriver;
use crate::policy::ActuatorCommand;
use crate::sensors::{RawSample, SensorHub};

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    sensor_hub: SensorHub,
    clean_water_pump: RelayDriver,
    nutrient_pump: RelayDriver,
    grow_light: RelayDriver,
}

impl HardwareAdapter {
    pub fn new(
        sensor_hub: SensorHub,
        clean_water_pump: RelayDriver,
        nutrient_pump: RelayDriver,
        grow_light: RelayDriver,
    ) -> Self {
        Self {
            sensor_hub,
            clean_water_pump,
            nutrient_pump,
            grow_light,
        }
    }

    /// Current relay levels (for tests and diagnostics).
    pub fn relay_levels(&self) -> ActuatorCommand {
        ActuatorCommand {
            clean_water_pump: self.clean_water_pump.is_on(),
            nutrient_pump: self.nutrient_pump.is_on(),
            grow_light: self.grow_light.is_on(),
        }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn read_all(&mut self) -> RawSample {
        self.sensor_hub.read_all()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn apply(&mut self, command: &ActuatorCommand) {
        self.clean_water_pump.set(command.clean_water_pump);
        self.nutrient_pump.set(command.nutrient_pump);
        self.grow_light.set(command.grow_light);
    }

    fn all_off(&mut self) {
        self.apply(&ActuatorCommand::OFF);
    }
}
