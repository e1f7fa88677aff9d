//! Telemetry encoding — one flat JSON record per control cycle.
//!
//! Field names are fixed by the dashboard consuming the MQTT topic; do not
//! rename them without coordinating a backend change.  No schema version,
//! no compression.  Non-finite numbers (failed sensors) serialize as
//! `null`.

use serde::{Deserialize, Serialize};

use crate::conditioning::PhysicalReading;
use crate::policy::ActuatorCommand;

/// The wire record published every cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryRecord {
    pub temperature: f32,
    pub humidity: f32,
    pub tds: f32,
    pub light: u16,
    pub ph: f32,
    pub water_temp: f32,
    pub relay_air_bersih: bool,
    pub relay_nutrisi: bool,
    pub relay_lampu: bool,
}

impl TelemetryRecord {
    pub fn new(reading: &PhysicalReading, command: &ActuatorCommand) -> Self {
        Self {
            temperature: reading.air_temp_c,
            humidity: reading.humidity_pct,
            tds: reading.tds_ppm,
            light: reading.light_raw,
            ph: reading.ph,
            water_temp: reading.water_temp_c,
            relay_air_bersih: command.clean_water_pump,
            relay_nutrisi: command.nutrient_pump,
            relay_lampu: command.grow_light,
        }
    }
}

/// Serialize one cycle's reading + command into the JSON payload.
pub fn encode(
    reading: &PhysicalReading,
    command: &ActuatorCommand,
) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(&TelemetryRecord::new(reading, command))
}
