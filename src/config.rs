//! System configuration parameters
//!
//! All tunable parameters for the HydroStation controller.
//! Values can be overridden via NVS (non-volatile storage).

use serde::{Deserialize, Serialize};

use crate::calibration::CalibrationParameters;

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Actuation thresholds ---
    /// TDS (ppm) above which the clean-water pump dilutes the reservoir.
    pub tds_high_ppm: f32,
    /// TDS (ppm) below which the nutrient pump doses.
    /// Deployments have used 650–800 depending on crop.
    pub tds_low_ppm: f32,
    /// Raw LDR code below which the grow light switches on.
    pub light_on_below: u16,

    // --- Fault handling ---
    /// Consecutive unknown-TDS cycles before all actuators are forced OFF.
    /// 0 disables the shutdown.
    pub tds_fault_shutdown_cycles: u32,

    // --- Timing ---
    /// Inter-cycle delay (milliseconds).
    pub cycle_interval_ms: u32,
    /// Settling delay between the 10 pH burst samples (milliseconds).
    pub ph_sample_interval_ms: u32,

    // --- Connectivity ---
    pub wifi_ssid: String,
    pub wifi_pass: String,
    /// Broker URL, e.g. `mqtt://broker.emqx.io:1883`.
    pub mqtt_broker: String,
    /// Telemetry destination topic.
    pub mqtt_topic: String,

    // --- Calibration ---
    pub calibration: CalibrationParameters,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            tds_high_ppm: 1200.0,
            tds_low_ppm: 650.0,
            light_on_below: 1500,

            tds_fault_shutdown_cycles: 15,

            cycle_interval_ms: 1000,
            ph_sample_interval_ms: 30,

            wifi_ssid: String::new(),
            wifi_pass: String::new(),
            mqtt_broker: "mqtt://broker.emqx.io:1883".into(),
            mqtt_topic: "/sdh-auto-hydroponic".into(),

            calibration: CalibrationParameters::default(),
        }
    }
}
