//! Per-deployment calibration constants.
//!
//! Owned by the signal conditioner; immutable for the process lifetime.
//! Every deployment calibrates the pH offset against pH-4/pH-7 buffer
//! solutions and may override the TDS regression coefficients for a
//! different probe family.

use serde::{Deserialize, Serialize};

/// How raw TDS voltage is turned into electrical conductivity.
///
/// Field deployments diverged here: some units carry a one-point EC
/// calibration against a reference solution, others compensate the probe
/// voltage for water temperature using the probe vendor's curve.  Selected
/// by configuration, not a compile-time fork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TdsStrategy {
    /// One-point EC gain plus a fixed offset, calibrated at ~25 °C.
    FixedCalibration,
    /// Divide probe voltage by `1 + 0.02·(t − 25 °C)` before conversion.
    /// Skipped entirely when no temperature reading is available.
    TemperatureCompensated,
}

/// Fixed per-deployment constants for the signal conditioner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationParameters {
    /// ADC reference voltage (volts).
    pub vref: f32,
    /// Full-scale ADC code (4095 for the 12-bit ESP32 ADC).
    pub adc_max: f32,

    /// pH-vs-voltage slope of the probe amplifier board.
    pub ph_slope: f32,
    /// pH intercept, empirically derived per probe against buffer solutions.
    pub ph_offset: f32,

    /// One-point EC calibration gain (dimensionless).
    pub ec_gain: f32,
    /// Fixed EC offset subtracted after the gain.
    pub ec_offset: f32,

    /// TDS regression coefficients `[c3, c2, c1]` for
    /// `tds = (c3·ec³ + c2·ec² + c1·ec) · tds_scale`.
    /// Specific to the probe family; override for a different sensor model.
    pub tds_cubic: [f32; 3],
    /// Final TDS scale factor (0.5 converts EC-regression output to ppm).
    pub tds_scale: f32,

    /// Which EC conversion strategy this deployment uses.
    pub tds_strategy: TdsStrategy,
}

impl Default for CalibrationParameters {
    fn default() -> Self {
        Self {
            vref: 3.3,
            adc_max: 4095.0,
            // PH-4502C reference deployment; some units ship with 20.24.
            ph_slope: -5.70,
            ph_offset: 20.34,
            ec_gain: 1.0,
            ec_offset: 0.14,
            tds_cubic: [133.42, -255.86, 857.39],
            tds_scale: 0.5,
            tds_strategy: TdsStrategy::FixedCalibration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_probe() {
        let cal = CalibrationParameters::default();
        assert!((cal.vref - 3.3).abs() < 1e-6);
        assert!((cal.adc_max - 4095.0).abs() < 1e-6);
        assert!((cal.ph_slope + 5.70).abs() < 1e-6);
        assert!((cal.ph_offset - 20.34).abs() < 1e-6);
        assert_eq!(cal.tds_strategy, TdsStrategy::FixedCalibration);
    }

    #[test]
    fn serde_roundtrip() {
        let cal = CalibrationParameters::default();
        let json = serde_json::to_string(&cal).unwrap();
        let back: CalibrationParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(cal, back);
    }
}
