//! Signal conditioning — noise filtering and calibration math.
//!
//! Turns one cycle's [`RawSample`] into a unit-correct [`PhysicalReading`]:
//!
//! - pH: sort the 10-sample burst, discard the two lowest and two highest
//!   codes, average the middle six, then apply the probe's linear transform.
//! - TDS: ADC code → voltage → EC (strategy-dependent, clamped ≥ 0) →
//!   ppm via the probe family's cubic regression.  A failed conversion
//!   (`None` code) becomes NaN.
//! - Light: raw pass-through (compared against a raw threshold downstream).
//! - Air/water temperature and humidity: pass-through, NaN included.
//!
//! NaN means "unknown" everywhere in this pipeline.  The conditioner never
//! fabricates a number for a failed sensor.

use crate::calibration::{CalibrationParameters, TdsStrategy};
use crate::sensors::{PH_BURST_LEN, RawSample};

/// Samples discarded from each end of the sorted pH burst.
const PH_TRIM: usize = 2;

/// The conditioned, unit-correct measurement set for one cycle.
///
/// Replaced wholesale each iteration, never partially updated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalReading {
    /// Air temperature (°C); NaN if the DHT22 read failed.
    pub air_temp_c: f32,
    /// Relative humidity (%); NaN if the DHT22 read failed.
    pub humidity_pct: f32,
    /// Water temperature (°C); NaN if the DS18B20 read failed.
    pub water_temp_c: f32,
    /// pH (dimensionless, typically 0–14).
    pub ph: f32,
    /// Total dissolved solids (ppm, clamped ≥ 0).
    pub tds_ppm: f32,
    /// Ambient light, raw ADC code (no lux conversion).
    pub light_raw: u16,
}

/// Condition one raw sample set into physical units.
pub fn condition(raw: &RawSample, cal: &CalibrationParameters) -> PhysicalReading {
    PhysicalReading {
        air_temp_c: raw.air_temp_c,
        humidity_pct: raw.humidity_pct,
        water_temp_c: raw.water_temp_c,
        ph: ph_from_burst(&raw.ph_burst, cal),
        tds_ppm: match raw.tds_raw {
            Some(code) => tds_from_raw(code, raw.water_temp_c, raw.air_temp_c, cal),
            None => f32::NAN,
        },
        light_raw: raw.light_raw,
    }
}

/// Trimmed-mean pH conversion: sort, drop 2 outliers per end, average the
/// middle 6, convert to voltage, apply the linear probe transform.
pub fn ph_from_burst(burst: &[u16; PH_BURST_LEN], cal: &CalibrationParameters) -> f32 {
    let mut sorted = *burst;
    sorted.sort_unstable();

    let kept = &sorted[PH_TRIM..PH_BURST_LEN - PH_TRIM];
    let sum: u32 = kept.iter().map(|&c| u32::from(c)).sum();
    let avg_code = sum as f32 / kept.len() as f32;

    let voltage = avg_code * cal.vref / cal.adc_max;
    cal.ph_slope * voltage + cal.ph_offset
}

/// TDS conversion: code → voltage → EC (clamped ≥ 0) → ppm cubic.
///
/// Under [`TdsStrategy::TemperatureCompensated`] the probe voltage is
/// divided by `1 + 0.02·(t − 25)` using the water temperature (air
/// temperature as fallback); compensation short-circuits to the raw voltage
/// when both temperatures are unknown.
pub fn tds_from_raw(code: u16, water_temp_c: f32, air_temp_c: f32, cal: &CalibrationParameters) -> f32 {
    let voltage = f32::from(code) * cal.vref / cal.adc_max;

    let ec = match cal.tds_strategy {
        TdsStrategy::FixedCalibration => voltage * cal.ec_gain - cal.ec_offset,
        TdsStrategy::TemperatureCompensated => {
            voltage / compensation_coefficient(water_temp_c, air_temp_c)
        }
    };
    let ec = ec.max(0.0);

    let [c3, c2, c1] = cal.tds_cubic;
    (c3 * ec * ec * ec + c2 * ec * ec + c1 * ec) * cal.tds_scale
}

/// Temperature-compensation coefficient `1 + 0.02·(t − 25)`.
///
/// Prefers water temperature; falls back to air temperature; returns 1.0
/// (no compensation) when neither is known.
fn compensation_coefficient(water_temp_c: f32, air_temp_c: f32) -> f32 {
    let t = if water_temp_c.is_finite() {
        water_temp_c
    } else if air_temp_c.is_finite() {
        air_temp_c
    } else {
        return 1.0;
    };
    1.0 + 0.02 * (t - 25.0)
}
