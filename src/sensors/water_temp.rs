//! DS18B20 water thermometer on the 1-Wire bus.
//!
//! Each read issues an explicit conversion-start command, blocks for the
//! hardware conversion latency, then reads the scratchpad.  Presence or
//! CRC failure is logged and propagated as NaN.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: 1-Wire transaction via hw_init.
//! On host/test: value injected via statics, with a failure flag.

use log::warn;

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

#[cfg(not(target_os = "espidf"))]
static SIM_WATER_TEMP_BITS: AtomicU32 = AtomicU32::new(0);
#[cfg(not(target_os = "espidf"))]
static SIM_WATER_FAIL: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_water_temp(temp_c: f32) {
    SIM_WATER_TEMP_BITS.store(temp_c.to_bits(), Ordering::Relaxed);
    SIM_WATER_FAIL.store(false, Ordering::Relaxed);
}

/// Make subsequent reads fail (cleared by `sim_set_water_temp`).
#[cfg(not(target_os = "espidf"))]
pub fn sim_fail_water_temp() {
    SIM_WATER_FAIL.store(true, Ordering::Relaxed);
}

pub struct WaterTempSensor {
    gpio: i32,
}

impl WaterTempSensor {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    /// Convert and read the water temperature (°C); NaN on failure.
    #[cfg(target_os = "espidf")]
    pub fn read(&mut self) -> f32 {
        match hw_init::ds18b20_read_celsius(self.gpio) {
            Ok(temp_c) => temp_c,
            Err(e) => {
                warn!("DS18B20 read failed: {e}");
                f32::NAN
            }
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn read(&mut self) -> f32 {
        let _ = self.gpio;
        if SIM_WATER_FAIL.load(Ordering::Relaxed) {
            warn!("DS18B20 read failed: simulated fault");
            return f32::NAN;
        }
        f32::from_bits(SIM_WATER_TEMP_BITS.load(Ordering::Relaxed))
    }
}
