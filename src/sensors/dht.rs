//! DHT22 (AM2302) air temperature / relative-humidity sensor.
//!
//! A failed transaction (bus timeout, checksum mismatch) is logged and
//! propagated as NaN — no retry here.  Downstream consumers treat NaN as
//! "unknown" and degrade gracefully.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: bit-banged single-wire transaction via hw_init.
//! On host/test: values injected via statics, including a failure flag to
//! exercise the NaN path.

use log::warn;

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
use crate::error::SensorError;

#[cfg(not(target_os = "espidf"))]
static SIM_AIR_TEMP_BITS: AtomicU32 = AtomicU32::new(0);
#[cfg(not(target_os = "espidf"))]
static SIM_HUMIDITY_BITS: AtomicU32 = AtomicU32::new(0);
#[cfg(not(target_os = "espidf"))]
static SIM_DHT_FAIL: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_air(temp_c: f32, humidity_pct: f32) {
    SIM_AIR_TEMP_BITS.store(temp_c.to_bits(), Ordering::Relaxed);
    SIM_HUMIDITY_BITS.store(humidity_pct.to_bits(), Ordering::Relaxed);
    SIM_DHT_FAIL.store(false, Ordering::Relaxed);
}

/// Make subsequent reads fail with a bus timeout (cleared by `sim_set_air`).
#[cfg(not(target_os = "espidf"))]
pub fn sim_fail_air() {
    SIM_DHT_FAIL.store(true, Ordering::Relaxed);
}

#[derive(Debug, Clone, Copy)]
pub struct AirReading {
    /// Air temperature (°C); NaN on sensor failure.
    pub temp_c: f32,
    /// Relative humidity (%); NaN on sensor failure.
    pub humidity_pct: f32,
}

pub struct DhtSensor {
    gpio: i32,
}

impl DhtSensor {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    /// Read the sensor once; NaN fields on a failed transaction.
    pub fn read(&mut self) -> AirReading {
        match self.read_raw() {
            Ok(reading) => reading,
            Err(e) => {
                warn!("DHT22 read failed: {e}");
                AirReading {
                    temp_c: f32::NAN,
                    humidity_pct: f32::NAN,
                }
            }
        }
    }

    #[cfg(target_os = "espidf")]
    fn read_raw(&self) -> Result<AirReading, SensorError> {
        let (temp_c, humidity_pct) = hw_init::dht22_read(self.gpio)?;
        Ok(AirReading {
            temp_c,
            humidity_pct,
        })
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_raw(&self) -> Result<AirReading, SensorError> {
        let _ = self.gpio;
        if SIM_DHT_FAIL.load(Ordering::Relaxed) {
            return Err(SensorError::BusTimeout);
        }
        Ok(AirReading {
            temp_c: f32::from_bits(SIM_AIR_TEMP_BITS.load(Ordering::Relaxed)),
            humidity_pct: f32::from_bits(SIM_HUMIDITY_BITS.load(Ordering::Relaxed)),
        })
    }
}
