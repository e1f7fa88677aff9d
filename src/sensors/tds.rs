//! Gravity-style analog TDS probe.
//!
//! Single-shot ADC read per cycle; the voltage→EC→ppm math lives in the
//! signal conditioner.  A failed conversion surfaces as `None`, never as
//! a fake zero code — downstream, unknown TDS drives the fault supervisor.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1_CH5 via the oneshot API.
//! On host/test: reads from static atomics for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
#[cfg(target_os = "espidf")]
use log::warn;

#[cfg(not(target_os = "espidf"))]
static SIM_TDS_ADC: AtomicU16 = AtomicU16::new(0);
#[cfg(not(target_os = "espidf"))]
static SIM_TDS_FAIL: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_tds_adc(raw: u16) {
    SIM_TDS_ADC.store(raw, Ordering::Relaxed);
    SIM_TDS_FAIL.store(false, Ordering::Relaxed);
}

/// Make subsequent reads fail until [`sim_set_tds_adc`] is called again.
#[cfg(not(target_os = "espidf"))]
pub fn sim_fail_tds_adc() {
    SIM_TDS_FAIL.store(true, Ordering::Relaxed);
}

pub struct TdsProbe {
    _adc_gpio: i32,
}

impl TdsProbe {
    pub fn new(adc_gpio: i32) -> Self {
        Self { _adc_gpio: adc_gpio }
    }

    #[cfg(target_os = "espidf")]
    pub fn read(&mut self) -> Option<u16> {
        match hw_init::adc1_read_checked(hw_init::ADC1_CH_TDS) {
            Ok(code) => Some(code),
            Err(e) => {
                warn!("TDS ADC read failed: {}", e);
                None
            }
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn read(&mut self) -> Option<u16> {
        if SIM_TDS_FAIL.load(Ordering::Relaxed) {
            None
        } else {
            Some(SIM_TDS_ADC.load(Ordering::Relaxed))
        }
    }
}
