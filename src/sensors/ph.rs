//! Analog pH probe (PH-4502C amplifier board).
//!
//! The probe output is noisy — supply ripple couples straight into the
//! high-impedance electrode signal — so each cycle acquires a fixed burst
//! of 10 consecutive ADC codes, ~30 ms apart, for the conditioner's
//! trimmed-mean filter.  Conversion to pH happens downstream.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1_CH6 via the oneshot API with a FreeRTOS settle
//! delay between samples.
//! On host/test: the whole burst is injected via `sim_set_ph_burst`.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

/// Fixed burst length per acquisition cycle.
pub const PH_BURST_LEN: usize = 10;

#[cfg(not(target_os = "espidf"))]
static SIM_PH_BURST: [AtomicU16; PH_BURST_LEN] =
    [const { AtomicU16::new(0) }; PH_BURST_LEN];

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_ph_burst(codes: &[u16; PH_BURST_LEN]) {
    for (slot, &code) in SIM_PH_BURST.iter().zip(codes) {
        slot.store(code, Ordering::Relaxed);
    }
}

pub struct PhProbe {
    sample_interval_ms: u32,
    _adc_gpio: i32,
}

impl PhProbe {
    pub fn new(adc_gpio: i32, sample_interval_ms: u32) -> Self {
        Self {
            sample_interval_ms,
            _adc_gpio: adc_gpio,
        }
    }

    /// Acquire one 10-sample burst.
    #[cfg(target_os = "espidf")]
    pub fn read_burst(&mut self) -> [u16; PH_BURST_LEN] {
        let mut burst = [0u16; PH_BURST_LEN];
        for code in &mut burst {
            *code = hw_init::adc1_read(hw_init::ADC1_CH_PH);
            // Let the ADC input settle and average out supply ripple.
            esp_idf_hal::delay::FreeRtos::delay_ms(self.sample_interval_ms);
        }
        burst
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn read_burst(&mut self) -> [u16; PH_BURST_LEN] {
        let mut burst = [0u16; PH_BURST_LEN];
        for (code, slot) in burst.iter_mut().zip(&SIM_PH_BURST) {
            *code = slot.load(Ordering::Relaxed);
        }
        burst
    }
}
