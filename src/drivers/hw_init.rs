//! One-shot hardware peripheral initialization and raw bus access.
//!
//! Configures ADC channels and GPIO directions using raw ESP-IDF sys calls,
//! and hosts the bit-banged single-wire transactions for the DHT22 and the
//! DS18B20.  Called once from `main()` before the control loop starts; all
//! subsequent access is from the single main-loop task.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

use crate::error::SensorError;
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
        }
    }
}

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_adc()?;
        init_relay_outputs()?;
        init_bus_pins()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

/// ADC1 channel for the LDR (GPIO 32).
pub const ADC1_CH_LIGHT: u32 = 4;
/// ADC1 channel for the TDS probe (GPIO 33).
pub const ADC1_CH_TDS: u32 = 5;
/// ADC1 channel for the pH probe (GPIO 34).
pub const ADC1_CH_PH: u32 = 6;

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// main-loop ADC read path.  No concurrent access is possible because
/// `init_adc()` completes before the control loop starts.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };

    for ch in [ADC1_CH_LIGHT, ADC1_CH_TDS, ADC1_CH_PH] {
        let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), ch, &chan_cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::AdcInitFailed(ret));
        }
    }

    info!("hw_init: ADC1 configured (CH4=light, CH5=TDS, CH6=pH)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> u16 {
    let mut raw: i32 = 0;
    // SAFETY: ADC1_HANDLE is written once during init_adc() before this
    // function is called; single-threaded main-loop access guaranteed.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return 0;
    }
    raw.max(0) as u16
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(_channel: u32) -> u16 {
    0
}

/// Failure-aware ADC read for channels where 0 is a meaningful value and
/// must not be conflated with a failed conversion (the TDS probe).
#[cfg(target_os = "espidf")]
pub fn adc1_read_checked(channel: u32) -> Result<u16, SensorError> {
    let mut raw: i32 = 0;
    // SAFETY: ADC1_HANDLE is written once during init_adc() before this
    // function is called; single-threaded main-loop access guaranteed.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return Err(SensorError::AdcReadFailed);
    }
    Ok(raw.max(0) as u16)
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read_checked(_channel: u32) -> Result<u16, SensorError> {
    Ok(0)
}

// ── Relay outputs ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_relay_outputs() -> Result<(), HwInitError> {
    let output_pins = [
        pins::RELAY_GROW_LIGHT_GPIO,
        pins::RELAY_NUTRIENT_GPIO,
        pins::RELAY_CLEAN_WATER_GPIO,
    ];

    for &pin in &output_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
        // All actuators de-energised at boot.
        unsafe { gpio_set_level(pin, 0) };
    }

    info!("hw_init: relay outputs configured (all OFF)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_relay_outputs(). Main-loop only.
    unsafe {
        gpio_set_level(pin, if high { 1 } else { 0 });
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

// ── Single-wire bus pins (DHT22, DS18B20) ────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_bus_pins() -> Result<(), HwInitError> {
    // Open-drain input/output: released (1) idles high via the external
    // pull-up, driven (0) pulls the bus low.
    for &pin in &[pins::DHT_GPIO, pins::ONE_WIRE_GPIO] {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT_OUTPUT_OD,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
        unsafe { gpio_set_level(pin, 1) };
    }

    info!("hw_init: single-wire bus pins configured (DHT22, DS18B20)");
    Ok(())
}

/// Busy-wait until `pin` reads `level`, up to `timeout_us`.
/// Returns the microseconds waited.
#[cfg(target_os = "espidf")]
unsafe fn wait_for_level(pin: i32, level: bool, timeout_us: u32) -> Result<u32, SensorError> {
    let mut waited = 0u32;
    // SAFETY: gpio_get_level is a read-only register access.
    while (unsafe { gpio_get_level(pin) } != 0) != level {
        if waited >= timeout_us {
            return Err(SensorError::BusTimeout);
        }
        unsafe { esp_rom_delay_us(1) };
        waited += 1;
    }
    Ok(waited)
}

// ── DHT22 transaction ─────────────────────────────────────────

/// Read temperature (°C) and relative humidity (%) from the DHT22.
///
/// Bit-banged AM2302 protocol: host start pulse (≥1 ms low), sensor
/// response, then 40 data bits where a long high pulse (>40 µs) is a 1.
/// The timing-critical section runs with the scheduler's blessing — each
/// transaction takes ~5 ms and the control cycle is seconds long.
#[cfg(target_os = "espidf")]
pub fn dht22_read(pin: i32) -> Result<(f32, f32), SensorError> {
    let mut data = [0u8; 5];

    // SAFETY: bus pin was configured open-drain in init_bus_pins();
    // single-threaded main-loop access only.
    unsafe {
        // Host start: pull low >=1 ms, release, give the sensor 30 µs.
        gpio_set_level(pin, 0);
        esp_rom_delay_us(1100);
        gpio_set_level(pin, 1);
        esp_rom_delay_us(30);

        // Sensor response: 80 µs low, 80 µs high, then the first bit's low.
        wait_for_level(pin, false, 100)?;
        wait_for_level(pin, true, 100)?;
        wait_for_level(pin, false, 100)?;

        for bit in 0..40 {
            // End of the 50 µs inter-bit low period.
            wait_for_level(pin, true, 80)?;
            // High pulse length encodes the bit: ~26 µs = 0, ~70 µs = 1.
            let high_us = wait_for_level(pin, false, 100)?;
            if high_us > 40 {
                data[bit / 8] |= 1 << (7 - (bit % 8));
            }
        }
    }

    let sum = data[0]
        .wrapping_add(data[1])
        .wrapping_add(data[2])
        .wrapping_add(data[3]);
    if sum != data[4] {
        return Err(SensorError::ChecksumMismatch);
    }

    let humidity = f32::from((u16::from(data[0]) << 8) | u16::from(data[1])) / 10.0;
    let raw_temp = (u16::from(data[2] & 0x7F) << 8) | u16::from(data[3]);
    let mut temperature = f32::from(raw_temp) / 10.0;
    if data[2] & 0x80 != 0 {
        temperature = -temperature;
    }
    Ok((temperature, humidity))
}

#[cfg(not(target_os = "espidf"))]
pub fn dht22_read(_pin: i32) -> Result<(f32, f32), SensorError> {
    Err(SensorError::BusTimeout)
}

// ── DS18B20 transaction ───────────────────────────────────────

/// Start a temperature conversion and read the result (°C).
///
/// Blocks for the sensor's conversion latency (750 ms at 12-bit
/// resolution) between the convert command and the scratchpad read.
#[cfg(target_os = "espidf")]
pub fn ds18b20_read_celsius(pin: i32) -> Result<f32, SensorError> {
    // SAFETY: bus pin configured open-drain in init_bus_pins();
    // single-threaded main-loop access only.
    unsafe {
        ow_reset(pin)?;
        ow_write_byte(pin, 0xCC); // skip ROM (single device on the bus)
        ow_write_byte(pin, 0x44); // convert T
    }

    // Hardware-imposed conversion latency; yields to the scheduler.
    esp_idf_hal::delay::FreeRtos::delay_ms(750);

    let mut scratchpad = [0u8; 9];
    unsafe {
        ow_reset(pin)?;
        ow_write_byte(pin, 0xCC);
        ow_write_byte(pin, 0xBE); // read scratchpad
        for byte in &mut scratchpad {
            *byte = ow_read_byte(pin);
        }
    }

    if crc8_maxim(&scratchpad[..8]) != scratchpad[8] {
        return Err(SensorError::ChecksumMismatch);
    }

    let raw = i16::from_le_bytes([scratchpad[0], scratchpad[1]]);
    Ok(f32::from(raw) / 16.0)
}

#[cfg(not(target_os = "espidf"))]
pub fn ds18b20_read_celsius(_pin: i32) -> Result<f32, SensorError> {
    Err(SensorError::NoPresence)
}

/// 1-Wire reset + presence detect.
#[cfg(target_os = "espidf")]
unsafe fn ow_reset(pin: i32) -> Result<(), SensorError> {
    // SAFETY: see callers — open-drain pin, single-threaded access.
    unsafe {
        gpio_set_level(pin, 0);
        esp_rom_delay_us(480);
        gpio_set_level(pin, 1);
        esp_rom_delay_us(70);
        let present = gpio_get_level(pin) == 0;
        esp_rom_delay_us(410);
        if present {
            Ok(())
        } else {
            Err(SensorError::NoPresence)
        }
    }
}

#[cfg(target_os = "espidf")]
unsafe fn ow_write_byte(pin: i32, byte: u8) {
    for i in 0..8 {
        let bit = (byte >> i) & 1 != 0;
        // SAFETY: see ow_reset.
        unsafe {
            if bit {
                gpio_set_level(pin, 0);
                esp_rom_delay_us(6);
                gpio_set_level(pin, 1);
                esp_rom_delay_us(64);
            } else {
                gpio_set_level(pin, 0);
                esp_rom_delay_us(60);
                gpio_set_level(pin, 1);
                esp_rom_delay_us(10);
            }
        }
    }
}

#[cfg(target_os = "espidf")]
unsafe fn ow_read_byte(pin: i32) -> u8 {
    let mut byte = 0u8;
    for i in 0..8 {
        // SAFETY: see ow_reset.
        unsafe {
            gpio_set_level(pin, 0);
            esp_rom_delay_us(6);
            gpio_set_level(pin, 1);
            esp_rom_delay_us(9);
            if gpio_get_level(pin) != 0 {
                byte |= 1 << i;
            }
            esp_rom_delay_us(55);
        }
    }
    byte
}

/// Maxim/Dallas CRC-8 (polynomial 0x8C, reflected).
pub(crate) fn crc8_maxim(data: &[u8]) -> u8 {
    let mut crc = 0u8;
    for &byte in data {
        let mut b = byte;
        for _ in 0..8 {
            let mix = (crc ^ b) & 0x01;
            crc >>= 1;
            if mix != 0 {
                crc ^= 0x8C;
            }
            b >>= 1;
        }
    }
    crc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crc8_known_vectors() {
        // DS18B20 64-bit ROM codes carry their own CRC in the top byte.
        assert_eq!(crc8_maxim(&[]), 0x00);
        assert_eq!(crc8_maxim(&[0x02, 0x1C, 0xB8, 0x01, 0x00, 0x00, 0x00]), 0xA2);
        // Appending the CRC to the payload always yields 0.
        let mut frame = [0x28u8, 0xFF, 0x4C, 0x60, 0x94, 0x16, 0x04].to_vec();
        let crc = crc8_maxim(&frame);
        frame.push(crc);
        assert_eq!(crc8_maxim(&frame), 0);
    }
}
