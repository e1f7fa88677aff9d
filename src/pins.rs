//! GPIO / peripheral pin assignments for the HydroStation main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Relays (active HIGH, opto-isolated relay board)
// ---------------------------------------------------------------------------

/// Grow-light relay.
pub const RELAY_GROW_LIGHT_GPIO: i32 = 5;
/// Nutrient dosing pump relay.
pub const RELAY_NUTRIENT_GPIO: i32 = 18;
/// Clean-water (dilution) pump relay.
pub const RELAY_CLEAN_WATER_GPIO: i32 = 19;

// ---------------------------------------------------------------------------
// Sensors — Analog (ADC1)
// ---------------------------------------------------------------------------

/// LDR light sensor — voltage divider into ADC1 channel 4.
pub const LIGHT_ADC_GPIO: i32 = 32;
/// TDS probe analog output — ADC1 channel 5.
pub const TDS_ADC_GPIO: i32 = 33;
/// Analog pH probe (PH-4502C board) — ADC1 channel 6.
pub const PH_ADC_GPIO: i32 = 34;

// ---------------------------------------------------------------------------
// Sensors — Digital
// ---------------------------------------------------------------------------

/// DHT22 air temperature/humidity sensor — single-wire data pin.
pub const DHT_GPIO: i32 = 23;
/// DS18B20 water thermometer — 1-Wire bus (external 4.7 kΩ pull-up).
pub const ONE_WIRE_GPIO: i32 = 25;
