//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements   | Connects to              |
//! |------------|--------------|--------------------------|
//! | `hardware` | SensorPort   | ESP32 ADC, GPIO buses    |
//! |            | ActuatorPort | ESP32 relay GPIOs        |
//! | `log_sink` | EventSink    | Serial log output        |
//! | `mqtt`     | EventSink    | MQTT broker (telemetry)  |
//! | `nvs`      | ConfigPort   | NVS / in-memory store    |
//! | `wifi`     | —            | ESP-IDF WiFi STA         |

pub mod hardware;
pub mod log_sink;
#[cfg(target_os = "espidf")]
pub mod mqtt;
pub mod nvs;
#[cfg(target_os = "espidf")]
pub mod wifi;
