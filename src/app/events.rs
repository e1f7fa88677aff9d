//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them — log to serial, publish over MQTT.

use crate::conditioning::PhysicalReading;
use crate::policy::ActuatorCommand;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// One cycle's telemetry snapshot.
    Telemetry(TelemetryData),

    /// The actuator command changed relative to the previous cycle.
    ActuatorsChanged(ActuatorCommand),

    /// Persistent unknown-TDS fault: all actuators forced OFF.
    FaultShutdown { unknown_cycles: u32 },

    /// The TDS reading recovered and the shutdown latch released.
    FaultRecovered,

    /// The application service has started.
    Started,
}

/// A point-in-time snapshot suitable for logging or transmission.
#[derive(Debug, Clone, Copy)]
pub struct TelemetryData {
    pub reading: PhysicalReading,
    pub command: ActuatorCommand,
}
