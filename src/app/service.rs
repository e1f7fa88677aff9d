//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the per-cycle pipeline and the fault supervisor.
//! All I/O flows through port traits injected at call sites, making the
//! entire service testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌─────────────────────────────┐ ──▶ EventSink
//!                 │         AppService           │
//! ActuatorPort ◀──│ condition · decide · safety  │
//!                 └─────────────────────────────┘
//! ```

use log::{debug, info};

use crate::conditioning::condition;
use crate::config::SystemConfig;
use crate::policy::{ActuatorCommand, decide};
use crate::safety::FaultSupervisor;

use super::events::{AppEvent, TelemetryData};
use super::ports::{ActuatorPort, EventSink, SensorPort};

/// The application service orchestrates one control cycle at a time.
pub struct AppService {
    config: SystemConfig,
    supervisor: FaultSupervisor,
    last_command: Option<ActuatorCommand>,
    cycle_count: u64,
}

impl AppService {
    pub fn new(config: SystemConfig) -> Self {
        let supervisor = FaultSupervisor::new(&config);
        Self {
            config,
            supervisor,
            last_command: None,
            cycle_count: 0,
        }
    }

    /// Announce startup.  Actuators start OFF (hw_init drives them low);
    /// the first tick establishes the real command.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started);
        info!("AppService started");
    }

    /// Run one full control cycle: read → condition → decide → safety →
    /// apply → telemetry.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`] — this avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn tick(&mut self, hw: &mut (impl SensorPort + ActuatorPort), sink: &mut impl EventSink) {
        self.cycle_count += 1;

        // 1. Acquire raw readings via SensorPort.
        let raw = hw.read_all();

        // 2. Condition into physical units.
        let reading = condition(&raw, &self.config.calibration);

        // 3. Threshold policy — pure, stateless.
        let decided = decide(&reading, &self.config);

        // 4. Fault supervision (may override with all-OFF).
        let was_latched = self.supervisor.is_latched();
        let command = self.supervisor.apply(&reading, decided);
        if !was_latched && self.supervisor.is_latched() {
            sink.emit(&AppEvent::FaultShutdown {
                unknown_cycles: self.supervisor.unknown_streak(),
            });
        } else if was_latched && !self.supervisor.is_latched() {
            sink.emit(&AppEvent::FaultRecovered);
        }

        // 5. Apply unconditionally — relay writes are idempotent.
        hw.apply(&command);
        if self.last_command != Some(command) {
            sink.emit(&AppEvent::ActuatorsChanged(command));
        }
        self.last_command = Some(command);

        // 6. Telemetry, independent of actuation.
        sink.emit(&AppEvent::Telemetry(TelemetryData { reading, command }));

        debug!(
            "cycle {}: tds={:.0}ppm ph={:.2} light={} cmd={:?}",
            self.cycle_count, reading.tds_ppm, reading.ph, reading.light_raw, command
        );
    }

    /// Cycles executed since start.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }
}
