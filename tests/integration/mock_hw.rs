//! Mock hardware adapter for integration tests.
//!
//! Records every actuator command so tests can assert on the full command
//! history without touching real GPIO registers.

use hydrostation::app::events::AppEvent;
use hydrostation::app::ports::{ActuatorPort, EventSink, SensorPort};
use hydrostation::policy::ActuatorCommand;
use hydrostation::sensors::{PH_BURST_LEN, RawSample};

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    /// The sample returned by the next `read_all` call.
    pub sample: RawSample,
    /// Every command passed to `apply`, in order.
    pub applied: Vec<ActuatorCommand>,
    pub all_off_calls: u32,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            sample: nominal_sample(),
            applied: Vec::new(),
            all_off_calls: 0,
        }
    }

    pub fn last_command(&self) -> Option<&ActuatorCommand> {
        self.applied.last()
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn read_all(&mut self) -> RawSample {
        self.sample
    }
}

impl ActuatorPort for MockHardware {
    fn apply(&mut self, command: &ActuatorCommand) {
        self.applied.push(*command);
    }

    fn all_off(&mut self) {
        self.all_off_calls += 1;
        self.applied.push(ActuatorCommand::OFF);
    }
}

// ── SinkSpy ───────────────────────────────────────────────────

pub struct SinkSpy {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl SinkSpy {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn telemetry_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::Telemetry(_)))
            .count()
    }

    pub fn fault_shutdowns(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::FaultShutdown { .. }))
            .count()
    }

    pub fn recoveries(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::FaultRecovered))
            .count()
    }
}

impl Default for SinkSpy {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for SinkSpy {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Sample builders ───────────────────────────────────────────

/// Flat pH burst around a mid-range code.
pub fn flat_burst(code: u16) -> [u16; PH_BURST_LEN] {
    [code; PH_BURST_LEN]
}

/// A sample whose conditioned values sit inside every threshold band:
/// TDS ≈ 879 ppm (code 2655), light above the lamp threshold.
pub fn nominal_sample() -> RawSample {
    RawSample {
        ph_burst: flat_burst(520),
        tds_raw: Some(2655),
        light_raw: 2500,
        air_temp_c: 27.0,
        humidity_pct: 60.0,
        water_temp_c: 22.0,
    }
}

/// TDS ≈ 1422 ppm (code 3400) — above the default dilute threshold.
#[allow(dead_code)]
pub fn high_tds_sample() -> RawSample {
    RawSample {
        tds_raw: Some(3400),
        ..nominal_sample()
    }
}

/// TDS ≈ 580 ppm (code 2035) — below the default dose threshold.
#[allow(dead_code)]
pub fn low_tds_sample() -> RawSample {
    RawSample {
        tds_raw: Some(2035),
        ..nominal_sample()
    }
}

/// TDS conversion failure — conditions to NaN.
#[allow(dead_code)]
pub fn unknown_tds_sample() -> RawSample {
    RawSample {
        tds_raw: None,
        ..nominal_sample()
    }
}
