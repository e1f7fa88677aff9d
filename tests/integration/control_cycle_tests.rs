//! Integration tests for the AppService control cycle.
//!
//! Drive full read → condition → decide → safety → apply cycles against
//! mock adapters and assert on the actuator command history and the
//! emitted event stream.

use crate::mock_hw::{
    MockHardware, SinkSpy, high_tds_sample, low_tds_sample, nominal_sample, unknown_tds_sample,
};

use hydrostation::app::events::AppEvent;
use hydrostation::app::service::AppService;
use hydrostation::config::SystemConfig;
use hydrostation::policy::ActuatorCommand;

fn make_app(config: SystemConfig) -> (AppService, MockHardware, SinkSpy) {
    let mut app = AppService::new(config);
    let hw = MockHardware::new();
    let mut sink = SinkSpy::new();
    app.start(&mut sink);
    (app, hw, sink)
}

// ── Threshold actuation ───────────────────────────────────────

#[test]
fn high_tds_runs_the_clean_water_pump() {
    let (mut app, mut hw, mut sink) = make_app(SystemConfig::default());
    hw.sample = high_tds_sample();

    app.tick(&mut hw, &mut sink);

    let cmd = hw.last_command().unwrap();
    assert!(cmd.clean_water_pump, "dilution pump should run above 1200 ppm");
    assert!(!cmd.nutrient_pump);
}

#[test]
fn low_tds_runs_the_nutrient_pump() {
    let (mut app, mut hw, mut sink) = make_app(SystemConfig::default());
    hw.sample = low_tds_sample();

    app.tick(&mut hw, &mut sink);

    let cmd = hw.last_command().unwrap();
    assert!(cmd.nutrient_pump, "dosing pump should run below 650 ppm");
    assert!(!cmd.clean_water_pump);
}

#[test]
fn nominal_tds_keeps_both_pumps_off() {
    let (mut app, mut hw, mut sink) = make_app(SystemConfig::default());
    hw.sample = nominal_sample();

    app.tick(&mut hw, &mut sink);

    let cmd = hw.last_command().unwrap();
    assert!(!cmd.clean_water_pump);
    assert!(!cmd.nutrient_pump);
}

#[test]
fn darkness_switches_the_grow_light_on() {
    let (mut app, mut hw, mut sink) = make_app(SystemConfig::default());
    hw.sample = nominal_sample();
    hw.sample.light_raw = 800; // below the default 1500 threshold

    app.tick(&mut hw, &mut sink);
    assert!(hw.last_command().unwrap().grow_light);

    hw.sample.light_raw = 2500;
    app.tick(&mut hw, &mut sink);
    assert!(!hw.last_command().unwrap().grow_light);
}

#[test]
fn unknown_tds_holds_both_pumps_off_immediately() {
    let (mut app, mut hw, mut sink) = make_app(SystemConfig::default());
    hw.sample = unknown_tds_sample();
    hw.sample.light_raw = 800;

    app.tick(&mut hw, &mut sink);

    let cmd = hw.last_command().unwrap();
    assert!(!cmd.clean_water_pump);
    assert!(!cmd.nutrient_pump);
    // One unknown cycle does not touch the light.
    assert!(cmd.grow_light);
}

// ── Event stream ──────────────────────────────────────────────

#[test]
fn every_tick_emits_telemetry_with_the_applied_command() {
    let (mut app, mut hw, mut sink) = make_app(SystemConfig::default());
    hw.sample = high_tds_sample();

    for _ in 0..5 {
        app.tick(&mut hw, &mut sink);
    }

    assert_eq!(sink.telemetry_count(), 5);
    for event in &sink.events {
        if let AppEvent::Telemetry(t) = event {
            assert!(t.command.clean_water_pump);
            assert!((t.reading.tds_ppm - 1422.0).abs() < 5.0, "tds={}", t.reading.tds_ppm);
        }
    }
}

#[test]
fn actuators_changed_fires_only_on_transitions() {
    let (mut app, mut hw, mut sink) = make_app(SystemConfig::default());
    hw.sample = nominal_sample();

    for _ in 0..4 {
        app.tick(&mut hw, &mut sink);
    }
    // First tick establishes the command; the repeats are no-ops.
    let changes = sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::ActuatorsChanged(_)))
        .count();
    assert_eq!(changes, 1);

    hw.sample = high_tds_sample();
    app.tick(&mut hw, &mut sink);
    let changes = sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::ActuatorsChanged(_)))
        .count();
    assert_eq!(changes, 2);
}

#[test]
fn relays_are_redriven_every_cycle() {
    let (mut app, mut hw, mut sink) = make_app(SystemConfig::default());
    hw.sample = nominal_sample();

    for _ in 0..3 {
        app.tick(&mut hw, &mut sink);
    }
    // apply() is unconditional even when the command is unchanged.
    assert_eq!(hw.applied.len(), 3);
    assert_eq!(app.cycle_count(), 3);
}

// ── Fault escalation ──────────────────────────────────────────

#[test]
fn persistent_unknown_tds_forces_full_shutdown() {
    let config = SystemConfig {
        tds_fault_shutdown_cycles: 3,
        ..SystemConfig::default()
    };
    let (mut app, mut hw, mut sink) = make_app(config);
    hw.sample = unknown_tds_sample();
    hw.sample.light_raw = 800; // lamp wants ON the whole time

    app.tick(&mut hw, &mut sink);
    app.tick(&mut hw, &mut sink);
    assert!(hw.last_command().unwrap().grow_light, "below the limit the lamp stays on");

    app.tick(&mut hw, &mut sink);
    assert_eq!(*hw.last_command().unwrap(), ActuatorCommand::OFF);
    assert_eq!(sink.fault_shutdowns(), 1);

    // Latched: further unknown cycles stay fully OFF without re-announcing.
    app.tick(&mut hw, &mut sink);
    assert_eq!(*hw.last_command().unwrap(), ActuatorCommand::OFF);
    assert_eq!(sink.fault_shutdowns(), 1);
}

#[test]
fn valid_reading_releases_the_shutdown() {
    let config = SystemConfig {
        tds_fault_shutdown_cycles: 2,
        ..SystemConfig::default()
    };
    let (mut app, mut hw, mut sink) = make_app(config);
    hw.sample = unknown_tds_sample();
    hw.sample.light_raw = 800;

    app.tick(&mut hw, &mut sink);
    app.tick(&mut hw, &mut sink);
    assert_eq!(*hw.last_command().unwrap(), ActuatorCommand::OFF);

    hw.sample = nominal_sample();
    hw.sample.light_raw = 800;
    app.tick(&mut hw, &mut sink);

    assert_eq!(sink.recoveries(), 1);
    assert!(hw.last_command().unwrap().grow_light, "lamp control resumes on recovery");
}

#[test]
fn zero_shutdown_limit_never_latches() {
    let config = SystemConfig {
        tds_fault_shutdown_cycles: 0,
        ..SystemConfig::default()
    };
    let (mut app, mut hw, mut sink) = make_app(config);
    hw.sample = unknown_tds_sample();
    hw.sample.light_raw = 800;

    for _ in 0..50 {
        app.tick(&mut hw, &mut sink);
    }
    assert_eq!(sink.fault_shutdowns(), 0);
    assert!(hw.last_command().unwrap().grow_light);
}
