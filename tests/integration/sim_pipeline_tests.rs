//! End-to-end pipeline tests through the real `HardwareAdapter`.
//!
//! Uses the simulation backends (static atomics) behind the sensor
//! drivers, so the full SensorHub → conditioning → policy → relay path
//! runs exactly as on target, minus the registers.
//!
//! The sensor simulation state is process-global, so everything that
//! injects sensor values lives in one test function.

use hydrostation::adapters::hardware::HardwareAdapter;
use hydrostation::app::ports::{ActuatorPort, SensorPort};
use hydrostation::app::service::AppService;
use hydrostation::config::SystemConfig;
use hydrostation::drivers::relay::RelayDriver;
use hydrostation::pins;
use hydrostation::policy::ActuatorCommand;
use hydrostation::sensors::dht::{self, DhtSensor};
use hydrostation::sensors::light::{self, LightSensor};
use hydrostation::sensors::ph::{self, PhProbe};
use hydrostation::sensors::tds::{self, TdsProbe};
use hydrostation::sensors::water_temp::{self, WaterTempSensor};
use hydrostation::sensors::SensorHub;

use crate::mock_hw::SinkSpy;

fn make_adapter() -> HardwareAdapter {
    let hub = SensorHub::new(
        PhProbe::new(pins::PH_ADC_GPIO, 30),
        TdsProbe::new(pins::TDS_ADC_GPIO),
        LightSensor::new(pins::LIGHT_ADC_GPIO),
        DhtSensor::new(pins::DHT_GPIO),
        WaterTempSensor::new(pins::ONE_WIRE_GPIO),
    );
    HardwareAdapter::new(
        hub,
        RelayDriver::new(pins::RELAY_CLEAN_WATER_GPIO),
        RelayDriver::new(pins::RELAY_NUTRIENT_GPIO),
        RelayDriver::new(pins::RELAY_GROW_LIGHT_GPIO),
    )
}

#[test]
fn injected_sensor_values_drive_the_relays() {
    let mut hw = make_adapter();
    let mut sink = SinkSpy::new();
    let mut app = AppService::new(SystemConfig::default());
    app.start(&mut sink);

    // Phase 1: nutrient-poor reservoir in the dark.
    ph::sim_set_ph_burst(&[512, 520, 515, 518, 510, 530, 525, 522, 519, 517]);
    tds::sim_set_tds_adc(2035); // ≈ 580 ppm
    light::sim_set_light_adc(700);
    dht::sim_set_air(26.5, 58.0);
    water_temp::sim_set_water_temp(21.0);

    app.tick(&mut hw, &mut sink);
    let levels = hw.relay_levels();
    assert!(levels.nutrient_pump);
    assert!(!levels.clean_water_pump);
    assert!(levels.grow_light);

    // The raw sample reflects the injected values.
    let raw = hw.read_all();
    assert_eq!(raw.tds_raw, Some(2035));
    assert_eq!(raw.light_raw, 700);
    assert!((raw.air_temp_c - 26.5).abs() < 1e-6);
    assert!((raw.water_temp_c - 21.0).abs() < 1e-6);

    // Phase 2: over-concentrated and bright.
    tds::sim_set_tds_adc(3400); // ≈ 1422 ppm
    light::sim_set_light_adc(3000);

    app.tick(&mut hw, &mut sink);
    let levels = hw.relay_levels();
    assert!(levels.clean_water_pump);
    assert!(!levels.nutrient_pump);
    assert!(!levels.grow_light);

    // Phase 3: failed sensors — TDS unknown, digital buses dead.
    tds::sim_fail_tds_adc();
    dht::sim_fail_air();
    water_temp::sim_fail_water_temp();

    app.tick(&mut hw, &mut sink);
    let levels = hw.relay_levels();
    assert!(!levels.clean_water_pump, "unknown TDS must not dilute");
    assert!(!levels.nutrient_pump, "unknown TDS must not dose");

    let raw = hw.read_all();
    assert_eq!(raw.tds_raw, None);
    assert!(raw.air_temp_c.is_nan());
    assert!(raw.humidity_pct.is_nan());
    assert!(raw.water_temp_c.is_nan());

    // Phase 4: recovery.
    tds::sim_set_tds_adc(2655); // ≈ 879 ppm, inside the band
    dht::sim_set_air(27.0, 61.0);
    water_temp::sim_set_water_temp(22.0);

    app.tick(&mut hw, &mut sink);
    let levels = hw.relay_levels();
    assert!(!levels.clean_water_pump);
    assert!(!levels.nutrient_pump);
}

#[test]
fn actuator_port_drives_relay_state() {
    let mut hw = make_adapter();

    hw.apply(&ActuatorCommand {
        clean_water_pump: true,
        nutrient_pump: false,
        grow_light: true,
    });
    let levels = hw.relay_levels();
    assert!(levels.clean_water_pump);
    assert!(!levels.nutrient_pump);
    assert!(levels.grow_light);

    hw.all_off();
    assert_eq!(hw.relay_levels(), ActuatorCommand::OFF);
}
