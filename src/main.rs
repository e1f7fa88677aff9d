//! HydroStation Firmware — Main Entry Point
//!
//! Hexagonal architecture around a fixed-cadence control loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  HardwareAdapter    LogEventSink    MqttSink  NvsAdapter │
//! │  (Sensor+Actuator)  (EventSink)     (EventSink)(Config)  │
//! │                                                          │
//! │  ────────────── Port Trait Boundary ──────────────       │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │            AppService (pure logic)             │      │
//! │  │  condition · decide · fault supervision        │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use log::{info, warn};

use hydrostation::adapters::hardware::HardwareAdapter;
use hydrostation::adapters::log_sink::LogEventSink;
use hydrostation::adapters::mqtt::MqttSink;
use hydrostation::adapters::nvs::NvsAdapter;
use hydrostation::adapters::wifi;
use hydrostation::app::events::AppEvent;
use hydrostation::app::ports::{ConfigPort, EventSink};
use hydrostation::app::service::AppService;
use hydrostation::config::SystemConfig;
use hydrostation::drivers::relay::RelayDriver;
use hydrostation::sensors::dht::DhtSensor;
use hydrostation::sensors::light::LightSensor;
use hydrostation::sensors::ph::PhProbe;
use hydrostation::sensors::tds::TdsProbe;
use hydrostation::sensors::water_temp::WaterTempSensor;
use hydrostation::sensors::SensorHub;
use hydrostation::{drivers, pins};

// ── Composite sink ────────────────────────────────────────────
//
// Every event goes to the serial log; telemetry additionally goes to
// MQTT when the broker session is up.  The MQTT half is optional so a
// failed client construction degrades to log-only operation.

struct CompositeSink {
    log: LogEventSink,
    mqtt: Option<MqttSink>,
}

impl EventSink for CompositeSink {
    fn emit(&mut self, event: &AppEvent) {
        self.log.emit(event);
        if let Some(mqtt) = self.mqtt.as_mut() {
            mqtt.emit(event);
        }
    }
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  HydroStation v{}                 ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Initialise hardware peripherals ────────────────────
    if let Err(e) = drivers::hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 3. Load config from NVS (or defaults) ─────────────────
    let config = match NvsAdapter::new() {
        Ok(nvs) => match nvs.load() {
            Ok(cfg) => {
                info!("Config loaded from NVS");
                cfg
            }
            Err(e) => {
                warn!("NVS config load failed ({}), using defaults", e);
                SystemConfig::default()
            }
        },
        Err(e) => {
            warn!("NVS init failed ({}), running with defaults", e);
            SystemConfig::default()
        }
    };

    // ── 4. Network bring-up ───────────────────────────────────
    //
    // Both halves are best-effort: the control loop runs the reservoir
    // with or without connectivity, telemetry just goes dark.
    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs_partition = EspDefaultNvsPartition::take()?;

    let _wifi = match wifi::connect_blocking(
        peripherals.modem,
        sysloop,
        nvs_partition,
        &config.wifi_ssid,
        &config.wifi_pass,
    ) {
        Ok(w) => Some(w),
        Err(e) => {
            warn!("WiFi unavailable ({e}); running offline");
            None
        }
    };

    let mqtt = if _wifi.is_some() {
        match MqttSink::new(&config.mqtt_broker, &config.mqtt_topic) {
            Ok(m) => Some(m),
            Err(e) => {
                warn!("MQTT client init failed ({e}); telemetry to log only");
                None
            }
        }
    } else {
        None
    };

    // ── 5. Construct adapters ─────────────────────────────────
    let sensor_hub = SensorHub::new(
        PhProbe::new(pins::PH_ADC_GPIO, config.ph_sample_interval_ms),
        TdsProbe::new(pins::TDS_ADC_GPIO),
        LightSensor::new(pins::LIGHT_ADC_GPIO),
        DhtSensor::new(pins::DHT_GPIO),
        WaterTempSensor::new(pins::ONE_WIRE_GPIO),
    );

    let mut hw = HardwareAdapter::new(
        sensor_hub,
        RelayDriver::new(pins::RELAY_CLEAN_WATER_GPIO),
        RelayDriver::new(pins::RELAY_NUTRIENT_GPIO),
        RelayDriver::new(pins::RELAY_GROW_LIGHT_GPIO),
    );

    let mut sink = CompositeSink {
        log: LogEventSink::new(),
        mqtt,
    };

    // ── 6. Construct app service ──────────────────────────────
    let cycle_interval_ms = config.cycle_interval_ms;
    let mut app = AppService::new(config);
    app.start(&mut sink);

    info!("System ready. Entering control loop.");

    // ── 7. Control loop ───────────────────────────────────────
    loop {
        app.tick(&mut hw, &mut sink);
        FreeRtos::delay_ms(cycle_interval_ms);
    }
}
