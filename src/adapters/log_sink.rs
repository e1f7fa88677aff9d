//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).
//! The MQTT adapter implements the same trait for the network path.

use log::{error, info};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                let r = &t.reading;
                info!(
                    "TELEM | air={:.1}C rh={:.1}% water={:.2}C | pH={:.2} | \
                     TDS={:.0}ppm | light={} | clean_water={} nutrient={} lamp={}",
                    r.air_temp_c,
                    r.humidity_pct,
                    r.water_temp_c,
                    r.ph,
                    r.tds_ppm,
                    r.light_raw,
                    on_off(t.command.clean_water_pump),
                    on_off(t.command.nutrient_pump),
                    on_off(t.command.grow_light),
                );
            }
            AppEvent::ActuatorsChanged(cmd) => {
                info!(
                    "RELAY | clean_water={} nutrient={} lamp={}",
                    on_off(cmd.clean_water_pump),
                    on_off(cmd.nutrient_pump),
                    on_off(cmd.grow_light),
                );
            }
            AppEvent::FaultShutdown { unknown_cycles } => {
                error!(
                    "FAULT | TDS unknown for {} cycles — actuators forced OFF",
                    unknown_cycles
                );
            }
            AppEvent::FaultRecovered => {
                info!("FAULT | TDS recovered — shutdown released");
            }
            AppEvent::Started => {
                info!("START | control loop running");
            }
        }
    }
}

fn on_off(level: bool) -> &'static str {
    if level { "ON" } else { "OFF" }
}
