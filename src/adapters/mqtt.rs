//! MQTT telemetry sink.
//!
//! Implements [`EventSink`] by publishing the encoded telemetry record to
//! the configured topic, one message per cycle, QoS 0, fire-and-forget.
//!
//! ## Non-blocking by design
//!
//! Connection state is maintained by the ESP-IDF MQTT client's background
//! task via the event callback; `emit` only checks an atomic flag.  When
//! the broker is down the record is dropped and the control cycle
//! proceeds — sensing and actuation never stall on network state.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use esp_idf_svc::mqtt::client::{EspMqttClient, EventPayload, MqttClientConfiguration, QoS};
use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::error::CommsError;
use crate::telemetry;

/// MQTT publisher adapter.
pub struct MqttSink {
    client: EspMqttClient<'static>,
    topic: String,
    connected: Arc<AtomicBool>,
}

impl MqttSink {
    /// Create the client and start its background connection task.
    ///
    /// Returns as soon as the client is constructed — the broker session
    /// is established (and re-established) asynchronously.
    pub fn new(broker_url: &str, topic: &str) -> anyhow::Result<Self> {
        let connected = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&connected);

        let client = EspMqttClient::new_cb(
            broker_url,
            &MqttClientConfiguration {
                client_id: Some("hydrostation"),
                ..Default::default()
            },
            move |event| match event.payload() {
                EventPayload::Connected(_) => {
                    flag.store(true, Ordering::Release);
                    info!("MQTT connected");
                }
                EventPayload::Disconnected => {
                    flag.store(false, Ordering::Release);
                    warn!("MQTT disconnected — telemetry paused");
                }
                _ => {}
            },
        )?;

        Ok(Self {
            client,
            topic: topic.to_owned(),
            connected,
        })
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }
}

impl EventSink for MqttSink {
    fn emit(&mut self, event: &AppEvent) {
        let AppEvent::Telemetry(t) = event else {
            return;
        };

        if !self.is_connected() {
            debug!("MQTT offline — dropping this cycle's telemetry");
            return;
        }

        match telemetry::encode(&t.reading, &t.command) {
            Ok(payload) => {
                // Fire-and-forget: no acknowledgment wait, no per-message retry.
                if let Err(e) =
                    self.client
                        .enqueue(&self.topic, QoS::AtMostOnce, false, &payload)
                {
                    warn!("{}: {e}", CommsError::MqttPublishFailed);
                }
            }
            Err(e) => warn!("telemetry encode failed: {e}"),
        }
    }
}
