//! WiFi station-mode bootstrap.
//!
//! Blocking connect at boot, mirroring the deployment's behaviour: the
//! station has no use for its control loop before it can reach the broker
//! at least once, so startup simply waits for the network.  After boot the
//! ESP-IDF driver handles reconnection in the background.

use anyhow::{Context, anyhow};
use esp_idf_hal::modem::Modem;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{BlockingWifi, ClientConfiguration, Configuration, EspWifi};
use log::info;

/// Connect to the configured AP, blocking until the interface is up.
pub fn connect_blocking(
    modem: Modem,
    sysloop: EspSystemEventLoop,
    nvs: EspDefaultNvsPartition,
    ssid: &str,
    password: &str,
) -> anyhow::Result<BlockingWifi<EspWifi<'static>>> {
    let mut wifi = BlockingWifi::wrap(
        EspWifi::new(modem, sysloop.clone(), Some(nvs)).context("WiFi driver init")?,
        sysloop,
    )?;

    wifi.set_configuration(&Configuration::Client(ClientConfiguration {
        ssid: ssid
            .try_into()
            .map_err(|()| anyhow!("SSID too long (max 32 bytes)"))?,
        password: password
            .try_into()
            .map_err(|()| anyhow!("password too long (max 64 bytes)"))?,
        ..Default::default()
    }))?;

    wifi.start()?;
    info!("Connecting to WiFi '{ssid}'...");
    wifi.connect()?;
    wifi.wait_netif_up()?;

    let ip = wifi.wifi().sta_netif().get_ip_info()?;
    info!("WiFi connected, IP: {}", ip.ip);
    Ok(wifi)
}
