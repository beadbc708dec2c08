// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wifi status snapshots.
//!
//! The simulator models exactly two radio states. Disconnected devices run
//! AP+STA mode with an open setup access point; connected devices run plain
//! STA mode joined to a fixed synthetic network. There are no intermediate
//! states (associating, DHCP, ...) because the protocol never reports them.

use serde::Serialize;

/// Wifi status as carried by the `wifi_status` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WifiStatus {
    /// Radio mode: `"AP+STA"` while unconfigured, `"STA"` once connected.
    pub mode: String,
    /// Station interface MAC address.
    pub mac: String,
    /// Station connection details.
    pub sta: StaStatus,
    /// Setup access point details. Only present while disconnected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ap: Option<ApStatus>,
}

/// Station-side connection details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StaStatus {
    /// Whether the station is associated with a network.
    pub connected: bool,
    /// SSID stored in the station config, empty when unconfigured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configured_ssid: Option<String>,
    /// SSID of the joined network.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssid: Option<String>,
    /// Signal strength in dBm.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rssi: Option<i32>,
    /// Radio channel of the joined network.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<u8>,
    /// Authentication mode of the joined network.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_mode: Option<String>,
    /// Assigned IP address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    /// Gateway address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    /// Network mask.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub netmask: Option<String>,
}

/// Setup access point details, advertised while the station is unconfigured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApStatus {
    /// Access point SSID.
    pub ssid: String,
    /// Radio channel.
    pub channel: u8,
    /// Authentication mode.
    pub auth_mode: String,
    /// Access point IP address.
    pub ip: String,
    /// Access point MAC address.
    pub mac: String,
    /// Number of stations currently connected to the AP.
    pub connected_stations: u8,
    /// Maximum simultaneous stations.
    pub max_connections: u8,
}

const STA_MAC: &str = "12:34:56:78:90:ab";

impl WifiStatus {
    /// Snapshot for a device whose station is unconfigured: AP+STA mode with
    /// the setup access point up.
    #[must_use]
    pub fn disconnected() -> Self {
        Self {
            mode: "AP+STA".to_string(),
            mac: STA_MAC.to_string(),
            sta: StaStatus {
                connected: false,
                configured_ssid: Some(String::new()),
                ..StaStatus::default()
            },
            ap: Some(ApStatus {
                ssid: "RainMaker".to_string(),
                channel: 10,
                auth_mode: "WPA_WPA2_PSK".to_string(),
                ip: "192.168.4.1".to_string(),
                mac: "ab:cd:ef:12:34:56".to_string(),
                connected_stations: 1,
                max_connections: 2,
            }),
        }
    }

    /// Snapshot for a device joined to its home network in STA mode.
    #[must_use]
    pub fn connected() -> Self {
        Self {
            mode: "STA".to_string(),
            mac: STA_MAC.to_string(),
            sta: StaStatus {
                connected: true,
                configured_ssid: None,
                ssid: Some("Wi Believe I Can Fi".to_string()),
                rssi: Some(-48),
                channel: Some(8),
                auth_mode: Some("WPA2_PSK".to_string()),
                ip: Some("192.168.1.10".to_string()),
                gateway: Some("192.168.1.1".to_string()),
                netmask: Some("255.255.255.0".to_string()),
            },
            ap: None,
        }
    }

    /// Selects the snapshot matching a station connection flag.
    #[must_use]
    pub fn for_connection(connected: bool) -> Self {
        if connected {
            Self::connected()
        } else {
            Self::disconnected()
        }
    }
}
