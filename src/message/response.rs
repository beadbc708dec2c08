// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outbound response frames.

use serde::Serialize;

use crate::state::{OtaSettings, Program, Settings, SystemInfo, WifiSettings, WifiStatus, Zone};

/// A response frame sent back to the frontend.
///
/// Serializes to `{"type": "<snake_case tag>", ...payload}` — the same
/// envelope the real firmware emits.
///
/// # Examples
///
/// ```
/// use rainmock_lib::message::Response;
///
/// let json = serde_json::to_string(&Response::Pong).unwrap();
/// assert_eq!(json, r#"{"type":"pong"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    /// Reply to `ping`.
    Pong,

    /// Reply to `time_update` with the device clock reading.
    TimeUpdateResponse {
        /// Always `true` in the simulator.
        success: bool,
        /// Current time as epoch seconds.
        current_time: i64,
        /// Current time as an RFC 3339 timestamp.
        formatted_time: String,
    },

    /// Reply to `wifi_scan` with the visible networks.
    WifiList {
        /// Networks found by the scan.
        networks: Vec<WifiNetwork>,
    },

    /// Current wifi status, sent after status queries and connection
    /// changes.
    WifiStatus {
        /// The derived status snapshot.
        status: WifiStatus,
    },

    /// Settings snapshot. Fields sit at the top level of the frame, next to
    /// `type`.
    Settings {
        /// OTA settings.
        ota: OtaSettings,
        /// Wifi configuration flags.
        wifi: WifiSettings,
    },

    /// Reply to `get_system_info`. The wire field is named `settings` for
    /// compatibility with the firmware's frame layout.
    SystemInfo {
        /// The diagnostics snapshot.
        settings: SystemInfo,
    },

    /// The full zone collection, sent after zone queries and mutations.
    ZoneList {
        /// Zones in insertion order.
        zones: Vec<Zone>,
    },

    /// The full program collection, sent after program queries and
    /// enablement changes.
    ProgramList {
        /// Programs in insertion order.
        programs: Vec<Program>,
    },

    /// A protocol-level rejection with a human-readable reason.
    Error {
        /// What went wrong, phrased for the user.
        message: String,
    },
}

impl Response {
    /// Builds a `settings` frame from the current settings.
    #[must_use]
    pub fn settings(settings: &Settings) -> Self {
        Self::Settings {
            ota: settings.ota.clone(),
            wifi: settings.wifi.clone(),
        }
    }

    /// Builds an `error` frame.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

/// One network entry in a `wifi_list` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WifiNetwork {
    /// Network name.
    pub ssid: String,
    /// Signal strength in dBm.
    pub rssi: i32,
    /// Whether the network requires a password.
    pub secure: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StateStore;

    #[test]
    fn pong_is_bare_type() {
        let json = serde_json::to_value(Response::Pong).unwrap();
        assert_eq!(json, serde_json::json!({"type": "pong"}));
    }

    #[test]
    fn settings_fields_sit_next_to_type() {
        let store = StateStore::new();
        let json = serde_json::to_value(Response::settings(store.settings())).unwrap();
        assert_eq!(json["type"], "settings");
        assert_eq!(json["ota"]["requiresPassword"], true);
        assert_eq!(json["wifi"]["connected"], false);
    }

    #[test]
    fn system_info_payload_is_under_settings_key() {
        let store = StateStore::new();
        let json = serde_json::to_value(Response::SystemInfo {
            settings: store.system_info().clone(),
        })
        .unwrap();
        assert_eq!(json["type"], "system_info");
        assert_eq!(json["settings"]["hardware"]["chip_model"], "ESP32");
    }

    #[test]
    fn error_carries_message() {
        let json = serde_json::to_value(Response::error("Password incorrect")).unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["message"], "Password incorrect");
    }

    #[test]
    fn zone_list_serializes_zones() {
        let store = StateStore::new();
        let json = serde_json::to_value(Response::ZoneList {
            zones: store.zones().to_vec(),
        })
        .unwrap();
        assert_eq!(json["type"], "zone_list");
        assert_eq!(json["zones"].as_array().unwrap().len(), 4);
        assert_eq!(json["zones"][0]["name"], "Front Lawn Demo");
    }

    #[test]
    fn time_update_response_shape() {
        let json = serde_json::to_value(Response::TimeUpdateResponse {
            success: true,
            current_time: 1_700_000_000,
            formatted_time: "2023-11-14T22:13:20+00:00".to_string(),
        })
        .unwrap();
        assert_eq!(json["type"], "time_update_response");
        assert_eq!(json["success"], true);
        assert_eq!(json["current_time"], 1_700_000_000);
    }
}
