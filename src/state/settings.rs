// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device settings.

use serde::Serialize;

/// Device settings as reported in the `settings` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Over-the-air update settings.
    pub ota: OtaSettings,
    /// Wifi station configuration state.
    pub wifi: WifiSettings,
}

/// Over-the-air update configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtaSettings {
    /// Whether firmware uploads require the device password.
    pub requires_password: bool,
}

/// Wifi station configuration state.
///
/// `connected` and `setup` move together: connecting to a network both
/// configures and connects the station, disconnecting clears both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WifiSettings {
    /// Whether the station is currently connected.
    pub connected: bool,
    /// Whether a station network has been configured.
    pub setup: bool,
}

impl Default for Settings {
    /// Factory state: OTA password required, wifi unconfigured.
    fn default() -> Self {
        Self {
            ota: OtaSettings {
                requires_password: true,
            },
            wifi: WifiSettings {
                connected: false,
                setup: false,
            },
        }
    }
}
