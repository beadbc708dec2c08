// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Inbound request frames.

use serde::Deserialize;

/// A decoded request from the frontend.
///
/// The wire format is `{"type": "<snake_case tag>", ...payload}`. Payload
/// fields the simulator does not consume are ignored during deserialization,
/// so requests built for the real firmware (extra `ssid` on connect, `action`
/// on `test_manual`, full program bodies) decode cleanly.
///
/// # Examples
///
/// ```
/// use rainmock_lib::message::Request;
///
/// let request: Request = serde_json::from_str(r#"{"type":"ping"}"#).unwrap();
/// assert_eq!(request, Request::Ping);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    /// Connection liveness probe.
    Ping,

    /// Asks the device for its current clock reading.
    TimeUpdate,

    /// Asks the device to scan for nearby wifi networks.
    WifiScan,

    /// Asks for the current wifi connection status.
    WifiStatus,

    /// Asks the device to join a wifi network.
    WifiConnect {
        /// Target network name. The simulator accepts any value.
        #[serde(default)]
        ssid: Option<String>,
        /// Station password. The simulator only accepts `"password"`;
        /// an absent password counts as incorrect.
        #[serde(default)]
        password: Option<String>,
    },

    /// Asks the device to drop its wifi connection.
    WifiDisconnect,

    /// Asks for the hardware/memory/storage snapshot.
    GetSystemInfo,

    /// Creates a zone, or updates one when `zone_id` matches.
    CreateOrUpdateZone {
        /// Existing zone to update; absent to create a new zone.
        #[serde(default)]
        zone_id: Option<u32>,
        /// Display name for the zone.
        name: String,
        /// Output pin driving the zone's valve.
        output: u32,
    },

    /// Asks to delete a zone. Always rejected by the simulator.
    DeleteZone {
        /// Zone to delete. Unused; the request is rejected regardless.
        #[serde(default)]
        zone_id: Option<u32>,
    },

    /// Asks for the full zone collection.
    GetZones,

    /// Asks for the full program collection.
    GetPrograms,

    /// Asks to create or update a program. Always rejected by the simulator.
    CreateOrUpdateProgram,

    /// Asks to delete a program. Always rejected by the simulator.
    DeleteProgram,

    /// Asks to manually start or stop a zone or program run. Always rejected
    /// by the simulator.
    TestManual,

    /// Enables or disables a zone (when `zone_id` is present) or a program
    /// (via `program_id` otherwise).
    Enable {
        /// Zone to toggle. Takes precedence over `program_id`.
        #[serde(default)]
        zone_id: Option<u32>,
        /// Program to toggle when no `zone_id` is given.
        #[serde(default)]
        program_id: Option<u32>,
        /// New enablement value.
        is_enabled: bool,
    },

    /// Asks for the settings snapshot.
    GetSettings,

    /// Any `type` tag the protocol does not define. Produces no response.
    #[serde(other)]
    Unknown,
}
