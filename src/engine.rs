// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The response engine: one decoded request in, an ordered sequence of
//! response frames out.
//!
//! The engine is a pure dispatcher over [`Request`]. It owns no state; the
//! [`StateStore`] is passed in by the caller, so every transport (in-process
//! shim, listener, tests) decides for itself which store a request runs
//! against. Callers must deliver the returned responses in order — several
//! request types answer with more than one frame.

use chrono::Utc;
use rand::Rng;

use crate::message::{Request, Response, WifiNetwork};
use crate::state::StateStore;

/// The only station password the simulator accepts.
const WIFI_PASSWORD: &str = "password";

/// SSID pool for synthesized scan results.
const SCAN_SSIDS: [&str; 6] = [
    "Mock_Network",
    "Test_AP",
    "ESP32",
    "OfficeNet",
    "CafeWiFi",
    "IoTNet",
];

/// Handles one request against the given store.
///
/// Returns the response frames to deliver, in order. The result is empty
/// only for [`Request::Unknown`]; every recognized request produces at least
/// one frame. Rejected operations (deleting zones, touching programs, a bad
/// wifi password) come back as `error` frames, never as a Rust error.
///
/// # Examples
///
/// ```
/// use rainmock_lib::engine;
/// use rainmock_lib::message::{Request, Response};
/// use rainmock_lib::state::StateStore;
///
/// let mut store = StateStore::new();
/// let responses = engine::handle(&Request::Ping, &mut store);
/// assert_eq!(responses, vec![Response::Pong]);
/// ```
#[must_use]
pub fn handle(request: &Request, store: &mut StateStore) -> Vec<Response> {
    tracing::debug!(?request, "Handling request");

    match request {
        Request::Ping => vec![Response::Pong],

        Request::TimeUpdate => {
            let now = Utc::now();
            vec![Response::TimeUpdateResponse {
                success: true,
                current_time: now.timestamp(),
                formatted_time: now.to_rfc3339(),
            }]
        }

        Request::WifiScan => vec![Response::WifiList {
            networks: scan_networks(),
        }],

        Request::WifiStatus => vec![Response::WifiStatus {
            status: store.wifi_status(),
        }],

        Request::WifiConnect { password, .. } => {
            if password.as_deref() == Some(WIFI_PASSWORD) {
                store.set_wifi(true);
                vec![
                    Response::WifiStatus {
                        status: store.wifi_status(),
                    },
                    Response::settings(store.settings()),
                ]
            } else {
                vec![Response::error("Password incorrect")]
            }
        }

        Request::WifiDisconnect => {
            store.set_wifi(false);
            vec![
                Response::WifiStatus {
                    status: store.wifi_status(),
                },
                Response::settings(store.settings()),
            ]
        }

        Request::GetSystemInfo => vec![Response::SystemInfo {
            settings: store.system_info().clone(),
        }],

        Request::CreateOrUpdateZone {
            zone_id,
            name,
            output,
        } => {
            store.upsert_zone(*zone_id, name, *output);
            vec![zone_list(store)]
        }

        Request::DeleteZone { .. } => vec![Response::error("This demo can't delete zones")],

        Request::GetZones => vec![zone_list(store)],

        Request::GetPrograms => vec![program_list(store)],

        Request::CreateOrUpdateProgram => {
            vec![Response::error("This demo can't modify programs")]
        }

        Request::DeleteProgram => vec![Response::error("This demo can't delete programs")],

        Request::TestManual => vec![Response::error("This demo can't run programs")],

        Request::Enable {
            zone_id,
            program_id,
            is_enabled,
        } => {
            // A zone id wins when both are present, matching the firmware.
            if let Some(id) = zone_id {
                store.set_zone_enabled(*id, *is_enabled);
                vec![zone_list(store)]
            } else {
                if let Some(id) = program_id {
                    store.set_program_enabled(*id, *is_enabled);
                }
                vec![program_list(store)]
            }
        }

        Request::GetSettings => vec![Response::settings(store.settings())],

        Request::Unknown => {
            tracing::debug!("Ignoring unrecognized request type");
            Vec::new()
        }
    }
}

fn zone_list(store: &StateStore) -> Response {
    Response::ZoneList {
        zones: store.zones().to_vec(),
    }
}

fn program_list(store: &StateStore) -> Response {
    Response::ProgramList {
        programs: store.programs().to_vec(),
    }
}

/// Synthesizes 3 to 6 scan results. Names repeat through a fixed pool,
/// signal strength is uniform in [-89, -30] dBm, and the first three entries
/// report as secured.
fn scan_networks() -> Vec<WifiNetwork> {
    let mut rng = rand::thread_rng();
    let count = rng.gen_range(3..=6);
    (0..count)
        .map(|i| WifiNetwork {
            ssid: SCAN_SSIDS[i % SCAN_SSIDS.len()].to_string(),
            rssi: -30 - rng.gen_range(0..60),
            secure: i < 3,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ProgramStatus, ZoneStatus};

    fn connect_request(password: &str) -> Request {
        Request::WifiConnect {
            ssid: Some("HomeNet".to_string()),
            password: Some(password.to_string()),
        }
    }

    #[test]
    fn ping_answers_pong() {
        let mut store = StateStore::new();
        assert_eq!(handle(&Request::Ping, &mut store), vec![Response::Pong]);
    }

    #[test]
    fn time_update_reports_current_clock() {
        let mut store = StateStore::new();
        let before = Utc::now().timestamp();
        let responses = handle(&Request::TimeUpdate, &mut store);
        let after = Utc::now().timestamp();

        let [
            Response::TimeUpdateResponse {
                success,
                current_time,
                formatted_time,
            },
        ] = responses.as_slice()
        else {
            panic!("expected a single time_update_response, got {responses:?}");
        };
        assert!(*success);
        assert!((before..=after).contains(current_time));
        // RFC 3339 date-time separator.
        assert!(formatted_time.contains('T'));
    }

    #[test]
    fn wifi_scan_bounds_hold() {
        let mut store = StateStore::new();
        for _ in 0..100 {
            let responses = handle(&Request::WifiScan, &mut store);
            let [Response::WifiList { networks }] = responses.as_slice() else {
                panic!("expected a single wifi_list");
            };
            assert!((3..=6).contains(&networks.len()));
            for (i, network) in networks.iter().enumerate() {
                assert!((-89..=-30).contains(&network.rssi), "rssi {}", network.rssi);
                assert_eq!(network.secure, i < 3);
                assert!(SCAN_SSIDS.contains(&network.ssid.as_str()));
            }
        }
    }

    #[test]
    fn wifi_status_reflects_store() {
        let mut store = StateStore::new();
        let responses = handle(&Request::WifiStatus, &mut store);
        let [Response::WifiStatus { status }] = responses.as_slice() else {
            panic!("expected a single wifi_status");
        };
        assert_eq!(status.mode, "AP+STA");
    }

    #[test]
    fn wifi_connect_with_correct_password() {
        let mut store = StateStore::new();
        let responses = handle(&connect_request("password"), &mut store);

        assert_eq!(responses.len(), 2);
        let Response::WifiStatus { status } = &responses[0] else {
            panic!("first frame must be wifi_status");
        };
        assert_eq!(status.mode, "STA");
        assert!(status.sta.connected);

        let Response::Settings { wifi, .. } = &responses[1] else {
            panic!("second frame must be settings");
        };
        assert!(wifi.connected);
        assert!(wifi.setup);
    }

    #[test]
    fn wifi_connect_with_wrong_password() {
        let mut store = StateStore::new();
        let responses = handle(&connect_request("hunter2"), &mut store);

        assert_eq!(
            responses,
            vec![Response::error("Password incorrect")]
        );
        assert!(!store.settings().wifi.connected);
        assert!(!store.settings().wifi.setup);
    }

    #[test]
    fn wifi_connect_without_password_is_incorrect() {
        let mut store = StateStore::new();
        let request = Request::WifiConnect {
            ssid: None,
            password: None,
        };
        let responses = handle(&request, &mut store);
        assert_eq!(responses, vec![Response::error("Password incorrect")]);
    }

    #[test]
    fn wifi_disconnect_is_idempotent() {
        let mut store = StateStore::new();
        handle(&connect_request("password"), &mut store);

        for _ in 0..2 {
            let responses = handle(&Request::WifiDisconnect, &mut store);
            assert_eq!(responses.len(), 2);
            let Response::WifiStatus { status } = &responses[0] else {
                panic!("first frame must be wifi_status");
            };
            assert_eq!(status.mode, "AP+STA");
            assert!(!store.settings().wifi.connected);
        }
    }

    #[test]
    fn get_system_info_returns_snapshot() {
        let mut store = StateStore::new();
        let responses = handle(&Request::GetSystemInfo, &mut store);
        let [Response::SystemInfo { settings }] = responses.as_slice() else {
            panic!("expected a single system_info");
        };
        assert_eq!(settings.hardware.chip_model, "ESP32");
    }

    #[test]
    fn create_zone_grows_collection_by_one() {
        let mut store = StateStore::new();
        let request = Request::CreateOrUpdateZone {
            zone_id: None,
            name: "Patio".to_string(),
            output: 5,
        };
        let responses = handle(&request, &mut store);

        let [Response::ZoneList { zones }] = responses.as_slice() else {
            panic!("expected a single zone_list");
        };
        assert_eq!(zones.len(), 5);
        assert_eq!(zones[4].name, "Patio");
    }

    #[test]
    fn update_zone_keeps_collection_length() {
        let mut store = StateStore::new();
        let request = Request::CreateOrUpdateZone {
            zone_id: Some(1),
            name: "Front Lawn".to_string(),
            output: 12,
        };
        let responses = handle(&request, &mut store);

        let [Response::ZoneList { zones }] = responses.as_slice() else {
            panic!("expected a single zone_list");
        };
        assert_eq!(zones.len(), 4);
        assert_eq!(zones[0].name, "Front Lawn");
        assert_eq!(zones[0].output, 12);
        assert_eq!(zones[0].status, Some(ZoneStatus::Idle));
    }

    #[test]
    fn delete_zone_is_rejected_and_mutates_nothing() {
        let mut store = StateStore::new();
        let responses = handle(&Request::DeleteZone { zone_id: Some(1) }, &mut store);

        assert_eq!(
            responses,
            vec![Response::error("This demo can't delete zones")]
        );
        assert_eq!(store.zones().len(), 4);
    }

    #[test]
    fn program_mutations_are_rejected() {
        let mut store = StateStore::new();
        let cases = [
            (
                Request::CreateOrUpdateProgram,
                "This demo can't modify programs",
            ),
            (Request::DeleteProgram, "This demo can't delete programs"),
            (Request::TestManual, "This demo can't run programs"),
        ];
        for (request, message) in cases {
            assert_eq!(handle(&request, &mut store), vec![Response::error(message)]);
        }
        assert_eq!(store.programs().len(), 2);
    }

    #[test]
    fn enable_zone_round_trip() {
        let mut store = StateStore::new();

        let off = Request::Enable {
            zone_id: Some(1),
            program_id: None,
            is_enabled: false,
        };
        let responses = handle(&off, &mut store);
        let [Response::ZoneList { zones }] = responses.as_slice() else {
            panic!("expected a single zone_list");
        };
        assert!(!zones[0].enabled);
        assert_eq!(zones[0].status, Some(ZoneStatus::Disabled));

        let on = Request::Enable {
            zone_id: Some(1),
            program_id: None,
            is_enabled: true,
        };
        let responses = handle(&on, &mut store);
        let [Response::ZoneList { zones }] = responses.as_slice() else {
            panic!("expected a single zone_list");
        };
        assert!(zones[0].enabled);
        assert_eq!(zones[0].status, Some(ZoneStatus::Idle));
    }

    #[test]
    fn enable_program_toggles_flag_only() {
        let mut store = StateStore::new();
        let request = Request::Enable {
            zone_id: None,
            program_id: Some(2),
            is_enabled: false,
        };
        let responses = handle(&request, &mut store);

        let [Response::ProgramList { programs }] = responses.as_slice() else {
            panic!("expected a single program_list");
        };
        assert!(!programs[1].enabled);
        assert_eq!(programs[1].status, ProgramStatus::Running);
    }

    #[test]
    fn enable_with_unknown_id_returns_unchanged_collection() {
        let mut store = StateStore::new();
        let request = Request::Enable {
            zone_id: Some(424),
            program_id: None,
            is_enabled: false,
        };
        let responses = handle(&request, &mut store);

        let [Response::ZoneList { zones }] = responses.as_slice() else {
            panic!("expected a single zone_list");
        };
        assert_eq!(zones, store.zones());
        assert!(zones[0].enabled);
    }

    #[test]
    fn get_settings_on_fresh_store() {
        let mut store = StateStore::new();
        let responses = handle(&Request::GetSettings, &mut store);

        let json = serde_json::to_value(&responses[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "settings",
                "ota": {"requiresPassword": true},
                "wifi": {"connected": false, "setup": false},
            })
        );
    }

    #[test]
    fn unknown_request_produces_nothing() {
        let mut store = StateStore::new();
        assert!(handle(&Request::Unknown, &mut store).is_empty());
    }
}
