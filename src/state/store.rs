// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The mutable device state behind the response engine.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use rand::Rng;

use super::program::{Program, ProgramStatus, ProgramZone, Schedule};
use super::settings::Settings;
use super::system_info::SystemInfo;
use super::wifi::WifiStatus;
use super::zone::{Zone, ZoneStatus};

/// Upper bound (exclusive) for randomly drawn zone ids.
const ZONE_ID_RANGE: u32 = 10_000;

/// A store shared between transport handles.
///
/// The listener hands one of these to every connection so mutations made by
/// one client are visible to all others, like a single physical device.
pub type SharedStore = Arc<RwLock<StateStore>>;

/// Simulated device state: settings, zones, programs, and diagnostics.
///
/// A fresh store is seeded with demo zones and programs so the frontend has
/// something to render immediately. The store is a plain owned value;
/// callers that need sharing wrap it via [`StateStore::shared`].
///
/// Only the response engine mutates the store, one request at a time. The
/// mutators therefore do no internal locking.
///
/// # Examples
///
/// ```
/// use rainmock_lib::state::StateStore;
///
/// let store = StateStore::new();
/// assert_eq!(store.zones().len(), 4);
/// assert!(!store.settings().wifi.connected);
/// ```
#[derive(Debug, Clone)]
pub struct StateStore {
    settings: Settings,
    zones: Vec<Zone>,
    programs: Vec<Program>,
    system_info: SystemInfo,
}

impl StateStore {
    /// Creates a store seeded with the demo zones and programs.
    #[must_use]
    pub fn new() -> Self {
        let now = Utc::now().timestamp();
        Self {
            settings: Settings::default(),
            zones: seed_zones(now),
            programs: seed_programs(now),
            system_info: SystemInfo::default(),
        }
    }

    /// Creates a store and wraps it for sharing across connections.
    #[must_use]
    pub fn shared() -> SharedStore {
        Arc::new(RwLock::new(Self::new()))
    }

    // ========== Read access ==========

    /// Current settings.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Zone collection in insertion order.
    #[must_use]
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Program collection in insertion order.
    #[must_use]
    pub fn programs(&self) -> &[Program] {
        &self.programs
    }

    /// The static diagnostics snapshot.
    #[must_use]
    pub fn system_info(&self) -> &SystemInfo {
        &self.system_info
    }

    /// Wifi status derived from the station connection flag.
    #[must_use]
    pub fn wifi_status(&self) -> WifiStatus {
        WifiStatus::for_connection(self.settings.wifi.connected)
    }

    // ========== Mutators (response engine only) ==========

    /// Sets the wifi station state. `connected` and `setup` always move
    /// together: a successful connect configures the station, a disconnect
    /// deconfigures it.
    pub fn set_wifi(&mut self, connected: bool) {
        self.settings.wifi.connected = connected;
        self.settings.wifi.setup = connected;
    }

    /// Updates the zone matching `zone_id`, or appends a new zone under a
    /// freshly drawn id when `zone_id` is absent or matches nothing.
    ///
    /// Updates touch only `name` and `output`; enablement, run history, and
    /// status are preserved.
    pub fn upsert_zone(&mut self, zone_id: Option<u32>, name: &str, output: u32) {
        if let Some(zone) = zone_id.and_then(|id| self.zones.iter_mut().find(|z| z.id == id)) {
            zone.name = name.to_string();
            zone.output = output;
        } else {
            let id = self.fresh_zone_id();
            self.zones.push(Zone::new(id, name, output));
        }
    }

    /// Sets a zone's enablement and derives its status: `idle` when
    /// enabling, `disabled` when disabling. Unknown ids are a no-op.
    pub fn set_zone_enabled(&mut self, zone_id: u32, enabled: bool) {
        if let Some(zone) = self.zones.iter_mut().find(|z| z.id == zone_id) {
            zone.enabled = enabled;
            zone.status = Some(if enabled {
                ZoneStatus::Idle
            } else {
                ZoneStatus::Disabled
            });
        }
    }

    /// Sets a program's enablement. Status is left untouched. Unknown ids
    /// are a no-op.
    pub fn set_program_enabled(&mut self, program_id: u32, enabled: bool) {
        if let Some(program) = self.programs.iter_mut().find(|p| p.id == program_id) {
            program.enabled = enabled;
        }
    }

    /// Draws a random zone id not currently in use.
    fn fresh_zone_id(&self) -> u32 {
        let mut rng = rand::thread_rng();
        loop {
            let id = rng.gen_range(1..ZONE_ID_RANGE);
            if !self.zones.iter().any(|z| z.id == id) {
                return id;
            }
        }
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_zones(now: i64) -> Vec<Zone> {
    vec![
        Zone {
            id: 1,
            name: "Front Lawn Demo".to_string(),
            output: 999,
            enabled: true,
            last_run: now - 50,
            status: Some(ZoneStatus::Idle),
        },
        Zone {
            id: 2,
            name: "Back Garden Demo".to_string(),
            output: 998,
            enabled: true,
            last_run: now - 20,
            status: Some(ZoneStatus::Running),
        },
        Zone {
            id: 3,
            name: "Flower Beds Demo".to_string(),
            output: 997,
            enabled: true,
            last_run: now,
            status: Some(ZoneStatus::Idle),
        },
        Zone {
            id: 4,
            name: "Side Yard Demo".to_string(),
            output: 996,
            enabled: false,
            last_run: 0,
            status: Some(ZoneStatus::Disabled),
        },
    ]
}

fn seed_programs(now: i64) -> Vec<Program> {
    vec![
        Program {
            id: 1,
            name: "Morning Routine Demo".to_string(),
            enabled: true,
            schedule: Schedule {
                days: vec![0, 2, 3],
                start_time: "06:00".to_string(),
            },
            zones: vec![
                ProgramZone {
                    id: 1,
                    duration: 999,
                    order: 1,
                },
                ProgramZone {
                    id: 2,
                    duration: 999,
                    order: 2,
                },
                ProgramZone {
                    id: 3,
                    duration: 999,
                    order: 3,
                },
            ],
            last_run: now - 5,
            next_run: now + 5,
            status: ProgramStatus::Scheduled,
        },
        Program {
            id: 2,
            name: "Weekend Deep Water".to_string(),
            enabled: true,
            schedule: Schedule {
                days: vec![5, 6],
                start_time: "05:30".to_string(),
            },
            zones: vec![
                ProgramZone {
                    id: 1,
                    duration: 999,
                    order: 1,
                },
                ProgramZone {
                    id: 2,
                    duration: 999,
                    order: 2,
                },
                ProgramZone {
                    id: 4,
                    duration: 999,
                    order: 3,
                },
            ],
            last_run: now - 8,
            next_run: now + 8,
            status: ProgramStatus::Running,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_store_matches_demo_seed() {
        let store = StateStore::new();
        assert_eq!(store.zones().len(), 4);
        assert_eq!(store.programs().len(), 2);
        assert_eq!(store.zones()[0].name, "Front Lawn Demo");
        assert_eq!(store.zones()[3].status, Some(ZoneStatus::Disabled));
        assert_eq!(store.programs()[1].schedule.days, vec![5, 6]);
    }

    #[test]
    fn set_wifi_moves_both_flags() {
        let mut store = StateStore::new();
        store.set_wifi(true);
        assert!(store.settings().wifi.connected);
        assert!(store.settings().wifi.setup);

        store.set_wifi(false);
        assert!(!store.settings().wifi.connected);
        assert!(!store.settings().wifi.setup);
    }

    #[test]
    fn wifi_status_follows_settings() {
        let mut store = StateStore::new();
        assert_eq!(store.wifi_status().mode, "AP+STA");
        store.set_wifi(true);
        assert_eq!(store.wifi_status().mode, "STA");
    }

    #[test]
    fn upsert_without_id_appends_fresh_zone() {
        let mut store = StateStore::new();
        store.upsert_zone(None, "Patio", 5);

        assert_eq!(store.zones().len(), 5);
        let zone = store.zones().last().unwrap();
        assert_eq!(zone.name, "Patio");
        assert_eq!(zone.output, 5);
        assert!(zone.status.is_none());
        // Id must not collide with the seeds.
        assert_eq!(
            store.zones().iter().filter(|z| z.id == zone.id).count(),
            1
        );
    }

    #[test]
    fn upsert_ids_are_always_unused() {
        let mut store = StateStore::new();
        for i in 0..50 {
            store.upsert_zone(None, &format!("Zone {i}"), i);
        }
        let mut ids: Vec<u32> = store.zones().iter().map(|z| z.id).collect();
        let len = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), len);
    }

    #[test]
    fn upsert_with_matching_id_updates_in_place() {
        let mut store = StateStore::new();
        store.upsert_zone(Some(2), "Renamed", 42);

        assert_eq!(store.zones().len(), 4);
        let zone = &store.zones()[1];
        assert_eq!(zone.name, "Renamed");
        assert_eq!(zone.output, 42);
        // Everything else survives the update.
        assert!(zone.enabled);
        assert_eq!(zone.status, Some(ZoneStatus::Running));
    }

    #[test]
    fn upsert_with_unknown_id_appends() {
        let mut store = StateStore::new();
        store.upsert_zone(Some(9999), "Ghost", 1);
        assert_eq!(store.zones().len(), 5);
    }

    #[test]
    fn zone_enablement_derives_status() {
        let mut store = StateStore::new();
        store.set_zone_enabled(1, false);
        let zone = &store.zones()[0];
        assert!(!zone.enabled);
        assert_eq!(zone.status, Some(ZoneStatus::Disabled));

        store.set_zone_enabled(1, true);
        let zone = &store.zones()[0];
        assert!(zone.enabled);
        assert_eq!(zone.status, Some(ZoneStatus::Idle));
    }

    #[test]
    fn enablement_with_unknown_id_is_noop() {
        let mut store = StateStore::new();
        let before = store.clone();
        store.set_zone_enabled(777, false);
        store.set_program_enabled(777, false);
        assert_eq!(store.zones(), before.zones());
        assert_eq!(store.programs(), before.programs());
    }

    #[test]
    fn program_enablement_leaves_status_alone() {
        let mut store = StateStore::new();
        store.set_program_enabled(2, false);
        let program = &store.programs()[1];
        assert!(!program.enabled);
        assert_eq!(program.status, ProgramStatus::Running);
    }
}
