// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zones: the controllable outputs of the sprinkler controller.

use serde::Serialize;

/// A single irrigation zone (one valve output).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    /// Stable identifier, unique within the zone collection.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Output pin driving the valve.
    pub output: u32,
    /// Whether the zone may be scheduled.
    pub enabled: bool,
    /// Epoch seconds of the last run, 0 if the zone never ran.
    pub last_run: i64,
    /// Run status. Freshly created zones carry no status until the first
    /// enable/disable request derives one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ZoneStatus>,
}

/// Run status of a zone.
///
/// The engine only ever writes [`ZoneStatus::Idle`] and
/// [`ZoneStatus::Disabled`]; `Running` appears in seed data to exercise the
/// frontend but is never entered by a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneStatus {
    /// Enabled and waiting for its next run.
    Idle,
    /// Currently watering.
    Running,
    /// Disabled; excluded from scheduling.
    Disabled,
}

impl Zone {
    /// Creates a zone as the upsert operation does: enabled, never run,
    /// status unset.
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>, output: u32) -> Self {
        Self {
            id,
            name: name.into(),
            output,
            enabled: true,
            last_run: 0,
            status: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_zone_has_no_status() {
        let zone = Zone::new(7, "Patio", 4);
        assert!(zone.enabled);
        assert_eq!(zone.last_run, 0);
        assert!(zone.status.is_none());
    }

    #[test]
    fn serializes_camel_case_and_omits_unset_status() {
        let json = serde_json::to_value(Zone::new(7, "Patio", 4)).unwrap();
        assert_eq!(json["lastRun"], 0);
        assert!(json.get("status").is_none());

        let mut zone = Zone::new(7, "Patio", 4);
        zone.status = Some(ZoneStatus::Disabled);
        let json = serde_json::to_value(zone).unwrap();
        assert_eq!(json["status"], "disabled");
    }
}
