// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Programs: scheduled sequences of zone runs.
//!
//! Programs are read-only in the simulator. Requests that would create,
//! modify, delete, or manually run a program are rejected with an `error`
//! response; only the enable flag can be toggled.

use serde::Serialize;

/// A watering program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    /// Stable identifier, unique within the program collection.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Whether the program participates in scheduling.
    pub enabled: bool,
    /// When the program runs.
    pub schedule: Schedule,
    /// Zones the program waters, in run order.
    pub zones: Vec<ProgramZone>,
    /// Epoch seconds of the last run.
    pub last_run: i64,
    /// Epoch seconds of the next scheduled run.
    pub next_run: i64,
    /// Scheduling status.
    pub status: ProgramStatus,
}

/// Weekly schedule of a program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    /// Weekdays the program runs on, 0 = Sunday through 6 = Saturday.
    pub days: Vec<u8>,
    /// Start time of day as `"HH:MM"`.
    pub start_time: String,
}

/// One zone entry within a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgramZone {
    /// Zone id.
    pub id: u32,
    /// Watering duration in seconds.
    pub duration: u32,
    /// Position in the run sequence, starting at 1.
    pub order: u32,
}

/// Scheduling status of a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgramStatus {
    /// Waiting for its next scheduled run.
    Scheduled,
    /// Currently running.
    Running,
}
