// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Simulated device state.
//!
//! [`StateStore`] holds everything the mock device knows: settings, the zone
//! and program collections, and a static diagnostics snapshot. It is an
//! explicit value handed to the response engine on every call, never a
//! process-wide singleton, so tests can run isolated stores in parallel and
//! the listener can choose what to share between connections.

mod program;
mod settings;
mod store;
mod system_info;
mod wifi;
mod zone;

pub use program::{Program, ProgramStatus, ProgramZone, Schedule};
pub use settings::{OtaSettings, Settings, WifiSettings};
pub use store::{SharedStore, StateStore};
pub use system_info::{
    DeviceInfo, HardwareInfo, MemoryInfo, PsramInfo, RuntimeInfo, SpiffsInfo, SystemInfo,
};
pub use wifi::{ApStatus, StaStatus, WifiStatus};
pub use zone::{Zone, ZoneStatus};
