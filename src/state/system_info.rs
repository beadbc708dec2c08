// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Synthetic hardware diagnostics.
//!
//! A fixed snapshot of what a healthy ESP32 controller reports: chip,
//! memory, PSRAM, and storage counters. The values are plausible, not live;
//! the snapshot is built once per store and never regenerated.

use serde::Serialize;

/// Hardware/system diagnostics reported by `get_system_info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemInfo {
    /// Device status summary.
    pub device: DeviceInfo,
    /// Firmware/runtime details.
    pub system: RuntimeInfo,
    /// Chip details.
    pub hardware: HardwareInfo,
    /// Heap statistics.
    pub memory: MemoryInfo,
    /// External PSRAM statistics.
    pub psram: PsramInfo,
    /// SPIFFS storage partition statistics.
    pub spiffs: SpiffsInfo,
}

/// Device status summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    pub status: String,
    pub reset_reason: String,
    pub uptime: String,
    pub time: String,
}

/// Firmware/runtime details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeInfo {
    pub idf_version: String,
    pub freertos_tasks: u32,
}

/// Chip details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HardwareInfo {
    pub chip_model: String,
    pub chip_revision: u32,
    pub cpu_cores: u32,
    pub flash_size: String,
}

/// Heap statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryInfo {
    pub heap_total: String,
    pub heap_free: String,
    pub heap_used: String,
    pub heap_usage: String,
    pub heap_largest_free_block: String,
    pub heap_min_free_ever: String,
    pub internal_total: String,
    pub internal_free: String,
    pub internal_usage: String,
}

/// External PSRAM statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PsramInfo {
    pub psram_total: String,
    pub psram_free: String,
    pub psram_usage: String,
}

/// SPIFFS storage partition statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpiffsInfo {
    pub status: String,
    pub partition_size: String,
    pub partition_label: String,
    pub partition_address: String,
    pub total_space: String,
    pub used_space: String,
    pub free_space: String,
    pub usage: String,
    pub files_count: u32,
    pub total_size: String,
}

impl Default for SystemInfo {
    fn default() -> Self {
        Self {
            device: DeviceInfo {
                status: "Online and operational".to_string(),
                reset_reason: "Power-on reset".to_string(),
                uptime: "5 minutes, 42 seconds".to_string(),
                time: "2025-01-01 00:00 PM".to_string(),
            },
            system: RuntimeInfo {
                idf_version: "5.4.0".to_string(),
                freertos_tasks: 12,
            },
            hardware: HardwareInfo {
                chip_model: "ESP32".to_string(),
                chip_revision: 301,
                cpu_cores: 2,
                flash_size: "4.0 MB".to_string(),
            },
            memory: MemoryInfo {
                heap_total: "269.8 KB".to_string(),
                heap_free: "163.2 KB".to_string(),
                heap_used: "106.6 KB".to_string(),
                heap_usage: "39%".to_string(),
                heap_largest_free_block: "108.0 KB".to_string(),
                heap_min_free_ever: "145.4 KB".to_string(),
                internal_total: "302.0 KB".to_string(),
                internal_free: "194.6 KB".to_string(),
                internal_usage: "35%".to_string(),
            },
            psram: PsramInfo {
                psram_total: "0 bytes".to_string(),
                psram_free: "0 bytes".to_string(),
                psram_usage: "0%".to_string(),
            },
            spiffs: SpiffsInfo {
                status: "Mounted and operational".to_string(),
                partition_size: "960.0 KB".to_string(),
                partition_label: "storage".to_string(),
                partition_address: "0x310000".to_string(),
                total_space: "875.3 KB".to_string(),
                used_space: "171.3 KB".to_string(),
                free_space: "704.0 KB".to_string(),
                usage: "19%".to_string(),
                files_count: 4,
                total_size: "168.8 KB".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_serializes_expected_sections() {
        let json = serde_json::to_value(SystemInfo::default()).unwrap();
        assert_eq!(json["hardware"]["chip_model"], "ESP32");
        assert_eq!(json["system"]["freertos_tasks"], 12);
        assert_eq!(json["psram"]["psram_total"], "0 bytes");
        assert_eq!(json["spiffs"]["files_count"], 4);
        assert_eq!(json["memory"]["heap_usage"], "39%");
    }
}
