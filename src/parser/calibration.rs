//! Lookup tables tuned to one catalog source.
//!
//! The chipset vendor list, the OS version remap and the vocabularies below
//! reflect data-entry quirks observed in a specific dataset. They are plain
//! data so a `[calibration]` table in the TOML config can replace any of them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_MISSING_SENTINEL: &str = "No Data";

pub const CHIPSET_VENDORS: &[&str] = &[
    "MediaTek",
    "Helio",
    "Snapdragon",
    "Samsung",
    "Exynos",
    "Apple",
    "Unisoc",
    "Google",
    "Spreadtrum",
    "HiSilicon",
    "Broadcom",
    "Intel",
    "Marvell",
    "ST-Ericsson",
];

/// Fixed remap of OS versions that the source reports inconsistently.
/// Not a rounding rule: only these exact values change.
pub const OS_VERSION_CORRECTIONS: &[(&str, &str)] = &[("2.4", "2.3"), ("5.2", "5.1"), ("5.4", "5.1")];

pub const CHARGING_PORTS: &[&str] = &[
    "Micro-USB",
    "microUSB",
    "miniUSB",
    "Proprietary",
    "Type-C",
    "Lightning",
];

pub const REFRESH_RATES: &[u32] = &[60, 90, 120, 144, 165, 240];

/// Words that legitimately precede "Camera" without opening a new section.
pub const CAMERA_FALSE_SPLITS: &[&str] = &["Primary", "Front"];

pub const CORE_COUNTS: &[(&str, u32)] = &[
    ("Single", 1),
    ("Dual", 2),
    ("Quad", 4),
    ("Hexa", 6),
    ("Octa", 8),
    ("Nona", 9),
    ("Deca", 10),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Calibration {
    pub chipset_vendors: Vec<String>,
    pub os_version_corrections: BTreeMap<String, String>,
    pub charging_ports: Vec<String>,
    pub refresh_rates: Vec<u32>,
    pub camera_false_splits: Vec<String>,
    pub core_counts: BTreeMap<String, u32>,
    pub missing_sentinel: String,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            chipset_vendors: CHIPSET_VENDORS.iter().map(|s| s.to_string()).collect(),
            os_version_corrections: OS_VERSION_CORRECTIONS
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            charging_ports: CHARGING_PORTS.iter().map(|s| s.to_string()).collect(),
            refresh_rates: REFRESH_RATES.to_vec(),
            camera_false_splits: CAMERA_FALSE_SPLITS.iter().map(|s| s.to_string()).collect(),
            core_counts: CORE_COUNTS
                .iter()
                .map(|(name, count)| (name.to_string(), *count))
                .collect(),
            missing_sentinel: DEFAULT_MISSING_SENTINEL.to_string(),
        }
    }
}

impl Calibration {
    /// Case-insensitive core-name lookup ("octa" and "Octa" both map to 8).
    pub fn core_count(&self, name: &str) -> Option<u32> {
        let name = name.trim();
        self.core_counts
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, count)| *count)
    }

    pub fn correct_os_version(&self, version: &str) -> String {
        self.os_version_corrections
            .get(version)
            .cloned()
            .unwrap_or_else(|| version.to_string())
    }
}
