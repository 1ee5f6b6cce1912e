//! Unit conversions shared by the section extractors.
//!
//! Every function here is pure; a value that cannot be converted comes back as
//! `None` rather than an error.

use std::str::FromStr;

/// Round to two decimal places, the precision used for every derived GB/GHz value.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn mhz_to_ghz(mhz: f64) -> f64 {
    round2(mhz / 1000.0)
}

/// Parse a numeric token, tolerating a thousands separator.
pub fn parse_number(token: &str) -> Option<f64> {
    let cleaned = token.trim().replace(',', "");
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Binary data-size units as they appear in catalog text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataUnit {
    Kilobyte,
    Megabyte,
    Gigabyte,
    Terabyte,
}

impl FromStr for DataUnit {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "KB" => Ok(Self::Kilobyte),
            "MB" => Ok(Self::Megabyte),
            "GB" => Ok(Self::Gigabyte),
            "TB" => Ok(Self::Terabyte),
            _ => Err(()),
        }
    }
}

/// Plain conversion to GB. MB values are rounded to two decimals, KB is
/// treated as zero.
pub fn to_gigabytes(value: f64, unit: DataUnit) -> f64 {
    match unit {
        DataUnit::Kilobyte => 0.0,
        DataUnit::Megabyte => round2(value / 1024.0),
        DataUnit::Gigabyte => value,
        DataUnit::Terabyte => value * 1024.0,
    }
}

/// Storage conversion with the asymmetric terabyte rule: a TB value above 2
/// is taken to be a mislabeled GB value and is returned unconverted.
pub fn storage_in_gb(value: f64, unit: DataUnit) -> f64 {
    match unit {
        DataUnit::Terabyte if value > 2.0 => value,
        other => to_gigabytes(value, other),
    }
}

/// Rewrite an apparently mislabeled terabyte figure to gigabytes.
///
/// Only applied to expandable storage, where "256 TB" style entries are
/// data-entry slips for GB.
pub fn correct_mislabeled_terabytes(value: f64, unit: DataUnit) -> DataUnit {
    if unit == DataUnit::Terabyte && value > 2.0 {
        DataUnit::Gigabyte
    } else {
        unit
    }
}
