use std::sync::LazyLock;

use regex::Regex;

use super::units::{correct_mislabeled_terabytes, parse_number, storage_in_gb, DataUnit};

static SIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(KB|MB|GB|TB)\b(\s*RAM\b)?").unwrap());
// The size must sit in the marker's own clause, or in a following "upto" clause.
static EXPANDABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:Expandable|Memory Card)[^,\d]{0,40}?(?:,\s*up\s*to\s*)?(\d+(?:\.\d+)?)\s*(KB|MB|GB|TB)\b",
    )
    .unwrap()
});
static NOT_SUPPORTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Memory Card Not Supported").unwrap());
static TRIPLE_SIM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bTriple SIM\b").unwrap());
static DUAL_SIM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\bDual SIM\b(?:\s*\(([^)]+)\)|\s*,?\s*((?:GSM|CDMA|LTE|Nano|Micro|e-?SIM)(?:\s*\+\s*(?:GSM|CDMA|LTE|Nano|Micro|e-?SIM))+))?",
    )
    .unwrap()
});
static WIFI_CALLING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bWi-?Fi Calling\b").unwrap());
static NO_FINGERPRINT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bNo Fingerprint").unwrap());
static FINGERPRINT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bFingerprint").unwrap());
static IP_RATING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bIP\s?([0-9X]{2})\b").unwrap());

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureSpec {
    pub storage_gb: Option<f64>,
    pub expandable_storage_gb: Option<f64>,
    pub sim_type: Option<String>,
    pub wifi_calling: String,
    pub fingerprint_sensor: Option<String>,
    pub ip_rating: Option<String>,
}

/// Inbuilt storage: the first size token that is neither RAM nor part of a
/// sized expandable-storage clause.
pub fn storage_gb(text: &str) -> Option<f64> {
    let without_expandable = EXPANDABLE_RE.replace_all(text, "");
    SIZE_RE
        .captures_iter(&without_expandable)
        .filter(|caps| caps.get(3).is_none())
        .find_map(|caps| {
            let value = parse_number(&caps[1])?;
            let unit = caps[2].parse::<DataUnit>().ok()?;
            Some(storage_in_gb(value, unit))
        })
}

pub fn expandable_storage_gb(text: &str) -> Option<f64> {
    if NOT_SUPPORTED_RE.is_match(text) {
        return None;
    }
    let caps = EXPANDABLE_RE.captures(text)?;
    let value = parse_number(&caps[1])?;
    let unit = correct_mislabeled_terabytes(value, caps[2].parse::<DataUnit>().ok()?);
    Some(storage_in_gb(value, unit))
}

pub fn sim_type(text: &str) -> Option<String> {
    if TRIPLE_SIM_RE.is_match(text) {
        return Some("Triple SIM".to_string());
    }
    let caps = DUAL_SIM_RE.captures(text)?;
    let technology = caps.get(1).or_else(|| caps.get(2)).map(|m| {
        m.as_str()
            .split('+')
            .map(str::trim)
            .collect::<Vec<_>>()
            .join("+")
    });
    Some(match technology {
        Some(tech) if !tech.is_empty() => format!("Dual SIM, {}", tech),
        _ => "Dual SIM".to_string(),
    })
}

pub fn wifi_calling(text: &str) -> &'static str {
    if WIFI_CALLING_RE.is_match(text) {
        "Yes"
    } else {
        "No"
    }
}

pub fn fingerprint_sensor(text: &str) -> Option<String> {
    if NO_FINGERPRINT_RE.is_match(text) {
        Some("No".to_string())
    } else if FINGERPRINT_RE.is_match(text) {
        Some("Yes".to_string())
    } else {
        None
    }
}

/// All IP codes in order of appearance, comma-separated.
pub fn ip_rating(text: &str) -> Option<String> {
    let mut codes: Vec<String> = Vec::new();
    for caps in IP_RATING_RE.captures_iter(text) {
        let code = format!("IP{}", &caps[1]);
        if !codes.contains(&code) {
            codes.push(code);
        }
    }
    if codes.is_empty() {
        None
    } else {
        Some(codes.join(", "))
    }
}

pub fn extract(features_text: &str) -> FeatureSpec {
    FeatureSpec {
        storage_gb: storage_gb(features_text),
        expandable_storage_gb: expandable_storage_gb(features_text),
        sim_type: sim_type(features_text),
        wifi_calling: wifi_calling(features_text).to_string(),
        fingerprint_sensor: fingerprint_sensor(features_text),
        ip_rating: ip_rating(features_text),
    }
}
