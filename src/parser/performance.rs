use std::sync::LazyLock;

use regex::Regex;

use super::calibration::Calibration;
use super::units::{mhz_to_ghz, parse_number, round2, DataUnit};

static CORES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\b([a-z]+)[\s-]*cores?\b").unwrap());
static MHZ_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*MHz").unwrap());
static GHZ_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*GHz").unwrap());
static RAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(MB|GB)\s*RAM\b").unwrap());

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerformanceSpec {
    pub cores: Option<String>,
    pub no_of_cores: Option<u32>,
    pub clock_speed_ghz: Option<f64>,
    pub chipset: Option<String>,
    pub ram_gb: Option<f64>,
}

/// Clock speed in GHz. An MHz figure takes precedence over a GHz one.
pub fn clock_speed_ghz(text: &str) -> Option<f64> {
    if text.to_ascii_lowercase().contains("mhz") {
        let caps = MHZ_RE.captures(text)?;
        return parse_number(&caps[1]).map(mhz_to_ghz);
    }
    let caps = GHZ_RE.captures(text)?;
    parse_number(&caps[1])
}

/// RAM in GB from a "<n> MB|GB RAM" token; MB is divided by 1024 and rounded.
pub fn ram_in_gb(text: &str) -> Option<f64> {
    let caps = RAM_RE.captures(text)?;
    let value = parse_number(&caps[1])?;
    match caps[2].parse::<DataUnit>().ok()? {
        DataUnit::Megabyte => Some(round2(value / 1024.0)),
        DataUnit::Gigabyte => Some(value),
        _ => None,
    }
}

pub fn cores_text(text: &str) -> Option<String> {
    CORES_RE.captures(text).map(|caps| caps[1].to_string())
}

#[derive(Debug, Clone)]
pub struct PerformanceExtractor {
    vendor_re: Option<Regex>,
}

impl PerformanceExtractor {
    pub fn new(calibration: &Calibration) -> Result<Self, regex::Error> {
        let vendor_re = if calibration.chipset_vendors.is_empty() {
            None
        } else {
            let alternation = calibration
                .chipset_vendors
                .iter()
                .map(|v| regex::escape(v))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&format!(r"(?i)\b(?:{})\b", alternation))?)
        };
        Ok(Self { vendor_re })
    }

    /// Chipset text runs from the first known vendor name to the RAM token.
    pub fn chipset(&self, text: &str) -> Option<String> {
        let start = self.vendor_re.as_ref()?.find(text)?.start();
        let rest = &text[start..];
        let end = RAM_RE.find(rest).map(|m| m.start()).unwrap_or(rest.len());
        let chipset = rest[..end].trim().trim_end_matches(',').trim();
        if chipset.is_empty() {
            None
        } else {
            Some(chipset.to_string())
        }
    }

    pub fn extract(&self, section: Option<&str>, calibration: &Calibration) -> PerformanceSpec {
        let Some(text) = section else {
            return PerformanceSpec::default();
        };

        let cores = cores_text(text);
        let no_of_cores = cores.as_deref().and_then(|c| calibration.core_count(c));

        PerformanceSpec {
            cores,
            no_of_cores,
            clock_speed_ghz: clock_speed_ghz(text),
            chipset: self.chipset(text),
            ram_gb: ram_in_gb(text),
        }
    }
}
