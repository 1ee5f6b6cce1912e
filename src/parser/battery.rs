use std::sync::LazyLock;

use regex::Regex;

use super::calibration::Calibration;
use super::units::parse_number;

static CAPACITY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*mAh").unwrap());
static USB_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*USB\b").unwrap());
// Words start after a comma, whitespace or the start of the text.
static CHARGING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[\s,])((?:[A-Za-z]+\s+)*?[A-Za-z]+)\s+Charging\b").unwrap()
});
const UNIT_FRAGMENTS: &[&str] = &["mAh", "W", "Wh", "V"];
static NON_REMOVABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bNon[\s-]?Removable\b").unwrap());
static REMOVABLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bRemovable\b").unwrap());

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatterySpec {
    pub capacity_mah: Option<u32>,
    pub charging_port: Option<String>,
    pub usb_version: Option<f64>,
    pub charging_type: Option<String>,
    pub removable: Option<String>,
}

pub fn capacity_mah(text: &str) -> Option<u32> {
    CAPACITY_RE.captures(text)?[1].parse().ok()
}

pub fn usb_version(text: &str) -> Option<f64> {
    let caps = USB_VERSION_RE.captures(text)?;
    parse_number(&caps[1])
}

/// Word(s) right before "Charging", with stray unit words such as "mAh" removed.
pub fn charging_type(text: &str) -> Option<String> {
    let caps = CHARGING_RE.captures(text)?;
    let value = caps[1]
        .split_whitespace()
        .filter(|word| !UNIT_FRAGMENTS.iter().any(|unit| unit.eq_ignore_ascii_case(word)))
        .collect::<Vec<_>>()
        .join(" ");
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

pub fn removable(text: &str) -> Option<String> {
    if NON_REMOVABLE_RE.is_match(text) {
        Some("No".to_string())
    } else if REMOVABLE_RE.is_match(text) {
        Some("Yes".to_string())
    } else {
        None
    }
}

#[derive(Debug, Clone)]
pub struct BatteryExtractor {
    ports: Vec<String>,
    port_re: Option<Regex>,
}

impl BatteryExtractor {
    pub fn new(calibration: &Calibration) -> Result<Self, regex::Error> {
        let port_re = if calibration.charging_ports.is_empty() {
            None
        } else {
            let alternation = calibration
                .charging_ports
                .iter()
                .map(|p| regex::escape(p))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&format!(r"(?i)\b(?:{})", alternation))?)
        };
        Ok(Self {
            ports: calibration.charging_ports.clone(),
            port_re,
        })
    }

    /// First vocabulary port in the text, spelled as in the vocabulary.
    pub fn charging_port(&self, text: &str) -> Option<String> {
        let found = self.port_re.as_ref()?.find(text)?.as_str();
        self.ports
            .iter()
            .find(|p| p.eq_ignore_ascii_case(found))
            .cloned()
    }

    pub fn extract(&self, section: Option<&str>) -> BatterySpec {
        let Some(text) = section else {
            return BatterySpec::default();
        };

        BatterySpec {
            capacity_mah: capacity_mah(text),
            charging_port: self.charging_port(text),
            usb_version: usb_version(text),
            charging_type: charging_type(text),
            removable: removable(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> BatteryExtractor {
        BatteryExtractor::new(&Calibration::default()).unwrap()
    }

    #[test]
    fn test_extract_full_section() {
        let spec = extractor().extract(Some("5000 mAh, Type-C, Fast Charging, Non-Removable"));
        assert_eq!(spec.capacity_mah, Some(5000));
        assert_eq!(spec.charging_port.as_deref(), Some("Type-C"));
        assert_eq!(spec.charging_type.as_deref(), Some("Fast"));
        assert_eq!(spec.removable.as_deref(), Some("No"));
        assert_eq!(spec.usb_version, None);
    }

    #[test]
    fn test_charging_type_drops_stray_mah() {
        assert_eq!(charging_type("4000 mAh Quick Charging").as_deref(), Some("Quick"));
        assert_eq!(charging_type("3000 mAh, Removable"), None);
        assert_eq!(charging_type("5000 mAh with 33W Fast Charging").as_deref(), Some("Fast"));
        assert_eq!(charging_type("Super VOOC Charging").as_deref(), Some("Super VOOC"));
    }

    #[test]
    fn test_port_spelling_follows_vocabulary() {
        let extractor = extractor();
        assert_eq!(
            extractor.charging_port("2000 mAh, MICROUSB 2.0 USB").as_deref(),
            Some("microUSB")
        );
        assert_eq!(extractor.charging_port("1500 mAh, Lightning").as_deref(), Some("Lightning"));
        assert_eq!(extractor.charging_port("1500 mAh"), None);
    }

    #[test]
    fn test_usb_version() {
        assert_eq!(usb_version("3100 mAh, 3.1 USB Type-C"), Some(3.1));
        assert_eq!(usb_version("3100 mAh, Type-C"), None);
    }

    #[test]
    fn test_removable() {
        assert_eq!(removable("1800 mAh, Removable").as_deref(), Some("Yes"));
        assert_eq!(removable("1800 mAh, Non Removable").as_deref(), Some("No"));
        assert_eq!(removable("1800 mAh"), None);
    }

    #[test]
    fn test_absent_section() {
        assert_eq!(extractor().extract(None), BatterySpec::default());
    }
}
