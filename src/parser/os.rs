use std::sync::LazyLock;

use regex::Regex;

use super::calibration::Calibration;
use super::units::parse_number;

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").unwrap());
static ANDROID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bandroid").unwrap());
static IOS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bios(?:\b|\d)").unwrap());
static BLACKBERRY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)blackberry").unwrap());
static WINDOWS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bwindows\b").unwrap());
static WINDOWS_PHONE_LITERAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bwindows phone\b").unwrap());
static WINDOWS_MOBILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Windows Mobile (\d+(?:\.\d+)?)").unwrap());
static WINDOWS_PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Windows (Phone v|Phone |v)(\d+(?:\.\d+)?)").unwrap());

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OsSpec {
    pub family: Option<String>,
    pub version: Option<String>,
}

/// Family checks are case-insensitive and run in priority order.
pub fn os_family(text: &str) -> Option<&'static str> {
    if ANDROID_RE.is_match(text) {
        return Some("Android");
    }
    if IOS_RE.is_match(text) {
        return Some("iOS");
    }
    if BLACKBERRY_RE.is_match(text) {
        return Some("Blackberry");
    }
    if WINDOWS_RE.is_match(text) {
        return windows_family(text);
    }
    None
}

fn windows_family(text: &str) -> Option<&'static str> {
    if let Some(version) = WINDOWS_MOBILE_RE
        .captures(text)
        .and_then(|caps| parse_number(&caps[1]))
    {
        if version < 7.0 {
            return Some("Windows Mobile");
        }
    }

    if let Some(caps) = WINDOWS_PHONE_RE.captures(text) {
        if let Some(version) = parse_number(&caps[2]) {
            if version < 10.0 {
                return Some("Windows Phone");
            }
            if caps[1].ends_with(['v', 'V']) {
                return Some("Windows");
            }
        }
    }

    if WINDOWS_PHONE_LITERAL_RE.is_match(text) {
        Some("Windows Phone")
    } else {
        None
    }
}

/// First numeric token of the pre-comma segment (or the whole text),
/// passed through the fixed version remap.
pub fn os_version(text: &str, calibration: &Calibration) -> Option<String> {
    let segment = text.split_once(',').map(|(head, _)| head).unwrap_or(text);
    let version = NUMBER_RE.find(segment)?.as_str();
    Some(calibration.correct_os_version(version))
}

pub fn extract(os_text: &str, calibration: &Calibration) -> OsSpec {
    OsSpec {
        family: os_family(os_text).map(str::to_string),
        version: os_version(os_text, calibration),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_android_with_remapped_version() {
        let spec = extract("Android 5.2, One UI", &Calibration::default());
        assert_eq!(spec.family.as_deref(), Some("Android"));
        assert_eq!(spec.version.as_deref(), Some("5.1"));
    }

    #[test]
    fn test_only_pre_comma_segment_is_scanned() {
        let spec = extract("Android, One UI 3.1", &Calibration::default());
        assert_eq!(spec.family.as_deref(), Some("Android"));
        assert_eq!(spec.version, None);
    }

    #[test]
    fn test_family_priority() {
        assert_eq!(os_family("iOS v14"), Some("iOS"));
        assert_eq!(os_family("BlackBerry OS 7"), Some("Blackberry"));
        assert_eq!(os_family("Tizen 3.0"), None);
        assert_eq!(os_family("android 10"), Some("Android"));
        assert_eq!(os_family("IOS 12"), Some("iOS"));
        assert_eq!(os_family("windows phone 8"), Some("Windows Phone"));
        assert_eq!(os_family("BIOS update"), None);
        assert_eq!(os_family(""), None);
    }

    #[test]
    fn test_windows_sub_families() {
        assert_eq!(os_family("Windows Mobile 6.5"), Some("Windows Mobile"));
        assert_eq!(os_family("Windows Phone 8.1"), Some("Windows Phone"));
        assert_eq!(os_family("Windows v8"), Some("Windows Phone"));
        assert_eq!(os_family("Windows Phone v10"), Some("Windows"));
        assert_eq!(os_family("Windows v10"), Some("Windows"));
        assert_eq!(os_family("Windows Phone"), Some("Windows Phone"));
        assert_eq!(os_family("Windows RT"), None);
    }

    #[test]
    fn test_version_from_whole_text() {
        let calibration = Calibration::default();
        assert_eq!(os_version("Android v2.4", &calibration).as_deref(), Some("2.3"));
        assert_eq!(os_version("iOS v16", &calibration).as_deref(), Some("16"));
        assert_eq!(os_version("Symbian", &calibration), None);
    }
}
