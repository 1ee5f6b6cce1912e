use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use super::calibration::Calibration;
use super::resolution::{classify, RawResolution, Resolution};
use super::units::parse_number;

static INCHES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)(\d+(?:\.\d+)?)\s*(?:inches|inch|")"#).unwrap());
static CM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*cm\b").unwrap());
static PIXELS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d{2,5})\s*[x×]\s*(\d{2,5})\s*(?:px|pixels)\b").unwrap());
static PLUS_CATEGORY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(HD|FHD|QHD|UHD)\+").unwrap());
static CATEGORY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(FULL HD|FHD|QHD|UHD|HD|SD)\b").unwrap());

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplaySpec {
    pub size_inches: Option<f64>,
    pub size_cm: Option<f64>,
    pub resolution: Resolution,
    pub display_type: Option<String>,
    pub refresh_rate_hz: Option<u32>,
}

/// Pick the resolution token: explicit pixels, then a "+" tier, then a plain tier.
pub fn raw_resolution(text: &str) -> Option<RawResolution> {
    if let Some(caps) = PIXELS_RE.captures(text) {
        if let (Ok(width), Ok(height)) = (caps[1].parse(), caps[2].parse()) {
            return Some(RawResolution::Pixels { width, height });
        }
    }
    if text.contains('+') {
        if let Some(caps) = PLUS_CATEGORY_RE.captures(text) {
            return Some(RawResolution::Category(format!("{}+", caps[1].to_ascii_uppercase())));
        }
    }
    CATEGORY_RE
        .captures(text)
        .map(|caps| RawResolution::Category(caps[1].to_ascii_uppercase()))
}

#[derive(Debug, Clone)]
pub struct DisplayExtractor {
    panel_re: Regex,
    refresh_re: Option<Regex>,
    rate_clause_re: Option<Regex>,
}

impl DisplayExtractor {
    pub fn new(calibration: &Calibration) -> Result<Self, regex::Error> {
        let rates = calibration
            .refresh_rates
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join("|");
        let (panel_re, refresh_re, rate_clause_re) = if rates.is_empty() {
            (Regex::new(r",\s*([^,]*?)\s*$")?, None, None)
        } else {
            (
                Regex::new(&format!(r"(?i),\s*([^,]*?)\s*(?:\b(?:{rates})\b\s*(?:Hz)?)?\s*$"))?,
                Some(Regex::new(&format!(r"(?i)\b({rates})\s*Hz\b"))?),
                Some(Regex::new(&format!(r"(?i),\s*(?:{rates})\s*(?:Hz)?\s*$"))?),
            )
        };
        Ok(Self {
            panel_re,
            refresh_re,
            rate_clause_re,
        })
    }

    /// Panel type: the text after the last comma, without a trailing refresh
    /// rate or any resolution token. A last clause holding only the refresh
    /// rate is skipped.
    pub fn display_type(&self, text: &str) -> Option<String> {
        let text = match &self.rate_clause_re {
            Some(re) => re.replace(text, ""),
            None => Cow::Borrowed(text),
        };
        let caps = self.panel_re.captures(&text)?;
        let panel = PIXELS_RE.replace_all(&caps[1], "");
        let panel = PLUS_CATEGORY_RE.replace_all(&panel, "");
        let panel = CATEGORY_RE.replace_all(&panel, "");
        let panel = panel.split_whitespace().collect::<Vec<_>>().join(" ");
        if panel.is_empty() {
            None
        } else {
            Some(panel)
        }
    }

    pub fn refresh_rate(&self, text: &str) -> Option<u32> {
        let caps = self.refresh_re.as_ref()?.captures(text)?;
        caps[1].parse().ok()
    }

    pub fn extract(&self, section: Option<&str>) -> DisplaySpec {
        let Some(text) = section else {
            return DisplaySpec::default();
        };

        let size_inches = INCHES_RE.captures(text).and_then(|c| parse_number(&c[1]));
        let size_cm = CM_RE.captures(text).and_then(|c| parse_number(&c[1]));
        let resolution = raw_resolution(text)
            .map(|raw| classify(&raw))
            .unwrap_or_default();

        DisplaySpec {
            size_inches,
            size_cm,
            resolution,
            display_type: self.display_type(text),
            refresh_rate_hz: self.refresh_rate(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> DisplayExtractor {
        DisplayExtractor::new(&Calibration::default()).unwrap()
    }

    #[test]
    fn test_raw_resolution_priority() {
        assert_eq!(
            raw_resolution("6.5 inches, 720 x 1600 px, HD+"),
            Some(RawResolution::Pixels {
                width: 720,
                height: 1600
            })
        );
        assert_eq!(
            raw_resolution("6.4 inches, fhd+ Super AMOLED"),
            Some(RawResolution::Category("FHD+".to_string()))
        );
        assert_eq!(
            raw_resolution("5.5 inches, Full HD, IPS"),
            Some(RawResolution::Category("FULL HD".to_string()))
        );
        assert_eq!(raw_resolution("4 inches, TFT"), None);
    }

    #[test]
    fn test_extract_categorical_display() {
        let spec = extractor().extract(Some("6.67 inches (16.94 cm) FHD+, AMOLED 120 Hz"));
        assert_eq!(spec.size_inches, Some(6.67));
        assert_eq!(spec.size_cm, Some(16.94));
        assert_eq!(spec.resolution.category.as_deref(), Some("FHD+"));
        assert_eq!(spec.resolution.width, Some(1080));
        assert_eq!(spec.resolution.height, Some(2220));
        assert_eq!(spec.display_type.as_deref(), Some("AMOLED"));
        assert_eq!(spec.refresh_rate_hz, Some(120));
    }

    #[test]
    fn test_extract_pixel_display() {
        let spec = extractor().extract(Some("6.5 inches (16.51 cm), 720 x 1600 pixels, IPS LCD"));
        assert_eq!(spec.resolution.category.as_deref(), Some("HD+"));
        assert_eq!(spec.resolution.width, Some(720));
        assert_eq!(spec.resolution.height, Some(1600));
        assert_eq!(spec.display_type.as_deref(), Some("IPS LCD"));
        assert_eq!(spec.refresh_rate_hz, None);
    }

    #[test]
    fn test_refresh_rate_in_own_clause() {
        let spec = extractor().extract(Some("6.5 inches, 1080 x 2400 px, IPS LCD, 90 Hz"));
        assert_eq!(spec.display_type.as_deref(), Some("IPS LCD"));
        assert_eq!(spec.refresh_rate_hz, Some(90));
        assert_eq!(spec.resolution.category.as_deref(), Some("QHD"));
    }

    #[test]
    fn test_display_type_without_comma() {
        let extractor = extractor();
        assert_eq!(extractor.display_type("5 inches (12.7 cm) HD"), None);
        assert_eq!(extractor.display_type("6.1 inches, QHD+"), None);
        assert_eq!(
            extractor.display_type("6.8 inches, Dynamic AMOLED 2X 144"),
            Some("Dynamic AMOLED 2X".to_string())
        );
    }

    #[test]
    fn test_absent_section() {
        assert_eq!(extractor().extract(None), DisplaySpec::default());
    }
}
