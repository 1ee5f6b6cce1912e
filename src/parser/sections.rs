use std::sync::LazyLock;

use regex::Regex;

use super::calibration::CAMERA_FALSE_SPLITS;

static SECTION_KEYWORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*,?\s*\b(Display|Camera|Battery)\b").unwrap());
static PERFORMANCE_KEYWORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bPerformance\b\s*").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static PERFORMANCE_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bPerformance\b ?").unwrap());
static DISPLAY_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r", ?Display\b ?").unwrap());
static CAMERA_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r", ?Camera\b ?").unwrap());
static BATTERY_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r", ?Battery\b ?").unwrap());

/// Details text with canonical section markers in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDetails(String);

impl NormalizedDetails {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionText {
    pub performance: Option<String>,
    pub display: Option<String>,
    pub camera: Option<String>,
    pub battery: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Performance,
    Display,
    Camera,
    Battery,
}

impl SectionKind {
    fn marker(self) -> &'static Regex {
        match self {
            SectionKind::Performance => &PERFORMANCE_MARKER_RE,
            SectionKind::Display => &DISPLAY_MARKER_RE,
            SectionKind::Camera => &CAMERA_MARKER_RE,
            SectionKind::Battery => &BATTERY_MARKER_RE,
        }
    }

    /// Markers that may close this section, in search order.
    fn followers(self) -> &'static [SectionKind] {
        match self {
            SectionKind::Performance => &[SectionKind::Display, SectionKind::Camera, SectionKind::Battery],
            SectionKind::Display => &[SectionKind::Camera, SectionKind::Battery],
            SectionKind::Camera => &[SectionKind::Battery],
            SectionKind::Battery => &[],
        }
    }
}

/// Inserts section markers into the raw details blob.
///
/// Compiled once per parser because the false-split repairs come from the
/// calibration tables.
#[derive(Debug, Clone)]
pub struct DetailsNormalizer {
    repairs: Vec<(Regex, String)>,
}

impl DetailsNormalizer {
    pub fn new(false_splits: &[String]) -> Result<Self, regex::Error> {
        let repairs = false_splits
            .iter()
            .map(|word| {
                let pattern = format!(r"\b{}\s*,\s*Camera\b", regex::escape(word));
                Regex::new(&pattern).map(|re| (re, format!("{} Camera", word)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { repairs })
    }

    /// Idempotent: normalizing an already normalized string returns it unchanged.
    pub fn normalize(&self, details: &str) -> NormalizedDetails {
        let marked = SECTION_KEYWORD_RE.replace_all(details, " , $1");
        let mut text = PERFORMANCE_KEYWORD_RE
            .replace_all(&marked, "Performance ")
            .into_owned();
        for (re, replacement) in &self.repairs {
            text = re.replace_all(&text, replacement.as_str()).into_owned();
        }
        let collapsed = WHITESPACE_RE.replace_all(&text, " ");
        NormalizedDetails(collapsed.trim().to_string())
    }
}

static DEFAULT_NORMALIZER: LazyLock<DetailsNormalizer> = LazyLock::new(|| {
    let splits: Vec<String> = CAMERA_FALSE_SPLITS.iter().map(|w| w.to_string()).collect();
    DetailsNormalizer::new(&splits).expect("default false-split repairs compile")
});

/// Normalize with the default false-split repairs.
pub fn normalize_details(details: &str) -> NormalizedDetails {
    DEFAULT_NORMALIZER.normalize(details)
}

pub fn split_sections(details: &NormalizedDetails) -> SectionText {
    let text = details.as_str();
    let slice = |kind: SectionKind| -> Option<String> {
        let start = kind.marker().find(text)?.end();
        let end = kind
            .followers()
            .iter()
            .find_map(|next| next.marker().find_at(text, start).map(|m| m.start()))
            .unwrap_or(text.len());
        let section = text[start..end].trim();
        if section.is_empty() {
            None
        } else {
            Some(section.to_string())
        }
    };

    SectionText {
        performance: slice(SectionKind::Performance),
        display: slice(SectionKind::Display),
        camera: slice(SectionKind::Camera),
        battery: slice(SectionKind::Battery),
    }
}
