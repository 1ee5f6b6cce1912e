use std::sync::LazyLock;

use regex::Regex;

use super::units::parse_number;

const PRIMARY_MARKER: &str = "Primary Camera";

static FRONT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?\s*MP(?:\s*\+\s*\d+(?:\.\d+)?\s*MP)?)\s+Front").unwrap()
});
static FLASH_COMMA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Flash,\s*(.*?)\s*(?:Flash|Primary Camera|$)").unwrap());
static FLASH_END_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\s*\bFlash\b.*$").unwrap());
static MP_OR_FRONT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"MP|Front").unwrap());
static LEADING_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+(?:\.\d+)?)").unwrap());
static MP_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\d+(?:\.\d+)?\s*MP").unwrap());

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CameraSpec {
    pub rear_camera: Option<String>,
    pub front_camera: Option<String>,
    pub flash: Option<String>,
    pub primary_camera_mp: Option<f64>,
    pub front_camera_mp: Option<f64>,
    pub rear_camera_count: Option<u32>,
}

/// Everything before "Primary Camera", provided the text opens with a number.
pub fn rear_camera(text: &str) -> Option<String> {
    if !text.trim_start().starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    let (rear, _) = text.split_once(PRIMARY_MARKER)?;
    let rear = rear.trim().trim_end_matches(',').trim();
    if rear.is_empty() {
        None
    } else {
        Some(rear.to_string())
    }
}

pub fn front_camera(text: &str) -> Option<String> {
    FRONT_RE.captures(text).map(|caps| {
        caps[1].split_whitespace().collect::<Vec<_>>().join(" ")
    })
}

/// Flash description without the word "Flash"; "No" and empty mean missing.
pub fn flash(text: &str) -> Option<String> {
    let from_comma = if text.contains(',') {
        FLASH_COMMA_RE
            .captures(text)
            .and_then(|caps| clean_flash(&caps[1]))
    } else {
        None
    };

    let value = from_comma.or_else(|| {
        if !text.contains("Flash") {
            return None;
        }
        let after_primary = text
            .split_once(PRIMARY_MARKER)
            .map(|(_, rest)| rest)
            .unwrap_or(text);
        clean_flash(&after_primary.replace(',', " "))
    })?;

    if value.eq_ignore_ascii_case("no") {
        None
    } else {
        Some(value)
    }
}

fn clean_flash(segment: &str) -> Option<String> {
    let segment = match MP_OR_FRONT_RE.find(segment) {
        Some(m) => &segment[..m.start()],
        None => segment,
    };
    let stripped: String = segment
        .chars()
        .filter(|c| !c.is_ascii_digit() && *c != '.')
        .collect();
    let stripped = FLASH_END_RE.replace(&stripped, "");
    let value = stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| c == ',' || c == '+' || c.is_whitespace())
        .to_string();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn leading_megapixels(description: Option<&str>) -> Option<f64> {
    let caps = LEADING_NUMBER_RE.captures(description?)?;
    parse_number(&caps[1])
}

pub fn extract(section: Option<&str>) -> CameraSpec {
    let Some(text) = section else {
        return CameraSpec::default();
    };

    let rear = rear_camera(text);
    let front = front_camera(text);
    let rear_camera_count = rear
        .as_deref()
        .map(|r| MP_TOKEN_RE.find_iter(r).count().max(1) as u32);

    CameraSpec {
        primary_camera_mp: leading_megapixels(rear.as_deref()),
        front_camera_mp: leading_megapixels(front.as_deref()),
        flash: flash(text),
        rear_camera_count,
        rear_camera: rear,
        front_camera: front,
    }
}
