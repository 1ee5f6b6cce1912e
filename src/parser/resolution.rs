//! Mapping between named resolution tiers and pixel dimensions.
//!
//! Pixel-formatted input is re-bucketed by height so that explicit pixels and
//! marketing names end up in one category vocabulary.

/// Canonical pixel dimensions (`width x height`) per category.
pub const CATEGORY_PIXELS: &[(&str, &str)] = &[
    ("SD", "480x640"),
    ("HD", "720x1280"),
    ("HD+", "720x1520"),
    ("FHD", "1080x1920"),
    ("FULL HD", "1080x1920"),
    ("FHD+", "1080x2220"),
    ("QHD", "1440x2560"),
    ("QHD+", "1440x3120"),
    ("UHD", "2160x3840"),
];

/// Half-open `(lower, upper]` height buckets.
pub const HEIGHT_BUCKETS: &[(u32, u32, &str)] = &[
    (2500, 3150, "QHD+"),
    (2250, 2500, "QHD"),
    (1950, 2250, "FHD+"),
    (1650, 1950, "FHD"),
    (1300, 1650, "HD+"),
    (700, 1300, "HD"),
    (450, 700, "SD"),
    (0, 450, "SUB SD"),
];

/// Resolution as it was found in the display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawResolution {
    Pixels { width: u32, height: u32 },
    Category(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub category: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

pub fn category_pixels(category: &str) -> Option<&'static str> {
    CATEGORY_PIXELS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(category.trim()))
        .map(|(_, pixels)| *pixels)
}

/// Split a `WxH` pixel string into width and height.
pub fn parse_pixels(pixels: &str) -> Option<(u32, u32)> {
    let (width, height) = pixels.split_once(['x', 'X', '×'])?;
    Some((width.trim().parse().ok()?, height.trim().parse().ok()?))
}

pub fn category_for_height(height: u32) -> Option<&'static str> {
    HEIGHT_BUCKETS
        .iter()
        .find(|(lower, upper, _)| height > *lower && height <= *upper)
        .map(|(_, _, name)| *name)
}

fn canonical_category(category: &str) -> String {
    let upper = category.trim().to_ascii_uppercase();
    if upper == "FULL HD" {
        "FHD".to_string()
    } else {
        upper
    }
}

/// Classify a raw resolution.
///
/// Pixel input gets its category re-derived from height. Categorical input
/// keeps its name (with "FULL HD" folded into "FHD") and borrows width and
/// height from the canonical table when the table knows the name.
pub fn classify(raw: &RawResolution) -> Resolution {
    match raw {
        RawResolution::Pixels { width, height } => Resolution {
            category: category_for_height(*height).map(str::to_string),
            width: Some(*width),
            height: Some(*height),
        },
        RawResolution::Category(name) => {
            let dims = category_pixels(name).and_then(parse_pixels);
            Resolution {
                category: Some(canonical_category(name)),
                width: dims.map(|(w, _)| w),
                height: dims.map(|(_, h)| h),
            }
        }
    }
}
