use std::sync::LazyLock;

use regex::Regex;

static PRICE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d[\d,]*(?:\.\d+)?").unwrap());
static INTEGER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// Price without currency symbol or thousands separators ("₹1,29,999" -> 129999).
pub fn price(text: &str) -> Option<u64> {
    let token = PRICE_RE.find(text)?.as_str().replace(',', "");
    let value = token.parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 {
        Some(value.round() as u64)
    } else {
        None
    }
}

pub fn spec_score(text: &str) -> Option<u32> {
    INTEGER_RE.find(text)?.as_str().parse().ok()
}

pub fn mobile_name(text: &str) -> Option<String> {
    let name = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}
