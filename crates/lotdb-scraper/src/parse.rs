//! Low-level text parsing for listing-card fields.
//!
//! See [`crate::extract`] for how these compose into full records.

use regex::Regex;

/// Minimum plausible asking price in dollars. Price-like tokens below this
/// are navigation/badge noise ("$0 down", pagination counts), not listings;
/// the field is left absent rather than stored with a bogus low value.
pub const PRICE_REALISM_FLOOR: i64 = 1000;

/// Plausible model-year window for current inventory.
pub const YEAR_MIN: i32 = 2015;
pub const YEAR_MAX: i32 = 2026;

/// Parses a dollar amount like `"$28,500"` or `"31200"` from arbitrary text.
///
/// Returns `None` when no digit run is found or the value falls below
/// [`PRICE_REALISM_FLOOR`].
#[must_use]
pub(crate) fn parse_price(text: &str) -> Option<i64> {
    let re = Regex::new(r"\$?([\d,]+)").expect("valid regex");
    let raw = re.captures(text)?.get(1)?.as_str().replace(',', "");
    let value = raw.parse::<i64>().ok()?;
    (value >= PRICE_REALISM_FLOOR).then_some(value)
}

/// Parses a 4-digit model year (`20xx`) from arbitrary text, accepting only
/// values within the plausible window.
#[must_use]
pub(crate) fn parse_year(text: &str) -> Option<i32> {
    let re = Regex::new(r"\b(20\d{2})\b").expect("valid regex");
    for captures in re.captures_iter(text) {
        if let Ok(year) = captures[1].parse::<i32>() {
            if (YEAR_MIN..=YEAR_MAX).contains(&year) {
                return Some(year);
            }
        }
    }
    None
}

/// Parses an odometer reading like `"12,345 miles"` from arbitrary text.
#[must_use]
pub(crate) fn parse_mileage(text: &str) -> Option<i64> {
    let re = Regex::new(r"([\d,]+)").expect("valid regex");
    let raw = re.captures(text)?.get(1)?.as_str().replace(',', "");
    raw.parse::<i64>().ok()
}

/// Keeps a fuel-type string only when it contains one of the known
/// vocabulary words. A matched-but-unrecognized value is discarded, not
/// stored as-is — loose `[class*='fuel']` selectors catch unrelated text.
#[must_use]
pub(crate) fn accept_fuel_type(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    ["hybrid", "electric", "gas", "gasoline"]
        .iter()
        .any(|word| lower.contains(word))
        .then(|| text.to_owned())
}

/// Keeps a drivetrain string only when it contains one of AWD/FWD/RWD/4WD
/// (case-insensitive); accepted values are stored upper-cased.
#[must_use]
pub(crate) fn accept_drivetrain(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    ["awd", "fwd", "rwd", "4wd"]
        .iter()
        .any(|word| lower.contains(word))
        .then(|| text.to_uppercase())
}

/// Resolves an href into an absolute URL against the site origin.
#[must_use]
pub(crate) fn resolve_detail_url(href: &str, site_origin: &str) -> Option<String> {
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_owned());
    }
    let base = url::Url::parse(site_origin).ok()?;
    base.join(href).ok().map(String::from)
}
