//! The normalized vehicle listing record.
//!
//! ## Observed shape from the live inventory template
//!
//! Listing cards expose model and price reliably; everything else appears on
//! some card variants only. Fields are therefore `Option` across the board
//! except `model`, and a record is only worth keeping when both `model` and
//! `price` were actually parsed (see [`VehicleRecord::is_viable`]).
//!
//! ### `zipCode` / `scrapedAt`
//! Neither comes from the page. The orchestrator stamps `zipCode` with the
//! searched ZIP, and `scrapedAt` is stamped immediately before persistence.
//! Serialized field names match the document-store schema (camelCase).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One vehicle listing, extracted from a single result card.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    /// Model display name (e.g., `"Camry"`). Required for the record to be kept.
    pub model: Option<String>,

    /// Model year; only values in the plausible range survive extraction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    /// Trim level string (e.g., `"XLE"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trim: Option<String>,

    /// Asking price in whole dollars. Values below the realism floor are
    /// discarded during extraction, so this is never a noise artifact like `2`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,

    /// One of `AWD` / `FWD` / `RWD` / `4WD`, upper-cased.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drivetrain: Option<String>,

    /// Exterior color as displayed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Fuel type; only kept when it matches the known vocabulary
    /// (hybrid / electric / gas / gasoline).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,

    /// Odometer reading in miles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mileage: Option<i64>,

    /// Selling dealer display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dealer_name: Option<String>,

    /// Absolute URL of the listing detail page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail_url: Option<String>,

    /// The 5-digit ZIP the search was keyed by. Stamped by the orchestrator,
    /// never by the extractor.
    #[serde(default)]
    pub zip_code: String,

    /// When the record was persisted. Stamped at upsert time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scraped_at: Option<DateTime<Utc>>,
}

impl VehicleRecord {
    /// Minimum-viable-record rule: both `model` and `price` must be present.
    #[must_use]
    pub fn is_viable(&self) -> bool {
        self.model.is_some() && self.price.is_some()
    }
}

/// Extracts a standalone 5-digit ZIP token from a free-text location string
/// such as `"Atlanta, CA 90001"`.
///
/// User records carry either a direct ZIP field or a free-text location; store
/// implementations use this to derive keys from the latter. Returns `None`
/// when no token qualifies.
#[must_use]
pub fn zip_from_location(location: &str) -> Option<String> {
    location
        .split(|c: char| c.is_whitespace() || c == ',')
        .map(|part| part.trim_matches(|c: char| !c.is_ascii_digit()))
        .find(|part| part.len() == 5 && part.bytes().all(|b| b.is_ascii_digit()))
        .map(str::to_owned)
}
