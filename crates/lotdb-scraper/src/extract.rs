//! Per-card field extraction.
//!
//! Each field is independently resolved through its own candidate chain
//! scoped to the card element; a field whose chain exhausts is simply absent.
//! A card only becomes a record when the minimum viable pair — model and a
//! realistic price — is present.

use lotdb_core::VehicleRecord;

use crate::locators;
use crate::page::{ElementHandle, PageSession, SessionError};
use crate::parse;
use crate::selector;

/// Extracts one vehicle record from a result card.
///
/// Returns `Ok(None)` when the card fails the minimum-viability rule (model
/// and price both present). Per-field failures never abort the card; a field
/// that cannot be resolved or parsed is left `None`.
///
/// The caller stamps `zip_code` and `scraped_at`; this function only reads
/// the card.
///
/// # Errors
///
/// Only a dead session propagates.
pub async fn extract_vehicle(
    session: &mut dyn PageSession,
    card: &ElementHandle,
    site_origin: &str,
) -> Result<Option<VehicleRecord>, SessionError> {
    let mut record = VehicleRecord::default();

    let model_text = field_text(session, card, locators::MODEL_FIELDS).await?;
    if let Some(text) = &model_text {
        record.model = Some(text.clone());
        // Card titles usually carry the year too ("2023 Camry XLE").
        record.year = parse::parse_year(text);
    }

    if let Some(text) = field_text(session, card, locators::YEAR_FIELDS).await? {
        if let Some(year) = parse::parse_year(&text) {
            record.year = Some(year);
        }
    }
    if record.year.is_none() {
        // Last resort: the card's full rendered text.
        match session.text(card).await {
            Ok(text) => record.year = parse::parse_year(&text),
            Err(e) if e.is_fatal() => return Err(e),
            Err(_) => {}
        }
    }

    if let Some(text) = field_text(session, card, locators::TRIM_FIELDS).await? {
        record.trim = Some(text);
    }

    if let Some(text) = field_text(session, card, locators::PRICE_FIELDS).await? {
        record.price = parse::parse_price(&text);
    }

    if let Some(text) = field_text(session, card, locators::DEALER_FIELDS).await? {
        record.dealer_name = Some(text);
    }

    if let Some(text) = field_text(session, card, locators::FUEL_FIELDS).await? {
        record.fuel_type = parse::accept_fuel_type(&text);
    }

    if let Some(text) = field_text(session, card, locators::DRIVETRAIN_FIELDS).await? {
        record.drivetrain = parse::accept_drivetrain(&text);
    }

    if let Some(text) = field_text(session, card, locators::MILEAGE_FIELDS).await? {
        record.mileage = parse::parse_mileage(&text);
    }

    if let Some(text) = field_text(session, card, locators::COLOR_FIELDS).await? {
        record.color = Some(text);
    }

    if let Some(link) =
        selector::resolve(session, Some(card), locators::DETAIL_LINKS, false).await?
    {
        match session.attribute(&link, "href").await {
            Ok(Some(href)) => {
                record.detail_url = parse::resolve_detail_url(&href, site_origin);
            }
            Ok(None) => {}
            Err(e) if e.is_fatal() => return Err(e),
            Err(_) => {}
        }
    }

    if record.is_viable() {
        Ok(Some(record))
    } else {
        tracing::debug!(
            model = record.model.as_deref(),
            price = record.price,
            "discarding non-viable card"
        );
        Ok(None)
    }
}

/// Resolves a field chain within the card and returns the element's trimmed
/// text, `None` when the chain exhausts or the text is empty.
async fn field_text(
    session: &mut dyn PageSession,
    card: &ElementHandle,
    candidates: &[locators::Candidate],
) -> Result<Option<String>, SessionError> {
    let Some(element) = selector::resolve(session, Some(card), candidates, false).await? else {
        return Ok(None);
    };
    match session.text(&element).await {
        Ok(text) => {
            let trimmed = text.trim();
            Ok((!trimmed.is_empty()).then(|| trimmed.to_owned()))
        }
        Err(e) if e.is_fatal() => Err(e),
        // Stale between resolution and read: the field is simply absent.
        Err(_) => Ok(None),
    }
}
