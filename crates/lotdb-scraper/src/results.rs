//! Locating the repeated result-card collection.

use crate::locators;
use crate::page::{ElementHandle, PageSession, SessionError};
use crate::selector;

/// Finds all result cards on the current page.
///
/// Tries the listing-container candidates against the full document and
/// returns the whole match collection of the first candidate that yields any
/// elements. Fallback granularity is the selector family, not the element.
/// An empty vec means "no inventory" — never an error.
///
/// # Errors
///
/// Only a dead session propagates.
pub async fn locate(session: &mut dyn PageSession) -> Result<Vec<ElementHandle>, SessionError> {
    let cards = selector::resolve_all(session, None, locators::LISTING_CONTAINERS, false).await?;
    if cards.is_empty() {
        tracing::debug!("no result cards matched any listing candidate");
    } else {
        tracing::debug!(count = cards.len(), "located result cards");
    }
    Ok(cards)
}

/// Whether at least one visible result card is on the page.
///
/// # Errors
///
/// Only a dead session propagates.
pub async fn any_present(session: &mut dyn PageSession) -> Result<bool, SessionError> {
    Ok(
        selector::resolve(session, None, locators::LISTING_CONTAINERS, true)
            .await?
            .is_some(),
    )
}
