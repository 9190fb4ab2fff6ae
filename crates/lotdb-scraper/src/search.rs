//! ZIP search execution against the (possibly freshly un-gated) page.

use std::time::Duration;

use crate::locators;
use crate::page::{PageSession, SessionError};
use crate::results;
use crate::selector;

/// Wait for results to render after triggering the search.
const RESULTS_SETTLE: Duration = Duration::from_secs(5);

/// Result of one search attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    ResultsPresent,
    /// Either an explicit empty-result message, or simply no listing
    /// collection. Absence of evidence is treated as absence of results —
    /// never as an error — to avoid reporting phantom inventory.
    NoResults,
    InputNotFound,
}

/// Enters the target ZIP into the search field and triggers the search.
///
/// The input is resolved globally with the same candidate family the gate
/// uses. The exact target ZIP is typed (distinct from the gate-dismissal
/// default), submitted via a resolved button or the input's default action,
/// and after a settle interval the listing collection decides the outcome.
///
/// # Errors
///
/// Only a dead session propagates.
pub async fn search_inventory(
    session: &mut dyn PageSession,
    zip_code: &str,
) -> Result<SearchOutcome, SessionError> {
    let Some(input) = selector::resolve(session, None, locators::ZIP_INPUTS, true).await? else {
        tracing::warn!(zip_code, "no ZIP search input resolved");
        return Ok(SearchOutcome::InputNotFound);
    };

    if let Err(e) = session.clear_and_type(&input, zip_code).await {
        if e.is_fatal() {
            return Err(e);
        }
        tracing::warn!(zip_code, error = %e, "search input went away before typing");
        return Ok(SearchOutcome::InputNotFound);
    }

    let submitted =
        match selector::resolve(session, None, locators::SEARCH_SUBMIT_BUTTONS, true).await? {
            Some(button) => session.click(&button).await,
            None => session.submit(&input).await,
        };
    if let Err(e) = submitted {
        if e.is_fatal() {
            return Err(e);
        }
        // The search may still have fired; fall through to the presence check.
        tracing::warn!(zip_code, error = %e, "search submission glitched");
    }

    session.settle(RESULTS_SETTLE).await?;

    if results::any_present(session).await? {
        tracing::debug!(zip_code, "inventory results present");
        return Ok(SearchOutcome::ResultsPresent);
    }
    if selector::resolve(session, None, locators::NO_RESULTS_MARKERS, true)
        .await?
        .is_some()
    {
        tracing::debug!(zip_code, "explicit no-results message found");
    } else {
        tracing::debug!(zip_code, "no listing collection rendered");
    }
    Ok(SearchOutcome::NoResults)
}
