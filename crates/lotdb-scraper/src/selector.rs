//! The shared first-visible-match resolver.
//!
//! Every higher component locates elements through this module. Fallback
//! granularity is the candidate, not the element: the first candidate with
//! any surviving match wins outright, even if a later candidate would be a
//! semantically "better" hit — the priority ordering of the list is the
//! tie-break mechanism.

use crate::locators::Candidate;
use crate::page::{ElementHandle, PageSession, SessionError};

/// Resolves a candidate list to the first surviving element.
///
/// Candidates are tried strictly in order. For each, all matches are queried
/// within `scope` (whole document when `None`); with `visible_only`, matches
/// that are not displayed are dropped. The first surviving match of the first
/// candidate that has one is returned. A candidate is never retried, and
/// matches are never aggregated across candidates.
///
/// Stale elements and stale scopes count as "no match" — a removed element is
/// an answer, not a fault.
///
/// # Errors
///
/// Only a dead session propagates; exhausting all candidates is `Ok(None)`.
pub async fn resolve(
    session: &mut dyn PageSession,
    scope: Option<&ElementHandle>,
    candidates: &[Candidate],
    visible_only: bool,
) -> Result<Option<ElementHandle>, SessionError> {
    for candidate in candidates {
        let matches = match query(session, scope, candidate).await {
            Ok(matches) => matches,
            Err(e) if e.is_fatal() => return Err(e),
            Err(_) => continue,
        };
        for element in matches {
            if survives(session, &element, visible_only).await? {
                tracing::debug!(?candidate, "locator candidate matched");
                return Ok(Some(element));
            }
        }
    }
    Ok(None)
}

/// Resolves a candidate list to the full match collection of the first
/// candidate that yields any surviving elements.
///
/// Used where the caller wants the whole repeated collection (result cards)
/// rather than one element. Returns an empty vec, never an error, when
/// nothing matches.
///
/// # Errors
///
/// Only a dead session propagates.
pub async fn resolve_all(
    session: &mut dyn PageSession,
    scope: Option<&ElementHandle>,
    candidates: &[Candidate],
    visible_only: bool,
) -> Result<Vec<ElementHandle>, SessionError> {
    for candidate in candidates {
        let matches = match query(session, scope, candidate).await {
            Ok(matches) => matches,
            Err(e) if e.is_fatal() => return Err(e),
            Err(_) => continue,
        };
        let mut survivors = Vec::with_capacity(matches.len());
        for element in matches {
            if survives(session, &element, visible_only).await? {
                survivors.push(element);
            }
        }
        if !survivors.is_empty() {
            tracing::debug!(?candidate, count = survivors.len(), "locator candidate matched");
            return Ok(survivors);
        }
    }
    Ok(Vec::new())
}

async fn query(
    session: &mut dyn PageSession,
    scope: Option<&ElementHandle>,
    candidate: &Candidate,
) -> Result<Vec<ElementHandle>, SessionError> {
    match candidate {
        Candidate::Css(selector) => session.find_all(scope, selector).await,
        Candidate::Text { tag, needle } => session.find_by_text(scope, tag, needle).await,
    }
}

async fn survives(
    session: &mut dyn PageSession,
    element: &ElementHandle,
    visible_only: bool,
) -> Result<bool, SessionError> {
    if !visible_only {
        return Ok(true);
    }
    match session.is_visible(element).await {
        Ok(visible) => Ok(visible),
        Err(e) if e.is_fatal() => Err(e),
        // Stale between query and visibility check: treat as not displayed.
        Err(_) => Ok(false),
    }
}
