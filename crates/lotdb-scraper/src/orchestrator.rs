//! End-to-end scrape of a single ZIP code.

use std::time::Duration;

use lotdb_core::{ScraperConfig, VehicleRecord};

use crate::error::ScrapeError;
use crate::extract;
use crate::gate::{self, GateOutcome};
use crate::page::PageSession;
use crate::results;
use crate::search::{self, SearchOutcome};

/// Wait for dynamic content after the page body appears.
const PAGE_SETTLE: Duration = Duration::from_secs(3);

/// Scrapes the inventory search page for one ZIP code.
///
/// Navigates to the search URL, resolves the location gate, enters the ZIP,
/// and extracts every viable result card. An unresolvable gate is logged and
/// ignored (it may be cosmetic); a failed search or an empty result set is a
/// successful scrape of zero records. Individual cards that fail extraction
/// or the viability rule are skipped and counted, never fatal.
///
/// Records come back with `zip_code` stamped; `scraped_at` is left for the
/// persistence step.
///
/// # Errors
///
/// [`ScrapeError::Navigation`] when the page never loads, or a propagated
/// session error (fatal only when the session itself died).
pub async fn scrape_zip(
    session: &mut dyn PageSession,
    config: &ScraperConfig,
    zip_code: &str,
) -> Result<Vec<VehicleRecord>, ScrapeError> {
    navigate(session, config).await?;

    match gate::resolve_gate(session).await? {
        GateOutcome::Dismissed | GateOutcome::Absent => {}
        GateOutcome::FailedToResolve => {
            tracing::warn!(zip_code, "location gate unresolved; attempting search anyway");
        }
    }

    match search::search_inventory(session, zip_code).await? {
        SearchOutcome::ResultsPresent => {}
        SearchOutcome::NoResults => {
            tracing::debug!(zip_code, "no inventory for this ZIP");
            return Ok(Vec::new());
        }
        SearchOutcome::InputNotFound => {
            tracing::warn!(zip_code, "search input never resolved; treating as no results");
            return Ok(Vec::new());
        }
    }

    let cards = results::locate(session).await?;
    let mut records = Vec::with_capacity(cards.len());
    let mut rejected = 0_usize;
    for card in &cards {
        match extract::extract_vehicle(session, card, &config.site_origin).await? {
            Some(mut record) => {
                record.zip_code = zip_code.to_owned();
                records.push(record);
            }
            None => rejected += 1,
        }
    }
    tracing::debug!(
        zip_code,
        cards = cards.len(),
        extracted = records.len(),
        rejected,
        "finished ZIP scrape"
    );
    Ok(records)
}

/// Loads the search page and waits for it to become usable.
async fn navigate(
    session: &mut dyn PageSession,
    config: &ScraperConfig,
) -> Result<(), ScrapeError> {
    session
        .load(&config.search_url)
        .await
        .map_err(ScrapeError::from)?;

    let timeout = Duration::from_secs(config.page_load_timeout_secs);
    if !session.wait_for("body", timeout).await? {
        return Err(ScrapeError::Navigation {
            url: config.search_url.clone(),
            reason: format!(
                "page body never appeared within {}s",
                config.page_load_timeout_secs
            ),
        });
    }
    session.settle(PAGE_SETTLE).await?;
    Ok(())
}
