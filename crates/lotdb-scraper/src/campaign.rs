//! The multi-ZIP campaign loop.
//!
//! One rendering session is reused sequentially across a list of ZIP codes.
//! A ZIP that fails never stops the loop; only losing the session itself
//! does, and even then the partial summary survives in the error. The
//! session is torn down on every exit path.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use thiserror::Error;

use lotdb_core::ScraperConfig;

use crate::error::ScrapeError;
use crate::orchestrator;
use crate::page::PageSession;
use crate::store::{InventoryStore, StoreError};

/// Counters accumulated across one campaign run. Every ZIP in the input
/// lands in exactly one of skipped / succeeded / failed; cancellation leaves
/// the remainder uncounted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignSummary {
    pub zip_codes_total: usize,
    pub zip_codes_skipped_existing: usize,
    pub zip_codes_succeeded: usize,
    pub zip_codes_failed: usize,
    pub records_persisted: u64,
}

/// Errors that abort a campaign outright.
#[derive(Debug, Error)]
pub enum CampaignError {
    /// The rendering session died mid-campaign. Carries everything that was
    /// accomplished before the loss.
    #[error(
        "rendering session lost after {} of {} ZIP codes succeeded",
        .summary.zip_codes_succeeded,
        .summary.zip_codes_total
    )]
    SessionLost {
        summary: CampaignSummary,
        #[source]
        source: ScrapeError,
    },

    /// The store failed while enumerating existing keys (before the loop ran).
    #[error("inventory store unavailable")]
    Store(#[source] StoreError),
}

/// Cooperative cancellation flag, checked at the top of each ZIP iteration.
/// Cloneable; any holder may request cancellation from another task.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Runs a campaign over `zip_codes` in order, guaranteeing session teardown.
///
/// Per ZIP: skip when the store already has records for it, otherwise scrape,
/// stamp `scraped_at`, and upsert. Scrape and store failures are counted and
/// logged per ZIP; the loop continues. Between ZIPs (not after the last, and
/// not after a skip into cancellation) the configured inter-request delay is
/// observed.
///
/// # Errors
///
/// [`CampaignError::SessionLost`] when the rendering session dies; the
/// partial [`CampaignSummary`] rides along in the error.
pub async fn run_campaign(
    session: &mut dyn PageSession,
    store: &dyn InventoryStore,
    config: &ScraperConfig,
    zip_codes: &[String],
    cancel: &CancelFlag,
) -> Result<CampaignSummary, CampaignError> {
    let outcome = drive(session, store, config, zip_codes, cancel).await;
    if let Err(e) = session.close().await {
        tracing::warn!(error = %e, "session teardown failed");
    }
    outcome
}

/// Runs a campaign over every distinct ZIP code in the store's user-location
/// collection.
///
/// This is the usual entry point: the places worth scraping come from where
/// the users are, and the skip-if-present rule then limits the run to ZIPs
/// with no inventory yet.
///
/// # Errors
///
/// [`CampaignError::Store`] when the key enumeration fails (the session is
/// still closed), otherwise as [`run_campaign`].
pub async fn run_campaign_for_user_zip_codes(
    session: &mut dyn PageSession,
    store: &dyn InventoryStore,
    config: &ScraperConfig,
    cancel: &CancelFlag,
) -> Result<CampaignSummary, CampaignError> {
    let zip_codes = match store.distinct_zip_codes().await {
        Ok(zip_codes) => zip_codes,
        Err(e) => {
            if let Err(close_err) = session.close().await {
                tracing::warn!(error = %close_err, "session teardown failed");
            }
            return Err(CampaignError::Store(e));
        }
    };
    run_campaign(session, store, config, &zip_codes, cancel).await
}

async fn drive(
    session: &mut dyn PageSession,
    store: &dyn InventoryStore,
    config: &ScraperConfig,
    zip_codes: &[String],
    cancel: &CancelFlag,
) -> Result<CampaignSummary, CampaignError> {
    let mut summary = CampaignSummary {
        zip_codes_total: zip_codes.len(),
        ..CampaignSummary::default()
    };
    let delay = Duration::from_secs(config.inter_request_delay_secs);

    for (index, zip_code) in zip_codes.iter().enumerate() {
        if cancel.is_cancelled() {
            tracing::info!(
                remaining = zip_codes.len() - index,
                "campaign cancelled; stopping"
            );
            break;
        }

        match store.count_for_zip(zip_code).await {
            Ok(existing) if existing > 0 => {
                tracing::info!(zip_code, existing, "records already stored; skipping");
                summary.zip_codes_skipped_existing += 1;
                continue;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::error!(zip_code, error = %e, "store count failed");
                summary.zip_codes_failed += 1;
                continue;
            }
        }

        match orchestrator::scrape_zip(session, config, zip_code).await {
            Ok(records) if records.is_empty() => {
                tracing::info!(zip_code, "ZIP complete with no inventory; nothing to persist");
                summary.zip_codes_succeeded += 1;
            }
            Ok(mut records) => {
                let scraped_at = Utc::now();
                for record in &mut records {
                    record.scraped_at = Some(scraped_at);
                }
                match store.upsert_records(&records, zip_code).await {
                    Ok(inserted) => {
                        tracing::info!(
                            zip_code,
                            scraped = records.len(),
                            inserted,
                            "ZIP complete"
                        );
                        summary.zip_codes_succeeded += 1;
                        summary.records_persisted += inserted;
                    }
                    Err(e) => {
                        tracing::error!(zip_code, error = %e, "persisting records failed");
                        summary.zip_codes_failed += 1;
                    }
                }
            }
            Err(e) if e.is_session_fault() => {
                tracing::error!(zip_code, error = %e, "rendering session lost");
                return Err(CampaignError::SessionLost { summary, source: e });
            }
            Err(e) => {
                tracing::error!(zip_code, error = %e, "ZIP scrape failed");
                summary.zip_codes_failed += 1;
            }
        }

        let is_last = index + 1 == zip_codes.len();
        if !is_last && !cancel.is_cancelled() {
            tokio::time::sleep(delay).await;
        }
    }

    tracing::info!(
        total = summary.zip_codes_total,
        skipped = summary.zip_codes_skipped_existing,
        succeeded = summary.zip_codes_succeeded,
        failed = summary.zip_codes_failed,
        persisted = summary.records_persisted,
        "campaign finished"
    );
    Ok(summary)
}
