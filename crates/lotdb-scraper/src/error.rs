use thiserror::Error;

use crate::page::SessionError;

/// Errors from scraping one ZIP code.
///
/// Everything here is absorbed at the per-ZIP boundary by the campaign loop,
/// except a fatal session loss (see [`ScrapeError::is_session_fault`]).
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The search page failed to load or settle. Retryable by re-running the
    /// ZIP; not retried automatically.
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ScrapeError {
    /// Whether this error means the rendering session is gone for good.
    #[must_use]
    pub fn is_session_fault(&self) -> bool {
        matches!(self, ScrapeError::Session(source) if source.is_fatal())
    }
}
