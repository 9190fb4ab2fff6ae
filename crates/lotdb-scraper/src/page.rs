//! Capability interface over the page-rendering engine.
//!
//! The pipeline never talks to a browser directly; it drives whatever
//! implements [`PageSession`]. One session is owned exclusively by one
//! campaign run and is reused sequentially across ZIP codes.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Opaque reference to an element in the rendered page.
///
/// Handles are assigned by the session and may go stale once the underlying
/// element is removed from the document (e.g., a dismissed popup).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementHandle(pub u64);

/// Errors surfaced by a [`PageSession`] implementation.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    /// The referenced element no longer exists in the document. Callers treat
    /// this as "element gone", not as a session problem.
    #[error("stale element reference")]
    StaleElement,

    #[error("timed out after {timeout_secs}s waiting for \"{what}\"")]
    Timeout { what: String, timeout_secs: u64 },

    /// The rendering engine itself is unusable (crashed browser, lost
    /// connection). Fatal to the remainder of the campaign.
    #[error("rendering session is no longer usable: {0}")]
    SessionDead(String),
}

impl SessionError {
    /// Whether this error ends the campaign rather than one step.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, SessionError::SessionDead(_))
    }
}

/// The capability set the pipeline requires from a rendering backend.
///
/// Implementations own exactly one browser session. All waits (bounded
/// predicate waits and fixed settle pauses) go through the session so that
/// test doubles can make them instantaneous.
#[async_trait]
pub trait PageSession: Send {
    /// Navigate the session to `url`.
    async fn load(&mut self, url: &str) -> Result<(), SessionError>;

    /// All elements matching a CSS selector, searched within `scope` when
    /// given, otherwise the whole document. A selector matching nothing is
    /// `Ok(vec![])`, never an error.
    async fn find_all(
        &mut self,
        scope: Option<&ElementHandle>,
        selector: &str,
    ) -> Result<Vec<ElementHandle>, SessionError>;

    /// All elements of `tag` (`"*"` for any) whose text contains `needle`.
    async fn find_by_text(
        &mut self,
        scope: Option<&ElementHandle>,
        tag: &str,
        needle: &str,
    ) -> Result<Vec<ElementHandle>, SessionError>;

    async fn is_visible(&mut self, element: &ElementHandle) -> Result<bool, SessionError>;

    /// Full rendered text of the element, untrimmed.
    async fn text(&mut self, element: &ElementHandle) -> Result<String, SessionError>;

    async fn attribute(
        &mut self,
        element: &ElementHandle,
        name: &str,
    ) -> Result<Option<String>, SessionError>;

    async fn click(&mut self, element: &ElementHandle) -> Result<(), SessionError>;

    /// Clear an input and type `text` into it.
    async fn clear_and_type(
        &mut self,
        element: &ElementHandle,
        text: &str,
    ) -> Result<(), SessionError>;

    /// Trigger the input's default submission action (confirm key).
    async fn submit(&mut self, element: &ElementHandle) -> Result<(), SessionError>;

    /// Wait up to `timeout` for `selector` to match at least one element.
    /// Returns whether it appeared; elapsing the timeout is `Ok(false)`.
    async fn wait_for(&mut self, selector: &str, timeout: Duration)
        -> Result<bool, SessionError>;

    /// Fixed settle pause for dynamic content.
    async fn settle(&mut self, pause: Duration) -> Result<(), SessionError>;

    /// Tear down the session. Called once, on every campaign exit path.
    async fn close(&mut self) -> Result<(), SessionError>;
}
