//! The location-gating popup state machine.
//!
//! The target site interposes a modal asking for a location before the
//! inventory page is usable. Its markup is unknown ahead of time, so every
//! step resolves through prioritized candidate lists. The gate is dismissed
//! with a fixed default ZIP; the real target ZIP is always re-entered by the
//! search step afterwards.

use std::time::Duration;

use crate::locators;
use crate::page::{PageSession, SessionError};
use crate::selector;

/// Fixed value typed only to dismiss the gate. Never the searched ZIP.
pub const GATE_DEFAULT_ZIP: &str = "90210";

/// Wait for the popup to appear after page settle.
const POPUP_APPEAR_SETTLE: Duration = Duration::from_secs(2);

/// Wait for the popup to go away after submitting it.
const POPUP_DISMISS_SETTLE: Duration = Duration::from_secs(2);

/// Progress through one gate resolution. Created fresh on every navigation
/// and discarded after; transitions only advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GateState {
    Unchecked,
    PopupDetected,
    InputLocated,
    Submitted,
    Dismissed,
    /// No gate on this navigation. Terminal, and equivalent to `Dismissed`
    /// for everything downstream.
    Absent,
}

impl GateState {
    fn advance(&mut self, next: GateState) {
        debug_assert!(next > *self, "gate state may only advance");
        tracing::debug!(from = ?*self, to = ?next, "gate state");
        *self = next;
    }
}

/// Result of one gate resolution attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    Dismissed,
    Absent,
    /// A popup was detected but no usable input was found. Non-fatal: the
    /// gate may be cosmetic, so callers proceed to search anyway.
    FailedToResolve,
}

/// Detects and dismisses the location gate.
///
/// Waits a short settle interval, then resolves the popup container, a ZIP
/// input (popup-scoped first, then globally), types [`GATE_DEFAULT_ZIP`], and
/// submits via a resolved button or the input's default submission action.
/// After a dismiss settle, the popup's visibility is re-checked — a stale or
/// absent popup element counts as success, since a removed element cannot be
/// queried. A popup that still reports visible is also reported `Dismissed`,
/// optimistically.
///
/// # Errors
///
/// Only a dead session propagates.
pub async fn resolve_gate(session: &mut dyn PageSession) -> Result<GateOutcome, SessionError> {
    let mut state = GateState::Unchecked;
    session.settle(POPUP_APPEAR_SETTLE).await?;

    let Some(popup) = selector::resolve(session, None, locators::POPUP_CONTAINERS, true).await?
    else {
        state.advance(GateState::Absent);
        tracing::debug!("no location gate on this navigation");
        return Ok(GateOutcome::Absent);
    };
    state.advance(GateState::PopupDetected);

    let input = match selector::resolve(session, Some(&popup), locators::ZIP_INPUTS, true).await? {
        Some(input) => Some(input),
        None => selector::resolve(session, None, locators::ZIP_INPUTS, true).await?,
    };
    let Some(input) = input else {
        tracing::warn!("location gate detected but no ZIP input resolved");
        return Ok(GateOutcome::FailedToResolve);
    };
    state.advance(GateState::InputLocated);

    if let Err(e) = session.clear_and_type(&input, GATE_DEFAULT_ZIP).await {
        if e.is_fatal() {
            return Err(e);
        }
        tracing::warn!(error = %e, "could not type into the gate input");
        return Ok(GateOutcome::FailedToResolve);
    }

    let submit =
        match selector::resolve(session, Some(&popup), locators::GATE_SUBMIT_BUTTONS, true).await? {
            Some(button) => Some(button),
            None => selector::resolve(session, None, locators::GATE_SUBMIT_BUTTONS, true).await?,
        };
    let submitted = match submit {
        Some(button) => session.click(&button).await,
        None => session.submit(&input).await,
    };
    if let Err(e) = submitted {
        if e.is_fatal() {
            return Err(e);
        }
        tracing::warn!(error = %e, "could not submit the gate");
        return Ok(GateOutcome::FailedToResolve);
    }
    state.advance(GateState::Submitted);

    session.settle(POPUP_DISMISS_SETTLE).await?;

    match session.is_visible(&popup).await {
        Ok(false) => tracing::debug!("location gate dismissed"),
        Ok(true) => {
            tracing::debug!("location gate still reports visible after submit; proceeding");
        }
        Err(e) if e.is_fatal() => return Err(e),
        Err(_) => tracing::debug!("location gate element gone after submit"),
    }
    state.advance(GateState::Dismissed);
    Ok(GateOutcome::Dismissed)
}
