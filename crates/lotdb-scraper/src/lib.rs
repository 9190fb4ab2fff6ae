//! ZIP-keyed vehicle-inventory scraping pipeline.
//!
//! Drives a JavaScript-rendered inventory site through a [`page::PageSession`]
//! backend: dismisses the location-gating popup, searches by ZIP code,
//! extracts viable listing records through prioritized selector fallbacks,
//! and persists them through an [`store::InventoryStore`].
//!
//! The crate contains no browser and no database; both arrive as trait
//! implementations. See [`campaign::run_campaign`] for the top-level loop.

pub mod campaign;
pub mod error;
pub mod extract;
pub mod gate;
pub mod locators;
pub mod orchestrator;
pub mod page;
pub mod parse;
pub mod results;
pub mod search;
pub mod selector;
pub mod store;

pub use campaign::{
    run_campaign, run_campaign_for_user_zip_codes, CampaignError, CampaignSummary, CancelFlag,
};
pub use error::ScrapeError;
pub use gate::{resolve_gate, GateOutcome, GateState, GATE_DEFAULT_ZIP};
pub use orchestrator::scrape_zip;
pub use page::{ElementHandle, PageSession, SessionError};
pub use search::{search_inventory, SearchOutcome};
pub use store::{InventoryStore, StoreError};
