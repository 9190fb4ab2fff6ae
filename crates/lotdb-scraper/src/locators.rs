//! Prioritized locator candidates per semantic UI role.
//!
//! The target markup is unstable and undocumented, so no role gets a single
//! hard-coded selector. Each role is an ordered list: known-correct or
//! specific selectors first, attribute-substring matches next, generic
//! tag/class fallbacks last. [`crate::selector::resolve`] walks a list in
//! order and stops at the first candidate with a surviving match.

/// One fallback candidate for locating a UI role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate {
    /// CSS selector query.
    Css(&'static str),
    /// Tag + text-containment query (`"*"` matches any tag).
    Text {
        tag: &'static str,
        needle: &'static str,
    },
}

use Candidate::{Css, Text};

/// The location-gating popup container.
pub const POPUP_CONTAINERS: &[Candidate] = &[
    Css(".modal"),
    Css(".popup"),
    Css(".zip-popup"),
    Css(".location-popup"),
    Css("[data-testid*='modal']"),
    Css("[data-testid*='popup']"),
    Css(".overlay"),
    Css(".dialog"),
    Css(".location-modal"),
    Css(".zip-modal"),
    Css("[class*='modal']"),
    Css("[class*='popup']"),
    Css("[class*='overlay']"),
];

/// ZIP code input, used both inside the gate and for the real search.
/// The bare `input[type='text']` fallback is last on purpose.
pub const ZIP_INPUTS: &[Candidate] = &[
    Css("input[placeholder*='ZIP']"),
    Css("input[placeholder*='zip']"),
    Css("input[name*='zip']"),
    Css("input[id*='zip']"),
    Css("input[data-testid*='zip']"),
    Css(".zip-input input"),
    Css(".location-input input"),
    Css("input[type='text']"),
];

/// Submit control inside the gating popup. Action-word text matches cover
/// markup where the button carries no useful attributes at all.
pub const GATE_SUBMIT_BUTTONS: &[Candidate] = &[
    Css("button[type='submit']"),
    Text {
        tag: "button",
        needle: "Continue",
    },
    Text {
        tag: "button",
        needle: "Submit",
    },
    Text {
        tag: "button",
        needle: "Search",
    },
    Text {
        tag: "button",
        needle: "OK",
    },
    Text {
        tag: "button",
        needle: "Go",
    },
    Css(".btn"),
    Css(".button"),
    Css("[data-testid*='submit']"),
    Css("[data-testid*='continue']"),
];

/// Submit control for the inventory search form.
pub const SEARCH_SUBMIT_BUTTONS: &[Candidate] = &[
    Css("button[type='submit']"),
    Css("button[data-testid*='search']"),
    Text {
        tag: "button",
        needle: "Search",
    },
    Css(".search-button"),
    Css(".btn-search"),
    Css("input[type='submit']"),
];

/// The repeated result-card collection.
pub const LISTING_CONTAINERS: &[Candidate] = &[
    Css(".vehicle-listing"),
    Css(".inventory-item"),
    Css(".car-card"),
    Css(".vehicle-card"),
    Css("[data-testid*='vehicle']"),
    Css(".result-item"),
    Css(".vehicle-result"),
];

/// Explicit empty-result messages.
pub const NO_RESULTS_MARKERS: &[Candidate] = &[
    Text {
        tag: "*",
        needle: "No vehicles found",
    },
    Text {
        tag: "*",
        needle: "No inventory found",
    },
    Text {
        tag: "*",
        needle: "No results",
    },
];

// ---------------------------------------------------------------------------
// Per-field chains, scoped to one result card
// ---------------------------------------------------------------------------

pub const MODEL_FIELDS: &[Candidate] = &[
    Css(".model"),
    Css(".vehicle-model"),
    Css(".car-model"),
    Css("h3"),
    Css("h2"),
    Css(".title"),
];

pub const YEAR_FIELDS: &[Candidate] = &[Css(".year"), Css(".vehicle-year"), Css("[class*='year']")];

pub const TRIM_FIELDS: &[Candidate] = &[Css(".trim"), Css(".vehicle-trim"), Css("[class*='trim']")];

pub const PRICE_FIELDS: &[Candidate] = &[
    Css(".price"),
    Css(".vehicle-price"),
    Css(".car-price"),
    Css("[class*='price']"),
];

pub const DEALER_FIELDS: &[Candidate] = &[
    Css(".dealer"),
    Css(".dealer-name"),
    Css(".dealership"),
    Css("[class*='dealer']"),
];

pub const FUEL_FIELDS: &[Candidate] = &[Css(".fuel-type"), Css(".fuel"), Css("[class*='fuel']")];

pub const DRIVETRAIN_FIELDS: &[Candidate] =
    &[Css(".drivetrain"), Css(".drive"), Css("[class*='drive']")];

pub const MILEAGE_FIELDS: &[Candidate] =
    &[Css(".mileage"), Css(".miles"), Css("[class*='mile']")];

pub const COLOR_FIELDS: &[Candidate] = &[
    Css(".color"),
    Css(".exterior-color"),
    Css("[class*='color']"),
];

pub const DETAIL_LINKS: &[Candidate] = &[Css("a[href]")];
