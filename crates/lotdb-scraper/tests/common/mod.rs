//! Shared scripted doubles for the behavioral tests.
//!
//! `MockPage` answers locator queries from explicit registries and logs every
//! interaction; `MockStore` keeps upserted batches in memory. All waits are
//! no-ops so the tests run instantly.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use lotdb_core::VehicleRecord;
use lotdb_scraper::{ElementHandle, InventoryStore, PageSession, SessionError, StoreError};

#[derive(Default)]
pub struct MockPage {
    /// CSS selector -> document-level matches.
    css: HashMap<String, Vec<u64>>,
    /// (scope element, CSS selector) -> scoped matches.
    scoped_css: HashMap<(u64, String), Vec<u64>>,
    /// (tag, needle) -> document-level text-containment matches.
    text_queries: HashMap<(String, String), Vec<u64>>,
    /// Rendered text per element.
    texts: HashMap<u64, String>,
    /// (element, attribute name) -> value.
    attributes: HashMap<(u64, String), String>,
    visible: HashSet<u64>,
    stale: HashSet<u64>,
    /// Clicking the key removes the listed elements from the page.
    hide_on_click: HashMap<u64, Vec<u64>>,
    /// Submitting the key removes the listed elements from the page.
    hide_on_submit: HashMap<u64, Vec<u64>>,
    /// How many upcoming `load` calls fail with a navigation error.
    pub fail_next_loads: usize,
    /// 1-based `load` call index that kills the session.
    pub die_on_load: Option<usize>,
    /// Whether `wait_for("body", _)` reports the page as loaded.
    pub body_appears: bool,
    dead: bool,

    pub loads: Vec<String>,
    pub clicks: Vec<u64>,
    pub typed: Vec<(u64, String)>,
    pub submits: Vec<u64>,
    pub close_calls: usize,
}

impl MockPage {
    pub fn new() -> Self {
        Self {
            body_appears: true,
            ..Self::default()
        }
    }

    pub fn add_css(&mut self, selector: &str, ids: &[u64]) -> &mut Self {
        self.css.insert(selector.to_owned(), ids.to_vec());
        self
    }

    pub fn add_scoped_css(&mut self, scope: u64, selector: &str, ids: &[u64]) -> &mut Self {
        self.scoped_css
            .insert((scope, selector.to_owned()), ids.to_vec());
        self
    }

    pub fn add_text_query(&mut self, tag: &str, needle: &str, ids: &[u64]) -> &mut Self {
        self.text_queries
            .insert((tag.to_owned(), needle.to_owned()), ids.to_vec());
        self
    }

    pub fn set_text(&mut self, id: u64, text: &str) -> &mut Self {
        self.texts.insert(id, text.to_owned());
        self
    }

    pub fn set_attribute(&mut self, id: u64, name: &str, value: &str) -> &mut Self {
        self.attributes.insert((id, name.to_owned()), value.to_owned());
        self
    }

    pub fn set_visible(&mut self, ids: &[u64]) -> &mut Self {
        self.visible.extend(ids.iter().copied());
        self
    }

    pub fn set_stale(&mut self, id: u64) -> &mut Self {
        self.stale.insert(id);
        self.visible.remove(&id);
        self
    }

    pub fn hide_on_click(&mut self, trigger: u64, hidden: &[u64]) -> &mut Self {
        self.hide_on_click.insert(trigger, hidden.to_vec());
        self
    }

    pub fn hide_on_submit(&mut self, trigger: u64, hidden: &[u64]) -> &mut Self {
        self.hide_on_submit.insert(trigger, hidden.to_vec());
        self
    }

    fn guard(&self) -> Result<(), SessionError> {
        if self.dead {
            return Err(SessionError::SessionDead("mock session dead".to_owned()));
        }
        Ok(())
    }

    fn check_live(&self, id: u64) -> Result<(), SessionError> {
        if self.stale.contains(&id) {
            return Err(SessionError::StaleElement);
        }
        Ok(())
    }

    fn remove(&mut self, ids: &[u64]) {
        for id in ids {
            self.stale.insert(*id);
            self.visible.remove(id);
        }
    }

    fn filter_live(&self, ids: &[u64]) -> Vec<ElementHandle> {
        ids.iter()
            .filter(|id| !self.stale.contains(id))
            .map(|id| ElementHandle(*id))
            .collect()
    }
}

#[async_trait]
impl PageSession for MockPage {
    async fn load(&mut self, url: &str) -> Result<(), SessionError> {
        self.guard()?;
        self.loads.push(url.to_owned());
        if self.die_on_load == Some(self.loads.len()) {
            self.dead = true;
            return Err(SessionError::SessionDead("mock session dead".to_owned()));
        }
        if self.fail_next_loads > 0 {
            self.fail_next_loads -= 1;
            return Err(SessionError::Navigation {
                url: url.to_owned(),
                reason: "scripted navigation failure".to_owned(),
            });
        }
        Ok(())
    }

    async fn find_all(
        &mut self,
        scope: Option<&ElementHandle>,
        selector: &str,
    ) -> Result<Vec<ElementHandle>, SessionError> {
        self.guard()?;
        match scope {
            Some(scope) => {
                self.check_live(scope.0)?;
                let key = (scope.0, selector.to_owned());
                Ok(self
                    .scoped_css
                    .get(&key)
                    .map(|ids| self.filter_live(ids))
                    .unwrap_or_default())
            }
            None => Ok(self
                .css
                .get(selector)
                .map(|ids| self.filter_live(ids))
                .unwrap_or_default()),
        }
    }

    async fn find_by_text(
        &mut self,
        scope: Option<&ElementHandle>,
        tag: &str,
        needle: &str,
    ) -> Result<Vec<ElementHandle>, SessionError> {
        self.guard()?;
        if let Some(scope) = scope {
            self.check_live(scope.0)?;
            // Scoped text queries are not scripted in these tests.
            return Ok(Vec::new());
        }
        let key = (tag.to_owned(), needle.to_owned());
        Ok(self
            .text_queries
            .get(&key)
            .map(|ids| self.filter_live(ids))
            .unwrap_or_default())
    }

    async fn is_visible(&mut self, element: &ElementHandle) -> Result<bool, SessionError> {
        self.guard()?;
        self.check_live(element.0)?;
        Ok(self.visible.contains(&element.0))
    }

    async fn text(&mut self, element: &ElementHandle) -> Result<String, SessionError> {
        self.guard()?;
        self.check_live(element.0)?;
        Ok(self.texts.get(&element.0).cloned().unwrap_or_default())
    }

    async fn attribute(
        &mut self,
        element: &ElementHandle,
        name: &str,
    ) -> Result<Option<String>, SessionError> {
        self.guard()?;
        self.check_live(element.0)?;
        Ok(self.attributes.get(&(element.0, name.to_owned())).cloned())
    }

    async fn click(&mut self, element: &ElementHandle) -> Result<(), SessionError> {
        self.guard()?;
        self.check_live(element.0)?;
        self.clicks.push(element.0);
        if let Some(hidden) = self.hide_on_click.get(&element.0).cloned() {
            self.remove(&hidden);
        }
        Ok(())
    }

    async fn clear_and_type(
        &mut self,
        element: &ElementHandle,
        text: &str,
    ) -> Result<(), SessionError> {
        self.guard()?;
        self.check_live(element.0)?;
        self.typed.push((element.0, text.to_owned()));
        Ok(())
    }

    async fn submit(&mut self, element: &ElementHandle) -> Result<(), SessionError> {
        self.guard()?;
        self.check_live(element.0)?;
        self.submits.push(element.0);
        if let Some(hidden) = self.hide_on_submit.get(&element.0).cloned() {
            self.remove(&hidden);
        }
        Ok(())
    }

    async fn wait_for(
        &mut self,
        selector: &str,
        _timeout: Duration,
    ) -> Result<bool, SessionError> {
        self.guard()?;
        if selector == "body" {
            return Ok(self.body_appears);
        }
        Ok(self.css.get(selector).is_some_and(|ids| !ids.is_empty()))
    }

    async fn settle(&mut self, _pause: Duration) -> Result<(), SessionError> {
        self.guard()
    }

    async fn close(&mut self) -> Result<(), SessionError> {
        self.close_calls += 1;
        Ok(())
    }
}

// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MockStore {
    pub existing_counts: HashMap<String, u64>,
    /// Distinct ZIPs from the user-location collection.
    pub user_zip_codes: Vec<String>,
    /// ZIP codes whose `count_for_zip` call fails.
    pub count_errors: HashSet<String>,
    /// ZIP codes whose `upsert_records` call fails.
    pub upsert_errors: HashSet<String>,
    pub upserts: Mutex<Vec<(String, Vec<VehicleRecord>)>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_existing(mut self, zip_code: &str, count: u64) -> Self {
        self.existing_counts.insert(zip_code.to_owned(), count);
        self
    }

    pub fn upserted(&self) -> Vec<(String, Vec<VehicleRecord>)> {
        self.upserts.lock().expect("mock store lock").clone()
    }
}

#[async_trait]
impl InventoryStore for MockStore {
    async fn distinct_zip_codes(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.user_zip_codes.clone())
    }

    async fn count_for_zip(&self, zip_code: &str) -> Result<u64, StoreError> {
        if self.count_errors.contains(zip_code) {
            return Err("scripted count failure".into());
        }
        Ok(self.existing_counts.get(zip_code).copied().unwrap_or(0))
    }

    async fn upsert_records(
        &self,
        records: &[VehicleRecord],
        zip_code: &str,
    ) -> Result<u64, StoreError> {
        if self.upsert_errors.contains(zip_code) {
            return Err("scripted upsert failure".into());
        }
        self.upserts
            .lock()
            .expect("mock store lock")
            .push((zip_code.to_owned(), records.to_vec()));
        Ok(records.len() as u64)
    }
}
