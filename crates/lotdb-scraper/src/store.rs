//! Persistence seam for scraped inventory.
//!
//! The pipeline has no opinion about where records land; it only needs the
//! three operations below. Implementations translate their backend's errors
//! into the boxed [`StoreError`].

use async_trait::async_trait;
use lotdb_core::VehicleRecord;

/// Backend-agnostic store error.
pub type StoreError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The document-store capability the campaign requires.
#[async_trait]
pub trait InventoryStore: Send {
    /// Every distinct ZIP code in the user-location collection — the set of
    /// places worth scraping. Implementations over free-text locations derive
    /// the keys with [`lotdb_core::zip_from_location`]. This is the campaign's
    /// key source, independent of what inventory is already stored.
    async fn distinct_zip_codes(&self) -> Result<Vec<String>, StoreError>;

    /// How many records are stored under `zip_code`.
    async fn count_for_zip(&self, zip_code: &str) -> Result<u64, StoreError>;

    /// Upserts a batch under `zip_code`, returning how many records were
    /// newly inserted (matched-and-updated records do not count).
    async fn upsert_records(
        &self,
        records: &[VehicleRecord],
        zip_code: &str,
    ) -> Result<u64, StoreError>;
}
