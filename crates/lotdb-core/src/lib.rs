//! Domain types shared between the scraping pipeline and store implementations.

mod record;

pub mod config;

pub use config::{load_config, load_config_from_env, ConfigError, ScraperConfig};
pub use record::{zip_from_location, VehicleRecord};
