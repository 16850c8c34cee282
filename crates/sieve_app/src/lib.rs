//! Command-line driver for the feed sieve pipeline: page loading, settings
//! store, configuration, real-time driving and reporting.

pub mod config;
pub mod driver;
pub mod logging;
pub mod page;
pub mod report;
pub mod store;

pub use config::{AppConfig, ConfigError};
pub use driver::{run, DriverOptions};
pub use logging::LogDestination;
pub use page::{load_document, read_markup, PageError};
pub use report::{ItemLine, RunReport};
pub use store::{SettingsStore, StoreError};
