//! QualSteam forensic trace
//!
//! Loads recorded steam-control process logs, summarises them, and describes
//! the four-row trace chart (temperature, pressure, steam flow, valve) that a
//! rendering backend draws from them.

pub use cache::TableCache;
pub use dashboard::{Banner, Dashboard, DashboardView, ViewState};
pub use error::Error;
pub use loader::Loader;
pub use scenario::{Catalog, CatalogConfig, Scenario};
pub use table::SignalTable;

mod cache;
mod error;
mod loader;

pub mod chart;
pub mod compose;
pub mod dashboard;
pub mod metrics;
pub mod scenario;
pub mod schema;
pub mod style;
pub mod table;
