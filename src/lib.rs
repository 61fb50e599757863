//! `wetbulb` - wet-bulb heat-stress tracking for named cities
//!
//! Fetches current temperature and humidity per city, derives a wet-bulb
//! temperature estimate and renders the tracked cities as a scatter plot
//! with alert and ranking summaries.

pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod logging;
pub mod models;
pub mod presenter;
pub mod session;
pub mod weather;
pub mod wet_bulb;

// Re-export core types for public API
pub use config::WetBulbConfig;
pub use dataset::{CityDataset, LoadReport};
pub use error::WetBulbError;
pub use models::{CityEntry, Observation};
pub use presenter::Presenter;
pub use session::{Action, Notice, Session};
pub use weather::{OpenWeatherMapClient, WeatherSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WetBulbError>;
