//! Weather data sources
//!
//! A [`WeatherSource`] resolves a city name to its current [`Observation`].
//! Each call is a single best-effort attempt; failures are reported as
//! [`WetBulbError::FetchFailed`](crate::WetBulbError::FetchFailed).

use crate::Result;
use crate::models::Observation;

pub mod openweathermap;

pub use openweathermap::OpenWeatherMapClient;

/// Provider of current conditions by city name
pub trait WeatherSource {
    /// Fetch the current observation for `city`
    fn fetch(&self, city: &str) -> Result<Observation>;
}

impl<S: WeatherSource + ?Sized> WeatherSource for &S {
    fn fetch(&self, city: &str) -> Result<Observation> {
        (**self).fetch(city)
    }
}

impl<S: WeatherSource + ?Sized> WeatherSource for Box<S> {
    fn fetch(&self, city: &str) -> Result<Observation> {
        (**self).fetch(city)
    }
}
