//! Tracked city entry

use serde::{Deserialize, Serialize};

use super::Observation;
use crate::wet_bulb;

/// A tracked city with its observation and derived wet-bulb temperature
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CityEntry {
    /// City name as entered by the user (case-sensitive)
    pub name: String,
    /// Conditions fetched for this city
    pub observation: Observation,
    /// Wet-bulb temperature in Celsius derived from `observation`
    pub wet_bulb_c: f64,
}

impl CityEntry {
    /// Create an entry, deriving the wet-bulb temperature from the observation
    #[must_use]
    pub fn new(name: String, observation: Observation) -> Self {
        let wet_bulb_c = wet_bulb::estimate(
            observation.temperature_c,
            observation.relative_humidity_pct,
        );
        Self {
            name,
            observation,
            wet_bulb_c,
        }
    }

    /// Format wet-bulb temperature with unit
    #[must_use]
    pub fn format_wet_bulb(&self) -> String {
        format!("{:.1}°C", self.wet_bulb_c)
    }
}
