//! Observation model and display methods

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Result, WetBulbError};

/// Current conditions reported for one city
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Observation {
    /// Temperature in Celsius
    pub temperature_c: f64,
    /// Relative humidity in percent (0-100)
    pub relative_humidity_pct: f64,
    /// When the provider measured these conditions
    pub observed_at: DateTime<Utc>,
}

impl Observation {
    /// Create a validated observation.
    ///
    /// Rejects non-finite values and humidity outside `[0, 100]`.
    pub fn new(
        temperature_c: f64,
        relative_humidity_pct: f64,
        observed_at: DateTime<Utc>,
    ) -> Result<Self> {
        if !temperature_c.is_finite() {
            return Err(WetBulbError::validation(format!(
                "temperature must be a finite number, got: {temperature_c}"
            )));
        }

        if !(0.0..=100.0).contains(&relative_humidity_pct) {
            return Err(WetBulbError::validation(format!(
                "relative humidity must be between 0 and 100, got: {relative_humidity_pct}"
            )));
        }

        Ok(Self {
            temperature_c,
            relative_humidity_pct,
            observed_at,
        })
    }

    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.1}°C", self.temperature_c)
    }

    /// Format humidity with unit
    #[must_use]
    pub fn format_humidity(&self) -> String {
        format!("{:.0}%", self.relative_humidity_pct)
    }
}
