//! Wet-bulb temperature estimation
//!
//! Uses Stull's (2011) empirical approximation, valid for relative humidity
//! between 5% and 99% and temperatures between -20°C and 50°C at sea level
//! pressure. Inputs are not validated here.

/// Default wet-bulb alert threshold in Celsius
pub const ALERT_THRESHOLD_C: f64 = 32.0;

/// Estimate the wet-bulb temperature in Celsius.
///
/// `temperature_c` is the dry-bulb air temperature in Celsius and
/// `relative_humidity_pct` the relative humidity in percent (0-100).
/// A negative humidity yields `NaN`.
#[must_use]
pub fn estimate(temperature_c: f64, relative_humidity_pct: f64) -> f64 {
    let t = temperature_c;
    let rh = relative_humidity_pct;

    t * (0.152 * (rh + 8.3136).sqrt()).atan() + (t + rh).atan() - (rh - 1.6763).atan()
        + 0.003_918_38 * rh.powf(1.5) * (0.0231 * rh).atan()
        - 4.686
}
