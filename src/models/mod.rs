//! Data models for the wetbulb application
//!
//! - Observation: temperature and humidity reported for a city
//! - City: a tracked city with its derived wet-bulb temperature

pub mod city;
pub mod observation;

pub use city::CityEntry;
pub use observation::Observation;
