//! Textual summaries of a dataset snapshot

use std::fmt;

use crate::dataset::CityDataset;

pub const ATTRIBUTION: &str =
    "Weather data provided by OpenWeatherMap (https://openweathermap.org/).";

/// What the summary block reports
#[derive(Debug, Clone, PartialEq)]
pub enum Summary<'a> {
    /// Cities above the alert threshold, in dataset order
    Alerts {
        threshold: f64,
        cities: Vec<(&'a str, f64)>,
    },
    /// Highest wet-bulb cities, descending
    Ranking { cities: Vec<(&'a str, f64)> },
    Empty,
}

impl<'a> Summary<'a> {
    /// Alerts when any city exceeds `threshold`, otherwise the top `n` ranking
    #[must_use]
    pub fn of(dataset: &'a CityDataset, threshold: f64, n: usize) -> Self {
        if dataset.is_empty() {
            return Summary::Empty;
        }

        let alerts = dataset.high_wet_bulb_entries(threshold);
        if alerts.is_empty() {
            Summary::Ranking {
                cities: dataset.top_n(n),
            }
        } else {
            Summary::Alerts {
                threshold,
                cities: alerts,
            }
        }
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Summary::Alerts { threshold, cities } => {
                writeln!(
                    f,
                    "⚠️  Dangerous wet-bulb temperatures (above {threshold:.1}°C):"
                )?;
                for (name, tw) in cities {
                    writeln!(f, "   - {name}: {tw:.1}°C")?;
                }
            }
            Summary::Ranking { cities } => {
                writeln!(f, "Top {} cities by wet-bulb temperature:", cities.len())?;
                for (rank, (name, tw)) in cities.iter().enumerate() {
                    writeln!(f, "   {}. {name}: {tw:.1}°C", rank + 1)?;
                }
            }
            Summary::Empty => writeln!(f, "No weather data available.")?,
        }
        Ok(())
    }
}

/// One row per tracked city: temperature, humidity and wet-bulb
pub struct CityTable<'a>(pub &'a CityDataset);

impl fmt::Display for CityTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.0.entries();
        let width = entries
            .iter()
            .map(|entry| entry.name.chars().count())
            .max()
            .unwrap_or(0)
            .max("City".len());

        writeln!(
            f,
            "{:<width$}  {:>8}  {:>8}  {:>8}",
            "City", "Temp", "RH", "Wet bulb"
        )?;
        for entry in entries {
            writeln!(
                f,
                "{:<width$}  {:>8}  {:>8}  {:>8}",
                entry.name,
                entry.observation.format_temperature(),
                entry.observation.format_humidity(),
                entry.format_wet_bulb()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Observation;
    use crate::weather::WeatherSource;
    use crate::{Result, WetBulbError};
    use chrono::Utc;

    struct TableSource;

    impl WeatherSource for TableSource {
        fn fetch(&self, city: &str) -> Result<Observation> {
            let (t, rh) = match city {
                "Mumbai" => (30.0, 70.0),
                "Chennai" => (35.0, 90.0),
                "Kolkata" => (20.0, 50.0),
                "Kochi" => (32.0, 100.0),
                _ => return Err(WetBulbError::fetch_failed(city, "city not found")),
            };
            Observation::new(t, rh, Utc::now())
        }
    }

    fn load(names: &[&str]) -> CityDataset {
        CityDataset::initialize(&TableSource, names).dataset
    }

    #[test]
    fn test_alerts_when_above_threshold() {
        let dataset = load(&["Mumbai", "Chennai", "Kochi"]);
        let summary = Summary::of(&dataset, 32.0, 3);
        match &summary {
            Summary::Alerts { cities, .. } => {
                let names: Vec<&str> = cities.iter().map(|(n, _)| *n).collect();
                assert_eq!(names, vec!["Chennai", "Kochi"]);
            }
            other => panic!("expected alerts, got {other:?}"),
        }
        let text = summary.to_string();
        assert!(text.contains("above 32.0°C"));
        assert!(text.contains("Chennai: 33.5°C"));
    }

    #[test]
    fn test_ranking_when_nothing_flagged() {
        let dataset = load(&["Kolkata", "Mumbai"]);
        let summary = Summary::of(&dataset, 32.0, 3);
        let text = summary.to_string();
        assert!(text.starts_with("Top 2 cities"));
        assert!(text.contains("1. Mumbai: 25.6°C"));
        assert!(text.contains("2. Kolkata: 13.7°C"));
    }

    #[test]
    fn test_empty_summary() {
        let dataset = CityDataset::new();
        let summary = Summary::of(&dataset, 32.0, 3);
        assert_eq!(summary, Summary::Empty);
        assert_eq!(summary.to_string(), "No weather data available.\n");
    }

    #[test]
    fn test_table_lists_every_city() {
        let dataset = load(&["Mumbai", "Kolkata"]);
        let table = CityTable(&dataset).to_string();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("Mumbai "));
        assert!(lines[1].contains("30.0°C"));
        assert!(lines[1].contains("70%"));
        assert!(lines[1].contains("25.6°C"));
    }
}
