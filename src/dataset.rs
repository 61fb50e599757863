//! Tracked city dataset
//!
//! An ordered, name-unique collection of [`CityEntry`] values. Entries are only
//! created from successful fetches and are never modified once inserted; a
//! refresh rebuilds the whole snapshot.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::models::CityEntry;
use crate::weather::WeatherSource;
use crate::{Result, WetBulbError};

/// Outcome of loading a batch of cities
#[derive(Debug)]
pub struct LoadReport {
    /// Dataset built from the cities that were fetched successfully
    pub dataset: CityDataset,
    /// One error per city that was left out
    pub failures: Vec<WetBulbError>,
}

/// Ordered set of tracked cities with their observations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CityDataset {
    entries: Vec<CityEntry>,
}

impl CityDataset {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch every listed city in order and build a dataset from the successes.
    ///
    /// Cities that fail to fetch are omitted. Repeated names are fetched once.
    #[instrument(skip(source, names), fields(cities = names.len()))]
    pub fn initialize<S, N>(source: &S, names: &[N]) -> LoadReport
    where
        S: WeatherSource + ?Sized,
        N: AsRef<str>,
    {
        let mut dataset = Self::new();
        let mut failures = Vec::new();

        for name in names {
            let name = name.as_ref();
            if let Err(e) = dataset.add(source, name) {
                warn!("Skipping '{}': {}", name, e);
                failures.push(e);
            }
        }

        info!(
            "Loaded {} of {} cities ({} skipped)",
            dataset.len(),
            names.len(),
            failures.len()
        );

        LoadReport { dataset, failures }
    }

    /// Fetch `name` and append it, returning its wet-bulb temperature.
    ///
    /// Duplicates are rejected before any fetch. The dataset is unchanged on error.
    pub fn add<S>(&mut self, source: &S, name: &str) -> Result<f64>
    where
        S: WeatherSource + ?Sized,
    {
        if self.contains(name) {
            return Err(WetBulbError::already_present(name));
        }

        let observation = source.fetch(name)?;
        let entry = CityEntry::new(name.to_string(), observation);
        let wet_bulb = entry.wet_bulb_c;
        debug!("Added '{}' with wet-bulb {:.2}°C", name, wet_bulb);
        self.entries.push(entry);

        Ok(wet_bulb)
    }

    /// Remove `name`, keeping the relative order of the remaining entries
    pub fn remove(&mut self, name: &str) -> Result<()> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.name == name)
            .ok_or_else(|| WetBulbError::not_present(name))?;

        self.entries.remove(index);
        debug!("Removed '{}'", name);
        Ok(())
    }

    /// Replace the dataset with a fresh load of `names`, returning the per-city failures
    pub fn refresh<S, N>(&mut self, source: &S, names: &[N]) -> Vec<WetBulbError>
    where
        S: WeatherSource + ?Sized,
        N: AsRef<str>,
    {
        let report = Self::initialize(source, names);
        *self = report.dataset;
        report.failures
    }

    /// Entries with a wet-bulb temperature strictly above `threshold`, in dataset order
    #[must_use]
    pub fn high_wet_bulb_entries(&self, threshold: f64) -> Vec<(&str, f64)> {
        self.entries
            .iter()
            .filter(|entry| entry.wet_bulb_c > threshold)
            .map(|entry| (entry.name.as_str(), entry.wet_bulb_c))
            .collect()
    }

    /// The `n` highest wet-bulb entries, descending; ties keep dataset order
    #[must_use]
    pub fn top_n(&self, n: usize) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self
            .entries
            .iter()
            .map(|entry| (entry.name.as_str(), entry.wet_bulb_c))
            .collect();

        // sort_by is stable
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    /// Lowest and highest wet-bulb temperatures, `None` when empty
    #[must_use]
    pub fn wet_bulb_range(&self) -> Option<(f64, f64)> {
        self.entries.iter().map(|entry| entry.wet_bulb_c).fold(None, |range, value| {
            Some(match range {
                None => (value, value),
                Some((min, max)) => (min.min(value), max.max(value)),
            })
        })
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CityEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    #[must_use]
    pub fn entries(&self) -> &[CityEntry] {
        &self.entries
    }

    /// Tracked city names in dataset order
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.name.clone()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
