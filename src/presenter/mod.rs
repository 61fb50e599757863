//! Rendering of dataset snapshots
//!
//! Produces the scatter plot (SVG), the alert/ranking summary and the
//! attribution line for one [`CityDataset`].

pub mod scatter;
pub mod summary;

use std::path::PathBuf;

use crate::Result;
use crate::config::WetBulbConfig;
use crate::dataset::CityDataset;

pub use scatter::{ScatterPoint, render_svg_file, render_svg_string, scatter_points};
pub use summary::{ATTRIBUTION, CityTable, Summary};

/// Renders snapshots to an SVG file and a text report
#[derive(Debug, Clone)]
pub struct Presenter {
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub alert_threshold: f64,
    pub top_n: usize,
}

impl Presenter {
    #[must_use]
    pub fn from_config(config: &WetBulbConfig) -> Self {
        Self {
            output: config.plot.output.clone(),
            width: config.plot.width,
            height: config.plot.height,
            alert_threshold: config.cities.alert_threshold,
            top_n: config.cities.top_n,
        }
    }

    #[must_use]
    pub fn with_output(mut self, output: PathBuf) -> Self {
        self.output = output;
        self
    }

    /// Text report: city table, alerts or ranking, attribution
    #[must_use]
    pub fn report(&self, dataset: &CityDataset) -> String {
        let table = if dataset.is_empty() {
            String::new()
        } else {
            format!("{}\n", CityTable(dataset))
        };
        let summary = Summary::of(dataset, self.alert_threshold, self.top_n);
        format!("{table}{summary}\n{ATTRIBUTION}\n")
    }

    /// Write the scatter plot and return the text report
    pub fn present(&self, dataset: &CityDataset) -> Result<String> {
        render_svg_file(dataset, &self.output, self.width, self.height)?;
        Ok(self.report(dataset))
    }
}
