//! Scatter plot of temperature against humidity
//!
//! Point size follows the min-max normalized wet-bulb temperature (range padded
//! by 1°C on each side), point color follows wet-bulb on a diverging
//! blue-white-red scale.

use std::path::Path;

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::{debug, info};

use crate::dataset::CityDataset;
use crate::{Result, WetBulbError};

pub const TITLE: &str = "Wet Bulb Temperature vs Temperature vs Humidity";

const MIN_RADIUS: f64 = 4.0;
const MAX_RADIUS: f64 = 28.0;
const SIZE_PADDING_C: f64 = 1.0;
const COLORBAR_WIDTH: u32 = 120;
const COLORBAR_STEPS: usize = 64;

// matplotlib "coolwarm" end and mid points
const COOL: (f64, f64, f64) = (59.0, 76.0, 192.0);
const NEUTRAL: (f64, f64, f64) = (221.0, 221.0, 221.0);
const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);

/// One city as drawn on the plot
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub name: String,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub wet_bulb_c: f64,
    /// Marker radius in pixels
    pub radius: f64,
    pub color: RGBColor,
}

/// Maps wet-bulb temperatures onto the diverging color scale
#[derive(Debug, Clone, Copy)]
pub struct ColorScale {
    low: f64,
    high: f64,
}

impl ColorScale {
    #[must_use]
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Color for `value`; values outside the scale are clamped
    #[must_use]
    pub fn color(&self, value: f64) -> RGBColor {
        let span = self.high - self.low;
        let t = if span > f64::EPSILON {
            ((value - self.low) / span).clamp(0.0, 1.0)
        } else {
            0.5
        };
        coolwarm(t)
    }
}

/// Diverging colormap, `t` in `[0, 1]`
#[must_use]
pub fn coolwarm(t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    let (from, to, local) = if t < 0.5 {
        (COOL, NEUTRAL, t * 2.0)
    } else {
        (NEUTRAL, WARM, (t - 0.5) * 2.0)
    };
    let lerp = |a: f64, b: f64| (a + (b - a) * local).round() as u8;
    RGBColor(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}

/// Lay out the dataset as plot points
#[must_use]
pub fn scatter_points(dataset: &CityDataset) -> Vec<ScatterPoint> {
    let Some((min_tw, max_tw)) = dataset.wet_bulb_range() else {
        return Vec::new();
    };

    let size_low = min_tw - SIZE_PADDING_C;
    let size_high = max_tw + SIZE_PADDING_C;
    let colors = ColorScale::new(min_tw, max_tw);

    dataset
        .entries()
        .iter()
        .map(|entry| {
            let normalized = (entry.wet_bulb_c - size_low) / (size_high - size_low);
            ScatterPoint {
                name: entry.name.clone(),
                temperature_c: entry.observation.temperature_c,
                humidity_pct: entry.observation.relative_humidity_pct,
                wet_bulb_c: entry.wet_bulb_c,
                radius: MIN_RADIUS + normalized * (MAX_RADIUS - MIN_RADIUS),
                color: colors.color(entry.wet_bulb_c),
            }
        })
        .collect()
}

/// Render the scatter plot into an SVG document
pub fn render_svg_string(dataset: &CityDataset, width: u32, height: u32) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        draw_scatter(&root, dataset).map_err(render_error)?;
        root.present().map_err(render_error)?;
    }
    Ok(svg)
}

/// Render the scatter plot into an SVG file, creating parent directories
pub fn render_svg_file(dataset: &CityDataset, path: &Path, width: u32, height: u32) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let root = SVGBackend::new(path, (width, height)).into_drawing_area();
    draw_scatter(&root, dataset).map_err(render_error)?;
    root.present().map_err(render_error)?;

    info!("Wrote scatter plot to {}", path.display());
    Ok(())
}

fn render_error<E: std::fmt::Display>(e: E) -> WetBulbError {
    WetBulbError::render(e.to_string())
}

fn draw_scatter<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    dataset: &CityDataset,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let points = scatter_points(dataset);
    let (width, _) = root.dim_in_pixel();
    let (plot_area, colorbar_area) = root.split_horizontally(width.saturating_sub(COLORBAR_WIDTH));

    let (x_range, y_range) = axis_ranges(&points);
    let caption = if points.is_empty() { "No data" } else { TITLE };
    debug!("Drawing {} points", points.len());

    let mut chart = ChartBuilder::on(&plot_area)
        .caption(caption, ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc("Temperature (°C)")
        .y_desc("Relative Humidity (%)")
        .light_line_style(BLACK.mix(0.08))
        .draw()?;

    chart.draw_series(points.iter().map(|p| {
        Circle::new(
            (p.temperature_c, p.humidity_pct),
            p.radius.round() as u32,
            p.color.mix(0.8).filled(),
        )
    }))?;

    let label_style = TextStyle::from(("sans-serif", 13).into_font())
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    chart.draw_series(points.iter().map(|p| {
        let lift = -(p.radius.ceil() as i32) - 4;
        EmptyElement::at((p.temperature_c, p.humidity_pct))
            + Text::new(p.name.clone(), (0, lift), label_style.clone())
    }))?;

    if let Some((min_tw, max_tw)) = dataset.wet_bulb_range() {
        draw_colorbar(&colorbar_area, min_tw, max_tw)?;
    }

    Ok(())
}

fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    min_tw: f64,
    max_tw: f64,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let (low, high) = if max_tw - min_tw > f64::EPSILON {
        (min_tw, max_tw)
    } else {
        (min_tw - 0.5, max_tw + 0.5)
    };
    let scale = ColorScale::new(min_tw, max_tw);

    let mut bar = ChartBuilder::on(area)
        .margin_top(50)
        .margin_bottom(60)
        .margin_right(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..1.0, low..high)?;

    bar.configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .disable_x_axis()
        .y_desc("Wet Bulb Temperature (°C)")
        .draw()?;

    let step = (high - low) / COLORBAR_STEPS as f64;
    bar.draw_series((0..COLORBAR_STEPS).map(|i| {
        let bottom = low + step * i as f64;
        let top = bottom + step;
        Rectangle::new(
            [(0.0, bottom), (1.0, top)],
            scale.color((bottom + top) / 2.0).filled(),
        )
    }))?;

    Ok(())
}

/// Axis ranges with some room around the outermost points
fn axis_ranges(points: &[ScatterPoint]) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
    if points.is_empty() {
        return (0.0..50.0, 0.0..100.0);
    }

    let (t_min, t_max) = min_max(points.iter().map(|p| p.temperature_c));
    let (h_min, h_max) = min_max(points.iter().map(|p| p.humidity_pct));

    (
        (t_min - 2.0)..(t_max + 2.0),
        (h_min - 5.0).max(0.0)..(h_max + 10.0).min(110.0),
    )
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
        (min.min(v), max.max(v))
    })
}
