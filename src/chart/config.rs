//! Chart configuration: sizes, scale anchors, palette and labels.

use crate::chart::error::ChartError;
use crate::chart::palette::Palette;
use crate::scale::{Anchor, LinearScale};
use crate::types::period::Year;
use crate::types::series::{SeriesFlags, TemperatureSeries};
use bon::Builder;
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything that shapes the rendered page.
///
/// Build one in code with [`ChartConfig::builder`] or load it from JSON with
/// [`ChartConfig::from_file`]; missing JSON fields take the builder defaults.
///
/// # Examples
///
/// ```
/// use linked_radial::ChartConfig;
///
/// let config = ChartConfig::builder()
///     .location("Boston")
///     .year(2016)
///     .build();
/// assert_eq!(config.title(), "Annual Temperature - Boston 2016");
/// assert_eq!(config.actual_label(), "2016 Hi/Lo");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[serde(default)]
pub struct ChartConfig {
    /// Width and height of the radial chart in pixels. The other panels are
    /// sized from it.
    #[builder(default = 800)]
    pub size: u32,

    /// The radial chart spans `[-plot_range, plot_range]` on both axes.
    #[builder(default = 450.0)]
    pub plot_range: f64,

    /// Two `(temperature, radius)` pairs the radius scale passes through.
    #[builder(default = ((-20.0, 100.0), (120.0, 400.0)))]
    pub radius_anchors: (Anchor, Anchor),

    /// Temperatures drawn as rings and labelled on the radial chart.
    #[builder(default = vec![0.0, 25.0, 50.0, 75.0, 100.0])]
    pub temperature_ticks: Vec<f64>,

    /// Label colour per ring, cycled when shorter than the ring list.
    #[builder(default = ["grey", "white", "white", "grey", "grey"].map(String::from).to_vec())]
    pub tick_label_colors: Vec<String>,

    #[builder(default = "°".to_string(), into)]
    pub temperature_unit: String,

    /// Low and high temperature bounding the selection wedge.
    #[builder(default = (-10.0, 120.0))]
    pub selection_temperatures: (f64, f64),

    #[builder(default)]
    pub palette: Palette,

    #[builder(default = 0.7)]
    pub alpha: f64,

    #[builder(default = "NYC".to_string(), into)]
    pub location: String,

    /// Completes `D-Mon` dates in the input.
    #[builder(default = 2015)]
    pub year: i32,

    #[builder(into)]
    pub title: Option<String>,

    /// Legend entry of the observed band.
    #[builder(into)]
    pub actual_label: Option<String>,

    #[builder(default)]
    pub series: SeriesFlags,

    /// Initial view of the time-series chart; defaults to the full year.
    pub view_start: Option<NaiveDate>,
    pub view_end: Option<NaiveDate>,

    /// Inner HTML of the description panel.
    #[builder(into)]
    pub about_html: Option<String>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Pixel sizes of the page panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSizes {
    /// Radial chart width and height.
    pub radial: u32,
    pub gutter: u32,
    pub timeseries_width: u32,
    pub timeseries_height: u32,
    pub spacer_width: u32,
    pub about_width: u32,
    pub about_height: u32,
}

impl ChartConfig {
    pub fn from_json(json: &str, origin: &Path) -> Result<Self, ChartError> {
        serde_json::from_str(json).map_err(|e| ChartError::ConfigParse(origin.to_path_buf(), e))
    }

    pub fn from_file(path: &Path) -> Result<Self, ChartError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ChartError::ConfigRead(path.to_path_buf(), e))?;
        let config = Self::from_json(&content, path)?;
        debug!("Loaded chart config from {}", path.display());
        Ok(config)
    }

    pub fn year(&self) -> Year {
        Year(self.year)
    }

    pub fn title(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| format!("Annual Temperature - {} {}", self.location, self.year))
    }

    pub fn actual_label(&self) -> String {
        self.actual_label
            .clone()
            .unwrap_or_else(|| format!("{} Hi/Lo", self.year))
    }

    pub fn series_label(&self, series: TemperatureSeries) -> String {
        match series {
            TemperatureSeries::Record => "Record Hi/Lo".to_string(),
            TemperatureSeries::Average => "Average Hi/Lo".to_string(),
            TemperatureSeries::Actual => self.actual_label(),
        }
    }

    pub fn scale(&self) -> Result<LinearScale, ChartError> {
        let (low, high) = self.radius_anchors;
        LinearScale::from_anchors(low, high).ok_or(ChartError::DegenerateScale(low.0, high.0))
    }

    pub fn temperature_label(&self, temp: f64) -> String {
        format!("{}{}", crate::geometry::frame::coord(temp), self.temperature_unit)
    }

    /// Rejects settings that cannot produce a chart.
    pub fn validate(&self) -> Result<(), ChartError> {
        let invalid = |msg: String| Err(ChartError::InvalidConfig(msg));
        if self.size < 100 {
            return invalid(format!("size {} is below 100 pixels", self.size));
        }
        if !(self.plot_range.is_finite() && self.plot_range > 0.0) {
            return invalid(format!("plot range {} must be positive", self.plot_range));
        }
        if !(0.0..=1.0).contains(&self.alpha) {
            return invalid(format!("alpha {} is outside [0, 1]", self.alpha));
        }
        if self.temperature_ticks.is_empty() {
            return invalid("at least one temperature tick is required".to_string());
        }
        if self.series.is_empty() {
            return invalid("no temperature series selected".to_string());
        }
        if let (Some(start), Some(end)) = (self.view_start, self.view_end) {
            if end < start {
                return invalid(format!("view ends ({end}) before it starts ({start})"));
            }
        }
        self.scale()?;
        Ok(())
    }

    pub fn panel_sizes(&self) -> PanelSizes {
        let size = self.size as f64;
        let gutter = (50.0 / 450.0 * size).round() as u32;
        let timeseries_width = (0.6 * size).round() as u32 + gutter;
        let timeseries_height = (timeseries_width as f64 / 1.6).round() as u32;
        let column_height = self
            .size
            .saturating_sub(timeseries_height)
            .saturating_sub(gutter / 2);
        PanelSizes {
            radial: self.size,
            gutter,
            timeseries_width,
            timeseries_height,
            spacer_width: gutter / 4,
            about_width: timeseries_width.saturating_sub(gutter / 2),
            about_height: column_height.saturating_sub(gutter),
        }
    }
}
