//! Assembles both charts, the description panel and the link script into a
//! single HTML page.

use crate::chart::config::{ChartConfig, PanelSizes};
use crate::chart::error::ChartError;
use crate::chart::radial::RadialChart;
use crate::chart::script::{LinkParameters, RadialGeometry, RESET_ID};
use crate::chart::svg::escape;
use crate::chart::timeseries::TimeSeriesChart;
use crate::geometry::angles::{date_to_ms, DateAngleMapper, MS_PER_DAY};
use crate::temperature_data::year_frame::TemperatureYearFrame;
use chrono::Duration;
use log::{info, warn};
use std::path::Path;

const DEFAULT_ABOUT: &str = "<p><b>Linked Radial Chart</b></p>\
<p>Each wedge of the radial chart is one day, running clockwise from January at the top. \
The bands show record, average and observed daily highs and lows.</p>\
<p>Drag the chart below to pan through the year and scroll over it to zoom. \
Double-click it or press Reset to return to the whole year. \
The visible date range is outlined as the selection on the radial chart.</p>";

/// A rendered page, ready to be written out.
#[derive(Debug, Clone)]
pub struct LinkedRadialChart {
    title: String,
    background: String,
    sizes: PanelSizes,
    radial_svg: String,
    timeseries_svg: String,
    about_html: String,
    script: String,
    /// Initial `(start_angle, end_angle)` of the selection wedge.
    selection: (f64, f64),
}

impl LinkedRadialChart {
    /// Renders both charts from a transformed frame.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::InvalidConfig`] or [`ChartError::DegenerateScale`] for
    /// unusable settings and [`ChartError::NothingToDraw`] for an empty frame.
    pub fn build(frame: &TemperatureYearFrame, config: &ChartConfig) -> Result<Self, ChartError> {
        config.validate()?;
        let glyphs = frame.day_glyphs()?;
        let first = glyphs.first().ok_or(ChartError::NothingToDraw)?;
        let bounds = frame.date_bounds()?.ok_or(ChartError::NothingToDraw)?;
        let extent = frame
            .temperature_extent()?
            .unwrap_or(config.selection_temperatures);

        let layout = *frame.layout();
        // angles are anchored on the first day of the unfiltered frame
        let origin = first.left - Duration::days(first.index as i64);
        let mapper = DateAngleMapper::new(&layout, origin);

        let bounds_ms = (date_to_ms(bounds.0), date_to_ms(bounds.1));
        let view = initial_view(config, bounds_ms);
        let selection = mapper.selection(view.0, view.1);

        let radial = RadialChart::new(config, &glyphs, layout, *frame.scale(), selection);
        let timeseries = TimeSeriesChart::new(config, &glyphs, bounds, view, extent);
        let parameters = LinkParameters::new(
            mapper,
            timeseries.bounds(),
            timeseries.view(),
            timeseries.plot_area(),
            RadialGeometry::new(&radial.frame(), radial.selection_radii()),
        );

        info!(
            "Rendered {} days from {} to {} ({} series)",
            glyphs.len(),
            bounds.0,
            bounds.1,
            config.series.series().count()
        );

        Ok(Self {
            title: config.title(),
            background: config.palette.background.clone(),
            sizes: config.panel_sizes(),
            radial_svg: radial.render().render(),
            timeseries_svg: timeseries.render().render(),
            about_html: config
                .about_html
                .clone()
                .unwrap_or_else(|| DEFAULT_ABOUT.to_string()),
            script: parameters.script()?,
            selection,
        })
    }

    pub fn radial_svg(&self) -> &str {
        &self.radial_svg
    }

    pub fn timeseries_svg(&self) -> &str {
        &self.timeseries_svg
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    pub fn selection(&self) -> (f64, f64) {
        self.selection
    }

    /// Lays the page out as `row(radial, column(row(spacer, about), timeseries))`.
    pub fn render_html(&self) -> String {
        let s = &self.sizes;
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ margin: 0; font-family: Helvetica, Arial, sans-serif; background: {background}; }}
.row {{ display: flex; flex-direction: row; }}
.column {{ display: flex; flex-direction: column; }}
.about {{ overflow: auto; font-size: 14px; color: #333; }}
#timeseries {{ cursor: grab; user-select: none; }}
.toolbar {{ text-align: right; width: {ts_width}px; }}
</style>
</head>
<body>
<div class="row">
{radial}
<div class="column">
<div class="row">
<div class="spacer" style="width: {spacer_width}px; height: {about_height}px"></div>
<div class="about" style="width: {about_width}px; height: {about_height}px">{about}</div>
</div>
{timeseries}
<div class="toolbar"><button id="{reset}" type="button">Reset</button></div>
</div>
</div>
<script>
{script}
</script>
</body>
</html>
"#,
            title = escape(&self.title),
            background = escape(&self.background),
            ts_width = s.timeseries_width,
            radial = self.radial_svg,
            spacer_width = s.spacer_width,
            about_width = s.about_width,
            about_height = s.about_height,
            about = self.about_html,
            timeseries = self.timeseries_svg,
            reset = RESET_ID,
            script = self.script,
        )
    }

    pub fn write_to(&self, path: &Path) -> Result<(), ChartError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| ChartError::OutputWrite(path.to_path_buf(), e))?;
        }
        std::fs::write(path, self.render_html())
            .map_err(|e| ChartError::OutputWrite(path.to_path_buf(), e))?;
        info!("Wrote linked radial chart to {}", path.display());
        Ok(())
    }
}

/// The configured view clamped to the data, or the full range.
fn initial_view(config: &ChartConfig, bounds: (f64, f64)) -> (f64, f64) {
    let start = config
        .view_start
        .map(date_to_ms)
        .unwrap_or(bounds.0)
        .max(bounds.0);
    // the end date is inclusive
    let end = config
        .view_end
        .map(|d| date_to_ms(d + Duration::days(1)))
        .unwrap_or(bounds.1)
        .min(bounds.1);
    if end - start < MS_PER_DAY.min(bounds.1 - bounds.0) {
        warn!("Initial view lies outside the data, showing the full range");
        return bounds;
    }
    (start, end)
}
