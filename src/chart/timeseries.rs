//! The cartesian chart: one quad per day and band on a datetime axis.

use crate::chart::config::ChartConfig;
use crate::chart::svg::Element;
use crate::chart::ticks::{date_ticks, nice_ticks};
use crate::geometry::angles::date_to_ms;
use crate::geometry::frame::{coord, PlotFrame};
use crate::temperature_data::year_frame::DayGlyph;
use chrono::NaiveDate;
use serde::Serialize;

pub const QUADS_ID: &str = "quads";
pub const X_AXIS_ID: &str = "x-axis";
pub const X_GRID_ID: &str = "x-grid";
const CLIP_ID: &str = "plot-clip";
const AXIS_TEXT: &str = "#444";

/// Pixel rectangle of the plotting area inside the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

pub struct TimeSeriesChart<'a> {
    config: &'a ChartConfig,
    glyphs: &'a [DayGlyph],
    /// Pan/zoom limits in epoch milliseconds.
    bounds: (f64, f64),
    /// Visible x-range in epoch milliseconds.
    view: (f64, f64),
    y_range: (f64, f64),
}

impl<'a> TimeSeriesChart<'a> {
    /// `extent` is the lowest and highest temperature to show; the y-range
    /// pads it by five percent on each side.
    pub fn new(
        config: &'a ChartConfig,
        glyphs: &'a [DayGlyph],
        bounds: (NaiveDate, NaiveDate),
        view: (f64, f64),
        extent: (f64, f64),
    ) -> Self {
        let (lo, hi) = extent;
        let span = if hi > lo { hi - lo } else { 1.0 };
        Self {
            config,
            glyphs,
            bounds: (date_to_ms(bounds.0), date_to_ms(bounds.1)),
            view,
            y_range: (lo - 0.05 * span, hi + 0.05 * span),
        }
    }

    pub fn bounds(&self) -> (f64, f64) {
        self.bounds
    }

    pub fn view(&self) -> (f64, f64) {
        self.view
    }

    pub fn y_range(&self) -> (f64, f64) {
        self.y_range
    }

    pub fn plot_area(&self) -> PlotArea {
        let sizes = self.config.panel_sizes();
        let (left, right, top, bottom) = (45.0, 10.0, 10.0, 30.0);
        PlotArea {
            left,
            top,
            width: (sizes.timeseries_width as f64 - left - right).max(1.0),
            height: (sizes.timeseries_height as f64 - top - bottom).max(1.0),
        }
    }

    /// Mapping for the full bounded range; quads are drawn in this frame.
    pub fn full_frame(&self) -> PlotFrame {
        let area = self.plot_area();
        PlotFrame::new(self.bounds, self.y_range, area.width, area.height)
            .with_origin(area.left, area.top)
    }

    /// Mapping for the visible range; axis ticks are drawn in this frame.
    pub fn view_frame(&self) -> PlotFrame {
        let area = self.plot_area();
        PlotFrame::new(self.view, self.y_range, area.width, area.height)
            .with_origin(area.left, area.top)
    }

    /// Horizontal `(scale, translate)` taking the full frame onto the view.
    pub fn view_transform(&self) -> (f64, f64) {
        let full = self.full_frame();
        let k = (self.bounds.1 - self.bounds.0) / (self.view.1 - self.view.0);
        (k, full.left - full.px(self.view.0) * k)
    }

    pub fn render(&self) -> Element {
        let sizes = self.config.panel_sizes();
        let area = self.plot_area();
        let palette = &self.config.palette;

        let clip = Element::new("defs").child(
            Element::new("clipPath").attr("id", CLIP_ID).child(
                Element::new("rect")
                    .num("x", area.left)
                    .num("y", area.top)
                    .num("width", area.width)
                    .num("height", area.height),
            ),
        );

        Element::svg("timeseries", sizes.timeseries_width, sizes.timeseries_height)
            .child(clip)
            .child(
                Element::new("rect")
                    .attr("width", "100%")
                    .attr("height", "100%")
                    .attr("fill", &palette.background),
            )
            .child(
                Element::new("rect")
                    .attr("class", "plot-background")
                    .num("x", area.left)
                    .num("y", area.top)
                    .num("width", area.width)
                    .num("height", area.height)
                    .attr("fill", &palette.selection)
                    .attr("fill-opacity", "0.01"),
            )
            .child(self.y_grid(&area))
            .child(self.x_grid(&area))
            .child(
                Element::new("g")
                    .attr("clip-path", format!("url(#{CLIP_ID})"))
                    .child(self.quads()),
            )
            .child(self.y_axis(&area))
            .child(self.x_axis(&area))
    }

    fn quads(&self) -> Element {
        let frame = self.full_frame();
        let (k, tx) = self.view_transform();
        let mut quads = Element::new("g")
            .attr("id", QUADS_ID)
            .attr("transform", format!("matrix({} 0 0 1 {} 0)", k, tx));
        for series in self.config.series.series() {
            let mut group = Element::new("g")
                .attr("class", format!("quads {series}"))
                .attr("fill", self.config.palette.color(series))
                .num("fill-opacity", self.config.alpha)
                .attr("stroke", "none");
            for glyph in self.glyphs {
                let Some(band) = glyph.bands.iter().find(|b| b.series == series) else {
                    continue;
                };
                let x0 = frame.px(date_to_ms(glyph.left));
                let x1 = frame.px(date_to_ms(glyph.right));
                // a swapped low/high pair still covers the same span
                let top = frame.py(band.high.max(band.low));
                let bottom = frame.py(band.high.min(band.low));
                group.push(
                    Element::new("rect")
                        .attr("x", x0)
                        .attr("width", x1 - x0)
                        .num("y", top)
                        .num("height", bottom - top),
                );
            }
            quads.push(group);
        }
        quads
    }

    fn y_grid(&self, area: &PlotArea) -> Element {
        let frame = self.view_frame();
        let mut grid = Element::new("g")
            .attr("class", "y-grid")
            .attr("stroke", &self.config.palette.axis);
        for tick in nice_ticks(self.y_range.0, self.y_range.1, 6) {
            let y = frame.py(tick);
            grid.push(
                Element::new("line")
                    .num("x1", area.left)
                    .num("x2", area.left + area.width)
                    .num("y1", y)
                    .num("y2", y),
            );
        }
        grid
    }

    fn x_grid(&self, area: &PlotArea) -> Element {
        let frame = self.view_frame();
        let mut grid = Element::new("g")
            .attr("id", X_GRID_ID)
            .attr("stroke", &self.config.palette.axis);
        for tick in date_ticks(self.view.0, self.view.1) {
            let x = frame.px(tick.ms);
            grid.push(
                Element::new("line")
                    .num("x1", x)
                    .num("x2", x)
                    .num("y1", area.top)
                    .num("y2", area.top + area.height),
            );
        }
        grid
    }

    fn y_axis(&self, area: &PlotArea) -> Element {
        let frame = self.view_frame();
        let mut axis = Element::new("g")
            .attr("class", "y-axis")
            .attr("fill", AXIS_TEXT)
            .attr("font-size", "11px")
            .attr("text-anchor", "end")
            .child(
                Element::new("line")
                    .num("x1", area.left)
                    .num("x2", area.left)
                    .num("y1", area.top)
                    .num("y2", area.top + area.height)
                    .attr("stroke", AXIS_TEXT),
            );
        for tick in nice_ticks(self.y_range.0, self.y_range.1, 6) {
            axis.push(
                Element::new("text")
                    .num("x", area.left - 6.0)
                    .num("y", frame.py(tick) + 4.0)
                    .text(coord(tick)),
            );
        }
        axis
    }

    fn x_axis(&self, area: &PlotArea) -> Element {
        let frame = self.view_frame();
        let baseline = area.top + area.height;
        let mut axis = Element::new("g")
            .attr("class", "x-axis")
            .attr("fill", AXIS_TEXT)
            .attr("font-size", "11px")
            .attr("text-anchor", "middle")
            .child(
                Element::new("line")
                    .num("x1", area.left)
                    .num("x2", area.left + area.width)
                    .num("y1", baseline)
                    .num("y2", baseline)
                    .attr("stroke", AXIS_TEXT),
            );
        let mut labels = Element::new("g").attr("id", X_AXIS_ID);
        for tick in date_ticks(self.view.0, self.view.1) {
            labels.push(
                Element::new("text")
                    .num("x", frame.px(tick.ms))
                    .num("y", baseline + 18.0)
                    .text(tick.label),
            );
        }
        axis.push(labels);
        axis
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temperature_data::year_frame::Band;
    use crate::types::series::TemperatureSeries;

    fn day(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2015, month, day).unwrap()
    }

    fn glyph(index: usize, left: NaiveDate, low: f64, high: f64) -> DayGlyph {
        DayGlyph {
            index,
            left,
            right: left + chrono::Duration::days(1),
            start_angle: 0.0,
            end_angle: 0.1,
            bands: vec![Band {
                series: TemperatureSeries::Actual,
                low,
                high,
                inner_radius: 0.0,
                outer_radius: 0.0,
            }],
        }
    }

    #[test]
    fn test_full_view_has_identity_transform() {
        let config = ChartConfig::default();
        let bounds = (day(1, 1), NaiveDate::from_ymd_opt(2016, 1, 1).unwrap());
        let view = (date_to_ms(bounds.0), date_to_ms(bounds.1));
        let chart = TimeSeriesChart::new(&config, &[], bounds, view, (0.0, 100.0));
        let (k, tx) = chart.view_transform();
        assert!((k - 1.0).abs() < 1e-12);
        assert!(tx.abs() < 1e-9);
        assert_eq!(chart.y_range(), (-5.0, 105.0));
    }

    #[test]
    fn test_zoomed_view_transform_maps_view_onto_area() {
        let config = ChartConfig::default();
        let bounds = (day(1, 1), NaiveDate::from_ymd_opt(2016, 1, 1).unwrap());
        let view = (date_to_ms(day(3, 1)), date_to_ms(day(4, 1)));
        let chart = TimeSeriesChart::new(&config, &[], bounds, view, (0.0, 100.0));
        let (k, tx) = chart.view_transform();
        let full = chart.full_frame();
        let area = chart.plot_area();

        let mapped_start = k * full.px(view.0) + tx;
        let mapped_end = k * full.px(view.1) + tx;
        assert!((mapped_start - area.left).abs() < 1e-6);
        assert!((mapped_end - (area.left + area.width)).abs() < 1e-6);
    }

    #[test]
    fn test_swapped_band_still_draws_upwards() {
        let config = ChartConfig::default();
        let glyphs = vec![glyph(0, day(1, 1), 50.0, 30.0), glyph(1, day(1, 2), 30.0, 50.0)];
        let bounds = (day(1, 1), day(1, 3));
        let view = (date_to_ms(bounds.0), date_to_ms(bounds.1));
        let chart = TimeSeriesChart::new(&config, &glyphs, bounds, view, (30.0, 50.0));
        let svg = chart.render();

        let quads = svg.find_by_id(QUADS_ID).unwrap();
        let rects: Vec<&Element> = quads.children().flat_map(|g| g.children()).collect();
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0].get_attr("y"), rects[1].get_attr("y"));
        assert_eq!(rects[0].get_attr("height"), rects[1].get_attr("height"));
        assert!(!rects[0].get_attr("height").unwrap().starts_with('-'));
    }

    #[test]
    fn test_axis_labels_follow_view() {
        let config = ChartConfig::default();
        let bounds = (day(1, 1), NaiveDate::from_ymd_opt(2016, 1, 1).unwrap());
        let view = (date_to_ms(day(3, 1)), date_to_ms(day(3, 8)));
        let chart = TimeSeriesChart::new(&config, &[], bounds, view, (0.0, 100.0));
        let svg = chart.render();
        let labels = svg.find_by_id(X_AXIS_ID).unwrap();
        assert_eq!(labels.children().count(), 8);
        assert_eq!(svg.find_by_id(X_GRID_ID).unwrap().children().count(), 8);
    }
}
