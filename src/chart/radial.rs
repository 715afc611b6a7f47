//! The radial chart: one annular wedge per day and band, around a set of
//! temperature rings.

use crate::chart::config::ChartConfig;
use crate::chart::svg::Element;
use crate::geometry::angles::AngularLayout;
use crate::geometry::frame::{coord, PlotFrame};
use crate::geometry::wedge::{polar, AnnularWedge};
use crate::scale::LinearScale;
use crate::temperature_data::year_frame::DayGlyph;
use std::f64::consts::FRAC_PI_4;

pub const SELECTION_ID: &str = "selection-wedge";

const LEGEND_ROW_HEIGHT: f64 = 22.0;
const LEGEND_WIDTH: f64 = 150.0;
const QUARTER_LABELS: [&str; 4] = ["Jan", "Apr", "Jul", "Oct"];

struct LegendEntry {
    label: String,
    color: String,
    opacity: f64,
    /// Drawn with a stroke like the selection wedge.
    outlined: bool,
}

pub struct RadialChart<'a> {
    config: &'a ChartConfig,
    glyphs: &'a [DayGlyph],
    layout: AngularLayout,
    scale: LinearScale,
    /// `(start_angle, end_angle)` of the selection wedge.
    selection: (f64, f64),
}

impl<'a> RadialChart<'a> {
    pub fn new(
        config: &'a ChartConfig,
        glyphs: &'a [DayGlyph],
        layout: AngularLayout,
        scale: LinearScale,
        selection: (f64, f64),
    ) -> Self {
        Self {
            config,
            glyphs,
            layout,
            scale,
            selection,
        }
    }

    pub fn frame(&self) -> PlotFrame {
        let range = self.config.plot_range;
        let size = self.config.size as f64;
        PlotFrame::new((-range, range), (-range, range), size, size)
    }

    /// Inner and outer radius of the selection wedge.
    pub fn selection_radii(&self) -> (f64, f64) {
        let (low, high) = self.config.selection_temperatures;
        (self.scale.apply(low), self.scale.apply(high))
    }

    pub fn render(&self) -> Element {
        let frame = self.frame();
        let palette = &self.config.palette;
        let mut svg = Element::svg("radial", self.config.size, self.config.size).child(
            Element::new("rect")
                .attr("width", "100%")
                .attr("height", "100%")
                .attr("fill", &palette.background),
        );

        for series in self.config.series.series() {
            let mut group = Element::new("g")
                .attr("class", format!("wedges {series}"))
                .attr("fill", palette.color(series))
                .num("fill-opacity", self.config.alpha)
                .attr("stroke", "none");
            for glyph in self.glyphs {
                let Some(band) = glyph.bands.iter().find(|b| b.series == series) else {
                    continue;
                };
                let wedge = AnnularWedge::new(
                    band.inner_radius,
                    band.outer_radius,
                    glyph.start_angle,
                    glyph.end_angle,
                );
                if let Some(d) = wedge.path(&frame) {
                    group.push(Element::new("path").attr("d", d));
                }
            }
            svg.push(group);
        }

        svg.push(self.selection_wedge(&frame));
        svg.push(self.tick_lines(&frame));
        svg.push(self.rings(&frame));
        svg.push(self.temperature_labels(&frame));
        svg.push(self.month_labels(&frame));
        svg.push(
            Element::new("text")
                .attr("class", "title")
                .num("x", frame.px(0.0))
                .num("y", frame.py(self.config.plot_range - 35.0))
                .attr("text-anchor", "middle")
                .attr("font-size", "20pt")
                .attr("fill", "black")
                .text(self.config.title()),
        );
        svg.push(self.legend(&frame));
        svg
    }

    fn selection_wedge(&self, frame: &PlotFrame) -> Element {
        let (inner, outer) = self.selection_radii();
        let (start, end) = self.selection;
        let d = AnnularWedge::new(inner, outer, start, end)
            .path(frame)
            .unwrap_or_default();
        Element::new("path")
            .attr("id", SELECTION_ID)
            .attr("d", d)
            .attr("fill", &self.config.palette.selection)
            .attr("fill-opacity", "0.01")
            .attr("fill-rule", "evenodd")
            .attr("stroke", &self.config.palette.selection)
            .num("stroke-opacity", self.config.alpha)
    }

    /// Month separators in the background colour, quarters accented.
    fn tick_lines(&self, frame: &PlotFrame) -> Element {
        let (inner, outer) = self.ring_extent();
        let line = |angle: f64, color: &str| {
            let (x1, y1) = polar(frame, inner, angle);
            let (x2, y2) = polar(frame, outer, angle);
            Element::new("line")
                .num("x1", x1)
                .num("y1", y1)
                .num("x2", x2)
                .num("y2", y2)
                .attr("stroke", color)
        };
        let mut group = Element::new("g").attr("class", "month-ticks");
        for angle in self.layout.months() {
            group.push(line(angle, self.config.palette.background.as_str()));
        }
        for angle in self.layout.quarters() {
            group.push(line(angle, self.config.palette.axis.as_str()));
        }
        group
    }

    fn rings(&self, frame: &PlotFrame) -> Element {
        let (cx, cy) = frame.point(0.0, 0.0);
        let mut group = Element::new("g")
            .attr("class", "temperature-rings")
            .attr("fill", "none")
            .attr("stroke", &self.config.palette.axis);
        for temp in &self.config.temperature_ticks {
            let radius = self.scale.apply(*temp) * frame.x_scale();
            group.push(
                Element::new("circle")
                    .num("cx", cx)
                    .num("cy", cy)
                    .num("r", radius.max(0.0)),
            );
        }
        group
    }

    /// Ring labels along the upper-left diagonal, nudged outwards one more
    /// pixel per ring.
    fn temperature_labels(&self, frame: &PlotFrame) -> Element {
        let ticks = &self.config.temperature_ticks;
        let colors = &self.config.tick_label_colors;
        let mut group = Element::new("g")
            .attr("class", "temperature-labels")
            .attr("text-anchor", "middle");
        for (k, temp) in ticks.iter().enumerate() {
            let radius = self.scale.apply(*temp);
            let nudge = linspace(-1.0, -5.0, ticks.len(), k);
            // screen offsets: x right, y down
            let x = frame.px(-radius * FRAC_PI_4.cos()) + nudge * FRAC_PI_4.cos();
            let y = frame.py(radius * FRAC_PI_4.sin()) + nudge * FRAC_PI_4.sin();
            let color = colors
                .get(k % colors.len().max(1))
                .map(String::as_str)
                .unwrap_or(self.config.palette.text.as_str());
            group.push(
                Element::new("text")
                    .num("x", x)
                    .num("y", y)
                    .attr("transform", format!("rotate(-45 {} {})", coord(x), coord(y)))
                    .attr("fill", color)
                    .text(self.config.temperature_label(*temp)),
            );
        }
        group
    }

    fn month_labels(&self, frame: &PlotFrame) -> Element {
        let s = self.ring_extent().1;
        let positions = [(0.0, s + 20.0), (s + 20.0, -10.0), (0.0, -s - 40.0), (-s - 20.0, -10.0)];
        let mut group = Element::new("g")
            .attr("class", "month-labels")
            .attr("text-anchor", "middle")
            .attr("fill", &self.config.palette.text);
        for (label, (x, y)) in QUARTER_LABELS.iter().zip(positions) {
            group.push(
                Element::new("text")
                    .num("x", frame.px(x))
                    .num("y", frame.py(y))
                    .text(*label),
            );
        }
        group
    }

    fn legend(&self, frame: &PlotFrame) -> Element {
        let mut entries: Vec<LegendEntry> = self
            .config
            .series
            .series()
            .map(|s| LegendEntry {
                label: self.config.series_label(s),
                color: self.config.palette.color(s).to_string(),
                opacity: self.config.alpha,
                outlined: false,
            })
            .collect();
        entries.push(LegendEntry {
            label: "Selection".to_string(),
            color: self.config.palette.selection.clone(),
            opacity: 0.01,
            outlined: true,
        });

        let (cx, cy) = frame.point(0.0, 0.0);
        let left = cx - LEGEND_WIDTH / 2.0;
        let top = cy - entries.len() as f64 * LEGEND_ROW_HEIGHT / 2.0;
        let mut group = Element::new("g").attr("class", "legend");
        for (row, entry) in entries.into_iter().enumerate() {
            let y = top + row as f64 * LEGEND_ROW_HEIGHT;
            let mut swatch = Element::new("rect")
                .num("x", left)
                .num("y", y + 4.0)
                .attr("width", 20)
                .attr("height", 12)
                .attr("fill", &entry.color)
                .num("fill-opacity", entry.opacity);
            if entry.outlined {
                swatch = swatch
                    .attr("stroke", &entry.color)
                    .num("stroke-opacity", self.config.alpha);
            }
            group.push(swatch);
            group.push(
                Element::new("text")
                    .num("x", left + 28.0)
                    .num("y", y + 15.0)
                    .attr("fill", "black")
                    .text(entry.label),
            );
        }
        group
    }

    /// Radii of the innermost and outermost temperature rings.
    fn ring_extent(&self) -> (f64, f64) {
        let ticks = &self.config.temperature_ticks;
        let first = ticks.first().copied().unwrap_or(0.0);
        let last = ticks.last().copied().unwrap_or(first);
        (self.scale.apply(first), self.scale.apply(last))
    }
}

/// The `k`-th of `n` evenly spaced values from `start` to `end`.
fn linspace(start: f64, end: f64, n: usize, k: usize) -> f64 {
    if n <= 1 {
        return start;
    }
    start + (end - start) * k as f64 / (n - 1) as f64
}
