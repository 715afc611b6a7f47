//! Client-side script that pans and zooms the time-series chart and keeps
//! the radial selection wedge on the visible date range.

use crate::chart::error::ChartError;
use crate::chart::radial::SELECTION_ID;
use crate::chart::timeseries::{PlotArea, QUADS_ID, X_AXIS_ID, X_GRID_ID};
use crate::geometry::angles::{DateAngleMapper, MS_PER_DAY};
use crate::geometry::frame::PlotFrame;
use serde::Serialize;

const SCRIPT_TEMPLATE: &str = include_str!("link.js");
const PARAMS_PLACEHOLDER: &str = "__LINK_PARAMS__";
pub const RESET_ID: &str = "reset-view";

/// Where the selection wedge sits in the radial chart's pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadialGeometry {
    pub cx: f64,
    pub cy: f64,
    pub x_scale: f64,
    pub y_scale: f64,
    pub inner: f64,
    pub outer: f64,
}

impl RadialGeometry {
    pub fn new(frame: &PlotFrame, selection_radii: (f64, f64)) -> Self {
        let (cx, cy) = frame.point(0.0, 0.0);
        Self {
            cx,
            cy,
            x_scale: frame.x_scale(),
            y_scale: frame.y_scale(),
            inner: selection_radii.0.min(selection_radii.1),
            outer: selection_radii.0.max(selection_radii.1),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct ElementIds {
    timeseries: &'static str,
    quads: &'static str,
    x_axis: &'static str,
    x_grid: &'static str,
    selection: &'static str,
    reset: &'static str,
}

/// Everything the page script needs, serialized as one JSON object.
#[derive(Debug, Clone, Serialize)]
pub struct LinkParameters {
    pub mapper: DateAngleMapper,
    pub bounds: (f64, f64),
    pub view: (f64, f64),
    pub min_span_ms: f64,
    pub plot: PlotArea,
    pub radial: RadialGeometry,
    ids: ElementIds,
}

impl LinkParameters {
    pub fn new(
        mapper: DateAngleMapper,
        bounds: (f64, f64),
        view: (f64, f64),
        plot: PlotArea,
        radial: RadialGeometry,
    ) -> Self {
        Self {
            mapper,
            bounds,
            view,
            min_span_ms: MS_PER_DAY,
            plot,
            radial,
            ids: ElementIds {
                timeseries: "timeseries",
                quads: QUADS_ID,
                x_axis: X_AXIS_ID,
                x_grid: X_GRID_ID,
                selection: SELECTION_ID,
                reset: RESET_ID,
            },
        }
    }

    /// The script body with these parameters inlined.
    pub fn script(&self) -> Result<String, ChartError> {
        let json = serde_json::to_string(self)?;
        // keep "</script>" in a string value from closing the element
        let json = json.replace("</", "<\\/");
        Ok(SCRIPT_TEMPLATE.replace(PARAMS_PLACEHOLDER, &json))
    }
}
