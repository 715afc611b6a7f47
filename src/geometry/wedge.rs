//! SVG path data for annular wedges centred on the data origin.

use crate::geometry::frame::{coord, PlotFrame};
use std::f64::consts::PI;

const SWEEP_EPSILON: f64 = 1e-9;

/// An annular wedge swept counter-clockwise from `start_angle` to `end_angle`.
///
/// A sweep that is a non-zero multiple of a full turn is a complete ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnularWedge {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl AnnularWedge {
    pub fn new(inner_radius: f64, outer_radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Self {
            inner_radius: inner_radius.min(outer_radius),
            outer_radius: inner_radius.max(outer_radius),
            start_angle,
            end_angle,
        }
    }

    /// Counter-clockwise sweep in `[0, 2π]`.
    pub fn sweep(&self) -> f64 {
        let raw = self.end_angle - self.start_angle;
        if raw.abs() < SWEEP_EPSILON {
            return 0.0;
        }
        let sweep = raw.rem_euclid(2.0 * PI);
        if sweep < SWEEP_EPSILON || 2.0 * PI - sweep < SWEEP_EPSILON {
            2.0 * PI
        } else {
            sweep
        }
    }

    pub fn is_full_ring(&self) -> bool {
        self.sweep() >= 2.0 * PI
    }

    /// Path data in pixel space, or `None` when there is nothing to fill.
    pub fn path(&self, frame: &PlotFrame) -> Option<String> {
        let sweep = self.sweep();
        if sweep == 0.0 || self.outer_radius <= 0.0 {
            return None;
        }
        if self.is_full_ring() {
            return Some(self.ring_path(frame));
        }

        let large_arc = if sweep > PI { 1 } else { 0 };
        let (orx, ory) = radii(frame, self.outer_radius);
        let (irx, iry) = radii(frame, self.inner_radius.max(0.0));
        let (sx, sy) = polar(frame, self.outer_radius, self.start_angle);
        let (ex, ey) = polar(frame, self.outer_radius, self.end_angle);

        // pixel y points down, so counter-clockwise on screen is sweep-flag 0
        let mut d = format!(
            "M{} {}A{} {} 0 {} 0 {} {}",
            coord(sx),
            coord(sy),
            coord(orx),
            coord(ory),
            large_arc,
            coord(ex),
            coord(ey)
        );
        if self.inner_radius > 0.0 {
            let (iex, iey) = polar(frame, self.inner_radius, self.end_angle);
            let (isx, isy) = polar(frame, self.inner_radius, self.start_angle);
            d.push_str(&format!(
                "L{} {}A{} {} 0 {} 1 {} {}",
                coord(iex),
                coord(iey),
                coord(irx),
                coord(iry),
                large_arc,
                coord(isx),
                coord(isy)
            ));
        } else {
            let (cx, cy) = frame.point(0.0, 0.0);
            d.push_str(&format!("L{} {}", coord(cx), coord(cy)));
        }
        d.push('Z');
        Some(d)
    }

    /// Two full circles; render with `fill-rule="evenodd"`.
    fn ring_path(&self, frame: &PlotFrame) -> String {
        let mut d = circle_path(frame, self.outer_radius);
        if self.inner_radius > 0.0 {
            d.push_str(&circle_path(frame, self.inner_radius));
        }
        d
    }
}

/// Closed circle around the data origin, as two half arcs.
pub fn circle_path(frame: &PlotFrame, radius: f64) -> String {
    let (rx, ry) = radii(frame, radius);
    let (ax, ay) = polar(frame, radius, 0.0);
    let (bx, by) = polar(frame, radius, PI);
    format!(
        "M{ax} {ay}A{rx} {ry} 0 1 0 {bx} {by}A{rx} {ry} 0 1 0 {ax} {ay}Z",
        ax = coord(ax),
        ay = coord(ay),
        bx = coord(bx),
        by = coord(by),
        rx = coord(rx),
        ry = coord(ry)
    )
}

/// Pixel position of the polar point `(radius, angle)` around the data origin.
pub fn polar(frame: &PlotFrame, radius: f64, angle: f64) -> (f64, f64) {
    frame.point(radius * angle.cos(), radius * angle.sin())
}

fn radii(frame: &PlotFrame, radius: f64) -> (f64, f64) {
    (radius * frame.x_scale(), radius * frame.y_scale())
}
