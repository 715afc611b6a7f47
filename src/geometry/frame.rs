//! Data to pixel mapping for a rectangular plot area.

/// Maps data coordinates onto a pixel rectangle, with y growing upwards in
/// data space and downwards in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotFrame {
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotFrame {
    pub fn new(x_range: (f64, f64), y_range: (f64, f64), width: f64, height: f64) -> Self {
        Self {
            x_range,
            y_range,
            left: 0.0,
            top: 0.0,
            width,
            height,
        }
    }

    /// Moves the plot area inside a larger canvas.
    pub fn with_origin(mut self, left: f64, top: f64) -> Self {
        self.left = left;
        self.top = top;
        self
    }

    pub fn px(&self, x: f64) -> f64 {
        let (x0, x1) = self.x_range;
        self.left + (x - x0) / (x1 - x0) * self.width
    }

    pub fn py(&self, y: f64) -> f64 {
        let (y0, y1) = self.y_range;
        self.top + (y1 - y) / (y1 - y0) * self.height
    }

    pub fn point(&self, x: f64, y: f64) -> (f64, f64) {
        (self.px(x), self.py(y))
    }

    /// Pixels per data unit along x.
    pub fn x_scale(&self) -> f64 {
        self.width / (self.x_range.1 - self.x_range.0)
    }

    /// Pixels per data unit along y.
    pub fn y_scale(&self) -> f64 {
        self.height / (self.y_range.1 - self.y_range.0)
    }
}

/// Formats a coordinate with at most two decimals and no trailing zeros.
pub fn coord(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    // avoid "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let text = format!("{rounded:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
