//! Linear mapping from temperature to radius on the radial chart.

use serde::{Deserialize, Serialize};

/// A `(temperature, radius)` pair the scale must pass through.
pub type Anchor = (f64, f64);

/// `radius = a * temp + b`, solved from two anchors.
///
/// # Examples
///
/// ```
/// use linked_radial::LinearScale;
///
/// let scale = LinearScale::from_anchors((-20.0, 100.0), (120.0, 400.0)).unwrap();
/// assert!((scale.apply(-20.0) - 100.0).abs() < 1e-9);
/// assert!((scale.apply(120.0) - 400.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    pub a: f64,
    pub b: f64,
}

impl LinearScale {
    /// Solves the scale through both anchors. Returns `None` when the two
    /// temperatures coincide or any input is not finite.
    pub fn from_anchors(low: Anchor, high: Anchor) -> Option<Self> {
        let (t0, r0) = low;
        let (t1, r1) = high;
        if ![t0, r0, t1, r1].iter().all(|v| v.is_finite()) || t1 == t0 {
            return None;
        }
        let a = (r1 - r0) / (t1 - t0);
        let b = r0 - a * t0;
        Some(Self { a, b })
    }

    pub fn apply(&self, temp: f64) -> f64 {
        self.a * temp + self.b
    }

    /// Temperature that maps onto `radius`.
    pub fn invert(&self, radius: f64) -> f64 {
        (radius - self.b) / self.a
    }
}
