//! Angular layout of the radial chart and the date to angle mapping that
//! links it to the time-series chart.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use std::f64::consts::PI;

pub const MS_PER_DAY: f64 = 86_400_000.0;

/// Angles for a year of `n_days` days laid out clockwise from twelve o'clock.
///
/// Day `i` occupies `[day_start(i), day_end(i)]`, measured counter-clockwise
/// from the positive x-axis, so the first day sits just right of the top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngularLayout {
    pub n_days: usize,
    pub full_angle: f64,
    pub offset_angle: f64,
    pub day_angle: f64,
}

impl AngularLayout {
    pub fn new(n_days: usize) -> Self {
        let full_angle = 2.0 * PI;
        Self {
            n_days,
            full_angle,
            offset_angle: full_angle / 4.0,
            day_angle: full_angle / n_days.max(1) as f64,
        }
    }

    pub fn day_start(&self, index: usize) -> f64 {
        self.offset_angle - (index as f64 + 1.0) * self.day_angle
    }

    pub fn day_end(&self, index: usize) -> f64 {
        self.offset_angle - index as f64 * self.day_angle
    }

    /// Quarter marks, starting at the positive x-axis.
    pub fn quarters(&self) -> [f64; 4] {
        std::array::from_fn(|k| self.offset_angle * k as f64)
    }

    /// Month marks, every twelfth of the circle.
    pub fn months(&self) -> [f64; 12] {
        std::array::from_fn(|k| self.offset_angle / 3.0 * k as f64)
    }
}

/// Linear date to angle mapping, shared with the page script.
///
/// Serialized field names are read by the embedded JavaScript.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DateAngleMapper {
    /// Midnight UTC of the first charted day, in epoch milliseconds.
    pub origin_ms: f64,
    pub offset_angle: f64,
    pub day_angle: f64,
}

impl DateAngleMapper {
    pub fn new(layout: &AngularLayout, origin: NaiveDate) -> Self {
        Self {
            origin_ms: date_to_ms(origin),
            offset_angle: layout.offset_angle,
            day_angle: layout.day_angle,
        }
    }

    pub fn angle_at_ms(&self, ms: f64) -> f64 {
        let days = (ms - self.origin_ms) / MS_PER_DAY;
        self.offset_angle - days * self.day_angle
    }

    pub fn angle_at(&self, date: NaiveDate) -> f64 {
        self.angle_at_ms(date_to_ms(date))
    }

    /// Wedge angles `(start_angle, end_angle)` covering a view range.
    ///
    /// Later dates sit at smaller angles, so the end of the view becomes the
    /// start of the counter-clockwise sweep.
    pub fn selection(&self, start_ms: f64, end_ms: f64) -> (f64, f64) {
        (self.angle_at_ms(end_ms), self.angle_at_ms(start_ms))
    }
}

pub fn date_to_ms(date: NaiveDate) -> f64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_day_angles_cover_circle() {
        let layout = AngularLayout::new(365);
        assert!(close(layout.day_end(0), PI / 2.0));
        assert!(close(layout.day_start(0), PI / 2.0 - 2.0 * PI / 365.0));
        assert!(close(layout.day_start(364), PI / 2.0 - 2.0 * PI));
        for i in 0..364 {
            assert!(close(layout.day_start(i), layout.day_end(i + 1)));
        }
    }

    #[test]
    fn test_quarter_and_month_marks() {
        let layout = AngularLayout::new(365);
        let quarters = layout.quarters();
        assert!(close(quarters[0], 0.0));
        assert!(close(quarters[3], 3.0 * PI / 2.0));
        let months = layout.months();
        assert!(close(months[3], quarters[1]));
        assert!(close(months[11], 11.0 * PI / 6.0));
    }

    #[test]
    fn test_mapper_matches_layout() {
        let layout = AngularLayout::new(365);
        let origin = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
        let mapper = DateAngleMapper::new(&layout, origin);

        let feb_first = NaiveDate::from_ymd_opt(2015, 2, 1).unwrap();
        assert!(close(mapper.angle_at(origin), layout.day_end(0)));
        assert!(close(mapper.angle_at(feb_first), layout.day_end(31)));
        assert!(close(mapper.angle_at(feb_first), layout.day_start(30)));
    }

    #[test]
    fn test_selection_is_counter_clockwise() {
        let layout = AngularLayout::new(365);
        let origin = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
        let mapper = DateAngleMapper::new(&layout, origin);
        let start = date_to_ms(NaiveDate::from_ymd_opt(2015, 3, 1).unwrap());
        let end = date_to_ms(NaiveDate::from_ymd_opt(2015, 4, 1).unwrap());

        let (start_angle, end_angle) = mapper.selection(start, end);
        assert!(start_angle < end_angle);
        assert!(close(end_angle - start_angle, 31.0 * layout.day_angle));
    }

    #[test]
    fn test_leap_year_uses_loaded_day_count() {
        let layout = AngularLayout::new(366);
        assert!(close(layout.day_angle * 366.0, 2.0 * PI));
    }
}
