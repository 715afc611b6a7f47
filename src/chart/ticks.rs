//! Axis tick placement for the time-series chart.
//!
//! The date ticker is mirrored by the page script, which reruns it whenever
//! the view changes.

use crate::geometry::angles::MS_PER_DAY;
use chrono::{DateTime, Datelike, NaiveDate};

const DAY_STEPS: [i64; 4] = [1, 2, 7, 14];
const MONTH_STEPS: [u32; 4] = [1, 2, 3, 6];
const MAX_DATE_TICKS: f64 = 12.0;

/// Round ticks covering `[lo, hi]`, spaced 1, 2 or 5 times a power of ten.
pub fn nice_ticks(lo: f64, hi: f64, target: usize) -> Vec<f64> {
    if !(lo.is_finite() && hi.is_finite()) || hi <= lo || target == 0 {
        return Vec::new();
    }
    let raw_step = (hi - lo) / target as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw_step)
        .unwrap_or(10.0 * magnitude);

    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

/// A labelled tick on the date axis.
#[derive(Debug, Clone, PartialEq)]
pub struct DateTick {
    pub ms: f64,
    pub label: String,
}

/// Ticks for a view spanning `[start_ms, end_ms]`: month starts for wide
/// views, evenly spaced days for narrow ones.
pub fn date_ticks(start_ms: f64, end_ms: f64) -> Vec<DateTick> {
    if !(start_ms.is_finite() && end_ms.is_finite()) || end_ms <= start_ms {
        return Vec::new();
    }
    let span_days = (end_ms - start_ms) / MS_PER_DAY;
    if span_days > 60.0 {
        month_ticks(start_ms, end_ms, span_days)
    } else {
        day_ticks(start_ms, end_ms, span_days)
    }
}

fn month_ticks(start_ms: f64, end_ms: f64, span_days: f64) -> Vec<DateTick> {
    let span_months = span_days / 30.44;
    let step = MONTH_STEPS
        .into_iter()
        .find(|s| span_months / *s as f64 <= MAX_DATE_TICKS)
        .unwrap_or(12);
    let (Some(start), Some(end)) = (ms_to_date(start_ms), ms_to_date(end_ms)) else {
        return Vec::new();
    };

    let mut ticks = Vec::new();
    let mut month_index = start.year() * 12 + start.month0() as i32;
    let last_index = end.year() * 12 + end.month0() as i32;
    while month_index <= last_index {
        let (year, month0) = (month_index.div_euclid(12), month_index.rem_euclid(12) as u32);
        if month0 % step == 0 {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month0 + 1, 1) {
                let ms = crate::geometry::angles::date_to_ms(date);
                if ms >= start_ms && ms <= end_ms {
                    ticks.push(DateTick {
                        ms,
                        label: date.format("%b").to_string(),
                    });
                }
            }
        }
        month_index += 1;
    }
    ticks
}

fn day_ticks(start_ms: f64, end_ms: f64, span_days: f64) -> Vec<DateTick> {
    let step = DAY_STEPS
        .into_iter()
        .find(|s| span_days / *s as f64 <= MAX_DATE_TICKS)
        .unwrap_or(28);
    let step_ms = step as f64 * MS_PER_DAY;

    let mut ticks = Vec::new();
    let mut ms = (start_ms / step_ms).ceil() * step_ms;
    while ms <= end_ms {
        if let Some(date) = ms_to_date(ms) {
            ticks.push(DateTick {
                ms,
                label: date.format("%b %-d").to_string(),
            });
        }
        ms += step_ms;
    }
    ticks
}

fn ms_to_date(ms: f64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(ms.floor() as i64).map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::angles::date_to_ms;

    fn ms(y: i32, m: u32, d: u32) -> f64 {
        date_to_ms(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_nice_ticks() {
        assert_eq!(nice_ticks(-12.0, 104.0, 6), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        assert_eq!(nice_ticks(3.0, 47.0, 4), vec![20.0, 40.0]);
        assert!(nice_ticks(5.0, 5.0, 5).is_empty());
    }

    #[test]
    fn test_full_year_month_ticks() {
        let ticks = date_ticks(ms(2015, 1, 1), ms(2016, 1, 1));
        let labels: Vec<_> = ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov",
                "Dec", "Jan"
            ]
        );
        assert_eq!(ticks[1].ms, ms(2015, 2, 1));
    }

    #[test]
    fn test_narrow_view_uses_days() {
        let ticks = date_ticks(ms(2015, 3, 1), ms(2015, 3, 8));
        assert_eq!(ticks.len(), 8);
        assert_eq!(ticks[0].label, "Mar 1");
        assert_eq!(ticks[7].label, "Mar 8");

        let weekly = date_ticks(ms(2015, 3, 1), ms(2015, 4, 15));
        assert!(weekly.len() <= 12);
        assert!(weekly.windows(2).all(|w| w[1].ms - w[0].ms == 7.0 * MS_PER_DAY));
    }

    #[test]
    fn test_empty_view() {
        assert!(date_ticks(ms(2015, 3, 1), ms(2015, 3, 1)).is_empty());
    }
}
