//! Contains the `TemperatureYearFrame`, the single in-memory table both charts
//! are drawn from.

use crate::geometry::angles::AngularLayout;
use crate::scale::LinearScale;
use crate::temperature_data::error::TemperatureDataError;
use crate::temperature_data::loader::sort_consecutive;
use crate::types::daily_temperature::DailyTemperature;
use crate::types::period::AnyDate;
use crate::types::series::TemperatureSeries;
use chrono::{Duration, NaiveDate};
use log::debug;
use ordered_float::OrderedFloat;
use polars::prelude::*;

const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// One day's glyph geometry, shared by the radial wedges and the cartesian quads.
#[derive(Debug, Clone, PartialEq)]
pub struct DayGlyph {
    pub index: usize,
    /// First instant of the day.
    pub left: NaiveDate,
    /// First instant of the next charted day.
    pub right: NaiveDate,
    pub start_angle: f64,
    pub end_angle: f64,
    /// Bands with both bounds present, in drawing order.
    pub bands: Vec<Band>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub series: TemperatureSeries,
    pub low: f64,
    pub high: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
}

/// A year of daily temperatures with derived interval, angle and radius columns.
///
/// Columns:
///
/// * `date`, `left`, `right`: the day and the interval it covers;
/// * `index`, `day_start`, `day_end`: position on the radial chart;
/// * `rec_low` .. `act_high`: source temperatures;
/// * `rec_inner` .. `act_outer`: temperatures passed through the radius scale.
///
/// Filtering keeps the angles computed for the full year, so a filtered frame
/// still lines up with the radial chart.
#[derive(Debug, Clone)]
pub struct TemperatureYearFrame {
    pub frame: DataFrame,
    layout: AngularLayout,
    scale: LinearScale,
}

impl TemperatureYearFrame {
    /// Builds the frame from rows in any order. Row `i` after sorting is
    /// placed at day `i` of the circle.
    ///
    /// # Errors
    ///
    /// Returns [`TemperatureDataError::NoDays`] for an empty slice,
    /// [`TemperatureDataError::DuplicateDate`] or [`TemperatureDataError::DateGap`]
    /// when the dates are not consecutive, or
    /// [`TemperatureDataError::DataFrameProcessing`] if polars fails.
    pub fn from_days(
        days: &[DailyTemperature],
        scale: LinearScale,
    ) -> Result<Self, TemperatureDataError> {
        let mut days = days.to_vec();
        sort_consecutive(&mut days)?;
        let last = days.last().ok_or(TemperatureDataError::NoDays)?;
        let layout = AngularLayout::new(days.len());

        let dates: Vec<NaiveDate> = days.iter().map(|d| d.date).collect();
        let right: Vec<NaiveDate> = dates
            .iter()
            .skip(1)
            .copied()
            .chain(std::iter::once(last.date + Duration::days(1)))
            .collect();
        let column = |f: fn(&DailyTemperature) -> Option<f64>| -> Vec<Option<f64>> {
            days.iter().map(f).collect()
        };

        let base = df!(
            "date" => dates,
            "right" => right,
            "rec_low" => column(|d| d.record_low),
            "rec_high" => column(|d| d.record_high),
            "avg_low" => column(|d| d.average_low),
            "avg_high" => column(|d| d.average_high),
            "act_low" => column(|d| d.actual_low),
            "act_high" => column(|d| d.actual_high),
        )?;

        let position = col("index").cast(DataType::Float64);
        let mut derived = vec![
            col("date").alias("left"),
            (lit(layout.offset_angle) - (position.clone() + lit(1.0)) * lit(layout.day_angle))
                .alias("day_start"),
            (lit(layout.offset_angle) - position * lit(layout.day_angle)).alias("day_end"),
        ];
        for series in TemperatureSeries::ALL {
            let (low, high) = series.temperature_columns();
            let (inner, outer) = series.radius_columns();
            derived.push(scaled(low, &scale).alias(inner));
            derived.push(scaled(high, &scale).alias(outer));
        }

        let frame = base
            .lazy()
            .with_row_index("index", None)
            .with_columns(derived)
            .collect()?;
        debug!(
            "Built temperature frame with {} rows, day angle {:.5} rad",
            frame.height(),
            layout.day_angle
        );

        Ok(Self {
            frame,
            layout,
            scale,
        })
    }

    pub fn layout(&self) -> &AngularLayout {
        &self.layout
    }

    pub fn scale(&self) -> &LinearScale {
        &self.scale
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Filters rows with a polars predicate.
    pub fn filter(&self, predicate: Expr) -> Result<Self, TemperatureDataError> {
        let frame = self.frame.clone().lazy().filter(predicate).collect()?;
        Ok(Self {
            frame,
            layout: self.layout,
            scale: self.scale,
        })
    }

    /// Keeps the days from `start` through `end`, both inclusive.
    pub fn get_range(
        &self,
        start: impl AnyDate,
        end: impl AnyDate,
    ) -> Result<Self, TemperatureDataError> {
        let start = start
            .get_date_range()
            .ok_or_else(|| TemperatureDataError::InvalidDateRange("unresolvable start".into()))?
            .start;
        let end = end
            .get_date_range()
            .ok_or_else(|| TemperatureDataError::InvalidDateRange("unresolvable end".into()))?
            .end;
        if end < start {
            return Err(TemperatureDataError::InvalidDateRange(format!(
                "{end} is before {start}"
            )));
        }
        self.filter(
            col("date")
                .gt_eq(lit(start))
                .and(col("date").lt_eq(lit(end))),
        )
    }

    /// Keeps the single day `date` resolves to (its first day for wider periods).
    pub fn get_at(&self, date: impl AnyDate) -> Result<Self, TemperatureDataError> {
        let day = date
            .get_date_range()
            .ok_or_else(|| TemperatureDataError::InvalidDateRange("unresolvable date".into()))?
            .start;
        self.filter(col("date").eq(lit(day)))
    }

    /// Collects the rows back into [`DailyTemperature`] values.
    pub fn days(&self) -> Result<Vec<DailyTemperature>, TemperatureDataError> {
        let dates = self.dates("date")?;
        let rec_low = self.floats("rec_low")?;
        let rec_high = self.floats("rec_high")?;
        let avg_low = self.floats("avg_low")?;
        let avg_high = self.floats("avg_high")?;
        let act_low = self.floats("act_low")?;
        let act_high = self.floats("act_high")?;

        Ok(dates
            .into_iter()
            .enumerate()
            .map(|(i, date)| DailyTemperature {
                date,
                record_low: rec_low[i],
                record_high: rec_high[i],
                average_low: avg_low[i],
                average_high: avg_high[i],
                actual_low: act_low[i],
                actual_high: act_high[i],
            })
            .collect())
    }

    /// Collects the derived columns into per-day glyphs.
    pub fn day_glyphs(&self) -> Result<Vec<DayGlyph>, TemperatureDataError> {
        let index: Vec<Option<u32>> = self
            .frame
            .column("index")?
            .cast(&DataType::UInt32)?
            .u32()?
            .into_iter()
            .collect();
        let left = self.dates("left")?;
        let right = self.dates("right")?;
        let day_start = self.floats("day_start")?;
        let day_end = self.floats("day_end")?;

        let mut series_columns = Vec::new();
        for series in TemperatureSeries::ALL {
            let (low, high) = series.temperature_columns();
            let (inner, outer) = series.radius_columns();
            series_columns.push((
                series,
                self.floats(low)?,
                self.floats(high)?,
                self.floats(inner)?,
                self.floats(outer)?,
            ));
        }

        let mut glyphs = Vec::with_capacity(left.len());
        for i in 0..left.len() {
            let (Some(position), Some(start_angle), Some(end_angle)) =
                (index[i], day_start[i], day_end[i])
            else {
                continue;
            };
            let bands = series_columns
                .iter()
                .filter_map(|(series, low, high, inner, outer)| {
                    Some(Band {
                        series: *series,
                        low: low[i]?,
                        high: high[i]?,
                        inner_radius: inner[i]?,
                        outer_radius: outer[i]?,
                    })
                })
                .collect();
            glyphs.push(DayGlyph {
                index: position as usize,
                left: left[i],
                right: right[i],
                start_angle,
                end_angle,
                bands,
            });
        }
        Ok(glyphs)
    }

    /// First `left` and last `right`, i.e. the x-range of the time-series chart.
    pub fn date_bounds(&self) -> Result<Option<(NaiveDate, NaiveDate)>, TemperatureDataError> {
        let left = self.dates("left")?;
        let right = self.dates("right")?;
        Ok(left.first().copied().zip(right.last().copied()))
    }

    /// Lowest and highest temperature over every band, ignoring missing values.
    pub fn temperature_extent(&self) -> Result<Option<(f64, f64)>, TemperatureDataError> {
        let mut values = Vec::new();
        for series in TemperatureSeries::ALL {
            let (low, high) = series.temperature_columns();
            values.extend(self.floats(low)?.into_iter().flatten());
            values.extend(self.floats(high)?.into_iter().flatten());
        }
        let min = values.iter().copied().map(OrderedFloat).min();
        let max = values.iter().copied().map(OrderedFloat).max();
        Ok(min.zip(max).map(|(lo, hi)| (lo.into_inner(), hi.into_inner())))
    }

    fn floats(&self, name: &str) -> Result<Vec<Option<f64>>, TemperatureDataError> {
        Ok(self.frame.column(name)?.f64()?.into_iter().collect())
    }

    fn dates(&self, name: &str) -> Result<Vec<NaiveDate>, TemperatureDataError> {
        let column = self.frame.column(name)?;
        let days = column.date()?;
        days.into_iter()
            .map(|opt_day| {
                opt_day
                    .and_then(|d| NaiveDate::from_num_days_from_ce_opt(UNIX_EPOCH_DAYS_FROM_CE + d))
                    .ok_or_else(|| {
                        TemperatureDataError::InvalidDateRange(format!(
                            "missing or out of range value in '{name}'"
                        ))
                    })
            })
            .collect()
    }
}

fn scaled(column: &str, scale: &LinearScale) -> Expr {
    col(column) * lit(scale.a) + lit(scale.b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::angles::DateAngleMapper;
    use crate::temperature_data::loader::TemperatureLoader;
    use crate::temperature_data::test_support::{nyc_style_csv, write_csv};
    use crate::types::period::{Month, Year};
    use std::f64::consts::PI;

    fn default_scale() -> LinearScale {
        LinearScale::from_anchors((-20.0, 100.0), (120.0, 400.0)).unwrap()
    }

    fn year_frame() -> Result<TemperatureYearFrame, Box<dyn std::error::Error>> {
        let file = write_csv(&nyc_style_csv(true))?;
        let days = TemperatureLoader::new(Year(2015)).load(file.path())?;
        Ok(TemperatureYearFrame::from_days(&days, default_scale())?)
    }

    fn day(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2015, month, day).unwrap()
    }

    #[test]
    fn test_derived_columns() -> Result<(), Box<dyn std::error::Error>> {
        let frame = year_frame()?;
        assert_eq!(frame.height(), 365);
        for name in ["index", "left", "right", "day_start", "day_end", "rec_inner", "act_outer"] {
            assert!(frame.frame.column(name).is_ok(), "missing column {name}");
        }

        let glyphs = frame.day_glyphs()?;
        let first = &glyphs[0];
        assert_eq!(first.left, day(1, 1));
        assert_eq!(first.right, day(1, 2));
        assert!((first.end_angle - PI / 2.0).abs() < 1e-9);
        assert!((first.start_angle - (PI / 2.0 - 2.0 * PI / 365.0)).abs() < 1e-9);

        // the dropped leap day leaves no gap in the intervals
        assert_eq!(glyphs[58].right, day(3, 1));

        let last = glyphs.last().unwrap();
        assert_eq!(last.left, day(12, 31));
        assert_eq!(last.right, NaiveDate::from_ymd_opt(2016, 1, 1).unwrap());
        Ok(())
    }

    #[test]
    fn test_radius_columns_follow_scale() -> Result<(), Box<dyn std::error::Error>> {
        let frame = year_frame()?;
        let scale = *frame.scale();
        for glyph in frame.day_glyphs()?.iter().take(40) {
            assert_eq!(glyph.bands.len(), 3);
            for band in &glyph.bands {
                assert!((band.inner_radius - scale.apply(band.low)).abs() < 1e-9);
                assert!((band.outer_radius - scale.apply(band.high)).abs() < 1e-9);
            }
        }
        Ok(())
    }

    #[test]
    fn test_get_range_keeps_full_year_angles() -> Result<(), Box<dyn std::error::Error>> {
        let frame = year_frame()?;
        let march = frame.get_range(Month::new(2015, 3), Month::new(2015, 3))?;
        assert_eq!(march.height(), 31);

        let glyphs = march.day_glyphs()?;
        assert_eq!(glyphs[0].index, 59);
        assert!((glyphs[0].end_angle - frame.layout().day_end(59)).abs() < 1e-9);
        assert_eq!(march.date_bounds()?, Some((day(3, 1), day(4, 1))));
        Ok(())
    }

    #[test]
    fn test_get_at_and_days_round_trip() -> Result<(), Box<dyn std::error::Error>> {
        let frame = year_frame()?;
        let single = frame.get_at("2015-07-04")?;
        let days = single.days()?;
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date, day(7, 4));
        assert!(days[0].record_high.is_some());

        assert!(frame.get_range("2015-05-01", "2015-04-01").is_err());
        assert!(frame.get_at("garbage").is_err());
        Ok(())
    }

    #[test]
    fn test_missing_values_skip_band() -> Result<(), Box<dyn std::error::Error>> {
        let days = vec![DailyTemperature {
            date: day(1, 1),
            record_high: Some(62.0),
            record_low: Some(-4.0),
            average_high: Some(39.0),
            average_low: Some(27.0),
            actual_high: None,
            actual_low: Some(33.0),
        }];
        let frame = TemperatureYearFrame::from_days(&days, default_scale())?;
        let glyphs = frame.day_glyphs()?;
        let drawn: Vec<_> = glyphs[0].bands.iter().map(|b| b.series).collect();
        assert_eq!(
            drawn,
            vec![TemperatureSeries::Record, TemperatureSeries::Average]
        );
        assert_eq!(frame.temperature_extent()?, Some((-4.0, 62.0)));
        Ok(())
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let err = TemperatureYearFrame::from_days(&[], default_scale()).unwrap_err();
        assert!(matches!(err, TemperatureDataError::NoDays));
    }

    fn reading(date: NaiveDate) -> DailyTemperature {
        DailyTemperature {
            date,
            record_high: Some(62.0),
            record_low: Some(-4.0),
            average_high: Some(39.0),
            average_low: Some(27.0),
            actual_high: Some(41.0),
            actual_low: Some(33.0),
        }
    }

    #[test]
    fn test_unsorted_days_are_sorted() -> Result<(), Box<dyn std::error::Error>> {
        let days = vec![reading(day(1, 2)), reading(day(1, 1))];
        let frame = TemperatureYearFrame::from_days(&days, default_scale())?;
        let glyphs = frame.day_glyphs()?;
        assert_eq!((glyphs[0].left, glyphs[0].right), (day(1, 1), day(1, 2)));
        assert_eq!((glyphs[1].left, glyphs[1].right), (day(1, 2), day(1, 3)));
        assert!(glyphs[0].end_angle > glyphs[1].end_angle);
        Ok(())
    }

    #[test]
    fn test_gaps_and_duplicates_are_rejected() {
        let gap = vec![reading(day(1, 1)), reading(day(1, 2)), reading(day(1, 4))];
        let err = TemperatureYearFrame::from_days(&gap, default_scale()).unwrap_err();
        assert!(matches!(
            err,
            TemperatureDataError::DateGap { previous, next } if previous == day(1, 2) && next == day(1, 4)
        ));

        let duplicate = vec![reading(day(1, 1)), reading(day(1, 1))];
        let err = TemperatureYearFrame::from_days(&duplicate, default_scale()).unwrap_err();
        assert!(matches!(err, TemperatureDataError::DuplicateDate(_)));
    }

    #[test]
    fn test_wedges_match_date_mapping() -> Result<(), Box<dyn std::error::Error>> {
        let frame = year_frame()?;
        let glyphs = frame.day_glyphs()?;
        let mapper = DateAngleMapper::new(frame.layout(), glyphs[0].left);
        for glyph in &glyphs {
            assert!((mapper.angle_at(glyph.left) - glyph.end_angle).abs() < 1e-9);
            assert!((mapper.angle_at(glyph.right) - glyph.start_angle).abs() < 1e-9);
        }
        Ok(())
    }
}
