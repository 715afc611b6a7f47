//! CSV fixtures shaped like a pandas export of daily NYC temperatures.

use chrono::{Datelike, Duration, NaiveDate};
use std::f64::consts::PI;
use std::io::Write;
use tempfile::NamedTempFile;

/// A full calendar year in `D-Mon` form, with the two index columns pandas
/// leaves behind. Includes `29-Feb` when `with_leap_day` is set.
pub(crate) fn nyc_style_csv(with_leap_day: bool) -> String {
    let mut csv = String::from("Unnamed: 0,Unnamed: 0.1,date,recHigh,recLow,avgHigh,avgLow,max,min\n");
    // 2016 is a leap year; its calendar supplies the day labels
    let first = NaiveDate::from_ymd_opt(2016, 1, 1).unwrap();
    let mut row = 0;
    for offset in 0..366 {
        let date = first + Duration::days(offset);
        if !with_leap_day && date.month() == 2 && date.day() == 29 {
            continue;
        }
        let season = (2.0 * PI * (offset as f64 - 15.0) / 366.0).cos();
        let avg_high = (62.0 - 22.0 * season).round();
        let avg_low = avg_high - 15.0;
        csv.push_str(&format!(
            "{row},{row},{},{},{},{},{},{},{}\n",
            date.format("%-d-%b"),
            avg_high + 20.0,
            avg_low - 22.0,
            avg_high,
            avg_low,
            avg_high + (offset % 7) as f64 - 3.0,
            avg_low + (offset % 5) as f64 - 2.0,
        ));
        row += 1;
    }
    csv
}

pub(crate) fn write_csv(contents: &str) -> std::io::Result<NamedTempFile> {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}
