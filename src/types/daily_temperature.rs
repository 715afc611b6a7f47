use chrono::NaiveDate;

/// One day of temperature observations, in the units of the source data.
#[derive(Debug, PartialEq, Clone)]
pub struct DailyTemperature {
    pub date: NaiveDate,
    pub record_high: Option<f64>,  // recHigh
    pub record_low: Option<f64>,   // recLow
    pub average_high: Option<f64>, // avgHigh
    pub average_low: Option<f64>,  // avgLow
    pub actual_high: Option<f64>,  // max
    pub actual_low: Option<f64>,   // min
}
