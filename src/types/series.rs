//! The three temperature bands drawn on both charts.

use bitflags::bitflags;
use std::fmt;
use std::str::FromStr;

/// A pair of low/high temperature columns rendered as one band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemperatureSeries {
    /// All-time record high and low for the calendar day.
    Record,
    /// Long-term average high and low for the calendar day.
    Average,
    /// Observed high and low for the year being charted.
    Actual,
}

impl TemperatureSeries {
    /// Drawing order, back to front.
    pub const ALL: [TemperatureSeries; 3] = [
        TemperatureSeries::Record,
        TemperatureSeries::Average,
        TemperatureSeries::Actual,
    ];

    /// Column names in the source CSV, as `(low, high)`.
    pub fn source_columns(&self) -> (&'static str, &'static str) {
        match self {
            TemperatureSeries::Record => ("recLow", "recHigh"),
            TemperatureSeries::Average => ("avgLow", "avgHigh"),
            TemperatureSeries::Actual => ("min", "max"),
        }
    }

    /// Column names in the transformed frame, as `(low, high)`.
    pub fn temperature_columns(&self) -> (&'static str, &'static str) {
        match self {
            TemperatureSeries::Record => ("rec_low", "rec_high"),
            TemperatureSeries::Average => ("avg_low", "avg_high"),
            TemperatureSeries::Actual => ("act_low", "act_high"),
        }
    }

    /// Scaled radius columns in the transformed frame, as `(inner, outer)`.
    pub fn radius_columns(&self) -> (&'static str, &'static str) {
        match self {
            TemperatureSeries::Record => ("rec_inner", "rec_outer"),
            TemperatureSeries::Average => ("avg_inner", "avg_outer"),
            TemperatureSeries::Actual => ("act_inner", "act_outer"),
        }
    }

    pub fn flag(&self) -> SeriesFlags {
        match self {
            TemperatureSeries::Record => SeriesFlags::RECORD,
            TemperatureSeries::Average => SeriesFlags::AVERAGE,
            TemperatureSeries::Actual => SeriesFlags::ACTUAL,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            TemperatureSeries::Record => "record",
            TemperatureSeries::Average => "average",
            TemperatureSeries::Actual => "actual",
        }
    }
}

impl fmt::Display for TemperatureSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

bitflags! {
    /// Selects which temperature bands are drawn.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SeriesFlags: u32 {
        const RECORD  = 1 << 0;
        const AVERAGE = 1 << 1;
        const ACTUAL  = 1 << 2;

        const ALL = Self::RECORD.bits()
                  | Self::AVERAGE.bits()
                  | Self::ACTUAL.bits();
    }
}

impl Default for SeriesFlags {
    fn default() -> Self {
        SeriesFlags::ALL
    }
}

impl SeriesFlags {
    /// Enabled series in drawing order.
    pub fn series(&self) -> impl Iterator<Item = TemperatureSeries> + '_ {
        TemperatureSeries::ALL
            .into_iter()
            .filter(move |s| self.contains(s.flag()))
    }
}

/// Parses a comma separated list such as `record,actual` or `all`.
impl FromStr for SeriesFlags {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = SeriesFlags::empty();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            flags |= match part.to_ascii_lowercase().as_str() {
                "all" => SeriesFlags::ALL,
                "record" | "rec" => SeriesFlags::RECORD,
                "average" | "avg" => SeriesFlags::AVERAGE,
                "actual" | "act" => SeriesFlags::ACTUAL,
                other => return Err(format!("unknown temperature series '{other}'")),
            };
        }
        if flags.is_empty() {
            return Err("at least one temperature series is required".to_string());
        }
        Ok(flags)
    }
}

impl serde::Serialize for SeriesFlags {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let names: Vec<String> = self.series().map(|s| s.to_string()).collect();
        serializer.serialize_str(&names.join(","))
    }
}

impl<'de> serde::Deserialize<'de> for SeriesFlags {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
