use crate::types::series::TemperatureSeries;
use serde::{Deserialize, Serialize};

/// CSS colours shared by both charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub record: String,
    pub average: String,
    pub actual: String,
    pub background: String,
    /// Temperature rings, quarter marks and grid lines.
    pub axis: String,
    pub selection: String,
    pub text: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            record: "#0168a8".to_string(),
            average: "#c5edc5".to_string(),
            actual: "#e07f4e".to_string(),
            background: "white".to_string(),
            axis: "lightgrey".to_string(),
            selection: "black".to_string(),
            text: "grey".to_string(),
        }
    }
}

impl Palette {
    pub fn color(&self, series: TemperatureSeries) -> &str {
        match series {
            TemperatureSeries::Record => &self.record,
            TemperatureSeries::Average => &self.average,
            TemperatureSeries::Actual => &self.actual,
        }
    }
}
