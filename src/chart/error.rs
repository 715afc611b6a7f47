use crate::temperature_data::error::TemperatureDataError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error(transparent)]
    TemperatureData(#[from] TemperatureDataError),

    #[error("Radius anchors ({0}°, {1}°) do not define a scale")]
    DegenerateScale(f64, f64),

    #[error("Invalid chart configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to read chart config '{0}'")]
    ConfigRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse chart config '{0}'")]
    ConfigParse(PathBuf, #[source] serde_json::Error),

    #[error("Failed to encode link script parameters")]
    ScriptParameters(#[from] serde_json::Error),

    #[error("No days left to chart")]
    NothingToDraw,

    #[error("Failed to write chart to '{0}'")]
    OutputWrite(PathBuf, #[source] std::io::Error),
}
