use crate::chart::error::ChartError;
use crate::temperature_data::error::TemperatureDataError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LinkedRadialError {
    #[error(transparent)]
    TemperatureData(#[from] TemperatureDataError),

    #[error(transparent)]
    Chart(#[from] ChartError),
}
