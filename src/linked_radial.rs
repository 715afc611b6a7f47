//! Entry point tying loading, transforming and rendering together.

use crate::chart::config::ChartConfig;
use crate::chart::page::LinkedRadialChart;
use crate::error::LinkedRadialError;
use crate::temperature_data::loader::TemperatureLoader;
use crate::temperature_data::year_frame::TemperatureYearFrame;
use crate::types::daily_temperature::DailyTemperature;
use bon::bon;
use log::info;
use std::path::Path;

/// Runs the CSV → frame → page pipeline.
///
/// # Examples
///
/// ```no_run
/// use linked_radial::{ChartConfig, LinkedRadial, LinkedRadialError};
/// use std::path::Path;
///
/// # fn main() -> Result<(), LinkedRadialError> {
/// let config = ChartConfig::builder().location("NYC").year(2015).build();
/// let chart = LinkedRadial::from_csv(Path::new("temp_nyc_2015.csv"))
///     .config(config)
///     .call()?;
/// chart.write_to(Path::new("linked_radial.html"))?;
/// # Ok(())
/// # }
/// ```
pub struct LinkedRadial;

#[bon]
impl LinkedRadial {
    /// Loads a CSV of daily temperatures and renders the linked charts.
    ///
    /// Without a `config` the defaults of [`ChartConfig`] apply.
    ///
    /// # Errors
    ///
    /// Returns [`LinkedRadialError::TemperatureData`] when the CSV cannot be
    /// read or parsed and [`LinkedRadialError::Chart`] for invalid settings.
    #[builder]
    pub fn from_csv(
        #[builder(start_fn)] path: &Path,
        config: Option<ChartConfig>,
    ) -> Result<LinkedRadialChart, LinkedRadialError> {
        let config = config.unwrap_or_default();
        config.validate()?;
        info!(
            "Loading daily temperatures for {} {} from {}",
            config.location,
            config.year,
            path.display()
        );
        let days = TemperatureLoader::new(config.year()).load(path)?;
        Self::from_days(&days, &config)
    }

    /// Renders the linked charts from rows already in memory, sorted by date.
    pub fn from_days(
        days: &[DailyTemperature],
        config: &ChartConfig,
    ) -> Result<LinkedRadialChart, LinkedRadialError> {
        let frame = TemperatureYearFrame::from_days(days, config.scale()?)?;
        Ok(LinkedRadialChart::build(&frame, config)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::error::ChartError;
    use crate::temperature_data::error::TemperatureDataError;
    use crate::temperature_data::test_support::{nyc_style_csv, write_csv};

    #[test]
    fn test_from_csv_with_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let file = write_csv(&nyc_style_csv(true))?;
        let chart = LinkedRadial::from_csv(file.path()).call()?;
        assert!(chart.radial_svg().contains("Record Hi/Lo"));
        assert!(chart.script().contains("\"day_angle\""));
        Ok(())
    }

    #[test]
    fn test_missing_file_is_a_data_error() {
        let err = LinkedRadial::from_csv(Path::new("/no/such/temps.csv"))
            .call()
            .unwrap_err();
        assert!(matches!(
            err,
            LinkedRadialError::TemperatureData(TemperatureDataError::CsvRead(_, _))
        ));
    }

    #[test]
    fn test_invalid_config_fails_before_loading() {
        let config = ChartConfig::builder().size(10).build();
        let err = LinkedRadial::from_csv(Path::new("/no/such/temps.csv"))
            .config(config)
            .call()
            .unwrap_err();
        assert!(matches!(
            err,
            LinkedRadialError::Chart(ChartError::InvalidConfig(_))
        ));
    }
}
