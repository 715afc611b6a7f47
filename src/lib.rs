mod chart;
mod error;
mod geometry;
mod linked_radial;
mod scale;
mod temperature_data;
mod types;

pub use error::LinkedRadialError;
pub use linked_radial::*;
pub use scale::{Anchor, LinearScale};

pub use chart::config::{ChartConfig, PanelSizes};
pub use chart::error::ChartError;
pub use chart::page::LinkedRadialChart;
pub use chart::palette::Palette;

pub use geometry::angles::{AngularLayout, DateAngleMapper, MS_PER_DAY};
pub use geometry::frame::PlotFrame;
pub use geometry::wedge::AnnularWedge;

pub use temperature_data::error::TemperatureDataError;
pub use temperature_data::loader::TemperatureLoader;
pub use temperature_data::year_frame::{Band, DayGlyph, TemperatureYearFrame};

pub use types::daily_temperature::DailyTemperature;
pub use types::period::{AnyDate, Month, StartEndDate, Year};
pub use types::series::{SeriesFlags, TemperatureSeries};
