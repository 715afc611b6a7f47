pub mod daily_temperature;
pub mod period;
pub mod series;
