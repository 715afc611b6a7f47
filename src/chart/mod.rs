pub mod config;
pub mod error;
pub mod page;
pub mod palette;
pub mod radial;
pub mod script;
pub mod svg;
pub mod ticks;
pub mod timeseries;
