pub mod angles;
pub mod frame;
pub mod wedge;
