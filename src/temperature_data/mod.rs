pub mod error;
pub mod loader;
#[cfg(test)]
pub(crate) mod test_support;
pub mod year_frame;
