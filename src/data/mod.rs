//! Data module - Data points and file loading

mod loader;
mod point;

pub use loader::DataLoader;
pub use point::{sample_data, DataPoint, Series};
