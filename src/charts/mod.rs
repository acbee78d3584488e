//! Charts module - Bar layout and chart rendering

mod layout;
mod plotter;
mod renderer;

pub use layout::{format_value, ChartLayout, ChartRenderer};
pub use plotter::ChartPlotter;
pub use renderer::StaticChartRenderer;
