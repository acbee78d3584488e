//! Data Point Module
//! One category's paired entries/exits measurement and the built-in dataset.

use serde::{Deserialize, Serialize};

/// One category with its two series values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub label: String,
    pub entries: f64,
    pub exits: f64,
}

impl DataPoint {
    pub fn new(label: impl Into<String>, entries: f64, exits: f64) -> Self {
        Self {
            label: label.into(),
            entries,
            exits,
        }
    }
}

/// The two measured series, in drawing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Series {
    Entries,
    Exits,
}

impl Series {
    pub const ALL: [Series; 2] = [Series::Entries, Series::Exits];

    pub fn value(self, point: &DataPoint) -> f64 {
        match self {
            Series::Entries => point.entries,
            Series::Exits => point.exits,
        }
    }

    /// Position in `Series::ALL` and in `ChartConfig::series`.
    pub fn index(self) -> usize {
        match self {
            Series::Entries => 0,
            Series::Exits => 1,
        }
    }
}

/// Built-in monthly dataset shown before any file is loaded.
pub fn sample_data() -> Vec<DataPoint> {
    vec![
        DataPoint::new("Jan", 450.0, 380.0),
        DataPoint::new("Feb", 520.0, 420.0),
        DataPoint::new("Mar", 480.0, 390.0),
        DataPoint::new("Apr", 610.0, 530.0),
        DataPoint::new("May", 580.0, 470.0),
        DataPoint::new("Jun", 650.0, 560.0),
    ]
}
