//! Built-in sample datasets served by the data endpoints.
//!
//! Stands in for the external spreadsheet sources of the original deployment;
//! the tables are loaded once at startup and shared read-only.

use serde::Serialize;
use std::collections::HashMap;

/// A small named table of numeric columns.
#[derive(Debug, Clone, Serialize)]
pub struct Sheet {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl Sheet {
    pub fn new(name: &str, columns: &[&str], rows: Vec<Vec<f64>>) -> Self {
        Self {
            name: name.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    /// Values of one column, by name.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().filter_map(|row| row.get(idx).copied()).collect())
    }
}

/// The datasets available to the data endpoints.
pub fn sample_sheets() -> HashMap<String, Sheet> {
    let mut sheets = HashMap::new();

    sheets.insert(
        "rainfall".to_string(),
        Sheet::new(
            "rainfall",
            &["month", "mm", "rain_days"],
            vec![
                vec![1.0, 84.2, 17.0],
                vec![2.0, 61.8, 14.0],
                vec![3.0, 58.3, 15.0],
                vec![4.0, 41.9, 12.0],
                vec![5.0, 49.1, 11.0],
                vec![6.0, 52.7, 10.0],
                vec![7.0, 63.5, 12.0],
                vec![8.0, 70.0, 13.0],
                vec![9.0, 65.1, 13.0],
                vec![10.0, 88.4, 16.0],
                vec![11.0, 93.6, 17.0],
                vec![12.0, 97.0, 18.0],
            ],
        ),
    );

    sheets.insert(
        "latency".to_string(),
        Sheet::new(
            "latency",
            &["hour", "p50_ms", "p99_ms"],
            vec![
                vec![0.0, 11.2, 48.0],
                vec![4.0, 9.8, 39.5],
                vec![8.0, 14.6, 71.3],
                vec![12.0, 17.9, 93.0],
                vec![16.0, 16.4, 88.7],
                vec![20.0, 13.1, 64.2],
            ],
        ),
    );

    sheets
}
