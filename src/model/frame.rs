use crate::domain::{FeatureRecord, FEATURES};

use super::ModelError;

/// Column-named rows handed to a model.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureFrame {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl FeatureFrame {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<f64>>) -> Self {
        Self { columns, rows }
    }

    /// A single-row frame in the fixed feature order.
    pub fn from_record(record: &FeatureRecord) -> Self {
        let columns = FEATURES.iter().map(|c| c.to_string()).collect();
        let row = record.values().iter().map(|v| *v as f64).collect();
        Self::new(columns, vec![row])
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Fails unless the frame's columns are exactly `expected`, in order,
    /// and every row is as wide as the header.
    pub fn check_columns(&self, expected: &[String]) -> Result<(), ModelError> {
        if self.columns != expected {
            return Err(ModelError::FeatureMismatch {
                expected: expected.to_vec(),
                got: self.columns.clone(),
            });
        }
        for (idx, row) in self.rows.iter().enumerate() {
            if row.len() != self.columns.len() {
                return Err(ModelError::RowWidth {
                    row: idx,
                    expected: self.columns.len(),
                    got: row.len(),
                });
            }
        }
        Ok(())
    }
}
