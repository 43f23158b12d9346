use serde::{Deserialize, Serialize};

use super::{FeatureFrame, ModelError, Regressor};

/// Ordinary least-squares weights, possibly with several outputs.
///
/// `coefficients[j][i]` weights feature `i` for output `j`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub feature_names: Vec<String>,
    pub coefficients: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

impl LinearModel {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.coefficients.is_empty() {
            return Err(ModelError::invalid("linear model has no outputs"));
        }
        if self.intercept.len() != self.coefficients.len() {
            return Err(ModelError::invalid(format!(
                "linear model has {} coefficient rows but {} intercepts",
                self.coefficients.len(),
                self.intercept.len()
            )));
        }
        let width = self.feature_names.len();
        if let Some((j, row)) = self
            .coefficients
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != width)
        {
            return Err(ModelError::invalid(format!(
                "coefficient row {j} has {} weights for {width} features",
                row.len()
            )));
        }
        Ok(())
    }
}

impl Regressor for LinearModel {
    fn predict(&self, frame: &FeatureFrame) -> Result<Vec<Vec<f64>>, ModelError> {
        frame.check_columns(&self.feature_names)?;

        let out = frame
            .rows()
            .iter()
            .map(|row| {
                self.coefficients
                    .iter()
                    .zip(&self.intercept)
                    .map(|(weights, bias)| {
                        bias + weights.iter().zip(row).map(|(w, x)| w * x).sum::<f64>()
                    })
                    .collect()
            })
            .collect();
        Ok(out)
    }
}
