//! Regression models loaded from disk.
//!
//! Every artifact kind implements [`Regressor`]; the rest of the server only
//! sees that capability.

mod artifact;
mod error;
mod frame;
mod linear;
mod store;
mod tree;

pub use artifact::ModelArtifact;
pub use error::ModelError;
pub use frame::FeatureFrame;
pub use linear::LinearModel;
pub use store::{LoadPolicy, ModelStore};
pub use tree::TreeEnsemble;
#[cfg(test)]
pub use tree::{Node, Split, Tree};

use crate::domain::FeatureRecord;

/// Anything that maps feature rows to output rows.
pub trait Regressor {
    /// One output row per input row.
    fn predict(&self, frame: &FeatureFrame) -> Result<Vec<Vec<f64>>, ModelError>;
}

/// Predict a single house and take the first output of the first row.
pub fn predict_price<R: Regressor + ?Sized>(
    model: &R,
    record: &FeatureRecord,
) -> Result<f64, ModelError> {
    let output = model.predict(&FeatureFrame::from_record(record))?;
    let price = output
        .first()
        .and_then(|row| row.first())
        .copied()
        .ok_or(ModelError::EmptyPrediction)?;
    if !price.is_finite() {
        return Err(ModelError::NonFinite(price));
    }
    Ok(price)
}
