pub mod features;

pub use features::{FeatureError, FeatureRecord, FEATURES};
