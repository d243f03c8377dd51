pub mod prediction;

pub use prediction::{ClassifyFailure, ClassifyOutcome, ClassifyResponse, Prediction};
