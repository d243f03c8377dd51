//! AI inference layer: ONNX Runtime classification of skin-lesion photos.
//!
//! The pipeline is `bytes → decode → preprocess → forward pass → softmax →
//! top-K → labelled predictions`, with the model artifact loaded exactly once
//! behind [`service::ClassifierService`].

pub mod error;
pub mod labels;
pub mod preprocess;
pub mod rank;

#[cfg(feature = "onnx")]
mod classifier;
#[cfg(feature = "onnx")]
pub mod service;

pub use error::ClassifyError;
#[cfg(feature = "onnx")]
pub use service::ClassifierService;
