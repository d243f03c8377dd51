//! Boundary types for classification results.
//!
//! These are the JSON shapes the HTTP layer relays verbatim: a successful
//! classification carries the original filename and a ranked prediction
//! list; any failure collapses to an `{error}` body so the caller can
//! always produce a response.

use serde::{Deserialize, Serialize};

/// One ranked class prediction.
///
/// `confidence` is a softmax probability in `[0, 1]` taken over the full
/// class distribution, not renormalized over the returned subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub confidence: f32,
}

/// Successful classification of one uploaded image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub filename: String,
    /// Top-K predictions, descending by confidence.
    pub predictions: Vec<Prediction>,
}

/// Failed classification, reported as a structured error string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifyFailure {
    pub error: String,
}

/// Outcome of one classification request.
///
/// Serializes untagged to either `{"filename", "predictions"}` or
/// `{"error"}` — the wire contract is that the boundary never raises.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassifyOutcome {
    Success(ClassifyResponse),
    Failure(ClassifyFailure),
}

impl ClassifyOutcome {
    pub fn success(filename: impl Into<String>, predictions: Vec<Prediction>) -> Self {
        Self::Success(ClassifyResponse {
            filename: filename.into(),
            predictions,
        })
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure(ClassifyFailure {
            error: error.into(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Predictions of a successful outcome, if any.
    pub fn predictions(&self) -> Option<&[Prediction]> {
        match self {
            Self::Success(resp) => Some(&resp.predictions),
            Self::Failure(_) => None,
        }
    }
}
