//! Classifier service: load-once artifact lifecycle with an explicit
//! degraded mode.
//!
//! Loading is attempted exactly once, at construction. On failure the
//! service stays up in degraded mode and answers every classification with
//! `ServiceUnavailable` — the chat capability of the surrounding process
//! remains independently usable, and retrying a missing file inside a hot
//! request path would add latency without fixing anything.

use std::path::Path;
use std::sync::Mutex;

use tracing::{error, info, warn};

use dermalens_core::{ClassifyOutcome, Prediction};

use crate::classifier::LesionClassifier;
use crate::error::ClassifyError;
use crate::preprocess;

/// Two-state model reference, checked before every inference call.
enum State {
    Ready(Mutex<LesionClassifier>),
    Unavailable(String),
}

/// Shared, read-only classification service.
///
/// Construct once at process start and hand a shared reference to every
/// request handler. The interior `Mutex` exists only because the runtime's
/// `run` call needs exclusive access to its scratch buffers; the weights
/// themselves are never mutated after load.
pub struct ClassifierService {
    state: State,
}

impl ClassifierService {
    /// Attempt the artifact load. A failed load is recorded, not fatal.
    pub fn new(artifact: &Path) -> Self {
        match LesionClassifier::load(artifact) {
            Ok(classifier) => Self {
                state: State::Ready(Mutex::new(classifier)),
            },
            Err(e) => {
                warn!(error = %e, "classifier unavailable, serving degraded");
                Self {
                    state: State::Unavailable(e.to_string()),
                }
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, State::Ready(_))
    }

    /// Why the classifier is degraded, if it is.
    pub fn unavailable_reason(&self) -> Option<&str> {
        match &self.state {
            State::Ready(_) => None,
            State::Unavailable(reason) => Some(reason),
        }
    }

    /// Full pipeline with a typed error, for callers that need to
    /// distinguish failure kinds.
    pub fn try_classify(&self, bytes: &[u8]) -> Result<Vec<Prediction>, ClassifyError> {
        let classifier = match &self.state {
            State::Ready(classifier) => classifier,
            State::Unavailable(reason) => {
                return Err(ClassifyError::ServiceUnavailable(reason.clone()));
            }
        };

        // Decode/preprocess before taking the lock; bad uploads never
        // serialize behind the forward pass.
        let tensor = preprocess::preprocess(bytes)?;

        let mut guard = classifier
            .lock()
            .map_err(|_| ClassifyError::Internal("classifier lock poisoned".into()))?;
        guard.classify(&tensor)
    }

    /// Boundary operation consumed by the HTTP layer.
    ///
    /// Never panics and never returns a raw error: every failure mode is
    /// caught, logged, and converted into a structured outcome so the
    /// caller can always produce a response. Unexpected internal failures
    /// are reported generically; their detail goes to the log only.
    pub fn classify(&self, filename: &str, bytes: &[u8]) -> ClassifyOutcome {
        match self.try_classify(bytes) {
            Ok(predictions) => {
                info!(
                    filename,
                    top = %predictions.first().map(|p| p.label.as_str()).unwrap_or("-"),
                    "classified image"
                );
                ClassifyOutcome::success(filename, predictions)
            }
            Err(e @ (ClassifyError::Inference(_) | ClassifyError::Internal(_))) => {
                error!(filename, error = %e, "inference failed");
                ClassifyOutcome::failure("error during image classification")
            }
            Err(e) => {
                warn!(filename, error = %e, "classification rejected");
                ClassifyOutcome::failure(e.to_string())
            }
        }
    }
}
