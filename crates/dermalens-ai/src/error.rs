use thiserror::Error;

/// Failure taxonomy for the classification pipeline.
///
/// Every variant is either user-actionable (re-upload a valid image) or
/// operator-actionable (fix the artifact path); nothing here is transient,
/// so nothing is retried.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// Model artifact missing, unreadable, or structurally incompatible
    /// with the expected network. Raised once, at load time.
    #[error("model artifact unavailable: {0}")]
    ArtifactLoad(String),

    /// Uploaded bytes are not a decodable image. Request-scoped.
    #[error("invalid image: {0}")]
    Decode(#[from] image::ImageError),

    /// The classifier never finished loading; the service is degraded and
    /// answers without attempting a forward pass.
    #[error("classifier unavailable: {0}")]
    ServiceUnavailable(String),

    /// Unexpected runtime failure during the forward pass.
    #[cfg(feature = "onnx")]
    #[error("inference failed: {0}")]
    Inference(#[from] ort::Error),

    /// Configuration-integrity violation (e.g. top-K larger than the class
    /// count) or other invariant breach that should never fire in practice.
    #[error("internal error: {0}")]
    Internal(String),
}
