//! ONNX Runtime classifier for the fine-tuned vision backbone.
//!
//! The artifact is an ONNX export of the trained network (pretrained
//! backbone, original head replaced by dropout(0.5) + linear(feature_dim →
//! 23)). Export bakes inference mode in: dropout is folded away and there is
//! no gradient graph, so repeated runs on identical input are deterministic.

use std::path::Path;

use ort::session::Session;
use ort::value::Tensor;
use tracing::info;

use dermalens_core::Prediction;

use crate::error::ClassifyError;
use crate::labels::{CLASS_NAMES, NUM_CLASSES};
use crate::preprocess::{CHANNELS, INPUT_SIZE, ImageTensor};
use crate::rank::{TOP_K, softmax, top_k};

/// Input name the training pipeline's ONNX export uses for pixel data.
const INPUT_NAME: &str = "pixel_values";

/// Loaded, ready-to-infer classification network.
#[derive(Debug)]
pub struct LesionClassifier {
    session: Session,
}

impl LesionClassifier {
    /// Load the model artifact and verify it structurally matches the
    /// expected architecture: input `[_, 3, 224, 224]`, output `[_, 23]`.
    ///
    /// The artifact must have been exported from the exact training
    /// architecture; a shape mismatch means label/index drift and is
    /// rejected here rather than producing silently wrong predictions.
    pub fn load(artifact: &Path) -> Result<Self, ClassifyError> {
        if !artifact.exists() {
            return Err(ClassifyError::ArtifactLoad(format!(
                "artifact not found: {}",
                artifact.display()
            )));
        }

        let session = Session::builder()
            .map_err(|e| ClassifyError::ArtifactLoad(e.to_string()))?
            .commit_from_file(artifact)
            .map_err(|e| ClassifyError::ArtifactLoad(e.to_string()))?;

        validate_shapes(&session)?;

        info!(
            artifact = %artifact.display(),
            classes = NUM_CLASSES,
            "loaded lesion classifier"
        );
        Ok(Self { session })
    }

    /// One forward pass over a preprocessed image, ranked to top-K.
    ///
    /// The session holds read-only weights; `&mut` is only the runtime's
    /// scratch-buffer requirement, no parameter is ever updated here.
    pub fn classify(&mut self, input: &ImageTensor) -> Result<Vec<Prediction>, ClassifyError> {
        let tensor = Tensor::from_array((input.shape(), input.data().to_vec().into_boxed_slice()))?;
        let outputs = self.session.run(ort::inputs![INPUT_NAME => tensor])?;

        let (shape, data) = outputs[0].try_extract_tensor::<f32>()?;
        let dims: &[i64] = shape;
        if dims.last().copied() != Some(NUM_CLASSES as i64) || data.len() < NUM_CLASSES {
            return Err(ClassifyError::Internal(format!(
                "unexpected logit shape {dims:?}, expected [_, {NUM_CLASSES}]"
            )));
        }

        // Batch dim is always 1, so the first row is the whole output.
        let probabilities = softmax(&data[..NUM_CLASSES]);
        top_k(&probabilities, &CLASS_NAMES, TOP_K)
    }
}

/// Reject artifacts whose tensor metadata does not match the trained
/// architecture. This is the startup self-check guarding against silent
/// label/index drift between artifact and label table.
fn validate_shapes(session: &Session) -> Result<(), ClassifyError> {
    let input_shape = session
        .inputs()
        .first()
        .and_then(|i| tensor_shape(i.dtype()))
        .ok_or_else(|| ClassifyError::ArtifactLoad("artifact has no tensor input".into()))?;

    let output_shape = session
        .outputs()
        .first()
        .and_then(|o| tensor_shape(o.dtype()))
        .ok_or_else(|| ClassifyError::ArtifactLoad("artifact has no tensor output".into()))?;

    check_shapes(&input_shape, &output_shape)
}

/// Shape comparison proper: input must be `[_, 3, 224, 224]`, output must
/// end in the class count.
fn check_shapes(input: &[i64], output: &[i64]) -> Result<(), ClassifyError> {
    let expected = [CHANNELS as i64, INPUT_SIZE as i64, INPUT_SIZE as i64];
    if input.len() != 4 || input[1..] != expected {
        return Err(ClassifyError::ArtifactLoad(format!(
            "input shape {input:?} does not match [_, {CHANNELS}, {INPUT_SIZE}, {INPUT_SIZE}]"
        )));
    }

    if output.last().copied() != Some(NUM_CLASSES as i64) {
        return Err(ClassifyError::ArtifactLoad(format!(
            "output shape {output:?} does not match [_, {NUM_CLASSES}]"
        )));
    }

    Ok(())
}

fn tensor_shape(dtype: &ort::value::ValueType) -> Option<Vec<i64>> {
    match dtype {
        ort::value::ValueType::Tensor { shape, .. } => Some(shape.to_vec()),
        _ => None,
    }
}
