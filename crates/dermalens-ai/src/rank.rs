//! Logits → ranked predictions: softmax and top-K selection.

use dermalens_core::Prediction;

use crate::error::ClassifyError;

/// Number of predictions returned per request.
pub const TOP_K: usize = 5;

/// Softmax over one logit vector, numerically stabilized by max subtraction.
///
/// The output is non-negative and sums to 1 across the full distribution,
/// not just any subset later selected from it.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&x| (x - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Select the `k` highest-probability classes, pairing each with its label.
///
/// The sort is stable and descending, so tied probabilities keep the label
/// table's index order. `k` larger than the class count is a
/// configuration-integrity violation, not a caller error.
pub fn top_k(
    probabilities: &[f32],
    labels: &[&str],
    k: usize,
) -> Result<Vec<Prediction>, ClassifyError> {
    if labels.len() != probabilities.len() {
        return Err(ClassifyError::Internal(format!(
            "label table has {} entries but distribution has {}",
            labels.len(),
            probabilities.len()
        )));
    }
    if k > probabilities.len() {
        return Err(ClassifyError::Internal(format!(
            "top-{k} requested from a {}-class distribution",
            probabilities.len()
        )));
    }

    let mut ranked: Vec<(usize, f32)> = probabilities.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    Ok(ranked
        .into_iter()
        .take(k)
        .map(|(index, confidence)| Prediction {
            label: labels[index].to_string(),
            confidence,
        })
        .collect())
}
