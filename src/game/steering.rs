use crate::error::SteerError;
use crate::oracle::SimilarityOracle;

use super::ship::wrap;

/// Turn a similarity score into a heading in [0, 360).
///
/// Identical meanings give 0°, opposite meanings give 180° before the
/// multiplier is applied.
pub fn similarity_to_heading(similarity: f32, multiplier: f32) -> f32 {
    let degrees = similarity.clamp(-1.0, 1.0).acos().to_degrees();
    wrap(degrees * multiplier, 360.0)
}

/// Heading for steering from `current` to `candidate`.
pub fn steer(
    oracle: &dyn SimilarityOracle,
    current: &str,
    candidate: &str,
    multiplier: f32,
) -> Result<f32, SteerError> {
    if candidate.is_empty() {
        return Err(SteerError::EmptyInput);
    }
    if !oracle.contains(candidate) {
        return Err(SteerError::UnknownWord(candidate.to_string()));
    }
    let similarity = oracle
        .similarity(current, candidate)
        .filter(|s| s.is_finite())
        .ok_or_else(|| SteerError::UnknownPair {
            from: current.to_string(),
            to: candidate.to_string(),
        })?;
    Ok(similarity_to_heading(similarity, multiplier))
}
