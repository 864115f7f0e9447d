//! Cosine similarity between embedding vectors.

use buddy_core::error::{BuddyError, Result};

/// Cosine similarity of two equal-length vectors, in [-1, 1].
///
/// A zero-magnitude vector on either side yields `Ok(0.0)` instead of an
/// error, so a pathological embedding degrades search ranking rather than
/// crashing it. Unequal lengths are a `DimensionMismatch`.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(BuddyError::DimensionMismatch {
            expected: a.len(),
            got: b.len(),
        });
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += f64::from(*x) * f64::from(*y);
        norm_a += f64::from(*x) * f64::from(*x);
        norm_b += f64::from(*y) * f64::from(*y);
    }

    let magnitude = norm_a.sqrt() * norm_b.sqrt();
    if magnitude == 0.0 {
        return Ok(0.0);
    }

    Ok((dot / magnitude) as f32)
}
