use facereid_vecstore::l2_norm;

use crate::error::FaceIdError;

/// A unit-length face embedding.
///
/// The only way to obtain one is [`EmbeddingVector::normalize`], so every
/// value of this type has L2 norm 1 (within f32 rounding). Everything the
/// store compares or persists goes through this type, never raw model
/// output.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingVector(Vec<f32>);

impl EmbeddingVector {
    /// Divides every component by the vector's L2 norm.
    ///
    /// Fails with [`FaceIdError::NonFinite`] if any component is NaN or
    /// infinite, and with [`FaceIdError::ZeroVector`] if the norm is zero
    /// (including the empty vector).
    pub fn normalize(mut raw: Vec<f32>) -> Result<Self, FaceIdError> {
        if let Some(index) = raw.iter().position(|x| !x.is_finite()) {
            return Err(FaceIdError::NonFinite { index });
        }
        let norm = l2_norm(&raw);
        if norm == 0.0 || !norm.is_finite() {
            return Err(FaceIdError::ZeroVector);
        }
        for x in &mut raw {
            *x = (*x as f64 / norm) as f32;
        }
        Ok(Self(raw))
    }

    pub fn dim(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.0
    }
}

impl AsRef<[f32]> for EmbeddingVector {
    fn as_ref(&self) -> &[f32] {
        &self.0
    }
}
