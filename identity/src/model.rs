use crate::error::FaceIdError;
use crate::image::FaceImage;

/// Extracts face embedding vectors from cropped face images.
///
/// The output is a dense f32 vector whose dimensionality is returned by
/// [`FaceEmbedder::dimension`]. It does not need to be normalized; the
/// resolver normalizes it exactly once on the way in.
///
/// # Thread Safety
///
/// Implementations must be safe for concurrent use.
pub trait FaceEmbedder: Send + Sync {
    /// Computes an embedding for one face crop.
    fn extract(&self, face: &FaceImage) -> Result<Vec<f32>, FaceIdError>;

    /// Returns the dimensionality of the embedding vectors (e.g., 512).
    fn dimension(&self) -> usize;
}
