use std::sync::Arc;

use crate::embedding::EmbeddingVector;
use crate::error::FaceIdError;
use crate::image::FaceImage;
use crate::model::FaceEmbedder;
use crate::policy::MatchPolicy;
use crate::sender::OutcomeRecord;
use crate::store::IdentityStore;

/// Result of resolving one face.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The face matched an enrolled identity; the store was not touched.
    Recognized { identity: String, distance: f32 },
    /// The face was unknown and is now durably enrolled.
    Enrolled { identity: String },
}

impl Outcome {
    pub fn identity(&self) -> &str {
        match self {
            Self::Recognized { identity, .. } | Self::Enrolled { identity } => identity,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Self::Enrolled { .. })
    }

    /// The `{identity, is_new}` record handed to transports.
    pub fn to_record(&self) -> OutcomeRecord {
        OutcomeRecord {
            identity: self.identity().to_string(),
            is_new: self.is_new(),
        }
    }
}

/// Turns face crops into identities: recognize if known, enroll if not.
///
/// Holds no state of its own besides the shared [`IdentityStore`]; one
/// store may back any number of resolvers on any number of threads.
pub struct IdentityResolver {
    store: Arc<IdentityStore>,
    embedder: Arc<dyn FaceEmbedder>,
    policy: MatchPolicy,
}

impl IdentityResolver {
    /// Fails if the embedder's dimension differs from the store's.
    pub fn new(
        store: Arc<IdentityStore>,
        embedder: Arc<dyn FaceEmbedder>,
        policy: MatchPolicy,
    ) -> Result<Self, FaceIdError> {
        if embedder.dimension() != store.dim() {
            return Err(FaceIdError::DimensionMismatch {
                expected: store.dim(),
                got: embedder.dimension(),
            });
        }
        Ok(Self {
            store,
            embedder,
            policy,
        })
    }

    pub fn store(&self) -> &Arc<IdentityStore> {
        &self.store
    }

    pub fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    /// Embeds `face` and resolves the embedding. Extraction errors are
    /// returned as-is; nothing is retried.
    pub fn process(&self, face: &FaceImage) -> Result<Outcome, FaceIdError> {
        let raw = self.embedder.extract(face)?;
        self.resolve_raw(raw)
    }

    /// Resolves an embedding computed elsewhere (e.g. replayed from a file).
    pub fn resolve_raw(&self, raw: Vec<f32>) -> Result<Outcome, FaceIdError> {
        if raw.len() != self.store.dim() {
            return Err(FaceIdError::DimensionMismatch {
                expected: self.store.dim(),
                got: raw.len(),
            });
        }
        let vector = EmbeddingVector::normalize(raw)?;
        self.store.resolve_or_enroll(vector, &self.policy)
    }
}
