use crate::embedding::EmbeddingVector;
use crate::error::FaceIdError;
use crate::store::{IdentityStore, Neighbor};

/// Default acceptance threshold, in squared L2 distance units.
pub const DEFAULT_THRESHOLD: f32 = 0.6;

/// Result of matching a query against the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Match {
    /// The nearest identity is strictly closer than the threshold.
    Known { identity: String, distance: f32 },
    /// The store is empty (`best_distance == None`) or the nearest
    /// identity is at or beyond the threshold.
    Unknown { best_distance: Option<f32> },
}

impl Match {
    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known { .. })
    }
}

/// Accept/reject decision over the single nearest neighbour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchPolicy {
    /// A match requires `distance < threshold`; equality is a miss.
    pub threshold: f32,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl MatchPolicy {
    pub fn new(threshold: f32) -> Result<Self, FaceIdError> {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(FaceIdError::InvalidConfig(format!(
                "threshold must be a positive number, got {threshold}"
            )));
        }
        Ok(Self { threshold })
    }

    /// Classifies an already-computed nearest neighbour.
    pub fn classify(&self, nearest: Option<Neighbor>) -> Match {
        match nearest {
            Some(n) if n.distance < self.threshold => Match::Known {
                identity: n.identity,
                distance: n.distance,
            },
            Some(n) => Match::Unknown {
                best_distance: Some(n.distance),
            },
            None => Match::Unknown {
                best_distance: None,
            },
        }
    }

    /// Looks up the nearest identity in `store` and classifies it.
    pub fn resolve(
        &self,
        query: &EmbeddingVector,
        store: &IdentityStore,
    ) -> Result<Match, FaceIdError> {
        Ok(self.classify(store.nearest(query)?))
    }
}
