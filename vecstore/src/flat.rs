use std::fmt;

use crate::error::VecError;
use crate::l2::l2_squared;

/// Match is a single result from a nearest-neighbour search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match {
    /// Insertion position of the matched vector.
    pub position: usize,

    /// Squared Euclidean distance between the query and matched vector.
    /// Lower values indicate higher similarity.
    pub distance: f32,
}

/// FlatIndex is an append-only exact index using brute-force squared L2
/// distance.
///
/// Vectors live in one contiguous buffer in insertion order. There is no
/// delete or update: the only way to shrink the index is [`FlatIndex::truncate`],
/// which drops a suffix.
///
/// FlatIndex does no locking of its own. Owners that share it across
/// threads wrap it together with whatever state must stay in step with it.
#[derive(Clone)]
pub struct FlatIndex {
    dim: usize,
    data: Vec<f32>,
}

impl FlatIndex {
    /// Create an empty index for vectors of dimension `dim`.
    /// Panics if `dim` is not positive.
    pub fn new(dim: usize) -> Self {
        assert!(dim > 0, "vecstore: FlatIndex dim must be positive");
        Self {
            dim,
            data: Vec::new(),
        }
    }

    /// Build an index from a flat buffer of `len * dim` values.
    pub(crate) fn from_raw(dim: usize, data: Vec<f32>) -> Self {
        debug_assert!(dim > 0 && data.len() % dim == 0);
        Self { dim, data }
    }

    pub(crate) fn raw(&self) -> &[f32] {
        &self.data
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Return the number of vectors in the index.
    pub fn len(&self) -> usize {
        self.data.len() / self.dim
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Append a vector and return its position.
    pub fn add(&mut self, vector: &[f32]) -> Result<usize, VecError> {
        self.check_dim(vector)?;
        let pos = self.len();
        self.data.extend_from_slice(vector);
        Ok(pos)
    }

    /// Return the vector stored at `position`.
    pub fn get(&self, position: usize) -> Option<&[f32]> {
        let start = position.checked_mul(self.dim)?;
        self.data.get(start..start + self.dim)
    }

    /// Drop every vector at position `len` and beyond.
    /// No effect if the index already holds `len` vectors or fewer.
    pub fn truncate(&mut self, len: usize) {
        self.data.truncate(len.saturating_mul(self.dim));
    }

    /// Return the single nearest vector, or `None` if the index is empty.
    pub fn nearest(&self, query: &[f32]) -> Result<Option<Match>, VecError> {
        self.check_dim(query)?;
        let mut best: Option<Match> = None;
        for (position, v) in self.data.chunks_exact(self.dim).enumerate() {
            let distance = l2_squared(query, v);
            if best.is_none_or(|b| distance < b.distance) {
                best = Some(Match { position, distance });
            }
        }
        Ok(best)
    }

    fn check_dim(&self, v: &[f32]) -> Result<(), VecError> {
        if v.len() != self.dim {
            return Err(VecError::DimensionMismatch {
                got: v.len(),
                want: self.dim,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for FlatIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlatIndex")
            .field("dim", &self.dim)
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_returns_positions() {
        let mut idx = FlatIndex::new(4);
        assert_eq!(idx.add(&[1.0, 0.0, 0.0, 0.0]).unwrap(), 0);
        assert_eq!(idx.add(&[0.0, 1.0, 0.0, 0.0]).unwrap(), 1);
        assert_eq!(idx.add(&[0.9, 0.1, 0.0, 0.0]).unwrap(), 2);

        let m = idx.nearest(&[1.0, 0.0, 0.0, 0.0]).unwrap().unwrap();
        assert_eq!(m.position, 0);
        assert_eq!(m.distance, 0.0);
    }

    #[test]
    fn test_nearest() {
        let mut idx = FlatIndex::new(2);
        idx.add(&[0.0, 1.0]).unwrap();
        idx.add(&[1.0, 0.0]).unwrap();

        let m = idx.nearest(&[0.8, 0.6]).unwrap().unwrap();
        assert_eq!(m.position, 1);
        assert!((m.distance - 0.4).abs() < 1e-6, "got {}", m.distance);
    }

    #[test]
    fn test_nearest_tie_keeps_first() {
        let mut idx = FlatIndex::new(2);
        idx.add(&[1.0, 0.0]).unwrap();
        idx.add(&[1.0, 0.0]).unwrap();

        assert_eq!(idx.nearest(&[1.0, 0.0]).unwrap().unwrap().position, 0);
    }

    #[test]
    fn test_nearest_empty() {
        let idx = FlatIndex::new(3);
        assert!(idx.nearest(&[1.0, 0.0, 0.0]).unwrap().is_none());
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut idx = FlatIndex::new(4);
        assert!(idx.add(&[1.0, 0.0, 0.0]).is_err());
        idx.add(&[1.0, 0.0, 0.0, 0.0]).unwrap();
        assert!(matches!(
            idx.nearest(&[1.0, 0.0]),
            Err(VecError::DimensionMismatch { got: 2, want: 4 })
        ));
        assert_eq!(idx.len(), 1);
    }

    #[test]
    fn test_get_and_truncate() {
        let mut idx = FlatIndex::new(2);
        idx.add(&[1.0, 2.0]).unwrap();
        idx.add(&[3.0, 4.0]).unwrap();
        idx.add(&[5.0, 6.0]).unwrap();
        assert_eq!(idx.get(1), Some(&[3.0, 4.0][..]));
        assert_eq!(idx.get(3), None);

        idx.truncate(1);
        assert_eq!(idx.len(), 1);
        assert_eq!(idx.get(0), Some(&[1.0, 2.0][..]));

        idx.truncate(10);
        assert_eq!(idx.len(), 1);
    }

    #[test]
    #[should_panic]
    fn test_panics_on_zero_dim() {
        FlatIndex::new(0);
    }

    #[test]
    fn test_matches_brute_force() {
        use rand::Rng;

        let dim = 32;
        let mut rng = rand::thread_rng();
        let mut idx = FlatIndex::new(dim);
        let mut vecs = Vec::new();
        for _ in 0..200 {
            let v: Vec<f32> = (0..dim).map(|_| rng.r#gen::<f32>() - 0.5).collect();
            idx.add(&v).unwrap();
            vecs.push(v);
        }

        for _ in 0..20 {
            let q: Vec<f32> = (0..dim).map(|_| rng.r#gen::<f32>() - 0.5).collect();
            let mut truth: Vec<(usize, f32)> = vecs
                .iter()
                .enumerate()
                .map(|(i, v)| (i, l2_squared(&q, v)))
                .collect();
            truth.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap());

            let got = idx.nearest(&q).unwrap().unwrap();
            assert_eq!(got.position, truth[0].0);
            assert_eq!(got.distance, truth[0].1);
        }
    }
}
