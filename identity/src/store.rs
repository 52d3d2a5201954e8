use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use facereid_vecstore::{l2_norm, FlatIndex, VecError};
use parking_lot::RwLock;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::embedding::EmbeddingVector;
use crate::error::FaceIdError;
use crate::policy::{Match, MatchPolicy};
use crate::resolver::Outcome;

/// Extension of the label list that sits next to the index artifact.
pub const LABELS_EXTENSION: &str = "txt";

/// How far a stored vector's norm may drift from 1 before the index is
/// considered corrupt.
const UNIT_NORM_TOLERANCE: f64 = 1e-3;

/// Locations of the two artifacts that make up a persisted store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    /// Binary flat index (see [`facereid_vecstore::save`]).
    pub index: PathBuf,
    /// Newline-delimited identity labels, line `i` naming vector `i`.
    pub labels: PathBuf,
}

impl StorePaths {
    /// Derives the label path from the index path by swapping the
    /// extension for `txt` (`faces.idx` -> `faces.txt`).
    pub fn from_index(index: impl Into<PathBuf>) -> Result<Self, FaceIdError> {
        let index = index.into();
        let labels = index.with_extension(LABELS_EXTENSION);
        if labels == index {
            return Err(FaceIdError::InvalidConfig(format!(
                "index path {} must not use the .{LABELS_EXTENSION} extension",
                index.display()
            )));
        }
        Ok(Self { index, labels })
    }
}

/// The nearest stored identity to a query.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    pub identity: String,
    /// Squared L2 distance to the query. Smaller is more similar.
    pub distance: f32,
    /// Enrollment position of the matched identity.
    pub position: usize,
}

/// What [`IdentityStore::repair`] dropped to make the artifacts agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairReport {
    pub kept: usize,
    pub dropped_vectors: usize,
    pub dropped_labels: usize,
}

impl RepairReport {
    pub fn changed(&self) -> bool {
        self.dropped_vectors > 0 || self.dropped_labels > 0
    }
}

struct StoreInner {
    index: FlatIndex,
    labels: Vec<String>,
}

/// Durable mapping from face embeddings to identity labels.
///
/// A flat L2 index and a label list are kept in lockstep: label `i` names
/// the `i`-th vector ever added. Both only grow, and both are written to
/// disk after every enrollment.
///
/// Thread-safe: lookups share a read lock, enrollment takes the write lock
/// for the whole append-and-persist sequence.
pub struct IdentityStore {
    dim: usize,
    paths: Option<StorePaths>,
    inner: RwLock<StoreInner>,
}

impl IdentityStore {
    /// Opens the store persisted at `paths`.
    ///
    /// Missing artifacts count as empty. Fails if the index and label list
    /// disagree in count, if the index was built for another dimension, or
    /// if either artifact is malformed. Nothing is repaired here; see
    /// [`IdentityStore::repair`].
    pub fn load(paths: StorePaths, dim: usize) -> Result<Self, FaceIdError> {
        check_dim(dim)?;
        let index = read_index(&paths.index, dim)?.unwrap_or_else(|| FlatIndex::new(dim));
        let labels = read_labels(&paths.labels)?;

        if index.len() != labels.len() {
            return Err(FaceIdError::CountMismatch {
                index: index.len(),
                labels: labels.len(),
            });
        }

        info!(
            "identity store loaded from {} ({} identities, dim {})",
            paths.index.display(),
            labels.len(),
            dim
        );

        Ok(Self {
            dim,
            paths: Some(paths),
            inner: RwLock::new(StoreInner { index, labels }),
        })
    }

    /// Creates an empty store that is never written to disk.
    pub fn in_memory(dim: usize) -> Result<Self, FaceIdError> {
        check_dim(dim)?;
        Ok(Self {
            dim,
            paths: None,
            inner: RwLock::new(StoreInner {
                index: FlatIndex::new(dim),
                labels: Vec::new(),
            }),
        })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Artifact locations, or `None` for an in-memory store.
    pub fn paths(&self) -> Option<&StorePaths> {
        self.paths.as_ref()
    }

    /// Number of enrolled identities.
    pub fn len(&self) -> usize {
        self.inner.read().labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of all labels in enrollment order.
    pub fn labels(&self) -> Vec<String> {
        self.inner.read().labels.clone()
    }

    /// Returns the single nearest identity, or `None` when the store is empty.
    pub fn nearest(&self, query: &EmbeddingVector) -> Result<Option<Neighbor>, FaceIdError> {
        self.check_vector(query)?;
        self.inner.read().nearest(query)
    }

    /// Enrolls `vector` under a freshly generated identity and persists the
    /// store before returning it.
    ///
    /// If persisting fails the vector and label are taken back out, so no
    /// caller ever sees an identity that is not on disk.
    pub fn enroll(&self, vector: EmbeddingVector) -> Result<String, FaceIdError> {
        self.check_vector(&vector)?;
        self.inner.write().enroll(&vector, self.paths.as_ref())
    }

    /// Writes both artifacts under the write lock. No-op for an in-memory
    /// store.
    pub fn persist(&self) -> Result<(), FaceIdError> {
        match &self.paths {
            Some(paths) => {
                // Writers share the temp files, so persist excludes them too.
                let inner = self.inner.write();
                write_artifacts(paths, &inner.index, &inner.labels)
            }
            None => Ok(()),
        }
    }

    /// Recognizes `vector` or enrolls it.
    ///
    /// The policy is first applied under the read lock. On a miss it is
    /// applied again under the write lock, and `vector` is enrolled only if
    /// it is still unknown, so concurrent callers with the same new face
    /// see each other's enrollment instead of racing.
    pub fn resolve_or_enroll(
        &self,
        vector: EmbeddingVector,
        policy: &MatchPolicy,
    ) -> Result<Outcome, FaceIdError> {
        self.check_vector(&vector)?;
        if let Match::Known { identity, distance } = policy.classify(self.nearest(&vector)?) {
            debug!("recognized {} (distance {:.4})", identity, distance);
            return Ok(Outcome::Recognized { identity, distance });
        }

        let mut inner = self.inner.write();
        match policy.classify(inner.nearest(&vector)?) {
            Match::Known { identity, distance } => Ok(Outcome::Recognized { identity, distance }),
            Match::Unknown { .. } => {
                let identity = inner.enroll(&vector, self.paths.as_ref())?;
                Ok(Outcome::Enrolled { identity })
            }
        }
    }

    /// Operator repair for a store that fails to load with
    /// [`FaceIdError::CountMismatch`].
    ///
    /// Truncates both artifacts to the shorter of the two and rewrites them.
    /// Dimension errors and malformed artifacts are still reported, not
    /// repaired.
    pub fn repair(paths: &StorePaths, dim: usize) -> Result<RepairReport, FaceIdError> {
        let (mut index, mut labels, report) = read_for_repair(paths, dim)?;
        if !report.changed() {
            return Ok(report);
        }

        index.truncate(report.kept);
        labels.truncate(report.kept);
        write_artifacts(paths, &index, &labels)?;
        info!(
            "identity store repaired: kept {}, dropped {} vectors and {} labels",
            report.kept, report.dropped_vectors, report.dropped_labels
        );
        Ok(report)
    }

    /// Reports what [`IdentityStore::repair`] would drop without touching
    /// either artifact.
    pub fn plan_repair(paths: &StorePaths, dim: usize) -> Result<RepairReport, FaceIdError> {
        read_for_repair(paths, dim).map(|(_, _, report)| report)
    }

    fn check_vector(&self, v: &EmbeddingVector) -> Result<(), FaceIdError> {
        if v.dim() != self.dim {
            return Err(FaceIdError::DimensionMismatch {
                expected: self.dim,
                got: v.dim(),
            });
        }
        Ok(())
    }
}

impl StoreInner {
    fn nearest(&self, query: &EmbeddingVector) -> Result<Option<Neighbor>, FaceIdError> {
        let Some(m) = self.index.nearest(query.as_slice())? else {
            return Ok(None);
        };
        let identity = self.labels.get(m.position).cloned().ok_or_else(|| {
            FaceIdError::CountMismatch {
                index: self.index.len(),
                labels: self.labels.len(),
            }
        })?;
        Ok(Some(Neighbor {
            identity,
            distance: m.distance,
            position: m.position,
        }))
    }

    fn enroll(
        &mut self,
        vector: &EmbeddingVector,
        paths: Option<&StorePaths>,
    ) -> Result<String, FaceIdError> {
        let identity = Uuid::new_v4().to_string();
        let position = self.index.add(vector.as_slice())?;
        self.labels.push(identity.clone());

        if let Some(paths) = paths {
            if let Err(e) = write_artifacts(paths, &self.index, &self.labels) {
                self.index.truncate(position);
                self.labels.truncate(position);
                error!("enrollment rolled back, persist failed: {}", e);
                return Err(e);
            }
        }

        info!("enrolled {} at position {}", identity, position);
        Ok(identity)
    }
}

fn check_dim(dim: usize) -> Result<(), FaceIdError> {
    if dim == 0 {
        return Err(FaceIdError::InvalidConfig(
            "embedding dimension must be positive".into(),
        ));
    }
    Ok(())
}

fn read_index(path: &Path, dim: usize) -> Result<Option<FlatIndex>, FaceIdError> {
    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(FaceIdError::io(path, e)),
    };
    let index = facereid_vecstore::load(&mut file).map_err(|e| match e {
        VecError::InvalidFormat(reason) => FaceIdError::Corrupt {
            path: path.to_path_buf(),
            reason,
        },
        other => FaceIdError::Index(other),
    })?;
    if index.dim() != dim {
        return Err(FaceIdError::DimensionMismatch {
            expected: dim,
            got: index.dim(),
        });
    }
    for position in 0..index.len() {
        let norm = index.get(position).map(l2_norm).unwrap_or_default();
        if (norm - 1.0).abs() > UNIT_NORM_TOLERANCE {
            return Err(FaceIdError::Corrupt {
                path: path.to_path_buf(),
                reason: format!("vector {position} is not unit length (norm {norm:.6})"),
            });
        }
    }
    Ok(Some(index))
}

fn read_labels(path: &Path) -> Result<Vec<String>, FaceIdError> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(FaceIdError::io(path, e)),
    };
    content
        .lines()
        .enumerate()
        .map(|(i, line)| {
            let label = line.trim();
            if label.is_empty() {
                return Err(FaceIdError::Corrupt {
                    path: path.to_path_buf(),
                    reason: format!("blank label on line {}", i + 1),
                });
            }
            Ok(label.to_string())
        })
        .collect()
}

fn read_for_repair(
    paths: &StorePaths,
    dim: usize,
) -> Result<(FlatIndex, Vec<String>, RepairReport), FaceIdError> {
    check_dim(dim)?;
    let index = read_index(&paths.index, dim)?.unwrap_or_else(|| FlatIndex::new(dim));
    let labels = read_labels(&paths.labels)?;
    let kept = index.len().min(labels.len());
    let report = RepairReport {
        kept,
        dropped_vectors: index.len() - kept,
        dropped_labels: labels.len() - kept,
    };
    Ok((index, labels, report))
}

/// Writes both artifacts to temporary siblings, then renames them into
/// place, index first. A failure before the renames leaves the previous
/// artifacts untouched.
fn write_artifacts(
    paths: &StorePaths,
    index: &FlatIndex,
    labels: &[String],
) -> Result<(), FaceIdError> {
    let index_tmp = tmp_path(&paths.index);
    let labels_tmp = tmp_path(&paths.labels);

    let staged = write_synced(&index_tmp, |w| {
        facereid_vecstore::save(index, w).map_err(|e| std::io::Error::other(e.to_string()))
    })
    .and_then(|()| {
        write_synced(&labels_tmp, |w| {
            for label in labels {
                writeln!(w, "{label}")?;
            }
            Ok(())
        })
    });
    if let Err(e) = staged {
        let _ = fs::remove_file(&index_tmp);
        let _ = fs::remove_file(&labels_tmp);
        return Err(e);
    }

    fs::rename(&index_tmp, &paths.index).map_err(|e| FaceIdError::io(&paths.index, e))?;
    fs::rename(&labels_tmp, &paths.labels).map_err(|e| FaceIdError::io(&paths.labels, e))?;
    Ok(())
}

fn write_synced(
    path: &Path,
    fill: impl FnOnce(&mut dyn Write) -> std::io::Result<()>,
) -> Result<(), FaceIdError> {
    let file = File::create(path).map_err(|e| FaceIdError::io(path, e))?;
    let mut w = BufWriter::new(file);
    fill(&mut w).map_err(|e| FaceIdError::io(path, e))?;
    let file = w
        .into_inner()
        .map_err(|e| FaceIdError::io(path, e.into_error()))?;
    file.sync_all().map_err(|e| FaceIdError::io(path, e))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(dim: usize, axis: usize) -> EmbeddingVector {
        let mut v = vec![0.0; dim];
        v[axis] = 1.0;
        EmbeddingVector::normalize(v).unwrap()
    }

    fn paths_in(dir: &Path) -> StorePaths {
        StorePaths::from_index(dir.join("faces.idx")).unwrap()
    }

    #[test]
    fn labels_path_derived_from_index() {
        let p = StorePaths::from_index("/data/database.faiss").unwrap();
        assert_eq!(p.labels, PathBuf::from("/data/database.txt"));

        let p = StorePaths::from_index("/data/faces").unwrap();
        assert_eq!(p.labels, PathBuf::from("/data/faces.txt"));

        assert!(StorePaths::from_index("/data/faces.txt").is_err());
    }

    #[test]
    fn empty_store_has_no_nearest() {
        let store = IdentityStore::in_memory(4).unwrap();
        assert!(store.is_empty());
        assert!(store.nearest(&unit(4, 0)).unwrap().is_none());
    }

    #[test]
    fn zero_dim_rejected() {
        assert!(matches!(
            IdentityStore::in_memory(0),
            Err(FaceIdError::InvalidConfig(_))
        ));
    }

    #[test]
    fn enroll_pairs_labels_with_positions() {
        let store = IdentityStore::in_memory(4).unwrap();
        let ids: Vec<String> = (0..4).map(|i| store.enroll(unit(4, i)).unwrap()).collect();

        assert_eq!(store.len(), 4);
        assert_eq!(store.labels(), ids);
        for (i, id) in ids.iter().enumerate() {
            let n = store.nearest(&unit(4, i)).unwrap().unwrap();
            assert_eq!(&n.identity, id);
            assert_eq!(n.position, i);
            assert!(n.distance.abs() < 1e-6);
        }
    }

    #[test]
    fn enrolled_labels_are_uuids() {
        let store = IdentityStore::in_memory(2).unwrap();
        let a = store.enroll(unit(2, 0)).unwrap();
        let b = store.enroll(unit(2, 0)).unwrap();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
    }

    #[test]
    fn wrong_dimension_rejected() {
        let store = IdentityStore::in_memory(4).unwrap();
        assert!(matches!(
            store.enroll(unit(3, 0)),
            Err(FaceIdError::DimensionMismatch { expected: 4, got: 3 })
        ));
        assert!(store.nearest(&unit(3, 0)).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn load_missing_artifacts_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = IdentityStore::load(paths_in(dir.path()), 8).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.dim(), 8);
    }

    #[test]
    fn enroll_writes_both_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths_in(dir.path());
        let store = IdentityStore::load(paths.clone(), 3).unwrap();
        let a = store.enroll(unit(3, 0)).unwrap();
        let b = store.enroll(unit(3, 1)).unwrap();

        let labels = fs::read_to_string(&paths.labels).unwrap();
        assert_eq!(labels, format!("{a}\n{b}\n"));

        let idx = facereid_vecstore::load(&mut File::open(&paths.index).unwrap()).unwrap();
        assert_eq!(idx.len(), 2);
        assert_eq!(idx.get(1), Some(&[0.0, 1.0, 0.0][..]));

        assert!(!tmp_path(&paths.index).exists());
        assert!(!tmp_path(&paths.labels).exists());
    }

    #[test]
    fn load_rejects_count_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths_in(dir.path());
        {
            let store = IdentityStore::load(paths.clone(), 3).unwrap();
            store.enroll(unit(3, 0)).unwrap();
            store.enroll(unit(3, 1)).unwrap();
        }
        let labels = fs::read_to_string(&paths.labels).unwrap();
        let first = labels.lines().next().unwrap();
        fs::write(&paths.labels, format!("{first}\n")).unwrap();

        assert!(matches!(
            IdentityStore::load(paths.clone(), 3),
            Err(FaceIdError::CountMismatch { index: 2, labels: 1 })
        ));
        // Loading never modifies the artifacts.
        assert_eq!(fs::read_to_string(&paths.labels).unwrap(), format!("{first}\n"));
    }

    #[test]
    fn load_rejects_labels_without_index() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths_in(dir.path());
        fs::write(&paths.labels, "a\nb\n").unwrap();
        assert!(matches!(
            IdentityStore::load(paths, 3),
            Err(FaceIdError::CountMismatch { index: 0, labels: 2 })
        ));
    }

    #[test]
    fn load_rejects_other_dimension() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths_in(dir.path());
        IdentityStore::load(paths.clone(), 3)
            .unwrap()
            .enroll(unit(3, 0))
            .unwrap();

        assert!(matches!(
            IdentityStore::load(paths, 512),
            Err(FaceIdError::DimensionMismatch { expected: 512, got: 3 })
        ));
    }

    #[test]
    fn load_rejects_corrupt_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths_in(dir.path());
        fs::write(&paths.index, b"garbage").unwrap();
        assert!(matches!(
            IdentityStore::load(paths.clone(), 3),
            Err(FaceIdError::Corrupt { .. })
        ));

        fs::remove_file(&paths.index).unwrap();
        fs::write(&paths.labels, "a\n\nb\n").unwrap();
        assert!(matches!(
            IdentityStore::load(paths, 3),
            Err(FaceIdError::Corrupt { .. })
        ));
    }

    #[test]
    fn load_rejects_non_finite_index() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths_in(dir.path());
        let mut idx = FlatIndex::new(2);
        idx.add(&[f32::NAN, 0.0]).unwrap();
        idx.add(&[1.0, 0.0]).unwrap();
        facereid_vecstore::save(&idx, &mut File::create(&paths.index).unwrap()).unwrap();
        fs::write(&paths.labels, "a\nb\n").unwrap();

        assert!(matches!(
            IdentityStore::load(paths.clone(), 2),
            Err(FaceIdError::Corrupt { .. })
        ));
        assert!(matches!(
            IdentityStore::repair(&paths, 2),
            Err(FaceIdError::Corrupt { .. })
        ));
    }

    #[test]
    fn load_rejects_non_unit_index() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths_in(dir.path());
        let mut idx = FlatIndex::new(2);
        idx.add(&[1.0, 0.0]).unwrap();
        idx.add(&[3.0, 4.0]).unwrap();
        facereid_vecstore::save(&idx, &mut File::create(&paths.index).unwrap()).unwrap();
        fs::write(&paths.labels, "a\nb\n").unwrap();

        match IdentityStore::load(paths, 2) {
            Err(FaceIdError::Corrupt { reason, .. }) => assert!(reason.contains("vector 1"), "{reason}"),
            Err(e) => panic!("expected Corrupt, got {e:?}"),
            Ok(_) => panic!("expected Corrupt, store loaded"),
        }
    }

    #[test]
    fn concurrent_persist_is_serialized() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths_in(dir.path());
        let store = std::sync::Arc::new(IdentityStore::load(paths.clone(), 8).unwrap());
        let ids: Vec<String> = (0..64).map(|i| store.enroll(unit(8, i % 8)).unwrap()).collect();

        let threads: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || (0..20).filter(|_| store.persist().is_err()).count())
            })
            .collect();
        let failures: usize = threads.into_iter().map(|t| t.join().unwrap()).sum();
        assert_eq!(failures, 0);

        assert!(!tmp_path(&paths.index).exists());
        assert!(!tmp_path(&paths.labels).exists());
        let reloaded = IdentityStore::load(paths, 8).unwrap();
        assert_eq!(reloaded.labels(), ids);
    }

    #[test]
    fn labels_without_trailing_newline_load() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths_in(dir.path());
        let mut idx = FlatIndex::new(2);
        idx.add(&[1.0, 0.0]).unwrap();
        idx.add(&[0.0, 1.0]).unwrap();
        facereid_vecstore::save(&idx, &mut File::create(&paths.index).unwrap()).unwrap();
        fs::write(&paths.labels, "first\nsecond").unwrap();

        let store = IdentityStore::load(paths, 2).unwrap();
        assert_eq!(store.labels(), vec!["first", "second"]);
    }

    #[test]
    fn failed_persist_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        let paths = StorePaths::from_index(dir.path().join("missing").join("faces.idx")).unwrap();
        let store = IdentityStore::load(paths, 3).unwrap();

        let err = store.enroll(unit(3, 0)).unwrap_err();
        assert!(matches!(err, FaceIdError::Io { .. }));
        assert!(store.is_empty());
        assert!(store.nearest(&unit(3, 0)).unwrap().is_none());

        // The store stays usable once the directory exists.
        fs::create_dir(dir.path().join("missing")).unwrap();
        store.enroll(unit(3, 0)).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn repair_truncates_to_shorter_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths_in(dir.path());
        let ids = {
            let store = IdentityStore::load(paths.clone(), 3).unwrap();
            (0..3).map(|i| store.enroll(unit(3, i)).unwrap()).collect::<Vec<_>>()
        };
        // Simulate a crash after the index rename: labels lag by one.
        fs::write(&paths.labels, format!("{}\n{}\n", ids[0], ids[1])).unwrap();
        assert!(IdentityStore::load(paths.clone(), 3).is_err());

        let planned = IdentityStore::plan_repair(&paths, 3).unwrap();
        assert!(IdentityStore::load(paths.clone(), 3).is_err());

        let report = IdentityStore::repair(&paths, 3).unwrap();
        assert_eq!(report, planned);
        assert_eq!(
            report,
            RepairReport {
                kept: 2,
                dropped_vectors: 1,
                dropped_labels: 0
            }
        );

        let store = IdentityStore::load(paths.clone(), 3).unwrap();
        assert_eq!(store.labels(), ids[..2].to_vec());
        let n = store.nearest(&unit(3, 1)).unwrap().unwrap();
        assert_eq!(n.identity, ids[1]);

        let again = IdentityStore::repair(&paths, 3).unwrap();
        assert!(!again.changed());
    }

    #[test]
    fn persist_in_memory_is_noop() {
        let store = IdentityStore::in_memory(2).unwrap();
        store.enroll(unit(2, 1)).unwrap();
        store.persist().unwrap();
        assert!(store.paths().is_none());
    }
}
