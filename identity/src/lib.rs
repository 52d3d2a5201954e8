//! Face re-identification over a persistent flat L2 index.
//!
//! # Architecture
//!
//! A face crop moves through four stages:
//!
//! 1. [`FaceEmbedder::extract`]: face crop -> raw embedding
//! 2. [`EmbeddingVector::normalize`]: raw embedding -> unit vector
//! 3. [`MatchPolicy::resolve`]: unit vector -> nearest identity, accepted
//!    only if its distance is strictly below the threshold
//! 4. [`IdentityStore::enroll`]: unknown faces get a fresh UUID label,
//!    persisted before it is returned
//!
//! [`IdentityResolver`] wires these together; [`Pipeline`] adds the frame
//! loop around it (frame source, largest-face detection, outcome sink).
//!
//! # Persistence
//!
//! A store is two files side by side: the binary index (`faces.idx`) and
//! the label list (`faces.txt`), line `i` naming vector `i`. Both are
//! rewritten after every enrollment. A count mismatch on load is fatal;
//! [`IdentityStore::repair`] is the explicit way out.
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use facereid_identity::{FaceEmbedder, IdentityResolver, IdentityStore, MatchPolicy, StorePaths};
//!
//! # fn run(embedder: Arc<dyn FaceEmbedder>, face: facereid_identity::FaceImage) -> Result<(), facereid_identity::FaceIdError> {
//! let paths = StorePaths::from_index("data/faces.idx")?;
//! let store = Arc::new(IdentityStore::load(paths, embedder.dimension())?);
//! let resolver = IdentityResolver::new(store, embedder, MatchPolicy::default())?;
//!
//! let outcome = resolver.process(&face)?;
//! println!("{} new={}", outcome.identity(), outcome.is_new());
//! # Ok(())
//! # }
//! ```

mod detector;
mod embedding;
mod error;
mod image;
mod model;
mod pipeline;
mod policy;
mod resolver;
mod sender;
mod store;

pub use detector::{largest_face, Detection, FaceDetector, DEFAULT_MIN_FACE_SCORE};
pub use embedding::EmbeddingVector;
pub use error::FaceIdError;
pub use image::{BoundingBox, FaceImage, Frame, Image};
pub use model::FaceEmbedder;
pub use pipeline::{FrameSource, Pipeline, PipelineStats, SkipReason, Step};
pub use policy::{Match, MatchPolicy, DEFAULT_THRESHOLD};
pub use resolver::{IdentityResolver, Outcome};
pub use sender::{MemorySink, NopSink, OutcomeRecord, OutcomeSink, TcpSink, DEFAULT_SINK_ADDR};
pub use store::{IdentityStore, Neighbor, RepairReport, StorePaths, LABELS_EXTENSION};
