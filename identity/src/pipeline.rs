use std::sync::Arc;

use tracing::{debug, warn};

use crate::detector::{largest_face, FaceDetector, DEFAULT_MIN_FACE_SCORE};
use crate::error::FaceIdError;
use crate::image::{BoundingBox, Frame};
use crate::resolver::{IdentityResolver, Outcome};
use crate::sender::OutcomeSink;

/// Supplies video frames on demand.
pub trait FrameSource: Send {
    /// Returns the next frame, or `None` if none is available right now.
    /// An `Err` means the source itself is broken.
    fn next_frame(&mut self) -> Result<Option<Frame>, FaceIdError>;
}

/// Why a cycle produced no outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoFrame,
    NoFace,
    /// The chosen face box lies entirely outside the frame.
    EmptyCrop,
}

/// Result of one [`Pipeline::step`].
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Skipped(SkipReason),
    Resolved { face: BoundingBox, outcome: Outcome },
}

/// Counters over the steps a pipeline has taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub skipped: u64,
    pub recognized: u64,
    pub enrolled: u64,
    pub send_failures: u64,
}

/// One camera's frame loop: frame -> largest face -> identity -> sink.
pub struct Pipeline<S> {
    source: S,
    detector: Arc<dyn FaceDetector>,
    resolver: IdentityResolver,
    sink: Arc<dyn OutcomeSink>,
    min_face_score: f32,
    stats: PipelineStats,
}

impl<S: FrameSource> Pipeline<S> {
    pub fn new(
        source: S,
        detector: Arc<dyn FaceDetector>,
        resolver: IdentityResolver,
        sink: Arc<dyn OutcomeSink>,
    ) -> Self {
        Self {
            source,
            detector,
            resolver,
            sink,
            min_face_score: DEFAULT_MIN_FACE_SCORE,
            stats: PipelineStats::default(),
        }
    }

    pub fn with_min_face_score(mut self, score: f32) -> Self {
        self.min_face_score = score;
        self
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    pub fn resolver(&self) -> &IdentityResolver {
        &self.resolver
    }

    /// Processes one frame.
    ///
    /// A missing frame or face is a skip, not an error. Source, detector
    /// and resolver errors are returned so the caller can choose between
    /// skipping the frame and stopping. Sink failures are logged only.
    pub fn step(&mut self) -> Result<Step, FaceIdError> {
        let Some(frame) = self.source.next_frame()? else {
            return Ok(self.skip(SkipReason::NoFrame));
        };

        let detections = self.detector.detect(&frame)?;
        let Some(face) = largest_face(&detections, self.min_face_score) else {
            return Ok(self.skip(SkipReason::NoFace));
        };
        let Some(crop) = frame.crop(&face) else {
            return Ok(self.skip(SkipReason::EmptyCrop));
        };

        let outcome = self.resolver.process(&crop)?;
        if outcome.is_new() {
            self.stats.enrolled += 1;
        } else {
            self.stats.recognized += 1;
        }

        if let Err(e) = self.sink.send(&outcome.to_record()) {
            self.stats.send_failures += 1;
            warn!("failed to send outcome for {}: {}", outcome.identity(), e);
        }

        Ok(Step::Resolved { face, outcome })
    }

    fn skip(&mut self, reason: SkipReason) -> Step {
        debug!("frame skipped: {:?}", reason);
        self.stats.skipped += 1;
        Step::Skipped(reason)
    }
}
