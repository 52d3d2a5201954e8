use crate::error::FaceIdError;
use crate::image::{BoundingBox, Frame};

/// Detections scoring below this are ignored.
pub const DEFAULT_MIN_FACE_SCORE: f32 = 0.5;

/// One face candidate reported by a detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub bbox: BoundingBox,
    /// Detector confidence in `[0, 1]`.
    pub score: f32,
}

/// Localizes faces in a frame.
///
/// Implementations report every candidate they find; [`largest_face`]
/// applies the single-face policy.
pub trait FaceDetector: Send + Sync {
    fn detect(&self, frame: &Frame) -> Result<Vec<Detection>, FaceIdError>;
}

/// Picks the face to process: among detections scoring at least
/// `min_score`, the one with the largest box area. The earliest detection
/// wins a tie.
pub fn largest_face(detections: &[Detection], min_score: f32) -> Option<BoundingBox> {
    let mut best: Option<&Detection> = None;
    for d in detections.iter().filter(|d| d.score >= min_score) {
        if best.is_none_or(|b| d.bbox.area() > b.bbox.area()) {
            best = Some(d);
        }
    }
    best.map(|d| d.bbox)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn det(x1: i32, y1: i32, x2: i32, y2: i32, score: f32) -> Detection {
        Detection {
            bbox: BoundingBox::new(x1, y1, x2, y2),
            score,
        }
    }

    #[test]
    fn picks_largest_area() {
        let dets = [
            det(0, 0, 10, 10, 0.9),
            det(0, 0, 30, 20, 0.8),
            det(0, 0, 20, 20, 0.99),
        ];
        assert_eq!(largest_face(&dets, 0.5), Some(BoundingBox::new(0, 0, 30, 20)));
    }

    #[test]
    fn filters_low_scores() {
        let dets = [det(0, 0, 100, 100, 0.49), det(0, 0, 10, 10, 0.5)];
        assert_eq!(largest_face(&dets, 0.5), Some(BoundingBox::new(0, 0, 10, 10)));
        assert_eq!(largest_face(&dets[..1], 0.5), None);
    }

    #[test]
    fn tie_keeps_first() {
        let dets = [det(0, 0, 10, 10, 0.9), det(50, 50, 60, 60, 0.9)];
        assert_eq!(largest_face(&dets, 0.5), Some(BoundingBox::new(0, 0, 10, 10)));
    }

    #[test]
    fn empty() {
        assert_eq!(largest_face(&[], DEFAULT_MIN_FACE_SCORE), None);
    }
}
