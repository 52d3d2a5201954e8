use crate::error::FaceIdError;

/// An interleaved 8-bit image, row-major, `channels` bytes per pixel.
#[derive(Clone, PartialEq, Eq)]
pub struct Image {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub data: Vec<u8>,
}

/// A full frame from the video source.
pub type Frame = Image;

/// A face region cut out of a [`Frame`].
pub type FaceImage = Image;

/// Axis-aligned box in pixel coordinates; `(x1, y1)` inclusive,
/// `(x2, y2)` exclusive. Detectors may report coordinates outside the
/// frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl BoundingBox {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Area in pixels; zero for an inverted or degenerate box.
    pub fn area(&self) -> i64 {
        let w = (self.x2 as i64 - self.x1 as i64).max(0);
        let h = (self.y2 as i64 - self.y1 as i64).max(0);
        w * h
    }
}

impl Image {
    pub fn new(
        width: usize,
        height: usize,
        channels: usize,
        data: Vec<u8>,
    ) -> Result<Self, FaceIdError> {
        let want = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(channels))
            .ok_or_else(|| FaceIdError::InvalidConfig("image size overflows".into()))?;
        if channels == 0 || data.len() != want {
            return Err(FaceIdError::InvalidConfig(format!(
                "image {width}x{height}x{channels} needs {want} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Copies the region under `bbox`, clamped to the image bounds.
    /// Returns `None` when nothing of the box lies inside the image.
    pub fn crop(&self, bbox: &BoundingBox) -> Option<Image> {
        let clamp_x = |v: i32| (v.max(0) as usize).min(self.width);
        let clamp_y = |v: i32| (v.max(0) as usize).min(self.height);
        let (x1, x2) = (clamp_x(bbox.x1), clamp_x(bbox.x2));
        let (y1, y2) = (clamp_y(bbox.y1), clamp_y(bbox.y2));
        if x2 <= x1 || y2 <= y1 {
            return None;
        }

        let row = self.width * self.channels;
        let mut data = Vec::with_capacity((x2 - x1) * (y2 - y1) * self.channels);
        for y in y1..y2 {
            let start = y * row + x1 * self.channels;
            let end = y * row + x2 * self.channels;
            data.extend_from_slice(&self.data[start..end]);
        }
        Some(Image {
            width: x2 - x1,
            height: y2 - y1,
            channels: self.channels,
            data,
        })
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channels", &self.channels)
            .finish()
    }
}
