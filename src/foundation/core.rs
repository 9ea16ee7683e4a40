use crate::foundation::error::{TourError, TourResult};

pub use kurbo::{BezPath, Ellipse, Point, Rect, Size, Vec2};

/// Natural aspect ratio of the loaded video, learned from the first decoded frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AspectRatio {
    pub width: u32,
    pub height: u32, // must be > 0
}

impl AspectRatio {
    pub fn new(width: u32, height: u32) -> TourResult<Self> {
        if width == 0 || height == 0 {
            return Err(TourError::validation(
                "aspect ratio width/height must be > 0",
            ));
        }
        Ok(Self { width, height })
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// Frame size when the video is laid out at `width` pixels.
    pub fn frame_size_for_width(self, width: f64) -> Size {
        let width = width.max(0.0);
        Size::new(width, width / self.as_f64())
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self {
            width: 16,
            height: 9,
        }
    }
}

/// Clamp the start of a `len`-long span so it stays within `[0, container - len]`.
///
/// When the span is larger than the container the start pins to 0.
pub(crate) fn clamp_span(start: f64, len: f64, container: f64) -> f64 {
    let max = (container - len).max(0.0);
    start.clamp(0.0, max)
}
