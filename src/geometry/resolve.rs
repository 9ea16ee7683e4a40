use kurbo::Shape as _;

use crate::foundation::core::{BezPath, Ellipse, Point, Rect, Size};
use crate::model::tutorial::{AreaShape, BoundingBox, InteractionArea, POLYGON_POINTS};

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
/// Frame-relative rectangle in percent (`0..100`), origin top-left.
pub struct PercentRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PercentRect {
    /// The degenerate rect returned for malformed areas.
    pub const ZERO: Self = Self {
        left: 0.0,
        top: 0.0,
        width: 0.0,
        height: 0.0,
    };

    fn from_normalized(bb: &BoundingBox) -> Self {
        Self {
            left: bb.x * 100.0,
            top: bb.y * 100.0,
            width: bb.width * 100.0,
            height: bb.height * 100.0,
        }
    }

    /// `true` for zero-size rects (malformed areas and centroid anchors).
    pub fn is_degenerate(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }

    /// Horizontal and vertical centre in percent.
    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width * 0.5, self.top + self.height * 0.5)
    }

    /// Scale into pixel space for a container of the given size.
    pub fn to_pixels(&self, container: Size) -> Rect {
        let sx = container.width / 100.0;
        let sy = container.height / 100.0;
        Rect::new(
            self.left * sx,
            self.top * sy,
            (self.left + self.width) * sx,
            (self.top + self.height) * sy,
        )
    }
}

/// Placement rectangle of an area: the stored box for box/oval areas, the axis-aligned bounds of
/// the corners for polygons. Malformed areas resolve to [`PercentRect::ZERO`].
pub fn resolve_area_rect(area: &InteractionArea) -> PercentRect {
    match &area.shape {
        AreaShape::Box { bounding_box } | AreaShape::Oval { bounding_box } => bounding_box
            .as_ref()
            .map(PercentRect::from_normalized)
            .unwrap_or(PercentRect::ZERO),
        AreaShape::Polygon { points } => {
            let Some(points) = well_formed_polygon(points) else {
                return PercentRect::ZERO;
            };
            let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
            let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
            for p in points {
                min_x = min_x.min(p.x);
                min_y = min_y.min(p.y);
                max_x = max_x.max(p.x);
                max_y = max_y.max(p.y);
            }
            PercentRect {
                left: min_x * 100.0,
                top: min_y * 100.0,
                width: (max_x - min_x) * 100.0,
                height: (max_y - min_y) * 100.0,
            }
        }
    }
}

/// Bubble target of an area. Polygons anchor on the mean of their corners as a zero-size rect;
/// box and oval areas anchor on their full rect.
pub fn resolve_anchor(area: &InteractionArea) -> PercentRect {
    match &area.shape {
        AreaShape::Polygon { points } => {
            let Some(points) = well_formed_polygon(points) else {
                return PercentRect::ZERO;
            };
            let n = points.len() as f64;
            let (sx, sy) = points
                .iter()
                .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
            PercentRect {
                left: sx / n * 100.0,
                top: sy / n * 100.0,
                width: 0.0,
                height: 0.0,
            }
        }
        AreaShape::Box { .. } | AreaShape::Oval { .. } => resolve_area_rect(area),
    }
}

fn well_formed_polygon(points: &[Point]) -> Option<&[Point]> {
    if points.len() != POLYGON_POINTS {
        tracing::warn!(
            count = points.len(),
            "polygon area has wrong point count; rendering nothing"
        );
        return None;
    }
    Some(points)
}

#[derive(Clone, Debug, PartialEq)]
/// Pixel-space outline of a highlighted region.
pub enum HighlightShape {
    /// Rectangular cut-out.
    Rect(Rect),
    /// Elliptical cut-out inscribed in the area's box.
    Oval(Ellipse),
    /// Closed quadrilateral outline.
    Polygon(BezPath),
}

impl HighlightShape {
    /// Axis-aligned pixel bounds of the outline.
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Rect(r) => *r,
            Self::Oval(e) => e.bounding_box(),
            Self::Polygon(p) => p.bounding_box(),
        }
    }

    /// Whether a pixel-space point lies inside the outline.
    pub fn contains(&self, pt: Point) -> bool {
        match self {
            Self::Rect(r) => r.contains(pt),
            Self::Oval(e) => e.contains(pt),
            Self::Polygon(p) => p.contains(pt),
        }
    }
}

/// Build the pixel-space outline of `area` for a container of the given size.
///
/// Returns `None` for malformed areas (missing box, wrong polygon point count).
pub fn highlight_shape(area: &InteractionArea, container: Size) -> Option<HighlightShape> {
    match &area.shape {
        AreaShape::Box { bounding_box } => {
            let bb = bounding_box.as_ref()?;
            Some(HighlightShape::Rect(
                PercentRect::from_normalized(bb).to_pixels(container),
            ))
        }
        AreaShape::Oval { bounding_box } => {
            let bb = bounding_box.as_ref()?;
            let rect = PercentRect::from_normalized(bb).to_pixels(container);
            Some(HighlightShape::Oval(Ellipse::from_rect(rect)))
        }
        AreaShape::Polygon { points } => {
            let points = well_formed_polygon(points)?;
            let mut path = BezPath::new();
            for (i, p) in points.iter().enumerate() {
                let px = Point::new(p.x * container.width, p.y * container.height);
                if i == 0 {
                    path.move_to(px);
                } else {
                    path.line_to(px);
                }
            }
            path.close_path();
            Some(HighlightShape::Polygon(path))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/resolve.rs"]
mod tests;
