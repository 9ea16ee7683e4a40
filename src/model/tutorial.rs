use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::Point;
use crate::foundation::error::{TourError, TourResult};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// A complete walkthrough configuration.
///
/// Tutorial data is immutable for the lifetime of a viewing session. It is usually loaded from
/// JSON (see [`TutorialData::from_path`]) and shared with the player by reference.
pub struct TutorialData {
    /// Free-form schema version string.
    #[serde(default)]
    pub version: String,
    /// Scheduled pauses, authored in strictly increasing time order.
    #[serde(default)]
    pub stop_points: Vec<StopPoint>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// A scheduled pause in playback bundling one or more interaction areas.
pub struct StopPoint {
    /// Stop identifier.
    pub id: String,
    /// Pause time in seconds.
    pub time: f64,
    /// Areas in authored order; presentation order is given by [`StopPoint::ordered_areas`].
    #[serde(default)]
    pub areas: Vec<InteractionArea>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// A highlighted region plus the annotation text shown while a stop point is active.
pub struct InteractionArea {
    /// Area identifier.
    pub id: String,
    /// Annotation text.
    #[serde(default)]
    pub text: String,
    /// Activation rank within the owning stop point (ascending).
    #[serde(default)]
    pub order: i64,
    /// When `true` only the explicit "next" control acknowledges this area.
    #[serde(default)]
    pub has_next_button: bool,
    /// Region geometry.
    #[serde(flatten)]
    pub shape: AreaShape,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
/// Region geometry of an interaction area, in normalized frame coordinates.
///
/// Box and oval payloads are optional and polygons may carry any number of points so that
/// malformed data still loads; the geometry resolver degrades such areas to an empty rect.
pub enum AreaShape {
    /// Axis-aligned rectangle.
    Box {
        /// Normalized bounds.
        #[serde(default, rename = "boundingBox", skip_serializing_if = "Option::is_none")]
        bounding_box: Option<BoundingBox>,
    },
    /// Ellipse inscribed in its bounding box.
    Oval {
        /// Normalized bounds.
        #[serde(default, rename = "boundingBox", skip_serializing_if = "Option::is_none")]
        bounding_box: Option<BoundingBox>,
    },
    /// Quadrilateral; well-formed polygons carry exactly [`POLYGON_POINTS`] points.
    Polygon {
        /// Corner points in drawing order.
        #[serde(default)]
        points: Vec<Point>,
    },
}

/// Number of corners of a well-formed polygon area.
pub const POLYGON_POINTS: usize = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Normalized rectangle, origin top-left.
pub struct BoundingBox {
    /// Left edge in `0..1`.
    pub x: f64,
    /// Top edge in `0..1`.
    pub y: f64,
    /// Width in `0..1`.
    pub width: f64,
    /// Height in `0..1`.
    pub height: f64,
}

impl AreaShape {
    /// Lower-case shape tag, as used on the wire.
    pub fn kind_str(&self) -> &'static str {
        match self {
            Self::Box { .. } => "box",
            Self::Oval { .. } => "oval",
            Self::Polygon { .. } => "polygon",
        }
    }
}

impl StopPoint {
    /// Areas in presentation order: ascending `order`, ties broken by authored position.
    pub fn ordered_areas(&self) -> Vec<&InteractionArea> {
        let mut areas: Vec<(usize, &InteractionArea)> = self.areas.iter().enumerate().collect();
        areas.sort_by_key(|(idx, area)| (area.order, *idx));
        areas.into_iter().map(|(_, a)| a).collect()
    }

    /// The area shown at presentation index `idx`, if any.
    pub fn area_at(&self, idx: usize) -> Option<&InteractionArea> {
        self.ordered_areas().get(idx).copied()
    }
}

impl TutorialData {
    /// Parse tutorial data from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> TourResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| TourError::serde(format!("parse tutorial JSON: {e}")))
    }

    /// Parse tutorial data from a JSON string.
    pub fn from_json_str(s: &str) -> TourResult<Self> {
        serde_json::from_str(s).map_err(|e| TourError::serde(format!("parse tutorial JSON: {e}")))
    }

    /// Parse tutorial data from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> TourResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            TourError::validation(format!("open tutorial JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Validate structural invariants, reporting every violation with its JSON path.
    pub fn validate(&self) -> TourResult<()> {
        crate::model::validate::validate_tutorial(self)
            .map_err(|e| TourError::validation(format!("tutorial validation failed: {e}")))
    }

    /// Stop times in authored order.
    pub fn stop_times(&self) -> Vec<f64> {
        self.stop_points.iter().map(|s| s.time).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/tutorial.rs"]
mod tests;
