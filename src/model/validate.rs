use std::collections::HashSet;
use std::fmt;

use crate::model::tutorial::{AreaShape, BoundingBox, POLYGON_POINTS, TutorialData};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SchemaPathElem {
    Field(&'static str),
    Index(usize),
}

#[derive(Debug, Clone)]
pub(crate) struct SchemaError {
    pub(crate) path: Vec<SchemaPathElem>,
    pub(crate) message: String,
}

impl SchemaError {
    fn at(path: &[SchemaPathElem], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "{}", self.message);
        }
        write!(f, "{}: {}", format_path(&self.path), self.message)
    }
}

fn format_path(path: &[SchemaPathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match *p {
            SchemaPathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            SchemaPathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

#[derive(Debug, Clone)]
pub(crate) struct SchemaErrors {
    pub(crate) errors: Vec<SchemaError>,
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

pub(crate) fn validate_tutorial(data: &TutorialData) -> Result<(), SchemaErrors> {
    use SchemaPathElem::{Field, Index};

    let mut errors = Vec::new();
    let mut prev_time: Option<f64> = None;
    let mut stop_ids = HashSet::new();

    for (si, stop) in data.stop_points.iter().enumerate() {
        let stop_path = [Field("stopPoints"), Index(si)];

        if stop.id.trim().is_empty() {
            errors.push(SchemaError::at(&stop_path, "id must be non-empty"));
        } else if !stop_ids.insert(stop.id.as_str()) {
            errors.push(SchemaError::at(
                &stop_path,
                format!("duplicate stop point id '{}'", stop.id),
            ));
        }

        let time_path = [Field("stopPoints"), Index(si), Field("time")];
        if !stop.time.is_finite() || stop.time < 0.0 {
            errors.push(SchemaError::at(&time_path, "must be finite and >= 0"));
        } else {
            if let Some(prev) = prev_time
                && stop.time <= prev
            {
                errors.push(SchemaError::at(
                    &time_path,
                    format!("must be strictly greater than previous stop time {prev}"),
                ));
            }
            prev_time = Some(stop.time);
        }

        if stop.areas.is_empty() {
            errors.push(SchemaError::at(
                &[Field("stopPoints"), Index(si), Field("areas")],
                "must contain at least one area",
            ));
        }

        let mut orders = HashSet::new();
        for (ai, area) in stop.areas.iter().enumerate() {
            let area_path = [
                Field("stopPoints"),
                Index(si),
                Field("areas"),
                Index(ai),
            ];
            if area.id.trim().is_empty() {
                errors.push(SchemaError::at(&area_path, "id must be non-empty"));
            }
            if !orders.insert(area.order) {
                errors.push(SchemaError::at(
                    &[
                        Field("stopPoints"),
                        Index(si),
                        Field("areas"),
                        Index(ai),
                        Field("order"),
                    ],
                    format!("duplicate order {} within stop point", area.order),
                ));
            }

            match &area.shape {
                AreaShape::Box { bounding_box } | AreaShape::Oval { bounding_box } => {
                    let mut bb_path = area_path.to_vec();
                    bb_path.push(Field("boundingBox"));
                    match bounding_box {
                        None => errors.push(SchemaError::at(
                            &bb_path,
                            format!("required for '{}' areas", area.shape.kind_str()),
                        )),
                        Some(bb) => validate_bounding_box(bb, &bb_path, &mut errors),
                    }
                }
                AreaShape::Polygon { points } => {
                    let mut pts_path = area_path.to_vec();
                    pts_path.push(Field("points"));
                    if points.len() != POLYGON_POINTS {
                        errors.push(SchemaError::at(
                            &pts_path,
                            format!(
                                "polygon must have exactly {POLYGON_POINTS} points, got {}",
                                points.len()
                            ),
                        ));
                    }
                    for (pi, p) in points.iter().enumerate() {
                        if !in_unit(p.x) || !in_unit(p.y) {
                            let mut p_path = pts_path.clone();
                            p_path.push(Index(pi));
                            errors.push(SchemaError::at(
                                &p_path,
                                "coordinates must be finite and within 0..1",
                            ));
                        }
                    }
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(SchemaErrors { errors })
    }
}

fn validate_bounding_box(bb: &BoundingBox, path: &[SchemaPathElem], errors: &mut Vec<SchemaError>) {
    if !in_unit(bb.x) || !in_unit(bb.y) {
        errors.push(SchemaError::at(path, "x/y must be finite and within 0..1"));
    }
    if !bb.width.is_finite() || !bb.height.is_finite() || bb.width < 0.0 || bb.height < 0.0 {
        errors.push(SchemaError::at(path, "width/height must be finite and >= 0"));
    } else if bb.x + bb.width > 1.0 + f64::EPSILON || bb.y + bb.height > 1.0 + f64::EPSILON {
        errors.push(SchemaError::at(path, "box must lie within the frame"));
    }
}

fn in_unit(v: f64) -> bool {
    v.is_finite() && (0.0..=1.0).contains(&v)
}

#[cfg(test)]
#[path = "../../tests/unit/model/validate.rs"]
mod tests;
