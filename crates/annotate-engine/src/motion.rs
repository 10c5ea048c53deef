//! Mechanical-movement descriptors: normalization of the raw,
//! kind-dependent direction/limit inputs, and the per-kind placement
//! strategies that turn a descriptor into arcs and arrows.

use serde::{Deserialize, Serialize};
use tracing::warn;

use geom_bridge::{GeometryProvider, StrokePath};
use redline_types::{
    default_axis, default_pivot, vec3, AnchorSpec, MotionDirections, MotionKind, MotionRecord,
    MotionStyle, SpinDir, Vec3, DOWN, UP,
};

use crate::types::{AnnotateError, MotionCall};

/// Arc polyline sampling step, in degrees.
const ARC_STEP_DEG: f64 = 10.0;

/// Raw, user-supplied movement descriptor. Normalization validates the
/// kind-dependent fields and fills defaults, producing a `MotionRecord`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionSpec {
    pub kind: MotionKind,
    pub directions: Option<MotionDirections>,
    pub limit: Option<f64>,
    pub axis: Option<Vec3>,
    pub pivot: Option<AnchorSpec>,
    pub pivot_radius: Option<f64>,
    pub style: MotionStyle,
}

impl MotionSpec {
    pub fn new(kind: MotionKind) -> Self {
        Self {
            kind,
            directions: None,
            limit: None,
            axis: None,
            pivot: None,
            pivot_radius: None,
            style: MotionStyle::default(),
        }
    }

    pub fn with_directions(mut self, directions: MotionDirections) -> Self {
        self.directions = Some(directions);
        self
    }

    pub fn with_limit(mut self, limit: f64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_pivot(mut self, pivot: AnchorSpec) -> Self {
        self.pivot = Some(pivot);
        self
    }

    /// Validate and fill defaults.
    ///
    /// Rotational/oscillatory: spin senses only, duplicates are a usage
    /// error, the limit defaults to a full turn and is clamped to
    /// [0, 360] with a warning. Oscillatory movement always swings both
    /// ways, whatever was supplied. Lateral/reciprocal: one or two
    /// travel vectors; a lone reciprocal vector is paired with its
    /// mirror opposite.
    pub fn normalize(&self, warnings: &mut Vec<String>) -> Result<MotionRecord, AnnotateError> {
        match self.kind {
            MotionKind::Rotational | MotionKind::Oscillatory => self.normalize_spin(warnings),
            MotionKind::Lateral | MotionKind::Reciprocal => self.normalize_linear(warnings),
        }
    }

    fn normalize_spin(&self, warnings: &mut Vec<String>) -> Result<MotionRecord, AnnotateError> {
        let mut limit = self.limit.unwrap_or(360.0);
        if !(0.0..=360.0).contains(&limit) {
            warn!(limit, "rotation limit out of range, clamping to [0, 360]");
            warnings.push(format!("rotation limit {} clamped to [0, 360]", limit));
            limit = limit.clamp(0.0, 360.0);
        }

        let dirs = match &self.directions {
            None => vec![SpinDir::Cw],
            Some(MotionDirections::Spin { dirs }) => {
                for (i, dir) in dirs.iter().enumerate() {
                    if dirs[..i].contains(dir) {
                        return Err(AnnotateError::DuplicateDirection { dir: *dir });
                    }
                }
                dirs.clone()
            }
            Some(MotionDirections::Linear { .. }) => {
                return Err(AnnotateError::DirectionKind { kind: self.kind });
            }
        };
        let dirs = if self.kind == MotionKind::Oscillatory {
            vec![SpinDir::Cw, SpinDir::Ccw]
        } else {
            dirs
        };

        Ok(MotionRecord {
            kind: self.kind,
            directions: MotionDirections::Spin { dirs },
            limit,
            axis: self.axis.unwrap_or_else(default_axis),
            pivot: self.pivot.clone().unwrap_or_else(default_pivot),
            pivot_radius: self.pivot_radius,
            style: self.style.clone(),
        })
    }

    fn normalize_linear(&self, warnings: &mut Vec<String>) -> Result<MotionRecord, AnnotateError> {
        let mut limit = self.limit.unwrap_or(0.0);
        if limit < 0.0 {
            warn!(limit, "negative travel limit, clamping to 0");
            warnings.push(format!("travel limit {} clamped to 0", limit));
            limit = 0.0;
        }

        let vectors = match &self.directions {
            None => match self.kind {
                MotionKind::Lateral => vec![UP],
                _ => vec![UP, DOWN],
            },
            Some(MotionDirections::Linear { dirs }) => {
                if dirs.len() > 2 {
                    return Err(AnnotateError::DirectionCount {
                        kind: self.kind,
                        max: 2,
                        got: dirs.len(),
                    });
                }
                if dirs.is_empty() {
                    return Err(AnnotateError::DirectionCount {
                        kind: self.kind,
                        max: 2,
                        got: 0,
                    });
                }
                let mut vectors: Vec<Vec3> = dirs.iter().map(|d| vec3::normalize(*d)).collect();
                if self.kind == MotionKind::Reciprocal && vectors.len() == 1 {
                    vectors.push(vec3::neg(vectors[0]));
                }
                vectors
            }
            Some(MotionDirections::Spin { .. }) => {
                return Err(AnnotateError::DirectionKind { kind: self.kind });
            }
        };

        Ok(MotionRecord {
            kind: self.kind,
            directions: MotionDirections::Linear { dirs: vectors },
            limit,
            axis: self.axis.unwrap_or_else(default_axis),
            pivot: self.pivot.clone().unwrap_or_else(default_pivot),
            pivot_radius: self.pivot_radius,
            style: self.style.clone(),
        })
    }
}

/// Render the ambient movement descriptor against the current shape.
/// Returns the number of primitives emitted.
pub fn render_motion(
    record: &MotionRecord,
    call: &MotionCall,
    shape: &redline_types::ShapeDesc,
    origin: Vec3,
    provider: &mut dyn GeometryProvider,
) -> Result<usize, AnnotateError> {
    let pivot = provider.resolve_anchor(shape, &record.pivot)?;
    let pivot_pos = vec3::add(origin, pivot.position);
    let extents = provider.bounding_extents(shape);

    match record.kind {
        MotionKind::Rotational => {
            let radius = record
                .pivot_radius
                .unwrap_or(max_extent(extents) * 0.5 + record.style.offset);
            let mut emitted = emit_arc(record, pivot_pos, radius, provider)?;
            emitted += emit_axis_line(record, pivot_pos, extents, provider)?;
            Ok(emitted)
        }
        MotionKind::Oscillatory => {
            // The swing radius comes from the placement anchor when one
            // is named; the indicator hugs that feature.
            let radius = match &record.style.placement {
                Some(placement) => {
                    let anchor = provider.resolve_anchor(shape, &placement.anchor)?;
                    vec3::length(vec3::sub(anchor.position, pivot.position))
                }
                None => record
                    .pivot_radius
                    .unwrap_or(max_extent(extents) * 0.5 + record.style.offset),
            };
            emit_arc(record, pivot_pos, radius, provider)
        }
        MotionKind::Lateral | MotionKind::Reciprocal => {
            emit_travel_arrows(record, call, pivot_pos, extents, provider)
        }
    }
}

fn max_extent(extents: Vec3) -> f64 {
    extents[0].max(extents[1]).max(extents[2])
}

/// Bounding extent measured along an arbitrary direction.
fn extent_along(extents: Vec3, dir: Vec3) -> f64 {
    let d = vec3::normalize(dir);
    (extents[0] * d[0]).abs() + (extents[1] * d[1]).abs() + (extents[2] * d[2]).abs()
}

fn emit_arc(
    record: &MotionRecord,
    pivot_pos: Vec3,
    radius: f64,
    provider: &mut dyn GeometryProvider,
) -> Result<usize, AnnotateError> {
    let sweep = record.limit.max(ARC_STEP_DEG);
    let u = vec3::perpendicular(record.axis);
    let v = vec3::cross(vec3::normalize(record.axis), u);

    let steps = (sweep / ARC_STEP_DEG).ceil() as usize;
    let mut points = Vec::with_capacity(steps + 1);
    for i in 0..=steps {
        let theta = (sweep * i as f64 / steps as f64 + record.style.spin).to_radians();
        let offset = vec3::add(
            vec3::scale(u, radius * theta.cos()),
            vec3::scale(v, radius * theta.sin()),
        );
        points.push(vec3::add(pivot_pos, offset));
    }

    let (cw, ccw) = match &record.directions {
        MotionDirections::Spin { dirs } => {
            (dirs.contains(&SpinDir::Cw), dirs.contains(&SpinDir::Ccw))
        }
        MotionDirections::Linear { .. } => (false, false),
    };

    let stroke = StrokePath::line(points, record.style.thickness).with_arrows(ccw, cw);
    provider.emit_stroke(&stroke)?;
    Ok(1)
}

fn emit_axis_line(
    record: &MotionRecord,
    pivot_pos: Vec3,
    extents: Vec3,
    provider: &mut dyn GeometryProvider,
) -> Result<usize, AnnotateError> {
    let axis = vec3::normalize(record.axis);
    let half = extent_along(extents, axis) * 0.6 + record.style.offset;
    let stroke = StrokePath::line(
        vec![
            vec3::add(pivot_pos, vec3::scale(axis, -half)),
            vec3::add(pivot_pos, vec3::scale(axis, half)),
        ],
        record.style.thickness,
    )
    .dashed();
    provider.emit_stroke(&stroke)?;
    Ok(1)
}

fn emit_travel_arrows(
    record: &MotionRecord,
    call: &MotionCall,
    pivot_pos: Vec3,
    extents: Vec3,
    provider: &mut dyn GeometryProvider,
) -> Result<usize, AnnotateError> {
    let vectors = match &record.directions {
        MotionDirections::Linear { dirs } => dirs,
        MotionDirections::Spin { .. } => {
            // Normalization guarantees linear directions for these kinds.
            return Err(AnnotateError::DirectionKind { kind: record.kind });
        }
    };

    let mut emitted = 0;
    for dir in vectors {
        let mut length = extent_along(extents, *dir);
        if record.limit > 0.0 {
            length = length.min(record.limit);
        }
        if let Some(cap) = record.style.visual_limit {
            length = length.min(cap);
        }
        if let Some(cap) = call.visual_limit {
            length = length.min(cap);
        }

        let start = vec3::add(pivot_pos, vec3::scale(*dir, record.style.offset));
        let end = vec3::add(start, vec3::scale(*dir, length));
        let stroke =
            StrokePath::line(vec![start, end], record.style.thickness).with_arrows(false, true);
        provider.emit_stroke(&stroke)?;
        emitted += 1;
    }
    Ok(emitted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotational_defaults() {
        let mut warnings = Vec::new();
        let record = MotionSpec::new(MotionKind::Rotational)
            .normalize(&mut warnings)
            .unwrap();
        assert_eq!(record.limit, 360.0);
        assert_eq!(record.axis, UP);
        assert!(matches!(
            record.directions,
            MotionDirections::Spin { ref dirs } if dirs == &[SpinDir::Cw]
        ));
        assert!(warnings.is_empty());
    }

    #[test]
    fn rotation_limit_clamps_with_warning() {
        let mut warnings = Vec::new();
        let record = MotionSpec::new(MotionKind::Rotational)
            .with_limit(400.0)
            .normalize(&mut warnings)
            .unwrap();
        assert_eq!(record.limit, 360.0);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn duplicate_spin_direction_is_fatal() {
        let mut warnings = Vec::new();
        let err = MotionSpec::new(MotionKind::Rotational)
            .with_directions(MotionDirections::Spin {
                dirs: vec![SpinDir::Cw, SpinDir::Cw],
            })
            .normalize(&mut warnings)
            .unwrap_err();
        assert!(matches!(err, AnnotateError::DuplicateDirection { .. }));
    }

    #[test]
    fn oscillatory_always_swings_both_ways() {
        let mut warnings = Vec::new();
        let record = MotionSpec::new(MotionKind::Oscillatory)
            .with_directions(MotionDirections::Spin {
                dirs: vec![SpinDir::Ccw],
            })
            .normalize(&mut warnings)
            .unwrap();
        assert!(matches!(
            record.directions,
            MotionDirections::Spin { ref dirs } if dirs == &[SpinDir::Cw, SpinDir::Ccw]
        ));
    }

    #[test]
    fn lateral_defaults_to_single_up_vector() {
        let mut warnings = Vec::new();
        let record = MotionSpec::new(MotionKind::Lateral)
            .normalize(&mut warnings)
            .unwrap();
        assert!(matches!(
            record.directions,
            MotionDirections::Linear { ref dirs } if dirs == &[UP]
        ));
    }

    #[test]
    fn reciprocal_pairs_a_lone_vector_with_its_mirror() {
        let mut warnings = Vec::new();
        let record = MotionSpec::new(MotionKind::Reciprocal)
            .with_directions(MotionDirections::Linear {
                dirs: vec![[1.0, 0.0, 0.0]],
            })
            .normalize(&mut warnings)
            .unwrap();
        assert!(matches!(
            record.directions,
            MotionDirections::Linear { ref dirs }
                if dirs == &[[1.0, 0.0, 0.0], [-1.0, 0.0, 0.0]]
        ));
    }

    #[test]
    fn three_travel_vectors_are_fatal() {
        let mut warnings = Vec::new();
        let err = MotionSpec::new(MotionKind::Reciprocal)
            .with_directions(MotionDirections::Linear {
                dirs: vec![UP, DOWN, [1.0, 0.0, 0.0]],
            })
            .normalize(&mut warnings)
            .unwrap_err();
        assert!(matches!(err, AnnotateError::DirectionCount { got: 3, .. }));
    }

    #[test]
    fn spin_directions_on_linear_kind_are_fatal() {
        let mut warnings = Vec::new();
        let err = MotionSpec::new(MotionKind::Lateral)
            .with_directions(MotionDirections::Spin {
                dirs: vec![SpinDir::Cw],
            })
            .normalize(&mut warnings)
            .unwrap_err();
        assert!(matches!(err, AnnotateError::DirectionKind { .. }));
    }

    #[test]
    fn linear_directions_on_spin_kind_are_fatal() {
        let mut warnings = Vec::new();
        let err = MotionSpec::new(MotionKind::Rotational)
            .with_directions(MotionDirections::Linear { dirs: vec![UP] })
            .normalize(&mut warnings)
            .unwrap_err();
        assert!(matches!(err, AnnotateError::DirectionKind { .. }));
    }
}
