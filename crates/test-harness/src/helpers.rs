//! Helper functions: error types, shape constructors, scope-delta
//! constructors.

use annotate_engine::motion::MotionSpec;
use annotate_engine::types::{AnnotateError, DimDelta, FieldOp, PartDelta, ScopeDelta, SegmentArg};
use redline_types::{DimensionRecord, PartSegment, ShapeDesc, SpecRow};

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("scene has no nodes")]
    EmptyScene,

    #[error("engine error: {0}")]
    Engine(String),

    #[error("scene file error: {0}")]
    SceneFile(String),
}

impl From<AnnotateError> for HarnessError {
    fn from(err: AnnotateError) -> Self {
        HarnessError::Engine(err.to_string())
    }
}

// ── Shape Constructors ──────────────────────────────────────────────────────

/// A straight rectangular prism.
pub fn box_shape(x: f64, y: f64, z: f64) -> ShapeDesc {
    ShapeDesc::Prism {
        size: [x, y, z],
        size2: None,
        shift: [0.0, 0.0],
    }
}

/// A straight cylinder along +Z.
pub fn cylinder(r: f64, length: f64) -> ShapeDesc {
    ShapeDesc::Conoid {
        r1: r,
        r2: r,
        length,
        axis: [0.0, 0.0, 1.0],
    }
}

/// A cone (or frustum) along +Z.
pub fn cone(r1: f64, r2: f64, length: f64) -> ShapeDesc {
    ShapeDesc::Conoid {
        r1,
        r2,
        length,
        axis: [0.0, 0.0, 1.0],
    }
}

/// A sphere.
pub fn sphere(r: f64) -> ShapeDesc {
    ShapeDesc::Spheroid { r }
}

// ── Scope Delta Constructors ────────────────────────────────────────────────

/// Set the label for a subtree.
pub fn label(value: &str) -> ScopeDelta {
    ScopeDelta {
        label: FieldOp::set(value.to_string()),
        ..Default::default()
    }
}

/// Clear the inherited label for a subtree.
pub fn clear_label() -> ScopeDelta {
    ScopeDelta {
        label: FieldOp::Clear,
        ..Default::default()
    }
}

/// Set the description for a subtree.
pub fn description(value: &str) -> ScopeDelta {
    ScopeDelta {
        description: FieldOp::set(value.to_string()),
        ..Default::default()
    }
}

/// Append a text part segment.
pub fn part(segment: &str) -> ScopeDelta {
    part_segment(PartSegment::text(segment))
}

/// Append a numeric part segment.
pub fn part_number(segment: i64) -> ScopeDelta {
    part_segment(PartSegment::number(segment))
}

/// Append an arbitrary part segment.
pub fn part_segment(segment: PartSegment) -> ScopeDelta {
    ScopeDelta {
        part: PartDelta {
            segment: SegmentArg::Literal { segment },
            start_new: false,
        },
        ..Default::default()
    }
}

/// Substitute the ambient distribution index as a part segment.
pub fn part_index() -> ScopeDelta {
    ScopeDelta {
        part: PartDelta {
            segment: SegmentArg::UseIndex,
            start_new: false,
        },
        ..Default::default()
    }
}

/// Start a fresh part-number sequence.
pub fn part_restart(segment: &str) -> ScopeDelta {
    ScopeDelta {
        part: PartDelta {
            segment: SegmentArg::Literal {
                segment: PartSegment::text(segment),
            },
            start_new: true,
        },
        ..Default::default()
    }
}

/// Set the specification rows for a subtree.
pub fn spec(rows: &[(&str, &str)]) -> ScopeDelta {
    ScopeDelta {
        spec_rows: FieldOp::set(rows.iter().map(|(k, v)| SpecRow::new(*k, *v)).collect()),
        ..Default::default()
    }
}

/// Establish a movement descriptor for a subtree.
pub fn motion(spec: MotionSpec) -> ScopeDelta {
    ScopeDelta {
        motion: FieldOp::set(spec),
        ..Default::default()
    }
}

/// Accumulate dimension records for a subtree.
pub fn dimensions(records: Vec<DimensionRecord>) -> ScopeDelta {
    ScopeDelta {
        dimensions: DimDelta {
            records,
            reset: false,
        },
        ..Default::default()
    }
}
