use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dimension::DimensionRecord;
use crate::motion::MotionRecord;

/// Reserved segment text meaning "substitute the ambient distribution
/// index". A real part-numbering scheme using the literal text `idx`
/// would collide with this sentinel; that is an accepted limitation of
/// the numbering contract, not something the assembler detects.
pub const INDEX_SENTINEL: &str = "idx";

/// One segment of a hierarchical part number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PartSegment {
    Text { value: String },
    Number { value: i64 },
}

impl PartSegment {
    pub fn text(value: impl Into<String>) -> Self {
        PartSegment::Text {
            value: value.into(),
        }
    }

    pub fn number(value: i64) -> Self {
        PartSegment::Number { value }
    }

    /// Whether this segment is the reserved index sentinel.
    pub fn is_index_sentinel(&self) -> bool {
        matches!(self, PartSegment::Text { value } if value == INDEX_SENTINEL)
    }
}

impl fmt::Display for PartSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartSegment::Text { value } => f.write_str(value),
            PartSegment::Number { value } => write!(f, "{}", value),
        }
    }
}

/// One key/value row of a specification block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecRow {
    pub key: String,
    pub value: String,
}

impl SpecRow {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Flattened view of an opaque attribute-container record, displayed as
/// text rows in a flyout. The container itself stays external; only this
/// snapshot crosses into the annotation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectSnapshot {
    pub name: String,
    pub rows: Vec<SpecRow>,
}

impl ObjectSnapshot {
    pub fn new(name: impl Into<String>, rows: Vec<SpecRow>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }
}

/// The full set of annotation attributes visible at one point in the
/// model tree.
///
/// Value semantics throughout: a scope update clones the parent's state
/// and overrides fields on the clone, so ancestors and siblings never
/// observe a child's changes. Scalar fields hold at most one active
/// value; `part_segments` and `dimensions` accumulate down the tree
/// unless explicitly reset.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnnotationState {
    pub label: Option<String>,
    pub description: Option<String>,
    pub part_segments: Vec<PartSegment>,
    pub spec_rows: Vec<SpecRow>,
    pub object: Option<ObjectSnapshot>,
    pub motion: Option<MotionRecord>,
    pub dimensions: Vec<DimensionRecord>,
}

impl AnnotationState {
    /// Copy with the label overridden. `None` clears it for the subtree.
    pub fn with_label(&self, label: Option<String>) -> Self {
        Self {
            label,
            ..self.clone()
        }
    }

    pub fn with_description(&self, description: Option<String>) -> Self {
        Self {
            description,
            ..self.clone()
        }
    }

    pub fn with_part_segments(&self, part_segments: Vec<PartSegment>) -> Self {
        Self {
            part_segments,
            ..self.clone()
        }
    }

    pub fn with_spec_rows(&self, spec_rows: Vec<SpecRow>) -> Self {
        Self {
            spec_rows,
            ..self.clone()
        }
    }

    pub fn with_object(&self, object: Option<ObjectSnapshot>) -> Self {
        Self {
            object,
            ..self.clone()
        }
    }

    pub fn with_motion(&self, motion: Option<MotionRecord>) -> Self {
        Self {
            motion,
            ..self.clone()
        }
    }

    pub fn with_dimensions(&self, dimensions: Vec<DimensionRecord>) -> Self {
        Self {
            dimensions,
            ..self.clone()
        }
    }
}
