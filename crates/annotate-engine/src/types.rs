use serde::{Deserialize, Serialize};
use uuid::Uuid;

use geom_bridge::GeomError;
use redline_types::{
    AnchorSpec, DimensionRecord, MotionKind, ObjectSnapshot, PartSegment, ShapeDesc, SpecRow,
    SpinDir, Vec3,
};

use crate::motion::MotionSpec;

/// Render-tuning constants shared by the flyout and dimension emitters.
pub mod defaults {
    /// Body text size for annotation blocks and dimension text.
    pub const FONT_SIZE: f64 = 4.0;
    /// Labels render this much larger than body text.
    pub const LABEL_SCALE: f64 = 1.5;
    /// Diagonal run of a leader line, in font-size units.
    pub const LEADER_RUN_EM: f64 = 2.5;
    /// Gap between leader elbow and text, in font-size units.
    pub const TEXT_GAP_EM: f64 = 0.5;
    /// Arrow lead length for dimension lines, in font-size units.
    pub const ARROW_LEAD_EM: f64 = 2.0;
    /// Stroke width for leaders and dimension lines.
    pub const STROKE_WIDTH: f64 = 0.5;
}

/// Field-level scope update. `Inherit` leaves the ambient value
/// untouched, `Clear` makes it absent for the subtree, `Set` overrides
/// it. Omitting a field therefore never clears it; clearing is always
/// explicit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op")]
pub enum FieldOp<T> {
    Inherit,
    Clear,
    Set { value: T },
}

impl<T> Default for FieldOp<T> {
    fn default() -> Self {
        FieldOp::Inherit
    }
}

impl<T: Clone> FieldOp<T> {
    pub fn set(value: T) -> Self {
        FieldOp::Set { value }
    }

    /// Apply to an optional ambient field.
    pub fn apply(&self, current: &mut Option<T>) {
        match self {
            FieldOp::Inherit => {}
            FieldOp::Clear => *current = None,
            FieldOp::Set { value } => *current = Some(value.clone()),
        }
    }
}

/// Part-segment contribution of a scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SegmentArg {
    /// No contribution; the ambient sequence passes through unchanged.
    Keep,
    /// Append (or start with) a literal segment.
    Literal { segment: PartSegment },
    /// Substitute the ambient distribution index.
    UseIndex,
}

impl Default for SegmentArg {
    fn default() -> Self {
        SegmentArg::Keep
    }
}

/// Part-number update carried by a scope.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PartDelta {
    pub segment: SegmentArg,
    /// Discard ancestor segments and start a fresh sequence.
    pub start_new: bool,
}

/// Dimension-list update carried by a scope.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DimDelta {
    pub records: Vec<DimensionRecord>,
    /// Drop the inherited list before adding `records`.
    pub reset: bool,
}

/// The attribute updates a scope node applies for its subtree.
///
/// Scalar fields overwrite; part segments and dimensions accumulate
/// unless their delta says to start over. Toggle overrides shadow the
/// process-wide configuration for the subtree only.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScopeDelta {
    pub label: FieldOp<String>,
    pub description: FieldOp<String>,
    pub spec_rows: FieldOp<Vec<SpecRow>>,
    pub object: FieldOp<ObjectSnapshot>,
    pub motion: FieldOp<MotionSpec>,
    pub part: PartDelta,
    pub dimensions: DimDelta,
    pub expand: Option<bool>,
    pub expand_step: Option<f64>,
    pub list_parts: Option<bool>,
    pub highlight: FieldOp<String>,
    pub mech_id: FieldOp<String>,
}

impl ScopeDelta {
    /// True when the delta changes nothing; useful for builders.
    pub fn is_empty(&self) -> bool {
        self == &ScopeDelta::default()
    }
}

/// Which flyout blocks an annotate call renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BlockKind {
    Label,
    PartNumber,
    Spec,
    Description,
    Object,
}

impl BlockKind {
    fn from_token(token: &str) -> Option<BlockKind> {
        match token {
            "label" => Some(BlockKind::Label),
            "partno" | "part-number" => Some(BlockKind::PartNumber),
            "spec" => Some(BlockKind::Spec),
            "desc" | "description" => Some(BlockKind::Description),
            "obj" | "object" => Some(BlockKind::Object),
            _ => None,
        }
    }
}

/// Requested show-set for an annotate call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShowSet {
    All,
    Only { kinds: Vec<BlockKind> },
}

impl Default for ShowSet {
    fn default() -> Self {
        ShowSet::All
    }
}

impl ShowSet {
    pub fn includes(&self, kind: BlockKind) -> bool {
        match self {
            ShowSet::All => true,
            ShowSet::Only { kinds } => kinds.contains(&kind),
        }
    }

    /// Parse a user-supplied filter string. A bare block name is accepted
    /// as a single-item list with a warning; unknown names are skipped
    /// with a warning. Never fails.
    pub fn parse(raw: &str, warnings: &mut Vec<String>) -> ShowSet {
        let trimmed = raw.trim().to_ascii_lowercase();
        if trimmed == "all" {
            return ShowSet::All;
        }
        if !trimmed.contains(',') {
            warnings.push(format!(
                "show filter '{}' is not a list; treating as a single-item list",
                raw.trim()
            ));
        }
        let mut kinds = Vec::new();
        for token in trimmed.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match BlockKind::from_token(token) {
                Some(kind) if !kinds.contains(&kind) => kinds.push(kind),
                Some(_) => {}
                None => warnings.push(format!("unknown show block '{}' skipped", token)),
            }
        }
        ShowSet::Only { kinds }
    }
}

/// An annotation flyout render point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotateCall {
    pub show: ShowSet,
    /// Leader target anchor on the ambient shape.
    pub at: Option<AnchorSpec>,
    /// Absolute leader target, overriding `at`.
    pub position: Option<Vec3>,
    pub font_size: f64,
}

impl Default for AnnotateCall {
    fn default() -> Self {
        Self {
            show: ShowSet::All,
            at: None,
            position: None,
            font_size: defaults::FONT_SIZE,
        }
    }
}

/// A measurement render point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureCall {
    /// Derive records from the ambient shape's boundary in addition to
    /// the accumulated dimension list.
    pub include_boundary: bool,
    pub font_size: f64,
}

impl Default for MeasureCall {
    fn default() -> Self {
        Self {
            include_boundary: true,
            font_size: defaults::FONT_SIZE,
        }
    }
}

/// A movement-indicator render point.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MotionCall {
    /// Caps the drawn indicator length for this render point only.
    pub visual_limit: Option<f64>,
}

/// One node of the annotated model tree.
///
/// Evaluation is a strictly nested recursive descent: a scope's updates
/// are visible to its children and reverted before the next sibling
/// runs, because every child receives its own clone of the ambient
/// state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ModelNode {
    /// Apply attribute updates for the wrapped subtree.
    Scope {
        delta: ScopeDelta,
        children: Vec<ModelNode>,
    },
    /// A shape owned by the external engine; establishes the shape
    /// context its descendants annotate against.
    Shape {
        id: Uuid,
        desc: ShapeDesc,
        tags: Vec<String>,
        children: Vec<ModelNode>,
    },
    /// Evaluate the children once per placement with the ambient
    /// distribution index set.
    Distribute {
        placements: Vec<AnchorSpec>,
        children: Vec<ModelNode>,
    },
    Annotate { call: AnnotateCall },
    Measure { call: MeasureCall },
    Motion { call: MotionCall },
}

impl ModelNode {
    pub fn scope(delta: ScopeDelta, children: Vec<ModelNode>) -> Self {
        ModelNode::Scope { delta, children }
    }

    pub fn shape(desc: ShapeDesc, children: Vec<ModelNode>) -> Self {
        ModelNode::Shape {
            id: Uuid::new_v4(),
            desc,
            tags: Vec::new(),
            children,
        }
    }

    pub fn tagged_shape(desc: ShapeDesc, tags: Vec<String>, children: Vec<ModelNode>) -> Self {
        ModelNode::Shape {
            id: Uuid::new_v4(),
            desc,
            tags,
            children,
        }
    }

    pub fn distribute(placements: Vec<AnchorSpec>, children: Vec<ModelNode>) -> Self {
        ModelNode::Distribute {
            placements,
            children,
        }
    }

    pub fn annotate(call: AnnotateCall) -> Self {
        ModelNode::Annotate { call }
    }

    pub fn measure(call: MeasureCall) -> Self {
        ModelNode::Measure { call }
    }

    pub fn motion(call: MotionCall) -> Self {
        ModelNode::Motion { call }
    }
}

/// Errors that abort a render pass.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AnnotateError {
    #[error("scope node sets attributes but wraps no children")]
    EmptyScope,

    #[error("distribute node wraps no children")]
    EmptyDistribute,

    #[error("duplicate spin direction {dir:?} in motion descriptor")]
    DuplicateDirection { dir: SpinDir },

    #[error("{kind:?} motion accepts at most {max} direction vectors, got {got}")]
    DirectionCount {
        kind: MotionKind,
        max: usize,
        got: usize,
    },

    #[error("{kind:?} motion given directions of the wrong kind")]
    DirectionKind { kind: MotionKind },

    #[error("index segment used outside a distribute fan-out")]
    IndexOutsideDistribute,

    #[error("explosion offset needs at least one part segment")]
    EmptyPartList,

    #[error("motion render point reached with no descriptor in scope")]
    MissingMotion,

    #[error("{what} requires a shape in scope")]
    MissingShape { what: &'static str },

    #[error("dimension record has no magnitude and is not a flyout")]
    MissingMagnitude,

    #[error("geometry error: {0}")]
    Geom(#[from] GeomError),
}

/// What a render pass produced, beyond the primitives already handed to
/// the provider.
#[derive(Debug, Clone, Default)]
pub struct RenderSummary {
    /// Number of primitives emitted through the provider.
    pub emitted: usize,
    /// Serialized part numbers of every listed part, in traversal order.
    /// Duplicates are preserved; consumers de-duplicate.
    pub parts: Vec<String>,
    /// Human-readable record of every recoverable condition.
    pub warnings: Vec<String>,
}
