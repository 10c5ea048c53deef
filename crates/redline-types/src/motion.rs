use serde::{Deserialize, Serialize};

use crate::anchor::{AnchorSpec, Placement};
use crate::vec3::{Vec3, UP};

/// The four supported movement types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MotionKind {
    /// Continuous rotation around an axis.
    Rotational,
    /// Back-and-forth rotation constrained to a pivot radius.
    Oscillatory,
    /// One-way linear travel.
    Lateral,
    /// Back-and-forth linear travel.
    Reciprocal,
}

/// Spin sense for rotational movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SpinDir {
    Cw,
    Ccw,
}

/// Direction set for a movement descriptor. The domain is kind-dependent:
/// rotational and oscillatory movements take spin senses, lateral and
/// reciprocal movements take one or two travel vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MotionDirections {
    Spin { dirs: Vec<SpinDir> },
    Linear { dirs: Vec<Vec3> },
}

/// Visual styling for rendered movement indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionStyle {
    /// Distance the indicator sits off the shape surface.
    pub offset: f64,
    pub color: Option<String>,
    pub alpha: f64,
    /// Stroke width for arcs and arrows.
    pub thickness: f64,
    /// Rotation of the indicator around the anchor direction, in degrees.
    pub spin: f64,
    /// Caps the drawn indicator length without changing the modeled limit.
    pub visual_limit: Option<f64>,
    /// Placement anchor the oscillatory pivot radius is measured to.
    pub placement: Option<Placement>,
}

impl Default for MotionStyle {
    fn default() -> Self {
        Self {
            offset: 2.0,
            color: None,
            alpha: 1.0,
            thickness: 0.5,
            spin: 0.0,
            visual_limit: None,
            placement: None,
        }
    }
}

/// A normalized movement descriptor.
///
/// Produced by the descriptor-normalization step, consumed by the motion
/// render step. Never mutated in place; overrides go through `with_*`
/// copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionRecord {
    pub kind: MotionKind,
    pub directions: MotionDirections,
    /// Rotation limit in degrees, or travel limit in length units.
    /// Zero means "no explicit limit" for linear kinds.
    pub limit: f64,
    pub axis: Vec3,
    pub pivot: AnchorSpec,
    pub pivot_radius: Option<f64>,
    pub style: MotionStyle,
}

impl MotionRecord {
    pub fn with_limit(&self, limit: f64) -> Self {
        Self {
            limit,
            ..self.clone()
        }
    }

    pub fn with_axis(&self, axis: Vec3) -> Self {
        Self {
            axis,
            ..self.clone()
        }
    }

    pub fn with_pivot(&self, pivot: AnchorSpec) -> Self {
        Self {
            pivot,
            ..self.clone()
        }
    }

    pub fn with_style(&self, style: MotionStyle) -> Self {
        Self {
            style,
            ..self.clone()
        }
    }
}

/// Default pivot when a descriptor does not name one: the shape center.
pub fn default_pivot() -> AnchorSpec {
    AnchorSpec::Named {
        name: "center".to_string(),
    }
}

/// Default axis for rotational kinds and default travel vector for
/// lateral movement.
pub fn default_axis() -> Vec3 {
    UP
}
