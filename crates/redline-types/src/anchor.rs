use serde::{Deserialize, Serialize};

use crate::vec3::Vec3;

/// Symbolic reference to a point on a shape, resolved by the external
/// geometry engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AnchorSpec {
    /// A named anchor published by the shape ("top", "hinge", ...).
    Named { name: String },
    /// A cardinal direction vector; components are clamped to [-1, 1]
    /// by the resolver.
    Cardinal { dir: Vec3 },
}

impl AnchorSpec {
    pub fn named(name: impl Into<String>) -> Self {
        AnchorSpec::Named { name: name.into() }
    }

    pub fn cardinal(dir: Vec3) -> Self {
        AnchorSpec::Cardinal { dir }
    }

    /// Stable grouping key. Cardinal components are formatted with fixed
    /// precision so records aimed at the same anchor always group together.
    pub fn key(&self) -> String {
        match self {
            AnchorSpec::Named { name } => format!("named:{}", name),
            AnchorSpec::Cardinal { dir } => {
                format!("cardinal:{:.3},{:.3},{:.3}", dir[0], dir[1], dir[2])
            }
        }
    }
}

/// Full placement for a rendered element: where it attaches, how it spins
/// around the anchor direction, and which way the element's long axis runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub anchor: AnchorSpec,
    /// Rotation around the anchor direction, in degrees.
    pub spin: f64,
    /// Orientation of the element's measurement axis.
    pub orient: Vec3,
}

impl Placement {
    pub fn at(anchor: AnchorSpec, orient: Vec3) -> Self {
        Self {
            anchor,
            spin: 0.0,
            orient,
        }
    }
}

/// What the geometry engine hands back for an `AnchorSpec`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAnchor {
    pub position: Vec3,
    pub direction: Vec3,
    /// Spin of the anchor frame around its direction, in degrees.
    pub spin: f64,
}
