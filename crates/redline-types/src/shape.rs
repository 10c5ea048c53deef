use serde::{Deserialize, Serialize};

use crate::vec3::Vec3;

/// Normalized description of a shape owned by the external geometry engine.
///
/// One variant per shape family, each carrying only the fields meaningful
/// to that family. The engine's positional shape tuple is reinterpreted
/// into this sum type at the provider boundary, so downstream code never
/// sees an unrecognized tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShapeDesc {
    /// Box-like shapes: cubes, rectangular prisms, frustums.
    Prism {
        /// Base extents (x, y, z).
        size: Vec3,
        /// Top extents (x, y) for frustum shapes. None means a straight prism.
        size2: Option<[f64; 2]>,
        /// Lateral displacement of the top face relative to the base.
        shift: [f64; 2],
    },
    /// Cylinders and cones.
    Conoid {
        /// Radius at the base.
        r1: f64,
        /// Radius at the top. Equal to `r1` for a straight cylinder.
        r2: f64,
        /// Length along the axis.
        length: f64,
        /// Axis direction.
        axis: Vec3,
    },
    /// Spheres.
    Spheroid { r: f64 },
    /// Linear extrusion of a planar region.
    Extrusion {
        /// Bounding extents of the profile region (x, y).
        profile_extent: [f64; 2],
        /// Extrusion length.
        length: f64,
        /// Twist applied over the extrusion, in degrees.
        twist: f64,
    },
    /// Mesh-boundary fallback when no parametric description exists.
    Mesh {
        /// Precomputed bounding extents of the mesh.
        extents: Vec3,
    },
}

impl ShapeDesc {
    /// Family name for diagnostics and log events.
    pub fn family(&self) -> &'static str {
        match self {
            ShapeDesc::Prism { .. } => "prism",
            ShapeDesc::Conoid { .. } => "conoid",
            ShapeDesc::Spheroid { .. } => "spheroid",
            ShapeDesc::Extrusion { .. } => "extrusion",
            ShapeDesc::Mesh { .. } => "mesh",
        }
    }

    /// Axis-aligned bounding extents (full widths, not half-widths).
    pub fn extents(&self) -> Vec3 {
        match self {
            ShapeDesc::Prism { size, size2, shift } => {
                let (tx, ty) = match size2 {
                    Some([x2, y2]) => (x2.max(size[0]), y2.max(size[1])),
                    None => (size[0], size[1]),
                };
                [tx + shift[0].abs(), ty + shift[1].abs(), size[2]]
            }
            ShapeDesc::Conoid { r1, r2, length, .. } => {
                let d = 2.0 * r1.max(*r2);
                [d, d, *length]
            }
            ShapeDesc::Spheroid { r } => [2.0 * r, 2.0 * r, 2.0 * r],
            ShapeDesc::Extrusion {
                profile_extent,
                length,
                ..
            } => [profile_extent[0], profile_extent[1], *length],
            ShapeDesc::Mesh { extents } => *extents,
        }
    }
}
