use redline_types::{AnchorSpec, ResolvedAnchor, ShapeDesc, Vec3};

use crate::types::{AttachableRegion, GeomError, StrokePath, TextBlock, TextExtent};

/// The narrow interface to the external CAD engine.
///
/// The annotation layer never constructs geometry itself: it asks the
/// provider where anchors are and how big text will be, then hands
/// finished primitives back for meshing. Implemented by the host-engine
/// bridge in production and by `MockGeometry` in tests.
pub trait GeometryProvider {
    /// Resolve a symbolic anchor against a shape.
    fn resolve_anchor(
        &self,
        shape: &ShapeDesc,
        spec: &AnchorSpec,
    ) -> Result<ResolvedAnchor, GeomError>;

    /// Axis-aligned bounding extents of a shape (full widths).
    fn bounding_extents(&self, shape: &ShapeDesc) -> Vec3;

    /// Footprint the engine will give a text block, before placing it.
    fn text_extent(&self, content: &str, font_size: f64) -> TextExtent;

    /// Mesh and place a text block.
    fn emit_text(&mut self, block: &TextBlock) -> Result<(), GeomError>;

    /// Mesh and place a stroke path.
    fn emit_stroke(&mut self, stroke: &StrokePath) -> Result<(), GeomError>;

    /// Mesh and place an attachable region.
    fn emit_region(&mut self, region: &AttachableRegion) -> Result<(), GeomError>;
}
