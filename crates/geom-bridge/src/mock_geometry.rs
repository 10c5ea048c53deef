//! MockGeometry — deterministic test double implementing GeometryProvider.
//!
//! Resolves cardinal and well-known named anchors against a shape's
//! bounding extents, measures text with fixed monospace metrics, and
//! records every emitted primitive for assertions. No randomness, no I/O.

use std::collections::HashMap;

use redline_types::{vec3, AnchorSpec, ResolvedAnchor, ShapeDesc, Vec3, UP};

use crate::traits::GeometryProvider;
use crate::types::{AttachableRegion, GeomError, StrokePath, TextBlock, TextExtent};

/// Monospace advance per character, as a fraction of the font size.
const CHAR_ADVANCE: f64 = 0.6;

/// Deterministic test double for the external CAD engine.
#[derive(Debug, Default)]
pub struct MockGeometry {
    /// Extra named anchors visible on every shape, keyed by name.
    extra_anchors: HashMap<String, ResolvedAnchor>,
    /// Every text block emitted, in emission order.
    pub texts: Vec<TextBlock>,
    /// Every stroke emitted, in emission order.
    pub strokes: Vec<StrokePath>,
    /// Every region emitted, in emission order.
    pub regions: Vec<AttachableRegion>,
}

impl MockGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an additional named anchor, e.g. a mechanism pivot.
    pub fn with_named_anchor(
        mut self,
        name: impl Into<String>,
        position: Vec3,
        direction: Vec3,
    ) -> Self {
        self.extra_anchors.insert(
            name.into(),
            ResolvedAnchor {
                position,
                direction,
                spin: 0.0,
            },
        );
        self
    }

    /// Total primitives emitted so far.
    pub fn emitted(&self) -> usize {
        self.texts.len() + self.strokes.len() + self.regions.len()
    }

    /// Drop all recorded primitives.
    pub fn clear(&mut self) {
        self.texts.clear();
        self.strokes.clear();
        self.regions.clear();
    }

    fn cardinal_for_name(name: &str) -> Option<Vec3> {
        match name {
            "center" => Some([0.0, 0.0, 0.0]),
            "top" => Some([0.0, 0.0, 1.0]),
            "bottom" => Some([0.0, 0.0, -1.0]),
            "left" => Some([-1.0, 0.0, 0.0]),
            "right" => Some([1.0, 0.0, 0.0]),
            "front" => Some([0.0, -1.0, 0.0]),
            "back" => Some([0.0, 1.0, 0.0]),
            _ => None,
        }
    }

    fn resolve_cardinal(shape: &ShapeDesc, dir: Vec3) -> ResolvedAnchor {
        let half = vec3::scale(shape.extents(), 0.5);
        let clamped = [
            dir[0].clamp(-1.0, 1.0),
            dir[1].clamp(-1.0, 1.0),
            dir[2].clamp(-1.0, 1.0),
        ];
        let position = [
            half[0] * clamped[0],
            half[1] * clamped[1],
            half[2] * clamped[2],
        ];
        // The center anchor has no outward direction; it reports UP so
        // callers always get a usable frame.
        let direction = if vec3::length(clamped) < 1e-12 {
            UP
        } else {
            vec3::normalize(clamped)
        };
        ResolvedAnchor {
            position,
            direction,
            spin: 0.0,
        }
    }
}

impl GeometryProvider for MockGeometry {
    fn resolve_anchor(
        &self,
        shape: &ShapeDesc,
        spec: &AnchorSpec,
    ) -> Result<ResolvedAnchor, GeomError> {
        match spec {
            AnchorSpec::Cardinal { dir } => Ok(Self::resolve_cardinal(shape, *dir)),
            AnchorSpec::Named { name } => {
                if let Some(anchor) = self.extra_anchors.get(name) {
                    return Ok(anchor.clone());
                }
                match Self::cardinal_for_name(name) {
                    Some(dir) => Ok(Self::resolve_cardinal(shape, dir)),
                    None => Err(GeomError::AnchorNotFound {
                        name: name.clone(),
                        family: shape.family(),
                    }),
                }
            }
        }
    }

    fn bounding_extents(&self, shape: &ShapeDesc) -> Vec3 {
        shape.extents()
    }

    fn text_extent(&self, content: &str, font_size: f64) -> TextExtent {
        let longest = content.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        let lines = content.lines().count().max(1);
        TextExtent {
            width: longest as f64 * font_size * CHAR_ADVANCE,
            height: lines as f64 * font_size,
        }
    }

    fn emit_text(&mut self, block: &TextBlock) -> Result<(), GeomError> {
        self.texts.push(block.clone());
        Ok(())
    }

    fn emit_stroke(&mut self, stroke: &StrokePath) -> Result<(), GeomError> {
        self.strokes.push(stroke.clone());
        Ok(())
    }

    fn emit_region(&mut self, region: &AttachableRegion) -> Result<(), GeomError> {
        self.regions.push(region.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> ShapeDesc {
        ShapeDesc::Prism {
            size: [10.0, 20.0, 30.0],
            size2: None,
            shift: [0.0, 0.0],
        }
    }

    #[test]
    fn cardinal_anchor_sits_on_bounding_face() {
        let mock = MockGeometry::new();
        let anchor = mock
            .resolve_anchor(&unit_box(), &AnchorSpec::cardinal([0.0, 0.0, 1.0]))
            .unwrap();
        assert_eq!(anchor.position, [0.0, 0.0, 15.0]);
        assert_eq!(anchor.direction, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn named_anchor_maps_to_cardinal() {
        let mock = MockGeometry::new();
        let anchor = mock
            .resolve_anchor(&unit_box(), &AnchorSpec::named("right"))
            .unwrap();
        assert_eq!(anchor.position, [5.0, 0.0, 0.0]);
    }

    #[test]
    fn unknown_named_anchor_is_an_error() {
        let mock = MockGeometry::new();
        let err = mock
            .resolve_anchor(&unit_box(), &AnchorSpec::named("hinge"))
            .unwrap_err();
        assert!(matches!(err, GeomError::AnchorNotFound { .. }));
    }

    #[test]
    fn registered_anchor_wins_over_table() {
        let mock = MockGeometry::new().with_named_anchor("hinge", [1.0, 2.0, 3.0], UP);
        let anchor = mock
            .resolve_anchor(&unit_box(), &AnchorSpec::named("hinge"))
            .unwrap();
        assert_eq!(anchor.position, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn text_extent_is_monospace() {
        let mock = MockGeometry::new();
        let e = mock.text_extent("abcd", 4.0);
        assert!((e.width - 9.6).abs() < 1e-9);
        assert!((e.height - 4.0).abs() < 1e-9);

        let two_lines = mock.text_extent("ab\nabcdef", 2.0);
        assert!((two_lines.width - 7.2).abs() < 1e-9);
        assert!((two_lines.height - 4.0).abs() < 1e-9);
    }
}
