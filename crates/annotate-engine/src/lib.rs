//! Annotation engine: scoped attribute inheritance over a model tree,
//! part-number assembly, movement indicators, and dimension layout.
//!
//! The walk is a single-threaded, strictly nested recursive descent. A
//! scope's updates ride down in a cloned ambient value, so they revert
//! automatically when control returns to the parent — later siblings
//! always start from the parent's state.

pub mod dimension;
pub mod flyout;
pub mod motion;
pub mod partnum;
pub mod scope;
pub mod types;

use tracing::debug;

use geom_bridge::GeometryProvider;
use redline_types::{vec3, RenderConfig};

use crate::scope::Ambient;
use crate::types::{AnnotateError, ModelNode, RenderSummary};

/// Drives one render pass over an annotated model tree.
pub struct Annotator {
    config: RenderConfig,
}

impl Annotator {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Evaluate the tree, emitting annotation primitives through the
    /// provider. A fatal condition unwinds the whole pass; recoverable
    /// conditions substitute locally and land in the summary's warnings.
    pub fn render(
        &self,
        root: &ModelNode,
        provider: &mut dyn GeometryProvider,
    ) -> Result<RenderSummary, AnnotateError> {
        let mut summary = RenderSummary::default();
        let ambient = Ambient::from_config(&self.config);
        self.walk(root, &ambient, provider, &mut summary)?;
        debug!(
            emitted = summary.emitted,
            parts = summary.parts.len(),
            warnings = summary.warnings.len(),
            "render pass complete"
        );
        Ok(summary)
    }

    fn walk(
        &self,
        node: &ModelNode,
        ambient: &Ambient,
        provider: &mut dyn GeometryProvider,
        summary: &mut RenderSummary,
    ) -> Result<(), AnnotateError> {
        match node {
            ModelNode::Scope { delta, children } => {
                if children.is_empty() {
                    return Err(AnnotateError::EmptyScope);
                }
                let inner = ambient.apply(delta, &mut summary.warnings)?;
                for child in children {
                    self.walk(child, &inner, provider, summary)?;
                }
                Ok(())
            }

            ModelNode::Shape {
                desc,
                tags,
                children,
                ..
            } => {
                let mut inner = ambient.clone();
                inner.shape = Some(desc.clone());
                // A hidden part takes its own annotations with it, but
                // descendants re-run the gates: a nested part with a
                // longer number can still match the highlight filter.
                inner.hidden = !ambient.visible(tags);
                if !inner.hidden && inner.toggles.list_parts {
                    let part = inner.part_string();
                    if !part.is_empty() {
                        summary.parts.push(part);
                    }
                }
                for child in children {
                    self.walk(child, &inner, provider, summary)?;
                }
                Ok(())
            }

            ModelNode::Distribute {
                placements,
                children,
            } => {
                if children.is_empty() {
                    return Err(AnnotateError::EmptyDistribute);
                }
                for (i, placement) in placements.iter().enumerate() {
                    let mut inner = ambient.clone();
                    inner.index = Some(i as u32);
                    // With a shape in scope each copy shifts to its
                    // placement anchor; a pure index fan-out otherwise.
                    if let Some(shape) = &ambient.shape {
                        let anchor = provider.resolve_anchor(shape, placement)?;
                        inner.origin = vec3::add(inner.origin, anchor.position);
                    }
                    for child in children {
                        self.walk(child, &inner, provider, summary)?;
                    }
                }
                Ok(())
            }

            ModelNode::Annotate { call } => {
                if ambient.hidden {
                    return Ok(());
                }
                flyout::render_annotation(call, ambient, provider, summary)
            }

            ModelNode::Measure { call } => {
                if ambient.hidden {
                    return Ok(());
                }
                dimension::render_measurement(call, ambient, provider, summary)
            }

            ModelNode::Motion { call } => {
                if ambient.hidden {
                    return Ok(());
                }
                let record = ambient
                    .state
                    .motion
                    .clone()
                    .ok_or(AnnotateError::MissingMotion)?;
                let shape = ambient.shape.as_ref().ok_or(AnnotateError::MissingShape {
                    what: "motion indicator",
                })?;
                let origin = ambient.world_origin()?;
                summary.emitted +=
                    motion::render_motion(&record, call, shape, origin, provider)?;
                Ok(())
            }
        }
    }
}
