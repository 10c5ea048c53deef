//! SceneBuilder — fluent API for scripting annotated scenes in tests.
//!
//! Children are supplied through closures, so a builder chain reads the
//! way the finished tree nests.

use annotate_engine::types::{
    AnnotateCall, MeasureCall, ModelNode, MotionCall, RenderSummary, ScopeDelta,
};
use annotate_engine::Annotator;
use geom_bridge::MockGeometry;
use redline_types::{AnchorSpec, RenderConfig, ShapeDesc};

use crate::helpers::HarnessError;

/// A fluent builder for constructing annotated model trees.
#[derive(Debug, Default)]
pub struct SceneBuilder {
    nodes: Vec<ModelNode>,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a scope around the children built by `f`.
    pub fn scope(mut self, delta: ScopeDelta, f: impl FnOnce(SceneBuilder) -> SceneBuilder) -> Self {
        let children = f(SceneBuilder::new()).nodes;
        self.nodes.push(ModelNode::Scope { delta, children });
        self
    }

    /// Add a shape with the children built by `f`.
    pub fn shape(mut self, desc: ShapeDesc, f: impl FnOnce(SceneBuilder) -> SceneBuilder) -> Self {
        let children = f(SceneBuilder::new()).nodes;
        self.nodes.push(ModelNode::shape(desc, children));
        self
    }

    /// Add a tagged shape with the children built by `f`.
    pub fn tagged_shape(
        mut self,
        desc: ShapeDesc,
        tags: &[&str],
        f: impl FnOnce(SceneBuilder) -> SceneBuilder,
    ) -> Self {
        let children = f(SceneBuilder::new()).nodes;
        self.nodes.push(ModelNode::tagged_shape(
            desc,
            tags.iter().map(|t| t.to_string()).collect(),
            children,
        ));
        self
    }

    /// Fan the children built by `f` out over the given placements.
    pub fn distribute(
        mut self,
        placements: Vec<AnchorSpec>,
        f: impl FnOnce(SceneBuilder) -> SceneBuilder,
    ) -> Self {
        let children = f(SceneBuilder::new()).nodes;
        self.nodes.push(ModelNode::Distribute {
            placements,
            children,
        });
        self
    }

    /// Add a default annotation render point.
    pub fn annotate(self) -> Self {
        self.annotate_with(AnnotateCall::default())
    }

    pub fn annotate_with(mut self, call: AnnotateCall) -> Self {
        self.nodes.push(ModelNode::annotate(call));
        self
    }

    /// Add a default measurement render point.
    pub fn measure(self) -> Self {
        self.measure_with(MeasureCall::default())
    }

    pub fn measure_with(mut self, call: MeasureCall) -> Self {
        self.nodes.push(ModelNode::measure(call));
        self
    }

    /// Add a movement-indicator render point.
    pub fn motion(mut self) -> Self {
        self.nodes.push(ModelNode::motion(MotionCall::default()));
        self
    }

    /// Finish the tree. A single root is returned as-is; several roots
    /// are wrapped in a neutral scope.
    pub fn build(mut self) -> Result<ModelNode, HarnessError> {
        match self.nodes.len() {
            0 => Err(HarnessError::EmptyScene),
            1 => Ok(self.nodes.remove(0)),
            _ => Ok(ModelNode::Scope {
                delta: ScopeDelta::default(),
                children: self.nodes,
            }),
        }
    }

    /// Build and render against a fresh `MockGeometry`.
    pub fn render(
        self,
        config: RenderConfig,
    ) -> Result<(RenderSummary, MockGeometry), HarnessError> {
        let tree = self.build()?;
        let mut mock = MockGeometry::new();
        let summary = Annotator::new(config).render(&tree, &mut mock)?;
        Ok((summary, mock))
    }
}
