//! The ambient scope threaded through the tree walk.
//!
//! The walker hands every child its own clone of `Ambient`, so a
//! subtree's updates are never visible to siblings or ancestors —
//! scope-exit reversion falls out of the ownership structure instead of
//! being managed at runtime.

use redline_types::{AnnotationState, RenderConfig, ShapeDesc, Vec3, ORIGIN};

use crate::partnum;
use crate::types::{AnnotateError, FieldOp, ScopeDelta};

/// Scope-overridable toggles, seeded from the process-wide configuration.
#[derive(Debug, Clone)]
pub struct Toggles {
    pub expand: bool,
    pub expand_step: f64,
    pub expand_time: f64,
    pub highlight: Option<String>,
    pub list_parts: bool,
    pub mech_id: Option<String>,
    pub show_tags: Vec<String>,
    pub hide_tags: Vec<String>,
}

impl Toggles {
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            expand: config.expand,
            expand_step: config.expand_step,
            expand_time: config.expand_time,
            highlight: config.highlight.clone(),
            list_parts: config.list_parts,
            mech_id: config.mech_id.clone(),
            show_tags: config.show_tags.clone(),
            hide_tags: config.hide_tags.clone(),
        }
    }
}

/// Everything a node can see of its ancestors: the inherited annotation
/// state, the effective toggles, the shape context, the distribution
/// index, and the base placement origin.
#[derive(Debug, Clone)]
pub struct Ambient {
    pub state: AnnotationState,
    pub toggles: Toggles,
    pub shape: Option<ShapeDesc>,
    pub index: Option<u32>,
    pub origin: Vec3,
    /// Set when the enclosing shape failed its visibility gates. Render
    /// points inside a hidden part emit nothing; nested shapes re-run
    /// their own gates and may become visible again.
    pub hidden: bool,
}

impl Ambient {
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            state: AnnotationState::default(),
            toggles: Toggles::from_config(config),
            shape: None,
            index: None,
            origin: ORIGIN,
            hidden: false,
        }
    }

    /// Produce the ambient value a scope's children see. The receiver is
    /// untouched; later siblings keep observing it as-is.
    pub fn apply(
        &self,
        delta: &ScopeDelta,
        warnings: &mut Vec<String>,
    ) -> Result<Ambient, AnnotateError> {
        let mut next = self.clone();

        delta.label.apply(&mut next.state.label);
        delta.description.apply(&mut next.state.description);
        delta.object.apply(&mut next.state.object);

        match &delta.spec_rows {
            FieldOp::Inherit => {}
            FieldOp::Clear => next.state.spec_rows.clear(),
            FieldOp::Set { value } => next.state.spec_rows = value.clone(),
        }

        match &delta.motion {
            FieldOp::Inherit => {}
            FieldOp::Clear => next.state.motion = None,
            FieldOp::Set { value } => next.state.motion = Some(value.normalize(warnings)?),
        }

        next.state.part_segments = partnum::append_segment(
            &self.state.part_segments,
            &delta.part.segment,
            delta.part.start_new,
            self.index,
        )?;

        if delta.dimensions.reset {
            next.state.dimensions.clear();
        }
        next.state
            .dimensions
            .extend(delta.dimensions.records.iter().cloned());

        if let Some(expand) = delta.expand {
            next.toggles.expand = expand;
        }
        if let Some(step) = delta.expand_step {
            next.toggles.expand_step = step;
        }
        if let Some(list) = delta.list_parts {
            next.toggles.list_parts = list;
        }
        delta.highlight.apply(&mut next.toggles.highlight);
        delta.mech_id.apply(&mut next.toggles.mech_id);

        Ok(next)
    }

    /// The canonical part-number string at this point in the tree.
    pub fn part_string(&self) -> String {
        partnum::serialize(
            &self.state.part_segments,
            self.toggles.mech_id.as_deref(),
            self.state.label.as_deref(),
        )
    }

    /// Base origin plus the explosion displacement when parting-out is
    /// active and there are segments to hash.
    pub fn world_origin(&self) -> Result<Vec3, AnnotateError> {
        if self.toggles.expand && !self.state.part_segments.is_empty() {
            let offset = partnum::explosion_offset(
                &self.state.part_segments,
                self.toggles.expand_step,
                self.toggles.expand_time,
            )?;
            Ok(redline_types::vec3::add(self.origin, offset))
        } else {
            Ok(self.origin)
        }
    }

    /// The three-gate visibility check for a shape node: highlight
    /// filter, show-tags, and hide-tags must all pass.
    pub fn visible(&self, tags: &[String]) -> bool {
        if !partnum::is_shown(&self.part_string(), self.toggles.highlight.as_deref()) {
            return false;
        }
        if !self.toggles.show_tags.is_empty()
            && !tags.iter().any(|t| self.toggles.show_tags.contains(t))
        {
            return false;
        }
        !tags.iter().any(|t| self.toggles.hide_tags.contains(t))
    }
}
