//! Annotation flyouts: block assembly from the ambient state, vertical
//! stacking, and leader-line emission.

use tracing::warn;

use geom_bridge::{GeometryProvider, StrokePath, TextBlock};
use redline_types::{vec3, Vec3};

use crate::scope::Ambient;
use crate::types::{defaults, AnnotateCall, AnnotateError, BlockKind, RenderSummary};

/// Vertical offsets for a stack of text blocks, top-to-bottom.
///
/// Blocks with no content are elided before stacking — they reserve no
/// blank space. The returned offsets align with the elided list: block
/// `i`'s offset is the summed height of every block above it, measured
/// through the provider so stacking agrees with the engine's text
/// metrics.
pub fn stack_blocks(
    blocks: &[(String, f64)],
    provider: &dyn GeometryProvider,
) -> Vec<f64> {
    let mut offsets = Vec::new();
    let mut cursor = 0.0;
    for (content, font_size) in blocks {
        if content.trim().is_empty() {
            continue;
        }
        offsets.push(cursor);
        cursor += provider.text_extent(content, *font_size).height;
    }
    offsets
}

/// Assemble the flyout blocks the ambient state offers, in display
/// order, keeping only the requested kinds.
fn assemble_blocks(call: &AnnotateCall, ambient: &Ambient) -> Vec<(String, f64)> {
    let state = &ambient.state;
    let font = call.font_size;
    let mut blocks: Vec<(BlockKind, String, f64)> = Vec::new();

    if let Some(label) = &state.label {
        blocks.push((BlockKind::Label, label.clone(), font * defaults::LABEL_SCALE));
    }
    if !state.part_segments.is_empty() {
        blocks.push((BlockKind::PartNumber, ambient.part_string(), font));
    }
    if !state.spec_rows.is_empty() {
        let body = state
            .spec_rows
            .iter()
            .map(|row| format!("{}: {}", row.key, row.value))
            .collect::<Vec<_>>()
            .join("\n");
        blocks.push((BlockKind::Spec, body, font));
    }
    if let Some(description) = &state.description {
        blocks.push((BlockKind::Description, description.clone(), font));
    }
    if let Some(object) = &state.object {
        let mut body = object.name.clone();
        for row in &object.rows {
            body.push_str(&format!("\n{}: {}", row.key, row.value));
        }
        blocks.push((BlockKind::Object, body, font));
    }

    blocks
        .into_iter()
        .filter(|(kind, content, _)| call.show.includes(*kind) && !content.trim().is_empty())
        .map(|(_, content, font_size)| (content, font_size))
        .collect()
}

/// Render an annotation flyout at the current point in the tree.
///
/// With zero non-empty blocks in the requested show-set this renders
/// nothing at all — no leader, no backing, no output.
pub fn render_annotation(
    call: &AnnotateCall,
    ambient: &Ambient,
    provider: &mut dyn GeometryProvider,
    summary: &mut RenderSummary,
) -> Result<(), AnnotateError> {
    let blocks = assemble_blocks(call, ambient);
    if blocks.is_empty() {
        return Ok(());
    }

    let origin = ambient.world_origin()?;
    let target = resolve_target(call, ambient, origin, provider, summary)?;

    let run = call.font_size * defaults::LEADER_RUN_EM;
    let gap = call.font_size * defaults::TEXT_GAP_EM;
    let elbow = vec3::add(target, vec3::scale(vec3::normalize([1.0, 0.0, 1.0]), run));
    let landing = vec3::add(elbow, [gap, 0.0, 0.0]);
    provider.emit_stroke(&StrokePath::line(
        vec![target, elbow, landing],
        defaults::STROKE_WIDTH,
    ))?;
    summary.emitted += 1;

    let offsets = stack_blocks(&blocks, provider);
    for ((content, font_size), offset) in blocks
        .iter()
        .filter(|(c, _)| !c.trim().is_empty())
        .zip(offsets)
    {
        let at = vec3::add(landing, [gap, 0.0, -offset]);
        provider.emit_text(&TextBlock::new(content.clone(), *font_size, at))?;
        summary.emitted += 1;
    }
    Ok(())
}

fn resolve_target(
    call: &AnnotateCall,
    ambient: &Ambient,
    origin: Vec3,
    provider: &mut dyn GeometryProvider,
    summary: &mut RenderSummary,
) -> Result<Vec3, AnnotateError> {
    if let Some(position) = call.position {
        return Ok(vec3::add(origin, position));
    }
    if let Some(at) = &call.at {
        let shape = ambient.shape.as_ref().ok_or(AnnotateError::MissingShape {
            what: "anchored annotation",
        })?;
        let anchor = provider.resolve_anchor(shape, at)?;
        return Ok(vec3::add(origin, anchor.position));
    }
    if let Some(shape) = &ambient.shape {
        // No target named: lead from the shape's upper-right.
        let anchor = provider.resolve_anchor(
            shape,
            &redline_types::AnchorSpec::cardinal([1.0, 0.0, 1.0]),
        )?;
        return Ok(vec3::add(origin, anchor.position));
    }
    warn!("annotation has no target shape or position; using the origin");
    summary
        .warnings
        .push("annotation has no target; substituted the origin".to_string());
    Ok(origin)
}
