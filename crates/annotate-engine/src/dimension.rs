//! Dimension layout: style selection against available space, call-out
//! text formatting, nesting of concurrent measurements, boundary
//! decomposition per shape family, and flyout leaders.

use std::cmp::Ordering;

use tracing::{error, info};

use geom_bridge::{
    AttachableRegion, GeometryProvider, RegionSize, StrokePath, TextBlock,
};
use redline_types::{
    vec3, AnchorSpec, DimensionRecord, Placement, ShapeDesc, Vec3,
};

use crate::scope::Ambient;
use crate::types::{defaults, AnnotateError, MeasureCall, RenderSummary};

/// How a dimension's text and arrows fit the measured span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutStyle {
    /// Arrows and text both fit inside the span.
    Inline,
    /// Arrows fit inside; text drops below the line.
    BelowInline,
    /// Text fits inside; arrows point inward from outside.
    Outline,
    /// Neither fits; arrows outside, text below.
    BelowOutline,
}

/// Pick the first style whose space requirement holds. The order is a
/// strict fallback chain; as the span grows the choice only ever moves
/// toward `Inline`.
pub fn layout_line(text_width: f64, lead_len: f64, span: f64) -> LayoutStyle {
    if 2.0 * lead_len + text_width < span {
        LayoutStyle::Inline
    } else if 2.0 * lead_len < span {
        LayoutStyle::BelowInline
    } else if text_width < span {
        LayoutStyle::Outline
    } else {
        LayoutStyle::BelowOutline
    }
}

/// Format a dimension's call-out text: `Ø`/`R` prefix, the trimmed
/// decimal magnitude, `°` suffix, units, then tolerance — each applied
/// independently in that fixed order. A pure flyout target with no
/// magnitude formats to its context text (possibly empty).
pub fn format_text(record: &DimensionRecord) -> Result<String, AnnotateError> {
    let magnitude = match record.magnitude {
        Some(m) => m,
        None if record.is_flyout => return Ok(record.context.clone().unwrap_or_default()),
        None => return Err(AnnotateError::MissingMagnitude),
    };

    let mut out = String::new();
    if record.is_diameter {
        out.push('Ø');
    }
    if record.is_radius {
        out.push('R');
    }
    out.push_str(&format!("{}", magnitude));
    if record.is_degrees {
        out.push('°');
    }
    if let Some(units) = &record.units {
        out.push_str(units);
    }
    if let Some(tolerance) = record.tolerance {
        out.push_str(&format!(" (±{})", tolerance));
    }
    if let Some(context) = &record.context {
        out.push(' ');
        out.push_str(context);
    }
    Ok(out)
}

/// Group records by placement anchor and sort each group ascending by
/// magnitude, pushing every successive record's dimension line further
/// out so concentric measurements nest without touching — smallest
/// closest to the shape.
pub fn group_and_sort(records: &[DimensionRecord]) -> Vec<Vec<DimensionRecord>> {
    let mut groups: Vec<(String, Vec<DimensionRecord>)> = Vec::new();
    for record in records {
        let key = record.placement.anchor.key();
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, group)) => group.push(record.clone()),
            None => groups.push((key, vec![record.clone()])),
        }
    }

    for (_, group) in &mut groups {
        group.sort_by(|a, b| {
            a.magnitude
                .partial_cmp(&b.magnitude)
                .unwrap_or(Ordering::Equal)
        });
        for (i, record) in group.iter_mut().enumerate() {
            let base = record.extension.unwrap_or(0.0);
            record.extension =
                Some(base + i as f64 * record.font_size * 4.0 + record.font_size * 2.0);
        }
    }

    groups.into_iter().map(|(_, group)| group).collect()
}

/// Decompose a shape boundary into measurement records.
///
/// Mesh-backed and extruded shapes have no parametric description to
/// measure, so they fall back to three bounding-box records with an
/// informational note.
pub fn boundary_records(
    shape: &ShapeDesc,
    font_size: f64,
    warnings: &mut Vec<String>,
) -> Vec<DimensionRecord> {
    let sized = |record: DimensionRecord| record.with_font_size(font_size);
    match shape {
        ShapeDesc::Prism { size, .. } => vec![
            sized(DimensionRecord::linear(
                size[0],
                Placement::at(AnchorSpec::cardinal([0.0, -1.0, 0.0]), [1.0, 0.0, 0.0]),
            )),
            sized(DimensionRecord::linear(
                size[1],
                Placement::at(AnchorSpec::cardinal([1.0, 0.0, 0.0]), [0.0, 1.0, 0.0]),
            )),
            sized(DimensionRecord::linear(
                size[2],
                Placement::at(AnchorSpec::cardinal([1.0, -1.0, 0.0]), [0.0, 0.0, 1.0]),
            )),
        ],
        ShapeDesc::Conoid {
            r1,
            r2,
            length,
            axis,
        } => {
            let mut records = vec![sized(DimensionRecord::diameter(
                2.0 * r1,
                Placement::at(AnchorSpec::cardinal(vec3::neg(*axis)), [1.0, 0.0, 0.0]),
            ))];
            if (r1 - r2).abs() > 1e-9 {
                records.push(sized(DimensionRecord::diameter(
                    2.0 * r2,
                    Placement::at(AnchorSpec::cardinal(*axis), [1.0, 0.0, 0.0]),
                )));
            }
            records.push(sized(DimensionRecord::linear(
                *length,
                Placement::at(AnchorSpec::cardinal([1.0, 0.0, 0.0]), *axis),
            )));
            records
        }
        ShapeDesc::Spheroid { r } => vec![sized(DimensionRecord::diameter(
            2.0 * r,
            Placement::at(AnchorSpec::cardinal([0.0, -1.0, 0.0]), [1.0, 0.0, 0.0]),
        ))],
        ShapeDesc::Extrusion { .. } | ShapeDesc::Mesh { .. } => {
            info!(family = shape.family(), "no parametric boundary; dimensioning bounding box");
            warnings.push(format!(
                "{} shape dimensioned via bounding box",
                shape.family()
            ));
            let extents = shape.extents();
            vec![
                sized(DimensionRecord::linear(
                    extents[0],
                    Placement::at(AnchorSpec::cardinal([0.0, -1.0, 0.0]), [1.0, 0.0, 0.0]),
                )),
                sized(DimensionRecord::linear(
                    extents[1],
                    Placement::at(AnchorSpec::cardinal([1.0, 0.0, 0.0]), [0.0, 1.0, 0.0]),
                )),
                sized(DimensionRecord::linear(
                    extents[2],
                    Placement::at(AnchorSpec::cardinal([1.0, -1.0, 0.0]), [0.0, 0.0, 1.0]),
                )),
            ]
        }
    }
}

/// Render a measurement point: boundary records (when requested) plus
/// the accumulated ambient dimension list. Flyout records get bent
/// leaders; the rest are grouped, nested, and drawn as dimension lines.
pub fn render_measurement(
    call: &MeasureCall,
    ambient: &Ambient,
    provider: &mut dyn GeometryProvider,
    summary: &mut RenderSummary,
) -> Result<(), AnnotateError> {
    let mut records: Vec<DimensionRecord> = Vec::new();
    if call.include_boundary {
        let shape = ambient.shape.as_ref().ok_or(AnnotateError::MissingShape {
            what: "boundary measurement",
        })?;
        records.extend(boundary_records(shape, call.font_size, &mut summary.warnings));
    }
    records.extend(ambient.state.dimensions.iter().cloned());

    let origin = ambient.world_origin()?;
    let (flyouts, lines): (Vec<_>, Vec<_>) = records.into_iter().partition(|r| r.is_flyout);

    for record in &flyouts {
        layout_flyout(record, origin, ambient.shape.as_ref(), provider, summary)?;
    }

    if lines.is_empty() {
        return Ok(());
    }
    let shape = ambient.shape.as_ref().ok_or(AnnotateError::MissingShape {
        what: "dimension line",
    })?;
    for group in group_and_sort(&lines) {
        for record in &group {
            render_line(record, shape, origin, provider, summary)?;
        }
    }
    Ok(())
}

/// Draw one dimension line: witness lines out from the shape, the
/// measured span with arrowheads placed per the chosen style, and the
/// call-out text.
fn render_line(
    record: &DimensionRecord,
    shape: &ShapeDesc,
    origin: Vec3,
    provider: &mut dyn GeometryProvider,
    summary: &mut RenderSummary,
) -> Result<(), AnnotateError> {
    let magnitude = record.magnitude.ok_or(AnnotateError::MissingMagnitude)?;
    let text = format_text(record)?;
    let extent = provider.text_extent(&text, record.font_size);
    let lead = record.font_size * defaults::ARROW_LEAD_EM;
    let style = layout_line(extent.width, lead, magnitude);

    let anchor = provider.resolve_anchor(shape, &record.placement.anchor)?;
    let offset = record.extension.unwrap_or(record.font_size * 2.0);
    let center = vec3::add(
        vec3::add(origin, anchor.position),
        vec3::scale(anchor.direction, offset),
    );
    let axis = vec3::normalize(record.placement.orient);
    let half = magnitude / 2.0;
    let a = vec3::add(center, vec3::scale(axis, -half));
    let b = vec3::add(center, vec3::scale(axis, half));

    // Witness lines from the shape surface out to the dimension line.
    for end in [a, b] {
        let surface = vec3::sub(end, vec3::scale(anchor.direction, offset));
        provider.emit_stroke(&StrokePath::line(
            vec![surface, end],
            record.font_thickness,
        ))?;
        summary.emitted += 1;
    }

    match style {
        LayoutStyle::Inline | LayoutStyle::BelowInline => {
            provider.emit_stroke(
                &StrokePath::line(vec![a, b], record.font_thickness).with_arrows(true, true),
            )?;
            summary.emitted += 1;
        }
        LayoutStyle::Outline | LayoutStyle::BelowOutline => {
            provider.emit_stroke(&StrokePath::line(vec![a, b], record.font_thickness))?;
            provider.emit_stroke(
                &StrokePath::line(vec![vec3::add(a, vec3::scale(axis, -lead)), a], record.font_thickness)
                    .with_arrows(false, true),
            )?;
            provider.emit_stroke(
                &StrokePath::line(vec![vec3::add(b, vec3::scale(axis, lead)), b], record.font_thickness)
                    .with_arrows(false, true),
            )?;
            summary.emitted += 3;
        }
    }

    let text_at = match style {
        LayoutStyle::Inline | LayoutStyle::Outline => {
            vec3::add(center, vec3::scale(anchor.direction, record.font_size * 0.2))
        }
        LayoutStyle::BelowInline | LayoutStyle::BelowOutline => vec3::sub(
            center,
            vec3::scale(anchor.direction, extent.height + record.font_size * 0.5),
        ),
    };
    let mut block = TextBlock::new(text, record.font_size, text_at);
    block.thickness = record.font_thickness;
    block.color = record.color.clone();
    provider.emit_text(&block)?;
    summary.emitted += 1;
    Ok(())
}

/// Draw a flyout call-out: a two-segment bent leader from the target to
/// a text block, plus a target ring for diameter/radius records.
pub fn layout_flyout(
    record: &DimensionRecord,
    origin: Vec3,
    shape: Option<&ShapeDesc>,
    provider: &mut dyn GeometryProvider,
    summary: &mut RenderSummary,
) -> Result<(), AnnotateError> {
    let target = match (record.position, shape) {
        (Some(position), _) => vec3::add(origin, position),
        (None, Some(shape)) => {
            let anchor = provider.resolve_anchor(shape, &record.placement.anchor)?;
            vec3::add(origin, anchor.position)
        }
        (None, None) => {
            error!("flyout has neither a position nor a shape; using the origin");
            summary
                .warnings
                .push("flyout has no position; substituted the origin".to_string());
            origin
        }
    };

    let text = format_text(record)?;
    if text.is_empty() {
        return Ok(());
    }

    let run = record.font_size * defaults::LEADER_RUN_EM;
    let gap = record.font_size * defaults::TEXT_GAP_EM;
    let elbow = vec3::add(target, vec3::scale(vec3::normalize([1.0, 0.0, 1.0]), run));
    let landing = vec3::add(elbow, [gap, 0.0, 0.0]);
    provider.emit_stroke(&StrokePath::line(
        vec![target, elbow, landing],
        record.font_thickness,
    ))?;
    summary.emitted += 1;

    let mut block = TextBlock::new(text, record.font_size, vec3::add(landing, [gap, 0.0, 0.0]));
    block.thickness = record.font_thickness;
    block.color = record.color.clone();
    provider.emit_text(&block)?;
    summary.emitted += 1;

    if record.is_diameter || record.is_radius {
        if let Some(magnitude) = record.magnitude {
            let r = if record.is_diameter {
                magnitude / 2.0
            } else {
                magnitude
            };
            provider.emit_region(&AttachableRegion {
                at: target,
                size: RegionSize::Cylinder {
                    r,
                    h: record.font_thickness,
                },
                alpha: 0.5,
            })?;
            summary.emitted += 1;
        }
    }
    Ok(())
}
