//! Part-number assembly: hierarchical segment sequences, string
//! serialization, the deterministic explosion offset, and the highlight
//! visibility gate.

use redline_types::{vec3, PartSegment, Vec3, ORIGIN};

use crate::types::{AnnotateError, SegmentArg};

/// Extend (or restart) a part-number sequence with one scope's
/// contribution.
///
/// `Keep` passes the ambient sequence through unchanged, even when
/// `start_new` is set — restarting without a segment to start from is
/// meaningless. The reserved `idx` sentinel and `UseIndex` both
/// substitute the ambient distribution index; outside a fan-out that
/// substitution has nothing to draw on and is a usage error.
pub fn append_segment(
    current: &[PartSegment],
    segment: &SegmentArg,
    start_new: bool,
    index: Option<u32>,
) -> Result<Vec<PartSegment>, AnnotateError> {
    let resolved = match segment {
        SegmentArg::Keep => return Ok(current.to_vec()),
        SegmentArg::UseIndex => index_segment(index)?,
        SegmentArg::Literal { segment } if segment.is_index_sentinel() => index_segment(index)?,
        SegmentArg::Literal { segment } => segment.clone(),
    };

    if start_new {
        return Ok(vec![resolved]);
    }
    let mut next = current.to_vec();
    next.push(resolved);
    Ok(next)
}

fn index_segment(index: Option<u32>) -> Result<PartSegment, AnnotateError> {
    match index {
        Some(i) => Ok(PartSegment::number(i as i64)),
        None => Err(AnnotateError::IndexOutsideDistribute),
    }
}

/// Join a mechanism identifier, an inherited label, and the segment
/// sequence into the canonical `-`-separated part-number string. Absent
/// or empty leading components are omitted, never left as empty fields.
pub fn serialize(
    segments: &[PartSegment],
    mech_id: Option<&str>,
    label: Option<&str>,
) -> String {
    let mut fields: Vec<String> = Vec::new();
    if let Some(mech) = mech_id {
        if !mech.is_empty() {
            fields.push(mech.to_string());
        }
    }
    if let Some(label) = label {
        if !label.is_empty() {
            fields.push(label.to_string());
        }
    }
    fields.extend(segments.iter().map(|s| s.to_string()));
    fields.join("-")
}

/// Hash one segment into an octant direction (or the zero vector).
///
/// The bytes of the segment's textual form are XOR-folded into a single
/// byte; the three lowest bits switch the x/y/z components on, the next
/// three pick each component's sign (set bit means positive). Identical
/// segment text always fans out the same way.
pub fn unit_dir(segment: &PartSegment) -> Vec3 {
    let folded = segment
        .to_string()
        .bytes()
        .fold(0u8, |acc, byte| acc ^ byte);

    let component = |present: u8, positive: u8| -> f64 {
        if folded & present == 0 {
            0.0
        } else if folded & positive != 0 {
            1.0
        } else {
            -1.0
        }
    };

    [
        component(0x01, 0x08),
        component(0x02, 0x10),
        component(0x04, 0x20),
    ]
}

/// Total displacement for a part with the given segment sequence.
///
/// Each segment contributes its hashed direction scaled by `step` and by
/// the assembly factor `1 - time` (`time` is clamped to [0, 1]; 1 means
/// fully assembled). Translations compose by summing, so the chain of
/// per-segment moves reduces to a fold. A part with no segments has
/// nothing to offset from.
pub fn explosion_offset(
    segments: &[PartSegment],
    step: f64,
    time: f64,
) -> Result<Vec3, AnnotateError> {
    if segments.is_empty() {
        return Err(AnnotateError::EmptyPartList);
    }
    let factor = step * (1.0 - time.clamp(0.0, 1.0));
    Ok(segments.iter().fold(ORIGIN, |acc, segment| {
        vec3::add(acc, vec3::scale(unit_dir(segment), factor))
    }))
}

/// Highlight gate: with no filter everything shows; with a filter only
/// the exact matching part-number string shows.
pub fn is_shown(part: &str, highlight: Option<&str>) -> bool {
    match highlight {
        None => true,
        Some(filter) => part == filter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redline_types::INDEX_SENTINEL;

    fn segs(values: &[&str]) -> Vec<PartSegment> {
        values.iter().map(|v| PartSegment::text(*v)).collect()
    }

    #[test]
    fn serialize_joins_with_hyphens() {
        assert_eq!(
            serialize(
                &[PartSegment::number(1), PartSegment::number(1)],
                None,
                None
            ),
            "1-1"
        );
        assert_eq!(serialize(&segs(&["a", "b"]), None, None), "a-b");
        assert_eq!(
            serialize(&[PartSegment::number(1), PartSegment::text("b")], None, None),
            "1-b"
        );
    }

    #[test]
    fn serialize_omits_absent_leading_components() {
        let segments = segs(&["7"]);
        assert_eq!(serialize(&segments, Some("MECH"), Some("axle")), "MECH-axle-7");
        assert_eq!(serialize(&segments, None, Some("axle")), "axle-7");
        assert_eq!(serialize(&segments, Some(""), Some("")), "7");
    }

    #[test]
    fn append_keep_is_identity() {
        let current = segs(&["a", "b"]);
        let next = append_segment(&current, &SegmentArg::Keep, false, None).unwrap();
        assert_eq!(next, current);
        // Keep wins even when start_new is set.
        let next = append_segment(&current, &SegmentArg::Keep, true, None).unwrap();
        assert_eq!(next, current);
    }

    #[test]
    fn append_start_new_discards_ancestry() {
        let current = segs(&["a", "b"]);
        let arg = SegmentArg::Literal {
            segment: PartSegment::text("x"),
        };
        let next = append_segment(&current, &arg, true, None).unwrap();
        assert_eq!(next, segs(&["x"]));
    }

    #[test]
    fn append_extends_in_order() {
        let arg = SegmentArg::Literal {
            segment: PartSegment::number(3),
        };
        let next = append_segment(&segs(&["a"]), &arg, false, None).unwrap();
        assert_eq!(next, vec![PartSegment::text("a"), PartSegment::number(3)]);
        // Appending to an empty sequence starts one.
        let next = append_segment(&[], &arg, false, None).unwrap();
        assert_eq!(next, vec![PartSegment::number(3)]);
    }

    #[test]
    fn index_sentinel_substitutes_ambient_index() {
        let arg = SegmentArg::Literal {
            segment: PartSegment::text(INDEX_SENTINEL),
        };
        let next = append_segment(&[], &arg, false, Some(4)).unwrap();
        assert_eq!(next, vec![PartSegment::number(4)]);

        let err = append_segment(&[], &arg, false, None).unwrap_err();
        assert!(matches!(err, AnnotateError::IndexOutsideDistribute));
    }

    #[test]
    fn explosion_base_directions() {
        let offset = |v: &str| {
            explosion_offset(&[PartSegment::text(v)], 5.0, 0.0).unwrap()
        };
        assert_eq!(offset("0"), [0.0, 0.0, 0.0]);
        assert_eq!(offset("1"), [-5.0, 0.0, 0.0]);
        assert_eq!(offset("2"), [0.0, 5.0, 0.0]);
    }

    #[test]
    fn explosion_numbers_hash_via_decimal_form() {
        let text = explosion_offset(&[PartSegment::text("12")], 5.0, 0.0).unwrap();
        let number = explosion_offset(&[PartSegment::number(12)], 5.0, 0.0).unwrap();
        assert_eq!(text, number);
    }

    #[test]
    fn explosion_is_deterministic() {
        let segments = segs(&["frame", "7", "bearing"]);
        let a = explosion_offset(&segments, 12.5, 0.25).unwrap();
        let b = explosion_offset(&segments, 12.5, 0.25).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn explosion_fully_assembled_collapses_to_origin() {
        let segments = segs(&["frame", "7"]);
        assert_eq!(explosion_offset(&segments, 30.0, 1.0).unwrap(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn explosion_empty_list_is_fatal() {
        let err = explosion_offset(&[], 5.0, 0.0).unwrap_err();
        assert!(matches!(err, AnnotateError::EmptyPartList));
    }

    #[test]
    fn highlight_gate() {
        assert!(is_shown("anything", None));
        assert!(is_shown("a-b-1", Some("a-b-1")));
        assert!(!is_shown("a-b-1", Some("a-b")));
        assert!(!is_shown("a-b", Some("a-b-1")));
    }
}
