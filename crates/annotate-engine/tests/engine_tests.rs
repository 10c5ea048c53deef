use annotate_engine::motion::MotionSpec;
use annotate_engine::types::*;
use annotate_engine::Annotator;
use geom_bridge::MockGeometry;
use redline_types::*;

/// A plain box shape used throughout.
fn box_shape() -> ShapeDesc {
    ShapeDesc::Prism {
        size: [10.0, 20.0, 30.0],
        size2: None,
        shift: [0.0, 0.0],
    }
}

fn label_delta(value: &str) -> ScopeDelta {
    ScopeDelta {
        label: FieldOp::set(value.to_string()),
        ..Default::default()
    }
}

fn part_delta(segment: PartSegment) -> ScopeDelta {
    ScopeDelta {
        part: PartDelta {
            segment: SegmentArg::Literal { segment },
            start_new: false,
        },
        ..Default::default()
    }
}

fn annotate() -> ModelNode {
    ModelNode::annotate(AnnotateCall::default())
}

fn render(
    config: RenderConfig,
    tree: &ModelNode,
) -> (RenderSummary, MockGeometry) {
    let mut mock = MockGeometry::new();
    let summary = Annotator::new(config).render(tree, &mut mock).unwrap();
    (summary, mock)
}

// ── Scope Inheritance ──────────────────────────────────────────────────────

#[test]
fn label_is_inherited_by_descendants() {
    let tree = ModelNode::scope(
        label_delta("Gear"),
        vec![ModelNode::shape(box_shape(), vec![annotate()])],
    );
    let (summary, mock) = render(RenderConfig::default(), &tree);

    assert_eq!(mock.texts.len(), 1);
    assert_eq!(mock.texts[0].content, "Gear");
    assert_eq!(mock.strokes.len(), 1); // the leader
    assert_eq!(summary.emitted, 2);
}

#[test]
fn sibling_scopes_are_isolated() {
    // The second subtree runs after the first set a different label;
    // it must still see the outer value.
    let tree = ModelNode::scope(
        label_delta("Outer"),
        vec![
            ModelNode::scope(
                label_delta("Inner"),
                vec![ModelNode::shape(box_shape(), vec![annotate()])],
            ),
            ModelNode::shape(box_shape(), vec![annotate()]),
        ],
    );
    let (_, mock) = render(RenderConfig::default(), &tree);

    let contents: Vec<&str> = mock.texts.iter().map(|t| t.content.as_str()).collect();
    assert_eq!(contents, vec!["Inner", "Outer"]);
}

#[test]
fn clearing_a_label_hides_it_from_descendants() {
    let clear = ScopeDelta {
        label: FieldOp::Clear,
        ..Default::default()
    };
    let tree = ModelNode::scope(
        label_delta("Outer"),
        vec![ModelNode::scope(
            clear,
            vec![ModelNode::shape(box_shape(), vec![annotate()])],
        )],
    );
    let (summary, mock) = render(RenderConfig::default(), &tree);

    // Nothing left to show: no leader, no text.
    assert_eq!(summary.emitted, 0);
    assert!(mock.texts.is_empty());
    assert!(mock.strokes.is_empty());
}

#[test]
fn empty_scope_is_fatal() {
    let tree = ModelNode::scope(label_delta("x"), vec![]);
    let mut mock = MockGeometry::new();
    let err = Annotator::new(RenderConfig::default())
        .render(&tree, &mut mock)
        .unwrap_err();
    assert!(matches!(err, AnnotateError::EmptyScope));
}

#[test]
fn empty_annotation_renders_nothing_but_succeeds() {
    let tree = ModelNode::shape(box_shape(), vec![annotate()]);
    let (summary, mock) = render(RenderConfig::default(), &tree);

    assert_eq!(summary.emitted, 0);
    assert_eq!(mock.emitted(), 0);
    assert!(summary.warnings.is_empty());
}

#[test]
fn show_set_restricts_blocks() {
    let delta = ScopeDelta {
        label: FieldOp::set("Gear".to_string()),
        description: FieldOp::set("drives the axle".to_string()),
        ..Default::default()
    };
    let call = AnnotateCall {
        show: ShowSet::Only {
            kinds: vec![BlockKind::Description],
        },
        ..Default::default()
    };
    let tree = ModelNode::scope(
        delta,
        vec![ModelNode::shape(
            box_shape(),
            vec![ModelNode::annotate(call)],
        )],
    );
    let (_, mock) = render(RenderConfig::default(), &tree);

    assert_eq!(mock.texts.len(), 1);
    assert_eq!(mock.texts[0].content, "drives the axle");
}

#[test]
fn show_filter_parses_with_warnings() {
    let mut warnings = Vec::new();
    assert_eq!(ShowSet::parse("all", &mut warnings), ShowSet::All);
    assert!(warnings.is_empty());

    // A bare scalar becomes a single-item list, with a warning.
    let set = ShowSet::parse("label", &mut warnings);
    assert_eq!(
        set,
        ShowSet::Only {
            kinds: vec![BlockKind::Label]
        }
    );
    assert_eq!(warnings.len(), 1);

    let set = ShowSet::parse("label, bogus, desc", &mut warnings);
    assert!(set.includes(BlockKind::Label));
    assert!(set.includes(BlockKind::Description));
    assert!(!set.includes(BlockKind::Spec));
    assert!(warnings.iter().any(|w| w.contains("bogus")));
}

#[test]
fn spec_rows_render_as_lines() {
    let delta = ScopeDelta {
        spec_rows: FieldOp::set(vec![
            SpecRow::new("material", "steel"),
            SpecRow::new("finish", "anodized"),
        ]),
        ..Default::default()
    };
    let tree = ModelNode::scope(
        delta,
        vec![ModelNode::shape(box_shape(), vec![annotate()])],
    );
    let (_, mock) = render(RenderConfig::default(), &tree);

    assert_eq!(mock.texts.len(), 1);
    assert_eq!(mock.texts[0].content, "material: steel\nfinish: anodized");
}

#[test]
fn object_snapshot_renders_name_and_rows() {
    let delta = ScopeDelta {
        object: FieldOp::set(ObjectSnapshot::new(
            "Bearing",
            vec![SpecRow::new("bore", "8"), SpecRow::new("od", "22")],
        )),
        ..Default::default()
    };
    let tree = ModelNode::scope(
        delta,
        vec![ModelNode::shape(box_shape(), vec![annotate()])],
    );
    let (_, mock) = render(RenderConfig::default(), &tree);

    assert_eq!(mock.texts.len(), 1);
    assert_eq!(mock.texts[0].content, "Bearing\nbore: 8\nod: 22");
}

#[test]
fn clearing_motion_makes_render_point_fatal() {
    let set = ScopeDelta {
        motion: FieldOp::set(MotionSpec::new(MotionKind::Rotational)),
        ..Default::default()
    };
    let clear = ScopeDelta {
        motion: FieldOp::Clear,
        ..Default::default()
    };
    let tree = ModelNode::scope(
        set,
        vec![ModelNode::scope(
            clear,
            vec![ModelNode::shape(
                box_shape(),
                vec![ModelNode::motion(MotionCall::default())],
            )],
        )],
    );
    let mut mock = MockGeometry::new();
    let err = Annotator::new(RenderConfig::default())
        .render(&tree, &mut mock)
        .unwrap_err();
    assert!(matches!(err, AnnotateError::MissingMotion));
}

#[test]
fn stacked_blocks_skip_empty_content() {
    let mock = MockGeometry::new();
    let blocks = vec![
        ("Gear".to_string(), 4.0),
        ("".to_string(), 4.0),
        ("a\nb".to_string(), 2.0),
        ("tail".to_string(), 4.0),
    ];
    let offsets = annotate_engine::flyout::stack_blocks(&blocks, &mock);
    assert_eq!(offsets, vec![0.0, 4.0, 8.0]);
}

// ── Part Numbers ───────────────────────────────────────────────────────────

#[test]
fn part_numbers_accumulate_down_the_tree() {
    let config = RenderConfig {
        list_parts: true,
        ..Default::default()
    };
    let tree = ModelNode::scope(
        part_delta(PartSegment::text("a")),
        vec![ModelNode::shape(
            box_shape(),
            vec![ModelNode::scope(
                part_delta(PartSegment::number(1)),
                vec![ModelNode::shape(box_shape(), vec![])],
            )],
        )],
    );
    let (summary, _) = render(config, &tree);

    assert_eq!(summary.parts, vec!["a", "a-1"]);
}

#[test]
fn start_new_discards_ancestor_segments() {
    let config = RenderConfig {
        list_parts: true,
        ..Default::default()
    };
    let restart = ScopeDelta {
        part: PartDelta {
            segment: SegmentArg::Literal {
                segment: PartSegment::text("fresh"),
            },
            start_new: true,
        },
        ..Default::default()
    };
    let tree = ModelNode::scope(
        part_delta(PartSegment::text("a")),
        vec![ModelNode::scope(
            restart,
            vec![ModelNode::shape(box_shape(), vec![])],
        )],
    );
    let (summary, _) = render(config, &tree);

    assert_eq!(summary.parts, vec!["fresh"]);
}

#[test]
fn mech_id_and_label_prefix_part_numbers() {
    let config = RenderConfig {
        list_parts: true,
        mech_id: Some("M7".to_string()),
        ..Default::default()
    };
    let delta = ScopeDelta {
        label: FieldOp::set("axle".to_string()),
        part: PartDelta {
            segment: SegmentArg::Literal {
                segment: PartSegment::number(3),
            },
            start_new: false,
        },
        ..Default::default()
    };
    let tree = ModelNode::scope(delta, vec![ModelNode::shape(box_shape(), vec![])]);
    let (summary, _) = render(config, &tree);

    assert_eq!(summary.parts, vec!["M7-axle-3"]);
}

#[test]
fn distribute_supplies_index_segments() {
    let config = RenderConfig {
        list_parts: true,
        ..Default::default()
    };
    let indexed = ScopeDelta {
        part: PartDelta {
            segment: SegmentArg::UseIndex,
            start_new: false,
        },
        ..Default::default()
    };
    let tree = ModelNode::scope(
        part_delta(PartSegment::text("x")),
        vec![ModelNode::distribute(
            vec![
                AnchorSpec::cardinal([1.0, 0.0, 0.0]),
                AnchorSpec::cardinal([-1.0, 0.0, 0.0]),
                AnchorSpec::cardinal([0.0, 1.0, 0.0]),
            ],
            vec![ModelNode::scope(
                indexed,
                vec![ModelNode::shape(box_shape(), vec![])],
            )],
        )],
    );
    let (summary, _) = render(config, &tree);

    assert_eq!(summary.parts, vec!["x-0", "x-1", "x-2"]);
}

#[test]
fn index_segment_outside_distribute_is_fatal() {
    let indexed = ScopeDelta {
        part: PartDelta {
            segment: SegmentArg::UseIndex,
            start_new: false,
        },
        ..Default::default()
    };
    let tree = ModelNode::scope(indexed, vec![ModelNode::shape(box_shape(), vec![])]);
    let mut mock = MockGeometry::new();
    let err = Annotator::new(RenderConfig::default())
        .render(&tree, &mut mock)
        .unwrap_err();
    assert!(matches!(err, AnnotateError::IndexOutsideDistribute));
}

#[test]
fn highlight_filter_hides_other_parts() {
    let config = RenderConfig {
        list_parts: true,
        highlight: Some("a-1".to_string()),
        ..Default::default()
    };
    let tree = ModelNode::scope(
        part_delta(PartSegment::text("a")),
        vec![ModelNode::shape(
            box_shape(),
            vec![
                annotate(),
                ModelNode::scope(
                    part_delta(PartSegment::number(1)),
                    vec![ModelNode::shape(box_shape(), vec![annotate()])],
                ),
            ],
        )],
    );
    let (summary, mock) = render(config, &tree);

    // Only the matching part is listed, and only its annotation renders.
    assert_eq!(summary.parts, vec!["a-1"]);
    assert_eq!(mock.texts.len(), 1);
    assert_eq!(mock.texts[0].content, "a-1");
}

#[test]
fn hide_tags_suppress_a_part() {
    let config = RenderConfig {
        list_parts: true,
        hide_tags: vec!["ghost".to_string()],
        ..Default::default()
    };
    let tree = ModelNode::scope(
        part_delta(PartSegment::text("a")),
        vec![ModelNode::tagged_shape(
            box_shape(),
            vec!["ghost".to_string()],
            vec![annotate()],
        )],
    );
    let (summary, mock) = render(config, &tree);

    assert!(summary.parts.is_empty());
    assert_eq!(mock.emitted(), 0);
}

// ── Parting Out ────────────────────────────────────────────────────────────

#[test]
fn exploded_render_is_deterministic() {
    let config = RenderConfig {
        expand: true,
        expand_step: 20.0,
        ..Default::default()
    };
    let tree = ModelNode::scope(
        label_delta("Gear"),
        vec![ModelNode::scope(
            part_delta(PartSegment::text("g")),
            vec![ModelNode::shape(box_shape(), vec![annotate()])],
        )],
    );
    let (_, first) = render(config.clone(), &tree);
    let (_, second) = render(config, &tree);

    assert_eq!(first.texts, second.texts);
    assert_eq!(first.strokes, second.strokes);
}

#[test]
fn expansion_displaces_annotations() {
    let assembled = RenderConfig::default();
    let exploded = RenderConfig {
        expand: true,
        expand_step: 20.0,
        ..Default::default()
    };
    let tree = ModelNode::scope(
        label_delta("Gear"),
        vec![ModelNode::scope(
            part_delta(PartSegment::text("g")),
            vec![ModelNode::shape(box_shape(), vec![annotate()])],
        )],
    );
    let (_, at_rest) = render(assembled, &tree);
    let (_, blown_out) = render(exploded, &tree);

    assert_eq!(at_rest.texts.len(), 1);
    assert_eq!(blown_out.texts.len(), 1);
    assert_ne!(at_rest.texts[0].at, blown_out.texts[0].at);
}

#[test]
fn expansion_at_time_one_matches_assembled_positions() {
    let assembled = RenderConfig::default();
    let timed_out = RenderConfig {
        expand: true,
        expand_step: 20.0,
        expand_time: 1.0,
        ..Default::default()
    };
    let tree = ModelNode::scope(
        part_delta(PartSegment::text("g")),
        vec![ModelNode::scope(
            label_delta("Gear"),
            vec![ModelNode::shape(box_shape(), vec![annotate()])],
        )],
    );
    let (_, at_rest) = render(assembled, &tree);
    let (_, closed_up) = render(timed_out, &tree);

    assert_eq!(at_rest.texts[0].at, closed_up.texts[0].at);
}

// ── Motion ─────────────────────────────────────────────────────────────────

#[test]
fn rotational_motion_emits_arc_and_dashed_axis() {
    let delta = ScopeDelta {
        motion: FieldOp::set(MotionSpec::new(MotionKind::Rotational)),
        ..Default::default()
    };
    let tree = ModelNode::scope(
        delta,
        vec![ModelNode::shape(
            box_shape(),
            vec![ModelNode::motion(MotionCall::default())],
        )],
    );
    let (summary, mock) = render(RenderConfig::default(), &tree);

    assert_eq!(summary.emitted, 2);
    assert_eq!(mock.strokes.len(), 2);
    assert!(mock.strokes.iter().any(|s| s.dashed));
    assert!(mock.strokes.iter().any(|s| !s.dashed && s.points.len() > 2));
}

#[test]
fn reciprocal_motion_emits_two_arrows() {
    let delta = ScopeDelta {
        motion: FieldOp::set(MotionSpec::new(MotionKind::Reciprocal)),
        ..Default::default()
    };
    let tree = ModelNode::scope(
        delta,
        vec![ModelNode::shape(
            box_shape(),
            vec![ModelNode::motion(MotionCall::default())],
        )],
    );
    let (summary, mock) = render(RenderConfig::default(), &tree);

    assert_eq!(summary.emitted, 2);
    assert!(mock.strokes.iter().all(|s| s.arrow_end));
}

#[test]
fn motion_without_descriptor_is_fatal() {
    let tree = ModelNode::shape(
        box_shape(),
        vec![ModelNode::motion(MotionCall::default())],
    );
    let mut mock = MockGeometry::new();
    let err = Annotator::new(RenderConfig::default())
        .render(&tree, &mut mock)
        .unwrap_err();
    assert!(matches!(err, AnnotateError::MissingMotion));
}

#[test]
fn unresolvable_pivot_anchor_is_fatal() {
    let delta = ScopeDelta {
        motion: FieldOp::set(
            MotionSpec::new(MotionKind::Rotational)
                .with_pivot(AnchorSpec::named("nonexistent-hinge")),
        ),
        ..Default::default()
    };
    let tree = ModelNode::scope(
        delta,
        vec![ModelNode::shape(
            box_shape(),
            vec![ModelNode::motion(MotionCall::default())],
        )],
    );
    let mut mock = MockGeometry::new();
    let err = Annotator::new(RenderConfig::default())
        .render(&tree, &mut mock)
        .unwrap_err();
    assert!(matches!(err, AnnotateError::Geom(_)));
}

#[test]
fn out_of_range_rotation_limit_warns_and_clamps() {
    let delta = ScopeDelta {
        motion: FieldOp::set(MotionSpec::new(MotionKind::Rotational).with_limit(540.0)),
        ..Default::default()
    };
    let tree = ModelNode::scope(
        delta,
        vec![ModelNode::shape(
            box_shape(),
            vec![ModelNode::motion(MotionCall::default())],
        )],
    );
    let (summary, _) = render(RenderConfig::default(), &tree);

    assert_eq!(summary.warnings.len(), 1);
    assert!(summary.warnings[0].contains("clamped"));
}

// ── Dimensions ─────────────────────────────────────────────────────────────

#[test]
fn measuring_a_box_emits_three_axis_records() {
    let tree = ModelNode::shape(
        box_shape(),
        vec![ModelNode::measure(MeasureCall::default())],
    );
    let (_, mock) = render(RenderConfig::default(), &tree);

    let mut contents: Vec<&str> = mock.texts.iter().map(|t| t.content.as_str()).collect();
    contents.sort_unstable();
    assert_eq!(contents, vec!["10", "20", "30"]);
}

#[test]
fn measuring_a_cylinder_emits_diameter_and_length() {
    let cylinder = ShapeDesc::Conoid {
        r1: 5.0,
        r2: 5.0,
        length: 40.0,
        axis: [0.0, 0.0, 1.0],
    };
    let tree = ModelNode::shape(cylinder, vec![ModelNode::measure(MeasureCall::default())]);
    let (_, mock) = render(RenderConfig::default(), &tree);

    let mut contents: Vec<&str> = mock.texts.iter().map(|t| t.content.as_str()).collect();
    contents.sort_unstable();
    assert_eq!(contents, vec!["40", "Ø10"]);
}

#[test]
fn accumulated_dimension_records_render_with_boundary() {
    let delta = ScopeDelta {
        dimensions: DimDelta {
            records: vec![DimensionRecord::linear(
                8.0,
                Placement::at(AnchorSpec::cardinal([0.0, 0.0, 1.0]), [1.0, 0.0, 0.0]),
            )
            .with_units("mm")],
            reset: false,
        },
        ..Default::default()
    };
    let tree = ModelNode::scope(
        delta,
        vec![ModelNode::shape(
            box_shape(),
            vec![ModelNode::measure(MeasureCall::default())],
        )],
    );
    let (_, mock) = render(RenderConfig::default(), &tree);

    assert_eq!(mock.texts.len(), 4);
    assert!(mock.texts.iter().any(|t| t.content == "8mm"));
}

#[test]
fn measure_without_shape_is_fatal() {
    let tree = ModelNode::scope(
        label_delta("orphan"),
        vec![ModelNode::measure(MeasureCall::default())],
    );
    let mut mock = MockGeometry::new();
    let err = Annotator::new(RenderConfig::default())
        .render(&tree, &mut mock)
        .unwrap_err();
    assert!(matches!(err, AnnotateError::MissingShape { .. }));
}

#[test]
fn flyout_without_position_substitutes_origin_with_warning() {
    let flyout = DimensionRecord::flyout(Placement::at(
        AnchorSpec::cardinal([0.0, 0.0, 1.0]),
        [1.0, 0.0, 0.0],
    ))
    .with_context("inspection point");
    let delta = ScopeDelta {
        dimensions: DimDelta {
            records: vec![flyout],
            reset: false,
        },
        ..Default::default()
    };
    let tree = ModelNode::scope(
        delta,
        vec![ModelNode::measure(MeasureCall {
            include_boundary: false,
            ..Default::default()
        })],
    );
    let (summary, mock) = render(RenderConfig::default(), &tree);

    assert_eq!(summary.warnings.len(), 1);
    assert!(summary.warnings[0].contains("origin"));
    assert_eq!(mock.texts.len(), 1);
    assert_eq!(mock.texts[0].content, "inspection point");
}

#[test]
fn diameter_flyout_emits_target_ring() {
    let flyout = DimensionRecord::diameter(
        12.0,
        Placement::at(AnchorSpec::cardinal([0.0, 0.0, 1.0]), [1.0, 0.0, 0.0]),
    )
    .as_flyout();
    let delta = ScopeDelta {
        dimensions: DimDelta {
            records: vec![flyout],
            reset: false,
        },
        ..Default::default()
    };
    let tree = ModelNode::scope(
        delta,
        vec![ModelNode::shape(
            box_shape(),
            vec![ModelNode::measure(MeasureCall {
                include_boundary: false,
                ..Default::default()
            })],
        )],
    );
    let (_, mock) = render(RenderConfig::default(), &tree);

    assert_eq!(mock.regions.len(), 1);
    assert!(matches!(
        mock.regions[0].size,
        geom_bridge::RegionSize::Cylinder { r, .. } if (r - 6.0).abs() < 1e-9
    ));
}
