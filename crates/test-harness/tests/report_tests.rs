use redline_types::RenderConfig;
use test_harness::helpers::*;
use test_harness::report::{part_lines, write_part_lines};
use test_harness::{RenderReport, SceneBuilder};

#[test]
fn part_lines_are_one_per_part_with_duplicates() {
    let parts = vec!["a".to_string(), "a-1".to_string(), "a-1".to_string()];
    assert_eq!(part_lines(&parts), "PART:a\nPART:a-1\nPART:a-1\n");
}

#[test]
fn part_lines_write_to_any_writer() {
    let mut buf = Vec::new();
    write_part_lines(&mut buf, &["x-0".to_string()]).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "PART:x-0\n");
}

#[test]
fn report_summarizes_a_render() {
    let config = RenderConfig {
        list_parts: true,
        ..Default::default()
    };
    let (summary, mock) = SceneBuilder::new()
        .scope(label("Gear"), |b| {
            b.scope(part("g"), |b| {
                b.shape(box_shape(10.0, 10.0, 10.0), |b| b.annotate())
            })
        })
        .render(config)
        .unwrap();

    // Label and part-number blocks, one leader stroke.
    let text = RenderReport::new(&summary, &mock).to_text();
    assert!(text.contains("PART:Gear-g"));
    assert!(text.contains("2 text"));
    assert!(text.contains("1 strokes"));
}
