//! Integration tests for rendering an inferred structure end to end.

use docshape::model::{BBox, TextSpan};
use docshape::{
    structure, to_json, to_markdown, to_report, JsonFormat, RenderOptions, ReportOptions,
};

fn sample_spans() -> Vec<TextSpan> {
    vec![
        TextSpan::new(
            "Field Notes",
            BBox::new(72.0, 40.0, 280.0, 68.0),
            1,
            "Georgia-Bold",
            28.0,
        ),
        TextSpan::new(
            "Day One",
            BBox::new(72.0, 90.0, 160.0, 110.0),
            1,
            "Georgia-Bold",
            22.0,
        ),
        TextSpan::new(
            "We arrived at noon.",
            BBox::new(72.0, 120.0, 380.0, 132.0),
            1,
            "Georgia",
            11.0,
        ),
        TextSpan::new(
            "Rain started at dusk.",
            BBox::new(72.0, 40.0, 380.0, 52.0),
            2,
            "Georgia",
            11.0,
        ),
    ]
}

#[test]
fn test_json_render_round_trips() {
    let doc = structure(&sample_spans(), &[]);

    let pretty = to_json(&doc, JsonFormat::Pretty).unwrap();
    let compact = to_json(&doc, JsonFormat::Compact).unwrap();
    assert!(pretty.contains('\n'));
    assert!(!compact.contains('\n'));

    let back: docshape::DocumentStructure = serde_json::from_str(&pretty).unwrap();
    assert_eq!(back, doc);
}

#[test]
fn test_markdown_outline_structure() {
    let doc = structure(&sample_spans(), &[]);
    let md = to_markdown(&doc, &RenderOptions::new().with_frontmatter(true)).unwrap();

    assert!(md.starts_with("---\n"));
    assert!(md.contains("# Field Notes"));
    assert!(md.contains("## Outline"));
    assert!(md.contains("- Field Notes (p. 1, 28.0pt)"));
    assert!(md.contains("- Day One (p. 1, 22.0pt)"));
    assert!(md.contains("## Page 1"));
    assert!(md.contains("## Page 2"));
    assert!(md.contains("Rain started at dusk."));
}

#[test]
fn test_report_matches_analysis_summary_shape() {
    let doc = structure(&sample_spans(), &[]);
    let report = to_report(&doc, &ReportOptions::default());

    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines[0], "Document Structure:");
    assert_eq!(lines[1], "Title: Field Notes");
    assert_eq!(lines[2], "");
    assert_eq!(lines[3], "Headings (2):");
    assert_eq!(lines[4], "  1. Field Notes (Page 1)");
    assert_eq!(lines[5], "  2. Day One (Page 1)");
    assert_eq!(lines[6], "");
    assert_eq!(lines[7], "Paragraphs: 2");
    assert_eq!(lines[8], "Entities: 0");
}
