//! End-to-end rendering through the public API

use pretty_assertions::assert_eq;

use family_tree::renderer::{DrawCommand, RecordingCanvas};
use family_tree::{
    render, render_with_config, RenderConfig, Size, SvgConfig, TreeDocument, TreeView,
    ViewportConfig,
};

/// Eight-byte PNG signature
const PNG_AVATAR: &str = "iVBORw0KGgo=";

const FAMILY: &str = r#"{
    "root": {"id": "me", "name": "Ada Lovelace"},
    "generations": [
        {"level": -2, "members": [
            {"id": "gp", "name": "Noel Byron", "relationship": "Grandfather", "side": "MATERNAL"}
        ]},
        {"level": -1, "name": "Mum & Dad", "members": [
            {"id": "mum", "name": "Anne Isabella", "relationship": "Mother", "side": "MATERNAL"},
            {"id": "dad", "name": "Lord Byron", "relationship": "Father", "side": "PATERNAL"}
        ]},
        {"level": 0, "members": [
            {"id": "sis", "name": "Allegra", "relationship": "Half-Sister"},
            {"id": "wm", "name": "William King", "relationship": "Husband", "side": "SPOUSE_FAMILY"}
        ]},
        {"level": 1, "members": [
            {"id": "kid", "name": "Byron King", "relationship": "Son"}
        ]}
    ]
}"#;

fn first_index(svg: &str, needle: &str) -> usize {
    svg.find(needle)
        .unwrap_or_else(|| panic!("missing {needle}"))
}

#[test]
fn test_root_is_centered_on_screen() {
    let svg = render(FAMILY).unwrap();
    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains(r#"viewBox="0 0 1080 1920""#));
    assert!(svg.contains(r#"transform="matrix(1 0 0 1 540 960)""#));
}

#[test]
fn test_default_scale_is_applied() {
    let config = RenderConfig::new()
        .with_svg(SvgConfig::default().with_size(400.0, 400.0))
        .with_viewport(ViewportConfig::default().with_default_scale(2.0));
    let svg = render_with_config(FAMILY, config).unwrap();
    assert!(svg.contains(r#"transform="matrix(2 0 0 2 200 200)""#));
}

#[test]
fn test_every_person_is_drawn_once() {
    let svg = render(FAMILY).unwrap();
    for id in ["gp", "mum", "dad", "sis", "wm", "kid"] {
        let group = format!(r#"class="ft-node" data-id="{id}""#);
        assert_eq!(svg.matches(&group).count(), 1, "{id}");
    }
    assert_eq!(svg.matches(r#"class="ft-root""#).count(), 1);
}

#[test]
fn test_root_is_drawn_last() {
    let svg = render(FAMILY).unwrap();
    let root = first_index(&svg, r#"class="ft-root""#);
    let last_node = svg.rfind(r#"class="ft-node""#).unwrap();
    let connectors = first_index(&svg, r#"class="ft-connectors""#);
    let levels = first_index(&svg, r#"class="ft-level-indicators""#);
    assert!(levels < connectors);
    assert!(connectors < last_node);
    assert!(last_node < root);
}

#[test]
fn test_connector_kinds() {
    let svg = render(FAMILY).unwrap();
    assert_eq!(svg.matches("ft-connector-ancestor").count(), 3);
    assert_eq!(svg.matches("ft-connector-descendant").count(), 1);
    assert_eq!(svg.matches("ft-connector-sibling").count(), 1);
    assert_eq!(svg.matches("ft-connector-lateral").count(), 1);
    // lateral connectors are dashed
    assert_eq!(svg.matches("stroke-dasharray").count(), 1);
}

#[test]
fn test_level_indicators() {
    let svg = render(FAMILY).unwrap();
    for label in [
        ">Grandparents</text>",
        ">Mum &amp; Dad</text>",
        ">You</text>",
        ">Same Generation</text>",
        ">Children</text>",
    ] {
        assert!(svg.contains(label), "{label}");
    }
}

#[test]
fn test_avatar_or_placeholder() {
    let json = format!(
        r#"{{
            "root": {{"id": "me", "name": "ada", "avatar": "data:image/png;base64,{PNG_AVATAR}"}},
            "generations": [{{"level": 1, "members": [
                {{"id": "k", "name": "kid", "avatar": "not base64 at all!"}}
            ]}}]
        }}"#
    );
    let svg = render(&json).unwrap();
    assert_eq!(svg.matches("<image ").count(), 1);
    assert!(svg.contains("<clipPath"));
    assert!(svg.contains(&format!("data:image/png;base64,{PNG_AVATAR}")));
    // placeholder initial for the child only
    assert!(svg.contains(">K</text>"));
    assert!(!svg.contains(">A</text>"));
}

#[test]
fn test_malformed_members_are_skipped() {
    let svg = render(
        r#"{
            "root": {"id": 1, "name": "Ada"},
            "generations": [{"level": -1, "members": [
                {"id": 2},
                {"name": "No Id"},
                {"id": 3, "name": "Kept", "relationship": "Father"}
            ]}]
        }"#,
    )
    .unwrap();
    assert!(svg.contains(">Kept</text>"));
    assert!(!svg.contains("No Id"));
    assert_eq!(svg.matches(r#"class="ft-node""#).count(), 1);
}

#[test]
fn test_extreme_levels_still_render() {
    let svg = render(
        r#"{
            "root": {"id": "me", "name": "Ada"},
            "generations": [
                {"level": -2147483648, "members": [{"id": "old", "name": "Eldest"}]},
                {"level": 2147483647, "members": [{"id": "new", "name": "Youngest"}]}
            ]
        }"#,
    )
    .unwrap();
    assert!(svg.contains(">2147483646x Great-Grandparents</text>"));
    assert!(svg.contains(">2147483645x Great-Grandchildren</text>"));
    assert!(svg.contains(">Eldest</text>"));
}

#[test]
fn test_recording_canvas_sees_same_scene() {
    let doc = TreeDocument::from_json(FAMILY).unwrap();
    let mut view = TreeView::new(Size::new(1080.0, 1920.0));
    view.load(&doc);

    let mut canvas = RecordingCanvas::new();
    view.render(&mut canvas);

    let node_groups = canvas
        .commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::BeginGroup { role, .. } if role == "node" || role == "root"))
        .count();
    assert_eq!(node_groups, 7);
    assert_eq!(canvas.paths().len(), 6);
}

#[test]
fn test_invalid_json_reports_position() {
    let source = "{\n  \"root\": {\"id\": \"a\",, }\n}";
    let err = TreeDocument::from_json(source).unwrap_err();
    let report = err.format(source, "tree.json");
    assert!(report.contains("tree.json"));
    assert!(err.to_string().contains("line 2"));
}
