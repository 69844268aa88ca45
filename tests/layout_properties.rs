//! Layout invariants checked over generated family documents
//!
//! Each check loops over fixtures with varying label lengths, row sizes and
//! member orders instead of relying on a single hand-picked tree.

use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use family_tree::layout::{compute, AverageCharWidth, LayoutConfig, LinkKind, Point, TreeLayout};
use family_tree::{TreeDocument, TreeModel};

const SIDES: [&str; 5] = [
    "PATERNAL",
    "DIRECT",
    "MATERNAL",
    "SPOUSE_FAMILY",
    "STEP_FAMILY",
];

fn layout_with(doc: &Value, config: &LayoutConfig) -> (TreeModel, TreeLayout) {
    let doc = TreeDocument::from_json(&doc.to_string()).expect("fixture should parse");
    let mut model = TreeModel::build(&doc);
    let layout = compute(&mut model, config, &AverageCharWidth::default());
    (model, layout)
}

fn layout_of(doc: &Value) -> (TreeModel, TreeLayout) {
    layout_with(doc, &LayoutConfig::default())
}

/// Words of five letters until `len` characters are reached
fn label(seed: usize, len: usize) -> String {
    let letters: Vec<char> = "abcdefghijklmnopqrstuvwxyz".chars().collect();
    let mut out = String::new();
    let mut i = seed;
    while out.len() < len {
        if !out.is_empty() && out.len() % 6 == 5 {
            out.push(' ');
        } else {
            out.push(letters[i % letters.len()]);
            i += 1;
        }
    }
    out
}

/// Five generations, `per_level` members each, sides rotated by `rotation`
fn fixture(label_len: usize, per_level: usize, rotation: usize) -> Value {
    let mut generations = Vec::new();
    let mut next_id = 1;
    for level in -2..=2 {
        let members: Vec<Value> = (0..per_level)
            .map(|i| {
                next_id += 1;
                let len = (label_len * (i + 1)) % 45 + 1;
                json!({
                    "id": format!("m{}", next_id),
                    "name": label(next_id, len),
                    "relationship": label(next_id + 7, (len * 3) % 31 + 1),
                    "side": SIDES[(i + rotation) % SIDES.len()],
                })
            })
            .collect();
        generations.push(json!({ "level": level, "members": members }));
    }
    json!({
        "root": { "id": "root", "name": label(0, label_len.max(1)) },
        "generations": generations,
    })
}

fn assert_no_overlap(layout: &TreeLayout) {
    for (i, a) in layout.nodes.iter().enumerate() {
        for b in &layout.nodes[i + 1..] {
            assert!(
                !a.footprint().intersects(&b.footprint()),
                "{} {:?} overlaps {} {:?}",
                a.id,
                a.footprint(),
                b.id,
                b.footprint()
            );
        }
    }
}

fn positions(layout: &TreeLayout) -> Vec<(String, f64, f64)> {
    layout
        .nodes
        .iter()
        .map(|n| (n.id.to_string(), n.center.x, n.center.y))
        .collect()
}

fn summary(layout: &TreeLayout) -> String {
    layout
        .nodes
        .iter()
        .map(|n| format!("{} ({:.1}, {:.1})", n.id, n.center.x, n.center.y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_footprints_never_overlap() {
    for label_len in [1, 4, 9, 16, 27, 40, 80] {
        for per_level in [1, 2, 3, 6] {
            for rotation in 0..SIDES.len() {
                let (_, layout) = layout_of(&fixture(label_len, per_level, rotation));
                assert_eq!(layout.nodes.len(), 1 + 5 * per_level);
                assert_no_overlap(&layout);
            }
        }
    }
}

#[test]
fn test_footprints_never_overlap_with_small_config() {
    let config = LayoutConfig::default()
        .with_node_radius(12.0)
        .with_row_height(40.0)
        .with_min_spacing(10.0)
        .with_lateral_offset(0.0)
        .with_max_text_width(60.0);
    for label_len in [3, 20, 44] {
        for per_level in [1, 4] {
            let (_, layout) = layout_with(&fixture(label_len, per_level, 1), &config);
            assert_no_overlap(&layout);
        }
    }
}

#[test]
fn test_root_is_always_at_origin() {
    for label_len in [1, 30] {
        for per_level in [0, 1, 5] {
            let (model, layout) = layout_of(&fixture(label_len, per_level, 0));
            let root = layout.root().expect("root");
            assert_eq!(root.center, Point::new(0.0, 0.0));
            assert_eq!(model.root().and_then(|r| r.position), Some(Point::new(0.0, 0.0)));
        }
    }

    let config = LayoutConfig::default().with_origin(100.0, 50.0);
    let (_, layout) = layout_with(&fixture(10, 3, 2), &config);
    assert_eq!(layout.root().expect("root").center, Point::new(100.0, 50.0));
    assert_no_overlap(&layout);
}

#[test]
fn test_same_document_same_positions() {
    for rotation in 0..SIDES.len() {
        let doc = fixture(13, 4, rotation);
        let (_, first) = layout_of(&doc);
        let (_, second) = layout_of(&doc);
        assert_eq!(positions(&first), positions(&second));
    }
}

#[test]
fn test_rows_follow_generation_levels() {
    let (model, layout) = layout_of(&fixture(8, 2, 0));
    for placed in &layout.nodes {
        let node = model.node(placed.index).expect("model node");
        let expected = f64::from(node.generation_level) * layout.row_height;
        assert_eq!(placed.center.y, expected, "{}", placed.id);
        assert_eq!(node.position, Some(placed.center));
    }
}

#[test]
fn test_side_order_ignores_input_order() {
    for rotation in 0..SIDES.len() {
        let (model, layout) = layout_of(&fixture(6, 5, rotation));
        for level in -2..=2 {
            let mut row: Vec<_> = layout
                .nodes
                .iter()
                .filter(|p| {
                    let node = model.node(p.index).expect("model node");
                    !node.is_root && node.generation_level == level
                })
                .collect();
            row.sort_by(|a, b| a.center.x.total_cmp(&b.center.x));
            let sides: Vec<&str> = row
                .iter()
                .filter_map(|p| model.node(p.index))
                .map(|n| n.lineage_side.as_str())
                .collect();
            assert_eq!(sides, SIDES.to_vec(), "level {} rotation {}", level, rotation);
        }
    }
}

#[test]
fn test_parent_and_child_align_with_root() {
    let (_, layout) = layout_of(&json!({
        "root": { "id": "a", "name": "A" },
        "generations": [
            { "level": -1, "members": [
                { "id": "f", "name": "Father of A", "side": "PATERNAL" }
            ]},
            { "level": 1, "members": [
                { "id": "c", "name": "Child of A", "side": "DIRECT" }
            ]}
        ]
    }));

    insta::assert_snapshot!(summary(&layout), @r"
    a (0.0, 0.0)
    f (0.0, -220.0)
    c (0.0, 220.0)
    ");

    let kinds: Vec<LinkKind> = layout.links.iter().map(|l| l.kind).collect();
    assert_eq!(kinds, vec![LinkKind::Ancestor, LinkKind::Descendant]);
}

#[test]
fn test_parents_are_ordered_by_side() {
    let (_, layout) = layout_of(&json!({
        "root": { "id": "a", "name": "Ann" },
        "generations": [
            { "level": -1, "members": [
                { "id": "m", "name": "Cat", "relationship": "Mother", "side": "MATERNAL" },
                { "id": "f", "name": "Bob", "relationship": "Father", "side": "PATERNAL" }
            ]},
            { "level": 1, "members": [
                { "id": "c", "name": "Dan", "relationship": "Son" }
            ]}
        ]
    }));

    insta::assert_snapshot!(summary(&layout), @r"
    a (0.0, 0.0)
    f (-81.6, -220.0)
    m (81.6, -220.0)
    c (0.0, 220.0)
    ");
}

#[test]
fn test_same_generation_sits_right_of_root() {
    let (_, layout) = layout_of(&json!({
        "root": { "id": "a", "name": "Ann" },
        "generations": [
            { "level": 0, "members": [
                { "id": "w", "name": "Wes", "relationship": "Husband", "side": "SPOUSE_FAMILY" },
                { "id": "b", "name": "Bo", "relationship": "Brother", "side": "DIRECT" }
            ]}
        ]
    }));

    let root = layout.root().expect("root").center;
    let b = layout.nodes.iter().find(|n| n.id.as_str() == "b").expect("b");
    let w = layout.nodes.iter().find(|n| n.id.as_str() == "w").expect("w");
    assert!(root.x < b.center.x && b.center.x < w.center.x);
    assert_eq!(b.center.y, root.y);
    assert_eq!(w.center.y, root.y);

    let kinds: Vec<LinkKind> = layout.links.iter().map(|l| l.kind).collect();
    assert_eq!(kinds, vec![LinkKind::Sibling, LinkKind::Lateral]);
    assert!(kinds.iter().all(|k| !k.is_vertical()));
}

#[test]
fn test_long_labels_push_neighbours_apart() {
    let long_name = "Bartholomew Fitzgerald Montgomery Junior";
    let long_relationship = "Paternal grandmother's brother";
    assert_eq!(long_name.len(), 40);
    assert_eq!(long_relationship.len(), 30);

    let (_, layout) = layout_of(&json!({
        "root": { "id": "a", "name": "Ann" },
        "generations": [
            { "level": -1, "members": [
                { "id": "x", "name": "Al", "relationship": "Uncle", "side": "PATERNAL" },
                { "id": "long", "name": long_name, "relationship": long_relationship, "side": "DIRECT" },
                { "id": "y", "name": "Jo", "relationship": "Aunt", "side": "MATERNAL" }
            ]}
        ]
    }));
    assert_no_overlap(&layout);

    let long = layout
        .nodes
        .iter()
        .find(|n| n.id.as_str() == "long")
        .expect("long");
    assert!(long.name.lines.len() > 1);

    let xs: Vec<f64> = layout.nodes[1..].iter().map(|n| n.center.x).collect();
    let gap = xs[1] - xs[0];
    assert!(gap >= long.footprint().width, "gap {} too small", gap);
    assert_eq!(xs[2] - xs[1], gap);
}
