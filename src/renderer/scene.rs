//! Scene drawing
//!
//! Draw order: level indicators, connectors, relatives, then the root last
//! so it is never occluded.

use crate::layout::{LabelBlock, LinkKind, PlacedNode, Point, TreeLayout};
use crate::model::{FamilyNode, TreeModel};
use crate::view::Viewport;

use super::canvas::Canvas;
use super::path::connector_path;
use super::style::{TextStyle, TreeStyle};

/// Label of the root's own row
pub const ROOT_LEVEL_LABEL: &str = "You";

fn link_role(kind: LinkKind) -> &'static str {
    match kind {
        LinkKind::Ancestor => "connector-ancestor",
        LinkKind::Descendant => "connector-descendant",
        LinkKind::Lateral => "connector-lateral",
        LinkKind::Sibling => "connector-sibling",
    }
}

/// Draw a laid-out tree through `viewport`. An empty layout draws nothing.
pub fn draw_scene(
    canvas: &mut dyn Canvas,
    model: &TreeModel,
    layout: &TreeLayout,
    viewport: &Viewport,
    style: &TreeStyle,
) {
    if layout.is_empty() {
        return;
    }

    canvas.set_transform(viewport);
    draw_level_indicators(canvas, model, layout, style);
    draw_connectors(canvas, layout, style);

    for placed in layout.nodes.iter().skip(1) {
        if let Some(node) = model.node(placed.index) {
            draw_node(canvas, node, placed, style);
        }
    }
    if let (Some(placed), Some(root)) = (layout.root(), model.root()) {
        draw_node(canvas, root, placed, style);
    }
}

fn draw_level_indicators(
    canvas: &mut dyn Canvas,
    model: &TreeModel,
    layout: &TreeLayout,
    style: &TreeStyle,
) {
    let x = layout.bounds.x - style.level_margin;
    let text = &style.level_indicator;
    let line_height = text.font_size * 1.4;

    canvas.begin_group(None, "level-indicators");
    for level in model.levels() {
        let y = layout.row_y(level);
        if level == 0 {
            canvas.text(ROOT_LEVEL_LABEL, Point::new(x, y), text);
            let has_peers = model.buckets().get(&0).is_some_and(|b| !b.is_empty());
            if has_peers {
                canvas.text(&model.level_label(0), Point::new(x, y + line_height), text);
            }
        } else {
            canvas.text(&model.level_label(level), Point::new(x, y), text);
        }
    }
    canvas.end_group();
}

fn draw_connectors(canvas: &mut dyn Canvas, layout: &TreeLayout, style: &TreeStyle) {
    canvas.begin_group(None, "connectors");
    for link in &layout.links {
        let (Some(from), Some(to)) = (layout.placed(link.from), layout.placed(link.to)) else {
            continue;
        };
        let path = connector_path(link.kind, from, to, style.sibling_bar_rise);
        canvas.begin_group(Some(to.id.as_str()), link_role(link.kind));
        canvas.path(&path, style.connector(link.kind));
        canvas.end_group();
    }
    canvas.end_group();
}

fn draw_node(canvas: &mut dyn Canvas, node: &FamilyNode, placed: &PlacedNode, style: &TreeStyle) {
    let shape = if node.is_root {
        &style.root_node
    } else {
        &style.node
    };

    canvas.begin_group(Some(node.id.as_str()), if node.is_root { "root" } else { "node" });
    canvas.circle(placed.center, placed.radius, shape);

    let inner = (placed.radius - shape.stroke_width).max(0.0);
    match &node.avatar {
        Some(avatar) => canvas.image_in_circle(placed.center, inner, avatar),
        None => {
            canvas.circle(placed.center, inner, &style.placeholder);
            if let Some(initial) = node.initial() {
                let text = style.placeholder_text.sized(placed.radius * 0.7);
                canvas.text(&initial.to_string(), placed.center, &text);
            }
        }
    }

    draw_label(canvas, &placed.name, &style.name_text, style);
    if let Some(relationship) = &placed.relationship {
        draw_label(canvas, relationship, &style.relationship_text, style);
    }
    canvas.end_group();
}

fn draw_label(canvas: &mut dyn Canvas, block: &LabelBlock, text: &TextStyle, style: &TreeStyle) {
    if block.lines.is_empty() {
        return;
    }
    canvas.rounded_rect(block.panel, style.panel_corner_radius, &style.label_panel);
    let text = text.sized(block.font_size);
    for (i, line) in block.lines.iter().enumerate() {
        canvas.text(line, block.line_center(i), &text);
    }
}
