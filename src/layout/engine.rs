//! Anti-overlap layout
//!
//! Rows are laid out independently, one per generation level. Within a row
//! every slot gets the same spacing, derived from the widest label in the
//! row, so no two footprints can touch regardless of which node ends up
//! next to which. The row height grows with the tallest footprint for the
//! same reason vertically.

use tracing::debug;

use crate::model::{FamilyNode, TreeModel};

use super::config::LayoutConfig;
use super::links::derive_links;
use super::text::{widest_line, wrap_text, TextMeasure};
use super::types::{BoundingBox, LabelBlock, PlacedNode, Point, TreeLayout};

/// Wrapped labels of one node, before it has a position
#[derive(Debug, Clone)]
struct MeasuredLabels {
    name_lines: Vec<String>,
    name_width: f64,
    relationship_lines: Vec<String>,
    relationship_width: f64,
}

impl MeasuredLabels {
    fn measure(node: &FamilyNode, config: &LayoutConfig, measure: &dyn TextMeasure) -> Self {
        let name_lines = wrap_text(
            &node.name,
            config.max_text_width,
            config.name_font_size,
            measure,
        );
        let name_width = widest_line(&name_lines, config.name_font_size, measure);
        let relationship_lines = if node.is_root {
            Vec::new()
        } else {
            wrap_text(
                &node.relationship_label,
                config.max_text_width,
                config.relationship_font_size,
                measure,
            )
        };
        let relationship_width = widest_line(
            &relationship_lines,
            config.relationship_font_size,
            measure,
        );
        Self {
            name_lines,
            name_width,
            relationship_lines,
            relationship_width,
        }
    }

    /// Width of the widest wrapped line of either label
    fn widest_text(&self) -> f64 {
        self.name_width.max(self.relationship_width)
    }

    /// Width of the whole footprint: circle or padded label panel
    fn footprint_width(&self, config: &LayoutConfig) -> f64 {
        (2.0 * config.node_radius).max(self.widest_text() + 2.0 * config.panel_padding.0)
    }

    /// Height from the top of the circle to the bottom of the last panel
    fn footprint_height(&self, config: &LayoutConfig) -> f64 {
        let mut height = 2.0 * config.node_radius + config.label_gap;
        height += panel_height(self.name_lines.len(), config.name_font_size, config);
        if !self.relationship_lines.is_empty() {
            height += config.panel_gap;
            height += panel_height(
                self.relationship_lines.len(),
                config.relationship_font_size,
                config,
            );
        }
        height
    }
}

fn panel_height(lines: usize, font_size: f64, config: &LayoutConfig) -> f64 {
    lines as f64 * config.line_height(font_size) + 2.0 * config.panel_padding.1
}

fn label_block(
    lines: Vec<String>,
    text_width: f64,
    font_size: f64,
    center_x: f64,
    top: f64,
    config: &LayoutConfig,
) -> LabelBlock {
    let (pad_x, _) = config.panel_padding;
    let width = text_width + 2.0 * pad_x;
    let height = panel_height(lines.len(), font_size, config);
    LabelBlock {
        lines,
        font_size,
        line_height: config.line_height(font_size),
        text_width,
        panel: BoundingBox::new(center_x - width / 2.0, top, width, height),
    }
}

fn place(
    index: usize,
    node: &FamilyNode,
    labels: &MeasuredLabels,
    center: Point,
    config: &LayoutConfig,
) -> PlacedNode {
    let name = label_block(
        labels.name_lines.clone(),
        labels.name_width,
        config.name_font_size,
        center.x,
        center.y + config.node_radius + config.label_gap,
        config,
    );
    let relationship = if labels.relationship_lines.is_empty() {
        None
    } else {
        Some(label_block(
            labels.relationship_lines.clone(),
            labels.relationship_width,
            config.relationship_font_size,
            center.x,
            name.panel.bottom() + config.panel_gap,
            config,
        ))
    };
    PlacedNode {
        index,
        id: node.id.clone(),
        center,
        radius: config.node_radius,
        name,
        relationship,
    }
}

/// Minimum safe spacing between slot centers for a set of labels
fn row_spacing<'a>(
    labels: impl Iterator<Item = &'a MeasuredLabels>,
    config: &LayoutConfig,
) -> f64 {
    let (widest_text, widest_footprint) = labels.fold((0.0_f64, 0.0_f64), |(text, fp), l| {
        (text.max(l.widest_text()), fp.max(l.footprint_width(config)))
    });
    (widest_text + 2.0 * config.node_radius + config.spacing_padding)
        .max(widest_footprint + config.spacing_padding)
        .max(config.min_spacing)
}

/// Horizontal slot centers for a row of `count` nodes
fn slot_positions(
    level: i32,
    count: usize,
    spacing: f64,
    root_x: f64,
    config: &LayoutConfig,
) -> Vec<f64> {
    if level == 0 {
        if count == 1 {
            // Lone peers sit beside the root, never on top of it
            return vec![root_x + config.lateral_offset.max(spacing)];
        }
        return (0..count)
            .map(|i| root_x + spacing * (i as f64 + 1.0))
            .collect();
    }
    let start = root_x - (count as f64 - 1.0) * spacing / 2.0;
    (0..count).map(|i| start + spacing * i as f64).collect()
}

/// Compute positions for every node of the model.
///
/// Positions are written back into the model and returned, together with
/// the label geometry and connector list, as a [`TreeLayout`]. An empty
/// model produces an empty layout.
pub fn compute(
    model: &mut TreeModel,
    config: &LayoutConfig,
    measure: &dyn TextMeasure,
) -> TreeLayout {
    if model.root().is_none() {
        return TreeLayout {
            row_height: config.row_height,
            ..TreeLayout::default()
        };
    }

    let labels: Vec<MeasuredLabels> = model
        .nodes()
        .iter()
        .map(|node| MeasuredLabels::measure(node, config, measure))
        .collect();

    let tallest = labels
        .iter()
        .map(|l| l.footprint_height(config))
        .fold(0.0, f64::max);
    let row_height = config.row_height.max(tallest + config.row_clearance);

    let origin = config.origin;
    let mut placed = Vec::with_capacity(model.len());
    placed.push(place(0, &model.nodes()[0], &labels[0], origin, config));

    for (&level, indices) in model.buckets() {
        if indices.is_empty() {
            continue;
        }

        let mut ordered = indices.clone();
        // Stable: input order is kept within one side
        ordered.sort_by_key(|&i| model.nodes()[i].lineage_side.rank());

        let spacing = if level == 0 {
            // This row shares the root's vertical coordinate
            row_spacing(
                ordered.iter().chain(std::iter::once(&0)).map(|&i| &labels[i]),
                config,
            )
        } else {
            row_spacing(ordered.iter().map(|&i| &labels[i]), config)
        };
        let y = if level == 0 {
            origin.y
        } else {
            origin.y + f64::from(level) * row_height
        };
        let xs = slot_positions(level, ordered.len(), spacing, origin.x, config);

        debug!(level, nodes = ordered.len(), spacing, y, "placed generation row");

        for (&index, x) in ordered.iter().zip(xs) {
            let center = Point::new(x, y);
            placed.push(place(index, &model.nodes()[index], &labels[index], center, config));
        }
    }

    for node in &placed {
        if let Some(model_node) = model.node_mut(node.index) {
            model_node.position = Some(node.center);
        }
    }

    let bounds = placed
        .iter()
        .map(PlacedNode::footprint)
        .reduce(|a, b| a.union(&b))
        .unwrap_or_default();
    let links = derive_links(model, &placed);

    TreeLayout {
        nodes: placed,
        links,
        row_height,
        bounds,
    }
}
