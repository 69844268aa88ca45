//! Connector adjacency
//!
//! Links are only used for drawing. Every relative is connected straight to
//! the root; the generation level alone decides the connector kind.

use crate::model::{FamilyNode, TreeModel};

use super::types::{Link, LinkKind, PlacedNode};

const SIBLING_WORDS: [&str; 3] = ["brother", "sister", "sibling"];

/// Whether a relationship label names a sibling (half- and step- included)
pub fn is_sibling_relationship(label: &str) -> bool {
    let lower = label.to_lowercase();
    if lower.contains("in-law") || lower.contains("in law") {
        return false;
    }
    SIBLING_WORDS.iter().any(|word| lower.contains(word))
}

fn link_kind(node: &FamilyNode) -> LinkKind {
    match node.generation_level {
        level if level < 0 => LinkKind::Ancestor,
        level if level > 0 => LinkKind::Descendant,
        _ if is_sibling_relationship(&node.relationship_label) => LinkKind::Sibling,
        _ => LinkKind::Lateral,
    }
}

/// Connect every placed non-root node to the root
pub fn derive_links(model: &TreeModel, placed: &[PlacedNode]) -> Vec<Link> {
    let Some(root) = placed.first() else {
        return Vec::new();
    };
    placed
        .iter()
        .skip(1)
        .filter_map(|p| {
            let node = model.node(p.index)?;
            Some(Link {
                from: root.index,
                to: p.index,
                kind: link_kind(node),
            })
        })
        .collect()
}
