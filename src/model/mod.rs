//! In-memory family tree model
//!
//! Converts a [`TreeDocument`] into a flat node list plus a map from
//! generation level to the indices of the nodes in that level. The root
//! person is always node `0` when present and is never part of a bucket.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::document::{Avatar, MemberRecord, PersonRecord, TreeDocument};
use crate::layout::Point;

/// Stable identifier of a person
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Branch of the family a relative belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineageSide {
    Paternal,
    #[default]
    Direct,
    Maternal,
    SpouseFamily,
    StepFamily,
}

impl LineageSide {
    /// Left-to-right placement order within a generation row
    pub const ORDER: [LineageSide; 5] = [
        LineageSide::Paternal,
        LineageSide::Direct,
        LineageSide::Maternal,
        LineageSide::SpouseFamily,
        LineageSide::StepFamily,
    ];

    /// Position of this side in [`LineageSide::ORDER`]
    pub fn rank(&self) -> usize {
        match self {
            LineageSide::Paternal => 0,
            LineageSide::Direct => 1,
            LineageSide::Maternal => 2,
            LineageSide::SpouseFamily => 3,
            LineageSide::StepFamily => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LineageSide::Paternal => "PATERNAL",
            LineageSide::Direct => "DIRECT",
            LineageSide::Maternal => "MATERNAL",
            LineageSide::SpouseFamily => "SPOUSE_FAMILY",
            LineageSide::StepFamily => "STEP_FAMILY",
        }
    }

    /// Parse a tag, falling back to [`LineageSide::Direct`] for anything unknown
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            None => LineageSide::Direct,
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                debug!(tag = raw, "unknown lineage side, using DIRECT");
                LineageSide::Direct
            }),
        }
    }
}

impl FromStr for LineageSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "paternal" => Ok(LineageSide::Paternal),
            "direct" => Ok(LineageSide::Direct),
            "maternal" => Ok(LineageSide::Maternal),
            "spousefamily" | "spouse" => Ok(LineageSide::SpouseFamily),
            "stepfamily" | "step" => Ok(LineageSide::StepFamily),
            _ => Err(format!("unknown lineage side '{}'", s)),
        }
    }
}

impl fmt::Display for LineageSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One person rendered in the tree
#[derive(Debug, Clone)]
pub struct FamilyNode {
    pub id: NodeId,
    pub name: String,
    pub email: Option<String>,
    pub is_root: bool,
    /// 0 = root's generation, negative = ancestors, positive = descendants
    pub generation_level: i32,
    pub generation_label: String,
    /// Empty for the root
    pub relationship_label: String,
    pub lineage_side: LineageSide,
    pub avatar: Option<Avatar>,
    /// Scene position, set by the layout engine
    pub position: Option<Point>,
}

impl FamilyNode {
    fn root(id: NodeId, name: String, record: &PersonRecord) -> Self {
        Self {
            id,
            name,
            email: clean(record.email.as_deref()),
            is_root: true,
            generation_level: 0,
            generation_label: String::new(),
            relationship_label: String::new(),
            lineage_side: LineageSide::Direct,
            avatar: decode_avatar(record.avatar.as_deref()),
            position: None,
        }
    }

    /// Initial letter used for the avatar placeholder
    pub fn initial(&self) -> Option<char> {
        self.name
            .chars()
            .find(|c| c.is_alphanumeric())
            .map(|c| c.to_uppercase().next().unwrap_or(c))
    }
}

/// The full node set of one loaded tree
#[derive(Debug, Clone, Default)]
pub struct TreeModel {
    nodes: Vec<FamilyNode>,
    buckets: BTreeMap<i32, Vec<usize>>,
}

impl TreeModel {
    /// An empty model, rendered as nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a model from a document, dropping malformed members
    pub fn build(doc: &TreeDocument) -> Self {
        let Some(root_record) = &doc.root else {
            warn!("tree document has no root person, producing an empty tree");
            return Self::empty();
        };
        let (Some(root_id), Some(root_name)) = (
            root_record.id.as_ref().and_then(|id| id.normalized()),
            clean(root_record.name.as_deref()),
        ) else {
            warn!("root person is missing an id or name, producing an empty tree");
            return Self::empty();
        };

        let mut model = Self::empty();
        let mut seen: HashSet<String> = HashSet::new();
        seen.insert(root_id.clone());
        model
            .nodes
            .push(FamilyNode::root(NodeId(root_id), root_name, root_record));

        for group in &doc.generations {
            for record in &group.members {
                let Some(node) = member_node(record, group.level, group.label.as_deref()) else {
                    continue;
                };
                if !seen.insert(node.id.0.clone()) {
                    warn!(id = %node.id, "duplicate person id in tree document, dropping member");
                    continue;
                }
                let index = model.nodes.len();
                model
                    .buckets
                    .entry(node.generation_level)
                    .or_default()
                    .push(index);
                model.nodes.push(node);
            }
        }

        debug!(
            nodes = model.nodes.len(),
            levels = model.buckets.len(),
            "built tree model"
        );
        model
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// The root node, if the tree is not empty
    pub fn root(&self) -> Option<&FamilyNode> {
        self.nodes.first().filter(|n| n.is_root)
    }

    /// All nodes, root first
    pub fn nodes(&self) -> &[FamilyNode] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> Option<&FamilyNode> {
        self.nodes.get(index)
    }

    pub(crate) fn node_mut(&mut self, index: usize) -> Option<&mut FamilyNode> {
        self.nodes.get_mut(index)
    }

    pub fn find(&self, id: &str) -> Option<&FamilyNode> {
        self.nodes.iter().find(|n| n.id.as_str() == id)
    }

    /// Generation buckets of non-root nodes, sorted by level
    pub fn buckets(&self) -> &BTreeMap<i32, Vec<usize>> {
        &self.buckets
    }

    /// Display name of a generation row.
    ///
    /// Uses the first generation label found in the bucket, falling back to
    /// a name derived from the level.
    pub fn level_label(&self, level: i32) -> String {
        if level == 0 {
            return "Same Generation".to_string();
        }
        self.buckets
            .get(&level)
            .into_iter()
            .flatten()
            .filter_map(|&i| self.nodes.get(i))
            .map(|n| n.generation_label.as_str())
            .find(|label| !label.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| default_generation_label(level))
    }

    /// Distinct generation levels present in the tree, including the root's
    pub fn levels(&self) -> Vec<i32> {
        let mut levels: Vec<i32> = self.buckets.keys().copied().collect();
        if self.root().is_some() && !self.buckets.contains_key(&0) {
            levels.push(0);
            levels.sort_unstable();
        }
        levels
    }
}

/// Conventional name for a generation level relative to the root
pub fn default_generation_label(level: i32) -> String {
    match level {
        0 => "Same Generation".to_string(),
        -1 => "Parents".to_string(),
        1 => "Children".to_string(),
        l if l < 0 => format!("{}Grandparents", great_prefix(l)),
        l => format!("{}Grandchildren", great_prefix(l)),
    }
}

/// Spelled-out "Great-" prefixes stop here; deeper levels get a count
const MAX_SPELLED_GREATS: u32 = 3;

fn great_prefix(level: i32) -> String {
    let greats = level.unsigned_abs().saturating_sub(2);
    if greats <= MAX_SPELLED_GREATS {
        "Great-".repeat(greats as usize)
    } else {
        format!("{}x Great-", greats)
    }
}

fn member_node(
    record: &MemberRecord,
    group_level: i32,
    group_label: Option<&str>,
) -> Option<FamilyNode> {
    let id = record.id.as_ref().and_then(|id| id.normalized());
    let name = clean(record.name.as_deref());
    let (Some(id), Some(name)) = (id, name) else {
        warn!(
            id = ?record.id,
            name = ?record.name,
            "member record is missing an id or name, dropping it"
        );
        return None;
    };

    let generation_level = record.generation_level.unwrap_or(group_level);
    let generation_label = clean(record.generation_label.as_deref())
        .or_else(|| clean(group_label))
        .unwrap_or_default();

    Some(FamilyNode {
        id: NodeId(id),
        name,
        email: clean(record.email.as_deref()),
        is_root: false,
        generation_level,
        generation_label,
        relationship_label: clean(record.relationship_label.as_deref()).unwrap_or_default(),
        lineage_side: LineageSide::from_tag(record.lineage_side.as_deref()),
        avatar: decode_avatar(record.avatar.as_deref()),
        position: None,
    })
}

fn decode_avatar(payload: Option<&str>) -> Option<Avatar> {
    let payload = payload?;
    match Avatar::decode(payload) {
        Ok(avatar) => Some(avatar),
        Err(e) => {
            warn!(error = %e, "could not decode avatar, using placeholder");
            None
        }
    }
}

fn clean(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
