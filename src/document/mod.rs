//! External tree document
//!
//! The network layer hands the core a JSON document describing one root
//! person and the relatives grouped by generation. Every field the layout
//! does not strictly need is optional here; the model builder decides what
//! to drop.

pub mod avatar;

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use crate::error::DocumentError;

pub use avatar::{Avatar, ImageFormat};

/// Identifier as sent by the API: either a string or an integer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(i64),
}

impl RawId {
    /// Normalized string form, `None` when blank
    pub fn normalized(&self) -> Option<String> {
        match self {
            RawId::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            RawId::Number(n) => Some(n.to_string()),
        }
    }
}

/// The viewing subject of a tree
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    #[serde(default)]
    pub id: Option<RawId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Base64 image payload, optionally a `data:` URI
    #[serde(default)]
    pub avatar: Option<String>,
}

/// A relative of the root person
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRecord {
    #[serde(default)]
    pub id: Option<RawId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "relationship")]
    pub relationship_label: Option<String>,
    /// Overrides the enclosing group's level when present
    #[serde(default)]
    pub generation_level: Option<i32>,
    #[serde(default, alias = "generationName")]
    pub generation_label: Option<String>,
    #[serde(default, alias = "side")]
    pub lineage_side: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// All members sharing one generation level
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationGroup {
    pub level: i32,
    #[serde(default, alias = "name")]
    pub label: Option<String>,
    /// Entries that are not member-shaped are skipped with a warning
    #[serde(default, deserialize_with = "lenient_list")]
    pub members: Vec<MemberRecord>,
}

/// A complete tree document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeDocument {
    /// A root that is not person-shaped reads as no root
    #[serde(default, deserialize_with = "lenient_root")]
    pub root: Option<PersonRecord>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub generations: Vec<GenerationGroup>,
}

/// Decode each array entry on its own, dropping the ones that do not fit `T`
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let entries = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            warn!(found = %other, "expected a list in tree document, ignoring it");
            Vec::new()
        }
        None => Vec::new(),
    };
    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(index, error = %e, "skipping malformed entry in tree document");
                None
            }
        })
        .collect())
}

fn lenient_root<'de, D>(deserializer: D) -> Result<Option<PersonRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(value) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match serde_json::from_value(value) {
        Ok(item) => Ok(Some(item)),
        Err(e) => {
            warn!(error = %e, "root person is malformed, ignoring it");
            Ok(None)
        }
    }
}

impl TreeDocument {
    /// Parse a document from JSON text
    pub fn from_json(source: &str) -> Result<Self, DocumentError> {
        serde_json::from_str(source).map_err(DocumentError::from)
    }

    /// Read and parse a document from a file
    pub fn from_file(path: &Path) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Total number of member records across all groups, before validation
    pub fn member_count(&self) -> usize {
        self.generations.iter().map(|g| g.members.len()).sum()
    }
}
