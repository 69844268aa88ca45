//! Stylesheet system for tree colour palettes
//!
//! A stylesheet maps colour tokens (`root-fill`, `connector-lineage`, ...)
//! to concrete CSS colours. Renderers never read a stylesheet directly; it
//! is resolved once into an immutable [`TreeStyle`](crate::renderer::TreeStyle).

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing stylesheets
#[derive(Error, Debug)]
pub enum StylesheetError {
    #[error("Failed to read stylesheet file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse stylesheet TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// A stylesheet mapping colour tokens to concrete values
#[derive(Debug, Clone)]
pub struct Stylesheet {
    /// Optional name for the stylesheet
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    /// Color mappings: token name -> CSS color
    pub colors: HashMap<String, String>,
}

/// TOML structure for deserializing stylesheets
#[derive(Deserialize)]
struct TomlStylesheet {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    colors: HashMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

/// Default palette: blue for relatives, orange for the viewing subject
const DEFAULT_PALETTE: &str = r##"
[colors]
background = "#fafafa"

# The viewing subject
root-fill = "#fff3e0"
root-stroke = "#e65100"

# Every other relative
node-fill = "#e3f2fd"
node-stroke = "#1565c0"

# Drawn when a node has no avatar
placeholder-fill = "#bbdefb"
placeholder-text = "#1565c0"

# Label panels
label-panel = "#ffffff"
label-panel-stroke = "#dddddd"
label-text = "#333333"
relationship-text = "#666666"

# Connectors
connector-lineage = "#1565c0"
connector-lateral = "#e65100"
connector-sibling = "#4caf50"

level-indicator = "#999999"
"##;

impl Stylesheet {
    /// Load stylesheet from TOML file
    pub fn from_file(path: &Path) -> Result<Self, StylesheetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load stylesheet from TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, StylesheetError> {
        let parsed: TomlStylesheet = toml::from_str(content)?;

        Ok(Stylesheet {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            colors: parsed.colors,
        })
    }

    /// Resolve a colour token to a concrete value
    ///
    /// Returns None if the token is not defined in this stylesheet.
    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.colors.get(token).map(|s| s.as_str())
    }

    /// Resolve a colour token with fallback to the default palette
    ///
    /// Fallback order:
    /// 1. Check this stylesheet for exact token
    /// 2. Check default palette for exact token
    /// 3. Use category default (root → orange, connector → blue, etc.)
    pub fn resolve_or_default(&self, token: &str) -> String {
        if let Some(color) = self.resolve(token) {
            return color.to_string();
        }

        let default = Self::default();
        if let Some(color) = default.resolve(token) {
            return color.to_string();
        }

        if token.starts_with("root") {
            return "#e65100".to_string();
        }
        if token.starts_with("node") || token.starts_with("connector") {
            return "#1565c0".to_string();
        }
        if token.starts_with("label") || token.starts_with("background") {
            return "#ffffff".to_string();
        }

        "#333333".to_string()
    }

    /// Font family for all text, if the stylesheet sets one
    pub fn font_family(&self) -> Option<&str> {
        self.resolve("font-family")
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::from_str(DEFAULT_PALETTE).expect("Default palette should be valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> Stylesheet {
        Stylesheet {
            name: None,
            description: None,
            colors: HashMap::new(),
        }
    }

    #[test]
    fn test_default_stylesheet() {
        let stylesheet = Stylesheet::default();
        assert!(stylesheet.colors.contains_key("root-fill"));
        assert!(stylesheet.colors.contains_key("node-fill"));
        assert!(stylesheet.colors.contains_key("connector-lineage"));
        assert!(stylesheet.colors.contains_key("level-indicator"));
    }

    #[test]
    fn test_resolve_existing_token() {
        let stylesheet = Stylesheet::default();
        assert_eq!(stylesheet.resolve("root-stroke"), Some("#e65100"));
        assert_eq!(stylesheet.resolve("connector-sibling"), Some("#4caf50"));
    }

    #[test]
    fn test_resolve_missing_token() {
        let stylesheet = Stylesheet::default();
        assert_eq!(stylesheet.resolve("nonexistent"), None);
    }

    #[test]
    fn test_resolve_or_default_fallback() {
        assert_eq!(empty().resolve_or_default("node-fill"), "#e3f2fd");
    }

    #[test]
    fn test_resolve_or_default_category_fallback() {
        let sheet = empty();
        assert_eq!(sheet.resolve_or_default("root-glow"), "#e65100");
        assert_eq!(sheet.resolve_or_default("connector-dashed"), "#1565c0");
        assert_eq!(sheet.resolve_or_default("label-shadow"), "#ffffff");
        assert_eq!(sheet.resolve_or_default("mystery"), "#333333");
    }

    #[test]
    fn test_parse_toml_with_metadata() {
        let toml_str = r##"
[metadata]
name = "Dark"
description = "Dark family tree"

[colors]
background = "#121212"
font-family = "Roboto"
"##;
        let stylesheet = Stylesheet::from_str(toml_str).expect("Should parse");
        assert_eq!(stylesheet.name, Some("Dark".to_string()));
        assert_eq!(stylesheet.description, Some("Dark family tree".to_string()));
        assert_eq!(stylesheet.resolve("background"), Some("#121212"));
        assert_eq!(stylesheet.font_family(), Some("Roboto"));
    }

    #[test]
    fn test_parse_toml_without_colors() {
        let stylesheet = Stylesheet::from_str("[metadata]\nname = \"Bare\"\n").expect("Should parse");
        assert!(stylesheet.colors.is_empty());
        assert_eq!(stylesheet.resolve_or_default("root-fill"), "#fff3e0");
    }

    #[test]
    fn test_invalid_toml_error() {
        let result = Stylesheet::from_str("this is not valid toml {{{{");
        assert!(result.is_err());
    }
}
