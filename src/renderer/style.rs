//! Immutable drawing styles
//!
//! Styles are plain values resolved once from a [`Stylesheet`] and passed
//! by reference into every draw call. Nothing here is mutated while
//! drawing.

use crate::layout::LinkKind;
use crate::stylesheet::Stylesheet;

/// Horizontal text alignment relative to the anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_svg(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// Fill and outline of a closed shape
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeStyle {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: f64,
}

impl ShapeStyle {
    pub fn filled(fill: impl Into<String>) -> Self {
        Self {
            fill: Some(fill.into()),
            stroke: None,
            stroke_width: 0.0,
        }
    }

    pub fn outlined(fill: impl Into<String>, stroke: impl Into<String>, width: f64) -> Self {
        Self {
            fill: Some(fill.into()),
            stroke: Some(stroke.into()),
            stroke_width: width,
        }
    }
}

/// Stroke of an open path
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub color: String,
    pub width: f64,
    /// SVG-style dash pattern, e.g. `"6,4"`
    pub dash: Option<String>,
}

/// Font and colour of a run of text
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub color: String,
    pub font_size: f64,
    pub anchor: TextAnchor,
    pub bold: bool,
    pub font_family: Option<String>,
}

impl TextStyle {
    /// Same style at a different size
    pub fn sized(&self, font_size: f64) -> Self {
        Self {
            font_size,
            ..self.clone()
        }
    }
}

/// Everything the scene renderer needs to know about colours and strokes
#[derive(Debug, Clone, PartialEq)]
pub struct TreeStyle {
    pub background: Option<String>,
    pub root_node: ShapeStyle,
    pub node: ShapeStyle,
    pub placeholder: ShapeStyle,
    pub placeholder_text: TextStyle,
    pub label_panel: ShapeStyle,
    pub panel_corner_radius: f64,
    pub name_text: TextStyle,
    pub relationship_text: TextStyle,
    pub lineage_connector: StrokeStyle,
    pub lateral_connector: StrokeStyle,
    pub sibling_connector: StrokeStyle,
    /// Height of the bar above same-generation siblings
    pub sibling_bar_rise: f64,
    pub level_indicator: TextStyle,
    /// Distance between the leftmost footprint and the level indicators
    pub level_margin: f64,
}

impl TreeStyle {
    /// Resolve every colour token of a stylesheet
    pub fn from_stylesheet(sheet: &Stylesheet) -> Self {
        let color = |token: &str| sheet.resolve_or_default(token);
        let font_family = sheet.font_family().map(str::to_string);
        let text = |token: &str, font_size: f64, anchor: TextAnchor, bold: bool| TextStyle {
            color: color(token),
            font_size,
            anchor,
            bold,
            font_family: font_family.clone(),
        };

        Self {
            background: Some(color("background")),
            root_node: ShapeStyle::outlined(color("root-fill"), color("root-stroke"), 4.0),
            node: ShapeStyle::outlined(color("node-fill"), color("node-stroke"), 2.0),
            placeholder: ShapeStyle::filled(color("placeholder-fill")),
            placeholder_text: text("placeholder-text", 28.0, TextAnchor::Middle, true),
            label_panel: ShapeStyle::outlined(
                color("label-panel"),
                color("label-panel-stroke"),
                1.0,
            ),
            panel_corner_radius: 6.0,
            name_text: text("label-text", 14.0, TextAnchor::Middle, true),
            relationship_text: text("relationship-text", 12.0, TextAnchor::Middle, false),
            lineage_connector: StrokeStyle {
                color: color("connector-lineage"),
                width: 2.0,
                dash: None,
            },
            lateral_connector: StrokeStyle {
                color: color("connector-lateral"),
                width: 2.0,
                dash: Some("6,4".to_string()),
            },
            sibling_connector: StrokeStyle {
                color: color("connector-sibling"),
                width: 3.0,
                dash: None,
            },
            sibling_bar_rise: 24.0,
            level_indicator: text("level-indicator", 13.0, TextAnchor::End, false),
            level_margin: 32.0,
        }
    }

    /// Stroke used for a connector of the given kind
    pub fn connector(&self, kind: LinkKind) -> &StrokeStyle {
        match kind {
            LinkKind::Ancestor | LinkKind::Descendant => &self.lineage_connector,
            LinkKind::Lateral => &self.lateral_connector,
            LinkKind::Sibling => &self.sibling_connector,
        }
    }
}

impl Default for TreeStyle {
    fn default() -> Self {
        Self::from_stylesheet(&Stylesheet::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_and_node_styles_differ() {
        let style = TreeStyle::default();
        assert_ne!(style.root_node.fill, style.node.fill);
        assert_ne!(style.root_node.stroke, style.node.stroke);
    }

    #[test]
    fn test_stylesheet_overrides_apply() {
        let sheet = Stylesheet::from_str(
            r##"
[colors]
root-fill = "#000000"
font-family = "Roboto"
"##,
        )
        .unwrap();
        let style = TreeStyle::from_stylesheet(&sheet);
        assert_eq!(style.root_node.fill.as_deref(), Some("#000000"));
        assert_eq!(style.node.fill.as_deref(), Some("#e3f2fd"));
        assert_eq!(style.name_text.font_family.as_deref(), Some("Roboto"));
    }

    #[test]
    fn test_connector_styles_by_kind() {
        let style = TreeStyle::default();
        assert_eq!(style.connector(LinkKind::Ancestor), style.connector(LinkKind::Descendant));
        assert_ne!(style.connector(LinkKind::Lateral), style.connector(LinkKind::Sibling));
    }

    #[test]
    fn test_sized_keeps_other_fields() {
        let style = TreeStyle::default();
        let big = style.name_text.sized(30.0);
        assert_eq!(big.font_size, 30.0);
        assert_eq!(big.color, style.name_text.color);
        assert!(big.bold);
    }
}
