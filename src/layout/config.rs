//! Configuration for the layout engine

use super::types::Point;

/// Configuration options for layout computation
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Radius of every avatar circle
    pub node_radius: f64,

    /// Minimum vertical distance between generation rows
    pub row_height: f64,

    /// Maximum width of a wrapped label line
    pub max_text_width: f64,

    /// Font size of the name label
    pub name_font_size: f64,

    /// Font size of the relationship label
    pub relationship_font_size: f64,

    /// Extra space between wrapped lines, added to the font size
    pub line_spacing: f64,

    /// Gap between the bottom of the circle and the name panel
    pub label_gap: f64,

    /// Padding inside label panels (horizontal, vertical)
    pub panel_padding: (f64, f64),

    /// Gap between the name panel and the relationship panel
    pub panel_gap: f64,

    /// Padding added to the widest label when computing row spacing
    pub spacing_padding: f64,

    /// Lower bound for horizontal spacing in a row
    pub min_spacing: f64,

    /// Offset of a lone same-generation node beside the root
    pub lateral_offset: f64,

    /// Clearance kept between the tallest footprint and the next row
    pub row_clearance: f64,

    /// Scene position of the root node
    pub origin: Point,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_radius: 40.0,
            row_height: 220.0,
            max_text_width: 140.0,
            name_font_size: 14.0,
            relationship_font_size: 12.0,
            line_spacing: 4.0,
            label_gap: 8.0,
            panel_padding: (6.0, 3.0),
            panel_gap: 4.0,
            spacing_padding: 40.0,
            min_spacing: 160.0,
            lateral_offset: 200.0,
            row_clearance: 40.0,
            origin: Point::new(0.0, 0.0),
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the avatar circle radius
    pub fn with_node_radius(mut self, radius: f64) -> Self {
        self.node_radius = radius;
        self
    }

    /// Set the minimum row height
    pub fn with_row_height(mut self, height: f64) -> Self {
        self.row_height = height;
        self
    }

    /// Set the maximum label line width
    pub fn with_max_text_width(mut self, width: f64) -> Self {
        self.max_text_width = width;
        self
    }

    /// Set the spacing floor for a row
    pub fn with_min_spacing(mut self, spacing: f64) -> Self {
        self.min_spacing = spacing;
        self
    }

    /// Set the offset of a lone same-generation node
    pub fn with_lateral_offset(mut self, offset: f64) -> Self {
        self.lateral_offset = offset;
        self
    }

    /// Set the scene position of the root node
    pub fn with_origin(mut self, x: f64, y: f64) -> Self {
        self.origin = Point::new(x, y);
        self
    }

    /// Line height for a given font size
    pub fn line_height(&self, font_size: f64) -> f64 {
        font_size + self.line_spacing
    }
}
