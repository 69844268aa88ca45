//! Family Tree - generation-banded family tree layout and rendering
//!
//! This library turns a family tree document (one root person plus relatives
//! grouped by generation) into a collision-free layout, draws it onto any
//! [`Canvas`](renderer::Canvas), and handles pan, pinch-zoom, tap and
//! long-press input against the drawn scene.
//!
//! # Example
//!
//! ```rust
//! use family_tree::render;
//!
//! let svg = render(r#"{"root": {"id": "1", "name": "Ada"}}"#).unwrap();
//! assert!(svg.contains("<svg"));
//! ```

pub mod document;
pub mod error;
pub mod layout;
pub mod model;
pub mod renderer;
pub mod stylesheet;
pub mod view;

pub use document::TreeDocument;
pub use error::DocumentError;
pub use layout::{LayoutConfig, TreeLayout};
pub use model::{FamilyNode, LineageSide, NodeId, TreeModel};
pub use renderer::{render_svg, SvgConfig, TreeStyle};
pub use view::{
    InputConfig, LoadOutcome, LoadTicket, NodeListener, Size, TreeView, ViewportConfig,
};

use thiserror::Error;

// Re-export Stylesheet for public API
pub use stylesheet::Stylesheet;

/// Errors that can occur during the render pipeline
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Layout configuration
    pub layout: LayoutConfig,
    /// SVG output configuration; its size is the screen size
    pub svg: SvgConfig,
    /// Zoom limits and initial scale
    pub viewport: ViewportConfig,
    /// Stylesheet for color resolution
    pub stylesheet: Stylesheet,
    /// Debug mode: log every node position
    pub debug: bool,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout configuration
    pub fn with_layout(mut self, config: LayoutConfig) -> Self {
        self.layout = config;
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the zoom limits
    pub fn with_viewport(mut self, config: ViewportConfig) -> Self {
        self.viewport = config;
        self
    }

    /// Set the stylesheet for color resolution
    pub fn with_stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }

    /// Enable or disable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// An empty [`TreeView`] set up from this configuration
    pub fn build_view(&self) -> TreeView {
        TreeView::new(Size::new(self.svg.width, self.svg.height))
            .with_layout_config(self.layout.clone())
            .with_viewport_config(self.viewport.clone())
            .with_style(TreeStyle::from_stylesheet(&self.stylesheet))
    }
}

/// Render a JSON tree document to SVG with default configuration
///
/// The tree is drawn through the initial viewport: the root at the centre
/// of a 1080 x 1920 screen at the default scale.
///
/// # Example
///
/// ```rust
/// use family_tree::render;
///
/// let svg = render(r#"{
///     "root": {"id": "1", "name": "Ada"},
///     "generations": [
///         {"level": -1, "members": [
///             {"id": "2", "name": "Byron", "relationship": "Father", "side": "PATERNAL"}
///         ]}
///     ]
/// }"#).unwrap();
///
/// assert!(svg.contains("<svg"));
/// assert!(svg.contains("Ada"));
/// assert!(svg.contains("Byron"));
/// ```
pub fn render(source: &str) -> Result<String, RenderError> {
    render_with_config(source, RenderConfig::default())
}

/// Render a JSON tree document to SVG with custom configuration
///
/// # Example
///
/// ```rust
/// use family_tree::{render_with_config, LayoutConfig, RenderConfig, SvgConfig};
///
/// let config = RenderConfig::new()
///     .with_layout(LayoutConfig::default().with_node_radius(30.0))
///     .with_svg(SvgConfig::default().with_size(400.0, 600.0));
///
/// let svg = render_with_config(r#"{"root": {"id": 7, "name": "Ada"}}"#, config).unwrap();
/// assert!(svg.contains(r#"viewBox="0 0 400 600""#));
/// ```
pub fn render_with_config(source: &str, config: RenderConfig) -> Result<String, RenderError> {
    let doc = TreeDocument::from_json(source)?;

    let mut view = config.build_view();
    view.load(&doc);

    if config.debug {
        view.layout().log_positions();
    }

    Ok(view.render_svg(&config.svg))
}
