//! Scene renderer
//!
//! Draws a laid-out tree onto any [`Canvas`]. The SVG canvas produces a
//! standalone document; the recording canvas captures draw calls for
//! inspection.

pub mod canvas;
pub mod config;
pub mod path;
pub mod recording;
pub mod scene;
pub mod style;
pub mod svg;

pub use canvas::Canvas;
pub use config::SvgConfig;
pub use path::{PathSegment, ScenePath};
pub use recording::{DrawCommand, RecordingCanvas};
pub use scene::draw_scene;
pub use style::{ShapeStyle, StrokeStyle, TextAnchor, TextStyle, TreeStyle};
pub use svg::{render_svg, SvgCanvas};
