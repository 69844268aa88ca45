//! Abstract 2D drawing surface

use crate::document::Avatar;
use crate::layout::{BoundingBox, Point};
use crate::view::Viewport;

use super::path::ScenePath;
use super::style::{ShapeStyle, StrokeStyle, TextStyle};

/// Primitive operations the scene renderer draws with.
///
/// Coordinates are scene coordinates; the surface applies the transform
/// last passed to [`Canvas::set_transform`]. Groups only carry identity
/// (node id, role) for surfaces that can use it and may be ignored.
pub trait Canvas {
    fn set_transform(&mut self, viewport: &Viewport);

    fn begin_group(&mut self, id: Option<&str>, role: &str);

    fn end_group(&mut self);

    fn circle(&mut self, center: Point, radius: f64, style: &ShapeStyle);

    /// Draw an avatar image clipped to a circle
    fn image_in_circle(&mut self, center: Point, radius: f64, avatar: &Avatar);

    fn rounded_rect(&mut self, rect: BoundingBox, corner_radius: f64, style: &ShapeStyle);

    fn path(&mut self, path: &ScenePath, style: &StrokeStyle);

    /// Draw one line of text vertically centered on `at`
    fn text(&mut self, text: &str, at: Point, style: &TextStyle);
}
