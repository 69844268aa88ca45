//! A canvas that records draw calls instead of drawing

use crate::document::Avatar;
use crate::layout::{BoundingBox, Point};
use crate::view::Viewport;

use super::canvas::Canvas;
use super::path::ScenePath;
use super::style::{ShapeStyle, StrokeStyle, TextStyle};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    SetTransform(Viewport),
    BeginGroup {
        id: Option<String>,
        role: String,
    },
    EndGroup,
    Circle {
        center: Point,
        radius: f64,
        style: ShapeStyle,
    },
    Image {
        center: Point,
        radius: f64,
        avatar: Avatar,
    },
    RoundedRect {
        rect: BoundingBox,
        corner_radius: f64,
        style: ShapeStyle,
    },
    Path {
        path: ScenePath,
        style: StrokeStyle,
    },
    Text {
        text: String,
        at: Point,
        style: TextStyle,
    },
}

/// Captures every draw call in order
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    pub commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// All text drawn, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// `(id, role)` of every group opened, in order
    pub fn groups(&self) -> Vec<(Option<&str>, &str)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::BeginGroup { id, role } => Some((id.as_deref(), role.as_str())),
                _ => None,
            })
            .collect()
    }

    /// Paths drawn, in order
    pub fn paths(&self) -> Vec<&ScenePath> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Path { path, .. } => Some(path),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn set_transform(&mut self, viewport: &Viewport) {
        self.commands.push(DrawCommand::SetTransform(*viewport));
    }

    fn begin_group(&mut self, id: Option<&str>, role: &str) {
        self.commands.push(DrawCommand::BeginGroup {
            id: id.map(str::to_string),
            role: role.to_string(),
        });
    }

    fn end_group(&mut self) {
        self.commands.push(DrawCommand::EndGroup);
    }

    fn circle(&mut self, center: Point, radius: f64, style: &ShapeStyle) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            style: style.clone(),
        });
    }

    fn image_in_circle(&mut self, center: Point, radius: f64, avatar: &Avatar) {
        self.commands.push(DrawCommand::Image {
            center,
            radius,
            avatar: avatar.clone(),
        });
    }

    fn rounded_rect(&mut self, rect: BoundingBox, corner_radius: f64, style: &ShapeStyle) {
        self.commands.push(DrawCommand::RoundedRect {
            rect,
            corner_radius,
            style: style.clone(),
        });
    }

    fn path(&mut self, path: &ScenePath, style: &StrokeStyle) {
        self.commands.push(DrawCommand::Path {
            path: path.clone(),
            style: style.clone(),
        });
    }

    fn text(&mut self, text: &str, at: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            at,
            style: style.clone(),
        });
    }
}
