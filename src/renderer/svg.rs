//! SVG drawing surface

use crate::document::Avatar;
use crate::layout::{BoundingBox, Point, TreeLayout};
use crate::model::TreeModel;
use crate::view::Viewport;

use super::canvas::Canvas;
use super::path::ScenePath;
use super::scene::draw_scene;
use super::style::{ShapeStyle, StrokeStyle, TextStyle, TreeStyle};
use super::SvgConfig;

/// Builds an SVG document from canvas calls
pub struct SvgCanvas {
    config: SvgConfig,
    defs: Vec<String>,
    elements: Vec<String>,
    indent: usize,
    transform_open: bool,
    clip_count: usize,
}

impl SvgCanvas {
    /// Create a new SVG canvas
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            defs: vec![],
            elements: vec![],
            indent: 1,
            transform_open: false,
            clip_count: 0,
        }
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    fn push(&mut self, element: String) {
        let line = format!("{}{}", self.indent_str(), element);
        self.elements.push(line);
    }

    /// Fill the whole viewport, untransformed
    pub fn add_background(&mut self, color: &str) {
        let prefix = self.prefix();
        self.push(format!(
            r#"<rect class="{}background" x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            prefix,
            num(self.config.width),
            num(self.config.height),
            escape_xml(color)
        ));
    }

    fn close_transform(&mut self) {
        if self.transform_open {
            self.indent = self.indent.saturating_sub(1);
            self.push("</g>".to_string());
            self.transform_open = false;
        }
    }

    /// Build the final SVG string
    pub fn build(mut self) -> String {
        self.close_transform();
        let nl = self.newline().to_string();

        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(&nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = num(self.config.width),
            h = num(self.config.height),
        ));
        svg.push_str(&nl);

        if !self.defs.is_empty() {
            svg.push_str("  <defs>");
            svg.push_str(&nl);
            for def in &self.defs {
                svg.push_str("    ");
                svg.push_str(def);
                svg.push_str(&nl);
            }
            svg.push_str("  </defs>");
            svg.push_str(&nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(&nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

impl Canvas for SvgCanvas {
    fn set_transform(&mut self, viewport: &Viewport) {
        self.close_transform();
        let prefix = self.prefix();
        self.push(format!(
            r#"<g class="{}scene" transform="matrix({} 0 0 {} {} {})">"#,
            prefix,
            num(viewport.scale),
            num(viewport.scale),
            num(viewport.offset.x),
            num(viewport.offset.y)
        ));
        self.indent += 1;
        self.transform_open = true;
    }

    fn begin_group(&mut self, id: Option<&str>, role: &str) {
        let prefix = self.prefix();
        let id_attr = id
            .map(|i| format!(r#" data-id="{}""#, escape_xml(i)))
            .unwrap_or_default();
        self.push(format!(r#"<g class="{}{}"{}>"#, prefix, role, id_attr));
        self.indent += 1;
    }

    fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.push("</g>".to_string());
    }

    fn circle(&mut self, center: Point, radius: f64, style: &ShapeStyle) {
        self.push(format!(
            r#"<circle cx="{}" cy="{}" r="{}"{}/>"#,
            num(center.x),
            num(center.y),
            num(radius),
            shape_attrs(style)
        ));
    }

    fn image_in_circle(&mut self, center: Point, radius: f64, avatar: &Avatar) {
        let clip_id = format!("{}clip-{}", self.prefix(), self.clip_count);
        self.clip_count += 1;
        self.defs.push(format!(
            r#"<clipPath id="{}"><circle cx="{}" cy="{}" r="{}"/></clipPath>"#,
            clip_id,
            num(center.x),
            num(center.y),
            num(radius)
        ));
        self.push(format!(
            r#"<image href="{}" x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="xMidYMid slice" clip-path="url(#{})"/>"#,
            avatar.to_data_uri(),
            num(center.x - radius),
            num(center.y - radius),
            num(radius * 2.0),
            num(radius * 2.0),
            clip_id
        ));
    }

    fn rounded_rect(&mut self, rect: BoundingBox, corner_radius: f64, style: &ShapeStyle) {
        let prefix = self.prefix();
        self.push(format!(
            r#"<rect class="{}panel" x="{}" y="{}" width="{}" height="{}" rx="{}"{}/>"#,
            prefix,
            num(rect.x),
            num(rect.y),
            num(rect.width),
            num(rect.height),
            num(corner_radius),
            shape_attrs(style)
        ));
    }

    fn path(&mut self, path: &ScenePath, style: &StrokeStyle) {
        let dash = style
            .dash
            .as_ref()
            .map(|d| format!(r#" stroke-dasharray="{}""#, escape_xml(d)))
            .unwrap_or_default();
        self.push(format!(
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}"{}/>"#,
            path.to_svg_d(),
            escape_xml(&style.color),
            num(style.width),
            dash
        ));
    }

    fn text(&mut self, text: &str, at: Point, style: &TextStyle) {
        let prefix = self.prefix();
        let weight = if style.bold {
            r#" font-weight="bold""#
        } else {
            ""
        };
        let family = style
            .font_family
            .as_ref()
            .map(|f| format!(r#" font-family="{}""#, escape_xml(f)))
            .unwrap_or_default();
        self.push(format!(
            r#"<text class="{}label" x="{}" y="{}" text-anchor="{}" dominant-baseline="middle" font-size="{}" fill="{}"{}{}>{}</text>"#,
            prefix,
            num(at.x),
            num(at.y),
            style.anchor.as_svg(),
            num(style.font_size),
            escape_xml(&style.color),
            weight,
            family,
            escape_xml(text)
        ));
    }
}

/// Render a laid-out tree to an SVG string
pub fn render_svg(
    model: &TreeModel,
    layout: &TreeLayout,
    viewport: &Viewport,
    style: &TreeStyle,
    config: &SvgConfig,
) -> String {
    let mut canvas = SvgCanvas::new(config.clone());
    if let Some(background) = &style.background {
        canvas.add_background(background);
    }
    draw_scene(&mut canvas, model, layout, viewport, style);
    canvas.build()
}

fn shape_attrs(style: &ShapeStyle) -> String {
    let mut attrs = String::new();
    match &style.fill {
        Some(fill) => attrs.push_str(&format!(r#" fill="{}""#, escape_xml(fill))),
        None => attrs.push_str(r#" fill="none""#),
    }
    if let Some(stroke) = &style.stroke {
        attrs.push_str(&format!(
            r#" stroke="{}" stroke-width="{}""#,
            escape_xml(stroke),
            num(style.stroke_width)
        ));
    }
    attrs
}

/// Format a coordinate with at most two decimals and no trailing zeros
fn num(value: f64) -> String {
    let s = format!("{:.2}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
