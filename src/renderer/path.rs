//! Connector path geometry
//!
//! Paths are built in scene coordinates. Generation-crossing connectors are
//! vertical S-curves between the lower edge of the upper node and the top
//! of the lower circle; same-generation connectors are straight lines or a
//! raised bar.

use crate::layout::{LinkKind, PlacedNode, Point};

/// A segment in a connector path
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// Move to starting point
    MoveTo(Point),
    /// Straight line to point
    LineTo(Point),
    /// Cubic Bezier curve
    CubicTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
}

/// An open path ready to stroke
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScenePath {
    pub segments: Vec<PathSegment>,
}

impl ScenePath {
    /// Convert to SVG path `d` attribute string
    pub fn to_svg_d(&self) -> String {
        let mut d = String::new();

        for seg in &self.segments {
            if !d.is_empty() {
                d.push(' ');
            }
            match seg {
                PathSegment::MoveTo(p) => {
                    d.push_str(&format!("M{:.2} {:.2}", p.x, p.y));
                }
                PathSegment::LineTo(p) => {
                    d.push_str(&format!("L{:.2} {:.2}", p.x, p.y));
                }
                PathSegment::CubicTo {
                    control1,
                    control2,
                    end,
                } => {
                    d.push_str(&format!(
                        "C{:.2} {:.2} {:.2} {:.2} {:.2} {:.2}",
                        control1.x, control1.y, control2.x, control2.y, end.x, end.y
                    ));
                }
            }
        }

        d
    }

    pub fn start(&self) -> Option<Point> {
        match self.segments.first()? {
            PathSegment::MoveTo(p) => Some(*p),
            _ => None,
        }
    }

    pub fn end(&self) -> Option<Point> {
        match self.segments.last()? {
            PathSegment::MoveTo(p) | PathSegment::LineTo(p) => Some(*p),
            PathSegment::CubicTo { end, .. } => Some(*end),
        }
    }

    pub fn is_curved(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, PathSegment::CubicTo { .. }))
    }
}

/// Smooth vertical S-curve; both control points sit at the vertical midpoint
pub fn s_curve(start: Point, end: Point) -> ScenePath {
    let mid_y = (start.y + end.y) / 2.0;
    ScenePath {
        segments: vec![
            PathSegment::MoveTo(start),
            PathSegment::CubicTo {
                control1: Point::new(start.x, mid_y),
                control2: Point::new(end.x, mid_y),
                end,
            },
        ],
    }
}

pub fn straight(start: Point, end: Point) -> ScenePath {
    ScenePath {
        segments: vec![PathSegment::MoveTo(start), PathSegment::LineTo(end)],
    }
}

/// Bar raised `rise` above the higher of two circle tops, with drops to each
pub fn bar(start: Point, end: Point, rise: f64) -> ScenePath {
    let bar_y = start.y.min(end.y) - rise;
    ScenePath {
        segments: vec![
            PathSegment::MoveTo(start),
            PathSegment::LineTo(Point::new(start.x, bar_y)),
            PathSegment::LineTo(Point::new(end.x, bar_y)),
            PathSegment::LineTo(end),
        ],
    }
}

/// Path for a connector between two placed nodes
pub fn connector_path(
    kind: LinkKind,
    from: &PlacedNode,
    to: &PlacedNode,
    bar_rise: f64,
) -> ScenePath {
    match kind {
        LinkKind::Ancestor | LinkKind::Descendant => {
            let (upper, lower) = if from.center.y <= to.center.y {
                (from, to)
            } else {
                (to, from)
            };
            let start = Point::new(upper.center.x, upper.label_bottom());
            let end = Point::new(lower.center.x, lower.center.y - lower.radius);
            s_curve(start, end)
        }
        LinkKind::Lateral => {
            let direction = if to.center.x >= from.center.x { 1.0 } else { -1.0 };
            let start = Point::new(from.center.x + direction * from.radius, from.center.y);
            let end = Point::new(to.center.x - direction * to.radius, to.center.y);
            straight(start, end)
        }
        LinkKind::Sibling => {
            let start = Point::new(from.center.x, from.center.y - from.radius);
            let end = Point::new(to.center.x, to.center.y - to.radius);
            bar(start, end, bar_rise)
        }
    }
}
