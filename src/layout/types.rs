//! Core geometry and result types for the layout engine

use tracing::debug;

use crate::model::NodeId;

/// A 2D point in scene or screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn midpoint(&self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// An axis-aligned box, y grows downward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a zero-sized bounding box at the origin
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Box of the given size centered on a point
    pub fn centered(center: Point, width: f64, height: f64) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point of the bounding box
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Check if this bounding box contains a point
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    /// Check if this bounding box intersects another (touching edges do not count)
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Compute the union of two bounding boxes (smallest box containing both)
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        BoundingBox::new(x, y, right - x, bottom - y)
    }

    /// Grow the box by `amount` on every side
    pub fn inflate(&self, amount: f64) -> BoundingBox {
        BoundingBox::new(
            self.x - amount,
            self.y - amount,
            self.width + 2.0 * amount,
            self.height + 2.0 * amount,
        )
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::zero()
    }
}

/// One wrapped label and the panel drawn behind it
#[derive(Debug, Clone, PartialEq)]
pub struct LabelBlock {
    pub lines: Vec<String>,
    pub font_size: f64,
    pub line_height: f64,
    /// Width of the widest wrapped line
    pub text_width: f64,
    /// Background panel in scene coordinates
    pub panel: BoundingBox,
}

impl LabelBlock {
    /// Center point of line `index`, lines stacked in the middle of the panel
    pub fn line_center(&self, index: usize) -> Point {
        let text_height = self.line_height * self.lines.len() as f64;
        let top = self.panel.y + (self.panel.height - text_height) / 2.0;
        Point::new(
            self.panel.center().x,
            top + self.line_height * (index as f64 + 0.5),
        )
    }
}

/// A node after layout: its position and the geometry the renderer reuses
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedNode {
    /// Index into [`crate::model::TreeModel::nodes`]
    pub index: usize,
    pub id: NodeId,
    pub center: Point,
    pub radius: f64,
    pub name: LabelBlock,
    pub relationship: Option<LabelBlock>,
}

impl PlacedNode {
    /// Bounding box of the avatar circle
    pub fn circle_bounds(&self) -> BoundingBox {
        BoundingBox::centered(self.center, self.radius * 2.0, self.radius * 2.0)
    }

    /// Combined extent of the circle and both label panels
    pub fn footprint(&self) -> BoundingBox {
        let mut bounds = self.circle_bounds().union(&self.name.panel);
        if let Some(rel) = &self.relationship {
            bounds = bounds.union(&rel.panel);
        }
        bounds
    }

    /// Lowest point of the drawn node, below its labels
    pub fn label_bottom(&self) -> f64 {
        self.footprint().bottom()
    }
}

/// How a connector relates two nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Root to a node in an earlier generation
    Ancestor,
    /// Root to a node in a later generation
    Descendant,
    /// Root to a same-generation peer (spouse, in-law, ...)
    Lateral,
    /// Root to a same-generation sibling
    Sibling,
}

impl LinkKind {
    /// Whether the connector crosses generation rows
    pub fn is_vertical(&self) -> bool {
        matches!(self, LinkKind::Ancestor | LinkKind::Descendant)
    }
}

/// A connector between two placed nodes, by node index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub from: usize,
    pub to: usize,
    pub kind: LinkKind,
}

/// The complete result of layout computation
#[derive(Debug, Clone, Default)]
pub struct TreeLayout {
    /// Placed nodes: root first, then row by row in placement order
    pub nodes: Vec<PlacedNode>,
    pub links: Vec<Link>,
    /// Vertical distance between generation rows for this tree
    pub row_height: f64,
    /// Union of all footprints
    pub bounds: BoundingBox,
}

impl TreeLayout {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<&PlacedNode> {
        self.nodes.first()
    }

    /// Placed node for a model index
    pub fn placed(&self, index: usize) -> Option<&PlacedNode> {
        self.nodes.iter().find(|n| n.index == index)
    }

    /// Vertical coordinate of a generation row
    pub fn row_y(&self, level: i32) -> f64 {
        let origin_y = self.root().map(|r| r.center.y).unwrap_or(0.0);
        origin_y + f64::from(level) * self.row_height
    }

    /// Emit every node centre at debug level
    pub fn log_positions(&self) {
        for placed in &self.nodes {
            debug!(
                id = %placed.id,
                x = placed.center.x,
                y = placed.center.y,
                "node position"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_intersects() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(5.0, 5.0, 10.0, 10.0);
        let c = BoundingBox::new(10.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c), "touching edges are not an overlap");
    }

    #[test]
    fn test_bounding_box_union_and_inflate() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(20.0, -5.0, 5.0, 5.0);
        assert_eq!(a.union(&b), BoundingBox::new(0.0, -5.0, 25.0, 15.0));
        assert_eq!(a.inflate(2.0), BoundingBox::new(-2.0, -2.0, 14.0, 14.0));
    }

    #[test]
    fn test_centered_box() {
        let b = BoundingBox::centered(Point::new(10.0, 10.0), 4.0, 6.0);
        assert_eq!(b, BoundingBox::new(8.0, 7.0, 4.0, 6.0));
        assert_eq!(b.center(), Point::new(10.0, 10.0));
    }

    #[test]
    fn test_point_distance() {
        assert_eq!(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0);
        assert_eq!(
            Point::new(0.0, 0.0).midpoint(Point::new(4.0, 2.0)),
            Point::new(2.0, 1.0)
        );
    }
}
