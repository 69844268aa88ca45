//! Pan and zoom
//!
//! [`Viewport`] is the scene-to-screen transform as a plain value:
//! `screen = scale * scene + offset`. [`ViewportController`] owns one and
//! is the only thing that changes it, always keeping the scale inside the
//! configured range.

use tracing::warn;

use crate::layout::{BoundingBox, Point};

/// Size of the visible area in screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Scene-to-screen affine transform (uniform scale plus translation)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub offset: Point,
}

impl Viewport {
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            offset: Point::new(0.0, 0.0),
        }
    }

    pub fn to_screen(&self, scene: Point) -> Point {
        Point::new(
            self.scale * scene.x + self.offset.x,
            self.scale * scene.y + self.offset.y,
        )
    }

    pub fn to_scene(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.offset.x) / self.scale,
            (screen.y - self.offset.y) / self.scale,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::identity()
    }
}

/// Zoom limits
#[derive(Debug, Clone)]
pub struct ViewportConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Scale used when a tree is first shown
    pub default_scale: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.25,
            max_scale: 4.0,
            default_scale: 1.0,
        }
    }
}

impl ViewportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the zoom range
    ///
    /// The bounds may be given in either order. A range with a bound that
    /// is not a positive finite number is ignored.
    pub fn with_scale_range(mut self, min: f64, max: f64) -> Self {
        let usable = |s: f64| s.is_finite() && s > 0.0;
        if !(usable(min) && usable(max)) {
            warn!(min, max, "ignoring invalid zoom range");
            return self;
        }
        self.min_scale = min.min(max);
        self.max_scale = min.max(max);
        self
    }

    /// Set the initial zoom
    pub fn with_default_scale(mut self, scale: f64) -> Self {
        self.default_scale = scale;
        self
    }

    /// Never panics, even if the public bounds were set out of order
    pub fn clamp(&self, scale: f64) -> f64 {
        scale.max(self.min_scale).min(self.max_scale)
    }
}

/// Owner of the current [`Viewport`]
#[derive(Debug, Clone)]
pub struct ViewportController {
    config: ViewportConfig,
    viewport: Viewport,
    screen: Size,
}

impl ViewportController {
    pub fn new(config: ViewportConfig, screen: Size) -> Self {
        let viewport = Viewport {
            scale: config.clamp(config.default_scale),
            offset: Point::new(0.0, 0.0),
        };
        Self {
            config,
            viewport,
            screen,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn screen_size(&self) -> Size {
        self.screen
    }

    /// Change the visible area, keeping the scene point at its center fixed
    pub fn set_screen_size(&mut self, screen: Size) {
        let focus = self.viewport.to_scene(self.screen.center());
        self.screen = screen;
        self.center_on_at(focus, self.viewport.scale);
    }

    /// Reset to the default scale with `scene` at the center of the screen
    pub fn center_on(&mut self, scene: Point) {
        self.center_on_at(scene, self.config.clamp(self.config.default_scale));
    }

    fn center_on_at(&mut self, scene: Point, scale: f64) {
        let center = self.screen.center();
        self.viewport = Viewport {
            scale,
            offset: Point::new(center.x - scale * scene.x, center.y - scale * scene.y),
        };
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        self.viewport.offset.x += dx;
        self.viewport.offset.y += dy;
    }

    /// Multiply the scale by `factor`, keeping `focus` (screen) fixed.
    ///
    /// Returns false when the scale did not change, either because the
    /// factor was unusable or the scale is already at a limit.
    pub fn zoom_about(&mut self, factor: f64, focus: Point) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        self.set_scale(self.viewport.scale * factor, focus)
    }

    /// Set an absolute scale, clamped, keeping `focus` (screen) fixed
    pub fn set_scale(&mut self, scale: f64, focus: Point) -> bool {
        let new_scale = self.config.clamp(scale);
        if (new_scale - self.viewport.scale).abs() <= f64::EPSILON {
            return false;
        }
        let anchor = self.viewport.to_scene(focus);
        self.viewport.scale = new_scale;
        self.viewport.offset = Point::new(
            focus.x - new_scale * anchor.x,
            focus.y - new_scale * anchor.y,
        );
        true
    }

    /// Zoom and pan so that `bounds` fills the screen minus `padding`
    pub fn fit_bounds(&mut self, bounds: BoundingBox, padding: f64) {
        if bounds.width <= 0.0 || bounds.height <= 0.0 {
            return;
        }
        let available_w = (self.screen.width - 2.0 * padding).max(1.0);
        let available_h = (self.screen.height - 2.0 * padding).max(1.0);
        let scale = self
            .config
            .clamp((available_w / bounds.width).min(available_h / bounds.height));
        self.center_on_at(bounds.center(), scale);
    }
}
