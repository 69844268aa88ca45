//! Interactive tree view
//!
//! [`TreeView`] owns one loaded tree together with its layout, viewport and
//! gesture state. Hosts feed it documents, pointer events and a
//! [`Canvas`] to draw on; taps and long-presses on nodes are reported to a
//! [`NodeListener`].

pub mod input;
pub mod viewport;

pub use input::{hit_test, InputConfig, InputDispatcher, InputOutcome, PointerEvent, PointerId};
pub use viewport::{Size, Viewport, ViewportConfig, ViewportController};

use tracing::debug;

use crate::document::TreeDocument;
use crate::layout::{compute, AverageCharWidth, LayoutConfig, TextMeasure, TreeLayout};
use crate::model::{NodeId, TreeModel};
use crate::renderer::{draw_scene, render_svg, Canvas, SvgConfig, TreeStyle};

/// Receives node selections
pub trait NodeListener {
    fn on_node_tap(&mut self, _id: &NodeId) {}

    fn on_node_long_press(&mut self, _id: &NodeId) {}
}

/// Handle for one load; only the most recently issued ticket can apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Result of finishing a load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The tree was replaced; `nodes` counts the root and every kept relative
    Applied { nodes: usize },
    /// A newer load was started; nothing changed
    Stale,
}

pub struct TreeView {
    layout_config: LayoutConfig,
    measure: Box<dyn TextMeasure>,
    style: TreeStyle,
    model: TreeModel,
    layout: TreeLayout,
    viewport: ViewportController,
    input: InputDispatcher,
    listener: Option<Box<dyn NodeListener>>,
    issued: u64,
}

impl TreeView {
    /// Create an empty view for a screen of the given size
    pub fn new(screen: Size) -> Self {
        Self {
            layout_config: LayoutConfig::default(),
            measure: Box::new(AverageCharWidth::default()),
            style: TreeStyle::default(),
            model: TreeModel::empty(),
            layout: TreeLayout::default(),
            viewport: ViewportController::new(ViewportConfig::default(), screen),
            input: InputDispatcher::default(),
            listener: None,
            issued: 0,
        }
    }

    pub fn with_layout_config(mut self, config: LayoutConfig) -> Self {
        self.layout_config = config;
        self
    }

    /// Use a different text measurer for label wrapping
    pub fn with_measure(mut self, measure: impl TextMeasure + 'static) -> Self {
        self.measure = Box::new(measure);
        self
    }

    pub fn with_style(mut self, style: TreeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_viewport_config(mut self, config: ViewportConfig) -> Self {
        let screen = self.viewport.screen_size();
        self.viewport = ViewportController::new(config, screen);
        self
    }

    pub fn with_input_config(mut self, config: InputConfig) -> Self {
        self.input = InputDispatcher::new(config);
        self
    }

    pub fn with_listener(mut self, listener: impl NodeListener + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn set_listener(&mut self, listener: Option<Box<dyn NodeListener>>) {
        self.listener = listener;
    }

    /// Start a load. Any ticket issued earlier becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        LoadTicket(self.issued)
    }

    /// Apply `doc` if `ticket` is still the latest load
    pub fn finish_load(&mut self, ticket: LoadTicket, doc: &TreeDocument) -> LoadOutcome {
        if ticket.0 != self.issued {
            debug!(
                ticket = ticket.0,
                latest = self.issued,
                "discarding stale tree load"
            );
            return LoadOutcome::Stale;
        }

        let mut model = TreeModel::build(doc);
        let layout = compute(&mut model, &self.layout_config, self.measure.as_ref());
        self.model = model;
        self.layout = layout;
        self.input.reset();
        self.center_on_root();

        LoadOutcome::Applied {
            nodes: self.model.len(),
        }
    }

    /// Build, lay out and show `doc`, replacing the current tree
    pub fn load(&mut self, doc: &TreeDocument) -> LoadOutcome {
        let ticket = self.begin_load();
        self.finish_load(ticket, doc)
    }

    /// Put the root at the centre of the screen at the default scale
    pub fn center_on_root(&mut self) {
        let focus = self
            .layout
            .root()
            .map(|root| root.center)
            .unwrap_or(self.layout_config.origin);
        self.viewport.center_on(focus);
    }

    pub fn render(&self, canvas: &mut dyn Canvas) {
        draw_scene(
            canvas,
            &self.model,
            &self.layout,
            self.viewport.viewport(),
            &self.style,
        );
    }

    /// Render the current view as an SVG document sized to the screen
    pub fn render_svg(&self, config: &SvgConfig) -> String {
        let screen = self.viewport.screen_size();
        let config = config.clone().with_size(screen.width, screen.height);
        render_svg(
            &self.model,
            &self.layout,
            self.viewport.viewport(),
            &self.style,
            &config,
        )
    }

    /// Feed one pointer event. Node hits are also passed to the listener.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> InputOutcome {
        let outcome = self.input.handle(event, &mut self.viewport, &self.layout);
        self.notify(&outcome);
        outcome
    }

    /// Let a held press turn into a long-press without a new event
    pub fn tick(&mut self, now_ms: u64) -> InputOutcome {
        let outcome = self.input.tick(now_ms, &self.viewport, &self.layout);
        self.notify(&outcome);
        outcome
    }

    fn notify(&mut self, outcome: &InputOutcome) {
        let Some(listener) = self.listener.as_mut() else {
            return;
        };
        match outcome {
            InputOutcome::Tap(id) => listener.on_node_tap(id),
            InputOutcome::LongPress(id) => listener.on_node_long_press(id),
            _ => {}
        }
    }

    pub fn resize(&mut self, screen: Size) {
        self.viewport.set_screen_size(screen);
    }

    /// Zoom about the centre of the screen; false when already at a limit
    pub fn zoom_by(&mut self, factor: f64) -> bool {
        let focus = self.viewport.screen_size().center();
        self.viewport.zoom_about(factor, focus)
    }

    pub fn model(&self) -> &TreeModel {
        &self.model
    }

    pub fn layout(&self) -> &TreeLayout {
        &self.layout
    }

    pub fn style(&self) -> &TreeStyle {
        &self.style
    }

    pub fn input_config(&self) -> &InputConfig {
        self.input.config()
    }

    pub fn viewport(&self) -> &Viewport {
        self.viewport.viewport()
    }

    pub fn viewport_controller(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn viewport_controller_mut(&mut self) -> &mut ViewportController {
        &mut self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Point;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn doc(json: &str) -> TreeDocument {
        TreeDocument::from_json(json).unwrap()
    }

    fn family() -> TreeDocument {
        doc(r#"{"root": {"id": "r", "name": "Root"},
                "generations": [{"level": -1, "members": [{"id": "p", "name": "Pat"}]}]}"#)
    }

    #[derive(Default, Clone)]
    struct Log(Rc<RefCell<Vec<String>>>);

    impl NodeListener for Log {
        fn on_node_tap(&mut self, id: &NodeId) {
            self.0.borrow_mut().push(format!("tap {}", id));
        }

        fn on_node_long_press(&mut self, id: &NodeId) {
            self.0.borrow_mut().push(format!("long {}", id));
        }
    }

    #[test]
    fn test_load_centers_root() {
        let mut view = TreeView::new(Size::new(400.0, 600.0));
        assert_eq!(view.load(&family()), LoadOutcome::Applied { nodes: 2 });
        let root = view.layout().root().unwrap().center;
        assert_eq!(view.viewport().to_screen(root), Point::new(200.0, 300.0));
        assert_eq!(view.viewport().scale, 1.0);
    }

    #[test]
    fn test_stale_load_is_discarded() {
        let mut view = TreeView::new(Size::new(400.0, 600.0));
        let first = view.begin_load();
        let second = view.begin_load();
        assert!(second > first);

        let other = doc(r#"{"root": {"id": "x", "name": "Other"}}"#);
        assert_eq!(view.finish_load(second, &other), LoadOutcome::Applied { nodes: 1 });
        assert_eq!(view.finish_load(first, &family()), LoadOutcome::Stale);
        assert_eq!(view.model().root().unwrap().id.as_str(), "x");
    }

    #[test]
    fn test_reload_resets_zoom() {
        let mut view = TreeView::new(Size::new(400.0, 600.0));
        view.load(&family());
        assert!(view.zoom_by(2.0));
        view.load(&family());
        assert_eq!(view.viewport().scale, 1.0);
    }

    #[test]
    fn test_listener_receives_taps() {
        let log = Log::default();
        let mut view = TreeView::new(Size::new(400.0, 600.0)).with_listener(log.clone());
        view.load(&family());

        let at = |x: f64, y: f64| Point::new(x, y);
        view.handle_pointer(PointerEvent::Down {
            pointer: PointerId(0),
            position: at(200.0, 300.0),
            time_ms: 0,
        });
        view.handle_pointer(PointerEvent::Up {
            pointer: PointerId(0),
            position: at(200.0, 300.0),
            time_ms: 40,
        });
        view.handle_pointer(PointerEvent::Down {
            pointer: PointerId(0),
            position: at(200.0, 80.0),
            time_ms: 100,
        });
        assert_eq!(view.tick(700), InputOutcome::LongPress(NodeId("p".into())));
        view.handle_pointer(PointerEvent::Up {
            pointer: PointerId(0),
            position: at(200.0, 80.0),
            time_ms: 800,
        });

        assert_eq!(*log.0.borrow(), vec!["tap r".to_string(), "long p".to_string()]);
    }

    #[test]
    fn test_empty_document_renders_nothing() {
        let mut view = TreeView::new(Size::new(100.0, 100.0));
        view.load(&doc("{}"));
        assert!(view.layout().is_empty());
        let svg = view.render_svg(&SvgConfig::default());
        assert!(!svg.contains("<circle"));
    }
}
