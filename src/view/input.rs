//! Gesture handling
//!
//! An explicit state machine over discrete pointer events:
//!
//! ```text
//! Idle -> Pressed -> Dragging -> Idle
//!            |          |
//!            +----------+--> Pinching -> Releasing -> Idle
//! ```
//!
//! A press that never leaves the touch slop ends as a tap or long-press,
//! which are resolved against the layout through [`hit_test`]. While two
//! pointers are down only the pinch is tracked; single-pointer drag stays
//! suppressed until every pointer is up.

use tracing::trace;

use crate::layout::{PlacedNode, Point, TreeLayout};
use crate::model::NodeId;

use super::viewport::{Viewport, ViewportController};

/// Identifies one finger or mouse button across events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerId(pub u32);

/// A raw pointer event in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down {
        pointer: PointerId,
        position: Point,
        time_ms: u64,
    },
    Move {
        pointer: PointerId,
        position: Point,
        time_ms: u64,
    },
    Up {
        pointer: PointerId,
        position: Point,
        time_ms: u64,
    },
    /// The host took the gesture away
    Cancel,
}

/// Gesture thresholds
#[derive(Debug, Clone)]
pub struct InputConfig {
    /// Movement in screen pixels a press may make and still count as a tap
    pub touch_slop: f64,
    /// Hold time before a press becomes a long-press
    pub long_press_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            touch_slop: 8.0,
            long_press_ms: 500,
        }
    }
}

impl InputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_touch_slop(mut self, slop: f64) -> Self {
        self.touch_slop = slop;
        self
    }

    pub fn with_long_press_ms(mut self, ms: u64) -> Self {
        self.long_press_ms = ms;
        self
    }
}

/// What an event did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    Ignored,
    Panned,
    Zoomed,
    Tap(NodeId),
    LongPress(NodeId),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum GestureState {
    Idle,
    Pressed {
        pointer: PointerId,
        origin: Point,
        last: Point,
        down_at: u64,
        long_press_fired: bool,
    },
    Dragging {
        pointer: PointerId,
        last: Point,
    },
    Pinching {
        first: (PointerId, Point),
        second: (PointerId, Point),
    },
    /// One pointer of a pinch is still down
    Releasing {
        pointer: PointerId,
        position: Point,
    },
}

/// Turns pointer events into viewport changes and node hits
#[derive(Debug, Clone)]
pub struct InputDispatcher {
    config: InputConfig,
    state: GestureState,
}

impl Default for InputDispatcher {
    fn default() -> Self {
        Self::new(InputConfig::default())
    }
}

impl InputDispatcher {
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            state: GestureState::Idle,
        }
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    /// True while no pointer is down
    pub fn is_idle(&self) -> bool {
        self.state == GestureState::Idle
    }

    /// Drop any gesture in progress
    pub fn reset(&mut self) {
        self.state = GestureState::Idle;
    }

    pub fn handle(
        &mut self,
        event: PointerEvent,
        viewport: &mut ViewportController,
        layout: &TreeLayout,
    ) -> InputOutcome {
        let (next, outcome) = match (self.state, event) {
            (_, PointerEvent::Cancel) => (GestureState::Idle, InputOutcome::Ignored),

            (
                GestureState::Idle,
                PointerEvent::Down {
                    pointer,
                    position,
                    time_ms,
                },
            ) => (
                GestureState::Pressed {
                    pointer,
                    origin: position,
                    last: position,
                    down_at: time_ms,
                    long_press_fired: false,
                },
                InputOutcome::Ignored,
            ),

            (
                GestureState::Pressed {
                    pointer,
                    origin,
                    last,
                    down_at,
                    long_press_fired,
                },
                event,
            ) => self.pressed(
                (pointer, origin, last, down_at, long_press_fired),
                event,
                viewport,
                layout,
            ),

            (GestureState::Dragging { pointer, last }, PointerEvent::Move { pointer: p, position, .. })
                if p == pointer =>
            {
                viewport.pan_by(position.x - last.x, position.y - last.y);
                (
                    GestureState::Dragging {
                        pointer,
                        last: position,
                    },
                    InputOutcome::Panned,
                )
            }
            (GestureState::Dragging { pointer, .. }, PointerEvent::Up { pointer: p, .. })
                if p == pointer =>
            {
                (GestureState::Idle, InputOutcome::Ignored)
            }
            (
                GestureState::Dragging { pointer, last },
                PointerEvent::Down {
                    pointer: p,
                    position,
                    ..
                },
            ) if p != pointer => (
                GestureState::Pinching {
                    first: (pointer, last),
                    second: (p, position),
                },
                InputOutcome::Ignored,
            ),

            (GestureState::Pinching { first, second }, PointerEvent::Move { pointer, position, .. }) => {
                pinch(first, second, pointer, position, viewport)
            }
            (GestureState::Pinching { first, second }, PointerEvent::Up { pointer, .. }) => {
                if pointer == first.0 {
                    (
                        GestureState::Releasing {
                            pointer: second.0,
                            position: second.1,
                        },
                        InputOutcome::Ignored,
                    )
                } else if pointer == second.0 {
                    (
                        GestureState::Releasing {
                            pointer: first.0,
                            position: first.1,
                        },
                        InputOutcome::Ignored,
                    )
                } else {
                    (self.state, InputOutcome::Ignored)
                }
            }

            (GestureState::Releasing { pointer, .. }, PointerEvent::Move { pointer: p, position, .. })
                if p == pointer =>
            {
                (GestureState::Releasing { pointer, position }, InputOutcome::Ignored)
            }
            (GestureState::Releasing { pointer, .. }, PointerEvent::Up { pointer: p, .. })
                if p == pointer =>
            {
                (GestureState::Idle, InputOutcome::Ignored)
            }
            (
                GestureState::Releasing { pointer, position },
                PointerEvent::Down {
                    pointer: p,
                    position: second,
                    ..
                },
            ) if p != pointer => (
                GestureState::Pinching {
                    first: (pointer, position),
                    second: (p, second),
                },
                InputOutcome::Ignored,
            ),

            (state, _) => (state, InputOutcome::Ignored),
        };

        if next != self.state {
            trace!(from = ?self.state, to = ?next, "gesture transition");
        }
        self.state = next;
        outcome
    }

    /// Advance time without an event; fires a pending long-press
    pub fn tick(
        &mut self,
        now_ms: u64,
        viewport: &ViewportController,
        layout: &TreeLayout,
    ) -> InputOutcome {
        if let GestureState::Pressed {
            pointer,
            origin,
            last,
            down_at,
            long_press_fired: false,
        } = self.state
        {
            if now_ms.saturating_sub(down_at) >= self.config.long_press_ms {
                self.state = GestureState::Pressed {
                    pointer,
                    origin,
                    last,
                    down_at,
                    long_press_fired: true,
                };
                trace!(?pointer, "long-press on tick");
                return long_press_at(layout, viewport.viewport(), origin);
            }
        }
        InputOutcome::Ignored
    }

    fn pressed(
        &self,
        (pointer, origin, last, down_at, long_press_fired): (PointerId, Point, Point, u64, bool),
        event: PointerEvent,
        viewport: &mut ViewportController,
        layout: &TreeLayout,
    ) -> (GestureState, InputOutcome) {
        let held = |time_ms: u64| time_ms.saturating_sub(down_at) >= self.config.long_press_ms;
        let keep = |last: Point, fired: bool| GestureState::Pressed {
            pointer,
            origin,
            last,
            down_at,
            long_press_fired: fired,
        };

        match event {
            PointerEvent::Move {
                pointer: p,
                position,
                time_ms,
            } if p == pointer => {
                if origin.distance(position) > self.config.touch_slop {
                    viewport.pan_by(position.x - last.x, position.y - last.y);
                    return (
                        GestureState::Dragging {
                            pointer,
                            last: position,
                        },
                        InputOutcome::Panned,
                    );
                }
                if !long_press_fired && held(time_ms) {
                    let outcome = long_press_at(layout, viewport.viewport(), origin);
                    return (keep(position, true), outcome);
                }
                (keep(position, long_press_fired), InputOutcome::Ignored)
            }
            PointerEvent::Up {
                pointer: p,
                position,
                time_ms,
            } if p == pointer => {
                if origin.distance(position) > self.config.touch_slop {
                    viewport.pan_by(position.x - last.x, position.y - last.y);
                    return (GestureState::Idle, InputOutcome::Panned);
                }
                let outcome = if long_press_fired {
                    InputOutcome::Ignored
                } else if held(time_ms) {
                    long_press_at(layout, viewport.viewport(), origin)
                } else {
                    hit_test(layout, viewport.viewport(), origin)
                        .map(|node| InputOutcome::Tap(node.id.clone()))
                        .unwrap_or(InputOutcome::Ignored)
                };
                (GestureState::Idle, outcome)
            }
            PointerEvent::Down {
                pointer: p,
                position,
                ..
            } if p != pointer => (
                GestureState::Pinching {
                    first: (pointer, last),
                    second: (p, position),
                },
                InputOutcome::Ignored,
            ),
            _ => (keep(last, long_press_fired), InputOutcome::Ignored),
        }
    }
}

fn pinch(
    first: (PointerId, Point),
    second: (PointerId, Point),
    pointer: PointerId,
    position: Point,
    viewport: &mut ViewportController,
) -> (GestureState, InputOutcome) {
    let (new_first, new_second) = if pointer == first.0 {
        ((pointer, position), second)
    } else if pointer == second.0 {
        (first, (pointer, position))
    } else {
        return (GestureState::Pinching { first, second }, InputOutcome::Ignored);
    };

    let before = first.1.distance(second.1);
    let after = new_first.1.distance(new_second.1);
    let next = GestureState::Pinching {
        first: new_first,
        second: new_second,
    };
    if before <= f64::EPSILON || after <= f64::EPSILON {
        return (next, InputOutcome::Ignored);
    }

    let focus = new_first.1.midpoint(new_second.1);
    if viewport.zoom_about(after / before, focus) {
        (next, InputOutcome::Zoomed)
    } else {
        (next, InputOutcome::Ignored)
    }
}

fn long_press_at(layout: &TreeLayout, viewport: &Viewport, screen: Point) -> InputOutcome {
    hit_test(layout, viewport, screen)
        .map(|node| InputOutcome::LongPress(node.id.clone()))
        .unwrap_or(InputOutcome::Ignored)
}

/// Find the node whose circle contains a screen point.
///
/// The root is checked first since it is drawn on top; the rest follow in
/// layout order.
pub fn hit_test<'a>(
    layout: &'a TreeLayout,
    viewport: &Viewport,
    screen: Point,
) -> Option<&'a PlacedNode> {
    let scene = viewport.to_scene(screen);
    layout
        .nodes
        .iter()
        .find(|node| node.center.distance(scene) <= node.radius)
}
