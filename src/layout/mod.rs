//! Layout engine for computing node positions
//!
//! This module takes a [`TreeModel`](crate::model::TreeModel) and computes a
//! collision-free placement, producing a [`TreeLayout`] with positioned
//! nodes, wrapped label geometry and connector links.

pub mod config;
pub mod engine;
pub mod links;
pub mod text;
pub mod types;

pub use config::LayoutConfig;
pub use engine::compute;
pub use links::is_sibling_relationship;
pub use text::{wrap_text, AverageCharWidth, TextMeasure};
pub use types::*;
