//! Force-directed graph canvas with connected-component highlighting.

mod component;
mod render;
mod state;
mod types;

pub use component::ForceGraphCanvas;
pub use types::{GraphData, GraphLink, GraphNode, Relation};
