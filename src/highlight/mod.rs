//! Connected-component highlighting over a host-owned graph.
//!
//! A highlight request first returns every node to the default palette and
//! then colors the component reachable from the start node, so the last
//! request always wins. Traversal is breadth-first over the undirected
//! adjacency implied by the host's edges. FIFO order only decides the order
//! of color writes, not which nodes end up highlighted.

use std::collections::{HashMap, HashSet, VecDeque};

use log::debug;

mod error;
mod graph;
mod palette;
pub mod shared;

pub use error::{HighlightError, Result};
pub use graph::{EdgeRecord, Graph, HostGraph, NodeRecord};
pub use palette::{
	ColorPair, DEFAULT_BACKGROUND, DEFAULT_BORDER, HIGHLIGHT_BACKGROUND, HIGHLIGHT_BORDER, Palette,
};

/// Colors nodes of a [`HostGraph`] by connected component.
#[derive(Clone, Debug, Default)]
pub struct ClusterHighlighter {
	palette: Palette,
}

impl ClusterHighlighter {
	/// A highlighter drawing with `palette`.
	pub fn new(palette: Palette) -> Self {
		Self { palette }
	}

	/// The palette this highlighter writes.
	pub fn palette(&self) -> &Palette {
		&self.palette
	}

	/// Sets every node to the default colors. Idempotent.
	pub fn reset_colors<G: HostGraph>(&self, graph: &mut G) {
		let ids: Vec<G::Id> = graph.node_ids().collect();
		for id in &ids {
			graph.set_node_colors(id, self.palette.default.clone());
		}
		debug!("reset {} nodes to default colors", ids.len());
	}

	/// Resets all colors, then highlights every node reachable from `start`.
	///
	/// Returns the highlighted ids in the order they were colored. If
	/// `start` is not in the graph nothing is recolored.
	pub fn highlight_connected_component<G: HostGraph>(
		&self,
		graph: &mut G,
		start: &G::Id,
	) -> Result<Vec<G::Id>> {
		let component = connected_component(graph, start)?;
		self.reset_colors(graph);
		for id in &component {
			graph.set_node_colors(id, self.palette.highlight.clone());
		}
		debug!("highlighted {} nodes reachable from {:?}", component.len(), start);
		Ok(component)
	}

	/// Node click callback. An empty selection resets; otherwise the first
	/// id's component is highlighted.
	pub fn on_node_click<G: HostGraph>(&self, graph: &mut G, node_ids: &[G::Id]) -> Result<()> {
		self.dispatch(graph, node_ids)
	}

	/// Drag start callback, with the same contract as [`Self::on_node_click`].
	pub fn on_drag_start<G: HostGraph>(&self, graph: &mut G, node_ids: &[G::Id]) -> Result<()> {
		self.dispatch(graph, node_ids)
	}

	fn dispatch<G: HostGraph>(&self, graph: &mut G, node_ids: &[G::Id]) -> Result<()> {
		match node_ids.first() {
			Some(start) => self.highlight_connected_component(graph, start).map(|_| ()),
			None => {
				self.reset_colors(graph);
				Ok(())
			}
		}
	}
}

/// Ids reachable from `start`, in breadth-first order, `start` first.
///
/// Each node appears once regardless of cycles, self-loops or parallel
/// edges. Runs in O(V + E).
pub fn connected_component<G: HostGraph>(graph: &G, start: &G::Id) -> Result<Vec<G::Id>> {
	if !graph.contains_node(start) {
		return Err(HighlightError::node_not_found(start));
	}

	let mut adjacency: HashMap<G::Id, Vec<G::Id>> = HashMap::new();
	for (from, to) in graph.edges() {
		adjacency.entry(from.clone()).or_default().push(to.clone());
		adjacency.entry(to).or_default().push(from);
	}

	let mut visited = HashSet::from([start.clone()]);
	let mut frontier = VecDeque::from([start.clone()]);
	let mut order = Vec::new();

	while let Some(current) = frontier.pop_front() {
		if let Some(neighbors) = adjacency.get(&current) {
			for next in neighbors {
				if visited.insert(next.clone()) {
					frontier.push_back(next.clone());
				}
			}
		}
		order.push(current);
	}

	Ok(order)
}
