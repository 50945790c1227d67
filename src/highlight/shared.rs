//! Serialized highlighting for hosts that deliver events from several
//! threads.

use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{ClusterHighlighter, HostGraph, Result};

/// A host graph behind a mutex.
///
/// Reset, traversal and coloring of one request run as a single critical
/// section, so concurrent requests never interleave their color writes.
#[derive(Debug, Default)]
pub struct SharedGraph<G> {
	graph: Mutex<G>,
	highlighter: ClusterHighlighter,
}

impl<G: HostGraph> SharedGraph<G> {
	/// Wraps `graph`, drawing with `highlighter`'s palette.
	pub fn new(graph: G, highlighter: ClusterHighlighter) -> Self {
		Self {
			graph: Mutex::new(graph),
			highlighter,
		}
	}

	/// See [`ClusterHighlighter::reset_colors`].
	pub fn reset_colors(&self) {
		self.highlighter.reset_colors(&mut *self.lock());
	}

	/// See [`ClusterHighlighter::highlight_connected_component`].
	pub fn highlight_connected_component(&self, start: &G::Id) -> Result<Vec<G::Id>> {
		self.highlighter
			.highlight_connected_component(&mut *self.lock(), start)
	}

	/// See [`ClusterHighlighter::on_node_click`].
	pub fn on_node_click(&self, node_ids: &[G::Id]) -> Result<()> {
		self.highlighter.on_node_click(&mut *self.lock(), node_ids)
	}

	/// See [`ClusterHighlighter::on_drag_start`].
	pub fn on_drag_start(&self, node_ids: &[G::Id]) -> Result<()> {
		self.highlighter.on_drag_start(&mut *self.lock(), node_ids)
	}

	/// Runs `f` with read access to the graph.
	pub fn with_graph<R>(&self, f: impl FnOnce(&G) -> R) -> R {
		f(&self.lock())
	}

	/// Returns the wrapped graph.
	pub fn into_inner(self) -> G {
		self.graph.into_inner().unwrap_or_else(PoisonError::into_inner)
	}

	// A panic mid-request can only leave nodes in one of the two palette
	// states, so a poisoned lock is still usable.
	fn lock(&self) -> MutexGuard<'_, G> {
		self.graph.lock().unwrap_or_else(PoisonError::into_inner)
	}
}
