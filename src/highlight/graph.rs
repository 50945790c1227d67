//! The boundary between the highlighter and whatever owns the graph.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use super::palette::ColorPair;

/// A graph owned by a rendering host.
///
/// The highlighter only reads identities and adjacency, and only writes
/// node colors. Node ids are unique within a host; that is the host's
/// invariant and is not re-validated per call.
pub trait HostGraph {
	/// Opaque node identity.
	type Id: Clone + Eq + Hash + Debug;

	/// Every node id, in any order.
	fn node_ids(&self) -> impl Iterator<Item = Self::Id> + '_;

	/// Whether `id` names a node of this graph.
	fn contains_node(&self, id: &Self::Id) -> bool;

	/// Every edge as `(from, to)`. Direction is ignored by traversal.
	fn edges(&self) -> impl Iterator<Item = (Self::Id, Self::Id)> + '_;

	/// Assigns both colors of a node at once. Unknown ids are ignored.
	fn set_node_colors(&mut self, id: &Self::Id, colors: ColorPair);
}

/// A node with its current colors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeRecord<Id> {
	/// Unique node identity.
	pub id: Id,
	/// Current display colors.
	pub colors: ColorPair,
}

/// An edge between two node ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeRecord<Id> {
	/// Position of the edge in insertion order.
	pub id: usize,
	/// First endpoint.
	pub from: Id,
	/// Second endpoint.
	pub to: Id,
}

/// In-memory host, for embedding the highlighter without a renderer.
#[derive(Clone, Debug)]
pub struct Graph<Id> {
	nodes: Vec<NodeRecord<Id>>,
	index: HashMap<Id, usize>,
	edges: Vec<EdgeRecord<Id>>,
}

impl<Id> Default for Graph<Id> {
	fn default() -> Self {
		Self {
			nodes: Vec::new(),
			index: HashMap::new(),
			edges: Vec::new(),
		}
	}
}

impl<Id: Clone + Eq + Hash> Graph<Id> {
	/// An empty graph.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a node. Returns `false` and leaves the graph untouched if the
	/// id is already present.
	pub fn add_node(&mut self, id: Id, colors: ColorPair) -> bool {
		if self.index.contains_key(&id) {
			return false;
		}
		self.index.insert(id.clone(), self.nodes.len());
		self.nodes.push(NodeRecord { id, colors });
		true
	}

	/// Adds an edge and returns its id. Parallel edges and self-loops are
	/// allowed.
	pub fn add_edge(&mut self, from: Id, to: Id) -> usize {
		let id = self.edges.len();
		self.edges.push(EdgeRecord { id, from, to });
		id
	}

	/// Looks up a node by id.
	pub fn node(&self, id: &Id) -> Option<&NodeRecord<Id>> {
		self.index.get(id).map(|&i| &self.nodes[i])
	}

	/// Current colors of a node.
	pub fn colors(&self, id: &Id) -> Option<&ColorPair> {
		self.node(id).map(|n| &n.colors)
	}

	/// All nodes in insertion order.
	pub fn nodes(&self) -> &[NodeRecord<Id>] {
		&self.nodes
	}

	/// All edges in insertion order.
	pub fn edge_records(&self) -> &[EdgeRecord<Id>] {
		&self.edges
	}

	/// Number of nodes.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Whether the graph has no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

impl<Id: Clone + Eq + Hash + Debug> HostGraph for Graph<Id> {
	type Id = Id;

	fn node_ids(&self) -> impl Iterator<Item = Id> + '_ {
		self.nodes.iter().map(|n| n.id.clone())
	}

	fn contains_node(&self, id: &Id) -> bool {
		self.index.contains_key(id)
	}

	fn edges(&self) -> impl Iterator<Item = (Id, Id)> + '_ {
		self.edges.iter().map(|e| (e.from.clone(), e.to.clone()))
	}

	fn set_node_colors(&mut self, id: &Id, colors: ColorPair) {
		if let Some(&i) = self.index.get(id) {
			self.nodes[i].colors = colors;
		}
	}
}
