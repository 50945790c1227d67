/// A node as supplied to the canvas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphNode {
	/// Unique id, referenced by links.
	pub id: String,
	/// Text drawn next to the node.
	pub label: Option<String>,
}

/// What a link stands for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Relation {
	/// Plain link with no further meaning.
	#[default]
	Link,
	/// Source follows target.
	Follows,
	/// Source commented on a post of target.
	CommentedOn,
	/// Source and target met under the same post.
	Connection,
}

/// A link between two node ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphLink {
	/// Id of the source node.
	pub source: String,
	/// Id of the target node.
	pub target: String,
	/// Whether the link points from source to target. Undirected links
	/// are drawn without an arrowhead.
	pub directed: bool,
	/// What the link stands for.
	pub relation: Relation,
}

impl GraphLink {
	/// A directed link of kind [`Relation::Link`].
	pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			directed: true,
			relation: Relation::Link,
		}
	}
}

/// Everything the canvas draws.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphData {
	/// Nodes in layout order.
	pub nodes: Vec<GraphNode>,
	/// Links; those with an unknown endpoint are skipped.
	pub links: Vec<GraphLink>,
}
