//! Error types for highlight operations.

use thiserror::Error;

/// Errors surfaced by the cluster highlighter.
///
/// None of them leave partial coloring behind: they are raised before the
/// first color write.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HighlightError {
	/// The start node is not part of the host's node collection.
	#[error("node not found: {id}")]
	NodeNotFound {
		/// Debug rendering of the rejected id.
		id: String,
	},
}

impl HighlightError {
	pub(crate) fn node_not_found(id: &impl std::fmt::Debug) -> Self {
		Self::NodeNotFound {
			id: format!("{id:?}"),
		}
	}
}

/// Result alias for highlight operations.
pub type Result<T> = std::result::Result<T, HighlightError>;
