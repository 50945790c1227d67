//! Node colors used by the highlighter.

/// Background and border color of a single node.
///
/// Both colors are always written together, so a node can never be half
/// highlighted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorPair {
	/// Fill color of the node disc.
	pub background: String,
	/// Stroke color around the node disc.
	pub border: String,
}

impl ColorPair {
	/// Builds a pair from any two CSS color strings.
	pub fn new(background: impl Into<String>, border: impl Into<String>) -> Self {
		Self {
			background: background.into(),
			border: border.into(),
		}
	}
}

/// The four colors a node can take: a default pair and a highlight pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
	/// Colors of nodes outside the highlighted component.
	pub default: ColorPair,
	/// Colors of nodes inside the highlighted component.
	pub highlight: ColorPair,
}

/// Default node fill.
pub const DEFAULT_BACKGROUND: &str = "#97c2fc";
/// Default node stroke.
pub const DEFAULT_BORDER: &str = "#2b7ce9";
/// Fill of highlighted nodes.
pub const HIGHLIGHT_BACKGROUND: &str = "#14bf3d";
/// Stroke of highlighted nodes.
pub const HIGHLIGHT_BORDER: &str = "#0d8328";

impl Default for Palette {
	fn default() -> Self {
		Self {
			default: ColorPair::new(DEFAULT_BACKGROUND, DEFAULT_BORDER),
			highlight: ColorPair::new(HIGHLIGHT_BACKGROUND, HIGHLIGHT_BORDER),
		}
	}
}

impl Palette {
	/// Whether `colors` is exactly the highlight pair of this palette.
	pub fn is_highlight(&self, colors: &ColorPair) -> bool {
		*colors == self.highlight
	}
}
