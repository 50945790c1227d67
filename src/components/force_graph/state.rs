use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::info;

use super::types::GraphData;
use crate::highlight::{self, ClusterHighlighter, ColorPair, HostGraph, Palette};

pub const NODE_RADIUS: f64 = 5.0;
pub const HIT_RADIUS: f64 = 12.0;
/// Pointer travel, in screen pixels, below which a press counts as a click.
pub const CLICK_TOLERANCE: f64 = 4.0;

/// Per-node payload stored in the simulation.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	/// Id from the input data.
	pub id: String,
	/// Text drawn next to the node.
	pub label: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct PointerState {
	pub down: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub moved: bool,
}

/// The colors and adjacency of the canvas, as seen by the highlighter.
#[derive(Clone, Debug, Default)]
pub struct ColorGraph {
	colors: HashMap<DefaultNodeIdx, ColorPair>,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
}

impl ColorGraph {
	/// Current colors of a node.
	pub fn colors(&self, idx: DefaultNodeIdx) -> Option<&ColorPair> {
		self.colors.get(&idx)
	}
}

impl HostGraph for ColorGraph {
	type Id = DefaultNodeIdx;

	fn node_ids(&self) -> impl Iterator<Item = DefaultNodeIdx> + '_ {
		self.colors.keys().copied()
	}

	fn contains_node(&self, id: &DefaultNodeIdx) -> bool {
		self.colors.contains_key(id)
	}

	fn edges(&self) -> impl Iterator<Item = (DefaultNodeIdx, DefaultNodeIdx)> + '_ {
		self.edges.iter().copied()
	}

	fn set_node_colors(&mut self, id: &DefaultNodeIdx, colors: ColorPair) {
		if let Some(current) = self.colors.get_mut(id) {
			*current = colors;
		}
	}
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub nodes: ColorGraph,
	pub highlighter: ClusterHighlighter,
	/// Node whose component is currently lit.
	pub origin: Option<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub pointer: PointerState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
	undirected: HashSet<(DefaultNodeIdx, DefaultNodeIdx)>,
}

impl ForceGraphState {
	pub fn new(data: &GraphData, width: f64, height: f64, palette: Palette) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut ids = HashMap::new();
		let mut nodes = ColorGraph::default();
		let mut undirected = HashSet::new();

		for (i, node) in data.nodes.iter().enumerate() {
			if ids.contains_key(&node.id) {
				continue;
			}
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			let (x, y) = (
				(width / 2.0 + 100.0 * angle.cos()) as f32,
				(height / 2.0 + 100.0 * angle.sin()) as f32,
			);

			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone(),
				},
			});
			ids.insert(node.id.clone(), idx);
			nodes.colors.insert(idx, palette.default.clone());
		}

		for link in &data.links {
			if let (Some(&src), Some(&tgt)) = (ids.get(&link.source), ids.get(&link.target)) {
				graph.add_edge(src, tgt, EdgeData::default());
				nodes.edges.push((src, tgt));
				if !link.directed {
					undirected.extend([(src, tgt), (tgt, src)]);
				}
			}
		}
		info!(
			"graph state built: {} nodes, {} edges",
			ids.len(),
			nodes.edges.len()
		);

		Self {
			graph,
			nodes,
			highlighter: ClusterHighlighter::new(palette),
			origin: None,
			highlight_t: 0.0,
			undirected,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			pointer: PointerState::default(),
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
		}
	}

	/// Whether the link between `from` and `to` points at `to`.
	pub fn is_directed(&self, from: DefaultNodeIdx, to: DefaultNodeIdx) -> bool {
		!self.undirected.contains(&(from, to))
	}

	/// Input id of the node at simulation index `idx`.
	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut id = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				id = Some(node.data.user_data.id.clone());
			}
		});
		id
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// HIT_RADIUS is in world-space, scales with zoom like nodes
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.nodes
			.colors(idx)
			.is_some_and(|c| self.highlighter.palette().is_highlight(c))
	}

	pub fn has_active_highlight(&self) -> bool {
		self.origin.is_some()
	}

	/// Press: starts a node drag or a pan and fires the drag-start event
	/// for whatever is under the pointer.
	pub fn pointer_down(&mut self, x: f64, y: f64) -> highlight::Result<()> {
		self.pointer = PointerState {
			down: true,
			start_x: x,
			start_y: y,
			moved: false,
		};

		let hit = self.node_at_position(x, y);
		if let Some(idx) = hit {
			self.drag.active = true;
			self.drag.node_idx = Some(idx);
			self.drag.start_x = x;
			self.drag.start_y = y;
			let drag = &mut self.drag;
			self.graph.visit_nodes(|node| {
				if node.index() == idx {
					drag.node_start_x = node.x();
					drag.node_start_y = node.y();
				}
			});
		} else {
			self.pan.active = true;
			self.pan.start_x = x;
			self.pan.start_y = y;
			self.pan.transform_start_x = self.transform.x;
			self.pan.transform_start_y = self.transform.y;
		}

		let selection: Vec<_> = hit.into_iter().collect();
		self.highlighter.on_drag_start(&mut self.nodes, &selection)?;
		self.origin = hit;
		Ok(())
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) {
		if self.pointer.down {
			let (dx, dy) = (x - self.pointer.start_x, y - self.pointer.start_y);
			if (dx * dx + dy * dy).sqrt() > CLICK_TOLERANCE {
				self.pointer.moved = true;
			}
		}

		if self.drag.active {
			if let Some(idx) = self.drag.node_idx {
				let (dx, dy) = (
					(x - self.drag.start_x) / self.transform.k,
					(y - self.drag.start_y) / self.transform.k,
				);
				let (nx, ny) = (
					self.drag.node_start_x + dx as f32,
					self.drag.node_start_y + dy as f32,
				);
				self.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.x = nx;
						node.data.y = ny;
						node.data.is_anchor = true;
					}
				});
			}
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	/// Release: ends any drag or pan. A release close to the press point
	/// also fires the click event.
	pub fn pointer_up(&mut self, x: f64, y: f64) -> highlight::Result<()> {
		let clicked = self.pointer.down && !self.pointer.moved;
		if self.drag.active {
			if let Some(idx) = self.drag.node_idx {
				self.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.is_anchor = true;
					}
				});
			}
		}
		self.release();

		if !clicked {
			return Ok(());
		}
		let hit = self.node_at_position(x, y);
		let selection: Vec<_> = hit.into_iter().collect();
		self.highlighter.on_node_click(&mut self.nodes, &selection)?;
		self.origin = hit;
		Ok(())
	}

	pub fn pointer_leave(&mut self) {
		self.release();
	}

	pub fn zoom(&mut self, x: f64, y: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	fn release(&mut self) {
		self.drag.active = false;
		self.drag.node_idx = None;
		self.pan.active = false;
		self.pointer = PointerState::default();
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;

		let (target, speed) = if self.has_active_highlight() {
			(1.0, 1.8)
		} else {
			(0.0, 1.26)
		};
		self.highlight_t += (target - self.highlight_t) * speed * dt as f64;
		if target == 0.0 && self.highlight_t < 0.01 {
			self.highlight_t = 0.0;
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::{GraphLink, GraphNode};

	const W: f64 = 800.0;
	const H: f64 = 600.0;

	fn two_pairs() -> ForceGraphState {
		let node = |id: &str| GraphNode {
			id: id.into(),
			label: None,
		};
		let link = |s: &str, t: &str| GraphLink::new(s, t);
		let data = GraphData {
			nodes: vec![node("a"), node("b"), node("c"), node("d")],
			links: vec![link("a", "b"), link("c", "d"), link("a", "missing")],
		};
		ForceGraphState::new(&data, W, H, Palette::default())
	}

	fn index_of(s: &ForceGraphState, id: &str) -> Option<DefaultNodeIdx> {
		let mut found = None;
		s.graph.visit_nodes(|node| {
			if node.data.user_data.id == id {
				found = Some(node.index());
			}
		});
		found
	}

	fn screen_pos(s: &ForceGraphState, id: &str) -> (f64, f64) {
		let idx = index_of(s, id).unwrap();
		let mut pos = (0.0, 0.0);
		s.graph.visit_nodes(|node| {
			if node.index() == idx {
				pos = (
					node.x() as f64 * s.transform.k + s.transform.x,
					node.y() as f64 * s.transform.k + s.transform.y,
				);
			}
		});
		pos
	}

	fn lit(s: &ForceGraphState) -> Vec<String> {
		let mut ids: Vec<String> = ["a", "b", "c", "d"]
			.into_iter()
			.filter(|id| s.is_highlighted(index_of(s, id).unwrap()))
			.map(String::from)
			.collect();
		ids.sort();
		ids
	}

	// No node sits at the layout center.
	fn background(s: &ForceGraphState) -> (f64, f64) {
		(W / 2.0 + s.transform.x, H / 2.0 + s.transform.y)
	}

	#[test]
	fn links_to_unknown_nodes_are_dropped() {
		let s = two_pairs();
		assert_eq!(s.nodes.edges().count(), 2);
		assert_eq!(s.nodes.node_ids().count(), 4);
	}

	#[test]
	fn node_ids_round_trip_through_indices() {
		let s = two_pairs();
		let idx = index_of(&s, "c").unwrap();
		assert_eq!(s.node_id(idx).as_deref(), Some("c"));
		assert_eq!(index_of(&s, "missing"), None);
	}

	#[test]
	fn duplicate_node_ids_keep_the_first() {
		let node = |id: &str, label: &str| GraphNode {
			id: id.into(),
			label: Some(label.into()),
		};
		let data = GraphData {
			nodes: vec![node("a", "first"), node("b", "b"), node("a", "second")],
			links: vec![GraphLink::new("a", "b")],
		};

		let s = ForceGraphState::new(&data, W, H, Palette::default());

		assert_eq!(s.nodes.node_ids().count(), 2);
		assert_eq!(s.nodes.edges().count(), 1);
		let a = index_of(&s, "a").unwrap();
		let mut label = None;
		s.graph.visit_nodes(|node| {
			if node.index() == a {
				label = node.data.user_data.label.clone();
			}
		});
		assert_eq!(label.as_deref(), Some("first"));
	}

	#[test]
	fn undirected_links_have_no_direction_either_way() {
		let mut mutual = GraphLink::new("a", "b");
		mutual.directed = false;
		let data = GraphData {
			nodes: ["a", "b", "c"]
				.into_iter()
				.map(|id| GraphNode {
					id: id.into(),
					label: None,
				})
				.collect(),
			links: vec![mutual, GraphLink::new("b", "c")],
		};

		let s = ForceGraphState::new(&data, W, H, Palette::default());
		let (a, b, c) = (
			index_of(&s, "a").unwrap(),
			index_of(&s, "b").unwrap(),
			index_of(&s, "c").unwrap(),
		);

		assert!(!s.is_directed(a, b));
		assert!(!s.is_directed(b, a));
		assert!(s.is_directed(b, c));
	}

	#[test]
	fn all_nodes_start_default() {
		let s = two_pairs();
		assert!(lit(&s).is_empty());
		assert!(!s.has_active_highlight());
	}

	#[test]
	fn pressing_a_node_highlights_its_component() {
		let mut s = two_pairs();
		let (x, y) = screen_pos(&s, "c");

		s.pointer_down(x, y).unwrap();

		assert_eq!(lit(&s), vec!["c", "d"]);
		assert_eq!(s.origin, index_of(&s, "c"));
		assert!(s.drag.active);
	}

	#[test]
	fn pressing_background_resets() {
		let mut s = two_pairs();
		let (x, y) = screen_pos(&s, "a");
		s.pointer_down(x, y).unwrap();
		s.pointer_up(x, y).unwrap();
		assert_eq!(lit(&s), vec!["a", "b"]);

		let (bx, by) = background(&s);
		s.pointer_down(bx, by).unwrap();

		assert!(lit(&s).is_empty());
		assert!(s.pan.active);
		assert_eq!(s.origin, None);
	}

	#[test]
	fn click_on_node_keeps_its_component() {
		let mut s = two_pairs();
		let (x, y) = screen_pos(&s, "b");

		s.pointer_down(x, y).unwrap();
		s.pointer_move(x + 1.0, y);
		s.pointer_up(x + 1.0, y).unwrap();

		assert_eq!(lit(&s), vec!["a", "b"]);
		assert!(!s.drag.active);
	}

	#[test]
	fn drag_moves_node_without_clicking() {
		let mut s = two_pairs();
		let (x, y) = screen_pos(&s, "d");

		s.pointer_down(x, y).unwrap();
		s.pointer_move(x + 40.0, y + 30.0);
		s.pointer_up(x + 40.0, y + 30.0).unwrap();

		let (nx, ny) = screen_pos(&s, "d");
		assert!((nx - (x + 40.0)).abs() < 0.01);
		assert!((ny - (y + 30.0)).abs() < 0.01);
		assert_eq!(lit(&s), vec!["c", "d"]);
	}

	#[test]
	fn pan_then_release_is_not_a_click() {
		let mut s = two_pairs();
		let (bx, by) = background(&s);
		let start_x = s.transform.x;

		s.pointer_down(bx, by).unwrap();
		s.pointer_move(bx + 25.0, by);
		s.pointer_up(bx + 25.0, by).unwrap();

		assert_eq!(s.transform.x, start_x + 25.0);
		assert!(!s.pointer.down);
	}

	#[test]
	fn zoom_is_clamped() {
		let mut s = two_pairs();
		for _ in 0..100 {
			s.zoom(0.0, 0.0, -1.0);
		}
		assert_eq!(s.transform.k, 10.0);
	}

	#[test]
	fn highlight_fades_in_and_out() {
		let mut s = two_pairs();
		let (x, y) = screen_pos(&s, "a");
		s.pointer_down(x, y).unwrap();
		s.pointer_up(x, y).unwrap();

		for _ in 0..200 {
			s.tick(0.016);
		}
		assert!(s.highlight_t > 0.9 && s.highlight_t <= 1.0);

		s.origin = None;
		for _ in 0..400 {
			s.tick(0.016);
		}
		assert_eq!(s.highlight_t, 0.0);
	}
}
