use kurbo::Point;
use log::info;

use super::types::{Node, NodeId, PALETTE};

pub const NODE_RADIUS: f64 = 50.0;
/// World-space pick radius; scales with zoom like the nodes themselves.
pub const HIT_RADIUS: f64 = 50.0;

pub const ROOT_TEXT: &str = "Central Idea";
pub const ROOT_POSITION: Point = Point::new(400.0, 300.0);
pub const DEFAULT_TEXT: &str = "New Idea";

/// Ordered node collection. Order is iteration and paint order only.
#[derive(Clone, Debug)]
pub struct MindMapGraph {
	nodes: Vec<Node>,
	next_id: u64,
}

impl Default for MindMapGraph {
	fn default() -> Self {
		Self::new()
	}
}

impl MindMapGraph {
	/// A graph holding only the root idea.
	pub fn new() -> Self {
		let mut graph = Self {
			nodes: Vec::new(),
			next_id: 1,
		};
		graph.insert(ROOT_POSITION, ROOT_TEXT.to_string(), PALETTE[0]);
		graph
	}

	fn insert(&mut self, position: Point, text: String, color: &'static str) -> NodeId {
		let id = NodeId(self.next_id);
		self.next_id += 1;
		self.nodes.push(Node {
			id,
			position,
			text,
			color,
			connections: Vec::new(),
		});
		id
	}

	/// Adds a "New Idea" node. `color_roll` in `[0, 1)` picks the palette slot.
	pub fn add_node(&mut self, position: Point, color_roll: f64) -> NodeId {
		let slot = ((color_roll * PALETTE.len() as f64) as usize).min(PALETTE.len() - 1);
		let id = self.insert(position, DEFAULT_TEXT.to_string(), PALETTE[slot]);
		info!("created node {id} at ({:.1}, {:.1})", position.x, position.y);
		id
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	#[cfg(test)]
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn get(&self, id: NodeId) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
		self.nodes.iter_mut().find(|n| n.id == id)
	}

	/// First node, in paint order, whose centre is within [`HIT_RADIUS`] of `world`.
	pub fn node_at(&self, world: Point) -> Option<NodeId> {
		self.nodes
			.iter()
			.find(|n| n.position.distance(world) < HIT_RADIUS)
			.map(|n| n.id)
	}

	pub fn move_node(&mut self, id: NodeId, position: Point) {
		if let Some(node) = self.get_mut(id) {
			node.position = position;
		}
	}

	pub fn set_text(&mut self, id: NodeId, text: String) {
		if let Some(node) = self.get_mut(id) {
			info!("node {id} text set to {text:?}");
			node.text = text;
		}
	}

	/// Links `source -> target`. Self links, repeats and unknown ids are refused.
	pub fn connect(&mut self, source: NodeId, target: NodeId) -> bool {
		if source == target || self.get(target).is_none() {
			return false;
		}
		let Some(node) = self.get_mut(source) else {
			return false;
		};
		if node.connections.contains(&target) {
			return false;
		}
		node.connections.push(target);
		info!("connected {source} -> {target}");
		true
	}

	/// Every link whose endpoints both resolve, as `(source, target)` pairs.
	pub fn edges(&self) -> impl Iterator<Item = (&Node, &Node)> + '_ {
		self.nodes.iter().flat_map(move |source| {
			source
				.connections
				.iter()
				.filter_map(move |&target| self.get(target).map(|t| (source, t)))
		})
	}
}
