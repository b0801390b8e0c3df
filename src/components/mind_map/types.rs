use std::fmt;

use kurbo::Point;

/// Fixed palette new nodes pick their color from.
pub const PALETTE: [&str; 6] = [
	"#8b5cf6", "#ec4899", "#f59e0b", "#10b981", "#3b82f6", "#ef4444",
];

/// Opaque node identity, unique for the lifetime of a graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(super) u64);

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub id: NodeId,
	/// Centre in world space.
	pub position: Point,
	pub text: String,
	pub color: &'static str,
	/// Outgoing links, in the order they were made.
	pub connections: Vec<NodeId>,
}
