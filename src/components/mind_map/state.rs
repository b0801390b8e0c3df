use kurbo::{Point, Vec2};
use log::{debug, trace};

use super::graph::MindMapGraph;
use super::transform::ViewTransform;
use super::types::NodeId;

/// Text written on commit when the edit buffer is empty.
pub const EMPTY_TEXT: &str = "Empty";
pub const COMMIT_KEY: &str = "Enter";
pub const CANCEL_KEY: &str = "Escape";

/// The gesture in progress. Exactly one can be active at a time.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Interaction {
	#[default]
	Idle,
	/// `grab_offset` is the cursor's world offset from the node centre at
	/// press time. Moves place the centre under the cursor regardless.
	DraggingNode { node: NodeId, grab_offset: Vec2 },
	/// `anchor` is the press position minus the offset at press time.
	Panning { anchor: Point },
	Connecting { source: NodeId },
	Editing { node: NodeId, buffer: String },
}

/// Everything the canvas needs: graph, view and the live gesture.
pub struct MindMapState {
	pub graph: MindMapGraph,
	pub transform: ViewTransform,
	pub interaction: Interaction,
	pub width: f64,
	pub height: f64,
}

impl MindMapState {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			graph: MindMapGraph::new(),
			transform: ViewTransform::default(),
			interaction: Interaction::Idle,
			width,
			height,
		}
	}

	pub fn screen_to_world(&self, screen: Point) -> Point {
		self.transform.screen_to_world(screen)
	}

	pub fn node_at_position(&self, screen: Point) -> Option<NodeId> {
		self.graph.node_at(self.screen_to_world(screen))
	}

	pub fn is_editing(&self) -> bool {
		matches!(self.interaction, Interaction::Editing { .. })
	}

	/// Text the edit overlay should show, if it is open.
	pub fn edit_buffer(&self) -> Option<&str> {
		match &self.interaction {
			Interaction::Editing { buffer, .. } => Some(buffer),
			_ => None,
		}
	}

	/// CSS cursor for the canvas.
	pub fn cursor(&self) -> &'static str {
		match self.interaction {
			Interaction::Panning { .. } | Interaction::DraggingNode { .. } => "grabbing",
			_ => "grab",
		}
	}

	pub fn pointer_down(&mut self, screen: Point, shift: bool) {
		if self.is_editing() {
			return;
		}
		let world = self.screen_to_world(screen);
		self.interaction = match self.graph.node_at(world) {
			Some(source) if shift => Interaction::Connecting { source },
			Some(node) => {
				let center = self.graph.get(node).map_or(world, |n| n.position);
				Interaction::DraggingNode {
					node,
					grab_offset: world - center,
				}
			}
			None => Interaction::Panning {
				anchor: screen - self.transform.offset,
			},
		};
		debug!("pointer down -> {:?}", self.interaction);
	}

	/// Returns whether anything visible changed.
	pub fn pointer_move(&mut self, screen: Point) -> bool {
		match self.interaction {
			Interaction::DraggingNode { node, .. } => {
				let world = self.screen_to_world(screen);
				self.graph.move_node(node, world);
				true
			}
			Interaction::Panning { anchor } => {
				self.transform.offset = screen - anchor;
				true
			}
			_ => false,
		}
	}

	/// Ends the current gesture. A connect gesture links to whatever distinct
	/// node lies under `screen`. Returns whether the graph changed.
	pub fn pointer_up(&mut self, screen: Point) -> bool {
		match std::mem::take(&mut self.interaction) {
			Interaction::Connecting { source } => match self.node_at_position(screen) {
				Some(target) if target != source => self.graph.connect(source, target),
				_ => {
					debug!("connect from {source} released on nothing");
					false
				}
			},
			Interaction::DraggingNode { node, grab_offset } => {
				trace!("drag of {node} done (grabbed at {grab_offset:?})");
				false
			}
			editing @ Interaction::Editing { .. } => {
				self.interaction = editing;
				false
			}
			_ => false,
		}
	}

	/// Abandons a pointer gesture without completing it. An open edit survives.
	pub fn pointer_leave(&mut self) {
		if !self.is_editing() && self.interaction != Interaction::Idle {
			debug!("pointer left, dropping {:?}", self.interaction);
			self.interaction = Interaction::Idle;
		}
	}

	/// Opens the editor on a hit node, otherwise creates a node at the
	/// cursor. Returns whether the graph changed.
	pub fn double_click(&mut self, screen: Point, color_roll: f64) -> bool {
		if self.is_editing() {
			return false;
		}
		let world = self.screen_to_world(screen);
		match self.graph.node_at(world) {
			Some(node) => {
				let buffer = self.graph.get(node).map(|n| n.text.clone()).unwrap_or_default();
				debug!("editing {node}");
				self.interaction = Interaction::Editing { node, buffer };
				false
			}
			None => {
				self.graph.add_node(world, color_roll);
				self.interaction = Interaction::Idle;
				true
			}
		}
	}

	pub fn set_edit_buffer(&mut self, text: String) {
		if let Interaction::Editing { buffer, .. } = &mut self.interaction {
			*buffer = text;
		}
	}

	/// Writes the buffer (or [`EMPTY_TEXT`]) into the edited node.
	pub fn commit_edit(&mut self) {
		if let Interaction::Editing { node, buffer } = std::mem::take(&mut self.interaction) {
			let text = if buffer.is_empty() {
				EMPTY_TEXT.to_string()
			} else {
				buffer
			};
			self.graph.set_text(node, text);
		}
	}

	pub fn cancel_edit(&mut self) {
		if let Interaction::Editing { node, .. } = &self.interaction {
			debug!("edit of {node} cancelled");
			self.interaction = Interaction::Idle;
		}
	}

	/// Routes an overlay key press. Returns whether the key closed the editor.
	pub fn edit_key(&mut self, key: &str) -> bool {
		if !self.is_editing() {
			return false;
		}
		match key {
			COMMIT_KEY => self.commit_edit(),
			CANCEL_KEY => self.cancel_edit(),
			_ => return false,
		}
		true
	}

	pub fn wheel(&mut self, delta_y: f64) {
		self.transform.zoom_by_wheel(delta_y);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::mind_map::graph::{DEFAULT_TEXT, ROOT_POSITION};

	fn root(state: &MindMapState) -> NodeId {
		state.graph.nodes()[0].id
	}

	fn text_of(state: &MindMapState, id: NodeId) -> Option<String> {
		state.graph.get(id).map(|n| n.text.clone())
	}

	#[test]
	fn press_on_node_starts_drag_with_grab_offset() {
		let mut state = MindMapState::new(800.0, 600.0);
		state.pointer_down(Point::new(410.0, 295.0), false);
		assert_eq!(
			state.interaction,
			Interaction::DraggingNode {
				node: root(&state),
				grab_offset: Vec2::new(10.0, -5.0),
			}
		);
		assert_eq!(state.cursor(), "grabbing");
	}

	#[test]
	fn cursor_follows_gesture() {
		let mut state = MindMapState::new(800.0, 600.0);
		assert_eq!(state.cursor(), "grab");
		state.pointer_down(Point::new(10.0, 10.0), false);
		assert_eq!(state.cursor(), "grabbing");
		state.pointer_up(Point::new(10.0, 10.0));
		state.pointer_down(Point::new(400.0, 300.0), true);
		assert_eq!(state.cursor(), "grab");
		state.pointer_leave();
		state.double_click(Point::new(400.0, 300.0), 0.0);
		assert_eq!(state.cursor(), "grab");
	}

	#[test]
	fn drag_snaps_centre_to_cursor() {
		let mut state = MindMapState::new(800.0, 600.0);
		state.pointer_down(Point::new(410.0, 300.0), false);
		assert!(state.pointer_move(Point::new(500.0, 350.0)));
		assert_eq!(state.graph.nodes()[0].position, Point::new(500.0, 350.0));
		assert!(!state.pointer_up(Point::new(500.0, 350.0)));
		assert_eq!(state.interaction, Interaction::Idle);
		assert_eq!(state.cursor(), "grab");
	}

	#[test]
	fn drag_respects_pan_and_zoom() {
		let mut state = MindMapState::new(800.0, 600.0);
		state.transform.offset = Vec2::new(100.0, 50.0);
		state.transform.scale = 2.0;
		// root (400, 300) sits at screen (900, 650)
		state.pointer_down(Point::new(900.0, 650.0), false);
		assert!(matches!(state.interaction, Interaction::DraggingNode { .. }));
		state.pointer_move(Point::new(300.0, 250.0));
		assert_eq!(state.graph.nodes()[0].position, Point::new(100.0, 100.0));
	}

	#[test]
	fn pan_moves_offset_not_nodes() {
		let mut state = MindMapState::new(800.0, 600.0);
		let before = state.transform.world_to_screen(ROOT_POSITION);
		state.pointer_down(Point::new(100.0, 100.0), false);
		assert!(matches!(state.interaction, Interaction::Panning { .. }));
		state.pointer_move(Point::new(150.0, 130.0));
		state.pointer_up(Point::new(150.0, 130.0));

		assert_eq!(state.transform.offset, Vec2::new(50.0, 30.0));
		assert_eq!(state.graph.nodes()[0].position, ROOT_POSITION);
		let after = state.transform.world_to_screen(ROOT_POSITION);
		assert_eq!(after - before, Vec2::new(50.0, 30.0));
	}

	#[test]
	fn pan_is_relative_to_prior_offset() {
		let mut state = MindMapState::new(800.0, 600.0);
		state.transform.offset = Vec2::new(-20.0, 10.0);
		state.pointer_down(Point::new(100.0, 100.0), false);
		state.pointer_move(Point::new(150.0, 130.0));
		assert_eq!(state.transform.offset, Vec2::new(30.0, 40.0));
	}

	#[test]
	fn move_while_idle_is_noop() {
		let mut state = MindMapState::new(800.0, 600.0);
		assert!(!state.pointer_move(Point::new(10.0, 10.0)));
		assert_eq!(state.transform, ViewTransform::default());
	}

	#[test]
	fn shift_release_on_empty_space_connects_nothing() {
		let mut state = MindMapState::new(800.0, 600.0);
		state.pointer_down(Point::new(400.0, 300.0), true);
		assert_eq!(state.interaction, Interaction::Connecting { source: root(&state) });
		assert!(!state.pointer_up(Point::new(10.0, 10.0)));
		assert!(state.graph.nodes()[0].connections.is_empty());
		assert_eq!(state.interaction, Interaction::Idle);
	}

	#[test]
	fn shift_release_on_source_is_not_a_self_link() {
		let mut state = MindMapState::new(800.0, 600.0);
		state.pointer_down(Point::new(400.0, 300.0), true);
		assert!(!state.pointer_up(Point::new(405.0, 300.0)));
		assert!(state.graph.nodes()[0].connections.is_empty());
	}

	#[test]
	fn moving_while_connecting_leaves_source_in_place() {
		let mut state = MindMapState::new(800.0, 600.0);
		state.pointer_down(Point::new(400.0, 300.0), true);
		assert!(!state.pointer_move(Point::new(600.0, 300.0)));
		assert_eq!(state.graph.nodes()[0].position, ROOT_POSITION);
	}

	#[test]
	fn shift_on_empty_space_pans() {
		let mut state = MindMapState::new(800.0, 600.0);
		state.pointer_down(Point::new(10.0, 10.0), true);
		assert!(matches!(state.interaction, Interaction::Panning { .. }));
	}

	#[test]
	fn double_click_empty_space_adds_node() {
		let mut state = MindMapState::new(800.0, 600.0);
		state.transform.offset = Vec2::new(100.0, 0.0);
		state.transform.scale = 0.5;
		assert!(state.double_click(Point::new(150.0, 50.0), 0.3));
		assert_eq!(state.graph.len(), 2);
		let node = &state.graph.nodes()[1];
		assert_eq!(node.position, Point::new(100.0, 100.0));
		assert_eq!(node.text, DEFAULT_TEXT);
		assert!(node.connections.is_empty());
		assert_eq!(state.interaction, Interaction::Idle);
	}

	#[test]
	fn empty_commit_writes_placeholder() {
		let mut state = MindMapState::new(800.0, 600.0);
		let id = root(&state);
		state.double_click(Point::new(400.0, 300.0), 0.0);
		state.set_edit_buffer(String::new());
		assert!(state.edit_key(COMMIT_KEY));
		assert_eq!(text_of(&state, id).as_deref(), Some(EMPTY_TEXT));
		assert_eq!(state.interaction, Interaction::Idle);
	}

	#[test]
	fn cancel_keeps_text() {
		let mut state = MindMapState::new(800.0, 600.0);
		let id = root(&state);
		state.double_click(Point::new(400.0, 300.0), 0.0);
		state.set_edit_buffer("scrapped".into());
		assert!(state.edit_key(CANCEL_KEY));
		assert_eq!(text_of(&state, id).as_deref(), Some("Central Idea"));
		assert!(!state.is_editing());
	}

	#[test]
	fn other_keys_leave_editor_open() {
		let mut state = MindMapState::new(800.0, 600.0);
		state.double_click(Point::new(400.0, 300.0), 0.0);
		assert!(!state.edit_key("a"));
		assert!(state.is_editing());
		let mut idle = MindMapState::new(800.0, 600.0);
		assert!(!idle.edit_key(COMMIT_KEY));
	}

	#[test]
	fn editing_ignores_canvas_pointer_gestures() {
		let mut state = MindMapState::new(800.0, 600.0);
		state.double_click(Point::new(400.0, 300.0), 0.0);
		state.pointer_down(Point::new(10.0, 10.0), false);
		state.pointer_up(Point::new(10.0, 10.0));
		state.pointer_leave();
		assert!(!state.double_click(Point::new(10.0, 10.0), 0.0));
		assert_eq!(state.edit_buffer(), Some("Central Idea"));
		assert_eq!(state.graph.len(), 1);
	}

	#[test]
	fn wheel_zooms_while_editing() {
		let mut state = MindMapState::new(800.0, 600.0);
		state.double_click(Point::new(400.0, 300.0), 0.0);
		state.wheel(-500.0);
		assert_eq!(state.transform.scale, 1.5);
		assert!(state.is_editing());
	}

	#[test]
	fn leaving_canvas_abandons_connect() {
		let mut state = MindMapState::new(800.0, 600.0);
		state.double_click(Point::new(600.0, 300.0), 0.0);
		state.pointer_down(Point::new(400.0, 300.0), true);
		state.pointer_leave();
		assert!(!state.pointer_up(Point::new(600.0, 300.0)));
		assert!(state.graph.nodes()[0].connections.is_empty());
	}

	#[test]
	fn create_connect_and_rename() {
		let mut state = MindMapState::new(800.0, 600.0);
		let root_id = root(&state);

		assert!(state.double_click(Point::new(600.0, 300.0), 0.5));
		assert_eq!(state.graph.len(), 2);
		let child = state.graph.nodes()[1].id;

		state.pointer_down(Point::new(400.0, 300.0), true);
		assert!(state.pointer_up(Point::new(600.0, 300.0)));
		assert_eq!(state.graph.nodes()[0].connections, vec![child]);

		state.double_click(Point::new(600.0, 300.0), 0.5);
		assert_eq!(state.edit_buffer(), Some("New Idea"));
		state.set_edit_buffer("Task A".into());
		assert!(state.edit_key(COMMIT_KEY));
		assert_eq!(text_of(&state, child).as_deref(), Some("Task A"));
		assert_eq!(text_of(&state, root_id).as_deref(), Some("Central Idea"));
	}

	#[test]
	fn repeated_connect_keeps_one_link() {
		let mut state = MindMapState::new(800.0, 600.0);
		state.double_click(Point::new(600.0, 300.0), 0.5);
		for _ in 0..2 {
			state.pointer_down(Point::new(400.0, 300.0), true);
			state.pointer_up(Point::new(600.0, 300.0));
		}
		assert_eq!(state.graph.nodes()[0].connections.len(), 1);
	}
}
