//! Per-node selection state and multi-node drag coordination.
//!
//! A drag that starts on one of several selected nodes moves the whole
//! selection. Because the pointer release that ends such a drag also lands
//! as a click on the anchor node, the anchor is locked for exactly one click
//! so the release does not deselect it.

use log::debug;

use super::model::GraphModel;
use super::types::{NodeId, Point};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionState {
	#[default]
	Unselected,
	Selected,
}

impl SelectionState {
	pub fn is_selected(self) -> bool {
		self == SelectionState::Selected
	}

	fn toggled(self) -> Self {
		match self {
			SelectionState::Unselected => SelectionState::Selected,
			SelectionState::Selected => SelectionState::Unselected,
		}
	}
}

/// A node whose state changed, for forwarding to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionChange {
	pub node: NodeId,
	pub state: SelectionState,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct DragGesture {
	anchor: NodeId,
	members: Vec<NodeId>,
}

#[derive(Clone, Debug, Default)]
pub struct SelectionController {
	states: Vec<SelectionState>,
	locked: Option<NodeId>,
	gesture: Option<DragGesture>,
}

impl SelectionController {
	pub fn new(node_count: usize) -> Self {
		Self {
			states: vec![SelectionState::Unselected; node_count],
			locked: None,
			gesture: None,
		}
	}

	pub fn state(&self, node: NodeId) -> SelectionState {
		self.states.get(node.0).copied().unwrap_or_default()
	}

	pub fn is_selected(&self, node: NodeId) -> bool {
		self.state(node).is_selected()
	}

	pub fn selected(&self) -> Vec<NodeId> {
		self.states
			.iter()
			.enumerate()
			.filter(|(_, s)| s.is_selected())
			.map(|(i, _)| NodeId(i))
			.collect()
	}

	pub fn locked(&self) -> Option<NodeId> {
		self.locked
	}

	pub fn is_dragging(&self) -> bool {
		self.gesture.is_some()
	}

	/// Nodes moved by the current drag, fixed when it started.
	pub fn drag_members(&self) -> &[NodeId] {
		self.gesture
			.as_ref()
			.map(|g| g.members.as_slice())
			.unwrap_or_default()
	}

	/// Toggles `node`, unless it anchored the last multi-node drag, in which
	/// case the lock is consumed instead. Returns the change, if any.
	pub fn click(&mut self, node: NodeId) -> Option<SelectionChange> {
		if node.0 >= self.states.len() {
			return None;
		}
		if self.locked == Some(node) {
			debug!("click on {node} suppressed by drag lock");
			self.locked = None;
			return None;
		}
		let state = self.states[node.0].toggled();
		self.states[node.0] = state;
		debug!("click on {node}: {state:?}");
		Some(SelectionChange { node, state })
	}

	/// Selects `node` if needed and captures the current selection as the
	/// gesture's move set.
	pub fn drag_start(&mut self, node: NodeId) -> Option<SelectionChange> {
		if node.0 >= self.states.len() {
			return None;
		}
		let change = (!self.states[node.0].is_selected()).then(|| {
			self.states[node.0] = SelectionState::Selected;
			SelectionChange {
				node,
				state: SelectionState::Selected,
			}
		});
		let members = self.selected();
		self.locked = (members.len() > 1).then_some(node);
		debug!(
			"drag start on {node} moving {} node(s), lock {:?}",
			members.len(),
			self.locked
		);
		self.gesture = Some(DragGesture {
			anchor: node,
			members,
		});
		change
	}

	/// Moves every member of the current gesture by `delta` and returns them.
	pub fn drag_move(&self, graph: &mut GraphModel, delta: Point) -> &[NodeId] {
		let members = self.drag_members();
		for &id in members {
			graph.translate(id, delta);
		}
		members
	}

	/// Ends the gesture. `released_on` is the node that will receive the
	/// release click, if any. The lock survives only when that node is the
	/// anchor; otherwise nothing would ever consume it.
	pub fn drag_end(&mut self, released_on: Option<NodeId>) {
		let Some(gesture) = self.gesture.take() else {
			return;
		};
		if released_on != Some(gesture.anchor) && self.locked.take().is_some() {
			debug!("drag on {} ended without a click, lock released", gesture.anchor);
		}
	}

	pub fn select_all(&mut self) -> Vec<SelectionChange> {
		self.set_all(SelectionState::Selected)
	}

	pub fn deselect_all(&mut self) -> Vec<SelectionChange> {
		self.set_all(SelectionState::Unselected)
	}

	/// Applies `state` to every node regardless of locks; every node is
	/// reported so the renderer can resync.
	fn set_all(&mut self, state: SelectionState) -> Vec<SelectionChange> {
		self.states.iter_mut().for_each(|s| *s = state);
		(0..self.states.len())
			.map(|i| SelectionChange {
				node: NodeId(i),
				state,
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn graph(n: usize) -> GraphModel {
		let mut g = GraphModel::new(10.0);
		for i in 0..n {
			g.add_node(format!("n{i}"));
		}
		g
	}

	#[test]
	fn click_toggles_without_lock() {
		let mut sel = SelectionController::new(2);
		assert_eq!(
			sel.click(NodeId(0)),
			Some(SelectionChange {
				node: NodeId(0),
				state: SelectionState::Selected
			})
		);
		assert!(sel.is_selected(NodeId(0)));
		sel.click(NodeId(0));
		assert!(!sel.is_selected(NodeId(0)));
		assert!(!sel.is_selected(NodeId(1)));
	}

	#[test]
	fn multi_drag_moves_whole_selection() {
		let mut g = graph(3);
		let mut sel = SelectionController::new(3);
		sel.click(NodeId(0));
		sel.click(NodeId(1));

		assert_eq!(sel.drag_start(NodeId(0)), None);
		let moved = sel.drag_move(&mut g, Point::new(5.0, -3.0)).to_vec();
		sel.drag_move(&mut g, Point::new(1.0, 1.0));

		assert_eq!(moved, vec![NodeId(0), NodeId(1)]);
		assert_eq!(g.node(NodeId(0)).unwrap().position, Point::new(6.0, -2.0));
		assert_eq!(g.node(NodeId(1)).unwrap().position, Point::new(6.0, -2.0));
		assert_eq!(g.node(NodeId(2)).unwrap().position, Point::default());
	}

	#[test]
	fn release_after_multi_drag_keeps_anchor_selected() {
		let mut sel = SelectionController::new(3);
		sel.click(NodeId(0));
		sel.click(NodeId(1));

		sel.drag_start(NodeId(1));
		assert_eq!(sel.locked(), Some(NodeId(1)));
		sel.drag_end(Some(NodeId(1)));
		assert_eq!(sel.click(NodeId(1)), None);

		assert!(sel.is_selected(NodeId(1)));
		assert!(sel.is_selected(NodeId(0)));
		assert_eq!(sel.locked(), None);

		// The lock is spent; the next click toggles again.
		sel.click(NodeId(1));
		assert!(!sel.is_selected(NodeId(1)));
	}

	#[test]
	fn drag_on_unselected_node_selects_it_first() {
		let mut sel = SelectionController::new(3);
		sel.click(NodeId(2));
		let change = sel.drag_start(NodeId(0));
		assert_eq!(
			change,
			Some(SelectionChange {
				node: NodeId(0),
				state: SelectionState::Selected
			})
		);
		assert_eq!(sel.drag_members(), &[NodeId(0), NodeId(2)]);
		assert_eq!(sel.locked(), Some(NodeId(0)));
	}

	#[test]
	fn single_node_drag_sets_no_lock() {
		let mut sel = SelectionController::new(2);
		sel.drag_start(NodeId(1));
		assert_eq!(sel.locked(), None);
		assert_eq!(sel.drag_members(), &[NodeId(1)]);
		sel.drag_end(Some(NodeId(1)));
		// The release click toggles the lone node back off.
		sel.click(NodeId(1));
		assert!(!sel.is_selected(NodeId(1)));
	}

	#[test]
	fn move_set_is_fixed_at_drag_start() {
		let mut g = graph(3);
		let mut sel = SelectionController::new(3);
		sel.click(NodeId(0));
		sel.click(NodeId(1));
		sel.drag_start(NodeId(0));

		sel.select_all();
		sel.drag_move(&mut g, Point::new(2.0, 2.0));
		assert_eq!(g.node(NodeId(2)).unwrap().position, Point::default());

		sel.deselect_all();
		sel.drag_move(&mut g, Point::new(2.0, 2.0));
		assert_eq!(g.node(NodeId(1)).unwrap().position, Point::new(4.0, 4.0));
	}

	#[test]
	fn select_all_then_deselect_all() {
		let mut sel = SelectionController::new(4);
		sel.click(NodeId(1));
		sel.click(NodeId(3));
		assert_eq!(sel.select_all().len(), 4);
		assert_eq!(sel.selected().len(), 4);
		sel.deselect_all();
		assert!(sel.selected().is_empty());
	}

	#[test]
	fn bulk_changes_ignore_the_lock() {
		let mut sel = SelectionController::new(2);
		sel.click(NodeId(0));
		sel.drag_start(NodeId(1));
		sel.drag_end(Some(NodeId(1)));
		sel.deselect_all();
		assert!(!sel.is_selected(NodeId(1)));
		assert_eq!(sel.locked(), Some(NodeId(1)));
	}

	#[test]
	fn drag_ending_away_from_anchor_releases_lock() {
		for released_on in [None, Some(NodeId(2))] {
			let mut sel = SelectionController::new(3);
			sel.click(NodeId(0));
			sel.click(NodeId(1));
			sel.drag_start(NodeId(0));
			sel.drag_end(released_on);

			assert_eq!(sel.locked(), None, "{released_on:?}");
			assert!(!sel.is_dragging());
			// A plain click on the former anchor toggles it again.
			sel.click(NodeId(0));
			assert!(!sel.is_selected(NodeId(0)), "{released_on:?}");
		}
	}

	#[test]
	fn unknown_nodes_are_ignored() {
		let mut sel = SelectionController::new(1);
		assert_eq!(sel.click(NodeId(5)), None);
		assert_eq!(sel.drag_start(NodeId(5)), None);
		assert!(!sel.is_dragging());
	}
}
