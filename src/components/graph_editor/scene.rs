//! Retained drawing state fed by the session and painted each frame.

use super::geometry::EdgeGeometry;
use super::model::{Edge, Node};
use super::session::Renderer;
use super::types::{NodeId, Point};

#[derive(Clone, Debug, PartialEq)]
pub struct NodeSprite {
	pub center: Point,
	pub radius: f64,
	pub label: String,
	pub color: String,
	pub highlighted: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeSprite {
	pub label: String,
	pub color: String,
	/// `None` while the endpoints overlap.
	pub geometry: Option<EdgeGeometry>,
}

#[derive(Clone, Debug, Default)]
pub struct Scene {
	nodes: Vec<Option<NodeSprite>>,
	edges: Vec<Option<EdgeSprite>>,
	/// Node paint order, bottom first.
	order: Vec<NodeId>,
	highlight_color: String,
}

impl Scene {
	pub fn new(highlight_color: impl Into<String>) -> Self {
		Self {
			highlight_color: highlight_color.into(),
			..Self::default()
		}
	}

	/// Node sprites in paint order, bottom first.
	pub fn nodes(&self) -> impl Iterator<Item = &NodeSprite> {
		self.order.iter().filter_map(|&id| self.node(id))
	}

	pub fn edges(&self) -> impl Iterator<Item = &EdgeSprite> {
		self.edges.iter().flatten()
	}

	pub fn node(&self, id: NodeId) -> Option<&NodeSprite> {
		self.nodes.get(id.0).and_then(Option::as_ref)
	}

	/// Stroke colour for a node, taking the highlight into account.
	pub fn stroke_color<'a>(&'a self, sprite: &'a NodeSprite) -> &'a str {
		if sprite.highlighted {
			&self.highlight_color
		} else {
			&sprite.color
		}
	}

	fn slot<T>(items: &mut Vec<Option<T>>, index: usize) -> &mut Option<T> {
		if items.len() <= index {
			items.resize_with(index + 1, || None);
		}
		&mut items[index]
	}
}

impl Renderer for Scene {
	fn draw_node(&mut self, node: &Node, color: &str) {
		let slot = Self::slot(&mut self.nodes, node.id.0);
		if slot.is_none() {
			self.order.push(node.id);
		}
		let highlighted = slot.as_ref().is_some_and(|s| s.highlighted);
		*slot = Some(NodeSprite {
			center: node.position,
			radius: node.radius,
			label: node.label.clone(),
			color: color.to_string(),
			highlighted,
		});
	}

	fn draw_edge(&mut self, edge: &Edge, geometry: Option<EdgeGeometry>, color: &str) {
		*Self::slot(&mut self.edges, edge.id.0) = Some(EdgeSprite {
			label: edge.label.clone(),
			color: color.to_string(),
			geometry,
		});
	}

	fn highlight(&mut self, node: NodeId) {
		if let Some(Some(sprite)) = self.nodes.get_mut(node.0) {
			sprite.highlighted = true;
		}
	}

	fn unhighlight(&mut self, node: NodeId) {
		if let Some(Some(sprite)) = self.nodes.get_mut(node.0) {
			sprite.highlighted = false;
		}
	}

	fn bring_to_front(&mut self, node: NodeId) {
		if let Some(pos) = self.order.iter().position(|&id| id == node) {
			let id = self.order.remove(pos);
			self.order.push(id);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::super::model::GraphModel;
	use super::*;

	#[test]
	fn redraw_keeps_highlight() {
		let mut g = GraphModel::new(20.0);
		let a = g.add_node("A");
		let mut scene = Scene::new("green");

		scene.draw_node(&g.nodes()[0], "black");
		scene.highlight(a);
		g.translate(a, Point::new(3.0, 4.0));
		scene.draw_node(&g.nodes()[0], "black");

		let sprite = scene.node(a).unwrap();
		assert!(sprite.highlighted);
		assert_eq!(sprite.center, Point::new(3.0, 4.0));
		assert_eq!(scene.stroke_color(sprite), "green");

		scene.unhighlight(a);
		assert_eq!(scene.stroke_color(scene.node(a).unwrap()), "black");
	}

	#[test]
	fn raised_node_paints_last() {
		let mut g = GraphModel::new(20.0);
		for label in ["A", "B", "C"] {
			g.add_node(label);
		}
		let mut scene = Scene::new("green");
		for node in g.nodes() {
			scene.draw_node(node, "black");
		}
		scene.bring_to_front(NodeId(0));
		// Redrawing keeps the raised order.
		scene.draw_node(&g.nodes()[0], "black");

		let labels: Vec<_> = scene.nodes().map(|s| s.label.as_str()).collect();
		assert_eq!(labels, vec!["B", "C", "A"]);
	}

	#[test]
	fn highlight_before_draw_is_ignored() {
		let mut scene = Scene::new("green");
		scene.highlight(NodeId(4));
		assert_eq!(scene.nodes().count(), 0);
	}
}
