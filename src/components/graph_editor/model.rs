//! Node/edge storage with symmetric adjacency lists.

use super::error::{GraphError, Result};
use super::types::{Direction, EdgeId, NodeId, Point};

#[derive(Clone, Debug)]
pub struct Node {
	pub id: NodeId,
	pub label: String,
	/// Footprint used by layout bounds and edge endpoints.
	pub radius: f64,
	pub position: Point,
	out_edges: Vec<EdgeId>,
	in_edges: Vec<EdgeId>,
}

impl Node {
	pub fn out_edges(&self) -> &[EdgeId] {
		&self.out_edges
	}

	pub fn in_edges(&self) -> &[EdgeId] {
		&self.in_edges
	}

	pub fn contains(&self, point: Point) -> bool {
		self.position.distance(point) <= self.radius
	}
}

#[derive(Clone, Debug)]
pub struct Edge {
	pub id: EdgeId,
	pub from: NodeId,
	pub to: NodeId,
	pub label: String,
}

/// Directed graph built once at load time.
///
/// Only positions change afterwards; nodes and edges are never removed or
/// retargeted.
#[derive(Clone, Debug, Default)]
pub struct GraphModel {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	levels: Vec<usize>,
	node_radius: f64,
}

impl GraphModel {
	pub fn new(node_radius: f64) -> Self {
		Self {
			node_radius,
			..Self::default()
		}
	}

	pub fn add_node(&mut self, label: impl Into<String>) -> NodeId {
		let id = NodeId(self.nodes.len());
		self.nodes.push(Node {
			id,
			label: label.into(),
			radius: self.node_radius,
			position: Point::default(),
			out_edges: Vec::new(),
			in_edges: Vec::new(),
		});
		self.levels.push(0);
		id
	}

	pub fn add_edge(&mut self, from: NodeId, to: NodeId, label: impl Into<String>) -> Result<EdgeId> {
		let id = EdgeId(self.edges.len());
		for endpoint in [from, to] {
			if endpoint.0 >= self.nodes.len() {
				return Err(GraphError::InvalidReference {
					edge: id.0,
					index: endpoint.0 as i64,
					node_count: self.nodes.len(),
				});
			}
		}
		self.nodes[from.0].out_edges.push(id);
		self.nodes[to.0].in_edges.push(id);
		self.edges.push(Edge {
			id,
			from,
			to,
			label: label.into(),
		});
		Ok(id)
	}

	/// Adds an edge from raw document indices, rejecting negative and
	/// out-of-range values.
	pub fn add_edge_by_index(&mut self, from: i64, to: i64, label: impl Into<String>) -> Result<EdgeId> {
		let edge = self.edges.len();
		let node_count = self.nodes.len();
		let resolve = |index: i64| {
			usize::try_from(index)
				.ok()
				.filter(|&i| i < node_count)
				.map(NodeId)
				.ok_or(GraphError::InvalidReference {
					edge,
					index,
					node_count,
				})
		};
		let (from, to) = (resolve(from)?, resolve(to)?);
		self.add_edge(from, to, label)
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn node(&self, id: NodeId) -> Option<&Node> {
		self.nodes.get(id.0)
	}

	pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
		self.edges.get(id.0)
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn edges_of(&self, id: NodeId, direction: Direction) -> impl Iterator<Item = &Edge> + '_ {
		let ids: &[EdgeId] = match (self.node(id), direction) {
			(Some(node), Direction::Outgoing) => &node.out_edges,
			(Some(node), Direction::Incoming) => &node.in_edges,
			(None, _) => &[],
		};
		ids.iter().map(move |e| &self.edges[e.0])
	}

	/// Both adjacency lists of a node, outgoing first.
	pub fn incident_edges(&self, id: NodeId) -> impl Iterator<Item = &Edge> + '_ {
		self.edges_of(id, Direction::Outgoing)
			.chain(self.edges_of(id, Direction::Incoming))
	}

	pub fn set_position(&mut self, id: NodeId, position: Point) {
		if let Some(node) = self.nodes.get_mut(id.0) {
			node.position = position;
		}
	}

	pub fn translate(&mut self, id: NodeId, delta: Point) {
		if let Some(node) = self.nodes.get_mut(id.0) {
			node.position += delta;
		}
	}

	/// Hierarchy level of a node; 0 until a layered layout has run.
	pub fn level(&self, id: NodeId) -> usize {
		self.levels.get(id.0).copied().unwrap_or(0)
	}

	pub fn set_levels(&mut self, levels: Vec<usize>) {
		debug_assert_eq!(levels.len(), self.nodes.len());
		self.levels = levels;
	}

	/// Topmost node under `point`, given a paint order listed bottom first.
	pub fn node_at(&self, point: Point, order: &[NodeId]) -> Option<NodeId> {
		order
			.iter()
			.rev()
			.copied()
			.find(|&id| self.node(id).is_some_and(|n| n.contains(point)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn abc() -> GraphModel {
		let mut g = GraphModel::new(10.0);
		for label in ["A", "B", "C"] {
			g.add_node(label);
		}
		g
	}

	#[test]
	fn adjacency_is_symmetric() {
		let mut g = abc();
		let e0 = g.add_edge(NodeId(0), NodeId(1), "x").unwrap();
		let e1 = g.add_edge(NodeId(0), NodeId(2), "y").unwrap();

		assert_eq!(g.node(NodeId(0)).unwrap().out_edges(), &[e0, e1]);
		assert_eq!(g.node(NodeId(1)).unwrap().in_edges(), &[e0]);
		assert_eq!(g.node(NodeId(2)).unwrap().in_edges(), &[e1]);
		let targets: Vec<_> = g.edges_of(NodeId(0), Direction::Outgoing).map(|e| e.to).collect();
		assert_eq!(targets, vec![NodeId(1), NodeId(2)]);
		assert_eq!(g.edges_of(NodeId(0), Direction::Incoming).count(), 0);
	}

	#[test]
	fn out_of_range_edge_is_rejected() {
		let mut g = abc();
		let err = g.add_edge_by_index(0, 3, "bad").unwrap_err();
		assert_eq!(
			err,
			GraphError::InvalidReference {
				edge: 0,
				index: 3,
				node_count: 3
			}
		);
		assert!(g.edges().is_empty());
		assert!(g.node(NodeId(0)).unwrap().out_edges().is_empty());
	}

	#[test]
	fn negative_edge_index_is_rejected() {
		let mut g = abc();
		assert!(matches!(
			g.add_edge_by_index(-1, 0, "bad"),
			Err(GraphError::InvalidReference { index: -1, .. })
		));
	}

	#[test]
	fn levels_default_to_zero() {
		let g = abc();
		assert!(g.nodes().iter().all(|n| g.level(n.id) == 0));
	}

	#[test]
	fn hit_test_follows_paint_order() {
		let mut g = abc();
		g.set_position(NodeId(0), Point::new(50.0, 50.0));
		g.set_position(NodeId(1), Point::new(55.0, 50.0));
		g.set_position(NodeId(2), Point::new(500.0, 500.0));
		let order = [NodeId(0), NodeId(1), NodeId(2)];
		assert_eq!(g.node_at(Point::new(52.0, 50.0), &order), Some(NodeId(1)));
		assert_eq!(g.node_at(Point::new(42.0, 50.0), &order), Some(NodeId(0)));
		assert_eq!(g.node_at(Point::new(200.0, 200.0), &order), None);

		let raised = [NodeId(1), NodeId(2), NodeId(0)];
		assert_eq!(g.node_at(Point::new(52.0, 50.0), &raised), Some(NodeId(0)));
	}
}
