//! Hierarchy levels via Kahn's algorithm.
//!
//! Sources get level 0. With [`LevelPolicy::LongestPath`] every parent that
//! is processed raises its child's level to `parent + 1` if that is larger,
//! so a node ends up one below its deepest parent. [`LevelPolicy::LastArrival`]
//! takes the level from whichever parent released the node, as a single-pass
//! Kahn's algorithm does. With a FIFO queue both give the same result, since
//! dequeued levels never decrease.

use std::collections::VecDeque;

use super::error::{GraphError, Result};
use super::model::GraphModel;
use super::types::{Direction, NodeId};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LevelPolicy {
	#[default]
	LongestPath,
	LastArrival,
}

/// Level per node, indexed by insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Hierarchy {
	levels: Vec<usize>,
}

impl Hierarchy {
	/// Level of `id`; 0 for a node the hierarchy does not know.
	pub fn level(&self, id: NodeId) -> usize {
		self.levels.get(id.0).copied().unwrap_or(0)
	}

	pub fn levels(&self) -> &[usize] {
		&self.levels
	}

	/// Number of distinct levels. Levels are contiguous from 0, so this is
	/// one more than the deepest level.
	pub fn level_count(&self) -> usize {
		self.levels.iter().max().map_or(0, |deepest| deepest + 1)
	}

	/// Nodes on `level`, in graph insertion order.
	pub fn nodes_on_level(&self, level: usize) -> Vec<NodeId> {
		self.levels
			.iter()
			.enumerate()
			.filter(|&(_, &l)| l == level)
			.map(|(i, _)| NodeId(i))
			.collect()
	}

	pub fn into_levels(self) -> Vec<usize> {
		self.levels
	}
}

pub struct LayeringEngine {
	policy: LevelPolicy,
}

impl LayeringEngine {
	pub fn new(policy: LevelPolicy) -> Self {
		Self { policy }
	}

	/// Assigns a level to every node, or reports the nodes that were never
	/// dequeued when the graph has a cycle.
	pub fn compute(&self, graph: &GraphModel) -> Result<Hierarchy> {
		let n = graph.len();
		let mut remaining: Vec<usize> = graph.nodes().iter().map(|node| node.in_edges().len()).collect();
		let mut levels = vec![0usize; n];
		let mut dequeued = vec![false; n];
		let mut queue: VecDeque<NodeId> = graph
			.nodes()
			.iter()
			.filter(|node| node.in_edges().is_empty())
			.map(|node| node.id)
			.collect();

		while let Some(current) = queue.pop_front() {
			dequeued[current.0] = true;
			let level = levels[current.0];
			for edge in graph.edges_of(current, Direction::Outgoing) {
				let child = edge.to.0;
				remaining[child] -= 1;
				if self.policy == LevelPolicy::LongestPath {
					levels[child] = levels[child].max(level + 1);
				}
				if remaining[child] == 0 {
					if self.policy == LevelPolicy::LastArrival {
						levels[child] = level + 1;
					}
					queue.push_back(edge.to);
				}
			}
		}

		let unresolved: Vec<NodeId> = (0..n).filter(|&i| !dequeued[i]).map(NodeId).collect();
		if !unresolved.is_empty() {
			return Err(GraphError::CyclicGraph { unresolved });
		}
		Ok(Hierarchy { levels })
	}
}

impl Default for LayeringEngine {
	fn default() -> Self {
		Self::new(LevelPolicy::default())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn graph(n: usize, edges: &[(usize, usize)]) -> GraphModel {
		let mut g = GraphModel::new(10.0);
		for i in 0..n {
			g.add_node(format!("n{i}"));
		}
		for &(from, to) in edges {
			g.add_edge(NodeId(from), NodeId(to), "").unwrap();
		}
		g
	}

	#[test]
	fn chain_levels() {
		let g = graph(3, &[(0, 1), (1, 2)]);
		let h = LayeringEngine::default().compute(&g).unwrap();
		assert_eq!(h.levels(), &[0, 1, 2]);
		assert_eq!(h.level_count(), 3);
	}

	#[test]
	fn siblings_share_a_level() {
		let g = graph(3, &[(0, 1), (0, 2)]);
		let h = LayeringEngine::default().compute(&g).unwrap();
		assert_eq!(h.levels(), &[0, 1, 1]);
		assert_eq!(h.nodes_on_level(1), vec![NodeId(1), NodeId(2)]);
	}

	#[test]
	fn multi_parent_node_sits_below_deepest_parent() {
		// 0 -> 1 -> 2 -> 4, and 0 -> 3 -> 4, plus a late shortcut 0 -> 4.
		let g = graph(5, &[(0, 4), (0, 1), (1, 2), (2, 4), (0, 3), (3, 4)]);
		for policy in [LevelPolicy::LongestPath, LevelPolicy::LastArrival] {
			let h = LayeringEngine::new(policy).compute(&g).unwrap();
			assert_eq!(h.level(NodeId(4)), 3, "{policy:?}");
			for edge in g.edges() {
				assert!(h.level(edge.from) < h.level(edge.to), "{policy:?}");
			}
		}
	}

	#[test]
	fn every_edge_points_down_the_hierarchy() {
		let edges = [(0, 3), (1, 3), (3, 4), (2, 4), (4, 5), (1, 5), (0, 6), (6, 5)];
		let g = graph(7, &edges);
		let h = LayeringEngine::default().compute(&g).unwrap();
		for (from, to) in edges {
			assert!(h.level(NodeId(from)) < h.level(NodeId(to)));
		}
	}

	#[test]
	fn isolated_nodes_are_sources() {
		let g = graph(2, &[]);
		let h = LayeringEngine::default().compute(&g).unwrap();
		assert_eq!(h.levels(), &[0, 0]);
		assert_eq!(h.level_count(), 1);
	}

	#[test]
	fn cycle_reports_unresolved_nodes() {
		// 0 -> 1 <-> 2 -> 3
		let g = graph(4, &[(0, 1), (1, 2), (2, 1), (2, 3)]);
		let err = LayeringEngine::default().compute(&g).unwrap_err();
		assert_eq!(
			err,
			GraphError::CyclicGraph {
				unresolved: vec![NodeId(1), NodeId(2), NodeId(3)]
			}
		);
	}

	#[test]
	fn self_loop_is_a_cycle() {
		let g = graph(2, &[(0, 1), (1, 1)]);
		assert!(matches!(
			LayeringEngine::default().compute(&g),
			Err(GraphError::CyclicGraph { unresolved }) if unresolved == vec![NodeId(1)]
		));
	}

	#[test]
	fn unknown_node_reads_as_level_zero() {
		let g = graph(2, &[(0, 1)]);
		let h = LayeringEngine::default().compute(&g).unwrap();
		assert_eq!(h.level(NodeId(1)), 1);
		assert_eq!(h.level(NodeId(9)), 0);
	}

	#[test]
	fn empty_graph_has_no_levels() {
		let h = LayeringEngine::default().compute(&GraphModel::new(1.0)).unwrap();
		assert_eq!(h.level_count(), 0);
	}
}
