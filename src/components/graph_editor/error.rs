use thiserror::Error;

use super::types::NodeId;

/// Everything that can go wrong between fetching a graph and laying it out.
///
/// `InvalidReference` and `LoadFailure` abort session start. `CyclicGraph` is
/// only raised by the layered layout; the other layouts still work on the
/// same graph.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
	/// Edge `edge` names node `index`, but only `node_count` nodes exist.
	#[error("edge {edge} references node {index}, but the graph has {node_count} nodes")]
	InvalidReference {
		edge: usize,
		index: i64,
		node_count: usize,
	},

	/// Layering stopped with these nodes never dequeued; they lie on or
	/// behind a cycle.
	#[error("graph contains a cycle through {} unresolved node(s): {}", .unresolved.len(), format_ids(.unresolved))]
	CyclicGraph { unresolved: Vec<NodeId> },

	/// The input document could not be fetched or decoded.
	#[error("failed to load graph: {0}")]
	LoadFailure(String),
}

impl From<serde_json::Error> for GraphError {
	fn from(err: serde_json::Error) -> Self {
		GraphError::LoadFailure(err.to_string())
	}
}

fn format_ids(ids: &[NodeId]) -> String {
	ids.iter()
		.map(ToString::to_string)
		.collect::<Vec<_>>()
		.join(", ")
}

pub type Result<T> = std::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn cyclic_message_lists_nodes() {
		let err = GraphError::CyclicGraph {
			unresolved: vec![NodeId(1), NodeId(2)],
		};
		assert_eq!(
			err.to_string(),
			"graph contains a cycle through 2 unresolved node(s): #1, #2"
		);
	}

	#[test]
	fn json_errors_become_load_failures() {
		let err: GraphError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
		assert!(matches!(err, GraphError::LoadFailure(_)));
	}
}
