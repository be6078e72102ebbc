//! One loaded graph plus its selection and the renderer hookup.

use std::collections::BTreeSet;

use log::{debug, info, warn};
use rand::Rng;

use super::config::EditorConfig;
use super::error::{GraphError, Result};
use super::geometry::{EdgeGeometry, edge_geometry};
use super::layering::LayeringEngine;
use super::layout::{self, LayoutStrategy};
use super::model::{Edge, GraphModel, Node};
use super::selection::{SelectionChange, SelectionController, SelectionState};
use super::types::{GraphDocument, NodeId, Point, Viewport};

/// Visual surface the session draws on. Every call is idempotent.
pub trait Renderer {
	fn draw_node(&mut self, node: &Node, color: &str);
	fn draw_edge(&mut self, edge: &Edge, geometry: Option<EdgeGeometry>, color: &str);
	fn highlight(&mut self, node: NodeId);
	fn unhighlight(&mut self, node: NodeId);
	/// Paints `node` above every other node from now on.
	fn bring_to_front(&mut self, _node: NodeId) {}
}

/// A key press with the modifier state relevant to the editor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyChord {
	pub key: String,
	pub shift: bool,
}

impl KeyChord {
	pub fn new(key: impl Into<String>, shift: bool) -> Self {
		Self {
			key: key.into(),
			shift,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
	/// Pointer released over a node, or over empty canvas.
	Click(Option<NodeId>),
	DragStart(NodeId),
	/// Pointer delta since the previous drag event.
	DragMove(Point),
	/// Pointer released or gone; `released_on` is the node that will get the
	/// release click, if any.
	DragEnd { released_on: Option<NodeId> },
	Key(KeyChord),
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Command {
	SelectAll,
	DeselectAll,
	Rotate(f64),
}

impl Command {
	fn from_chord(chord: &KeyChord, rotate_step: f64) -> Option<Self> {
		if !chord.shift {
			return None;
		}
		match chord.key.as_str() {
			"a" | "A" => Some(Command::SelectAll),
			"d" | "D" => Some(Command::DeselectAll),
			"ArrowRight" => Some(Command::Rotate(rotate_step)),
			"ArrowLeft" => Some(Command::Rotate(-rotate_step)),
			_ => None,
		}
	}
}

pub struct GraphEditorSession {
	graph: GraphModel,
	selection: SelectionController,
	/// Paint order, bottom first; the last entry wins hit tests.
	z_order: Vec<NodeId>,
	viewport: Viewport,
	engine: LayeringEngine,
	strategy: LayoutStrategy,
	layout_error: Option<GraphError>,
	node_color: String,
	rotate_step: f64,
}

impl GraphEditorSession {
	/// Builds the graph from the document. Nothing is placed or drawn yet.
	pub fn from_document(doc: &GraphDocument, viewport: Viewport, config: &EditorConfig) -> Result<Self> {
		let mut graph = GraphModel::new(config.node_radius);
		for label in &doc.labels {
			graph.add_node(label.as_str());
		}
		for spec in &doc.edges {
			graph.add_edge_by_index(spec.0, spec.1, spec.2.as_str())?;
		}
		info!(
			"graph built with {} nodes and {} edges",
			graph.len(),
			graph.edges().len()
		);
		Ok(Self {
			selection: SelectionController::new(graph.len()),
			z_order: graph.nodes().iter().map(|n| n.id).collect(),
			graph,
			viewport,
			engine: LayeringEngine::new(config.level_policy),
			strategy: LayoutStrategy::from_format(doc.visual_format.as_deref()),
			layout_error: None,
			node_color: config.node_color.clone(),
			rotate_step: config.rotate_step,
		})
	}

	/// Builds the session, lays it out with the document's format and draws
	/// it. A cyclic graph asked to be layered falls back to the random layout;
	/// the cycle stays available from [`Self::layout_error`].
	pub fn start<R: Rng + ?Sized>(
		doc: &GraphDocument,
		viewport: Viewport,
		config: &EditorConfig,
		rng: &mut R,
		renderer: &mut impl Renderer,
	) -> Result<Self> {
		let mut session = Self::from_document(doc, viewport, config)?;
		let strategy = session.strategy;
		if let Err(err) = session.apply_layout(strategy, rng, renderer) {
			warn!("{err}; falling back to random layout");
			session.apply_layout(LayoutStrategy::Random, rng, renderer)?;
			session.layout_error = Some(err);
		}
		Ok(session)
	}

	/// Replaces every position with `strategy`'s placement and redraws.
	/// On failure the graph is left untouched.
	pub fn apply_layout<R: Rng + ?Sized>(
		&mut self,
		strategy: LayoutStrategy,
		rng: &mut R,
		renderer: &mut impl Renderer,
	) -> Result<()> {
		let placement = layout::place(strategy, &self.graph, self.viewport, &self.engine, rng)?;
		for (i, position) in placement.positions.into_iter().enumerate() {
			self.graph.set_position(NodeId(i), position);
		}
		if let Some(hierarchy) = placement.hierarchy {
			self.graph.set_levels(hierarchy.into_levels());
		}
		self.strategy = strategy;
		info!("applied {strategy:?} layout to {} nodes", self.graph.len());
		self.redraw(renderer);
		Ok(())
	}

	pub fn graph(&self) -> &GraphModel {
		&self.graph
	}

	pub fn selection(&self) -> &SelectionController {
		&self.selection
	}

	pub fn viewport(&self) -> Viewport {
		self.viewport
	}

	pub fn strategy(&self) -> LayoutStrategy {
		self.strategy
	}

	pub fn layout_error(&self) -> Option<&GraphError> {
		self.layout_error.as_ref()
	}

	/// Positions are kept; only the rotation centre follows the new size.
	pub fn set_viewport(&mut self, viewport: Viewport) {
		self.viewport = viewport;
	}

	/// Topmost node under `point`.
	pub fn node_at(&self, point: Point) -> Option<NodeId> {
		self.graph.node_at(point, &self.z_order)
	}

	pub fn z_order(&self) -> &[NodeId] {
		&self.z_order
	}

	fn bring_to_front(&mut self, nodes: &[NodeId], renderer: &mut impl Renderer) {
		self.z_order.retain(|id| !nodes.contains(id));
		self.z_order.extend_from_slice(nodes);
		for &id in nodes {
			renderer.bring_to_front(id);
		}
	}

	pub fn handle(&mut self, event: InputEvent, renderer: &mut impl Renderer) {
		match event {
			InputEvent::Click(Some(node)) => {
				if let Some(change) = self.selection.click(node) {
					Self::paint_change(change, renderer);
				}
			}
			InputEvent::Click(None) => debug!("click on empty canvas"),
			InputEvent::DragStart(node) => {
				if let Some(change) = self.selection.drag_start(node) {
					Self::paint_change(change, renderer);
				}
				let members = self.selection.drag_members().to_vec();
				self.bring_to_front(&members, renderer);
			}
			InputEvent::DragMove(delta) => {
				let moved = self.selection.drag_move(&mut self.graph, delta).to_vec();
				self.redraw_nodes(&moved, renderer);
			}
			InputEvent::DragEnd { released_on } => self.selection.drag_end(released_on),
			InputEvent::Key(chord) => match Command::from_chord(&chord, self.rotate_step) {
				Some(Command::SelectAll) => {
					for change in self.selection.select_all() {
						Self::paint_change(change, renderer);
					}
				}
				Some(Command::DeselectAll) => {
					for change in self.selection.deselect_all() {
						Self::paint_change(change, renderer);
					}
				}
				Some(Command::Rotate(degrees)) => self.rotate(degrees, renderer),
				None => {}
			},
		}
	}

	/// Rotates every node about the viewport centre. Labels stay upright:
	/// only positions turn, and edges are rebuilt from the new positions.
	pub fn rotate(&mut self, degrees: f64, renderer: &mut impl Renderer) {
		let center = self.viewport.center();
		let rotated: Vec<Point> = self
			.graph
			.nodes()
			.iter()
			.map(|node| node.position.rotate_about(center, degrees))
			.collect();
		for (i, position) in rotated.into_iter().enumerate() {
			self.graph.set_position(NodeId(i), position);
		}
		debug!("rotated graph by {degrees} degrees");
		self.redraw(renderer);
	}

	/// Draws every node, its selection highlight, then every edge.
	pub fn redraw(&self, renderer: &mut impl Renderer) {
		for node in self.graph.nodes() {
			renderer.draw_node(node, &self.node_color);
			Self::paint_change(
				SelectionChange {
					node: node.id,
					state: self.selection.state(node.id),
				},
				renderer,
			);
		}
		for edge in self.graph.edges() {
			self.draw_edge(edge, renderer);
		}
	}

	/// Redraws `nodes` and every edge touching them, each edge once.
	fn redraw_nodes(&self, nodes: &[NodeId], renderer: &mut impl Renderer) {
		let mut edges = BTreeSet::new();
		for &id in nodes {
			if let Some(node) = self.graph.node(id) {
				renderer.draw_node(node, &self.node_color);
			}
			edges.extend(self.graph.incident_edges(id).map(|e| e.id));
		}
		for id in edges {
			if let Some(edge) = self.graph.edge(id) {
				self.draw_edge(edge, renderer);
			}
		}
	}

	fn draw_edge(&self, edge: &Edge, renderer: &mut impl Renderer) {
		let geometry = match (self.graph.node(edge.from), self.graph.node(edge.to)) {
			(Some(from), Some(to)) => edge_geometry(from, to),
			_ => None,
		};
		renderer.draw_edge(edge, geometry, &self.node_color);
	}

	fn paint_change(change: SelectionChange, renderer: &mut impl Renderer) {
		match change.state {
			SelectionState::Selected => renderer.highlight(change.node),
			SelectionState::Unselected => renderer.unhighlight(change.node),
		}
	}
}
