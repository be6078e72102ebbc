use log::debug;
use rand::Rng;

use super::config::EditorConfig;
use super::error::Result;
use super::scene::Scene;
use super::session::{GraphEditorSession, InputEvent, KeyChord};
use super::types::{GraphDocument, NodeId, Point, Viewport};

/// Pointer gesture in canvas coordinates.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	/// Node under the pointer when the button went down.
	pub pressed: Option<NodeId>,
	pub dragging: bool,
	pub last_x: f64,
	pub last_y: f64,
}

/// Everything the canvas component needs between frames.
pub struct EditorState {
	pub session: GraphEditorSession,
	pub scene: Scene,
	pub drag: DragState,
	pub width: f64,
	pub height: f64,
}

impl EditorState {
	pub fn new<R: Rng + ?Sized>(
		doc: &GraphDocument,
		config: &EditorConfig,
		width: f64,
		height: f64,
		rng: &mut R,
	) -> Result<Self> {
		let mut scene = Scene::new(config.highlight_color.as_str());
		let session = GraphEditorSession::start(doc, Viewport::new(width, height), config, rng, &mut scene)?;
		Ok(Self {
			session,
			scene,
			drag: DragState::default(),
			width,
			height,
		})
	}

	pub fn pointer_down(&mut self, x: f64, y: f64) {
		self.drag = DragState {
			pressed: self.session.node_at(Point::new(x, y)),
			dragging: false,
			last_x: x,
			last_y: y,
		};
	}

	/// Turns pointer motion with a pressed node into drag events; the first
	/// movement starts the gesture.
	pub fn pointer_move(&mut self, x: f64, y: f64) {
		let Some(node) = self.drag.pressed else {
			return;
		};
		if !self.drag.dragging {
			self.drag.dragging = true;
			self.session.handle(InputEvent::DragStart(node), &mut self.scene);
		}
		let delta = Point::new(x - self.drag.last_x, y - self.drag.last_y);
		(self.drag.last_x, self.drag.last_y) = (x, y);
		self.session.handle(InputEvent::DragMove(delta), &mut self.scene);
	}

	/// Ends any drag, then clicks whatever is under the pointer if it is the
	/// node the press started on (a release after a drag still clicks).
	pub fn pointer_up(&mut self, x: f64, y: f64) {
		let pressed = self.drag.pressed;
		let target = self.session.node_at(Point::new(x, y));
		let clicks = target == pressed;
		self.end_drag(if clicks { target } else { None });
		if clicks {
			self.session.handle(InputEvent::Click(target), &mut self.scene);
		} else {
			debug!("release on {target:?} after press on {pressed:?}, no click");
		}
	}

	pub fn pointer_leave(&mut self) {
		self.end_drag(None);
	}

	fn end_drag(&mut self, released_on: Option<NodeId>) {
		if self.drag.dragging {
			self.session
				.handle(InputEvent::DragEnd { released_on }, &mut self.scene);
		}
		self.drag = DragState::default();
	}

	pub fn key_down(&mut self, key: &str, shift: bool) {
		self.session
			.handle(InputEvent::Key(KeyChord::new(key, shift)), &mut self.scene);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.session.set_viewport(Viewport::new(width, height));
	}
}
