mod component;
pub mod config;
pub mod error;
pub mod geometry;
pub mod layering;
pub mod layout;
pub mod loader;
pub mod model;
mod render;
pub mod scene;
pub mod selection;
pub mod session;
mod state;
pub mod types;

pub use component::GraphEditorCanvas;
pub use config::EditorConfig;
pub use error::{GraphError, Result};
pub use layering::{Hierarchy, LayeringEngine, LevelPolicy};
pub use layout::LayoutStrategy;
pub use model::{Edge, GraphModel, Node};
pub use selection::{SelectionController, SelectionState};
pub use session::{GraphEditorSession, InputEvent, KeyChord, Renderer};
pub use types::{Direction, EdgeId, GraphDocument, NodeId, Point, Viewport};
