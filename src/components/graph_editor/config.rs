use super::layering::LevelPolicy;

/// Tunables for one editor instance.
#[derive(Clone, Debug, PartialEq)]
pub struct EditorConfig {
	/// URL of the graph document.
	pub source: String,
	pub node_radius: f64,
	pub node_color: String,
	pub highlight_color: String,
	/// Degrees per rotate key press.
	pub rotate_step: f64,
	pub level_policy: LevelPolicy,
}

impl Default for EditorConfig {
	fn default() -> Self {
		Self {
			source: "input.json".into(),
			node_radius: 50.0,
			node_color: "black".into(),
			highlight_color: "green".into(),
			rotate_step: 15.0,
			level_policy: LevelPolicy::LongestPath,
		}
	}
}
