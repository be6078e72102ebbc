use std::fmt;
use std::ops::{Add, AddAssign, Sub};

use serde::Deserialize;

/// Index of a node in insertion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Index of an edge in insertion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// A position (or a delta) on the canvas. The y axis points down.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance(self, other: Point) -> f64 {
		(other - self).length()
	}

	pub fn length(self) -> f64 {
		(self.x * self.x + self.y * self.y).sqrt()
	}

	/// Rotates around `center` by `degrees`, clockwise on screen.
	pub fn rotate_about(self, center: Point, degrees: f64) -> Point {
		let (sin, cos) = degrees.to_radians().sin_cos();
		let d = self - center;
		Point::new(
			center.x + d.x * cos - d.y * sin,
			center.y + d.x * sin + d.y * cos,
		)
	}
}

impl Add for Point {
	type Output = Point;

	fn add(self, rhs: Point) -> Point {
		Point::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl AddAssign for Point {
	fn add_assign(&mut self, rhs: Point) {
		self.x += rhs.x;
		self.y += rhs.y;
	}
}

impl Sub for Point {
	type Output = Point;

	fn sub(self, rhs: Point) -> Point {
		Point::new(self.x - rhs.x, self.y - rhs.y)
	}
}

/// Drawing area supplied by the host window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	pub width: f64,
	pub height: f64,
}

impl Viewport {
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	pub fn center(&self) -> Point {
		Point::new(self.width / 2.0, self.height / 2.0)
	}
}

/// Which adjacency list of a node to read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
	Outgoing,
	Incoming,
}

/// One `[from, to, label]` triple of the input document.
///
/// Indices are kept signed so that a negative index is reported as an
/// invalid reference rather than a parse failure.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct EdgeSpec(pub i64, pub i64, pub String);

/// The graph description fetched once at startup.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GraphDocument {
	pub labels: Vec<String>,
	#[serde(default)]
	pub edges: Vec<EdgeSpec>,
	#[serde(default)]
	pub visual_format: Option<String>,
}
