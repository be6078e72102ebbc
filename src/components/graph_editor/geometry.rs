use super::model::Node;
use super::types::Point;

const ARROW_ANGLE: f64 = 20.0;

/// Drawable shape of one directed edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeGeometry {
	/// On the source node's rim.
	pub start: Point,
	/// On the target node's rim; the arrow tip.
	pub end: Point,
	pub arrow_left: Point,
	pub arrow_right: Point,
	pub label_anchor: Point,
	pub label_font_size: f64,
}

/// Returns `None` while the two node footprints overlap, in which case the
/// edge is not drawn.
pub fn edge_geometry(from: &Node, to: &Node) -> Option<EdgeGeometry> {
	let (a, b) = (from.position, to.position);
	let length = a.distance(b);
	if length <= from.radius + to.radius {
		return None;
	}
	let d = b - a;
	let at = |t: f64| Point::new(a.x + d.x * t / length, a.y + d.y * t / length);

	let start = at(from.radius);
	let end = at(length - to.radius);
	let arrow_base = at(length - 1.5 * to.radius);
	Some(EdgeGeometry {
		start,
		end,
		arrow_left: arrow_base.rotate_about(end, ARROW_ANGLE),
		arrow_right: arrow_base.rotate_about(end, -ARROW_ANGLE),
		label_anchor: Point::new((start.x + end.x) / 2.0, (start.y + end.y) / 2.0),
		label_font_size: (3.0 * length.sqrt()).ceil(),
	})
}

#[cfg(test)]
mod tests {
	use super::super::model::GraphModel;
	use super::super::types::NodeId;
	use super::*;

	fn pair(a: Point, b: Point) -> GraphModel {
		let mut g = GraphModel::new(10.0);
		g.add_node("a");
		g.add_node("b");
		g.set_position(NodeId(0), a);
		g.set_position(NodeId(1), b);
		g
	}

	#[test]
	fn endpoints_sit_on_the_rims() {
		let g = pair(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
		let geo = edge_geometry(&g.nodes()[0], &g.nodes()[1]).unwrap();
		assert_eq!(geo.start, Point::new(10.0, 0.0));
		assert_eq!(geo.end, Point::new(90.0, 0.0));
		assert_eq!(geo.label_anchor, Point::new(50.0, 0.0));
		assert_eq!(geo.label_font_size, 30.0);
	}

	#[test]
	fn arrow_strokes_are_symmetric() {
		let g = pair(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
		let geo = edge_geometry(&g.nodes()[0], &g.nodes()[1]).unwrap();
		assert!((geo.arrow_left.x - geo.arrow_right.x).abs() < 1e-9);
		assert!((geo.arrow_left.y + geo.arrow_right.y).abs() < 1e-9);
		assert!((geo.arrow_left.distance(geo.end) - 5.0).abs() < 1e-9);
		assert!(geo.arrow_left.x < geo.end.x);
	}

	#[test]
	fn overlapping_nodes_hide_the_edge() {
		let g = pair(Point::new(0.0, 0.0), Point::new(15.0, 0.0));
		assert_eq!(edge_geometry(&g.nodes()[0], &g.nodes()[1]), None);
	}
}
