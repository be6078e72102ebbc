//! Initial node placement.
//!
//! Every strategy is a pure function of the graph structure and the viewport;
//! current node positions are never read.

use rand::Rng;

use super::error::Result;
use super::layering::{Hierarchy, LayeringEngine};
use super::model::GraphModel;
use super::types::{Point, Viewport};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutStrategy {
	#[default]
	Random,
	Polygon,
	Layered,
}

impl LayoutStrategy {
	/// Maps the document's `visualFormat`; anything unrecognised is random.
	pub fn from_format(format: Option<&str>) -> Self {
		match format {
			Some("polygon") => LayoutStrategy::Polygon,
			Some("topologically sorted") => LayoutStrategy::Layered,
			_ => LayoutStrategy::Random,
		}
	}
}

/// Positions indexed by node insertion order, plus the hierarchy when the
/// layered strategy produced one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Placement {
	pub positions: Vec<Point>,
	pub hierarchy: Option<Hierarchy>,
}

pub fn place<R: Rng + ?Sized>(
	strategy: LayoutStrategy,
	graph: &GraphModel,
	viewport: Viewport,
	engine: &LayeringEngine,
	rng: &mut R,
) -> Result<Placement> {
	Ok(match strategy {
		LayoutStrategy::Random => Placement {
			positions: random(graph, viewport, rng),
			hierarchy: None,
		},
		LayoutStrategy::Polygon => Placement {
			positions: polygon(graph.len(), viewport),
			hierarchy: None,
		},
		LayoutStrategy::Layered => {
			let hierarchy = engine.compute(graph)?;
			Placement {
				positions: layered(&hierarchy, viewport),
				hierarchy: Some(hierarchy),
			}
		}
	})
}

/// Uniform positions keeping each node's footprint inside the viewport.
///
/// An axis narrower than the node's diameter pins the node to that axis'
/// centre.
pub fn random<R: Rng + ?Sized>(graph: &GraphModel, viewport: Viewport, rng: &mut R) -> Vec<Point> {
	let mut sample = |radius: f64, extent: f64| {
		let (lo, hi) = (radius, extent - radius);
		if hi > lo { rng.gen_range(lo..hi) } else { extent / 2.0 }
	};
	graph
		.nodes()
		.iter()
		.map(|node| {
			let x = sample(node.radius, viewport.width);
			let y = sample(node.radius, viewport.height);
			Point::new(x, y)
		})
		.collect()
}

/// Circumradius of the polygon layout for a viewport.
pub fn polygon_radius(viewport: Viewport) -> f64 {
	(0.4 * viewport.width.min(viewport.height)).floor()
}

/// Vertices of a regular `count`-gon centred in the viewport, one per node in
/// insertion order, walking clockwise.
///
/// When `count` is a multiple of three a vertex points straight up;
/// otherwise the bottom edge is horizontal.
pub fn polygon(count: usize, viewport: Viewport) -> Vec<Point> {
	if count == 0 {
		return Vec::new();
	}
	let center = viewport.center();
	let radius = polygon_radius(viewport);
	let step = 360.0 / count as f64;
	let (start, offset) = if count % 3 == 0 {
		(Point::new(0.0, -radius), -1.0)
	} else {
		(Point::new(0.0, radius), 0.5)
	};
	(0..count)
		.map(|i| (center + start).rotate_about(center, (i as f64 + offset) * step))
		.collect()
}

/// Tiers from the bottom (level 0) to the top, nodes spread evenly across
/// each tier in insertion order.
pub fn layered(hierarchy: &Hierarchy, viewport: Viewport) -> Vec<Point> {
	let level_count = hierarchy.level_count();
	let vertical_split = viewport.height / (level_count as f64 + 1.0);
	let mut positions = vec![Point::default(); hierarchy.levels().len()];

	for level in 0..level_count {
		let on_level = hierarchy.nodes_on_level(level);
		let horizontal_split = viewport.width / (on_level.len() as f64 + 1.0);
		let y = (level_count - level) as f64 * vertical_split;
		for (index, id) in on_level.into_iter().enumerate() {
			positions[id.0] = Point::new((index + 1) as f64 * horizontal_split, y);
		}
	}
	positions
}
