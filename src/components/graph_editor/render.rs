use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::geometry::EdgeGeometry;
use super::scene::{EdgeSprite, NodeSprite, Scene};
use super::state::EditorState;

const STROKE_WIDTH: f64 = 5.0;

pub fn render(state: &EditorState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("white");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.set_line_cap("round");
	for sprite in state.scene.nodes() {
		draw_node(&state.scene, sprite, ctx);
	}
	// Edges are drawn over nodes.
	for sprite in state.scene.edges() {
		if let Some(geometry) = &sprite.geometry {
			draw_edge(sprite, geometry, ctx);
		}
	}
}

fn draw_node(scene: &Scene, sprite: &NodeSprite, ctx: &CanvasRenderingContext2d) {
	let (x, y) = (sprite.center.x, sprite.center.y);
	ctx.begin_path();
	let _ = ctx.arc(x, y, sprite.radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str("white");
	ctx.fill();
	ctx.set_stroke_style_str(scene.stroke_color(sprite));
	ctx.set_line_width(STROKE_WIDTH);
	ctx.stroke();

	ctx.set_fill_style_str(&sprite.color);
	ctx.set_font(&format!("{}px sans-serif", sprite.radius));
	ctx.set_text_align("center");
	let _ = ctx.fill_text(&sprite.label, x, y + sprite.radius / 3.0);
}

fn draw_edge(sprite: &EdgeSprite, geo: &EdgeGeometry, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str(&sprite.color);
	ctx.set_line_width(STROKE_WIDTH);
	ctx.begin_path();
	ctx.move_to(geo.start.x, geo.start.y);
	ctx.line_to(geo.end.x, geo.end.y);
	for barb in [geo.arrow_left, geo.arrow_right] {
		ctx.move_to(barb.x, barb.y);
		ctx.line_to(geo.end.x, geo.end.y);
	}
	ctx.stroke();

	if sprite.label.is_empty() {
		return;
	}
	let (lx, ly) = (geo.label_anchor.x, geo.label_anchor.y);
	ctx.set_font(&format!("{}px sans-serif", geo.label_font_size));
	ctx.set_text_align("center");
	ctx.set_line_width(1.0);
	ctx.set_fill_style_str("white");
	let _ = ctx.fill_text(&sprite.label, lx, ly);
	let _ = ctx.stroke_text(&sprite.label, lx, ly);
}
