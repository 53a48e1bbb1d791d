//! Canvas drawing for the editor state.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::editor::{EditorState, Mode};
use super::graph::VERTEX_RADIUS;

const FLAGGED_COLOR: &str = "#ff4444";
const NORMAL_COLOR: &str = "#66b3ff";
const EDGE_COLOR: &str = "#666666";
const CONNECT_COLOR: &str = "#ff9800";
const TARGET_COLOR: &str = "#4caf50";
const MOVE_BADGE_COLOR: &str = "#9c27b0";

const ARROW_SIZE: f64 = 15.0;

pub fn render(state: &EditorState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#fafafa");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_edges(state, ctx);
	draw_vertices(state, ctx);
	draw_connect_feedback(state, ctx);
	if state.mode() == Mode::Move {
		draw_move_badge(ctx);
	}
}

fn draw_edges(state: &EditorState, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str(EDGE_COLOR);
	ctx.set_fill_style_str(EDGE_COLOR);
	ctx.set_line_width(2.0);

	for edge in state.graph().edges() {
		let (Some(from), Some(to)) = (state.graph().vertex(edge.from), state.graph().vertex(edge.to))
		else {
			continue;
		};
		let (dx, dy) = (to.x - from.x, to.y - from.y);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let (ux, uy) = (dx / dist, dy / dist);

		// Stop the line at the target's rim so the arrowhead stays visible.
		let (tip_x, tip_y) = (to.x - ux * VERTEX_RADIUS, to.y - uy * VERTEX_RADIUS);
		ctx.begin_path();
		ctx.move_to(from.x + ux * VERTEX_RADIUS, from.y + uy * VERTEX_RADIUS);
		ctx.line_to(tip_x, tip_y);
		ctx.stroke();

		let (back_x, back_y) = (tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);
		let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
}

fn draw_vertices(state: &EditorState, ctx: &CanvasRenderingContext2d) {
	for vertex in state.graph().vertices() {
		ctx.begin_path();
		let _ = ctx.arc(vertex.x, vertex.y, VERTEX_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(if vertex.flagged {
			FLAGGED_COLOR
		} else {
			NORMAL_COLOR
		});
		ctx.fill();
		ctx.set_stroke_style_str("#000000");
		ctx.set_line_width(2.0);
		ctx.stroke();

		ctx.set_fill_style_str("#000000");
		ctx.set_font("bold 14px sans-serif");
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		let _ = ctx.fill_text(&vertex.id.to_string(), vertex.x, vertex.y);
	}
}

// Rubber band from the drag origin to the pointer while a connect
// gesture is in flight; green when over a valid target.
fn draw_connect_feedback(state: &EditorState, ctx: &CanvasRenderingContext2d) {
	let Some((origin, target)) = state.connect_drag() else {
		return;
	};
	let Some(origin) = state.graph().vertex(origin) else {
		return;
	};
	let (px, py) = state.pointer();

	let (color, dash, gap, width) = if target.is_some() {
		(TARGET_COLOR, 8.0, 4.0, 4.0)
	} else {
		(CONNECT_COLOR, 5.0, 5.0, 3.0)
	};
	ctx.set_stroke_style_str(color);
	ctx.set_line_width(width);
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(dash),
		&JsValue::from_f64(gap),
	));

	let angle = (py - origin.y).atan2(px - origin.x);
	ctx.begin_path();
	ctx.move_to(
		origin.x + VERTEX_RADIUS * angle.cos(),
		origin.y + VERTEX_RADIUS * angle.sin(),
	);
	ctx.line_to(px, py);
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());

	ctx.begin_path();
	let _ = ctx.arc(px, py, 8.0, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(color);
	ctx.fill();
	ctx.set_stroke_style_str("#ffffff");
	ctx.set_line_width(2.0);
	ctx.stroke();
}

fn draw_move_badge(ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(MOVE_BADGE_COLOR);
	ctx.set_font("bold 16px sans-serif");
	ctx.set_text_align("left");
	ctx.set_text_baseline("top");
	let _ = ctx.fill_text("MOVE MODE", 10.0, 10.0);
}
