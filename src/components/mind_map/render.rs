use std::f64::consts::PI;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::error::SurfaceError;
use super::graph::NODE_RADIUS;
use super::layout::{LABEL_MAX_WIDTH, LINE_HEIGHT, line_positions, wrap_label};
use super::state::MindMapState;
use super::types::Node;

pub const GLOW_RADIUS: f64 = 80.0;
const SHADOW_BLUR: f64 = 20.0;
const EDGE_COLOR: &str = "#333";
const EDGE_WIDTH: f64 = 3.0;
const BORDER_WIDTH: f64 = 2.0;
const LABEL_FONT: &str = "bold 14px sans-serif";

/// Fetches the 2d context of `canvas`.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, SurfaceError> {
	canvas
		.get_context("2d")?
		.ok_or(SurfaceError::MissingContext)?
		.dyn_into::<CanvasRenderingContext2d>()
		.map_err(|_| SurfaceError::NotCanvas2d)
}

/// Redraws the whole scene: edges under nodes, labels on top of each node.
pub fn render(state: &MindMapState, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let [a, b, c, d, e, f] = state.transform.affine().as_coeffs();
	let _ = ctx.transform(a, b, c, d, e, f);
	draw_edges(state, ctx);
	for node in state.graph.nodes() {
		draw_node(node, ctx);
		draw_label(node, ctx);
	}
	ctx.restore();
}

fn draw_edges(state: &MindMapState, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str(EDGE_COLOR);
	ctx.set_line_width(EDGE_WIDTH);
	ctx.set_line_cap("round");
	for (source, target) in state.graph.edges() {
		ctx.begin_path();
		ctx.move_to(source.position.x, source.position.y);
		ctx.line_to(target.position.x, target.position.y);
		ctx.stroke();
	}
}

fn draw_node(node: &Node, ctx: &CanvasRenderingContext2d) {
	let (x, y) = (node.position.x, node.position.y);

	if let Ok(gradient) = ctx.create_radial_gradient(x, y, 0.0, x, y, GLOW_RADIUS) {
		let _ = gradient.add_color_stop(0.0, &format!("{}40", node.color));
		let _ = gradient.add_color_stop(1.0, &format!("{}00", node.color));
		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
		ctx.begin_path();
		let _ = ctx.arc(x, y, GLOW_RADIUS, 0.0, 2.0 * PI);
		ctx.fill();
	}

	ctx.set_fill_style_str(node.color);
	ctx.set_shadow_color(node.color);
	ctx.set_shadow_blur(SHADOW_BLUR);
	ctx.begin_path();
	let _ = ctx.arc(x, y, NODE_RADIUS, 0.0, 2.0 * PI);
	ctx.fill();
	ctx.set_shadow_blur(0.0);

	ctx.set_stroke_style_str(&format!("{}aa", node.color));
	ctx.set_line_width(BORDER_WIDTH);
	ctx.stroke();
}

fn draw_label(node: &Node, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#ffffff");
	ctx.set_font(LABEL_FONT);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	let lines = wrap_label(&node.text, LABEL_MAX_WIDTH, |s| {
		ctx.measure_text(s).map(|m| m.width()).unwrap_or(0.0)
	});
	for (line, y) in lines.iter().zip(line_positions(node.position.y, lines.len(), LINE_HEIGHT)) {
		let _ = ctx.fill_text(line, node.position.x, y);
	}
}
