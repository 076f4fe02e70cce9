use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::config::CanvasConfig;
use super::overlay::OverlayFrame;

const PENDING_RING: f64 = 9.0;

pub fn render(frame: &OverlayFrame, config: &CanvasConfig, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, frame.size.width, frame.size.height);
	draw_connections(frame, config, ctx);
	draw_pending(frame, config, ctx);
}

fn draw_connections(frame: &OverlayFrame, config: &CanvasConfig, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str(&config.line_color);
	ctx.set_line_width(config.line_width);
	ctx.set_line_cap("round");
	ctx.begin_path();
	for segment in &frame.segments {
		ctx.move_to(segment.from.x, segment.from.y);
		ctx.line_to(segment.to.x, segment.to.y);
	}
	ctx.stroke();
}

fn draw_pending(frame: &OverlayFrame, config: &CanvasConfig, ctx: &CanvasRenderingContext2d) {
	let Some(p) = frame.pending else {
		return;
	};
	ctx.set_stroke_style_str(&config.pending_color);
	ctx.set_line_width(1.5);
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(3.0),
		&JsValue::from_f64(3.0),
	));
	ctx.begin_path();
	let _ = ctx.arc(p.x, p.y, PENDING_RING, 0.0, 2.0 * PI);
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}
