use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::config::CanvasConfig;
use super::geometry::{Point, Rect, Size};
use super::node::{Node, NodeLayout};
use super::render;
use super::state::CanvasState;
use super::types::{Mode, NodeId};

/// Shared handle to one canvas controller.
///
/// The controller lives in local (non-`Send`) storage; `revision` is bumped
/// whenever node views need rebuilding, and doubles as the overlay's repaint
/// trigger.
#[derive(Clone, Copy)]
pub struct CanvasHandle {
	state: StoredValue<CanvasState, LocalStorage>,
	revision: RwSignal<u64>,
}

impl CanvasHandle {
	pub fn new(config: CanvasConfig) -> Self {
		let mut state = CanvasState::new(config, Size::default());
		state.subscribe(|event| debug!("Canvas event: {event:?}"));
		Self {
			state: StoredValue::new_local(state),
			revision: RwSignal::new(0),
		}
	}

	pub fn with<R>(&self, f: impl FnOnce(&CanvasState) -> R) -> R {
		self.state.with_value(f)
	}

	/// Mutates the controller without rebuilding node views.
	pub fn update_quiet<R>(&self, f: impl FnOnce(&mut CanvasState) -> R) -> Option<R> {
		self.state.try_update_value(f)
	}

	pub fn update<R>(&self, f: impl FnOnce(&mut CanvasState) -> R) -> Option<R> {
		let result = self.update_quiet(f);
		self.bump();
		result
	}

	pub fn bump(&self) {
		self.revision.update(|r| *r += 1);
	}

	pub fn track(&self) {
		self.revision.track();
	}

	pub fn create_node(&self) -> Option<NodeId> {
		self.update(CanvasState::create_next_node)
	}

	pub fn set_mode_value(&self, value: &str) {
		self.update(|s| s.set_global_mode_value(value));
	}
}

/// Render data for one node, detached from the controller.
#[derive(Clone, Debug)]
struct NodeView {
	id: NodeId,
	label: String,
	title: String,
	draft: String,
	mode: Mode,
	frame: Rect,
	layout: NodeLayout,
	z: usize,
}

impl NodeView {
	fn new(z: usize, node: &Node) -> Self {
		Self {
			id: node.id(),
			label: node.label().to_string(),
			title: node.title().to_string(),
			draft: node.draft().to_string(),
			mode: node.mode(),
			frame: node.frame(),
			layout: *node.layout(),
			z,
		}
	}
}

fn rect_style(rect: Rect) -> String {
	format!(
		"position: absolute; left: {}px; top: {}px; width: {}px; height: {}px;",
		rect.origin.x, rect.origin.y, rect.size.width, rect.size.height
	)
}

#[component]
fn NodeWidget(node: NodeView, handle: CanvasHandle) -> impl IntoView {
	let id = node.id;
	let style = format!(
		"{} z-index: {}; box-sizing: border-box; padding: 10px; display: flex; flex-direction: column; gap: 8px; justify-content: center;",
		rect_style(node.frame),
		node.z + 1
	);

	let on_input = move |ev: leptos::ev::Event| {
		let text = event_target_value(&ev);
		handle.update_quiet(|s| s.node_mut(id).map(|n| n.edit_draft(text)));
	};
	let on_change = move |_: leptos::ev::Event| {
		handle.update(|s| s.node_mut(id).map(Node::commit_draft));
	};
	let on_label_click = move |_: MouseEvent| {
		handle.with(|s| {
			if let Some(n) = s.node(id) {
				n.announce();
			}
		});
	};
	let stop = |ev: MouseEvent| ev.stop_propagation();

	let title = match node.mode {
		Mode::Editable => view! {
			<input
				type="text"
				class="info-node-title-edit"
				prop:value=node.draft
				on:mousedown=stop
				on:input=on_input
				on:change=on_change
			/>
		}
		.into_any(),
		Mode::Display => view! { <span class="info-node-title">{node.title}</span> }.into_any(),
	};

	view! {
		<div class="info-node" data-node-id=id.to_string() style=style>
			<button class="info-node-close" style=rect_style(node.layout.close)>
				"×"
			</button>
			<span class="info-node-connector left" style=rect_style(node.layout.left) />
			<span class="info-node-connector right" style=rect_style(node.layout.right) />
			{title}
			<button class="info-node-label" on:mousedown=stop on:click=on_label_click>
				{node.label}
			</button>
		</div>
	}
}

#[component]
pub fn NodeCanvas(handle: CanvasHandle) -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let overlay_ref = NodeRef::<leptos::html::Canvas>::new();
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	Effect::new(move |_| {
		let Some(container) = container_ref.get() else {
			return;
		};
		let window: Window = web_sys::window().unwrap();
		let sync = move |el: &web_sys::Element| {
			let size = Size::new(el.client_width() as f64, el.client_height() as f64);
			handle.update(|s| s.resize(size));
		};
		let el: &web_sys::Element = &container;
		sync(el);

		let container_resize = container.clone();
		*resize_cb.borrow_mut() = Some(Closure::new(move || {
			let el: &web_sys::Element = &container_resize;
			sync(el);
		}));
		if let Some(ref cb) = *resize_cb.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
	});

	// Repaints only when the controller reports a dirty overlay.
	Effect::new(move |_| {
		handle.track();
		let Some(canvas) = overlay_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(frame) = handle.update_quiet(CanvasState::take_overlay_frame).flatten() else {
			return;
		};
		let (w, h) = (frame.size.width as u32, frame.size.height as u32);
		if canvas.width() != w || canvas.height() != h {
			canvas.set_width(w);
			canvas.set_height(h);
		}
		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();
		handle.with(|s| render::render(&frame, s.config(), &ctx));
	});

	let canvas_point = move |ev: &MouseEvent| {
		let container = container_ref.get_untracked()?;
		let rect = container.get_bounding_client_rect();
		Some(Point::new(
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		))
	};

	let on_mousedown = move |ev: MouseEvent| {
		if ev.button() != 0 {
			return;
		}
		let Some(p) = canvas_point(&ev) else {
			return;
		};
		if handle.update_quiet(|s| s.pointer_down(p)).flatten().is_some() {
			handle.bump();
		}
	};

	let on_mousemove = move |ev: MouseEvent| {
		let Some(p) = canvas_point(&ev) else {
			return;
		};
		if handle.update_quiet(|s| s.pointer_move(p)).unwrap_or(false) {
			handle.bump();
		}
	};

	let on_mouseup = move |_: MouseEvent| {
		handle.update_quiet(CanvasState::pointer_up);
	};

	let on_mouseleave = move |_: MouseEvent| {
		handle.update_quiet(CanvasState::pointer_up);
	};

	let pointer_events = if handle.with(|s| s.overlay().intercepts_pointer()) {
		"auto"
	} else {
		"none"
	};

	view! {
		<div
			node_ref=container_ref
			class="node-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			style="position: relative; width: 100%; height: 100%; overflow: hidden; user-select: none;"
		>
			<canvas
				node_ref=overlay_ref
				class="connection-overlay"
				style=format!(
					"position: absolute; left: 0; top: 0; z-index: 0; pointer-events: {pointer_events};",
				)
			/>
			{move || {
				handle.track();
				handle
					.with(|s| {
						s.nodes()
							.iter()
							.enumerate()
							.map(|(z, n)| NodeView::new(z, n))
							.collect::<Vec<_>>()
					})
					.into_iter()
					.map(|node| view! { <NodeWidget node handle /> })
					.collect_view()
			}}
		</div>
	}
}
