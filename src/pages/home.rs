use leptos::prelude::*;

use crate::components::node_canvas::{CanvasConfig, CanvasHandle, Mode, NodeCanvas};

/// Editor page: mode selector and create button above the node canvas.
#[component]
pub fn Home() -> impl IntoView {
	let canvas = CanvasHandle::new(CanvasConfig::default());

	let on_mode_change = move |ev: leptos::ev::Event| {
		canvas.set_mode_value(&event_target_value(&ev));
	};
	let on_create = move |_: leptos::ev::MouseEvent| {
		canvas.create_node();
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div
				class="editor"
				style="display: flex; flex-direction: column; height: 100vh; box-sizing: border-box; padding: 10px; gap: 10px;"
			>
				<div class="top-bar" style="display: flex; align-items: center; gap: 12px;">
					<label for="mode-select">"Widget mode:"</label>
					<select id="mode-select" on:change=on_mode_change>
						<option value={Mode::Display.as_str()}>"Button mode"</option>
						<option value={Mode::Editable.as_str()}>"Editable text mode"</option>
					</select>
					<span style="flex: 1;" />
					<button on:click=on_create>"Create info widget"</button>
					<span class="hint-label">
						"Tip: drag a widget by its empty area. Click two connectors to link widgets."
					</span>
				</div>
				<div class="canvas-frame" style="flex: 1; min-height: 0;">
					<NodeCanvas handle=canvas />
				</div>
			</div>
		</ErrorBoundary>
	}
}
