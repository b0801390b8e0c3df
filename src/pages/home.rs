use leptos::prelude::*;

use crate::components::mind_map::{MindMapCanvas, PALETTE};

/// Gesture cheat sheet shown in the corner of the canvas.
const CONTROLS: [&str; 6] = [
	"🖱️ Double-click: Add node",
	"🖱️ Double-click node: Edit text",
	"🖱️ Drag: Move nodes",
	"🖱️ Drag empty space: Pan",
	"⌨️ Shift + Click + Click: Connect nodes",
	"🖱️ Scroll: Zoom in/out",
];

#[component]
fn ControlsLegend() -> impl IntoView {
	view! {
		<div
			class="controls-legend"
			style="position: fixed; top: 20px; left: 20px; background: rgba(26, 26, 26, 0.9); \
			padding: 16px; border-radius: 12px; border: 1px solid #333; font-size: 14px; \
			color: #888; max-width: 300px;"
		>
			<div style=format!("margin-bottom: 8px; color: {}; font-weight: bold;", PALETTE[0])>
				"Controls"
			</div>
			{CONTROLS.iter().map(|line| view! { <div>{*line}</div> }).collect_view()}
		</div>
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<div
			class="fullscreen-mind-map"
			style="width: 100vw; height: 100vh; position: relative; background: #0a0a0a;"
		>
			<MindMapCanvas fullscreen=true />
			<ControlsLegend />
		</div>
	}
}
