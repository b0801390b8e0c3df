use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Point;
use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent,
	WheelEvent, Window,
};

use super::render;
use super::state::MindMapState;

const FALLBACK_SIZE: (f64, f64) = (800.0, 600.0);

const OVERLAY_STYLE: &str = "position: fixed; top: 50%; left: 50%; transform: translate(-50%, -50%); \
	background: #1a1a1a; padding: 20px; border-radius: 12px; border: 2px solid #8b5cf6; \
	box-shadow: 0 8px 32px rgba(139, 92, 246, 0.3);";
const INPUT_STYLE: &str = "background: #0a0a0a; border: 1px solid #333; border-radius: 8px; \
	padding: 12px; color: #e0e0e0; font-size: 16px; width: 300px; outline: none;";
const HINT_STYLE: &str = "margin-top: 10px; font-size: 12px; color: #888;";

struct Surface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

/// Shared handle the DOM callbacks use to reach the editor state.
#[derive(Clone, Default)]
struct CanvasHandle {
	state: Rc<RefCell<Option<MindMapState>>>,
	surface: Rc<RefCell<Option<Surface>>>,
}

impl CanvasHandle {
	/// Runs `f` against the state if the surface is up. When `f` reports a
	/// change the scene is redrawn; the cursor is refreshed either way.
	fn apply(&self, f: impl FnOnce(&mut MindMapState, &HtmlCanvasElement) -> bool) -> bool {
		let surface = self.surface.borrow();
		let Some(surface) = surface.as_ref() else {
			return false;
		};
		let mut state = self.state.borrow_mut();
		let Some(state) = state.as_mut() else {
			return false;
		};
		let dirty = f(state, &surface.canvas);
		if dirty {
			render::render(state, &surface.ctx);
		}
		let _ = HtmlElement::style(&surface.canvas).set_property("cursor", state.cursor());
		dirty
	}
}

fn pointer(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> Point {
	let rect = canvas.get_bounding_client_rect();
	Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

type ResizeSlot = StoredValue<Option<Closure<dyn FnMut()>>, LocalStorage>;

/// Takes whatever the slot holds; a disposed slot yields nothing.
fn take_stored<T: 'static>(slot: StoredValue<Option<T>, LocalStorage>) -> Option<T> {
	slot.try_update_value(Option::take).flatten()
}

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

#[component]
pub fn MindMapCanvas(
	#[prop(default = true)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let input_ref = NodeRef::<leptos::html::Input>::new();
	let handle = CanvasHandle::default();
	let resize_cb: ResizeSlot = StoredValue::new_local(None);
	// Initial text of the edit overlay while it is open.
	let editing = RwSignal::new(None::<String>);

	let handle_init = handle.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or(FALLBACK_SIZE)
		} else {
			let parent = canvas.parent_element();
			(
				width.unwrap_or_else(|| {
					parent
						.as_ref()
						.map(|p| p.client_width() as f64)
						.unwrap_or(FALLBACK_SIZE.0)
				}),
				height.unwrap_or_else(|| {
					parent
						.as_ref()
						.map(|p| p.client_height() as f64)
						.unwrap_or(FALLBACK_SIZE.1)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx = match render::context_2d(&canvas) {
			Ok(ctx) => ctx,
			Err(err) => {
				warn!("mind map canvas unavailable: {err}");
				return;
			}
		};
		let state = MindMapState::new(w, h);
		render::render(&state, &ctx);
		*handle_init.state.borrow_mut() = Some(state);
		*handle_init.surface.borrow_mut() = Some(Surface {
			canvas: canvas.clone(),
			ctx,
		});
		info!("mind map canvas ready at {w}x{h}");

		if fullscreen {
			let handle_resize = handle_init.clone();
			let cb: Closure<dyn FnMut()> = Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				handle_resize.apply(|s, canvas| {
					canvas.set_width(nw as u32);
					canvas.set_height(nh as u32);
					s.resize(nw, nh);
					true
				});
			});
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			resize_cb.set_value(Some(cb));
		}
	});

	on_cleanup(move || {
		if let (Some(cb), Some(window)) = (take_stored(resize_cb), web_sys::window()) {
			let _ =
				window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
	});

	let handle_md = handle.clone();
	let on_mousedown = move |ev: MouseEvent| {
		handle_md.apply(|s, canvas| {
			s.pointer_down(pointer(canvas, &ev), ev.shift_key());
			false
		});
	};

	let handle_mm = handle.clone();
	let on_mousemove = move |ev: MouseEvent| {
		handle_mm.apply(|s, canvas| s.pointer_move(pointer(canvas, &ev)));
	};

	let handle_mu = handle.clone();
	let on_mouseup = move |ev: MouseEvent| {
		handle_mu.apply(|s, canvas| s.pointer_up(pointer(canvas, &ev)));
	};

	let handle_ml = handle.clone();
	let on_mouseleave = move |_: MouseEvent| {
		handle_ml.apply(|s, _| {
			s.pointer_leave();
			false
		});
	};

	let handle_dc = handle.clone();
	let on_dblclick = move |ev: MouseEvent| {
		let mut opened = None;
		handle_dc.apply(|s, canvas| {
			let changed = s.double_click(pointer(canvas, &ev), js_sys::Math::random());
			opened = s.edit_buffer().map(str::to_owned);
			changed
		});
		if opened.is_some() {
			editing.set(opened);
		}
	};

	let handle_wh = handle.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		handle_wh.apply(|s, _| {
			s.wheel(ev.delta_y());
			true
		});
	};

	Effect::new(move |_| {
		if let Some(input) = input_ref.get() {
			let _ = input.focus();
		}
	});

	// Reactive closures must be Send, so the overlay reaches the handle
	// through a local arena slot.
	let stored_handle = StoredValue::new_local(handle);
	let overlay = move || {
		let initial = editing.get()?;
		let on_input = move |ev: leptos::ev::Event| {
			let text = event_target_value(&ev);
			stored_handle.with_value(|h| {
				h.apply(|s, _| {
					s.set_edit_buffer(text);
					false
				})
			});
		};
		let on_keydown = move |ev: KeyboardEvent| {
			let key = ev.key();
			if stored_handle.with_value(|h| h.apply(|s, _| s.edit_key(&key))) {
				editing.set(None);
			}
		};
		Some(view! {
			<div class="edit-overlay" style=OVERLAY_STYLE>
				<input
					node_ref=input_ref
					type="text"
					prop:value=initial
					on:input=on_input
					on:keydown=on_keydown
					style=INPUT_STYLE
				/>
				<div style=HINT_STYLE>"Press Enter to save, Esc to cancel"</div>
			</div>
		})
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="mind-map-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:dblclick=on_dblclick
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
		{overlay}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn assert_send<T: Send>(_: &T) {}

	#[test]
	fn stored_handle_can_live_in_reactive_views() {
		let stored = StoredValue::new_local(CanvasHandle::default());
		assert_send(&stored);
		let mut called = false;
		let dirty = stored.with_value(|h| {
			h.apply(|_, _| {
				called = true;
				true
			})
		});
		assert!(!dirty);
		assert!(!called, "no surface yet, so the state must not be touched");
	}

	#[test]
	fn stored_slot_is_taken_once_and_survives_disposal() {
		let slot = StoredValue::new_local(Some(7_u8));
		assert_eq!(take_stored(slot), Some(7));
		assert_eq!(take_stored(slot), None);

		let disposed = StoredValue::new_local(Some(9_u8));
		disposed.dispose();
		assert_eq!(take_stored(disposed), None);
	}
}
