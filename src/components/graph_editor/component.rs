use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::info;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent};

use super::editor::{Button, EditorState, EditorUpdate, Mode, PointerEvent};
use super::render;
use super::types::GraphData;

/// Shell-facing callbacks, invoked synchronously after the event that
/// triggered them.
#[derive(Clone)]
pub struct EditorCallbacks {
	/// The vertex/edge snapshot changed.
	pub on_change: Option<Callback<GraphData>>,
	/// The graph transitioned into the solved state. One-shot.
	pub on_solved: Option<Callback<()>>,
	/// Status line describing the last gesture.
	pub on_status: Option<Callback<String>>,
}

fn dispatch(state: &EditorState, update: EditorUpdate, callbacks: &EditorCallbacks) {
	if update.mutated {
		if let Some(cb) = &callbacks.on_change {
			cb.run(GraphData {
				nodes: state.graph().vertex_ids(),
				edges: state.graph().edge_pairs(),
			});
		}
	}
	if update.solved {
		if let Some(cb) = &callbacks.on_solved {
			cb.run(());
		}
	}
	if let Some(cb) = &callbacks.on_status {
		cb.run(state.status().to_string());
	}
}

fn event_position(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		client_x as f64 - rect.left(),
		client_y as f64 - rect.top(),
	)
}

fn touch_position(canvas: &HtmlCanvasElement, ev: &TouchEvent) -> Option<(f64, f64)> {
	let touch = ev
		.touches()
		.item(0)
		.or_else(|| ev.changed_touches().item(0))?;
	Some(event_position(canvas, touch.client_x(), touch.client_y()))
}

/// Interactive graph editor canvas.
///
/// Owns the editor core exclusively; the shell supplies the initial
/// graph and the mode flag and receives snapshots, status strings and
/// the one-shot solved signal through [`EditorCallbacks`]-style props.
#[component]
pub fn GraphEditorCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(into)] move_mode: Signal<bool>,
	#[prop(into, optional)] on_change: Option<Callback<GraphData>>,
	#[prop(into, optional)] on_solved: Option<Callback<()>>,
	#[prop(into, optional)] on_status: Option<Callback<String>>,
	#[prop(default = 700.0)] width: f64,
	#[prop(default = 500.0)] height: f64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<EditorState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let callbacks = EditorCallbacks {
		on_change,
		on_solved,
		on_status,
	};

	let (state_init, animate_init) = (state.clone(), animate.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		canvas.set_width(width as u32);
		canvas.set_height(height as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();
		let initial = data.get();
		info!(
			"editor canvas ready: {} vertices, {} edges",
			initial.nodes.len(),
			initial.edges.len()
		);
		*state_init.borrow_mut() = Some(EditorState::new(&initial, width, height));

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref s) = *state_anim.borrow() {
				render::render(s, &ctx);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = web_sys::window()
				.unwrap()
				.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// Keep the editor's mode in sync with the shell's toggle. A drag
	// already in flight keeps the mode it latched at drag-start.
	let state_mode = state.clone();
	Effect::new(move |_| {
		let mode = if move_mode.get() {
			Mode::Move
		} else {
			Mode::Connect
		};
		if let Some(ref mut s) = *state_mode.borrow_mut() {
			s.set_mode(mode);
		}
	});

	let (state_md, cbs_md) = (state.clone(), callbacks.clone());
	let on_mousedown = move |ev: MouseEvent| {
		if ev.button() != 0 {
			return;
		}
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = event_position(&canvas, ev.client_x(), ev.client_y());
		if let Some(ref mut s) = *state_md.borrow_mut() {
			let update = s.apply(PointerEvent::Press {
				x,
				y,
				button: Button::Primary,
			});
			dispatch(s, update, &cbs_md);
		}
	};

	let (state_mm, cbs_mm) = (state.clone(), callbacks.clone());
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = event_position(&canvas, ev.client_x(), ev.client_y());
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			let update = s.apply(PointerEvent::Move { x, y });
			dispatch(s, update, &cbs_mm);
		}
	};

	let (state_mu, cbs_mu) = (state.clone(), callbacks.clone());
	let on_mouseup = move |ev: MouseEvent| {
		if ev.button() != 0 {
			return;
		}
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = event_position(&canvas, ev.client_x(), ev.client_y());
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			let update = s.apply(PointerEvent::Release { x, y });
			dispatch(s, update, &cbs_mu);
		}
	};

	let (state_dc, cbs_dc) = (state.clone(), callbacks.clone());
	let on_dblclick = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = event_position(&canvas, ev.client_x(), ev.client_y());
		if let Some(ref mut s) = *state_dc.borrow_mut() {
			let update = s.apply(PointerEvent::DoubleClick { x, y });
			dispatch(s, update, &cbs_dc);
		}
	};

	let (state_cm, cbs_cm) = (state.clone(), callbacks.clone());
	let on_contextmenu = move |ev: MouseEvent| {
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = event_position(&canvas, ev.client_x(), ev.client_y());
		if let Some(ref mut s) = *state_cm.borrow_mut() {
			let update = s.apply(PointerEvent::Press {
				x,
				y,
				button: Button::Secondary,
			});
			dispatch(s, update, &cbs_cm);
		}
	};

	let (state_ts, cbs_ts) = (state.clone(), callbacks.clone());
	let on_touchstart = move |ev: TouchEvent| {
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let Some((x, y)) = touch_position(&canvas, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_ts.borrow_mut() {
			let update = s.apply(PointerEvent::Press {
				x,
				y,
				button: Button::Primary,
			});
			dispatch(s, update, &cbs_ts);
		}
	};

	let (state_tm, cbs_tm) = (state.clone(), callbacks.clone());
	let on_touchmove = move |ev: TouchEvent| {
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let Some((x, y)) = touch_position(&canvas, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_tm.borrow_mut() {
			let update = s.apply(PointerEvent::Move { x, y });
			dispatch(s, update, &cbs_tm);
		}
	};

	let (state_te, cbs_te) = (state.clone(), callbacks.clone());
	let on_touchend = move |ev: TouchEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		if let Some(ref mut s) = *state_te.borrow_mut() {
			// touchend carries no active touches; fall back to the
			// last position the machine saw.
			let (x, y) = touch_position(&canvas, &ev).unwrap_or_else(|| s.pointer());
			let update = s.apply(PointerEvent::Release { x, y });
			dispatch(s, update, &cbs_te);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="graph-editor-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:dblclick=on_dblclick
			on:contextmenu=on_contextmenu
			on:touchstart=on_touchstart
			on:touchmove=on_touchmove
			on:touchend=on_touchend
			style="display: block; cursor: grab; touch-action: none; border: 2px solid #ccc; border-radius: 8px;"
		/>
	}
}
