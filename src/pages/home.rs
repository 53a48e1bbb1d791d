use leptos::prelude::*;
use log::info;

use crate::components::graph_editor::analysis::analyze;
use crate::components::graph_editor::graph::Graph;
use crate::components::graph_editor::{GraphData, GraphEditorCanvas};

const CANVAS_WIDTH: f64 = 700.0;
const CANVAS_HEIGHT: f64 = 500.0;

fn starting_graph() -> GraphData {
	GraphData {
		nodes: vec![0, 1, 2, 3],
		edges: vec![(0, 1), (1, 2), (2, 0), (1, 3)],
	}
}

/// Dashboard around the editor: mode toggle, status line, win banner
/// and the per-vertex analysis panel.
#[component]
pub fn Home() -> impl IntoView {
	// Display-only snapshot fed by the editor's change callback; edits
	// never go through this signal directly.
	let (snapshot, set_snapshot) = signal(starting_graph());
	let (status, set_status) = signal(String::from("Ready for editing"));
	let (moves, set_moves) = signal(0usize);
	let (solved, set_solved) = signal(false);
	let (move_mode, set_move_mode) = signal(false);

	let data = Signal::derive(starting_graph);
	let records = Signal::derive(move || {
		analyze(&Graph::from_data(&snapshot.get(), CANVAS_WIDTH, CANVAS_HEIGHT))
	});
	let flagged_count =
		Signal::derive(move || records.get().iter().filter(|a| a.flagged).count());

	let on_change = Callback::new(move |snap: GraphData| {
		set_moves.update(|m| *m += 1);
		set_snapshot.set(snap);
	});
	let on_solved = Callback::new(move |()| {
		info!("graph solved");
		set_solved.set(true);
	});
	let on_status = Callback::new(move |s: String| set_status.set(s));

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

			<div class="editor-page">
				<h1>"Get all blue!"</h1>
				<p class="subtitle">
					"Double-click to add a vertex. Drag vertex to vertex to connect. Right-click to delete. Red vertices satisfy the Seymour property; eliminate them all."
				</p>

				<label class="mode-toggle">
					<input
						type="checkbox"
						prop:checked=move_mode
						on:change=move |ev| set_move_mode.set(event_target_checked(&ev))
					/>
					" Move mode (drag repositions instead of connecting)"
				</label>

				<Show when=move || solved.get() && flagged_count.get() == 0>
					<div class="win-banner">
						{move || {
							format!("All blue! No flagged vertices left after {} moves.", moves.get())
						}}
					</div>
				</Show>

				<GraphEditorCanvas
					data=data
					move_mode=move_mode
					on_change=on_change
					on_solved=on_solved
					on_status=on_status
					width=CANVAS_WIDTH
					height=CANVAS_HEIGHT
				/>

				<div class="status-bar">{status}</div>

				<div class="metrics">
					<span>{move || format!("Vertices: {}", snapshot.get().nodes.len())}</span>
					<span>{move || format!("Edges: {}", snapshot.get().edges.len())}</span>
					<span>{move || format!("Flagged: {}", flagged_count.get())}</span>
					<span>{move || format!("Moves: {}", moves.get())}</span>
				</div>

				<div class="analysis-panel">
					<h2>"Vertex analysis"</h2>
					{move || {
						records
							.get()
							.iter()
							.enumerate()
							.map(|(id, a)| {
								let first: Vec<_> = a.first_neighbors.iter().copied().collect();
								let second: Vec<_> = a.second_neighbors.iter().copied().collect();
								view! {
									<div class="analysis-row" class:flagged=a.flagged>
										<strong>{format!("Vertex {id}")}</strong>
										<span>{format!(" out-degree {}", a.out_degree())}</span>
										<span>{format!(" first {first:?}")}</span>
										<span>{format!(" second {second:?}")}</span>
										<span>{format!(" ratio {:.2}", a.ratio)}</span>
										<span>{if a.flagged { " flagged" } else { " ok" }}</span>
									</div>
								}
							})
							.collect_view()
					}}
				</div>
			</div>
		</ErrorBoundary>
	}
}
