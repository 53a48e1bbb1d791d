//! Editor state and the pointer-gesture state machine.
//!
//! The editor owns the graph, the per-vertex classification, the
//! connect/move mode flag and the transient gesture state. It consumes
//! generic pointer events, so the whole machine runs headlessly in
//! tests with synthetic event sequences.

use super::analysis::{self, VertexAnalysis};
use super::geometry;
use super::graph::{ConnectOutcome, Graph};
use super::types::GraphData;

/// Pixels the pointer must travel from the press point before a press
/// becomes a drag.
pub const DRAG_THRESHOLD: f64 = 10.0;

/// What a drag on a vertex does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
	/// Drag-release between two vertices creates (or reverses) an edge.
	#[default]
	Connect,
	/// Drag repositions the vertex, leaving the structure alone.
	Move,
}

/// Pointer button identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
	/// Left mouse button / single touch.
	Primary,
	/// Right mouse button / context gesture.
	Secondary,
}

/// A rendering-surface-independent pointer event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
	/// Button pressed at a canvas position.
	Press {
		/// Canvas x coordinate.
		x: f64,
		/// Canvas y coordinate.
		y: f64,
		/// Which button went down.
		button: Button,
	},
	/// Pointer moved to a canvas position.
	Move {
		/// Canvas x coordinate.
		x: f64,
		/// Canvas y coordinate.
		y: f64,
	},
	/// Primary button released at a canvas position.
	Release {
		/// Canvas x coordinate.
		x: f64,
		/// Canvas y coordinate.
		y: f64,
	},
	/// Primary double-click at a canvas position.
	DoubleClick {
		/// Canvas x coordinate.
		x: f64,
		/// Canvas y coordinate.
		y: f64,
	},
}

/// Gesture progress between a press and its release.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum Gesture {
	#[default]
	Idle,
	Pressed {
		vertex: usize,
		start_x: f64,
		start_y: f64,
	},
	// The mode is latched at drag-start; toggling it mid-gesture does
	// not change the gesture in flight.
	Dragging {
		vertex: usize,
		mode: Mode,
	},
}

/// What a pointer event did, reported back to the shell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EditorUpdate {
	/// The graph (or a vertex position) changed; the shell should
	/// re-read the vertex/edge snapshot.
	pub mutated: bool,
	/// The graph just transitioned into the solved state (non-empty,
	/// zero flagged vertices). One-shot: does not re-fire while the
	/// graph stays solved.
	pub solved: bool,
}

/// Owns the graph, classification and gesture state. All mutations go
/// through this type so the graph invariants hold; the shell treats
/// the snapshots it reads back as display-only.
pub struct EditorState {
	graph: Graph,
	analysis: Vec<VertexAnalysis>,
	mode: Mode,
	gesture: Gesture,
	pointer_x: f64,
	pointer_y: f64,
	connect_target: Option<usize>,
	status: String,
	solved: bool,
	/// Canvas width, used for grid placement on (re)load.
	pub width: f64,
	/// Canvas height.
	pub height: f64,
}

impl EditorState {
	/// Build an editor over an initial graph, placed on a grid scaled
	/// to the given canvas size.
	pub fn new(data: &GraphData, width: f64, height: f64) -> Self {
		let graph = Graph::from_data(data, width, height);
		let mut editor = Self {
			graph,
			analysis: Vec::new(),
			mode: Mode::default(),
			gesture: Gesture::Idle,
			pointer_x: 0.0,
			pointer_y: 0.0,
			connect_target: None,
			status: String::from("Ready for editing"),
			solved: false,
			width,
			height,
		};
		editor.refresh();
		// Seed the latch so loading an already-solved graph does not fire.
		editor.solved = editor.is_solved();
		editor
	}

	/// The graph, for rendering and snapshotting.
	pub fn graph(&self) -> &Graph {
		&self.graph
	}

	/// Classification records, indexed by vertex id.
	pub fn analysis(&self) -> &[VertexAnalysis] {
		&self.analysis
	}

	/// Current gesture mode.
	pub fn mode(&self) -> Mode {
		self.mode
	}

	/// Switch the gesture mode. A gesture already past its drag-start
	/// keeps the mode it latched.
	pub fn set_mode(&mut self, mode: Mode) {
		self.mode = mode;
	}

	/// Human-readable outcome of the last gesture.
	pub fn status(&self) -> &str {
		&self.status
	}

	/// Last known pointer position.
	pub fn pointer(&self) -> (f64, f64) {
		(self.pointer_x, self.pointer_y)
	}

	/// When a connect drag is in flight: the origin vertex and the
	/// prospective target under the pointer, for rubber-band feedback.
	pub fn connect_drag(&self) -> Option<(usize, Option<usize>)> {
		match self.gesture {
			Gesture::Dragging {
				vertex,
				mode: Mode::Connect,
			} => Some((vertex, self.connect_target)),
			_ => None,
		}
	}

	/// Non-empty graph with zero flagged vertices.
	pub fn is_solved(&self) -> bool {
		!self.graph.is_empty() && analysis::flagged_vertices(&self.graph).is_empty()
	}

	/// Feed one pointer event through the state machine.
	pub fn apply(&mut self, event: PointerEvent) -> EditorUpdate {
		match event {
			PointerEvent::Press { x, y, button } => self.on_press(x, y, button),
			PointerEvent::Move { x, y } => self.on_move(x, y),
			PointerEvent::Release { x, y } => self.on_release(x, y),
			PointerEvent::DoubleClick { x, y } => self.on_double_click(x, y),
		}
	}

	fn on_press(&mut self, x: f64, y: f64, button: Button) -> EditorUpdate {
		self.pointer_x = x;
		self.pointer_y = y;
		match button {
			Button::Primary => {
				if let Some(vertex) = self.graph.vertex_at(x, y) {
					self.gesture = Gesture::Pressed {
						vertex,
						start_x: x,
						start_y: y,
					};
					let hint = match self.mode {
						Mode::Move => "drag to move it",
						Mode::Connect => "drag to another vertex to connect",
					};
					self.status = format!("Ready to drag from vertex {vertex}: {hint}");
				} else {
					self.gesture = Gesture::Idle;
					self.status = String::from("Click a vertex to interact with it");
				}
				EditorUpdate::default()
			}
			Button::Secondary => self.on_secondary(x, y),
		}
	}

	// Right-click: delete the vertex under the cursor, or failing that
	// the edge under the cursor. Vertex hits take priority.
	fn on_secondary(&mut self, x: f64, y: f64) -> EditorUpdate {
		if let Some(vertex) = self.graph.vertex_at(x, y) {
			return self.delete_vertex(vertex);
		}
		if let Some(edge) = self.graph.edge_at(x, y) {
			self.graph.remove_edge(edge.from, edge.to);
			self.refresh();
			self.status = format!("Deleted edge {} -> {}", edge.from, edge.to);
			return self.structural_update();
		}
		EditorUpdate::default()
	}

	fn on_move(&mut self, x: f64, y: f64) -> EditorUpdate {
		self.pointer_x = x;
		self.pointer_y = y;

		if let Gesture::Pressed {
			vertex,
			start_x,
			start_y,
		} = self.gesture
		{
			let moved = geometry::distance(x, y, start_x, start_y);
			if moved > DRAG_THRESHOLD {
				self.gesture = Gesture::Dragging {
					vertex,
					mode: self.mode,
				};
			}
		}

		match self.gesture {
			Gesture::Dragging {
				vertex,
				mode: Mode::Move,
			} => {
				// Direct manipulation; the snapshot goes out at release.
				self.graph.set_position(vertex, x, y);
				self.status = format!(
					"Moving vertex {vertex} to ({}, {})",
					x.round(),
					y.round()
				);
			}
			Gesture::Dragging {
				vertex,
				mode: Mode::Connect,
			} => {
				self.connect_target = self.graph.vertex_at(x, y).filter(|&t| t != vertex);
				self.status = match self.connect_target {
					Some(target) => format!("Release to create edge {vertex} -> {target}"),
					None => format!("Drag to another vertex to connect from {vertex}"),
				};
			}
			_ => {}
		}
		EditorUpdate::default()
	}

	fn on_release(&mut self, x: f64, y: f64) -> EditorUpdate {
		let gesture = std::mem::take(&mut self.gesture);
		self.connect_target = None;

		match gesture {
			Gesture::Dragging {
				vertex,
				mode: Mode::Connect,
			} => {
				let Some(target) = self.graph.vertex_at(x, y).filter(|&t| t != vertex) else {
					self.status = String::from("Drag cancelled: release over another vertex");
					return EditorUpdate::default();
				};
				let outcome = self.graph.connect(vertex, target);
				self.status = match outcome {
					ConnectOutcome::Created => format!("Created edge {vertex} -> {target}"),
					ConnectOutcome::Reversed => {
						format!("Reversed edge: now {vertex} -> {target}")
					}
					ConnectOutcome::Duplicate => {
						format!("Edge already exists: {vertex} -> {target}")
					}
					ConnectOutcome::Rejected => String::from("Cannot connect a vertex to itself"),
				};
				if outcome.mutated() {
					self.refresh();
					self.structural_update()
				} else {
					EditorUpdate::default()
				}
			}
			Gesture::Dragging {
				vertex,
				mode: Mode::Move,
			} => {
				// Position already applied live; refresh labels only.
				self.refresh();
				self.status = format!("Vertex {vertex} moved to a new position");
				EditorUpdate {
					mutated: true,
					solved: false,
				}
			}
			Gesture::Pressed { vertex, .. } => {
				self.status = format!("Selected vertex {vertex}");
				EditorUpdate::default()
			}
			Gesture::Idle => EditorUpdate::default(),
		}
	}

	fn on_double_click(&mut self, x: f64, y: f64) -> EditorUpdate {
		if self.graph.vertex_at(x, y).is_some() {
			return EditorUpdate::default();
		}
		let id = self.graph.add_vertex(x, y);
		self.refresh();
		self.status = format!("Added vertex {id}");
		// A fresh vertex has out-degree 0 and is flagged, so this can
		// only leave the solved state, never enter it.
		self.solved = self.is_solved();
		EditorUpdate {
			mutated: true,
			solved: false,
		}
	}

	/// Delete a vertex and renumber, via the same path as right-click.
	/// Shell-facing entry point for sidebar controls. No-op on an
	/// unknown id.
	pub fn delete_vertex(&mut self, id: usize) -> EditorUpdate {
		if !self.graph.remove_vertex(id) {
			return EditorUpdate::default();
		}
		self.gesture = Gesture::Idle;
		self.refresh();
		self.status = format!("Deleted vertex {id} and renumbered remaining vertices");
		self.structural_update()
	}

	/// Replace the graph with a freshly loaded one.
	pub fn load(&mut self, data: &GraphData) {
		self.graph = Graph::from_data(data, self.width, self.height);
		self.gesture = Gesture::Idle;
		self.connect_target = None;
		self.refresh();
		self.solved = self.is_solved();
		self.status = String::from("Graph loaded");
	}

	/// Remove every vertex and edge.
	pub fn clear(&mut self) {
		self.load(&GraphData::default());
		self.status = String::from("Cleared graph");
	}

	// Re-run the classifier and push flags onto vertices for drawing.
	fn refresh(&mut self) {
		self.analysis = analysis::analyze(&self.graph);
		for (id, record) in self.analysis.iter().enumerate() {
			self.graph.set_flagged(id, record.flagged);
		}
		let flagged = self.analysis.iter().filter(|a| a.flagged).count();
		log::debug!(
			"classified {} vertices, {} flagged",
			self.graph.vertex_count(),
			flagged
		);
	}

	// Post-structural-mutation bookkeeping: edge-triggered win latch.
	fn structural_update(&mut self) -> EditorUpdate {
		let now_solved = self.is_solved();
		let fired = now_solved && !self.solved;
		self.solved = now_solved;
		if fired {
			self.status = format!("{}. All vertices are blue!", self.status);
		}
		EditorUpdate {
			mutated: true,
			solved: fired,
		}
	}
}
