//! Mutable graph model owned by the editor.
//!
//! Invariants maintained by every mutation entry point: vertex ids are
//! contiguous from 0, edges never self-loop, at most one edge exists
//! per ordered pair, and every edge endpoint names a live vertex.

use std::collections::HashMap;

use super::geometry::{distance, distance_to_segment};
use super::types::GraphData;

/// Display radius of a vertex; also its hit-test radius.
pub const VERTEX_RADIUS: f64 = 25.0;
/// Max perpendicular distance at which a point still hits an edge.
pub const EDGE_HIT_TOLERANCE: f64 = 10.0;

const GRID_MARGIN: f64 = 50.0;
const GRID_SPACING_X: f64 = 150.0;
const GRID_SPACING_Y: f64 = 120.0;

/// A vertex with its canvas position and last computed classification.
#[derive(Clone, Debug)]
pub struct Vertex {
	/// Contiguous id, equal to the vertex's index in the vertex list.
	pub id: usize,
	/// Canvas x coordinate.
	pub x: f64,
	/// Canvas y coordinate.
	pub y: f64,
	/// Whether the vertex satisfied the Seymour property at the last
	/// classification pass.
	pub flagged: bool,
}

/// A directed edge between two vertex ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
	/// Source vertex id.
	pub from: usize,
	/// Target vertex id.
	pub to: usize,
}

/// Result of a connect attempt between two vertices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectOutcome {
	/// A new edge was created.
	Created,
	/// The opposite edge existed and was reversed in place, so no
	/// 2-cycle comes out of a connect gesture.
	Reversed,
	/// The edge already exists; nothing changed.
	Duplicate,
	/// Self-loop or unknown endpoint; nothing changed.
	Rejected,
}

impl ConnectOutcome {
	/// Whether the graph structure changed.
	pub fn mutated(self) -> bool {
		matches!(self, Self::Created | Self::Reversed)
	}
}

/// The directed graph plus per-vertex canvas positions.
#[derive(Clone, Debug, Default)]
pub struct Graph {
	vertices: Vec<Vertex>,
	edges: Vec<Edge>,
}

impl Graph {
	/// Build a graph from an initial vertex/edge list.
	///
	/// Ids are normalized to `0..n` by the same ascending-sort mapping
	/// used after deletion, positions are assigned on a row-major grid
	/// sized from the viewport width, and edges that would violate an
	/// invariant (self-loop, duplicate, unknown endpoint) are skipped.
	pub fn from_data(data: &GraphData, width: f64, _height: f64) -> Self {
		let mut ids: Vec<usize> = data.nodes.clone();
		ids.sort_unstable();
		ids.dedup();
		let id_map: HashMap<usize, usize> =
			ids.iter().enumerate().map(|(new, &old)| (old, new)).collect();

		let cols = (((width - GRID_MARGIN) / GRID_SPACING_X) as usize).max(1);
		let vertices = (0..ids.len())
			.map(|id| Vertex {
				id,
				x: GRID_MARGIN + (id % cols) as f64 * GRID_SPACING_X,
				y: GRID_MARGIN + (id / cols) as f64 * GRID_SPACING_Y,
				flagged: false,
			})
			.collect();

		let mut graph = Self {
			vertices,
			edges: Vec::new(),
		};
		for (from, to) in &data.edges {
			if let (Some(&from), Some(&to)) = (id_map.get(from), id_map.get(to)) {
				if from != to && !graph.contains_edge(from, to) {
					graph.edges.push(Edge { from, to });
				}
			}
		}
		graph
	}

	/// Number of vertices.
	pub fn vertex_count(&self) -> usize {
		self.vertices.len()
	}

	/// Whether the graph has no vertices.
	pub fn is_empty(&self) -> bool {
		self.vertices.is_empty()
	}

	/// All vertices, ordered by id.
	pub fn vertices(&self) -> &[Vertex] {
		&self.vertices
	}

	/// Look up a vertex by id.
	pub fn vertex(&self, id: usize) -> Option<&Vertex> {
		self.vertices.get(id)
	}

	/// All edges, in insertion order.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Snapshot of vertex ids for the caller, ascending.
	pub fn vertex_ids(&self) -> Vec<usize> {
		self.vertices.iter().map(|v| v.id).collect()
	}

	/// Snapshot of edges as `(from, to)` pairs for the caller.
	pub fn edge_pairs(&self) -> Vec<(usize, usize)> {
		self.edges.iter().map(|e| (e.from, e.to)).collect()
	}

	/// Whether the ordered edge `(from, to)` exists.
	pub fn contains_edge(&self, from: usize, to: usize) -> bool {
		self.edges.iter().any(|e| e.from == from && e.to == to)
	}

	/// Add a vertex at the given position, returning its id.
	pub fn add_vertex(&mut self, x: f64, y: f64) -> usize {
		let id = self.vertices.len();
		self.vertices.push(Vertex {
			id,
			x,
			y,
			flagged: false,
		});
		id
	}

	/// Delete a vertex, cascade-delete its edges and renumber the
	/// survivors back to `0..n`. Old ids sorted ascending map to the
	/// new ids in that order. No-op on an unknown id.
	pub fn remove_vertex(&mut self, id: usize) -> bool {
		if id >= self.vertices.len() {
			return false;
		}
		self.vertices.remove(id);
		self.edges.retain(|e| e.from != id && e.to != id);

		// Survivors are still sorted by old id, so position is the new id.
		for (new_id, vertex) in self.vertices.iter_mut().enumerate() {
			vertex.id = new_id;
		}
		for edge in &mut self.edges {
			if edge.from > id {
				edge.from -= 1;
			}
			if edge.to > id {
				edge.to -= 1;
			}
		}
		true
	}

	/// Connect `from` to `to`, enforcing the no-duplicate and
	/// no-2-cycle policies: an existing `(from, to)` suppresses the
	/// mutation, an existing `(to, from)` is reversed in place.
	pub fn connect(&mut self, from: usize, to: usize) -> ConnectOutcome {
		if from == to || from >= self.vertices.len() || to >= self.vertices.len() {
			return ConnectOutcome::Rejected;
		}
		if self.contains_edge(from, to) {
			return ConnectOutcome::Duplicate;
		}
		if let Some(reverse) = self
			.edges
			.iter_mut()
			.find(|e| e.from == to && e.to == from)
		{
			reverse.from = from;
			reverse.to = to;
			return ConnectOutcome::Reversed;
		}
		self.edges.push(Edge { from, to });
		ConnectOutcome::Created
	}

	/// Delete the edge `(from, to)` if present.
	pub fn remove_edge(&mut self, from: usize, to: usize) -> bool {
		let before = self.edges.len();
		self.edges.retain(|e| !(e.from == from && e.to == to));
		self.edges.len() != before
	}

	/// Move a vertex to a new canvas position. Structure-neutral.
	pub fn set_position(&mut self, id: usize, x: f64, y: f64) {
		if let Some(vertex) = self.vertices.get_mut(id) {
			vertex.x = x;
			vertex.y = y;
		}
	}

	/// Store a classification result on a vertex for rendering.
	pub fn set_flagged(&mut self, id: usize, flagged: bool) {
		if let Some(vertex) = self.vertices.get_mut(id) {
			vertex.flagged = flagged;
		}
	}

	/// Id of the vertex whose display disc contains the point, if any.
	pub fn vertex_at(&self, x: f64, y: f64) -> Option<usize> {
		self.vertices
			.iter()
			.find(|v| distance(x, y, v.x, v.y) <= VERTEX_RADIUS)
			.map(|v| v.id)
	}

	/// The edge whose segment passes within tolerance of the point, if
	/// any. Callers wanting vertex-over-edge priority check
	/// [`Self::vertex_at`] first.
	pub fn edge_at(&self, x: f64, y: f64) -> Option<Edge> {
		self.edges
			.iter()
			.find(|e| {
				let (from, to) = (&self.vertices[e.from], &self.vertices[e.to]);
				distance_to_segment(x, y, from.x, from.y, to.x, to.y) <= EDGE_HIT_TOLERANCE
			})
			.copied()
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	fn example() -> Graph {
		Graph::from_data(
			&GraphData {
				nodes: vec![0, 1, 2, 3],
				edges: vec![(0, 1), (1, 2), (2, 0), (1, 3)],
			},
			800.0,
			600.0,
		)
	}

	#[test]
	fn load_normalizes_sparse_ids() {
		let g = Graph::from_data(
			&GraphData {
				nodes: vec![7, 2, 9],
				edges: vec![(2, 7), (7, 9), (9, 9), (2, 7)],
			},
			800.0,
			600.0,
		);
		// 2 -> 0, 7 -> 1, 9 -> 2; self-loop and duplicate dropped.
		assert_eq!(g.vertex_ids(), vec![0, 1, 2]);
		assert_eq!(g.edge_pairs(), vec![(0, 1), (1, 2)]);
	}

	#[test]
	fn load_places_vertices_on_a_grid() {
		let g = Graph::from_data(
			&GraphData {
				nodes: (0..7).collect(),
				edges: vec![],
			},
			700.0,
			500.0,
		);
		// 700 px fits 4 columns, so vertex 4 wraps to the second row.
		let v = g.vertex(4).unwrap();
		assert_eq!((v.x, v.y), (50.0, 170.0));
		let v = g.vertex(3).unwrap();
		assert_eq!((v.x, v.y), (500.0, 50.0));
	}

	#[test]
	fn remove_vertex_renumbers_ascending() {
		let mut g = example();
		assert!(g.remove_vertex(1));
		// Old 0 -> 0, 2 -> 1, 3 -> 2; edge (2, 0) becomes (1, 0).
		assert_eq!(g.vertex_ids(), vec![0, 1, 2]);
		assert_eq!(g.edge_pairs(), vec![(1, 0)]);
	}

	#[test]
	fn remove_unknown_vertex_is_noop() {
		let mut g = example();
		assert!(!g.remove_vertex(17));
		assert_eq!(g.vertex_count(), 4);
		assert_eq!(g.edges().len(), 4);
	}

	#[test]
	fn connect_outcomes() {
		let mut g = example();
		assert_eq!(g.connect(3, 3), ConnectOutcome::Rejected);
		assert_eq!(g.connect(0, 1), ConnectOutcome::Duplicate);
		assert_eq!(g.connect(3, 0), ConnectOutcome::Created);
		assert!(g.contains_edge(3, 0));

		// Reverse edge exists: mutate it in place, never a 2-cycle.
		let before = g.edges().len();
		assert_eq!(g.connect(1, 0), ConnectOutcome::Reversed);
		assert_eq!(g.edges().len(), before);
		assert!(g.contains_edge(1, 0));
		assert!(!g.contains_edge(0, 1));
	}

	#[test]
	fn remove_edge_only_removes_the_pair() {
		let mut g = example();
		assert!(g.remove_edge(1, 2));
		assert!(!g.remove_edge(1, 2));
		assert_eq!(g.edge_pairs(), vec![(0, 1), (2, 0), (1, 3)]);
	}

	#[test]
	fn hit_testing_vertex_and_edge() {
		let mut g = Graph::from_data(
			&GraphData {
				nodes: vec![0, 1],
				edges: vec![(0, 1)],
			},
			800.0,
			600.0,
		);
		g.set_position(0, 100.0, 100.0);
		g.set_position(1, 300.0, 100.0);

		assert_eq!(g.vertex_at(110.0, 110.0), Some(0));
		assert_eq!(g.vertex_at(200.0, 200.0), None);

		// Midpoint of the segment, a few px off-axis.
		let edge = g.edge_at(200.0, 106.0).unwrap();
		assert_eq!((edge.from, edge.to), (0, 1));
		assert!(g.edge_at(200.0, 140.0).is_none());
	}

	proptest! {
		#[test]
		fn deletions_preserve_contiguity(
			edges in proptest::collection::vec((0..10usize, 0..10usize), 0..40),
			deletions in proptest::collection::vec(0..10usize, 0..10)
		) {
			let mut g = Graph::from_data(
				&GraphData { nodes: (0..10).collect(), edges },
				800.0,
				600.0,
			);
			for id in deletions {
				g.remove_vertex(id);
				let n = g.vertex_count();
				prop_assert_eq!(g.vertex_ids(), (0..n).collect::<Vec<_>>());
				for (from, to) in g.edge_pairs() {
					prop_assert!(from < n && to < n);
					prop_assert_ne!(from, to);
				}
			}
		}

		#[test]
		fn connects_never_duplicate_or_two_cycle(
			gestures in proptest::collection::vec((0..6usize, 0..6usize), 0..40)
		) {
			let mut g = Graph::from_data(
				&GraphData { nodes: (0..6).collect(), edges: vec![] },
				800.0,
				600.0,
			);
			for (from, to) in gestures {
				g.connect(from, to);
			}
			let pairs = g.edge_pairs();
			for &(a, b) in &pairs {
				prop_assert_eq!(pairs.iter().filter(|p| **p == (a, b)).count(), 1);
				prop_assert!(!pairs.contains(&(b, a)));
			}
		}
	}
}
