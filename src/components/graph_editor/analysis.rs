//! Seymour-property classifier.
//!
//! A vertex is flagged ("Seymour vertex") when the number of vertices
//! reachable in exactly two hops, excluding its out-neighbors and
//! itself, is at least its out-degree. Pure functions over a graph
//! snapshot; recomputed from scratch on every call.

use std::collections::BTreeSet;

use super::graph::Graph;

/// Per-vertex classification record, indexed by vertex id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VertexAnalysis {
	/// Out-neighbors of the vertex.
	pub first_neighbors: BTreeSet<usize>,
	/// Vertices reachable in exactly two hops, minus first neighbors
	/// and the vertex itself.
	pub second_neighbors: BTreeSet<usize>,
	/// `|second_neighbors| >= |first_neighbors|`.
	pub flagged: bool,
	/// `|second_neighbors| / max(|first_neighbors|, 1)`.
	pub ratio: f64,
}

impl VertexAnalysis {
	/// Out-degree of the vertex.
	pub fn out_degree(&self) -> usize {
		self.first_neighbors.len()
	}
}

/// Classify every vertex of `graph`. Records are indexed by id, which
/// is always contiguous from 0.
pub fn analyze(graph: &Graph) -> Vec<VertexAnalysis> {
	let n = graph.vertex_count();
	let mut out: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); n];
	for edge in graph.edges() {
		out[edge.from].insert(edge.to);
	}

	(0..n)
		.map(|v| {
			let first = out[v].clone();
			let mut second = BTreeSet::new();
			for &u in &first {
				second.extend(out[u].iter().copied());
			}
			second.retain(|w| *w != v && !first.contains(w));

			let flagged = second.len() >= first.len();
			let ratio = second.len() as f64 / first.len().max(1) as f64;
			VertexAnalysis {
				first_neighbors: first,
				second_neighbors: second,
				flagged,
				ratio,
			}
		})
		.collect()
}

/// Ids of all flagged vertices, ascending.
pub fn flagged_vertices(graph: &Graph) -> Vec<usize> {
	analyze(graph)
		.iter()
		.enumerate()
		.filter(|(_, a)| a.flagged)
		.map(|(v, _)| v)
		.collect()
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;
	use crate::components::graph_editor::types::GraphData;

	fn graph(nodes: usize, edges: &[(usize, usize)]) -> Graph {
		Graph::from_data(
			&GraphData {
				nodes: (0..nodes).collect(),
				edges: edges.to_vec(),
			},
			800.0,
			600.0,
		)
	}

	#[test]
	fn four_vertex_example() {
		let g = graph(4, &[(0, 1), (1, 2), (2, 0), (1, 3)]);
		let analysis = analyze(&g);

		// Vertex 1: first = {2, 3}, second = {0}; 1 < 2 so not flagged.
		assert_eq!(analysis[1].first_neighbors, BTreeSet::from([2, 3]));
		assert_eq!(analysis[1].second_neighbors, BTreeSet::from([0]));
		assert!(!analysis[1].flagged);
		assert!((analysis[1].ratio - 0.5).abs() < 1e-9);

		// Vertex 0: first = {1}, second = {2, 3}; 2 >= 1 so flagged.
		assert_eq!(analysis[0].first_neighbors, BTreeSet::from([1]));
		assert_eq!(analysis[0].second_neighbors, BTreeSet::from([2, 3]));
		assert!(analysis[0].flagged);
		assert!((analysis[0].ratio - 2.0).abs() < 1e-9);

		assert_eq!(flagged_vertices(&g), vec![0, 2, 3]);
	}

	#[test]
	fn sink_vertex_is_flagged() {
		// Out-degree 0 means 0 >= 0: flagged, with ratio 0.
		let g = graph(2, &[(0, 1)]);
		let analysis = analyze(&g);
		assert_eq!(analysis[1].out_degree(), 0);
		assert!(analysis[1].flagged);
		assert_eq!(analysis[1].ratio, 0.0);
	}

	#[test]
	fn empty_graph_has_no_flagged_vertices() {
		let g = graph(0, &[]);
		assert!(analyze(&g).is_empty());
		assert!(flagged_vertices(&g).is_empty());
	}

	#[test]
	fn analysis_is_idempotent() {
		let g = graph(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0), (0, 2)]);
		assert_eq!(analyze(&g), analyze(&g));
	}

	proptest! {
		#[test]
		fn second_neighbors_exclude_first_and_self(
			edges in proptest::collection::vec((0..8usize, 0..8usize), 0..32)
		) {
			let edges: Vec<_> = edges.into_iter().filter(|(a, b)| a != b).collect();
			let g = graph(8, &edges);
			for (v, a) in analyze(&g).iter().enumerate() {
				prop_assert!(a.second_neighbors.is_disjoint(&a.first_neighbors));
				prop_assert!(!a.second_neighbors.contains(&v));
				prop_assert_eq!(a.flagged, a.second_neighbors.len() >= a.out_degree());
			}
		}
	}
}
