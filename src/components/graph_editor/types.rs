/// Initial graph supplied by the surrounding shell.
///
/// Ids need not be contiguous; the editor normalizes them on load.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphData {
	/// Vertex ids.
	pub nodes: Vec<usize>,
	/// Directed `(from, to)` pairs over the ids in `nodes`.
	pub edges: Vec<(usize, usize)>,
}
