//! Small geometry helpers for canvas hit-testing.

/// Euclidean distance between two points.
pub fn distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
	let (dx, dy) = (x2 - x1, y2 - y1);
	(dx * dx + dy * dy).sqrt()
}

/// Distance from a point to the finite segment `(x1, y1)-(x2, y2)`.
///
/// The projection is clamped to the segment, so endpoints bound the
/// answer; a degenerate segment falls back to point distance.
pub fn distance_to_segment(px: f64, py: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
	let (cx, cy) = (x2 - x1, y2 - y1);
	let len_sq = cx * cx + cy * cy;
	if len_sq == 0.0 {
		return distance(px, py, x1, y1);
	}

	let t = (((px - x1) * cx + (py - y1) * cy) / len_sq).clamp(0.0, 1.0);
	distance(px, py, x1 + t * cx, y1 + t * cy)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn segment_distance_perpendicular() {
		// Point above the middle of a horizontal segment.
		let d = distance_to_segment(5.0, 3.0, 0.0, 0.0, 10.0, 0.0);
		assert!((d - 3.0).abs() < 1e-9);
	}

	#[test]
	fn segment_distance_clamps_to_endpoints() {
		// Beyond the right endpoint: distance to (10, 0), not to the line.
		let d = distance_to_segment(14.0, 3.0, 0.0, 0.0, 10.0, 0.0);
		assert!((d - 5.0).abs() < 1e-9);

		// Before the left endpoint.
		let d = distance_to_segment(-3.0, 4.0, 0.0, 0.0, 10.0, 0.0);
		assert!((d - 5.0).abs() < 1e-9);
	}

	#[test]
	fn degenerate_segment_is_point_distance() {
		let d = distance_to_segment(3.0, 4.0, 0.0, 0.0, 0.0, 0.0);
		assert!((d - 5.0).abs() < 1e-9);
	}
}
