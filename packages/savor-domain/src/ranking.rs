use std::cmp::Ordering;

use crate::poi::Poi;

/// Fixed fusion weights. Semantic similarity dominates; physical closeness
/// breaks near-ties between equally relevant candidates.
pub const SEMANTIC_WEIGHT: f32 = 0.6;
pub const DISTANCE_WEIGHT: f32 = 0.4;

/// A candidate with every per-request score attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPoi {
	pub poi: Poi,
	pub semantic_score: f32,
	pub distance_km: f64,
	pub distance_score: f32,
	pub final_score: f32,
}

/// Blends semantic similarity and closeness into one ranking score.
pub fn fuse(semantic_score: f32, distance_score: f32) -> f32 {
	SEMANTIC_WEIGHT * semantic_score + DISTANCE_WEIGHT * distance_score
}

/// Orders candidates by descending `final_score` and keeps the top `k`.
///
/// The sort is stable: candidates with equal scores stay in fetch order, so
/// identical inputs always rank identically.
pub fn rank(mut candidates: Vec<ScoredPoi>, top_k: usize) -> Vec<ScoredPoi> {
	candidates.sort_by(|a, b| {
		b.final_score.partial_cmp(&a.final_score).unwrap_or(Ordering::Equal)
	});
	candidates.truncate(top_k);

	candidates
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn weights_sum_to_one() {
		assert!((SEMANTIC_WEIGHT + DISTANCE_WEIGHT - 1.0).abs() < 1e-6);
	}

	#[test]
	fn fuse_is_monotonic_in_each_input() {
		assert!(fuse(0.8, 0.5) > fuse(0.4, 0.5));
		assert!(fuse(0.5, 0.9) > fuse(0.5, 0.2));
	}

	#[test]
	fn fuse_stays_in_unit_interval() {
		assert_eq!(fuse(0.0, 0.0), 0.0);
		assert!((fuse(1.0, 1.0) - 1.0).abs() < 1e-6);
		assert!((0.0..=1.0).contains(&fuse(0.3, 0.7)));
	}
}
