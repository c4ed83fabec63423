//! Top-K similar videos for every row of an index

use std::collections::BTreeMap;

use rayon::prelude::*;

use super::SimilarityIndex;
use crate::core::{rank_order, RecommendationEntry, RecommendationSet};
use crate::error::Result;

/// Recommendation sets for every video in the index.
///
/// Rows are queried in parallel; each query only reads the index.
pub fn recommend(index: &SimilarityIndex, k: usize) -> Result<BTreeMap<String, RecommendationSet>> {
	let sets: Vec<RecommendationSet> = (0..index.len())
		.into_par_iter()
		.map(|row| recommend_row(index, row, k))
		.collect::<Result<_>>()?;

	Ok(sets.into_iter().map(|set| (set.video_id.clone(), set)).collect())
}

/// Recommendation set for a single video, if it is indexed
pub fn recommend_for(index: &SimilarityIndex, video_id: &str, k: usize) -> Result<Option<RecommendationSet>> {
	match index.row_of(video_id) {
		Some(row) => recommend_row(index, row, k).map(Some),
		None => Ok(None),
	}
}

fn recommend_row(index: &SimilarityIndex, row: usize, k: usize) -> Result<RecommendationSet> {
	let video_id = index.video_id(row).unwrap_or_default().to_string();
	if k == 0 {
		return Ok(RecommendationSet::new(video_id, Vec::new()));
	}

	// Rank every other row so equal scores are cut by video id, not row order
	let mut similar: Vec<RecommendationEntry> = index
		.search(row, index.len())?
		.into_iter()
		.filter_map(|(candidate, score)| {
			let candidate_id = index.video_id(candidate)?;
			(candidate_id != video_id).then(|| RecommendationEntry::new(candidate_id, score))
		})
		.collect();

	if k < similar.len() {
		similar.select_nth_unstable_by(k - 1, rank_order);
		similar.truncate(k);
	}
	similar.sort_by(rank_order);

	Ok(RecommendationSet::new(video_id, similar))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::core::FusedEmbedding;

	fn index(corpus: &[(&str, &[f32])]) -> SimilarityIndex {
		let embeddings: Vec<FusedEmbedding> = corpus
			.iter()
			.map(|(id, v)| FusedEmbedding::from_values(*id, v.to_vec()).unwrap())
			.collect();
		SimilarityIndex::build(&embeddings).unwrap()
	}

	/// Deterministic pseudo-random vectors
	fn lcg_vectors(n: usize, dim: usize, seed: u64) -> Vec<(String, Vec<f32>)> {
		let mut x = seed;
		(0..n)
			.map(|i| {
				let values = (0..dim)
					.map(|_| {
						x = x.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
						((x >> 33) as f32) / (u32::MAX as f32) - 0.25
					})
					.collect();
				(format!("video-{:03}", i), values)
			})
			.collect()
	}

	#[test]
	fn scenario_three_videos() {
		let idx = index(&[("A", &[1.0, 0.0]), ("B", &[0.0, 1.0]), ("C", &[0.9, 0.1])]);
		let sets = recommend(&idx, 2).unwrap();

		let a = &sets["A"];
		assert_eq!(a.len(), 2);
		assert_eq!(a.similar[0].video_id, "C");
		assert!((a.similar[0].score - 0.994).abs() < 1e-3);
		assert_eq!(a.similar[1].video_id, "B");
		assert!(a.similar[1].score.abs() < 1e-6);
	}

	#[test]
	fn single_video_cohort_is_empty_not_error() {
		let idx = index(&[("solo", &[0.3, 0.7])]);
		let sets = recommend(&idx, 5).unwrap();
		assert_eq!(sets.len(), 1);
		assert!(sets["solo"].is_empty());
	}

	#[test]
	fn identical_embeddings_recommend_each_other() {
		let idx = index(&[("x", &[1.0, 0.0]), ("y", &[1.0, 0.0])]);
		let sets = recommend(&idx, 1).unwrap();

		assert_eq!(sets["x"].similar, vec![RecommendationEntry::new("y", 1.0)]);
		assert_eq!(sets["y"].similar, vec![RecommendationEntry::new("x", 1.0)]);
	}

	#[test]
	fn duplicates_rank_before_self_without_leaking_self() {
		// "b" and "c" duplicate "a"; every score ties at 1.0
		let idx = index(&[("a", &[0.0, 2.0]), ("b", &[0.0, 2.0]), ("c", &[0.0, 2.0])]);
		let sets = recommend(&idx, 2).unwrap();

		let ids: Vec<&str> = sets["c"].similar.iter().map(|e| e.video_id.as_str()).collect();
		assert_eq!(ids, ["a", "b"]);
		let ids: Vec<&str> = sets["b"].similar.iter().map(|e| e.video_id.as_str()).collect();
		assert_eq!(ids, ["a", "c"]);
	}

	#[test]
	fn ties_order_by_video_id_not_insertion_order() {
		let idx = index(&[("z", &[1.0, 0.0]), ("b", &[0.0, 1.0]), ("a", &[0.0, -1.0])]);

		let sets = recommend(&idx, 2).unwrap();
		let ids: Vec<&str> = sets["z"].similar.iter().map(|e| e.video_id.as_str()).collect();
		assert_eq!(ids, ["a", "b"]);
		assert!(sets["z"].similar.iter().all(|e| e.score == 0.0));

		let sets = recommend(&idx, 1).unwrap();
		assert_eq!(sets["z"].similar, vec![RecommendationEntry::new("a", 0.0)]);
		assert_eq!(sets["a"].similar, vec![RecommendationEntry::new("z", 0.0)]);
	}

	#[test]
	fn invariants_hold_on_unsorted_ids() {
		let corpus = lcg_vectors(30, 4, 3);
		let embeddings: Vec<FusedEmbedding> = corpus
			.iter()
			.rev()
			.map(|(id, v)| {
				// Coarse values force plenty of exact ties
				let coarse = v.iter().map(|x| (x * 2.0).round()).collect();
				FusedEmbedding::from_values(id.clone(), coarse).unwrap()
			})
			.filter(|e| !e.is_degenerate())
			.collect();
		let idx = SimilarityIndex::build(&embeddings).unwrap();

		for (video_id, set) in recommend(&idx, 5).unwrap() {
			assert!(!set.contains(&video_id));
			for pair in set.similar.windows(2) {
				assert!(pair[0].score >= pair[1].score);
				if pair[0].score == pair[1].score {
					assert!(pair[0].video_id < pair[1].video_id);
				}
			}
		}
	}

	#[test]
	fn invariants_hold_on_random_corpus() {
		let corpus = lcg_vectors(40, 16, 7);
		let embeddings: Vec<FusedEmbedding> = corpus
			.iter()
			.map(|(id, v)| FusedEmbedding::from_values(id.clone(), v.clone()).unwrap())
			.collect();
		let idx = SimilarityIndex::build(&embeddings).unwrap();

		for k in [0, 1, 5, 39, 100] {
			let sets = recommend(&idx, k).unwrap();
			assert_eq!(sets.len(), 40);

			for (video_id, set) in &sets {
				assert_eq!(set.len(), k.min(40 - 1));
				assert!(!set.contains(video_id), "{} recommends itself", video_id);

				for pair in set.similar.windows(2) {
					assert!(pair[0].score >= pair[1].score);
					if pair[0].score == pair[1].score {
						assert!(pair[0].video_id < pair[1].video_id);
					}
				}
			}
		}
	}

	#[test]
	fn output_is_reproducible() {
		let corpus = lcg_vectors(25, 8, 99);
		let embeddings: Vec<FusedEmbedding> = corpus
			.iter()
			.map(|(id, v)| FusedEmbedding::from_values(id.clone(), v.clone()).unwrap())
			.collect();
		let first = recommend(&SimilarityIndex::build(&embeddings).unwrap(), 4).unwrap();
		let second = recommend(&SimilarityIndex::build(&embeddings).unwrap(), 4).unwrap();
		assert_eq!(first, second);
	}

	#[test]
	fn recommend_for_single_video() {
		let idx = index(&[("A", &[1.0, 0.0]), ("B", &[0.0, 1.0]), ("C", &[0.9, 0.1])]);
		let set = recommend_for(&idx, "B", 1).unwrap().unwrap();
		assert_eq!(set.similar[0].video_id, "C");
		assert!(recommend_for(&idx, "missing", 1).unwrap().is_none());
	}
}
