//! Personalized feed from a watch history

use std::collections::HashMap;

use crate::core::{rank_order, RecommendationEntry};
use crate::error::Result;
use crate::storage::RecommendationCache;
use crate::ui;

/// Merge the cached sets of every watched video.
///
/// Candidate scores are summed across the history, so videos similar to
/// several watched videos rise to the top. Watched videos without a cached
/// set contribute nothing.
pub fn aggregate_feed(
	cache: &dyn RecommendationCache,
	history: &[String],
	limit: usize,
) -> Result<Vec<RecommendationEntry>> {
	let mut totals: HashMap<String, f32> = HashMap::new();

	for watched in history {
		let Some(set) = cache.get(watched)? else {
			ui::debug(&format!("{}: no cached recommendations", watched));
			continue;
		};

		for entry in set.similar {
			*totals.entry(entry.video_id).or_insert(0.0) += entry.score;
		}
	}

	let mut feed: Vec<RecommendationEntry> = totals
		.into_iter()
		.map(|(video_id, score)| RecommendationEntry::new(video_id, score))
		.collect();

	feed.sort_by(rank_order);
	feed.truncate(limit);
	Ok(feed)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::core::RecommendationSet;
	use crate::storage::MemoryRecommendationCache;

	fn cache() -> MemoryRecommendationCache {
		let cache = MemoryRecommendationCache::new();
		cache
			.put(&RecommendationSet::new(
				"w1",
				vec![RecommendationEntry::new("x", 0.5), RecommendationEntry::new("y", 0.4)],
			))
			.unwrap();
		cache
			.put(&RecommendationSet::new(
				"w2",
				vec![RecommendationEntry::new("y", 0.5), RecommendationEntry::new("z", 0.5)],
			))
			.unwrap();
		cache
	}

	#[test]
	fn scores_accumulate_across_history() {
		let history = vec!["w1".to_string(), "w2".to_string()];
		let feed = aggregate_feed(&cache(), &history, 12).unwrap();

		let ids: Vec<&str> = feed.iter().map(|e| e.video_id.as_str()).collect();
		assert_eq!(ids, ["y", "x", "z"]);
		assert!((feed[0].score - 0.9).abs() < 1e-6);
	}

	#[test]
	fn missing_history_entries_are_ignored() {
		let history = vec!["unknown".to_string(), "w2".to_string()];
		let feed = aggregate_feed(&cache(), &history, 1).unwrap();
		assert_eq!(feed, vec![RecommendationEntry::new("y", 0.5)]);
	}

	#[test]
	fn empty_history_gives_empty_feed() {
		assert!(aggregate_feed(&cache(), &[], 12).unwrap().is_empty());
	}
}
