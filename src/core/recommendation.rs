//! Recommendation records written to the cache

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationEntry {
	pub video_id: String,
	pub score: f32,
}

impl RecommendationEntry {
	pub fn new(video_id: impl Into<String>, score: f32) -> Self {
		Self {
			video_id: video_id.into(),
			score,
		}
	}
}

/// Similar videos for one video, best first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationSet {
	pub video_id: String,
	pub similar: Vec<RecommendationEntry>,
}

impl RecommendationSet {
	pub fn new(video_id: impl Into<String>, similar: Vec<RecommendationEntry>) -> Self {
		Self {
			video_id: video_id.into(),
			similar,
		}
	}

	pub fn len(&self) -> usize {
		self.similar.len()
	}

	pub fn is_empty(&self) -> bool {
		self.similar.is_empty()
	}

	pub fn contains(&self, video_id: &str) -> bool {
		self.similar.iter().any(|e| e.video_id == video_id)
	}
}

/// Descending score, then ascending video id
pub fn rank_order(a: &RecommendationEntry, b: &RecommendationEntry) -> Ordering {
	b.score
		.total_cmp(&a.score)
		.then_with(|| a.video_id.cmp(&b.video_id))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rank_order_breaks_ties_by_id() {
		let mut entries = vec![
			RecommendationEntry::new("c", 0.5),
			RecommendationEntry::new("b", 0.9),
			RecommendationEntry::new("a", 0.5),
		];
		entries.sort_by(rank_order);

		let ids: Vec<&str> = entries.iter().map(|e| e.video_id.as_str()).collect();
		assert_eq!(ids, ["b", "a", "c"]);
	}

	#[test]
	fn serializes_with_camel_case_keys() {
		let set = RecommendationSet::new("v1", vec![RecommendationEntry::new("v2", 0.25)]);
		let json = serde_json::to_value(&set).unwrap();
		assert_eq!(json["videoId"], "v1");
		assert_eq!(json["similar"][0]["videoId"], "v2");
		assert_eq!(json["similar"][0]["score"], 0.25);
	}
}
