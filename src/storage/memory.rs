//! In-process stores

use parking_lot::RwLock;
use std::collections::BTreeMap;

use super::{EmbeddingRepository, RecommendationCache};
use crate::core::{FusedEmbedding, RecommendationSet};
use crate::error::Result;

#[derive(Debug, Default)]
pub struct MemoryEmbeddingRepository {
	records: RwLock<BTreeMap<String, FusedEmbedding>>,
}

impl MemoryEmbeddingRepository {
	pub fn new() -> Self {
		Self::default()
	}
}

impl EmbeddingRepository for MemoryEmbeddingRepository {
	fn put(&self, embedding: FusedEmbedding) -> Result<()> {
		self.records
			.write()
			.insert(embedding.video_id().to_string(), embedding);
		Ok(())
	}

	fn get(&self, video_id: &str) -> Result<Option<FusedEmbedding>> {
		Ok(self.records.read().get(video_id).cloned())
	}

	fn list_all(&self) -> Result<Vec<FusedEmbedding>> {
		Ok(self.records.read().values().cloned().collect())
	}

	fn len(&self) -> Result<usize> {
		Ok(self.records.read().len())
	}
}

#[derive(Debug, Default)]
pub struct MemoryRecommendationCache {
	sets: RwLock<BTreeMap<String, RecommendationSet>>,
}

impl MemoryRecommendationCache {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.sets.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.sets.read().is_empty()
	}
}

impl RecommendationCache for MemoryRecommendationCache {
	fn put(&self, set: &RecommendationSet) -> Result<()> {
		self.sets.write().insert(set.video_id.clone(), set.clone());
		Ok(())
	}

	fn get(&self, video_id: &str) -> Result<Option<RecommendationSet>> {
		Ok(self.sets.read().get(video_id).cloned())
	}
}
