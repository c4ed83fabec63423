//! Embedding and recommendation storage
//!
//! Both stores are keyed by video id and replace records wholesale.

pub mod embeddings;
pub mod memory;
pub mod recommendations;

pub use embeddings::FileEmbeddingRepository;
pub use memory::{MemoryEmbeddingRepository, MemoryRecommendationCache};
pub use recommendations::FileRecommendationCache;

use crate::core::{FusedEmbedding, RecommendationSet};
use crate::error::Result;

/// Durable home of fused embeddings
pub trait EmbeddingRepository: Send + Sync {
	/// Store under the embedding's video id, replacing any prior record
	fn put(&self, embedding: FusedEmbedding) -> Result<()>;

	fn get(&self, video_id: &str) -> Result<Option<FusedEmbedding>>;

	/// Every stored embedding, ordered by video id
	fn list_all(&self) -> Result<Vec<FusedEmbedding>>;

	/// Number of stored embeddings
	fn len(&self) -> Result<usize> {
		Ok(self.list_all()?.len())
	}
}

/// Per-video recommendation lists
pub trait RecommendationCache: Send + Sync {
	/// Idempotent overwrite of one video's set
	fn put(&self, set: &RecommendationSet) -> Result<()>;

	fn get(&self, video_id: &str) -> Result<Option<RecommendationSet>>;
}

/// Write through a temporary file so readers never see a partial record
pub(crate) fn write_atomic(path: &std::path::Path, bytes: &[u8]) -> Result<()> {
	let tmp = path.with_extension("tmp");
	std::fs::write(&tmp, bytes)?;
	std::fs::rename(&tmp, path)?;
	Ok(())
}
