//! MessagePack embedding files, one per video

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{write_atomic, EmbeddingRepository};
use crate::config::EMBEDDING_EXT;
use crate::core::{ContentHash, FusedEmbedding};
use crate::error::{Result, VidsimError};
use crate::ui;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Serialize, Deserialize)]
struct StoredEmbedding {
	version: String,
	embedding: FusedEmbedding,
}

/// File-backed repository rooted at one directory
#[derive(Debug, Clone)]
pub struct FileEmbeddingRepository {
	dir: PathBuf,
}

impl FileEmbeddingRepository {
	pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
		let dir = dir.into();
		fs::create_dir_all(&dir)?;
		Ok(Self { dir })
	}

	pub fn dir(&self) -> &Path {
		&self.dir
	}

	fn path_for(&self, video_id: &str) -> PathBuf {
		self.dir
			.join(format!("{}.{}", ContentHash::of_str(video_id), EMBEDDING_EXT))
	}
}

fn load(path: &Path) -> Result<FusedEmbedding> {
	let bytes = fs::read(path)?;
	let stored: StoredEmbedding =
		rmp_serde::from_slice(&bytes).map_err(|e| VidsimError::Serialization(e.to_string()))?;

	if stored.version != VERSION {
		ui::debug(&format!(
			"{} was written by v{}",
			stored.embedding.video_id(),
			stored.version
		));
	}

	stored.embedding.validate()?;
	Ok(stored.embedding)
}

impl EmbeddingRepository for FileEmbeddingRepository {
	fn put(&self, embedding: FusedEmbedding) -> Result<()> {
		let path = self.path_for(embedding.video_id());
		let stored = StoredEmbedding {
			version: VERSION.to_string(),
			embedding,
		};
		let bytes =
			rmp_serde::to_vec_named(&stored).map_err(|e| VidsimError::Serialization(e.to_string()))?;
		write_atomic(&path, &bytes)
	}

	fn get(&self, video_id: &str) -> Result<Option<FusedEmbedding>> {
		match load(&self.path_for(video_id)) {
			Ok(embedding) if embedding.video_id() == video_id => Ok(Some(embedding)),
			Ok(_) => Ok(None),
			Err(VidsimError::Storage(e)) if e.kind() == ErrorKind::NotFound => Ok(None),
			Err(e) => Err(e),
		}
	}

	fn list_all(&self) -> Result<Vec<FusedEmbedding>> {
		let mut embeddings = Vec::new();

		for entry in fs::read_dir(&self.dir)?.filter_map(|e| e.ok()) {
			let path = entry.path();
			if path.extension().and_then(|s| s.to_str()) != Some(EMBEDDING_EXT) {
				continue;
			}

			match load(&path) {
				Ok(embedding) => embeddings.push(embedding),
				Err(e) => ui::warn(&format!("Skipping unreadable embedding {}: {}", path.display(), e)),
			}
		}

		embeddings.sort_by(|a, b| a.video_id().cmp(b.video_id()));
		Ok(embeddings)
	}

}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::core::{Modality, Segment};

	fn sample(video_id: &str) -> FusedEmbedding {
		FusedEmbedding::new(
			video_id,
			vec![
				Segment { modality: Modality::Visual, dimension: 3 },
				Segment { modality: Modality::Text, dimension: 2 },
			],
			vec![0.1, -0.333_333_34, 1.0e-7, f32::MIN_POSITIVE, 12345.678],
		)
		.unwrap()
		.with_source_hash("0123456789abcdef")
	}

	#[test]
	fn round_trip_is_exact() {
		let dir = tempfile::tempdir().unwrap();
		let repo = FileEmbeddingRepository::open(dir.path()).unwrap();

		let written = sample("clip/with:odd chars");
		repo.put(written.clone()).unwrap();

		let read = repo.get("clip/with:odd chars").unwrap().unwrap();
		assert_eq!(read, written);
		let bits = |e: &FusedEmbedding| e.values().iter().map(|v| v.to_bits()).collect::<Vec<_>>();
		assert_eq!(bits(&read), bits(&written));

		assert_eq!(repo.list_all().unwrap(), vec![written]);
	}

	#[test]
	fn put_replaces_wholesale() {
		let dir = tempfile::tempdir().unwrap();
		let repo = FileEmbeddingRepository::open(dir.path()).unwrap();

		repo.put(sample("v")).unwrap();
		let replacement = FusedEmbedding::from_values("v", vec![9.0]).unwrap();
		repo.put(replacement.clone()).unwrap();

		assert_eq!(repo.get("v").unwrap(), Some(replacement));
		assert_eq!(repo.len().unwrap(), 1);
	}

	#[test]
	fn missing_video_is_none() {
		let dir = tempfile::tempdir().unwrap();
		let repo = FileEmbeddingRepository::open(dir.path()).unwrap();
		assert!(repo.get("nope").unwrap().is_none());
	}

	#[test]
	fn corrupt_files_are_skipped_in_listing() {
		let dir = tempfile::tempdir().unwrap();
		let repo = FileEmbeddingRepository::open(dir.path()).unwrap();
		repo.put(sample("b")).unwrap();
		repo.put(sample("a")).unwrap();
		fs::write(dir.path().join(format!("garbage.{}", EMBEDDING_EXT)), b"\xc1\xc1").unwrap();

		let ids: Vec<String> = repo
			.list_all()
			.unwrap()
			.iter()
			.map(|e| e.video_id().to_string())
			.collect();
		assert_eq!(ids, ["a", "b"]);
		assert_eq!(repo.len().unwrap(), 2);
	}
}
