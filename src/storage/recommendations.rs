//! JSON recommendation documents, one per video

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{write_atomic, RecommendationCache};
use crate::config::RECOMMENDATION_EXT;
use crate::core::{ContentHash, RecommendationSet};
use crate::error::{Result, VidsimError};

/// File-backed cache rooted at one directory.
///
/// Documents have the shape `{ "videoId", "similar": [{ "videoId", "score" }] }`.
#[derive(Debug, Clone)]
pub struct FileRecommendationCache {
	dir: PathBuf,
}

impl FileRecommendationCache {
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
			.join(format!("{}.{}", ContentHash::of_str(video_id), RECOMMENDATION_EXT))
	}
}

impl RecommendationCache for FileRecommendationCache {
	fn put(&self, set: &RecommendationSet) -> Result<()> {
		let json =
			serde_json::to_vec_pretty(set).map_err(|e| VidsimError::Serialization(e.to_string()))?;
		write_atomic(&self.path_for(&set.video_id), &json)
	}

	fn get(&self, video_id: &str) -> Result<Option<RecommendationSet>> {
		let bytes = match fs::read(self.path_for(video_id)) {
			Ok(bytes) => bytes,
			Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
			Err(e) => return Err(e.into()),
		};

		let set: RecommendationSet =
			serde_json::from_slice(&bytes).map_err(|e| VidsimError::Serialization(e.to_string()))?;

		Ok((set.video_id == video_id).then_some(set))
	}
}
