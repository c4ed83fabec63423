//! Application configuration and constants

use std::path::PathBuf;
use std::sync::OnceLock;

static CUSTOM_DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

// === Modality Contracts ===
/// Frame-level CLIP image features, mean-pooled per video
pub const VISUAL_DIM: usize = 512;
/// MFCC coefficients, averaged over time
pub const AUDIO_DIM: usize = 40;
/// Sentence encoder output (all-MiniLM-L6-v2)
pub const TEXT_DIM: usize = 384;

// === Recommendations ===
pub const DEFAULT_TOP_K: usize = 10;
pub const DEFAULT_FEED_SIZE: usize = 12;

// === Storage ===
pub const DATA_DIR: &str = ".vidsim";
pub const DATA_DIR_ENV: &str = "VIDSIM_DATA_DIR";
pub const EMBEDDINGS_DIR: &str = "embeddings";
pub const EMBEDDING_EXT: &str = "msgpack";
pub const RECOMMENDATIONS_DIR: &str = "recommendations";
pub const RECOMMENDATION_EXT: &str = "json";
pub const MANIFEST_SUFFIX: &str = ".features.json";

pub fn set_data_dir(path: PathBuf) {
	let _ = CUSTOM_DATA_DIR.set(path);
}

/// Data directory (--data-dir, then VIDSIM_DATA_DIR, then ./.vidsim)
pub fn data_dir() -> PathBuf {
	if let Some(custom) = CUSTOM_DATA_DIR.get() {
		crate::ui::debug(&format!("Using custom data dir: {}", custom.display()));
		return custom.clone();
	}

	if let Ok(env_path) = std::env::var(DATA_DIR_ENV) {
		if !env_path.trim().is_empty() {
			crate::ui::debug(&format!("Using {}: {}", DATA_DIR_ENV, env_path));
			return PathBuf::from(env_path);
		}
	}

	PathBuf::from(DATA_DIR)
}

pub fn embeddings_dir() -> PathBuf {
	data_dir().join(EMBEDDINGS_DIR)
}

pub fn recommendations_dir() -> PathBuf {
	data_dir().join(RECOMMENDATIONS_DIR)
}
