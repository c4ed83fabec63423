//! # Feature Extraction
//!
//! Boundary to the per-modality feature extractors. Extractors are injected
//! instances with an explicit lifecycle: construct once, reuse for every
//! video.

pub mod manifest;

pub use manifest::{FeatureManifest, ManifestExtractor};

use anyhow::Result;
use std::path::PathBuf;

use crate::core::{ContentHash, Modality, ModalityVector};
use crate::ui;

/// Handle to one video's raw media
#[derive(Debug, Clone)]
pub struct MediaSource {
	pub video_id: String,
	pub path: PathBuf,
	pub hash: ContentHash,
}

/// Produces modality vectors for a video.
///
/// `open` decodes the media once; a failure there means the whole video is
/// unusable. The per-modality functions may fail independently.
pub trait FeatureExtractor: Send + Sync {
	type Media;

	fn open(&self, source: &MediaSource) -> Result<Self::Media>;
	fn visual(&self, media: &Self::Media) -> Result<ModalityVector>;
	fn audio(&self, media: &Self::Media) -> Result<ModalityVector>;
	fn text(&self, media: &Self::Media) -> Result<ModalityVector>;
}

/// The three modality vectors for one video, in fusion order
#[derive(Debug, Clone)]
pub struct ModalityTriple {
	pub visual: ModalityVector,
	pub audio: ModalityVector,
	pub text: ModalityVector,
}

/// Wraps an extractor so that a failing modality yields an empty vector
pub struct FeatureExtractionAdapter<E> {
	extractor: E,
	expected: Vec<(Modality, usize)>,
}

impl<E: FeatureExtractor> FeatureExtractionAdapter<E> {
	pub fn new(extractor: E) -> Self {
		Self {
			extractor,
			expected: Vec::new(),
		}
	}

	/// Enforce a fixed output dimension for one modality
	pub fn with_expected_dimension(mut self, modality: Modality, dimension: usize) -> Self {
		self.expected.retain(|(m, _)| *m != modality);
		self.expected.push((modality, dimension));
		self
	}

	/// Source hash recorded on embeddings fused through this adapter.
	///
	/// Dimension contracts change which vectors survive extraction, so they
	/// are part of the hash; without contracts the content hash is used as is.
	pub fn source_hash(&self, source: &MediaSource) -> ContentHash {
		if self.expected.is_empty() {
			return source.hash.clone();
		}
		let mut contract = self.expected.clone();
		contract.sort();
		let tag: Vec<String> = contract.iter().map(|(m, d)| format!("{}:{}", m, d)).collect();
		ContentHash::of_str(&format!("{}|{}", source.hash, tag.join(",")))
	}

	pub fn extract(&self, source: &MediaSource) -> Result<ModalityTriple> {
		let media = self.extractor.open(source)?;

		Ok(ModalityTriple {
			visual: self.guard(source, Modality::Visual, self.extractor.visual(&media)),
			audio: self.guard(source, Modality::Audio, self.extractor.audio(&media)),
			text: self.guard(source, Modality::Text, self.extractor.text(&media)),
		})
	}

	fn guard(&self, source: &MediaSource, modality: Modality, result: Result<ModalityVector>) -> ModalityVector {
		let checked = result.and_then(|vector| {
			if vector.modality() != modality {
				anyhow::bail!("extractor returned a {} vector", vector.modality());
			}
			match self.expected.iter().find(|(m, _)| *m == modality) {
				Some(&(_, dimension)) => Ok(vector.expect_dimension(dimension)?),
				None => Ok(vector),
			}
		});

		match checked {
			Ok(vector) => {
				if vector.is_empty() {
					ui::debug(&format!("{}: no {} signal", source.video_id, modality));
				}
				vector
			}
			Err(e) => {
				ui::warn(&format!("{}: {} extraction failed: {:#}", source.video_id, modality, e));
				ModalityVector::empty(modality)
			}
		}
	}
}
