//! Fused embedding records

use serde::{Deserialize, Serialize};

use super::Modality;
use crate::error::{Result, VidsimError};

/// One modality's slice of a fused vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Segment {
	pub modality: Modality,
	pub dimension: usize,
}

/// Concatenated modality vectors for one video.
///
/// Immutable once built. Re-ingesting a video replaces the whole record.
/// `segments` records which modalities were present and in what order, so
/// partial embeddings are only ever compared against the same layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FusedEmbedding {
	video_id: String,
	dimension: usize,
	segments: Vec<Segment>,
	values: Vec<f32>,
	#[serde(default)]
	source_hash: Option<String>,
}

impl FusedEmbedding {
	/// Build from a modality layout and the concatenated values
	pub fn new(video_id: impl Into<String>, segments: Vec<Segment>, values: Vec<f32>) -> Result<Self> {
		let embedding = Self {
			video_id: video_id.into(),
			dimension: values.len(),
			segments,
			values,
			source_hash: None,
		};
		embedding.validate()?;
		Ok(embedding)
	}

	/// Embedding with no recorded modality layout (imported vectors)
	pub fn from_values(video_id: impl Into<String>, values: Vec<f32>) -> Result<Self> {
		Self::new(video_id, Vec::new(), values)
	}

	/// Tag with the content hash of the input it was fused from
	pub fn with_source_hash(mut self, hash: impl Into<String>) -> Self {
		self.source_hash = Some(hash.into());
		self
	}

	/// Check shape invariants, used after deserialization
	pub fn validate(&self) -> Result<()> {
		if self.values.is_empty() {
			return Err(VidsimError::IncompleteInput {
				video_id: self.video_id.clone(),
			});
		}

		if self.dimension != self.values.len() {
			return Err(VidsimError::DimensionMismatch {
				video_id: self.video_id.clone(),
				expected: self.dimension,
				actual: self.values.len(),
			});
		}

		if !self.segments.is_empty() {
			let laid_out: usize = self.segments.iter().map(|s| s.dimension).sum();
			if laid_out != self.dimension {
				return Err(VidsimError::DimensionMismatch {
					video_id: self.video_id.clone(),
					expected: laid_out,
					actual: self.dimension,
				});
			}
		}

		Ok(())
	}

	pub fn video_id(&self) -> &str {
		&self.video_id
	}

	pub fn dimension(&self) -> usize {
		self.dimension
	}

	pub fn segments(&self) -> &[Segment] {
		&self.segments
	}

	pub fn values(&self) -> &[f32] {
		&self.values
	}

	pub fn source_hash(&self) -> Option<&str> {
		self.source_hash.as_deref()
	}

	pub fn has_modality(&self, modality: Modality) -> bool {
		self.segments.iter().any(|s| s.modality == modality)
	}

	/// L2 norm of the raw values
	pub fn norm(&self) -> f32 {
		self.values.iter().map(|x| x * x).sum::<f32>().sqrt()
	}

	/// True when the vector cannot be normalized
	pub fn is_degenerate(&self) -> bool {
		is_degenerate_norm(self.norm())
	}
}

/// Zero, NaN and infinite norms cannot produce a unit vector
pub(crate) fn is_degenerate_norm(norm: f32) -> bool {
	!(norm.is_finite() && norm > 0.0)
}
