//! Precomputed feature manifests
//!
//! External tooling (frame encoder, MFCC analysis, sentence encoder) writes
//! one `<videoId>.features.json` per video. This extractor pools the
//! frame-level and time-series features down to one vector per modality.

use anyhow::{Context, Result};
use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};
use std::fs;

use super::{FeatureExtractor, MediaSource};
use crate::core::{Modality, ModalityVector};

/// On-disk manifest layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureManifest {
	/// One image embedding per sampled frame
	#[serde(default)]
	pub frames: Vec<Vec<f32>>,
	/// MFCC matrix, one row per coefficient, one column per time frame
	#[serde(default)]
	pub mfcc: Vec<Vec<f32>>,
	/// Sentence embedding of title, description and transcript
	#[serde(default)]
	pub text: Vec<f32>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ManifestExtractor;

impl ManifestExtractor {
	pub fn new() -> Self {
		Self
	}
}

impl FeatureExtractor for ManifestExtractor {
	type Media = FeatureManifest;

	fn open(&self, source: &MediaSource) -> Result<FeatureManifest> {
		let bytes = fs::read(&source.path)
			.with_context(|| format!("Failed to read manifest {}", source.path.display()))?;
		serde_json::from_slice(&bytes)
			.with_context(|| format!("Failed to parse manifest {}", source.path.display()))
	}

	fn visual(&self, media: &FeatureManifest) -> Result<ModalityVector> {
		if media.frames.is_empty() {
			return Ok(ModalityVector::empty(Modality::Visual));
		}
		let pooled = stack(&media.frames)
			.context("Frame embeddings have inconsistent lengths")?
			.mean_axis(Axis(0))
			.context("No frame embeddings to pool")?;
		Ok(ModalityVector::new(Modality::Visual, pooled.to_vec()))
	}

	fn audio(&self, media: &FeatureManifest) -> Result<ModalityVector> {
		if media.mfcc.is_empty() {
			return Ok(ModalityVector::empty(Modality::Audio));
		}
		let pooled = stack(&media.mfcc)
			.context("MFCC rows have inconsistent lengths")?
			.mean_axis(Axis(1))
			.context("MFCC matrix has no time frames")?;
		Ok(ModalityVector::new(Modality::Audio, pooled.to_vec()))
	}

	fn text(&self, media: &FeatureManifest) -> Result<ModalityVector> {
		Ok(ModalityVector::new(Modality::Text, media.text.clone()))
	}
}

/// Dense matrix from equal-length rows
fn stack(rows: &[Vec<f32>]) -> Result<Array2<f32>> {
	let width = rows.first().map(Vec::len).unwrap_or(0);
	if let Some(bad) = rows.iter().position(|r| r.len() != width) {
		anyhow::bail!("row {} has {} values, expected {}", bad, rows[bad].len(), width);
	}
	let flat: Vec<f32> = rows.iter().flatten().copied().collect();
	Ok(Array2::from_shape_vec((rows.len(), width), flat)?)
}
