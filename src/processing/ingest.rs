//! Per-video extraction and fusion worker pool

use rayon::prelude::*;
use std::time::{Duration, Instant};

use super::fusion::fuse;
use crate::error::VidsimError;
use crate::extract::{FeatureExtractionAdapter, FeatureExtractor, MediaSource};
use crate::storage::EmbeddingRepository;
use crate::ui;

#[derive(Debug, Clone, PartialEq)]
enum Outcome {
	Processed,
	Unchanged,
	Incomplete,
	Failed(String),
}

#[derive(Debug, Default)]
pub struct IngestSummary {
	pub processed: usize,
	/// Stored embedding already fused from identical input
	pub unchanged: usize,
	/// Videos with no usable modality
	pub incomplete: Vec<String>,
	/// Videos whose media or storage failed, with the reason
	pub failed: Vec<(String, String)>,
	pub elapsed: Duration,
}

impl IngestSummary {
	pub fn total(&self) -> usize {
		self.processed + self.unchanged + self.incomplete.len() + self.failed.len()
	}
}

/// Extract, fuse and store every source, one worker per video.
///
/// A failing video never aborts the batch; it is logged and accounted for
/// in the summary.
pub fn ingest<E: FeatureExtractor>(
	sources: &[MediaSource],
	adapter: &FeatureExtractionAdapter<E>,
	repository: &dyn EmbeddingRepository,
	force: bool,
) -> IngestSummary {
	let start = Instant::now();

	let outcomes: Vec<(String, Outcome)> = sources
		.par_iter()
		.map(|source| {
			let outcome = ingest_one(source, adapter, repository, force);
			(source.video_id.clone(), outcome)
		})
		.collect();

	let mut summary = IngestSummary::default();
	for (video_id, outcome) in outcomes {
		match outcome {
			Outcome::Processed => summary.processed += 1,
			Outcome::Unchanged => summary.unchanged += 1,
			Outcome::Incomplete => summary.incomplete.push(video_id),
			Outcome::Failed(reason) => summary.failed.push((video_id, reason)),
		}
	}
	summary.elapsed = start.elapsed();
	summary
}

fn ingest_one<E: FeatureExtractor>(
	source: &MediaSource,
	adapter: &FeatureExtractionAdapter<E>,
	repository: &dyn EmbeddingRepository,
	force: bool,
) -> Outcome {
	let video_id = source.video_id.as_str();
	let source_hash = adapter.source_hash(source);

	if !force {
		match repository.get(video_id) {
			Ok(Some(existing)) if existing.source_hash() == Some(source_hash.as_str()) => {
				ui::debug(&format!("{}: unchanged", video_id));
				return Outcome::Unchanged;
			}
			Ok(_) => {}
			Err(e) => ui::debug(&format!("{}: could not read stored embedding: {}", video_id, e)),
		}
	}

	let triple = match adapter.extract(source) {
		Ok(triple) => triple,
		Err(e) => {
			ui::error(&format!("{}: {:#}", video_id, e));
			return Outcome::Failed(format!("{:#}", e));
		}
	};

	let embedding = match fuse(video_id, &triple.visual, &triple.audio, &triple.text) {
		Ok(embedding) => embedding.with_source_hash(source_hash.as_str()),
		Err(e @ VidsimError::IncompleteInput { .. }) => {
			ui::warn(&e.to_string());
			return Outcome::Incomplete;
		}
		Err(e) => {
			ui::error(&format!("{}: {}", video_id, e));
			return Outcome::Failed(e.to_string());
		}
	};

	let dimension = embedding.dimension();
	match repository.put(embedding) {
		Ok(()) => {
			ui::debug(&format!("{}: stored {}D embedding", video_id, dimension));
			Outcome::Processed
		}
		Err(e) => {
			ui::error(&format!("{}: {}", video_id, e));
			Outcome::Failed(e.to_string())
		}
	}
}
