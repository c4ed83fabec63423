//! Full recommendation rebuild

use rayon::prelude::*;
use std::time::{Duration, Instant};

use super::cohort::{group_by_dimension, Cohort};
use super::recommend::recommend;
use super::SimilarityIndex;
use crate::error::{Result, VidsimError};
use crate::storage::{EmbeddingRepository, RecommendationCache};
use crate::ui;

#[derive(Debug, Default)]
pub struct BatchSummary {
	pub cohorts_built: usize,
	/// Cohorts with no usable embeddings left
	pub cohorts_skipped: usize,
	/// Videos whose recommendation set was written
	pub processed: usize,
	/// Zero-norm embeddings left out of their cohort
	pub skipped: Vec<String>,
	/// Videos in cohorts whose index build failed
	pub failed: Vec<String>,
	/// Videos whose set could not be written
	pub cache_failures: Vec<String>,
	pub elapsed: Duration,
}

/// Snapshot the repository, build one index per cohort and overwrite the
/// cached set of every indexed video.
///
/// Only a failure to read the repository aborts the run. Sets already
/// written stay valid if the run stops early.
pub fn rebuild_recommendations(
	repository: &dyn EmbeddingRepository,
	cache: &dyn RecommendationCache,
	k: usize,
) -> Result<BatchSummary> {
	let start = Instant::now();
	let mut summary = BatchSummary::default();

	let embeddings = repository.list_all()?;
	ui::debug(&format!("Loaded {} embeddings", embeddings.len()));

	for cohort in group_by_dimension(embeddings) {
		rebuild_cohort(cohort, cache, k, &mut summary);
	}

	summary.elapsed = start.elapsed();
	Ok(summary)
}

fn rebuild_cohort(cohort: Cohort, cache: &dyn RecommendationCache, k: usize, summary: &mut BatchSummary) {
	let Cohort { key, members } = cohort;

	let (degenerate, usable): (Vec<_>, Vec<_>) = members.into_iter().partition(|e| e.is_degenerate());
	for embedding in degenerate {
		let video_id = embedding.video_id().to_string();
		ui::warn(&VidsimError::DegenerateVector { video_id: video_id.clone() }.to_string());
		summary.skipped.push(video_id);
	}

	let index = match SimilarityIndex::build(&usable) {
		Ok(index) => index,
		Err(VidsimError::EmptyCorpus) => {
			ui::warn(&format!("Cohort {}: no usable embeddings, skipped", key));
			summary.cohorts_skipped += 1;
			return;
		}
		Err(e) => {
			ui::error(&format!("Cohort {}: {}", key, e));
			summary.failed.extend(usable.iter().map(|m| m.video_id().to_string()));
			return;
		}
	};

	let sets = match recommend(&index, k) {
		Ok(sets) => sets,
		Err(e) => {
			ui::error(&format!("Cohort {}: {}", key, e));
			summary.failed.extend(usable.iter().map(|m| m.video_id().to_string()));
			return;
		}
	};

	let failures: Vec<String> = sets
		.par_iter()
		.filter_map(|(video_id, set)| match cache.put(set) {
			Ok(()) => None,
			Err(e) => {
				ui::error(&format!("{}: failed to cache recommendations: {}", video_id, e));
				Some(video_id.clone())
			}
		})
		.collect();

	ui::debug(&format!("Cohort {}: {} videos indexed", key, index.len()));

	summary.cohorts_built += 1;
	summary.processed += sets.len() - failures.len();
	summary.cache_failures.extend(failures);
}
