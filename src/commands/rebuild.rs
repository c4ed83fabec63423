//! Rebuild command - recompute every cached recommendation set

use anyhow::{Context, Result};

use super::{open_cache, open_repository, print_header};
use crate::processing::rebuild_recommendations;
use crate::storage::EmbeddingRepository;
use crate::ui;

pub fn run(k: usize) -> Result<()> {
	print_header();

	let repository = open_repository()?;
	let cache = open_cache()?;
	ui::debug(&format!("Recommendations: {}", cache.dir().display()));

	let stored = repository.len().context("Failed to read stored embeddings")?;
	if stored == 0 {
		ui::warn("No embeddings stored yet, run `vidsim ingest` first");
		return Ok(());
	}

	ui::info(&format!("Rebuilding top-{} recommendations over {} videos", k, stored));
	let summary =
		rebuild_recommendations(&repository, &cache, k).context("Failed to read stored embeddings")?;

	for video_id in &summary.cache_failures {
		ui::error(&format!("{}: failed to write recommendations", video_id));
	}

	ui::summary(
		&[
			("Cohorts", summary.cohorts_built),
			("Videos", summary.processed),
			("Skipped", summary.skipped.len()),
			("Failed", summary.failed.len() + summary.cache_failures.len()),
		],
		summary.elapsed,
	);

	Ok(())
}
