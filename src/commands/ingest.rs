//! Ingest command - fuse feature manifests into embeddings

use anyhow::Result;
use std::path::Path;

use super::{open_repository, print_header};
use crate::config::{AUDIO_DIM, TEXT_DIM, VISUAL_DIM};
use crate::core::Modality;
use crate::extract::{FeatureExtractionAdapter, ManifestExtractor};
use crate::processing::{ingest, scan_manifests};
use crate::ui;

pub fn run(dir: &Path, recursive: bool, force: bool, strict: bool) -> Result<()> {
	print_header();

	let repository = open_repository()?;
	ui::debug(&format!("Embeddings: {}", repository.dir().display()));

	ui::info(&format!("Scanning: {}", ui::path_link(dir, 60)));
	let scan = scan_manifests(dir, recursive);

	if scan.duplicates > 0 {
		ui::warn(&format!("{} duplicate video ids ignored", scan.duplicates));
	}
	if scan.errors > 0 {
		ui::warn(&format!("{} errors during scan", scan.errors));
	}
	if scan.sources.is_empty() {
		ui::info("No feature manifests found");
		return Ok(());
	}
	ui::success(&format!("Found {} manifests", scan.sources.len()));

	let mut adapter = FeatureExtractionAdapter::new(ManifestExtractor::new());
	if strict {
		adapter = adapter
			.with_expected_dimension(Modality::Visual, VISUAL_DIM)
			.with_expected_dimension(Modality::Audio, AUDIO_DIM)
			.with_expected_dimension(Modality::Text, TEXT_DIM);
	}

	let summary = ingest(&scan.sources, &adapter, &repository, force);

	ui::summary(
		&[
			("Processed", summary.processed),
			("Unchanged", summary.unchanged),
			("Incomplete", summary.incomplete.len()),
			("Failed", summary.failed.len()),
		],
		summary.elapsed,
	);

	if summary.processed > 0 {
		ui::info("Run `vidsim rebuild` to refresh recommendations");
	}

	Ok(())
}
