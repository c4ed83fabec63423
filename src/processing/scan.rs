//! Directory scanning for feature manifests

use std::collections::HashSet;
use std::path::Path;
use walkdir::WalkDir;

use crate::config::{DATA_DIR, MANIFEST_SUFFIX};
use crate::core::ContentHash;
use crate::extract::MediaSource;
use crate::ui;

pub struct ScanResult {
	pub sources: Vec<MediaSource>,
	pub duplicates: usize,
	pub errors: usize,
}

/// Find `<videoId>.features.json` files under `root`.
///
/// Paths are visited in name order; when two manifests share a video id the
/// first one wins.
pub fn scan_manifests(root: &Path, recursive: bool) -> ScanResult {
	let mut sources = Vec::new();
	let mut seen = HashSet::new();
	let mut duplicates = 0;
	let mut errors = 0;

	let walker = WalkDir::new(root)
		.max_depth(if recursive { usize::MAX } else { 1 })
		.sort_by_file_name()
		.into_iter()
		.filter_entry(|e| e.depth() == 0 || e.file_name() != DATA_DIR);

	for entry in walker {
		let entry = match entry {
			Ok(entry) => entry,
			Err(e) => {
				ui::debug(&format!("Scan error: {}", e));
				errors += 1;
				continue;
			}
		};

		if !entry.file_type().is_file() {
			continue;
		}

		let Some(video_id) = video_id_for(entry.path()) else {
			continue;
		};

		if !seen.insert(video_id.clone()) {
			ui::warn(&format!("Duplicate manifest for {}: {}", video_id, entry.path().display()));
			duplicates += 1;
			continue;
		}

		let hash = match ContentHash::compute(entry.path()) {
			Ok(hash) => hash,
			Err(e) => {
				ui::warn(&format!("Failed to hash {}: {}", entry.path().display(), e));
				errors += 1;
				continue;
			}
		};

		ui::debug(&format!("Found {} -> {}", video_id, hash.short()));

		sources.push(MediaSource {
			video_id,
			path: entry.path().to_path_buf(),
			hash,
		});
	}

	ScanResult {
		sources,
		duplicates,
		errors,
	}
}

fn video_id_for(path: &Path) -> Option<String> {
	let name = path.file_name()?.to_str()?;
	let id = name.strip_suffix(MANIFEST_SUFFIX)?;
	(!id.is_empty()).then(|| id.to_string())
}
