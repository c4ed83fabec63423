//! Similar command - read one cached recommendation set

use anyhow::Result;

use super::{open_cache, print_entry, print_header};
use crate::storage::RecommendationCache;
use crate::ui;

pub fn run(video_id: &str) -> Result<()> {
	print_header();

	let cache = open_cache()?;
	let Some(set) = cache.get(video_id)? else {
		ui::warn(&format!("No recommendations cached for {}", video_id));
		ui::info("Run `vidsim rebuild` after ingesting the video");
		return Ok(());
	};

	if set.is_empty() {
		ui::info(&format!("{} has no comparable videos yet", video_id));
		return Ok(());
	}

	ui::success(&format!("{} videos similar to {}", set.len(), video_id));
	println!();
	for (i, entry) in set.similar.iter().enumerate() {
		print_entry(i + 1, &entry.video_id, entry.score);
	}
	println!();

	Ok(())
}
