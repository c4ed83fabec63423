//! Feed command - merge cached sets across a watch history

use anyhow::Result;

use super::{open_cache, print_entry, print_header};
use crate::processing::aggregate_feed;
use crate::ui;

pub fn run(history: &[String], limit: usize) -> Result<()> {
	print_header();

	let cache = open_cache()?;
	ui::debug(&format!("Watch history: {}", history.join(", ")));

	let feed = aggregate_feed(&cache, history, limit)?;
	if feed.is_empty() {
		ui::warn("No recommendations for this watch history");
		return Ok(());
	}

	ui::success(&format!("Feed of {} videos", feed.len()));
	println!();
	for (i, entry) in feed.iter().enumerate() {
		print_entry(i + 1, &entry.video_id, entry.score);
	}
	println!();

	Ok(())
}
