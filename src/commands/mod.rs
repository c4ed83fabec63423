//! # Command Implementations
//!
//! Each submodule handles one CLI command (ingest, rebuild, similar, feed).

pub mod feed;
pub mod ingest;
pub mod rebuild;
pub mod similar;

use colored::Colorize;

use crate::config;
use crate::storage::{FileEmbeddingRepository, FileRecommendationCache};

fn print_header() {
	println!();
	println!(
		"{}",
		format!("─── Vidsim v{} ───", env!("CARGO_PKG_VERSION"))
			.bright_blue()
			.bold()
	);
}

fn open_repository() -> anyhow::Result<FileEmbeddingRepository> {
	Ok(FileEmbeddingRepository::open(config::embeddings_dir())?)
}

fn open_cache() -> anyhow::Result<FileRecommendationCache> {
	Ok(FileRecommendationCache::open(config::recommendations_dir())?)
}

/// `#1 video-7 98%` style result line
fn print_entry(rank: usize, video_id: &str, score: f32) {
	let rank = format!("#{}", rank).bright_blue().bold();
	let score = format!("{:.0}%", score * 100.0).dimmed();
	println!("  {} {} {}", rank, video_id, score);
}
