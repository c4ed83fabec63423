use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::{DEFAULT_FEED_SIZE, DEFAULT_TOP_K};

fn styles() -> Styles {
	let blue = Some(Color::Ansi(AnsiColor::Blue));
	Styles::styled()
		.header(Style::new().bold().fg_color(blue))
		.usage(Style::new().bold().fg_color(blue))
		.literal(Style::new().fg_color(blue))
		.placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))))
		.valid(Style::new().fg_color(blue))
		.invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))))
}

#[derive(Parser, Debug)]
#[command(
	name = "vidsim",
	author,
	version,
	about = "Content-based video recommendations from fused multimodal embeddings",
	styles = styles(),
	disable_help_subcommand = true,
	after_help = format!(
		"{title}
  {vidsim} {ingest}   {ingest_args}   {ingest_desc}
  {vidsim} {rebuild}  {rebuild_args}            {rebuild_desc}
  {vidsim} {similar}  {similar_args}         {similar_desc}
  {vidsim} {feed}     {feed_args}   {feed_desc}
  {vidsim} {help}     {help_args}           {help_desc}",
		title = "Examples:".bright_blue().bold(),
		vidsim = "vidsim".bright_blue(),
		ingest = "ingest".yellow(),
		ingest_args = "-d ./features/ -r",
		ingest_desc = "Fuse and store embeddings".dimmed(),
		rebuild = "rebuild".yellow(),
		rebuild_args = "-k 10",
		rebuild_desc = "Recompute all recommendations".dimmed(),
		similar = "similar".yellow(),
		similar_args = "video-42",
		similar_desc = "Show cached similar videos".dimmed(),
		feed = "feed".yellow(),
		feed_args = "video-1 video-7",
		feed_desc = "Feed from a watch history".dimmed(),
		help = "help".yellow(),
		help_args = "ingest",
		help_desc = "Show help for ingest".dimmed(),
	),
)]
pub struct Cli {
	/// Enable verbose debug output
	#[arg(short = 'v', long = "verbose", global = true)]
	pub verbose: bool,

	/// Directory holding embeddings and cached recommendations
	#[arg(long = "data-dir", global = true, value_name = "PATH")]
	pub data_dir: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Fuse feature manifests into stored embeddings
	Ingest {
		/// Directory containing <videoId>.features.json manifests
		#[arg(short = 'd', long = "dir", default_value = ".")]
		directory: PathBuf,

		/// Scan directories recursively
		#[arg(short = 'r', long = "recursive")]
		recursive: bool,

		/// Re-fuse videos whose manifest is unchanged
		#[arg(short = 'f', long = "force")]
		force: bool,

		/// Drop modality vectors that do not match the configured dimensions
		#[arg(long = "strict")]
		strict: bool,
	},

	/// Rebuild the recommendation cache from every stored embedding
	Rebuild {
		/// Number of similar videos per video
		#[arg(short = 'k', long = "top-k", default_value_t = DEFAULT_TOP_K)]
		k: usize,
	},

	/// Show the cached similar videos for one video
	Similar {
		/// Video id
		#[arg(value_name = "VIDEO_ID")]
		video_id: String,
	},

	/// Build a feed from a watch history
	Feed {
		/// Watched video ids
		#[arg(value_name = "VIDEO_ID", required = true)]
		history: Vec<String>,

		/// Number of feed entries
		#[arg(short = 'n', long = "limit", default_value_t = DEFAULT_FEED_SIZE)]
		limit: usize,
	},

	/// Show help for a subcommand
	Help {
		/// Subcommand name
		subcommand: Option<String>,
	},
}
