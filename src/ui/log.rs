//! Unified logging system

use colored::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

static VERBOSE: AtomicBool = AtomicBool::new(false);

pub struct Log;

impl Log {
	pub fn set_verbose(enabled: bool) {
		VERBOSE.store(enabled, Ordering::Relaxed);
	}

	pub fn is_verbose() -> bool {
		VERBOSE.load(Ordering::Relaxed)
	}
}

pub fn info(msg: &str) {
	println!("{} {}", "ℹ".bright_blue().bold(), msg.bright_white());
}

pub fn success(msg: &str) {
	println!("{} {}", "✓".bright_green().bold(), msg.bright_white());
}

pub fn warn(msg: &str) {
	println!("{} {}", "⚠".bright_yellow().bold(), msg.bright_white());
}

pub fn error(msg: &str) {
	println!("{} {}", "✗".bright_red().bold(), msg.bright_white());
}

pub fn debug(msg: &str) {
	if Log::is_verbose() {
		println!("{} {}", "⚙".bright_black().bold(), msg.dimmed());
	}
}

pub fn header(text: &str) {
	println!("\n{}", text.bright_blue().bold());
}

/// Clickable file path (OSC 8 terminal hyperlink)
pub fn path_link(path: &std::path::Path, max_len: usize) -> String {
	let absolute = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

	let uri = if cfg!(windows) {
		let path_str = absolute.to_string_lossy();
		let cleaned = path_str.strip_prefix(r"\\?\").unwrap_or(&path_str);
		format!("file:///{}", cleaned.replace('\\', "/"))
	} else {
		format!("file://{}", absolute.display())
	};

	let display = absolute.to_string_lossy();
	let display_name = truncate_middle(&display, max_len);

	format!("\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\", uri, display_name)
}

fn truncate_middle(s: &str, max_len: usize) -> String {
	let chars: Vec<char> = s.chars().collect();
	if chars.len() <= max_len || max_len < 8 {
		return s.to_string();
	}
	let keep = (max_len - 3) / 2;
	let head: String = chars[..keep].iter().collect();
	let tail: String = chars[chars.len() - keep..].iter().collect();
	format!("{}...{}", head, tail)
}

/// Batch summary block: labelled counts followed by elapsed time
pub fn summary(rows: &[(&str, usize)], elapsed: Duration) {
	header("Summary");

	for (label, count) in rows {
		let label = format!("{}:", label);
		println!("  {:<12} {}", label.bright_blue(), count);
	}

	println!("  {:<12} {:.2}s", "Duration:".bright_blue(), elapsed.as_secs_f32());
	println!();
}
