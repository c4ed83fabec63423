//! Vidsim - content-based video recommendations
//!
//! Fuses per-modality features into embeddings and serves cached
//! "similar videos" lists and watch-history feeds.

use anyhow::Result;
use clap::{CommandFactory, Parser};

use vidsim::cli::{Cli, Command};
use vidsim::commands;
use vidsim::config;
use vidsim::ui::Log;

fn main() -> Result<()> {
	let cli = Cli::parse();

	Log::set_verbose(cli.verbose);
	if let Some(dir) = cli.data_dir {
		config::set_data_dir(dir);
	}

	match cli.command {
		Command::Ingest {
			directory,
			recursive,
			force,
			strict,
		} => commands::ingest::run(&directory, recursive, force, strict),
		Command::Rebuild { k } => commands::rebuild::run(k),
		Command::Similar { video_id } => commands::similar::run(&video_id),
		Command::Feed { history, limit } => commands::feed::run(&history, limit),
		Command::Help { subcommand } => {
			let mut cmd = Cli::command();
			match subcommand {
				Some(sub) => match cmd.find_subcommand_mut(&sub) {
					Some(sub_cmd) => sub_cmd.print_help()?,
					None => {
						eprintln!("Unknown subcommand: {}", sub);
						cmd.print_help()?;
					}
				},
				None => cmd.print_help()?,
			}
			Ok(())
		}
	}
}
