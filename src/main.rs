//! CLI entrypoint.

use std::io::IsTerminal;
use std::process;

use clap::{CommandFactory, Parser};
use owo_colors::OwoColorize;

use zigdoc::parse::SyntaxTree;
use zigdoc::scan::{RenderContext, scan_file};
use zigdoc::{Query, Result, source};

#[derive(Parser)]
#[command(
	name = "zigdoc",
	version,
	about = "Search pub declarations and doc comments in Zig source files"
)]
struct Cli {
	/// File, directory, or std alias (e.g. `std/fs.zig`) to search
	location: Option<String>,

	/// Identifier to look up; omit to browse every public declaration
	identifier: Option<String>,

	/// Match the identifier as a case-insensitive substring instead of exactly
	#[arg(short = 's', long)]
	substring: bool,

	/// Disable ANSI colors in diagnostics
	#[arg(long, default_value_t = false)]
	no_color: bool,
}

fn main() {
	let cli = match Cli::try_parse() {
		Ok(cli) => cli,
		Err(err) if err.use_stderr() => {
			// covers argument errors such as a third positional argument
			eprint!("{err}");
			process::exit(1);
		}
		Err(err) => {
			// --help / --version
			print!("{err}");
			process::exit(0);
		}
	};

	let Some(location) = cli.location.clone() else {
		// bare invocation: usage on the error stream, successful exit
		eprintln!("{}", Cli::command().render_usage());
		process::exit(0);
	};

	let color = should_color_output(&cli);
	if let Err(err) = run(&cli, &location, color) {
		if color {
			eprintln!("{} {err}", "error:".red().bold());
		} else {
			eprintln!("error: {err}");
		}
		process::exit(1);
	}
}

fn run(cli: &Cli, location: &str, color: bool) -> Result<()> {
	let query = match (&cli.identifier, cli.substring) {
		(Some(name), true) => Query::Substring(name.clone()),
		(Some(name), false) => Query::Exact(name.clone()),
		// `-s` without an identifier selects doc-comment-only browsing
		(None, true) => Query::None,
		(None, false) => Query::All,
	};

	let files = source::resolve_files(location)?;
	let mut ctx = RenderContext::default();
	let mut out = String::new();
	for file in &files {
		let text = std::fs::read_to_string(file)?;
		let tree = SyntaxTree::parse(file, text)?;
		for warning in scan_file(&tree, &query, &mut ctx, &mut out) {
			let origin = format!("{}:{}", file.display(), warning.line);
			if color {
				eprintln!("{} {origin}: {}", "warning:".yellow().bold(), warning.message);
			} else {
				eprintln!("warning: {origin}: {}", warning.message);
			}
		}
	}
	print!("{out}");
	Ok(())
}

fn should_color_output(cli: &Cli) -> bool {
	if cli.no_color {
		return false;
	}
	if std::env::var_os("NO_COLOR").is_some() {
		return false;
	}
	if std::env::var("TERM").ok().as_deref() == Some("dumb") {
		return false;
	}
	std::io::stderr().is_terminal()
}
