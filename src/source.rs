//! Resolving a source location to the list of files to scan.
//!
//! Three forms are accepted: a direct `.zig` file path, a directory walked
//! recursively (following symlinks), and the `std` alias rewritten against
//! the toolchain's standard-library root from `zig env`.

use std::path::{Path, PathBuf};
use std::process::Command;

use walkdir::WalkDir;

use crate::error::{Result, ZigdocError};

/// Alias prefix resolved against the Zig standard library root.
const STD_ALIAS: &str = "std";

/// Resolve `location` to one or more `.zig` file paths, in deterministic
/// order.
pub fn resolve_files(location: &str) -> Result<Vec<PathBuf>> {
	let path = Path::new(location);
	if path.is_file() {
		return Ok(vec![path.to_path_buf()]);
	}
	if path.is_dir() {
		return walk_dir(path);
	}
	if location == STD_ALIAS || location.starts_with("std/") {
		return resolve_std_alias(location);
	}
	Err(ZigdocError::InvalidLocation(format!(
		"no such file or directory: {location}"
	)))
}

fn walk_dir(dir: &Path) -> Result<Vec<PathBuf>> {
	let mut files = Vec::new();
	for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
		let entry = entry.map_err(|e| {
			ZigdocError::InvalidLocation(format!("failed to walk '{}': {e}", dir.display()))
		})?;
		if entry.file_type().is_file()
			&& entry.path().extension().is_some_and(|ext| ext == "zig")
		{
			files.push(entry.into_path());
		}
	}
	Ok(files)
}

fn resolve_std_alias(location: &str) -> Result<Vec<PathBuf>> {
	let std_dir = zig_std_dir()?;
	let rest = location
		.strip_prefix(STD_ALIAS)
		.unwrap_or("")
		.trim_start_matches('/');

	// the bare alias names the whole library root
	if rest.is_empty() {
		return walk_dir(&std_dir);
	}

	let target = std_dir.join(rest);
	if target.is_file() {
		return Ok(vec![target]);
	}
	if target.is_dir() {
		return walk_dir(&target);
	}
	let with_ext = std_dir.join(format!("{rest}.zig"));
	if with_ext.is_file() {
		return Ok(vec![with_ext]);
	}
	Err(ZigdocError::InvalidLocation(format!(
		"'{location}' does not exist under '{}'",
		std_dir.display()
	)))
}

/// Query `zig env` for the standard library directory.
///
/// Any failure here is fatal to the run; the diagnostic carries the
/// command's stderr.
fn zig_std_dir() -> Result<PathBuf> {
	let output = Command::new("zig")
		.arg("env")
		.output()
		.map_err(|e| ZigdocError::Toolchain(format!("failed to run `zig env`: {e}")))?;
	if !output.status.success() {
		return Err(ZigdocError::Toolchain(format!(
			"`zig env` failed: {}",
			String::from_utf8_lossy(&output.stderr).trim()
		)));
	}
	let env: serde_json::Value = serde_json::from_slice(&output.stdout)
		.map_err(|e| ZigdocError::Toolchain(format!("unparsable `zig env` output: {e}")))?;
	let std_dir = env
		.get("std_dir")
		.and_then(|value| value.as_str())
		.ok_or_else(|| {
			ZigdocError::Toolchain("`zig env` output carries no std_dir".to_string())
		})?;
	Ok(PathBuf::from(std_dir))
}

#[cfg(test)]
mod tests {
	use std::fs;

	use super::*;

	#[test]
	fn direct_file_resolves_to_itself() {
		let dir = tempfile::tempdir().expect("tempdir");
		let file = dir.path().join("one.zig");
		fs::write(&file, "pub const a = 1;\n").expect("write");
		let files = resolve_files(file.to_str().expect("utf8")).expect("resolve");
		assert_eq!(files, vec![file]);
	}

	#[test]
	fn directory_walk_is_recursive_filtered_and_sorted() {
		let dir = tempfile::tempdir().expect("tempdir");
		fs::create_dir_all(dir.path().join("sub")).expect("mkdir");
		fs::write(dir.path().join("b.zig"), "").expect("write");
		fs::write(dir.path().join("a.zig"), "").expect("write");
		fs::write(dir.path().join("notes.txt"), "").expect("write");
		fs::write(dir.path().join("sub/c.zig"), "").expect("write");

		let files = resolve_files(dir.path().to_str().expect("utf8")).expect("resolve");
		let names: Vec<String> = files
			.iter()
			.map(|p| {
				p.strip_prefix(dir.path())
					.expect("prefix")
					.to_string_lossy()
					.replace('\\', "/")
			})
			.collect();
		assert_eq!(names, vec!["a.zig", "b.zig", "sub/c.zig"]);
	}

	#[cfg(unix)]
	#[test]
	fn directory_walk_follows_symlinks() {
		let real = tempfile::tempdir().expect("tempdir");
		fs::write(real.path().join("linked.zig"), "").expect("write");
		let root = tempfile::tempdir().expect("tempdir");
		std::os::unix::fs::symlink(real.path(), root.path().join("alias")).expect("symlink");

		let files = resolve_files(root.path().to_str().expect("utf8")).expect("resolve");
		assert!(files.iter().any(|p| p.ends_with("linked.zig")));
	}

	#[test]
	fn unresolvable_location_is_an_error() {
		let err = resolve_files("/definitely/not/here.zig");
		assert!(matches!(err, Err(ZigdocError::InvalidLocation(_))));
	}
}
