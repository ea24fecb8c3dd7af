//! End-to-end pipeline tests: resolve a location, parse each file, scan,
//! and check the accumulated output stream.

use std::fs;

use pretty_assertions::assert_eq;
use zigdoc::parse::SyntaxTree;
use zigdoc::scan::{RenderContext, scan_file};
use zigdoc::{Query, source};

fn run(location: &str, query: &Query) -> String {
	let files = source::resolve_files(location).expect("resolve");
	let mut ctx = RenderContext::default();
	let mut out = String::new();
	for file in &files {
		let text = fs::read_to_string(file).expect("read");
		let tree = SyntaxTree::parse(file, text).expect("parse");
		let warnings = scan_file(&tree, query, &mut ctx, &mut out);
		assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
	}
	out
}

#[test]
fn directory_scan_orders_files_and_separates_entries() {
	let dir = tempfile::tempdir().expect("tempdir");
	fs::write(
		dir.path().join("alpha.zig"),
		"//! Alpha module.\npub const first = 1;\n",
	)
	.expect("write alpha");
	fs::write(dir.path().join("beta.zig"), "pub const second = 2;\n").expect("write beta");

	let out = run(dir.path().to_str().expect("utf8"), &Query::All);
	assert_eq!(
		out,
		concat!(
			"//! Alpha module.\n",
			"\n",
			"pub const first = 1;\n",
			"\n",
			"pub const second = 2;\n"
		)
	);
}

#[test]
fn exact_lookup_crosses_files_without_module_docs() {
	let dir = tempfile::tempdir().expect("tempdir");
	fs::write(
		dir.path().join("alpha.zig"),
		"//! Alpha module.\npub const first = 1;\n",
	)
	.expect("write alpha");
	fs::write(dir.path().join("beta.zig"), "pub const second = 2;\n").expect("write beta");

	let out = run(dir.path().to_str().expect("utf8"), &Query::Exact("second".to_string()));
	assert_eq!(out, "pub const second = 2;\n");
}

#[test]
fn malformed_file_aborts_the_batch() {
	let dir = tempfile::tempdir().expect("tempdir");
	let file = dir.path().join("broken.zig");
	fs::write(&file, "pub const = = {{\n").expect("write");

	let text = fs::read_to_string(&file).expect("read");
	assert!(SyntaxTree::parse(&file, text).is_err());
}

#[test]
fn container_lookup_prints_the_public_surface_only() {
	let dir = tempfile::tempdir().expect("tempdir");
	fs::write(
		dir.path().join("list.zig"),
		concat!(
			"/// A growable list.\n",
			"pub const List = struct {\n",
			"    items: []u8,\n",
			"    cap: usize = 0,\n",
			"    const grow_factor = 2;\n",
			"    /// Returns an empty list.\n",
			"    pub fn init() List { return .{ .items = &.{}, .cap = 0 }; }\n",
			"    fn grow(self: *List) void { _ = self; }\n",
			"    test \"grow\" {}\n",
			"};\n"
		),
	)
	.expect("write");

	let out = run(
		dir.path().to_str().expect("utf8"),
		&Query::Exact("List".to_string()),
	);
	assert_eq!(
		out,
		concat!(
			"/// A growable list.\n",
			"pub const List = struct {\n",
			"    items: []u8,\n",
			"    cap: usize = 0,\n",
			"    /// Returns an empty list.\n",
			"    pub fn init() List { ... }\n",
			"};\n"
		)
	);
}
