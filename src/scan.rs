//! Per-file orchestration: classify, match, and drive the renderer.
//!
//! One pass over the file's top-level declarations in source order; no
//! reordering, no backtracking. Entries accumulate into a single output
//! stream, separated by exactly one blank line.

use crate::decl;
use crate::parse::SyntaxTree;
use crate::query::Query;
use crate::render;

/// Mutable state threaded through one run of the tool.
///
/// `emitted` spans all files of the run so that consecutive entries are
/// always separated by exactly one blank line, whether or not they come
/// from the same file. It is owned by the driving loop.
#[derive(Debug, Default)]
pub struct RenderContext {
	/// Whether anything has been written to the output stream yet.
	pub emitted: bool,
}

/// Diagnostic for one declaration the renderer could not format.
///
/// Render failures are scoped to the declaration; the scan continues.
#[derive(Debug)]
pub struct ScanWarning {
	/// 1-based line of the declaration in its file.
	pub line: usize,
	/// Human-readable reason.
	pub message: String,
}

/// Scan one file's top-level declarations, appending accepted entries to
/// `out` and returning warnings for declarations that failed to render.
pub fn scan_file(
	tree: &SyntaxTree,
	query: &Query,
	ctx: &mut RenderContext,
	out: &mut String,
) -> Vec<ScanWarning> {
	let mut warnings = Vec::new();

	// browse modes lead with the file-level prose; targeted lookups skip it
	if query.wants_module_docs() {
		let docs = module_doc_block(tree);
		if !docs.is_empty() {
			separate(ctx, out);
			out.push_str(&docs);
		}
	}

	let root = tree.root();
	let mut cursor = root.walk();
	for child in root.named_children(&mut cursor) {
		let decl = decl::classify(tree, child);
		if !decl::is_public(tree, &decl) {
			continue;
		}
		if !query.matches(decl::identifier(tree, &decl)) {
			continue;
		}

		let mut entry = String::new();
		match render::render_decl(tree, &decl, 0, &mut entry) {
			Ok(()) => {
				separate(ctx, out);
				out.push_str(&entry);
			}
			Err(err) => warnings.push(ScanWarning {
				line: child.start_position().row + 1,
				message: err.to_string(),
			}),
		}
	}

	warnings
}

fn separate(ctx: &mut RenderContext, out: &mut String) {
	if ctx.emitted {
		out.push('\n');
	}
	ctx.emitted = true;
}

/// The file's leading `//!` block: contiguous module doc lines before the
/// first declaration, replayed verbatim.
fn module_doc_block(tree: &SyntaxTree) -> String {
	let mut docs = String::new();
	for index in 0..tree.tokens().len() {
		let token = tree.token_text(index);
		if !token.starts_with("//!") {
			break;
		}
		docs.push_str(token.trim_end());
		docs.push('\n');
	}
	docs
}
