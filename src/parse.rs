//! Zig source parsing and the per-file syntax tree wrapper.
//!
//! The grammar itself is an external collaborator (`tree-sitter-zig`); this
//! module only adapts its output into the shape the rest of the crate works
//! with: the tree for structure, plus a flat, source-ordered stream of leaf
//! token spans for the modifier scans and signature emission.

use std::path::Path;

use tree_sitter::{Node, Parser, Tree};

use crate::error::{Result, ZigdocError};

/// Byte span of one token in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
	/// Offset of the first byte of the token.
	pub start: usize,
	/// Offset one past the last byte of the token.
	pub end: usize,
}

/// Parsed representation of one Zig source file.
///
/// Owns the file text, the tree, and the token stream. Scoped to the scan
/// of a single file; never shared across files.
pub struct SyntaxTree {
	text: String,
	tree: Tree,
	tokens: Vec<Span>,
}

impl SyntaxTree {
	/// Parse `text` as a Zig source file.
	///
	/// A tree carrying a syntax error is a parse failure, fatal to the run
	/// per the error policy. Zero-width missing leaves and the error nodes
	/// the grammar produces for valid empty container bodies are tolerated.
	pub fn parse(path: &Path, text: String) -> Result<Self> {
		let tree = parse_source(&text).map_err(|message| ZigdocError::Parse {
			path: path.to_path_buf(),
			message,
		})?;
		let mut tokens = Vec::new();
		collect_tokens(tree.root_node(), &text, &mut tokens);
		Ok(Self { text, tree, tokens })
	}

	/// Root node of the parsed file.
	pub fn root(&self) -> Node<'_> {
		self.tree.root_node()
	}

	/// Full source text.
	pub fn text(&self) -> &str {
		&self.text
	}

	/// All leaf tokens in source order.
	pub fn tokens(&self) -> &[Span] {
		&self.tokens
	}

	/// Source text of one token.
	pub fn token_text(&self, index: usize) -> &str {
		let span = self.tokens[index];
		&self.text[span.start..span.end]
	}

	/// Index of the first token starting at or after `byte`.
	pub fn token_at(&self, byte: usize) -> usize {
		self.tokens.partition_point(|span| span.start < byte)
	}

	/// Token range `[first, last)` covering `node`'s span.
	pub fn node_tokens(&self, node: Node<'_>) -> (usize, usize) {
		let first = self.token_at(node.start_byte());
		let last = self.tokens.partition_point(|span| span.end <= node.end_byte());
		(first, last.max(first))
	}

	/// Source text between two tokens of the stream.
	pub fn gap_text(&self, left: usize, right: usize) -> &str {
		&self.text[self.tokens[left].end..self.tokens[right].start]
	}
}

fn parse_source(text: &str) -> std::result::Result<Tree, String> {
	let mut parser = Parser::new();
	parser
		.set_language(&tree_sitter_zig::LANGUAGE.into())
		.map_err(|e| format!("failed to load Zig grammar: {e}"))?;
	let tree = parser
		.parse(text, None)
		.ok_or_else(|| "tree-sitter returned no tree".to_string())?;
	if let Some(offset) = find_syntax_error(tree.root_node(), text) {
		return Err(format!("syntax error at byte {offset}"));
	}
	Ok(tree)
}

/// Locate a real syntax error in the tree, if any.
///
/// Zero-width missing leaves are not errors. Neither are the error nodes
/// the grammar produces for empty container bodies (`struct {}`), which are
/// valid Zig.
fn find_syntax_error(node: Node<'_>, text: &str) -> Option<usize> {
	if node.is_missing() {
		return None;
	}
	if node.is_error() {
		if empty_body_error(text, node.start_byte(), node.end_byte()) {
			return None;
		}
		return Some(node.start_byte());
	}
	if !node.has_error() {
		return None;
	}
	let mut cursor = node.walk();
	node.children(&mut cursor)
		.find_map(|child| find_syntax_error(child, text))
}

/// Whether an error node's span amounts to an empty container body: brace
/// and semicolon punctuation only, an empty `{}` pair, or a dangling `{`
/// whose `}` immediately follows the span.
fn empty_body_error(text: &str, start: usize, end: usize) -> bool {
	let slice = &text[start..end];
	if slice
		.chars()
		.all(|c| c.is_whitespace() || matches!(c, '{' | '}' | ';'))
	{
		return true;
	}
	let mut rest = slice;
	while let Some(pos) = rest.find('{') {
		rest = &rest[pos + 1..];
		if rest.trim_start().starts_with('}') {
			return true;
		}
	}
	slice.trim_end().ends_with('{') && text[end..].trim_start().starts_with('}')
}

fn collect_tokens(node: Node<'_>, text: &str, out: &mut Vec<Span>) {
	let mut cursor = node.walk();
	for child in node.children(&mut cursor) {
		let start = child.start_byte();
		let end = child.end_byte();
		if child.child_count() == 0 {
			// zero-width (missing) leaves carry no source text
			if end > start {
				out.push(Span { start, end });
			}
		} else if is_quoted_literal(&text[start..end]) && leaves_only(child) {
			// string and char literals lex as several leaves (quote,
			// content, quote); the modifier scans and signature emission
			// treat the whole literal as one token
			out.push(Span { start, end });
		} else {
			collect_tokens(child, text, out);
		}
	}
}

fn is_quoted_literal(slice: &str) -> bool {
	slice.starts_with('"') || slice.starts_with('\'') || slice.starts_with("@\"")
}

fn leaves_only(node: Node<'_>) -> bool {
	let mut cursor = node.walk();
	node.children(&mut cursor).all(|child| child.child_count() == 0)
}
