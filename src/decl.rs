//! Declaration classification: kind dispatch, visibility, identifier.
//!
//! All three operations are total and side-effect-free, and work the same
//! way at file scope and inside container bodies so the renderer can apply
//! them recursively.

use tree_sitter::Node;

use crate::parse::SyntaxTree;

/// The closed set of declaration shapes the tool understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
	/// `fn` prototype, with or without a body.
	Function,
	/// `const` or `var` binding.
	Binding,
	/// Container member field (`name: T`, enum member).
	Field,
	/// `usingnamespace` re-export.
	Reexport,
	/// `test { .. }` block.
	Test,
	/// `comptime { .. }` block.
	Comptime,
	/// Comments, stray statements, shapes outside the supported grammar.
	Other,
}

/// One classified declaration inside a syntax tree.
///
/// Holds a node reference, so it is valid only for the tree's lifetime.
#[derive(Debug, Clone, Copy)]
pub struct Decl<'t> {
	/// The underlying syntax node.
	pub node: Node<'t>,
	/// Which shape the declaration has.
	pub kind: DeclKind,
	/// Token index of the anchoring keyword (`fn`, `const`, `var`, ...).
	pub primary: usize,
	/// First token index of the declaration.
	pub first: usize,
	/// One past the last token index of the declaration.
	pub last: usize,
}

/// Zig keywords; a name token is never one of these.
pub(crate) const KEYWORDS: &[&str] = &[
	"addrspace", "align", "allowzero", "and", "anyframe", "anytype", "asm", "async", "await",
	"break", "callconv", "catch", "comptime", "const", "continue", "defer", "else", "enum",
	"errdefer", "error", "export", "extern", "fn", "for", "if", "inline", "linksection",
	"noalias", "noinline", "nosuspend", "opaque", "or", "orelse", "packed", "pub", "resume",
	"return", "struct", "suspend", "switch", "test", "threadlocal", "try", "union",
	"unreachable", "usingnamespace", "var", "volatile", "while",
];

/// Modifiers that may precede the anchoring keyword without determining the
/// declaration's kind: linkage, storage, calling-convention ABI tags.
const LEADING_MODIFIERS: &[&str] = &[
	"pub", "export", "extern", "inline", "noinline", "threadlocal", "comptime",
];

/// Subset of [`LEADING_MODIFIERS`] that is visibility-irrelevant in the
/// backward scan. `pub` and `export` are the publicity tokens.
const SCAN_MODIFIERS: &[&str] = &["extern", "inline", "noinline", "threadlocal", "comptime"];

fn is_leading_modifier(token: &str) -> bool {
	LEADING_MODIFIERS.contains(&token) || token.starts_with('"')
}

fn is_scan_modifier(token: &str) -> bool {
	SCAN_MODIFIERS.contains(&token) || token.starts_with('"')
}

/// Whether `token` is identifier-shaped (plain or `@"quoted"`).
pub(crate) fn is_identifier_token(token: &str) -> bool {
	if let Some(rest) = token.strip_prefix("@\"") {
		return rest.ends_with('"') && !rest.is_empty();
	}
	let mut chars = token.chars();
	let Some(first) = chars.next() else {
		return false;
	};
	if !(first.is_ascii_alphabetic() || first == '_') {
		return false;
	}
	if KEYWORDS.contains(&token) {
		return false;
	}
	chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Classify one node into the closed declaration-kind set.
///
/// Dispatch keys off the first token that is not a leading modifier, so it
/// works for every encoding of a prototype the grammar produces.
pub fn classify<'t>(tree: &SyntaxTree, node: Node<'t>) -> Decl<'t> {
	let (first, last) = tree.node_tokens(node);
	let mut kind = DeclKind::Other;
	let mut primary = first;

	let mut index = first;
	while index < last {
		let token = tree.token_text(index);
		match token {
			"fn" => {
				kind = DeclKind::Function;
				primary = index;
				break;
			}
			"const" | "var" => {
				kind = DeclKind::Binding;
				primary = index;
				break;
			}
			"usingnamespace" => {
				kind = DeclKind::Reexport;
				primary = index;
				break;
			}
			"test" => {
				kind = DeclKind::Test;
				primary = index;
				break;
			}
			"{" => {
				// only reachable after `comptime`
				kind = DeclKind::Comptime;
				primary = index;
				break;
			}
			_ if is_leading_modifier(token) => index += 1,
			_ if is_identifier_token(token) && field_follows(tree, index + 1, last) => {
				kind = DeclKind::Field;
				primary = index;
				break;
			}
			_ => break,
		}
	}

	Decl {
		node,
		kind,
		primary,
		first,
		last,
	}
}

/// A container field is a name followed by its type, a default value, or the
/// end of the member (lone enum members carry nothing else).
fn field_follows(tree: &SyntaxTree, next: usize, last: usize) -> bool {
	if next >= last {
		return true;
	}
	matches!(tree.token_text(next), ":" | "," | "=")
}

/// Whether `decl` is visible outside its file.
///
/// Backward scan over the token stream starting immediately before the
/// primary token: `pub` or `export` anywhere in the contiguous modifier run
/// makes the declaration public; reaching the stream start or any other
/// token first makes it private. Container fields are always public; a
/// re-export is public iff the single preceding token is `pub`.
pub fn is_public(tree: &SyntaxTree, decl: &Decl<'_>) -> bool {
	match decl.kind {
		DeclKind::Field => true,
		DeclKind::Reexport => decl.primary > 0 && tree.token_text(decl.primary - 1) == "pub",
		DeclKind::Function | DeclKind::Binding => {
			let mut index = decl.primary;
			while index > 0 {
				index -= 1;
				let token = tree.token_text(index);
				if token == "pub" || token == "export" {
					return true;
				}
				if !is_scan_modifier(token) {
					return false;
				}
			}
			false
		}
		DeclKind::Test | DeclKind::Comptime | DeclKind::Other => false,
	}
}

/// Extract the declaration's name, if its kind carries one.
///
/// Functions and bindings name themselves with the token immediately after
/// the anchoring keyword; anonymous prototypes and every other kind yield
/// `None`. Absence is an expected outcome, not an error.
pub fn identifier<'a>(tree: &'a SyntaxTree, decl: &Decl<'_>) -> Option<&'a str> {
	match decl.kind {
		DeclKind::Function | DeclKind::Binding => {
			let index = decl.primary + 1;
			if index >= decl.last {
				return None;
			}
			let token = tree.token_text(index);
			is_identifier_token(token).then_some(token)
		}
		DeclKind::Field
		| DeclKind::Reexport
		| DeclKind::Test
		| DeclKind::Comptime
		| DeclKind::Other => None,
	}
}
