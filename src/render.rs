//! Selective rendering of accepted declarations.
//!
//! Emits the public surface only: attached doc comments, the signature with
//! deterministic spacing and indentation, and (for containers) public
//! members filtered through the same classify → extract → render pipeline.
//! Function bodies collapse to an opaque `{ ... }` marker; `test` blocks are
//! never rendered.

use tree_sitter::Node;

use crate::decl::{self, Decl, DeclKind};
use crate::parse::SyntaxTree;

/// Width of one indentation step, in spaces.
const INDENT: usize = 4;

/// Container-introducing keywords a binding initializer may start with.
const CONTAINER_KEYWORDS: &[&str] = &["struct", "enum", "union", "opaque"];

/// Keywords that take a space before a following `(` or operand, unlike
/// names and builtin calls.
const SPACED_KEYWORDS: &[&str] = &[
	"and", "asm", "break", "catch", "continue", "defer", "else", "errdefer", "fn", "for", "if",
	"or", "orelse", "return", "resume", "suspend", "switch", "try", "while",
];

/// Per-declaration render failure.
///
/// The scanner reports this as a warning scoped to the one declaration and
/// continues with the rest of the file.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct RenderError(String);

/// Render one accepted declaration into `out`.
///
/// Output is staged in a scratch buffer and committed only on success, so a
/// failing declaration never corrupts text already emitted for earlier
/// ones.
pub fn render_decl(
	tree: &SyntaxTree,
	decl: &Decl<'_>,
	depth: usize,
	out: &mut String,
) -> Result<(), RenderError> {
	let mut scratch = String::new();
	render_into(tree, decl, depth, &mut scratch)?;
	out.push_str(&scratch);
	Ok(())
}

fn render_into(
	tree: &SyntaxTree,
	decl: &Decl<'_>,
	depth: usize,
	out: &mut String,
) -> Result<(), RenderError> {
	render_doc_comments(tree, decl.first, depth, out);
	match decl.kind {
		DeclKind::Function => render_function(tree, decl, depth, out),
		DeclKind::Binding => render_binding(tree, decl, depth, out),
		DeclKind::Field => {
			let mut line = joined(tree, decl.first, decl.last);
			if !line.ends_with(',') {
				line.push(',');
			}
			push_line(out, depth, &line);
			Ok(())
		}
		DeclKind::Reexport => {
			let mut line = joined(tree, decl.first, decl.last);
			if !line.ends_with(';') {
				line.push(';');
			}
			push_line(out, depth, &line);
			Ok(())
		}
		// never rendered, regardless of visibility
		DeclKind::Test => Ok(()),
		DeclKind::Comptime | DeclKind::Other => Err(RenderError(format!(
			"unsupported declaration shape at byte {}",
			decl.node.start_byte()
		))),
	}
}

/// Replay the contiguous `///` lines directly above the declaration,
/// verbatim and in source order, one per output line.
fn render_doc_comments(tree: &SyntaxTree, first: usize, depth: usize, out: &mut String) {
	let mut start = first;
	while start > 0 {
		let prev = start - 1;
		if !tree.token_text(prev).starts_with("///") {
			break;
		}
		// a blank line detaches the comment block
		if tree.gap_text(prev, start).matches('\n').count() != 1 {
			break;
		}
		start = prev;
	}
	for index in start..first {
		let token = tree.token_text(index);
		if token.starts_with("///") {
			push_line(out, depth, token.trim_end());
		}
	}
}

fn render_function(
	tree: &SyntaxTree,
	decl: &Decl<'_>,
	depth: usize,
	out: &mut String,
) -> Result<(), RenderError> {
	// the signature runs to the body block or the terminating semicolon;
	// braces belonging to an inline container or error-set return type
	// (`fn f() error{Bad}!void`) are part of the signature, not the body
	let mut brackets = 0i32;
	let mut braces = 0i32;
	let mut type_literal = false;
	let mut end = decl.last;
	let mut has_body = false;
	let mut index = decl.primary;
	while index < decl.last {
		match tree.token_text(index) {
			"(" | "[" => brackets += 1,
			")" | "]" => brackets -= 1,
			"struct" | "enum" | "union" | "opaque" | "error"
				if brackets == 0 && braces == 0 =>
			{
				type_literal = true;
			}
			"{" if brackets == 0 => {
				if type_literal || braces > 0 {
					braces += 1;
				} else {
					has_body = true;
					end = index;
					break;
				}
			}
			"}" if brackets == 0 && braces > 0 => {
				braces -= 1;
				if braces == 0 {
					type_literal = false;
				}
			}
			";" if brackets == 0 && braces == 0 => {
				end = index + 1;
				break;
			}
			_ => {}
		}
		index += 1;
	}

	let mut line = joined(tree, decl.first, end);
	if has_body {
		line.push_str(" { ... }");
	} else if !line.ends_with(';') {
		line.push(';');
	}
	push_line(out, depth, &line);
	Ok(())
}

fn render_binding(
	tree: &SyntaxTree,
	decl: &Decl<'_>,
	depth: usize,
	out: &mut String,
) -> Result<(), RenderError> {
	if let Some(container_kw) = container_initializer(tree, decl) {
		return render_container(tree, decl, container_kw, depth, out);
	}

	let mut line = joined(tree, decl.first, decl.last);
	if !line.ends_with(';') {
		line.push(';');
	}
	push_line(out, depth, &line);
	Ok(())
}

/// Token index of the container keyword when the binding's initializer is a
/// composite type (`const X = struct { ... }` and friends).
fn container_initializer(tree: &SyntaxTree, decl: &Decl<'_>) -> Option<usize> {
	let mut brackets = 0i32;
	let mut index = decl.primary;
	while index < decl.last {
		match tree.token_text(index) {
			"(" | "[" | "{" => brackets += 1,
			")" | "]" | "}" => brackets -= 1,
			"=" if brackets == 0 => {
				let mut init = index + 1;
				while init < decl.last
					&& matches!(tree.token_text(init), "extern" | "packed")
				{
					init += 1;
				}
				if init < decl.last && CONTAINER_KEYWORDS.contains(&tree.token_text(init)) {
					return Some(init);
				}
				return None;
			}
			_ => {}
		}
		index += 1;
	}
	None
}

fn render_container(
	tree: &SyntaxTree,
	decl: &Decl<'_>,
	container_kw: usize,
	depth: usize,
	out: &mut String,
) -> Result<(), RenderError> {
	// opening brace of the container body; parentheses cover enum(u8) tags
	let mut brackets = 0i32;
	let mut open = None;
	for index in container_kw..decl.last {
		match tree.token_text(index) {
			"(" | "[" => brackets += 1,
			")" | "]" => brackets -= 1,
			"{" if brackets == 0 => {
				open = Some(index);
				break;
			}
			_ => {}
		}
	}
	let Some(open) = open else {
		// a grammar revision that rejects empty container bodies pushes the
		// `{}` outside the declaration node; recover it from the token stream
		if decl.last + 1 < tree.tokens().len()
			&& tree.token_text(decl.last) == "{"
			&& tree.token_text(decl.last + 1) == "}"
		{
			let header = joined(tree, decl.first, decl.last);
			push_line(out, depth, &format!("{header} {{}};"));
			return Ok(());
		}
		return Err(RenderError(format!(
			"container initializer without a body at byte {}",
			decl.node.start_byte()
		)));
	};
	let open_byte = tree.tokens()[open].start;
	let header = joined(tree, decl.first, open);

	let mut members = String::new();
	if let Some(container) = container_node(tree, decl.node, container_kw) {
		let mut cursor = container.walk();
		for child in container.named_children(&mut cursor) {
			if child.start_byte() <= open_byte {
				continue;
			}
			render_member(tree, child, depth + 1, &mut members);
		}
	}

	if members.is_empty() {
		push_line(out, depth, &format!("{header} {{}};"));
	} else {
		push_line(out, depth, &format!("{header} {{"));
		out.push_str(&members);
		push_line(out, depth, "};");
	}
	Ok(())
}

/// Apply the full classify → extract → render pipeline to one container
/// member. Private members, `test` blocks, and shapes the renderer does not
/// support are omitted entirely; a failure inside one member never disturbs
/// the members already emitted.
fn render_member(tree: &SyntaxTree, node: Node<'_>, depth: usize, out: &mut String) {
	let member = decl::classify(tree, node);
	match member.kind {
		DeclKind::Field => {
			let _ = render_decl(tree, &member, depth, out);
		}
		DeclKind::Function | DeclKind::Binding | DeclKind::Reexport => {
			if decl::is_public(tree, &member) {
				let _ = render_decl(tree, &member, depth, out);
			}
		}
		DeclKind::Test | DeclKind::Comptime | DeclKind::Other => {}
	}
}

/// Smallest named node spanning the container keyword: the container body
/// whose children are the member declarations.
fn container_node<'t>(
	tree: &SyntaxTree,
	decl_node: Node<'t>,
	container_kw: usize,
) -> Option<Node<'t>> {
	let span = tree.tokens()[container_kw];
	decl_node.named_descendant_for_byte_range(span.start, span.end)
}

fn push_line(out: &mut String, depth: usize, line: &str) {
	for _ in 0..depth * INDENT {
		out.push(' ');
	}
	out.push_str(line);
	out.push('\n');
}

/// Join a token range into one line with deterministic, re-derived spacing.
///
/// The original layout is not consulted; a small rule set decides whether
/// two adjacent tokens bind tightly. Comments inside the range are layout,
/// not signature content, and are dropped.
fn joined(tree: &SyntaxTree, first: usize, last: usize) -> String {
	let mut out = String::new();
	let mut prev: Option<&str> = None;
	let mut prev_is_prefix = false;
	for index in first..last {
		let token = tree.token_text(index);
		if token.starts_with("//") {
			continue;
		}
		if let Some(previous) = prev {
			if !prev_is_prefix && !tight(previous, token) {
				out.push(' ');
			}
		}
		// after `]` a star is a pointer in type position: `[]*const u8`
		prev_is_prefix = matches!(token, "*" | "**" | "&")
			&& prev.is_none_or(|p| !is_value_end(p) || p == "]");
		out.push_str(token);
		prev = Some(token);
	}
	out
}

/// Whether `next` binds to `prev` without a separating space.
fn tight(prev: &str, next: &str) -> bool {
	// no space after opening or access tokens
	if matches!(prev, "(" | "[" | "." | "?" | "!" | "~") {
		return true;
	}
	// no space before closers and separators
	if matches!(next, ")" | "]" | "," | ";" | ":") {
		return true;
	}
	match next {
		// member access binds to a value; enum literals (`= .foo`) do not
		"." => is_value_end(prev),
		// calls and parameter lists open tightly after a name or closer;
		// control keywords keep their space (`while (`, `return (`)
		"(" | "[" => {
			(word_like(prev) && !SPACED_KEYWORDS.contains(&prev)) || matches!(prev, ")" | "]")
		}
		// error unions bind to the error-set name, not to `)`
		"!" => word_like(prev) && !SPACED_KEYWORDS.contains(&prev),
		// `.{}` and `error{...}` literals
		"{" => prev == "error",
		"}" => prev == "{",
		_ => match prev {
			// slice and array types bind their element type: `[]const u8`
			"]" => word_like(next) || matches!(next, "[" | "*" | "?"),
			_ => false,
		},
	}
}

/// Word-shaped token: identifier, keyword, builtin, or numeric literal.
fn word_like(token: &str) -> bool {
	token
		.chars()
		.next()
		.is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '@')
}

/// Token that can end a value expression, making a following `*`/`&`/`.`
/// binary or postfix rather than prefix.
fn is_value_end(token: &str) -> bool {
	if matches!(token, ")" | "]" | "}") || token.starts_with('"') || token.starts_with('\'') {
		return true;
	}
	word_like(token) && !decl::KEYWORDS.contains(&token)
}

#[cfg(test)]
mod tests {
	use std::path::Path;

	use pretty_assertions::assert_eq;

	use super::*;

	fn parse(text: &str) -> SyntaxTree {
		SyntaxTree::parse(Path::new("test.zig"), text.to_string()).expect("parse")
	}

	fn render_first(text: &str) -> String {
		let tree = parse(text);
		let root = tree.root();
		let mut cursor = root.walk();
		let node = root
			.named_children(&mut cursor)
			.find(|node| decl::classify(&tree, *node).kind != DeclKind::Other)
			.expect("declaration");
		let decl = decl::classify(&tree, node);
		let mut out = String::new();
		render_decl(&tree, &decl, 0, &mut out).expect("render");
		out
	}

	#[test]
	fn binding_renders_on_one_line() {
		assert_eq!(
			render_first("pub const bar: u32 = 2;\n"),
			"pub const bar: u32 = 2;\n"
		);
	}

	#[test]
	fn binding_spacing_is_rederived() {
		let out = render_first("pub const bar :u32=2 ;\n");
		assert_eq!(out, "pub const bar: u32 = 2;\n");
	}

	#[test]
	fn function_body_becomes_opaque_marker() {
		assert_eq!(
			render_first("pub fn go(a: u8) !void { return; }\n"),
			"pub fn go(a: u8) !void { ... }\n"
		);
	}

	#[test]
	fn extern_prototype_keeps_its_semicolon() {
		assert_eq!(
			render_first("pub extern \"c\" fn write(fd: i32, len: usize) usize;\n"),
			"pub extern \"c\" fn write(fd: i32, len: usize) usize;\n"
		);
	}

	#[test]
	fn pointer_and_slice_types_stay_tight() {
		assert_eq!(
			render_first("pub fn name(self: *const Node, buf: []u8) ?[]const u8 { return null; }\n"),
			"pub fn name(self: *const Node, buf: []u8) ?[]const u8 { ... }\n"
		);
	}

	#[test]
	fn doc_comments_replay_verbatim_above_the_signature() {
		let out = render_first(concat!(
			"/// Greets.\n",
			"/// Loudly.\n",
			"pub fn greet() void {}\n"
		));
		assert_eq!(out, "/// Greets.\n/// Loudly.\npub fn greet() void { ... }\n");
	}

	#[test]
	fn detached_doc_comment_is_not_attached() {
		let out = render_first("/// Stray.\n\npub fn greet() void {}\n");
		assert_eq!(out, "pub fn greet() void { ... }\n");
	}

	#[test]
	fn container_keeps_fields_and_public_members_only() {
		let out = render_first(concat!(
			"/// A thing.\n",
			"pub const Baz = struct {\n",
			"    z: u8,\n",
			"    const hidden = 1;\n",
			"    pub fn init() Baz { return .{ .z = 0 }; }\n",
			"    fn secret() void {}\n",
			"    test \"baz\" {}\n",
			"};\n"
		));
		assert_eq!(
			out,
			concat!(
				"/// A thing.\n",
				"pub const Baz = struct {\n",
				"    z: u8,\n",
				"    pub fn init() Baz { ... }\n",
				"};\n"
			)
		);
	}

	#[test]
	fn enum_members_render_one_per_line() {
		let out = render_first("pub const Mode = enum { fast, slow };\n");
		assert_eq!(out, "pub const Mode = enum {\n    fast,\n    slow,\n};\n");
	}

	#[test]
	fn empty_container_collapses_to_one_line() {
		assert_eq!(
			render_first("pub const Empty = struct {};\n"),
			"pub const Empty = struct {};\n"
		);
	}

	#[test]
	fn nested_containers_indent_by_depth() {
		let out = render_first(concat!(
			"pub const Outer = struct {\n",
			"    pub const Inner = struct {\n",
			"        n: u8,\n",
			"    };\n",
			"};\n"
		));
		assert_eq!(
			out,
			concat!(
				"pub const Outer = struct {\n",
				"    pub const Inner = struct {\n",
				"        n: u8,\n",
				"    };\n",
				"};\n"
			)
		);
	}

	#[test]
	fn field_doc_comments_survive_inside_containers() {
		let out = render_first(concat!(
			"pub const Config = struct {\n",
			"    /// Upper bound.\n",
			"    limit: u32 = 8,\n",
			"};\n"
		));
		assert_eq!(
			out,
			concat!(
				"pub const Config = struct {\n",
				"    /// Upper bound.\n",
				"    limit: u32 = 8,\n",
				"};\n"
			)
		);
	}

	#[test]
	fn unsupported_shape_is_a_scoped_error() {
		let tree = parse("comptime {}\n");
		let root = tree.root();
		let mut cursor = root.walk();
		let node = root.named_children(&mut cursor).next().expect("node");
		let decl = decl::classify(&tree, node);
		let mut out = String::new();
		assert!(render_decl(&tree, &decl, 0, &mut out).is_err());
		// nothing committed on failure
		assert_eq!(out, "");
	}
}
