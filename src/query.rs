//! Identifier query modes.

/// The identifier-matching mode requested by the caller.
///
/// The two "no identifier given" states are explicit, named sentinels rather
/// than inferred behavior: a bare location is [`Query::All`] (browse mode)
/// and `-s` without an identifier is [`Query::None`] (file doc comments
/// only).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
	/// Matches nothing; selects the "print file-level doc comment only" mode.
	None,
	/// Matches every declaration whose identifier extraction succeeded.
	All,
	/// ASCII-case-insensitive full match.
	Exact(String),
	/// ASCII-case-insensitive contiguous substring match.
	Substring(String),
}

impl Query {
	/// Whether the scanner emits the file's leading module doc comment
	/// block before processing declarations.
	pub fn wants_module_docs(&self) -> bool {
		matches!(self, Self::None | Self::All)
	}

	/// Pure matcher over an optional extracted identifier.
	///
	/// Declarations without a stable name (re-exports, fields reached some
	/// other way) never match any query.
	pub fn matches(&self, identifier: Option<&str>) -> bool {
		let Some(name) = identifier else {
			return false;
		};
		match self {
			Self::None => false,
			Self::All => true,
			Self::Exact(wanted) => name.eq_ignore_ascii_case(wanted),
			Self::Substring(fragment) => {
				name.to_ascii_lowercase().contains(&fragment.to_ascii_lowercase())
			}
		}
	}
}
