//! Error taxonomy for a zigdoc run.
//!
//! Every variant here is fatal: the driving loop prints a one-line
//! diagnostic and exits non-zero. Per-declaration render failures are not
//! part of this taxonomy; they surface as [`crate::scan::ScanWarning`]s and
//! never abort the batch.

use std::path::PathBuf;

/// Aggregate errors produced by the zigdoc core.
#[derive(Debug, thiserror::Error)]
pub enum ZigdocError {
	/// Malformed source: the parser produced no tree or a tree with errors.
	#[error("failed to parse '{}': {message}", .path.display())]
	Parse {
		/// File that failed to parse.
		path: PathBuf,
		/// Parser-provided detail.
		message: String,
	},
	/// Failed to perform IO operations.
	#[error("{0}")]
	Io(#[from] std::io::Error),
	/// The location argument resolved to nothing scannable.
	#[error("{0}")]
	InvalidLocation(String),
	/// `zig env` failed or produced unusable output.
	#[error("{0}")]
	Toolchain(String),
}

/// Result type returned by the zigdoc library.
pub type Result<T> = std::result::Result<T, ZigdocError>;
