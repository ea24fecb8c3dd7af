//! Core library for zigdoc: search `pub` declarations and doc comments in
//! Zig source files.
//!
//! The pipeline mirrors the CLI flow: resolve a location to files, parse
//! each file into a [`parse::SyntaxTree`], classify its top-level
//! declarations, match extracted identifiers against the [`query::Query`],
//! and render the public surface of each accepted declaration. It is
//! UI-agnostic and usable by any frontend.

/// Declaration classification: kinds, visibility, identifiers.
pub mod decl;

/// Error taxonomy and the crate-wide `Result` alias.
pub mod error;

/// Parsing and the per-file syntax tree wrapper.
pub mod parse;

/// Identifier query modes and the pure matcher.
pub mod query;

/// Selective rendering of the public surface of declarations.
pub mod render;

/// Per-file scan orchestration.
pub mod scan;

/// Location resolution (files, directories, the `std` alias).
pub mod source;

pub use crate::error::{Result, ZigdocError};
pub use crate::query::Query;
pub use crate::scan::{RenderContext, ScanWarning, scan_file};
