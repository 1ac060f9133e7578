//! Block stream writer, scanner, and mutator for tinytar archives
//!
//! An archive is an ordered sequence of (header block, content blocks)
//! pairs terminated by exactly two all-zero 512-byte blocks. Content for a
//! member occupies `ceil(size / 512)` blocks, the last one zero-padded.
//!
//! This crate provides the three layers on top of the header codec in
//! `tinytar-formats`:
//!
//! - [`ArchiveWriter`]: one member's header + content + padding, and the
//!   two-block terminator
//! - [`ArchiveScanner`]: block-by-block walk of an existing archive,
//!   skipping or copying member content
//! - [`ops`]: the archive-level operations (create, append, update, list,
//!   extract) composing the two
//!
//! Everything is single-threaded, synchronous, blocking I/O. Operations
//! are atomic only at block-write granularity: a failure mid-operation
//! leaves the archive or extracted files partially written, and callers
//! must treat any reported failure as "archive state unknown".

#![warn(missing_docs)]

pub mod error;
pub mod file_set;
pub mod ops;
pub mod scanner;
pub mod writer;

pub use error::{ArchiveError, ArchiveResult};
pub use file_set::FileSet;
pub use scanner::ArchiveScanner;
pub use writer::ArchiveWriter;
