//! POSIX ustar header codec for tinytar archives
//!
//! This crate provides the symmetric (parser and builder) implementation of
//! the fixed-layout 512-byte ustar header record: octal ASCII field encoding,
//! checksum computation, and header construction from filesystem metadata.
//! Archive-level sequencing (entry streams, terminator blocks, scanning)
//! lives in `tinytar-archive`; this crate knows nothing about archives,
//! only about single header blocks.
//!
//! # Design Principles
//!
//! - **Symmetric Operations**: Both parsing and building supported
//! - **Wire Fidelity**: Every numeric field is stored as zero-padded octal
//!   text, exactly as the standard tar format requires
//! - **Round-Trip Guarantee**: parse(build(block)) == block

#![warn(missing_docs)]

pub mod ustar;

pub use ustar::{HeaderError, HeaderResult, RawHeader, TarHeader};
