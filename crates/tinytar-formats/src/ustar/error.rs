//! Header codec error types

use thiserror::Error;

/// Header codec error type
#[derive(Debug, Error)]
pub enum HeaderError {
    /// Source file metadata could not be read
    #[error("failed to stat {path}: {source}")]
    Stat {
        /// Path that failed to stat
        path: String,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// No user name exists for the file's owner uid
    #[error("no user name for uid {uid} (owner of {path})")]
    OwnerLookup {
        /// Path whose owner could not be resolved
        path: String,
        /// Numeric owner id
        uid: u32,
    },

    /// No group name exists for the file's group gid
    #[error("no group name for gid {gid} (group of {path})")]
    GroupLookup {
        /// Path whose group could not be resolved
        path: String,
        /// Numeric group id
        gid: u32,
    },

    /// Path does not fit in the 100-byte name field
    #[error("path {path} is {len} bytes, longer than the 100-byte name field")]
    NameTooLong {
        /// Offending path
        path: String,
        /// Length in bytes
        len: usize,
    },

    /// Numeric value does not fit its octal field
    #[error("value {value} does not fit in {digits} octal digits")]
    FieldOverflow {
        /// Value that overflowed
        value: u64,
        /// Digits available in the field
        digits: usize,
    },

    /// Stored checksum does not match the block content
    #[error("header checksum mismatch: stored {stored:o}, computed {computed:o}")]
    ChecksumMismatch {
        /// Checksum stored in the chksum field
        stored: u32,
        /// Checksum recomputed over the block
        computed: u32,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Binary layout error
    #[error("binary layout error: {0}")]
    BinRw(#[from] binrw::Error),
}

/// Result type for header codec operations
pub type HeaderResult<T> = Result<T, HeaderError>;
