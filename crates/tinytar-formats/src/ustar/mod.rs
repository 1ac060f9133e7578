//! ustar header block codec
//!
//! A tar archive is a sequence of 512-byte blocks. Each member starts with
//! one header block describing the file, followed by its content rounded up
//! to whole blocks. This module implements the header block only.
//!
//! # Header layout
//!
//! ```text
//! offset 0x000: [u8; 100] name      (path, NUL padded)
//! offset 0x064: [u8;   8] mode      (7 octal digits + NUL)
//! offset 0x06C: [u8;   8] uid       (7 octal digits + NUL)
//! offset 0x074: [u8;   8] gid       (7 octal digits + NUL)
//! offset 0x07C: [u8;  12] size      (11 octal digits + NUL)
//! offset 0x088: [u8;  12] mtime     (11 octal digits + NUL)
//! offset 0x094: [u8;   8] chksum    (7 octal digits + NUL)
//! offset 0x09C: u8        typeflag  ('0' = regular file)
//! offset 0x09D: [u8; 100] linkname  (unused, layout only)
//! offset 0x101: [u8;   6] magic     ("ustar\0")
//! offset 0x107: [u8;   2] version   ("00")
//! offset 0x109: [u8;  32] uname     (owner name, NUL padded)
//! offset 0x129: [u8;  32] gname     (group name, NUL padded)
//! offset 0x149: [u8;   8] devmajor  (7 octal digits + NUL)
//! offset 0x151: [u8;   8] devminor  (7 octal digits + NUL)
//! offset 0x159: [u8; 155] prefix    (unused, layout only)
//! offset 0x1F4: [u8;  12] padding to 512 bytes
//! ```
//!
//! The checksum is the unsigned byte sum of the whole block with the
//! chksum field itself counted as eight ASCII spaces.

mod block;
mod error;
mod header;
pub mod octal;
#[cfg(unix)]
mod owner;

pub use block::{RawHeader, checksum};
pub use error::{HeaderError, HeaderResult};
pub use header::TarHeader;

/// ustar format constants
pub mod constants {
    /// Fixed block size: every tar read and write is a multiple of this.
    pub const BLOCK_SIZE: usize = 512;

    /// Format identification bytes, NUL terminated.
    pub const MAGIC: &[u8; 6] = b"ustar\0";

    /// Format version bytes (no NUL, per the standard).
    pub const VERSION: &[u8; 2] = b"00";

    /// Type flag for a regular file, the only type written.
    pub const TYPEFLAG_REGULAR: u8 = b'0';

    /// Byte offset of the chksum field within the header block.
    pub const CHECKSUM_OFFSET: usize = 148;

    /// Length of the chksum field in bytes.
    pub const CHECKSUM_LEN: usize = 8;

    /// Maximum path length the name field can hold.
    pub const NAME_LEN: usize = 100;
}
