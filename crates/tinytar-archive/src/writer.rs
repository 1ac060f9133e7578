//! Block stream writer
//!
//! Writes members as a 512-byte header block followed by content in
//! 512-byte chunks, zero-padding the last partial block. A finished
//! stream always ends with the two-block terminator.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use tinytar_formats::TarHeader;
use tinytar_formats::ustar::constants::BLOCK_SIZE;
use tracing::debug;

use crate::error::{ArchiveError, ArchiveResult};

const ZERO_BLOCK: [u8; BLOCK_SIZE] = [0; BLOCK_SIZE];

/// Number of padding bytes needed after `len` content bytes to reach a
/// block boundary: 0 exactly when `len` is a block multiple (including 0).
pub fn padding_len(len: u64) -> u64 {
    let block = BLOCK_SIZE as u64;
    (block - len % block) % block
}

/// Sequential writer of archive members over any byte sink.
///
/// Generic over `W` so the archive mutator can hand it a freshly created
/// or append-positioned file and tests can drive it with an in-memory
/// cursor.
pub struct ArchiveWriter<W: Write> {
    writer: W,
    bytes_written: u64,
}

impl<W: Write> ArchiveWriter<W> {
    /// Create a writer over `writer`, which must be positioned where the
    /// first header block belongs.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            bytes_written: 0,
        }
    }

    /// Write one member: header block, content in 512-byte chunks, and
    /// the zero padding for the last partial block.
    ///
    /// Returns the bytes written for this member (header + content +
    /// padding). The first error aborts, leaving the stream partially
    /// written.
    pub fn append_path(&mut self, path: impl AsRef<Path>) -> ArchiveResult<u64> {
        let path = path.as_ref();
        let mut source = File::open(path).map_err(|source| ArchiveError::Open {
            path: path.display().to_string(),
            source,
        })?;

        let header = TarHeader::for_path(path)?;
        self.writer.write_all(&header.to_block()?)?;

        let mut content = 0u64;
        let mut buf = [0u8; BLOCK_SIZE];
        loop {
            let n = source.read(&mut buf)?;
            if n == 0 {
                break;
            }
            self.writer.write_all(&buf[..n])?;
            content += n as u64;
        }

        let pad = padding_len(content);
        if pad > 0 {
            self.writer.write_all(&ZERO_BLOCK[..pad as usize])?;
        }

        let written = BLOCK_SIZE as u64 + content + pad;
        self.bytes_written += written;
        debug!(
            "archived {} ({} content bytes, {} padding)",
            path.display(),
            content,
            pad
        );
        Ok(written)
    }

    /// Write the archive terminator: exactly two all-zero blocks.
    ///
    /// Always the last action of a full archive write, never emitted
    /// mid-stream.
    pub fn write_terminator(&mut self) -> ArchiveResult<()> {
        self.writer.write_all(&ZERO_BLOCK)?;
        self.writer.write_all(&ZERO_BLOCK)?;
        self.bytes_written += 2 * BLOCK_SIZE as u64;
        Ok(())
    }

    /// Terminate the stream, flush, and hand back the writer.
    pub fn finish(mut self) -> ArchiveResult<W> {
        self.write_terminator()?;
        self.writer.flush()?;
        Ok(self.writer)
    }

    /// Total bytes written so far.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }
}
