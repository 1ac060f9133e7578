//! Archive scanner
//!
//! Walks an existing archive block by block: read one header block,
//! then either seek past the member's content (listing) or copy exactly
//! `size` bytes out of its `ceil(size/512)` content blocks (extraction).
//!
//! The logical end of content is fixed at construction as the file length
//! minus the two terminator blocks. The archive is assumed to end in a
//! valid terminator; anything else is undefined.

use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};

use tinytar_formats::TarHeader;
use tinytar_formats::ustar::constants::BLOCK_SIZE;

use crate::error::{ArchiveError, ArchiveResult};

/// Block-by-block reader over an existing archive.
pub struct ArchiveScanner<R: Read + Seek> {
    reader: R,
    /// Offset where the terminator blocks begin.
    end: u64,
}

impl<R: Read + Seek> ArchiveScanner<R> {
    /// Set up a scan: fix the logical end at `len - 2*512` (saturating to
    /// zero for anything shorter) and rewind to the first block.
    pub fn new(mut reader: R) -> ArchiveResult<Self> {
        let len = reader.seek(SeekFrom::End(0))?;
        let end = len.saturating_sub(2 * BLOCK_SIZE as u64);
        reader.seek(SeekFrom::Start(0))?;
        Ok(Self { reader, end })
    }

    /// Read the next header block, or `None` once the terminator is
    /// reached.
    ///
    /// A short read of a header block means the archive is truncated and
    /// aborts the whole scan with [`ArchiveError::Corrupt`].
    pub fn next_header(&mut self) -> ArchiveResult<Option<TarHeader>> {
        let pos = self.reader.stream_position()?;
        if pos >= self.end {
            return Ok(None);
        }

        let mut block = [0u8; BLOCK_SIZE];
        read_block(&mut self.reader, &mut block)?;
        Ok(Some(TarHeader::parse(&block)?))
    }

    /// Seek past a member's content without reading it.
    pub fn skip_content(&mut self, size: u64) -> ArchiveResult<()> {
        let span = content_blocks(size) * BLOCK_SIZE as u64;
        self.reader.seek(SeekFrom::Current(span as i64))?;
        Ok(())
    }

    /// Copy a member's content to `out`: read every content block but
    /// write only the first `size` bytes, so trailing padding never
    /// reaches the output.
    pub fn copy_content(&mut self, size: u64, out: &mut impl Write) -> ArchiveResult<()> {
        let mut remaining = size;
        let mut buf = [0u8; BLOCK_SIZE];
        for _ in 0..content_blocks(size) {
            read_block(&mut self.reader, &mut buf)?;
            let take = remaining.min(BLOCK_SIZE as u64) as usize;
            out.write_all(&buf[..take])?;
            remaining -= take as u64;
        }
        Ok(())
    }
}

/// Blocks occupied by `size` content bytes.
fn content_blocks(size: u64) -> u64 {
    size.div_ceil(BLOCK_SIZE as u64)
}

fn read_block(reader: &mut impl Read, block: &mut [u8; BLOCK_SIZE]) -> ArchiveResult<()> {
    reader.read_exact(block).map_err(|e| {
        if e.kind() == ErrorKind::UnexpectedEof {
            ArchiveError::Corrupt("short read of archive block".into())
        } else {
            ArchiveError::Io(e)
        }
    })
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use std::io::Cursor;

    use pretty_assertions::assert_eq;
    use tinytar_formats::ustar::constants::CHECKSUM_OFFSET;

    use super::*;

    /// Hand-build a header block with just a name and an octal size field.
    fn header_block(name: &str, size: u64) -> [u8; BLOCK_SIZE] {
        let mut block = [0u8; BLOCK_SIZE];
        block[..name.len()].copy_from_slice(name.as_bytes());
        let octal = format!("{size:011o}");
        block[124..135].copy_from_slice(octal.as_bytes());
        block[156] = b'0';
        block[CHECKSUM_OFFSET..CHECKSUM_OFFSET + 8].fill(b' ');
        block
    }

    #[test]
    fn empty_archive_yields_no_headers() {
        // Just the two terminator blocks.
        let bytes = vec![0u8; 2 * BLOCK_SIZE];
        let mut scanner = ArchiveScanner::new(Cursor::new(bytes)).expect("scanner");
        assert!(scanner.next_header().expect("scan").is_none());
    }

    #[test]
    fn shorter_than_terminator_yields_no_headers() {
        let bytes = vec![0u8; 700];
        let mut scanner = ArchiveScanner::new(Cursor::new(bytes)).expect("scanner");
        assert!(scanner.next_header().expect("scan").is_none());
    }

    #[test]
    fn walks_headers_and_skips_content() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&header_block("a.txt", 3));
        let mut content = [0u8; BLOCK_SIZE];
        content[..3].copy_from_slice(b"one");
        bytes.extend_from_slice(&content);
        bytes.extend_from_slice(&header_block("b.txt", 0));
        bytes.extend_from_slice(&[0u8; 2 * BLOCK_SIZE]);

        let mut scanner = ArchiveScanner::new(Cursor::new(bytes)).expect("scanner");

        let first = scanner.next_header().expect("scan").expect("first header");
        assert_eq!(first.name(), "a.txt");
        assert_eq!(first.size(), 3);
        scanner.skip_content(first.size()).expect("skip");

        let second = scanner.next_header().expect("scan").expect("second header");
        assert_eq!(second.name(), "b.txt");
        assert_eq!(second.size(), 0);
        scanner.skip_content(second.size()).expect("skip");

        assert!(scanner.next_header().expect("scan").is_none());
    }

    #[test]
    fn copy_content_drops_padding() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&header_block("a.txt", 5));
        let mut content = [0xAAu8; BLOCK_SIZE];
        content[..5].copy_from_slice(b"hello");
        bytes.extend_from_slice(&content);
        bytes.extend_from_slice(&[0u8; 2 * BLOCK_SIZE]);

        let mut scanner = ArchiveScanner::new(Cursor::new(bytes)).expect("scanner");
        let header = scanner.next_header().expect("scan").expect("header");

        let mut out = Vec::new();
        scanner
            .copy_content(header.size(), &mut out)
            .expect("copy should succeed");
        assert_eq!(out, b"hello");
    }

    #[test]
    fn lying_size_field_is_corrupt() {
        // Header claims 5 blocks of content but only one exists before
        // the terminator.
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&header_block("liar.txt", 5 * BLOCK_SIZE as u64));
        bytes.extend_from_slice(&[1u8; BLOCK_SIZE]);
        bytes.extend_from_slice(&[0u8; 2 * BLOCK_SIZE]);

        let mut scanner = ArchiveScanner::new(Cursor::new(bytes)).expect("scanner");
        let header = scanner.next_header().expect("scan").expect("header");

        let mut out = Vec::new();
        let err = scanner
            .copy_content(header.size(), &mut out)
            .expect_err("content must run out");
        assert!(matches!(err, ArchiveError::Corrupt(_)));
    }
}
