//! Raw 512-byte header record
//!
//! `RawHeader` mirrors the on-disk ustar header byte for byte. All fields
//! are fixed-width byte arrays; interpretation (octal decoding, string
//! trimming) happens in [`super::header::TarHeader`].

use std::io::Cursor;

use binrw::{BinRead, BinWrite};

use super::constants::{BLOCK_SIZE, CHECKSUM_LEN, CHECKSUM_OFFSET};
use super::error::HeaderResult;

/// Raw ustar header block, exactly [`BLOCK_SIZE`] bytes on the wire.
#[derive(BinRead, BinWrite, Debug, Clone, PartialEq, Eq)]
#[brw(big)]
pub struct RawHeader {
    /// Path of the member, NUL padded
    pub name: [u8; 100],
    /// Permission bits, octal ASCII
    pub mode: [u8; 8],
    /// Numeric owner id, octal ASCII
    pub uid: [u8; 8],
    /// Numeric group id, octal ASCII
    pub gid: [u8; 8],
    /// Content length in bytes, octal ASCII
    pub size: [u8; 12],
    /// Modification time in epoch seconds, octal ASCII
    pub mtime: [u8; 12],
    /// Header checksum, octal ASCII
    pub chksum: [u8; 8],
    /// Entry type byte
    pub typeflag: u8,
    /// Link target (unused for regular files, kept for layout)
    pub linkname: [u8; 100],
    /// Format identification bytes
    pub magic: [u8; 6],
    /// Format version bytes
    pub version: [u8; 2],
    /// Owner name, NUL padded
    pub uname: [u8; 32],
    /// Group name, NUL padded
    pub gname: [u8; 32],
    /// Major device number, octal ASCII
    pub devmajor: [u8; 8],
    /// Minor device number, octal ASCII
    pub devminor: [u8; 8],
    /// ustar path prefix (unused, kept for layout)
    pub prefix: [u8; 155],
    /// Zero padding up to the block boundary
    pub padding: [u8; 12],
}

impl Default for RawHeader {
    fn default() -> Self {
        Self {
            name: [0; 100],
            mode: [0; 8],
            uid: [0; 8],
            gid: [0; 8],
            size: [0; 12],
            mtime: [0; 12],
            chksum: [0; 8],
            typeflag: 0,
            linkname: [0; 100],
            magic: [0; 6],
            version: [0; 2],
            uname: [0; 32],
            gname: [0; 32],
            devmajor: [0; 8],
            devminor: [0; 8],
            prefix: [0; 155],
            padding: [0; 12],
        }
    }
}

impl RawHeader {
    /// Serialize the record into one block.
    pub fn to_block(&self) -> HeaderResult<[u8; BLOCK_SIZE]> {
        let mut block = [0u8; BLOCK_SIZE];
        let mut cursor = Cursor::new(&mut block[..]);
        self.write(&mut cursor)?;
        Ok(block)
    }

    /// Reinterpret one block as a header record.
    ///
    /// No validation happens here: the checksum is not verified and the
    /// magic bytes are not checked. See [`super::TarHeader::verify_checksum`]
    /// for opt-in strict verification.
    pub fn from_block(block: &[u8; BLOCK_SIZE]) -> HeaderResult<Self> {
        let mut cursor = Cursor::new(&block[..]);
        Ok(Self::read(&mut cursor)?)
    }
}

/// Compute the header checksum of a block: the unsigned sum of all 512
/// bytes with the chksum field counted as ASCII spaces.
pub fn checksum(block: &[u8; BLOCK_SIZE]) -> u32 {
    let chksum_field = CHECKSUM_OFFSET..CHECKSUM_OFFSET + CHECKSUM_LEN;
    block
        .iter()
        .enumerate()
        .map(|(i, b)| {
            if chksum_field.contains(&i) {
                u32::from(b' ')
            } else {
                u32::from(*b)
            }
        })
        .sum()
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn record_is_exactly_one_block() {
        let block = RawHeader::default()
            .to_block()
            .expect("serialization should succeed");
        assert_eq!(block.len(), BLOCK_SIZE);
    }

    #[test]
    fn block_round_trip() {
        let mut raw = RawHeader::default();
        raw.name[..5].copy_from_slice(b"x.txt");
        raw.typeflag = b'0';
        raw.magic.copy_from_slice(b"ustar\0");
        raw.version.copy_from_slice(b"00");

        let block = raw.to_block().expect("serialization should succeed");
        let parsed = RawHeader::from_block(&block).expect("parse should succeed");
        assert_eq!(parsed, raw);
    }

    #[test]
    fn checksum_of_zero_block_is_eight_spaces() {
        // Every byte zero except the chksum field, which counts as spaces.
        let block = [0u8; BLOCK_SIZE];
        assert_eq!(checksum(&block), 8 * u32::from(b' '));
    }

    #[test]
    fn checksum_ignores_stored_chksum_bytes() {
        let mut a = [0u8; BLOCK_SIZE];
        let mut b = [0u8; BLOCK_SIZE];
        a[CHECKSUM_OFFSET..CHECKSUM_OFFSET + CHECKSUM_LEN].fill(b'7');
        b[CHECKSUM_OFFSET..CHECKSUM_OFFSET + CHECKSUM_LEN].fill(b'1');
        assert_eq!(checksum(&a), checksum(&b));
    }
}
