//! Typed header view and construction from filesystem metadata

use std::path::Path;

use super::block::{RawHeader, checksum};
use super::constants::{BLOCK_SIZE, MAGIC, NAME_LEN, TYPEFLAG_REGULAR, VERSION};
use super::error::{HeaderError, HeaderResult};
use super::octal;

/// One archive member's header: a [`RawHeader`] with typed accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TarHeader {
    raw: RawHeader,
}

impl TarHeader {
    /// Build a header describing the regular file at `path`.
    ///
    /// Populates every field from filesystem metadata, resolves the numeric
    /// uid/gid to account names (failing when the host has no matching
    /// entry), tags the entry as a regular file, and computes the checksum
    /// last over the fully populated record.
    #[cfg(unix)]
    pub fn for_path(path: impl AsRef<Path>) -> HeaderResult<Self> {
        use std::os::unix::fs::MetadataExt;

        use super::owner;

        let path = path.as_ref();
        let display = path.display().to_string();

        let meta = std::fs::metadata(path).map_err(|source| HeaderError::Stat {
            path: display.clone(),
            source,
        })?;

        let name = path.as_os_str().as_encoded_bytes();
        if name.len() > NAME_LEN {
            return Err(HeaderError::NameTooLong {
                path: display,
                len: name.len(),
            });
        }

        let mut raw = RawHeader::default();
        raw.name[..name.len()].copy_from_slice(name);
        octal::format_into(&mut raw.mode, u64::from(meta.mode() & 0o7777))?;
        octal::format_into(&mut raw.uid, u64::from(meta.uid()))?;
        octal::format_into(&mut raw.gid, u64::from(meta.gid()))?;
        octal::format_into(&mut raw.size, meta.len())?;
        octal::format_into(&mut raw.mtime, meta.mtime().max(0) as u64)?;
        raw.typeflag = TYPEFLAG_REGULAR;
        raw.magic = *MAGIC;
        raw.version = *VERSION;

        let uname = owner::user_name(meta.uid()).ok_or_else(|| HeaderError::OwnerLookup {
            path: display.clone(),
            uid: meta.uid(),
        })?;
        copy_name(&mut raw.uname, uname.as_bytes());
        let gname = owner::group_name(meta.gid()).ok_or_else(|| HeaderError::GroupLookup {
            path: display,
            gid: meta.gid(),
        })?;
        copy_name(&mut raw.gname, gname.as_bytes());

        let (devmajor, devminor) = owner::device_numbers(meta.dev());
        octal::format_into(&mut raw.devmajor, devmajor)?;
        octal::format_into(&mut raw.devminor, devminor)?;

        // Checksum goes in last, over the record with the field blanked.
        let sum = checksum(&raw.to_block()?);
        octal::format_into(&mut raw.chksum, u64::from(sum))?;

        Ok(Self { raw })
    }

    /// Reinterpret a raw block as a header.
    ///
    /// The checksum is not validated; call [`Self::verify_checksum`] for
    /// strict checking.
    pub fn parse(block: &[u8; BLOCK_SIZE]) -> HeaderResult<Self> {
        Ok(Self {
            raw: RawHeader::from_block(block)?,
        })
    }

    /// Serialize the header into one block.
    pub fn to_block(&self) -> HeaderResult<[u8; BLOCK_SIZE]> {
        self.raw.to_block()
    }

    /// Recompute the checksum and compare it against the stored field.
    pub fn verify_checksum(&self) -> HeaderResult<()> {
        let stored = octal::parse(&self.raw.chksum) as u32;
        let computed = checksum(&self.to_block()?);
        if stored == computed {
            Ok(())
        } else {
            Err(HeaderError::ChecksumMismatch { stored, computed })
        }
    }

    /// Member path as recorded in the name field.
    pub fn name(&self) -> String {
        field_string(&self.raw.name)
    }

    /// Content length in bytes.
    pub fn size(&self) -> u64 {
        octal::parse(&self.raw.size)
    }

    /// Permission bits.
    pub fn mode(&self) -> u32 {
        octal::parse(&self.raw.mode) as u32
    }

    /// Numeric owner id.
    pub fn uid(&self) -> u32 {
        octal::parse(&self.raw.uid) as u32
    }

    /// Numeric group id.
    pub fn gid(&self) -> u32 {
        octal::parse(&self.raw.gid) as u32
    }

    /// Modification time in epoch seconds.
    pub fn mtime(&self) -> u64 {
        octal::parse(&self.raw.mtime)
    }

    /// Owner account name.
    pub fn uname(&self) -> String {
        field_string(&self.raw.uname)
    }

    /// Group name.
    pub fn gname(&self) -> String {
        field_string(&self.raw.gname)
    }

    /// Entry type byte.
    pub fn typeflag(&self) -> u8 {
        self.raw.typeflag
    }

    /// Major device number.
    pub fn devmajor(&self) -> u64 {
        octal::parse(&self.raw.devmajor)
    }

    /// Minor device number.
    pub fn devminor(&self) -> u64 {
        octal::parse(&self.raw.devminor)
    }

    /// Checksum value stored in the chksum field.
    pub fn stored_checksum(&self) -> u32 {
        octal::parse(&self.raw.chksum) as u32
    }

    /// Access to the raw record.
    pub fn raw(&self) -> &RawHeader {
        &self.raw
    }
}

/// Copy `src` into a NUL-padded name field, truncating to the field width.
fn copy_name(field: &mut [u8], src: &[u8]) {
    let n = src.len().min(field.len());
    field[..n].copy_from_slice(&src[..n]);
}

/// Decode a NUL-padded byte field to a string, lossily.
fn field_string(field: &[u8]) -> String {
    let end = field.iter().position(|b| *b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ustar::constants::CHECKSUM_OFFSET;

    fn sample_file(dir: &tempfile::TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).expect("create sample file");
        f.write_all(content).expect("write sample content");
        path
    }

    #[test]
    fn for_path_fills_metadata() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = sample_file(&dir, "hello.txt", b"hi there");

        let header = TarHeader::for_path(&path).expect("header should build");
        assert_eq!(header.name(), path.display().to_string());
        assert_eq!(header.size(), 8);
        assert_eq!(header.typeflag(), TYPEFLAG_REGULAR);
        assert_eq!(&header.raw().magic, MAGIC);
        assert_eq!(&header.raw().version, VERSION);
        assert!(!header.uname().is_empty());
        assert!(!header.gname().is_empty());
        assert!(header.mtime() > 0);
    }

    #[test]
    fn for_path_checksum_is_valid() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = sample_file(&dir, "sum.txt", b"checksum me");

        let header = TarHeader::for_path(&path).expect("header should build");
        header.verify_checksum().expect("checksum should verify");

        let block = header.to_block().expect("serialize");
        assert_eq!(header.stored_checksum(), checksum(&block));
    }

    #[test]
    fn for_path_rejects_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = TarHeader::for_path(dir.path().join("absent")).expect_err("stat must fail");
        assert!(matches!(err, HeaderError::Stat { .. }));
    }

    #[test]
    fn for_path_rejects_long_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        let long = "n".repeat(120);
        let path = sample_file(&dir, &long, b"x");
        let err = TarHeader::for_path(&path).expect_err("name must not fit");
        assert!(matches!(err, HeaderError::NameTooLong { .. }));
    }

    #[test]
    fn parse_does_not_validate_checksum() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = sample_file(&dir, "lax.txt", b"data");

        let mut block = TarHeader::for_path(&path)
            .expect("header should build")
            .to_block()
            .expect("serialize");
        // Corrupt the stored checksum; decode still accepts the block.
        block[CHECKSUM_OFFSET] = b'7';
        block[CHECKSUM_OFFSET + 1] = b'7';

        let header = TarHeader::parse(&block).expect("lenient parse should accept");
        assert_eq!(header.name(), path.display().to_string());
        assert!(header.verify_checksum().is_err());
    }

    #[test]
    fn header_round_trips_through_block() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = sample_file(&dir, "round.txt", b"round trip");

        let header = TarHeader::for_path(&path).expect("header should build");
        let block = header.to_block().expect("serialize");
        let parsed = TarHeader::parse(&block).expect("parse");
        assert_eq!(parsed, header);
        assert_eq!(parsed.size(), 10);
        assert_eq!(parsed.uid(), header.uid());
        assert_eq!(parsed.mode(), header.mode());
    }
}
