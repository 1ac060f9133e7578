//! Archive mutator operations
//!
//! The archive-level operations compose the writer and scanner. All of
//! them take the archive path and the file set explicitly; there is no
//! shared state. Any failure aborts the whole multi-file operation
//! immediately, leaving whatever was already written on disk.

use std::fs::{File, OpenOptions};
use std::path::Path;

use tinytar_formats::ustar::constants::BLOCK_SIZE;
use tracing::{debug, info};

use crate::error::{ArchiveError, ArchiveResult};
use crate::file_set::FileSet;
use crate::scanner::ArchiveScanner;
use crate::writer::ArchiveWriter;

/// Terminator blocks trimmed off before an in-place append.
const TRAILING_BLOCKS: u64 = 2;

/// Build a new archive at `archive` containing exactly the files in
/// `files`, in set order. Truncates any existing file at that path.
pub fn create(archive: impl AsRef<Path>, files: &FileSet) -> ArchiveResult<()> {
    let archive = archive.as_ref();
    info!("creating {} with {} members", archive.display(), files.len());

    let out = File::create(archive).map_err(|source| ArchiveError::Open {
        path: archive.display().to_string(),
        source,
    })?;

    let mut writer = ArchiveWriter::new(out);
    for name in files.iter() {
        writer.append_path(name)?;
    }
    writer.finish()?;
    Ok(())
}

/// Add `files` to the end of an existing archive, without checking
/// whether they are already members.
///
/// Precondition: the archive ends in a valid two-block terminator. The
/// trailing `2 * 512` bytes are trimmed by offset arithmetic alone and
/// are trusted to be that terminator; a malformed archive is silently
/// corrupted further. An archive shorter than two blocks is truncated to
/// zero, which only ever happens to already-broken input.
pub fn append(archive: impl AsRef<Path>, files: &FileSet) -> ArchiveResult<()> {
    let archive = archive.as_ref();
    info!("appending {} members to {}", files.len(), archive.display());

    remove_trailing_blocks(archive, TRAILING_BLOCKS)?;

    let out = OpenOptions::new()
        .append(true)
        .open(archive)
        .map_err(|source| ArchiveError::Open {
            path: archive.display().to_string(),
            source,
        })?;

    let mut writer = ArchiveWriter::new(out);
    for name in files.iter() {
        writer.append_path(name)?;
    }
    writer.finish()?;
    Ok(())
}

/// Re-append `files` to the archive, but only if every one is already a
/// member by name.
///
/// On success the new entries shadow the old ones: listing keeps the
/// first occurrence of each name, extraction keeps the last-written
/// content. On [`ArchiveError::NotSubset`] the archive is left
/// byte-identical to its pre-call state.
pub fn update(archive: impl AsRef<Path>, files: &FileSet) -> ArchiveResult<()> {
    let archive = archive.as_ref();
    let members = list(archive)?;

    if !files.is_subset_of(&members) {
        let missing = files
            .iter()
            .filter(|name| !members.contains(name))
            .map(String::from)
            .collect();
        return Err(ArchiveError::NotSubset { missing });
    }

    append(archive, files)
}

/// Collect the archive's member names, first occurrence of each name
/// winning, in order of first appearance.
pub fn list(archive: impl AsRef<Path>) -> ArchiveResult<FileSet> {
    let archive = archive.as_ref();
    let file = File::open(archive).map_err(|source| ArchiveError::Open {
        path: archive.display().to_string(),
        source,
    })?;

    let mut scanner = ArchiveScanner::new(file)?;
    let mut members = FileSet::new();
    while let Some(header) = scanner.next_header()? {
        members.insert(header.name());
        scanner.skip_content(header.size())?;
    }
    debug!("{} holds {} members", archive.display(), members.len());
    Ok(members)
}

/// Extract every member into the current directory.
///
/// Duplicate names are each written in turn, so the last occurrence wins
/// on disk. This is deliberately the opposite of [`list`]'s first-seen
/// policy: it is what makes [`update`]'s shadow-replacement observable.
pub fn extract(archive: impl AsRef<Path>) -> ArchiveResult<()> {
    extract_into(archive, ".")
}

/// Extract every member into `dir`, naming each output file after the
/// member's header name.
///
/// A failed output-file creation aborts immediately; files extracted
/// before the failure stay on disk.
pub fn extract_into(archive: impl AsRef<Path>, dir: impl AsRef<Path>) -> ArchiveResult<()> {
    let archive = archive.as_ref();
    let dir = dir.as_ref();
    let file = File::open(archive).map_err(|source| ArchiveError::Open {
        path: archive.display().to_string(),
        source,
    })?;

    let mut scanner = ArchiveScanner::new(file)?;
    while let Some(header) = scanner.next_header()? {
        let name = header.name();
        let path = dir.join(&name);
        let mut out = File::create(&path).map_err(|source| ArchiveError::Open {
            path: path.display().to_string(),
            source,
        })?;
        scanner.copy_content(header.size(), &mut out)?;
        debug!("extracted {} ({} bytes)", name, header.size());
    }
    Ok(())
}

/// Shorten the file at `archive` by `blocks * 512` bytes, saturating at
/// an empty file.
fn remove_trailing_blocks(archive: &Path, blocks: u64) -> ArchiveResult<()> {
    let file = OpenOptions::new()
        .write(true)
        .open(archive)
        .map_err(|source| ArchiveError::Open {
            path: archive.display().to_string(),
            source,
        })?;
    let len = file.metadata()?.len();
    file.set_len(len.saturating_sub(blocks * BLOCK_SIZE as u64))?;
    Ok(())
}
