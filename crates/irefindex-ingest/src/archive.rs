//! Zip member access
//!
//! iRefIndex ships each organism file as a single-member zip. The member is read
//! in place through a buffered reader, never extracted to disk.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use irefindex_common::{IrefError, Result};
use tracing::debug;
use zip::result::ZipError;
use zip::ZipArchive;

/// Run `f` over a buffered reader of `member` inside `archive`.
///
/// Falls back to matching the member's base name when the archive stores it
/// under a directory.
pub fn with_member<T, F>(archive: &Path, member: &str, f: F) -> Result<T>
where
    F: FnOnce(&mut dyn BufRead) -> T,
{
    let file = File::open(archive)?;
    let mut zip = ZipArchive::new(BufReader::new(file))
        .map_err(|e| archive_error(archive, e))?;

    let name = match zip.index_for_name(member) {
        Some(_) => member.to_string(),
        None => find_by_basename(&zip, member).ok_or_else(|| IrefError::MissingMember {
            archive: archive.display().to_string(),
            member: member.to_string(),
            available: zip.file_names().collect::<Vec<_>>().join(", "),
        })?,
    };

    let entry = zip.by_name(&name).map_err(|e| archive_error(archive, e))?;
    debug!(
        archive = %archive.display(),
        member = %name,
        size = entry.size(),
        "Reading archive member"
    );

    let mut reader = BufReader::with_capacity(1 << 20, entry);
    Ok(f(&mut reader))
}

fn find_by_basename<R: std::io::Read + std::io::Seek>(
    zip: &ZipArchive<R>,
    member: &str,
) -> Option<String> {
    zip.file_names()
        .find(|name| name.rsplit('/').next() == Some(member))
        .map(str::to_string)
}

fn archive_error(archive: &Path, e: ZipError) -> IrefError {
    match e {
        ZipError::Io(io) => IrefError::Io(io),
        other => IrefError::Archive(format!("{}: {}", archive.display(), other)),
    }
}
