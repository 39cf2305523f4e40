use log::debug;
use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use zip::ZipArchive;
use zip::result::ZipError;

use crate::errors::ArchiveError;

// @module: Subtitle archive listing and extraction

/// Entry name suffixes recognized as subtitle files
pub const SUBTITLE_EXTENSIONS: [&str; 6] = [".ass", ".smi", ".srt", ".ssa", ".sub", ".txt"];

/// Archive operations over in-memory ZIP data
pub struct ArchiveManager;

impl ArchiveManager {
    /// List subtitle entry names in an archive, in the archive's own order.
    ///
    /// Keeps entries with a recognized subtitle extension whose base name is
    /// not hidden (leading dot). Nothing is decompressed at this stage.
    pub fn list_subtitles(archive_bytes: &[u8]) -> Result<Vec<String>, ArchiveError> {
        let mut archive = ZipArchive::new(Cursor::new(archive_bytes))?;

        let mut filenames = Vec::new();
        for index in 0..archive.len() {
            let entry = archive.by_index(index)?;
            let name = entry.name().to_string();
            if is_subtitle_entry(&name) {
                filenames.push(name);
            }
        }

        Ok(filenames)
    }

    /// Extract one named entry into the working directory.
    ///
    /// The output filename is the entry's base name; directory components
    /// inside the archive are stripped. An existing file at that path is
    /// overwritten. A missing entry is a hard fault and nothing is written.
    pub fn extract_entry(
        archive_bytes: &[u8],
        entry_name: &str,
        workdir: &Path,
    ) -> Result<PathBuf, ArchiveError> {
        let mut archive = ZipArchive::new(Cursor::new(archive_bytes))?;

        let mut entry = match archive.by_name(entry_name) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => {
                return Err(ArchiveError::EntryNotFound(entry_name.to_string()));
            }
            Err(error) => return Err(error.into()),
        };

        let mut content = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut content)?;

        let output_path = workdir.join(entry_basename(entry_name));
        debug!("Writing subtitle to {:?}", output_path);
        fs::write(&output_path, content)?;

        Ok(output_path)
    }
}

fn is_subtitle_entry(name: &str) -> bool {
    SUBTITLE_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
        && !entry_basename(name).starts_with('.')
}

// ZIP entry names use '/' as the separator regardless of platform
fn entry_basename(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}
