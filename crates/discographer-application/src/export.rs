// SPDX-License-Identifier: GPL-3.0-or-later
//! CSV export of the aggregated track list.
//!
//! Files are never overwritten: when `<Artist>_discography.csv` already exists the
//! next free `<Artist>_discography_copy_<n>.csv` is used instead.

use std::borrow::Cow;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use discographer_domain::TrackRecord;
use thiserror::Error;
use tracing::{debug, info};

pub const CSV_HEADER: [&str; 7] = ["artist", "track", "album", "year", "type", "duration", "url"];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Cannot create export directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Cannot write export file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Base file name for an artist's export, e.g. `Pink_Floyd_discography.csv`.
pub fn export_file_name(artist_name: &str) -> String {
    let stem: String = artist_name
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            other => other,
        })
        .collect();
    format!("{}_discography.csv", stem)
}

/// Candidate name for the `attempt`-th collision (0 = the base name itself).
fn candidate_name(base: &str, attempt: u32) -> String {
    if attempt == 0 {
        return base.to_string();
    }

    match base.rsplit_once('.') {
        Some((stem, extension)) => format!("{}_copy_{}.{}", stem, attempt, extension),
        None => format!("{}_copy_{}", base, attempt),
    }
}

/// Create the first non-existing candidate file in `directory`.
fn create_unique(directory: &Path, base: &str) -> Result<(PathBuf, File), ExportError> {
    let mut attempt = 0;
    loop {
        let path = directory.join(candidate_name(base, attempt));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(error) if error.kind() == ErrorKind::AlreadyExists => {
                debug!(target: "export", path = %path.display(), "export file exists, trying next name");
                attempt += 1;
            }
            Err(source) => return Err(ExportError::Write { path, source }),
        }
    }
}

/// Write `records` as CSV into a new file under `directory`, returning its path.
pub fn export_tracks(
    directory: &Path,
    artist_name: &str,
    records: &[TrackRecord],
) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(directory).map_err(|source| ExportError::CreateDir {
        path: directory.to_path_buf(),
        source,
    })?;

    let (path, file) = create_unique(directory, &export_file_name(artist_name))?;
    let mut writer = BufWriter::new(file);

    write_csv(&mut writer, records)
        .and_then(|()| writer.flush())
        .map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;

    info!(target: "export", path = %path.display(), rows = records.len(), "exported track list");
    Ok(path)
}

/// Header row followed by one row per record.
pub fn write_csv<W: Write>(mut writer: W, records: &[TrackRecord]) -> io::Result<()> {
    write_row(&mut writer, CSV_HEADER)?;
    for record in records {
        write_row(
            &mut writer,
            [
                record.artist.as_str(),
                record.track.as_str(),
                record.album.as_str(),
                record.year.as_str(),
                record.release_type.as_str(),
                record.duration.as_str(),
                record.url.as_str(),
            ],
        )?;
    }
    Ok(())
}

fn write_row<W: Write>(writer: &mut W, fields: [&str; 7]) -> io::Result<()> {
    let line = fields
        .iter()
        .map(|field| escape_field(field))
        .collect::<Vec<_>>()
        .join(",");
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\r\n")
}

/// RFC 4180 quoting: fields containing separators, quotes or line breaks are quoted.
fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
