//! CSV export of loaded result sets.
//!
//! Row writes are best-effort: a row that fails to encode or write is logged and
//! counted in [`ExportReport::rows_failed`], and the remaining rows are still
//! written. Header and flush failures abort the export.

use std::fs::File;
use std::io::{self, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use letterbox_types::{DiaryEntry, Movie};

use crate::config::expand_tilde;
use crate::{Error, Result};

/// A value that becomes one CSV row under a fixed header.
pub trait CsvRecord {
    fn header() -> &'static [&'static str];
    fn record(&self) -> Vec<String>;
}

impl CsvRecord for DiaryEntry {
    fn header() -> &'static [&'static str] {
        &["WatchDate", "Title", "Year", "Rating", "Rewatch"]
    }

    fn record(&self) -> Vec<String> {
        vec![
            self.watch_date.clone(),
            self.title.clone(),
            self.year.to_string(),
            format_rating(self.rating),
            format_flag(self.rewatch),
        ]
    }
}

/// A watchlist film: `Title,Year,Director`.
pub struct WatchlistRow<'a>(pub &'a Movie);

impl CsvRecord for WatchlistRow<'_> {
    fn header() -> &'static [&'static str] {
        &["Title", "Year", "Director"]
    }

    fn record(&self) -> Vec<String> {
        vec![
            self.0.title.clone(),
            self.0.year.to_string(),
            self.0.director.clone(),
        ]
    }
}

/// A film inside a user list: `Title,Year`.
pub struct ListRow<'a>(pub &'a Movie);

impl CsvRecord for ListRow<'_> {
    fn header() -> &'static [&'static str] {
        &["Title", "Year"]
    }

    fn record(&self) -> Vec<String> {
        vec![self.0.title.clone(), self.0.year.to_string()]
    }
}

pub fn format_rating(rating: f64) -> String {
    format!("{:.1}", rating)
}

/// `Yes` for true, empty for false.
pub fn format_flag(flag: bool) -> String {
    if flag { "Yes".to_string() } else { String::new() }
}

/// Replace path-hostile characters (`/` and space) so a name can be used as
/// one file-name segment.
pub fn path_safe(segment: &str) -> String {
    segment.replace(['/', ' '], "_")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    /// Absolute destination
    pub path: PathBuf,
    pub rows_written: usize,
    pub rows_failed: usize,
}

/// An owned result set, ready to be moved onto a worker thread.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportRows {
    Diary(Vec<DiaryEntry>),
    Watchlist(Vec<Movie>),
    List(Vec<Movie>),
}

impl ExportRows {
    pub fn len(&self) -> usize {
        match self {
            ExportRows::Diary(rows) => rows.len(),
            ExportRows::Watchlist(rows) | ExportRows::List(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn write_to(&self, destination: &str) -> Result<ExportReport> {
        match self {
            ExportRows::Diary(rows) => export(rows.iter(), destination),
            ExportRows::Watchlist(rows) => export(rows.iter().map(WatchlistRow), destination),
            ExportRows::List(rows) => export(rows.iter().map(ListRow), destination),
        }
    }
}

impl<T: CsvRecord> CsvRecord for &T {
    fn header() -> &'static [&'static str] {
        T::header()
    }

    fn record(&self) -> Vec<String> {
        (*self).record()
    }
}

/// Turn a user-typed destination into an absolute path. Relative paths are
/// resolved against the process working directory; `~/` is expanded.
pub fn resolve_destination(destination: &str) -> Result<PathBuf> {
    if destination.trim().is_empty() {
        return Err(Error::InvalidPath {
            path: destination.to_string(),
            reason: "path is empty".to_string(),
        });
    }

    let expanded = expand_tilde(destination);
    std::path::absolute(&expanded).map_err(|err| Error::InvalidPath {
        path: destination.to_string(),
        reason: err.to_string(),
    })
}

/// Write `rows` as CSV to `destination`, creating parent directories and
/// overwriting any existing file.
pub fn export<I>(rows: I, destination: &str) -> Result<ExportReport>
where
    I: IntoIterator,
    I::Item: CsvRecord,
{
    let path = resolve_destination(destination)?;
    ensure_parent_dir(&path)?;
    let file = create_file(&path)?;

    let (rows_written, rows_failed) = write_rows(BufWriter::new(file), &path, rows)?;
    tracing::info!(path = %path.display(), rows_written, rows_failed, "export finished");

    Ok(ExportReport {
        path,
        rows_written,
        rows_failed,
    })
}

/// Header, then one record per row, then flush. Returns `(written, failed)`.
/// `path` only labels errors and log records.
fn write_rows<W, I>(mut out: W, path: &Path, rows: I) -> Result<(usize, usize)>
where
    W: Write,
    I: IntoIterator,
    I::Item: CsvRecord,
{
    let write_failed = |source: csv::Error| Error::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let header = encode_record(<I::Item as CsvRecord>::header()).map_err(write_failed)?;
    out.write_all(&header)
        .map_err(|err| write_failed(err.into()))?;

    let mut rows_written = 0;
    let mut rows_failed = 0;
    for (index, row) in rows.into_iter().enumerate() {
        let written = encode_record(row.record())
            .and_then(|bytes| out.write_all(&bytes).map_err(csv::Error::from));
        match written {
            Ok(()) => rows_written += 1,
            Err(err) => {
                rows_failed += 1;
                tracing::warn!(row = index, error = %err, path = %path.display(), "skipping CSV row");
            }
        }
    }

    out.flush().map_err(|err| write_failed(err.into()))?;
    Ok((rows_written, rows_failed))
}

/// Encode one record by itself, so a failed write never leaves half a record
/// buffered in front of the next one.
fn encode_record<I, T>(fields: I) -> csv::Result<Vec<u8>>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let mut bytes = Vec::new();
    {
        let mut encoder = csv::Writer::from_writer(&mut bytes);
        encoder.write_record(fields)?;
        encoder.flush()?;
    }
    Ok(bytes)
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    let Some(dir) = path.parent() else {
        return Ok(());
    };
    if dir.as_os_str().is_empty() {
        return Ok(());
    }

    std::fs::create_dir_all(dir).map_err(|source| classify_io(dir, source, Target::Directory))
}

fn create_file(path: &Path) -> Result<File> {
    File::create(path).map_err(|source| classify_io(path, source, Target::File))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Directory,
    File,
}

/// Permission problems are reported on their own; anything else is a
/// create failure for `target`.
fn classify_io(path: &Path, source: io::Error, target: Target) -> Error {
    if source.kind() == ErrorKind::PermissionDenied {
        return Error::PermissionDenied(path.to_path_buf());
    }
    match target {
        Target::Directory => Error::DirectoryCreateFailed {
            dir: path.to_path_buf(),
            source,
        },
        Target::File => Error::FileCreateFailed {
            path: path.to_path_buf(),
            source,
        },
    }
}
