//! Report renderers for collected license records.
//!
//! - [`text`] — the human-readable notice file, one block per distinct license.
//! - [`json`] — a single JSON document with the records and generation time.
//! - [`terminal`] — summary table printed by the CLI with `--verbose`.
//!
//! The file renderers stream into any [`Write`]; [`write_report`] binds them to a file.

pub mod json;
pub mod terminal;
pub mod text;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{Error, Result};
use crate::models::{LicenseRecord, LineEnding, OutputFormat};

/// Render `records` into `w` in the requested format.
pub fn render<W: Write>(
    records: &[LicenseRecord],
    w: &mut W,
    format: OutputFormat,
    eol: LineEnding,
    generated_on: &DateTime<Utc>,
) -> Result<()> {
    match format {
        OutputFormat::Text => text::render(records, w, eol, generated_on),
        OutputFormat::Json => json::render(records, w, eol, generated_on),
    }
}

/// Create or truncate `path` and stream the report into it, stamped with the current time.
pub fn write_report(
    records: &[LicenseRecord],
    path: &Path,
    format: OutputFormat,
    eol: LineEnding,
) -> Result<()> {
    let file = File::create(path).map_err(|source| Error::OutputOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let mut w = BufWriter::new(file);

    render(records, &mut w, format, eol, &Utc::now())?;
    w.flush()?;
    Ok(())
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2024-01-02T03:04:05.678Z`.
pub fn timestamp(generated_on: &DateTime<Utc>) -> String {
    generated_on.to_rfc3339_opts(SecondsFormat::Millis, true)
}
