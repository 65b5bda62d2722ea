use std::io::Write;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{LicenseRecord, LineEnding};

/// Write `{ "licenses": [...], "generatedOn": "..." }`, one record per line.
pub fn render<W: Write>(
    records: &[LicenseRecord],
    w: &mut W,
    eol: LineEnding,
    generated_on: &DateTime<Utc>,
) -> Result<()> {
    let nl = eol.as_str();

    write!(w, "{{ \"licenses\": [{nl}")?;
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            write!(w, ",{nl}")?;
        }
        serde_json::to_writer(&mut *w, record)?;
    }
    if !records.is_empty() {
        write!(w, "{nl}")?;
    }

    write!(w, "],{nl}")?;
    write!(w, "\"generatedOn\": \"{}\"{nl}", super::timestamp(generated_on))?;
    write!(w, " }}")?;
    Ok(())
}
