use std::io::Write;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{LicenseRecord, LineEnding};

const BULLET: &str = " - ";
const PREFIX: &str = "The following NPM package may be included in this product:";
const PREFIX_PLURAL: &str = "The following NPM packages may be included in this product:";
const MIDFIX: &str = "This package contains the following license and notice below:";
const MIDFIX_PLURAL: &str = "These packages each contain the following license and notice below:";
const SEPARATOR: &str = "-----------";
pub const FOOTER: &str = "This file was generated with generate-license-file! \
                          https://www.npmjs.com/package/generate-license-file";

/// Write the plain-text notice file.
pub fn render<W: Write>(
    records: &[LicenseRecord],
    w: &mut W,
    eol: LineEnding,
    generated_on: &DateTime<Utc>,
) -> Result<()> {
    let nl = eol.as_str();

    for record in records {
        let plural = record.dependencies.len() > 1;

        write!(w, "{}{nl}{nl}", if plural { PREFIX_PLURAL } else { PREFIX })?;
        for dep in &record.dependencies {
            write!(w, "{BULLET}{dep}{nl}")?;
        }

        write!(w, "{nl}{}{nl}{nl}", if plural { MIDFIX_PLURAL } else { MIDFIX })?;
        write!(w, "{}", record.content.trim())?;
        write!(w, "{nl}{nl}{SEPARATOR}{nl}{nl}")?;
    }

    write!(w, "{nl}Generated on {}{nl}", super::timestamp(generated_on))?;
    write!(w, "{FOOTER}")?;
    Ok(())
}
