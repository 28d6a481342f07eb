use std::path::Path;

use log::debug;

use crate::error::{Error, Result};
use crate::split::schema::CanonicalRow;

/// Header written to every output file.
pub const OUTPUT_HEADER: [&str; 3] = ["id", "real", "fake"];

fn flag(value: u8) -> &'static str {
    if value == 1 {
        "1"
    } else {
        "0"
    }
}

/// Write rows to `path` in the canonical schema, in the order given.
pub fn write_rows<P: AsRef<Path>>(path: P, rows: &[CanonicalRow], delimiter: u8) -> Result<()> {
    let path = path.as_ref();
    let to_error = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .map_err(to_error)?;
    writer.write_record(OUTPUT_HEADER).map_err(to_error)?;
    for row in rows {
        writer
            .write_record([row.id.as_str(), flag(row.real), flag(row.fake)])
            .map_err(to_error)?;
    }
    writer.flush().map_err(|e| to_error(e.into()))?;
    debug!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}
