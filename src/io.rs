use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::error::{Error, Result};

pub type InputReader = csv::Reader<Box<dyn Read>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compression {
    GzipCompression,
    Uncompressed,
}

impl Compression {
    /// Guess the compression of a file from its extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension() {
            Some(ext) if ext.eq_ignore_ascii_case("gz") => Compression::GzipCompression,
            _ => Compression::Uncompressed,
        }
    }
}

/// Open a delimited input file, decompressing it on the fly if required.
pub fn open_data<P: AsRef<Path>>(
    path: P,
    compression: Compression,
    delimiter: u8,
) -> Result<InputReader> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::MissingInput(path.to_path_buf()));
    }
    let file = BufReader::with_capacity(1024 * 1024, File::open(path)?);
    let reader: Box<dyn Read> = match compression {
        Compression::GzipCompression => Box::new(MultiGzDecoder::new(file)),
        Compression::Uncompressed => Box::new(file),
    };
    Ok(csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(reader))
}
