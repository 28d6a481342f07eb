use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// The kind of column being looked up in the input header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Id,
    Label,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Id => f.write_str("an ID"),
            ColumnKind::Label => f.write_str("a label"),
        }
    }
}

/// Error type in refsplit.
#[derive(Debug, Error)]
pub enum Error {
    #[error("reference file not found at {}", .0.display())]
    MissingInput(PathBuf),

    #[error(
        "unable to find {kind} column. Supported column names: {}",
        .candidates.join(", ")
    )]
    Schema {
        kind: ColumnKind,
        candidates: &'static [&'static str],
    },

    #[error("line {line}: unrecognised label {label:?}, expected 'real' or 'fake'")]
    UnknownLabel { line: u64, label: String },

    #[error("line {line}: empty id in reference file")]
    EmptyId { line: u64 },

    #[error("duplicate id {0:?} in reference file")]
    DuplicateId(String),

    #[error("invalid public proportion {0}, must be between 0 and 1")]
    InvalidProportion(f64),

    #[error("invalid delimiter {0:?}, must be a single ASCII character")]
    InvalidDelimiter(char),

    #[error("could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
