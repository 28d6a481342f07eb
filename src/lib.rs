pub mod cli;
mod error;
mod io;
pub mod split;

pub use {
    crate::error::{ColumnKind, Error, Result},
    crate::io::Compression,
    crate::split::{SplitOutputs, Splitter, SplitterBuilder},
};
