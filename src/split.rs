//! Splitting a reference file into public and private sets.
//!
//! The pipeline is: identify the id and label columns, normalize every row to
//! `id,real,fake`, draw a seeded sample for the public set, then write both
//! sets sorted by id.
pub mod sampler;
pub mod schema;
pub mod splitter;
pub mod writer;

pub use self::{
    sampler::{Sampler, SplitResult},
    schema::{identify_columns, normalize, CanonicalRow, ColumnMap, Label, RowId},
    splitter::{output_paths, SplitOutputs, Splitter, SplitterBuilder},
    writer::write_rows,
};
