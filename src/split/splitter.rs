use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::{Error, Result};
use crate::io::{open_data, Compression};
use crate::split::{
    sampler::{Sampler, SplitResult, DEFAULT_PUBLIC_PROPORTION, DEFAULT_SEED},
    schema::{identify_columns, normalize, CanonicalRow},
    writer::write_rows,
};

/// Where the public and private splits were written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOutputs {
    pub public: PathBuf,
    pub private: PathBuf,
    pub public_rows: usize,
    pub private_rows: usize,
}

/// Work out the output paths for an input file.
///
/// `data/reference.csv` becomes `data/reference_public.csv` and
/// `data/reference_private.csv`. A trailing `.gz` is dropped since outputs
/// are never compressed.
pub fn output_paths(input: &Path, output_dir: Option<&Path>) -> (PathBuf, PathBuf) {
    let name = Path::new(input.file_name().unwrap_or_else(|| OsStr::new("reference")));
    let name = match name.extension() {
        Some(ext) if ext.eq_ignore_ascii_case("gz") => Path::new(name.file_stem().unwrap_or_default()),
        _ => name,
    };
    let stem = name.file_stem().unwrap_or_default().to_string_lossy();
    let extension = name
        .extension()
        .map_or_else(|| "csv".into(), |e| e.to_string_lossy());

    let dir = match output_dir {
        Some(d) => d.to_path_buf(),
        None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    (
        dir.join(format!("{stem}_public.{extension}")),
        dir.join(format!("{stem}_private.{extension}")),
    )
}

pub struct SplitterBuilder {
    /// The path to the reference file
    input: PathBuf,
    /// The seed used for randomisation
    seed: u64,
    /// Share of rows sent to the public split
    public_proportion: f64,
    /// Directory for the output files, defaults to the input's directory
    output_dir: Option<PathBuf>,
    /// Compression for the input file
    input_compression: Compression,
    /// Field delimiter for input and output
    delimiter: char,
    /// Reject labels other than real or fake
    strict_labels: bool,
}

impl SplitterBuilder {
    pub fn new<P: AsRef<Path>>(input: &P) -> Self {
        let input = input.as_ref().to_path_buf();
        SplitterBuilder {
            input_compression: Compression::from_path(&input),
            input,
            seed: DEFAULT_SEED,
            public_proportion: DEFAULT_PUBLIC_PROPORTION,
            output_dir: None,
            delimiter: ',',
            strict_labels: false,
        }
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn public_proportion(mut self, public_proportion: f64) -> Self {
        self.public_proportion = public_proportion;
        self
    }

    #[must_use]
    pub fn output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = Some(output_dir);
        self
    }

    #[must_use]
    pub fn input_compression(mut self, input_compression: Compression) -> Self {
        self.input_compression = input_compression;
        self
    }

    #[must_use]
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn strict_labels(mut self, strict_labels: bool) -> Self {
        self.strict_labels = strict_labels;
        self
    }

    pub fn build(self) -> Result<Splitter> {
        if !self.delimiter.is_ascii() {
            return Err(Error::InvalidDelimiter(self.delimiter));
        }
        let (public_path, private_path) = output_paths(&self.input, self.output_dir.as_deref());
        Ok(Splitter {
            sampler: Sampler::new(self.public_proportion, self.seed)?,
            input: self.input,
            public_path,
            private_path,
            input_compression: self.input_compression,
            delimiter: self.delimiter as u8,
            strict_labels: self.strict_labels,
        })
    }
}

pub struct Splitter {
    /// The path to the reference file
    input: PathBuf,
    /// Draws the public sample
    sampler: Sampler,
    /// Destination of the public split
    public_path: PathBuf,
    /// Destination of the private split
    private_path: PathBuf,
    /// Compression for the input file
    input_compression: Compression,
    /// Field delimiter for input and output
    delimiter: u8,
    /// Reject labels other than real or fake
    strict_labels: bool,
}

impl Splitter {
    /// Read the reference file and convert it to canonical rows.
    pub fn load(&self) -> Result<Vec<CanonicalRow>> {
        info!("Reading data from {}", self.input.display());
        let mut reader = open_data(&self.input, self.input_compression, self.delimiter)?;
        let columns = identify_columns(reader.headers()?)?;
        let rows = normalize(reader.records(), &columns, self.strict_labels)?;
        info!("Read {} rows", rows.len());
        Ok(rows)
    }

    /// Split already loaded rows.
    pub fn split(&self, rows: Vec<CanonicalRow>) -> SplitResult {
        self.sampler.split(rows)
    }

    /// Run the whole pipeline, writing both splits.
    ///
    /// Nothing is written unless the input is read and normalized
    /// successfully.
    pub fn run(self) -> Result<SplitOutputs> {
        let rows = self.load()?;
        let result = self.split(rows);

        info!("Writing public split to {}", self.public_path.display());
        write_rows(&self.public_path, &result.public, self.delimiter)?;
        info!("Writing private split to {}", self.private_path.display());
        write_rows(&self.private_path, &result.private, self.delimiter)?;
        info!("Finished writing to files");

        Ok(SplitOutputs {
            public: self.public_path,
            private: self.private_path,
            public_rows: result.public.len(),
            private_rows: result.private.len(),
        })
    }
}
