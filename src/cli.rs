use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::split::sampler::{DEFAULT_PUBLIC_PROPORTION, DEFAULT_SEED};

#[derive(Debug, Parser)]
#[clap(
    name = "refsplit",
    version,
    about = "Split a labelled reference file into public and private sets"
)]
pub struct Opt {
    #[clap(
        short = 'v',
        parse(from_occurrences),
        global = true,
        help = "Set the level of verbosity"
    )]
    pub verbose: u64,

    #[clap(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[clap(
        name = "split",
        about = "Split a reference file into <stem>_public and <stem>_private files"
    )]
    Split(Split),
}

#[derive(Debug, clap::Args)]
pub struct Split {
    #[clap(
        parse(from_os_str),
        default_value = "reference.csv",
        help = "Reference file with an id and a label column, optionally gzip compressed"
    )]
    pub input: PathBuf,

    #[clap(
        short = 's',
        long = "seed",
        default_value_t = DEFAULT_SEED,
        help = "RNG seed, for reproducibility"
    )]
    pub seed: u64,

    #[clap(
        short = 'p',
        long = "public-prop",
        default_value_t = DEFAULT_PUBLIC_PROPORTION,
        help = "Proportion of rows in the public split"
    )]
    pub public_prop: f64,

    #[clap(
        short = 'o',
        long = "output-dir",
        parse(from_os_str),
        help = "Directory for the output files. Defaults to the input's directory"
    )]
    pub output_dir: Option<PathBuf>,

    #[clap(
        short = 'd',
        long = "delimiter",
        default_value_t = ',',
        help = "Field delimiter of the input, also used for the outputs"
    )]
    pub delimiter: char,

    #[clap(
        long = "strict-labels",
        help = "Fail on labels other than 'real' or 'fake' instead of writing them as 0,0"
    )]
    pub strict_labels: bool,

    #[clap(
        short = 'u',
        long = "uncompressed",
        help = "Read the input as plain text even if it ends in .gz"
    )]
    pub uncompressed: bool,
}
