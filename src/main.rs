use clap::Parser;
use env_logger::Env;

use refsplit::{cli, Compression, Result, SplitterBuilder};

fn run(opt: cli::Opt) -> Result<()> {
    match opt.cmd {
        cli::Command::Split(x) => {
            let mut splitter = SplitterBuilder::new(&x.input)
                .seed(x.seed)
                .public_proportion(x.public_prop)
                .delimiter(x.delimiter)
                .strict_labels(x.strict_labels);
            if x.uncompressed {
                splitter = splitter.input_compression(Compression::Uncompressed);
            }
            if let Some(output_dir) = x.output_dir {
                splitter = splitter.output_dir(output_dir);
            }
            let outputs = splitter.build()?.run()?;
            println!("Public reference saved to: {}", outputs.public.display());
            println!("Private reference saved to: {}", outputs.private.display());
        }
    };
    Ok(())
}

fn main() {
    let opt = cli::Opt::parse();
    let level = match opt.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    if let Err(e) = run(opt) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
