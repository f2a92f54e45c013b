//! Command line driver for the hint sweep.
//!
//! `hint` reads a glyph feature file and writes one hint record per glyph;
//! `merge` recombines the outputs of sharded `hint` runs.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use hint_sweep::{
    merge::merge_files, pipeline::HintJob, Error, GridFit, ParameterFile, ShardFilter, Strategy,
};

#[derive(clap::Parser, Debug)]
#[command(version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Hint a feature file (hgf)
    Hint {
        /// The feature file. Read from stdin when absent
        input: Option<PathBuf>,
        /// Output path. When absent, records are written to stdout
        #[arg(short = 'o', long = "output-into")]
        output: Option<PathBuf>,
        /// Only process the dk+m'th glyphs of the feature file. Combine with
        /// -m for parallel processing
        #[arg(short, long, default_value_t = 1)]
        divide: usize,
        /// Only process the dk+m'th glyphs of the feature file. Combine with
        /// -d for parallel processing
        #[arg(short, long, default_value_t = 0)]
        modulo: usize,
        /// Parameter file (TOML)
        #[arg(short, long)]
        parameters: Option<PathBuf>,
        /// Override the units per em of the parameter file
        #[arg(long)]
        upm: Option<f64>,
        /// Override the smallest hinted ppem
        #[arg(long)]
        ppem_min: Option<u32>,
        /// Override the largest hinted ppem
        #[arg(long)]
        ppem_max: Option<u32>,
        /// Hint glyphs on multiple threads. Output order is unchanged
        #[arg(long)]
        parallel: bool,
        /// Number of worker threads used with --parallel
        #[arg(short, long)]
        jobs: Option<usize>,
    },
    /// Merge hint record files, keeping the first record for each glyph
    Merge {
        /// Record files, in priority order (may use glob syntax)
        #[arg(required = true)]
        parts: Vec<PathBuf>,
        /// Output path. When absent, records are written to stdout
        #[arg(short = 'o', long = "output-into")]
        output: Option<PathBuf>,
    },
}

/// Strategy fields that may be set on the command line.
#[derive(Clone, Copy, Debug, Default)]
struct Overrides {
    upm: Option<f64>,
    ppem_min: Option<u32>,
    ppem_max: Option<u32>,
}

fn main() -> ExitCode {
    env_logger::init();

    use clap::Parser as _;
    let args = Args::parse_from(wild::args());

    let result = match args.command {
        Command::Hint {
            input,
            output,
            divide,
            modulo,
            parameters,
            upm,
            ppem_min,
            ppem_max,
            parallel,
            jobs,
        } => {
            if let Some(jobs) = jobs {
                if let Err(e) = rayon::ThreadPoolBuilder::new()
                    .num_threads(jobs)
                    .build_global()
                {
                    log::warn!("unable to configure {jobs} worker threads: {e}");
                }
            }
            let overrides = Overrides {
                upm,
                ppem_min,
                ppem_max,
            };
            load_strategy(parameters.as_deref(), overrides).and_then(|strategy| {
                hint(
                    &strategy,
                    input.as_deref(),
                    output.as_deref(),
                    ShardFilter::new(divide, modulo),
                    parallel,
                )
            })
        }
        Command::Merge { parts, output } => merge(&parts, output.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn load_strategy(parameters: Option<&Path>, overrides: Overrides) -> Result<Strategy, Error> {
    let mut strategy = match parameters {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|e| with_path(e, path))?;
            ParameterFile::parse(&text)?.hinting
        }
        None => Strategy::default(),
    };
    if let Some(upm) = overrides.upm {
        strategy.upm = upm;
    }
    if let Some(ppem_min) = overrides.ppem_min {
        strategy.ppem_min = ppem_min;
    }
    if let Some(ppem_max) = overrides.ppem_max {
        strategy.ppem_max = ppem_max;
    }
    strategy.validate()?;
    log::debug!("{strategy:?}");
    Ok(strategy)
}

fn hint(
    strategy: &Strategy,
    input: Option<&Path>,
    output: Option<&Path>,
    filter: ShardFilter,
    parallel: bool,
) -> Result<(), Error> {
    let (reader, source): (Box<dyn BufRead>, String) = match input {
        Some(path) => {
            let file = File::open(path).map_err(|e| with_path(e, path))?;
            (Box::new(BufReader::new(file)), path.display().to_string())
        }
        None => (Box::new(io::stdin().lock()), "(stdin)".into()),
    };
    let mut out = open_output(output)?;
    let job = HintJob {
        strategy,
        hinter: GridFit,
        filter,
        parallel,
        source,
    };
    job.run(reader, &mut out, &mut io::stderr())?;
    Ok(())
}

fn merge(parts: &[PathBuf], output: Option<&Path>) -> Result<(), Error> {
    let mut out = open_output(output)?;
    let stats = merge_files(parts, &mut out)?;
    eprintln!("{stats}");
    Ok(())
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, Error> {
    Ok(match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| with_path(e, path))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn with_path(e: io::Error, path: &Path) -> Error {
    Error::Io(io::Error::new(e.kind(), format!("{}: {e}", path.display())))
}
