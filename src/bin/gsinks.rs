use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use env_logger::Builder;
use gsinks::prelude::*;
use log::{info, LevelFilter};

const DEFAULT_ORDERS: std::ops::RangeInclusive<usize> = 2..=10;

#[derive(Parser)]
#[command(name = "gsinks")]
#[command(about = "Generate and count digraphs with one global sink")]
struct Args {
    /// Don't show the total count for each number of vertices
    #[arg(short)]
    quiet: bool,

    /// Generate the digraphs and write them to stdout in digraph6 format
    #[arg(short)]
    digraphs: bool,

    /// Read the input files with self-loops
    #[arg(short)]
    loops: bool,

    /// Number of vertices of the generated digraphs (default: 2 and up)
    #[arg(value_name = "N", value_parser = clap::value_parser!(u32).range(2..=33))]
    order: Option<u32>,

    /// Directory with the input files dig<N-1>.d6 or digl<N-1>.d6
    #[arg(long, value_name = "DIR", default_value = ".")]
    dir: PathBuf,

    /// Logging verbosity (use -v for info, or -v=LEVEL for specific level)
    #[arg(
        long,
        short = 'v',
        value_name = "LEVEL",
        num_args = 0..=1,
        default_missing_value = "info",
        require_equals = true
    )]
    verbose: Option<Option<LogLevel>>,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
        }
    }
}

fn input_file(dir: &Path, loops: bool, order: usize) -> PathBuf {
    let modifier = if loops { "l" } else { "" };
    dir.join(format!("dig{modifier}{order}.d6"))
}

fn run(args: &Args, path: &Path) -> Result<Tally, Error> {
    let reader = BufReader::new(File::open(path)?);
    let options = ExtensionOptions {
        construct: args.digraphs,
    };
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut write_err = None;
    let tally = count_batch(read_digraphs(reader), &NautyEngine, &options, |h| {
        if write_err.is_none() {
            if let Err(err) = writeln!(out, "{}", to_digraph6(&h)) {
                write_err = Some(err);
            }
        }
    })?;
    if let Some(err) = write_err {
        return Err(err.into());
    }
    out.flush()?;
    Ok(tally)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = match args.verbose {
        None => LevelFilter::Off,
        Some(None) => LevelFilter::Info,
        Some(Some(ref level)) => level.clone().into(),
    };
    Builder::from_default_env().filter_level(log_level).init();

    let explicit = args.order.is_some();
    let orders = match args.order {
        Some(n) => n as usize..=n as usize,
        None => DEFAULT_ORDERS,
    };
    for n in orders {
        let path = input_file(&args.dir, args.loops, n - 1);
        if !explicit && !path.exists() {
            info!("{} not found, stopping", path.display());
            break;
        }
        info!("Reading {}", path.display());
        let tally = match run(&args, &path) {
            Ok(tally) => tally,
            Err(err) => {
                eprintln!("Failed to process {}: {err}", path.display());
                return ExitCode::FAILURE;
            }
        };
        if !args.quiet {
            eprintln!("{}", tally.total());
        }
    }
    ExitCode::SUCCESS
}
