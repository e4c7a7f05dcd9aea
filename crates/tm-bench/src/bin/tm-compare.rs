//! tm-compare: time the tiled kernel against ndarray and a naive loop.

use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, Log, Metadata, Record};
use tm_bench::{
    compare, random_pair, Contender, NaiveContender, NdarrayContender, TiledContender,
};
use tm_matrix::{CpuBackend, KernelConfig};

#[derive(Parser)]
#[command(name = "tm-compare")]
#[command(about = "Compare the tiled matmul kernel with reference implementations")]
#[command(version)]
struct Cli {
    /// Side length of the two square operands
    #[arg(short, long, default_value = "500")]
    size: usize,

    /// Seed for the random fill
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Leave out the naive triple loop (slow for large sizes)
    #[arg(long)]
    skip_naive: bool,

    /// Tile edge for the kernel (overrides TM_BLOCK_SIZE)
    #[arg(short, long)]
    block_size: Option<usize>,

    /// Keep the kernel on the calling thread
    #[arg(long)]
    serial: bool,

    /// Log kernel dispatch and per-contender timings to stderr
    #[arg(short, long)]
    verbose: bool,
}

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn run(cli: &Cli) -> Result<String, Box<dyn std::error::Error>> {
    let mut config = KernelConfig::from_env()?;
    if let Some(bs) = cli.block_size {
        config = config.with_block_size(bs);
    }
    if cli.serial {
        config = config.with_parallel(false);
    }

    let (a, b) = random_pair(cli.size, cli.seed)?;

    let tiled = TiledContender::new(CpuBackend::with_config(config)?);
    let ndarray = NdarrayContender::new();
    let naive = NaiveContender::new();

    let mut contenders: Vec<&dyn Contender> = vec![&tiled, &ndarray];
    if !cli.skip_naive {
        contenders.push(&naive);
    }

    Ok(compare(&a, &b, &contenders)?.to_tsv())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        });
    }

    match run(&cli) {
        Ok(table) => {
            print!("{table}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
