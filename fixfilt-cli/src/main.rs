//! fixfilt CLI: renders the demo traces of a synthetic noisy step.
//!
//! The output is one row per sample with the columns of
//! [`fixfilt_pipeline::COLUMNS`], ready for any external plotting tool.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use fixfilt_pipeline::{DemoBench, SignalConfig, Traces, COLUMNS};
use log::{info, warn};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Csv,
    Tsv,
}

impl Format {
    fn separator(self) -> &'static str {
        match self {
            Format::Csv => ",",
            Format::Tsv => "\t",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "fixfilt", version, about = "Fixed-point EMA / hysteresis demo on a synthetic ADC step")]
struct Opts {
    /// Number of samples to generate.
    #[arg(long, default_value_t = 1024)]
    samples: usize,

    /// Level reached at the end of the ramp.
    #[arg(long, default_value_t = 1000)]
    target: u16,

    /// Standard deviation of the additive Gaussian noise, in LSB.
    #[arg(long, default_value_t = 1.0)]
    noise: f64,

    /// RNG seed for a reproducible signal.
    #[arg(long)]
    seed: Option<u64>,

    /// ADC resolution in bits. The demo chains are built for 10-bit input;
    /// any other width is rejected before a signal is generated.
    #[arg(long, default_value_t = 10)]
    adc_bits: u32,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Log the settling/change summary of every trace.
    #[arg(long)]
    summary: bool,

    /// Settling tolerance in 10-bit LSB, used by `--summary`.
    #[arg(long, default_value_t = 1)]
    tolerance: u16,

    /// Write to this file instead of stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

impl Opts {
    fn signal(&self) -> SignalConfig {
        SignalConfig {
            len: self.samples,
            target: self.target,
            noise_stddev: self.noise,
            adc_bits: self.adc_bits,
            seed: self.seed,
        }
    }
}

fn write_traces<W: Write>(out: &mut W, traces: &Traces, format: Format) -> io::Result<()> {
    let sep = format.separator();
    writeln!(out, "{}", COLUMNS.join(sep))?;
    for i in 0..traces.len() {
        if let Some(row) = traces.row(i) {
            let line: Vec<String> = row.iter().map(u16::to_string).collect();
            writeln!(out, "{}", line.join(sep))?;
        }
    }
    out.flush()
}

fn log_summary(traces: &Traces, tolerance: u16) {
    for s in traces.summary(tolerance) {
        match (s.final_value, s.settled_at) {
            (Some(v), Some(at)) => info!(
                "{:<17} final {:>5}  settled at {:>5}  changes {:>5}",
                s.name, v, at, s.changes
            ),
            _ => warn!("{}: empty trace", s.name),
        }
    }
}

fn run(opts: &Opts) -> Result<()> {
    let bench = DemoBench::new(opts.adc_bits).context("building the demo chains")?;
    let input = opts.signal().generate().context("generating the test signal")?;
    let traces = bench.run(&input).context("running the demo chains")?;

    match &opts.output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            write_traces(&mut BufWriter::new(file), &traces, opts.format)
                .with_context(|| format!("writing {}", path.display()))?;
            info!("wrote {} rows to {}", traces.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            write_traces(&mut stdout.lock(), &traces, opts.format).context("writing to stdout")?;
        }
    }

    if opts.summary {
        log_summary(&traces, opts.tolerance);
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts = Opts::parse();
    run(&opts)
}

// ------------------------------------ Tests --------------------------------------
