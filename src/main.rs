// src/main.rs
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;
use std::sync::mpsc::channel;
use std::time::Duration;
use clap::Parser;
use wavescope::scope::recorder::FeatureRecorder;
use wavescope::scope::session::{self, ControlEvent, SessionConfig};
use wavescope::scope::source::FramedSource;
/// Streaming viewer for raw digitizer waveforms: live waveform display with
/// baseline-anchored autoscale plus a rolling peak-amplitude histogram.
#[derive(Parser, Debug)]
#[command(name = "wavescope", version)]
struct Args {
    /// Raw event data file ('-' reads standard input)
    #[arg(default_value = "-")]
    infile: String,
    /// Number of leading samples used for the baseline estimate
    #[arg(short = 'b', long, default_value_t = 20)]
    baseline: usize,
    /// Directory receiving the latest waveform/histogram PNG snapshots
    #[arg(long)]
    snapshot_dir: Option<PathBuf>,
    /// Histogram redraw interval in milliseconds
    #[arg(long, default_value_t = 1900)]
    tick_ms: u64,
    /// Exit after this many histogram ticks (runs until killed when omitted)
    #[arg(long)]
    max_ticks: Option<u64>,
    /// Append extracted features to this JSON-lines file
    #[arg(long)]
    record: Option<PathBuf>,
}
fn main() {
    env_logger::init();
    let args = Args::parse();
    let source: FramedSource<Box<dyn Read + Send>> = if args.infile == "-" {
        FramedSource::new(Box::new(io::stdin()))
    } else {
        match File::open(&args.infile) {
            Ok(file) => {
                let total_len = file.metadata().ok().map(|m| m.len());
                FramedSource::with_total_len(Box::new(file), total_len)
            }
            Err(err) => {
                eprintln!("Err: {}: \"{}\"", err, args.infile);
                process::exit(err.raw_os_error().unwrap_or(1));
            }
        }
    };
    let recorder = match &args.record {
        Some(path) => match FeatureRecorder::create(path) {
            Ok(recorder) => Some(recorder),
            Err(err) => {
                eprintln!("Err: {}: \"{}\"", err, path.display());
                process::exit(err.raw_os_error().unwrap_or(1));
            }
        },
        None => None,
    };
    // The control surface (buttons, toolbar) plugs in here; the sender stays
    // alive so a missing surface does not read as a shutdown.
    let (_controls, control_rx) = channel::<ControlEvent>();
    let config = SessionConfig {
        baseline_samples: args.baseline.max(1),
        tick_interval: Duration::from_millis(args.tick_ms.max(1)),
        snapshot_dir: args.snapshot_dir,
        max_ticks: args.max_ticks,
        recorder,
    };
    if let Err(err) = session::run(source, config, control_rx) {
        eprintln!("Err: {err:#}");
        process::exit(1);
    }
}
