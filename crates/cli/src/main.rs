//! Pipeline simulator CLI.
//!
//! This binary loads a program (and optionally a data memory image), runs it to
//! completion, and reports the outcome. It performs:
//! 1. **Loading:** Parses the program and memory image; load errors exit with code 1.
//! 2. **Run:** Drives the simulator, optionally printing stage occupancy every cycle.
//! 3. **Report:** Prints the register file and counters, and dumps data memory
//!    to `mmap_<program file name>` unless told otherwise.

use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use tracing::error;
use tracing_subscriber::EnvFilter;

use pipesim_core::config::{BackendType, Config};
use pipesim_core::sim::loader;
use pipesim_core::sim::{Simulator, Termination};

/// Backend selection on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Backend {
    /// Busy flags and forwarding channels.
    InOrder,
    /// Reservation station and reorder buffer.
    OutOfOrder,
}

impl From<Backend> for BackendType {
    fn from(b: Backend) -> Self {
        match b {
            Backend::InOrder => Self::InOrder,
            Backend::OutOfOrder => Self::OutOfOrder,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "pipesim",
    author,
    version,
    about = "Cycle-accurate pipelined processor simulator",
    long_about = "Run an assembly program on a twelve-stage pipeline with branch prediction \
                  and optional out-of-order completion.\n\nExamples:\n  \
                  pipesim prog.txt\n  \
                  pipesim prog.txt --memory memory_map.txt --backend out-of-order --trace"
)]
struct Cli {
    /// Assembly program to run.
    program: PathBuf,

    /// Data memory image (whitespace-separated signed words).
    #[arg(short, long)]
    memory: Option<PathBuf>,

    /// Backend variant; overrides the configuration file.
    #[arg(short, long, value_enum)]
    backend: Option<Backend>,

    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print stage occupancy after every cycle.
    #[arg(short, long)]
    trace: bool,

    /// Where to write the final memory image (default: `mmap_<program>`).
    #[arg(long)]
    dump_memory: Option<PathBuf>,

    /// Do not write the final memory image.
    #[arg(long, conflicts_with = "dump_memory")]
    no_dump: bool,

    /// Print only these statistics sections (summary, stalls, instruction_mix, branch, ooo).
    #[arg(long, value_delimiter = ',')]
    stats: Vec<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(msg) = run(&cli) {
        error!("{msg}");
        eprintln!("\n[!] FATAL: {msg}");
        process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<Config, String> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            Config::from_json(&text).map_err(|e| e.to_string())?
        }
        None => Config::default(),
    };
    if let Some(backend) = cli.backend {
        config.pipeline.backend = backend.into();
    }
    if cli.trace {
        config.general.trace_pipeline = true;
    }
    Ok(config)
}

fn run(cli: &Cli) -> Result<(), String> {
    let config = load_config(cli)?;
    let program = loader::load_program(&cli.program).map_err(|e| e.to_string())?;
    let memory = loader::load_memory(cli.memory.as_deref(), config.memory.size)
        .map_err(|e| e.to_string())?;

    println!("Configuration: {:?} backend", config.pipeline.backend);
    println!(
        "  Predictor: {:?}  BTB: {}  PT: {}  ROB: {}  RS: {}",
        config.pipeline.branch_predictor,
        config.pipeline.btb_size,
        config.pipeline.pt_size,
        config.pipeline.rob_size,
        config.pipeline.rs_size
    );
    println!();
    print!("{program}");

    let mut sim = Simulator::new(program, memory, &config);
    let report = if config.general.trace_pipeline {
        sim.run_with(|snap| print!("{snap}"))
    } else {
        sim.run()
    };

    println!("\n{}", sim.cpu.regs.dump());
    println!("{}", report.stats);
    report.stats.print_sections(&cli.stats);

    if let Termination::Aborted(err) = report.termination {
        return Err(err.to_string());
    }
    if !cli.no_dump {
        let path = cli
            .dump_memory
            .clone()
            .unwrap_or_else(|| loader::dump_path_for(&cli.program));
        loader::write_memory_image(&path, &sim.cpu.memory).map_err(|e| e.to_string())?;
    }
    Ok(())
}
