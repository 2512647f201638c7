//! Cache Simulator CLI.
//!
//! The main executable for the simulator. It handles command-line argument
//! parsing, request file loading, and printing the final report.
//!
//! # Usage
//!
//! ```text
//! cache-sim [options] <input_file>
//! ```
//!
//! Options override values from `--config`; anything left unset falls back
//! to the built-in defaults.

use clap::Parser;
use std::path::PathBuf;
use std::process;

extern crate cache_sim;

use cache_sim::common::SimError;
use cache_sim::config::{Config, ImportPolicy, Organization};
use cache_sim::sim::loader;
use cache_sim::sim::{Simulation, VcdWriter};
use cache_sim::stats::SimResult;

/// Command-line arguments for the cache simulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "Cycle-level Cache Simulator")]
struct Args {
    /// Request file (`W,<hex addr>,<data>` or `R,<hex addr>` per line).
    input: PathBuf,

    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of cycles to simulate.
    #[arg(short, long, allow_negative_numbers = true)]
    cycles: Option<i64>,

    /// Simulate a direct-mapped cache.
    #[arg(long, conflicts_with = "fullassociative")]
    directmapped: bool,

    /// Simulate a fully associative cache.
    #[arg(long)]
    fullassociative: bool,

    /// Cache line size in bytes.
    #[arg(long, alias = "cacheLineSize")]
    cache_line_size: Option<u32>,

    /// Number of cache lines.
    #[arg(long, alias = "cacheLines")]
    cache_lines: Option<u32>,

    /// Cache latency in cycles.
    #[arg(long, alias = "cacheLatency")]
    cache_latency: Option<u32>,

    /// Memory latency in cycles.
    #[arg(long, alias = "memoryLatency")]
    memory_latency: Option<u32>,

    /// Trace file output (VCD).
    #[arg(long = "tf")]
    trace_file: Option<PathBuf>,

    /// Fill free lines before evicting on a fully-associative read miss.
    #[arg(long)]
    fill_free: bool,

    /// Also run the other organization and report both.
    #[arg(long)]
    compare: bool,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,
}

impl Args {
    /// Builds the run configuration: config file first, then flag overrides.
    fn to_config(&self) -> Result<Config, SimError> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(cycles) = self.cycles {
            config.simulation.cycles = cycles;
        }
        if self.directmapped {
            config.simulation.organization = Organization::DirectMapped;
        }
        if self.fullassociative {
            config.simulation.organization = Organization::FullyAssociative;
        }
        if let Some(size) = self.cache_line_size {
            config.cache.line_size = size;
        }
        if let Some(lines) = self.cache_lines {
            config.cache.lines = lines;
        }
        if let Some(latency) = self.cache_latency {
            config.cache.line_latency = latency;
        }
        if let Some(latency) = self.memory_latency {
            config.cache.memory_latency = latency;
        }
        if self.trace_file.is_some() {
            config.simulation.trace_file = self.trace_file.clone();
        }
        if self.fill_free {
            config.cache.import_policy = ImportPolicy::FillFree;
        }
        if self.compare {
            config.simulation.compare = true;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Main entry point for the cache simulator.
///
/// # Behavior
///
/// 1. **Configuration**: Parses arguments, loads the optional TOML file and validates.
/// 2. **Loader**: Reads the request file.
/// 3. **Simulation**: Runs the driver until completion or the cycle budget.
/// 4. **Report**: Prints the result (text or JSON).
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), SimError> {
    let config = args.to_config()?;
    let requests = loader::load_requests(&args.input)?;

    let mut sim = Simulation::new(requests, &config);
    if config.simulation.compare {
        sim = sim.with_comparison();
    }
    if let Some(path) = &config.simulation.trace_file {
        sim.attach_trace(Box::new(VcdWriter::create(path)?));
        log::info!("trace file created: {}", path.display());
    }

    let result = sim.run();
    let comparison = sim.comparison_result();

    if args.json {
        print_json(config.simulation.organization, &result, comparison.as_ref());
    } else {
        result.print(&format!("{:?} cache", config.simulation.organization));
        if let Some((organization, other)) = &comparison {
            other.print(&format!("{:?} cache (comparison)", organization));
        }
    }
    Ok(())
}

fn print_json(
    organization: Organization,
    result: &SimResult,
    comparison: Option<&(Organization, SimResult)>,
) {
    let mut report = serde_json::json!({
        "organization": format!("{:?}", organization),
        "result": result,
    });
    if let Some((other, other_result)) = comparison {
        report["comparison"] = serde_json::json!({
            "organization": format!("{:?}", other),
            "result": other_result,
        });
    }
    match serde_json::to_string_pretty(&report) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Error: failed to encode result: {}", e),
    }
}
