//! Faultsweep - fault current along a transmission line
//!
//! Reads a study from a TOML case file, sweeps the fault along the line and
//! prints the fault current profile.
//!
//! # Usage
//!
//! ```bash
//! faultsweep study.toml --step 5 --output results.csv
//! RUST_LOG=trace faultsweep study.toml
//! ```

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Parser;
use faultsweep_core::{
    compute_fault_sweep,
    error::Result,
    input::load_case_file,
    network::Unit,
    report::SweepResult,
};
use log::{error, info};

/// Short-circuit current along a ring or radial transmission line
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the study case file (.toml)
    #[arg(value_name = "CASE_FILE")]
    case_file: PathBuf,

    /// Sweep step in percent of line length (overrides the case file)
    #[arg(short, long)]
    step: Option<u32>,

    /// Unit of the short-circuit capacities: pu or MVA (overrides the case file)
    #[arg(short, long)]
    unit: Option<Unit>,

    /// Write the results as CSV to this file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Log resolver and sweep details
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(err) = run(&args) {
        if err.is_no_physical_solution() {
            error!("the short-circuit data describes no realizable network");
        }
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let origin = args.case_file.display().to_string();
    let mut study = load_case_file(&args.case_file)?.into_study(&origin)?;

    if let Some(step) = args.step {
        study.config = study.config.with_step(step);
    }
    if let Some(unit) = args.unit {
        study.config = study.config.with_unit(unit);
    }

    info!(
        "{}: {} at {} kV / {} MVA",
        origin,
        study.inputs.topology(),
        study.base.voltage_kv(),
        study.base.power_mva()
    );

    let result = compute_fault_sweep(&study.base, &study.inputs, &study.config)?;
    print_table(&result);

    if let Some(path) = &args.output {
        let file = File::create(path).map_err(|e| faultsweep_core::FaultError::ExportError {
            message: format!("cannot create '{}': {}", path.display(), e),
        })?;
        result.write_csv(BufWriter::new(file))?;
        info!("wrote {} rows to {}", result.len(), path.display());
    }

    Ok(())
}

fn print_table(result: &SweepResult) {
    println!("{}", result.topology());
    println!("{:>10} | {:>24} | {:>24}", "Percentual", "Icc (pu)", "Icc (A)");
    for step in result {
        println!(
            "{:>10} | {:>24} | {:>24}",
            step.label(),
            step.pu_polar().to_string(),
            step.amps_polar().to_string()
        );
    }
    if let Some(peak) = result.peak() {
        println!("peak at {}: {} pu", peak.label(), peak.pu_polar());
    }
}
