//! Settlement Planner - Entry Point
//!
//! Loads a scenario file, starts the simulation, then reads commands from
//! stdin (or a script file) until the simulation is closed.

use settlement_planner::command::{parse_command, ScenarioConfig};
use settlement_planner::core::error::ConfigError;

use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Settlement growth simulation driven by text commands
#[derive(Parser, Debug)]
#[command(name = "settlement-planner")]
#[command(about = "Simulate settlement growth plans under pluggable facility selection policies")]
struct Args {
    /// Scenario file (line format, or TOML when the extension is .toml)
    config: PathBuf,

    /// Read commands from this file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,

    /// Log filter directive (overrides RUST_LOG)
    #[arg(long)]
    log_filter: Option<String>,
}

fn main() -> Result<(), ConfigError> {
    let args = Args::parse();

    let filter = match &args.log_filter {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("settlement_planner=info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let scenario = ScenarioConfig::load(&args.config)?;
    let mut simulation = scenario.build()?;

    let interactive = args.script.is_none();
    let input: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    simulation.start();
    println!("The simulation has started");

    let mut lines = input.lines();
    while simulation.is_running() {
        if interactive {
            print!("> ");
            io::stdout().flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_command(line) {
            Ok(action) => {
                let report = simulation.execute_command(action);
                if let Some(output) = report.output.filter(|text| !text.is_empty()) {
                    println!("{}", output);
                }
                if let Some(error) = report.error {
                    println!("Error: {}", error);
                }
            }
            Err(e) => {
                println!("{}", e);
            }
        }
    }

    tracing::info!(
        ticks = simulation.current_tick(),
        actions = simulation.actions_log().len(),
        "Session finished"
    );
    Ok(())
}
