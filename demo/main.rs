//! cpercep: perceptron and MLP demonstrations.
//!
//! Run with:
//!   cargo run --bin cpercep -- model_AND
//!   cargo run --bin cpercep -- model_linear --seed 7
//!   RUST_LOG=debug cargo run --bin cpercep -- model_XOR
//!
//! A missing or unknown model name prints the valid names and exits with 1.

mod config;
mod logging;
mod models;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use config::DemoConfig;
use models::{Context, SCENARIOS};

#[derive(Parser, Debug)]
#[command(
    name = "cpercep",
    about = "Train and query a perceptron or a two-layer MLP on toy datasets"
)]
struct Cli {
    /// Scenario to run, e.g. model_AND
    model: Option<String>,
    /// Seed for every random draw (training data, initial weights)
    #[arg(long, value_name = "INT")]
    seed: Option<u64>,
    /// JSON file with scenario settings
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn print_models() {
    println!("Valid models:");
    for s in SCENARIOS {
        println!("- {} - {}", s.name, s.description);
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let Some(name) = cli.model else {
        println!("Usage: cpercep <modelName>");
        print_models();
        return Ok(ExitCode::from(1));
    };
    let Some(scenario) = models::find(&name) else {
        println!("Invalid model name: {name}");
        print_models();
        return Ok(ExitCode::from(1));
    };

    let mut config = match cli.config {
        Some(path) => DemoConfig::load_json(&path)?,
        None => DemoConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(model = scenario.name, seed = ?config.seed, "running scenario");

    let mut ctx = Context { config, rng };
    (scenario.run)(&mut ctx)?;
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    if let Err(e) = logging::init_logging() {
        eprintln!("failed to install logger: {e}");
    }

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
