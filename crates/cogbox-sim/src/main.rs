//! Cogbox Sim CLI
//!
//! Runs scenario files against the cogbox kernel.

use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use cogbox_core::{Capacity, ComponentKind, Model};
use cogbox_sim::{BlockReport, Scenario, run_session};

/// Cogbox Sim - scenario runner for cycle-driven cognitive models
#[derive(Parser)]
#[command(name = "cogbox-sim")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run cogbox scenario files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario for one or more blocks
    Run {
        /// Path to scenario JSON file
        scenario: PathBuf,
        /// Number of blocks to run
        #[arg(long, default_value = "1")]
        blocks: u64,
        /// Override the scenario's random seed
        #[arg(long)]
        seed: Option<u64>,
        /// Print the full model state after each block
        #[arg(long)]
        dump: bool,
    },

    /// Load and build a scenario without running it
    Check {
        /// Path to scenario JSON file
        scenario: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging to stderr; stdout carries the reports
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::WARN.into()))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Run {
            scenario,
            blocks,
            seed,
            dump,
        } => run_scenario(scenario, blocks, seed, dump),
        Commands::Check { scenario } => run_check(scenario),
    }
}

fn run_scenario(path: PathBuf, blocks: u64, seed: Option<u64>, dump: bool) -> anyhow::Result<()> {
    let mut scenario = Scenario::load(&path)?;
    if let Some(seed) = seed {
        scenario.model.seed = Some(seed);
    }
    let mut model = scenario.build()?;

    println!(
        "{}",
        format!("=== {} ({} blocks) ===", model.name(), blocks).cyan().bold()
    );

    run_session(&scenario, &mut model, blocks, |model, report| {
        print_report(report);
        if dump {
            print!("{}", model.dump(true));
        }
    })?;

    Ok(())
}

fn print_report(report: &BlockReport) {
    let status = if report.halted {
        "halted".green()
    } else {
        "cycle cap".yellow()
    };
    println!();
    println!(
        "{} {}: {} cycles, {}",
        "Block".white().bold(),
        report.block,
        report.cycles,
        status
    );
    for count in &report.counts {
        let oldest = count
            .snapshot
            .oldest_timestamp
            .map(|t| t.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<16} {:>4} elements  mean activation {:.2}  oldest {}",
            count.name, count.snapshot.count, count.snapshot.mean_activation, oldest
        );
    }
}

fn run_check(path: PathBuf) -> anyhow::Result<()> {
    let scenario = Scenario::load(&path)?;
    let mut model = scenario.build()?;
    scenario.start_block(&mut model)?;

    println!("{}", format!("=== {} ===", path.display()).cyan().bold());
    println!("{}: {}", "Model".white().bold(), model.name());
    println!("{}: {}", "Max cycles".white().bold(), scenario.max_cycles);
    print_components(&model);

    let late: Vec<_> = scenario.late_steps().collect();
    if !late.is_empty() {
        println!();
        for (script, step) in &late {
            println!(
                "  {} {} sends {} on cycle {}, past the cap of {}",
                "warning:".yellow().bold(),
                script,
                step.kind,
                step.cycle,
                scenario.max_cycles
            );
        }
    }
    println!();
    println!("{}", "Scenario OK".green().bold());
    Ok(())
}

fn print_components(model: &Model) {
    for component in model.components() {
        match component.kind() {
            ComponentKind::Buffer(buffer) => {
                let config = buffer.config();
                println!(
                    "  {:>4} {:<16} buffer  decay {}  capacity {}  excess {}  access {}  seeded {}",
                    component.id(),
                    component.name(),
                    config.decay,
                    match config.capacity {
                        Capacity::Unlimited => "unlimited".to_string(),
                        Capacity::Limited(n) => n.to_string(),
                    },
                    config.excess.as_str(),
                    config.access.as_str(),
                    buffer.len()
                );
            }
            ComponentKind::Process(_) => {
                println!("  {:>4} {:<16} process", component.id(), component.name());
            }
        }
    }
}
