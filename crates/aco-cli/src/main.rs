//! Aco CLI - Command-line interface for ant colony routing experiments.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "aco")]
#[command(author, version, about = "Aco - Ant colony routing experiments", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an experiment config headless
    Run {
        /// Path to the experiment config (JSON)
        config: String,

        /// RNG seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Skip all pacing sleeps
        #[arg(long)]
        fast: bool,

        /// Write the final graph and wave list to this path
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Write a template experiment config
    Generate {
        #[command(subcommand)]
        command: GenerateCommands,
    },

    /// Check an experiment config without running it
    Validate {
        /// Path to the experiment config (JSON)
        config: String,
    },
}

#[derive(Subcommand)]
enum GenerateCommands {
    /// Grid torus topology with wraparound edges
    Grid {
        /// Output file path
        output: String,

        /// Grid width
        #[arg(short, long, default_value = "9")]
        x: usize,

        /// Grid height
        #[arg(short, long, default_value = "9")]
        y: usize,
    },

    /// Fully linked topology
    Full {
        /// Output file path
        output: String,

        /// Number of nodes
        #[arg(short, long, default_value = "10")]
        nodes: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            seed,
            fast,
            output,
        } => commands::run::run(&config, seed, fast, output.as_deref(), cli.verbose),
        Commands::Generate { command } => match command {
            GenerateCommands::Grid { output, x, y } => commands::generate::grid(&output, x, y),
            GenerateCommands::Full { output, nodes } => commands::generate::full(&output, nodes),
        },
        Commands::Validate { config } => commands::validate::run(&config),
    }
}
