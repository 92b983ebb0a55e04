//! Run an experiment config headless.

use anyhow::{bail, Result};
use aco::prelude::*;
use colored::Colorize;

pub fn run(
    config_path: &str,
    seed: Option<u64>,
    fast: bool,
    output: Option<&str>,
    verbose: bool,
) -> Result<()> {
    println!("{} Loading {}...", "→".blue(), config_path.cyan());
    let config = ExperimentConfig::load(config_path)?;
    if config.ants.is_empty() {
        bail!("config has no waves; add at least one record under \"ants\"");
    }
    let graph = config.build_graph()?;
    println!(
        "  Loaded: {} nodes, {} edges, {} waves",
        graph.node_count().to_string().cyan(),
        graph.edge_count().to_string().cyan(),
        config.ants.len().to_string().cyan()
    );

    let mut waves = config.ants;
    if fast {
        for wave in &mut waves {
            wave.step_sleep = 0.0;
            wave.iteration_sleep = 0.0;
            wave.wave_sleep = 0.0;
        }
    }

    println!("{} Running...", "→".blue());
    let mut runner = ColonyRunner::new(graph, waves)
        .with_options(RunnerOptions { seed, pacing: true })
        .with_status_callback(move |msg| {
            if verbose {
                println!("  {}", msg);
            }
        });
    runner.start()?;
    runner.join();

    let stats = runner.stats();
    println!();
    println!("{} Run complete!", "✓".green().bold());
    println!(
        "  State: {}",
        match stats.state {
            RunnerState::Completed => "completed".green(),
            RunnerState::Stopped => "stopped".yellow(),
            _ => "unknown".red(),
        }
    );
    println!(
        "  Trail coverage: {} / {} edges",
        stats.pheromone_edges.to_string().green(),
        stats.edges.to_string().cyan()
    );

    if let Some(path) = output {
        let exported = export_config(&runner.graph_snapshot(), runner.waves());
        exported.save(path)?;
        println!("  Saved final state to {}", path.cyan());
    }

    Ok(())
}
