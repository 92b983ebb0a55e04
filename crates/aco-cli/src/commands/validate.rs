//! Check an experiment config without running it.

use anyhow::{bail, Result};
use aco::prelude::*;
use colored::Colorize;

pub fn run(config_path: &str) -> Result<()> {
    let config = ExperimentConfig::load(config_path)?;
    let graph = config.build_graph()?;
    println!(
        "{} Graph: {} nodes, {} edges",
        "→".blue(),
        graph.node_count().to_string().cyan(),
        graph.edge_count().to_string().cyan()
    );

    if config.ants.is_empty() {
        bail!("config has no waves; add at least one record under \"ants\"");
    }

    let mut failures = 0;
    for (i, wave) in config.ants.iter().enumerate() {
        match wave.validate() {
            Ok(()) => {
                let mut note = String::new();
                if !wave.ant_random_spawn && !graph.contains_node(&wave.ant_spawn_node) {
                    note = format!(
                        " {}",
                        format!("(spawn node {:?} not in graph)", wave.ant_spawn_node).yellow()
                    );
                }
                println!("  wave {}: {}{}", i, "ok".green(), note);
            }
            Err(err) => {
                failures += 1;
                println!("  wave {}: {} {}", i, "invalid".red().bold(), err);
            }
        }
    }

    if failures > 0 {
        bail!("{failures} invalid wave(s)");
    }
    println!("{} Config is valid", "✓".green().bold());
    Ok(())
}
