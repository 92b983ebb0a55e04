//! Write template experiment configs.

use anyhow::Result;
use aco::prelude::*;
use colored::Colorize;
use std::collections::BTreeMap;

pub fn grid(output: &str, x: usize, y: usize) -> Result<()> {
    write_template(output, MacroTopology::GridTorus2d { x, y })
}

pub fn full(output: &str, nodes: usize) -> Result<()> {
    write_template(output, MacroTopology::FullyLinked { x: nodes })
}

fn write_template(output: &str, topology: MacroTopology) -> Result<()> {
    let mut nodes = BTreeMap::new();
    nodes.insert("macro".to_string(), NodeEntry::Generator(topology));

    let config = ExperimentConfig {
        nodes,
        ants: vec![WaveConfig::default()],
    };
    // sanity-check the template before writing it
    let graph = config.build_graph()?;
    config.save(output)?;

    println!(
        "{} Wrote {} ({} nodes, {} edges, 1 wave)",
        "✓".green().bold(),
        output.cyan(),
        graph.node_count().to_string().cyan(),
        graph.edge_count().to_string().cyan()
    );
    Ok(())
}
