//! Experiment configuration: the JSON shape experiments load and save.
//!
//! A config file is `{ "nodes": { ... }, "ants": [ ... ] }`. Each entry
//! in `nodes` is either a node record (`value`, `edges`, optional
//! `weights` / `pheromones` parallel arrays) or a topology generator,
//! conventionally under the `"macro"` key. Generators run first, then
//! node records layer on top, so a record can override a generated
//! node's value or add extra edges. `ants` is the ordered wave list.

use aco_core::graph::ColonyGraph;
use aco_core::wave::WaveConfig;
use aco_core::{AcoError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// One node's outgoing edges and value, as stored in a config file.
///
/// `weights` and `pheromones` are parallel to `edges`; absent arrays
/// mean weight 1.0 and pheromone 0.0 for every edge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeRecord {
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub edges: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pheromones: Option<Vec<f64>>,
}

/// A generated topology requested from inside the `nodes` map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MacroTopology {
    /// Every node linked to every other node in both directions.
    #[serde(rename = "fully_linked_graph")]
    FullyLinked { x: usize },
    /// `x` by `y` grid, 4-neighborhood, edges wrap around both axes.
    #[serde(rename = "2d_grid_torus")]
    GridTorus2d { x: usize, y: usize },
}

/// A `nodes` map entry: generator or plain node record. Generators are
/// matched first since their `type` tag never appears on records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeEntry {
    Generator(MacroTopology),
    Record(NodeRecord),
}

/// A full experiment: the graph description plus the wave list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperimentConfig {
    #[serde(default)]
    pub nodes: BTreeMap<String, NodeEntry>,
    #[serde(default)]
    pub ants: Vec<WaveConfig>,
}

impl ExperimentConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config = serde_json::from_str(&text)?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }

    /// Materialize the graph: generators first, then node records.
    ///
    /// Parallel arrays shorter or longer than `edges` are rejected
    /// rather than silently truncated.
    pub fn build_graph(&self) -> Result<ColonyGraph> {
        let mut graph = ColonyGraph::new();

        for entry in self.nodes.values() {
            if let NodeEntry::Generator(topology) = entry {
                match *topology {
                    MacroTopology::FullyLinked { x } => link_fully(&mut graph, x),
                    MacroTopology::GridTorus2d { x, y } => link_grid_torus(&mut graph, x, y),
                }
            }
        }

        for (label, entry) in &self.nodes {
            let record = match entry {
                NodeEntry::Record(record) => record,
                NodeEntry::Generator(_) => continue,
            };
            for (field, array) in [("weights", &record.weights), ("pheromones", &record.pheromones)]
            {
                if let Some(array) = array {
                    if array.len() != record.edges.len() {
                        return Err(AcoError::invalid_config(
                            field,
                            array.len().to_string(),
                            "length must match edges",
                        ));
                    }
                }
            }
            for (i, target) in record.edges.iter().enumerate() {
                let weight = record.weights.as_ref().map_or(1.0, |w| w[i]);
                let pheromone = record.pheromones.as_ref().map_or(0.0, |p| p[i]);
                graph.add_edge(label, target, weight, pheromone);
            }
            graph.ensure_node(label);
            graph.set_node_value(label, record.value);
        }

        Ok(graph)
    }
}

/// Spreadsheet-style names for generated nodes: A..Z, AA..ZZ, AAA..
pub fn generate_node_names(n: usize) -> Vec<String> {
    (0..n).map(spreadsheet_name).collect()
}

fn spreadsheet_name(mut index: usize) -> String {
    let mut name = String::new();
    loop {
        name.insert(0, (b'A' + (index % 26) as u8) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    name
}

/// A complete digraph over `n` generated nodes, unit weights, no trail.
pub fn fully_linked(n: usize) -> ColonyGraph {
    let mut graph = ColonyGraph::new();
    link_fully(&mut graph, n);
    graph
}

/// An `x` by `y` grid torus: each node linked to its four wraparound
/// neighbors, unit weights, no trail.
pub fn grid_torus_2d(x: usize, y: usize) -> ColonyGraph {
    let mut graph = ColonyGraph::new();
    link_grid_torus(&mut graph, x, y);
    graph
}

fn link_fully(graph: &mut ColonyGraph, n: usize) {
    let names = generate_node_names(n);
    for tail in &names {
        graph.ensure_node(tail);
        for head in &names {
            if tail != head {
                graph.add_edge(tail, head, 1.0, 0.0);
            }
        }
    }
}

fn link_grid_torus(graph: &mut ColonyGraph, x: usize, y: usize) {
    if x == 0 || y == 0 {
        return;
    }
    let names = generate_node_names(x * y);
    for i in 0..x {
        for j in 0..y {
            let node = &names[i * y + j];
            let neighborhood = [
                &names[((i + x - 1) % x) * y + j],
                &names[((i + 1) % x) * y + j],
                &names[i * y + (j + 1) % y],
                &names[i * y + (j + y - 1) % y],
            ];
            for neighbor in neighborhood {
                graph.add_edge(node, neighbor, 1.0, 0.0);
            }
        }
    }
}

/// Reconstruct the loader shape from live state, so a paused or
/// finished run (trail included) can be reloaded later. The output
/// always lists nodes explicitly, even for graphs that were generated.
pub fn export_config(graph: &ColonyGraph, waves: &[WaveConfig]) -> ExperimentConfig {
    let mut nodes = BTreeMap::new();
    for label in graph.node_labels() {
        let neighbors = graph.neighbors(&label);
        let record = NodeRecord {
            value: graph.node_value(&label).unwrap_or(0.0),
            edges: neighbors.iter().map(|n| n.node.clone()).collect(),
            weights: Some(neighbors.iter().map(|n| n.weight).collect()),
            pheromones: Some(neighbors.iter().map(|n| n.pheromone).collect()),
        };
        nodes.insert(label, NodeEntry::Record(record));
    }
    ExperimentConfig {
        nodes,
        ants: waves.to_vec(),
    }
}
