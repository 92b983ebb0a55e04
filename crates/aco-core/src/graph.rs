//! ColonyGraph — the shared pheromone field.
//!
//! A directed graph backed by petgraph's `StableDiGraph` with a
//! label→index map for O(1) lookup by node label. Stable indices matter
//! here because edge removal can prune orphaned nodes mid-run.
//!
//! Every mutator tolerates missing nodes/edges: the operation becomes a
//! no-op instead of an error, so a misconfigured wave edit can never
//! take the scheduler down.

use crate::types::{EdgeData, NodeData};
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

/// An outgoing neighbor as seen by an ant: target label, edge weight,
/// edge pheromone.
#[derive(Debug, Clone)]
pub struct NeighborEdge {
    pub node: String,
    pub weight: f64,
    pub pheromone: f64,
}

/// Directed graph of valued nodes and weighted, pheromone-carrying edges.
#[derive(Debug, Clone, Default)]
pub struct ColonyGraph {
    graph: StableDiGraph<NodeData, EdgeData>,
    /// Map from node label to petgraph's internal index.
    node_index: HashMap<String, NodeIndex>,
}

impl ColonyGraph {
    pub fn new() -> Self {
        Self {
            graph: StableDiGraph::new(),
            node_index: HashMap::new(),
        }
    }

    /// Insert an isolated node with value 0.0 if the label is new.
    /// An existing node keeps its current value.
    pub fn ensure_node(&mut self, label: &str) {
        self.intern_node(label);
    }

    fn intern_node(&mut self, label: &str) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(label) {
            return idx;
        }
        let idx = self.graph.add_node(NodeData {
            label: label.to_string(),
            value: 0.0,
        });
        self.node_index.insert(label.to_string(), idx);
        idx
    }

    /// Add a directed edge tail → head, creating missing endpoints with
    /// value 0. At most one edge exists per ordered pair; adding again
    /// replaces the edge data.
    pub fn add_edge(&mut self, tail: &str, head: &str, weight: f64, pheromone: f64) {
        let tail_idx = self.intern_node(tail);
        let head_idx = self.intern_node(head);
        let data = EdgeData { weight, pheromone };
        if let Some(edge_idx) = self.graph.find_edge(tail_idx, head_idx) {
            self.graph[edge_idx] = data;
        } else {
            self.graph.add_edge(tail_idx, head_idx, data);
        }
    }

    /// Remove the edge tail → head. No-op if it does not exist. An
    /// endpoint left with no incident edges at all is deleted from the
    /// node set.
    pub fn remove_edge(&mut self, tail: &str, head: &str) {
        let (Some(&tail_idx), Some(&head_idx)) =
            (self.node_index.get(tail), self.node_index.get(head))
        else {
            return;
        };
        let Some(edge_idx) = self.graph.find_edge(tail_idx, head_idx) else {
            return;
        };
        self.graph.remove_edge(edge_idx);

        for (label, idx) in [(tail, tail_idx), (head, head_idx)] {
            let degree = self.graph.edges_directed(idx, Direction::Outgoing).count()
                + self.graph.edges_directed(idx, Direction::Incoming).count();
            if degree == 0 {
                self.graph.remove_node(idx);
                self.node_index.remove(label);
            }
        }
    }

    /// Set a node's success value. No-op if the node does not exist.
    pub fn set_node_value(&mut self, label: &str, value: f64) {
        if let Some(&idx) = self.node_index.get(label) {
            self.graph[idx].value = value;
        }
    }

    pub fn node_value(&self, label: &str) -> Option<f64> {
        self.node_index.get(label).map(|&idx| self.graph[idx].value)
    }

    pub fn contains_node(&self, label: &str) -> bool {
        self.node_index.contains_key(label)
    }

    /// Multiplicative trail decay: `pheromone *= (1 - rate)` on every
    /// edge. A rate of 0 is skipped entirely; a rate of 1 zeroes all
    /// trail.
    pub fn evaporate(&mut self, rate: f64) {
        if rate <= 0.0 {
            return;
        }
        let factor = (1.0 - rate).max(0.0);
        for edge_idx in self.graph.edge_indices().collect::<Vec<_>>() {
            self.graph[edge_idx].pheromone *= factor;
        }
    }

    /// Reset every edge's pheromone to 0.
    pub fn clear_pheromones(&mut self) {
        self.evaporate(1.0);
    }

    /// All outgoing neighbors of a node with their edge data. Empty if
    /// the node is missing or a dead end.
    pub fn neighbors(&self, label: &str) -> Vec<NeighborEdge> {
        let Some(&idx) = self.node_index.get(label) else {
            return Vec::new();
        };
        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|edge| NeighborEdge {
                node: self.graph[edge.target()].label.clone(),
                weight: edge.weight().weight,
                pheromone: edge.weight().pheromone,
            })
            .collect()
    }

    /// Add `amount` to the pheromone of the edge tail → head. Returns
    /// false (without mutating anything) if the edge does not exist.
    pub fn deposit(&mut self, tail: &str, head: &str, amount: f64) -> bool {
        let (Some(&tail_idx), Some(&head_idx)) =
            (self.node_index.get(tail), self.node_index.get(head))
        else {
            return false;
        };
        let Some(edge_idx) = self.graph.find_edge(tail_idx, head_idx) else {
            return false;
        };
        self.graph[edge_idx].pheromone += amount;
        true
    }

    pub fn edge(&self, tail: &str, head: &str) -> Option<EdgeData> {
        let tail_idx = self.node_index.get(tail)?;
        let head_idx = self.node_index.get(head)?;
        let edge_idx = self.graph.find_edge(*tail_idx, *head_idx)?;
        Some(self.graph[edge_idx])
    }

    pub fn pheromone(&self, tail: &str, head: &str) -> Option<f64> {
        self.edge(tail, head).map(|e| e.pheromone)
    }

    /// All node labels, in storage order.
    pub fn node_labels(&self) -> Vec<String> {
        self.graph
            .node_indices()
            .map(|idx| self.graph[idx].label.clone())
            .collect()
    }

    /// All nodes with their values.
    pub fn nodes(&self) -> Vec<NodeData> {
        self.graph
            .node_indices()
            .map(|idx| self.graph[idx].clone())
            .collect()
    }

    /// All edges as (tail label, head label, data).
    pub fn edges(&self) -> Vec<(String, String, EdgeData)> {
        self.graph
            .edge_indices()
            .map(|idx| {
                let (a, b) = self.graph.edge_endpoints(idx).expect("edge exists");
                (
                    self.graph[a].label.clone(),
                    self.graph[b].label.clone(),
                    self.graph[idx],
                )
            })
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of edges carrying any trail — a cheap coverage measure of
    /// how much of the graph the colony has discovered.
    pub fn pheromone_edge_count(&self) -> usize {
        self.graph
            .edge_indices()
            .filter(|&idx| self.graph[idx].pheromone > 0.0)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_graph() -> ColonyGraph {
        let mut g = ColonyGraph::new();
        g.add_edge("A", "B", 2.0, 0.5);
        g.add_edge("B", "C", 4.0, 1.0);
        g
    }

    #[test]
    fn add_edge_creates_missing_nodes_with_zero_value() {
        let g = line_graph();
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.node_value("A"), Some(0.0));
        assert_eq!(g.node_value("C"), Some(0.0));
    }

    #[test]
    fn evaporation_scales_every_edge() {
        let mut g = line_graph();
        g.evaporate(0.1);
        assert!((g.pheromone("A", "B").unwrap() - 0.45).abs() < 1e-12);
        assert!((g.pheromone("B", "C").unwrap() - 0.9).abs() < 1e-12);
    }

    #[test]
    fn evaporation_never_goes_negative() {
        let mut g = line_graph();
        g.evaporate(1.0);
        assert_eq!(g.pheromone("A", "B"), Some(0.0));
        assert_eq!(g.pheromone("B", "C"), Some(0.0));
        g.evaporate(0.5);
        assert_eq!(g.pheromone("A", "B"), Some(0.0));
    }

    #[test]
    fn evaporation_rate_zero_is_a_noop() {
        let mut g = line_graph();
        g.evaporate(0.0);
        assert_eq!(g.pheromone("A", "B"), Some(0.5));
    }

    #[test]
    fn remove_edge_prunes_orphaned_nodes() {
        let mut g = line_graph();
        // C's only incident edge goes away with B->C
        g.remove_edge("B", "C");
        assert!(!g.contains_node("C"));
        // B still has A->B
        assert!(g.contains_node("B"));
        assert_eq!(g.node_count(), 2);
    }

    #[test]
    fn remove_edge_keeps_nodes_with_remaining_edges() {
        let mut g = line_graph();
        g.add_edge("A", "C", 1.0, 0.0);
        g.remove_edge("B", "C");
        assert!(g.contains_node("C"));
        assert!(g.contains_node("B"));
    }

    #[test]
    fn remove_missing_edge_is_a_noop() {
        let mut g = line_graph();
        g.remove_edge("A", "C");
        g.remove_edge("X", "Y");
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.node_count(), 3);
    }

    #[test]
    fn deposit_on_missing_edge_reports_failure() {
        let mut g = line_graph();
        assert!(!g.deposit("C", "A", 1.0));
        assert!(g.deposit("A", "B", 1.0));
        assert_eq!(g.pheromone("A", "B"), Some(1.5));
    }

    #[test]
    fn set_value_on_missing_node_is_a_noop() {
        let mut g = line_graph();
        g.set_node_value("Z", 5.0);
        assert_eq!(g.node_value("Z"), None);
        g.set_node_value("C", 1.0);
        assert_eq!(g.node_value("C"), Some(1.0));
    }

    #[test]
    fn neighbors_are_outgoing_only() {
        let g = line_graph();
        let n = g.neighbors("B");
        assert_eq!(n.len(), 1);
        assert_eq!(n[0].node, "C");
        assert_eq!(n[0].weight, 4.0);
        assert!(g.neighbors("C").is_empty());
        assert!(g.neighbors("missing").is_empty());
    }

    #[test]
    fn pheromone_edge_count_tracks_discovery() {
        let mut g = ColonyGraph::new();
        g.add_edge("A", "B", 1.0, 0.0);
        g.add_edge("B", "C", 1.0, 0.0);
        assert_eq!(g.pheromone_edge_count(), 0);
        g.deposit("A", "B", 1.0);
        assert_eq!(g.pheromone_edge_count(), 1);
        g.clear_pheromones();
        assert_eq!(g.pheromone_edge_count(), 0);
    }

    #[test]
    fn adding_existing_edge_replaces_data() {
        let mut g = line_graph();
        g.add_edge("A", "B", 7.0, 2.0);
        assert_eq!(g.edge_count(), 2);
        let e = g.edge("A", "B").unwrap();
        assert_eq!(e.weight, 7.0);
        assert_eq!(e.pheromone, 2.0);
    }
}
