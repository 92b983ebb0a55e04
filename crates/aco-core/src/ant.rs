//! Ant — a walking agent with a pluggable selection policy.
//!
//! An ant is a two-state machine (alive, dead) whose only transition is
//! `step()`. Each step it asks its policy for the next node, optionally
//! lays trail, moves, and checks whether it landed on a success node.
//!
//! The three policies share one struct; they are a [`Policy`] value
//! rather than a type hierarchy, because routing and minority both fall
//! back to the random arm whenever their weighted draw degenerates.

use crate::graph::{ColonyGraph, NeighborEdge};
use crate::types::{AntClass, AntId, AntSnapshot};
use crate::wave::WaveConfig;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// Minority ants treat scores below this as "no trail" when restricted
/// to already-discovered routes.
const TRAIL_EPSILON: f64 = 0.01;

/// Next-node selection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Uniform choice among all outgoing neighbors.
    Random,
    /// Weighted by `pheromone^alpha * weight^beta` over unvisited
    /// neighbors (exploitation), uniform with `random_chance`
    /// probability (exploration).
    Routing,
    /// Same score, inverted preference: lower-trail edges win.
    Minority { prioritize_pheromone_routes: bool },
}

impl From<&WaveConfig> for Policy {
    fn from(wave: &WaveConfig) -> Self {
        match wave.ant_class {
            AntClass::Random => Policy::Random,
            AntClass::Routing => Policy::Routing,
            AntClass::Minority => Policy::Minority {
                prioritize_pheromone_routes: wave.prioritize_pheromone_routes,
            },
        }
    }
}

/// A single ant bound to one graph and one wave configuration.
///
/// Owns its traversal state; the graph is borrowed per step. All
/// parameters are copied from the wave at spawn time — ants never share
/// mutable configuration.
#[derive(Debug, Clone)]
pub struct Ant {
    pub id: AntId,
    policy: Policy,
    pub start_node: String,
    pub current_node: String,
    /// Visited nodes in order; the first element is always the spawn
    /// node, and membership defines "visited" for the policies.
    pub path: Vec<String>,
    pub success: bool,
    /// Deposit attempts that hit a missing edge. The walk absorbs the
    /// anomaly and keeps going; the count surfaces it to observers.
    pub missed_deposits: usize,
    alpha: f64,
    beta: f64,
    random_chance: f64,
    max_steps: usize,
    stop_on_success: bool,
    put_pheromones_always: bool,
}

impl Ant {
    /// Create an ant at `spawn_node` with the wave's parameters.
    pub fn spawn(wave: &WaveConfig, spawn_node: &str) -> Self {
        Self {
            id: AntId::new(),
            policy: Policy::from(wave),
            start_node: spawn_node.to_string(),
            current_node: spawn_node.to_string(),
            path: vec![spawn_node.to_string()],
            success: false,
            missed_deposits: 0,
            alpha: wave.alpha,
            beta: wave.beta,
            random_chance: wave.random_chance,
            max_steps: wave.ant_max_steps,
            stop_on_success: wave.stop_on_success,
            put_pheromones_always: wave.put_pheromones_always,
        }
    }

    pub fn class(&self) -> AntClass {
        match self.policy {
            Policy::Random => AntClass::Random,
            Policy::Routing => AntClass::Routing,
            Policy::Minority { .. } => AntClass::Minority,
        }
    }

    pub fn snapshot(&self) -> AntSnapshot {
        AntSnapshot {
            id: self.id,
            class: self.class(),
            current_node: self.current_node.clone(),
            path: self.path.clone(),
            success: self.success,
            missed_deposits: self.missed_deposits,
        }
    }

    /// Advance one step. Returns `false` when the ant dies: either it
    /// is back at its start node after a success, or its step budget is
    /// exhausted, or (with `stop_on_success`) it just reached a success
    /// node.
    pub fn step<R: Rng>(&mut self, graph: &mut ColonyGraph, rng: &mut R) -> bool {
        if (self.current_node == self.start_node && self.success)
            || self.path.len() >= self.max_steps
        {
            return false;
        }

        let new_node = self.select_next(graph, rng);

        if self.put_pheromones_always {
            // Continuous trail-laying: +1 on the edge about to be
            // traversed. A missing edge (trapped self-step) is a no-op.
            if !graph.deposit(&self.current_node, &new_node, 1.0) {
                self.missed_deposits += 1;
            }
        }

        self.path.push(new_node.clone());
        self.current_node = new_node;

        let on_success_node = graph.node_value(&self.current_node).unwrap_or(0.0) > 0.0;
        if on_success_node {
            self.success = true;
            if !self.put_pheromones_always {
                self.deposit_on_success(graph);
            }
            if self.stop_on_success {
                return false;
            }
        }

        true
    }

    /// Success deposit, by policy. The path-budget reinforcement is a
    /// routing/minority behavior; random ants keep the flat scheme even
    /// here — one unit on the edge just traversed, which after the move
    /// is the node's self-edge and normally absent. A random-class wave
    /// in success-only mode therefore lays no trail.
    fn deposit_on_success(&mut self, graph: &mut ColonyGraph) {
        match self.policy {
            Policy::Random => {
                if !graph.deposit(&self.current_node, &self.current_node, 1.0) {
                    self.missed_deposits += 1;
                }
            }
            Policy::Routing | Policy::Minority { .. } => self.deposit_on_path(graph),
        }
    }

    /// Spread a budget of `max_steps / 2 / total_path_cost` over every
    /// edge of the traversed path, so shorter successful paths are
    /// reinforced more strongly. Path legs without a backing edge are
    /// skipped.
    fn deposit_on_path(&mut self, graph: &mut ColonyGraph) {
        let mut path_cost = 0.0;
        for leg in self.path.windows(2) {
            if let Some(edge) = graph.edge(&leg[0], &leg[1]) {
                path_cost += edge.weight;
            }
        }
        if path_cost <= 0.0 {
            return;
        }
        let budget = self.max_steps as f64 / 2.0 / path_cost;
        for leg in self.path.windows(2) {
            if !graph.deposit(&leg[0], &leg[1], budget) {
                self.missed_deposits += 1;
            }
        }
    }

    fn select_next<R: Rng>(&self, graph: &ColonyGraph, rng: &mut R) -> String {
        match self.policy {
            Policy::Random => self.select_uniform(graph, rng),
            Policy::Routing => self.select_routing(graph, rng),
            Policy::Minority {
                prioritize_pheromone_routes,
            } => self.select_minority(graph, rng, prioritize_pheromone_routes),
        }
    }

    /// Baseline: uniform over all outgoing neighbors, visited or not.
    /// A trapped ant (no outgoing edges) stays in place.
    fn select_uniform<R: Rng>(&self, graph: &ColonyGraph, rng: &mut R) -> String {
        let neighbors = graph.neighbors(&self.current_node);
        if neighbors.is_empty() {
            return self.current_node.clone();
        }
        let idx = rng.gen_range(0..neighbors.len());
        neighbors[idx].node.clone()
    }

    /// Desirability of an edge: trail raised to alpha times cost raised
    /// to beta.
    fn desirability(&self, edge: &NeighborEdge) -> f64 {
        edge.pheromone.powf(self.alpha) * edge.weight.powf(self.beta)
    }

    fn unvisited_scored(&self, graph: &ColonyGraph) -> Vec<(String, f64)> {
        graph
            .neighbors(&self.current_node)
            .into_iter()
            .filter(|n| !self.path.iter().any(|visited| visited == &n.node))
            .map(|n| {
                let score = self.desirability(&n);
                (n.node, score)
            })
            .collect()
    }

    fn select_routing<R: Rng>(&self, graph: &ColonyGraph, rng: &mut R) -> String {
        if rng.gen::<f64>() < self.random_chance {
            return self.select_uniform(graph, rng);
        }

        let candidates = self.unvisited_scored(graph);
        let total: f64 = candidates.iter().map(|(_, s)| s).sum();
        if total > 0.0 {
            let weights: Vec<f64> = candidates.iter().map(|(_, s)| *s).collect();
            if let Ok(sampler) = WeightedIndex::new(&weights) {
                return candidates[sampler.sample(rng)].0.clone();
            }
        }

        // No trail on any unvisited edge yet: explore uniformly.
        self.select_uniform(graph, rng)
    }

    fn select_minority<R: Rng>(
        &self,
        graph: &ColonyGraph,
        rng: &mut R,
        prioritize_pheromone_routes: bool,
    ) -> String {
        if rng.gen::<f64>() < self.random_chance {
            return self.select_uniform(graph, rng);
        }

        let mut candidates = self.unvisited_scored(graph);
        if prioritize_pheromone_routes {
            // Only choose among routes somebody has already marked.
            candidates.retain(|(_, score)| *score >= TRAIL_EPSILON);
        }

        let total: f64 = candidates.iter().map(|(_, s)| s).sum();
        if total > 0.0 {
            // Inverted preference: the smaller the share of trail, the
            // larger the selection weight.
            let weights: Vec<f64> = candidates
                .iter()
                .map(|(_, score)| 1.0 - score / total)
                .collect();
            if weights.iter().sum::<f64>() > 0.0 {
                if let Ok(sampler) = WeightedIndex::new(&weights) {
                    return candidates[sampler.sample(rng)].0.clone();
                }
            }
            // Exactly one candidate: its inverted weight is zero, so
            // take it deterministically instead of dividing by nothing.
            return candidates[0].0.clone();
        }

        self.select_uniform(graph, rng)
    }
}
