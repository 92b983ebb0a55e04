//! # Aco Core
//!
//! Graph model, wave configuration, and ant decision policies for
//! pheromone-based stochastic pathfinding ("ant colony routing").
//!
//! The core pieces:
//!
//! - **ColonyGraph** — a directed graph whose nodes carry a success
//!   value and whose edges carry a static weight plus a mutable
//!   pheromone level. Trail decays by evaporation and grows by deposit.
//! - **WaveConfig** — the immutable parameter record for one wave of
//!   ants (policy, budgets, bias exponents, pacing, structural edits).
//! - **Ant** — a walking agent bound to one graph and one wave. Three
//!   selection policies (random, routing, minority) share a single
//!   step contract and differ only in how the next node is chosen.
//!
//! ## Quick Start
//!
//! ```rust
//! use aco_core::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut graph = ColonyGraph::new();
//! graph.add_edge("A", "B", 1.0, 0.0);
//! graph.add_edge("B", "C", 1.0, 0.0);
//! graph.set_node_value("C", 1.0);
//!
//! let wave = WaveConfig::default();
//! let mut ant = Ant::spawn(&wave, "A");
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! while ant.step(&mut graph, &mut rng) {}
//! ```

pub mod types;
pub mod graph;
pub mod wave;
pub mod ant;
pub mod error;
pub mod prelude;

pub use error::{AcoError, ConfigError, Result};
