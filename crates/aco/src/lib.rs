//! # Aco
//!
//! Ant colony routing: pheromone-based stochastic pathfinding on
//! directed graphs.
//!
//! Waves of ants walk a shared graph. Each edge carries a static weight
//! and a mutable pheromone level; each node carries a success value.
//! Ants bias their next step by trail strength and edge cost, lay trail
//! on the paths they find, and the trail evaporates between iterations,
//! so the colony converges on short successful routes and forgets stale
//! ones.
//!
//! ## Quick Start
//!
//! ```rust
//! use aco::prelude::*;
//!
//! // Describe the terrain: weighted edges, one success node.
//! let mut graph = ColonyGraph::new();
//! graph.add_edge("A", "B", 1.0, 0.0);
//! graph.add_edge("A", "C", 2.0, 0.0);
//! graph.add_edge("B", "D", 1.0, 0.0);
//! graph.add_edge("C", "D", 1.0, 0.0);
//! graph.set_node_value("D", 1.0);
//!
//! // One wave of routing ants, no pacing.
//! let wave = WaveConfig::default();
//! let mut runner = ColonyRunner::new(graph, vec![wave]).with_options(RunnerOptions {
//!     seed: Some(7),
//!     pacing: false,
//! });
//! runner.start().unwrap();
//! runner.join();
//!
//! let stats = runner.stats();
//! println!("{} / {} edges carry trail", stats.pheromone_edges, stats.edges);
//! ```
//!
//! ## Architecture
//!
//! - [`aco_core`] - graph model, wave configuration, ant policies
//! - [`aco_runtime`] - colony runner, experiment configuration
//!
//! ## Ant policies
//!
//! | Policy | Preference |
//! |----------|-----------------------------------------------------|
//! | random | uniform over outgoing edges, visited or not |
//! | routing | pheromone^alpha * weight^beta over unvisited edges |
//! | minority | inverted routing scores: the weakest trail wins |

// Re-export the subcrates
pub use aco_core as core;
pub use aco_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust
/// use aco::prelude::*;
/// ```
pub mod prelude {
    pub use aco_core::prelude::*;
    pub use aco_runtime::prelude::*;
}
