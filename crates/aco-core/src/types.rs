//! Shared types used across the aco crates.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an ant in the colony.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AntId(pub Uuid);

impl AntId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AntId {
    fn default() -> Self {
        Self::new()
    }
}

/// The ant policy variants.
///
/// All three share the same step contract; they differ only in how the
/// next node is selected and when pheromone is deposited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AntClass {
    /// Uniform choice among outgoing neighbors; ignores trail entirely.
    Random,
    /// Trail-following: prefers edges proportional to
    /// `pheromone^alpha * weight^beta` (positive feedback).
    Routing,
    /// Anti-congestion: prefers the *least* marked edges, spreading
    /// load instead of reinforcing a single path.
    Minority,
}

impl Default for AntClass {
    fn default() -> Self {
        AntClass::Routing
    }
}

/// Data stored on a graph node.
///
/// A node with `value > 0` is a success node — reaching it terminates
/// (or reinforces) an ant's walk. Node values are set by configuration
/// and wave edits, never by ants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeData {
    pub label: String,
    pub value: f64,
}

/// Data stored on a directed edge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EdgeData {
    /// Static traversal cost (> 0).
    pub weight: f64,
    /// Mutable trail strength (>= 0). Decays by evaporation, grows by
    /// ant deposit.
    pub pheromone: f64,
}

/// A serializable snapshot of one ant's traversal state, for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct AntSnapshot {
    pub id: AntId,
    pub class: AntClass,
    pub current_node: String,
    pub path: Vec<String>,
    pub success: bool,
    /// Deposit attempts that hit a missing edge during this walk.
    pub missed_deposits: usize,
}
