//! Aco Core Prelude — convenient imports for common usage.
//!
//! ```rust
//! use aco_core::prelude::*;
//! ```

// Re-export commonly used types
pub use crate::types::{AntClass, AntId, AntSnapshot, EdgeData, NodeData};

// Re-export the graph
pub use crate::graph::{ColonyGraph, NeighborEdge};

// Re-export the wave configuration
pub use crate::wave::WaveConfig;

// Re-export the ant and its policy
pub use crate::ant::{Ant, Policy};

// Re-export error types
pub use crate::error::{AcoError, ConfigError, Result};
