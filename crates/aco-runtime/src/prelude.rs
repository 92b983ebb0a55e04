//! Aco Runtime Prelude — convenient imports for common usage.
//!
//! ```rust
//! use aco_runtime::prelude::*;
//! ```

// Re-export the runner and its observation types
pub use crate::runner::{
    ColonyRunner, ColonySnapshot, ColonyStats, RunnerEvent, RunnerOptions, RunnerState,
    StatusCallback,
};

// Re-export the configuration layer
pub use crate::config::{
    export_config, fully_linked, generate_node_names, grid_torus_2d, ExperimentConfig,
    MacroTopology, NodeEntry, NodeRecord,
};

// Re-export the core prelude
pub use aco_core::prelude::*;
