//! # Aco Runtime
//!
//! The colony runner and experiment configuration layer.
//!
//! The runner drives the nested wave → iteration → step loop on a
//! single background worker: it applies each wave's structural edits,
//! evaporates trail, spawns ant batches, advances every live ant one
//! step per tick, and honors cooperative cancellation at every loop
//! checkpoint. A renderer or controller observes the run through
//! cloned snapshots taken under the colony lock.

pub mod runner;
pub mod config;
pub mod prelude;
