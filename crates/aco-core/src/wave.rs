//! WaveConfig — the immutable parameter record for one wave.
//!
//! A run is an ordered list of waves. Each wave fixes the ant policy
//! and every tunable knob for its iterations, plus the structural edits
//! applied once at wave start. The record (de)serializes with the same
//! key names the experiment config files use, so it round-trips through
//! the loader untouched.

use crate::error::{AcoError, Result};
use crate::types::AntClass;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn default_ant_class() -> AntClass {
    AntClass::Routing
}
fn default_ant_max_steps() -> usize {
    20
}
fn default_max_iterations() -> usize {
    15
}
fn default_spawn_node() -> String {
    "A".to_string()
}
fn default_evaporation_rate() -> f64 {
    0.1
}
fn default_alpha() -> f64 {
    0.7
}
fn default_beta() -> f64 {
    0.3
}
fn default_random_chance() -> f64 {
    0.05
}
fn default_concurrent_ants() -> usize {
    2
}
fn default_stop_on_success() -> bool {
    true
}
fn default_sleep() -> f64 {
    0.5
}

/// All tunable parameters for one wave of ants.
///
/// Immutable once the wave starts executing. Every field has a default,
/// so a wave record can be as sparse as `{}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveConfig {
    /// Ant policy for this wave: random | routing | minority.
    #[serde(rename = "class", default = "default_ant_class")]
    pub ant_class: AntClass,

    /// Maximum number of steps an ant may take before giving up.
    #[serde(default = "default_ant_max_steps")]
    pub ant_max_steps: usize,

    /// Number of iterations (ant batches) in this wave.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Spawn each ant at a uniformly random existing node instead of
    /// `ant_spawn_node` (re-rolled per ant).
    #[serde(rename = "random_spawn", default)]
    pub ant_random_spawn: bool,

    /// Manual spawn node, used when `ant_random_spawn` is off.
    #[serde(rename = "spawn_node", default = "default_spawn_node")]
    pub ant_spawn_node: String,

    /// Evaporation rate (rho), applied once per iteration.
    #[serde(default = "default_evaporation_rate")]
    pub evaporation_rate: f64,

    /// Pheromone bias exponent.
    #[serde(default = "default_alpha")]
    pub alpha: f64,

    /// Edge cost bias exponent.
    #[serde(default = "default_beta")]
    pub beta: f64,

    /// Probability of bypassing the policy and picking uniformly.
    #[serde(default = "default_random_chance")]
    pub random_chance: f64,

    /// Number of ants walking concurrently per iteration.
    #[serde(default = "default_concurrent_ants")]
    pub concurrent_ants: usize,

    /// Lay +1 trail on every traversed edge, instead of depositing a
    /// path-cost-scaled budget only on success.
    #[serde(default)]
    pub put_pheromones_always: bool,

    /// The ant dies at the first success node it reaches.
    #[serde(default = "default_stop_on_success")]
    pub stop_on_success: bool,

    /// Minority only: restrict selection to edges that already carry
    /// trail before inverting the preference.
    #[serde(default)]
    pub prioritize_pheromone_routes: bool,

    /// Pacing sleeps in seconds for the three loop levels.
    #[serde(default = "default_sleep")]
    pub step_sleep: f64,
    #[serde(default = "default_sleep")]
    pub iteration_sleep: f64,
    #[serde(default = "default_sleep")]
    pub wave_sleep: f64,

    /// Node value overrides applied at wave start.
    #[serde(default)]
    pub node_value_changes: BTreeMap<String, f64>,

    /// Edges removed at wave start (orphaned nodes are pruned).
    #[serde(default)]
    pub remove_edges: Vec<(String, String)>,

    /// Zero all trail at wave start, discarding prior waves' deposits.
    #[serde(default)]
    pub clear_pheromones: bool,
}

impl Default for WaveConfig {
    fn default() -> Self {
        serde_json::from_value(serde_json::json!({})).expect("empty wave record has defaults")
    }
}

impl WaveConfig {
    /// Check numeric ranges. Out-of-range values are rejected, never
    /// silently clamped, so the caller can surface a correctable input
    /// error before a run starts.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("evaporation_rate", self.evaporation_rate),
            ("random_chance", self.random_chance),
        ] {
            if !(0.0..=1.0).contains(&value) || !value.is_finite() {
                return Err(AcoError::out_of_range(field, 0.0, 1.0, value));
            }
        }
        for (field, value) in [("alpha", self.alpha), ("beta", self.beta)] {
            if !value.is_finite() {
                return Err(AcoError::invalid_config(
                    field,
                    value.to_string(),
                    "must be a finite number",
                ));
            }
        }
        for (field, value) in [
            ("step_sleep", self.step_sleep),
            ("iteration_sleep", self.iteration_sleep),
            ("wave_sleep", self.wave_sleep),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(AcoError::invalid_config(
                    field,
                    value.to_string(),
                    "must be a non-negative number of seconds",
                ));
            }
        }
        for (field, value) in [
            ("ant_max_steps", self.ant_max_steps),
            ("max_iterations", self.max_iterations),
            ("concurrent_ants", self.concurrent_ants),
        ] {
            if value == 0 {
                return Err(AcoError::invalid_config(
                    field,
                    "0",
                    "must be at least 1",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_record_takes_documented_defaults() {
        let wave: WaveConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(wave.ant_class, AntClass::Routing);
        assert_eq!(wave.ant_max_steps, 20);
        assert_eq!(wave.max_iterations, 15);
        assert!(!wave.ant_random_spawn);
        assert_eq!(wave.evaporation_rate, 0.1);
        assert_eq!(wave.alpha, 0.7);
        assert_eq!(wave.beta, 0.3);
        assert_eq!(wave.random_chance, 0.05);
        assert_eq!(wave.concurrent_ants, 2);
        assert!(!wave.put_pheromones_always);
        assert!(wave.stop_on_success);
        assert!(!wave.clear_pheromones);
        assert!(wave.node_value_changes.is_empty());
        assert!(wave.remove_edges.is_empty());
        wave.validate().unwrap();
    }

    #[test]
    fn external_key_names_round_trip() {
        let json = serde_json::json!({
            "class": "minority",
            "random_spawn": true,
            "spawn_node": "AU",
            "prioritize_pheromone_routes": true,
            "remove_edges": [["A", "B"], ["B", "C"]],
            "node_value_changes": {"BX": 1.0}
        });
        let wave: WaveConfig = serde_json::from_value(json).unwrap();
        assert_eq!(wave.ant_class, AntClass::Minority);
        assert!(wave.ant_random_spawn);
        assert_eq!(wave.ant_spawn_node, "AU");
        assert_eq!(wave.remove_edges.len(), 2);
        assert_eq!(wave.node_value_changes["BX"], 1.0);

        let back = serde_json::to_value(&wave).unwrap();
        assert_eq!(back["class"], "minority");
        assert_eq!(back["random_spawn"], true);
        assert_eq!(back["spawn_node"], "AU");
        // internal field names must not leak into the record
        assert!(back.get("ant_class").is_none());
        assert!(back.get("ant_spawn_node").is_none());
    }

    #[test]
    fn out_of_range_rate_is_rejected_not_clamped() {
        let mut wave = WaveConfig::default();
        wave.evaporation_rate = 1.5;
        assert!(wave.validate().is_err());
        // the value is untouched for the caller to inspect
        assert_eq!(wave.evaporation_rate, 1.5);

        wave.evaporation_rate = 0.1;
        wave.random_chance = -0.01;
        assert!(wave.validate().is_err());
    }

    #[test]
    fn zero_counts_are_rejected() {
        let mut wave = WaveConfig::default();
        wave.concurrent_ants = 0;
        assert!(wave.validate().is_err());

        let mut wave = WaveConfig::default();
        wave.ant_max_steps = 0;
        assert!(wave.validate().is_err());
    }

    #[test]
    fn negative_sleep_is_rejected() {
        let mut wave = WaveConfig::default();
        wave.step_sleep = -0.5;
        assert!(wave.validate().is_err());
    }
}
