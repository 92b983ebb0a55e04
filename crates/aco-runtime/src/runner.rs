//! ColonyRunner — the wave/iteration/step scheduler.
//!
//! One background worker executes the wave list:
//!
//! 1. At wave start: optionally zero all trail, apply node value
//!    overrides, remove configured edges (pruning orphaned nodes).
//! 2. Per iteration: spawn the wave's ant batch, evaporate, then tick
//!    the step loop — every live ant advances once per tick, dead ants
//!    leave the batch after the full pass.
//! 3. Pacing sleeps between steps/iterations/waves happen with the
//!    colony lock released.
//!
//! `stop()` requests cooperative cancellation: a level-triggered flag
//! checked at the top of every wave, iteration, and step, so the
//! in-flight tick always completes. A second `stop()` is a no-op.

use aco_core::ant::Ant;
use aco_core::graph::ColonyGraph;
use aco_core::types::{AntSnapshot, EdgeData, NodeData};
use aco_core::wave::WaveConfig;
use aco_core::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

/// Lifecycle of the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunnerState {
    /// Not started yet.
    Idle,
    /// Worker executing the wave list.
    Running,
    /// Cancelled before the wave list finished.
    Stopped,
    /// Wave list ran to completion.
    Completed,
}

/// Event emitted by the runner during a run.
#[derive(Debug, Clone, Serialize)]
pub enum RunnerEvent {
    /// A wave began executing (after its structural edits).
    WaveStarted { wave: usize },
    /// An iteration's ants all finished or exhausted the step budget.
    IterationFinished {
        wave: usize,
        iteration: usize,
        pheromone_edges: usize,
        total_edges: usize,
    },
    /// The wave list ran to the end.
    RunFinished,
    /// Cancellation was honored.
    Cancelled,
}

/// Statistics about the colony, cheap to take under the lock.
#[derive(Debug, Clone, Serialize)]
pub struct ColonyStats {
    pub state: RunnerState,
    pub ants_alive: usize,
    pub nodes: usize,
    pub edges: usize,
    pub pheromone_edges: usize,
}

/// A complete serializable snapshot of the colony at a point in time.
///
/// Taken as one clone under the colony lock, so a renderer never
/// observes a half-applied deposit or a partially pruned edge.
#[derive(Debug, Clone, Serialize)]
pub struct ColonySnapshot {
    pub state: RunnerState,
    pub ants: Vec<AntSnapshot>,
    pub nodes: Vec<NodeData>,
    pub edges: Vec<(String, String, EdgeData)>,
}

/// Mutable colony state shared between the worker and observers.
struct ColonyState {
    graph: ColonyGraph,
    ants: Vec<Ant>,
    state: RunnerState,
    events: Vec<RunnerEvent>,
}

/// Human-readable progress callback.
pub type StatusCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Per-run options, independent of any wave.
#[derive(Debug, Clone)]
pub struct RunnerOptions {
    /// RNG seed; a fixed seed makes the whole run deterministic.
    pub seed: Option<u64>,
    /// When off, all pacing sleeps are skipped (headless runs).
    pub pacing: bool,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            seed: None,
            pacing: true,
        }
    }
}

/// Drives waves of ants over a shared graph on a background worker.
pub struct ColonyRunner {
    shared: Arc<Mutex<ColonyState>>,
    waves: Arc<Vec<WaveConfig>>,
    stop_flag: Arc<AtomicBool>,
    status: StatusCallback,
    options: RunnerOptions,
    handle: Option<JoinHandle<()>>,
}

impl ColonyRunner {
    /// Create a runner over an externally constructed graph and wave
    /// list. Nothing executes until [`start`](Self::start).
    pub fn new(graph: ColonyGraph, waves: Vec<WaveConfig>) -> Self {
        Self {
            shared: Arc::new(Mutex::new(ColonyState {
                graph,
                ants: Vec::new(),
                state: RunnerState::Idle,
                events: Vec::new(),
            })),
            waves: Arc::new(waves),
            stop_flag: Arc::new(AtomicBool::new(false)),
            status: Arc::new(|_| {}),
            options: RunnerOptions::default(),
            handle: None,
        }
    }

    /// Install a progress callback, invoked with human-readable status
    /// text ("Running", per-iteration coverage, "Run finished").
    pub fn with_status_callback(mut self, callback: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.status = Arc::new(callback);
        self
    }

    pub fn with_options(mut self, options: RunnerOptions) -> Self {
        self.options = options;
        self
    }

    /// Validate every wave and launch the background worker.
    ///
    /// Validation failures propagate to the caller and the worker is
    /// never spawned. Calling `start` while a run is in progress is a
    /// no-op. Non-blocking: returns as soon as the worker is up.
    pub fn start(&mut self) -> Result<()> {
        for wave in self.waves.iter() {
            wave.validate()?;
        }
        {
            let mut shared = self.shared.lock().expect("colony lock");
            if shared.state == RunnerState::Running {
                return Ok(());
            }
            shared.state = RunnerState::Running;
            shared.events.clear();
        }
        self.stop_flag.store(false, Ordering::SeqCst);
        (*self.status)("Running");

        let shared = Arc::clone(&self.shared);
        let waves = Arc::clone(&self.waves);
        let stop_flag = Arc::clone(&self.stop_flag);
        let status = Arc::clone(&self.status);
        let options = self.options.clone();
        self.handle = Some(std::thread::spawn(move || {
            run_loop(&shared, &waves, &stop_flag, &status, &options);
        }));
        Ok(())
    }

    /// Request cooperative cancellation and return immediately. The
    /// worker honors the request at its next loop checkpoint.
    /// Idempotent: a second call has no further effect.
    pub fn stop(&self) {
        if self.stop_flag.swap(true, Ordering::SeqCst) {
            return;
        }
        (*self.status)("Stopped");
    }

    /// Block until the worker finishes (test and headless-CLI helper).
    pub fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    pub fn state(&self) -> RunnerState {
        self.shared.lock().expect("colony lock").state
    }

    pub fn stats(&self) -> ColonyStats {
        let shared = self.shared.lock().expect("colony lock");
        ColonyStats {
            state: shared.state,
            ants_alive: shared.ants.len(),
            nodes: shared.graph.node_count(),
            edges: shared.graph.edge_count(),
            pheromone_edges: shared.graph.pheromone_edge_count(),
        }
    }

    /// Read-only view of the live ants (cloned under the lock).
    pub fn live_ants(&self) -> Vec<AntSnapshot> {
        let shared = self.shared.lock().expect("colony lock");
        shared.ants.iter().map(Ant::snapshot).collect()
    }

    /// Clone of the shared graph (taken under the lock).
    pub fn graph_snapshot(&self) -> ColonyGraph {
        self.shared.lock().expect("colony lock").graph.clone()
    }

    /// One consistent snapshot of everything a renderer needs.
    pub fn snapshot(&self) -> ColonySnapshot {
        let shared = self.shared.lock().expect("colony lock");
        ColonySnapshot {
            state: shared.state,
            ants: shared.ants.iter().map(Ant::snapshot).collect(),
            nodes: shared.graph.nodes(),
            edges: shared.graph.edges(),
        }
    }

    /// Events recorded so far, in order.
    pub fn events(&self) -> Vec<RunnerEvent> {
        self.shared.lock().expect("colony lock").events.clone()
    }

    /// The configured wave list (for export alongside the graph).
    pub fn waves(&self) -> &[WaveConfig] {
        &self.waves
    }
}

impl Drop for ColonyRunner {
    fn drop(&mut self) {
        self.stop_flag.store(true, Ordering::SeqCst);
        self.join();
    }
}

fn pace(options: &RunnerOptions, seconds: f64) {
    if options.pacing && seconds > 0.0 {
        std::thread::sleep(Duration::from_secs_f64(seconds));
    }
}

fn run_loop(
    shared: &Arc<Mutex<ColonyState>>,
    waves: &[WaveConfig],
    stop_flag: &AtomicBool,
    status: &StatusCallback,
    options: &RunnerOptions,
) {
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for (wave_i, wave) in waves.iter().enumerate() {
        if stop_flag.load(Ordering::SeqCst) {
            break;
        }

        {
            let mut shared = shared.lock().expect("colony lock");
            if wave.clear_pheromones {
                shared.graph.clear_pheromones();
            }
            for (node, value) in &wave.node_value_changes {
                shared.graph.set_node_value(node, *value);
            }
            for (tail, head) in &wave.remove_edges {
                shared.graph.remove_edge(tail, head);
            }
            shared.events.push(RunnerEvent::WaveStarted { wave: wave_i });
        }

        for iteration in 0..wave.max_iterations {
            if stop_flag.load(Ordering::SeqCst) {
                break;
            }

            {
                let mut shared = shared.lock().expect("colony lock");
                shared.ants.clear();
                for _ in 0..wave.concurrent_ants {
                    // Random spawn re-rolls independently per ant.
                    let spawn_node = if wave.ant_random_spawn {
                        let labels = shared.graph.node_labels();
                        if labels.is_empty() {
                            wave.ant_spawn_node.clone()
                        } else {
                            labels[rng.gen_range(0..labels.len())].clone()
                        }
                    } else {
                        wave.ant_spawn_node.clone()
                    };
                    let ant = Ant::spawn(wave, &spawn_node);
                    shared.ants.push(ant);
                }
                shared.graph.evaporate(wave.evaporation_rate);
            }

            for _step in 0..wave.ant_max_steps {
                if stop_flag.load(Ordering::SeqCst) {
                    break;
                }

                let any_alive = {
                    let mut shared = shared.lock().expect("colony lock");
                    let ColonyState { graph, ants, .. } = &mut *shared;
                    // Every ant advances exactly once per tick; the
                    // dead drop out after the full pass, so removal
                    // can never skip a neighbor.
                    ants.retain_mut(|ant| ant.step(graph, &mut rng));
                    !ants.is_empty()
                };

                if any_alive {
                    pace(options, wave.step_sleep);
                } else {
                    break;
                }
            }

            let (pheromone_edges, total_edges) = {
                let mut shared = shared.lock().expect("colony lock");
                let counts = (
                    shared.graph.pheromone_edge_count(),
                    shared.graph.edge_count(),
                );
                shared.events.push(RunnerEvent::IterationFinished {
                    wave: wave_i,
                    iteration,
                    pheromone_edges: counts.0,
                    total_edges: counts.1,
                });
                counts
            };
            (**status)(&format!(
                "Edges found so far: {} / {} in wave {} iteration {} at {} steps",
                pheromone_edges, total_edges, wave_i, iteration, wave.ant_max_steps
            ));

            pace(options, wave.iteration_sleep);
        }

        pace(options, wave.wave_sleep);
    }

    let cancelled = stop_flag.load(Ordering::SeqCst);
    {
        let mut shared = shared.lock().expect("colony lock");
        shared.state = if cancelled {
            RunnerState::Stopped
        } else {
            RunnerState::Completed
        };
        shared.events.push(if cancelled {
            RunnerEvent::Cancelled
        } else {
            RunnerEvent::RunFinished
        });
    }
    (**status)("Run finished");
}

#[cfg(test)]
mod tests {
    use super::*;
    use aco_core::types::AntClass;

    fn fast_options(seed: u64) -> RunnerOptions {
        RunnerOptions {
            seed: Some(seed),
            pacing: false,
        }
    }

    fn line_graph() -> ColonyGraph {
        let mut g = ColonyGraph::new();
        g.add_edge("A", "B", 1.0, 0.0);
        g.add_edge("B", "C", 1.0, 0.0);
        g.set_node_value("C", 1.0);
        g
    }

    fn routing_wave() -> WaveConfig {
        let mut wave = WaveConfig::default();
        wave.ant_class = AntClass::Routing;
        wave.concurrent_ants = 1;
        wave.ant_max_steps = 5;
        wave.max_iterations = 1;
        wave.stop_on_success = true;
        wave.put_pheromones_always = false;
        wave.ant_spawn_node = "A".to_string();
        wave.random_chance = 0.0;
        wave.evaporation_rate = 0.0;
        wave.step_sleep = 0.0;
        wave.iteration_sleep = 0.0;
        wave.wave_sleep = 0.0;
        wave
    }

    #[test]
    fn single_iteration_discovers_the_line_path() {
        let mut runner =
            ColonyRunner::new(line_graph(), vec![routing_wave()]).with_options(fast_options(42));
        runner.start().unwrap();
        runner.join();

        assert_eq!(runner.state(), RunnerState::Completed);
        let graph = runner.graph_snapshot();
        // both legs of the only path got a success deposit
        assert!(graph.pheromone("A", "B").unwrap() > 0.0);
        assert!(graph.pheromone("B", "C").unwrap() > 0.0);
    }

    #[test]
    fn success_biases_the_next_iteration() {
        // After one successful pass, A->B carries trail while a fresh
        // sibling edge A->X does not; a routing ant must now prefer
        // A->B more often than uniform.
        let mut graph = line_graph();
        graph.add_edge("A", "X", 1.0, 0.0);

        // plenty of ants so at least one finds A -> B -> C despite the
        // X dead end swallowing roughly half of them
        let mut wave = routing_wave();
        wave.max_iterations = 10;
        wave.concurrent_ants = 4;
        wave.evaporation_rate = 0.0;

        let mut runner = ColonyRunner::new(graph, vec![wave]).with_options(fast_options(7));
        runner.start().unwrap();
        runner.join();

        let graph = runner.graph_snapshot();
        let trail = graph.pheromone("A", "B").unwrap();
        assert!(trail > 0.0);
        assert_eq!(graph.pheromone("A", "X"), Some(0.0));

        // empirical check: the biased edge wins well above 50%
        let mut rng = StdRng::seed_from_u64(11);
        let wave = routing_wave();
        let mut chose_b = 0;
        for _ in 0..1000 {
            let mut graph = graph.clone();
            let mut ant = Ant::spawn(&wave, "A");
            ant.step(&mut graph, &mut rng);
            if ant.current_node == "B" {
                chose_b += 1;
            }
        }
        assert!(chose_b > 600, "biased edge chosen {} / 1000", chose_b);
    }

    #[test]
    fn clear_pheromones_resets_trail_before_ants_spawn() {
        let mut graph = ColonyGraph::new();
        graph.add_edge("A", "B", 1.0, 9.0);
        graph.add_edge("B", "A", 1.0, 4.0);

        // no success nodes: ants wander, always-mode off, so the only
        // trail change at wave start is the reset plus evaporation
        let mut wave = routing_wave();
        wave.clear_pheromones = true;
        wave.ant_max_steps = 2;

        let mut runner = ColonyRunner::new(graph, vec![wave]).with_options(fast_options(3));
        runner.start().unwrap();
        runner.join();

        let graph = runner.graph_snapshot();
        assert_eq!(graph.pheromone("A", "B"), Some(0.0));
        assert_eq!(graph.pheromone("B", "A"), Some(0.0));
    }

    #[test]
    fn wave_edits_apply_at_wave_start() {
        let mut wave = routing_wave();
        wave.node_value_changes.insert("B".to_string(), 2.0);
        wave.remove_edges.push(("B".to_string(), "C".to_string()));

        let mut runner = ColonyRunner::new(line_graph(), vec![wave]).with_options(fast_options(5));
        runner.start().unwrap();
        runner.join();

        let graph = runner.graph_snapshot();
        assert_eq!(graph.node_value("B"), Some(2.0));
        // C lost its only edge and was pruned with it
        assert!(!graph.contains_node("C"));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn invalid_wave_never_starts_the_worker() {
        let mut wave = routing_wave();
        wave.evaporation_rate = 2.0;
        let mut runner = ColonyRunner::new(line_graph(), vec![wave]);
        assert!(runner.start().is_err());
        assert_eq!(runner.state(), RunnerState::Idle);
    }

    #[test]
    fn stop_is_idempotent() {
        let mut wave = routing_wave();
        // far more work than can complete before the stop request lands
        wave.max_iterations = 10_000_000;
        let mut runner = ColonyRunner::new(line_graph(), vec![wave]).with_options(fast_options(1));
        runner.start().unwrap();
        runner.stop();
        runner.stop();
        runner.join();
        assert_eq!(runner.state(), RunnerState::Stopped);
        // exactly one cancellation event despite two stop calls
        let cancels = runner
            .events()
            .iter()
            .filter(|e| matches!(e, RunnerEvent::Cancelled))
            .count();
        assert_eq!(cancels, 1);
    }

    #[test]
    fn completed_run_emits_finished_status() {
        let statuses: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&statuses);
        let mut runner = ColonyRunner::new(line_graph(), vec![routing_wave()])
            .with_options(fast_options(2))
            .with_status_callback(move |msg| sink.lock().unwrap().push(msg.to_string()));
        runner.start().unwrap();
        runner.join();

        let statuses = statuses.lock().unwrap();
        assert_eq!(statuses.first().map(String::as_str), Some("Running"));
        assert_eq!(statuses.last().map(String::as_str), Some("Run finished"));
        assert!(statuses
            .iter()
            .any(|s| s.starts_with("Edges found so far:")));
    }

    #[test]
    fn seeded_runs_are_deterministic() {
        let run = |seed| {
            let mut wave = routing_wave();
            wave.ant_class = AntClass::Random;
            wave.max_iterations = 3;
            wave.put_pheromones_always = true;
            let mut runner =
                ColonyRunner::new(line_graph(), vec![wave]).with_options(fast_options(seed));
            runner.start().unwrap();
            runner.join();
            let g = runner.graph_snapshot();
            (g.pheromone("A", "B"), g.pheromone("B", "C"))
        };
        assert_eq!(run(99), run(99));
    }

    #[test]
    fn random_spawn_draws_existing_nodes() {
        let mut wave = routing_wave();
        wave.ant_random_spawn = true;
        wave.ant_spawn_node = "MISSING".to_string();
        wave.concurrent_ants = 4;
        wave.max_iterations = 2;
        wave.ant_class = AntClass::Random;

        let mut runner = ColonyRunner::new(line_graph(), vec![wave]).with_options(fast_options(8));
        runner.start().unwrap();
        runner.join();
        assert_eq!(runner.state(), RunnerState::Completed);
        // the missing fallback label never entered the graph
        assert!(!runner.graph_snapshot().contains_node("MISSING"));
    }

    #[test]
    fn multi_wave_runs_execute_in_order() {
        let mut first = routing_wave();
        first.put_pheromones_always = true;
        first.ant_class = AntClass::Random;
        let mut second = routing_wave();
        second.clear_pheromones = true;
        second.ant_class = AntClass::Random;
        second.ant_spawn_node = "C".to_string(); // dead end: no trail laid

        let mut runner =
            ColonyRunner::new(line_graph(), vec![first, second]).with_options(fast_options(21));
        runner.start().unwrap();
        runner.join();

        assert_eq!(runner.state(), RunnerState::Completed);
        // second wave cleared the first wave's trail and laid none
        let graph = runner.graph_snapshot();
        assert_eq!(graph.pheromone_edge_count(), 0);

        let wave_starts = runner
            .events()
            .iter()
            .filter(|e| matches!(e, RunnerEvent::WaveStarted { .. }))
            .count();
        assert_eq!(wave_starts, 2);
    }
}
