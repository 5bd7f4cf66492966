use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geometry::{Point, Size};
use crate::optimizers::base::OptimizerBase;
use crate::{FeatureRef, ObstacleRef, PositionsOptimizer};

/// Divisor turning a label dimension into the per-axis candidate step
/// bound, so small labels take small steps.
const STATE_CHANGE_FACTOR: i32 = 10;
/// Iteration cap per free label, for passes with generous time budgets.
const MAX_ITERATIONS_FACTOR: usize = 100;

/// Stochastic label placement: simulated annealing over the shared
/// penalty metric.
///
/// Worsening moves are accepted with probability `exp(-d_metric / t)`
/// under the cooling schedule `t = 1/n²`, so the search settles quickly
/// while still escaping fresh overlaps early in a pass.
pub struct SimAnnealingOptimizer {
    base: OptimizerBase,
    rng: StdRng,
}

impl SimAnnealingOptimizer {
    /// Creates an optimizer with an entropy-seeded generator.
    pub fn new() -> SimAnnealingOptimizer {
        SimAnnealingOptimizer::with_rng(StdRng::from_entropy())
    }

    /// Creates an optimizer with a deterministic generator, for
    /// reproducible passes.
    pub fn seeded(seed: u64) -> SimAnnealingOptimizer {
        SimAnnealingOptimizer::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Creates an optimizer drawing its randomness from `rng`.
    pub fn with_rng(rng: StdRng) -> SimAnnealingOptimizer {
        SimAnnealingOptimizer {
            base: OptimizerBase::new(),
            rng,
        }
    }

    /// Samples a non-zero offset delta bounded by the label's size.
    fn candidate_delta(&mut self, size: Size) -> Point {
        let dx = size.width / STATE_CHANGE_FACTOR + 1;
        let dy = size.height / STATE_CHANGE_FACTOR + 1;
        loop {
            let delta = Point::new(self.rng.gen_range(-dx..=dx), self.rng.gen_range(-dy..=dy));
            if delta != Point::ZERO {
                return delta;
            }
        }
    }
}

fn cooled(iterations: usize) -> f64 {
    1.0 / (iterations as f64 * iterations as f64)
}

fn accept_move(d_metric: f64, temperature: f64, rng: &mut StdRng) -> bool {
    d_metric < 0.0 || rng.gen::<f64>() < (-d_metric / temperature).exp()
}

impl PositionsOptimizer for SimAnnealingOptimizer {
    fn register_label(&mut self, label: FeatureRef) {
        self.base.register_label(label);
    }

    fn unregister_label(&mut self, label: &FeatureRef) {
        self.base.unregister_label(label);
    }

    fn register_obstacle(&mut self, obstacle: ObstacleRef) {
        self.base.register_obstacle(obstacle);
    }

    fn unregister_obstacle(&mut self, obstacle: &ObstacleRef) {
        self.base.unregister_obstacle(obstacle);
    }

    fn best_fit(&mut self, time_budget: Duration) {
        let started = Instant::now();
        let mut state = self.base.init_state();
        if state.free.is_empty() {
            return;
        }

        let mut metrics = self.base.init_metrics(&state);
        let max_iterations = MAX_ITERATIONS_FACTOR * state.free.len();
        let mut temperature = 1.0_f64;
        let mut iterations = 0_usize;
        let mut accepted = 0_usize;

        while temperature > 0.0 && iterations < max_iterations && started.elapsed() < time_budget {
            iterations += 1;

            let slot = self.rng.gen_range(0..state.free.len());
            let size = self.base.labels()[state.free[slot]].borrow().label_size();
            let delta = self.candidate_delta(size);

            let d_metric = self.base.calc_metric(&state, slot, delta) - metrics[slot];
            if accept_move(d_metric, temperature, &mut self.rng) {
                state.offsets[slot] += delta;
                // not an exact d_metric: neighbor baselines are left stale
                metrics[slot] += d_metric;
                accepted += 1;
            }

            temperature = cooled(iterations);
        }

        self.base.apply_state(&state);
        log::debug!(
            "annealing pass: {} free labels, {iterations} iterations, {accepted} accepted, {:?} elapsed",
            state.free.len(),
            started.elapsed()
        );
    }
}
