// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::search::{neighborhood::Neighborhood, schedule::GreedyBiasSchedule};
use crate::state::solution::Solution;
use fleet_opt_model::prelude::{Fleet, Topology};
use ordered_float::OrderedFloat;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};

/// Anytime stochastic local search over the single-task move neighborhood.
///
/// Each iteration either takes the lowest-cost neighbor (with probability
/// given by the bias schedule) or a uniformly random one, and tracks the
/// best solution seen. The loop never starts an iteration it cannot
/// historically guarantee to finish: iteration `k` only begins while
/// `elapsed + worst_iteration_so_far` still fits the budget, trading a
/// sliver of unused budget for never overrunning the deadline.
pub struct LocalSearchDriver<S> {
    schedule: S,
    rng: ChaCha8Rng,
}

impl<S: GreedyBiasSchedule> LocalSearchDriver<S> {
    pub fn new(schedule: S, seed: u64) -> Self {
        Self {
            schedule,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Runs the search for at most `budget` and returns the best solution
    /// seen; with an exhausted budget or an empty neighborhood this is the
    /// seed itself.
    #[tracing::instrument(level = "debug", name = "local_search", skip_all)]
    pub fn run<T: Topology>(
        &mut self,
        fleet: &Fleet,
        topology: &T,
        seed_solution: Solution,
        budget: Duration,
    ) -> Solution {
        let start = Instant::now();
        let neighborhood = Neighborhood::new(fleet, topology);

        let mut current = seed_solution;
        let mut best = current.clone();
        let mut best_cost = best.total_cost(fleet);

        let mut iteration: u64 = 0;
        let mut worst_iteration = Duration::ZERO;

        loop {
            if start.elapsed() + worst_iteration > budget {
                break;
            }
            let iteration_start = Instant::now();

            let mut neighbors = neighborhood.generate(&current);
            if neighbors.is_empty() {
                break;
            }

            let bias = self.schedule.greedy_bias(iteration);
            let index = if self.rng.gen::<f64>() < bias {
                lowest_cost_index(&neighbors, fleet)
            } else {
                self.rng.gen_range(0..neighbors.len())
            };
            current = neighbors.swap_remove(index);

            let cost = current.total_cost(fleet);
            if cost < best_cost {
                tracing::debug!(
                    iteration,
                    cost = cost.value(),
                    "improved incumbent solution"
                );
                best = current.clone();
                best_cost = cost;
            }

            iteration += 1;
            let took = iteration_start.elapsed();
            if took > worst_iteration {
                worst_iteration = took;
            }
        }

        tracing::debug!(
            iterations = iteration,
            best_cost = best_cost.value(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "local search finished"
        );
        best
    }
}

#[inline]
fn lowest_cost_index(neighbors: &[Solution], fleet: &Fleet) -> usize {
    neighbors
        .iter()
        .enumerate()
        .min_by_key(|(_, s)| OrderedFloat(s.total_cost(fleet).value()))
        .map(|(i, _)| i)
        .expect("neighbor set is non-empty")
}
