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

use crate::search::{driver::LocalSearchDriver, schedule::LogarithmicBias};
use crate::state::{err::CapacityExceededError, index::ChainIndex, solution::Solution};
use fleet_opt_model::prelude::{Fleet, Task, Topology};
use std::time::{Duration, Instant};

/// How the batch optimizer seeds its initial solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seeding {
    /// All tasks onto the largest-capacity vehicle, pickup then delivery.
    SingleVehicle,
    /// Tasks rotated across the fleet, skipping vehicles they do not fit.
    RoundRobin,
}

#[derive(Debug, Clone)]
pub struct OptimizerParams {
    pub time_limit: Duration,
    pub seed: u64,
    pub seeding: Seeding,
}

impl Default for OptimizerParams {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_millis(1000),
            seed: 0xC0FF_EE00_D15EA5ED,
            seeding: Seeding::SingleVehicle,
        }
    }
}

/// Batch mode: optimize a fixed task set within a wall-clock budget.
///
/// Fails up front if a task fits no vehicle of the fleet; otherwise always
/// returns a feasible solution, however small the budget.
pub fn optimize<T: Topology>(
    fleet: &Fleet,
    topology: &T,
    tasks: &[Task],
    params: &OptimizerParams,
) -> Result<Solution, CapacityExceededError> {
    let start = Instant::now();

    let mut seed_solution = Solution::new(fleet.len());
    match params.seeding {
        Seeding::SingleVehicle => {
            let largest = ChainIndex::new(fleet.largest_capacity_index());
            seed_solution.assign_all_to(fleet, largest, tasks)?;
        }
        Seeding::RoundRobin => {
            seed_solution.assign_round_robin(fleet, tasks)?;
        }
    }
    for c in 0..fleet.len() {
        seed_solution
            .rebuild_route(fleet, ChainIndex::new(c), topology)
            .expect("naive seeding carries one task at a time");
    }

    tracing::info!(
        tasks = tasks.len(),
        vehicles = fleet.len(),
        seed_cost = seed_solution.total_cost(fleet).value(),
        "starting batch optimization"
    );

    let mut driver = LocalSearchDriver::new(LogarithmicBias::default(), params.seed);
    let remaining = params.time_limit.saturating_sub(start.elapsed());
    let best = driver.run(fleet, topology, seed_solution, remaining);

    tracing::info!(
        cost = best.total_cost(fleet).value(),
        "batch optimization finished"
    );
    Ok(best)
}
