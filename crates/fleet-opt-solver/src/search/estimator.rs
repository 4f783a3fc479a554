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

use crate::search::{
    driver::LocalSearchDriver,
    schedule::{GreedyBiasSchedule, LogarithmicBias},
};
use crate::state::{index::ChainIndex, solution::Solution};
use fleet_opt_core::prelude::Cost;
use fleet_opt_model::prelude::{Fleet, Task, Topology, VehiclePlan};
use ordered_float::OrderedFloat;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};

/// Incremental insertion with commit/rollback, driving the auction flow:
/// estimate the marginal cost of one more task on a speculative clone, then
/// either promote the clone (`consolidate`, on a won auction) or let it be
/// replaced by the next estimate.
///
/// `best` is the committed plan and the only state carried across calls; it
/// is replaced wholesale by `consolidate` and never mutated in place.
/// `potential` is always a private clone, so dropping it provably leaves
/// `best` untouched.
pub struct MarginalCostEstimator<'a, T, S = LogarithmicBias> {
    fleet: &'a Fleet,
    topology: &'a T,
    driver: LocalSearchDriver<S>,
    rng: ChaCha8Rng,
    best: Solution,
    potential: Option<Solution>,
}

impl<'a, T: Topology> MarginalCostEstimator<'a, T, LogarithmicBias> {
    pub fn new(fleet: &'a Fleet, topology: &'a T, seed: u64) -> Self {
        Self::with_schedule(fleet, topology, LogarithmicBias::default(), seed)
    }
}

impl<'a, T: Topology, S: GreedyBiasSchedule> MarginalCostEstimator<'a, T, S> {
    pub fn with_schedule(fleet: &'a Fleet, topology: &'a T, schedule: S, seed: u64) -> Self {
        Self {
            fleet,
            topology,
            driver: LocalSearchDriver::new(schedule, seed),
            rng: ChaCha8Rng::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15),
            best: Solution::new(fleet.len()),
            potential: None,
        }
    }

    #[inline]
    pub fn best(&self) -> &Solution {
        &self.best
    }

    #[inline]
    pub fn potential(&self) -> Option<&Solution> {
        self.potential.as_ref()
    }

    /// Estimates the marginal cost of carrying `task` on top of the
    /// committed plan, leaving the result as the pending potential plan.
    ///
    /// Returns `Cost::INFEASIBLE` when no vehicle can ever carry the task;
    /// the committed plan is never touched either way.
    #[tracing::instrument(level = "debug", name = "add_task", skip(self, task, budget), fields(task = %task.id()))]
    pub fn add_task(&mut self, task: Task, budget: Duration) -> Cost {
        let start = Instant::now();

        let feasible = self.fleet.capacity_feasible_indices(task.weight());
        if feasible.is_empty() {
            tracing::debug!("no vehicle can ever carry the task");
            self.potential = None;
            return Cost::INFEASIBLE;
        }

        let mut potential = self.best.clone();
        let index = potential.push_task(task);

        if !self.best.has_assigned_tasks() {
            // Nothing committed yet: place directly on the vehicle with the
            // cheapest home -> pickup -> delivery run. There is no existing
            // chain to move tasks between, so the search moves do not apply.
            let vehicle = self.bootstrap_vehicle(&task, &feasible);
            potential
                .splice_task(vehicle, index, 0, 1)
                .expect("fresh pair splices at the head");
            potential
                .rebuild_route(self.fleet, vehicle, self.topology)
                .expect("bootstrap placement on an empty vehicle is feasible");
        } else {
            let vehicle = ChainIndex::new(feasible[self.rng.gen_range(0..feasible.len())]);
            potential
                .splice_task(vehicle, index, 0, 1)
                .expect("fresh pair splices at the head");
            potential
                .rebuild_route(self.fleet, vehicle, self.topology)
                .expect("head insertion of a fitting task is feasible");

            let remaining = budget.saturating_sub(start.elapsed());
            potential = self
                .driver
                .run(self.fleet, self.topology, potential, remaining);
        }

        let marginal = potential.total_cost(self.fleet) - self.best.total_cost(self.fleet);
        tracing::debug!(marginal = marginal.value(), "estimated marginal cost");
        self.potential = Some(potential);
        marginal
    }

    /// Promotes the pending potential plan to the committed one, as a single
    /// replacement. Called when the auction reports the estimated task as
    /// won. Without a pending plan this is a no-op.
    pub fn consolidate(&mut self) {
        if let Some(potential) = self.potential.take() {
            tracing::debug!(
                cost = potential.total_cost(self.fleet).value(),
                "consolidated potential plan"
            );
            self.best = potential;
        }
    }

    /// Polishes the committed plan with one more search run over the given
    /// budget, then materializes the executable per-vehicle step sequences.
    pub fn final_plan(&mut self, budget: Duration) -> Vec<VehiclePlan> {
        if self.best.has_assigned_tasks() {
            let polished = self
                .driver
                .run(self.fleet, self.topology, self.best.clone(), budget);
            self.best = polished;
        }
        (0..self.fleet.len())
            .map(|c| {
                self.best
                    .materialize_plan(self.fleet, ChainIndex::new(c), self.topology)
            })
            .collect()
    }

    /// The capacity-feasible vehicle minimizing the stand-alone cost of
    /// `home -> pickup -> delivery`.
    fn bootstrap_vehicle(&self, task: &Task, feasible: &[usize]) -> ChainIndex {
        let index = feasible
            .iter()
            .copied()
            .min_by_key(|&i| {
                let v = self.fleet.get(i);
                let run = self.topology.distance(v.home(), task.pickup())
                    + self.topology.distance(task.pickup(), task.delivery());
                OrderedFloat((run * v.cost_per_distance()).value())
            })
            .expect("at least one capacity-feasible vehicle");
        ChainIndex::new(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::validate::validate_solution;
    use fleet_opt_core::prelude::Distance;
    use fleet_opt_model::prelude::{
        LocationIdentifier, MatrixTopology, Step, TaskIdentifier, Vehicle, VehicleIdentifier,
    };

    #[inline]
    fn loc(n: u32) -> LocationIdentifier {
        LocationIdentifier::new(n)
    }

    #[inline]
    fn ci(c: usize) -> ChainIndex {
        ChainIndex::new(c)
    }

    fn task(id: u32, pickup: u32, delivery: u32, weight: u32) -> Task {
        Task::new(
            TaskIdentifier::new(id),
            loc(pickup),
            loc(delivery),
            weight,
            Cost::new(10.0),
        )
    }

    const BUDGET: Duration = Duration::from_millis(25);

    #[test]
    fn test_bootstrap_marginal_cost() {
        // One vehicle, capacity 10, rate 5, homed at location 0;
        // d(0, 1) = 3. Expected marginal cost: 3 * 5 = 15.
        let fleet = Fleet::new(vec![Vehicle::new(VehicleIdentifier::new(0), 10, 5.0, loc(0))])
            .expect("valid fleet");
        let topology =
            MatrixTopology::from_distance_matrix(vec![vec![0.0, 3.0], vec![3.0, 0.0]])
                .expect("square matrix");

        let mut estimator = MarginalCostEstimator::new(&fleet, &topology, 42);
        let marginal = estimator.add_task(task(0, 0, 1, 4), BUDGET);
        assert_eq!(marginal, Cost::new(15.0));
        assert_eq!(estimator.best().total_cost(&fleet), Cost::ZERO);

        estimator.consolidate();
        assert_eq!(estimator.best().total_cost(&fleet), Cost::new(15.0));
    }

    #[test]
    fn test_bootstrap_picks_cheapest_vehicle() {
        let fleet = Fleet::new(vec![
            Vehicle::new(VehicleIdentifier::new(0), 10, 5.0, loc(0)),
            Vehicle::new(VehicleIdentifier::new(1), 10, 1.0, loc(0)),
        ])
        .expect("valid fleet");
        let topology = MatrixTopology::from_edges(3, &[(0, 1, 1.0), (1, 2, 1.0)])
            .expect("valid line");

        let mut estimator = MarginalCostEstimator::new(&fleet, &topology, 7);
        let marginal = estimator.add_task(task(0, 1, 2, 4), BUDGET);

        // Rate 1 wins: (1 + 1) * 1.
        assert_eq!(marginal, Cost::new(2.0));
        let potential = estimator.potential().expect("pending plan exists");
        assert_eq!(
            potential.assigned_vehicle(crate::state::index::TaskIndex::new(0)),
            Some(ci(1))
        );
    }

    /// Two geographically separated clusters keep the estimate exact: the
    /// new task fits only the second vehicle and combining chains would
    /// cross the expensive inter-cluster edge.
    fn clustered_fixture() -> (Fleet, MatrixTopology) {
        let fleet = Fleet::new(vec![
            Vehicle::new(VehicleIdentifier::new(0), 4, 1.0, loc(0)),
            Vehicle::new(VehicleIdentifier::new(1), 10, 1.0, loc(2)),
        ])
        .expect("valid fleet");
        let topology = MatrixTopology::from_edges(
            4,
            &[(0, 1, 1.0), (1, 2, 100.0), (2, 3, 1.0)],
        )
        .expect("valid edges");
        (fleet, topology)
    }

    #[test]
    fn test_marginal_cost_of_independent_task() {
        let (fleet, topology) = clustered_fixture();
        let mut estimator = MarginalCostEstimator::new(&fleet, &topology, 3);

        // Commit a first task on vehicle 0 in cluster A.
        let first = estimator.add_task(task(0, 0, 1, 3), BUDGET);
        assert_eq!(first, Cost::new(1.0));
        estimator.consolidate();
        let committed = estimator.best().total_cost(&fleet);
        assert_eq!(committed, Cost::new(1.0));

        // The heavy task fits only vehicle 1; its stand-alone cost is
        // d(2, 2) + d(2, 3) = 1.
        let marginal = estimator.add_task(task(1, 2, 3, 8), BUDGET);
        assert_eq!(marginal, Cost::new(1.0));

        // The committed plan stays untouched until consolidation.
        assert_eq!(estimator.best().total_cost(&fleet), committed);
        estimator.consolidate();
        assert_eq!(estimator.best().total_cost(&fleet), Cost::new(2.0));
    }

    #[test]
    fn test_rollback_leaves_best_unchanged() {
        let (fleet, topology) = clustered_fixture();
        let mut estimator = MarginalCostEstimator::new(&fleet, &topology, 11);
        estimator.add_task(task(0, 0, 1, 3), BUDGET);
        estimator.consolidate();
        let snapshot = estimator.best().clone();

        // Estimate two more tasks and win neither.
        estimator.add_task(task(1, 2, 3, 8), BUDGET);
        assert_eq!(estimator.best(), &snapshot, "estimation must not touch best");
        estimator.add_task(task(2, 3, 2, 5), BUDGET);
        assert_eq!(estimator.best(), &snapshot, "repeated estimation must not touch best");

        // The discarded estimates leave no trace in the committed plan.
        assert_eq!(estimator.best().task_count(), snapshot.task_count());
        validate_solution(estimator.best(), &fleet).expect("best stays valid");
    }

    #[test]
    fn test_infeasible_task_reports_sentinel() {
        let (fleet, topology) = clustered_fixture();
        let mut estimator = MarginalCostEstimator::new(&fleet, &topology, 5);
        estimator.add_task(task(0, 0, 1, 3), BUDGET);
        estimator.consolidate();
        let committed = estimator.best().clone();

        let marginal = estimator.add_task(task(1, 2, 3, 99), BUDGET);
        assert!(marginal.is_infeasible(), "weight 99 fits no vehicle");
        assert!(estimator.potential().is_none());

        // Consolidating after an infeasible estimate is a no-op.
        estimator.consolidate();
        assert_eq!(estimator.best(), &committed);
    }

    #[test]
    fn test_final_plan_materializes_all_vehicles() {
        let (fleet, topology) = clustered_fixture();
        let mut estimator = MarginalCostEstimator::new(&fleet, &topology, 13);
        estimator.add_task(task(0, 0, 1, 3), BUDGET);
        estimator.consolidate();
        estimator.add_task(task(1, 2, 3, 8), BUDGET);
        estimator.consolidate();

        let plans = estimator.final_plan(BUDGET);
        assert_eq!(plans.len(), fleet.len());

        let v0 = &plans[0];
        assert_eq!(
            v0.steps(),
            &[
                Step::Pickup(TaskIdentifier::new(0)),
                Step::Move(loc(1)),
                Step::Delivery(TaskIdentifier::new(0)),
            ]
        );
        assert_eq!(v0.total_distance(), Distance::new(1.0));

        let v1 = &plans[1];
        assert_eq!(
            v1.steps(),
            &[
                Step::Pickup(TaskIdentifier::new(1)),
                Step::Move(loc(3)),
                Step::Delivery(TaskIdentifier::new(1)),
            ]
        );
    }

    #[test]
    fn test_final_plan_on_empty_estimator() {
        let (fleet, topology) = clustered_fixture();
        let mut estimator = MarginalCostEstimator::new(&fleet, &topology, 17);
        let plans = estimator.final_plan(BUDGET);
        assert_eq!(plans.len(), fleet.len());
        assert!(plans.iter().all(|p| p.is_empty()));
    }
}
