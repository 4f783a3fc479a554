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

use crate::state::{
    action::Action,
    chain_set::ChainSet,
    err::{
        CapacityExceededError, InvalidSplicePositionError, SpliceError, StructuralError,
        TaskAlreadyAssignedError, TaskNotAssignedError, UnmatchedPairError,
    },
    index::{ChainIndex, NodeIndex, TaskIndex},
};
use fleet_opt_core::prelude::{Cost, Distance};
use fleet_opt_model::prelude::{Fleet, Step, Task, Topology, VehiclePlan};

/// A complete assignment of tasks to per-vehicle action chains.
///
/// Task `t` owns action slots `2t` (pickup) and `2t + 1` (delivery) in the
/// chain-set arena. Cloning is a plain structural copy: the clone and the
/// original share nothing mutable, so speculative exploration on a clone can
/// be discarded without touching the committed solution.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    tasks: Vec<Task>,
    chains: ChainSet,
    route_distance: Vec<Distance>,
    dirty: Vec<bool>,
}

impl Solution {
    pub fn new(num_vehicles: usize) -> Self {
        Self {
            tasks: Vec::new(),
            chains: ChainSet::new(num_vehicles, 0),
            route_distance: vec![Distance::ZERO; num_vehicles],
            dirty: vec![false; num_vehicles],
        }
    }

    #[inline]
    pub fn num_vehicles(&self) -> usize {
        self.chains.num_chains()
    }

    #[inline]
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    #[inline]
    pub fn task(&self, index: TaskIndex) -> &Task {
        &self.tasks[index.get()]
    }

    #[inline]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[inline]
    pub fn chains(&self) -> &ChainSet {
        &self.chains
    }

    /// Test-only access to the raw chain structure, used to fabricate
    /// invariant violations the public API refuses to produce.
    #[cfg(test)]
    pub(crate) fn chains_mut_for_tests(&mut self) -> &mut ChainSet {
        &mut self.chains
    }

    /// Admits a task into the task table, growing the arena by its
    /// pickup/delivery pair. The task starts out unassigned.
    pub fn push_task(&mut self, task: Task) -> TaskIndex {
        let index = TaskIndex::new(self.tasks.len());
        self.tasks.push(task);
        let p = self.chains.push_node();
        let d = self.chains.push_node();
        debug_assert_eq!(p, self.pickup_node(index), "pickup slot misaligned");
        debug_assert_eq!(d, self.delivery_node(index), "delivery slot misaligned");
        index
    }

    #[inline]
    pub fn pickup_node(&self, task: TaskIndex) -> NodeIndex {
        self.chains.node_of_slot(2 * task.get())
    }

    #[inline]
    pub fn delivery_node(&self, task: TaskIndex) -> NodeIndex {
        self.chains.node_of_slot(2 * task.get() + 1)
    }

    /// The task an arena node belongs to.
    #[inline]
    pub fn task_index_at(&self, node: NodeIndex) -> TaskIndex {
        TaskIndex::new(self.chains.slot_of_node(node) / 2)
    }

    /// Materializes the action value stored at an arena node.
    #[inline]
    pub fn action_at(&self, node: NodeIndex) -> Action {
        let slot = self.chains.slot_of_node(node);
        let task = &self.tasks[slot / 2];
        if slot % 2 == 0 {
            Action::pickup(task)
        } else {
            Action::delivery(task)
        }
    }

    /// The chain the task's pickup is linked into, if any.
    #[inline]
    pub fn assigned_vehicle(&self, task: TaskIndex) -> Option<ChainIndex> {
        self.chains.chain_of(self.pickup_node(task))
    }

    #[inline]
    pub fn has_assigned_tasks(&self) -> bool {
        (0..self.num_vehicles()).any(|c| !self.chains.is_chain_empty(ChainIndex::new(c)))
    }

    /// The task whose pickup heads the vehicle's chain, if the chain is
    /// non-empty.
    #[inline]
    pub fn head_task(&self, vehicle: ChainIndex) -> Option<TaskIndex> {
        self.chains.head(vehicle).map(|n| self.task_index_at(n))
    }

    /// Positions (0-based, among the chain's actions) of the task's pickup
    /// and delivery on `vehicle`, if both are linked there.
    pub fn pair_positions(&self, vehicle: ChainIndex, task: TaskIndex) -> Option<(usize, usize)> {
        let p = self.pickup_node(task);
        let d = self.delivery_node(task);
        let mut pickup_pos = None;
        let mut delivery_pos = None;
        for (i, node) in self.chains.iter_chain(vehicle).enumerate() {
            if node == p {
                pickup_pos = Some(i);
            } else if node == d {
                delivery_pos = Some(i);
            }
        }
        match (pickup_pos, delivery_pos) {
            (Some(p), Some(d)) => Some((p, d)),
            _ => None,
        }
    }

    /// Inserts the task's pickup/delivery pair so that the pickup ends up at
    /// position `pickup_position` and the delivery at `delivery_position` of
    /// the resulting chain. Capacity feasibility is the caller's concern and
    /// is re-checked by `rebuild_route`.
    pub fn splice_task(
        &mut self,
        vehicle: ChainIndex,
        task: TaskIndex,
        pickup_position: usize,
        delivery_position: usize,
    ) -> Result<(), SpliceError> {
        let p = self.pickup_node(task);
        let d = self.delivery_node(task);
        if self.chains.chain_of(p).is_some() || self.chains.chain_of(d).is_some() {
            return Err(TaskAlreadyAssignedError::new(self.task(task).id()))?;
        }

        let len = self.chains.chain_len(vehicle);
        if pickup_position > len || delivery_position <= pickup_position || delivery_position > len + 1
        {
            return Err(InvalidSplicePositionError::new(
                pickup_position,
                delivery_position,
                len,
            ))?;
        }

        let pickup_anchor = self.nth_anchor(vehicle, pickup_position);
        self.chains.insert_after(pickup_anchor, p);
        let delivery_anchor = self.nth_anchor(vehicle, delivery_position);
        self.chains.insert_after(delivery_anchor, d);

        self.dirty[vehicle.get()] = true;
        Ok(())
    }

    /// The node after which an insertion lands at `position`: the start
    /// sentinel for position 0, otherwise the `position - 1`-th action.
    fn nth_anchor(&self, vehicle: ChainIndex, position: usize) -> NodeIndex {
        let mut anchor = self.chains.start(vehicle);
        for _ in 0..position {
            anchor = self.chains.next(anchor);
        }
        anchor
    }

    /// Detaches the task's pickup/delivery pair from wherever it resides.
    ///
    /// A pair found split across chains (or half-linked) is a corruption of
    /// the pairing invariant and comes back as `UnmatchedPair`; callers must
    /// treat it as an unrecoverable fault.
    pub fn remove_task(&mut self, task: TaskIndex) -> Result<(), StructuralError> {
        let p = self.pickup_node(task);
        let d = self.delivery_node(task);
        match (self.chains.chain_of(p), self.chains.chain_of(d)) {
            (None, None) => Err(TaskNotAssignedError::new(self.task(task).id()))?,
            (Some(pc), Some(dc)) if pc == dc => {
                self.chains.remove(p);
                self.chains.remove(d);
                self.dirty[pc.get()] = true;
                Ok(())
            }
            _ => Err(UnmatchedPairError::new(self.task(task).id()))?,
        }
    }

    /// Recomputes the cached route distance of one vehicle by walking its
    /// chain through the topology, and re-validates the capacity invariant:
    /// the free capacity must stay within `[0, capacity]` at every prefix.
    pub fn rebuild_route<T: Topology>(
        &mut self,
        fleet: &Fleet,
        vehicle: ChainIndex,
        topology: &T,
    ) -> Result<(), CapacityExceededError> {
        let v = fleet.get(vehicle.get());
        let capacity = v.capacity() as i64;
        let mut free = capacity;
        let mut distance = Distance::ZERO;
        let mut current = v.home();

        for node in self.chains.iter_chain(vehicle) {
            let action = self.action_at(node);
            free += action.capacity_delta();
            if free < 0 || free > capacity {
                return Err(CapacityExceededError::new(v.id(), action.task()));
            }
            distance += topology.distance(current, action.location());
            current = action.location();
        }

        self.route_distance[vehicle.get()] = distance;
        self.dirty[vehicle.get()] = false;
        Ok(())
    }

    #[inline]
    pub fn is_dirty(&self, vehicle: ChainIndex) -> bool {
        self.dirty[vehicle.get()]
    }

    #[inline]
    pub fn route_distance(&self, vehicle: ChainIndex) -> Distance {
        debug_assert!(
            !self.dirty[vehicle.get()],
            "route of {} is stale; rebuild it first",
            vehicle
        );
        self.route_distance[vehicle.get()]
    }

    /// Total cost: Σ over vehicles of route distance × cost-per-distance.
    /// Pure; requires all route caches to be fresh.
    pub fn total_cost(&self, fleet: &Fleet) -> Cost {
        debug_assert_eq!(fleet.len(), self.num_vehicles(), "fleet/solution mismatch");
        debug_assert!(
            !self.dirty.iter().any(|&d| d),
            "total_cost on a solution with stale routes"
        );
        (0..self.num_vehicles())
            .map(|c| self.route_distance[c] * fleet.get(c).cost_per_distance())
            .sum()
    }

    /// Naive seeding: every task appended to one vehicle as an immediate
    /// pickup-then-delivery pair. Fails if a task exceeds that vehicle's
    /// capacity. Routes are left stale; rebuild before costing.
    pub fn assign_all_to(
        &mut self,
        fleet: &Fleet,
        vehicle: ChainIndex,
        tasks: &[Task],
    ) -> Result<(), CapacityExceededError> {
        let v = fleet.get(vehicle.get());
        for &task in tasks {
            if !v.can_carry(task.weight()) {
                return Err(CapacityExceededError::new(v.id(), task.id()));
            }
            let t = self.push_task(task);
            self.append_pair(vehicle, t);
        }
        self.dirty[vehicle.get()] = true;
        Ok(())
    }

    /// Naive seeding: tasks distributed across the fleet in rotation,
    /// skipping vehicles too small for the task at hand. Fails if a task
    /// fits no vehicle at all.
    pub fn assign_round_robin(
        &mut self,
        fleet: &Fleet,
        tasks: &[Task],
    ) -> Result<(), CapacityExceededError> {
        let n = fleet.len();
        let mut j = 0usize;
        for &task in tasks {
            let mut probed = 0usize;
            while probed < n && !fleet.get(j % n).can_carry(task.weight()) {
                j += 1;
                probed += 1;
            }
            if probed == n {
                // Fits nowhere; report against the largest vehicle.
                let v = fleet.get(fleet.largest_capacity_index());
                return Err(CapacityExceededError::new(v.id(), task.id()));
            }
            let vehicle = ChainIndex::new(j % n);
            let t = self.push_task(task);
            self.append_pair(vehicle, t);
            self.dirty[vehicle.get()] = true;
            j += 1;
        }
        Ok(())
    }

    fn append_pair(&mut self, vehicle: ChainIndex, task: TaskIndex) {
        let tail = self.chains.prev(self.chains.end(vehicle));
        let p = self.pickup_node(task);
        let d = self.delivery_node(task);
        self.chains.insert_after(tail, p);
        self.chains.insert_after(p, d);
    }

    /// Walks the committed chain of one vehicle into an executable step
    /// sequence, resolving moves via `Topology::path_between`.
    pub fn materialize_plan<T: Topology>(
        &self,
        fleet: &Fleet,
        vehicle: ChainIndex,
        topology: &T,
    ) -> VehiclePlan {
        debug_assert!(
            !self.dirty[vehicle.get()],
            "materializing a stale route for {}",
            vehicle
        );
        let v = fleet.get(vehicle.get());
        let mut steps = Vec::new();
        let mut current = v.home();

        for node in self.chains.iter_chain(vehicle) {
            let action = self.action_at(node);
            for hop in topology.path_between(current, action.location()) {
                steps.push(Step::Move(hop));
            }
            if action.is_pickup() {
                steps.push(Step::Pickup(action.task()));
            } else {
                steps.push(Step::Delivery(action.task()));
            }
            current = action.location();
        }

        VehiclePlan::new(v.id(), steps, self.route_distance[vehicle.get()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleet_opt_model::prelude::{
        LocationIdentifier, MatrixTopology, TaskIdentifier, Vehicle, VehicleIdentifier,
    };

    #[inline]
    fn loc(n: u32) -> LocationIdentifier {
        LocationIdentifier::new(n)
    }

    #[inline]
    fn ci(c: usize) -> ChainIndex {
        ChainIndex::new(c)
    }

    #[inline]
    fn ti(t: usize) -> TaskIndex {
        TaskIndex::new(t)
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

    /// Two vehicles (capacity 10, rates 1 and 2) homed at location 0 over a
    /// complete 4-location line: 0 -1- 1 -1- 2 -1- 3.
    fn fixture() -> (Fleet, MatrixTopology) {
        let fleet = Fleet::new(vec![
            Vehicle::new(VehicleIdentifier::new(0), 10, 1.0, loc(0)),
            Vehicle::new(VehicleIdentifier::new(1), 10, 2.0, loc(0)),
        ])
        .expect("valid fleet");
        let topology = MatrixTopology::from_edges(4, &[(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0)])
            .expect("valid edges");
        (fleet, topology)
    }

    #[test]
    fn test_empty_solution_costs_nothing() {
        let (fleet, _) = fixture();
        let sol = Solution::new(fleet.len());
        assert!(!sol.has_assigned_tasks());
        assert_eq!(sol.total_cost(&fleet), Cost::ZERO);
    }

    #[test]
    fn test_splice_rebuild_and_cost() {
        let (fleet, topology) = fixture();
        let mut sol = Solution::new(fleet.len());
        let t = sol.push_task(task(0, 1, 3, 4));
        sol.splice_task(ci(0), t, 0, 1).expect("fresh task splices");
        assert!(sol.is_dirty(ci(0)));
        sol.rebuild_route(&fleet, ci(0), &topology)
            .expect("one light task is feasible");

        // home 0 -> pickup 1 (1) -> delivery 3 (2)
        assert_eq!(sol.route_distance(ci(0)), Distance::new(3.0));
        assert_eq!(sol.total_cost(&fleet), Cost::new(3.0));
        assert_eq!(sol.assigned_vehicle(t), Some(ci(0)));
        assert_eq!(sol.head_task(ci(0)), Some(t));
        assert_eq!(sol.pair_positions(ci(0), t), Some((0, 1)));
    }

    #[test]
    fn test_total_cost_is_pure() {
        let (fleet, topology) = fixture();
        let mut sol = Solution::new(fleet.len());
        let t = sol.push_task(task(0, 1, 2, 3));
        sol.splice_task(ci(1), t, 0, 1).expect("splice");
        sol.rebuild_route(&fleet, ci(1), &topology).expect("feasible");

        let first = sol.total_cost(&fleet);
        let second = sol.total_cost(&fleet);
        assert_eq!(first, second, "total_cost must be deterministic");
        // vehicle 1 has rate 2: (1 + 1) * 2
        assert_eq!(first, Cost::new(4.0));
    }

    #[test]
    fn test_rebuild_route_is_idempotent() {
        let (fleet, topology) = fixture();
        let mut sol = Solution::new(fleet.len());
        let t = sol.push_task(task(0, 2, 3, 5));
        sol.splice_task(ci(0), t, 0, 1).expect("splice");
        sol.rebuild_route(&fleet, ci(0), &topology).expect("feasible");
        let d1 = sol.route_distance(ci(0));
        sol.rebuild_route(&fleet, ci(0), &topology).expect("still feasible");
        assert_eq!(sol.route_distance(ci(0)), d1);
    }

    #[test]
    fn test_clone_leaves_original_untouched() {
        let (fleet, topology) = fixture();
        let mut sol = Solution::new(fleet.len());
        let t0 = sol.push_task(task(0, 1, 2, 3));
        sol.splice_task(ci(0), t0, 0, 1).expect("splice");
        sol.rebuild_route(&fleet, ci(0), &topology).expect("feasible");

        let snapshot = sol.clone();
        let mut probe = sol.clone();
        probe.remove_task(t0).expect("assigned task removes");
        let t1 = probe.push_task(task(1, 2, 3, 2));
        probe.splice_task(ci(1), t1, 0, 1).expect("splice clone");

        // The original is observably identical to its pre-mutation state.
        assert_eq!(sol, snapshot);
        assert_eq!(sol.total_cost(&fleet), snapshot.total_cost(&fleet));
    }

    #[test]
    fn test_splice_rejects_bad_positions() {
        let mut sol = Solution::new(2);
        let t = sol.push_task(task(0, 1, 2, 3));

        let err = sol
            .splice_task(ci(0), t, 1, 2)
            .expect_err("pickup beyond empty chain must fail");
        assert!(matches!(err, SpliceError::InvalidPosition(_)));

        let err = sol
            .splice_task(ci(0), t, 0, 0)
            .expect_err("delivery not after pickup must fail");
        assert!(matches!(err, SpliceError::InvalidPosition(_)));
    }

    #[test]
    fn test_splice_rejects_already_assigned() {
        let mut sol = Solution::new(2);
        let t = sol.push_task(task(0, 1, 2, 3));
        sol.splice_task(ci(0), t, 0, 1).expect("first splice");
        let err = sol
            .splice_task(ci(1), t, 0, 1)
            .expect_err("second splice of the same task must fail");
        assert!(matches!(err, SpliceError::AlreadyAssigned(_)));
    }

    #[test]
    fn test_splice_interleaves_at_given_positions() {
        let (fleet, topology) = fixture();
        let mut sol = Solution::new(fleet.len());
        let t0 = sol.push_task(task(0, 1, 3, 4));
        let t1 = sol.push_task(task(1, 2, 3, 4));
        sol.splice_task(ci(0), t0, 0, 1).expect("first pair");
        // pickup of t1 between t0's pickup and delivery, delivery at the end
        sol.splice_task(ci(0), t1, 1, 3).expect("interleaved pair");
        sol.rebuild_route(&fleet, ci(0), &topology).expect("fits capacity");

        assert_eq!(sol.pair_positions(ci(0), t0), Some((0, 2)));
        assert_eq!(sol.pair_positions(ci(0), t1), Some((1, 3)));
    }

    #[test]
    fn test_remove_task_reconnects_chain() {
        let (fleet, topology) = fixture();
        let mut sol = Solution::new(fleet.len());
        let t0 = sol.push_task(task(0, 1, 2, 3));
        let t1 = sol.push_task(task(1, 2, 3, 3));
        sol.splice_task(ci(0), t0, 0, 1).expect("pair 0");
        sol.splice_task(ci(0), t1, 2, 3).expect("pair 1");

        sol.remove_task(t0).expect("assigned task removes");
        sol.rebuild_route(&fleet, ci(0), &topology).expect("feasible");
        assert_eq!(sol.head_task(ci(0)), Some(t1));
        assert_eq!(sol.pair_positions(ci(0), t1), Some((0, 1)));
        assert_eq!(sol.assigned_vehicle(t0), None);
    }

    #[test]
    fn test_remove_unassigned_task_fails() {
        let mut sol = Solution::new(1);
        let t = sol.push_task(task(0, 1, 2, 3));
        let err = sol.remove_task(t).expect_err("unassigned task cannot be removed");
        assert_eq!(
            err,
            StructuralError::TaskNotAssigned(TaskNotAssignedError::new(TaskIdentifier::new(0)))
        );
    }

    #[test]
    fn test_remove_split_pair_is_a_structural_fault() {
        let mut sol = Solution::new(2);
        let t = sol.push_task(task(0, 1, 2, 3));
        // Corrupt the pairing invariant on purpose: link the pickup and the
        // delivery onto different chains, bypassing splice_task.
        let p = sol.pickup_node(t);
        let d = sol.delivery_node(t);
        let s0 = sol.chains.start(ci(0));
        let s1 = sol.chains.start(ci(1));
        sol.chains.insert_after(s0, p);
        sol.chains.insert_after(s1, d);

        let err = sol.remove_task(t).expect_err("split pair must be reported");
        assert_eq!(
            err,
            StructuralError::UnmatchedPair(UnmatchedPairError::new(TaskIdentifier::new(0)))
        );
    }

    #[test]
    fn test_rebuild_detects_capacity_violation() {
        let (fleet, topology) = fixture();
        let mut sol = Solution::new(fleet.len());
        let t0 = sol.push_task(task(0, 1, 3, 6));
        let t1 = sol.push_task(task(1, 2, 3, 6));
        sol.splice_task(ci(0), t0, 0, 1).expect("pair 0");
        // Both pickups before either delivery: peak load 12 > capacity 10.
        sol.splice_task(ci(0), t1, 1, 2).expect("pair 1");

        let err = sol
            .rebuild_route(&fleet, ci(0), &topology)
            .expect_err("overlapping heavy tasks must violate capacity");
        assert_eq!(err.vehicle(), VehicleIdentifier::new(0));
        assert_eq!(err.task(), TaskIdentifier::new(1));
    }

    #[test]
    fn test_rebuild_detects_delivery_before_pickup() {
        let (fleet, topology) = fixture();
        let mut sol = Solution::new(fleet.len());
        let t = sol.push_task(task(0, 1, 2, 3));
        // Bypass splice_task to link the delivery ahead of the pickup.
        let p = sol.pickup_node(t);
        let d = sol.delivery_node(t);
        let s0 = sol.chains.start(ci(0));
        sol.chains.insert_after(s0, d);
        sol.chains.insert_after(d, p);
        sol.dirty[0] = true;

        let err = sol
            .rebuild_route(&fleet, ci(0), &topology)
            .expect_err("delivery before pickup must be rejected");
        assert_eq!(err.task(), TaskIdentifier::new(0));
    }

    #[test]
    fn test_assign_all_to_appends_sequential_pairs() {
        let (fleet, topology) = fixture();
        let mut sol = Solution::new(fleet.len());
        let tasks = vec![task(0, 1, 2, 9), task(1, 2, 3, 9)];
        sol.assign_all_to(&fleet, ci(0), &tasks).expect("each fits alone");
        sol.rebuild_route(&fleet, ci(0), &topology)
            .expect("sequential pairs never overlap");

        assert_eq!(sol.pair_positions(ci(0), ti(0)), Some((0, 1)));
        assert_eq!(sol.pair_positions(ci(0), ti(1)), Some((2, 3)));
        assert!(sol.chains.is_chain_empty(ci(1)));
    }

    #[test]
    fn test_assign_all_to_rejects_oversized_task() {
        let (fleet, _) = fixture();
        let mut sol = Solution::new(fleet.len());
        let err = sol
            .assign_all_to(&fleet, ci(0), &[task(0, 1, 2, 11)])
            .expect_err("task heavier than the vehicle must be rejected");
        assert_eq!(err.task(), TaskIdentifier::new(0));
    }

    #[test]
    fn test_assign_round_robin_skips_small_vehicles() {
        let fleet = Fleet::new(vec![
            Vehicle::new(VehicleIdentifier::new(0), 3, 1.0, loc(0)),
            Vehicle::new(VehicleIdentifier::new(1), 10, 1.0, loc(0)),
        ])
        .expect("valid fleet");
        let mut sol = Solution::new(fleet.len());
        // First task is too heavy for vehicle 0 and lands on vehicle 1.
        sol.assign_round_robin(&fleet, &[task(0, 1, 2, 5), task(1, 2, 3, 2)])
            .expect("both tasks fit somewhere");

        assert_eq!(sol.assigned_vehicle(ti(0)), Some(ci(1)));
        assert_eq!(sol.assigned_vehicle(ti(1)), Some(ci(0)));
    }

    #[test]
    fn test_assign_round_robin_rejects_unplaceable_task() {
        let (fleet, _) = fixture();
        let mut sol = Solution::new(fleet.len());
        let err = sol
            .assign_round_robin(&fleet, &[task(0, 1, 2, 99)])
            .expect_err("task fitting no vehicle must be rejected");
        assert_eq!(err.task(), TaskIdentifier::new(0));
    }

    #[test]
    fn test_materialize_plan_resolves_intermediate_moves() {
        let (fleet, topology) = fixture();
        let mut sol = Solution::new(fleet.len());
        let t = sol.push_task(task(0, 1, 3, 4));
        sol.splice_task(ci(0), t, 0, 1).expect("splice");
        sol.rebuild_route(&fleet, ci(0), &topology).expect("feasible");

        let plan = sol.materialize_plan(&fleet, ci(0), &topology);
        assert_eq!(plan.vehicle(), VehicleIdentifier::new(0));
        assert_eq!(
            plan.steps(),
            &[
                Step::Move(loc(1)),
                Step::Pickup(TaskIdentifier::new(0)),
                Step::Move(loc(2)),
                Step::Move(loc(3)),
                Step::Delivery(TaskIdentifier::new(0)),
            ]
        );
        assert_eq!(plan.total_distance(), Distance::new(3.0));
    }

    #[test]
    fn test_materialize_empty_plan() {
        let (fleet, topology) = fixture();
        let sol = Solution::new(fleet.len());
        let plan = sol.materialize_plan(&fleet, ci(1), &topology);
        assert!(plan.is_empty());
    }
}
