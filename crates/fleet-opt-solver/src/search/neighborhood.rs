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
    index::{ChainIndex, TaskIndex},
    solution::Solution,
};
use fleet_opt_model::prelude::{Fleet, Topology};

/// Enumerates the single-task structural moves reachable from a solution.
///
/// Two move families, applied to the task heading each non-empty chain:
///
/// - **Reassign**: move the head task's pickup/delivery pair to the front of
///   another vehicle's chain (capacity permitting), then additionally every
///   delivery reordering on the destination.
/// - **Reorder delivery**: keep the pair on its vehicle but place the
///   delivery at every other capacity-feasible position after the pickup.
///
/// The enumeration is pure: all randomness lives in the driver's selection.
/// Capacity-infeasible candidates are filtered here and never surface.
/// The input solution's route caches must be fresh; emitted neighbors have
/// fresh caches for the chains they touch.
pub struct Neighborhood<'a, T> {
    fleet: &'a Fleet,
    topology: &'a T,
}

impl<'a, T: Topology> Neighborhood<'a, T> {
    #[inline]
    pub fn new(fleet: &'a Fleet, topology: &'a T) -> Self {
        Self { fleet, topology }
    }

    pub fn generate(&self, solution: &Solution) -> Vec<Solution> {
        debug_assert_eq!(
            self.fleet.len(),
            solution.num_vehicles(),
            "fleet/solution mismatch"
        );
        let mut neighbors = Vec::new();

        for i in 0..self.fleet.len() {
            let from = ChainIndex::new(i);
            let Some(head) = solution.head_task(from) else {
                continue;
            };
            self.push_reorder_delivery(solution, from, head, &mut neighbors);

            let weight = solution.task(head).weight();
            for j in 0..self.fleet.len() {
                if j == i || !self.fleet.get(j).can_carry(weight) {
                    continue;
                }
                let to = ChainIndex::new(j);
                let moved = self.reassign_head(solution, from, to, head);
                self.push_reorder_delivery(&moved, to, head, &mut neighbors);
                neighbors.push(moved);
            }
        }

        neighbors
    }

    /// Moves the head task of `from` to the front of `to`'s chain (pickup
    /// immediately followed by its delivery).
    ///
    /// This is always capacity-feasible: the source chain only loses load,
    /// and on the destination the pair is closed before any existing action
    /// runs, so its only footprint is the pre-checked task weight.
    fn reassign_head(
        &self,
        solution: &Solution,
        from: ChainIndex,
        to: ChainIndex,
        task: TaskIndex,
    ) -> Solution {
        let mut candidate = solution.clone();
        candidate
            .remove_task(task)
            .expect("chain head task must form a matched pair on its chain");
        candidate
            .splice_task(to, task, 0, 1)
            .expect("detached pair splices at the head of any chain");
        candidate
            .rebuild_route(self.fleet, from, self.topology)
            .expect("removing a closed pair keeps the source chain feasible");
        candidate
            .rebuild_route(self.fleet, to, self.topology)
            .expect("head insertion of a fitting task keeps the chain feasible");
        candidate
    }

    /// Emits one neighbor per alternative, capacity-feasible position of the
    /// task's delivery, strictly after its pickup. The current position is
    /// skipped; candidates violating the capacity window are dropped.
    fn push_reorder_delivery(
        &self,
        base: &Solution,
        vehicle: ChainIndex,
        task: TaskIndex,
        out: &mut Vec<Solution>,
    ) {
        let (pickup_pos, delivery_pos) = base
            .pair_positions(vehicle, task)
            .expect("task must be paired on the given chain");
        let len = base.chains().chain_len(vehicle);

        for position in (pickup_pos + 1)..len {
            if position == delivery_pos {
                continue;
            }
            let mut candidate = base.clone();
            candidate
                .remove_task(task)
                .expect("task pair is linked on one chain");
            candidate
                .splice_task(vehicle, task, pickup_pos, position)
                .expect("reorder positions stay within the chain");
            if candidate
                .rebuild_route(self.fleet, vehicle, self.topology)
                .is_ok()
            {
                out.push(candidate);
            }
        }
    }
}
