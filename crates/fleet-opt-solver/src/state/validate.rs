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
use fixedbitset::FixedBitSet;
use fleet_opt_model::prelude::{Fleet, TaskIdentifier, VehicleIdentifier};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SolutionValidationError {
    /// A chain prefix pushed the free capacity outside `[0, capacity]`.
    CapacityWindowViolated(VehicleIdentifier, TaskIdentifier),
    /// Pickup and delivery of a task sit on different chains.
    SplitPair(TaskIdentifier),
    /// Exactly one half of a task's pair is linked into a chain.
    HalfLinked(TaskIdentifier),
    /// A task's delivery precedes its pickup on the same chain.
    PickupAfterDelivery(TaskIdentifier),
    /// A chain walk revisited a node; the link structure is corrupt.
    CycleDetected(VehicleIdentifier),
}

impl std::fmt::Display for SolutionValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolutionValidationError::CapacityWindowViolated(v, t) => {
                write!(f, "Capacity of vehicle {} violated at task {}", v, t)
            }
            SolutionValidationError::SplitPair(t) => {
                write!(f, "Pickup and delivery of task {} are on different chains", t)
            }
            SolutionValidationError::HalfLinked(t) => {
                write!(f, "Task {} has only one of its two actions linked", t)
            }
            SolutionValidationError::PickupAfterDelivery(t) => {
                write!(f, "Delivery of task {} precedes its pickup", t)
            }
            SolutionValidationError::CycleDetected(v) => {
                write!(f, "Chain of vehicle {} contains a cycle", v)
            }
        }
    }
}

impl std::error::Error for SolutionValidationError {}

/// Re-checks every structural invariant of a solution from scratch:
///
/// 1. every chain prefix keeps the free capacity within `[0, capacity]`,
/// 2. every linked task has pickup and delivery on the same chain, pickup
///    strictly first,
/// 3. every task is linked either zero times or exactly twice.
///
/// The arena representation makes duplicate appearances of one action
/// impossible by construction, so the remaining structural hazard is a
/// corrupted link cycle, which the visited-set guard reports.
pub fn validate_solution(
    solution: &Solution,
    fleet: &Fleet,
) -> Result<(), SolutionValidationError> {
    let chains = solution.chains();
    let total_nodes = 2 * chains.num_chains() + chains.num_action_nodes();
    let mut visited = FixedBitSet::with_capacity(total_nodes);
    let mut order: Vec<Option<usize>> = vec![None; total_nodes];

    for c in 0..chains.num_chains() {
        let chain = ChainIndex::new(c);
        let vehicle = fleet.get(c);
        let capacity = vehicle.capacity() as i64;
        let mut free = capacity;

        let end = chains.end(chain);
        let mut node = chains.next(chains.start(chain));
        let mut position = 0usize;
        while node != end {
            if visited.contains(node.get()) {
                return Err(SolutionValidationError::CycleDetected(vehicle.id()));
            }
            visited.insert(node.get());
            order[node.get()] = Some(position);

            let action = solution.action_at(node);
            free += action.capacity_delta();
            if free < 0 || free > capacity {
                return Err(SolutionValidationError::CapacityWindowViolated(
                    vehicle.id(),
                    action.task(),
                ));
            }

            position += 1;
            node = chains.next(node);
        }
    }

    for t in 0..solution.task_count() {
        let task = TaskIndex::new(t);
        let id: TaskIdentifier = solution.task(task).id();
        let p = solution.pickup_node(task);
        let d = solution.delivery_node(task);
        match (chains.chain_of(p), chains.chain_of(d)) {
            (None, None) => {}
            (Some(pc), Some(dc)) if pc == dc => {
                let (po, po_d) = (order[p.get()], order[d.get()]);
                match (po, po_d) {
                    (Some(a), Some(b)) if a < b => {}
                    _ => return Err(SolutionValidationError::PickupAfterDelivery(id)),
                }
            }
            (Some(_), Some(_)) => return Err(SolutionValidationError::SplitPair(id)),
            _ => return Err(SolutionValidationError::HalfLinked(id)),
        }
    }

    Ok(())
}
