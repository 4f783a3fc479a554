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

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fleet_opt_core::prelude::Cost;
use fleet_opt_model::prelude::{
    Fleet, LocationIdentifier, Task, TaskIdentifier, Vehicle, VehicleIdentifier,
};
use fleet_opt_solver::state::chain_set::ChainSet;
use fleet_opt_solver::state::index::ChainIndex;
use fleet_opt_solver::state::solution::Solution;

fn bench_chain_set_link_unlink(c: &mut Criterion) {
    c.bench_function("chain_set_link_unlink_512", |b| {
        let mut set = ChainSet::new(4, 512);
        b.iter(|| {
            for slot in 0..512 {
                let chain = ChainIndex::new(slot % 4);
                let node = set.node_of_slot(slot);
                let anchor = set.prev(set.end(chain));
                set.insert_after(anchor, node);
            }
            for slot in 0..512 {
                set.remove(set.node_of_slot(slot));
            }
            black_box(&set);
        })
    });
}

fn bench_solution_clone_and_move(c: &mut Criterion) {
    let fleet = Fleet::new(
        (0..4)
            .map(|i| {
                Vehicle::new(
                    VehicleIdentifier::new(i),
                    64,
                    1.0,
                    LocationIdentifier::new(0),
                )
            })
            .collect(),
    )
    .expect("valid fleet");

    let tasks: Vec<Task> = (0..64)
        .map(|i| {
            Task::new(
                TaskIdentifier::new(i),
                LocationIdentifier::new(i % 8),
                LocationIdentifier::new((i + 1) % 8),
                1,
                Cost::new(10.0),
            )
        })
        .collect();

    let mut base = Solution::new(fleet.len());
    base.assign_round_robin(&fleet, &tasks)
        .expect("light tasks fit everywhere");

    c.bench_function("solution_clone_and_move_64", |b| {
        b.iter(|| {
            let mut candidate = base.clone();
            let head = candidate
                .head_task(ChainIndex::new(0))
                .expect("chain 0 is non-empty");
            candidate.remove_task(head).expect("head pair is matched");
            candidate
                .splice_task(ChainIndex::new(1), head, 0, 1)
                .expect("head splice is valid");
            black_box(candidate);
        })
    });
}

criterion_group!(
    benches,
    bench_chain_set_link_unlink,
    bench_solution_clone_and_move
);
criterion_main!(benches);
