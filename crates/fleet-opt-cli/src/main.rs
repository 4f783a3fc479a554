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

use chrono::{DateTime, Utc};
use fleet_opt_core::prelude::Cost;
use fleet_opt_model::prelude::{
    Fleet, LocationIdentifier, MatrixTopology, Task, TaskIdentifier, Topology, Vehicle,
    VehicleIdentifier, VehiclePlan,
};
use fleet_opt_solver::prelude::MarginalCostEstimator;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

const INSTANCE_SEED: u64 = 0xC0FF_EE00_D15EA5ED;
const NUM_LOCATIONS: usize = 12;
const NUM_VEHICLES: u32 = 3;
const NUM_TASKS: u32 = 10;
const BID_BUDGET: Duration = Duration::from_millis(50);
const PLAN_BUDGET: Duration = Duration::from_millis(500);

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT | FmtSpan::CLOSE)
        .init();
}

#[derive(Serialize)]
struct RunRecord {
    start_ts: DateTime<Utc>,
    end_ts: DateTime<Utc>,
    runtime_ms: u128,
    tasks_offered: u32,
    tasks_won: u32,
    total_cost: f64,
    plans: Vec<VehiclePlan>,
}

fn random_instance(rng: &mut ChaCha8Rng) -> (Fleet, MatrixTopology) {
    let coords: Vec<(f64, f64)> = (0..NUM_LOCATIONS)
        .map(|_| (rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)))
        .collect();
    let topology = MatrixTopology::from_coordinates(&coords);

    let vehicles = (0..NUM_VEHICLES)
        .map(|i| {
            Vehicle::new(
                VehicleIdentifier::new(i),
                rng.gen_range(8..16),
                rng.gen_range(1..4) as f64,
                LocationIdentifier::new(rng.gen_range(0..NUM_LOCATIONS as u32)),
            )
        })
        .collect();
    let fleet = Fleet::new(vehicles).expect("generated fleet is valid");

    (fleet, topology)
}

fn random_task(rng: &mut ChaCha8Rng, topology: &MatrixTopology, id: u32) -> Task {
    let pickup = rng.gen_range(0..NUM_LOCATIONS as u32);
    let mut delivery = rng.gen_range(0..NUM_LOCATIONS as u32);
    if delivery == pickup {
        delivery = (delivery + 1) % NUM_LOCATIONS as u32;
    }
    let direct = topology
        .distance(
            LocationIdentifier::new(pickup),
            LocationIdentifier::new(delivery),
        )
        .value();
    Task::new(
        TaskIdentifier::new(id),
        LocationIdentifier::new(pickup),
        LocationIdentifier::new(delivery),
        rng.gen_range(1..=8),
        // Rewards scale with the direct leg so roughly half the stream is
        // worth winning.
        Cost::new(direct * 2.0 + 15.0),
    )
}

fn main() {
    enable_tracing();

    let mut rng = ChaCha8Rng::seed_from_u64(INSTANCE_SEED);
    let (fleet, topology) = random_instance(&mut rng);
    for v in fleet.iter() {
        tracing::info!("{}", v);
    }

    let start_ts = Utc::now();
    let started = Instant::now();

    let mut estimator =
        MarginalCostEstimator::new(&fleet, &topology, INSTANCE_SEED.wrapping_add(1));
    let mut won: u32 = 0;

    for id in 0..NUM_TASKS {
        let task = random_task(&mut rng, &topology, id);
        let marginal = estimator.add_task(task, BID_BUDGET);

        if !marginal.is_infeasible() && marginal <= task.reward() {
            estimator.consolidate();
            won += 1;
            tracing::info!(
                task = %task.id(),
                marginal = marginal.value(),
                reward = task.reward().value(),
                "won task"
            );
        } else {
            tracing::info!(
                task = %task.id(),
                marginal = %marginal,
                reward = task.reward().value(),
                "passed on task"
            );
        }
    }

    let plans = estimator.final_plan(PLAN_BUDGET);
    let total_cost = estimator.best().total_cost(&fleet);
    tracing::info!(
        tasks_won = won,
        total_cost = total_cost.value(),
        runtime_ms = started.elapsed().as_millis() as u64,
        "auction finished"
    );
    for plan in &plans {
        tracing::info!("{}", plan);
        for step in plan.steps() {
            tracing::debug!("  {}", step);
        }
    }

    let record = RunRecord {
        start_ts,
        end_ts: Utc::now(),
        runtime_ms: started.elapsed().as_millis(),
        tasks_offered: NUM_TASKS,
        tasks_won: won,
        total_cost: total_cost.value(),
        plans,
    };

    let out_path = Path::new("plans.json");
    let json = serde_json::to_string_pretty(&record).expect("run record serializes");
    match File::create(out_path).and_then(|mut f| f.write_all(json.as_bytes())) {
        Ok(()) => tracing::info!("Wrote {}", out_path.display()),
        Err(e) => tracing::error!("Failed to write {}: {}", out_path.display(), e),
    }
}
