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

use crate::common::{LocationIdentifier, TaskIdentifier, VehicleIdentifier};
use fleet_opt_core::prelude::Distance;

/// One primitive step of an executable vehicle plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Step {
    Move(LocationIdentifier),
    Pickup(TaskIdentifier),
    Delivery(TaskIdentifier),
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Move(loc) => write!(f, "Move to {}", loc),
            Step::Pickup(task) => write!(f, "Pickup {}", task),
            Step::Delivery(task) => write!(f, "Delivery {}", task),
        }
    }
}

/// The executable plan of one vehicle: the ordered steps derived from its
/// committed action chain, plus the traveled distance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehiclePlan {
    vehicle: VehicleIdentifier,
    steps: Vec<Step>,
    total_distance: Distance,
}

impl VehiclePlan {
    #[inline]
    pub fn new(vehicle: VehicleIdentifier, steps: Vec<Step>, total_distance: Distance) -> Self {
        Self {
            vehicle,
            steps,
            total_distance,
        }
    }

    #[inline]
    pub fn empty(vehicle: VehicleIdentifier) -> Self {
        Self {
            vehicle,
            steps: Vec::new(),
            total_distance: Distance::ZERO,
        }
    }

    #[inline]
    pub fn vehicle(&self) -> VehicleIdentifier {
        self.vehicle
    }

    #[inline]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[inline]
    pub fn total_distance(&self) -> Distance {
        self.total_distance
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl std::fmt::Display for VehiclePlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Plan for {}: {} steps, {}",
            self.vehicle,
            self.steps.len(),
            self.total_distance
        )
    }
}
