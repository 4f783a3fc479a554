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

use crate::common::{LocationIdentifier, TaskIdentifier};
use fleet_opt_core::prelude::Cost;

/// A pickup-and-delivery request. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Task {
    id: TaskIdentifier,
    pickup: LocationIdentifier,
    delivery: LocationIdentifier,
    weight: u32,
    reward: Cost,
}

impl Task {
    #[inline]
    pub fn new(
        id: TaskIdentifier,
        pickup: LocationIdentifier,
        delivery: LocationIdentifier,
        weight: u32,
        reward: Cost,
    ) -> Self {
        Self {
            id,
            pickup,
            delivery,
            weight,
            reward,
        }
    }

    #[inline]
    pub fn id(&self) -> TaskIdentifier {
        self.id
    }

    #[inline]
    pub fn pickup(&self) -> LocationIdentifier {
        self.pickup
    }

    #[inline]
    pub fn delivery(&self) -> LocationIdentifier {
        self.delivery
    }

    #[inline]
    pub fn weight(&self) -> u32 {
        self.weight
    }

    #[inline]
    pub fn reward(&self) -> Cost {
        self.reward
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Task: Id: {}, Pickup {}, Delivery {}, Weight {}, Reward {}",
            self.id, self.pickup, self.delivery, self.weight, self.reward
        )
    }
}
