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

use fleet_opt_model::prelude::{LocationIdentifier, Task, TaskIdentifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Pickup,
    Delivery,
}

/// One atomic pickup or delivery step bound to a task.
///
/// `capacity_delta` is applied to a vehicle's remaining free capacity while
/// walking its chain: a pickup consumes `weight` units, the matching
/// delivery releases them. Every prefix of a valid chain keeps the free
/// capacity within `[0, capacity]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Action {
    kind: ActionKind,
    task: TaskIdentifier,
    location: LocationIdentifier,
    capacity_delta: i64,
}

impl Action {
    #[inline]
    pub fn pickup(task: &Task) -> Self {
        Self {
            kind: ActionKind::Pickup,
            task: task.id(),
            location: task.pickup(),
            capacity_delta: -(task.weight() as i64),
        }
    }

    #[inline]
    pub fn delivery(task: &Task) -> Self {
        Self {
            kind: ActionKind::Delivery,
            task: task.id(),
            location: task.delivery(),
            capacity_delta: task.weight() as i64,
        }
    }

    #[inline]
    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    #[inline]
    pub fn task(&self) -> TaskIdentifier {
        self.task
    }

    #[inline]
    pub fn location(&self) -> LocationIdentifier {
        self.location
    }

    #[inline]
    pub fn capacity_delta(&self) -> i64 {
        self.capacity_delta
    }

    #[inline]
    pub fn is_pickup(&self) -> bool {
        matches!(self.kind, ActionKind::Pickup)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ActionKind::Pickup => write!(f, "Pickup in {}: {}", self.location, self.task),
            ActionKind::Delivery => write!(f, "Delivery to {}: {}", self.location, self.task),
        }
    }
}
