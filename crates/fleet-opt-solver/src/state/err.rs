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

use fleet_opt_model::prelude::{TaskIdentifier, VehicleIdentifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskNotAssignedError {
    task: TaskIdentifier,
}

impl TaskNotAssignedError {
    pub fn new(task: TaskIdentifier) -> Self {
        Self { task }
    }

    pub fn task(&self) -> TaskIdentifier {
        self.task
    }
}

impl std::fmt::Display for TaskNotAssignedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Task {} is not assigned to any vehicle", self.task)
    }
}

impl std::error::Error for TaskNotAssignedError {}

/// A pickup and its delivery were found on different chains (or only one of
/// them is linked). This is a corruption of the pairing invariant and hence
/// a bug in the move generator or splice logic, never an expected state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnmatchedPairError {
    task: TaskIdentifier,
}

impl UnmatchedPairError {
    pub fn new(task: TaskIdentifier) -> Self {
        Self { task }
    }

    pub fn task(&self) -> TaskIdentifier {
        self.task
    }
}

impl std::fmt::Display for UnmatchedPairError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Pickup and delivery of task {} are not paired on one chain",
            self.task
        )
    }
}

impl std::error::Error for UnmatchedPairError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructuralError {
    TaskNotAssigned(TaskNotAssignedError),
    UnmatchedPair(UnmatchedPairError),
}

impl std::fmt::Display for StructuralError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StructuralError::TaskNotAssigned(e) => write!(f, "{}", e),
            StructuralError::UnmatchedPair(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for StructuralError {}

impl From<TaskNotAssignedError> for StructuralError {
    fn from(err: TaskNotAssignedError) -> Self {
        StructuralError::TaskNotAssigned(err)
    }
}

impl From<UnmatchedPairError> for StructuralError {
    fn from(err: UnmatchedPairError) -> Self {
        StructuralError::UnmatchedPair(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CapacityExceededError {
    vehicle: VehicleIdentifier,
    task: TaskIdentifier,
}

impl CapacityExceededError {
    pub fn new(vehicle: VehicleIdentifier, task: TaskIdentifier) -> Self {
        Self { vehicle, task }
    }

    pub fn vehicle(&self) -> VehicleIdentifier {
        self.vehicle
    }

    pub fn task(&self) -> TaskIdentifier {
        self.task
    }
}

impl std::fmt::Display for CapacityExceededError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Capacity of vehicle {} violated at task {}",
            self.vehicle, self.task
        )
    }
}

impl std::error::Error for CapacityExceededError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidSplicePositionError {
    pickup_position: usize,
    delivery_position: usize,
    chain_len: usize,
}

impl InvalidSplicePositionError {
    pub fn new(pickup_position: usize, delivery_position: usize, chain_len: usize) -> Self {
        Self {
            pickup_position,
            delivery_position,
            chain_len,
        }
    }
}

impl std::fmt::Display for InvalidSplicePositionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cannot splice pickup at {} and delivery at {} into a chain of {} actions",
            self.pickup_position, self.delivery_position, self.chain_len
        )
    }
}

impl std::error::Error for InvalidSplicePositionError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskAlreadyAssignedError {
    task: TaskIdentifier,
}

impl TaskAlreadyAssignedError {
    pub fn new(task: TaskIdentifier) -> Self {
        Self { task }
    }

    pub fn task(&self) -> TaskIdentifier {
        self.task
    }
}

impl std::fmt::Display for TaskAlreadyAssignedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Task {} is already assigned to a vehicle", self.task)
    }
}

impl std::error::Error for TaskAlreadyAssignedError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpliceError {
    InvalidPosition(InvalidSplicePositionError),
    AlreadyAssigned(TaskAlreadyAssignedError),
}

impl std::fmt::Display for SpliceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpliceError::InvalidPosition(e) => write!(f, "{}", e),
            SpliceError::AlreadyAssigned(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SpliceError {}

impl From<InvalidSplicePositionError> for SpliceError {
    fn from(err: InvalidSplicePositionError) -> Self {
        SpliceError::InvalidPosition(err)
    }
}

impl From<TaskAlreadyAssignedError> for SpliceError {
    fn from(err: TaskAlreadyAssignedError) -> Self {
        SpliceError::AlreadyAssigned(err)
    }
}
