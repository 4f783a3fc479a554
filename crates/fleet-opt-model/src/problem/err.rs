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

use crate::common::VehicleIdentifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmptyFleetError;

impl std::fmt::Display for EmptyFleetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "The fleet contains no vehicles.")
    }
}

impl std::error::Error for EmptyFleetError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DuplicateVehicleError {
    id: VehicleIdentifier,
}

impl DuplicateVehicleError {
    pub fn new(id: VehicleIdentifier) -> Self {
        Self { id }
    }

    pub fn id(&self) -> VehicleIdentifier {
        self.id
    }
}

impl std::fmt::Display for DuplicateVehicleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Duplicate vehicle identifier {}", self.id)
    }
}

impl std::error::Error for DuplicateVehicleError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FleetError {
    Empty(EmptyFleetError),
    DuplicateVehicle(DuplicateVehicleError),
}

impl std::fmt::Display for FleetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FleetError::Empty(e) => write!(f, "{}", e),
            FleetError::DuplicateVehicle(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for FleetError {}

impl From<EmptyFleetError> for FleetError {
    fn from(err: EmptyFleetError) -> Self {
        FleetError::Empty(err)
    }
}

impl From<DuplicateVehicleError> for FleetError {
    fn from(err: DuplicateVehicleError) -> Self {
        FleetError::DuplicateVehicle(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NonSquareMatrixError {
    rows: usize,
    cols: usize,
}

impl NonSquareMatrixError {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }
}

impl std::fmt::Display for NonSquareMatrixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Distance matrix is not square: row {} has {} entries",
            self.rows, self.cols
        )
    }
}

impl std::error::Error for NonSquareMatrixError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeOutOfBoundsError {
    from: u32,
    to: u32,
    num_locations: usize,
}

impl EdgeOutOfBoundsError {
    pub fn new(from: u32, to: u32, num_locations: usize) -> Self {
        Self {
            from,
            to,
            num_locations,
        }
    }
}

impl std::fmt::Display for EdgeOutOfBoundsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Edge ({}, {}) references a location outside 0..{}",
            self.from, self.to, self.num_locations
        )
    }
}

impl std::error::Error for EdgeOutOfBoundsError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopologyError {
    NonSquareMatrix(NonSquareMatrixError),
    EdgeOutOfBounds(EdgeOutOfBoundsError),
}

impl std::fmt::Display for TopologyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TopologyError::NonSquareMatrix(e) => write!(f, "{}", e),
            TopologyError::EdgeOutOfBounds(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for TopologyError {}

impl From<NonSquareMatrixError> for TopologyError {
    fn from(err: NonSquareMatrixError) -> Self {
        TopologyError::NonSquareMatrix(err)
    }
}

impl From<EdgeOutOfBoundsError> for TopologyError {
    fn from(err: EdgeOutOfBoundsError) -> Self {
        TopologyError::EdgeOutOfBounds(err)
    }
}
