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

use crate::{
    common::LocationIdentifier,
    problem::err::{EdgeOutOfBoundsError, NonSquareMatrixError, TopologyError},
};
use fleet_opt_core::prelude::Distance;

/// The routing collaborator. Distances are shortest-path distances; paths
/// are the intermediate hops used to materialize concrete move steps.
pub trait Topology {
    /// Shortest-path distance between two locations. Always `>= 0`.
    fn distance(&self, from: LocationIdentifier, to: LocationIdentifier) -> Distance;

    /// The hops of the shortest path, excluding `from`, including `to`.
    /// Empty when `from == to`.
    fn path_between(&self, from: LocationIdentifier, to: LocationIdentifier)
        -> Vec<LocationIdentifier>;
}

/// Dense all-pairs topology: an `n x n` shortest-path matrix plus a
/// next-hop table for path reconstruction.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixTopology {
    num_locations: usize,
    dist: Vec<f64>,
    next_hop: Vec<usize>,
}

impl MatrixTopology {
    /// Builds a topology from an already-shortest distance matrix.
    /// All paths are direct (single hop).
    pub fn from_distance_matrix(matrix: Vec<Vec<f64>>) -> Result<Self, TopologyError> {
        let n = matrix.len();
        for (i, row) in matrix.iter().enumerate() {
            if row.len() != n {
                return Err(NonSquareMatrixError::new(i, row.len()))?;
            }
        }

        let mut dist = Vec::with_capacity(n * n);
        let mut next_hop = Vec::with_capacity(n * n);
        for row in &matrix {
            for (j, &d) in row.iter().enumerate() {
                debug_assert!(d >= 0.0 && d.is_finite(), "distances must be non-negative");
                dist.push(d);
                next_hop.push(j);
            }
        }

        Ok(Self {
            num_locations: n,
            dist,
            next_hop,
        })
    }

    /// Builds a complete topology from planar coordinates with Euclidean
    /// distances. All paths are direct.
    pub fn from_coordinates(points: &[(f64, f64)]) -> Self {
        let n = points.len();
        let mut dist = Vec::with_capacity(n * n);
        let mut next_hop = Vec::with_capacity(n * n);
        for &(xi, yi) in points {
            for (j, &(xj, yj)) in points.iter().enumerate() {
                dist.push(((xi - xj).powi(2) + (yi - yj).powi(2)).sqrt());
                next_hop.push(j);
            }
        }
        Self {
            num_locations: n,
            dist,
            next_hop,
        }
    }

    /// Builds a topology from an undirected edge list, computing all-pairs
    /// shortest paths (Floyd-Warshall) and the next-hop table.
    pub fn from_edges(
        num_locations: usize,
        edges: &[(u32, u32, f64)],
    ) -> Result<Self, TopologyError> {
        let n = num_locations;
        let mut dist = vec![f64::INFINITY; n * n];
        let mut next_hop = vec![usize::MAX; n * n];

        for i in 0..n {
            dist[i * n + i] = 0.0;
            next_hop[i * n + i] = i;
        }

        for &(a, b, d) in edges {
            let (ai, bi) = (a as usize, b as usize);
            if ai >= n || bi >= n {
                return Err(EdgeOutOfBoundsError::new(a, b, n))?;
            }
            debug_assert!(d >= 0.0 && d.is_finite(), "edge lengths must be non-negative");
            if d < dist[ai * n + bi] {
                dist[ai * n + bi] = d;
                dist[bi * n + ai] = d;
                next_hop[ai * n + bi] = bi;
                next_hop[bi * n + ai] = ai;
            }
        }

        for k in 0..n {
            for i in 0..n {
                let dik = dist[i * n + k];
                if dik.is_infinite() {
                    continue;
                }
                for j in 0..n {
                    let relaxed = dik + dist[k * n + j];
                    if relaxed < dist[i * n + j] {
                        dist[i * n + j] = relaxed;
                        next_hop[i * n + j] = next_hop[i * n + k];
                    }
                }
            }
        }

        Ok(Self {
            num_locations: n,
            dist,
            next_hop,
        })
    }

    #[inline]
    pub fn num_locations(&self) -> usize {
        self.num_locations
    }

    #[inline]
    fn index(&self, from: LocationIdentifier, to: LocationIdentifier) -> usize {
        let (f, t) = (from.value() as usize, to.value() as usize);
        debug_assert!(
            f < self.num_locations && t < self.num_locations,
            "location out of bounds"
        );
        f * self.num_locations + t
    }
}

impl Topology for MatrixTopology {
    #[inline]
    fn distance(&self, from: LocationIdentifier, to: LocationIdentifier) -> Distance {
        let d = self.dist[self.index(from, to)];
        assert!(
            d.is_finite(),
            "no path between {} and {} in the topology",
            from,
            to
        );
        Distance::new(d)
    }

    fn path_between(
        &self,
        from: LocationIdentifier,
        to: LocationIdentifier,
    ) -> Vec<LocationIdentifier> {
        if from == to {
            return Vec::new();
        }

        let mut path = Vec::new();
        let mut current = from;
        while current != to {
            let hop = self.next_hop[self.index(current, to)];
            assert!(
                hop != usize::MAX,
                "no path between {} and {} in the topology",
                from,
                to
            );
            current = LocationIdentifier::new(hop as u32);
            path.push(current);
        }
        path
    }
}
