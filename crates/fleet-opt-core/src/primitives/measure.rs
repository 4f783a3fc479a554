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

use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

/// A travel distance along the topology. Never negative.
#[repr(transparent)]
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Distance(f64);

impl Distance {
    pub const ZERO: Distance = Distance(0.0);

    #[inline]
    pub fn new(value: f64) -> Self {
        debug_assert!(
            value >= 0.0 && value.is_finite(),
            "distance must be finite and non-negative, got {}",
            value
        );
        Distance(value)
    }

    #[inline]
    pub const fn value(&self) -> f64 {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl Add for Distance {
    type Output = Distance;

    #[inline]
    fn add(self, rhs: Distance) -> Self::Output {
        Distance(self.0 + rhs.0)
    }
}

impl AddAssign for Distance {
    #[inline]
    fn add_assign(&mut self, rhs: Distance) {
        self.0 += rhs.0;
    }
}

impl Sum for Distance {
    #[inline]
    fn sum<I: Iterator<Item = Distance>>(iter: I) -> Self {
        iter.fold(Distance::ZERO, |acc, d| acc + d)
    }
}

/// Scaling a distance by a cost-per-distance-unit rate yields a cost.
impl Mul<f64> for Distance {
    type Output = Cost;

    #[inline]
    fn mul(self, rate: f64) -> Self::Output {
        Cost::new(self.0 * rate)
    }
}

impl std::fmt::Display for Distance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Distance({})", self.0)
    }
}

/// A plan cost. `Cost::INFEASIBLE` (positive infinity) is the sentinel for
/// "no vehicle can ever carry this task"; it compares greater than every
/// finite cost and survives addition.
#[repr(transparent)]
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cost(f64);

impl Cost {
    pub const ZERO: Cost = Cost(0.0);
    pub const INFEASIBLE: Cost = Cost(f64::INFINITY);

    #[inline]
    pub const fn new(value: f64) -> Self {
        Cost(value)
    }

    #[inline]
    pub const fn value(&self) -> f64 {
        self.0
    }

    #[inline]
    pub fn is_infeasible(&self) -> bool {
        self.0.is_infinite() && self.0 > 0.0
    }
}

impl Add for Cost {
    type Output = Cost;

    #[inline]
    fn add(self, rhs: Cost) -> Self::Output {
        Cost(self.0 + rhs.0)
    }
}

impl AddAssign for Cost {
    #[inline]
    fn add_assign(&mut self, rhs: Cost) {
        self.0 += rhs.0;
    }
}

impl Sub for Cost {
    type Output = Cost;

    #[inline]
    fn sub(self, rhs: Cost) -> Self::Output {
        Cost(self.0 - rhs.0)
    }
}

impl Sum for Cost {
    #[inline]
    fn sum<I: Iterator<Item = Cost>>(iter: I) -> Self {
        iter.fold(Cost::ZERO, |acc, c| acc + c)
    }
}

impl std::fmt::Display for Cost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_infeasible() {
            write!(f, "Cost(infeasible)")
        } else {
            write!(f, "Cost({})", self.0)
        }
    }
}
