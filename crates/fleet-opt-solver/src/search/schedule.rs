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

/// Probability of taking the greedy (lowest-cost) neighbor instead of a
/// uniformly random one, as a function of the iteration count.
///
/// The contract is qualitative: the bias must be non-decreasing over the
/// course of a search, so early iterations diversify and late iterations
/// exploit. The concrete curve is a tunable.
pub trait GreedyBiasSchedule {
    #[inline]
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Greedy-selection probability for iteration `iteration`, in `[0, 1]`.
    fn greedy_bias(&self, iteration: u64) -> f64;
}

impl std::fmt::Debug for dyn GreedyBiasSchedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.name().fmt(f)
    }
}

/// `base + gain * ln((iteration + 1) / pivot)`, clamped to `[0, 1]`.
///
/// With the defaults this starts around 0.13 and crosses 0.5 after a few
/// thousand iterations.
#[derive(Debug, Clone, Copy)]
pub struct LogarithmicBias {
    base: f64,
    gain: f64,
    pivot: f64,
}

impl LogarithmicBias {
    pub const DEFAULT_BASE: f64 = 0.3;
    pub const DEFAULT_GAIN: f64 = 0.075;
    pub const DEFAULT_PIVOT: f64 = 10.0;

    #[inline]
    pub fn new(base: f64, gain: f64, pivot: f64) -> Self {
        debug_assert!(gain >= 0.0, "a negative gain would decay the greedy bias");
        debug_assert!(pivot > 0.0, "pivot must be positive");
        Self { base, gain, pivot }
    }
}

impl Default for LogarithmicBias {
    #[inline]
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE, Self::DEFAULT_GAIN, Self::DEFAULT_PIVOT)
    }
}

impl GreedyBiasSchedule for LogarithmicBias {
    #[inline]
    fn greedy_bias(&self, iteration: u64) -> f64 {
        let progress = ((iteration + 1) as f64 / self.pivot).ln();
        (self.base + self.gain * progress).clamp(0.0, 1.0)
    }

    #[inline]
    fn name(&self) -> &str {
        "LogarithmicBias"
    }
}

/// A fixed bias; `ConstantBias::new(1.0)` makes the driver fully greedy and
/// hence deterministic, which tests lean on.
#[derive(Debug, Clone, Copy)]
pub struct ConstantBias(f64);

impl ConstantBias {
    #[inline]
    pub fn new(bias: f64) -> Self {
        debug_assert!((0.0..=1.0).contains(&bias), "bias must be a probability");
        Self(bias)
    }
}

impl GreedyBiasSchedule for ConstantBias {
    #[inline]
    fn greedy_bias(&self, _iteration: u64) -> f64 {
        self.0
    }

    #[inline]
    fn name(&self) -> &str {
        "ConstantBias"
    }
}
