//! Random-source capabilities used by trait operations.
//!
//! Every stochastic operation in this crate takes an explicit `&mut R` where
//! `R: Rng`. [`TraitRng`] layers the four draws the trait engine needs on top
//! of any such generator, so a seeded `ChaCha8Rng` makes every call replayable.

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;

/// Draws used by trait initialization, mutation and mating.
///
/// Blanket-implemented for every [`Rng`].
pub trait TraitRng {
    /// Uniform real in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Uniform real in `[-1, 1)`.
    fn signed_unit(&mut self) -> f64;

    /// Uniform integer in `[min, max]`.
    ///
    /// Returns `min` when the range is empty.
    fn int_inclusive(&mut self, min: i64, max: i64) -> i64;

    /// Index drawn with probability proportional to its weight.
    fn roulette(&mut self, selector: &WeightedIndex<f64>) -> usize;
}

impl<R: Rng + ?Sized> TraitRng for R {
    #[inline]
    fn unit(&mut self) -> f64 {
        self.random::<f64>()
    }

    #[inline]
    fn signed_unit(&mut self) -> f64 {
        self.random::<f64>() * 2.0 - 1.0
    }

    #[inline]
    fn int_inclusive(&mut self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        self.random_range(min..=max)
    }

    #[inline]
    fn roulette(&mut self, selector: &WeightedIndex<f64>) -> usize {
        selector.sample(self)
    }
}

/// Rescale `x` from `[from_min, from_max]` to `[to_min, to_max]`.
///
/// The target span is never formed, so bounds near `f64::MAX` in magnitude
/// interpolate without overflowing.
#[inline]
#[must_use]
pub fn rescale(x: f64, from_min: f64, from_max: f64, to_min: f64, to_max: f64) -> f64 {
    let span = from_max - from_min;
    if span == 0.0 {
        return to_min;
    }
    let t = (x - from_min) / span;
    to_min * (1.0 - t) + to_max * t
}
