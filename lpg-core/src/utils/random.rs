#[cfg(test)]
#[path = "../../tests/unit/utils/random_test.rs"]
mod random_test;

use rand::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

/// Provides the way to use randomized values in generic way.
pub trait Random {
    /// Produces integral random value, uniformly distributed on the closed interval [min, max]
    fn uniform_int(&self, min: i32, max: i32) -> i32;

    /// Produces real random value, uniformly distributed on the closed interval [min, max)
    fn uniform_real(&self, min: f64, max: f64) -> f64;

    /// Tests probability value in (0., 1.) range.
    fn is_hit(&self, probability: f64) -> bool;

    /// Returns an index from collection with probability proportional to its weight.
    /// Uses exponential distribution where the weights are the rate of the distribution (lambda)
    /// and selects the smallest sampled value. Non-positive weights are never selected unless
    /// all weights are non-positive, then the choice is uniform.
    fn weighted(&self, weights: &[f64]) -> usize;

    /// Returns RNG.
    fn get_rng(&self) -> RandomGen;
}

/// A default random implementation backed by a seeded small rng.
#[derive(Clone)]
pub struct DefaultRandom {
    rng: RandomGen,
}

impl DefaultRandom {
    /// Creates a new instance `DefaultRandom` with seed.
    pub fn new_with_seed(seed: u64) -> Self {
        Self { rng: RandomGen::with_rng(Rc::new(RefCell::new(SmallRng::seed_from_u64(seed)))) }
    }
}

impl Default for DefaultRandom {
    fn default() -> Self {
        Self::new_with_seed(thread_rng().next_u64())
    }
}

impl Random for DefaultRandom {
    fn uniform_int(&self, min: i32, max: i32) -> i32 {
        if min == max {
            return min;
        }

        assert!(min < max);
        self.get_rng().gen_range(min..max + 1)
    }

    fn uniform_real(&self, min: f64, max: f64) -> f64 {
        if (min - max).abs() < f64::EPSILON {
            return min;
        }

        assert!(min < max);
        self.get_rng().gen_range(min..max)
    }

    fn is_hit(&self, probability: f64) -> bool {
        self.get_rng().gen_bool(probability.clamp(0., 1.))
    }

    fn weighted(&self, weights: &[f64]) -> usize {
        assert!(!weights.is_empty());

        if weights.iter().all(|&weight| weight <= 0. || !weight.is_finite()) {
            return self.uniform_int(0, weights.len() as i32 - 1) as usize;
        }

        weights
            .iter()
            .zip(0_usize..)
            .filter(|&(&weight, _)| weight > 0. && weight.is_finite())
            .map(|(&weight, index)| (-self.uniform_real(f64::EPSILON, 1.).ln() / weight, index))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map_or(0, |(_, index)| index)
    }

    fn get_rng(&self) -> RandomGen {
        self.rng.clone()
    }
}

/// Specifies underlying random generator type.
#[derive(Clone, Debug)]
pub struct RandomGen {
    rng: Rc<RefCell<SmallRng>>,
}

impl RandomGen {
    /// Creates a new instance of `RandomGen` using given reference to small rng.
    pub fn with_rng(rng: Rc<RefCell<SmallRng>>) -> Self {
        Self { rng }
    }
}

impl RngCore for RandomGen {
    #[inline(always)]
    fn next_u32(&mut self) -> u32 {
        self.rng.borrow_mut().next_u32()
    }

    #[inline(always)]
    fn next_u64(&mut self) -> u64 {
        self.rng.borrow_mut().next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.borrow_mut().fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.borrow_mut().try_fill_bytes(dest)
    }
}

/// Derives a seed for an independent random stream, e.g. for a single ant in a given iteration,
/// so that parallel construction stays reproducible for a fixed run seed.
pub fn derive_seed(seed: u64, stream: u64, index: u64) -> u64 {
    let mix = |mut value: u64| {
        // splitmix64 finalizer
        value = value.wrapping_add(0x9E37_79B9_7F4A_7C15);
        value = (value ^ (value >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        value = (value ^ (value >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        value ^ (value >> 31)
    };

    mix(mix(mix(seed) ^ stream) ^ index)
}
