use crate::RandSource;
use rand::{Rng, rng};

/// A [`RandSource`] drawing from the calling thread's RNG (`rand::rng()`).
///
/// It stores nothing, so one value can be shared freely between threads even
/// though the thread-local generator itself is neither `Send` nor `Sync`.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource for ThreadRandom {
    fn rand_range(&self, low: usize, high: usize) -> usize {
        rng().random_range(low..=high)
    }
}
