/// A trait for random sources that return bounded random integers.
///
/// This abstraction allows you to plug in a real random source or a mocked
/// random source in tests. Traversal cursors draw their start offset and
/// stride from it.
///
/// # Example
/// ```
/// use noid_minter::RandSource;
///
/// struct FixedRand;
/// impl RandSource for FixedRand {
///     fn rand_range(&self, low: usize, _high: usize) -> usize {
///         low
///     }
/// }
///
/// let rng = FixedRand;
/// assert_eq!(rng.rand_range(3, 20), 3);
/// ```
pub trait RandSource {
    /// Returns a random integer in `[low, high]` (both inclusive).
    fn rand_range(&self, low: usize, high: usize) -> usize;
}
