use crate::{Error, IdentifierSpace, RandSource, Result};
use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Upper bound (inclusive) for a cursor's random start offset and stride.
pub const MAX_RANDOM_OFFSET: usize = 20;

/// Walks an [`IdentifierSpace`] in a non-sequential order without building a
/// per-cursor permutation.
///
/// A cursor starts at `start` and steps by `skip`. When a pass runs off the
/// end of the space, the next pass begins one position further along than the
/// previous one (`start + 1`, `start + 2`, ...). Once `skip` passes have been
/// made, every position from `start` onwards has been produced, so the
/// stride collapses to `1` and the cursor walks the untouched head
/// `0..start`. The same collapse happens early if a new pass would begin past
/// the end of the space, which only matters for spaces smaller than the
/// stride.
///
/// Every position is produced exactly once before [`Cursor::has_next`]
/// returns `false`.
///
/// A cursor is not meant to be shared between threads; each minter owns one.
///
/// # Example
/// ```
/// use noid_minter::{Alphabet, Cursor, IdentifierSpace};
/// use std::{collections::HashSet, sync::Arc};
///
/// let space = Arc::new(IdentifierSpace::new(Alphabet::new("abc")?, 2)?);
/// let tokens: HashSet<String> = Cursor::from_components(space, 4, 3).collect();
/// assert_eq!(tokens.len(), 9);
/// # Ok::<(), noid_minter::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Cursor {
    space: Arc<IdentifierSpace>,
    start: usize,
    skip: usize,
    index: usize,
    count: usize,
    iteration: usize,
}

impl Cursor {
    /// Creates a cursor with a random start in `[0, 20]` and stride in
    /// `[1, 20]`, both narrowed to fit small spaces.
    pub fn new<R>(space: Arc<IdentifierSpace>, rng: &R) -> Self
    where
        R: RandSource + ?Sized,
    {
        let size = space.len();
        let start = rng.rand_range(0, MAX_RANDOM_OFFSET.min(size - 1));
        let skip = rng.rand_range(1, MAX_RANDOM_OFFSET.min(size));
        Self::from_components(space, start, skip)
    }

    /// Creates a cursor from explicit traversal parameters.
    ///
    /// `start` is reduced modulo the space size and `skip` is clamped to
    /// `[1, size]`.
    #[must_use]
    pub fn from_components(space: Arc<IdentifierSpace>, start: usize, skip: usize) -> Self {
        let size = space.len();
        let start = start % size;
        let skip = skip.clamp(1, size);
        Self {
            space,
            start,
            skip,
            index: start,
            count: 0,
            iteration: 0,
        }
    }

    /// Returns `true` while some token has not been produced yet.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.count < self.space.len()
    }

    /// Returns the position of the next token and advances the cursor.
    ///
    /// # Errors
    /// - [`Error::IndexExhausted`] once every position has been produced.
    pub fn next_index(&mut self) -> Result<usize> {
        if !self.has_next() {
            return Err(Error::IndexExhausted { count: self.count });
        }

        let size = self.space.len();
        let current = self.index;
        self.count += 1;

        if self.count < size {
            self.index += self.skip;

            if self.index >= size {
                self.iteration += 1;
                self.index = self.start + self.iteration;

                if self.index >= self.start + self.skip || self.index >= size {
                    self.skip = 1;
                    self.index = 0;
                }
            }
        }

        Ok(current)
    }

    /// Returns the next token and advances the cursor.
    ///
    /// # Errors
    /// - [`Error::IndexExhausted`] once every token has been produced.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_next(&mut self) -> Result<String> {
        let index = self.next_index()?;
        Ok(self.space.token(index))
    }

    /// The position the first pass started from.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// The current stride; `1` once the cursor is walking the head.
    #[must_use]
    pub fn stride(&self) -> usize {
        self.skip
    }

    /// The number of tokens produced so far.
    #[must_use]
    pub fn produced(&self) -> usize {
        self.count
    }

    /// The size of the underlying space, produced or not.
    #[must_use]
    pub fn total(&self) -> usize {
        self.space.len()
    }

    /// The space this cursor walks.
    #[must_use]
    pub fn space(&self) -> &Arc<IdentifierSpace> {
        &self.space
    }
}

impl Iterator for Cursor {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.try_next().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.space.len() - self.count;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Cursor {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Alphabet;
    use std::collections::HashSet;

    struct FixedRand {
        value: usize,
    }

    impl RandSource for FixedRand {
        fn rand_range(&self, low: usize, high: usize) -> usize {
            self.value.clamp(low, high)
        }
    }

    fn space_of(symbols: &str, length: usize) -> Arc<IdentifierSpace> {
        Arc::new(IdentifierSpace::with_seed(Alphabet::new(symbols).unwrap(), length, 1).unwrap())
    }

    fn drain_indices(cursor: &mut Cursor) -> Vec<usize> {
        let mut indices = Vec::new();
        while cursor.has_next() {
            indices.push(cursor.next_index().unwrap());
        }
        indices
    }

    #[test]
    fn visits_every_index_once_for_all_parameters() {
        // spaces of 1..=64 positions
        for symbols in ["a", "ab", "abc", "abcdefg", "abcdefghij", "0123456789abcdef"] {
            for length in 1..=2 {
                let space = space_of(symbols, length);
                let size = space.len();
                if size > 64 {
                    continue;
                }
                for start in 0..size {
                    for skip in 1..=size {
                        let mut cursor = Cursor::from_components(space.clone(), start, skip);
                        let mut indices = drain_indices(&mut cursor);
                        indices.sort_unstable();
                        assert_eq!(
                            indices,
                            (0..size).collect::<Vec<_>>(),
                            "size={size} start={start} skip={skip}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn visits_every_index_of_a_mid_sized_space() {
        let space = space_of("0123456789", 3);
        for (start, skip) in [(0, 1), (20, 20), (7, 13), (19, 1), (0, 20), (3, 999)] {
            let mut cursor = Cursor::from_components(space.clone(), start, skip);
            let indices: HashSet<usize> = drain_indices(&mut cursor).into_iter().collect();
            assert_eq!(indices.len(), 1_000, "start={start} skip={skip}");
        }
    }

    #[test]
    fn strides_before_wrapping() {
        let space = space_of("0123456789", 2);
        let mut cursor = Cursor::from_components(space, 5, 20);
        let head: Vec<usize> = (0..6).map(|_| cursor.next_index().unwrap()).collect();
        // 5, 25, 45, 65, 85, then the second pass starts at 6
        assert_eq!(head, [5, 25, 45, 65, 85, 6]);
    }

    #[test]
    fn collapses_to_the_head_after_all_passes() {
        let space = space_of("abc", 2);
        let mut cursor = Cursor::from_components(space, 2, 3);
        let order = drain_indices(&mut cursor);
        assert_eq!(order, [2, 5, 8, 3, 6, 4, 7, 0, 1]);
        assert_eq!(cursor.stride(), 1);
    }

    #[test]
    fn small_space_with_large_stride_stays_in_bounds() {
        let space = space_of("abc", 2);
        let mut cursor = Cursor::from_components(space, 7, 5);
        let order = drain_indices(&mut cursor);
        assert_eq!(order, [7, 8, 0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn fails_once_exhausted() {
        let space = space_of("ab", 1);
        let mut cursor = Cursor::from_components(space, 0, 1);
        assert!(cursor.try_next().is_ok());
        assert!(cursor.try_next().is_ok());
        assert!(!cursor.has_next());
        assert_eq!(cursor.try_next(), Err(Error::IndexExhausted { count: 2 }));
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn random_parameters_fit_small_spaces() {
        let space = space_of("abc", 1);
        let cursor = Cursor::new(space, &FixedRand { value: 20 });
        assert_eq!(cursor.start(), 2);
        assert_eq!(cursor.stride(), 3);
        assert_eq!(cursor.produced(), 0);
    }

    #[test]
    fn parameters_are_clamped() {
        let space = space_of("abc", 2);
        let cursor = Cursor::from_components(space, 10, 0);
        assert_eq!(cursor.start(), 1);
        assert_eq!(cursor.stride(), 1);
    }

    #[test]
    fn accessors_do_not_consume_the_cursor() {
        let space = space_of("abc", 2);
        let mut cursor = Cursor::from_components(space, 0, 1);
        assert_eq!(cursor.produced(), 0);
        cursor.next_index().unwrap();
        cursor.next_index().unwrap();

        assert_eq!(cursor.produced(), 2);
        assert_eq!(cursor.stride(), 1);
        assert_eq!(cursor.start(), 0);
        assert_eq!(cursor.len(), 7);
        assert!(cursor.has_next());
    }

    #[test]
    fn size_hint_tracks_remaining_tokens() {
        let space = space_of("abc", 2);
        let mut cursor = Cursor::new(space, &crate::ThreadRandom);
        assert_eq!(cursor.total(), 9);
        assert_eq!(cursor.size_hint(), (9, Some(9)));
        cursor.next();
        assert_eq!(cursor.len(), 8);
        assert_eq!(cursor.total(), 9);
        let rest: HashSet<String> = cursor.collect();
        assert_eq!(rest.len(), 8);
    }
}
