use crate::{Alphabet, Error, NOID_TOKEN_LENGTH, Result};
use core::fmt;
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// The fixed universe of tokens minters draw from.
///
/// Every token of `length` symbols over `alphabet` appears exactly once, in
/// an order shuffled once when the space is built. The space is immutable
/// afterwards and is meant to be built once and shared (typically behind an
/// [`Arc`]) by every minter in the process.
///
/// Positions are stored as `u32` values and rendered to tokens on access, so
/// the 1,500,625 token NOID space costs about 6 MiB.
///
/// # Example
/// ```
/// use noid_minter::{Alphabet, IdentifierSpace};
///
/// let space = IdentifierSpace::new(Alphabet::new("abc")?, 2)?;
/// assert_eq!(space.len(), 9);
/// assert_eq!(space.token(0).len(), 2);
/// # Ok::<(), noid_minter::Error>(())
/// ```
///
/// [`Arc`]: std::sync::Arc
#[derive(Clone)]
pub struct IdentifierSpace {
    alphabet: Alphabet,
    length: usize,
    order: Box<[u32]>,
}

impl IdentifierSpace {
    /// Builds a space shuffled with the thread-local RNG.
    ///
    /// # Errors
    /// - [`Error::InvalidTokenLength`] if `length` is zero
    /// - [`Error::SpaceTooLarge`] if `alphabet.len()^length` overflows a `u32`
    /// - [`Error::SpaceIntegrity`] if the generated space is not exactly
    ///   `alphabet.len()^length` tokens
    pub fn new(alphabet: Alphabet, length: usize) -> Result<Self> {
        Self::from_rng(alphabet, length, &mut rand::rng())
    }

    /// Builds a reproducible space whose order depends only on `seed`.
    ///
    /// # Errors
    /// See [`Self::new`].
    pub fn with_seed(alphabet: Alphabet, length: usize, seed: u64) -> Result<Self> {
        Self::from_rng(alphabet, length, &mut StdRng::seed_from_u64(seed))
    }

    /// Builds the NOID space: four symbols over [`Alphabet::noid`].
    ///
    /// # Errors
    /// See [`Self::new`].
    pub fn noid() -> Result<Self> {
        Self::new(Alphabet::noid(), NOID_TOKEN_LENGTH)
    }

    /// Builds a space, shuffling it with `rng`.
    ///
    /// # Errors
    /// See [`Self::new`].
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(rng)))]
    pub fn from_rng<R>(alphabet: Alphabet, length: usize, rng: &mut R) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        if length == 0 {
            return Err(Error::InvalidTokenLength { length });
        }
        let expected = alphabet
            .combinations(length)
            .ok_or(Error::SpaceTooLarge {
                alphabet: alphabet.len(),
                length,
            })?;

        #[cfg(feature = "tracing")]
        let started = std::time::Instant::now();

        let mut order: Vec<u32> = (0..expected).collect();
        order.shuffle(rng);

        // unreachable with the range above; kept for other generation schemes
        if order.len() != expected as usize {
            return Err(Error::SpaceIntegrity {
                expected: expected as usize,
                actual: order.len(),
            });
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            tokens = order.len(),
            elapsed = ?started.elapsed(),
            "built identifier space"
        );

        Ok(Self {
            alphabet,
            length,
            order: order.into_boxed_slice(),
        })
    }

    /// Returns the number of tokens, `alphabet.len()^token_len()`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always `false`; a space holds at least one token.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the number of symbols per token.
    #[must_use]
    pub fn token_len(&self) -> usize {
        self.length
    }

    /// Returns the alphabet tokens are drawn from.
    #[must_use]
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Returns the token at `index`, or `None` past the end.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<String> {
        self.order
            .get(index)
            .map(|&value| self.alphabet.encode(value, self.length))
    }

    /// Returns the token at `index`.
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    #[must_use]
    pub fn token(&self, index: usize) -> String {
        self.alphabet.encode(self.order[index], self.length)
    }

    /// Appends the token at `index` to `out`.
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    pub fn token_into(&self, index: usize, out: &mut String) {
        self.alphabet.encode_into(self.order[index], self.length, out);
    }

    /// Iterates over every token in shuffled order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = String> + '_ {
        self.order
            .iter()
            .map(|&value| self.alphabet.encode(value, self.length))
    }
}

impl fmt::Debug for IdentifierSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentifierSpace")
            .field("alphabet", &self.alphabet)
            .field("length", &self.length)
            .field("tokens", &self.order.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn abc() -> Alphabet {
        Alphabet::new("abc").unwrap()
    }

    #[test]
    fn holds_every_combination_exactly_once() {
        for (symbols, length) in [("abc", 2), ("ab", 5), ("0123456789", 3), ("x", 4)] {
            let alphabet = Alphabet::new(symbols).unwrap();
            let expected = alphabet.len().pow(length as u32);
            let space = IdentifierSpace::new(alphabet, length).unwrap();

            let tokens: HashSet<String> = space.iter().collect();
            assert_eq!(space.len(), expected, "{symbols}^{length}");
            assert_eq!(tokens.len(), expected, "{symbols}^{length}");
            assert!(tokens.iter().all(|t| t.chars().count() == length));
        }
    }

    #[test]
    fn three_symbols_two_long_is_nine_tokens() {
        let space = IdentifierSpace::new(abc(), 2).unwrap();
        let mut tokens: Vec<String> = space.iter().collect();
        tokens.sort();
        assert_eq!(
            tokens,
            ["aa", "ab", "ac", "ba", "bb", "bc", "ca", "cb", "cc"]
        );
    }

    #[test]
    fn seeded_spaces_are_reproducible() {
        let a = IdentifierSpace::with_seed(Alphabet::noid(), 2, 42).unwrap();
        let b = IdentifierSpace::with_seed(Alphabet::noid(), 2, 42).unwrap();
        assert!(a.iter().eq(b.iter()));
    }

    #[test]
    fn indexing_matches_iteration() {
        let space = IdentifierSpace::with_seed(abc(), 3, 7).unwrap();
        for (i, token) in space.iter().enumerate() {
            assert_eq!(space.get(i).as_deref(), Some(token.as_str()));
            assert_eq!(space.token(i), token);
        }
        assert_eq!(space.get(space.len()), None);

        let mut out = String::from("p-");
        space.token_into(0, &mut out);
        assert_eq!(out, format!("p-{}", space.token(0)));
    }

    #[test]
    fn rejects_zero_length_and_oversized_spaces() {
        assert_eq!(
            IdentifierSpace::new(abc(), 0).unwrap_err(),
            Error::InvalidTokenLength { length: 0 }
        );
        assert_eq!(
            IdentifierSpace::new(Alphabet::noid(), 9).unwrap_err(),
            Error::SpaceTooLarge {
                alphabet: 35,
                length: 9
            }
        );
    }

    #[test]
    fn noid_space_has_1_500_625_tokens() {
        let space = IdentifierSpace::noid().unwrap();
        assert_eq!(space.len(), 1_500_625);
        assert_eq!(space.token_len(), 4);
        assert!(
            space
                .token(0)
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        );
    }
}
