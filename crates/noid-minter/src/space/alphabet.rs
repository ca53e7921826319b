use crate::{Error, Result};

/// The symbols NOID tokens are drawn from. Lower-case `l` is left out because
/// it reads like `1`.
pub const NOID_SYMBOLS: &str = "abcdefghijkmnopqrstuvwxyz1234567890";

/// The number of symbols in a NOID token.
pub const NOID_TOKEN_LENGTH: usize = 4;

/// An ordered set of distinct, case-significant symbols.
///
/// A value `n` in `0..len^length` is rendered as a `length` symbol token by
/// writing its base-`len` digits most significant first, so the values of that
/// range map one-to-one onto the Cartesian product of the alphabet with
/// itself `length` times.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Box<[char]>,
}

impl Alphabet {
    /// Creates an alphabet from the characters of `symbols`, in order.
    ///
    /// # Errors
    /// - [`Error::InvalidAlphabet`] if `symbols` is empty or repeats a
    ///   character.
    pub fn new(symbols: &str) -> Result<Self> {
        let symbols: Box<[char]> = symbols.chars().collect();
        if symbols.is_empty() {
            return Err(Error::InvalidAlphabet {
                reason: "alphabet is empty",
            });
        }

        for (i, c) in symbols.iter().enumerate() {
            if symbols[..i].contains(c) {
                return Err(Error::InvalidAlphabet {
                    reason: "alphabet repeats a symbol",
                });
            }
        }

        Ok(Self { symbols })
    }

    /// The 35 symbol NOID alphabet, see [`NOID_SYMBOLS`].
    #[must_use]
    pub fn noid() -> Self {
        Self {
            symbols: NOID_SYMBOLS.chars().collect(),
        }
    }

    /// Returns the number of symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always `false`; an alphabet holds at least one symbol.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Returns the symbols in order.
    #[must_use]
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Returns `len^length`, or `None` if it overflows a `u32`.
    #[must_use]
    pub fn combinations(&self, length: usize) -> Option<u32> {
        let base = u32::try_from(self.len()).ok()?;
        let exp = u32::try_from(length).ok()?;
        base.checked_pow(exp)
    }

    /// Appends the `length` symbol rendering of `value` to `out`.
    ///
    /// `value` must be below `len^length`; higher digits are dropped.
    pub fn encode_into(&self, mut value: u32, length: usize, out: &mut String) {
        // len() fits u32, checked when the space was sized
        let base = self.len() as u32;
        let mut digits = vec![0_usize; length];
        for digit in digits.iter_mut().rev() {
            *digit = (value % base) as usize;
            value /= base;
        }
        out.extend(digits.into_iter().map(|d| self.symbols[d]));
    }

    /// Returns the `length` symbol rendering of `value`.
    #[must_use]
    pub fn encode(&self, value: u32, length: usize) -> String {
        let mut out = String::with_capacity(length);
        self.encode_into(value, length, &mut out);
        out
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::noid()
    }
}
