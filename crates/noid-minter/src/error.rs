use crate::ResourceKind;

/// A result type defaulting to the crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `noid-minter` can emit.
///
/// Every minting failure names the document it was raised for and, where it
/// applies, the kind of resource that was requested. Nothing in this crate
/// retries on error beyond skipping identifiers that already exist.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The alphabet used to build an identifier space is empty or repeats a
    /// symbol.
    #[error("invalid alphabet: {reason}")]
    InvalidAlphabet { reason: &'static str },

    /// Tokens must be at least one symbol long.
    #[error("invalid token length: {length}")]
    InvalidTokenLength { length: usize },

    /// `alphabet^length` does not fit the space's position type.
    #[error("identifier space of {alphabet}^{length} tokens is too large")]
    SpaceTooLarge { alphabet: usize, length: usize },

    /// The generated identifier space does not hold exactly `alphabet^length`
    /// tokens. This is an integrity failure and the space must not be used.
    #[error("identifier space holds {actual} tokens, expected {expected}")]
    SpaceIntegrity { expected: usize, actual: usize },

    /// A traversal cursor was advanced after it produced every token.
    #[error("traversal cursor exhausted after {count} tokens")]
    IndexExhausted { count: usize },

    /// Two canvases in the same document share an identifier.
    #[error("duplicate canvas identifier: {id}")]
    DuplicateCanvas { id: String },

    /// No unused identifier is left for the requested resource kind.
    #[error("no {kind} identifiers left to mint for {document}")]
    MintingExhausted { document: String, kind: ResourceKind },

    /// No minter provider is registered under the configured key.
    #[error("no minter implementation registered as `{key}`")]
    UnknownMinter { key: String },

    /// The provider exists but cannot build a minter from the given input
    /// (`"document"` or `"identifier"`).
    #[error("minter implementation `{key}` cannot be constructed from a {input}")]
    UnsupportedConstruction { key: String, input: &'static str },

    /// The configured minter implementation failed to construct.
    #[error("failed to construct minter `{implementation}`: {source}")]
    MinterConstructionFailed {
        implementation: String,
        #[source]
        source: Box<Error>,
    },

    /// An identifier is not an absolute URI, or not an HTTPS one when that is
    /// required.
    #[cfg_attr(docsrs, doc(cfg(feature = "uri")))]
    #[cfg(feature = "uri")]
    #[error("invalid identifier `{id}`: {reason}")]
    InvalidIdentifier { id: String, reason: String },

    /// The registry lock was **poisoned** by a panicking thread.
    ///
    /// When the `parking-lot` feature is enabled, mutexes do **not** poison,
    /// so this variant is not available.
    #[cfg_attr(docsrs, doc(cfg(not(feature = "parking-lot"))))]
    #[cfg(not(feature = "parking-lot"))]
    #[error("lock poisoned")]
    LockPoisoned,
}

impl Error {
    /// Wraps a provider failure for the implementation registered as `key`.
    pub(crate) fn construction(implementation: &str, source: Self) -> Self {
        Self::MinterConstructionFailed {
            implementation: implementation.to_owned(),
            source: Box::new(source),
        }
    }
}

#[cfg(not(feature = "parking-lot"))]
use crate::mutex::{MutexGuard, PoisonError};
#[cfg(not(feature = "parking-lot"))]
impl<T: ?Sized> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
