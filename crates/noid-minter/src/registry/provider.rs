use core::fmt;
use std::sync::Arc;

use crate::{Document, DocumentMinter, Error, IdentifierSpace, Minter, Result};

/// Builds a minter for a document, inspecting its existing identifiers.
pub type DocumentConstructor =
    dyn Fn(Arc<IdentifierSpace>, &dyn Document) -> Result<Box<dyn Minter>> + Send + Sync;

/// Builds a minter from a bare document identifier.
pub type IdentifierConstructor =
    dyn Fn(Arc<IdentifierSpace>, &str) -> Result<Box<dyn Minter>> + Send + Sync;

/// A pluggable minter implementation, registered with a
/// [`crate::MinterRegistry`] under a key.
///
/// A provider is a pair of constructors. Either may be left out, in which
/// case asking the registry for that shape of construction fails with
/// [`Error::UnsupportedConstruction`].
///
/// # Example
/// ```
/// use noid_minter::{DocumentMinter, Minter, MinterProvider};
///
/// let provider = MinterProvider::new()
///     .with_identifier_constructor(|space, id| Ok(Box::new(DocumentMinter::new(space, id)) as Box<dyn Minter>));
/// ```
#[derive(Clone, Default)]
pub struct MinterProvider {
    from_document: Option<Arc<DocumentConstructor>>,
    from_id: Option<Arc<IdentifierConstructor>>,
}

impl MinterProvider {
    /// A provider with no constructors.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in provider, backed by [`DocumentMinter`].
    #[must_use]
    pub fn document_minter() -> Self {
        Self::new()
            .with_document_constructor(|space, document| {
                Ok(Box::new(DocumentMinter::from_document(space, document)?) as Box<dyn Minter>)
            })
            .with_identifier_constructor(|space, id| {
                Ok(Box::new(DocumentMinter::new(space, id)) as Box<dyn Minter>)
            })
    }

    #[must_use]
    pub fn with_document_constructor<F>(mut self, f: F) -> Self
    where
        F: Fn(Arc<IdentifierSpace>, &dyn Document) -> Result<Box<dyn Minter>>
            + Send
            + Sync
            + 'static,
    {
        self.from_document = Some(Arc::new(f));
        self
    }

    #[must_use]
    pub fn with_identifier_constructor<F>(mut self, f: F) -> Self
    where
        F: Fn(Arc<IdentifierSpace>, &str) -> Result<Box<dyn Minter>> + Send + Sync + 'static,
    {
        self.from_id = Some(Arc::new(f));
        self
    }

    pub(crate) fn construct_from_document(
        &self,
        key: &str,
        space: Arc<IdentifierSpace>,
        document: &dyn Document,
    ) -> Result<Box<dyn Minter>> {
        let construct = self
            .from_document
            .as_ref()
            .ok_or_else(|| Error::UnsupportedConstruction {
                key: key.to_owned(),
                input: "document",
            })?;
        construct(space, document)
    }

    pub(crate) fn construct_from_id(
        &self,
        key: &str,
        space: Arc<IdentifierSpace>,
        document_id: &str,
    ) -> Result<Box<dyn Minter>> {
        let construct = self
            .from_id
            .as_ref()
            .ok_or_else(|| Error::UnsupportedConstruction {
                key: key.to_owned(),
                input: "identifier",
            })?;
        construct(space, document_id)
    }
}

impl fmt::Debug for MinterProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MinterProvider")
            .field("from_document", &self.from_document.is_some())
            .field("from_id", &self.from_id.is_some())
            .finish()
    }
}
