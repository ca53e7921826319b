use std::collections::HashSet;
use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Cursor, Document, Error, IdentifierSpace, Minter, RandSource, Resource, ResourceKind, Result,
    ThreadRandom,
};

/// The default [`Minter`]: draws tokens from a private [`Cursor`] and skips
/// any identifier the document already holds.
///
/// ## Features
/// - ✅ Collision-free within its document
/// - ✅ Non-sequential looking tokens
/// - ❌ Not thread-safe on its own (share it through [`crate::SharedMinter`])
///
/// # Example
/// ```
/// use noid_minter::{
///     DocumentMinter, IdentifierSpace, Minter,
///     model::{Canvas, Manifest},
/// };
/// use std::sync::Arc;
///
/// let space = Arc::new(IdentifierSpace::noid()?);
/// let manifest = Manifest::new("https://example.org/iiif/book1")
///     .with_canvas(Canvas::new("https://example.org/iiif/book1/canvas-kfb9"));
///
/// let mut minter = DocumentMinter::from_document(space, &manifest)?;
/// let id = minter.mint_canvas_id()?;
/// assert!(id.starts_with("https://example.org/iiif/book1/canvas-"));
/// assert_ne!(id, "https://example.org/iiif/book1/canvas-kfb9");
/// # Ok::<(), noid_minter::Error>(())
/// ```
#[derive(Debug)]
pub struct DocumentMinter {
    document_id: String,
    cursor: Cursor,
    existing: HashSet<String>,
    issued: HashSet<String>,
    duplicates: usize,
}

impl DocumentMinter {
    /// Creates a minter that knows nothing about the document's existing
    /// identifiers.
    pub fn new(space: Arc<IdentifierSpace>, document_id: impl Into<String>) -> Self {
        Self::with_rng(space, document_id, &ThreadRandom)
    }

    /// Like [`Self::new`], drawing the cursor's start and stride from `rng`.
    pub fn with_rng<R>(space: Arc<IdentifierSpace>, document_id: impl Into<String>, rng: &R) -> Self
    where
        R: RandSource + ?Sized,
    {
        let document_id = document_id.into();
        let cursor = Cursor::new(space, rng);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            document = %document_id,
            start = cursor.start(),
            skip = cursor.stride(),
            "created minter"
        );

        Self {
            document_id,
            cursor,
            existing: HashSet::new(),
            issued: HashSet::new(),
            duplicates: 0,
        }
    }

    /// Creates a minter for `document`, recording the identifiers of its
    /// canvases, ranges, annotation pages, and annotations so they are never
    /// minted again.
    ///
    /// # Errors
    /// - [`Error::DuplicateCanvas`] if two canvases share an identifier.
    ///   Other repeated identifiers are logged and tolerated.
    pub fn from_document<D>(space: Arc<IdentifierSpace>, document: &D) -> Result<Self>
    where
        D: Document + ?Sized,
    {
        Self::from_document_with_rng(space, document, &ThreadRandom)
    }

    /// Like [`Self::from_document`], drawing the cursor's start and stride
    /// from `rng`.
    ///
    /// # Errors
    /// See [`Self::from_document`].
    pub fn from_document_with_rng<D, R>(
        space: Arc<IdentifierSpace>,
        document: &D,
        rng: &R,
    ) -> Result<Self>
    where
        D: Document + ?Sized,
        R: RandSource + ?Sized,
    {
        let mut minter = Self::with_rng(space, document.id(), rng);
        minter.record_existing(document)?;
        Ok(minter)
    }

    /// Creates a minter around an explicit cursor. Mostly useful in tests
    /// that need a known traversal.
    pub fn from_cursor(cursor: Cursor, document_id: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            cursor,
            existing: HashSet::new(),
            issued: HashSet::new(),
            duplicates: 0,
        }
    }

    /// The number of identifiers that existed in the document when the minter
    /// was created.
    #[must_use]
    pub fn existing(&self) -> usize {
        self.existing.len()
    }

    /// The number of identifiers this minter has handed out.
    #[must_use]
    pub fn issued(&self) -> usize {
        self.issued.len()
    }

    /// The number of repeated (non-canvas) identifiers found in the document.
    #[must_use]
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    fn record_existing<D>(&mut self, document: &D) -> Result<()>
    where
        D: Document + ?Sized,
    {
        for canvas in document.canvases() {
            if !self.existing.insert(canvas.id().to_owned()) {
                return Err(Error::DuplicateCanvas {
                    id: canvas.id().to_owned(),
                });
            }

            for page in canvas.painting_pages().chain(canvas.supplementing_pages()) {
                self.record(page.id());
                for annotation in page.annotations() {
                    self.record(annotation.id());
                }
            }
        }

        for range in document.ranges() {
            self.record(range.id());
        }

        Ok(())
    }

    fn record(&mut self, id: &str) {
        if !self.existing.insert(id.to_owned()) {
            self.duplicates += 1;

            #[cfg(feature = "tracing")]
            tracing::warn!(document = %self.document_id, id, "duplicate identifier in document");
        }
    }

    /// Pulls tokens until one renders to an unused identifier. Annotation
    /// pages are namespaced under their canvas, everything else under the
    /// document.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    fn mint(&mut self, kind: ResourceKind, canvas: Option<&str>) -> Result<String> {
        let namespace = canvas.unwrap_or(&self.document_id);

        while self.cursor.has_next() {
            let token = self.cursor.try_next()?;
            let id = kind.format(namespace, &token);

            if self.existing.contains(&id) || self.issued.contains(&id) {
                #[cfg(feature = "tracing")]
                tracing::trace!(id = %id, "skipping identifier already in use");
                continue;
            }

            self.issued.insert(id.clone());

            #[cfg(feature = "tracing")]
            tracing::trace!(id = %id, "minted");

            return Ok(id);
        }

        Err(Self::cold_exhausted(&self.document_id, kind))
    }

    #[cold]
    #[inline(never)]
    fn cold_exhausted(document: &str, kind: ResourceKind) -> Error {
        #[cfg(feature = "tracing")]
        tracing::warn!(document, %kind, "identifier space exhausted");

        Error::MintingExhausted {
            document: document.to_owned(),
            kind,
        }
    }
}

impl Minter for DocumentMinter {
    fn document_id(&self) -> &str {
        &self.document_id
    }

    fn mint_canvas_id(&mut self) -> Result<String> {
        self.mint(ResourceKind::Canvas, None)
    }

    fn mint_range_id(&mut self) -> Result<String> {
        self.mint(ResourceKind::Range, None)
    }

    fn mint_annotation_id(&mut self) -> Result<String> {
        self.mint(ResourceKind::Annotation, None)
    }

    fn mint_annotation_page_id(&mut self, canvas: &dyn Resource) -> Result<String> {
        self.mint(ResourceKind::AnnotationPage, Some(canvas.id()))
    }

    fn size(&self) -> usize {
        self.cursor.total()
    }

    fn remaining(&self) -> usize {
        self.size()
            .saturating_sub(self.issued.len() + self.existing.len())
    }

    fn has_next(&self) -> bool {
        self.cursor.has_next()
    }
}
