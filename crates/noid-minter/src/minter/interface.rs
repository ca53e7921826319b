use crate::{Resource, Result};
use core::fmt;

/// A minimal interface for minting identifiers inside one document.
///
/// Implementations are bound to a single document identity and must never
/// hand out an identifier that already exists in the document or that they
/// have handed out before. They are not expected to be `Sync`; callers share
/// a minter through [`crate::SharedMinter`].
pub trait Minter: Send + fmt::Debug {
    /// The identifier of the document this minter is bound to.
    fn document_id(&self) -> &str;

    /// Mints `{document}/canvas-{token}`.
    ///
    /// # Errors
    /// - [`crate::Error::MintingExhausted`] if no unused token is left.
    fn mint_canvas_id(&mut self) -> Result<String>;

    /// Mints `{document}/range-{token}`.
    ///
    /// # Errors
    /// - [`crate::Error::MintingExhausted`] if no unused token is left.
    fn mint_range_id(&mut self) -> Result<String>;

    /// Mints `{document}/annotations/anno-{token}`.
    ///
    /// # Errors
    /// - [`crate::Error::MintingExhausted`] if no unused token is left.
    fn mint_annotation_id(&mut self) -> Result<String>;

    /// Mints `{canvas}/anno-page-{token}` for a page hanging off `canvas`.
    ///
    /// # Errors
    /// - [`crate::Error::MintingExhausted`] if no unused token is left.
    fn mint_annotation_page_id(&mut self, canvas: &dyn Resource) -> Result<String>;

    /// The total number of tokens in the identifier space.
    fn size(&self) -> usize;

    /// `size()` minus the identifiers already minted and those that existed
    /// in the document beforehand.
    fn remaining(&self) -> usize;

    /// Whether the minter still has tokens to draw from.
    fn has_next(&self) -> bool;
}
