//! Read-only views of a document's object graph.
//!
//! Minters only need the identifiers of the resources they can create, so
//! any object model can be plugged in by implementing these traits. The
//! [`crate::model`] types are a minimal implementation.

/// Anything carrying an identifier.
pub trait Resource {
    /// Returns the resource's identifier.
    fn id(&self) -> &str;
}

/// A page of annotations.
pub trait AnnotationPage: Resource {
    /// The annotations on this page.
    fn annotations(&self) -> Box<dyn Iterator<Item = &dyn Resource> + '_>;
}

/// A canvas-like resource that annotation pages hang off.
pub trait CanvasResource: Resource {
    /// Pages of annotations that paint content onto the canvas.
    fn painting_pages(&self) -> Box<dyn Iterator<Item = &dyn AnnotationPage> + '_>;

    /// Pages of annotations that supplement the canvas (transcriptions,
    /// captions, and so on).
    fn supplementing_pages(&self) -> Box<dyn Iterator<Item = &dyn AnnotationPage> + '_>;
}

/// The top-level resource that owns and namespaces minted identifiers.
pub trait Document: Resource {
    /// The document's canvases.
    fn canvases(&self) -> Box<dyn Iterator<Item = &dyn CanvasResource> + '_>;

    /// The document's top-level ranges.
    fn ranges(&self) -> Box<dyn Iterator<Item = &dyn Resource> + '_>;
}

impl Resource for String {
    fn id(&self) -> &str {
        self
    }
}
