use core::fmt;

/// The kinds of resource a [`crate::Minter`] creates identifiers for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Canvas,
    Range,
    Annotation,
    AnnotationPage,
}

impl ResourceKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Canvas,
        Self::Range,
        Self::Annotation,
        Self::AnnotationPage,
    ];

    /// Renders an identifier for this kind.
    ///
    /// `namespace` is the document identifier, except for
    /// [`ResourceKind::AnnotationPage`] where it is the owning canvas's
    /// identifier.
    ///
    /// # Example
    /// ```
    /// use noid_minter::ResourceKind;
    ///
    /// let doc = "https://example.org/iiif/book1";
    /// assert_eq!(ResourceKind::Canvas.format(doc, "x1x0"), "https://example.org/iiif/book1/canvas-x1x0");
    /// assert_eq!(
    ///     ResourceKind::Annotation.format(doc, "kfb9"),
    ///     "https://example.org/iiif/book1/annotations/anno-kfb9"
    /// );
    /// ```
    #[must_use]
    pub fn format(self, namespace: &str, token: &str) -> String {
        let mut id = String::with_capacity(namespace.len() + self.infix().len() + token.len());
        id.push_str(namespace);
        id.push_str(self.infix());
        id.push_str(token);
        id
    }

    /// The text between the namespace and the token.
    #[must_use]
    pub const fn infix(self) -> &'static str {
        match self {
            Self::Canvas => "/canvas-",
            Self::Range => "/range-",
            Self::Annotation => "/annotations/anno-",
            Self::AnnotationPage => "/anno-page-",
        }
    }

    /// The resource type name, as used in manifest JSON.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Canvas => "Canvas",
            Self::Range => "Range",
            Self::Annotation => "Annotation",
            Self::AnnotationPage => "AnnotationPage",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl core::str::FromStr for ResourceKind {
    type Err = UnknownResourceKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.to_ascii_lowercase().as_str() {
            "canvas" => Self::Canvas,
            "range" => Self::Range,
            "annotation" | "anno" => Self::Annotation,
            "annotationpage" | "annotation-page" | "page" => Self::AnnotationPage,
            _ => return Err(UnknownResourceKind(s.to_owned())),
        };
        Ok(kind)
    }
}

/// Returned when parsing a [`ResourceKind`] from an unrecognized name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownResourceKind(pub String);

impl fmt::Display for UnknownResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown resource kind `{}`", self.0)
    }
}

impl core::error::Error for UnknownResourceKind {}
