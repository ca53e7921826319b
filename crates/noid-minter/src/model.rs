//! A minimal in-memory document model.
//!
//! These types carry identifiers and structure only. With the `serde` feature
//! they read the identifier-bearing subset of presentation manifest JSON and
//! ignore every other property.

use crate::document::{self, CanvasResource, Document, Resource};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single annotation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Annotation {
    pub id: String,
}

/// A page of annotations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnnotationPage {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(rename = "items", default))]
    pub annotations: Vec<Annotation>,
}

/// A canvas with its painting and supplementing annotation pages.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Canvas {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(rename = "items", default))]
    pub painting_pages: Vec<AnnotationPage>,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "annotations", default, skip_serializing_if = "Vec::is_empty")
    )]
    pub supplementing_pages: Vec<AnnotationPage>,
}

/// A range over a manifest's canvases.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Range {
    pub id: String,
}

/// A manifest: the document minted identifiers are namespaced under.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Manifest {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(rename = "items", default))]
    pub canvases: Vec<Canvas>,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "structures", default, skip_serializing_if = "Vec::is_empty")
    )]
    pub ranges: Vec<Range>,
}

impl Annotation {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl AnnotationPage {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            annotations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

impl Canvas {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_painting_page(mut self, page: AnnotationPage) -> Self {
        self.painting_pages.push(page);
        self
    }

    #[must_use]
    pub fn with_supplementing_page(mut self, page: AnnotationPage) -> Self {
        self.supplementing_pages.push(page);
        self
    }
}

impl Range {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Manifest {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_canvas(mut self, canvas: Canvas) -> Self {
        self.canvases.push(canvas);
        self
    }

    #[must_use]
    pub fn with_range(mut self, range: Range) -> Self {
        self.ranges.push(range);
        self
    }
}

macro_rules! impl_resource {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Resource for $ty {
                fn id(&self) -> &str {
                    &self.id
                }
            }
        )+
    };
}

impl_resource!(Annotation, AnnotationPage, Canvas, Range, Manifest);

impl document::AnnotationPage for AnnotationPage {
    fn annotations(&self) -> Box<dyn Iterator<Item = &dyn Resource> + '_> {
        Box::new(self.annotations.iter().map(|a| a as &dyn Resource))
    }
}

impl CanvasResource for Canvas {
    fn painting_pages(&self) -> Box<dyn Iterator<Item = &dyn document::AnnotationPage> + '_> {
        Box::new(
            self.painting_pages
                .iter()
                .map(|p| p as &dyn document::AnnotationPage),
        )
    }

    fn supplementing_pages(
        &self,
    ) -> Box<dyn Iterator<Item = &dyn document::AnnotationPage> + '_> {
        Box::new(
            self.supplementing_pages
                .iter()
                .map(|p| p as &dyn document::AnnotationPage),
        )
    }
}

impl Document for Manifest {
    fn canvases(&self) -> Box<dyn Iterator<Item = &dyn CanvasResource> + '_> {
        Box::new(self.canvases.iter().map(|c| c as &dyn CanvasResource))
    }

    fn ranges(&self) -> Box<dyn Iterator<Item = &dyn Resource> + '_> {
        Box::new(self.ranges.iter().map(|r| r as &dyn Resource))
    }
}
