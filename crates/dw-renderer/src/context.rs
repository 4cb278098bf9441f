//! Per-document rendering context.

use dw_index::{FileIndex, IndexedFile, PathProvider};

/// The file index and path provider of the document being rendered.
///
/// Renderers capture a copy at construction and consult it to resolve
/// directive targets. It borrows both collaborators, so a context (and every
/// renderer built from it) lives no longer than one document render.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    /// Files belonging to the document.
    pub index: &'a dyn FileIndex,
    /// Link generation for indexed files.
    pub paths: &'a dyn PathProvider,
}

impl<'a> RenderContext<'a> {
    /// Create a context from a file index and a path provider.
    #[must_use]
    pub fn new(index: &'a dyn FileIndex, paths: &'a dyn PathProvider) -> Self {
        Self { index, paths }
    }

    /// Link to an indexed file from the current document.
    #[must_use]
    pub fn route(&self, file: &IndexedFile) -> String {
        self.paths.route(file.path())
    }
}

impl std::fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("files", &self.index.files().len())
            .finish_non_exhaustive()
    }
}
