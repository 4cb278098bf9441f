//! Mock file index for testing.
//!
//! Provides [`MockFileIndex`] for unit testing renderers without filesystem access.

use std::sync::Arc;

use dw_content::{ContentProvider, MemoryContent};

use crate::index::{FileIndex, IndexedFile, normalize_path};

/// In-memory file index for testing.
///
/// Use the builder methods to configure the mock with test data.
///
/// # Example
///
/// ```ignore
/// use dw_index::{FileIndex, MockFileIndex};
///
/// let index = MockFileIndex::new()
///     .with_file("gallery/one.png", vec![0x89, b'P'])
///     .with_file("data/table.csv", "a;b\n1;2");
///
/// assert_eq!(index.files_under("gallery").len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockFileIndex {
    files: Vec<IndexedFile>,
}

impl MockFileIndex {
    /// Create a new empty mock index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an in-memory file; the mime type is guessed from `path`.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a relative path (URL or `..` traversal).
    #[must_use]
    pub fn with_file(self, path: &str, bytes: impl Into<Vec<u8>>) -> Self {
        let content = MemoryContent::new(path, bytes);
        self.with_content(path, Arc::new(content))
    }

    /// Add a file backed by an arbitrary content provider.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a relative path (URL or `..` traversal).
    #[must_use]
    pub fn with_content(mut self, path: &str, content: Arc<dyn ContentProvider>) -> Self {
        let path = normalize_path(path).expect("mock file path must be relative");
        self.files.retain(|f| f.path() != path);
        self.files.push(IndexedFile::new(path, content));
        self.files.sort_by(|a, b| a.path().cmp(b.path()));
        self
    }
}

impl FileIndex for MockFileIndex {
    fn files(&self) -> &[IndexedFile] {
        &self.files
    }
}
