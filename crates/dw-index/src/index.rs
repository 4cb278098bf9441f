//! File index trait and indexed file type.

use std::path::PathBuf;
use std::sync::Arc;

use dw_content::{ContentError, ContentProvider};

/// A file belonging to a document, addressed by its index path.
///
/// Index paths are `/`-separated and relative to the index root
/// (e.g. `"files/manual.pdf"`).
#[derive(Clone)]
pub struct IndexedFile {
    path: String,
    content: Arc<dyn ContentProvider>,
}

impl IndexedFile {
    /// Create an indexed file.
    #[must_use]
    pub fn new(path: impl Into<String>, content: Arc<dyn ContentProvider>) -> Self {
        Self {
            path: path.into(),
            content,
        }
    }

    /// Index path (e.g., `"files/manual.pdf"`).
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Final path segment (e.g., `"manual.pdf"`).
    #[must_use]
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Lowercased extension without the leading dot.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.name().rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    /// Content provider for the file bytes.
    #[must_use]
    pub fn content(&self) -> &dyn ContentProvider {
        self.content.as_ref()
    }

    /// Mime type reported by the content provider.
    pub fn mime_type(&self) -> Result<String, ContentError> {
        self.content.mime_type()
    }
}

impl std::fmt::Debug for IndexedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexedFile")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Error returned when an index cannot be built.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// Index root does not exist.
    #[error("Index root not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error while scanning.
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        /// Directory being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// The set of files available to one document.
///
/// Implementations return files sorted by index path.
pub trait FileIndex: Send + Sync {
    /// All indexed files, sorted by path.
    fn files(&self) -> &[IndexedFile];

    /// Look up a single file by a directive target.
    ///
    /// The target is normalized with [`normalize_path`] first; targets that
    /// cannot name an indexed file (URLs, `..` traversal) return `None`.
    fn get(&self, target: &str) -> Option<&IndexedFile> {
        let path = normalize_path(target)?;
        self.files().iter().find(|f| f.path == path)
    }

    /// All files inside `folder` (recursively), sorted by path.
    ///
    /// An empty folder (`""`, `"."`, `"/"`) selects every file.
    fn files_under(&self, folder: &str) -> Vec<&IndexedFile> {
        let Some(folder) = normalize_path(folder) else {
            return Vec::new();
        };
        if folder.is_empty() {
            return self.files().iter().collect();
        }
        let prefix = format!("{folder}/");
        self.files()
            .iter()
            .filter(|f| f.path.starts_with(&prefix))
            .collect()
    }
}

/// Normalize a directive target into an index path.
///
/// Strips surrounding whitespace, leading `./` and `/`, empty and `.` segments.
/// Returns `None` for URLs and for paths containing `..`.
///
/// # Examples
///
/// ```
/// use dw_index::normalize_path;
///
/// assert_eq!(normalize_path("./files//a.pdf").as_deref(), Some("files/a.pdf"));
/// assert_eq!(normalize_path("/gallery/").as_deref(), Some("gallery"));
/// assert_eq!(normalize_path("../secret.txt"), None);
/// assert_eq!(normalize_path("https://example.com/a.pdf"), None);
/// ```
pub fn normalize_path(target: &str) -> Option<String> {
    let target = target.trim();
    if target.contains("://") {
        return None;
    }

    let mut segments = Vec::new();
    for segment in target.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => return None,
            s => segments.push(s),
        }
    }
    Some(segments.join("/"))
}
