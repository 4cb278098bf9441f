//! Filesystem file index.
//!
//! Provides [`FsFileIndex`] for indexing the files that sit next to a document.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dw_content::FileContent;

use crate::index::{FileIndex, IndexError, IndexedFile};

/// File index built by scanning a directory recursively.
///
/// Hidden files and directories (names starting with `.`) are skipped. Each
/// indexed file is backed by a [`FileContent`] provider, so nothing is read
/// until a renderer asks for it.
///
/// # Example
///
/// ```ignore
/// use dw_index::{FileIndex, FsFileIndex};
///
/// let index = FsFileIndex::scan("docs/guides")?;
/// let images = index.files_under("gallery");
/// ```
#[derive(Debug)]
pub struct FsFileIndex {
    root: PathBuf,
    files: Vec<IndexedFile>,
}

impl FsFileIndex {
    /// Scan `root` and index every file below it.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::NotFound`] if `root` doesn't exist and
    /// [`IndexError::Io`] if it can't be listed. Unreadable subdirectories are
    /// skipped with a warning.
    pub fn scan(root: impl Into<PathBuf>) -> Result<Self, IndexError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(IndexError::NotFound(root));
        }

        let entries = fs::read_dir(&root).map_err(|source| IndexError::Io {
            path: root.clone(),
            source,
        })?;

        let mut files = Vec::new();
        Self::collect(entries, "", &mut files);
        files.sort_by(|a, b| a.path().cmp(b.path()));

        tracing::debug!(root = %root.display(), file_count = files.len(), "Indexed files");

        Ok(Self { root, files })
    }

    /// Directory this index was built from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collect(entries: fs::ReadDir, prefix: &str, files: &mut Vec<IndexedFile>) {
        for entry in entries.filter_map(Result::ok) {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }

            let index_path = if prefix.is_empty() {
                name
            } else {
                format!("{prefix}/{name}")
            };
            let path = entry.path();

            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                match fs::read_dir(&path) {
                    Ok(children) => Self::collect(children, &index_path, files),
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable directory");
                    }
                }
            } else {
                files.push(IndexedFile::new(index_path, Arc::new(FileContent::new(path))));
            }
        }
    }
}

impl FileIndex for FsFileIndex {
    fn files(&self) -> &[IndexedFile] {
        &self.files
    }
}
