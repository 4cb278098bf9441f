//! Filesystem content provider.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::{ContentError, ContentErrorKind};
use crate::hash::sha256_hex;
use crate::provider::{ContentProvider, ReadSeek, mime_for};

/// Backend identifier for error messages.
const BACKEND: &str = "File";

/// Content backed by a file on disk.
///
/// The file is opened on every call and closed before the call returns.
/// Nothing about the file is remembered between calls.
#[derive(Clone, Debug)]
pub struct FileContent {
    path: PathBuf,
    mime_type: Option<String>,
}

impl FileContent {
    /// Create content for the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mime_type: None,
        }
    }

    /// Use an explicit mime type instead of guessing from the extension.
    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn error(&self, err: std::io::Error) -> ContentError {
        ContentError::io(err, Some(self.path.clone())).with_backend(BACKEND)
    }

    fn metadata(&self) -> Result<fs::Metadata, ContentError> {
        let metadata = fs::metadata(&self.path).map_err(|e| self.error(e))?;
        if metadata.is_dir() {
            return Err(ContentError::new(ContentErrorKind::InvalidPath)
                .with_path(&self.path)
                .with_backend(BACKEND));
        }
        Ok(metadata)
    }
}

impl ContentProvider for FileContent {
    fn mime_type(&self) -> Result<String, ContentError> {
        if let Some(mime_type) = &self.mime_type {
            return Ok(mime_type.clone());
        }
        self.metadata()?;
        Ok(mime_for(&self.path))
    }

    fn hash(&self) -> Result<String, ContentError> {
        tracing::debug!(path = %self.path.display(), "Hashing file content");
        let mut file = File::open(&self.path).map_err(|e| self.error(e))?;
        sha256_hex(&mut file).map_err(|e| self.error(e))
    }

    fn last_modified(&self) -> Result<SystemTime, ContentError> {
        self.metadata()?.modified().map_err(|e| self.error(e))
    }

    fn data(
        &self,
        reader: &mut dyn FnMut(&mut dyn ReadSeek) -> Result<(), ContentError>,
    ) -> Result<(), ContentError> {
        let mut file = File::open(&self.path).map_err(|e| self.error(e))?;
        // `file` is dropped (closed) on every exit path below.
        reader(&mut file)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Seek, SeekFrom};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::memory::MemoryContent;
    use crate::provider::ContentProviderExt;

    fn write_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_file_content_mime_type_from_extension() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_file(temp_dir.path(), "intro.webm", b"");

        assert_eq!(FileContent::new(path).mime_type().unwrap(), "video/webm");
    }

    #[test]
    fn test_file_content_explicit_mime_type_skips_io() {
        let content = FileContent::new("/does/not/exist.bin").with_mime_type("text/csv");

        assert_eq!(content.mime_type().unwrap(), "text/csv");
    }

    #[test]
    fn test_file_content_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let content = FileContent::new(temp_dir.path().join("missing.pdf"));

        let err = content.hash().unwrap_err();
        assert_eq!(err.kind, ContentErrorKind::NotFound);
        assert_eq!(err.backend, Some("File"));

        assert_eq!(
            content.last_modified().unwrap_err().kind,
            ContentErrorKind::NotFound
        );
        assert_eq!(
            content.mime_type().unwrap_err().kind,
            ContentErrorKind::NotFound
        );
        assert_eq!(
            content.read_to_vec().unwrap_err().kind,
            ContentErrorKind::NotFound
        );
    }

    #[test]
    fn test_file_content_directory_is_invalid_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let content = FileContent::new(temp_dir.path());

        assert_eq!(
            content.last_modified().unwrap_err().kind,
            ContentErrorKind::InvalidPath
        );
    }

    #[test]
    fn test_file_content_hash_matches_memory_content() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_file(temp_dir.path(), "table.csv", b"a;b\n1;2\n");

        let on_disk = FileContent::new(path).hash().unwrap();
        let in_memory = MemoryContent::new("table.csv", b"a;b\n1;2\n".to_vec())
            .hash()
            .unwrap();

        assert_eq!(on_disk, in_memory);
    }

    #[test]
    fn test_file_content_hash_tracks_changes() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_file(temp_dir.path(), "notes.txt", b"first");
        let content = FileContent::new(&path);

        let before = content.hash().unwrap();
        fs::write(&path, b"second").unwrap();
        let after = content.hash().unwrap();

        assert_ne!(before, after);
    }

    #[test]
    fn test_file_content_last_modified() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_file(temp_dir.path(), "a.txt", b"x");
        let expected = fs::metadata(&path).unwrap().modified().unwrap();

        assert_eq!(FileContent::new(path).last_modified().unwrap(), expected);
    }

    #[test]
    fn test_file_content_data_is_seekable() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_file(temp_dir.path(), "doc.txt", b"0123456789");

        let tail = FileContent::new(path)
            .with_data(|view| {
                view.seek(SeekFrom::End(-3))?;
                let mut s = String::new();
                view.read_to_string(&mut s)?;
                Ok(s)
            })
            .unwrap();

        assert_eq!(tail, "789");
    }

    #[test]
    fn test_file_content_data_callback_error_propagates() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_file(temp_dir.path(), "doc.txt", b"x");

        let err = FileContent::new(path)
            .with_data(|_| -> Result<(), ContentError> {
                Err(ContentError::new(ContentErrorKind::InvalidData))
            })
            .unwrap_err();

        assert_eq!(err.kind, ContentErrorKind::InvalidData);
    }
}
