//! In-memory content provider.

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use std::time::SystemTime;

use crate::error::ContentError;
use crate::hash::sha256_hex;
use crate::provider::{ContentProvider, ReadSeek, mime_for};

/// Content backed by an immutable in-memory buffer.
///
/// Cloning is cheap: the bytes are shared. Buffers fetched from a remote source
/// are wrapped with [`MemoryContent::fetched`] so consumers never see where the
/// bytes came from.
#[derive(Clone, Debug)]
pub struct MemoryContent {
    mime_type: String,
    bytes: Arc<[u8]>,
    last_modified: SystemTime,
}

impl MemoryContent {
    /// Create content for a named buffer, guessing the mime type from `name`.
    ///
    /// The modification time is the moment of construction.
    #[must_use]
    pub fn new(name: impl AsRef<Path>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            mime_type: mime_for(name.as_ref()),
            bytes: bytes.into().into(),
            last_modified: SystemTime::now(),
        }
    }

    /// Wrap a buffer fetched from elsewhere, with the metadata reported by its source.
    #[must_use]
    pub fn fetched(
        mime_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
        last_modified: SystemTime,
    ) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes: bytes.into().into(),
            last_modified,
        }
    }

    /// Override the mime type.
    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    /// Override the modification time.
    #[must_use]
    pub fn with_last_modified(mut self, last_modified: SystemTime) -> Self {
        self.last_modified = last_modified;
        self
    }

    /// Size of the buffer in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl ContentProvider for MemoryContent {
    fn mime_type(&self) -> Result<String, ContentError> {
        Ok(self.mime_type.clone())
    }

    fn hash(&self) -> Result<String, ContentError> {
        Ok(sha256_hex(&mut &self.bytes[..])?)
    }

    fn last_modified(&self) -> Result<SystemTime, ContentError> {
        Ok(self.last_modified)
    }

    fn data(
        &self,
        reader: &mut dyn FnMut(&mut dyn ReadSeek) -> Result<(), ContentError>,
    ) -> Result<(), ContentError> {
        let mut view = Cursor::new(&self.bytes[..]);
        reader(&mut view).map_err(|e| e.with_backend("Memory"))
    }
}
