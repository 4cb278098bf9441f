//! Content provider trait and closure-backed implementation.

use std::io::{Read, Seek};
use std::path::Path;
use std::time::SystemTime;

use crate::error::{ContentError, ContentErrorKind};

/// A readable and seekable view of content bytes.
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek + ?Sized> ReadSeek for T {}

/// Lazy, typed accessor over a byte source.
///
/// Each accessor is evaluated on demand and fails independently of the others:
/// a provider whose bytes are unreadable may still report a mime type. Nothing is
/// cached by the provider itself.
///
/// Implementations must be safe to query concurrently from multiple threads.
/// Consistency of the backing store during a [`data`](Self::data) call (e.g. the
/// file not being truncated) is the caller's responsibility.
pub trait ContentProvider: Send + Sync {
    /// Media type of the content (e.g., `"image/png"`).
    fn mime_type(&self) -> Result<String, ContentError>;

    /// Lowercase hex SHA-256 digest of the content bytes.
    ///
    /// Identical bytes always produce the same hash, regardless of backend.
    fn hash(&self) -> Result<String, ContentError>;

    /// Last modification time of the content.
    fn last_modified(&self) -> Result<SystemTime, ContentError>;

    /// Run `reader` against a seekable view of the content bytes.
    ///
    /// The view is acquired before the callback runs and released when it
    /// returns, whether it succeeded or failed. Errors from either side are
    /// returned to the caller.
    fn data(
        &self,
        reader: &mut dyn FnMut(&mut dyn ReadSeek) -> Result<(), ContentError>,
    ) -> Result<(), ContentError>;
}

/// Convenience helpers built on [`ContentProvider::data`].
pub trait ContentProviderExt: ContentProvider {
    /// Run `f` against the content view and return its result.
    fn with_data<T>(
        &self,
        f: impl FnOnce(&mut dyn ReadSeek) -> Result<T, ContentError>,
    ) -> Result<T, ContentError> {
        let mut f = Some(f);
        let mut out = None;
        self.data(&mut |view| {
            if let Some(f) = f.take() {
                out = Some(f(view)?);
            }
            Ok(())
        })?;
        out.ok_or_else(|| {
            ContentError::new(ContentErrorKind::Other)
                .with_source(std::io::Error::other("content reader was never invoked"))
        })
    }

    /// Read the whole content into memory.
    fn read_to_vec(&self) -> Result<Vec<u8>, ContentError> {
        self.with_data(|view| {
            let mut buf = Vec::new();
            view.read_to_end(&mut buf)?;
            Ok(buf)
        })
    }

    /// Read the whole content as UTF-8 text.
    fn read_to_string(&self) -> Result<String, ContentError> {
        let bytes = self.read_to_vec()?;
        String::from_utf8(bytes)
            .map_err(|e| ContentError::new(ContentErrorKind::InvalidData).with_source(e))
    }
}

impl<P: ContentProvider + ?Sized> ContentProviderExt for P {}

/// Guess a media type from a file path, falling back to `application/octet-stream`.
pub fn mime_for(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_owned()
}

type MimeTypeFn = dyn Fn() -> Result<String, ContentError> + Send + Sync;
type HashFn = dyn Fn() -> Result<String, ContentError> + Send + Sync;
type LastModifiedFn = dyn Fn() -> Result<SystemTime, ContentError> + Send + Sync;
type DataFn = dyn Fn(&mut dyn FnMut(&mut dyn ReadSeek) -> Result<(), ContentError>) -> Result<(), ContentError>
    + Send
    + Sync;

/// Content provider assembled from four independent closures.
///
/// Useful when each accessor is backed by a different source, e.g. a hash
/// recorded in an index next to bytes fetched on demand.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use std::time::SystemTime;
/// use dw_content::{ContentProvider, ContentProviderExt, FnContentProvider};
///
/// let content = FnContentProvider::new(
///     || Ok("text/csv".to_owned()),
///     || Ok("cafe".to_owned()),
///     || Ok(SystemTime::UNIX_EPOCH),
///     |reader| reader(&mut Cursor::new(b"a;b\n1;2".as_slice())),
/// );
///
/// assert_eq!(content.mime_type().unwrap(), "text/csv");
/// assert_eq!(content.read_to_string().unwrap(), "a;b\n1;2");
/// ```
pub struct FnContentProvider {
    mime_type: Box<MimeTypeFn>,
    hash: Box<HashFn>,
    last_modified: Box<LastModifiedFn>,
    data: Box<DataFn>,
}

impl FnContentProvider {
    /// Create a provider from its four accessors.
    pub fn new<M, H, L, D>(mime_type: M, hash: H, last_modified: L, data: D) -> Self
    where
        M: Fn() -> Result<String, ContentError> + Send + Sync + 'static,
        H: Fn() -> Result<String, ContentError> + Send + Sync + 'static,
        L: Fn() -> Result<SystemTime, ContentError> + Send + Sync + 'static,
        D: Fn(&mut dyn FnMut(&mut dyn ReadSeek) -> Result<(), ContentError>) -> Result<(), ContentError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            mime_type: Box::new(mime_type),
            hash: Box::new(hash),
            last_modified: Box::new(last_modified),
            data: Box::new(data),
        }
    }
}

impl std::fmt::Debug for FnContentProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnContentProvider").finish_non_exhaustive()
    }
}

impl ContentProvider for FnContentProvider {
    fn mime_type(&self) -> Result<String, ContentError> {
        (self.mime_type)()
    }

    fn hash(&self) -> Result<String, ContentError> {
        (self.hash)()
    }

    fn last_modified(&self) -> Result<SystemTime, ContentError> {
        (self.last_modified)()
    }

    fn data(
        &self,
        reader: &mut dyn FnMut(&mut dyn ReadSeek) -> Result<(), ContentError>,
    ) -> Result<(), ContentError> {
        (self.data)(reader)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, SeekFrom};

    use super::*;

    fn failing_data_provider() -> FnContentProvider {
        FnContentProvider::new(
            || Ok("application/pdf".to_owned()),
            || Err(ContentError::not_found("remote.pdf")),
            || Ok(SystemTime::UNIX_EPOCH),
            |_| Err(ContentError::not_found("remote.pdf")),
        )
    }

    #[test]
    fn test_accessors_fail_independently() {
        let content = failing_data_provider();

        assert_eq!(content.mime_type().unwrap(), "application/pdf");
        assert_eq!(content.last_modified().unwrap(), SystemTime::UNIX_EPOCH);
        assert_eq!(
            content.hash().unwrap_err().kind,
            ContentErrorKind::NotFound
        );
        assert_eq!(
            content.read_to_vec().unwrap_err().kind,
            ContentErrorKind::NotFound
        );
    }

    #[test]
    fn test_reader_error_propagates() {
        let content = FnContentProvider::new(
            || Ok("text/plain".to_owned()),
            || Ok(String::new()),
            || Ok(SystemTime::UNIX_EPOCH),
            |reader| reader(&mut Cursor::new(b"abc".as_slice())),
        );

        let err = content
            .with_data(|_| -> Result<(), ContentError> {
                Err(ContentError::new(ContentErrorKind::InvalidData))
            })
            .unwrap_err();

        assert_eq!(err.kind, ContentErrorKind::InvalidData);
    }

    #[test]
    fn test_reader_never_invoked_is_error() {
        let content = FnContentProvider::new(
            || Ok("text/plain".to_owned()),
            || Ok(String::new()),
            || Ok(SystemTime::UNIX_EPOCH),
            |_| Ok(()),
        );

        assert!(content.read_to_vec().is_err());
    }

    #[test]
    fn test_with_data_can_seek() {
        let content = FnContentProvider::new(
            || Ok("text/plain".to_owned()),
            || Ok(String::new()),
            || Ok(SystemTime::UNIX_EPOCH),
            |reader| reader(&mut Cursor::new(b"header,body".as_slice())),
        );

        let tail = content
            .with_data(|view| {
                view.seek(SeekFrom::Start(7))?;
                let mut s = String::new();
                view.read_to_string(&mut s)?;
                Ok(s)
            })
            .unwrap();

        assert_eq!(tail, "body");
    }

    #[test]
    fn test_read_to_string_rejects_invalid_utf8() {
        let content = FnContentProvider::new(
            || Ok("text/plain".to_owned()),
            || Ok(String::new()),
            || Ok(SystemTime::UNIX_EPOCH),
            |reader| reader(&mut Cursor::new([0xff_u8, 0xfe].as_slice())),
        );

        assert_eq!(
            content.read_to_string().unwrap_err().kind,
            ContentErrorKind::InvalidData
        );
    }

    #[test]
    fn test_mime_for_known_types() {
        assert_eq!(mime_for(Path::new("clip.mp4")), "video/mp4");
        assert_eq!(mime_for(Path::new("photo.PNG")), "image/png");
        assert_eq!(mime_for(Path::new("report.pdf")), "application/pdf");
        assert_eq!(mime_for(Path::new("data.csv")), "text/csv");
    }

    #[test]
    fn test_mime_for_unknown_type() {
        assert_eq!(
            mime_for(Path::new("blob.unknownext")),
            "application/octet-stream"
        );
        assert_eq!(mime_for(Path::new("Makefile")), "application/octet-stream");
    }
}
