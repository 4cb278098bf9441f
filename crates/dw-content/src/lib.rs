//! Lazy typed content access for docweave.
//!
//! This crate provides the [`ContentProvider`] trait: a uniform, lazily evaluated
//! view over a byte source exposing four independently failable accessors:
//!
//! - [`mime_type`](ContentProvider::mime_type) - media type of the bytes
//! - [`hash`](ContentProvider::hash) - hex SHA-256 digest, stable for identical content
//! - [`last_modified`](ContentProvider::last_modified) - modification timestamp
//! - [`data`](ContentProvider::data) - scoped, seekable read access
//!
//! Providers never cache. Every call goes back to the backing store, so callers
//! own any caching policy.
//!
//! # Implementations
//!
//! - [`MemoryContent`]: in-memory buffer (also used for remotely fetched buffers)
//! - [`FileContent`]: file on disk, reopened on every call
//! - [`FnContentProvider`]: four injected closures
//!
//! # Example
//!
//! ```
//! use dw_content::{ContentProvider, ContentProviderExt, MemoryContent};
//!
//! let content = MemoryContent::new("notes.txt", b"hello".to_vec());
//! assert_eq!(content.mime_type().unwrap(), "text/plain");
//! assert_eq!(content.read_to_string().unwrap(), "hello");
//! ```

mod error;
mod file;
mod hash;
mod memory;
mod provider;

pub use error::{ContentError, ContentErrorKind};
pub use file::FileContent;
pub use hash::sha256_hex;
pub use memory::MemoryContent;
pub use provider::{ContentProvider, ContentProviderExt, FnContentProvider, ReadSeek, mime_for};
