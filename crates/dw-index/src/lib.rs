//! File index and path resolution for docweave documents.
//!
//! Directive renderers never touch the filesystem directly. They look targets up
//! in a [`FileIndex`] (the files that belong to the document being rendered) and
//! turn indexed paths into links with a [`PathProvider`].
//!
//! # Architecture
//!
//! The crate provides:
//! - [`FileIndex`] trait with `files()`, `get()` and `files_under()`
//! - [`FsFileIndex`] built by scanning a directory on disk
//! - [`MockFileIndex`] for testing (behind `mock` feature flag)
//! - [`PathProvider`] trait and [`DocumentPathProvider`] for link generation
//!
//! # Example
//!
//! ```ignore
//! use dw_index::{DocumentPathProvider, FileIndex, FsFileIndex, PathProvider};
//!
//! let index = FsFileIndex::scan("docs/guides")?;
//! let paths = DocumentPathProvider::relative("guides/setup", "guides");
//! if let Some(file) = index.get("files/manual.pdf") {
//!     println!("{}", paths.route(file.path()));
//! }
//! ```

mod fs;
mod index;
#[cfg(feature = "mock")]
mod mock;
mod path;

pub use fs::FsFileIndex;
pub use index::{FileIndex, IndexError, IndexedFile, normalize_path};
#[cfg(feature = "mock")]
pub use mock::MockFileIndex;
pub use path::{DocumentPathProvider, PathProvider, relative_path};
