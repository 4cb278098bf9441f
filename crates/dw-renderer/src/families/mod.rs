//! Directive families.
//!
//! Each family pairs a pure classifier, which maps a directive target to a
//! closed set of variants, with a [`Renderer`](crate::Renderer) that turns
//! every variant into an HTML fragment.

mod csv;
mod files;
mod gallery;
mod pdf;
mod video;

pub use self::csv::{
    CsvRenderer, CsvTable, CsvTarget, classify_csv, detect_delimiter, parse_csv, render_csv,
};
pub use files::{FileLink, FileLinksRenderer, FilesTarget, classify_files, render_files};
pub use gallery::{GalleryImage, GalleryRenderer, GalleryTarget, classify_gallery, render_gallery};
pub use pdf::{PdfRenderer, PdfTarget, classify_pdf, render_pdf};
pub use video::{VIDEO_EXTENSIONS, VideoRenderer, VideoTarget, classify_video, render_video};
