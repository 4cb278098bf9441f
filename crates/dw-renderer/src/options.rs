//! Rendering options.

use crate::markdown::MarkdownOptions;

/// Embedded video player dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerSize {
    /// Player width.
    pub width: u32,
    /// Player height.
    pub height: u32,
}

impl Default for PlayerSize {
    fn default() -> Self {
        Self {
            width: 560,
            height: 315,
        }
    }
}

/// Embedded PDF viewer dimensions (HTML length values, e.g. `"100%"`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PdfViewerSize {
    /// Viewer width.
    pub width: String,
    /// Viewer height.
    pub height: String,
}

impl Default for PdfViewerSize {
    fn default() -> Self {
        Self {
            width: "100%".to_owned(),
            height: "600".to_owned(),
        }
    }
}

/// Options shared by the directive renderers and the markdown converter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Video player size (YouTube and local files).
    pub video: PlayerSize,
    /// PDF viewer size.
    pub pdf: PdfViewerSize,
    /// CSV field delimiter. Detected from the header line when `None`.
    pub csv_delimiter: Option<u8>,
    /// Markdown extensions.
    pub markdown: MarkdownOptions,
}
