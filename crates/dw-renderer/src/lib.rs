//! Directive rendering pipeline for docweave markdown documents.
//!
//! Markdown documents may embed *directives*, one per directive family:
//!
//! ```text
//! imagegallery: [Holiday](gallery/2024)
//! files: [Downloads](files)
//! csv: [Budget](data/budget.csv)
//! pdf: [Manual](files/manual.pdf)
//! video: [Demo](https://www.youtube.com/watch?v=abc123)
//! ```
//!
//! Each family is handled by one [`Renderer`]: a stateless text-to-text strategy
//! object that finds the family's directives, classifies each target into a
//! closed set of variants and substitutes an HTML fragment. The
//! [`RendererPipeline`] applies the renderers in a fixed order (gallery, file
//! links, csv, pdf, video) and [`DocumentRenderer`] hands the result to a
//! [`MarkdownConverter`].
//!
//! # Example
//!
//! ```
//! use dw_index::{DocumentPathProvider, MockFileIndex};
//! use dw_renderer::{DocumentRenderer, RenderContext};
//!
//! let index = MockFileIndex::new();
//! let paths = DocumentPathProvider::default();
//! let renderer = DocumentRenderer::default();
//!
//! let html = renderer.preprocess(
//!     "video: [Demo](https://www.youtube.com/watch?v=abc123)",
//!     RenderContext::new(&index, &paths),
//! );
//! assert!(html.contains(r#"src="http://www.youtube.com/embed/abc123""#));
//! ```

mod context;
mod document;
pub mod families;
mod html;
mod markdown;
mod options;
mod pattern;
mod pipeline;
mod renderer;
mod substitute;

pub use context::RenderContext;
pub use document::DocumentRenderer;
pub use html::{escape_directive, escape_html, fallback_link};
pub use markdown::{CommonMarkConverter, MarkdownConverter, MarkdownOptions};
pub use options::{PdfViewerSize, PlayerSize, RenderOptions};
pub use pattern::{DirectivePattern, DirectivePatterns, Occurrence, Scan};
pub use pipeline::{PipelineOutput, RendererPipeline};
pub use renderer::Renderer;
pub use substitute::{Substitution, substitute};
