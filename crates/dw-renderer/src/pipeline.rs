//! Ordered chain of directive renderers.

use crate::context::RenderContext;
use crate::families::{CsvRenderer, FileLinksRenderer, GalleryRenderer, PdfRenderer, VideoRenderer};
use crate::options::RenderOptions;
use crate::pattern::DirectivePatterns;
use crate::renderer::Renderer;

/// Pipeline output with per-renderer substitution counts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PipelineOutput {
    /// Rewritten document text.
    pub text: String,
    /// `(renderer name, substitutions)` in pipeline order.
    pub substitutions: Vec<(&'static str, usize)>,
}

impl PipelineOutput {
    /// Total number of directives replaced.
    #[must_use]
    pub fn total(&self) -> usize {
        self.substitutions.iter().map(|(_, count)| count).sum()
    }
}

/// Applies renderers in order, each to the previous one's output.
///
/// # Example
///
/// ```
/// use dw_index::{DocumentPathProvider, MockFileIndex};
/// use dw_renderer::{DirectivePatterns, RenderContext, RenderOptions, RendererPipeline};
///
/// let index = MockFileIndex::new().with_file("files/manual.pdf", "%PDF");
/// let paths = DocumentPathProvider::default();
/// let patterns = DirectivePatterns::standard();
/// let options = RenderOptions::default();
/// let pipeline =
///     RendererPipeline::for_document(RenderContext::new(&index, &paths), &patterns, &options);
///
/// assert_eq!(pipeline.names(), ["imagegallery", "files", "csv", "pdf", "video"]);
/// let output = pipeline.render_with_report("pdf: [Manual](files/manual.pdf)");
/// assert_eq!(output.total(), 1);
/// ```
#[derive(Default)]
pub struct RendererPipeline<'a> {
    renderers: Vec<Box<dyn Renderer + 'a>>,
}

impl<'a> RendererPipeline<'a> {
    /// Create an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a renderer.
    #[must_use]
    pub fn with_renderer(mut self, renderer: impl Renderer + 'a) -> Self {
        self.renderers.push(Box::new(renderer));
        self
    }

    /// The standard chain for one document: gallery, file links, csv, pdf, video.
    #[must_use]
    pub fn for_document(
        ctx: RenderContext<'a>,
        patterns: &'a DirectivePatterns,
        options: &RenderOptions,
    ) -> Self {
        Self::new()
            .with_renderer(GalleryRenderer::new(&patterns.gallery, ctx))
            .with_renderer(FileLinksRenderer::new(&patterns.files, ctx))
            .with_renderer(CsvRenderer::new(&patterns.csv, ctx, options.csv_delimiter))
            .with_renderer(PdfRenderer::new(&patterns.pdf, ctx, options.pdf.clone()))
            .with_renderer(VideoRenderer::new(
                &patterns.video,
                &patterns.youtube,
                ctx,
                options.video,
            ))
    }

    /// Renderer names in application order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.renderers.iter().map(|r| r.name()).collect()
    }

    /// Rewrite every directive in `text`.
    #[must_use]
    pub fn render(&self, text: &str) -> String {
        self.render_with_report(text).text
    }

    /// Rewrite every directive in `text` and report what each renderer did.
    #[must_use]
    pub fn render_with_report(&self, text: &str) -> PipelineOutput {
        let mut output = PipelineOutput {
            text: text.to_owned(),
            substitutions: Vec::with_capacity(self.renderers.len()),
        };

        for renderer in &self.renderers {
            let result = renderer.substitute(&output.text);
            if result.halted {
                tracing::warn!(
                    renderer = renderer.name(),
                    "Malformed directive, later directives of this kind were left as is"
                );
            }
            output.substitutions.push((renderer.name(), result.count));
            output.text = result.text;
        }

        output
    }
}

impl std::fmt::Debug for RendererPipeline<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RendererPipeline")
            .field("renderers", &self.names())
            .finish()
    }
}
