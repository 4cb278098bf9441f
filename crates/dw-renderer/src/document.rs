//! Document rendering: directive pipeline followed by markdown conversion.

use crate::context::RenderContext;
use crate::markdown::{CommonMarkConverter, MarkdownConverter};
use crate::options::RenderOptions;
use crate::pattern::DirectivePatterns;
use crate::pipeline::{PipelineOutput, RendererPipeline};

/// Renders markdown documents containing directives.
///
/// Holds everything that is shared between documents (patterns, options,
/// converter); the per-document [`RenderContext`] is passed to each call.
pub struct DocumentRenderer {
    patterns: DirectivePatterns,
    options: RenderOptions,
    converter: Box<dyn MarkdownConverter>,
}

impl Default for DocumentRenderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl DocumentRenderer {
    /// Create a renderer with the standard patterns and a `CommonMark` converter.
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        let converter = CommonMarkConverter::new(options.markdown);
        Self {
            patterns: DirectivePatterns::standard(),
            options,
            converter: Box::new(converter),
        }
    }

    /// Replace the markdown converter.
    #[must_use]
    pub fn with_converter(mut self, converter: impl MarkdownConverter + 'static) -> Self {
        self.converter = Box::new(converter);
        self
    }

    /// Replace the directive patterns.
    #[must_use]
    pub fn with_patterns(mut self, patterns: DirectivePatterns) -> Self {
        self.patterns = patterns;
        self
    }

    /// Rendering options.
    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Rewrite directives without converting to HTML.
    ///
    /// Surrounding whitespace is trimmed first.
    #[must_use]
    pub fn preprocess(&self, markdown: &str, ctx: RenderContext<'_>) -> String {
        self.preprocess_with_report(markdown, ctx).text
    }

    /// Rewrite directives and report per-renderer substitution counts.
    #[must_use]
    pub fn preprocess_with_report(&self, markdown: &str, ctx: RenderContext<'_>) -> PipelineOutput {
        RendererPipeline::for_document(ctx, &self.patterns, &self.options)
            .render_with_report(markdown.trim())
    }

    /// Rewrite directives and convert the result to HTML.
    #[must_use]
    pub fn render(&self, markdown: &str, ctx: RenderContext<'_>) -> String {
        let output = self.preprocess_with_report(markdown, ctx);
        tracing::debug!(directives = output.total(), "Rendered directives");
        self.converter.to_html(&output.text)
    }
}

impl std::fmt::Debug for DocumentRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentRenderer")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
