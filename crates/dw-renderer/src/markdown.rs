//! Markdown-to-HTML conversion of the rewritten document.

use pulldown_cmark::{Options, Parser, html};

/// Converts the directive-free markdown text to HTML.
///
/// The pipeline hands its output over unmodified; directive fragments are raw
/// HTML blocks as far as the converter is concerned.
pub trait MarkdownConverter: Send + Sync {
    /// Convert markdown to HTML.
    fn to_html(&self, markdown: &str) -> String;
}

/// Markdown extensions enabled during conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkdownOptions {
    /// GitHub style tables.
    pub tables: bool,
    /// `~~strikethrough~~`.
    pub strikethrough: bool,
    /// Footnote references and definitions.
    pub footnotes: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            footnotes: true,
        }
    }
}

impl MarkdownOptions {
    /// Parser options for these extensions.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        let mut options = Options::empty();
        options.set(Options::ENABLE_TABLES, self.tables);
        options.set(Options::ENABLE_STRIKETHROUGH, self.strikethrough);
        options.set(Options::ENABLE_FOOTNOTES, self.footnotes);
        options
    }
}

/// `CommonMark` converter built on pulldown-cmark.
#[derive(Clone, Copy, Debug, Default)]
pub struct CommonMarkConverter {
    options: MarkdownOptions,
}

impl CommonMarkConverter {
    /// Create a converter with the given extensions.
    #[must_use]
    pub fn new(options: MarkdownOptions) -> Self {
        Self { options }
    }
}

impl MarkdownConverter for CommonMarkConverter {
    fn to_html(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options.parser_options());
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}
