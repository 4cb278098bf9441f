//! PDF directives.
//!
//! ```text
//! pdf: [Manual](files/manual.pdf)
//! ```

use crate::context::RenderContext;
use crate::html::{escape_directive, escape_html, fallback_link};
use crate::options::PdfViewerSize;
use crate::pattern::DirectivePattern;
use crate::renderer::Renderer;
use crate::substitute::{Substitution, substitute};

const PDF_MIME_TYPE: &str = "application/pdf";

/// Classified target of a PDF directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PdfTarget {
    /// An indexed PDF file.
    Document {
        /// Link to the file from the current document.
        route: String,
    },
    /// Anything else.
    ExternalLink {
        /// Target as written in the directive.
        path: String,
    },
}

/// Classify a PDF target against the document's file index.
#[must_use]
pub fn classify_pdf(target: &str, ctx: &RenderContext<'_>) -> PdfTarget {
    let document = ctx.index.get(target).filter(|file| match file.mime_type() {
        Ok(mime) => mime == PDF_MIME_TYPE,
        Err(e) => {
            tracing::debug!(path = file.path(), error = %e, "Cannot determine mime type");
            false
        }
    });

    match document {
        Some(file) => PdfTarget::Document {
            route: ctx.route(file),
        },
        None => PdfTarget::ExternalLink {
            path: target.to_owned(),
        },
    }
}

/// Render a classified PDF target.
#[must_use]
pub fn render_pdf(title: &str, target: &PdfTarget, size: &PdfViewerSize) -> String {
    match target {
        PdfTarget::Document { route } => {
            let title = escape_directive(title);
            let route = escape_html(route);
            format!(
                r#"<section class="pdf">
<h1>PDF: {title}</h1>
<p>
<a href="{route}" target="_blank" title="{title}">{route}</a>
</p>
<object data="{route}" type="{PDF_MIME_TYPE}" width="{}" height="{}"></object>
</section>"#,
                size.width, size.height
            )
        }
        PdfTarget::ExternalLink { path } => fallback_link(title, path),
    }
}

/// Renderer for `pdf:` directives.
#[derive(Debug)]
pub struct PdfRenderer<'a> {
    pattern: &'a DirectivePattern,
    ctx: RenderContext<'a>,
    size: PdfViewerSize,
}

impl<'a> PdfRenderer<'a> {
    /// Create a PDF renderer for one document.
    #[must_use]
    pub fn new(pattern: &'a DirectivePattern, ctx: RenderContext<'a>, size: PdfViewerSize) -> Self {
        Self { pattern, ctx, size }
    }
}

impl Renderer for PdfRenderer<'_> {
    fn name(&self) -> &'static str {
        "pdf"
    }

    fn substitute(&self, text: &str) -> Substitution {
        substitute(text, self.pattern, |o| {
            render_pdf(&o.title, &classify_pdf(&o.target, &self.ctx), &self.size)
        })
    }
}
