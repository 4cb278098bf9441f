//! File link list directives.
//!
//! ```text
//! files: [Downloads](files)
//! ```

use crate::context::RenderContext;
use crate::html::{escape_directive, escape_html, fallback_link};
use crate::pattern::DirectivePattern;
use crate::renderer::Renderer;
use crate::substitute::{Substitution, substitute};

/// A file listed by a file links directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileLink {
    /// Link to the file from the current document.
    pub route: String,
    /// File name used as link text.
    pub name: String,
}

/// Classified target of a file links directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilesTarget {
    /// Folder holding at least one indexed file.
    FileList {
        /// Files in index path order.
        files: Vec<FileLink>,
    },
    /// Anything else.
    ExternalLink {
        /// Target as written in the directive.
        path: String,
    },
}

/// Classify a file links target against the document's file index.
#[must_use]
pub fn classify_files(target: &str, ctx: &RenderContext<'_>) -> FilesTarget {
    let files: Vec<FileLink> = ctx
        .index
        .files_under(target)
        .into_iter()
        .map(|file| FileLink {
            route: ctx.route(file),
            name: file.name().to_owned(),
        })
        .collect();

    if files.is_empty() {
        FilesTarget::ExternalLink {
            path: target.to_owned(),
        }
    } else {
        FilesTarget::FileList { files }
    }
}

/// Render a classified file links target.
#[must_use]
pub fn render_files(title: &str, target: &FilesTarget) -> String {
    let files = match target {
        FilesTarget::FileList { files } => files,
        FilesTarget::ExternalLink { path } => return fallback_link(title, path),
    };

    let items: Vec<String> = files
        .iter()
        .map(|file| {
            let name = escape_html(&file.name);
            let route = escape_html(&file.route);
            format!("<li><a href=\"{route}\" target=\"_blank\" title=\"{name}\">{name}</a></li>")
        })
        .collect();

    let title = escape_directive(title);
    format!(
        "<section class=\"filelinks\">\n<h1>{title}</h1>\n<ol>\n{}\n</ol>\n</section>",
        items.join("\n")
    )
}

/// Renderer for `files:` directives.
#[derive(Debug)]
pub struct FileLinksRenderer<'a> {
    pattern: &'a DirectivePattern,
    ctx: RenderContext<'a>,
}

impl<'a> FileLinksRenderer<'a> {
    /// Create a file links renderer for one document.
    #[must_use]
    pub fn new(pattern: &'a DirectivePattern, ctx: RenderContext<'a>) -> Self {
        Self { pattern, ctx }
    }
}

impl Renderer for FileLinksRenderer<'_> {
    fn name(&self) -> &'static str {
        "files"
    }

    fn substitute(&self, text: &str) -> Substitution {
        substitute(text, self.pattern, |o| {
            render_files(&o.title, &classify_files(&o.target, &self.ctx))
        })
    }
}
