//! Image gallery directives.
//!
//! ```text
//! imagegallery: [Holiday](gallery/2024)
//! ```

use crate::context::RenderContext;
use crate::html::{escape_directive, escape_html, fallback_link};
use crate::pattern::DirectivePattern;
use crate::renderer::Renderer;
use crate::substitute::{Substitution, substitute};

/// An image linked from a gallery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GalleryImage {
    /// Link to the image from the current document.
    pub route: String,
    /// File name shown as tooltip and alt text.
    pub name: String,
}

/// Classified target of an image gallery directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GalleryTarget {
    /// Folder holding at least one image.
    Gallery {
        /// Images in index path order.
        images: Vec<GalleryImage>,
    },
    /// Anything else.
    ExternalLink {
        /// Target as written in the directive.
        path: String,
    },
}

/// Classify an image gallery target against the document's file index.
///
/// Images are indexed files under the target folder whose content reports an
/// `image/*` mime type.
#[must_use]
pub fn classify_gallery(target: &str, ctx: &RenderContext<'_>) -> GalleryTarget {
    let images: Vec<GalleryImage> = ctx
        .index
        .files_under(target)
        .into_iter()
        .filter(|file| match file.mime_type() {
            Ok(mime) => mime.starts_with("image/"),
            Err(e) => {
                tracing::debug!(path = file.path(), error = %e, "Skipping file without mime type");
                false
            }
        })
        .map(|file| GalleryImage {
            route: ctx.route(file),
            name: file.name().to_owned(),
        })
        .collect();

    if images.is_empty() {
        return GalleryTarget::ExternalLink {
            path: target.to_owned(),
        };
    }
    GalleryTarget::Gallery { images }
}

/// Render a classified gallery target.
#[must_use]
pub fn render_gallery(title: &str, target: &GalleryTarget) -> String {
    match target {
        GalleryTarget::Gallery { images } => {
            let title = escape_directive(title);
            let mut html = format!("<section class=\"imagegallery\">\n<h1>{title}</h1>\n<ol>\n");
            for image in images {
                let name = escape_html(&image.name);
                let route = escape_html(&image.route);
                html.push_str(&format!(
                    "<li><a href=\"{route}\" title=\"{name}\"><img src=\"{route}\" alt=\"{name}\"/></a></li>\n"
                ));
            }
            html.push_str("</ol>\n</section>");
            html
        }
        GalleryTarget::ExternalLink { path } => fallback_link(title, path),
    }
}

/// Renderer for `imagegallery:` directives.
#[derive(Debug)]
pub struct GalleryRenderer<'a> {
    pattern: &'a DirectivePattern,
    ctx: RenderContext<'a>,
}

impl<'a> GalleryRenderer<'a> {
    /// Create a gallery renderer for one document.
    #[must_use]
    pub fn new(pattern: &'a DirectivePattern, ctx: RenderContext<'a>) -> Self {
        Self { pattern, ctx }
    }
}

impl Renderer for GalleryRenderer<'_> {
    fn name(&self) -> &'static str {
        "imagegallery"
    }

    fn substitute(&self, text: &str) -> Substitution {
        substitute(text, self.pattern, |o| {
            render_gallery(&o.title, &classify_gallery(&o.target, &self.ctx))
        })
    }
}
