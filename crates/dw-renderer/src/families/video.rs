//! Video directives.
//!
//! ```text
//! video: [Demo](https://www.youtube.com/watch?v=abc123)
//! video: [Clip](movies/intro.mp4)
//! ```

use regex::Regex;

use crate::context::RenderContext;
use crate::html::{escape_directive, fallback_link};
use crate::options::PlayerSize;
use crate::pattern::DirectivePattern;
use crate::renderer::Renderer;
use crate::substitute::{Substitution, substitute};

/// File extensions (lowercase, without the dot) played by the native video element.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "ogg", "webm"];

/// Classified target of a video directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VideoTarget {
    /// A YouTube watch URL.
    YouTubeVideo {
        /// Video id from the `v` query parameter.
        id: String,
    },
    /// A video file the browser can play natively.
    LocalVideoFile {
        /// Target as written in the directive.
        path: String,
    },
    /// Anything else.
    ExternalLink {
        /// Target as written in the directive.
        path: String,
    },
}

/// Classify a video directive target.
///
/// YouTube watch URLs win over file extensions; everything unrecognized is an
/// [`VideoTarget::ExternalLink`].
///
/// # Example
///
/// ```
/// use dw_renderer::DirectivePatterns;
/// use dw_renderer::families::{VideoTarget, classify_video};
///
/// let patterns = DirectivePatterns::standard();
/// assert_eq!(
///     classify_video("movies/Intro.WEBM", &patterns.youtube),
///     VideoTarget::LocalVideoFile { path: "movies/Intro.WEBM".to_owned() }
/// );
/// ```
#[must_use]
pub fn classify_video(target: &str, youtube: &Regex) -> VideoTarget {
    if let Some(id) = youtube.captures(target).and_then(|caps| caps.get(1)) {
        return VideoTarget::YouTubeVideo {
            id: id.as_str().to_owned(),
        };
    }

    if is_video_file(target) {
        return VideoTarget::LocalVideoFile {
            path: target.to_owned(),
        };
    }

    VideoTarget::ExternalLink {
        path: target.to_owned(),
    }
}

fn is_video_file(target: &str) -> bool {
    let name = target.rsplit('/').next().unwrap_or(target);
    name.rsplit_once('.').is_some_and(|(_, ext)| {
        let ext = ext.to_ascii_lowercase();
        VIDEO_EXTENSIONS.contains(&ext.as_str())
    })
}

/// Render a classified video target.
#[must_use]
pub fn render_video(title: &str, target: &VideoTarget, size: PlayerSize) -> String {
    let PlayerSize { width, height } = size;
    let title = escape_directive(title);
    match target {
        // Link to the canonical `watch?v=` URL; a bare `watch?{id}` does not resolve.
        VideoTarget::YouTubeVideo { id } => {
            let id = escape_directive(id);
            format!(
                r#"<section class="video video-youtube">
<h1>YouTube Video: {title}</h1>
<p>
<a href="http://www.youtube.com/watch?v={id}" target="_blank" title="{title}">http://www.youtube.com/watch?v={id}</a>
</p>
<iframe width="{width}" height="{height}" src="http://www.youtube.com/embed/{id}" frameborder="0" allowfullscreen></iframe>
</section>"#
            )
        }
        VideoTarget::LocalVideoFile { path } => {
            let path = escape_directive(path);
            format!(
                r#"<section class="video video-file">
<h1>Video: {title}</h1>
<p>
<a href="{path}" target="_blank" title="{title}">{path}</a>
</p>
<video width="{width}" height="{height}" controls>
<source src="{path}" type="video/mp4">
</video>
</section>"#
            )
        }
        VideoTarget::ExternalLink { path } => fallback_link(&title, path),
    }
}

/// Renderer for `video:` directives.
#[derive(Debug)]
pub struct VideoRenderer<'a> {
    pattern: &'a DirectivePattern,
    youtube: &'a Regex,
    ctx: RenderContext<'a>,
    size: PlayerSize,
}

impl<'a> VideoRenderer<'a> {
    /// Create a video renderer for one document.
    #[must_use]
    pub fn new(
        pattern: &'a DirectivePattern,
        youtube: &'a Regex,
        ctx: RenderContext<'a>,
        size: PlayerSize,
    ) -> Self {
        Self {
            pattern,
            youtube,
            ctx,
            size,
        }
    }

    fn render_occurrence(&self, title: &str, target: &str) -> String {
        let classified = classify_video(target, self.youtube);
        if let VideoTarget::LocalVideoFile { path } = &classified
            && dw_index::normalize_path(path).is_some()
            && self.ctx.index.get(path).is_none()
        {
            tracing::warn!(path = %path, "Video file not found next to the document");
        }
        render_video(title, &classified, self.size)
    }
}

impl Renderer for VideoRenderer<'_> {
    fn name(&self) -> &'static str {
        "video"
    }

    fn substitute(&self, text: &str) -> Substitution {
        substitute(text, self.pattern, |o| {
            self.render_occurrence(&o.title, &o.target)
        })
    }
}
