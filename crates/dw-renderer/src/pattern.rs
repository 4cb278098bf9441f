//! Directive patterns.
//!
//! A directive is `<keyword>: [<Title>](<Target>)`. Each family owns one
//! compiled [`DirectivePattern`]; patterns are built once into a
//! [`DirectivePatterns`] set and handed to renderer constructors.

use std::ops::Range;

use regex::Regex;

/// Number of fields a well-formed directive captures (title, target).
const DIRECTIVE_FIELDS: usize = 2;

/// A directive occurrence found in the document text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Occurrence {
    /// Byte range of the whole directive in the scanned text.
    pub range: Range<usize>,
    /// Trimmed title field.
    pub title: String,
    /// Trimmed target field.
    pub target: String,
}

/// Result of scanning for the next directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Scan {
    /// A well-formed directive.
    Found(Occurrence),
    /// A match that did not yield exactly a title and a target.
    Malformed(Range<usize>),
    /// No further match in the text.
    Exhausted,
}

/// Compiled pattern for one directive family.
///
/// # Example
///
/// ```
/// use dw_renderer::{DirectivePattern, Scan};
///
/// let pattern = DirectivePattern::new("video");
/// let Scan::Found(occurrence) = pattern.scan("see video: [ Demo ](clip.mp4)", 0) else {
///     panic!("expected a directive");
/// };
/// assert_eq!(occurrence.title, "Demo");
/// assert_eq!(occurrence.target, "clip.mp4");
/// assert_eq!(occurrence.range, 4..29);
/// ```
#[derive(Clone, Debug)]
pub struct DirectivePattern {
    keyword: String,
    regex: Regex,
}

impl DirectivePattern {
    /// Build the standard `<keyword>: [<Title>](<Target>)` pattern.
    ///
    /// The keyword must start at a word boundary, so `files` does not match
    /// inside `profiles: [...]`.
    ///
    /// # Panics
    ///
    /// Never in practice: the keyword is escaped before compiling.
    #[must_use]
    pub fn new(keyword: &str) -> Self {
        let source = format!(r"\b{}: \[([^\]]+)\]\(([^)]+)\)", regex::escape(keyword));
        Self {
            keyword: keyword.to_owned(),
            regex: Regex::new(&source).expect("escaped directive pattern is valid"),
        }
    }

    /// Build a pattern from a custom regular expression.
    ///
    /// The expression should capture the title and target as groups 1 and 2.
    /// Matches that don't are reported as [`Scan::Malformed`].
    pub fn custom(keyword: &str, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            keyword: keyword.to_owned(),
            regex: Regex::new(pattern)?,
        })
    }

    /// Family keyword (e.g., `"video"`).
    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Scan `text` for the next directive starting at byte offset `start`.
    #[must_use]
    pub fn scan(&self, text: &str, start: usize) -> Scan {
        let Some(caps) = self.regex.captures_at(text, start) else {
            return Scan::Exhausted;
        };
        let Some(whole) = caps.get(0) else {
            return Scan::Exhausted;
        };

        let fields: Vec<&str> = caps.iter().skip(1).flatten().map(|m| m.as_str()).collect();
        if caps.len() != DIRECTIVE_FIELDS + 1 || fields.len() != DIRECTIVE_FIELDS {
            return Scan::Malformed(whole.range());
        }

        Scan::Found(Occurrence {
            range: whole.range(),
            title: fields[0].trim().to_owned(),
            target: fields[1].trim().to_owned(),
        })
    }
}

/// The pattern set for every directive family.
///
/// Build once (e.g. per process or per site) and pass to
/// [`RendererPipeline::for_document`](crate::RendererPipeline::for_document)
/// for each document.
#[derive(Clone, Debug)]
pub struct DirectivePatterns {
    /// `imagegallery: [Title](folder)`
    pub gallery: DirectivePattern,
    /// `files: [Title](folder)`
    pub files: DirectivePattern,
    /// `csv: [Title](file.csv)`
    pub csv: DirectivePattern,
    /// `pdf: [Title](file.pdf)`
    pub pdf: DirectivePattern,
    /// `video: [Title](target)`
    pub video: DirectivePattern,
    /// YouTube watch URL; group 1 is the video id.
    pub youtube: Regex,
}

impl DirectivePatterns {
    /// The standard directive keywords.
    ///
    /// # Panics
    ///
    /// Never in practice: all expressions are constants.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            gallery: DirectivePattern::new("imagegallery"),
            files: DirectivePattern::new("files"),
            csv: DirectivePattern::new("csv"),
            pdf: DirectivePattern::new("pdf"),
            video: DirectivePattern::new("video"),
            youtube: Regex::new(r"^https?://www\.youtube\.com/watch\?v=([^&]+)")
                .expect("youtube pattern is valid"),
        }
    }
}

impl Default for DirectivePatterns {
    fn default() -> Self {
        Self::standard()
    }
}
