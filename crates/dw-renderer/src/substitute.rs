//! Bounded match-render-replace loop shared by all renderers.

use crate::pattern::{DirectivePattern, Occurrence, Scan};

/// Result of running one family's substitution loop over a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Substitution {
    /// Rewritten document text.
    pub text: String,
    /// Number of directives replaced.
    pub count: usize,
    /// Whether scanning stopped at a malformed directive.
    pub halted: bool,
}

/// Replace every directive matched by `pattern` with the fragment from `render`.
///
/// Directives are processed left to right, one per iteration. Scanning resumes
/// right after each inserted fragment, so a fragment is never scanned by the
/// loop that produced it and the number of iterations equals the number of
/// directives in the input.
///
/// A malformed match stops the loop: it and everything after it are left
/// verbatim.
///
/// # Example
///
/// ```
/// use dw_renderer::{DirectivePattern, substitute};
///
/// let pattern = DirectivePattern::new("kbd");
/// let result = substitute("Press kbd: [Copy](Ctrl+C).", &pattern, |o| {
///     format!("<kbd title=\"{}\">{}</kbd>", o.title, o.target)
/// });
///
/// assert_eq!(result.text, "Press <kbd title=\"Copy\">Ctrl+C</kbd>.");
/// assert_eq!(result.count, 1);
/// ```
pub fn substitute(
    text: &str,
    pattern: &DirectivePattern,
    mut render: impl FnMut(&Occurrence) -> String,
) -> Substitution {
    let mut text = text.to_owned();
    let mut cursor = 0;
    let mut count = 0;

    loop {
        match pattern.scan(&text, cursor) {
            Scan::Exhausted => {
                return Substitution {
                    text,
                    count,
                    halted: false,
                };
            }
            Scan::Malformed(range) => {
                tracing::debug!(
                    keyword = pattern.keyword(),
                    offset = range.start,
                    "Malformed directive, leaving the rest of the document unrendered"
                );
                return Substitution {
                    text,
                    count,
                    halted: true,
                };
            }
            Scan::Found(occurrence) => {
                let fragment = render(&occurrence);
                tracing::debug!(
                    keyword = pattern.keyword(),
                    target = %occurrence.target,
                    "Rendered directive"
                );
                cursor = occurrence.range.start + fragment.len();
                text.replace_range(occurrence.range, &fragment);
                count += 1;
            }
        }
    }
}
