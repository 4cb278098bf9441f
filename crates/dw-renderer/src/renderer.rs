//! The renderer contract.

use crate::substitute::Substitution;

/// A text-to-text transform for one directive family.
///
/// Renderers are strategy objects: everything they need (pattern, file index,
/// path provider, options) is captured as fields at construction, once per
/// document. They hold no state between calls.
pub trait Renderer {
    /// Family name used in logs and reports (e.g., `"video"`).
    fn name(&self) -> &'static str;

    /// Rewrite every directive of this family in `text`.
    fn substitute(&self, text: &str) -> Substitution;

    /// Rewrite every directive of this family and return the new text.
    fn transform(&self, text: &str) -> String {
        self.substitute(text).text
    }
}
