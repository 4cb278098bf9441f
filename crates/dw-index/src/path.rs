//! Link generation for indexed files.

/// Turns index paths into links usable from the rendered document.
pub trait PathProvider: Send + Sync {
    /// Link to the indexed file at `path`, as seen from the current document.
    fn route(&self, path: &str) -> String;
}

/// Path provider for one document page.
///
/// The index root is published at `directory` (a URL path without leading
/// slash). Relative providers link from the document's own URL `page`;
/// absolute providers emit root-relative links.
///
/// # Example
///
/// ```
/// use dw_index::{DocumentPathProvider, PathProvider};
///
/// let paths = DocumentPathProvider::relative("guides/setup", "guides");
/// assert_eq!(paths.route("files/manual.pdf"), "files/manual.pdf");
///
/// let paths = DocumentPathProvider::relative("guides/setup/", "guides");
/// assert_eq!(paths.route("files/manual.pdf"), "../files/manual.pdf");
///
/// let paths = DocumentPathProvider::absolute("guides");
/// assert_eq!(paths.route("files/manual.pdf"), "/guides/files/manual.pdf");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentPathProvider {
    page: String,
    directory: String,
    absolute: bool,
}

impl DocumentPathProvider {
    /// Links relative to the document page URL.
    #[must_use]
    pub fn relative(page: impl Into<String>, directory: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            directory: directory.into(),
            absolute: false,
        }
    }

    /// Root-relative links (`/directory/path`).
    #[must_use]
    pub fn absolute(directory: impl Into<String>) -> Self {
        Self {
            page: String::new(),
            directory: directory.into(),
            absolute: true,
        }
    }

    fn site_path(&self, path: &str) -> String {
        let directory = self.directory.trim_matches('/');
        let path = path.trim_start_matches('/');
        if directory.is_empty() {
            path.to_owned()
        } else {
            format!("{directory}/{path}")
        }
    }
}

impl PathProvider for DocumentPathProvider {
    fn route(&self, path: &str) -> String {
        let site_path = self.site_path(path);
        if self.absolute {
            format!("/{site_path}")
        } else {
            relative_path(&self.page, &site_path)
        }
    }
}

/// Compute a relative URL from one page URL to another (RFC 3986).
///
/// Both `from` and `to` are URL paths without leading slash. Per RFC 3986 the
/// last segment of `from` is the current document; the base directory is
/// everything before it.
///
/// # Examples
///
/// ```
/// use dw_index::relative_path;
///
/// assert_eq!(relative_path("a/b", "a/c"), "c");
/// assert_eq!(relative_path("", "gallery/one.png"), "gallery/one.png");
/// assert_eq!(relative_path("guide", "guide"), "guide");
/// ```
pub fn relative_path(from: &str, to: &str) -> String {
    let from_segs: Vec<&str> = from.split('/').filter(|s| !s.is_empty()).collect();
    let to_segs: Vec<&str> = to.split('/').filter(|s| !s.is_empty()).collect();

    // Trailing slash means the document is empty: all segments are the directory.
    let from_dir = if from.ends_with('/') || from_segs.is_empty() {
        &from_segs[..]
    } else {
        &from_segs[..from_segs.len() - 1]
    };

    let common = from_dir
        .iter()
        .zip(&to_segs)
        .take_while(|(a, b)| a == b)
        .count();

    let ups = from_dir.len() - common;
    let remaining = &to_segs[common..];

    let result = format!("{}{}", "../".repeat(ups), remaining.join("/"));
    if result.is_empty() {
        "./".to_owned()
    } else {
        result
    }
}
