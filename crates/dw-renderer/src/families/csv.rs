//! CSV table directives.
//!
//! ```text
//! csv: [Budget](data/budget.csv)
//! ```

use dw_content::ContentProviderExt;

use crate::context::RenderContext;
use crate::html::{escape_directive, escape_html, fallback_link};
use crate::pattern::DirectivePattern;
use crate::renderer::Renderer;
use crate::substitute::{Substitution, substitute};

/// Delimiters considered by [`detect_delimiter`], in tie-break order.
const CANDIDATE_DELIMITERS: [u8; 3] = [b',', b';', b'\t'];

/// A parsed CSV file: the first record is the header.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CsvTable {
    /// Header cells.
    pub header: Vec<String>,
    /// Body rows. Rows may differ in length from the header.
    pub rows: Vec<Vec<String>>,
}

/// Classified target of a CSV directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CsvTarget {
    /// An indexed `.csv` file that parsed into a table.
    Table {
        /// Parsed content.
        table: CsvTable,
    },
    /// Anything else.
    ExternalLink {
        /// Target as written in the directive.
        path: String,
    },
}

/// Pick the delimiter occurring most often on the first line.
///
/// Ties resolve in the order `,` `;` tab; a line without any candidate uses `,`.
///
/// # Example
///
/// ```
/// use dw_renderer::families::detect_delimiter;
///
/// assert_eq!(detect_delimiter("Item;Amount;Note\n"), b';');
/// assert_eq!(detect_delimiter("Item\tAmount"), b'\t');
/// assert_eq!(detect_delimiter("Item"), b',');
/// ```
#[must_use]
pub fn detect_delimiter(text: &str) -> u8 {
    let header = text.lines().next().unwrap_or_default();
    let mut best = (CANDIDATE_DELIMITERS[0], 0);
    for delimiter in CANDIDATE_DELIMITERS {
        let count = header.bytes().filter(|b| *b == delimiter).count();
        if count > best.1 {
            best = (delimiter, count);
        }
    }
    best.0
}

/// Parse CSV text into a table.
///
/// The delimiter is detected from the first line unless given. Cells are
/// trimmed and blank lines are skipped.
pub fn parse_csv(text: &str, delimiter: Option<u8>) -> Result<CsvTable, csv::Error> {
    let delimiter = delimiter.unwrap_or_else(|| detect_delimiter(text));
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        records.push(record.iter().map(str::to_owned).collect::<Vec<_>>());
    }

    let mut records = records.into_iter();
    Ok(CsvTable {
        header: records.next().unwrap_or_default(),
        rows: records.collect(),
    })
}

/// Classify a CSV target against the document's file index.
///
/// Files that are missing, lack a `.csv` extension, cannot be read or fail to
/// parse degrade to [`CsvTarget::ExternalLink`].
#[must_use]
pub fn classify_csv(target: &str, ctx: &RenderContext<'_>, delimiter: Option<u8>) -> CsvTarget {
    let fallback = || CsvTarget::ExternalLink {
        path: target.to_owned(),
    };

    let Some(file) = ctx.index.get(target) else {
        return fallback();
    };
    if file.extension().as_deref() != Some("csv") {
        return fallback();
    }

    let text = match file.content().read_to_string() {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(path = file.path(), error = %e, "Failed to read CSV file");
            return fallback();
        }
    };

    match parse_csv(&text, delimiter) {
        Ok(table) if table.header.is_empty() => {
            tracing::warn!(path = file.path(), "CSV file is empty");
            fallback()
        }
        Ok(table) => CsvTarget::Table { table },
        Err(e) => {
            tracing::warn!(path = file.path(), error = %e, "Failed to parse CSV file");
            fallback()
        }
    }
}

fn cells(tag: &str, row: &[String]) -> String {
    row.iter()
        .map(|cell| format!("<{tag}>{}</{tag}>", escape_html(cell)))
        .collect()
}

/// Render a classified CSV target.
#[must_use]
pub fn render_csv(title: &str, target: &CsvTarget) -> String {
    let table = match target {
        CsvTarget::Table { table } => table,
        CsvTarget::ExternalLink { path } => return fallback_link(title, path),
    };

    let title = escape_directive(title);
    let mut html = format!(
        "<section class=\"csv\">\n<h1>{title}</h1>\n<table>\n<thead>\n<tr>{}</tr>\n</thead>\n<tbody>\n",
        cells("th", &table.header)
    );
    for row in &table.rows {
        html.push_str("<tr>");
        html.push_str(&cells("td", row));
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n</section>");
    html
}

/// Renderer for `csv:` directives.
#[derive(Debug)]
pub struct CsvRenderer<'a> {
    pattern: &'a DirectivePattern,
    ctx: RenderContext<'a>,
    delimiter: Option<u8>,
}

impl<'a> CsvRenderer<'a> {
    /// Create a CSV renderer for one document.
    ///
    /// With `delimiter` unset, each file's delimiter is detected from its
    /// header line.
    #[must_use]
    pub fn new(pattern: &'a DirectivePattern, ctx: RenderContext<'a>, delimiter: Option<u8>) -> Self {
        Self {
            pattern,
            ctx,
            delimiter,
        }
    }
}

impl Renderer for CsvRenderer<'_> {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn substitute(&self, text: &str) -> Substitution {
        substitute(text, self.pattern, |o| {
            render_csv(&o.title, &classify_csv(&o.target, &self.ctx, self.delimiter))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Arc;
    use std::time::SystemTime;

    use dw_content::{ContentError, FnContentProvider};
    use dw_index::{DocumentPathProvider, MockFileIndex};
    use pretty_assertions::assert_eq;

    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| (*c).to_owned()).collect()
    }

    #[test]
    fn test_detect_delimiter_prefers_comma_on_tie() {
        assert_eq!(detect_delimiter("a;b,c"), b',');
        assert_eq!(detect_delimiter("a;b\tc"), b';');
        assert_eq!(detect_delimiter(""), b',');
    }

    #[test]
    fn test_detect_delimiter_uses_first_line_only() {
        assert_eq!(detect_delimiter("a;b;c\n1,2,3,4,5"), b';');
    }

    #[test]
    fn test_parse_semicolon_table() {
        let table = parse_csv("Item; Amount\nRent; 900\n\nFood; 300\n", None).unwrap();

        assert_eq!(table.header, strings(&["Item", "Amount"]));
        assert_eq!(
            table.rows,
            vec![strings(&["Rent", "900"]), strings(&["Food", "300"])]
        );
    }

    #[test]
    fn test_parse_quoted_fields() {
        let table = parse_csv("name,quote\nAda,\"Hello, world\"\n", Some(b',')).unwrap();

        assert_eq!(table.rows, vec![strings(&["Ada", "Hello, world"])]);
    }

    #[test]
    fn test_parse_ragged_rows() {
        let table = parse_csv("a,b,c\n1\n1,2,3,4\n", None).unwrap();

        assert_eq!(table.rows[0], strings(&["1"]));
        assert_eq!(table.rows[1].len(), 4);
    }

    #[test]
    fn test_parse_empty_text() {
        assert_eq!(parse_csv("", None).unwrap(), CsvTable::default());
    }

    #[test]
    fn test_classify_requires_indexed_csv_file() {
        let index = MockFileIndex::new()
            .with_file("data/budget.csv", "Item;Amount\nRent;900")
            .with_file("data/budget.txt", "Item;Amount\nRent;900")
            .with_file("data/empty.csv", "");
        let paths = DocumentPathProvider::default();
        let ctx = RenderContext::new(&index, &paths);

        assert!(matches!(
            classify_csv("data/budget.csv", &ctx, None),
            CsvTarget::Table { .. }
        ));
        for target in ["data/budget.txt", "data/missing.csv", "data/empty.csv"] {
            assert_eq!(
                classify_csv(target, &ctx, None),
                CsvTarget::ExternalLink {
                    path: target.to_owned()
                }
            );
        }
    }

    #[test]
    fn test_classify_unreadable_file_is_link() {
        let unreadable = FnContentProvider::new(
            || Ok("text/csv".to_owned()),
            || Ok(String::new()),
            || Ok(SystemTime::UNIX_EPOCH),
            |_| {
                Err(ContentError::io(
                    io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
                    None,
                ))
            },
        );
        let index = MockFileIndex::new().with_content("data.csv", Arc::new(unreadable));
        let paths = DocumentPathProvider::default();

        assert!(matches!(
            classify_csv("data.csv", &RenderContext::new(&index, &paths), None),
            CsvTarget::ExternalLink { .. }
        ));
    }

    #[test]
    fn test_render_escapes_cells() {
        let target = CsvTarget::Table {
            table: CsvTable {
                header: strings(&["Name"]),
                rows: vec![strings(&["<b>[x]</b>"])],
            },
        };

        assert_eq!(
            render_csv("People", &target),
            "<section class=\"csv\">\n<h1>People</h1>\n<table>\n<thead>\n<tr><th>Name</th></tr>\n</thead>\n<tbody>\n\
             <tr><td>&lt;b&gt;&#91;x&#93;&lt;/b&gt;</td></tr>\n</tbody>\n</table>\n</section>"
        );
    }

    #[test]
    fn test_renderer_uses_configured_delimiter() {
        let index = MockFileIndex::new().with_file("t.csv", "a|b\n1|2");
        let paths = DocumentPathProvider::default();
        let pattern = DirectivePattern::new("csv");
        let renderer = CsvRenderer::new(&pattern, RenderContext::new(&index, &paths), Some(b'|'));

        let html = renderer.transform("csv: [T](t.csv)");

        assert!(html.contains("<tr><th>a</th><th>b</th></tr>"));
        assert!(html.contains("<tr><td>1</td><td>2</td></tr>"));
    }
}
