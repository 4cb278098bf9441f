//! `dw render` command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use dw_config::{CliSettings, Config};
use dw_index::{DocumentPathProvider, FsFileIndex};
use dw_renderer::{
    DocumentRenderer, MarkdownOptions, PdfViewerSize, PlayerSize, RenderContext, RenderOptions,
};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown document to render.
    file: PathBuf,

    /// Path to configuration file (default: auto-discover docweave.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Stop after directive rewriting and emit markdown.
    #[arg(long)]
    fragment: bool,

    /// Video player width in pixels (overrides config).
    #[arg(long)]
    video_width: Option<u32>,

    /// Video player height in pixels (overrides config).
    #[arg(long)]
    video_height: Option<u32>,

    /// CSV field delimiter (overrides config; detected per file by default).
    #[arg(long)]
    csv_delimiter: Option<char>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the document cannot be read,
    /// or the output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            video_width: self.video_width,
            video_height: self.video_height,
            csv_delimiter: self.csv_delimiter,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        let markdown = std::fs::read_to_string(&self.file)?;
        let index = FsFileIndex::scan(document_dir(&self.file))?;
        let paths = DocumentPathProvider::default();
        let ctx = RenderContext::new(&index, &paths);

        let renderer = DocumentRenderer::new(render_options(&config));
        let rendered = if self.fragment {
            let report = renderer.preprocess_with_report(&markdown, ctx);
            for (name, count) in &report.substitutions {
                tracing::info!(renderer = name, count, "Substituted directives");
            }
            report.text
        } else {
            renderer.render(&markdown, ctx)
        };

        match &self.output {
            Some(path) => {
                std::fs::write(path, &rendered)?;
                output.success(&format!("Wrote {}", path.display()));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(rendered.as_bytes())?;
                stdout.flush()?;
            }
        }

        Ok(())
    }
}

/// Directory whose files the document's directives may reference.
fn document_dir(file: &Path) -> &Path {
    match file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

/// Map loaded configuration onto renderer options.
fn render_options(config: &Config) -> RenderOptions {
    RenderOptions {
        video: PlayerSize {
            width: config.video.width,
            height: config.video.height,
        },
        pdf: PdfViewerSize {
            width: config.pdf.width.clone(),
            height: config.pdf.height.clone(),
        },
        csv_delimiter: config.csv.delimiter_byte(),
        markdown: MarkdownOptions {
            tables: config.markdown.tables,
            strikethrough: config.markdown.strikethrough,
            footnotes: config.markdown.footnotes,
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_document_dir() {
        assert_eq!(document_dir(Path::new("guide.md")), Path::new("."));
        assert_eq!(document_dir(Path::new("docs/guide.md")), Path::new("docs"));
    }

    #[test]
    fn test_render_options_from_config() {
        let mut config = Config::default();
        config.video.width = 640;
        config.csv.delimiter = Some(";".to_owned());
        config.markdown.footnotes = false;

        let options = render_options(&config);

        assert_eq!(options.video, PlayerSize { width: 640, height: 315 });
        assert_eq!(options.pdf, PdfViewerSize::default());
        assert_eq!(options.csv_delimiter, Some(b';'));
        assert!(!options.markdown.footnotes);
    }

    #[test]
    fn test_execute_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("files")).unwrap();
        std::fs::write(dir.path().join("files/manual.pdf"), "%PDF-1.7").unwrap();
        std::fs::write(dir.path().join("docweave.toml"), "").unwrap();
        let document = dir.path().join("guide.md");
        std::fs::write(&document, "# Guide\n\npdf: [Manual](files/manual.pdf)\n").unwrap();
        let out = dir.path().join("guide.html");

        let args = RenderArgs {
            file: document,
            config: Some(dir.path().join("docweave.toml")),
            output: Some(out.clone()),
            fragment: false,
            video_width: None,
            video_height: None,
            csv_delimiter: None,
            verbose: false,
        };
        args.execute().unwrap();

        let html = std::fs::read_to_string(out).unwrap();
        assert!(html.starts_with("<h1>Guide</h1>\n<section class=\"pdf\">"));
        assert!(html.contains(r#"<object data="files/manual.pdf" type="application/pdf""#));
    }

    #[test]
    fn test_execute_missing_document() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("docweave.toml"), "").unwrap();

        let args = RenderArgs {
            file: dir.path().join("missing.md"),
            config: Some(dir.path().join("docweave.toml")),
            output: None,
            fragment: true,
            video_width: None,
            video_height: None,
            csv_delimiter: None,
            verbose: false,
        };

        assert!(matches!(args.execute(), Err(CliError::Io(_))));
    }
}
