//! Configuration management for docweave.
//!
//! Parses `docweave.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `pdf.width`
//! - `pdf.height`
//! - `csv.delimiter`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override video player width.
    pub video_width: Option<u32>,
    /// Override video player height.
    pub video_height: Option<u32>,
    /// Override CSV delimiter.
    pub csv_delimiter: Option<char>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docweave.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Embedded video player.
    pub video: VideoConfig,
    /// Embedded PDF viewer.
    pub pdf: PdfConfig,
    /// CSV tables.
    pub csv: CsvConfig,
    /// Markdown extensions.
    pub markdown: MarkdownConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Video player configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// Player width in pixels.
    pub width: u32,
    /// Player height in pixels.
    pub height: u32,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            width: 560,
            height: 315,
        }
    }
}

/// PDF viewer configuration.
///
/// Sizes are HTML length values such as `"100%"` or `"600"`.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Viewer width.
    pub width: String,
    /// Viewer height.
    pub height: String,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            width: "100%".to_owned(),
            height: "600".to_owned(),
        }
    }
}

/// CSV configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CsvConfig {
    /// Field delimiter; detected per file when unset.
    pub delimiter: Option<String>,
}

impl CsvConfig {
    /// Delimiter as a byte, if one is configured.
    ///
    /// Only meaningful after validation, which guarantees a single ASCII
    /// character.
    #[must_use]
    pub fn delimiter_byte(&self) -> Option<u8> {
        let delimiter = self.delimiter.as_deref()?;
        match delimiter.as_bytes() {
            [byte] => Some(*byte),
            _ => None,
        }
    }
}

/// Markdown extension configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// GitHub style tables.
    pub tables: bool,
    /// `~~strikethrough~~`.
    pub strikethrough: bool,
    /// Footnotes.
    pub footnotes: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            footnotes: true,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`pdf.height`").
        field: String,
        /// Error message (e.g., "${`PDF_HEIGHT`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a numeric size to be positive.
fn require_positive(value: u32, field: &str) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::Validation(format!(
            "{field} must be greater than 0"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docweave.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and validated with the rest of
    /// the configuration.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// a value is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(width) = settings.video_width {
            self.video.width = width;
        }
        if let Some(height) = settings.video_height {
            self.video.height = height;
        }
        if let Some(delimiter) = settings.csv_delimiter {
            self.csv.delimiter = Some(delimiter.to_string());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(&current)
    }

    /// Search for config file in `dir` and its parents.
    fn discover_from(dir: &Path) -> Option<PathBuf> {
        let mut current = dir.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically by [`Config::load`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive(self.video.width, "video.width")?;
        require_positive(self.video.height, "video.height")?;
        require_non_empty(&self.pdf.width, "pdf.width")?;
        require_non_empty(&self.pdf.height, "pdf.height")?;
        self.validate_csv()?;
        Ok(())
    }

    /// Validate CSV configuration.
    fn validate_csv(&self) -> Result<(), ConfigError> {
        let Some(delimiter) = self.csv.delimiter.as_deref() else {
            return Ok(());
        };

        let mut chars = delimiter.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii() && c != '"' && c != '\n' && c != '\r' => Ok(()),
            (Some(_), None) => Err(ConfigError::Validation(format!(
                "csv.delimiter {delimiter:?} is not a usable ASCII delimiter"
            ))),
            _ => Err(ConfigError::Validation(
                "csv.delimiter must be a single character".to_owned(),
            )),
        }
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.pdf.width = expand::expand_env(&self.pdf.width, "pdf.width")?;
        self.pdf.height = expand::expand_env(&self.pdf.height, "pdf.height")?;

        if let Some(ref delimiter) = self.csv.delimiter {
            self.csv.delimiter = Some(expand::expand_env(delimiter, "csv.delimiter")?);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.video.width, 560);
        assert_eq!(config.video.height, 315);
        assert_eq!(config.pdf.width, "100%");
        assert_eq!(config.pdf.height, "600");
        assert!(config.csv.delimiter.is_none());
        assert!(config.markdown.tables);
        assert!(config.markdown.strikethrough);
        assert!(config.markdown.footnotes);
        assert!(config.config_path.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.video.width, 560);
        assert_eq!(config.pdf.height, "600");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[video]
width = 800
height = 450

[pdf]
width = "90%"
height = "800"

[csv]
delimiter = ";"

[markdown]
footnotes = false
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.video.width, 800);
        assert_eq!(config.video.height, 450);
        assert_eq!(config.pdf.width, "90%");
        assert_eq!(config.pdf.height, "800");
        assert_eq!(config.csv.delimiter_byte(), Some(b';'));
        assert!(config.markdown.tables);
        assert!(!config.markdown.footnotes);
    }

    #[test]
    fn test_unknown_type_is_parse_error() {
        let result: Result<Config, _> = toml::from_str("[video]\nwidth = \"wide\"\n");

        assert!(result.is_err());
    }

    #[test]
    fn test_zero_video_size_is_invalid() {
        let config: Config = toml::from_str("[video]\nheight = 0\n").unwrap();
        let err = config.validate().unwrap_err();

        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        assert!(err.to_string().contains("video.height"));
    }

    #[test]
    fn test_empty_pdf_size_is_invalid() {
        let config: Config = toml::from_str("[pdf]\nwidth = \" \"\n").unwrap();

        assert!(config.validate().unwrap_err().to_string().contains("pdf.width"));
    }

    #[test]
    fn test_multi_character_delimiter_is_invalid() {
        let config: Config = toml::from_str("[csv]\ndelimiter = \";;\"\n").unwrap();
        let err = config.validate().unwrap_err();

        assert!(err.to_string().contains("single character"));
    }

    #[test]
    fn test_non_ascii_delimiter_is_invalid() {
        let config: Config = toml::from_str("[csv]\ndelimiter = \"§\"\n").unwrap();

        assert!(config.validate().is_err());
        assert_eq!(config.csv.delimiter_byte(), None);
    }

    #[test]
    fn test_tab_delimiter() {
        let config: Config = toml::from_str("[csv]\ndelimiter = \"\\t\"\n").unwrap();

        config.validate().unwrap();
        assert_eq!(config.csv.delimiter_byte(), Some(b'\t'));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default();
        let overrides = CliSettings {
            video_width: Some(1280),
            csv_delimiter: Some('|'),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.video.width, 1280);
        assert_eq!(config.video.height, 315); // Unchanged
        assert_eq!(config.csv.delimiter_byte(), Some(b'|'));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[pdf]\nheight = \"${DW_TEST_SURELY_UNSET_VAR:-720}\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.pdf.height, "720");
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(p) if p == path));
    }

    #[test]
    fn test_load_validates_cli_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();
        let overrides = CliSettings {
            video_width: Some(0),
            ..Default::default()
        };

        let err = Config::load(Some(&path), Some(&overrides)).unwrap_err();

        assert!(err.to_string().contains("video.width"));
    }

    #[test]
    fn test_load_unset_env_var_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[pdf]\nwidth = \"${DW_TEST_SURELY_UNSET_VAR}\"\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { ref field, .. } if field == "pdf.width"));
    }

    #[test]
    fn test_discover_from_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("guides").join("setup");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();

        assert_eq!(
            Config::discover_from(&nested),
            Some(dir.path().join(CONFIG_FILENAME))
        );
    }
}
