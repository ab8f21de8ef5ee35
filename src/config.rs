//! Configuration management for inkshed.
//!
//! Handles:
//! - Command-line argument parsing
//! - The optional TOML config file
//! - Built-in defaults embedded at compile time
//!
//! Priority: command line > config file > built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Deserialize;

use crate::label::{DocumentPaths, Label};
use crate::template::{self, TitleContext, TitleFormat};
use crate::tools::converter::{self, ConverterCommand};

const EMBEDDED_DEFAULTS: &str = include_str!("../resources/default-config.toml");

/// Command-line arguments for inkshed
#[derive(Debug, Parser)]
#[command(name = "inkshed")]
#[command(about = "Seed a Markdown file, edit it, and convert it to a document")]
#[command(version)]
pub struct Args {
    /// Label for this writing session, used in both file names
    pub label: String,

    /// Read settings from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Fixed prefix of the generated file names
    #[arg(long)]
    pub prefix: Option<String>,

    /// Author line of the template
    #[arg(long)]
    pub author: Option<String>,

    /// Title line format, e.g. "{label|strip}"
    #[arg(long, value_name = "FORMAT")]
    pub title: Option<String>,

    /// Directory in which the files are created
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Editor command (defaults to $VISUAL, then $EDITOR, then vi)
    #[arg(long, value_name = "CMD")]
    pub editor: Option<String>,

    /// Document converter program
    #[arg(long, value_name = "PROGRAM")]
    pub converter: Option<String>,

    /// Stop after the editor exits
    #[arg(long)]
    pub no_convert: bool,

    /// Log level
    #[arg(
        long,
        default_value = "warn",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// One layer of settings, as written in a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub prefix: Option<String>,
    pub author: Option<String>,
    pub title: Option<String>,
    pub directory: Option<PathBuf>,
    pub editor: Option<String>,
    pub converter: Option<String>,
    pub converter_args: Option<Vec<String>>,
}

impl ConfigFile {
    /// Load a user config file. A relative `directory` is taken from home.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let mut file: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;

        if let Some(dir) = file.directory.take() {
            file.directory = Some(resolve_against_home(dir)?);
        }

        log::debug!("loaded config file {}", path.display());
        Ok(file)
    }

    /// Settings compiled into the binary.
    pub fn embedded() -> Self {
        match toml::from_str::<ConfigFile>(EMBEDDED_DEFAULTS) {
            Ok(file) => file,
            Err(e) => {
                log::warn!(
                    "Failed to parse embedded default config: {}. Using minimal fallback.",
                    e
                );
                Self::fallback()
            }
        }
    }

    fn fallback() -> Self {
        Self {
            prefix: Some("E.Santos.Inkshed".to_string()),
            author: Some("E. Santos".to_string()),
            title: Some("{label}".to_string()),
            directory: None,
            editor: None,
            converter: Some(converter::DEFAULT_CONVERTER.to_string()),
            converter_args: Some(converter::default_args()),
        }
    }

    /// Overlay `other` on top of `self`; values set in `other` win.
    pub fn merge(self, other: ConfigFile) -> ConfigFile {
        ConfigFile {
            prefix: other.prefix.or(self.prefix),
            author: other.author.or(self.author),
            title: other.title.or(self.title),
            directory: other.directory.or(self.directory),
            editor: other.editor.or(self.editor),
            converter: other.converter.or(self.converter),
            converter_args: other.converter_args.or(self.converter_args),
        }
    }
}

fn resolve_against_home(dir: PathBuf) -> Result<PathBuf> {
    if dir.is_absolute() {
        return Ok(dir);
    }
    let home = dirs::home_dir().context("could not determine home directory")?;
    Ok(home.join(dir))
}

/// `~/.config/inkshed/config.toml` on Linux, or the platform equivalent.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("inkshed").join("config.toml"))
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub prefix: String,
    pub author: String,
    pub title: TitleFormat,
    /// Where the source and output files are created
    pub directory: PathBuf,
    /// Explicit editor command; `None` defers to the environment
    pub editor: Option<String>,
    pub converter: ConverterCommand,
    /// Whether to run the converter after a successful edit
    pub convert: bool,
    pub log_level: String,
    /// Config file that was read, if any
    pub config_path: Option<PathBuf>,
}

impl Config {
    /// Create configuration from command-line arguments and the default config file
    pub fn from_args(args: Args) -> Result<Self> {
        let default_path = default_config_path();
        Self::resolve(args, default_path.as_deref())
    }

    /// Create configuration from explicit arguments (useful for testing).
    ///
    /// `default_path` is only read if it exists and `--config` was not given.
    pub fn resolve(args: Args, default_path: Option<&Path>) -> Result<Self> {
        let config_path = match (&args.config, default_path) {
            (Some(explicit), _) => Some(explicit.clone()),
            (None, Some(path)) if path.is_file() => Some(path.to_path_buf()),
            _ => None,
        };

        let mut layered = ConfigFile::embedded();
        if let Some(path) = &config_path {
            layered = layered.merge(ConfigFile::load(path)?);
        }
        layered = layered.merge(ConfigFile {
            prefix: args.prefix,
            author: args.author,
            title: args.title,
            directory: args.dir,
            editor: args.editor,
            converter: args.converter,
            converter_args: None,
        });

        let prefix = layered.prefix.unwrap_or_default();
        let author = layered.author.unwrap_or_default();
        template::ensure_single_line("prefix", &prefix)?;
        template::ensure_single_line("author", &author)?;

        let title = match layered.title {
            Some(format) => TitleFormat::parse(&format)
                .with_context(|| format!("invalid title format {:?}", format))?,
            None => TitleFormat::default(),
        };

        let converter = ConverterCommand::new(
            layered
                .converter
                .as_deref()
                .unwrap_or(converter::DEFAULT_CONVERTER),
            layered.converter_args.unwrap_or_else(converter::default_args),
        )
        .context("invalid converter settings")?;

        let editor = layered.editor.filter(|e| !e.trim().is_empty());
        if let Some(dir) = &layered.directory {
            if dir.as_os_str().is_empty() {
                bail!("directory must not be empty");
            }
        }

        Ok(Config {
            prefix,
            author,
            title,
            directory: layered.directory.unwrap_or_else(|| PathBuf::from(".")),
            editor,
            converter,
            convert: !args.no_convert,
            log_level: args.log_level,
            config_path,
        })
    }

    /// Source and output paths for a label.
    pub fn paths(&self, label: &Label) -> DocumentPaths {
        DocumentPaths::new(&self.directory, &self.prefix, label)
    }

    /// Title line text for a label.
    pub fn title_for(&self, label: &Label) -> String {
        self.title.expand(&TitleContext {
            label: label.as_str(),
            prefix: &self.prefix,
            author: &self.author,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_defaults_parse() {
        let embedded = ConfigFile::embedded();
        assert_eq!(embedded.prefix.as_deref(), Some("E.Santos.Inkshed"));
        assert_eq!(embedded.author.as_deref(), Some("E. Santos"));
        assert_eq!(embedded, ConfigFile::fallback());
    }

    #[test]
    fn merge_prefers_the_overlay() {
        let base = ConfigFile {
            prefix: Some("base".to_string()),
            author: Some("A".to_string()),
            ..ConfigFile::default()
        };
        let overlay = ConfigFile {
            prefix: Some("over".to_string()),
            ..ConfigFile::default()
        };
        let merged = base.merge(overlay);
        assert_eq!(merged.prefix.as_deref(), Some("over"));
        assert_eq!(merged.author.as_deref(), Some("A"));
    }

    #[test]
    fn resolves_defaults_without_config_file() {
        let args = Args::parse_from(["inkshed", "draft1"]);
        let config = Config::resolve(args, None).expect("resolve config");
        assert_eq!(config.prefix, "E.Santos.Inkshed");
        assert_eq!(config.author, "E. Santos");
        assert_eq!(config.directory, PathBuf::from("."));
        assert_eq!(config.converter, ConverterCommand::default());
        assert!(config.convert);
        assert!(config.editor.is_none());
        assert!(config.config_path.is_none());
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn command_line_overrides_defaults() {
        let args = Args::parse_from([
            "inkshed",
            "draft1",
            "--prefix",
            "Me",
            "--author",
            "Someone",
            "--title",
            "{label|upper}",
            "--editor",
            "nano",
            "--no-convert",
        ]);
        let config = Config::resolve(args, None).expect("resolve config");
        let label = Label::new("draft1").unwrap();
        assert_eq!(config.paths(&label).source, PathBuf::from("./Me.draft1.md"));
        assert_eq!(config.title_for(&label), "DRAFT1");
        assert_eq!(config.editor.as_deref(), Some("nano"));
        assert!(!config.convert);
    }

    #[test]
    fn rejects_multi_line_author() {
        let args = Args::parse_from(["inkshed", "x", "--author", "a\nb"]);
        assert!(Config::resolve(args, None).is_err());
    }

    #[test]
    fn rejects_bad_title_format() {
        let args = Args::parse_from(["inkshed", "x", "--title", "{subject}"]);
        let err = Config::resolve(args, None).unwrap_err();
        assert!(format!("{:#}", err).contains("unknown placeholder"));
    }
}
