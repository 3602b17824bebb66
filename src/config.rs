//! Configuration file support for ferro-ann.
//!
//! This module loads `.ferro-ann.toml` configuration files which tune how
//! variants are matched to genes.
//!
//! # Example Configuration
//!
//! ```toml
//! [annotation]
//! upstream-window = 500
//! complement-minus-strand = false
//! ```
//!
//! # Config File Locations
//!
//! Configuration is searched in this order (first found wins):
//! 1. `.ferro-ann.toml` in current directory
//! 2. `~/.config/ferro-ann/config.toml`
//!
//! CLI flags take precedence over config file settings.

use log::{debug, warn};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default distance, in bases, searched for a gene downstream of an
/// intergenic variant.
pub const DEFAULT_UPSTREAM_WINDOW: u64 = 1000;

/// Settings used by the [`Annotator`](crate::annotate::Annotator).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotatorConfig {
    /// How far past an intergenic variant to look for a gene start.
    pub upstream_window: u64,
    /// Complement genomic alleles before classifying against minus-strand
    /// genes.
    pub complement_minus_strand: bool,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            upstream_window: DEFAULT_UPSTREAM_WINDOW,
            complement_minus_strand: true,
        }
    }
}

impl AnnotatorConfig {
    /// Set the upstream search window.
    pub fn with_upstream_window(mut self, window: u64) -> Self {
        self.upstream_window = window;
        self
    }

    /// Set whether minus-strand alleles are complemented.
    pub fn with_complement_minus_strand(mut self, complement: bool) -> Self {
        self.complement_minus_strand = complement;
        self
    }
}

/// Parsed configuration from a .ferro-ann.toml file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FerroAnnConfig {
    /// Annotation section.
    #[serde(default)]
    pub annotation: AnnotationSection,
}

/// `[annotation]` section of the config file. Unset keys fall back to
/// [`AnnotatorConfig::default`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AnnotationSection {
    pub upstream_window: Option<u64>,
    pub complement_minus_strand: Option<bool>,
}

impl FerroAnnConfig {
    /// Load configuration from the default locations.
    ///
    /// A file that exists but fails to parse is skipped with a warning.
    pub fn load() -> Option<Self> {
        let mut candidates = vec![PathBuf::from(".ferro-ann.toml")];
        if let Some(home) = dirs_home() {
            candidates.push(home.join(".config").join("ferro-ann").join("config.toml"));
        }

        for path in candidates {
            if !path.exists() {
                continue;
            }
            match Self::load_from_path(&path) {
                Ok(config) => {
                    debug!("Loaded configuration from {}", path.display());
                    return Some(config);
                }
                Err(e) => warn!("Ignoring {}: {}", path.display(), e),
            }
        }
        None
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML content.
    ///
    /// Sections other than `[annotation]`, and unknown keys within it, are
    /// ignored.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Convert this config to an [`AnnotatorConfig`].
    pub fn to_annotator_config(&self) -> AnnotatorConfig {
        let defaults = AnnotatorConfig::default();
        AnnotatorConfig {
            upstream_window: self
                .annotation
                .upstream_window
                .unwrap_or(defaults.upstream_window),
            complement_minus_strand: self
                .annotation
                .complement_minus_strand
                .unwrap_or(defaults.complement_minus_strand),
        }
    }

    /// Merge this config with CLI arguments.
    /// CLI arguments take precedence.
    pub fn merge_with_cli(
        &self,
        cli_window: Option<u64>,
        cli_no_complement: bool,
    ) -> AnnotatorConfig {
        let mut config = self.to_annotator_config();
        if let Some(window) = cli_window {
            config.upstream_window = window;
        }
        if cli_no_complement {
            config.complement_minus_strand = false;
        }
        config
    }
}

/// Configuration loading error.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Config IO error: {0}")]
    Io(String),
    /// Parse error in config file.
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Get the user's home directory.
fn dirs_home() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
