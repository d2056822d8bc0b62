//! Layered configuration loader.
//!
//! `defaults/denter.default.toml` is embedded into the library so that docs and runtime
//! behavior stay in sync. Applications layer user-specific files and command-line overrides on
//! top of those defaults via [`Loader`] before deserializing into [`DenterConfig`].

use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

use crate::denter::source::SourceOptions;
use crate::denter::tokenizer::TokenizerOptions;

const DEFAULT_TOML: &str = include_str!("../../defaults/denter.default.toml");

/// Settings for one run of the pipeline, one table per stage.
///
/// `[tokenizer]` holds the end-of-stream policy, `[source]` the tab width used when measuring
/// columns, and `[output]` the processor format name.
#[derive(Debug, Clone, Deserialize)]
pub struct DenterConfig {
    pub tokenizer: TokenizerOptions,
    pub source: SourceOptions,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: String,
}

impl DenterConfig {
    pub fn tokenizer_options(&self) -> TokenizerOptions {
        self.tokenizer
    }

    pub fn source_options(&self) -> SourceOptions {
        self.source
    }
}

/// Stacks configuration layers: embedded defaults first, then TOML files in the order they
/// are added, then individual key overrides. Later layers win.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Loader holding only `defaults/denter.default.toml`.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a TOML file the user named explicitly (`denter execute --config`). It must exist.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a TOML file that may be absent, such as `./denter.toml` in the working directory.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Override one dotted key. The CLI maps `--ignore-eof`, `--eof-statement-break`,
    /// `--tab-width` and `--format` onto `tokenizer.ignore_eof`,
    /// `tokenizer.eof_statement_break`, `source.tab_width` and `output.format`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge every layer into a [`DenterConfig`]. Fails on unreadable required files or on
    /// values of the wrong type, e.g. `tokenizer.ignore_eof = "maybe"`.
    pub fn build(self) -> Result<DenterConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults alone: no EOF unwinding tweaks, tab width 4, `token-simple` output.
pub fn load_defaults() -> Result<DenterConfig, ConfigError> {
    Loader::new().build()
}
