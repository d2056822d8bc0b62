//! Source processing API
//!
//! This module provides an extensible API for processing indented sources with different
//! stages (token, calc) and formats (simple, json, value).
//!
//! # Sample Sources
//!
//! The `calc_sources` module provides access to the calculator sample files under
//! `docs/samples`. Tests should use these instead of inlining sources so that every test runs
//! against the same vetted inputs.
//!
//! ## Example Usage
//!
//! ```rust
//! use denter::denter::processor::calc_sources::CalcSources;
//!
//! // Get raw string content
//! let content = CalcSources::get_string("010-add.calc").unwrap();
//!
//! // Get processed content in simple format
//! let processed = CalcSources::get_processed("050-nested-subtraction.calc", "token-simple").unwrap();
//! ```

use crate::denter::calc;
use crate::denter::error::DenterError;
use crate::denter::source::{self, SourceKind, SourceOptions};
use crate::denter::token::{OutputToken, RawToken};
use crate::denter::tokenizer::{IndentTokenizer, TokenizerOptions};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Represents the processing stage (what data to extract)
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingStage {
    Token,
    Calc,
}

/// Represents the output format
#[derive(Debug, Clone, PartialEq)]
pub enum OutputFormat {
    Simple,
    Json,
    RawSimple,
    RawJson,
    Value,
}

/// Represents a complete processing specification
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

/// Options handed to every processing run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProcessingOptions {
    pub source: SourceOptions,
    pub tokenizer: TokenizerOptions,
}

impl ProcessingSpec {
    /// Parse a format string like "token-simple" or "token-raw-json"
    pub fn from_string(format_str: &str) -> Result<Self, ProcessingError> {
        let parts: Vec<&str> = format_str.split('-').collect();
        if parts.len() < 2 {
            return Err(ProcessingError::InvalidFormat(format_str.to_string()));
        }

        let stage = match parts[0] {
            "token" => ProcessingStage::Token,
            "calc" => ProcessingStage::Calc,
            _ => return Err(ProcessingError::InvalidStage(parts[0].to_string())),
        };

        let format = match parts[1..].join("-").as_str() {
            "simple" => OutputFormat::Simple,
            "json" => OutputFormat::Json,
            "raw-simple" => OutputFormat::RawSimple,
            "raw-json" => OutputFormat::RawJson,
            "value" => OutputFormat::Value,
            _ => return Err(ProcessingError::InvalidFormatType(parts[1..].join("-"))),
        };

        // Validate stage/format compatibility
        match (&stage, &format) {
            (ProcessingStage::Calc, OutputFormat::Value) => {}
            (ProcessingStage::Calc, _) => {
                return Err(ProcessingError::InvalidFormatType(format!(
                    "Format '{:?}' not supported for calc stage (only 'value' is supported)",
                    format
                )))
            }
            (ProcessingStage::Token, OutputFormat::Value) => {
                return Err(ProcessingError::InvalidFormatType(
                    "Format 'value' only works with calc stage".to_string(),
                ))
            }
            _ => {}
        }

        Ok(ProcessingSpec { stage, format })
    }

    /// Get all available processing specifications
    pub fn available_specs() -> Vec<ProcessingSpec> {
        vec![
            ProcessingSpec {
                stage: ProcessingStage::Token,
                format: OutputFormat::Simple,
            },
            ProcessingSpec {
                stage: ProcessingStage::Token,
                format: OutputFormat::Json,
            },
            ProcessingSpec {
                stage: ProcessingStage::Token,
                format: OutputFormat::RawSimple,
            },
            ProcessingSpec {
                stage: ProcessingStage::Token,
                format: OutputFormat::RawJson,
            },
            ProcessingSpec {
                stage: ProcessingStage::Calc,
                format: OutputFormat::Value,
            },
        ]
    }

    /// The format string this spec was parsed from
    pub fn name(&self) -> String {
        let stage = match self.stage {
            ProcessingStage::Token => "token",
            ProcessingStage::Calc => "calc",
        };
        let format = match self.format {
            OutputFormat::Simple => "simple",
            OutputFormat::Json => "json",
            OutputFormat::RawSimple => "raw-simple",
            OutputFormat::RawJson => "raw-json",
            OutputFormat::Value => "value",
        };
        format!("{}-{}", stage, format)
    }
}

/// Errors that can occur during processing
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProcessingError {
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    #[error("Invalid stage: {0}")]
    InvalidStage(String),
    #[error("Invalid format type: {0}")]
    InvalidFormatType(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error(transparent)]
    Denter(#[from] DenterError),
}

/// Process source text according to the given specification
#[tracing::instrument(level = "debug", skip_all, fields(format = %spec.name()))]
pub fn process_source(
    source: &str,
    spec: &ProcessingSpec,
    options: &ProcessingOptions,
) -> Result<String, ProcessingError> {
    match spec.stage {
        ProcessingStage::Token => match spec.format {
            OutputFormat::RawSimple | OutputFormat::RawJson => {
                let tokens = source::tokenize(source, &options.source)?;
                format_raw_tokens(&tokens, &spec.format)
            }
            _ => {
                let raw = source::tokenize(source, &options.source)?;
                let tokens = IndentTokenizer::new(raw, options.tokenizer)
                    .collect::<Result<Vec<_>, _>>()?;
                format_tokens(&tokens, &spec.format)
            }
        },
        ProcessingStage::Calc => {
            let value = calc::evaluate(source, &options.source, options.tokenizer)?;
            Ok(format!("{}\n", value))
        }
    }
}

/// Process a file according to the given specification
pub fn process_file<P: AsRef<Path>>(
    file_path: P,
    spec: &ProcessingSpec,
    options: &ProcessingOptions,
) -> Result<String, ProcessingError> {
    let file_path = file_path.as_ref();
    let content = fs::read_to_string(file_path).map_err(|e| {
        ProcessingError::IoError(format!("Failed to read {}: {}", file_path.display(), e))
    })?;

    process_source(&content, spec, options)
}

/// Format block-structured tokens. In the simple format every synthetic token ends a line.
fn format_tokens(
    tokens: &[OutputToken<SourceKind>],
    format: &OutputFormat,
) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Simple => {
            let mut result = String::new();
            for token in tokens {
                result.push_str(&token.to_string());
                if token.is_synthetic() {
                    result.push('\n');
                }
            }
            if !result.is_empty() && !result.ends_with('\n') {
                result.push('\n');
            }
            Ok(result)
        }
        OutputFormat::Json => serde_json::to_string_pretty(tokens)
            .map_err(|e| ProcessingError::Serialization(e.to_string())),
        _ => Err(ProcessingError::InvalidFormatType(format!(
            "{:?} is not a block-structured token format",
            format
        ))),
    }
}

/// Format raw tokens. In the simple format each source line becomes one output line.
fn format_raw_tokens(
    tokens: &[RawToken<SourceKind>],
    format: &OutputFormat,
) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::RawSimple => {
            let mut result = String::new();
            let mut last_line = None;
            for token in tokens {
                if last_line.is_some_and(|line| line != token.line) {
                    result.push('\n');
                }
                result.push_str(&token.to_string());
                last_line = Some(token.line);
            }
            if !result.is_empty() {
                result.push('\n');
            }
            Ok(result)
        }
        OutputFormat::RawJson => serde_json::to_string_pretty(tokens)
            .map_err(|e| ProcessingError::Serialization(e.to_string())),
        _ => Err(ProcessingError::InvalidFormatType(format!(
            "{:?} is not a raw token format",
            format
        ))),
    }
}

/// Get all available format strings
pub fn available_formats() -> Vec<String> {
    ProcessingSpec::available_specs()
        .iter()
        .map(ProcessingSpec::name)
        .collect()
}

/// Sample sources module for accessing the calculator sample files
pub mod calc_sources {
    use super::*;

    /// Available sample files (canonical sources)
    pub const AVAILABLE_SAMPLES: &[&str] = &[
        "010-add.calc",
        "020-sub.calc",
        "030-multiply.calc",
        "040-nested-multiply.calc",
        "050-nested-subtraction.calc",
        "060-comments-and-blank-lines.calc",
        "070-tabs.calc",
        "080-inconsistent-dedent.calc",
        "090-unknown-operator.calc",
    ];

    /// Main interface for accessing calculator sample files
    pub struct CalcSources;

    impl CalcSources {
        /// Get the path to the samples directory
        fn samples_dir() -> String {
            format!("{}/docs/samples", env!("CARGO_MANIFEST_DIR"))
        }

        /// Get the full path to a sample file
        pub fn sample_path(filename: &str) -> String {
            format!("{}/{}", Self::samples_dir(), filename)
        }

        /// Validate that a sample file exists and is available
        fn validate_sample(filename: &str) -> Result<(), ProcessingError> {
            if !AVAILABLE_SAMPLES.contains(&filename) {
                return Err(ProcessingError::FileNotFound(format!(
                    "Sample '{}' is not available. Available samples: {:?}",
                    filename, AVAILABLE_SAMPLES
                )));
            }
            Ok(())
        }

        /// Get sample content as raw string
        pub fn get_string(filename: &str) -> Result<String, ProcessingError> {
            Self::validate_sample(filename)?;
            let path = Self::sample_path(filename);
            fs::read_to_string(&path)
                .map_err(|e| ProcessingError::IoError(format!("Failed to read {}: {}", path, e)))
        }

        /// Get sample content processed with the specified format and default options
        pub fn get_processed(filename: &str, format: &str) -> Result<String, ProcessingError> {
            Self::validate_sample(filename)?;
            let spec = ProcessingSpec::from_string(format)?;
            process_file(
                Self::sample_path(filename),
                &spec,
                &ProcessingOptions::default(),
            )
        }

        /// List all available sample files
        pub fn list_samples() -> Vec<&'static str> {
            AVAILABLE_SAMPLES.to_vec()
        }
    }

}
