//! Error types with rich diagnostics using miette
//!
//! Syntax errors carry source spans for readable error messages; the
//! remaining configuration errors name the offending field.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::attention::ColorClass;
use crate::types::NumericError;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (filename or "<input>")
    pub name: String,
    /// The full source text
    pub source: String,
}

impl SourceContext {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }

    /// Byte offset of a 1-based line/column pair, clamped to the source length.
    pub fn offset_of(&self, line: usize, column: usize) -> usize {
        let line_start: usize = self
            .source
            .split_inclusive('\n')
            .take(line.saturating_sub(1))
            .map(str::len)
            .sum();
        (line_start + column.saturating_sub(1)).min(self.source.len())
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Errors raised while loading or validating a chart configuration.
///
/// All of these are reported when the configuration is built, never while
/// drawing individual samples.
#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("width floor for {upper} ({upper_value}px) is smaller than the floor for {lower} ({lower_value}px)")]
    #[diagnostic(
        code(fieldbars::config::floor_order),
        help("floors must satisfy low <= medium <= high")
    )]
    FloorOrder {
        lower: ColorClass,
        upper: ColorClass,
        lower_value: f64,
        upper_value: f64,
    },

    #[error("invalid value for `{field}`: {reason}")]
    #[diagnostic(code(fieldbars::config::invalid_value))]
    InvalidValue {
        field: &'static str,
        reason: NumericError,
    },

    #[error("reference line position {value}% is outside the column")]
    #[diagnostic(
        code(fieldbars::config::reference_out_of_range),
        help("reference_percent must be between 0 and 100")
    )]
    ReferenceOutOfRange { value: f64 },

    #[error("invalid color: {value:?}")]
    #[diagnostic(
        code(fieldbars::config::invalid_color),
        help("use #rgb, #rrggbb or a plain CSS color name")
    )]
    InvalidColor { value: String },

    #[error("malformed configuration: {message}")]
    #[diagnostic(code(fieldbars::config::syntax))]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: Option<SourceSpan>,
    },
}

// ============================================================================
// Input Errors
// ============================================================================

/// Errors raised while reading chart input.
#[derive(Error, Diagnostic, Debug)]
pub enum InputError {
    #[error("malformed chart input: {message}")]
    #[diagnostic(
        code(fieldbars::input::syntax),
        help("expected an array of parcels or an object with a `parcels` field")
    )]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },
}
