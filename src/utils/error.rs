//! Error handling for texclean
//!
//! The conversion pipeline itself is total: it never fails, and blank input
//! is reported as `None` rather than as an error. The errors here come from
//! configuration (format names, custom symbol tables) and from IO in the
//! outer shells.

use std::fmt;

/// Conversion error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// A symbol file or other data could not be parsed
    ParseError {
        message: String,
        line: Option<usize>,
        column: Option<usize>,
    },
    /// Output format name or file type is not one we know
    UnsupportedFormat { value: String },
    /// Symbol name that the command-token pattern can never match
    InvalidSymbol { name: String },
    /// IO error (for file operations)
    IoError { message: String },
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::ParseError {
                message,
                line,
                column,
            } => {
                if let (Some(l), Some(c)) = (line, column) {
                    write!(f, "Parse error at line {}, column {}: {}", l, c, message)
                } else if let Some(l) = line {
                    write!(f, "Parse error at line {}: {}", l, message)
                } else {
                    write!(f, "Parse error: {}", message)
                }
            }
            ConversionError::UnsupportedFormat { value } => {
                write!(
                    f,
                    "Unsupported format '{}'. Expected one of: Markdown, Plain Text, HTML",
                    value
                )
            }
            ConversionError::InvalidSymbol { name } => {
                write!(
                    f,
                    "Invalid symbol name '{}': names must be one or more ASCII letters",
                    name
                )
            }
            ConversionError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConversionError {}

impl From<std::io::Error> for ConversionError {
    fn from(err: std::io::Error) -> Self {
        ConversionError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type for fallible operations around the pipeline
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Conversion warnings (non-fatal issues)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionWarning {
    pub message: String,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(l) = self.line {
            write!(f, "Warning at line {}: {}", l, self.message)?;
        } else {
            write!(f, "Warning: {}", self.message)?;
        }
        if let Some(ref sug) = self.suggestion {
            write!(f, " ({})", sug)?;
        }
        Ok(())
    }
}

/// Conversion output with optional warnings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOutput {
    /// The converted content
    pub content: String,
    /// Any warnings generated during conversion
    pub warnings: Vec<ConversionWarning>,
}

impl ConversionOutput {
    pub fn new(content: String) -> Self {
        Self {
            content,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(content: String, warnings: Vec<ConversionWarning>) -> Self {
        Self { content, warnings }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

// Convenience constructors for errors
impl ConversionError {
    pub fn parse(message: impl Into<String>) -> Self {
        ConversionError::ParseError {
            message: message.into(),
            line: None,
            column: None,
        }
    }

    pub fn parse_at(message: impl Into<String>, line: usize, column: usize) -> Self {
        ConversionError::ParseError {
            message: message.into(),
            line: Some(line),
            column: Some(column),
        }
    }

    pub fn unsupported_format(value: impl Into<String>) -> Self {
        ConversionError::UnsupportedFormat {
            value: value.into(),
        }
    }

    pub fn invalid_symbol(name: impl Into<String>) -> Self {
        ConversionError::InvalidSymbol { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ConversionError::parse("expected a table");
        assert!(err.to_string().contains("Parse error"));
        assert!(err.to_string().contains("expected a table"));
    }

    #[test]
    fn test_parse_error_with_location() {
        let err = ConversionError::parse_at("bad row", 10, 5);
        let msg = err.to_string();
        assert!(msg.contains("line 10"));
        assert!(msg.contains("column 5"));
    }

    #[test]
    fn test_unsupported_format() {
        let msg = ConversionError::unsupported_format("docx").to_string();
        assert!(msg.contains("docx"));
        assert!(msg.contains("Plain Text"));
    }

    #[test]
    fn test_invalid_symbol() {
        let msg = ConversionError::invalid_symbol("x2").to_string();
        assert!(msg.contains("'x2'"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json");
        let err: ConversionError = io.into();
        assert!(matches!(err, ConversionError::IoError { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_conversion_output() {
        let output = ConversionOutput::new("hello".to_string());
        assert!(!output.has_warnings());

        let output_with_warn = ConversionOutput::with_warnings(
            "hello".to_string(),
            vec![ConversionWarning {
                message: "unknown command \\foo".to_string(),
                line: Some(1),
                suggestion: None,
            }],
        );
        assert!(output_with_warn.has_warnings());
        assert_eq!(
            output_with_warn.warnings[0].to_string(),
            "Warning at line 1: unknown command \\foo"
        );
    }
}
