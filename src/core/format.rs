//! Output formats
//!
//! Projects the rewritten text into Markdown, Plain Text or HTML, and
//! provides the file extension / MIME type pair used when the result is
//! saved.

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::utils::error::{ConversionError, ConversionResult};

lazy_static! {
    static ref MARKUP_CHARS: Regex = Regex::new(r"[`*_]").unwrap();
}

/// Base name used for saved output files
pub const OUTPUT_FILE_STEM: &str = "converted_output";

/// Target encoding of the converted text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutputFormat {
    /// Text passes through unchanged
    #[default]
    Markdown,
    /// Backticks, asterisks and underscores removed
    PlainText,
    /// Newlines become `<br>`, backticks removed
    Html,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [
        OutputFormat::Markdown,
        OutputFormat::PlainText,
        OutputFormat::Html,
    ];

    /// Render `text` in this format
    pub fn project(&self, text: &str) -> String {
        match self {
            OutputFormat::Markdown => text.to_string(),
            OutputFormat::PlainText => MARKUP_CHARS.replace_all(text, "").into_owned(),
            OutputFormat::Html => text.replace('\n', "<br>").replace('`', ""),
        }
    }

    pub fn file_extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::PlainText => "txt",
            OutputFormat::Html => "html",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "text/markdown",
            OutputFormat::PlainText => "text/plain",
            OutputFormat::Html => "text/html",
        }
    }

    /// Label shown to users
    pub fn label(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "Markdown",
            OutputFormat::PlainText => "Plain Text",
            OutputFormat::Html => "HTML",
        }
    }

    /// Project `text` by format name.
    ///
    /// Names that do not parse leave the text unchanged.
    pub fn project_named(name: &str, text: &str) -> String {
        match name.parse::<OutputFormat>() {
            Ok(format) => format.project(text),
            Err(_) => text.to_string(),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OutputFormat {
    type Err = ConversionError;

    fn from_str(s: &str) -> ConversionResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "plain text" | "plaintext" | "plain" | "text" | "txt" => Ok(OutputFormat::PlainText),
            "html" | "htm" => Ok(OutputFormat::Html),
            _ => Err(ConversionError::unsupported_format(s)),
        }
    }
}

/// A converted result packaged for saving.
///
/// This is the caller-owned "last output" slot: a shell keeps the most
/// recent one and hands it to whatever writes or offers the file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Download {
    pub file_name: String,
    pub mime_type: String,
    pub data: String,
}

impl Download {
    pub fn new(data: impl Into<String>, format: OutputFormat) -> Self {
        Self {
            file_name: format!("{}.{}", OUTPUT_FILE_STEM, format.file_extension()),
            mime_type: format.mime_type().to_string(),
            data: data.into(),
        }
    }
}
