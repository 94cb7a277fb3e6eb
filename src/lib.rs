//! # texclean
//!
//! Turns LaTeX-flavoured math and text into readable Markdown, Plain Text or
//! HTML.
//!
//! ## Features
//!
//! - **Delimiter Stripping**: `$...$`, `$$...$$`, `\(...\)` and `\[...\]` are unwrapped
//! - **Verbatim Environments**: `\begin{..}...\end{..}` blocks pass through untouched
//! - **Symbol Substitution**: Greek letters, relations and operators become
//!   Unicode glyphs (`α`, `≤`) or ASCII mnemonics (`alpha`, `<=`)
//! - **Forgiving**: unknown commands are kept as written, nothing ever fails
//! - **Extensible Table**: extra commands from JSON/YAML/TOML/CSV (`data-loading` feature)
//! - **WASM Support**: Compiles to WebAssembly for browser usage
//!
//! ## Usage Examples
//!
//! ```rust
//! use texclean::{convert, OutputFormat};
//!
//! let out = convert(r"$\alpha \leq \beta$", true, OutputFormat::Markdown);
//! assert_eq!(out.as_deref(), Some("α ≤ β"));
//!
//! let out = convert(r"$\alpha \leq \beta$", false, OutputFormat::PlainText);
//! assert_eq!(out.as_deref(), Some("alpha <= beta"));
//!
//! // Blank input has nothing to convert
//! assert_eq!(convert("   ", true, OutputFormat::Html), None);
//! ```
//!
//! ### Custom symbols
//!
//! ```rust
//! use texclean::{CleanOptions, LatexCleaner, SymbolEntry, SymbolTable};
//!
//! let symbols = SymbolTable::new()
//!     .with("hbar", SymbolEntry::new("ℏ", "hbar"))
//!     .unwrap();
//! let cleaner = LatexCleaner::with_options(CleanOptions::unicode()).with_symbols(symbols);
//! assert_eq!(cleaner.convert(r"E = \hbar\omega").as_deref(), Some("E = ℏω"));
//! ```

/// Core conversion modules
pub mod core;

/// Data layer - static mappings
pub mod data;

/// Utility modules
pub mod utils;

/// WASM bindings (feature-gated)
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export core conversion types
pub use crate::core::{
    CleanOptions, Download, LatexCleaner, OutputFormat, RewriteStage, Span, SpanKind,
    OUTPUT_FILE_STEM, REWRITE_STAGES,
};

// Re-export symbol data
pub use data::symbols;
pub use data::{lookup_symbol, Symbol, SymbolEntry, SymbolTable, SYMBOLS};
#[cfg(feature = "data-loading")]
pub use data::{load_symbols, parse_symbols, SymbolFileKind};

// Re-export utilities
pub use utils::diagnostics;
pub use utils::error::{ConversionError, ConversionOutput, ConversionResult, ConversionWarning};

/// Convert LaTeX text with the built-in symbol table
///
/// # Arguments
/// * `raw_text` - LaTeX source, with or without `$` delimiters
/// * `use_unicode` - Unicode glyphs when true, ASCII mnemonics otherwise
/// * `format` - Output encoding
///
/// # Returns
/// The converted text, or `None` when `raw_text` is empty or whitespace
pub fn convert(raw_text: &str, use_unicode: bool, format: OutputFormat) -> Option<String> {
    convert_with_options(
        raw_text,
        &CleanOptions {
            use_unicode,
            format,
        },
    )
}

/// Convert LaTeX text with custom options
pub fn convert_with_options(raw_text: &str, options: &CleanOptions) -> Option<String> {
    LatexCleaner::with_options(*options).convert(raw_text)
}

/// Convert and collect diagnostics as warnings
pub fn convert_with_diagnostics(raw_text: &str, options: &CleanOptions) -> Option<ConversionOutput> {
    LatexCleaner::with_options(*options).convert_with_diagnostics(raw_text)
}

/// Rewrite LaTeX text without any format projection.
///
/// Unlike [`convert`], blank input simply yields an empty string.
pub fn clean_latex(raw_text: &str, use_unicode: bool) -> String {
    LatexCleaner::with_options(CleanOptions::new().with_unicode(use_unicode)).clean(raw_text)
}

/// File extension used when saving output of `format`
pub fn file_extension_for(format: OutputFormat) -> &'static str {
    format.file_extension()
}

/// MIME type used when saving output of `format`
pub fn mime_type_for(format: OutputFormat) -> &'static str {
    format.mime_type()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_convert_basic() {
        let result = convert(r"\alpha + \beta", true, OutputFormat::Markdown);
        assert_eq!(result.as_deref(), Some("α + β"));
    }

    #[test]
    fn test_convert_ascii() {
        let result = convert(r"\alpha + \beta", false, OutputFormat::Markdown).unwrap();
        assert_eq!(result, "alpha + beta");
        assert!(!result.contains('α'));
    }

    #[test]
    fn test_blank_input_every_combination() {
        for format in OutputFormat::ALL {
            for use_unicode in [true, false] {
                assert_eq!(convert("   ", use_unicode, format), None);
                assert_eq!(convert("", use_unicode, format), None);
            }
        }
    }

    #[test]
    fn test_clean_latex_blank() {
        assert_eq!(clean_latex("  ", true), "");
    }

    #[test]
    fn test_lookup_tables() {
        assert_eq!(file_extension_for(OutputFormat::Markdown), "md");
        assert_eq!(file_extension_for(OutputFormat::PlainText), "txt");
        assert_eq!(file_extension_for(OutputFormat::Html), "html");
        assert_eq!(mime_type_for(OutputFormat::Markdown), "text/markdown");
        assert_eq!(mime_type_for(OutputFormat::PlainText), "text/plain");
        assert_eq!(mime_type_for(OutputFormat::Html), "text/html");
    }

    #[test]
    fn test_convert_with_diagnostics() {
        let out = convert_with_diagnostics(r"\foo", &CleanOptions::default()).unwrap();
        assert_eq!(out.content, r"\foo");
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_options_presets() {
        assert!(CleanOptions::unicode().use_unicode);
        assert!(!CleanOptions::ascii().use_unicode);
        assert_eq!(CleanOptions::default().format, OutputFormat::Markdown);
    }
}
