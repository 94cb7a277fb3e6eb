//! The conversion pipeline
//!
//! ```text
//! raw -> strip dollars -> segment -> rewrite free text -> join -> project
//! ```
//!
//! Blank input short-circuits to `None` before any stage runs.

use crate::core::dollars::strip_dollars;
use crate::core::format::OutputFormat;
use crate::core::rewrite::{rewrite_free_text, RewriteContext};
use crate::core::segment::{segment, SpanKind};
use crate::data::symbols::SymbolTable;
use crate::utils::diagnostics::check_latex_with_symbols;
use crate::utils::error::{ConversionOutput, ConversionWarning};

/// Conversion options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CleanOptions {
    /// Replace known commands with Unicode glyphs (`α`) instead of ASCII
    /// mnemonics (`alpha`)
    /// Default: true
    pub use_unicode: bool,

    /// Output encoding
    /// Default: Markdown
    pub format: OutputFormat,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            use_unicode: true,
            format: OutputFormat::Markdown,
        }
    }
}

impl CleanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unicode glyphs, Markdown output
    pub fn unicode() -> Self {
        Self::default()
    }

    /// ASCII mnemonics, Markdown output
    pub fn ascii() -> Self {
        Self {
            use_unicode: false,
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_unicode(mut self, use_unicode: bool) -> Self {
        self.use_unicode = use_unicode;
        self
    }
}

/// Converter bound to a symbol table and a set of options.
///
/// Holds no per-call state; one instance can serve any number of
/// conversions, from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct LatexCleaner {
    symbols: SymbolTable,
    options: CleanOptions,
}

impl LatexCleaner {
    /// Built-in symbols, default options
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CleanOptions) -> Self {
        Self {
            symbols: SymbolTable::default(),
            options,
        }
    }

    pub fn with_symbols(mut self, symbols: SymbolTable) -> Self {
        self.symbols = symbols;
        self
    }

    pub fn options(&self) -> &CleanOptions {
        &self.options
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Rewrite `raw` without the format projection.
    ///
    /// Environment blocks are kept verbatim; every free-text span goes
    /// through the rewrite stages. Spans are joined with newlines, empty
    /// ones included, and the whole result is trimmed.
    pub fn clean(&self, raw: &str) -> String {
        let stripped = strip_dollars(raw);
        let ctx = RewriteContext::new(&self.symbols, self.options.use_unicode);

        let processed: Vec<String> = segment(&stripped)
            .into_iter()
            .map(|span| match span.kind {
                SpanKind::Environment => span.text.trim().to_string(),
                SpanKind::FreeText => rewrite_free_text(span.text, &ctx),
            })
            .collect();

        processed.join("\n").trim().to_string()
    }

    /// Full conversion. `None` when `raw` is empty or only whitespace.
    pub fn convert(&self, raw: &str) -> Option<String> {
        if raw.trim().is_empty() {
            return None;
        }
        Some(self.options.format.project(&self.clean(raw)))
    }

    /// [`convert`](Self::convert), plus the non-fatal findings of
    /// [`check_latex_with_symbols`] as warnings.
    pub fn convert_with_diagnostics(&self, raw: &str) -> Option<ConversionOutput> {
        let content = self.convert(raw)?;
        let warnings = check_latex_with_symbols(raw, &self.symbols)
            .diagnostics
            .into_iter()
            .map(ConversionWarning::from)
            .collect();
        Some(ConversionOutput::with_warnings(content, warnings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::symbols::SymbolEntry;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_blank_input_is_none() {
        let cleaner = LatexCleaner::new();
        assert_eq!(cleaner.convert(""), None);
        assert_eq!(cleaner.convert("   \n\t "), None);
    }

    #[test]
    fn test_clean_joins_spans_with_newlines() {
        let cleaner = LatexCleaner::new();
        assert_eq!(
            cleaner.clean(r"\alpha \begin{matrix}\alpha\end{matrix} \beta"),
            "α\n\\begin{matrix}\\alpha\\end{matrix}\nβ"
        );
    }

    #[test]
    fn test_adjacent_environments_keep_empty_span() {
        let cleaner = LatexCleaner::new();
        assert_eq!(
            cleaner.clean(r"\begin{a}1\end{a}\begin{b}2\end{b}"),
            "\\begin{a}1\\end{a}\n\n\\begin{b}2\\end{b}"
        );
    }

    #[test]
    fn test_dollars_stripped_before_segmenting() {
        let cleaner = LatexCleaner::with_options(CleanOptions::ascii());
        assert_eq!(cleaner.clean(r"$\pi r^2$"), "pi r^2");
    }

    #[test]
    fn test_format_applied_last() {
        let cleaner =
            LatexCleaner::with_options(CleanOptions::unicode().with_format(OutputFormat::Html));
        assert_eq!(
            cleaner.convert(r"a \\ b").as_deref(),
            Some("a <br> b")
        );
    }

    #[test]
    fn test_custom_symbols() {
        let table = SymbolTable::new()
            .with("hbar", SymbolEntry::new("ℏ", "h-bar"))
            .unwrap();
        let cleaner = LatexCleaner::with_options(CleanOptions::ascii()).with_symbols(table);
        assert_eq!(cleaner.convert(r"\hbar").as_deref(), Some("h-bar"));
    }

    #[test]
    fn test_convert_with_diagnostics_reports_unknown() {
        let cleaner = LatexCleaner::new();
        let out = cleaner.convert_with_diagnostics(r"\foobar + \alpha").unwrap();
        assert_eq!(out.content, r"\foobar + α");
        assert!(out.has_warnings());
        assert!(out.warnings[0].message.contains("foobar"));
    }

    #[test]
    fn test_convert_with_diagnostics_blank() {
        assert!(LatexCleaner::new().convert_with_diagnostics("  ").is_none());
    }
}
