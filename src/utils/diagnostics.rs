//! LaTeX diagnostics
//!
//! The converter is deliberately forgiving: unknown commands pass through,
//! stray `$` stays in the output and environment names are never compared.
//! This module reports those cases without changing what the converter
//! produces. It can identify:
//!
//! - Commands that are not in the symbol table
//! - Unmatched `$` delimiters
//! - Commands such as `\rightarrow` that the `\left`/`\right` removal cuts short
//! - `\begin{a}...\end{b}` blocks with differing names
//! - Nested environments, which split at the first `\end`
//! - Empty input
//!
//! ## Example
//!
//! ```rust
//! use texclean::diagnostics::{check_latex, DiagnosticLevel};
//!
//! let result = check_latex(r"\alpha + \foobar");
//! assert_eq!(result.infos, 1);
//! assert_eq!(result.diagnostics[0].level, DiagnosticLevel::Info);
//! ```

use fxhash::FxHashSet;
use std::fmt;

use crate::core::dollars::strip_dollars;
use crate::core::rewrite::{remove_sizing_commands, COMMAND_TOKEN};
use crate::core::segment::{segment, Span, SpanKind};
use crate::data::symbols::SymbolTable;
use crate::utils::error::ConversionWarning;

/// Commands consumed by the pipeline itself rather than the symbol table
const STRUCTURAL_COMMANDS: &[&str] = &["begin", "end", "text", "left", "right", "sqrt"];

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    /// Informational note
    Info,
    /// Warning - output will likely not look as intended
    Warning,
    /// Error - nothing will be converted
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "info"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity level
    pub level: DiagnosticLevel,
    /// Human-readable message
    pub message: String,
    /// Line number (1-indexed)
    pub line: Option<usize>,
    /// Column number (1-indexed)
    pub column: Option<usize>,
    /// Relevant source text
    pub source_text: Option<String>,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            line: None,
            column: None,
            source_text: None,
            suggestion: None,
        }
    }

    /// Add location information
    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Add source text
    pub fn with_source(mut self, text: impl Into<String>) -> Self {
        self.source_text = Some(text.into());
        self
    }

    /// Add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.message)?;

        if let (Some(line), Some(col)) = (self.line, self.column) {
            write!(f, "\n  --> line {}:{}", line, col)?;
        }

        if let Some(ref source) = self.source_text {
            write!(f, "\n  |\n  | {}", source)?;
        }

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\n  = help: {}", suggestion)?;
        }

        Ok(())
    }
}

impl From<Diagnostic> for ConversionWarning {
    fn from(diag: Diagnostic) -> Self {
        ConversionWarning {
            message: diag.message,
            line: diag.line,
            suggestion: diag.suggestion,
        }
    }
}

/// Check result with summary
#[derive(Debug, Default)]
pub struct CheckResult {
    /// All diagnostics
    pub diagnostics: Vec<Diagnostic>,
    /// Number of errors
    pub errors: usize,
    /// Number of warnings
    pub warnings: usize,
    /// Number of info messages
    pub infos: usize,
}

impl CheckResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn add(&mut self, diag: Diagnostic) {
        match diag.level {
            DiagnosticLevel::Error => self.errors += 1,
            DiagnosticLevel::Warning => self.warnings += 1,
            DiagnosticLevel::Info => self.infos += 1,
        }
        self.diagnostics.push(diag);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings > 0
    }

    /// Check if there are any issues at all
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Get summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.errors > 0 {
            parts.push(format!(
                "{} error{}",
                self.errors,
                if self.errors == 1 { "" } else { "s" }
            ));
        }
        if self.warnings > 0 {
            parts.push(format!(
                "{} warning{}",
                self.warnings,
                if self.warnings == 1 { "" } else { "s" }
            ));
        }
        if self.infos > 0 {
            parts.push(format!(
                "{} note{}",
                self.infos,
                if self.infos == 1 { "" } else { "s" }
            ));
        }
        if parts.is_empty() {
            "no issues found".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Check LaTeX source against the built-in symbol table
pub fn check_latex(input: &str) -> CheckResult {
    check_latex_with_symbols(input, &SymbolTable::default())
}

/// Check LaTeX source against `symbols`
pub fn check_latex_with_symbols(input: &str, symbols: &SymbolTable) -> CheckResult {
    let mut result = CheckResult::new();

    if input.trim().is_empty() {
        result.add(
            Diagnostic::new(DiagnosticLevel::Error, "empty input")
                .with_suggestion("Enter a LaTeX expression to convert"),
        );
        return result;
    }

    // `$` removal never touches newlines, so line numbers below match the
    // caller's input. Columns are relative to the stripped text.
    let stripped = strip_dollars(input);
    let line_offsets = compute_line_offsets(&stripped);

    check_stray_dollars(&stripped, &line_offsets, &mut result);

    let mut seen = FxHashSet::default();
    for span in segment(&stripped) {
        match span.kind {
            SpanKind::Environment => check_environment(&span, &line_offsets, &mut result),
            SpanKind::FreeText => {
                check_free_text(&span, symbols, &line_offsets, &mut seen, &mut result)
            }
        }
    }

    result
}

/// Compute byte offsets for each line start
fn compute_line_offsets(input: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, c) in input.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// Convert byte offset to line and column
fn offset_to_location(offset: usize, line_offsets: &[usize]) -> (usize, usize) {
    let line = line_offsets
        .iter()
        .position(|&o| o > offset)
        .unwrap_or(line_offsets.len())
        - 1;

    let column = offset - line_offsets.get(line).unwrap_or(&0) + 1;
    (line + 1, column) // 1-indexed
}

fn check_stray_dollars(stripped: &str, line_offsets: &[usize], result: &mut CheckResult) {
    if let Some(offset) = stripped.find('$') {
        let (line, col) = offset_to_location(offset, line_offsets);
        result.add(
            Diagnostic::new(
                DiagnosticLevel::Warning,
                "unmatched '$' is left in the output",
            )
            .with_location(line, col)
            .with_suggestion("Add the closing '$' or remove the stray one"),
        );
    }
}

fn check_environment(span: &Span<'_>, line_offsets: &[usize], result: &mut CheckResult) {
    let (line, col) = offset_to_location(span.offset, line_offsets);

    if let Some((open, close)) = span.environment_names() {
        if open != close {
            result.add(
                Diagnostic::new(
                    DiagnosticLevel::Warning,
                    format!(
                        "mismatched environment: opened '{}', closed '{}'",
                        open, close
                    ),
                )
                .with_location(line, col)
                .with_suggestion(format!("Use \\end{{{}}}", open)),
            );
        }
    }

    // Skip the opening `\begin` itself
    if span.text[1..].contains(r"\begin{") {
        result.add(
            Diagnostic::new(
                DiagnosticLevel::Warning,
                "nested environment: the block ends at the first \\end",
            )
            .with_location(line, col)
            .with_suggestion("Text after the inner \\end is rewritten as free text"),
        );
    }
}

fn check_free_text(
    span: &Span<'_>,
    symbols: &SymbolTable,
    line_offsets: &[usize],
    seen: &mut FxHashSet<String>,
    result: &mut CheckResult,
) {
    for m in COMMAND_TOKEN.find_iter(span.text) {
        // An odd run of backslashes before the match means its own `\`
        // pairs up into a `\\` line break
        let preceding = span.text[..m.start()]
            .bytes()
            .rev()
            .take_while(|&b| b == b'\\')
            .count();
        if preceding % 2 == 1 {
            continue;
        }

        let name = &m.as_str()[1..];
        let (line, col) = offset_to_location(span.offset + m.start(), line_offsets);

        match name {
            "begin" => result.add(
                Diagnostic::new(DiagnosticLevel::Warning, "unclosed environment")
                    .with_location(line, col)
                    .with_suggestion("Add a matching \\end{...}"),
            ),
            "end" => result.add(
                Diagnostic::new(DiagnosticLevel::Warning, "unmatched \\end")
                    .with_location(line, col)
                    .with_suggestion("Check for a missing \\begin{...}"),
            ),
            _ if STRUCTURAL_COMMANDS.contains(&name) => {}
            _ if name.starts_with("left") || name.starts_with("right") => {
                if seen.insert(name.to_string()) {
                    result.add(
                        Diagnostic::new(
                            DiagnosticLevel::Warning,
                            format!(
                                "\\{} loses its sizing prefix and renders as '{}'",
                                name,
                                remove_sizing_commands(m.as_str())
                            ),
                        )
                        .with_location(line, col)
                        .with_source(m.as_str()),
                    );
                }
            }
            _ if symbols.contains(name) => {}
            _ => {
                if seen.insert(name.to_string()) {
                    result.add(
                        Diagnostic::new(
                            DiagnosticLevel::Info,
                            format!("unknown command \\{} is passed through unchanged", name),
                        )
                        .with_location(line, col)
                        .with_source(m.as_str()),
                    );
                }
            }
        }
    }
}

/// Format check results for terminal output
pub fn format_diagnostics(result: &CheckResult, use_color: bool) -> String {
    let mut output = String::new();

    for diag in &result.diagnostics {
        if use_color {
            let color = match diag.level {
                DiagnosticLevel::Error => "\x1b[31m",   // Red
                DiagnosticLevel::Warning => "\x1b[33m", // Yellow
                DiagnosticLevel::Info => "\x1b[34m",    // Blue
            };
            output.push_str(color);
            output.push_str(&format!("{}", diag));
            output.push_str("\x1b[0m\n\n");
        } else {
            output.push_str(&format!("{}\n\n", diag));
        }
    }

    // Summary
    if use_color {
        if result.has_errors() {
            output.push_str("\x1b[31m");
        } else if result.warnings > 0 {
            output.push_str("\x1b[33m");
        } else {
            output.push_str("\x1b[32m");
        }
    }

    output.push_str(&format!("Summary: {}", result.summary()));

    if use_color {
        output.push_str("\x1b[0m");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::symbols::SymbolEntry;

    #[test]
    fn test_clean_input() {
        let result = check_latex(r"$\alpha \leq \beta$");
        assert!(result.is_empty(), "{:?}", result.diagnostics);
        assert_eq!(result.summary(), "no issues found");
    }

    #[test]
    fn test_empty_input_is_error() {
        let result = check_latex("   \n ");
        assert!(result.has_errors());
        assert_eq!(result.diagnostics.len(), 1);
    }

    #[test]
    fn test_unknown_command_reported_once() {
        let result = check_latex("\\frac{1}{2} + \\frac{3}{4}\n\\foobar");
        assert_eq!(result.infos, 2);
        assert_eq!(result.diagnostics[0].line, Some(1));
        assert_eq!(result.diagnostics[1].line, Some(2));
        assert!(result.diagnostics[1].message.contains("\\foobar"));
    }

    #[test]
    fn test_structural_commands_not_reported() {
        let result = check_latex(r"\sqrt{x} \left( \text{a} \right)");
        assert!(result.is_empty(), "{:?}", result.diagnostics);
    }

    #[test]
    fn test_custom_symbols_count_as_known() {
        let table = SymbolTable::new()
            .with("hbar", SymbolEntry::new("ℏ", "hbar"))
            .unwrap();
        assert_eq!(check_latex(r"\hbar").infos, 1);
        assert!(check_latex_with_symbols(r"\hbar", &table).is_empty());
    }

    #[test]
    fn test_line_break_is_not_a_command() {
        let result = check_latex(r"a \\b");
        assert!(result.is_empty(), "{:?}", result.diagnostics);
    }

    #[test]
    fn test_command_after_line_break_is_checked() {
        // `\\` then `\foo`
        let result = check_latex(r"a \\\foo");
        assert_eq!(result.infos, 1, "{:?}", result.diagnostics);
        assert!(result.diagnostics[0].message.contains("\\foo"));

        // `\\` `\\` then plain `foo`
        assert!(check_latex(r"a \\\\foo").is_empty());
    }

    #[test]
    fn test_sizing_prefix_reported() {
        let result = check_latex(r"a \rightarrow b \leftrightarrow c \rightarrow");
        assert_eq!(result.warnings, 2, "{:?}", result.diagnostics);
        assert!(result.diagnostics[0].message.contains("'arrow'"));
        assert!(result.diagnostics[1].message.contains("'rightarrow'"));
    }

    #[test]
    fn test_environment_contents_not_scanned() {
        let result = check_latex(r"\begin{matrix}\foo\end{matrix}");
        assert!(result.is_empty(), "{:?}", result.diagnostics);
    }

    #[test]
    fn test_stray_dollar() {
        let result = check_latex("$a$ costs $5");
        assert_eq!(result.warnings, 1);
        assert!(result.diagnostics[0].message.contains('$'));
    }

    #[test]
    fn test_leftover_dollar_pair() {
        // `$$$$` strips down to `$$`
        let result = check_latex("$$$$");
        assert_eq!(result.warnings, 1);
        assert_eq!(result.diagnostics[0].column, Some(1));
    }

    #[test]
    fn test_mismatched_environments() {
        let result = check_latex(r"\begin{equation}x=1\end{align}");
        assert!(result.has_warnings());
        assert!(!result.has_errors());
        assert!(result.diagnostics[0].message.contains("'equation'"));
    }

    #[test]
    fn test_nested_environment() {
        let result = check_latex(r"\begin{a}\begin{b}x\end{b}\end{a}");
        let messages: Vec<_> = result.diagnostics.iter().map(|d| &d.message).collect();
        assert!(messages.iter().any(|m| m.contains("nested")));
        assert!(messages.iter().any(|m| m.contains("unmatched \\end")));
    }

    #[test]
    fn test_unclosed_environment() {
        let result = check_latex(r"\begin{equation}x=1");
        assert!(result.has_warnings());
        assert!(result.diagnostics[0].message.contains("unclosed"));
    }

    #[test]
    fn test_summary_format() {
        let mut result = CheckResult::new();
        result.add(Diagnostic::new(DiagnosticLevel::Error, "test"));
        result.add(Diagnostic::new(DiagnosticLevel::Warning, "test"));

        let summary = result.summary();
        assert!(summary.contains("1 error"));
        assert!(summary.contains("1 warning"));
    }

    #[test]
    fn test_format_diagnostics_plain() {
        let result = check_latex(r"\foobar");
        let text = format_diagnostics(&result, false);
        assert!(text.starts_with("info: unknown command \\foobar"));
        assert!(text.ends_with("Summary: 1 note"));
        assert!(!text.contains("\x1b["));
    }

    #[test]
    fn test_into_warning() {
        let warning: ConversionWarning =
            Diagnostic::new(DiagnosticLevel::Warning, "x").with_location(3, 1).into();
        assert_eq!(warning.line, Some(3));
    }
}
