//! Free-text rewriting
//!
//! A free-text span goes through a fixed, ordered list of stages. Each stage
//! is a pure `&str -> String` step and sees the output of the one before it.
//! `\sqrt` is swapped for a placeholder before anything else runs and is
//! restored right after symbol substitution, so the substitution never sees
//! it.
//!
//! ```text
//! ProtectSqrt -> LineBreaks -> DisplayDelimiters -> InlineMath -> TextCommand
//!   -> SizingCommands -> Exponents -> Symbols -> RestoreSqrt -> Trim
//! ```

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::data::symbols::SymbolTable;

/// Stands in for `\sqrt` between [`RewriteStage::ProtectSqrt`] and
/// [`RewriteStage::RestoreSqrt`]. Private-use code points, no backslash.
pub const SQRT_PLACEHOLDER: &str = "\u{E000}SQRT\u{E001}";

const SQRT_COMMAND: &str = r"\sqrt";
const SIZING_LEFT: &str = r"\left";
const SIZING_RIGHT: &str = r"\right";

lazy_static! {
    static ref DISPLAY_DELIMITER: Regex = Regex::new(r"\\\[|\\\]").unwrap();
    static ref INLINE_MATH: Regex = Regex::new(r"\\\((.*?)\\\)").unwrap();
    static ref TEXT_COMMAND: Regex = Regex::new(r"\\text\{(.*?)\}").unwrap();
    /// Backslash followed by one or more ASCII letters
    pub static ref COMMAND_TOKEN: Regex = Regex::new(r"\\([a-zA-Z]+)").unwrap();
}

/// Inputs shared by every stage of one span rewrite
#[derive(Debug, Clone, Copy)]
pub struct RewriteContext<'a> {
    pub symbols: &'a SymbolTable,
    pub use_unicode: bool,
}

impl<'a> RewriteContext<'a> {
    pub fn new(symbols: &'a SymbolTable, use_unicode: bool) -> Self {
        Self {
            symbols,
            use_unicode,
        }
    }
}

/// One step of the free-text rewrite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteStage {
    /// `\sqrt` → placeholder
    ProtectSqrt,
    /// literal `\\` → newline
    LineBreaks,
    /// drop `\[` and `\]`
    DisplayDelimiters,
    /// `\(x\)` → `x`
    InlineMath,
    /// `\text{x}` → `x`
    TextCommand,
    /// drop `\left` and `\right`
    SizingCommands,
    /// Exponent notation. Currently leaves the text unchanged.
    Exponents,
    /// `\name` → table entry
    Symbols,
    /// placeholder → `\sqrt`
    RestoreSqrt,
    /// trim surrounding whitespace
    Trim,
}

/// The stages in the order they run
pub const REWRITE_STAGES: [RewriteStage; 10] = [
    RewriteStage::ProtectSqrt,
    RewriteStage::LineBreaks,
    RewriteStage::DisplayDelimiters,
    RewriteStage::InlineMath,
    RewriteStage::TextCommand,
    RewriteStage::SizingCommands,
    RewriteStage::Exponents,
    RewriteStage::Symbols,
    RewriteStage::RestoreSqrt,
    RewriteStage::Trim,
];

impl RewriteStage {
    pub fn name(&self) -> &'static str {
        match self {
            RewriteStage::ProtectSqrt => "protect-sqrt",
            RewriteStage::LineBreaks => "line-breaks",
            RewriteStage::DisplayDelimiters => "display-delimiters",
            RewriteStage::InlineMath => "inline-math",
            RewriteStage::TextCommand => "text-command",
            RewriteStage::SizingCommands => "sizing-commands",
            RewriteStage::Exponents => "exponents",
            RewriteStage::Symbols => "symbols",
            RewriteStage::RestoreSqrt => "restore-sqrt",
            RewriteStage::Trim => "trim",
        }
    }

    pub fn apply(&self, text: &str, ctx: &RewriteContext<'_>) -> String {
        match self {
            RewriteStage::ProtectSqrt => text.replace(SQRT_COMMAND, SQRT_PLACEHOLDER),
            RewriteStage::LineBreaks => text.replace(r"\\", "\n"),
            RewriteStage::DisplayDelimiters => DISPLAY_DELIMITER.replace_all(text, "").into_owned(),
            RewriteStage::InlineMath => INLINE_MATH.replace_all(text, "$1").into_owned(),
            RewriteStage::TextCommand => TEXT_COMMAND.replace_all(text, "$1").into_owned(),
            RewriteStage::SizingCommands => remove_sizing_commands(text),
            RewriteStage::Exponents => convert_exponents(text),
            RewriteStage::Symbols => replace_symbols(text, ctx.symbols, ctx.use_unicode),
            RewriteStage::RestoreSqrt => text.replace(SQRT_PLACEHOLDER, SQRT_COMMAND),
            RewriteStage::Trim => text.trim().to_string(),
        }
    }
}

/// Run every stage over one free-text span
pub fn rewrite_free_text(text: &str, ctx: &RewriteContext<'_>) -> String {
    REWRITE_STAGES
        .iter()
        .fold(text.to_string(), |acc, stage| stage.apply(&acc, ctx))
}

/// Drop every literal `\left` and `\right`.
///
/// Removal is textual, so it also eats the prefix of longer commands:
/// `\rightarrow` becomes `arrow` and `\leftrightarrow` becomes `rightarrow`.
pub fn remove_sizing_commands(text: &str) -> String {
    text.replace(SIZING_LEFT, "").replace(SIZING_RIGHT, "")
}

/// Hook for turning `x^2` into `x²`. Returns its input for now.
#[inline]
pub fn convert_exponents(text: &str) -> String {
    text.to_string()
}

/// Replace every known `\name` token with its table form.
///
/// Unknown tokens are kept byte-for-byte, backslash included.
pub fn replace_symbols(text: &str, symbols: &SymbolTable, use_unicode: bool) -> String {
    COMMAND_TOKEN
        .replace_all(text, |caps: &Captures| match symbols.get(&caps[1]) {
            Some(symbol) => symbol.render(use_unicode).to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::symbols::SymbolEntry;
    use pretty_assertions::assert_eq;

    fn unicode(text: &str) -> String {
        let table = SymbolTable::new();
        rewrite_free_text(text, &RewriteContext::new(&table, true))
    }

    fn ascii(text: &str) -> String {
        let table = SymbolTable::new();
        rewrite_free_text(text, &RewriteContext::new(&table, false))
    }

    fn stage(stage: RewriteStage, text: &str) -> String {
        let table = SymbolTable::new();
        stage.apply(text, &RewriteContext::new(&table, true))
    }

    #[test]
    fn test_stage_order() {
        let names: Vec<_> = REWRITE_STAGES.iter().map(|s| s.name()).collect();
        assert_eq!(names.first(), Some(&"protect-sqrt"));
        assert_eq!(names.last(), Some(&"trim"));
        let symbols = names.iter().position(|n| *n == "symbols").unwrap();
        let restore = names.iter().position(|n| *n == "restore-sqrt").unwrap();
        assert_eq!(restore, symbols + 1);
    }

    #[test]
    fn test_protect_and_restore_sqrt() {
        let protected = stage(RewriteStage::ProtectSqrt, r"\sqrt{x}");
        assert!(!protected.contains('\\'));
        assert_eq!(stage(RewriteStage::RestoreSqrt, &protected), r"\sqrt{x}");
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(stage(RewriteStage::LineBreaks, r"a \\ b"), "a \n b");
    }

    #[test]
    fn test_display_delimiters() {
        assert_eq!(stage(RewriteStage::DisplayDelimiters, r"\[ x \]"), " x ");
    }

    #[test]
    fn test_inline_math_non_greedy() {
        assert_eq!(
            stage(RewriteStage::InlineMath, r"\(a\) and \(b\)"),
            "a and b"
        );
    }

    #[test]
    fn test_text_command_first_brace_closes() {
        assert_eq!(stage(RewriteStage::TextCommand, r"\text{if } x"), "if  x");
        assert_eq!(
            stage(RewriteStage::TextCommand, r"\text{a{b}c}"),
            "a{bc}"
        );
    }

    #[test]
    fn test_sizing_commands_removed() {
        assert_eq!(
            stage(RewriteStage::SizingCommands, r"\left( x \right)"),
            "( x )"
        );
    }

    #[test]
    fn test_sizing_removal_is_prefix_removal() {
        assert_eq!(
            stage(RewriteStage::SizingCommands, r"\leftarrow \rightarrow \lefteqn{a}"),
            "arrow arrow eqn{a}"
        );
        // `\left` goes first, so only `right` survives without its backslash
        assert_eq!(
            stage(RewriteStage::SizingCommands, r"\leftrightarrow"),
            "rightarrow"
        );
    }

    #[test]
    fn test_exponents_is_identity() {
        for text in ["x^2", "e^{i\\pi}", "", "a_1^n"] {
            assert_eq!(stage(RewriteStage::Exponents, text), text);
        }
    }

    #[test]
    fn test_symbols_unicode_and_ascii() {
        assert_eq!(unicode(r"\alpha \leq \beta"), "α ≤ β");
        assert_eq!(ascii(r"\alpha \leq \beta"), "alpha <= beta");
    }

    #[test]
    fn test_unknown_command_passthrough() {
        assert_eq!(unicode(r"\foobar + \alpha"), r"\foobar + α");
        assert_eq!(ascii(r"\frac{1}{2}"), r"\frac{1}{2}");
    }

    #[test]
    fn test_longest_token_is_looked_up() {
        // `\inn` is one unknown token, not `\in` + `n`
        assert_eq!(unicode(r"\inn \in"), r"\inn ∈");
    }

    #[test]
    fn test_sqrt_survives_symbol_pass() {
        assert_eq!(unicode(r"\sqrt{x} + \sigma"), r"\sqrt{x} + σ");
    }

    #[test]
    fn test_sqrt_survives_custom_table_entry() {
        let table = SymbolTable::new()
            .with("sqrt", SymbolEntry::new("√", "sqrt"))
            .unwrap();
        let out = rewrite_free_text(r"\sqrt{2}", &RewriteContext::new(&table, true));
        assert_eq!(out, r"\sqrt{2}");
    }

    #[test]
    fn test_arrows_lose_sizing_prefix() {
        assert_eq!(
            unicode(r"a \rightarrow b \leftarrow c \leftrightarrow d"),
            "a arrow b arrow c rightarrow d"
        );
        assert_eq!(ascii(r"p \leftrightarrow q"), "p rightarrow q");
    }

    #[test]
    fn test_full_span() {
        assert_eq!(
            unicode("  \\[ \\left( \\text{area} \\right) = \\pi r^2 \\]  "),
            "( area ) = π r^2"
        );
    }

    #[test]
    fn test_line_break_then_trim() {
        assert_eq!(unicode(r"a \\ b \\"), "a \n b");
    }

    #[test]
    fn test_custom_table_used() {
        let table = SymbolTable::new()
            .with("hbar", SymbolEntry::new("ℏ", "hbar"))
            .unwrap();
        let ctx = RewriteContext::new(&table, true);
        assert_eq!(rewrite_free_text(r"E = \hbar \omega", &ctx), "E = ℏ ω");
    }
}
