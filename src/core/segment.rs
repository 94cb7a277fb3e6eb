//! Environment segmentation
//!
//! Splits text into `\begin{..}...\end{..}` blocks, which are kept verbatim,
//! and the free text around them, which goes through the rewriter.
//!
//! The opening and closing names are matched independently, so
//! `\begin{a}...\end{b}` still counts as one block. The first `\end{..}`
//! closes the block, which means nested environments split early.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ENVIRONMENT: Regex =
        Regex::new(r"(?s)\\begin\{(?P<open>.*?)\}.*?\\end\{(?P<close>.*?)\}").unwrap();
}

/// What a span is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    /// `\begin{..}...\end{..}` block, preserved as-is
    Environment,
    /// Everything else
    FreeText,
}

/// A contiguous slice of the dollar-stripped input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    pub kind: SpanKind,
    pub text: &'a str,
    /// Byte offset of `text` in the segmented string
    pub offset: usize,
}

impl<'a> Span<'a> {
    pub fn is_environment(&self) -> bool {
        self.kind == SpanKind::Environment
    }

    /// Names from `\begin{open}` and `\end{close}`, for environment spans
    pub fn environment_names(&self) -> Option<(&'a str, &'a str)> {
        if !self.is_environment() {
            return None;
        }
        let caps = ENVIRONMENT.captures(self.text)?;
        let open = caps.name("open")?.as_str();
        let close = caps.name("close")?.as_str();
        Some((open, close))
    }
}

/// Split `text` into spans.
///
/// The result always starts and ends with a free-text span and alternates
/// with environments in between, the same shape as a capturing split:
/// free-text spans may be empty. Concatenating every span's text gives
/// back `text`.
///
/// ```rust
/// use texclean::core::segment::{segment, SpanKind};
///
/// let spans = segment(r"a \begin{x}b\end{x} c");
/// let kinds: Vec<_> = spans.iter().map(|s| s.kind).collect();
/// assert_eq!(kinds, [SpanKind::FreeText, SpanKind::Environment, SpanKind::FreeText]);
/// ```
pub fn segment(text: &str) -> Vec<Span<'_>> {
    let mut spans = Vec::new();
    let mut last = 0;

    for m in ENVIRONMENT.find_iter(text) {
        spans.push(Span {
            kind: SpanKind::FreeText,
            text: &text[last..m.start()],
            offset: last,
        });
        spans.push(Span {
            kind: SpanKind::Environment,
            text: m.as_str(),
            offset: m.start(),
        });
        last = m.end();
    }

    spans.push(Span {
        kind: SpanKind::FreeText,
        text: &text[last..],
        offset: last,
    });
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts<'a>(spans: &[Span<'a>]) -> Vec<&'a str> {
        spans.iter().map(|s| s.text).collect()
    }

    #[test]
    fn test_plain_text_is_one_span() {
        let spans = segment(r"\alpha + 1");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].kind, SpanKind::FreeText);
        assert_eq!(spans[0].text, r"\alpha + 1");
    }

    #[test]
    fn test_environment_alone_has_empty_neighbours() {
        let spans = segment(r"\begin{matrix}a & b\end{matrix}");
        assert_eq!(texts(&spans), ["", r"\begin{matrix}a & b\end{matrix}", ""]);
        assert!(spans[1].is_environment());
    }

    #[test]
    fn test_concatenation_reconstructs_input() {
        let input = "x \\begin{align}a\\\\\nb\\end{align} y \\begin{cases}1\\end{cases}";
        let spans = segment(input);
        assert_eq!(spans.len(), 5);
        assert_eq!(texts(&spans).concat(), input);
        for span in &spans {
            assert_eq!(&input[span.offset..span.offset + span.text.len()], span.text);
        }
    }

    #[test]
    fn test_adjacent_environments() {
        let spans = segment(r"\begin{a}1\end{a}\begin{b}2\end{b}");
        assert_eq!(
            texts(&spans),
            ["", r"\begin{a}1\end{a}", "", r"\begin{b}2\end{b}", ""]
        );
    }

    #[test]
    fn test_mismatched_names_still_one_block() {
        let spans = segment(r"\begin{matrix}x\end{pmatrix}");
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[1].environment_names(), Some(("matrix", "pmatrix")));
    }

    #[test]
    fn test_nested_environment_closes_at_first_end() {
        let input = r"\begin{a}\begin{b}x\end{b}y\end{a}";
        let spans = segment(input);
        assert_eq!(spans[1].text, r"\begin{a}\begin{b}x\end{b}");
        assert_eq!(spans[2].text, r"y\end{a}");
    }

    #[test]
    fn test_unclosed_begin_is_free_text() {
        let spans = segment(r"\begin{matrix} a");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].kind, SpanKind::FreeText);
    }

    #[test]
    fn test_offsets_index_source() {
        let input = "one\ntwo \\begin{x}y\\end{x}";
        let spans = segment(input);
        assert_eq!(spans[0].offset, 0);
        assert_eq!(Some(spans[1].offset), input.find("\\begin"));
        assert_eq!(spans[2].offset, input.len());
    }
}
