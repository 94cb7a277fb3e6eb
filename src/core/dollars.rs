//! Math-mode dollar delimiters
//!
//! Unwraps `$$...$$` and then `$...$` so the enclosed content joins the
//! surrounding text. Display math goes first so a `$$` block is not split
//! by the single-dollar pattern.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DISPLAY_MATH: Regex = Regex::new(r"(?s)\$\$(.+?)\$\$").unwrap();
    static ref INLINE_MATH: Regex = Regex::new(r"(?s)\$(.+?)\$").unwrap();
}

/// Remove one level of `$$` wrapping and one level of `$` wrapping.
///
/// Matching is non-greedy and spans newlines. A lone `$` with no partner
/// is left where it is.
///
/// ```rust
/// use texclean::core::dollars::strip_dollars;
///
/// assert_eq!(strip_dollars("$a$ and $b$"), "a and b");
/// assert_eq!(strip_dollars("costs $5"), "costs $5");
/// ```
pub fn strip_dollars(text: &str) -> String {
    let text = DISPLAY_MATH.replace_all(text, "$1");
    INLINE_MATH.replace_all(&text, "$1").into_owned()
}
