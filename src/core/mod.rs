//! Core conversion modules
//!
//! The pipeline stages, leaves first:
//! - `dollars`: `$$...$$` / `$...$` unwrapping
//! - `segment`: environment blocks vs. free text
//! - `rewrite`: ordered free-text rewrite stages
//! - `format`: Markdown / Plain Text / HTML projection
//! - `pipeline`: the stages composed into one conversion

pub mod dollars;
pub mod format;
pub mod pipeline;
pub mod rewrite;
pub mod segment;

// Re-export main types and functions
pub use dollars::strip_dollars;
pub use format::{Download, OutputFormat, OUTPUT_FILE_STEM};
pub use pipeline::{CleanOptions, LatexCleaner};
pub use rewrite::{rewrite_free_text, RewriteContext, RewriteStage, REWRITE_STAGES};
pub use segment::{segment, Span, SpanKind};
