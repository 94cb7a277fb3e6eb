//! WASM bindings for texclean
//!
//! This module provides JavaScript-accessible functions for LaTeX cleanup,
//! plus the file name / MIME type lookups a page needs to offer the result
//! as a download.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "wasm")]
use crate::{CleanOptions, Download, LatexCleaner, OutputFormat};

/// Conversion options (exposed to WASM)
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Unicode glyphs (`α`) instead of ASCII mnemonics (`alpha`)
    #[serde(default = "default_true")]
    pub use_unicode: bool,
    /// "Markdown", "Plain Text" or "HTML"
    #[serde(default = "default_format")]
    pub format: String,
}

#[cfg(feature = "wasm")]
impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            use_unicode: true,
            format: default_format(),
        }
    }
}

#[cfg(feature = "wasm")]
fn default_true() -> bool {
    true
}

#[cfg(feature = "wasm")]
fn default_format() -> String {
    OutputFormat::Markdown.label().to_string()
}

/// Conversion result with additional metadata
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct ConvertResult {
    /// The converted output
    pub output: String,
    /// Whether anything was converted
    pub success: bool,
    /// Why nothing was converted
    pub error: Option<String>,
    /// Non-fatal findings
    pub warnings: Vec<String>,
}

#[cfg(feature = "wasm")]
impl ConvertResult {
    fn failed(message: impl Into<String>) -> Self {
        Self {
            output: String::new(),
            success: false,
            error: Some(message.into()),
            warnings: vec![],
        }
    }
}

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

#[cfg(feature = "wasm")]
fn parse_format(name: &str) -> Result<OutputFormat, JsValue> {
    name.parse::<OutputFormat>()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Convert with options
///
/// Returns `{ output, success, error, warnings }`. Blank input gives
/// `success: false` with a message suitable for showing to the user.
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "convert")]
pub fn convert_wasm(input: &str, options: JsValue) -> JsValue {
    let opts: ConvertOptions = serde_wasm_bindgen::from_value(options).unwrap_or_default();

    let result = match opts.format.parse::<OutputFormat>() {
        Err(e) => ConvertResult::failed(e.to_string()),
        Ok(format) => {
            let cleaner = LatexCleaner::with_options(CleanOptions {
                use_unicode: opts.use_unicode,
                format,
            });
            match cleaner.convert_with_diagnostics(input) {
                Some(out) => ConvertResult {
                    warnings: out.warnings.iter().map(|w| w.to_string()).collect(),
                    output: out.content,
                    success: true,
                    error: None,
                },
                None => ConvertResult::failed("Please enter a LaTeX expression to convert."),
            }
        }
    };

    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

/// Convert without options; `undefined` for blank input
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "convertText")]
pub fn convert_text_wasm(input: &str, use_unicode: bool, format: &str) -> Result<Option<String>, JsValue> {
    Ok(crate::convert(input, use_unicode, parse_format(format)?))
}

/// Package converted output for a download link
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "download")]
pub fn download_wasm(output: &str, format: &str) -> Result<JsValue, JsValue> {
    let download = Download::new(output, parse_format(format)?);
    serde_wasm_bindgen::to_value(&download).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// File extension for a format name
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "fileExtensionFor")]
pub fn file_extension_for_wasm(format: &str) -> Result<String, JsValue> {
    Ok(crate::file_extension_for(parse_format(format)?).to_string())
}

/// MIME type for a format name
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "mimeTypeFor")]
pub fn mime_type_for_wasm(format: &str) -> Result<String, JsValue> {
    Ok(crate::mime_type_for(parse_format(format)?).to_string())
}

/// Get version information
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Check LaTeX for potential issues
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "checkLatex")]
pub fn check_latex_wasm(input: &str) -> JsValue {
    use crate::diagnostics::DiagnosticLevel;

    let result = crate::diagnostics::check_latex(input);

    // Group diagnostics by level
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    for d in &result.diagnostics {
        match d.level {
            DiagnosticLevel::Error => errors.push(d.message.clone()),
            DiagnosticLevel::Warning => warnings.push(d.message.clone()),
            DiagnosticLevel::Info => infos.push(d.message.clone()),
        }
    }

    let summary = CheckSummary {
        errors,
        warnings,
        infos,
        has_errors: result.has_errors(),
    };
    serde_wasm_bindgen::to_value(&summary).unwrap_or(JsValue::NULL)
}

/// Summary of LaTeX check results
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct CheckSummary {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
    pub has_errors: bool,
}
