//! Python bindings for texclean
//!
//! ```python
//! from texclean import _native as texclean
//!
//! texclean.convert(r"$\alpha \leq \beta$")              # 'α ≤ β'
//! texclean.convert(r"\alpha", use_unicode=False)        # 'alpha'
//! texclean.convert("   ")                               # None
//! texclean.file_extension_for("Plain Text")             # 'txt'
//! ```

use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyModule;

use texclean::{
    diagnostics::check_latex_with_symbols, load_symbols, CleanOptions, ConversionError, Download,
    LatexCleaner, OutputFormat, SymbolTable,
};

/// Converts a texclean error to a Python exception
fn to_py_err(err: ConversionError) -> PyErr {
    match err {
        ConversionError::IoError { message } => PyIOError::new_err(message),
        other => PyValueError::new_err(other.to_string()),
    }
}

fn parse_format(format: &str) -> PyResult<OutputFormat> {
    format.parse().map_err(to_py_err)
}

fn symbol_table(path: Option<&str>) -> PyResult<SymbolTable> {
    match path {
        Some(path) => load_symbols(path).map_err(to_py_err),
        None => Ok(SymbolTable::new()),
    }
}

/// Convert LaTeX text. Returns None for blank input.
#[pyfunction]
#[pyo3(signature = (text, use_unicode = true, format = "Markdown", symbols = None))]
fn convert(
    text: &str,
    use_unicode: bool,
    format: &str,
    symbols: Option<&str>,
) -> PyResult<Option<String>> {
    let cleaner = LatexCleaner::with_options(CleanOptions {
        use_unicode,
        format: parse_format(format)?,
    })
    .with_symbols(symbol_table(symbols)?);
    Ok(cleaner.convert(text))
}

/// File extension used when saving output of `format`
#[pyfunction]
fn file_extension_for(format: &str) -> PyResult<&'static str> {
    Ok(texclean::file_extension_for(parse_format(format)?))
}

/// MIME type used when saving output of `format`
#[pyfunction]
fn mime_type_for(format: &str) -> PyResult<&'static str> {
    Ok(texclean::mime_type_for(parse_format(format)?))
}

/// (file_name, mime_type, data) for offering `output` as a download
#[pyfunction]
fn download(output: &str, format: &str) -> PyResult<(String, String, String)> {
    let download = Download::new(output, parse_format(format)?);
    Ok((download.file_name, download.mime_type, download.data))
}

/// Diagnostics for `text`, one rendered message per finding
#[pyfunction]
#[pyo3(signature = (text, symbols = None))]
fn check(text: &str, symbols: Option<&str>) -> PyResult<Vec<String>> {
    let table = symbol_table(symbols)?;
    Ok(check_latex_with_symbols(text, &table)
        .diagnostics
        .iter()
        .map(|d| d.to_string())
        .collect())
}

/// (name, unicode, ascii) for every recognized command
#[pyfunction]
#[pyo3(signature = (symbols = None))]
fn symbols(symbols: Option<&str>) -> PyResult<Vec<(String, String, String)>> {
    let table = symbol_table(symbols)?;
    Ok(table
        .entries()
        .into_iter()
        .map(|(name, sym)| (name.to_string(), sym.unicode.to_string(), sym.ascii.to_string()))
        .collect())
}

#[pymodule]
fn _native(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(convert, m)?)?;
    m.add_function(wrap_pyfunction!(file_extension_for, m)?)?;
    m.add_function(wrap_pyfunction!(mime_type_for, m)?)?;
    m.add_function(wrap_pyfunction!(download, m)?)?;
    m.add_function(wrap_pyfunction!(check, m)?)?;
    m.add_function(wrap_pyfunction!(symbols, m)?)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
