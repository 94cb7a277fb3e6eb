//! Symbol table files
//!
//! Loads extra command mappings from JSON, YAML, TOML or CSV so new
//! commands can be added without touching code. JSON, YAML and TOML accept
//! either a bare mapping or one nested under a `symbols` key, and each value
//! may be a `[unicode, ascii]` pair or a `{ unicode, ascii }` table:
//!
//! ```toml
//! [symbols]
//! hbar = ["ℏ", "hbar"]
//! ell = { unicode = "ℓ", ascii = "l" }
//! ```
//!
//! CSV files have a header row followed by `name,unicode,ascii` records.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use super::symbols::{SymbolEntry, SymbolTable};
use crate::utils::error::{ConversionError, ConversionResult};

/// Supported symbol file encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolFileKind {
    Json,
    Yaml,
    Toml,
    Csv,
}

impl SymbolFileKind {
    /// Pick the encoding from a file extension
    pub fn from_path(path: &Path) -> ConversionResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "json" => Ok(SymbolFileKind::Json),
            "yaml" | "yml" => Ok(SymbolFileKind::Yaml),
            "toml" => Ok(SymbolFileKind::Toml),
            "csv" => Ok(SymbolFileKind::Csv),
            _ => Err(ConversionError::unsupported_format(path.display().to_string())),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EntryValue {
    Pair(String, String),
    Table { unicode: String, ascii: String },
}

impl From<EntryValue> for SymbolEntry {
    fn from(value: EntryValue) -> Self {
        match value {
            EntryValue::Pair(unicode, ascii) => SymbolEntry { unicode, ascii },
            EntryValue::Table { unicode, ascii } => SymbolEntry { unicode, ascii },
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SymbolDocument {
    Nested { symbols: IndexMap<String, EntryValue> },
    Bare(IndexMap<String, EntryValue>),
}

impl SymbolDocument {
    fn into_table(self) -> ConversionResult<SymbolTable> {
        let entries = match self {
            SymbolDocument::Nested { symbols } => symbols,
            SymbolDocument::Bare(symbols) => symbols,
        };
        let mut table = SymbolTable::new();
        for (name, value) in entries {
            table.insert(name, value.into())?;
        }
        Ok(table)
    }
}

/// Read a symbol file, choosing the parser from its extension
pub fn load_symbols(path: impl AsRef<Path>) -> ConversionResult<SymbolTable> {
    let path = path.as_ref();
    let kind = SymbolFileKind::from_path(path)?;
    let input = fs::read_to_string(path)?;
    parse_symbols(&input, kind)
}

/// Parse symbol definitions from a string
pub fn parse_symbols(input: &str, kind: SymbolFileKind) -> ConversionResult<SymbolTable> {
    match kind {
        SymbolFileKind::Json => parse_json(input),
        SymbolFileKind::Yaml => parse_yaml(input),
        SymbolFileKind::Toml => parse_toml(input),
        SymbolFileKind::Csv => parse_csv(input),
    }
}

fn parse_json(input: &str) -> ConversionResult<SymbolTable> {
    let doc: SymbolDocument = serde_json::from_str(input).map_err(|e| {
        ConversionError::parse_at(format!("JSON parse error: {}", e), e.line(), e.column())
    })?;
    doc.into_table()
}

fn parse_yaml(input: &str) -> ConversionResult<SymbolTable> {
    let doc: SymbolDocument = serde_yaml::from_str(input).map_err(|e| match e.location() {
        Some(loc) => ConversionError::parse_at(
            format!("YAML parse error: {}", e),
            loc.line(),
            loc.column(),
        ),
        None => ConversionError::parse(format!("YAML parse error: {}", e)),
    })?;
    doc.into_table()
}

fn parse_toml(input: &str) -> ConversionResult<SymbolTable> {
    let doc: SymbolDocument = toml::from_str(input)
        .map_err(|e| ConversionError::parse(format!("TOML parse error: {}", e)))?;
    doc.into_table()
}

fn parse_csv(input: &str) -> ConversionResult<SymbolTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(input.as_bytes());

    let mut table = SymbolTable::new();
    for result in reader.records() {
        let record = result.map_err(|e| match e.position() {
            Some(pos) => ConversionError::parse_at(
                format!("CSV record error: {}", e),
                pos.line() as usize,
                1,
            ),
            None => ConversionError::parse(format!("CSV record error: {}", e)),
        })?;

        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
        match (record.get(0), record.get(1), record.get(2)) {
            (Some(name), Some(unicode), Some(ascii)) => {
                table.insert(name.trim(), SymbolEntry::new(unicode, ascii))?;
            }
            _ => {
                return Err(ConversionError::parse_at(
                    "CSV record error: expected name,unicode,ascii",
                    line,
                    1,
                ))
            }
        }
    }
    Ok(table)
}
