//! Data layer - static mappings
//!
//! This module contains the symbol data used during substitution:
//! - The built-in command table
//! - Loading extra commands from data files (`data-loading` feature)

#[cfg(feature = "data-loading")]
pub mod loader;
pub mod symbols;

// Re-export commonly used items
#[cfg(feature = "data-loading")]
pub use loader::{load_symbols, parse_symbols, SymbolFileKind};
pub use symbols::{is_command_name, lookup_symbol, Symbol, SymbolEntry, SymbolTable, SYMBOLS};
