//! LaTeX command → (Unicode, ASCII) symbol mappings
//!
//! The built-in table is a compile-time `phf` map keyed by the bare command
//! name (`"alpha"`, not `"\\alpha"`). Callers that need extra commands layer
//! their own entries on top with [`SymbolTable`]; the built-in map is never
//! mutated.

use indexmap::IndexMap;
use phf::phf_map;

use crate::utils::error::{ConversionError, ConversionResult};

/// Built-in command table: name → (unicode form, ascii form)
pub static SYMBOLS: phf::Map<&'static str, (&'static str, &'static str)> = phf_map! {
    // Greek letters
    "alpha" => ("α", "alpha"),
    "beta" => ("β", "beta"),
    "gamma" => ("γ", "gamma"),
    "delta" => ("δ", "delta"),
    "vartheta" => ("ϑ", "vartheta"),
    "epsilon" => ("ε", "epsilon"),
    "zeta" => ("ζ", "zeta"),
    "eta" => ("η", "eta"),
    "theta" => ("θ", "theta"),
    "iota" => ("ι", "iota"),
    "kappa" => ("κ", "kappa"),
    "lambda" => ("λ", "lambda"),
    "mu" => ("μ", "mu"),
    "nu" => ("ν", "nu"),
    "xi" => ("ξ", "xi"),
    "omicron" => ("ο", "omicron"),
    "pi" => ("π", "pi"),
    "rho" => ("ρ", "rho"),
    "sigma" => ("σ", "sigma"),
    "tau" => ("τ", "tau"),
    "upsilon" => ("υ", "upsilon"),
    "phi" => ("φ", "phi"),
    "varphi" => ("ϕ", "varphi"),
    "chi" => ("χ", "chi"),
    "psi" => ("ψ", "psi"),
    "omega" => ("ω", "omega"),

    // Operators and relations
    "infty" => ("∞", "infinity"),
    "pm" => ("±", "+-"),
    "mp" => ("∓", "−+"),
    "leq" => ("≤", "<="),
    "geq" => ("≥", ">="),
    "neq" => ("≠", "!="),
    "approx" => ("≈", "~="),
    "times" => ("×", "*"),
    "div" => ("÷", "/"),
    "cdot" => ("·", "*"),

    // Arrows
    "rightarrow" => ("→", "->"),
    "leftarrow" => ("←", "<-"),
    "leftrightarrow" => ("↔", "<->"),

    // Big operators and calculus
    "sum" => ("∑", "sum"),
    "prod" => ("∏", "prod"),
    "int" => ("∫", "integral"),
    "partial" => ("∂", "partial"),
    "nabla" => ("∇", "nabla"),

    // Logic and sets
    "forall" => ("∀", "forall"),
    "exists" => ("∃", "exists"),
    "in" => ("∈", "in"),
    "notin" => ("∉", "notin"),
    "subset" => ("⊂", "subset"),
    "subseteq" => ("⊆", "subseteq"),
    "supset" => ("⊃", "supset"),
    "supseteq" => ("⊇", "supseteq"),
    "emptyset" => ("∅", "emptyset"),

    // Geometry
    "angle" => ("∠", "angle"),
    "degree" => ("°", "degree"),
    "prime" => ("′", "prime"),
};

/// A resolved replacement pair for one command name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol<'a> {
    pub unicode: &'a str,
    pub ascii: &'a str,
}

impl<'a> Symbol<'a> {
    /// Pick the form used in the output
    #[inline]
    pub fn render(&self, use_unicode: bool) -> &'a str {
        if use_unicode {
            self.unicode
        } else {
            self.ascii
        }
    }
}

/// Look up a command name in the built-in table
#[inline]
pub fn lookup_symbol(name: &str) -> Option<Symbol<'static>> {
    SYMBOLS
        .get(name)
        .map(|&(unicode, ascii)| Symbol { unicode, ascii })
}

/// Whether `name` can ever be reached by the command-token pattern
/// (one or more ASCII letters).
#[inline]
pub fn is_command_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphabetic())
}

/// An owned replacement pair, as supplied by a caller or a symbol file
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolEntry {
    pub unicode: String,
    pub ascii: String,
}

impl SymbolEntry {
    pub fn new(unicode: impl Into<String>, ascii: impl Into<String>) -> Self {
        Self {
            unicode: unicode.into(),
            ascii: ascii.into(),
        }
    }

    fn as_symbol(&self) -> Symbol<'_> {
        Symbol {
            unicode: &self.unicode,
            ascii: &self.ascii,
        }
    }
}

/// The table consulted during symbol substitution.
///
/// Built-in entries are always present; custom entries shadow them.
/// Built once and then only read.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    custom: IndexMap<String, SymbolEntry>,
}

impl SymbolTable {
    /// Table with only the built-in entries
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a custom entry.
    ///
    /// Names that are not pure ASCII letters are rejected since the
    /// rewriter could never match them.
    pub fn insert(&mut self, name: impl Into<String>, entry: SymbolEntry) -> ConversionResult<()> {
        let name = name.into();
        if !is_command_name(&name) {
            return Err(ConversionError::invalid_symbol(name));
        }
        self.custom.insert(name, entry);
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, name: impl Into<String>, entry: SymbolEntry) -> ConversionResult<Self> {
        self.insert(name, entry)?;
        Ok(self)
    }

    /// Merge every entry of `other` into this table
    pub fn extend(&mut self, other: SymbolTable) {
        self.custom.extend(other.custom);
    }

    pub fn get(&self, name: &str) -> Option<Symbol<'_>> {
        match self.custom.get(name) {
            Some(entry) => Some(entry.as_symbol()),
            None => lookup_symbol(name),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.custom.contains_key(name) || SYMBOLS.contains_key(name)
    }

    /// Number of custom entries layered over the built-ins
    pub fn custom_len(&self) -> usize {
        self.custom.len()
    }

    /// Number of distinct visible names
    pub fn len(&self) -> usize {
        let shadowed = self
            .custom
            .keys()
            .filter(|k| SYMBOLS.contains_key(k.as_str()))
            .count();
        SYMBOLS.len() + self.custom.len() - shadowed
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All visible entries: custom ones in insertion order, then the
    /// remaining built-ins sorted by name.
    pub fn entries(&self) -> Vec<(&str, Symbol<'_>)> {
        let mut out: Vec<(&str, Symbol<'_>)> = self
            .custom
            .iter()
            .map(|(name, entry)| (name.as_str(), entry.as_symbol()))
            .collect();

        let mut builtins: Vec<(&str, Symbol<'_>)> = SYMBOLS
            .entries()
            .filter(|(name, _)| !self.custom.contains_key(**name))
            .map(|(name, &(unicode, ascii))| (*name, Symbol { unicode, ascii }))
            .collect();
        builtins.sort_by(|a, b| a.0.cmp(b.0));

        out.extend(builtins);
        out
    }
}
