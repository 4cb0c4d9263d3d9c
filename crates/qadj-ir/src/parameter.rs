//! Parameter bindings and the symbol resolution map.
//!
//! A gate argument is either a literal value or a symbol. Symbols resolve
//! through a [`ParameterMap`] to a position in an externally supplied value
//! vector plus a linear scale factor; the value that reaches the gate is
//! `raw * scale`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A literal or symbolic gate argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterBinding {
    /// A constant numeric value.
    Value(f32),
    /// A symbolic parameter, resolved at compile time.
    Symbol(String),
}

impl ParameterBinding {
    /// Create a symbolic binding.
    pub fn symbol(name: impl Into<String>) -> Self {
        ParameterBinding::Symbol(name.into())
    }

    /// Check if this binding is symbolic.
    pub fn is_symbolic(&self) -> bool {
        matches!(self, ParameterBinding::Symbol(_))
    }

    /// The symbol name, if symbolic.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            ParameterBinding::Symbol(name) => Some(name),
            ParameterBinding::Value(_) => None,
        }
    }

    /// The literal value, if not symbolic.
    pub fn as_value(&self) -> Option<f32> {
        match self {
            ParameterBinding::Value(v) => Some(*v),
            ParameterBinding::Symbol(_) => None,
        }
    }
}

impl fmt::Display for ParameterBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterBinding::Value(v) => write!(f, "{v}"),
            ParameterBinding::Symbol(name) => write!(f, "{name}"),
        }
    }
}

impl From<f32> for ParameterBinding {
    fn from(value: f32) -> Self {
        ParameterBinding::Value(value)
    }
}

impl From<f64> for ParameterBinding {
    fn from(value: f64) -> Self {
        ParameterBinding::Value(value as f32)
    }
}

impl From<&str> for ParameterBinding {
    fn from(name: &str) -> Self {
        ParameterBinding::Symbol(name.to_string())
    }
}

impl From<String> for ParameterBinding {
    fn from(name: String) -> Self {
        ParameterBinding::Symbol(name)
    }
}

/// Where a symbol's raw value lives and how it is scaled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SymbolBinding {
    /// Position in the external value vector.
    pub index: usize,
    /// Linear scale applied to the raw value.
    #[serde(default = "unit_scale")]
    pub scale: f32,
}

fn unit_scale() -> f32 {
    1.0
}

impl SymbolBinding {
    /// Binding at `index` with unit scale.
    pub fn new(index: usize) -> Self {
        Self { index, scale: 1.0 }
    }

    /// Set the scale factor.
    #[must_use]
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}

/// Read-only symbol → (index, scale) table shared across compilations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterMap {
    symbols: FxHashMap<String, SymbolBinding>,
}

impl ParameterMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map each name to its position in `names`, with unit scale.
    ///
    /// A repeated name keeps its first position.
    pub fn from_symbols<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut map = Self::new();
        for (index, name) in names.into_iter().enumerate() {
            map.symbols
                .entry(name.into())
                .or_insert_with(|| SymbolBinding::new(index));
        }
        map
    }

    /// Insert or replace a binding.
    pub fn insert(&mut self, name: impl Into<String>, binding: SymbolBinding) -> &mut Self {
        self.symbols.insert(name.into(), binding);
        self
    }

    /// Look up a symbol.
    pub fn get(&self, name: &str) -> Option<&SymbolBinding> {
        self.symbols.get(name)
    }

    /// Check whether a symbol is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Number of bound symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if no symbols are bound.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// One past the largest index referenced, i.e. the minimum value-vector length.
    pub fn required_values(&self) -> usize {
        self.symbols.values().map(|b| b.index + 1).max().unwrap_or(0)
    }

    /// Iterate over bindings in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SymbolBinding)> {
        self.symbols.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// A gate argument after symbol lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedArg {
    /// Externally supplied value (or the literal).
    pub raw: f32,
    /// Scale applied to `raw`.
    pub scale: f32,
    /// Symbol the argument was bound to, if any.
    pub symbol: Option<String>,
}

impl ResolvedArg {
    /// A literal argument.
    pub fn literal(value: f32) -> Self {
        Self {
            raw: value,
            scale: 1.0,
            symbol: None,
        }
    }

    /// A symbol-bound argument.
    pub fn symbolic(name: impl Into<String>, raw: f32, scale: f32) -> Self {
        Self {
            raw,
            scale,
            symbol: Some(name.into()),
        }
    }

    /// The value handed to the gate constructor.
    #[inline]
    pub fn value(&self) -> f32 {
        self.raw * self.scale
    }

    /// The value after shifting `raw` by `delta`.
    #[inline]
    pub fn shifted(&self, delta: f32) -> f32 {
        (self.raw + delta) * self.scale
    }

    /// Check if the argument came from a symbol.
    pub fn is_symbolic(&self) -> bool {
        self.symbol.is_some()
    }
}
