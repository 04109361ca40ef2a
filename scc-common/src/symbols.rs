//! Symbol arena
//!
//! Every declared name lives in a single arena per translation unit and is
//! referenced by index from the AST. The storage allocator is the only
//! writer of a symbol's `offset` field; code generation sees the arena
//! through a shared reference only.

use crate::types::Type;
use serde::{Deserialize, Serialize};

/// Index of a symbol in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolId(pub u32);

/// A named, typed program entity.
///
/// The offset is tri-state: `0` means unallocated (or a global, which is
/// addressed by name and never receives a frame slot), positive means a
/// parameter slot above the frame base, negative a local slot below it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub ty: Type,
    #[serde(default)]
    pub offset: i32,
}

impl Symbol {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            offset: 0,
        }
    }
}

/// Arena of all symbols in a translation unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol and return its arena index.
    pub fn add(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(symbol);
        id
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        self.symbols.get_mut(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
