//! Simple C Compiler - Common Types and Utilities
//!
//! This crate contains the shared data model consumed by the backend:
//! the type system, the symbol arena, the target machine parameters, and
//! the annotated AST handed over by the front end.

pub mod ast;
pub mod machine;
pub mod symbols;
pub mod types;

pub use ast::{Expression, Function, Statement, TranslationUnit};
pub use symbols::{Symbol, SymbolId, SymbolTable};
pub use types::{Declarator, Specifier, Type, TypeError};
