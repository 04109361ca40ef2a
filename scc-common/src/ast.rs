//! The annotated abstract syntax tree
//!
//! This is the hand-off contract with the front end: a type-checked tree
//! whose names all resolve to entries in the symbol arena. The backend
//! reads the tree and writes nothing but symbol offsets.
//!
//! Both syntactic categories are closed enums so that the allocator and
//! the generator are forced to handle every node kind exhaustively.

use crate::symbols::{SymbolId, SymbolTable};
use crate::types::{Specifier, Type};
use serde::{Deserialize, Serialize};

/// An expression node. Every expression has a static type; identifiers
/// carry theirs through the symbol arena, calls carry their result type
/// directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    Identifier {
        symbol: SymbolId,
    },
    Integer {
        /// The literal text, preserved verbatim for emission.
        value: String,
    },
    Call {
        callee: SymbolId,
        args: Vec<Expression>,
        ty: Type,
    },
}

impl Expression {
    /// The static type of this expression, if its symbols resolve.
    pub fn ty(&self, symbols: &SymbolTable) -> Option<Type> {
        match self {
            Expression::Identifier { symbol } => symbols.get(*symbol).map(|s| s.ty.clone()),
            Expression::Integer { .. } => Some(Type::scalar(Specifier::Int, 0)),
            Expression::Call { ty, .. } => Some(ty.clone()),
        }
    }
}

/// A statement node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    Block {
        /// Symbols declared directly in this block, in declaration order.
        decls: Vec<SymbolId>,
        stmts: Vec<Statement>,
    },
    While {
        cond: Expression,
        body: Box<Statement>,
    },
    For {
        cond: Expression,
        body: Box<Statement>,
    },
    If {
        cond: Expression,
        then: Box<Statement>,
        otherwise: Option<Box<Statement>>,
    },
    Assignment {
        left: Expression,
        right: Expression,
    },
}

/// A function definition. The function's own symbol carries its type,
/// including the parameter list; the first `parameters.len()` entries of
/// the body block's declarations are the parameters, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub symbol: SymbolId,
    pub body: Statement,
}

/// A whole translation unit: the symbol arena, the file-scope symbols in
/// declaration order, and the function definitions in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationUnit {
    pub symbols: SymbolTable,
    pub globals: Vec<SymbolId>,
    pub functions: Vec<Function>,
}
