//! The Simple C type system
//!
//! A type pairs a base specifier with a declarator and an indirection
//! count. Types are immutable once attached to a symbol or tree node; the
//! backend only ever asks them for their size, their promoted form, and a
//! few predicates.

use crate::machine::{SIZEOF_CHAR, SIZEOF_DOUBLE, SIZEOF_INT, SIZEOF_PTR};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Sizing a type that does not denote an object is a contract violation
/// between compiler phases, never a user-facing error.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeError {
    #[error("cannot take the size of a function type")]
    SizeOfFunction,

    #[error("cannot take the size of an error type")]
    SizeOfError,
}

/// Base type specifiers of Simple C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Specifier {
    Char,
    Int,
    Double,
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Specifier::Char => write!(f, "char"),
            Specifier::Int => write!(f, "int"),
            Specifier::Double => write!(f, "double"),
        }
    }
}

/// Structural classification of a type, as opposed to its specifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Declarator {
    Scalar,
    Array { length: u32 },
    Function { parameters: Vec<Type> },
    Error,
}

/// A complete Simple C type: specifier, pointer indirection, declarator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Type {
    specifier: Specifier,
    indirection: u32,
    declarator: Declarator,
}

impl Type {
    pub fn scalar(specifier: Specifier, indirection: u32) -> Self {
        Self {
            specifier,
            indirection,
            declarator: Declarator::Scalar,
        }
    }

    pub fn array(specifier: Specifier, indirection: u32, length: u32) -> Self {
        Self {
            specifier,
            indirection,
            declarator: Declarator::Array { length },
        }
    }

    pub fn function(specifier: Specifier, indirection: u32, parameters: Vec<Type>) -> Self {
        Self {
            specifier,
            indirection,
            declarator: Declarator::Function { parameters },
        }
    }

    pub fn error() -> Self {
        Self {
            specifier: Specifier::Int,
            indirection: 0,
            declarator: Declarator::Error,
        }
    }

    pub fn specifier(&self) -> Specifier {
        self.specifier
    }

    pub fn indirection(&self) -> u32 {
        self.indirection
    }

    pub fn declarator(&self) -> &Declarator {
        &self.declarator
    }

    /// The parameter types, if this is a function type.
    pub fn parameters(&self) -> Option<&[Type]> {
        match &self.declarator {
            Declarator::Function { parameters } => Some(parameters),
            _ => None,
        }
    }

    /// Size of this type in bytes. Function and error types have no size.
    pub fn size(&self) -> Result<u32, TypeError> {
        let count = match &self.declarator {
            Declarator::Scalar => 1,
            Declarator::Array { length } => *length,
            Declarator::Function { .. } => return Err(TypeError::SizeOfFunction),
            Declarator::Error => return Err(TypeError::SizeOfError),
        };

        if self.indirection > 0 {
            return Ok(count * SIZEOF_PTR);
        }

        let width = match self.specifier {
            Specifier::Char => SIZEOF_CHAR,
            Specifier::Int => SIZEOF_INT,
            Specifier::Double => SIZEOF_DOUBLE,
        };

        Ok(count * width)
    }

    /// The promoted form of this type when passed as an argument: a plain
    /// `char` widens to `int` and an array decays to a pointer.
    pub fn promote(&self) -> Type {
        match &self.declarator {
            Declarator::Scalar
                if self.indirection == 0 && self.specifier == Specifier::Char =>
            {
                Type::scalar(Specifier::Int, 0)
            }
            Declarator::Array { .. } => Type::scalar(self.specifier, self.indirection + 1),
            _ => self.clone(),
        }
    }

    /// True for a floating-point scalar, which travels through the FPU.
    pub fn is_real(&self) -> bool {
        self.specifier == Specifier::Double
            && self.indirection == 0
            && self.declarator == Declarator::Scalar
    }

    pub fn is_function(&self) -> bool {
        matches!(self.declarator, Declarator::Function { .. })
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.specifier)?;
        for _ in 0..self.indirection {
            write!(f, "*")?;
        }
        match &self.declarator {
            Declarator::Scalar => Ok(()),
            Declarator::Array { length } => write!(f, "[{}]", length),
            Declarator::Function { .. } => write!(f, "()"),
            Declarator::Error => write!(f, "<error>"),
        }
    }
}
