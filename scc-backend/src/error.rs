//! Backend error definitions
//!
//! Every variant here reports a violated internal invariant or an
//! explicitly out-of-scope form, never a user-facing diagnostic; those are
//! the front end's job and are assumed already resolved.

use scc_common::{SymbolId, TypeError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error(transparent)]
    Type(#[from] TypeError),

    #[error("intermediate value was never assigned a stack slot")]
    UnassignedTemporary,

    #[error("unsupported form in code generation: {0}")]
    UnsupportedForm(&'static str),

    #[error("symbol id {0:?} does not resolve in the arena")]
    UnknownSymbol(SymbolId),

    #[error("function '{0}' declares fewer symbols than it has parameters")]
    ParameterMismatch(String),
}
