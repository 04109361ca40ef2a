//! Storage allocation
//!
//! Walks a function's body assigning every not-yet-allocated symbol a
//! frame-relative slot and computing the deepest extent any execution path
//! needs. Offsets grow downward (more negative) for locals and upward for
//! parameters; zero is the "unallocated or global" sentinel.
//!
//! Sibling statements execute sequentially, so each is allocated from the
//! same starting offset and only the deepest result is kept; the branches
//! of an if-then-else may likewise overlap since at most one runs.

use crate::error::BackendError;
use log::debug;
use scc_common::ast::{Function, Statement};
use scc_common::machine::PARAM_OFFSET;
use scc_common::{SymbolId, SymbolTable};

/// Allocate storage for one statement, updating `offset` to the deepest
/// (most negative) extent any path through the statement requires.
pub fn allocate(
    stmt: &Statement,
    symbols: &mut SymbolTable,
    offset: &mut i32,
) -> Result<(), BackendError> {
    match stmt {
        Statement::Block { decls, stmts } => {
            for &id in decls {
                allocate_symbol(id, symbols, offset)?;
            }

            // Each sibling starts from the same offset; the block is as
            // deep as its deepest statement, not the sum of them.
            let saved = *offset;
            for stmt in stmts {
                let mut temp = saved;
                allocate(stmt, symbols, &mut temp)?;
                *offset = (*offset).min(temp);
            }
            Ok(())
        }

        Statement::While { body, .. } | Statement::For { body, .. } => {
            allocate(body, symbols, offset)
        }

        Statement::If { then, otherwise, .. } => {
            let saved = *offset;
            allocate(then, symbols, offset)?;

            // At most one branch runs, so the branches may share storage.
            if let Some(otherwise) = otherwise {
                let mut temp = saved;
                allocate(otherwise, symbols, &mut temp)?;
                *offset = (*offset).min(temp);
            }
            Ok(())
        }

        Statement::Assignment { .. } => Ok(()),
    }
}

/// Assign the next slot to a declared symbol, unless it already has one
/// (parameters are assigned before the body is walked).
fn allocate_symbol(
    id: SymbolId,
    symbols: &mut SymbolTable,
    offset: &mut i32,
) -> Result<(), BackendError> {
    let symbol = symbols.get(id).ok_or(BackendError::UnknownSymbol(id))?;
    if symbol.offset != 0 {
        return Ok(());
    }

    let size = symbol.ty.size()? as i32;
    *offset -= size;

    if let Some(symbol) = symbols.get_mut(id) {
        symbol.offset = *offset;
        debug!("allocated '{}' at offset {}", symbol.name, symbol.offset);
    }
    Ok(())
}

/// Allocate storage for a whole function: parameters receive positive
/// offsets above the call-linkage area, advancing by their promoted size;
/// the body is then allocated from offset zero. Returns the deepest local
/// extent, which the generator folds into the final frame size.
pub fn allocate_function(
    function: &Function,
    symbols: &mut SymbolTable,
) -> Result<i32, BackendError> {
    let fn_symbol = symbols
        .get(function.symbol)
        .ok_or(BackendError::UnknownSymbol(function.symbol))?;
    let name = fn_symbol.name.clone();
    let params = fn_symbol
        .ty
        .parameters()
        .ok_or(BackendError::UnsupportedForm(
            "function symbol without a function type",
        ))?
        .to_vec();

    let Statement::Block { decls, .. } = &function.body else {
        return Err(BackendError::UnsupportedForm(
            "function body is not a block",
        ));
    };
    if decls.len() < params.len() {
        return Err(BackendError::ParameterMismatch(name));
    }
    let param_ids: Vec<SymbolId> = decls[..params.len()].to_vec();

    let mut offset = PARAM_OFFSET;
    for (id, ty) in param_ids.into_iter().zip(&params) {
        let symbol = symbols.get_mut(id).ok_or(BackendError::UnknownSymbol(id))?;
        symbol.offset = offset;
        debug!("allocated parameter '{}' at offset {}", symbol.name, offset);
        offset += ty.promote().size()? as i32;
    }

    let mut offset = 0;
    allocate(&function.body, symbols, &mut offset)?;
    debug!("function '{}' locals reach offset {}", name, offset);
    Ok(offset)
}
