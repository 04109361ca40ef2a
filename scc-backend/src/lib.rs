//! Simple C Compiler - Backend
//!
//! This crate performs the final phase of compilation: storage allocation
//! and code generation. Given a type-checked translation unit it assigns
//! every local, parameter, and temporary a frame slot, then emits x86-32
//! AT&T assembly realizing the program against that layout.

pub mod allocator;
pub mod asm;
pub mod emit;
pub mod error;
pub mod generator;

pub use allocator::{allocate, allocate_function};
pub use asm::{AsmInst, Operand, Reg};
pub use emit::emit_instructions;
pub use error::BackendError;
pub use generator::generate_unit;

use scc_common::TranslationUnit;

/// Main entry point for code generation: allocate and generate every
/// function, then the global reservations, producing the final text.
pub fn generate_assembly(unit: &mut TranslationUnit) -> Result<String, BackendError> {
    generate_unit(unit)
}

#[cfg(test)]
mod tests;
