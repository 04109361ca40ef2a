//! Text emission
//!
//! Renders an ordered instruction list into the final assembly text. The
//! output stream is append-only: the order of the list is the order of
//! the file.

use crate::asm::AsmInst;

/// Render instructions to assembly text, one line per instruction.
pub fn emit_instructions(insts: &[AsmInst]) -> String {
    let mut out = String::new();
    for inst in insts {
        out.push_str(&inst.to_string());
        out.push('\n');
    }
    out
}
