//! Target instruction and operand definitions
//!
//! This module defines the subset of 32-bit AT&T-syntax instructions and
//! assembler directives the generator emits. Each variant renders its
//! exact textual form through `Display`; the emitted text is the contract
//! with the external assembler, so the spelling here is load-bearing.

use crate::error::BackendError;
use scc_common::machine::GLOBAL_PREFIX;
use std::fmt;

/// The registers the generator touches. All computed values travel
/// through `%eax` or the FPU stack; there is no register allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reg {
    Eax,
    Esp,
    Ebp,
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reg::Eax => write!(f, "%eax"),
            Reg::Esp => write!(f, "%esp"),
            Reg::Ebp => write!(f, "%ebp"),
        }
    }
}

/// Where an expression's value lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// A frame-relative slot: `<offset>(%ebp)`.
    Frame(i32),
    /// An outgoing-argument slot: `<offset>(%esp)`.
    StackArg(u32),
    /// A global addressed by decorated name.
    Global(String),
    /// An immediate literal: `$<text>`.
    Immediate(String),
    /// A register.
    Register(Reg),
    /// The symbolic frame-size constant of a function: `$<name>.size`.
    FrameSize(String),
}

impl Operand {
    /// A frame slot holding an intermediate result. The zero offset is the
    /// "unallocated" sentinel, so handing it out here is a backend bug.
    pub fn temp(offset: i32) -> Result<Operand, BackendError> {
        if offset == 0 {
            return Err(BackendError::UnassignedTemporary);
        }
        Ok(Operand::Frame(offset))
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Frame(offset) => write!(f, "{}(%ebp)", offset),
            Operand::StackArg(offset) => write!(f, "{}(%esp)", offset),
            Operand::Global(name) => write!(f, "{}{}", GLOBAL_PREFIX, name),
            Operand::Immediate(text) => write!(f, "${}", text),
            Operand::Register(reg) => write!(f, "{}", reg),
            Operand::FrameSize(name) => write!(f, "${}.size", name),
        }
    }
}

/// One line of output: an instruction, a directive, or a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsmInst {
    /// An entry label, decorated with the global prefix.
    Label(String),
    Movl(Operand, Operand),
    Fldl(Operand),
    Fstpl(Operand),
    Pushl(Operand),
    Popl(Operand),
    Subl(Operand, Operand),
    Call(String),
    Ret,
    /// `.set <name>.size, <bytes>` - binds a function's symbolic frame size.
    SetFrameSize(String, i32),
    /// `.globl <name>` - export an entry label.
    Globl(String),
    /// `.comm <name>, <bytes>` - zero-initialized global reservation.
    Comm(String, u32),
    /// A blank separator line.
    Blank,
}

impl fmt::Display for AsmInst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsmInst::Label(name) => write!(f, "{}{}:", GLOBAL_PREFIX, name),
            AsmInst::Movl(src, dst) => write!(f, "\tmovl\t{}, {}", src, dst),
            AsmInst::Fldl(src) => write!(f, "\tfldl\t{}", src),
            AsmInst::Fstpl(dst) => write!(f, "\tfstpl\t{}", dst),
            AsmInst::Pushl(src) => write!(f, "\tpushl\t{}", src),
            AsmInst::Popl(dst) => write!(f, "\tpopl\t{}", dst),
            AsmInst::Subl(src, dst) => write!(f, "\tsubl\t{}, {}", src, dst),
            AsmInst::Call(name) => write!(f, "\tcall\t{}{}", GLOBAL_PREFIX, name),
            AsmInst::Ret => write!(f, "\tret"),
            AsmInst::SetFrameSize(name, size) => write!(f, "\t.set\t{}.size, {}", name, size),
            AsmInst::Globl(name) => write!(f, "\t.globl\t{}{}", GLOBAL_PREFIX, name),
            AsmInst::Comm(name, size) => write!(f, "\t.comm\t{}{}, {}", GLOBAL_PREFIX, name, size),
            AsmInst::Blank => Ok(()),
        }
    }
}
