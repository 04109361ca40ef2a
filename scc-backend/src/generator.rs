//! Code generation
//!
//! The generator walks an allocated tree and emits AT&T-syntax x86-32
//! instructions. Each function's body is generated into a buffer while
//! the frame statistics accumulate; only then is the final frame size
//! known, so the label, prologue, buffered body, epilogue, and the
//! symbolic size definition are emitted together in one ordered pass.

use crate::allocator::allocate_function;
use crate::asm::{AsmInst, Operand, Reg};
use crate::emit::emit_instructions;
use crate::error::BackendError;
use log::debug;
use scc_common::ast::{Expression, Function, Statement, TranslationUnit};
use scc_common::machine::{PARAM_OFFSET, SIZEOF_REG, STACK_ALIGNMENT};
use scc_common::types::Type;
use scc_common::{SymbolId, SymbolTable};

/// Generate assembly for a whole translation unit: each function in
/// source order, then the global reservations at the end.
pub fn generate_unit(unit: &mut TranslationUnit) -> Result<String, BackendError> {
    let mut insts = Vec::new();

    for function in &unit.functions {
        let depth = allocate_function(function, &mut unit.symbols)?;
        FunctionGenerator::new(&unit.symbols, depth).generate(function, &mut insts)?;
    }

    generate_globals(&unit.symbols, &unit.globals, &mut insts)?;
    Ok(emit_instructions(&insts))
}

/// Emit a zero-initialized reservation for every non-function global.
fn generate_globals(
    symbols: &SymbolTable,
    globals: &[SymbolId],
    out: &mut Vec<AsmInst>,
) -> Result<(), BackendError> {
    for &id in globals {
        let symbol = symbols.get(id).ok_or(BackendError::UnknownSymbol(id))?;
        if !symbol.ty.is_function() {
            out.push(AsmInst::Comm(symbol.name.clone(), symbol.ty.size()?));
        }
    }
    Ok(())
}

/// Bytes needed to push `offset` out to the next alignment boundary.
fn align(offset: i32) -> i32 {
    if offset % STACK_ALIGNMENT == 0 {
        return 0;
    }
    STACK_ALIGNMENT - offset.abs() % STACK_ALIGNMENT
}

/// Per-function generation state. The running offset continues where the
/// allocator stopped, so temporaries extend the same frame; `max_args` is
/// the high-water mark of outgoing-argument bytes across all calls.
struct FunctionGenerator<'a> {
    symbols: &'a SymbolTable,
    offset: i32,
    max_args: u32,
    body: Vec<AsmInst>,
}

impl<'a> FunctionGenerator<'a> {
    fn new(symbols: &'a SymbolTable, locals_depth: i32) -> Self {
        Self {
            symbols,
            offset: locals_depth,
            max_args: 0,
            body: Vec::new(),
        }
    }

    fn generate(mut self, function: &Function, out: &mut Vec<AsmInst>) -> Result<(), BackendError> {
        let name = self
            .symbols
            .get(function.symbol)
            .ok_or(BackendError::UnknownSymbol(function.symbol))?
            .name
            .clone();

        self.generate_stmt(&function.body)?;

        // The frame covers the deepest locals and temporaries plus the
        // worst-case outgoing-argument area, padded out to the stack
        // alignment boundary.
        let mut offset = self.offset;
        offset -= self.max_args as i32;
        offset -= align(offset - PARAM_OFFSET);
        let frame_size = -offset;
        debug!(
            "function '{}': frame size {} (max outgoing arguments {})",
            name, frame_size, self.max_args
        );

        out.push(AsmInst::Label(name.clone()));
        out.push(AsmInst::Pushl(Operand::Register(Reg::Ebp)));
        out.push(AsmInst::Movl(
            Operand::Register(Reg::Esp),
            Operand::Register(Reg::Ebp),
        ));
        out.push(AsmInst::Subl(
            Operand::FrameSize(name.clone()),
            Operand::Register(Reg::Esp),
        ));

        out.append(&mut self.body);

        out.push(AsmInst::Movl(
            Operand::Register(Reg::Ebp),
            Operand::Register(Reg::Esp),
        ));
        out.push(AsmInst::Popl(Operand::Register(Reg::Ebp)));
        out.push(AsmInst::Ret);
        out.push(AsmInst::Blank);
        out.push(AsmInst::SetFrameSize(name.clone(), frame_size));
        out.push(AsmInst::Globl(name));
        out.push(AsmInst::Blank);
        Ok(())
    }

    fn generate_stmt(&mut self, stmt: &Statement) -> Result<(), BackendError> {
        match stmt {
            Statement::Block { stmts, .. } => {
                for stmt in stmts {
                    self.generate_stmt(stmt)?;
                }
                Ok(())
            }
            Statement::Assignment { left, right } => self.generate_assignment(left, right),
            Statement::While { .. } => Err(BackendError::UnsupportedForm("while statement")),
            Statement::For { .. } => Err(BackendError::UnsupportedForm("for statement")),
            Statement::If { .. } => Err(BackendError::UnsupportedForm("if statement")),
        }
    }

    /// Render a directly-addressable expression without emitting code.
    fn operand(&self, expr: &Expression) -> Result<Operand, BackendError> {
        match expr {
            Expression::Identifier { symbol } => {
                let symbol = self
                    .symbols
                    .get(*symbol)
                    .ok_or(BackendError::UnknownSymbol(*symbol))?;
                if symbol.offset == 0 {
                    Ok(Operand::Global(symbol.name.clone()))
                } else {
                    Ok(Operand::Frame(symbol.offset))
                }
            }
            Expression::Integer { value } => Ok(Operand::Immediate(value.clone())),
            Expression::Call { .. } => Err(BackendError::UnsupportedForm(
                "call used where an addressable operand is required",
            )),
        }
    }

    /// Emit code computing an expression and return the operand where its
    /// value now lives.
    fn generate_expr(&mut self, expr: &Expression) -> Result<Operand, BackendError> {
        match expr {
            Expression::Call { callee, args, ty } => self.generate_call(*callee, args, ty),
            _ => self.operand(expr),
        }
    }

    fn generate_call(
        &mut self,
        callee: SymbolId,
        args: &[Expression],
        ty: &Type,
    ) -> Result<Operand, BackendError> {
        // Resolve every argument first so that nested calls finish before
        // any argument is marshaled into the outgoing area.
        let mut resolved = Vec::with_capacity(args.len());
        for arg in args {
            let operand = self.generate_expr(arg)?;
            let arg_ty = arg
                .ty(self.symbols)
                .ok_or(BackendError::UnsupportedForm("untyped call argument"))?;
            resolved.push((operand, arg_ty));
        }

        let mut bytes: u32 = 0;
        for (operand, arg_ty) in &resolved {
            if arg_ty.is_real() {
                self.body.push(AsmInst::Fldl(operand.clone()));
                self.body.push(AsmInst::Fstpl(Operand::StackArg(bytes)));
            } else {
                self.body
                    .push(AsmInst::Movl(operand.clone(), Operand::Register(Reg::Eax)));
                self.body
                    .push(AsmInst::Movl(Operand::Register(Reg::Eax), Operand::StackArg(bytes)));
            }
            bytes += arg_ty.size()?;
        }

        // Every call shares one outgoing area sized for the worst case
        self.max_args = self.max_args.max(bytes);

        let name = self
            .symbols
            .get(callee)
            .ok_or(BackendError::UnknownSymbol(callee))?
            .name
            .clone();
        self.body.push(AsmInst::Call(name));
        debug!("call uses {} argument bytes (max {})", bytes, self.max_args);

        // Capture the return value into a fresh temporary slot
        let result = self.assign_temp(ty)?;
        if ty.is_real() {
            self.body.push(AsmInst::Fstpl(result.clone()));
        } else {
            self.body
                .push(AsmInst::Movl(Operand::Register(Reg::Eax), result.clone()));
        }
        Ok(result)
    }

    /// Extend the frame by one intermediate slot sized for `ty`. The slot
    /// is never narrower than a register: `movl` stores a full register
    /// even for a char-typed result, and a 1-byte slot would let that
    /// store clobber whatever sits above it.
    fn assign_temp(&mut self, ty: &Type) -> Result<Operand, BackendError> {
        self.offset -= (ty.size()? as i32).max(SIZEOF_REG);
        Operand::temp(self.offset)
    }

    fn generate_assignment(
        &mut self,
        left: &Expression,
        right: &Expression,
    ) -> Result<(), BackendError> {
        let left_ty = left
            .ty(self.symbols)
            .ok_or(BackendError::UnsupportedForm("untyped assignment target"))?;
        if left_ty.is_real() {
            return Err(BackendError::UnsupportedForm(
                "assignment of double width",
            ));
        }

        let dst = match left {
            Expression::Identifier { .. } => self.operand(left)?,
            _ => {
                return Err(BackendError::UnsupportedForm(
                    "assignment to a non-identifier",
                ))
            }
        };
        let src = self.generate_expr(right)?;

        // A memory source must travel through a register; movl has no
        // memory-to-memory form.
        match src {
            Operand::Immediate(_) | Operand::Register(_) => {
                self.body.push(AsmInst::Movl(src, dst));
            }
            _ => {
                self.body.push(AsmInst::Movl(src, Operand::Register(Reg::Eax)));
                self.body.push(AsmInst::Movl(Operand::Register(Reg::Eax), dst));
            }
        }
        Ok(())
    }
}
