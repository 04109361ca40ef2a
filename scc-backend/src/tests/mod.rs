//! End-to-end tests: allocate and generate whole translation units and
//! compare the emitted text against known-good output.

use crate::generate_assembly;
use pretty_assertions::assert_eq;
use scc_common::ast::{Expression, Function, Statement, TranslationUnit};
use scc_common::types::{Specifier, Type};
use scc_common::{Symbol, SymbolTable};

fn int() -> Type {
    Type::scalar(Specifier::Int, 0)
}

fn lit(text: &str) -> Expression {
    Expression::Integer {
        value: text.to_string(),
    }
}

#[test]
fn test_golden_function_with_global() {
    // int count; int main(void) { int x; x = 7; }
    let mut symbols = SymbolTable::new();
    let count = symbols.add(Symbol::new("count", int()));
    let main = symbols.add(Symbol::new(
        "main",
        Type::function(Specifier::Int, 0, vec![]),
    ));
    let x = symbols.add(Symbol::new("x", int()));

    let mut unit = TranslationUnit {
        symbols,
        globals: vec![count, main],
        functions: vec![Function {
            symbol: main,
            body: Statement::Block {
                decls: vec![x],
                stmts: vec![Statement::Assignment {
                    left: Expression::Identifier { symbol: x },
                    right: lit("7"),
                }],
            },
        }],
    };

    let asm = generate_assembly(&mut unit).unwrap();
    assert_eq!(
        asm,
        "\
main:
\tpushl\t%ebp
\tmovl\t%esp, %ebp
\tsubl\t$main.size, %esp
\tmovl\t$7, -4(%ebp)
\tmovl\t%ebp, %esp
\tpopl\t%ebp
\tret

\t.set\tmain.size, 8
\t.globl\tmain

\t.comm\tcount, 4
"
    );
}

#[test]
fn test_parameters_are_read_above_the_frame_base() {
    // int first(int a, int b) { int r; r = a; }
    let mut symbols = SymbolTable::new();
    let first = symbols.add(Symbol::new(
        "first",
        Type::function(Specifier::Int, 0, vec![int(), int()]),
    ));
    let a = symbols.add(Symbol::new("a", int()));
    let b = symbols.add(Symbol::new("b", int()));
    let r = symbols.add(Symbol::new("r", int()));

    let mut unit = TranslationUnit {
        symbols,
        globals: vec![first],
        functions: vec![Function {
            symbol: first,
            body: Statement::Block {
                decls: vec![a, b, r],
                stmts: vec![Statement::Assignment {
                    left: Expression::Identifier { symbol: r },
                    right: Expression::Identifier { symbol: a },
                }],
            },
        }],
    };

    let asm = generate_assembly(&mut unit).unwrap();
    assert!(asm.contains("\tmovl\t8(%ebp), %eax\n\tmovl\t%eax, -4(%ebp)\n"));
    assert_eq!(unit.symbols.get(b).unwrap().offset, 12);
}

#[test]
fn test_frame_size_covers_calls_and_stays_aligned() {
    // int wide(int, int, int, int); int narrow(int, int);
    // int main(void) { int x; x = narrow(1, 2); x = wide(1, 2, 3, 4); }
    let mut symbols = SymbolTable::new();
    let wide = symbols.add(Symbol::new(
        "wide",
        Type::function(Specifier::Int, 0, vec![int(), int(), int(), int()]),
    ));
    let narrow = symbols.add(Symbol::new(
        "narrow",
        Type::function(Specifier::Int, 0, vec![int(), int()]),
    ));
    let main = symbols.add(Symbol::new(
        "main",
        Type::function(Specifier::Int, 0, vec![]),
    ));
    let x = symbols.add(Symbol::new("x", int()));

    let assign_call = |x, callee, args: Vec<Expression>| Statement::Assignment {
        left: Expression::Identifier { symbol: x },
        right: Expression::Call {
            callee,
            args,
            ty: int(),
        },
    };

    let mut unit = TranslationUnit {
        symbols,
        globals: vec![wide, narrow, main],
        functions: vec![Function {
            symbol: main,
            body: Statement::Block {
                decls: vec![x],
                stmts: vec![
                    assign_call(x, narrow, vec![lit("1"), lit("2")]),
                    assign_call(x, wide, vec![lit("1"), lit("2"), lit("3"), lit("4")]),
                ],
            },
        }],
    };

    let asm = generate_assembly(&mut unit).unwrap();

    // Locals reach -4, the two call results extend to -12, and the
    // larger call needs 16 argument bytes: 12 + 16 = 28, padded to 32.
    assert!(asm.contains("\t.set\tmain.size, 32\n"));

    let size: i32 = asm
        .lines()
        .find_map(|line| line.strip_prefix("\t.set\tmain.size, "))
        .and_then(|s| s.parse().ok())
        .unwrap();
    assert_eq!(size % 8, 0);

    // Arguments land at increasing stack offsets for each call
    assert!(asm.contains("\tmovl\t%eax, 0(%esp)\n"));
    assert!(asm.contains("\tmovl\t%eax, 12(%esp)\n"));
    assert!(asm.contains("\tcall\tnarrow\n"));
    assert!(asm.contains("\tcall\twide\n"));
}

#[test]
fn test_generation_is_deterministic() {
    let mut symbols = SymbolTable::new();
    let g = symbols.add(Symbol::new("g", Type::array(Specifier::Double, 0, 3)));
    let main = symbols.add(Symbol::new(
        "main",
        Type::function(Specifier::Int, 0, vec![]),
    ));
    let x = symbols.add(Symbol::new("x", int()));

    let unit = TranslationUnit {
        symbols,
        globals: vec![g, main],
        functions: vec![Function {
            symbol: main,
            body: Statement::Block {
                decls: vec![x],
                stmts: vec![Statement::Assignment {
                    left: Expression::Identifier { symbol: x },
                    right: lit("0"),
                }],
            },
        }],
    };

    let first = generate_assembly(&mut unit.clone()).unwrap();
    let second = generate_assembly(&mut unit.clone()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_globals_follow_all_functions() {
    let mut symbols = SymbolTable::new();
    let before = symbols.add(Symbol::new("before", int()));
    let main = symbols.add(Symbol::new(
        "main",
        Type::function(Specifier::Int, 0, vec![]),
    ));

    let mut unit = TranslationUnit {
        symbols,
        globals: vec![before, main],
        functions: vec![Function {
            symbol: main,
            body: Statement::Block {
                decls: vec![],
                stmts: vec![],
            },
        }],
    };

    let asm = generate_assembly(&mut unit).unwrap();
    let comm = asm.find("\t.comm\tbefore").unwrap();
    let ret = asm.find("\tret").unwrap();
    assert!(comm > ret, "globals must come after the function bodies");
}
