//! Bytecode generation from the AST.
//!
//! A recursive translator over the arena: expressions compile to the
//! register holding their result, statements compile for their effect.
//! Register allocation is a single monotonic counter seeded at the
//! module's local count - registers are never reused within a chunk, so
//! pressure grows with program size. Good enough at this scale; a
//! Sethi-Ullman style allocator is the obvious upgrade.
//!
//! Local variables do not get their own slot table: an identifier's
//! interned symbol id IS its register number. Registers `0..nlocals` are
//! reserved for that mapping, and the compiler fails loudly on any
//! identifier whose id falls outside it, so the caller must pick
//! `nlocals` larger than the largest symbol id it uses as a variable.

use crate::ast::{AstNode, BinaryOp, Module, ParseValue, UnaryOp};
use crate::error::compile_error;
use crate::intern::Symbol;
use bytecode_system::{CodeChunk, Instruction, REGISTER_CAPACITY};
use core_types::{RillError, Value};

/// Compile a parsed module into a code chunk.
///
/// `nlocals` is the number of registers reserved for named locals; it
/// must exceed every symbol id the module uses as a variable, and the
/// host installs foreign functions into the slots matching their names'
/// symbol ids before running the chunk.
///
/// Compilation is pure: the same module and `nlocals` always produce an
/// identical chunk.
pub fn compile(module: &Module, nlocals: u32) -> Result<CodeChunk, RillError> {
    if nlocals as usize > REGISTER_CAPACITY {
        return Err(compile_error(format!(
            "{} locals exceed the register file capacity of {}",
            nlocals, REGISTER_CAPACITY
        )));
    }
    let mut compiler = Compiler {
        module,
        nlocals,
        chunk: CodeChunk::new(nlocals),
    };
    compiler.compile_statements(&module.root)?;
    compiler.chunk.emit(Instruction::Halt);
    Ok(compiler.chunk)
}

struct Compiler<'a> {
    module: &'a Module,
    nlocals: u32,
    chunk: CodeChunk,
}

/// The VM instruction for a simple binary operator; `None` for `:=`,
/// which never reaches the VM as an opcode.
fn binary_instruction(op: BinaryOp, dest: u8, left: u8, right: u8) -> Option<Instruction> {
    let inst = match op {
        BinaryOp::Add => Instruction::Add { dest, left, right },
        BinaryOp::Sub => Instruction::Sub { dest, left, right },
        BinaryOp::Mul => Instruction::Mul { dest, left, right },
        BinaryOp::Div => Instruction::Div { dest, left, right },
        BinaryOp::Pow => Instruction::Pow { dest, left, right },
        BinaryOp::Lt => Instruction::Lt { dest, left, right },
        BinaryOp::Le => Instruction::Le { dest, left, right },
        BinaryOp::Gt => Instruction::Gt { dest, left, right },
        BinaryOp::Ge => Instruction::Ge { dest, left, right },
        BinaryOp::Eq => Instruction::Eq { dest, left, right },
        BinaryOp::Neq => Instruction::Neq { dest, left, right },
        BinaryOp::Assign => return None,
    };
    Some(inst)
}

impl<'a> Compiler<'a> {
    fn compile_statements(&mut self, seq: &ParseValue) -> Result<(), RillError> {
        for stmt in self.module.arena.list_items(seq) {
            self.compile_statement(stmt)?;
        }
        Ok(())
    }

    fn compile_statement(&mut self, stmt: ParseValue) -> Result<(), RillError> {
        if let ParseValue::Node(id) = &stmt {
            match self.module.arena.get(*id).clone() {
                AstNode::Print { expr } => {
                    let reg = self.compile_expression(expr)?;
                    self.chunk.emit(Instruction::Print { reg });
                    return Ok(());
                }
                AstNode::While { cond, body } => return self.compile_while(cond, body),
                AstNode::If { .. } => return self.compile_if(stmt.clone()),
                // Function definitions are parsed but not lowered; only
                // foreign functions are callable at runtime.
                AstNode::FnDef { .. } => return Ok(()),
                _ => {}
            }
        }
        // Expression statement: side effects already emitted, result
        // register discarded.
        self.compile_expression(stmt)?;
        Ok(())
    }

    /// Compile an expression, returning the register holding its value.
    fn compile_expression(&mut self, value: ParseValue) -> Result<u8, RillError> {
        match value {
            ParseValue::Ident(sym) => self.ident_register(sym),
            ParseValue::Int(n) => self.emit_constant(Value::Int(n)),
            ParseValue::Str(s) => self.emit_constant(Value::Str(s)),
            ParseValue::True => self.emit_constant(Value::True),
            ParseValue::False => self.emit_constant(Value::False),
            ParseValue::Nil => Err(compile_error("cannot compile nil as an expression")),
            ParseValue::Node(id) => match self.module.arena.get(id).clone() {
                AstNode::BinOp { op, left, right } => self.compile_binop(op, left, right),
                AstNode::UnOp { op, expr } => self.compile_unop(op, expr),
                AstNode::Call { callee, args } => self.compile_call(callee, args),
                other => Err(compile_error(format!(
                    "node is not an expression: {:?}",
                    other
                ))),
            },
        }
    }

    fn compile_binop(
        &mut self,
        op: BinaryOp,
        left: ParseValue,
        right: ParseValue,
    ) -> Result<u8, RillError> {
        if op == BinaryOp::Assign {
            let ParseValue::Ident(sym) = left else {
                return Err(compile_error("assignment target must be an identifier"));
            };
            let dest = self.ident_register(sym)?;
            let src = self.compile_expression(right)?;
            self.chunk.emit(Instruction::Copy { dest, src });
            // Assignment is an expression; its value lives in the
            // destination slot.
            return Ok(dest);
        }

        let lreg = self.compile_expression(left)?;
        let rreg = self.compile_expression(right)?;
        let dest = self.alloc_register()?;
        let inst = binary_instruction(op, dest, lreg, rreg)
            .ok_or_else(|| compile_error("operator does not map to an opcode"))?;
        self.chunk.emit(inst);
        Ok(dest)
    }

    fn compile_unop(&mut self, op: UnaryOp, expr: ParseValue) -> Result<u8, RillError> {
        let src = self.compile_expression(expr)?;
        match op {
            // Unary plus is the identity; no instruction.
            UnaryOp::Plus => Ok(src),
            UnaryOp::Minus => {
                let dest = self.alloc_register()?;
                self.chunk.emit(Instruction::Neg { dest, src });
                Ok(dest)
            }
            UnaryOp::Not => {
                let dest = self.alloc_register()?;
                self.chunk.emit(Instruction::Not { dest, src });
                Ok(dest)
            }
        }
    }

    /// Calls reserve the callee register and a contiguous argument block
    /// immediately after it, then fill the slots by copy so that nested
    /// expression evaluation cannot clobber them.
    fn compile_call(&mut self, callee: ParseValue, args: ParseValue) -> Result<u8, RillError> {
        let items = self.module.arena.list_items(&args);
        if items.len() > u8::MAX as usize {
            return Err(compile_error("too many call arguments"));
        }
        let argc = items.len() as u8;

        let base = self.alloc_register()?;
        for _ in 0..argc {
            self.alloc_register()?;
        }

        let callee_reg = self.compile_expression(callee)?;
        self.chunk.emit(Instruction::Copy {
            dest: base,
            src: callee_reg,
        });

        for (ix, arg) in items.into_iter().enumerate() {
            let src = self.compile_expression(arg)?;
            self.chunk.emit(Instruction::Copy {
                dest: base + 1 + ix as u8,
                src,
            });
        }

        let result = self.alloc_register()?;
        self.chunk.emit(Instruction::Call { base, argc, result });
        Ok(result)
    }

    /// While loops use the reserve-then-backpatch idiom: the exit branch
    /// is reserved before the body is compiled and patched once the
    /// address past the loop is known.
    fn compile_while(&mut self, cond: ParseValue, body: ParseValue) -> Result<(), RillError> {
        let start = self.chunk.next_address();
        let cond_reg = self.compile_expression(cond)?;
        let jumper = self.chunk.reserve();
        self.compile_statements(&body)?;
        self.chunk.emit(Instruction::Jmp {
            target: start as u32,
        });
        let exit = self.jump16(self.chunk.next_address())?;
        self.chunk.patch(
            jumper,
            Instruction::Jmpf {
                cond: cond_reg,
                target: exit,
            },
        );
        Ok(())
    }

    /// Each branch compiles like a while condition: reserve a
    /// conditional skip, compile the body, jump past the rest of the
    /// chain, then patch the skip to the start of the next branch.
    fn compile_if(&mut self, head: ParseValue) -> Result<(), RillError> {
        let mut end_jumps = Vec::new();
        let mut current = head;
        loop {
            let ParseValue::Node(id) = &current else {
                return Err(compile_error("malformed if chain"));
            };
            let AstNode::If { cond, body, next } = self.module.arena.get(*id).clone() else {
                return Err(compile_error("malformed if chain"));
            };

            let cond_reg = self.compile_expression(cond)?;
            let skip = self.chunk.reserve();
            self.compile_statements(&body)?;
            if !next.is_nil() {
                end_jumps.push(self.chunk.reserve());
            }
            let target = self.jump16(self.chunk.next_address())?;
            self.chunk.patch(
                skip,
                Instruction::Jmpf {
                    cond: cond_reg,
                    target,
                },
            );

            match next {
                ParseValue::Nil => break,
                ParseValue::Node(next_id)
                    if matches!(self.module.arena.get(next_id), AstNode::If { .. }) =>
                {
                    current = ParseValue::Node(next_id);
                }
                else_body => {
                    self.compile_statements(&else_body)?;
                    break;
                }
            }
        }

        let end = self.chunk.next_address();
        for slot in end_jumps {
            self.chunk.patch(slot, Instruction::Jmp { target: end as u32 });
        }
        Ok(())
    }

    /// An identifier's register is its interned symbol id. The id must
    /// fall inside the reserved local range.
    fn ident_register(&self, sym: Symbol) -> Result<u8, RillError> {
        let reg = sym.as_u32();
        if reg >= self.nlocals {
            return Err(compile_error(format!(
                "identifier '{}' has slot {} outside the {} reserved local registers",
                self.module.interner.resolve(sym),
                reg,
                self.nlocals
            )));
        }
        Ok(reg as u8)
    }

    fn emit_constant(&mut self, value: Value) -> Result<u8, RillError> {
        let index = self.chunk.add_constant(value);
        if index > u16::MAX as usize {
            return Err(compile_error("constant pool overflow"));
        }
        let dest = self.alloc_register()?;
        self.chunk.emit(Instruction::LoadK {
            dest,
            index: index as u16,
        });
        Ok(dest)
    }

    fn alloc_register(&mut self) -> Result<u8, RillError> {
        let reg = self.chunk.alloc_register();
        if reg as usize >= REGISTER_CAPACITY {
            return Err(compile_error("register file exhausted"));
        }
        Ok(reg as u8)
    }

    /// JMPF carries only a 16-bit target, far short of JMP's 26 bits;
    /// a branch target past that range cannot be encoded.
    fn jump16(&self, addr: usize) -> Result<u16, RillError> {
        if addr > u16::MAX as usize {
            return Err(compile_error("conditional jump target out of range"));
        }
        Ok(addr as u16)
    }
}
