/*! Cursor-based construction of one function at a time.
 *
 * `FunctionBuilder` borrows the module so callee declarations stay reachable
 * while a body is being built. It owns the insertion cursor: instructions are
 * appended at the current block's end, terminators seal a block exactly once,
 * and `split_block` opens a fresh block after a sealed one.
 */

use crate::block::{BasicBlock, BlockId, Terminator};
use crate::function::{FuncDecl, FuncSignature, Function, Param};
use crate::instructions::Instruction;
use crate::module::Module;
use crate::source_location::{SourceSpan, INVALID_SPAN};
use crate::types::Type;
use crate::values::{Constant, ParamId, Value};
use crate::{IrError, Result};

pub struct FunctionBuilder<'m> {
    module: &'m mut Module,
    function: Function,
    cursor: BlockId,
    current_span: SourceSpan,
}

impl<'m> FunctionBuilder<'m> {
    pub fn new(module: &'m mut Module, name: &str) -> Self {
        let function = Function::new(FuncSignature::new(name));
        let cursor = function.body.entry_block;

        Self {
            module,
            function,
            cursor,
            current_span: INVALID_SPAN,
        }
    }

    pub fn param(&mut self, name: &str, ty: Type) -> &mut Self {
        self.function.signature.params.push(Param::new(name, ty));
        self
    }

    pub fn returns(&mut self, ty: Type) -> &mut Self {
        self.function.signature.ret = ty;
        self
    }

    pub fn get_param(&self, index: usize) -> Value {
        Value::Param(ParamId(index as u32))
    }

    pub fn declare_func(&mut self, decl: FuncDecl) -> Result<()> {
        self.module.declare_func(decl)?;
        Ok(())
    }

    pub fn find_decl(&self, name: &str) -> Option<&FuncDecl> {
        self.module.find_decl(name)
    }

    pub fn set_source_location(&mut self, span: SourceSpan) {
        self.current_span = span;
    }

    pub fn create_block(&mut self) -> BlockId {
        self.function.body.create_block()
    }

    pub fn switch_to_block(&mut self, block: BlockId) -> Result<()> {
        if !self.function.body.blocks.contains_key(&block) {
            return Err(IrError::BuilderError(format!(
                "{} does not exist in function {}",
                block,
                self.function.name()
            )));
        }

        self.cursor = block;
        Ok(())
    }

    pub fn current_block(&self) -> BlockId {
        self.cursor
    }

    fn cursor_block_mut(&mut self) -> Result<&mut BasicBlock> {
        let id = self.cursor;
        self.function
            .body
            .get_block_mut(id)
            .ok_or_else(|| IrError::BuilderError(format!("{} not found", id)))
    }

    fn push_instruction(&mut self, inst: Instruction) -> Result<()> {
        let span = self.current_span;
        let block = self.cursor_block_mut()?;

        if block.is_terminated() {
            return Err(IrError::BuilderError(format!(
                "{} already sealed",
                block.id
            )));
        }

        if span.is_valid() {
            block.metadata.set_location(block.instructions.len(), span);
        }
        block.instructions.push(inst);
        Ok(())
    }

    pub fn new_temp(&mut self, ty: Type) -> Value {
        Value::Temp(self.function.body.add_temp(ty))
    }

    pub fn value_type(&self, value: &Value) -> Result<Type> {
        match value {
            Value::Constant(c) => Ok(c.ty()),
            Value::Temp(id) => self
                .function
                .body
                .temp_type(*id)
                .cloned()
                .ok_or_else(|| IrError::TypeError(format!("unknown temp {}", id))),
            Value::Param(id) => self
                .function
                .signature
                .params
                .get(id.0 as usize)
                .map(|p| p.ty.clone())
                .ok_or_else(|| IrError::TypeError(format!("unknown param {}", id))),
        }
    }

    pub fn int_constant(&self, value: i64, ty: &Type) -> Result<Value> {
        let constant = match ty {
            Type::Int(bits) => Constant::Int(value, *bits),
            Type::Index => Constant::Index(value),
            Type::Logical => Constant::Logical(value != 0),
            other => {
                return Err(IrError::TypeError(format!(
                    "cannot build an integer constant of type {}",
                    other
                )))
            }
        };
        Ok(Value::Constant(constant))
    }

    pub fn logical_constant(&self, value: bool) -> Value {
        Value::Constant(Constant::Logical(value))
    }

    pub fn str_constant(&self, text: &str) -> Value {
        Value::Constant(Constant::Str(text.to_string()))
    }

    pub fn null_constant(&self, ty: Type) -> Value {
        Value::Constant(Constant::Null(ty))
    }

    /// Identity when the value already has the target type; otherwise an
    /// explicit `Convert` is appended and its result returned.
    pub fn convert(&mut self, value: Value, to: &Type) -> Result<Value> {
        if self.value_type(&value)? == *to {
            return Ok(value);
        }

        let result = self.new_temp(to.clone());
        self.push_instruction(Instruction::Convert {
            result: result.clone(),
            value,
            to: to.clone(),
        })?;
        Ok(result)
    }

    /// The callee must already be declared; non-void callees get a typed
    /// result temp.
    pub fn call(&mut self, callee: &str, args: Vec<Value>) -> Result<Option<Value>> {
        let ret = self
            .module
            .find_decl(callee)
            .map(|decl| decl.ty.ret.clone())
            .ok_or_else(|| {
                IrError::InvalidInstruction(format!("call to undeclared function {}", callee))
            })?;

        let result = if ret.is_void() {
            None
        } else {
            Some(self.new_temp(ret))
        };

        self.push_instruction(Instruction::Call {
            result: result.clone(),
            callee: callee.to_string(),
            args,
        })?;
        Ok(result)
    }

    pub fn set_terminator(&mut self, terminator: Terminator) -> Result<()> {
        let block = self.cursor_block_mut()?;

        if block.is_terminated() {
            return Err(IrError::BuilderError(format!(
                "{} already sealed",
                block.id
            )));
        }

        block.terminator = terminator;
        Ok(())
    }

    pub fn jump(&mut self, target: BlockId) -> Result<()> {
        self.set_terminator(Terminator::Jump(target))
    }

    pub fn branch(
        &mut self,
        condition: Value,
        then_block: BlockId,
        else_block: BlockId,
    ) -> Result<()> {
        self.set_terminator(Terminator::Branch {
            condition,
            then_block,
            else_block,
        })
    }

    pub fn return_value(&mut self, value: Value) -> Result<()> {
        self.set_terminator(Terminator::Return(Some(value)))
    }

    pub fn return_void(&mut self) -> Result<()> {
        self.set_terminator(Terminator::Return(None))
    }

    pub fn unreachable(&mut self) -> Result<()> {
        self.set_terminator(Terminator::Unreachable)
    }

    pub fn is_terminated(&self) -> Result<bool> {
        let block = self
            .function
            .body
            .get_block(self.cursor)
            .ok_or_else(|| IrError::BuilderError(format!("{} not found", self.cursor)))?;

        Ok(block.is_terminated())
    }

    /// Opens a fresh block after the current, sealed one and moves the
    /// cursor to its start. Splitting an unsealed block is an error.
    pub fn split_block(&mut self) -> Result<BlockId> {
        if !self.is_terminated()? {
            return Err(IrError::BuilderError(format!(
                "cannot split {} before it is sealed",
                self.cursor
            )));
        }

        let new_block = self.function.body.create_block();
        self.cursor = new_block;
        Ok(new_block)
    }

    pub fn current_function(&self) -> &Function {
        &self.function
    }

    pub fn module(&self) -> &Module {
        self.module
    }

    pub fn build(self) -> Result<()> {
        for (id, block) in &self.function.body.blocks {
            if !block.is_terminated() {
                return Err(IrError::BuilderError(format!(
                    "function {}: {} has no terminator",
                    self.function.name(),
                    id
                )));
            }
        }

        self.module.add_function(self.function);
        Ok(())
    }
}
