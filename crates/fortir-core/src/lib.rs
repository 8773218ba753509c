/*! Core IR types and builders for the fortir lowering pipeline.
 *
 * Runtime lowering needs a structured target: typed values, blocks with
 * explicit terminators, and declared callees. This crate provides those
 * building blocks plus the cursor-based builder the lowering layer drives.
 */

pub mod block;
pub mod builder;
pub mod function;
pub mod instructions;
pub mod module;
pub mod persist;
pub mod source_location;
pub mod types;
pub mod values;

pub use block::{BasicBlock, BlockId, BlockMetadata, Terminator};
pub use builder::FunctionBuilder;
pub use function::{FuncDecl, FuncSignature, Function, FunctionBody, Param};
pub use instructions::Instruction;
pub use module::{Module, ModuleMetadata};
pub use source_location::{SourceFiles, SourceOrigin, SourceSpan, INVALID_SPAN};
pub use types::{FuncType, Type};
pub use values::{Constant, ExprValue, ParamId, TempId, Value};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IrError {
    #[error("Type error: {0}")]
    TypeError(String),
    #[error("Invalid instruction: {0}")]
    InvalidInstruction(String),
    #[error("Builder error: {0}")]
    BuilderError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, IrError>;

#[cfg(test)]
mod tests;
