/*! Unified interface for Fortran statement lowering.
 *
 * Single import for everything you need: building IR modules, lowering
 * statements onto the runtime library, and emitting the text format.
 */

pub use fortir_core as core;
pub use fortir_emit as emit;
pub use fortir_lower as lower;

pub use fortir_core::{
    block::{BasicBlock, BlockId, Terminator},
    builder::FunctionBuilder,
    function::Function,
    instructions::Instruction,
    module::Module,
    source_location::{SourceFiles, SourceSpan},
    types::Type,
    values::Value,
};

pub use fortir_emit::{EmitterConfig, Emitter, IrEmitter};

pub use fortir_lower::{
    lower_pause, lower_pointer_associated, lower_random_init, lower_random_number,
    lower_random_seed, lower_stop, LowerError, LoweringContext, RuntimeFunc,
};
