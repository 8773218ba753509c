use crate::errors::{LowerError, LowerResult};
use crate::runtime::ResolvedCallee;
use fortir_core::builder::FunctionBuilder;
use fortir_core::values::Value;
use tracing::debug;

/// Appends the call at the cursor. For a never-returns callee the block is
/// sealed with an unreachable terminator and the cursor moves to a fresh
/// block, so the caller can keep emitting whatever follows in source order.
pub fn emit_runtime_call(
    builder: &mut FunctionBuilder,
    callee: &ResolvedCallee,
    args: Vec<Value>,
) -> LowerResult<Option<Value>> {
    if args.len() != callee.ty.params.len() {
        return Err(LowerError::SignatureMismatch {
            callee: callee.symbol.to_string(),
            expected: callee.ty.params.len(),
            found: args.len(),
        });
    }

    let result = builder.call(callee.symbol, args)?;

    if callee.never_returns {
        builder.unreachable()?;
        let resumed = builder.split_block()?;
        debug!("sealed block after {}, cursor at {}", callee.symbol, resumed);
    }

    Ok(result)
}
