use crate::context::LoweringContext;
use crate::errors::{LowerError, LowerResult};
use crate::runtime::ResolvedCallee;
use fortir_core::builder::FunctionBuilder;
use fortir_core::values::{Constant, Value};
use fortir_core::IrError;
use tracing::trace;

/// Converts each argument to the exact parameter type of the resolved
/// callee, in signature order. The count is checked before any conversion
/// is appended, so a mismatch leaves the block untouched.
pub fn marshal_args(
    builder: &mut FunctionBuilder,
    callee: &ResolvedCallee,
    args: Vec<Value>,
) -> LowerResult<Vec<Value>> {
    if args.len() != callee.ty.params.len() {
        return Err(LowerError::SignatureMismatch {
            callee: callee.symbol.to_string(),
            expected: callee.ty.params.len(),
            found: args.len(),
        });
    }

    let mut marshalled = Vec::with_capacity(args.len());
    for (value, target) in args.into_iter().zip(callee.ty.params.iter()) {
        marshalled.push(builder.convert(value, target)?);
    }

    trace!(
        "marshalled {} arguments for {}",
        marshalled.len(),
        callee.symbol
    );
    Ok(marshalled)
}

/// Fills the trailing source-location slots: originating file name, then
/// line number. A span that does not resolve carries `"unknown"` and line 0.
pub fn append_source_location(ctx: &LoweringContext, args: &mut Vec<Value>) {
    let origin = ctx.files().origin(ctx.span());
    args.push(Value::Constant(Constant::Str(origin.file)));
    args.push(Value::Constant(Constant::Int(i64::from(origin.line), 32)));
}

/// A synthesized logical flag operand.
pub fn synthesized_flag(value: bool) -> Value {
    Value::Constant(Constant::Logical(value))
}

/// Zero of the callee's parameter at `index`, standing in for an operand
/// the source statement left out.
pub fn default_operand(callee: &ResolvedCallee, index: usize) -> LowerResult<Value> {
    let ty = callee
        .ty
        .param(index)
        .ok_or_else(|| LowerError::SignatureMismatch {
            callee: callee.symbol.to_string(),
            expected: callee.ty.params.len(),
            found: index + 1,
        })?;

    Constant::zero(ty).map(Value::Constant).ok_or_else(|| {
        LowerError::Ir(IrError::TypeError(format!(
            "no zero constant of type {}",
            ty
        )))
    })
}
