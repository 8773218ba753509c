/*! Lowering of the statement forms: STOP, ERROR STOP, and PAUSE.
 *
 * The stop code picks the runtime overload by shape: character data goes to
 * the text entry point as a data-handle/length pair, any scalar goes to the
 * numeric entry point, and an absent code synthesizes numeric zero. The
 * termination-kind and quiet flags always follow the code operands.
 */

use crate::context::LoweringContext;
use crate::emit_call::emit_runtime_call;
use crate::errors::LowerResult;
use crate::marshal::{default_operand, marshal_args, synthesized_flag};
use crate::runtime::{resolve, RuntimeFunc};
use crate::stmt::{PauseStmt, StopStmt};
use fortir_core::builder::FunctionBuilder;
use fortir_core::values::ExprValue;
use tracing::debug;

pub fn lower_stop(
    ctx: &mut LoweringContext,
    builder: &mut FunctionBuilder,
    stmt: &StopStmt,
) -> LowerResult<()> {
    ctx.set_span(stmt.span);
    builder.set_source_location(stmt.span);

    let code = match &stmt.code {
        Some(expr) => Some(ctx.lower_expr(builder, expr)?),
        None => None,
    };
    let quiet = match &stmt.quiet {
        Some(expr) => match ctx.lower_expr(builder, expr)? {
            ExprValue::Scalar(value) => value,
            other => return Err(ctx.unsupported_shape(stmt.kind.name(), &other)),
        },
        None => synthesized_flag(false),
    };
    let error_flag = synthesized_flag(stmt.kind.is_error());

    match code {
        Some(ExprValue::Char { data, len }) => {
            debug!("{} lowered through the text overload", stmt.kind.name());
            let callee = resolve(builder, RuntimeFunc::StopStatementText)?;
            let args = marshal_args(builder, &callee, vec![data, len, error_flag, quiet])?;
            emit_runtime_call(builder, &callee, args)?;
        }
        Some(ExprValue::Scalar(value)) => {
            let callee = resolve(builder, RuntimeFunc::StopStatement)?;
            let args = marshal_args(builder, &callee, vec![value, error_flag, quiet])?;
            emit_runtime_call(builder, &callee, args)?;
        }
        Some(other) => return Err(ctx.unsupported_shape(stmt.kind.name(), &other)),
        None => {
            let callee = resolve(builder, RuntimeFunc::StopStatement)?;
            let zero = default_operand(&callee, 0)?;
            let args = marshal_args(builder, &callee, vec![zero, error_flag, quiet])?;
            emit_runtime_call(builder, &callee, args)?;
        }
    }

    Ok(())
}

pub fn lower_pause(
    ctx: &mut LoweringContext,
    builder: &mut FunctionBuilder,
    stmt: &PauseStmt,
) -> LowerResult<()> {
    ctx.set_span(stmt.span);
    builder.set_source_location(stmt.span);

    let callee = resolve(builder, RuntimeFunc::PauseStatement)?;
    emit_runtime_call(builder, &callee, Vec::new())?;
    Ok(())
}
