/*! Lowering of the intrinsic-call forms: ASSOCIATED and the RANDOM_*
 * facilities.
 *
 * Operands arrive pre-lowered. ASSOCIATED takes the pointer and a target
 * that may be a typed null sentinel when the query is unary. RANDOM_SEED
 * picks its runtime variant from which optional operand is present.
 */

use crate::context::LoweringContext;
use crate::emit_call::emit_runtime_call;
use crate::errors::{LowerError, LowerResult};
use crate::marshal::{append_source_location, marshal_args};
use crate::runtime::{resolve, ResolvedCallee, RuntimeFunc};
use crate::stmt::RandomSeedArgs;
use fortir_core::builder::FunctionBuilder;
use fortir_core::values::Value;
use fortir_core::IrError;
use tracing::debug;

/// Emits the association query and returns its logical result.
pub fn lower_pointer_associated(
    ctx: &mut LoweringContext,
    builder: &mut FunctionBuilder,
    pointer: Value,
    target: Value,
) -> LowerResult<Value> {
    builder.set_source_location(ctx.span());

    let callee = resolve(builder, RuntimeFunc::PointerIsAssociatedWith)?;
    let args = marshal_args(builder, &callee, vec![pointer, target])?;
    let result = emit_runtime_call(builder, &callee, args)?;

    result.ok_or_else(|| missing_result(&callee))
}

pub fn lower_random_init(
    ctx: &mut LoweringContext,
    builder: &mut FunctionBuilder,
    repeatable: Value,
    image_distinct: Value,
) -> LowerResult<()> {
    builder.set_source_location(ctx.span());

    let callee = resolve(builder, RuntimeFunc::RandomInit)?;
    let args = marshal_args(builder, &callee, vec![repeatable, image_distinct])?;
    emit_runtime_call(builder, &callee, args)?;
    Ok(())
}

pub fn lower_random_number(
    ctx: &mut LoweringContext,
    builder: &mut FunctionBuilder,
    harvest: Value,
) -> LowerResult<()> {
    builder.set_source_location(ctx.span());

    let callee = resolve(builder, RuntimeFunc::RandomNumber)?;
    let mut args = vec![harvest];
    append_source_location(ctx, &mut args);
    let args = marshal_args(builder, &callee, args)?;
    emit_runtime_call(builder, &callee, args)?;
    Ok(())
}

/// Variant selection is a pure function of operand presence: none selects
/// the default-put form, otherwise exactly one of SIZE, PUT, GET selects
/// its entry point. Two or more present is a caller contract violation.
pub fn lower_random_seed(
    ctx: &mut LoweringContext,
    builder: &mut FunctionBuilder,
    seed_args: &RandomSeedArgs,
) -> LowerResult<()> {
    let present = seed_args.present_count();
    if present > 1 {
        return Err(LowerError::SeedArgConflict { found: present });
    }

    builder.set_source_location(ctx.span());

    let (func, operand) = if let Some(size) = &seed_args.size {
        (RuntimeFunc::RandomSeedSize, Some(size.clone()))
    } else if let Some(put) = &seed_args.put {
        (RuntimeFunc::RandomSeedPut, Some(put.clone()))
    } else if let Some(get) = &seed_args.get {
        (RuntimeFunc::RandomSeedGet, Some(get.clone()))
    } else {
        (RuntimeFunc::RandomSeedDefaultPut, None)
    };
    debug!("RANDOM_SEED selected {}", func);

    let callee = resolve(builder, func)?;
    let mut args: Vec<Value> = operand.into_iter().collect();
    if callee.func.has_source_loc_args() {
        append_source_location(ctx, &mut args);
    }
    let args = marshal_args(builder, &callee, args)?;
    emit_runtime_call(builder, &callee, args)?;
    Ok(())
}

fn missing_result(callee: &ResolvedCallee) -> LowerError {
    LowerError::Ir(IrError::InvalidInstruction(format!(
        "{} returned no value",
        callee.symbol
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fortir_core::instructions::Instruction;
    use fortir_core::module::Module;
    use fortir_core::source_location::SourceFiles;
    use fortir_core::types::Type;
    use fortir_core::values::Constant;

    fn harness() -> (LoweringContext, Module) {
        (LoweringContext::new(SourceFiles::new()), Module::new("test"))
    }

    fn first_call(module: &Module, name: &str) -> (String, Vec<Value>) {
        let function = module.get_function(name).unwrap();
        let entry = function.body.get_block(function.entry_block()).unwrap();
        match &entry.instructions[0] {
            Instruction::Call { callee, args, .. } => (callee.clone(), args.clone()),
            other => panic!("unexpected instruction {:?}", other),
        }
    }

    #[test]
    fn test_associated_with_null_target() {
        let (mut ctx, mut module) = harness();
        let mut builder = FunctionBuilder::new(&mut module, "main");

        let pointer = builder.null_constant(Type::Descriptor);
        let target = builder.null_constant(Type::Descriptor);
        let result = lower_pointer_associated(&mut ctx, &mut builder, pointer, target).unwrap();
        assert_eq!(builder.value_type(&result).unwrap(), Type::Logical);

        builder.return_void().unwrap();
        builder.build().unwrap();

        let (callee, args) = first_call(&module, "main");
        assert_eq!(callee, "_FortranAPointerIsAssociatedWith");
        assert_eq!(args[1], Value::Constant(Constant::Null(Type::Descriptor)));
    }

    #[test]
    fn test_random_init_flag_order() {
        let (mut ctx, mut module) = harness();
        let mut builder = FunctionBuilder::new(&mut module, "main");

        let repeatable = builder.logical_constant(true);
        let image_distinct = builder.logical_constant(false);
        lower_random_init(&mut ctx, &mut builder, repeatable, image_distinct).unwrap();
        builder.return_void().unwrap();
        builder.build().unwrap();

        let (callee, args) = first_call(&module, "main");
        assert_eq!(callee, "_FortranARandomInit");
        assert_eq!(
            args,
            vec![
                Value::Constant(Constant::Logical(true)),
                Value::Constant(Constant::Logical(false)),
            ]
        );
    }

    #[test]
    fn test_random_number_appends_location() {
        let (mut ctx, mut module) = harness();
        let mut builder = FunctionBuilder::new(&mut module, "main");

        let harvest = builder.null_constant(Type::Descriptor);
        lower_random_number(&mut ctx, &mut builder, harvest).unwrap();
        builder.return_void().unwrap();
        builder.build().unwrap();

        let (callee, args) = first_call(&module, "main");
        assert_eq!(callee, "_FortranARandomNumber");
        assert_eq!(args.len(), 3);
        assert_eq!(args[1], Value::Constant(Constant::Str("unknown".to_string())));
        assert_eq!(args[2], Value::Constant(Constant::Int(0, 32)));
    }

    #[test]
    fn test_random_seed_variants() {
        let descriptor = || Value::Constant(Constant::Null(Type::Descriptor));
        let cases = [
            (RandomSeedArgs::default(), "_FortranARandomSeedDefaultPut", 0),
            (
                RandomSeedArgs {
                    size: Some(descriptor()),
                    ..Default::default()
                },
                "_FortranARandomSeedSize",
                3,
            ),
            (
                RandomSeedArgs {
                    put: Some(descriptor()),
                    ..Default::default()
                },
                "_FortranARandomSeedPut",
                3,
            ),
            (
                RandomSeedArgs {
                    get: Some(descriptor()),
                    ..Default::default()
                },
                "_FortranARandomSeedGet",
                3,
            ),
        ];

        for (seed_args, expected_callee, expected_argc) in cases {
            let (mut ctx, mut module) = harness();
            let mut builder = FunctionBuilder::new(&mut module, "main");

            lower_random_seed(&mut ctx, &mut builder, &seed_args).unwrap();
            builder.return_void().unwrap();
            builder.build().unwrap();

            let (callee, args) = first_call(&module, "main");
            assert_eq!(callee, expected_callee);
            assert_eq!(args.len(), expected_argc);
        }
    }

    #[test]
    fn test_random_seed_conflict_rejected() {
        let (mut ctx, mut module) = harness();
        let mut builder = FunctionBuilder::new(&mut module, "main");

        let descriptor = Value::Constant(Constant::Null(Type::Descriptor));
        let conflicting = RandomSeedArgs {
            size: Some(descriptor.clone()),
            put: Some(descriptor),
            ..Default::default()
        };
        let err = lower_random_seed(&mut ctx, &mut builder, &conflicting);
        assert!(matches!(
            err,
            Err(LowerError::SeedArgConflict { found: 2 })
        ));

        let entry = builder.current_block();
        assert!(builder
            .current_function()
            .body
            .get_block(entry)
            .unwrap()
            .is_empty());
        assert!(builder.module().declarations.is_empty());
    }
}
