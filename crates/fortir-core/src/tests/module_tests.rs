use crate::block::Terminator;
use crate::builder::FunctionBuilder;
use crate::function::FuncDecl;
use crate::module::Module;
use crate::types::{FuncType, Type};
use crate::IrError;

fn stop_decl() -> FuncDecl {
    FuncDecl::new(
        "_FortranAStopStatement",
        FuncType::new(vec![Type::Int(32), Type::Logical, Type::Logical], Type::Unit),
        true,
    )
}

#[test]
fn test_declare_func_is_idempotent() {
    let mut module = Module::new("test");

    module.declare_func(stop_decl()).unwrap();
    module.declare_func(stop_decl()).unwrap();

    assert_eq!(module.declarations.len(), 1);
    assert!(module.find_decl("_FortranAStopStatement").unwrap().never_returns);
}

#[test]
fn test_declare_func_rejects_conflicts() {
    let mut module = Module::new("test");
    module.declare_func(stop_decl()).unwrap();

    let conflicting = FuncDecl::new(
        "_FortranAStopStatement",
        FuncType::new(vec![Type::Int(64)], Type::Unit),
        true,
    );
    let err = module.declare_func(conflicting);
    assert!(matches!(err, Err(IrError::TypeError(_))));

    let flag_conflict = FuncDecl::new(
        "_FortranAStopStatement",
        FuncType::new(vec![Type::Int(32), Type::Logical, Type::Logical], Type::Unit),
        false,
    );
    assert!(module.declare_func(flag_conflict).is_err());
}

#[test]
fn test_validate_accepts_well_formed_module() {
    let mut module = Module::new("test");
    module.declare_func(stop_decl()).unwrap();

    let mut builder = FunctionBuilder::new(&mut module, "main");
    let code = builder.int_constant(0, &Type::Int(32)).unwrap();
    let flag = builder.logical_constant(false);
    builder
        .call("_FortranAStopStatement", vec![code, flag.clone(), flag])
        .unwrap();
    builder.unreachable().unwrap();
    builder.split_block().unwrap();
    builder.return_void().unwrap();
    builder.build().unwrap();

    module.validate().unwrap();
}

#[test]
fn test_validate_flags_unterminated_block() {
    let mut module = Module::new("test");

    let mut function = crate::function::Function::new(crate::function::FuncSignature::new("main"));
    function.body.create_block();
    if let Some(entry) = function.body.get_block_mut(function.body.entry_block) {
        entry.terminator = Terminator::Return(None);
    }
    module.add_function(function);

    let err = module.validate();
    assert!(matches!(err, Err(IrError::ValidationError(_))));
}

#[test]
fn test_validate_flags_unknown_branch_target() {
    let mut module = Module::new("test");

    let mut function = crate::function::Function::new(crate::function::FuncSignature::new("main"));
    if let Some(entry) = function.body.get_block_mut(function.body.entry_block) {
        entry.terminator = Terminator::Jump(crate::block::BlockId(7));
    }
    module.add_function(function);

    let err = module.validate();
    assert!(matches!(err, Err(IrError::ValidationError(_))));
}

#[test]
fn test_validate_flags_argument_count_mismatch() {
    let mut module = Module::new("test");
    module.declare_func(stop_decl()).unwrap();

    let mut function = crate::function::Function::new(crate::function::FuncSignature::new("main"));
    if let Some(entry) = function.body.get_block_mut(function.body.entry_block) {
        entry
            .instructions
            .push(crate::instructions::Instruction::Call {
                result: None,
                callee: "_FortranAStopStatement".to_string(),
                args: vec![],
            });
        entry.terminator = Terminator::Unreachable;
    }
    module.add_function(function);

    let err = module.validate();
    assert!(matches!(err, Err(IrError::ValidationError(_))));
}

#[test]
fn test_validate_flags_redefined_temp() {
    use crate::instructions::Instruction;
    use crate::values::{Constant, Value};

    let mut module = Module::new("test");

    let mut function = crate::function::Function::new(crate::function::FuncSignature::new("main"));
    let temp = function.body.add_temp(Type::Int(32));
    if let Some(entry) = function.body.get_block_mut(function.body.entry_block) {
        for _ in 0..2 {
            entry.instructions.push(Instruction::Convert {
                result: Value::Temp(temp),
                value: Value::Constant(Constant::Int(1, 64)),
                to: Type::Int(32),
            });
        }
        entry.terminator = Terminator::Return(None);
    }
    module.add_function(function);

    let err = module.validate();
    assert!(matches!(err, Err(IrError::ValidationError(_))));
}

#[test]
fn test_validate_flags_untyped_result_temp() {
    use crate::instructions::Instruction;
    use crate::values::{Constant, TempId, Value};

    let mut module = Module::new("test");

    let mut function = crate::function::Function::new(crate::function::FuncSignature::new("main"));
    if let Some(entry) = function.body.get_block_mut(function.body.entry_block) {
        entry.instructions.push(Instruction::Convert {
            result: Value::Temp(TempId(9)),
            value: Value::Constant(Constant::Int(1, 64)),
            to: Type::Int(32),
        });
        entry.terminator = Terminator::Return(None);
    }
    module.add_function(function);

    let err = module.validate();
    assert!(matches!(err, Err(IrError::ValidationError(_))));
}

#[test]
fn test_validate_flags_undeclared_callee() {
    let mut module = Module::new("test");

    let mut function = crate::function::Function::new(crate::function::FuncSignature::new("main"));
    if let Some(entry) = function.body.get_block_mut(function.body.entry_block) {
        entry
            .instructions
            .push(crate::instructions::Instruction::Call {
                result: None,
                callee: "_FortranAMissing".to_string(),
                args: vec![],
            });
        entry.terminator = Terminator::Return(None);
    }
    module.add_function(function);

    let err = module.validate();
    assert!(matches!(err, Err(IrError::ValidationError(_))));
}
